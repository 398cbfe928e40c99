use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use thiserror::Error;

use crate::facts::{FactKey, FactSet, FactValue, FactView};

/// An action cost the planner cannot sum: negative, NaN or infinite.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("action cost must be finite and >= 0 (got {0})")]
pub struct InvalidCost(pub f32);

/// Static planning data of an action: what it needs, what it changes and what it costs.
///
/// Deserialization applies the same cost check as [`ActionSpec::try_new`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawActionSpec")
)]
pub struct ActionSpec {
    name: Cow<'static, str>,
    cost: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    preconditions: FactSet,
    #[cfg_attr(feature = "serde", serde(default))]
    effects: FactSet,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawActionSpec {
    name: Cow<'static, str>,
    cost: f32,
    #[serde(default)]
    preconditions: FactSet,
    #[serde(default)]
    effects: FactSet,
}

#[cfg(feature = "serde")]
impl TryFrom<RawActionSpec> for ActionSpec {
    type Error = InvalidCost;

    fn try_from(raw: RawActionSpec) -> Result<Self, Self::Error> {
        let mut spec = Self::try_new(raw.name, raw.cost)?;
        spec.preconditions = raw.preconditions;
        spec.effects = raw.effects;
        Ok(spec)
    }
}

impl ActionSpec {
    /// # Panics
    ///
    /// If `cost` is negative or not finite. Use [`ActionSpec::try_new`] for untrusted input.
    pub fn new(name: impl Into<Cow<'static, str>>, cost: f32) -> Self {
        match Self::try_new(name, cost) {
            Ok(spec) => spec,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(name: impl Into<Cow<'static, str>>, cost: f32) -> Result<Self, InvalidCost> {
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(InvalidCost(cost));
        }
        Ok(Self {
            name: name.into(),
            cost,
            preconditions: FactSet::new(),
            effects: FactSet::new(),
        })
    }

    pub fn with_precondition(
        mut self,
        key: impl Into<FactKey>,
        value: impl Into<FactValue>,
    ) -> Self {
        self.add_precondition(key, value);
        self
    }

    pub fn with_effect(mut self, key: impl Into<FactKey>, value: impl Into<FactValue>) -> Self {
        self.add_effect(key, value);
        self
    }

    pub fn add_precondition(&mut self, key: impl Into<FactKey>, value: impl Into<FactValue>) {
        self.preconditions.insert(key, value);
    }

    pub fn add_effect(&mut self, key: impl Into<FactKey>, value: impl Into<FactValue>) {
        self.effects.insert(key, value);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub fn preconditions(&self) -> &FactSet {
        &self.preconditions
    }

    pub fn effects(&self) -> &FactSet {
        &self.effects
    }

    /// Every precondition is present in `state` with an equal value.
    pub fn is_applicable<V: FactView + ?Sized>(&self, state: &V) -> bool {
        state.satisfies(&self.preconditions)
    }
}

/// The planning-facing side of an action.
///
/// The planner only reads [`Plannable::spec`] and calls [`Plannable::reset`]; it never needs to
/// know the concrete action type or the agent it runs against.
pub trait Plannable {
    fn spec(&self) -> &ActionSpec;

    /// Clear per-execution bookkeeping. Called on every action before each planning cycle.
    fn reset(&mut self);

    fn name(&self) -> &str {
        self.spec().name()
    }

    fn cost(&self) -> f32 {
        self.spec().cost()
    }
}

/// A planning action as seen by an agent: [`Plannable`] plus the execution contract used by
/// [`crate::PlanCursor`]. `C` is the live agent context the action runs against.
pub trait GoapAction<C: ?Sized>: Plannable {
    fn is_done(&self) -> bool;

    /// Run one step against the agent.
    ///
    /// Returning `false` means the action can no longer proceed; the agent should discard its
    /// plan and replan.
    fn perform(&mut self, agent: &mut C) -> bool;

    /// Extra run-time gating beyond the static preconditions (e.g. "is an enemy visible").
    fn check_procedural_precondition(&self, _agent: &C) -> bool {
        true
    }

    /// Whether the execution layer has to move the agent into range before `perform`.
    fn requires_in_range(&self) -> bool {
        false
    }
}

impl<A> Plannable for Box<A>
where
    A: Plannable + ?Sized,
{
    fn spec(&self) -> &ActionSpec {
        (**self).spec()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<C, A> GoapAction<C> for Box<A>
where
    C: ?Sized,
    A: GoapAction<C> + ?Sized,
{
    fn is_done(&self) -> bool {
        (**self).is_done()
    }

    fn perform(&mut self, agent: &mut C) -> bool {
        (**self).perform(agent)
    }

    fn check_procedural_precondition(&self, agent: &C) -> bool {
        (**self).check_procedural_precondition(agent)
    }

    fn requires_in_range(&self) -> bool {
        (**self).requires_in_range()
    }
}

/// Data-only action that completes on its first `perform`.
///
/// Useful for action sets loaded from data, for offline planning and for tests.
#[derive(Debug, Clone, PartialEq)]
pub struct InstantAction {
    spec: ActionSpec,
    done: bool,
}

impl InstantAction {
    pub fn new(spec: ActionSpec) -> Self {
        Self { spec, done: false }
    }
}

impl From<ActionSpec> for InstantAction {
    fn from(spec: ActionSpec) -> Self {
        Self::new(spec)
    }
}

impl Plannable for InstantAction {
    fn spec(&self) -> &ActionSpec {
        &self.spec
    }

    fn reset(&mut self) {
        self.done = false;
    }
}

impl<C: ?Sized> GoapAction<C> for InstantAction {
    fn is_done(&self) -> bool {
        self.done
    }

    fn perform(&mut self, _agent: &mut C) -> bool {
        self.done = true;
        true
    }
}
