#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::facts::FactSet;
use crate::Plannable;

/// An ordered action sequence produced by a planner.
///
/// Steps are indices into the action slice the plan was computed from, in execution order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plan {
    steps: Vec<usize>,
    cost: f32,
}

impl Plan {
    pub fn new(steps: Vec<usize>, cost: f32) -> Self {
        Self { steps, cost }
    }

    /// The zero-cost plan for a goal that already holds.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Resolve the steps against the slice the plan was made from.
    ///
    /// # Panics
    ///
    /// When iterated, if a step index is out of bounds for `actions`. This and the other helpers
    /// taking an action slice expect the one passed to the planner.
    pub fn actions<'a, A>(&'a self, actions: &'a [A]) -> impl Iterator<Item = &'a A> + 'a {
        self.steps.iter().map(move |&idx| &actions[idx])
    }

    pub fn names<'a, A: Plannable>(&'a self, actions: &'a [A]) -> Vec<&'a str> {
        self.actions(actions).map(|a| a.name()).collect()
    }

    /// Fold the effects of every step into `initial`, in order.
    pub fn simulate<A: Plannable>(&self, initial: &FactSet, actions: &[A]) -> FactSet {
        let mut state = initial.clone();
        for action in self.actions(actions) {
            state.apply(action.spec().effects());
        }
        state
    }
}
