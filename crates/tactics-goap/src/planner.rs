#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tactics_core::{FactKey, FactSet, FactValue, FactView, GoapAction, Plan, Plannable};

use crate::PlanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GoapPlannerConfig {
    /// Abort after creating this many search nodes. `None` searches the whole tree.
    pub max_nodes: Option<usize>,
    /// Skip subtrees that already cost at least as much as the best plan found so far.
    pub prune_by_cost: bool,
}

impl Default for GoapPlannerConfig {
    fn default() -> Self {
        Self {
            max_nodes: None,
            prune_by_cost: true,
        }
    }
}

/// Counters from one planning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanStats {
    /// Search nodes created, leaves included.
    pub nodes: usize,
    /// Nodes whose state satisfied the goal.
    pub leaves: usize,
}

/// Exhaustive depth-first GOAP search.
///
/// Each branch may use an action at most once, so the tree is finite. Among all goal-satisfying
/// sequences the cheapest wins; on equal cost the one reached first (actions tried in slice order)
/// is kept.
#[derive(Debug, Clone, Default)]
pub struct GoapPlanner {
    config: GoapPlannerConfig,
}

impl GoapPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: GoapPlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GoapPlannerConfig {
        &self.config
    }

    /// Cheapest plan from `initial` to a state satisfying `goal`.
    ///
    /// Every action is reset first. A goal that already holds yields an empty zero-cost plan.
    ///
    /// # Panics
    ///
    /// If an action cost is negative or not finite.
    pub fn plan<A>(
        &self,
        initial: &FactSet,
        goal: &FactSet,
        actions: &mut [A],
    ) -> Result<Plan, PlanError>
    where
        A: Plannable,
    {
        self.plan_with_stats(initial, goal, actions).map(|(plan, _)| plan)
    }

    /// [`GoapPlanner::plan`] for a live agent: actions whose procedural precondition fails for
    /// `agent` are left out of the search.
    pub fn plan_for_agent<C, A>(
        &self,
        agent: &C,
        initial: &FactSet,
        goal: &FactSet,
        actions: &mut [A],
    ) -> Result<Plan, PlanError>
    where
        C: ?Sized,
        A: GoapAction<C>,
    {
        reset_all(actions);
        let usable = actions
            .iter()
            .map(|a| a.check_procedural_precondition(agent))
            .collect();
        self.search(initial, goal, actions, usable).map(|(plan, _)| plan)
    }

    pub fn plan_with_stats<A>(
        &self,
        initial: &FactSet,
        goal: &FactSet,
        actions: &mut [A],
    ) -> Result<(Plan, PlanStats), PlanError>
    where
        A: Plannable,
    {
        reset_all(actions);
        let usable = vec![true; actions.len()];
        self.search(initial, goal, actions, usable)
    }

    fn search<A>(
        &self,
        initial: &FactSet,
        goal: &FactSet,
        actions: &[A],
        usable: Vec<bool>,
    ) -> Result<(Plan, PlanStats), PlanError>
    where
        A: Plannable,
    {
        for action in actions {
            let cost = action.cost();
            assert!(
                cost.is_finite() && cost >= 0.0,
                "action {:?} has invalid cost {cost}",
                action.name()
            );
        }

        if initial.satisfies(goal) {
            tracing::debug!("goal already satisfied; empty plan");
            return Ok((Plan::empty(), PlanStats::default()));
        }

        let mut search = Search {
            actions,
            goal,
            config: &self.config,
            usable,
            path: Vec::new(),
            best: None,
            stats: PlanStats::default(),
        };
        let root = Layer {
            facts: initial,
            parent: None,
        };
        let outcome = search.expand(&root, 0.0);
        let stats = search.stats;

        if let Err(err) = outcome {
            tracing::debug!(nodes = stats.nodes, %err, "planning aborted");
            return Err(err);
        }

        match search.best {
            Some(best) => {
                tracing::debug!(
                    nodes = stats.nodes,
                    leaves = stats.leaves,
                    steps = best.steps.len(),
                    cost = best.cost,
                    "plan found"
                );
                Ok((Plan::new(best.steps, best.cost), stats))
            }
            None => {
                tracing::debug!(nodes = stats.nodes, "no plan reaches the goal");
                Err(PlanError::NoPlanFound)
            }
        }
    }
}

fn reset_all<A: Plannable>(actions: &mut [A]) {
    for action in actions.iter_mut() {
        action.reset();
    }
}

/// World state of a search node: the effects of the action that produced it layered over the
/// parent's state. The root layer holds the initial facts.
struct Layer<'a> {
    facts: &'a FactSet,
    parent: Option<&'a Layer<'a>>,
}

impl FactView for Layer<'_> {
    fn fact(&self, key: &FactKey) -> Option<&FactValue> {
        let mut layer = Some(self);
        while let Some(current) = layer {
            if let Some(value) = current.facts.get(key.as_str()) {
                return Some(value);
            }
            layer = current.parent;
        }
        None
    }
}

struct Best {
    cost: f32,
    steps: Vec<usize>,
}

struct Search<'a, A> {
    actions: &'a [A],
    goal: &'a FactSet,
    config: &'a GoapPlannerConfig,
    // Actions still available on the current branch.
    usable: Vec<bool>,
    path: Vec<usize>,
    best: Option<Best>,
    stats: PlanStats,
}

impl<A: Plannable> Search<'_, A> {
    fn expand(&mut self, state: &Layer<'_>, cost: f32) -> Result<(), PlanError> {
        let actions = self.actions;
        for (idx, action) in actions.iter().enumerate() {
            if !self.usable[idx] {
                continue;
            }
            let spec = action.spec();
            if !spec.is_applicable(state) {
                continue;
            }

            let child_cost = cost + spec.cost();
            if self.config.prune_by_cost
                && self.best.as_ref().is_some_and(|b| child_cost >= b.cost)
            {
                continue;
            }

            self.stats.nodes += 1;
            if let Some(limit) = self.config.max_nodes {
                if self.stats.nodes > limit {
                    return Err(PlanError::BudgetExceeded { limit });
                }
            }
            tracing::trace!(
                action = spec.name(),
                depth = self.path.len(),
                cost = child_cost,
                "expand"
            );

            let child = Layer {
                facts: spec.effects(),
                parent: Some(state),
            };
            self.path.push(idx);

            if child.satisfies(self.goal) {
                self.stats.leaves += 1;
                if self.best.as_ref().map_or(true, |b| child_cost < b.cost) {
                    self.best = Some(Best {
                        cost: child_cost,
                        steps: self.path.clone(),
                    });
                }
            } else {
                self.usable[idx] = false;
                self.expand(&child, child_cost)?;
                self.usable[idx] = true;
            }

            self.path.pop();
        }
        Ok(())
    }
}
