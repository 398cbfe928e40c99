use crate::{GoapAction, Plan};

/// Result of advancing a [`PlanCursor`] by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// `action` performed a step and is not done yet.
    Running { action: usize },
    /// `action` finished this tick; the cursor moved to the next step.
    Completed { action: usize },
    /// Every step is done.
    Finished,
    /// `action` could not proceed. The rest of the plan was discarded; replan.
    Failed { action: usize },
}

/// Walks a [`Plan`] against live actions.
///
/// Each tick performs the head action until it reports done, then advances. A `perform` that
/// returns `false` discards the remaining steps.
#[derive(Debug, Clone)]
pub struct PlanCursor {
    plan: Plan,
    index: usize,
    failed: Option<usize>,
}

impl PlanCursor {
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            index: 0,
            failed: None,
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Action index of the head step, if any.
    pub fn current_step(&self) -> Option<usize> {
        if self.failed.is_some() {
            return None;
        }
        self.plan.steps().get(self.index).copied()
    }

    /// # Panics
    ///
    /// If the head step is out of bounds for `actions`.
    pub fn current<'a, A>(&self, actions: &'a [A]) -> Option<&'a A> {
        self.current_step().map(|idx| &actions[idx])
    }

    pub fn remaining(&self) -> &[usize] {
        if self.failed.is_some() {
            return &[];
        }
        &self.plan.steps()[self.index.min(self.plan.len())..]
    }

    pub fn is_finished(&self) -> bool {
        self.failed.is_none() && self.index >= self.plan.len()
    }

    pub fn has_failed(&self) -> bool {
        self.failed.is_some()
    }

    /// Advance the plan by one `perform` on the head action.
    ///
    /// # Panics
    ///
    /// If `actions` is not the slice the plan was made from and a step index is out of bounds.
    pub fn tick<C, A>(&mut self, agent: &mut C, actions: &mut [A]) -> StepOutcome
    where
        C: ?Sized,
        A: GoapAction<C>,
    {
        if let Some(action) = self.failed {
            return StepOutcome::Failed { action };
        }

        // Skip steps that completed outside of `perform` (e.g. finished by the movement layer).
        while let Some(&idx) = self.plan.steps().get(self.index) {
            if !actions[idx].is_done() {
                break;
            }
            self.index += 1;
        }

        let Some(&idx) = self.plan.steps().get(self.index) else {
            return StepOutcome::Finished;
        };

        let action = &mut actions[idx];
        if !action.perform(agent) {
            tracing::debug!(
                action = action.name(),
                step = self.index,
                "action could not proceed; discarding plan"
            );
            self.failed = Some(idx);
            return StepOutcome::Failed { action: idx };
        }

        if action.is_done() {
            self.index += 1;
            StepOutcome::Completed { action: idx }
        } else {
            StepOutcome::Running { action: idx }
        }
    }
}
