use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    /// No action sequence reaches the goal from the given state.
    #[error("no plan reaches the goal")]
    NoPlanFound,

    #[error("planning aborted after visiting {limit} nodes")]
    BudgetExceeded { limit: usize },
}
