//! Deterministic, engine-agnostic planning primitives: fact-sets, action capabilities and plans.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod execute;
pub mod facts;
pub mod plan;

pub use action::{ActionSpec, GoapAction, InstantAction, InvalidCost, Plannable};
pub use execute::{PlanCursor, StepOutcome};
pub use facts::{FactKey, FactSet, FactValue, FactView};
pub use plan::Plan;
