//! Goal-oriented action planning.
//!
//! [`GoapPlanner`] searches the tree of action sequences reachable from a world-state snapshot and
//! returns the cheapest sequence whose effects satisfy a goal fact-set. Actions come from
//! `tactics-core` and are only inspected through [`tactics_core::Plannable`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod planner;

pub use error::PlanError;
pub use planner::{GoapPlanner, GoapPlannerConfig, PlanStats};
