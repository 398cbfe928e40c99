//! Umbrella crate that re-exports the `tactics-*` building blocks.
//!
//! On top of the re-exports it carries the pieces an application wires once: YAML
//! configuration ([`config`]), tracing setup ([`telemetry`]) and the reference tank actions
//! ([`tanks`]).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub use tactics_core as core;
pub use tactics_goap as goap;
pub use tactics_nav as nav;

pub mod config;
pub mod tanks;
pub mod telemetry;

pub use config::{LogConfig, LogFormat, TacticsConfig};
