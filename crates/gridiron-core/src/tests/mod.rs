//! Crate-level test suites.
//!
//! - `determinism.rs`: same seed and inputs give identical results
//! - `statistics.rs`: distribution and penalty-rate targets over large samples
//! - `integration.rs`: full plays and drives through the engine
//! - `helpers.rs`: factories for situations, rosters and engines

mod helpers;
mod integration;

pub use helpers::*;
