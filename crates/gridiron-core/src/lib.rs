//! # Gridiron Core
//!
//! Per-play resolution engine for American football simulation.
//!
//! Given a pre-snap situation, the two units and the called play, this crate
//! produces the play's outcome, any penalty, the enforcement of that penalty,
//! and the resulting down, distance and field position. It is a stateless
//! library: the game loop owns the clock, the score and possession.
//!
//! ## Architecture
//!
//! ```text
//! PlayContext + ParticipantAttributes + PlayArchetype
//!        │
//!        ▼
//!  outcome::effectiveness ──► outcome::YardageGenerator ──► outcome::ModifierTable
//!                                        │
//!                                        ▼ RawPlayOutcome
//!                           penalty::PenaltyDetector ──► PenaltyVerdict?
//!                                        │
//!                                        ▼
//!              penalty::should_accept / penalty::calculate_enforcement
//!                                        │
//!                                        ▼
//!                              result::assemble ──► PlayResult
//! ```
//!
//! - **Outcome**: attribute effectiveness, per-archetype yardage models,
//!   situational modifiers
//! - **Penalty**: detection, rulebook enforcement, accept/decline
//! - **Engine**: end-to-end orchestration and parallel batches
//!
//! ## Determinism
//!
//! Every random draw comes from an RNG passed in by the caller. The same
//! inputs and the same seed always produce the same [`result::PlayResult`].
//!
//! ## Usage
//!
//! ```
//! use gridiron_core::archetype::PlayArchetype;
//! use gridiron_core::context::{PlayContext, Situation};
//! use gridiron_core::engine::{PlayEngine, PlayInput};
//!
//! let engine = PlayEngine::default();
//! let situation = Situation::new(25, 1, 10).unwrap();
//! let input = PlayInput::new(PlayContext::new(situation), PlayArchetype::PowerRun)
//!     .with_ratings(62.0, 55.0);
//!
//! let result = engine.resolve_seeded(&input, 2024);
//! assert!((1..=4).contains(&result.final_down));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod archetype;
pub mod attributes;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod penalty;
pub mod result;

pub use config::EngineConfig;
pub use engine::{PlayEngine, PlayInput};
pub use error::{ConfigError, ContractViolation};
pub use result::{DriveStatus, PlayResult};

#[cfg(test)]
mod tests;
