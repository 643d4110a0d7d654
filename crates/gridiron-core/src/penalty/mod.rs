//! Penalties: who gets flagged, how the flag is walked off, and whether the
//! other side takes it.
//!
//! # Architecture
//!
//! ```text
//! PenaltyDetector::check_for_penalty ──► PenaltyVerdict
//!                                            │ foul()
//!                                            ▼
//!                   should_accept ──► calculate_enforcement (accepted)
//!                                 └─► declined_state        (play stands)
//!                                            │
//!                                            ▼
//!                                     PenaltyDecision
//! ```
//!
//! [`PenaltyKind`] is a closed catalogue; every kind carries a constant
//! [`PenaltyRule`]. Enforcement and decision are pure functions. Detection
//! is the only part that draws random numbers, and it draws them from the
//! caller's RNG.

mod decision;
mod detection;
mod enforcement;
mod kind;

pub use decision::{should_accept, PenaltyDecision};
pub use detection::{DisciplineCurve, PenaltyConfig, PenaltyDetector, PenaltyVerdict};
pub use enforcement::{calculate_enforcement, declined_state, EnforcementResult, Foul};
pub use kind::{EnforcementSpot, PenaltyKind, PenaltyRule, Timing};
