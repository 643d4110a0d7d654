//! Error types for the play resolution core.
//!
//! Two families exist and they are handled very differently:
//!
//! - [`ConfigError`]: a bad configuration table. Surfaced when a config is
//!   loaded or validated. During play resolution the same conditions are
//!   recovered through documented fallbacks and logged instead.
//! - [`ContractViolation`]: an impossible pre-play state handed in by the
//!   caller. These are rejected up front by the validated constructors so
//!   that every resolution function downstream is total.

use thiserror::Error;

/// Configuration problem detected while loading or validating tables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A penalty name that is not part of the rulebook.
    #[error("unknown penalty kind: {0}")]
    UnknownPenaltyKind(String),

    /// A play archetype name with no statistical model.
    #[error("unknown play archetype: {0}")]
    UnknownArchetype(String),

    /// A probability outside `[0, 1]` or not finite.
    #[error("invalid rate for {name}: {value}")]
    InvalidRate {
        /// What the rate belongs to.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// A multiplier that is negative or not finite.
    #[error("invalid multiplier for {name}: {value}")]
    InvalidMultiplier {
        /// What the multiplier belongs to.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Distribution parameters that cannot be sampled.
    #[error("invalid model for {archetype}: {reason}")]
    InvalidModel {
        /// Archetype whose model is broken.
        archetype: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The config document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Impossible pre-play state supplied by the caller.
///
/// This signals an upstream defect, so it is never repaired silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// Down outside `1..=4`.
    #[error("down must be 1-4, got {0}")]
    InvalidDown(u8),

    /// Yard line outside `0..=100`.
    #[error("yard line must be 0-100, got {0}")]
    InvalidYardLine(u8),

    /// Distance below 1 or reaching past the goal line.
    #[error("distance {distance} is invalid at yard line {yard_line}")]
    InvalidDistance {
        /// Yards to go.
        distance: u8,
        /// Line of scrimmage.
        yard_line: u8,
    },

    /// Quarter outside `1..=5` (5 is overtime).
    #[error("quarter must be 1-5, got {0}")]
    InvalidQuarter(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_violation_messages_name_the_value() {
        assert_eq!(
            ContractViolation::InvalidDown(5).to_string(),
            "down must be 1-4, got 5"
        );
        assert_eq!(
            ContractViolation::InvalidDistance {
                distance: 12,
                yard_line: 95
            }
            .to_string(),
            "distance 12 is invalid at yard line 95"
        );
    }

    #[test]
    fn parse_error_converts_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let config_err: ConfigError = err.into();
        assert!(matches!(config_err, ConfigError::Parse(_)));
    }
}
