//! Outcome generation: what happened on the field, before any flags.
//!
//! Components, leaves first:
//!
//! - [`effectiveness`]: attribute fit for an archetype, in `[0, 1]`
//! - [`ModifierTable`]: ordered situational multipliers
//! - [`YardageGenerator`]: samples a [`RawPlayOutcome`]

mod effectiveness;
mod generator;
mod modifiers;

pub use effectiveness::{effectiveness, elite_rating};
pub use generator::{ArchetypeModel, BreakawayConfig, GeneratorConfig, YardageGenerator};
pub(crate) use generator::check_rate;
pub use modifiers::{ModifierTable, SituationalPredicate, SituationalRule};

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of play it turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Ball carried or caught for `yards_gained` (possibly negative).
    Gain,
    /// Ball carried into the end zone.
    Touchdown,
    /// Fumble lost or interception.
    Turnover,
    /// Passer tackled behind the line.
    Sack,
    /// Pass fell incomplete.
    Incomplete,
}

/// Generated play outcome, frozen once the modifier stage has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawPlayOutcome {
    /// Outcome category.
    pub kind: OutcomeKind,
    /// Net yards from the line of scrimmage to where the play ended.
    pub yards_gained: i32,
}

impl RawPlayOutcome {
    /// Outcome of the given kind and yardage.
    #[must_use]
    pub const fn new(kind: OutcomeKind, yards_gained: i32) -> Self {
        Self { kind, yards_gained }
    }

    /// Plain gain.
    #[must_use]
    pub const fn gain(yards_gained: i32) -> Self {
        Self::new(OutcomeKind::Gain, yards_gained)
    }

    /// Incomplete pass, no yardage.
    #[must_use]
    pub const fn incomplete() -> Self {
        Self::new(OutcomeKind::Incomplete, 0)
    }

    /// True for touchdowns.
    #[must_use]
    pub const fn is_touchdown(&self) -> bool {
        matches!(self.kind, OutcomeKind::Touchdown)
    }

    /// True for turnovers.
    #[must_use]
    pub const fn is_turnover(&self) -> bool {
        matches!(self.kind, OutcomeKind::Turnover)
    }
}

impl fmt::Display for RawPlayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OutcomeKind::Gain => write!(f, "gain of {}", self.yards_gained),
            OutcomeKind::Touchdown => write!(f, "touchdown ({} yards)", self.yards_gained),
            OutcomeKind::Turnover => write!(f, "turnover after {} yards", self.yards_gained),
            OutcomeKind::Sack => write!(f, "sack for {}", self.yards_gained),
            OutcomeKind::Incomplete => write!(f, "incomplete"),
        }
    }
}
