//! Pre-play state handed in by the external game loop.
//!
//! Yard lines are measured from the offense's own goal line: `0` is the
//! offense's goal, `100` is the opponent's goal.
//!
//! [`Situation`] is the validated down/distance/field-position triple that
//! every rule in this crate reads. [`PlayContext`] wraps it with the rest of
//! the snapshot (formation, home flag, quarter, score).
//!
//! # Example
//!
//! ```
//! use gridiron_core::context::{PlayContext, Situation};
//!
//! let situation = Situation::new(25, 1, 10).unwrap();
//! assert_eq!(situation.line_to_gain(), 35);
//! assert!(Situation::new(25, 5, 10).is_err());
//!
//! let ctx = PlayContext::new(situation).with_home_offense(true);
//! assert!(ctx.offense_home());
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ContractViolation;

/// Length of the field between the goal lines.
pub const FIELD_LENGTH: u8 = 100;

/// Yards needed for a fresh set of downs.
pub const FIRST_DOWN_YARDS: u8 = 10;

// =============================================================================
// Side
// =============================================================================

/// Which team a rule or foul applies to, relative to possession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Team in possession.
    Offense,
    /// Team not in possession.
    Defense,
}

impl Side {
    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Offense => Self::Defense,
            Self::Defense => Self::Offense,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offense => write!(f, "offense"),
            Self::Defense => write!(f, "defense"),
        }
    }
}

// =============================================================================
// Formation
// =============================================================================

bitflags! {
    /// Formation descriptors attached to the snap.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FormationTags: u16 {
        /// Quarterback in shotgun alignment.
        const SHOTGUN = 1 << 0;
        /// Quarterback under center.
        const UNDER_CENTER = 1 << 1;
        /// Pistol alignment.
        const PISTOL = 1 << 2;
        /// No backs in the backfield.
        const EMPTY = 1 << 3;
        /// Three receivers to one side.
        const TRIPS = 1 << 4;
        /// Extra tight ends or linemen.
        const HEAVY = 1 << 5;
        /// Dedicated short-yardage goal line package.
        const GOAL_LINE = 1 << 6;
    }
}

// =============================================================================
// Situation
// =============================================================================

/// Validated down, distance and line of scrimmage.
///
/// Constructing one enforces the input contract: down in `1..=4`, yard line
/// in `0..=100`, distance at least 1 and never past the goal line. The fields
/// are private so a `Situation` in hand is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSituation")]
pub struct Situation {
    yard_line: u8,
    down: u8,
    distance: u8,
}

#[derive(Deserialize)]
struct RawSituation {
    yard_line: u8,
    down: u8,
    distance: u8,
}

impl TryFrom<RawSituation> for Situation {
    type Error = ContractViolation;

    fn try_from(raw: RawSituation) -> Result<Self, Self::Error> {
        Self::new(raw.yard_line, raw.down, raw.distance)
    }
}

impl Situation {
    /// Validates and builds a situation.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractViolation`] for any impossible combination.
    pub fn new(yard_line: u8, down: u8, distance: u8) -> Result<Self, ContractViolation> {
        if yard_line > FIELD_LENGTH {
            return Err(ContractViolation::InvalidYardLine(yard_line));
        }
        if !(1..=4).contains(&down) {
            return Err(ContractViolation::InvalidDown(down));
        }
        if distance == 0 || u16::from(yard_line) + u16::from(distance) > u16::from(FIELD_LENGTH) {
            return Err(ContractViolation::InvalidDistance {
                distance,
                yard_line,
            });
        }
        Ok(Self {
            yard_line,
            down,
            distance,
        })
    }

    /// First and ten (or first and goal) at the given line.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::InvalidYardLine`] if the line is not in
    /// `0..=99`.
    pub fn first_and_ten(yard_line: u8) -> Result<Self, ContractViolation> {
        if yard_line >= FIELD_LENGTH {
            return Err(ContractViolation::InvalidYardLine(yard_line));
        }
        Self::new(yard_line, 1, FIRST_DOWN_YARDS.min(FIELD_LENGTH - yard_line))
    }

    /// Line of scrimmage.
    #[must_use]
    pub const fn yard_line(&self) -> u8 {
        self.yard_line
    }

    /// Current down.
    #[must_use]
    pub const fn down(&self) -> u8 {
        self.down
    }

    /// Yards to go.
    #[must_use]
    pub const fn distance(&self) -> u8 {
        self.distance
    }

    /// Yard line the offense must reach for a first down.
    #[must_use]
    pub const fn line_to_gain(&self) -> u8 {
        self.yard_line + self.distance
    }

    /// Yards between the line of scrimmage and the opponent's goal.
    #[must_use]
    pub const fn yards_to_goal(&self) -> u8 {
        FIELD_LENGTH - self.yard_line
    }

    /// True when the line to gain is the goal line.
    #[must_use]
    pub const fn is_goal_to_go(&self) -> bool {
        self.line_to_gain() == FIELD_LENGTH
    }
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_go = if self.is_goal_to_go() {
            "goal".to_string()
        } else {
            self.distance.to_string()
        };
        write!(
            f,
            "{} & {} at {}",
            ordinal(self.down),
            to_go,
            self.yard_line
        )
    }
}

/// `1` -> `"1st"` and so on, for the four downs.
pub(crate) fn ordinal(down: u8) -> &'static str {
    match down {
        1 => "1st",
        2 => "2nd",
        3 => "3rd",
        _ => "4th",
    }
}

// =============================================================================
// PlayContext
// =============================================================================

/// Immutable snapshot of everything known before the snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayContext {
    situation: Situation,
    formation: FormationTags,
    offense_home: bool,
    quarter: u8,
    score_differential: i16,
}

impl PlayContext {
    /// Context for the given situation: first quarter, tied, offense away,
    /// no formation tags.
    #[must_use]
    pub const fn new(situation: Situation) -> Self {
        Self {
            situation,
            formation: FormationTags::empty(),
            offense_home: false,
            quarter: 1,
            score_differential: 0,
        }
    }

    /// Sets the formation tags.
    #[must_use]
    pub const fn with_formation(mut self, formation: FormationTags) -> Self {
        self.formation = formation;
        self
    }

    /// Sets whether the offense is the home team.
    #[must_use]
    pub const fn with_home_offense(mut self, offense_home: bool) -> Self {
        self.offense_home = offense_home;
        self
    }

    /// Sets the score differential from the offense's point of view.
    #[must_use]
    pub const fn with_score_differential(mut self, differential: i16) -> Self {
        self.score_differential = differential;
        self
    }

    /// Sets the quarter (5 is overtime).
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::InvalidQuarter`] outside `1..=5`.
    pub fn with_quarter(mut self, quarter: u8) -> Result<Self, ContractViolation> {
        if !(1..=5).contains(&quarter) {
            return Err(ContractViolation::InvalidQuarter(quarter));
        }
        self.quarter = quarter;
        Ok(self)
    }

    /// Down, distance and line of scrimmage.
    #[must_use]
    pub const fn situation(&self) -> &Situation {
        &self.situation
    }

    /// Formation tags.
    #[must_use]
    pub const fn formation(&self) -> FormationTags {
        self.formation
    }

    /// True when the offense is the home team.
    #[must_use]
    pub const fn offense_home(&self) -> bool {
        self.offense_home
    }

    /// True when `side` is the home team on this play.
    #[must_use]
    pub const fn is_home(&self, side: Side) -> bool {
        match side {
            Side::Offense => self.offense_home,
            Side::Defense => !self.offense_home,
        }
    }

    /// Quarter, 1-4, 5 for overtime.
    #[must_use]
    pub const fn quarter(&self) -> u8 {
        self.quarter
    }

    /// Offense score minus defense score.
    #[must_use]
    pub const fn score_differential(&self) -> i16 {
        self.score_differential
    }
}
