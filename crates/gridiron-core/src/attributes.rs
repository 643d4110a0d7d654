//! Participant rating bags.
//!
//! Ratings are on a 0-100 scale. A participant only carries the ratings the
//! roster subsystem knows about; anything missing reads as
//! [`NEUTRAL_RATING`], so an unknown participant behaves like an exactly
//! average one.
//!
//! # Example
//!
//! ```
//! use gridiron_core::attributes::{Attribute, ParticipantAttributes, PlayerId, NEUTRAL_RATING};
//!
//! let back = ParticipantAttributes::new(PlayerId::new(22))
//!     .with(Attribute::Speed, 91)
//!     .with(Attribute::Vision, 74);
//!
//! assert_eq!(back.rating(Attribute::Speed), 91.0);
//! assert_eq!(back.rating(Attribute::Discipline), NEUTRAL_RATING);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Rating assumed for any attribute a participant does not carry.
pub const NEUTRAL_RATING: f64 = 50.0;

/// Highest rating on the scale.
pub const MAX_RATING: u8 = 100;

/// Opaque roster reference for a participant.
///
/// Newtype over `u64` so penalty verdicts can name the responsible player
/// without borrowing roster data.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Wraps a raw roster id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw roster id.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Rated attribute.
///
/// The first four feed penalty discipline; the rest feed play effectiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Rule adherence.
    Discipline,
    /// Calm under pressure.
    Composure,
    /// Veteran savvy.
    Experience,
    /// Clean fundamentals.
    Technique,
    /// Top-end speed.
    Speed,
    /// Functional strength.
    Strength,
    /// Change of direction.
    Agility,
    /// Reading blocks and lanes.
    Vision,
    /// Running through contact.
    Power,
    /// Making defenders miss.
    Elusiveness,
    /// Holding onto the ball.
    BallSecurity,
    /// Passing accuracy.
    Accuracy,
    /// Arm strength.
    ArmStrength,
    /// Pre- and post-snap recognition.
    Awareness,
    /// Route running.
    RouteRunning,
    /// Catching.
    Hands,
}

/// Read-only rating bag for one participant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantAttributes {
    id: PlayerId,
    ratings: BTreeMap<Attribute, u8>,
}

impl ParticipantAttributes {
    /// Participant with no ratings; every attribute reads as neutral.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            ratings: BTreeMap::new(),
        }
    }

    /// Sets one rating, capped at [`MAX_RATING`].
    #[must_use]
    pub fn with(mut self, attribute: Attribute, rating: u8) -> Self {
        self.ratings.insert(attribute, rating.min(MAX_RATING));
        self
    }

    /// Roster reference.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Rating for `attribute`, or [`NEUTRAL_RATING`] when absent.
    #[must_use]
    pub fn rating(&self, attribute: Attribute) -> f64 {
        self.ratings
            .get(&attribute)
            .map_or(NEUTRAL_RATING, |&r| f64::from(r))
    }

    /// True when the rating was supplied rather than defaulted.
    #[must_use]
    pub fn has(&self, attribute: Attribute) -> bool {
        self.ratings.contains_key(&attribute)
    }
}
