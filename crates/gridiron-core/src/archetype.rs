//! Play archetypes.
//!
//! An archetype is the categorical play style that picks both the
//! statistical yardage model and the attribute weighting used to score the
//! featured participant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::attributes::Attribute;
use crate::context::{FormationTags, Situation};
use crate::error::ConfigError;

/// Categorical play style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayArchetype {
    /// Downhill gap scheme.
    PowerRun,
    /// Inside zone.
    InsideZone,
    /// Outside zone / stretch.
    OutsideZone,
    /// Delayed handoff from a pass look.
    Draw,
    /// Three-step timing throws.
    QuickGame,
    /// Intermediate dropback concepts.
    Intermediate,
    /// Deep shots.
    Vertical,
    /// Screens.
    Screen,
    /// Play action pass.
    PlayAction,
    /// Short-yardage power from a heavy set.
    GoalLinePower,
    /// Fallback model for calls with no dedicated model.
    Generic,
}

impl PlayArchetype {
    /// Every archetype, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::PowerRun,
        Self::InsideZone,
        Self::OutsideZone,
        Self::Draw,
        Self::QuickGame,
        Self::Intermediate,
        Self::Vertical,
        Self::Screen,
        Self::PlayAction,
        Self::GoalLinePower,
        Self::Generic,
    ];

    /// Config and display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PowerRun => "power_run",
            Self::InsideZone => "inside_zone",
            Self::OutsideZone => "outside_zone",
            Self::Draw => "draw",
            Self::QuickGame => "quick_game",
            Self::Intermediate => "intermediate",
            Self::Vertical => "vertical",
            Self::Screen => "screen",
            Self::PlayAction => "play_action",
            Self::GoalLinePower => "goal_line_power",
            Self::Generic => "generic",
        }
    }

    /// Lenient parse: unknown names fall back to [`PlayArchetype::Generic`]
    /// and are logged.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: ConfigError| {
            tracing::warn!(%err, "falling back to generic archetype");
            Self::Generic
        })
    }

    /// True for archetypes where the ball is thrown downfield.
    ///
    /// Screens are thrown but behave like runs for sacks and pass fouls.
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(
            self,
            Self::QuickGame | Self::Intermediate | Self::Vertical | Self::PlayAction
        )
    }

    /// True for power-blocking archetypes that keep their bite near the goal.
    #[must_use]
    pub const fn is_power(self) -> bool {
        matches!(self, Self::PowerRun | Self::GoalLinePower)
    }

    /// Fixed attribute weights for the featured participant.
    #[must_use]
    pub const fn attribute_weights(self) -> &'static [(Attribute, f64)] {
        use Attribute::{
            Accuracy, Agility, ArmStrength, Awareness, BallSecurity, Elusiveness, Hands, Power,
            RouteRunning, Speed, Strength, Vision,
        };
        match self {
            Self::PowerRun => &[
                (Power, 0.35),
                (Vision, 0.25),
                (Strength, 0.20),
                (BallSecurity, 0.10),
                (Speed, 0.10),
            ],
            Self::InsideZone => &[
                (Vision, 0.40),
                (Agility, 0.20),
                (Power, 0.15),
                (Speed, 0.15),
                (BallSecurity, 0.10),
            ],
            Self::OutsideZone => &[
                (Speed, 0.35),
                (Agility, 0.30),
                (Vision, 0.20),
                (Elusiveness, 0.15),
            ],
            Self::Draw => &[
                (Vision, 0.35),
                (Elusiveness, 0.25),
                (Agility, 0.20),
                (Speed, 0.20),
            ],
            Self::QuickGame => &[
                (Accuracy, 0.35),
                (Awareness, 0.25),
                (RouteRunning, 0.25),
                (Hands, 0.15),
            ],
            Self::Intermediate => &[
                (Accuracy, 0.30),
                (RouteRunning, 0.30),
                (Awareness, 0.20),
                (Hands, 0.20),
            ],
            Self::Vertical => &[
                (ArmStrength, 0.30),
                (Speed, 0.30),
                (Accuracy, 0.20),
                (Hands, 0.20),
            ],
            Self::Screen => &[
                (Elusiveness, 0.30),
                (Speed, 0.30),
                (Agility, 0.20),
                (Vision, 0.20),
            ],
            Self::PlayAction => &[
                (Accuracy, 0.25),
                (Awareness, 0.25),
                (ArmStrength, 0.20),
                (RouteRunning, 0.15),
                (Speed, 0.15),
            ],
            Self::GoalLinePower => &[(Power, 0.45), (Strength, 0.35), (BallSecurity, 0.20)],
            Self::Generic => &[
                (Speed, 0.25),
                (Strength, 0.25),
                (Agility, 0.25),
                (Vision, 0.25),
            ],
        }
    }

    /// Maps the called archetype onto the model that actually applies given
    /// the formation and field position.
    ///
    /// - A power run from a goal line or heavy set within 3 yards of the goal
    ///   is modelled as goal line power.
    /// - Play action needs a run look (under center or pistol); from the
    ///   shotgun or an empty set it is an ordinary intermediate dropback.
    #[must_use]
    pub fn refine(self, formation: FormationTags, situation: &Situation) -> Self {
        match self {
            Self::PowerRun
                if situation.yards_to_goal() <= 3
                    && formation.intersects(FormationTags::GOAL_LINE | FormationTags::HEAVY) =>
            {
                Self::GoalLinePower
            }
            Self::PlayAction
                if !formation.intersects(FormationTags::UNDER_CENTER | FormationTags::PISTOL)
                    && !formation.is_empty() =>
            {
                Self::Intermediate
            }
            other => other,
        }
    }
}

impl fmt::Display for PlayArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayArchetype {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ConfigError::UnknownArchetype(s.to_string()))
    }
}
