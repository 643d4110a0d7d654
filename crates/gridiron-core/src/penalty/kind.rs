//! Penalty catalogue and per-kind enforcement rules.
//!
//! [`PenaltyKind`] is a closed enum; [`PenaltyKind::rule`] is the lookup
//! table. Names that are not in the catalogue map to
//! [`PenaltyKind::Unknown`], which carries the generic 5-yard
//! previous-spot rule so a play always resolves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::context::Side;
use crate::error::ConfigError;

/// When the foul happened relative to the snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timing {
    /// Dead-ball foul before the snap; the play never happens.
    PreSnap,
    /// Live-ball foul.
    DuringPlay,
    /// Foul after the ball is dead.
    PostPlay,
}

/// Where penalty yardage is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementSpot {
    /// The line of scrimmage of the play.
    PreviousSpot,
    /// Where the foul occurred.
    SpotOfFoul,
    /// Where the run or catch ended.
    EndOfRun,
    /// Where the next play would start.
    SucceedingSpot,
}

impl fmt::Display for EnforcementSpot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PreviousSpot => "the previous spot",
            Self::SpotOfFoul => "the spot of the foul",
            Self::EndOfRun => "the end of the run",
            Self::SucceedingSpot => "the succeeding spot",
        })
    }
}

/// Enforcement rule for one penalty kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyRule {
    /// Nominal yardage before the half-distance cap.
    pub base_yards: u8,
    /// Team that commits this foul; `None` for the unknown fallback.
    pub side: Option<Side>,
    /// When the foul happens.
    pub timing: Timing,
    /// Where yardage is measured from.
    pub enforcement_spot: EnforcementSpot,
    /// Accepting it awards the offense a first down.
    pub automatic_first_down: bool,
    /// Accepting it wipes out the play's result.
    pub negates_play: bool,
    /// Ball is placed at the spot of the foul instead of marking off yards.
    pub is_spot_foul: bool,
    /// Accepting it costs the offense a down.
    pub loss_of_down: bool,
    /// Only called on passing archetypes.
    pub pass_only: bool,
    /// Smallest gain on which the foul can occur (downfield blocks).
    pub min_play_yards: Option<i32>,
}

impl PenaltyRule {
    const fn offense(base_yards: u8, timing: Timing) -> Self {
        Self {
            base_yards,
            side: Some(Side::Offense),
            timing,
            enforcement_spot: EnforcementSpot::PreviousSpot,
            automatic_first_down: false,
            negates_play: true,
            is_spot_foul: false,
            loss_of_down: false,
            pass_only: false,
            min_play_yards: None,
        }
    }

    const fn defense(base_yards: u8, timing: Timing) -> Self {
        Self {
            side: Some(Side::Defense),
            ..Self::offense(base_yards, timing)
        }
    }

    /// True when an accepted foul replays the down.
    #[must_use]
    pub const fn replays_down(&self) -> bool {
        matches!(self.timing, Timing::PreSnap) || self.negates_play
    }
}

/// Penalty catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum PenaltyKind {
    /// Offensive lineman moves before the snap.
    FalseStart,
    /// Play clock expires.
    DelayOfGame,
    /// Too few players on the line.
    IllegalFormation,
    /// Offensive holding.
    OffensiveHolding,
    /// Offensive pass interference.
    OffensivePassInterference,
    /// Passer throws away to avoid a sack.
    IntentionalGrounding,
    /// Forward pass from beyond the line.
    IllegalForwardPass,
    /// Block in the back downfield.
    IllegalBlockInTheBack,
    /// Offensive unsportsmanlike conduct after the play.
    OffensiveUnsportsmanlike,
    /// Defender across the line at the snap.
    Offside,
    /// Defender contacts an offensive player before the snap.
    Encroachment,
    /// Defender's move draws a lineman before the snap.
    NeutralZoneInfraction,
    /// Defensive holding.
    DefensiveHolding,
    /// Defensive pass interference, enforced at the spot.
    DefensivePassInterference,
    /// Contact with a receiver beyond five yards.
    IllegalContact,
    /// Roughing the passer.
    RoughingThePasser,
    /// Face mask.
    FaceMask,
    /// Defensive unnecessary roughness after the play.
    DefensiveUnnecessaryRoughness,
    /// Anything not in the catalogue; enforced with the generic rule.
    Unknown,
}

impl PenaltyKind {
    /// Every catalogued kind, excluding [`PenaltyKind::Unknown`].
    pub const CATALOGUE: [Self; 18] = [
        Self::FalseStart,
        Self::DelayOfGame,
        Self::IllegalFormation,
        Self::OffensiveHolding,
        Self::OffensivePassInterference,
        Self::IntentionalGrounding,
        Self::IllegalForwardPass,
        Self::IllegalBlockInTheBack,
        Self::OffensiveUnsportsmanlike,
        Self::Offside,
        Self::Encroachment,
        Self::NeutralZoneInfraction,
        Self::DefensiveHolding,
        Self::DefensivePassInterference,
        Self::IllegalContact,
        Self::RoughingThePasser,
        Self::FaceMask,
        Self::DefensiveUnnecessaryRoughness,
    ];

    /// Enforcement rule for this kind.
    #[must_use]
    pub const fn rule(self) -> PenaltyRule {
        use EnforcementSpot::{EndOfRun, SpotOfFoul, SucceedingSpot};
        use Timing::{DuringPlay, PostPlay, PreSnap};
        match self {
            Self::FalseStart | Self::DelayOfGame => PenaltyRule::offense(5, PreSnap),
            Self::IllegalFormation => PenaltyRule::offense(5, DuringPlay),
            Self::OffensiveHolding => PenaltyRule::offense(10, DuringPlay),
            Self::OffensivePassInterference => PenaltyRule {
                pass_only: true,
                ..PenaltyRule::offense(10, DuringPlay)
            },
            Self::IntentionalGrounding => PenaltyRule {
                negates_play: false,
                loss_of_down: true,
                pass_only: true,
                ..PenaltyRule::offense(10, DuringPlay)
            },
            Self::IllegalForwardPass => PenaltyRule {
                negates_play: false,
                loss_of_down: true,
                pass_only: true,
                ..PenaltyRule::offense(5, DuringPlay)
            },
            Self::IllegalBlockInTheBack => PenaltyRule {
                min_play_yards: Some(5),
                ..PenaltyRule::offense(10, DuringPlay)
            },
            Self::OffensiveUnsportsmanlike => PenaltyRule {
                enforcement_spot: SucceedingSpot,
                negates_play: false,
                ..PenaltyRule::offense(15, PostPlay)
            },
            Self::Offside | Self::Encroachment | Self::NeutralZoneInfraction => {
                PenaltyRule::defense(5, PreSnap)
            }
            Self::DefensiveHolding => PenaltyRule {
                automatic_first_down: true,
                ..PenaltyRule::defense(5, DuringPlay)
            },
            Self::DefensivePassInterference => PenaltyRule {
                enforcement_spot: SpotOfFoul,
                automatic_first_down: true,
                is_spot_foul: true,
                pass_only: true,
                ..PenaltyRule::defense(15, DuringPlay)
            },
            Self::IllegalContact => PenaltyRule {
                automatic_first_down: true,
                pass_only: true,
                ..PenaltyRule::defense(5, DuringPlay)
            },
            Self::RoughingThePasser => PenaltyRule {
                enforcement_spot: EndOfRun,
                automatic_first_down: true,
                negates_play: false,
                pass_only: true,
                ..PenaltyRule::defense(15, DuringPlay)
            },
            Self::FaceMask => PenaltyRule {
                enforcement_spot: EndOfRun,
                automatic_first_down: true,
                negates_play: false,
                ..PenaltyRule::defense(15, DuringPlay)
            },
            Self::DefensiveUnnecessaryRoughness => PenaltyRule {
                enforcement_spot: SucceedingSpot,
                automatic_first_down: true,
                negates_play: false,
                ..PenaltyRule::defense(15, PostPlay)
            },
            Self::Unknown => PenaltyRule {
                side: None,
                ..PenaltyRule::offense(5, DuringPlay)
            },
        }
    }

    /// Config name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FalseStart => "false_start",
            Self::DelayOfGame => "delay_of_game",
            Self::IllegalFormation => "illegal_formation",
            Self::OffensiveHolding => "offensive_holding",
            Self::OffensivePassInterference => "offensive_pass_interference",
            Self::IntentionalGrounding => "intentional_grounding",
            Self::IllegalForwardPass => "illegal_forward_pass",
            Self::IllegalBlockInTheBack => "illegal_block_in_the_back",
            Self::OffensiveUnsportsmanlike => "offensive_unsportsmanlike",
            Self::Offside => "offside",
            Self::Encroachment => "encroachment",
            Self::NeutralZoneInfraction => "neutral_zone_infraction",
            Self::DefensiveHolding => "defensive_holding",
            Self::DefensivePassInterference => "defensive_pass_interference",
            Self::IllegalContact => "illegal_contact",
            Self::RoughingThePasser => "roughing_the_passer",
            Self::FaceMask => "face_mask",
            Self::DefensiveUnnecessaryRoughness => "defensive_unnecessary_roughness",
            Self::Unknown => "unknown",
        }
    }

    /// Lenient parse: unknown names become [`PenaltyKind::Unknown`] and are
    /// logged for correction.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: ConfigError| {
            tracing::warn!(%err, "enforcing with the generic rule");
            Self::Unknown
        })
    }

    /// Human-readable label used in enforcement descriptions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FalseStart => "False start",
            Self::DelayOfGame => "Delay of game",
            Self::IllegalFormation => "Illegal formation",
            Self::OffensiveHolding => "Offensive holding",
            Self::OffensivePassInterference => "Offensive pass interference",
            Self::IntentionalGrounding => "Intentional grounding",
            Self::IllegalForwardPass => "Illegal forward pass",
            Self::IllegalBlockInTheBack => "Illegal block in the back",
            Self::OffensiveUnsportsmanlike => "Unsportsmanlike conduct",
            Self::Offside => "Offside",
            Self::Encroachment => "Encroachment",
            Self::NeutralZoneInfraction => "Neutral zone infraction",
            Self::DefensiveHolding => "Defensive holding",
            Self::DefensivePassInterference => "Defensive pass interference",
            Self::IllegalContact => "Illegal contact",
            Self::RoughingThePasser => "Roughing the passer",
            Self::FaceMask => "Face mask",
            Self::DefensiveUnnecessaryRoughness => "Unnecessary roughness",
            Self::Unknown => "Penalty",
        }
    }
}

impl fmt::Display for PenaltyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PenaltyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::Unknown.name() {
            return Ok(Self::Unknown);
        }
        Self::CATALOGUE
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ConfigError::UnknownPenaltyKind(s.to_string()))
    }
}

impl From<PenaltyKind> for &'static str {
    fn from(kind: PenaltyKind) -> Self {
        kind.name()
    }
}

impl TryFrom<String> for PenaltyKind {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}
