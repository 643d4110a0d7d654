//! Penalty determination.
//!
//! Each catalogued penalty kind has a base rate per play. The chance that a
//! kind is called on a given play is
//!
//! ```text
//! rate = base * discipline(player) * home * red_zone * fourth_down
//! ```
//!
//! where `player` is a member of the offending side picked at random, and the
//! situational factors apply only when their condition holds. Kinds are
//! rolled in timing order (pre-snap, during the play, after the play) and the
//! first hit wins, so at most one penalty comes out of a play.
//!
//! # Discipline Curve
//!
//! The discipline score blends four attributes. The multiplier halves for
//! every `halving_span` points above the pivot and doubles for every
//! `halving_span` points below it, clamped to `[floor, ceiling]`:
//!
//! | Discipline score | Multiplier |
//! |------------------|------------|
//! | 40               | 2.0        |
//! | 65               | 1.0        |
//! | 90               | 0.5        |

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::enforcement::Foul;
use super::kind::{PenaltyKind, Timing};
use crate::archetype::PlayArchetype;
use crate::attributes::{Attribute, ParticipantAttributes, PlayerId};
use crate::context::{PlayContext, Side, FIELD_LENGTH};
use crate::error::ConfigError;
use crate::outcome::check_rate;

// =============================================================================
// Verdict
// =============================================================================

/// A penalty called on the play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyVerdict {
    /// What was called.
    pub kind: PenaltyKind,
    /// Team charged.
    pub offending_side: Side,
    /// Player charged; `None` when the side had no roster.
    pub player: Option<PlayerId>,
    /// When the foul happened.
    pub timing: Timing,
    /// Where the foul happened, for spot fouls.
    pub spot_of_foul: Option<u8>,
}

impl PenaltyVerdict {
    /// The verdict as input to the enforcement calculator.
    #[must_use]
    pub const fn foul(&self) -> Foul {
        Foul {
            kind: self.kind,
            offending: self.offending_side,
            spot_of_foul: self.spot_of_foul,
            automatic_first_down: None,
            custom_yards: None,
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Maps a player's discipline traits to a rate multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisciplineCurve {
    /// Score at which the multiplier is 1.
    pub pivot: f64,
    /// Points of score per halving or doubling.
    pub halving_span: f64,
    /// Lowest multiplier.
    pub floor: f64,
    /// Highest multiplier.
    pub ceiling: f64,
    /// Attribute blend; weights are normalised when scoring.
    pub weights: Vec<(Attribute, f64)>,
}

impl Default for DisciplineCurve {
    fn default() -> Self {
        Self {
            pivot: 65.0,
            halving_span: 25.0,
            floor: 0.25,
            ceiling: 4.0,
            weights: vec![
                (Attribute::Discipline, 0.40),
                (Attribute::Composure, 0.25),
                (Attribute::Experience, 0.20),
                (Attribute::Technique, 0.15),
            ],
        }
    }
}

impl DisciplineCurve {
    /// Weighted discipline score on the 0-100 scale.
    #[must_use]
    pub fn score(&self, attrs: &ParticipantAttributes) -> f64 {
        let total: f64 = self.weights.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return self.pivot;
        }
        self.weights
            .iter()
            .map(|&(attribute, weight)| weight * attrs.rating(attribute))
            .sum::<f64>()
            / total
    }

    /// Rate multiplier for `attrs`.
    #[must_use]
    pub fn multiplier(&self, attrs: &ParticipantAttributes) -> f64 {
        let exponent = (self.pivot - self.score(attrs)) / self.halving_span;
        2f64.powf(exponent).clamp(self.floor, self.ceiling)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("discipline.halving_span", self.halving_span),
            ("discipline.floor", self.floor),
            ("discipline.ceiling", self.ceiling),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    name: name.to_string(),
                    value,
                });
            }
        }
        if self.floor > self.ceiling {
            return Err(ConfigError::InvalidMultiplier {
                name: "discipline.floor".to_string(),
                value: self.floor,
            });
        }
        for &(attribute, weight) in &self.weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    name: format!("discipline.{attribute:?}"),
                    value: weight,
                });
            }
        }
        Ok(())
    }
}

/// Penalty rate tables and situational scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    /// Per-play base rate for each kind, for a pivot-discipline player.
    pub base_rates: BTreeMap<PenaltyKind, f64>,
    /// Discipline curve.
    pub discipline: DisciplineCurve,
    /// Factor for fouls by the home team.
    pub home_multiplier: f64,
    /// Factor when the line of scrimmage is at or past `red_zone_start`.
    pub red_zone_multiplier: f64,
    /// First yard line of the red zone.
    pub red_zone_start: u8,
    /// Factor on 4th down.
    pub fourth_down_multiplier: f64,
    /// Shortest air distance for a spot foul beyond the line.
    pub spot_air_yards_min: u8,
    /// Longest air distance for a spot foul beyond the line.
    pub spot_air_yards_max: u8,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        use PenaltyKind::{
            DefensiveHolding, DefensivePassInterference, DefensiveUnnecessaryRoughness,
            DelayOfGame, Encroachment, FaceMask, FalseStart, IllegalBlockInTheBack,
            IllegalContact, IllegalFormation, IllegalForwardPass, IntentionalGrounding,
            NeutralZoneInfraction, OffensiveHolding, OffensivePassInterference,
            OffensiveUnsportsmanlike, Offside, RoughingThePasser,
        };
        Self {
            base_rates: BTreeMap::from([
                (FalseStart, 0.010),
                (DelayOfGame, 0.003),
                (IllegalFormation, 0.002),
                (OffensiveHolding, 0.013),
                (OffensivePassInterference, 0.003),
                (IntentionalGrounding, 0.002),
                (IllegalForwardPass, 0.001),
                (IllegalBlockInTheBack, 0.003),
                (OffensiveUnsportsmanlike, 0.002),
                (Offside, 0.005),
                (Encroachment, 0.002),
                (NeutralZoneInfraction, 0.002),
                (DefensiveHolding, 0.007),
                (DefensivePassInterference, 0.006),
                (IllegalContact, 0.002),
                (RoughingThePasser, 0.002),
                (FaceMask, 0.003),
                (DefensiveUnnecessaryRoughness, 0.003),
            ]),
            discipline: DisciplineCurve::default(),
            home_multiplier: 0.85,
            red_zone_multiplier: 1.4,
            red_zone_start: 80,
            fourth_down_multiplier: 1.25,
            spot_air_yards_min: 5,
            spot_air_yards_max: 30,
        }
    }
}

impl PenaltyConfig {
    /// Validates rates, multipliers and ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPenaltyKind`] for a rate keyed on
    /// `unknown`, or the first bad rate or multiplier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (kind, rate) in &self.base_rates {
            if *kind == PenaltyKind::Unknown {
                return Err(ConfigError::UnknownPenaltyKind(kind.to_string()));
            }
            check_rate(kind.name(), *rate)?;
        }
        for (name, value) in [
            ("home_multiplier", self.home_multiplier),
            ("red_zone_multiplier", self.red_zone_multiplier),
            ("fourth_down_multiplier", self.fourth_down_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    name: name.to_string(),
                    value,
                });
            }
        }
        if self.spot_air_yards_min > self.spot_air_yards_max {
            return Err(ConfigError::InvalidMultiplier {
                name: "spot_air_yards_min".to_string(),
                value: f64::from(self.spot_air_yards_min),
            });
        }
        self.discipline.validate()
    }
}

// =============================================================================
// Detector
// =============================================================================

/// Rolls for penalties on a play.
#[derive(Debug, Clone, Default)]
pub struct PenaltyDetector {
    config: PenaltyConfig,
}

impl PenaltyDetector {
    /// Detector over the given tables.
    #[must_use]
    pub fn new(config: PenaltyConfig) -> Self {
        Self { config }
    }

    /// Rate tables.
    #[must_use]
    pub fn config(&self) -> &PenaltyConfig {
        &self.config
    }

    /// Chance that `kind` is called on this play against a player with
    /// `attrs`, before any roll.
    #[must_use]
    pub fn probability(
        &self,
        kind: PenaltyKind,
        side: Side,
        attrs: &ParticipantAttributes,
        ctx: &PlayContext,
    ) -> f64 {
        let Some(&base) = self.config.base_rates.get(&kind) else {
            return 0.0;
        };
        let situation = ctx.situation();
        let mut p = base * self.config.discipline.multiplier(attrs);
        if ctx.is_home(side) {
            p *= self.config.home_multiplier;
        }
        if situation.yard_line() >= self.config.red_zone_start {
            p *= self.config.red_zone_multiplier;
        }
        if situation.down() == 4 {
            p *= self.config.fourth_down_multiplier;
        }
        p.clamp(0.0, 1.0)
    }

    /// Rolls every eligible kind in timing order and returns the first
    /// penalty called, if any.
    ///
    /// Pass-only kinds are skipped for non-passing archetypes; kinds with a
    /// minimum gain are skipped on shorter plays. An empty roster is treated
    /// as a single neutral player.
    pub fn check_for_penalty<R: Rng + ?Sized>(
        &self,
        offense: &[ParticipantAttributes],
        defense: &[ParticipantAttributes],
        ctx: &PlayContext,
        archetype: PlayArchetype,
        play_yards: i32,
        rng: &mut R,
    ) -> Option<PenaltyVerdict> {
        let neutral = ParticipantAttributes::default();
        for timing in [Timing::PreSnap, Timing::DuringPlay, Timing::PostPlay] {
            for &kind in self.config.base_rates.keys() {
                let rule = kind.rule();
                let Some(side) = rule.side else { continue };
                if rule.timing != timing
                    || (rule.pass_only && !archetype.is_pass())
                    || rule.min_play_yards.is_some_and(|min| play_yards < min)
                {
                    continue;
                }
                let roster = match side {
                    Side::Offense => offense,
                    Side::Defense => defense,
                };
                let player = roster.choose(rng);
                let attrs = player.unwrap_or(&neutral);
                if rng.gen::<f64>() < self.probability(kind, side, attrs, ctx) {
                    let spot_of_foul = rule.is_spot_foul.then(|| self.sample_spot(ctx, rng));
                    tracing::debug!(%kind, %side, ?spot_of_foul, "flag on the play");
                    return Some(PenaltyVerdict {
                        kind,
                        offending_side: side,
                        player: player.map(ParticipantAttributes::id),
                        timing,
                        spot_of_foul,
                    });
                }
            }
        }
        None
    }

    fn sample_spot<R: Rng + ?Sized>(&self, ctx: &PlayContext, rng: &mut R) -> u8 {
        let air = rng.gen_range(self.config.spot_air_yards_min..=self.config.spot_air_yards_max);
        ctx.situation()
            .yard_line()
            .saturating_add(air)
            .min(FIELD_LENGTH - 1)
    }
}
