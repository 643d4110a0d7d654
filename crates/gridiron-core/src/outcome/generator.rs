//! Matchup yardage generator.
//!
//! Samples a [`RawPlayOutcome`] from the archetype's statistical model.
//!
//! # Sampling Pipeline
//!
//! 1. Look up the archetype model (missing models fall back to `generic`).
//! 2. Shift the mean by the offense/defense rating differential, then scale
//!    it by the featured participant's effectiveness.
//! 3. Passing archetypes roll sack, interception and incompletion first.
//! 4. Draw the gain from a normal core, with a rare long-gain excursion.
//! 5. Breakaway: gains already past the minimum, by a participant with an
//!    elite weighted trait, may break away for extra yardage.
//! 6. Situational modifiers scale positive gains.
//! 7. Clamp to the field; gains reaching the goal line are touchdowns.
//! 8. Fumbles are rolled only on gains of at least the fumble minimum.
//!
//! # Determinism
//!
//! All randomness comes from the caller's RNG. The same inputs and the same
//! seeded RNG always produce the same outcome.

use rand::Rng;
use rand_distr::{Exp1, StandardNormal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::effectiveness::{effectiveness, elite_rating};
use super::modifiers::ModifierTable;
use super::{OutcomeKind, RawPlayOutcome};
use crate::archetype::PlayArchetype;
use crate::attributes::{Attribute, ParticipantAttributes, NEUTRAL_RATING};
use crate::context::PlayContext;
use crate::error::ConfigError;

// =============================================================================
// Configuration
// =============================================================================

/// Statistical model for one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeModel {
    /// Mean gain at neutral ratings.
    pub mean_yards: f64,
    /// Standard deviation of the normal core.
    pub std_dev: f64,
    /// Chance of a long-gain excursion.
    pub long_gain_rate: f64,
    /// Mean extra yards of a long-gain excursion.
    pub long_gain_mean: f64,
    /// Base fumble chance on qualifying gains.
    pub fumble_rate: f64,
    /// Sack chance (passing archetypes only).
    pub sack_rate: f64,
    /// Incompletion chance (passing archetypes only).
    pub incompletion_rate: f64,
    /// Interception chance (passing archetypes only).
    pub interception_rate: f64,
}

impl Default for ArchetypeModel {
    fn default() -> Self {
        Self::run(4.0, 5.0, 0.04, 13.0, 0.012)
    }
}

impl ArchetypeModel {
    /// Model for a run-style archetype.
    #[must_use]
    pub const fn run(
        mean_yards: f64,
        std_dev: f64,
        long_gain_rate: f64,
        long_gain_mean: f64,
        fumble_rate: f64,
    ) -> Self {
        Self {
            mean_yards,
            std_dev,
            long_gain_rate,
            long_gain_mean,
            fumble_rate,
            sack_rate: 0.0,
            incompletion_rate: 0.0,
            interception_rate: 0.0,
        }
    }

    /// Adds the passing branch rates.
    #[must_use]
    pub const fn with_pass_rates(
        mut self,
        sack_rate: f64,
        incompletion_rate: f64,
        interception_rate: f64,
    ) -> Self {
        self.sack_rate = sack_rate;
        self.incompletion_rate = incompletion_rate;
        self.interception_rate = interception_rate;
        self
    }

    fn validate(&self, archetype: PlayArchetype) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidModel {
            archetype: archetype.to_string(),
            reason: reason.to_string(),
        };
        if !self.mean_yards.is_finite() {
            return Err(invalid("mean_yards must be finite"));
        }
        if !self.std_dev.is_finite() || self.std_dev <= 0.0 {
            return Err(invalid("std_dev must be positive"));
        }
        if !self.long_gain_mean.is_finite() || self.long_gain_mean < 0.0 {
            return Err(invalid("long_gain_mean must be non-negative"));
        }
        for (name, rate) in [
            ("long_gain_rate", self.long_gain_rate),
            ("fumble_rate", self.fumble_rate),
            ("sack_rate", self.sack_rate),
            ("incompletion_rate", self.incompletion_rate),
            ("interception_rate", self.interception_rate),
        ] {
            check_rate(&format!("{archetype}.{name}"), rate)?;
        }
        Ok(())
    }
}

/// Breakaway gate and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakawayConfig {
    /// Weighted trait rating needed to qualify.
    pub elite_threshold: f64,
    /// Gain already sampled before a breakaway can happen.
    pub min_gain: f64,
    /// Chance of breaking away once qualified.
    pub chance: f64,
    /// Mean extra yards on a breakaway.
    pub mean_extra_yards: f64,
}

impl Default for BreakawayConfig {
    fn default() -> Self {
        Self {
            elite_threshold: 85.0,
            min_gain: 10.0,
            chance: 0.25,
            mean_extra_yards: 20.0,
        }
    }
}

/// Tunable constants for the yardage generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Per-archetype models.
    pub models: BTreeMap<PlayArchetype, ArchetypeModel>,
    /// Mean yards gained per point of offense-over-defense rating.
    pub rating_slope: f64,
    /// How strongly effectiveness scales the mean; `0.6` turns a perfect
    /// fit into a 30% boost and a total misfit into a 30% cut.
    pub effectiveness_gain: f64,
    /// Smallest gain on which a fumble can happen.
    pub fumble_min_gain: i32,
    /// Hard ceiling on the fumble chance.
    pub max_fumble_rate: f64,
    /// Mean sack loss.
    pub sack_mean_loss: f64,
    /// Spread of the sack loss.
    pub sack_std_dev: f64,
    /// Breakaway settings.
    pub breakaway: BreakawayConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        use PlayArchetype::{
            Draw, Generic, GoalLinePower, InsideZone, Intermediate, OutsideZone, PlayAction,
            PowerRun, QuickGame, Screen, Vertical,
        };
        let models = BTreeMap::from([
            (PowerRun, ArchetypeModel::run(3.4, 4.6, 0.03, 12.0, 0.015)),
            (InsideZone, ArchetypeModel::run(3.6, 5.0, 0.035, 13.0, 0.012)),
            (OutsideZone, ArchetypeModel::run(3.8, 6.0, 0.045, 15.0, 0.012)),
            (Draw, ArchetypeModel::run(3.9, 6.0, 0.04, 14.0, 0.012)),
            (GoalLinePower, ArchetypeModel::run(1.8, 2.0, 0.0, 10.0, 0.010)),
            (Screen, ArchetypeModel::run(5.0, 6.0, 0.05, 16.0, 0.012)),
            (
                QuickGame,
                ArchetypeModel::run(6.5, 3.5, 0.03, 15.0, 0.008).with_pass_rates(0.04, 0.28, 0.018),
            ),
            (
                Intermediate,
                ArchetypeModel::run(11.5, 5.5, 0.06, 18.0, 0.008)
                    .with_pass_rates(0.065, 0.38, 0.025),
            ),
            (
                Vertical,
                ArchetypeModel::run(17.0, 9.0, 0.15, 25.0, 0.006)
                    .with_pass_rates(0.08, 0.55, 0.035),
            ),
            (
                PlayAction,
                ArchetypeModel::run(12.5, 7.0, 0.10, 20.0, 0.008)
                    .with_pass_rates(0.07, 0.38, 0.025),
            ),
            (Generic, ArchetypeModel::default()),
        ]);
        Self {
            models,
            rating_slope: 0.06,
            effectiveness_gain: 0.6,
            fumble_min_gain: 3,
            max_fumble_rate: 0.05,
            sack_mean_loss: 6.5,
            sack_std_dev: 2.5,
            breakaway: BreakawayConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Model for `archetype`, falling back to the generic model.
    #[must_use]
    pub fn model(&self, archetype: PlayArchetype) -> ArchetypeModel {
        if let Some(model) = self.models.get(&archetype) {
            return *model;
        }
        tracing::warn!(%archetype, "no model configured, using generic");
        self.models
            .get(&PlayArchetype::Generic)
            .copied()
            .unwrap_or_default()
    }

    /// Validates every model and scalar.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (archetype, model) in &self.models {
            model.validate(*archetype)?;
        }
        check_rate("max_fumble_rate", self.max_fumble_rate)?;
        check_rate("breakaway.chance", self.breakaway.chance)?;
        for (name, value) in [
            ("rating_slope", self.rating_slope),
            ("effectiveness_gain", self.effectiveness_gain),
            ("sack_mean_loss", self.sack_mean_loss),
            ("sack_std_dev", self.sack_std_dev),
            ("breakaway.mean_extra_yards", self.breakaway.mean_extra_yards),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

pub(crate) fn check_rate(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate {
            name: name.to_string(),
            value,
        })
    }
}

// =============================================================================
// Generator
// =============================================================================

/// Rating differential beyond which the matchup stops mattering more.
const MAX_RATING_EDGE: f64 = 50.0;

/// Samples raw play outcomes.
///
/// # Example
///
/// ```
/// use gridiron_core::archetype::PlayArchetype;
/// use gridiron_core::attributes::{ParticipantAttributes, PlayerId};
/// use gridiron_core::context::{PlayContext, Situation};
/// use gridiron_core::outcome::YardageGenerator;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let generator = YardageGenerator::default();
/// let ctx = PlayContext::new(Situation::new(25, 1, 10).unwrap());
/// let back = ParticipantAttributes::new(PlayerId::new(28));
///
/// let a = generator.generate(50.0, 50.0, &back, PlayArchetype::PowerRun, &ctx,
///     &mut ChaCha8Rng::seed_from_u64(7));
/// let b = generator.generate(50.0, 50.0, &back, PlayArchetype::PowerRun, &ctx,
///     &mut ChaCha8Rng::seed_from_u64(7));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default)]
pub struct YardageGenerator {
    config: GeneratorConfig,
    modifiers: ModifierTable,
}

impl YardageGenerator {
    /// Generator over the given tables.
    #[must_use]
    pub fn new(config: GeneratorConfig, modifiers: ModifierTable) -> Self {
        Self { config, modifiers }
    }

    /// Generator tables.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Situational modifier table.
    #[must_use]
    pub fn modifiers(&self) -> &ModifierTable {
        &self.modifiers
    }

    /// Mean gain before sampling, after rating and effectiveness adjustments.
    #[must_use]
    pub fn adjusted_mean(
        &self,
        off_rating: f64,
        def_rating: f64,
        attrs: &ParticipantAttributes,
        archetype: PlayArchetype,
    ) -> f64 {
        let model = self.config.model(archetype);
        let edge = (off_rating - def_rating).clamp(-MAX_RATING_EDGE, MAX_RATING_EDGE);
        let base = model.mean_yards + edge * self.config.rating_slope;
        base * self.effectiveness_factor(attrs, archetype)
    }

    fn effectiveness_factor(&self, attrs: &ParticipantAttributes, archetype: PlayArchetype) -> f64 {
        1.0 + (effectiveness(attrs, archetype) - 0.5) * self.config.effectiveness_gain
    }

    /// Samples one outcome.
    ///
    /// `off_rating` and `def_rating` are unit ratings on the 0-100 scale;
    /// `attrs` is the featured participant (ball carrier or passer).
    pub fn generate<R: Rng + ?Sized>(
        &self,
        off_rating: f64,
        def_rating: f64,
        attrs: &ParticipantAttributes,
        archetype: PlayArchetype,
        ctx: &PlayContext,
        rng: &mut R,
    ) -> RawPlayOutcome {
        let model = self.config.model(archetype);
        let edge = (off_rating - def_rating).clamp(-MAX_RATING_EDGE, MAX_RATING_EDGE);
        let mean = self.adjusted_mean(off_rating, def_rating, attrs, archetype);
        let situation = ctx.situation();

        if archetype.is_pass() {
            // A better offensive unit sees less pressure and fewer picks.
            let pressure = (1.0 - edge / 100.0).clamp(0.5, 1.5);
            if rng.gen::<f64>() < model.sack_rate * pressure {
                let z: f64 = rng.sample(StandardNormal);
                let loss = (self.config.sack_mean_loss + self.config.sack_std_dev * z).clamp(1.0, 15.0);
                let yards = -to_yards(loss).min(i32::from(situation.yard_line()));
                return RawPlayOutcome::new(OutcomeKind::Sack, yards);
            }
            if rng.gen::<f64>() < model.interception_rate * pressure {
                return RawPlayOutcome::new(OutcomeKind::Turnover, 0);
            }
            let accuracy = 1.0 - (effectiveness(attrs, archetype) - 0.5) * self.config.effectiveness_gain;
            if rng.gen::<f64>() < model.incompletion_rate * accuracy {
                return RawPlayOutcome::incomplete();
            }
        }

        let z: f64 = rng.sample(StandardNormal);
        let mut yards = mean + model.std_dev * z;
        if rng.gen::<f64>() < model.long_gain_rate {
            let extra: f64 = rng.sample(Exp1);
            yards = yards.max(0.0) + model.long_gain_mean * extra;
        }

        let breakaway = &self.config.breakaway;
        if yards >= breakaway.min_gain
            && elite_rating(attrs, archetype) >= breakaway.elite_threshold
            && rng.gen::<f64>() < breakaway.chance
        {
            let extra: f64 = rng.sample(Exp1);
            yards += breakaway.mean_extra_yards * extra;
            tracing::trace!(yards, "breakaway");
        }

        let yards = self.modifiers.apply(yards, ctx, archetype);
        let to_goal = i32::from(situation.yards_to_goal());
        let floor = -i32::from(situation.yard_line());
        let yards = to_yards(yards).clamp(floor, to_goal);

        if yards >= to_goal {
            return RawPlayOutcome::new(OutcomeKind::Touchdown, yards);
        }

        if yards >= self.config.fumble_min_gain {
            // Ball security 100 halves the base rate, 0 raises it by half.
            let security = attrs.rating(Attribute::BallSecurity) - NEUTRAL_RATING;
            let rate = (model.fumble_rate * (1.0 - security / 100.0))
                .clamp(0.0, self.config.max_fumble_rate);
            if rng.gen::<f64>() < rate {
                return RawPlayOutcome::new(OutcomeKind::Turnover, yards);
            }
        }

        RawPlayOutcome::new(OutcomeKind::Gain, yards)
    }
}

/// Rounds a sampled yardage to whole yards, saturating at a field length.
#[allow(clippy::cast_possible_truncation)]
fn to_yards(yards: f64) -> i32 {
    yards.round().clamp(-100.0, 100.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::PlayerId;
    use crate::context::Situation;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ctx(yard_line: u8, down: u8, distance: u8) -> PlayContext {
        PlayContext::new(Situation::new(yard_line, down, distance).unwrap())
    }

    fn neutral() -> ParticipantAttributes {
        ParticipantAttributes::new(PlayerId::new(1))
    }

    fn mean_yards(
        generator: &YardageGenerator,
        attrs: &ParticipantAttributes,
        archetype: PlayArchetype,
        n: usize,
    ) -> f64 {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let c = ctx(25, 1, 10);
        let total: i64 = (0..n)
            .map(|_| i64::from(generator.generate(50.0, 50.0, attrs, archetype, &c, &mut rng).yards_gained))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = total as f64 / n as f64;
        mean
    }

    mod config_tests {
        use super::*;

        #[test]
        fn default_config_is_valid_and_complete() {
            let config = GeneratorConfig::default();
            config.validate().unwrap();
            for archetype in PlayArchetype::ALL {
                assert!(config.models.contains_key(&archetype), "{archetype}");
            }
        }

        #[test]
        fn missing_model_falls_back_to_generic() {
            let mut config = GeneratorConfig::default();
            config.models.remove(&PlayArchetype::Draw);
            assert_eq!(config.model(PlayArchetype::Draw), config.models[&PlayArchetype::Generic]);
        }

        #[test]
        fn zero_std_dev_rejected() {
            let mut config = GeneratorConfig::default();
            config.models.insert(PlayArchetype::Draw, ArchetypeModel::run(4.0, 0.0, 0.0, 0.0, 0.0));
            assert!(matches!(config.validate(), Err(ConfigError::InvalidModel { .. })));
        }

        #[test]
        fn rate_above_one_rejected() {
            let mut config = GeneratorConfig::default();
            config.max_fumble_rate = 1.5;
            assert!(matches!(config.validate(), Err(ConfigError::InvalidRate { .. })));
        }

        #[test]
        fn partial_json_keeps_defaults() {
            let config: GeneratorConfig = serde_json::from_str(r#"{"rating_slope":0.1}"#).unwrap();
            assert!((config.rating_slope - 0.1).abs() < 1e-12);
            assert_eq!(config.models.len(), PlayArchetype::ALL.len());
        }
    }

    mod mean_tests {
        use super::*;

        #[test]
        fn neutral_inputs_keep_model_mean() {
            let g = YardageGenerator::default();
            let mean = g.adjusted_mean(50.0, 50.0, &neutral(), PlayArchetype::PowerRun);
            assert!((mean - 3.4).abs() < 1e-9);
        }

        #[test]
        fn better_offense_raises_mean() {
            let g = YardageGenerator::default();
            let strong = g.adjusted_mean(80.0, 50.0, &neutral(), PlayArchetype::InsideZone);
            let weak = g.adjusted_mean(40.0, 70.0, &neutral(), PlayArchetype::InsideZone);
            assert!(strong > 3.6);
            assert!(weak < 3.6);
        }

        #[test]
        fn effectiveness_scales_mean_multiplicatively() {
            let g = YardageGenerator::default();
            let elite = neutral()
                .with(Attribute::Power, 100)
                .with(Attribute::Vision, 100)
                .with(Attribute::Strength, 100)
                .with(Attribute::BallSecurity, 100)
                .with(Attribute::Speed, 100);
            let mean = g.adjusted_mean(50.0, 50.0, &elite, PlayArchetype::PowerRun);
            assert!((mean - 3.4 * 1.3).abs() < 1e-9);
        }
    }

    mod sampling_tests {
        use super::*;

        #[test]
        fn same_seed_same_outcome() {
            let g = YardageGenerator::default();
            let c = ctx(40, 2, 6);
            for archetype in PlayArchetype::ALL {
                let a = g.generate(55.0, 48.0, &neutral(), archetype, &c, &mut ChaCha8Rng::seed_from_u64(99));
                let b = g.generate(55.0, 48.0, &neutral(), archetype, &c, &mut ChaCha8Rng::seed_from_u64(99));
                assert_eq!(a, b, "{archetype}");
            }
        }

        #[test]
        fn yardage_stays_on_the_field() {
            let g = YardageGenerator::default();
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            for yard_line in [1u8, 5, 50, 95, 99] {
                let c = PlayContext::new(Situation::first_and_ten(yard_line).unwrap());
                for archetype in PlayArchetype::ALL {
                    for _ in 0..200 {
                        let out = g.generate(50.0, 50.0, &neutral(), archetype, &c, &mut rng);
                        let end = i32::from(yard_line) + out.yards_gained;
                        assert!((0..=100).contains(&end), "{archetype} at {yard_line}: {out:?}");
                        if out.kind == OutcomeKind::Touchdown {
                            assert_eq!(end, 100);
                        }
                    }
                }
            }
        }

        #[test]
        fn fumbles_never_on_short_gains() {
            let mut config = GeneratorConfig::default();
            for model in config.models.values_mut() {
                model.fumble_rate = 1.0;
            }
            config.max_fumble_rate = 1.0;
            let g = YardageGenerator::new(config, ModifierTable::default());
            let mut rng = ChaCha8Rng::seed_from_u64(5);
            let c = ctx(30, 1, 10);
            for _ in 0..2_000 {
                let out = g.generate(50.0, 50.0, &neutral(), PlayArchetype::InsideZone, &c, &mut rng);
                match out.kind {
                    OutcomeKind::Turnover => assert!(out.yards_gained >= 3),
                    OutcomeKind::Gain => assert!(out.yards_gained < 3),
                    _ => {}
                }
            }
        }

        #[test]
        fn runs_never_sack_or_fall_incomplete() {
            let g = YardageGenerator::default();
            let mut rng = ChaCha8Rng::seed_from_u64(8);
            let c = ctx(30, 1, 10);
            for _ in 0..2_000 {
                let out = g.generate(50.0, 50.0, &neutral(), PlayArchetype::OutsideZone, &c, &mut rng);
                assert!(!matches!(out.kind, OutcomeKind::Sack | OutcomeKind::Incomplete));
            }
        }

        #[test]
        fn sacks_lose_yardage_but_not_past_own_goal() {
            let g = YardageGenerator::default();
            let mut rng = ChaCha8Rng::seed_from_u64(21);
            let c = ctx(3, 2, 10);
            let mut sacks = 0;
            for _ in 0..3_000 {
                let out = g.generate(20.0, 80.0, &neutral(), PlayArchetype::Vertical, &c, &mut rng);
                if out.kind == OutcomeKind::Sack {
                    sacks += 1;
                    assert!((-3..=-1).contains(&out.yards_gained), "{out:?}");
                }
            }
            assert!(sacks > 0);
        }

        #[test]
        fn specialist_outgains_generalist_at_specialty() {
            let g = YardageGenerator::default();
            let specialist = neutral()
                .with(Attribute::Power, 95)
                .with(Attribute::Vision, 90)
                .with(Attribute::Strength, 90);
            let special = mean_yards(&g, &specialist, PlayArchetype::PowerRun, 5_000);
            let general = mean_yards(&g, &neutral(), PlayArchetype::PowerRun, 5_000);
            assert!(special > general, "{special} vs {general}");
        }

        #[test]
        fn breakaways_need_an_elite_trait() {
            let mut config = GeneratorConfig::default();
            config.breakaway.chance = 1.0;
            config.breakaway.mean_extra_yards = 40.0;
            let g = YardageGenerator::new(config, ModifierTable::empty());
            let burner = neutral().with(Attribute::Speed, 99);
            let plodder = neutral().with(Attribute::Speed, 60);
            let fast = mean_yards(&g, &burner, PlayArchetype::OutsideZone, 3_000);
            let slow = mean_yards(&g, &plodder, PlayArchetype::OutsideZone, 3_000);
            assert!(fast > slow + 2.0, "{fast} vs {slow}");
        }
    }
}
