//! End-to-end play resolution.
//!
//! [`PlayEngine`] runs the pipeline for one snap:
//!
//! 1. Refine the called archetype against the formation and situation.
//! 2. Generate the raw outcome (effectiveness, model, modifiers).
//! 3. Roll for a penalty.
//! 4. Assemble the [`PlayResult`].
//!
//! # Determinism
//!
//! The engine holds no mutable state; every random draw comes from the RNG
//! handed to [`PlayEngine::resolve_play`]. [`PlayEngine::resolve_batch`]
//! gives each play its own ChaCha stream derived from the master seed and
//! the play's index, so results do not depend on thread scheduling.
//!
//! # Example
//!
//! ```
//! use gridiron_core::archetype::PlayArchetype;
//! use gridiron_core::context::{PlayContext, Situation};
//! use gridiron_core::engine::{PlayEngine, PlayInput};
//!
//! let engine = PlayEngine::default();
//! let input = PlayInput::new(
//!     PlayContext::new(Situation::new(25, 1, 10).unwrap()),
//!     PlayArchetype::InsideZone,
//! );
//! let a = engine.resolve_seeded(&input, 42);
//! let b = engine.resolve_seeded(&input, 42);
//! assert_eq!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::archetype::PlayArchetype;
use crate::attributes::{ParticipantAttributes, NEUTRAL_RATING};
use crate::config::EngineConfig;
use crate::context::PlayContext;
use crate::error::ConfigError;
use crate::outcome::YardageGenerator;
use crate::penalty::PenaltyDetector;
use crate::result::{assemble, PlayResult};

// =============================================================================
// Input
// =============================================================================

/// Everything the engine needs to resolve one snap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayInput {
    /// Pre-snap snapshot.
    pub context: PlayContext,
    /// Archetype called by the play caller.
    pub archetype: PlayArchetype,
    /// Offensive unit rating, 0-100.
    pub offense_rating: f64,
    /// Defensive unit rating, 0-100.
    pub defense_rating: f64,
    /// Ball carrier or passer.
    pub featured: ParticipantAttributes,
    /// Offensive players on the field.
    pub offense: Vec<ParticipantAttributes>,
    /// Defensive players on the field.
    pub defense: Vec<ParticipantAttributes>,
}

impl PlayInput {
    /// Input with neutral ratings and unknown participants.
    #[must_use]
    pub fn new(context: PlayContext, archetype: PlayArchetype) -> Self {
        Self {
            context,
            archetype,
            offense_rating: NEUTRAL_RATING,
            defense_rating: NEUTRAL_RATING,
            featured: ParticipantAttributes::default(),
            offense: Vec::new(),
            defense: Vec::new(),
        }
    }

    /// Sets the unit ratings.
    #[must_use]
    pub fn with_ratings(mut self, offense_rating: f64, defense_rating: f64) -> Self {
        self.offense_rating = offense_rating;
        self.defense_rating = defense_rating;
        self
    }

    /// Sets the featured participant.
    #[must_use]
    pub fn with_featured(mut self, featured: ParticipantAttributes) -> Self {
        self.featured = featured;
        self
    }

    /// Sets both rosters.
    #[must_use]
    pub fn with_rosters(
        mut self,
        offense: Vec<ParticipantAttributes>,
        defense: Vec<ParticipantAttributes>,
    ) -> Self {
        self.offense = offense;
        self.defense = defense;
        self
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Stateless play resolver over an immutable configuration.
#[derive(Debug, Clone)]
pub struct PlayEngine {
    config: Arc<EngineConfig>,
    generator: YardageGenerator,
    detector: PenaltyDetector,
}

impl Default for PlayEngine {
    fn default() -> Self {
        Self::from_shared(Arc::new(EngineConfig::default()))
    }
}

impl PlayEngine {
    /// Validates `config` and builds an engine over it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by validation.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_shared(Arc::new(config)))
    }

    /// Builds an engine over an already-validated shared config.
    #[must_use]
    pub fn from_shared(config: Arc<EngineConfig>) -> Self {
        let generator = YardageGenerator::new(config.generator.clone(), config.modifiers.clone());
        let detector = PenaltyDetector::new(config.penalties.clone());
        Self {
            config,
            generator,
            detector,
        }
    }

    /// Shared configuration.
    #[must_use]
    pub fn config(&self) -> &Arc<EngineConfig> {
        &self.config
    }

    /// Yardage generator.
    #[must_use]
    pub fn generator(&self) -> &YardageGenerator {
        &self.generator
    }

    /// Penalty detector.
    #[must_use]
    pub fn detector(&self) -> &PenaltyDetector {
        &self.detector
    }

    /// Resolves one play with the caller's RNG.
    pub fn resolve_play<R: Rng + ?Sized>(&self, input: &PlayInput, rng: &mut R) -> PlayResult {
        let ctx = &input.context;
        let archetype = input.archetype.refine(ctx.formation(), ctx.situation());
        let outcome = self.generator.generate(
            input.offense_rating,
            input.defense_rating,
            &input.featured,
            archetype,
            ctx,
            rng,
        );
        let verdict = self.detector.check_for_penalty(
            &input.offense,
            &input.defense,
            ctx,
            archetype,
            outcome.yards_gained,
            rng,
        );
        let result = assemble(archetype, ctx.situation(), outcome, verdict);
        tracing::debug!(
            situation = %ctx.situation(),
            %archetype,
            yards = outcome.yards_gained,
            penalty = ?result.penalty.map(|v| v.kind),
            status = %result.drive_status,
            "play resolved"
        );
        result
    }

    /// Resolves one play from a seed.
    #[must_use]
    pub fn resolve_seeded(&self, input: &PlayInput, seed: u64) -> PlayResult {
        self.resolve_play(input, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Resolves independent plays in parallel.
    ///
    /// Play `i` draws from stream `i` of the ChaCha generator seeded with
    /// `master_seed`, so the output is identical to resolving the plays one
    /// by one with the same streams.
    #[must_use]
    pub fn resolve_batch(&self, inputs: &[PlayInput], master_seed: u64) -> Vec<PlayResult> {
        inputs
            .par_iter()
            .enumerate()
            .map(|(index, input)| self.resolve_play(input, &mut play_rng(master_seed, index)))
            .collect()
    }
}

/// RNG for play `index` of a batch.
#[must_use]
pub fn play_rng(master_seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(master_seed);
    rng.set_stream(index as u64);
    rng
}
