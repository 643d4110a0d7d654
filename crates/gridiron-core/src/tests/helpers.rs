//! Factories shared by the crate-level tests.

use crate::archetype::PlayArchetype;
use crate::attributes::{Attribute, ParticipantAttributes, PlayerId};
use crate::config::EngineConfig;
use crate::context::{PlayContext, Situation};
use crate::engine::{PlayEngine, PlayInput};

// =============================================================================
// Logging
// =============================================================================

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Situations
// =============================================================================

/// Validated situation; panics on an impossible one.
pub fn situation(yard_line: u8, down: u8, distance: u8) -> Situation {
    Situation::new(yard_line, down, distance).unwrap()
}

/// Context with default formation, quarter and score.
pub fn context(yard_line: u8, down: u8, distance: u8) -> PlayContext {
    PlayContext::new(situation(yard_line, down, distance))
}

// =============================================================================
// Rosters
// =============================================================================

/// Eleven players with no ratings, ids starting at `first_id`.
pub fn neutral_roster(first_id: u64) -> Vec<ParticipantAttributes> {
    (first_id..first_id + 11)
        .map(|id| ParticipantAttributes::new(PlayerId::new(id)))
        .collect()
}

/// Eleven players with the given discipline rating and nothing else.
pub fn disciplined_roster(first_id: u64, discipline: u8) -> Vec<ParticipantAttributes> {
    neutral_roster(first_id)
        .into_iter()
        .map(|p| p.with(Attribute::Discipline, discipline))
        .collect()
}

// =============================================================================
// Engines and inputs
// =============================================================================

/// Engine over the default tables.
pub fn default_engine() -> PlayEngine {
    PlayEngine::default()
}

/// Engine that never throws a flag.
pub fn clean_engine() -> PlayEngine {
    let mut config = EngineConfig::default();
    config.penalties.base_rates.clear();
    PlayEngine::new(config).unwrap()
}

/// Neutral input with full rosters on both sides.
pub fn game_input(ctx: PlayContext, archetype: PlayArchetype) -> PlayInput {
    PlayInput::new(ctx, archetype).with_rosters(neutral_roster(1), neutral_roster(101))
}
