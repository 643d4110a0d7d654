//! End-to-end play and drive resolution.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::archetype::PlayArchetype;
use crate::attributes::{Attribute, ParticipantAttributes, PlayerId};
use crate::context::{PlayContext, Side, Situation};
use crate::engine::PlayInput;
use crate::outcome::{OutcomeKind, RawPlayOutcome};
use crate::penalty::{should_accept, Foul, PenaltyKind, PenaltyVerdict, Timing};
use crate::result::{assemble, DriveStatus};

use super::helpers::{clean_engine, context, default_engine, game_input, init_tracing, situation};

// =============================================================================
// Drives
// =============================================================================

/// Plays a drive from `start` until the ball changes hands or a limit is hit,
/// checking every continuing result is a legal next snap.
fn play_drive(seed: u64, start: Situation) -> (DriveStatus, usize) {
    let engine = default_engine();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let calls = [
        PlayArchetype::InsideZone,
        PlayArchetype::QuickGame,
        PlayArchetype::PowerRun,
        PlayArchetype::Intermediate,
        PlayArchetype::OutsideZone,
        PlayArchetype::Vertical,
    ];
    let mut current = start;
    for snap in 0..60 {
        let input = game_input(PlayContext::new(current), calls[snap % calls.len()]);
        let result = engine.resolve_play(&input, &mut rng);

        assert!(result.final_yard_line <= 100);
        assert!((1..=4).contains(&result.final_down));
        if result.drive_status != DriveStatus::Continues {
            return (result.drive_status, snap + 1);
        }
        current = Situation::new(result.final_yard_line, result.final_down, result.final_distance)
            .unwrap_or_else(|e| panic!("illegal next snap after {result}: {e}"));
    }
    (DriveStatus::Continues, 60)
}

#[test]
fn drives_always_produce_legal_next_snaps() {
    init_tracing();
    let mut endings = std::collections::BTreeMap::new();
    for seed in 0..200 {
        let (status, _) = play_drive(seed, situation(25, 1, 10));
        *endings.entry(format!("{status}")).or_insert(0) += 1;
    }
    // A drive always ends within 60 snaps.
    assert!(!endings.contains_key("continues"), "{endings:?}");
    assert!(endings.contains_key("touchdown"), "{endings:?}");
}

#[test]
fn drives_from_the_shadow_of_the_goal_post() {
    for seed in 0..100 {
        let (status, snaps) = play_drive(seed, situation(2, 1, 10));
        assert!(snaps >= 1);
        assert_ne!(status, DriveStatus::Continues);
    }
}

// =============================================================================
// Rulebook scenarios
// =============================================================================

#[test]
fn holding_on_a_long_gain_is_accepted() {
    let s = situation(25, 1, 10);
    let decision = should_accept(
        &Foul::new(PenaltyKind::OffensiveHolding),
        &s,
        &RawPlayOutcome::gain(15),
    );
    assert!(decision.accept);
    let chosen = decision.chosen();
    assert_eq!(
        (chosen.new_yard_line, chosen.new_down, chosen.new_yards_to_go),
        (15, 1, 20)
    );
}

#[test]
fn pass_interference_at_the_sixty_five() {
    for los in [20u8, 40, 60] {
        let verdict = PenaltyVerdict {
            kind: PenaltyKind::DefensivePassInterference,
            offending_side: Side::Defense,
            player: Some(PlayerId::new(24)),
            timing: Timing::DuringPlay,
            spot_of_foul: Some(65),
        };
        let r = assemble(
            PlayArchetype::Vertical,
            &situation(los, 2, 10),
            RawPlayOutcome::incomplete(),
            Some(verdict),
        );
        assert_eq!(r.final_yard_line, 65);
        assert_eq!((r.final_down, r.final_distance), (1, 10));
        assert!(r.enforcement.as_ref().unwrap().is_first_down);
    }
}

#[test]
fn goal_to_go_after_penalty_inside_the_ten() {
    let verdict = PenaltyVerdict {
        kind: PenaltyKind::DefensiveHolding,
        offending_side: Side::Defense,
        player: None,
        timing: Timing::DuringPlay,
        spot_of_foul: None,
    };
    let r = assemble(
        PlayArchetype::InsideZone,
        &situation(93, 3, 7),
        RawPlayOutcome::gain(1),
        Some(verdict),
    );
    assert!(r.final_yard_line + r.final_distance <= 100);
    assert_eq!((r.final_yard_line, r.final_down, r.final_distance), (96, 1, 4));
}

#[test]
fn clean_engine_never_flags() {
    let engine = clean_engine();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for archetype in PlayArchetype::ALL {
        let input = game_input(context(50, 1, 10), archetype);
        assert!(engine.resolve_play(&input, &mut rng).penalty.is_none());
    }
}

#[test]
fn better_unit_moves_the_ball_further() {
    let engine = clean_engine();
    let back = ParticipantAttributes::new(PlayerId::new(22))
        .with(Attribute::Vision, 85)
        .with(Attribute::Agility, 80);
    let strong = game_input(context(35, 1, 10), PlayArchetype::InsideZone)
        .with_ratings(80.0, 45.0)
        .with_featured(back.clone());
    let weak = game_input(context(35, 1, 10), PlayArchetype::InsideZone)
        .with_ratings(45.0, 80.0)
        .with_featured(back);

    let total = |input: &PlayInput| -> i64 {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        (0..3_000)
            .map(|_| i64::from(engine.resolve_play(input, &mut rng).outcome.yards_gained))
            .sum()
    };
    assert!(total(&strong) > total(&weak));
}

#[test]
fn turnovers_reported_to_the_game_loop() {
    let r = assemble(
        PlayArchetype::Intermediate,
        &situation(40, 2, 10),
        RawPlayOutcome::new(OutcomeKind::Turnover, 0),
        None,
    );
    assert_eq!(r.drive_status, DriveStatus::Turnover);
    assert!(!r.drive_status.offense_keeps_ball());
}
