use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridiron_core::archetype::PlayArchetype;
use gridiron_core::attributes::{ParticipantAttributes, PlayerId};
use gridiron_core::context::{PlayContext, Situation};
use gridiron_core::engine::{PlayEngine, PlayInput};
use gridiron_core::penalty::{calculate_enforcement, Foul, PenaltyKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn roster(first_id: u64) -> Vec<ParticipantAttributes> {
    (first_id..first_id + 11)
        .map(|id| ParticipantAttributes::new(PlayerId::new(id)))
        .collect()
}

fn input(archetype: PlayArchetype) -> PlayInput {
    let ctx = PlayContext::new(Situation::new(35, 2, 7).expect("valid situation"));
    PlayInput::new(ctx, archetype).with_rosters(roster(1), roster(101))
}

fn bench_resolve_play(c: &mut Criterion) {
    let engine = PlayEngine::default();
    let run = input(PlayArchetype::InsideZone);
    let pass = input(PlayArchetype::Intermediate);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    c.bench_function("resolve_play_run", |b| {
        b.iter(|| black_box(engine.resolve_play(black_box(&run), &mut rng)))
    });
    c.bench_function("resolve_play_pass", |b| {
        b.iter(|| black_box(engine.resolve_play(black_box(&pass), &mut rng)))
    });
}

fn bench_enforcement(c: &mut Criterion) {
    let situation = Situation::new(25, 1, 10).expect("valid situation");
    let foul = Foul::new(PenaltyKind::OffensiveHolding);

    c.bench_function("calculate_enforcement", |b| {
        b.iter(|| black_box(calculate_enforcement(black_box(&foul), &situation, black_box(15))))
    });
}

fn bench_resolve_batch(c: &mut Criterion) {
    // One game's worth of snaps
    let engine = PlayEngine::default();
    let inputs: Vec<_> = PlayArchetype::ALL
        .into_iter()
        .cycle()
        .take(140)
        .map(input)
        .collect();

    c.bench_function("resolve_batch_140", |b| {
        b.iter(|| black_box(engine.resolve_batch(&inputs, black_box(7))))
    });
}

criterion_group!(benches, bench_resolve_play, bench_enforcement, bench_resolve_batch);
criterion_main!(benches);
