use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ashta_engine::{
    play_games, AshtaRules, Color, GameConfig, GameState, PieceSlot, PlayerId, RulesEngine,
    SimConfig,
};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

/// Mid-game position: Red has a kill and pieces in every ring, Green is
/// spread along the outer ring.
fn midgame() -> GameState {
    let mut state = GameState::new(GameConfig::new(4));
    for (i, color) in Color::ALL.iter().enumerate() {
        state.seat(format!("p{i}"), *color).unwrap();
    }
    state.try_start().unwrap();

    for (slot, index) in [2, 10, 20, 30, 42].into_iter().enumerate() {
        state.arrange(P0, slot, PieceSlot::OnPath(index));
    }
    state.arrange_kills(P0, 1);
    for (slot, index) in [1, 5, 9, 14].into_iter().enumerate() {
        state.arrange(P1, slot, PieceSlot::OnPath(index));
    }
    state
}

fn bench_attempt_move(c: &mut Criterion) {
    let rules = AshtaRules::standard();
    let state = midgame();
    c.bench_function("attempt_move_step", |b| {
        b.iter(|| rules.attempt_move(black_box(&state), P0, 1, black_box(4)))
    });
    c.bench_function("attempt_move_rejected", |b| {
        b.iter(|| rules.attempt_move(black_box(&state), P0, 5, black_box(3)))
    });
}

fn bench_legal_moves(c: &mut Criterion) {
    let rules = AshtaRules::standard();
    let state = midgame();
    c.bench_function("legal_moves_all_faces", |b| {
        b.iter(|| {
            for dice in [1, 2, 3, 4, 5, 6, 12] {
                black_box(rules.legal_moves(black_box(&state), P0, dice));
            }
        })
    });
}

fn bench_self_play(c: &mut Criterion) {
    let config = SimConfig::new()
        .with_game(GameConfig::new(4))
        .with_max_moves(2_000)
        .with_seed(3);
    let mut group = c.benchmark_group("self_play");
    group.sample_size(10);
    group.bench_function("four_player_game", |b| {
        b.iter(|| play_games(black_box(&config), 1).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_attempt_move, bench_legal_moves, bench_self_play);
criterion_main!(benches);
