use criterion::{black_box, criterion_group, criterion_main, Criterion};
use duel_tetris::core::{Board, GameState, SimpleRng};
use duel_tetris::netplay::{decode_line, encode_line, Message};
use duel_tetris::types::{Cell, GameAction};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new(10, 20);
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Cell::Garbage);
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_inject_garbage(c: &mut Criterion) {
    let mut rng = SimpleRng::new(7);

    c.bench_function("inject_garbage_4", |b| {
        b.iter(|| {
            let mut board = Board::new(10, 20);
            board.inject_garbage(black_box(4), &mut rng);
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    c.bench_function("hard_drop_until_top_out", |b| {
        b.iter(|| {
            let mut state = GameState::new(12345);
            state.start();
            while !state.game_over() {
                state.apply_action(GameAction::HardDrop);
            }
        })
    });
}

fn bench_state_codec(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let msg = Message::game_state_from(&state.snapshot());
    let line = encode_line(&msg).unwrap();

    c.bench_function("encode_game_state", |b| {
        b.iter(|| encode_line(black_box(&msg)).unwrap())
    });
    c.bench_function("decode_game_state", |b| {
        b.iter(|| decode_line(black_box(&line)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_inject_garbage,
    bench_hard_drop,
    bench_state_codec
);
criterion_main!(benches);
