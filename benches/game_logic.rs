use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relic_tetris::core::{ActivePiece, Board, GameSnapshot, GameState};
use relic_tetris::engine::apply_place;
use relic_tetris::types::{Command, GamePhase, PieceKind, Variant};

fn bench_advance(c: &mut Criterion) {
    let mut state = GameState::new(Variant::Relic, 12345);

    c.bench_function("advance_16ms", |b| {
        b.iter(|| {
            if state.phase() != GamePhase::Playing {
                state.apply_command(Command::Restart);
            }
            state.advance(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines_wide", |b| {
        b.iter(|| {
            let mut board = Board::new(16, 30);
            for y in 26..30 {
                board.fill_row_except(y, &[], PieceKind::I);
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_bomb(c: &mut Criterion) {
    c.bench_function("clear_area_radius_3", |b| {
        b.iter(|| {
            let mut board = Board::new(16, 30);
            for y in 20..30 {
                board.fill_row_except(y, &[0], PieceKind::T);
            }
            black_box(board.clear_area(black_box(8), black_box(24), 3));
        })
    });
}

fn bench_place(c: &mut Criterion) {
    c.bench_function("place_i_vertical", |b| {
        b.iter(|| {
            let mut state = GameState::new(Variant::Arsenal, 7);
            state.set_active(ActivePiece::spawn(PieceKind::I, 16));
            black_box(apply_place(&mut state, 0, 1, false).is_ok());
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let state = GameState::new(Variant::Relic, 12345);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            black_box(snap.revision);
        })
    });
}

criterion_group!(
    benches,
    bench_advance,
    bench_line_clear,
    bench_bomb,
    bench_place,
    bench_snapshot_into
);
criterion_main!(benches);
