//! Benchmarks for move generation and the checkmate hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xadrez::{movement, Game, MoveContext, Square};

fn play_all(game: &mut Game, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        game.play(from.parse().unwrap(), to.parse().unwrap())
            .expect("legal move");
    }
}

/// An Italian-game middlegame, a realistic generation target.
fn middlegame() -> Game {
    let mut game = Game::new();
    play_all(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("f8", "c5"),
            ("c2", "c3"),
            ("g8", "f6"),
            ("d2", "d3"),
            ("d7", "d6"),
        ],
    );
    game
}

fn bench_piece_targets(c: &mut Criterion) {
    let game = middlegame();
    let ctx = MoveContext::default();

    c.bench_function("piece_targets_middlegame", |b| {
        b.iter(|| {
            let mut total = 0;
            for from in game.board().by_color(game.side_to_move()) {
                let piece = game.board().piece_at(from).expect("piece on own square");
                total += movement::piece_targets(game.board(), from, piece, ctx).count();
            }
            black_box(total)
        })
    });
}

fn bench_play(c: &mut Criterion) {
    let game = middlegame();

    c.bench_function("play_middlegame_move", |b| {
        b.iter(|| {
            let mut child = game.clone();
            child
                .play(Square::C4, Square::B5)
                .expect("legal bishop move");
            black_box(child)
        })
    });
}

fn bench_mating_move(c: &mut Criterion) {
    let mut game = Game::new();
    play_all(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);

    c.bench_function("detect_fools_mate", |b| {
        b.iter(|| {
            let mut child = game.clone();
            child.play(Square::D8, Square::H4).expect("mating move");
            black_box(child.is_checkmate())
        })
    });
}

criterion_group!(benches, bench_piece_targets, bench_play, bench_mating_move);
criterion_main!(benches);
