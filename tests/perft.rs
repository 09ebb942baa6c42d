use xadrez::Game;

/// Counts the legal move paths of the given depth, driving every
/// candidate through `play` on a cloned game so that validation,
/// execution and rollback all get exercised on the way.
fn perft(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for from in game.board().by_color(game.side_to_move()) {
        if let Ok(targets) = game.possible_moves(from) {
            for to in targets {
                let mut child = game.clone();
                if child.play(from, to).is_ok() {
                    nodes += perft(&child, depth - 1);
                }
            }
        }
    }
    nodes
}

#[test]
fn test_starting_position_shallow() {
    let game = Game::default();
    assert_eq!(perft(&game, 1), 20);
    assert_eq!(perft(&game, 2), 400);
    assert_eq!(perft(&game, 3), 8_902);
}

#[test]
#[ignore = "takes minutes in debug builds"]
fn test_starting_position_depth_4() {
    assert_eq!(perft(&Game::default(), 4), 197_281);
}
