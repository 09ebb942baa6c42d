//! Movement rules for each piece type.
//!
//! Every function returns the set of squares the piece on `from` may
//! currently move to, ignoring whether the move would leave its own king
//! in check. Filtering out self-check is the responsibility of
//! [`Game`](crate::Game), which tries each candidate with a provisional
//! move.

use crate::{
    board::Board,
    color::Color,
    piece::Piece,
    role::Role,
    square::Square,
    square_set::SquareSet,
};

/// Read-only match state that movement rules depend on.
///
/// Castling looks at whether the side to move is currently in check;
/// pawns look at which square holds the pawn open to en passant capture.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct MoveContext {
    /// The side to move is currently in check.
    pub check: bool,
    /// Square of the pawn that just advanced two rows, if any.
    pub en_passant: Option<Square>,
}

const ROOK_DELTAS: [(i16, i16); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DELTAS: [(i16, i16); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_DELTAS: [(i16, i16); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_DELTAS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Target squares for `piece` standing on `from`.
///
/// # Examples
///
/// ```
/// use xadrez::{movement, Board, Color, MoveContext, Square};
///
/// let mut board = Board::empty();
/// board.place(Color::White.knight(), Square::G1)?;
/// let piece = board.piece_at(Square::G1).unwrap();
/// let targets = movement::piece_targets(&board, Square::G1, piece, MoveContext::default());
/// assert_eq!(targets.count(), 3);
/// # Ok::<_, xadrez::PlaceError>(())
/// ```
pub fn piece_targets(board: &Board, from: Square, piece: Piece, ctx: MoveContext) -> SquareSet {
    match piece.role {
        Role::Pawn => pawn_targets(board, from, piece, ctx),
        Role::Knight => knight_targets(board, from, piece.color),
        Role::Bishop => bishop_targets(board, from, piece.color),
        Role::Rook => rook_targets(board, from, piece.color),
        Role::Queen => queen_targets(board, from, piece.color),
        Role::King => king_targets(board, from, piece, ctx),
    }
}

/// Pawn pushes, captures and en passant.
pub fn pawn_targets(board: &Board, from: Square, piece: Piece, ctx: MoveContext) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    let forward = piece.color.forward();

    if let Some(one) = from.offset(forward, 0) {
        if !board.is_occupied(one) {
            targets.add(one);
            if !piece.has_moved() {
                if let Some(two) = one.offset(forward, 0) {
                    if !board.is_occupied(two) {
                        targets.add(two);
                    }
                }
            }
        }
    }

    for cols in [-1, 1] {
        if let Some(to) = from.offset(forward, cols) {
            match board.piece_at(to) {
                Some(other) => {
                    if other.color != piece.color {
                        targets.add(to);
                    }
                }
                None => {
                    // En passant: the vulnerable pawn stands beside the
                    // mover and the capture lands on the square behind it.
                    let side = Square::at(from.row(), to.col());
                    if ctx.en_passant == Some(side)
                        && board
                            .piece_at(side)
                            .is_some_and(|other| other.color != piece.color)
                    {
                        targets.add(to);
                    }
                }
            }
        }
    }

    targets
}

pub fn knight_targets(board: &Board, from: Square, color: Color) -> SquareSet {
    step_targets(board, from, color, &KNIGHT_DELTAS)
}

pub fn bishop_targets(board: &Board, from: Square, color: Color) -> SquareSet {
    ray_targets(board, from, color, &BISHOP_DELTAS)
}

pub fn rook_targets(board: &Board, from: Square, color: Color) -> SquareSet {
    ray_targets(board, from, color, &ROOK_DELTAS)
}

pub fn queen_targets(board: &Board, from: Square, color: Color) -> SquareSet {
    rook_targets(board, from, color) | bishop_targets(board, from, color)
}

/// King steps and castling.
///
/// Castling needs an unmoved king that is not in check and an unmoved
/// rook on the same row, with every square between them empty. The
/// marked target is the king's two-column destination; relocating the
/// rook is part of move execution.
pub fn king_targets(board: &Board, from: Square, piece: Piece, ctx: MoveContext) -> SquareSet {
    let mut targets = step_targets(board, from, piece.color, &KING_DELTAS);

    if !piece.has_moved() && !ctx.check {
        // Short side: rook three columns to the right of the king.
        if castling_rook(board, piece.color, from.offset(0, 3))
            && empty_at(board, from, 1)
            && empty_at(board, from, 2)
        {
            if let Some(to) = from.offset(0, 2) {
                targets.add(to);
            }
        }

        // Long side: rook four columns to the left, three empty squares.
        if castling_rook(board, piece.color, from.offset(0, -4))
            && empty_at(board, from, -1)
            && empty_at(board, from, -2)
            && empty_at(board, from, -3)
        {
            if let Some(to) = from.offset(0, -2) {
                targets.add(to);
            }
        }
    }

    targets
}

fn castling_rook(board: &Board, color: Color, square: Option<Square>) -> bool {
    square
        .and_then(|square| board.piece_at(square))
        .is_some_and(|piece| piece.color == color && piece.role == Role::Rook && !piece.has_moved())
}

fn empty_at(board: &Board, from: Square, cols: i16) -> bool {
    from.offset(0, cols)
        .is_some_and(|square| !board.is_occupied(square))
}

fn step_targets(board: &Board, from: Square, color: Color, deltas: &[(i16, i16)]) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    for &(rows, cols) in deltas {
        if let Some(to) = from.offset(rows, cols) {
            if board.piece_at(to).map_or(true, |piece| piece.color != color) {
                targets.add(to);
            }
        }
    }
    targets
}

fn ray_targets(board: &Board, from: Square, color: Color, deltas: &[(i16, i16)]) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    for &(rows, cols) in deltas {
        let mut next = from.offset(rows, cols);
        while let Some(to) = next {
            match board.piece_at(to) {
                None => {
                    targets.add(to);
                    next = to.offset(rows, cols);
                }
                Some(piece) => {
                    if piece.color != color {
                        targets.add(to);
                    }
                    break;
                }
            }
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(pieces: &[(char, Square)]) -> Board {
        let mut board = Board::empty();
        for &(ch, square) in pieces {
            board.place(Piece::from_char(ch).unwrap(), square).unwrap();
        }
        board
    }

    #[test]
    fn test_rook_rays_stop_at_pieces() {
        let board = board(&[('R', Square::D4), ('P', Square::D2), ('p', Square::F4)]);
        let targets = rook_targets(&board, Square::D4, Color::White);
        assert!(targets.contains(Square::D8));
        assert!(targets.contains(Square::D3));
        assert!(!targets.contains(Square::D2));
        assert!(targets.contains(Square::F4));
        assert!(!targets.contains(Square::G4));
        assert_eq!(targets.count(), 10);
    }

    #[test]
    fn test_bishop_from_corner() {
        let board = board(&[('b', Square::A8)]);
        let targets = bishop_targets(&board, Square::A8, Color::Black);
        assert_eq!(targets.count(), 7);
        assert!(targets.contains(Square::H1));
    }

    #[test]
    fn test_queen_in_the_open() {
        let board = board(&[('Q', Square::D5)]);
        assert_eq!(queen_targets(&board, Square::D5, Color::White).count(), 27);
    }

    #[test]
    fn test_knight_on_the_rim() {
        let board = board(&[('N', Square::A1)]);
        let targets = knight_targets(&board, Square::A1, Color::White);
        assert_eq!(targets, SquareSet::from_square(Square::B3).with(Square::C2));
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let board = board(&[
            ('N', Square::G1),
            ('P', Square::F2),
            ('P', Square::G2),
            ('P', Square::H2),
            ('p', Square::F3),
        ]);
        let targets = knight_targets(&board, Square::G1, Color::White);
        assert_eq!(targets, SquareSet::from_square(Square::E2).with(Square::F3).with(Square::H3));
    }

    #[test]
    fn test_pawn_advance() {
        let board = board(&[('P', Square::E2)]);
        let pawn = board.piece_at(Square::E2).unwrap();
        let targets = pawn_targets(&board, Square::E2, pawn, MoveContext::default());
        assert_eq!(targets, SquareSet::from_square(Square::E3).with(Square::E4));
    }

    #[test]
    fn test_pawn_blocked() {
        let far = board(&[('P', Square::E2), ('n', Square::E4)]);
        let pawn = far.piece_at(Square::E2).unwrap();
        let targets = pawn_targets(&far, Square::E2, pawn, MoveContext::default());
        assert_eq!(targets, SquareSet::from_square(Square::E3));

        let near = board(&[('P', Square::E2), ('n', Square::E3)]);
        let targets = pawn_targets(&near, Square::E2, pawn, MoveContext::default());
        assert_eq!(targets, SquareSet::EMPTY);
    }

    #[test]
    fn test_pawn_double_step_only_before_moving() {
        let mut pawn = Color::White.pawn();
        pawn.increase_move_count();
        let mut board = Board::empty();
        board.place(pawn, Square::E3).unwrap();
        let targets = pawn_targets(&board, Square::E3, pawn, MoveContext::default());
        assert_eq!(targets, SquareSet::from_square(Square::E4));
    }

    #[test]
    fn test_pawn_captures_diagonally() {
        let board = board(&[
            ('P', Square::E4),
            ('p', Square::D5),
            ('N', Square::F5),
            ('n', Square::E5),
        ]);
        let pawn = board.piece_at(Square::E4).unwrap();
        let targets = pawn_targets(&board, Square::E4, pawn, MoveContext::default());
        assert_eq!(targets, SquareSet::from_square(Square::D5));
    }

    #[test]
    fn test_pawn_en_passant_needs_the_flag() {
        let board = board(&[('P', Square::E5), ('p', Square::D5)]);
        let pawn = board.piece_at(Square::E5).unwrap();
        let without = pawn_targets(&board, Square::E5, pawn, MoveContext::default());
        assert!(!without.contains(Square::D6));

        let ctx = MoveContext {
            check: false,
            en_passant: Some(Square::D5),
        };
        let with = pawn_targets(&board, Square::E5, pawn, ctx);
        assert!(with.contains(Square::D6));
        assert!(with.contains(Square::E6));
    }

    #[test]
    fn test_pawn_en_passant_for_black() {
        let board = board(&[('p', Square::E4), ('P', Square::F4)]);
        let pawn = board.piece_at(Square::E4).unwrap();
        let ctx = MoveContext {
            check: false,
            en_passant: Some(Square::F4),
        };
        let targets = pawn_targets(&board, Square::E4, pawn, ctx);
        assert!(targets.contains(Square::F3));
        assert!(targets.contains(Square::E3));
    }

    #[test]
    fn test_king_ring() {
        let board = board(&[('K', Square::E1), ('R', Square::D1), ('p', Square::E2)]);
        let king = board.piece_at(Square::E1).unwrap();
        let targets = king_targets(&board, Square::E1, king, MoveContext::default());
        assert!(!targets.contains(Square::D1));
        assert!(targets.contains(Square::E2));
        assert!(targets.contains(Square::D2));
        assert!(targets.contains(Square::F1));
        assert!(targets.contains(Square::F2));
    }

    #[test]
    fn test_castling_eligibility() {
        let clear = board(&[('K', Square::E1), ('R', Square::A1), ('R', Square::H1)]);
        let king = clear.piece_at(Square::E1).unwrap();
        let targets = king_targets(&clear, Square::E1, king, MoveContext::default());
        assert!(targets.contains(Square::G1));
        assert!(targets.contains(Square::C1));

        // Not while in check.
        let in_check = MoveContext {
            check: true,
            en_passant: None,
        };
        let targets = king_targets(&clear, Square::E1, king, in_check);
        assert!(!targets.contains(Square::G1));
        assert!(!targets.contains(Square::C1));

        // Not with a piece between king and rook.
        let blocked = board(&[
            ('K', Square::E1),
            ('R', Square::A1),
            ('N', Square::B1),
            ('R', Square::H1),
        ]);
        let targets = king_targets(&blocked, Square::E1, king, MoveContext::default());
        assert!(targets.contains(Square::G1));
        assert!(!targets.contains(Square::C1));

        // Not with a rook that has already moved.
        let mut rook = Color::White.rook();
        rook.increase_move_count();
        let mut moved = Board::empty();
        moved.place(Color::White.king(), Square::E1).unwrap();
        moved.place(rook, Square::H1).unwrap();
        let targets = king_targets(&moved, Square::E1, king, MoveContext::default());
        assert!(!targets.contains(Square::G1));

        // Not with a king that has already moved.
        let mut wandered = Color::White.king();
        wandered.increase_move_count();
        let targets = king_targets(&clear, Square::E1, wandered, MoveContext::default());
        assert!(!targets.contains(Square::G1));
        assert!(!targets.contains(Square::C1));
    }

    #[test]
    fn test_castling_for_black() {
        let board = board(&[('k', Square::E8), ('r', Square::A8), ('r', Square::H8)]);
        let king = board.piece_at(Square::E8).unwrap();
        let targets = king_targets(&board, Square::E8, king, MoveContext::default());
        assert!(targets.contains(Square::G8));
        assert!(targets.contains(Square::C8));
    }
}
