use std::{error::Error, fmt};

use arrayvec::ArrayVec;

use crate::{
    board::Board,
    color::Color,
    movement::{piece_targets, MoveContext},
    piece::Piece,
    role::Role,
    square::Square,
    square_set::SquareSet,
};

/// Reversal record for one provisional move.
#[derive(Copy, Clone, Debug)]
struct Undo {
    from: Square,
    to: Square,
    captured: Option<(Square, Piece)>,
    rook: Option<(Square, Square)>,
}

/// A match: the board plus turn order, check state, en passant and
/// promotion bookkeeping.
///
/// Moves go through [`play`](Game::play), which validates the request,
/// executes it provisionally and rolls it back if it would leave the
/// mover's own king in check. Checkmate detection replays candidate
/// moves through the same execute/undo pair, so probing and real moves
/// cannot diverge.
///
/// # Examples
///
/// ```
/// use xadrez::{Color, Game, Square};
///
/// let mut game = Game::new();
/// assert_eq!(game.side_to_move(), Color::White);
/// assert_eq!(game.turn(), 1);
///
/// let captured = game.play("e2".parse()?, "e4".parse()?)?;
/// assert_eq!(captured, None);
/// assert_eq!(game.side_to_move(), Color::Black);
/// assert_eq!(game.en_passant_vulnerable(), Some(Square::E4));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Game {
    board: Board,
    turn: u32,
    side_to_move: Color,
    check: bool,
    checkmate: bool,
    en_passant: Option<Square>,
    promotion: Option<Square>,
    captured: ArrayVec<Piece, 32>,
}

impl Game {
    /// A fresh match with the standard 32-piece setup, white to move.
    pub fn new() -> Game {
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = [
                Role::Rook,
                Role::Knight,
                Role::Bishop,
                Role::Queen,
                Role::King,
                Role::Bishop,
                Role::Knight,
                Role::Rook,
            ];
            for (col, role) in back.into_iter().enumerate() {
                board.put(role.of(color), Square::at(color.back_row(), col as u8));
            }
            for col in 0..8 {
                board.put(color.pawn(), Square::at(color.pawn_row(), col));
            }
        }
        Game {
            board,
            turn: 1,
            side_to_move: Color::White,
            check: false,
            checkmate: false,
            en_passant: None,
            promotion: None,
            captured: ArrayVec::new(),
        }
    }

    #[cfg(test)]
    fn from_position(board: Board, side_to_move: Color, en_passant: Option<Square>) -> Game {
        let mut game = Game {
            board,
            turn: 1,
            side_to_move,
            check: false,
            checkmate: false,
            en_passant,
            promotion: None,
            captured: ArrayVec::new(),
        };
        game.check = game.is_in_check(side_to_move);
        game
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Half-move counter, starting at 1 and advancing after every
    /// completed move that does not end the match.
    #[inline]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.check
    }

    /// Whether the match ended in checkmate. The winner is
    /// [`side_to_move`](Game::side_to_move), which no longer changes.
    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Square of the pawn that may be captured en passant on this turn,
    /// if any.
    #[inline]
    pub fn en_passant_vulnerable(&self) -> Option<Square> {
        self.en_passant
    }

    /// Square of the pawn waiting for [`promote`](Game::promote), if any.
    #[inline]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.promotion
    }

    /// Captured pieces in capture order.
    #[inline]
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// Captured pieces of one side.
    pub fn captured_by(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.captured
            .iter()
            .copied()
            .filter(move |piece| piece.color == color)
    }

    /// The squares the piece on `from` may currently move to, ignoring
    /// whether a move would leave its own king in check.
    ///
    /// # Errors
    ///
    /// [`MoveError`] if `from` is empty, holds an opponent piece, or
    /// holds a piece with no possible moves at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use xadrez::{Game, Square};
    ///
    /// let game = Game::new();
    /// let knight = game.possible_moves(Square::G1)?;
    /// assert_eq!(knight.collect::<Vec<_>>(), vec![Square::F3, Square::H3]);
    /// assert!(game.possible_moves(Square::E4).is_err());
    /// # Ok::<_, xadrez::MoveError>(())
    /// ```
    pub fn possible_moves(&self, from: Square) -> Result<SquareSet, MoveError> {
        let piece = self.board.piece_at(from).ok_or(MoveError::NoPiece)?;
        if piece.color != self.side_to_move {
            return Err(MoveError::WrongColor);
        }
        let targets = piece_targets(&self.board, from, piece, self.ctx());
        if targets.is_empty() {
            return Err(MoveError::NoMoves);
        }
        Ok(targets)
    }

    /// Performs a move for the side to move, returning the captured
    /// piece if there was one.
    ///
    /// The move is executed provisionally and rolled back in full if it
    /// would leave the mover's own king in check. On success the check
    /// and checkmate state of the opponent is recomputed; unless the
    /// move ended the match, the turn advances and play passes to the
    /// opponent.
    ///
    /// A pawn reaching its farthest row leaves the match with a pending
    /// promotion; the caller is expected to call
    /// [`promote`](Game::promote) before the next move. This is not
    /// enforced here.
    ///
    /// # Errors
    ///
    /// [`MoveError`] if validation fails or the move would expose the
    /// mover's own king. The game is left exactly as it was.
    pub fn play(&mut self, from: Square, to: Square) -> Result<Option<Piece>, MoveError> {
        let targets = self.possible_moves(from)?;
        if !targets.contains(to) {
            return Err(MoveError::IllegalTarget);
        }

        let undo = self.make(from, to);
        if self.is_in_check(self.side_to_move) {
            self.unmake(undo);
            return Err(MoveError::SelfCheck);
        }

        let mover = self.board.piece_at(to).expect("moved piece on target");
        let captured = undo.captured.map(|(_, piece)| piece);

        let opponent = !self.side_to_move;
        self.check = self.is_in_check(opponent);
        if self.is_mated(opponent) {
            self.checkmate = true;
        } else {
            self.turn += 1;
            self.side_to_move = opponent;
        }

        // A pawn that advanced exactly two rows is open to en passant
        // capture on the opponent's next move only.
        self.en_passant = if mover.role == Role::Pawn
            && to.row() as i16 - from.row() as i16 == 2 * mover.color.forward()
        {
            Some(to)
        } else {
            None
        };

        // A pawn on its farthest row waits for a replacement piece.
        self.promotion = if mover.role == Role::Pawn && to.row() == mover.color.promotion_row() {
            Some(to)
        } else {
            None
        };

        Ok(captured)
    }

    /// Replaces the pawn waiting for promotion, returning the new piece.
    ///
    /// The replacement keeps the pawn's color and square and starts with
    /// a fresh move counter. The check flag is recomputed for the side
    /// to move, since the replacement may attack along lines the pawn
    /// never did.
    ///
    /// # Errors
    ///
    /// [`PromoteError::NoPending`] if no pawn is waiting, and
    /// [`PromoteError::InvalidRole`] unless the requested piece is a
    /// bishop, knight, rook or queen.
    pub fn promote(&mut self, role: Role) -> Result<Piece, PromoteError> {
        let square = self.promotion.ok_or(PromoteError::NoPending)?;
        if !matches!(role, Role::Bishop | Role::Knight | Role::Rook | Role::Queen) {
            return Err(PromoteError::InvalidRole { role });
        }

        let pawn = self.board.remove(square).expect("pawn pending promotion");
        let replacement = role.of(pawn.color);
        self.board.put(replacement, square);
        self.promotion = None;

        // Castling eligibility reads the check flag, so it must account
        // for the replacement piece. After a mating move the flags are
        // final and describe the mated side.
        if !self.checkmate {
            self.check = self.is_in_check(self.side_to_move);
        }

        Ok(replacement)
    }

    fn ctx(&self) -> MoveContext {
        MoveContext {
            check: self.check,
            en_passant: self.en_passant,
        }
    }

    /// Whether `color`'s king is attacked by any opposing piece.
    fn is_in_check(&self, color: Color) -> bool {
        let king = self.board.king_of(color).expect("king on the board");
        // Castling can never give check (its target square is empty), so
        // the attack scan runs with the castle branch disabled.
        let ctx = MoveContext {
            check: true,
            en_passant: self.en_passant,
        };
        self.board.by_color(!color).any(|from| {
            let piece = self.board.piece_at(from).expect("piece on occupied square");
            piece_targets(&self.board, from, piece, ctx).contains(king)
        })
    }

    /// Whether `color` is in check with no move of any of its pieces
    /// resolving it. Candidate moves are tried through the same
    /// [`make`](Game::make)/[`unmake`](Game::unmake) pair used for real
    /// moves.
    fn is_mated(&mut self, color: Color) -> bool {
        if !self.is_in_check(color) {
            return false;
        }
        let own: ArrayVec<Square, 16> = self.board.by_color(color).collect();
        for from in own {
            let piece = self.board.piece_at(from).expect("piece on own square");
            let targets = piece_targets(&self.board, from, piece, self.ctx());
            for to in targets {
                let undo = self.make(from, to);
                let still_in_check = self.is_in_check(color);
                self.unmake(undo);
                if !still_in_check {
                    return false;
                }
            }
        }
        true
    }

    /// Executes a move without validation: removes the mover from
    /// `from`, bumps its move counter, captures whatever stands on `to`
    /// (or the passed pawn of an en passant capture) and, for a castling
    /// king, brings the rook over. Returns the record that
    /// [`unmake`](Game::unmake) needs to reverse all of it.
    fn make(&mut self, from: Square, to: Square) -> Undo {
        let mut mover = self.board.remove(from).expect("piece on source square");
        mover.increase_move_count();

        let mut captured = self.board.remove(to).map(|piece| (to, piece));

        // A pawn changing column onto an empty square captures en
        // passant: the victim stands beside the source square.
        if mover.role == Role::Pawn && from.col() != to.col() && captured.is_none() {
            let victim = Square::at(from.row(), to.col());
            captured = self.board.remove(victim).map(|piece| (victim, piece));
        }

        self.board.put(mover, to);

        let mut rook = None;
        if mover.role == Role::King {
            let travel = to.col() as i16 - from.col() as i16;
            if travel.abs() == 2 {
                // Two columns of king travel mean castling.
                let (rook_cols, rook_to_cols) = if travel > 0 { (3, 1) } else { (-4, -1) };
                let rook_from = from.offset(0, rook_cols).expect("rook square on the board");
                let rook_to = from.offset(0, rook_to_cols).expect("rook square on the board");
                let mut rook_piece = self.board.remove(rook_from).expect("castling rook");
                rook_piece.increase_move_count();
                self.board.put(rook_piece, rook_to);
                rook = Some((rook_from, rook_to));
            }
        }

        if let Some((_, piece)) = captured {
            self.captured.push(piece);
        }

        Undo {
            from,
            to,
            captured,
            rook,
        }
    }

    /// Reverses [`make`](Game::make). Restores the mover, its counter,
    /// the castled rook and any captured piece, leaving every field of
    /// the game exactly as before.
    fn unmake(&mut self, undo: Undo) {
        let Undo {
            from,
            to,
            captured,
            rook,
        } = undo;

        let mut mover = self.board.remove(to).expect("piece on undone target");
        mover.decrease_move_count();
        self.board.put(mover, from);

        if let Some((rook_from, rook_to)) = rook {
            let mut rook_piece = self.board.remove(rook_to).expect("castling rook");
            rook_piece.decrease_move_count();
            self.board.put(rook_piece, rook_from);
        }

        if let Some((square, piece)) = captured {
            self.captured.pop();
            self.board.put(piece, square);
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

/// Error when a requested move is rejected. The game is unchanged.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveError {
    /// There is no piece on the source square.
    NoPiece,
    /// The piece on the source square belongs to the opponent.
    WrongColor,
    /// The chosen piece has no possible moves at all.
    NoMoves,
    /// The target square is not a possible move of the chosen piece.
    IllegalTarget,
    /// The move would leave the mover's own king in check.
    SelfCheck,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MoveError::NoPiece => "there is no piece on the source square",
            MoveError::WrongColor => "the chosen piece is not yours",
            MoveError::NoMoves => "there are no possible moves for the chosen piece",
            MoveError::IllegalTarget => "the chosen piece cannot move to the target square",
            MoveError::SelfCheck => "you cannot put yourself in check",
        })
    }
}

impl Error for MoveError {}

/// Error when replacing a promoted pawn.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PromoteError {
    /// There is no pawn waiting for promotion.
    NoPending,
    /// Promotion must pick a bishop, knight, rook or queen.
    InvalidRole { role: Role },
}

impl fmt::Display for PromoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromoteError::NoPending => f.write_str("there is no pawn to be promoted"),
            PromoteError::InvalidRole { role } => {
                write!(f, "invalid type for promotion: {role:?}")
            }
        }
    }
}

impl Error for PromoteError {}
