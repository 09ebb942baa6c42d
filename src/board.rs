use std::{error::Error, fmt, fmt::Write as _};

use crate::{color::Color, piece::Piece, role::Role, square::Square, square_set::SquareSet};

/// Piece placement: 64 slots, each holding at most one piece.
///
/// The board stores placement and answers occupancy queries, nothing
/// else. Whose turn it is, check state and similar match state live in
/// [`Game`](crate::Game).
///
/// # Examples
///
/// ```
/// use xadrez::{Board, Color, Square};
///
/// let mut board = Board::empty();
/// board.place(Color::White.king(), Square::E1)?;
/// assert_eq!(board.piece_at(Square::E1), Some(Color::White.king()));
/// assert_eq!(board.king_of(Color::White), Some(Square::E1));
/// # Ok::<_, xadrez::PlaceError>(())
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct Board {
    slots: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Board {
        Board { slots: [None; 64] }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.slots[square.index()]
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.slots[square.index()].is_some()
    }

    /// Places a piece on an empty square.
    ///
    /// # Errors
    ///
    /// [`PlaceError`] if the square is occupied. The board is unchanged.
    pub fn place(&mut self, piece: Piece, square: Square) -> Result<(), PlaceError> {
        match self.slots[square.index()] {
            Some(occupant) => Err(PlaceError { square, occupant }),
            None => {
                self.slots[square.index()] = Some(piece);
                Ok(())
            }
        }
    }

    /// Removes and returns the piece on a square, if any.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.slots[square.index()].take()
    }

    /// Unchecked placement for move execution. The square must be empty.
    #[inline]
    pub(crate) fn put(&mut self, piece: Piece, square: Square) {
        debug_assert!(self.slots[square.index()].is_none());
        self.slots[square.index()] = Some(piece);
    }

    /// Squares with a piece on them.
    pub fn occupied(&self) -> SquareSet {
        self.filter(|_| true)
    }

    /// Squares occupied by the given side.
    pub fn by_color(&self, color: Color) -> SquareSet {
        self.filter(|piece| piece.color == color)
    }

    /// Square of the given side's king, if it is on the board.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.filter(|piece| piece.color == color && piece.role == Role::King)
            .first()
    }

    fn filter<F>(&self, mut predicate: F) -> SquareSet
    where
        F: FnMut(Piece) -> bool,
    {
        let mut set = SquareSet::EMPTY;
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.is_some_and(&mut predicate) {
                set.0 |= 1 << index;
            }
        }
        set
    }

    /// Iterates over occupied squares and their pieces in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|piece| (Square(index as u8), piece)))
    }
}

impl fmt::Display for Board {
    /// Renders the board with row numbers and column letters, `.` for
    /// empty squares, uppercase letters for white pieces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8 {
                f.write_char(match self.piece_at(Square::at(row, col)) {
                    Some(piece) => piece.char(),
                    None => '.',
                })?;
                f.write_char(if col < 7 { ' ' } else { '\n' })?;
            }
        }
        f.write_str("  a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Error when placing a piece on an occupied square.
#[derive(Clone, Debug)]
pub struct PlaceError {
    pub square: Square,
    pub occupant: Piece,
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "there is already a piece on {}", self.square)
    }
}

impl Error for PlaceError {}
