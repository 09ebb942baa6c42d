use std::fmt;

use crate::{color::Color, role::Role};

/// A piece with [`Color`], [`Role`] and the number of moves it has made.
///
/// The move counter travels with the piece, so rules that need an unmoved
/// piece (castling, the two-square pawn advance) keep working across
/// capture and undo cycles without extra bookkeeping. Two pieces compare
/// equal only if their counters also match.
///
/// # Examples
///
/// ```
/// use xadrez::{Color, Piece, Role};
///
/// let piece = Color::White.knight();
/// assert_eq!(piece.color, Color::White);
/// assert_eq!(piece.role, Role::Knight);
/// assert_eq!(piece.char(), 'N');
/// assert!(!piece.has_moved());
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    move_count: u16,
}

impl Piece {
    /// A piece that has not moved yet.
    #[inline]
    pub fn new(color: Color, role: Role) -> Piece {
        Piece {
            color,
            role,
            move_count: 0,
        }
    }

    /// Number of completed moves this piece has made.
    #[inline]
    pub fn move_count(self) -> u16 {
        self.move_count
    }

    #[inline]
    pub fn has_moved(self) -> bool {
        self.move_count > 0
    }

    #[inline]
    pub(crate) fn increase_move_count(&mut self) {
        self.move_count += 1;
    }

    #[inline]
    pub(crate) fn decrease_move_count(&mut self) {
        debug_assert!(self.move_count > 0);
        self.move_count -= 1;
    }

    /// Piece letter: uppercase for white, lowercase for black.
    pub fn char(self) -> char {
        self.color.fold(self.role.upper_char(), self.role.char())
    }

    /// Gets an unmoved piece from its letter, uppercase white and
    /// lowercase black.
    ///
    /// # Examples
    ///
    /// ```
    /// use xadrez::{Color, Piece};
    ///
    /// assert_eq!(Piece::from_char('q'), Some(Color::Black.queen()));
    /// assert_eq!(Piece::from_char('-'), None);
    /// ```
    pub fn from_char(ch: char) -> Option<Piece> {
        Role::from_char(ch).map(|role| role.of(Color::from_white(ch as u8 & 32 == 0)))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char_round_trip() {
        for ch in "PNBRQKpnbrqk".chars() {
            let piece = Piece::from_char(ch).unwrap();
            assert_eq!(piece.char(), ch);
            assert_eq!(piece.move_count(), 0);
        }
        assert_eq!(Piece::from_char('1'), None);
    }

    #[test]
    fn test_move_count() {
        let mut piece = Color::Black.rook();
        piece.increase_move_count();
        piece.increase_move_count();
        assert_eq!(piece.move_count(), 2);
        assert!(piece.has_moved());
        piece.decrease_move_count();
        piece.decrease_move_count();
        assert_eq!(piece, Color::Black.rook());
    }
}
