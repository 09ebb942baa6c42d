use std::{error::Error, fmt, str::FromStr};

/// A square of the board, packed as `row * 8 + col`.
///
/// Rows and columns are 0-indexed and rows count from the top of the
/// board as rendered for white, so `a8` is `(0, 0)` and `h1` is `(7, 7)`.
///
/// # Examples
///
/// ```
/// use xadrez::Square;
///
/// let square: Square = "g8".parse()?;
/// assert_eq!(square.row(), 0);
/// assert_eq!(square.col(), 6);
/// assert_eq!(square, Square::G8);
/// # Ok::<_, xadrez::ParseSquareError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(pub(crate) u8);

impl Square {
    /// Gets a square from 0-indexed coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` are not in `0..8` (debug assertions only).
    #[inline]
    pub const fn at(row: u8, col: u8) -> Square {
        debug_assert!(row < 8 && col < 8);
        Square(row * 8 + col)
    }

    /// Tries to get a square from 0-indexed coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use xadrez::Square;
    ///
    /// assert_eq!(Square::from_coords(7, 0), Some(Square::A1));
    /// assert_eq!(Square::from_coords(8, 0), None);
    /// assert_eq!(Square::from_coords(0, -1), None);
    /// ```
    #[inline]
    pub fn from_coords(row: i16, col: i16) -> Option<Square> {
        if 0 <= row && row < 8 && 0 <= col && col < 8 {
            Some(Square::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Tries to get a square from its index in `0..64`.
    #[inline]
    pub fn from_index(index: u8) -> Option<Square> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 >> 3
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 & 7
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Offsets the square by a number of rows and columns, `None` if the
    /// result is off the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use xadrez::Square;
    ///
    /// assert_eq!(Square::D2.offset(-2, 0), Some(Square::D4));
    /// assert_eq!(Square::D2.offset(2, 0), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn offset(self, rows: i16, cols: i16) -> Option<Square> {
        Square::from_coords(self.row() as i16 + rows, self.col() as i16 + cols)
    }
}

/// Error when coordinates or an index are off the board.
#[derive(Clone, Debug)]
pub struct PositionError {
    pub row: i16,
    pub col: i16,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position ({}, {}) is not on the board", self.row, self.col)
    }
}

impl Error for PositionError {}

impl TryFrom<(i16, i16)> for Square {
    type Error = PositionError;

    fn try_from((row, col): (i16, i16)) -> Result<Square, PositionError> {
        Square::from_coords(row, col).ok_or(PositionError { row, col })
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    /// Parses a square name: exactly a lowercase column letter `a`-`h`
    /// followed by a row number `1`-`8`.
    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        match s.as_bytes() {
            [col @ b'a'..=b'h', row @ b'1'..=b'8'] => Ok(Square::at(b'8' - *row, *col - b'a')),
            _ => Err(ParseSquareError),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col()) as char, 8 - self.row())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}

impl Square {
    pub const A1: Square = Square::at(7, 0);
    pub const B1: Square = Square::at(7, 1);
    pub const C1: Square = Square::at(7, 2);
    pub const D1: Square = Square::at(7, 3);
    pub const E1: Square = Square::at(7, 4);
    pub const F1: Square = Square::at(7, 5);
    pub const G1: Square = Square::at(7, 6);
    pub const H1: Square = Square::at(7, 7);
    pub const A2: Square = Square::at(6, 0);
    pub const B2: Square = Square::at(6, 1);
    pub const C2: Square = Square::at(6, 2);
    pub const D2: Square = Square::at(6, 3);
    pub const E2: Square = Square::at(6, 4);
    pub const F2: Square = Square::at(6, 5);
    pub const G2: Square = Square::at(6, 6);
    pub const H2: Square = Square::at(6, 7);
    pub const A3: Square = Square::at(5, 0);
    pub const B3: Square = Square::at(5, 1);
    pub const C3: Square = Square::at(5, 2);
    pub const D3: Square = Square::at(5, 3);
    pub const E3: Square = Square::at(5, 4);
    pub const F3: Square = Square::at(5, 5);
    pub const G3: Square = Square::at(5, 6);
    pub const H3: Square = Square::at(5, 7);
    pub const A4: Square = Square::at(4, 0);
    pub const B4: Square = Square::at(4, 1);
    pub const C4: Square = Square::at(4, 2);
    pub const D4: Square = Square::at(4, 3);
    pub const E4: Square = Square::at(4, 4);
    pub const F4: Square = Square::at(4, 5);
    pub const G4: Square = Square::at(4, 6);
    pub const H4: Square = Square::at(4, 7);
    pub const A5: Square = Square::at(3, 0);
    pub const B5: Square = Square::at(3, 1);
    pub const C5: Square = Square::at(3, 2);
    pub const D5: Square = Square::at(3, 3);
    pub const E5: Square = Square::at(3, 4);
    pub const F5: Square = Square::at(3, 5);
    pub const G5: Square = Square::at(3, 6);
    pub const H5: Square = Square::at(3, 7);
    pub const A6: Square = Square::at(2, 0);
    pub const B6: Square = Square::at(2, 1);
    pub const C6: Square = Square::at(2, 2);
    pub const D6: Square = Square::at(2, 3);
    pub const E6: Square = Square::at(2, 4);
    pub const F6: Square = Square::at(2, 5);
    pub const G6: Square = Square::at(2, 6);
    pub const H6: Square = Square::at(2, 7);
    pub const A7: Square = Square::at(1, 0);
    pub const B7: Square = Square::at(1, 1);
    pub const C7: Square = Square::at(1, 2);
    pub const D7: Square = Square::at(1, 3);
    pub const E7: Square = Square::at(1, 4);
    pub const F7: Square = Square::at(1, 5);
    pub const G7: Square = Square::at(1, 6);
    pub const H7: Square = Square::at(1, 7);
    pub const A8: Square = Square::at(0, 0);
    pub const B8: Square = Square::at(0, 1);
    pub const C8: Square = Square::at(0, 2);
    pub const D8: Square = Square::at(0, 3);
    pub const E8: Square = Square::at(0, 4);
    pub const F8: Square = Square::at(0, 5);
    pub const G8: Square = Square::at(0, 6);
    pub const H8: Square = Square::at(0, 7);

    /// All squares, in index order from `a8` to `h1`.
    pub const ALL: [Square; 64] = {
        let mut all = [Square(0); 64];
        let mut index = 0;
        while index < 64 {
            all[index] = Square(index as u8);
            index += 1;
        }
        all
    };
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Square, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("square name like 'e4'")
            }

            fn visit_str<E>(self, value: &str) -> Result<Square, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Square> {
        Ok(Square(u.int_in_range(0..=63)?))
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (1, Some(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for square in Square::ALL {
            let name = square.to_string();
            assert_eq!(name.parse::<Square>().unwrap(), square);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for s in ["", "e", "e2x", "i1", "a9", "a0", "E2", "2e", "ee", "22"] {
            assert!(s.parse::<Square>().is_err(), "accepted {s:?}");
        }
    }

    #[test]
    fn test_coords() {
        assert_eq!(Square::A8.index(), 0);
        assert_eq!(Square::H8.index(), 7);
        assert_eq!(Square::A1.index(), 56);
        assert_eq!(Square::H1.index(), 63);
        assert_eq!(Square::E4, Square::at(4, 4));
        assert_eq!(Square::try_from((4, 4)).unwrap(), Square::E4);
        assert!(Square::try_from((-1, 4)).is_err());
        assert!(Square::try_from((3, 8)).is_err());
    }

    #[test]
    fn test_offset() {
        assert_eq!(Square::E4.offset(0, 0), Some(Square::E4));
        assert_eq!(Square::E4.offset(-1, 1), Some(Square::F5));
        assert_eq!(Square::A8.offset(-1, 0), None);
        assert_eq!(Square::H1.offset(0, 1), None);
    }
}
