use std::{fmt, fmt::Write as _, iter::FusedIterator, ops};

use crate::square::Square;

/// A set of squares, one bit per square in index order.
///
/// This is the legality matrix handed out by move generation: a bit is
/// set at every square the selected piece may currently move to. The set
/// iterates over its squares directly.
///
/// # Examples
///
/// ```
/// use xadrez::{Square, SquareSet};
///
/// let mut targets = SquareSet::EMPTY;
/// targets.add(Square::E4);
/// targets.add(Square::E3);
/// assert!(targets.contains(Square::E3));
/// assert_eq!(targets.count(), 2);
/// assert_eq!(targets.collect::<Vec<_>>(), vec![Square::E4, Square::E3]);
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct SquareSet(pub u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);
    pub const FULL: SquareSet = SquareSet(!0);

    #[inline]
    pub fn from_square(square: Square) -> SquareSet {
        SquareSet(1 << square.index())
    }

    #[inline]
    pub fn contains(self, square: Square) -> bool {
        self.0 & (1 << square.index()) != 0
    }

    #[inline]
    pub fn add(&mut self, square: Square) {
        self.0 |= 1 << square.index();
    }

    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1 << square.index());
    }

    #[inline]
    #[must_use]
    pub fn with(self, square: Square) -> SquareSet {
        SquareSet(self.0 | (1 << square.index()))
    }

    #[inline]
    #[must_use]
    pub fn without(self, square: Square) -> SquareSet {
        SquareSet(self.0 & !(1 << square.index()))
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn first(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square(self.0.trailing_zeros() as u8))
        }
    }
}

impl ops::BitAnd for SquareSet {
    type Output = SquareSet;

    #[inline]
    fn bitand(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 & rhs.0)
    }
}

impl ops::BitAndAssign for SquareSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: SquareSet) {
        self.0 &= rhs.0;
    }
}

impl ops::BitOr for SquareSet {
    type Output = SquareSet;

    #[inline]
    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for SquareSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: SquareSet) {
        self.0 |= rhs.0;
    }
}

impl ops::Not for SquareSet {
    type Output = SquareSet;

    #[inline]
    fn not(self) -> SquareSet {
        SquareSet(!self.0)
    }
}

impl Iterator for SquareSet {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let square = self.first();
        self.0 &= self.0.wrapping_sub(1);
        square
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.count();
        (len, Some(len))
    }
}

impl ExactSizeIterator for SquareSet {
    #[inline]
    fn len(&self) -> usize {
        self.count()
    }
}

impl FusedIterator for SquareSet {}

impl FromIterator<Square> for SquareSet {
    fn from_iter<T>(iter: T) -> SquareSet
    where
        T: IntoIterator<Item = Square>,
    {
        let mut set = SquareSet::EMPTY;
        for square in iter {
            set.add(square);
        }
        set
    }
}

impl Extend<Square> for SquareSet {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = Square>,
    {
        for square in iter {
            self.add(square);
        }
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                f.write_char(if self.contains(Square::at(row, col)) {
                    '1'
                } else {
                    '.'
                })?;
                f.write_char(if col < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SquareSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SquareSet {
    fn deserialize<D>(deserializer: D) -> Result<SquareSet, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer).map(SquareSet)
    }
}
