/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Result};
use thiserror::Error;

use super::{Bitboard, Side};

/// Reasons why a string could not be read as a [`Square`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Square notation is a file letter followed by a one or two digit rank.
    #[error("square notation must be 2 or 3 characters long, got {0:?}")]
    Length(String),

    #[error("invalid file {0:?}: files must be between A and I")]
    File(char),

    #[error("invalid rank {0:?}: ranks must be between 1 and 10")]
    Rank(String),
}

/// Represents a single point on the `9x10` Janggi board.
///
/// Internally encoded as `square = file + rank * 9`, so the indices of each square are:
/// ```text
/// 10| 81 82 83 84 85 86 87 88 89
///  9| 72 73 74 75 76 77 78 79 80
///  8| 63 64 65 66 67 68 69 70 71
///  7| 54 55 56 57 58 59 60 61 62
///  6| 45 46 47 48 49 50 51 52 53
///  5| 36 37 38 39 40 41 42 43 44
///  4| 27 28 29 30 31 32 33 34 35
///  3| 18 19 20 21 22 23 24 25 26
///  2|  9 10 11 12 13 14 15 16 17
///  1|  0  1  2  3  4  5  6  7  8
///   +---------------------------
///     A  B  C  D  E  F  G  H  I
/// ```
///
/// A [`Rank`] is a row (`0..10`) and a [`File`] is a column (`0..9`).
/// Red's pieces start on the low ranks and Blue's on the high ranks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const A1: Self = Self::new(File::A, Rank::ONE);
    pub const A2: Self = Self::new(File::A, Rank::TWO);
    pub const A3: Self = Self::new(File::A, Rank::THREE);
    pub const A4: Self = Self::new(File::A, Rank::FOUR);
    pub const A5: Self = Self::new(File::A, Rank::FIVE);
    pub const A6: Self = Self::new(File::A, Rank::SIX);
    pub const A7: Self = Self::new(File::A, Rank::SEVEN);
    pub const A8: Self = Self::new(File::A, Rank::EIGHT);
    pub const A9: Self = Self::new(File::A, Rank::NINE);
    pub const A10: Self = Self::new(File::A, Rank::TEN);

    pub const B1: Self = Self::new(File::B, Rank::ONE);
    pub const B2: Self = Self::new(File::B, Rank::TWO);
    pub const B3: Self = Self::new(File::B, Rank::THREE);
    pub const B4: Self = Self::new(File::B, Rank::FOUR);
    pub const B5: Self = Self::new(File::B, Rank::FIVE);
    pub const B6: Self = Self::new(File::B, Rank::SIX);
    pub const B7: Self = Self::new(File::B, Rank::SEVEN);
    pub const B8: Self = Self::new(File::B, Rank::EIGHT);
    pub const B9: Self = Self::new(File::B, Rank::NINE);
    pub const B10: Self = Self::new(File::B, Rank::TEN);

    pub const C1: Self = Self::new(File::C, Rank::ONE);
    pub const C2: Self = Self::new(File::C, Rank::TWO);
    pub const C3: Self = Self::new(File::C, Rank::THREE);
    pub const C4: Self = Self::new(File::C, Rank::FOUR);
    pub const C5: Self = Self::new(File::C, Rank::FIVE);
    pub const C6: Self = Self::new(File::C, Rank::SIX);
    pub const C7: Self = Self::new(File::C, Rank::SEVEN);
    pub const C8: Self = Self::new(File::C, Rank::EIGHT);
    pub const C9: Self = Self::new(File::C, Rank::NINE);
    pub const C10: Self = Self::new(File::C, Rank::TEN);

    pub const D1: Self = Self::new(File::D, Rank::ONE);
    pub const D2: Self = Self::new(File::D, Rank::TWO);
    pub const D3: Self = Self::new(File::D, Rank::THREE);
    pub const D4: Self = Self::new(File::D, Rank::FOUR);
    pub const D5: Self = Self::new(File::D, Rank::FIVE);
    pub const D6: Self = Self::new(File::D, Rank::SIX);
    pub const D7: Self = Self::new(File::D, Rank::SEVEN);
    pub const D8: Self = Self::new(File::D, Rank::EIGHT);
    pub const D9: Self = Self::new(File::D, Rank::NINE);
    pub const D10: Self = Self::new(File::D, Rank::TEN);

    pub const E1: Self = Self::new(File::E, Rank::ONE);
    pub const E2: Self = Self::new(File::E, Rank::TWO);
    pub const E3: Self = Self::new(File::E, Rank::THREE);
    pub const E4: Self = Self::new(File::E, Rank::FOUR);
    pub const E5: Self = Self::new(File::E, Rank::FIVE);
    pub const E6: Self = Self::new(File::E, Rank::SIX);
    pub const E7: Self = Self::new(File::E, Rank::SEVEN);
    pub const E8: Self = Self::new(File::E, Rank::EIGHT);
    pub const E9: Self = Self::new(File::E, Rank::NINE);
    pub const E10: Self = Self::new(File::E, Rank::TEN);

    pub const F1: Self = Self::new(File::F, Rank::ONE);
    pub const F2: Self = Self::new(File::F, Rank::TWO);
    pub const F3: Self = Self::new(File::F, Rank::THREE);
    pub const F4: Self = Self::new(File::F, Rank::FOUR);
    pub const F5: Self = Self::new(File::F, Rank::FIVE);
    pub const F6: Self = Self::new(File::F, Rank::SIX);
    pub const F7: Self = Self::new(File::F, Rank::SEVEN);
    pub const F8: Self = Self::new(File::F, Rank::EIGHT);
    pub const F9: Self = Self::new(File::F, Rank::NINE);
    pub const F10: Self = Self::new(File::F, Rank::TEN);

    pub const G1: Self = Self::new(File::G, Rank::ONE);
    pub const G2: Self = Self::new(File::G, Rank::TWO);
    pub const G3: Self = Self::new(File::G, Rank::THREE);
    pub const G4: Self = Self::new(File::G, Rank::FOUR);
    pub const G5: Self = Self::new(File::G, Rank::FIVE);
    pub const G6: Self = Self::new(File::G, Rank::SIX);
    pub const G7: Self = Self::new(File::G, Rank::SEVEN);
    pub const G8: Self = Self::new(File::G, Rank::EIGHT);
    pub const G9: Self = Self::new(File::G, Rank::NINE);
    pub const G10: Self = Self::new(File::G, Rank::TEN);

    pub const H1: Self = Self::new(File::H, Rank::ONE);
    pub const H2: Self = Self::new(File::H, Rank::TWO);
    pub const H3: Self = Self::new(File::H, Rank::THREE);
    pub const H4: Self = Self::new(File::H, Rank::FOUR);
    pub const H5: Self = Self::new(File::H, Rank::FIVE);
    pub const H6: Self = Self::new(File::H, Rank::SIX);
    pub const H7: Self = Self::new(File::H, Rank::SEVEN);
    pub const H8: Self = Self::new(File::H, Rank::EIGHT);
    pub const H9: Self = Self::new(File::H, Rank::NINE);
    pub const H10: Self = Self::new(File::H, Rank::TEN);

    pub const I1: Self = Self::new(File::I, Rank::ONE);
    pub const I2: Self = Self::new(File::I, Rank::TWO);
    pub const I3: Self = Self::new(File::I, Rank::THREE);
    pub const I4: Self = Self::new(File::I, Rank::FOUR);
    pub const I5: Self = Self::new(File::I, Rank::FIVE);
    pub const I6: Self = Self::new(File::I, Rank::SIX);
    pub const I7: Self = Self::new(File::I, Rank::SEVEN);
    pub const I8: Self = Self::new(File::I, Rank::EIGHT);
    pub const I9: Self = Self::new(File::I, Rank::NINE);
    pub const I10: Self = Self::new(File::I, Rank::TEN);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 89;
    pub const COUNT: usize = 90;

    /// Returns an iterator over all available squares, in ascending order of index.
    ///
    /// # Example
    /// ```
    /// # use janggi::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 90);
    /// assert_eq!(iter.next().unwrap(), Square::A1);
    /// assert_eq!(iter.last().unwrap(), Square::I10);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    ///
    /// # Example
    /// ```
    /// # use janggi::{Square, File, Rank};
    /// let e2 = Square::new(File::E, Rank::TWO);
    /// assert_eq!(e2, Square::E2);
    /// ```
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 + rank.0 * File::COUNT as u8)
    }

    /// Creates a new [`Square`] from a `(row, column)` pair, where both are zero-based.
    ///
    /// Returns [`None`] if the pair lies off the board.
    ///
    /// # Example
    /// ```
    /// # use janggi::Square;
    /// assert_eq!(Square::from_coords(1, 4), Some(Square::E2));
    /// assert_eq!(Square::from_coords(10, 0), None);
    /// ```
    #[inline(always)]
    pub const fn from_coords(row: u8, column: u8) -> Option<Self> {
        if row as usize >= Rank::COUNT || column as usize >= File::COUNT {
            return None;
        }

        Some(Self::new(File(column), Rank(row)))
    }

    /// Creates a new [`Square`] from the provided index value.
    ///
    /// The provided `index` must be `[0, 89]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use janggi::Square;
    /// let e2 = Square::from_index(13);
    /// assert!(e2.is_ok());
    /// assert_eq!(e2.unwrap(), Square::E2);
    ///
    /// assert!(Square::from_index(90).is_err());
    /// ```
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index > Self::MAX as usize {
            bail!(
                "Invalid index for Square: Must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(index as u8))
    }

    /// Creates a new [`Square`] from the provided index value, without error checking.
    ///
    /// # Panics
    ///
    /// If `index` is greater than `89` and debug assertions are enabled.
    #[inline(always)]
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < Self::COUNT, "Index must be between [0,90)");
        Self(index as u8)
    }

    /// Fetches the [`File`] (column) of this [`Square`].
    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 % File::COUNT as u8)
    }

    /// Fetches the [`Rank`] (row) of this [`Square`].
    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 / File::COUNT as u8)
    }

    /// Returns the zero-based `(row, column)` pair of this [`Square`].
    ///
    /// # Example
    /// ```
    /// # use janggi::Square;
    /// assert_eq!(Square::E2.coords(), (1, 4));
    /// assert_eq!(Square::I10.coords(), (9, 8));
    /// ```
    #[inline(always)]
    pub const fn coords(&self) -> (u8, u8) {
        (self.rank().0, self.file().0)
    }

    /// Returns this [`Square`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Alias for [`Bitboard::from_square`].
    #[inline(always)]
    pub const fn bitboard(&self) -> Bitboard {
        Bitboard::from_square(*self)
    }

    /// Attempt to offset this [`Square`] by the file and rank offsets.
    ///
    /// If `self + offset` would leave the board, then `None` is returned.
    ///
    /// # Example
    /// ```
    /// # use janggi::Square;
    /// assert_eq!(Square::C4.offset(1, 1), Some(Square::D5));
    /// assert_eq!(Square::C4.offset(-1, -1), Some(Square::B3));
    /// assert_eq!(Square::A1.offset(-1, 0), None);
    /// assert_eq!(Square::I10.offset(0, 1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let Some(file) = self.file().offset(file_delta) else {
            return None;
        };

        let Some(rank) = self.rank().offset(rank_delta) else {
            return None;
        };

        Some(Self::new(file, rank))
    }

    /// Moves this [`Square`] `n` ranks towards the enemy side of `side`, if possible.
    ///
    /// Red advances towards higher ranks and Blue towards lower ranks.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Side, Square};
    /// assert_eq!(Square::A4.forward_by(Side::Red, 1), Some(Square::A5));
    /// assert_eq!(Square::A7.forward_by(Side::Blue, 1), Some(Square::A6));
    /// assert_eq!(Square::A1.forward_by(Side::Blue, 1), None);
    /// ```
    #[inline(always)]
    pub const fn forward_by(&self, side: Side, n: u8) -> Option<Self> {
        self.offset(0, n as i8 * side.forward())
    }

    /// Parses a [`Square`] from algebraic notation: a file letter `A`-`I` (either case) followed by a rank `1`-`10`.
    ///
    /// # Example
    /// ```
    /// # use janggi::Square;
    /// assert_eq!(Square::from_notation("A1").unwrap(), Square::A1);
    /// assert_eq!(Square::from_notation("e6").unwrap(), Square::E6);
    /// assert_eq!(Square::from_notation("I10").unwrap(), Square::I10);
    ///
    /// assert!(Square::from_notation("A11").is_err());
    /// assert!(Square::from_notation("J1").is_err());
    /// ```
    pub fn from_notation(square: &str) -> Result<Self, NotationError> {
        let len = square.chars().count();
        if !(2..=3).contains(&len) {
            return Err(NotationError::Length(square.to_string()));
        }

        let mut chars = square.chars();
        // Length was checked above, so there is always a first char
        let file = match chars.next() {
            Some(c) => File::from_char(c)?,
            None => return Err(NotationError::Length(square.to_string())),
        };
        let rank = Rank::from_notation(chars.as_str())?;

        Ok(Self::new(file, rank))
    }

    /// Converts this [`Square`] to algebraic notation, with an uppercase file letter.
    ///
    /// # Example
    /// ```
    /// # use janggi::Square;
    /// assert_eq!(Square::E2.to_notation(), "E2");
    /// assert_eq!(Square::I10.to_notation(), "I10");
    /// ```
    #[inline(always)]
    pub fn to_notation(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = NotationError;
    /// Wrapper for [`Square::from_notation`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl TryFrom<&str> for Square {
    type Error = NotationError;
    /// Wrapper for [`Square::from_notation`].
    #[inline(always)]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_notation(value)
    }
}

impl TryFrom<String> for Square {
    type Error = NotationError;
    /// Wrapper for [`Square::from_notation`].
    #[inline(always)]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_notation(&value)
    }
}

impl TryFrom<usize> for Square {
    type Error = anyhow::Error;
    /// Wrapper for [`Square::from_index`].
    #[inline(always)]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::from_index(value)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    /// A [`Square`] can be used to index into an array of 90 elements.
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    /// A [`Square`] can be used to mutably index into an array of 90 elements.
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    /// Calls [`Square::to_notation`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_notation().fmt(f)
    }
}

impl fmt::Debug for Square {
    /// Calls [`Square::to_notation`] and also displays the internal decimal value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_notation(), self.0)
    }
}

/// Represents one of ten ranks (rows) on a Janggi board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);
    pub const NINE: Self = Self(8);
    pub const TEN: Self = Self(9);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 9;
    pub const COUNT: usize = 10;

    /// Returns an iterator over all available ranks, from [`Rank::ONE`] to [`Rank::TEN`].
    ///
    /// # Example
    /// ```
    /// # use janggi::Rank;
    /// let mut iter = Rank::iter();
    /// assert_eq!(iter.len(), 10);
    /// assert_eq!(iter.next().unwrap(), Rank::ONE);
    /// assert_eq!(iter.last().unwrap(), Rank::TEN);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Parses the numeric part of square notation (`"1"` through `"10"`).
    ///
    /// # Example
    /// ```
    /// # use janggi::Rank;
    /// assert_eq!(Rank::from_notation("1").unwrap(), Rank::ONE);
    /// assert_eq!(Rank::from_notation("10").unwrap(), Rank::TEN);
    /// assert!(Rank::from_notation("0").is_err());
    /// assert!(Rank::from_notation("11").is_err());
    /// ```
    pub fn from_notation(rank: &str) -> Result<Self, NotationError> {
        let bytes = rank.as_bytes();
        match bytes {
            b"10" => Ok(Self::TEN),
            [digit @ b'1'..=b'9'] => Ok(Self(*digit - b'1')),
            _ => Err(NotationError::Rank(rank.to_string())),
        }
    }

    /// Returns this [`Rank`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Offset this [`Rank`] by `delta`, returning [`None`] if that would leave the board.
    ///
    /// # Example
    /// ```
    /// # use janggi::Rank;
    /// assert_eq!(Rank::FOUR.offset(1), Some(Rank::FIVE));
    /// assert_eq!(Rank::ONE.offset(-1), None);
    /// assert_eq!(Rank::TEN.offset(1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        if let Some(bits) = self.0.checked_add_signed(delta) {
            return if bits <= Self::MAX {
                Some(Self(bits))
            } else {
                None
            };
        }

        None
    }
}

impl fmt::Display for Rank {
    /// Ranks are displayed one-based, so row `0` is shown as `1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Represents one of nine files (columns) on a Janggi board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);
    pub const I: Self = Self(8);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 8;
    pub const COUNT: usize = 9;

    /// Returns an iterator over all available files, from [`File::A`] to [`File::I`].
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Parses a [`File`] from its letter, ignoring case.
    ///
    /// # Example
    /// ```
    /// # use janggi::File;
    /// assert_eq!(File::from_char('a').unwrap(), File::A);
    /// assert_eq!(File::from_char('I').unwrap(), File::I);
    /// assert!(File::from_char('j').is_err());
    /// ```
    pub fn from_char(file: char) -> Result<Self, NotationError> {
        match file.to_ascii_uppercase() {
            c @ 'A'..='I' => Ok(Self(c as u8 - b'A')),
            _ => Err(NotationError::File(file)),
        }
    }

    /// Returns this [`File`] as an uppercase letter.
    #[inline(always)]
    pub const fn char(&self) -> char {
        (b'A' + self.0) as char
    }

    /// Returns this [`File`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Offset this [`File`] by `delta`, returning [`None`] if that would leave the board.
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        if let Some(bits) = self.0.checked_add_signed(delta) {
            return if bits <= Self::MAX {
                Some(Self(bits))
            } else {
                None
            };
        }

        None
    }
}

impl TryFrom<char> for File {
    type Error = NotationError;
    /// Wrapper for [`File::from_char`].
    #[inline(always)]
    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::from_char(value)
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        // Test the four corners
        let a1 = Square::new(File(0), Rank(0));
        assert_eq!(a1.to_string(), "A1");

        let i1 = Square::new(File(8), Rank(0));
        assert_eq!(i1.to_string(), "I1");

        let a10 = Square::new(File(0), Rank(9));
        assert_eq!(a10.to_string(), "A10");

        let i10 = Square::new(File(8), Rank(9));
        assert_eq!(i10.to_string(), "I10");

        // And the centre of Red's palace
        let e2 = Square::new(File(4), Rank(1));
        assert_eq!(e2.to_string(), "E2");
        assert_eq!(e2.coords(), (1, 4));
    }

    #[test]
    fn test_parsing() {
        assert_eq!(Square::from_notation("A1").unwrap().coords(), (0, 0));
        assert_eq!(Square::from_notation("E5").unwrap().coords(), (4, 4));
        assert_eq!(Square::from_notation("e6").unwrap().coords(), (5, 4));
        assert_eq!(Square::from_notation("I10").unwrap().coords(), (9, 8));
        assert_eq!(Square::try_from("d4").unwrap(), Square::D4);
        assert_eq!(Square::try_from(89usize).unwrap(), Square::I10);

        for bad in ["A11", "A0", "J1", "Z1", "AA", "11", "A", "", "A100", "A01", "a+1"] {
            assert!(Square::from_notation(bad).is_err(), "{bad:?} should not parse");
        }
        assert!(Square::try_from(90usize).is_err());
    }

    #[test]
    fn test_notation_errors() {
        assert_eq!(
            Square::from_notation("A"),
            Err(NotationError::Length("A".to_string()))
        );
        assert_eq!(Square::from_notation("J1"), Err(NotationError::File('J')));
        assert_eq!(Square::from_notation("11"), Err(NotationError::File('1')));
        assert_eq!(
            Square::from_notation("A11"),
            Err(NotationError::Rank("11".to_string()))
        );
        assert_eq!(
            Square::from_notation("AA"),
            Err(NotationError::Rank("A".to_string()))
        );
    }

    #[test]
    fn test_round_trip() {
        assert_eq!(Square::iter().count(), 90);
        for square in Square::iter() {
            let notation = square.to_notation();
            assert_eq!(Square::from_notation(&notation).unwrap(), square);
            assert_eq!(
                Square::from_notation(&notation.to_ascii_lowercase()).unwrap(),
                square
            );
        }
    }

    #[test]
    fn test_offsets() {
        assert_eq!(Square::A1.offset(0, 9), Some(Square::A10));
        assert_eq!(Square::A1.offset(8, 0), Some(Square::I1));
        assert_eq!(Square::A1.offset(9, 0), None);
        assert_eq!(Square::E9.forward_by(Side::Blue, 2), Some(Square::E7));
        assert_eq!(Square::E10.forward_by(Side::Red, 1), None);
    }

    #[test]
    fn test_indexing() {
        let mut board = [0; Square::COUNT];
        board[Square::E2] = u8::MAX;
        assert_eq!(board[13], u8::MAX);
    }
}
