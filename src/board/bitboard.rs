/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Not};

use super::{File, Rank, Side, Square};

/// Builds the mask of a 3x3 palace whose lowest rank is `first_rank`.
const fn palace_mask(first_rank: u8) -> u128 {
    let mut bits = 0u128;
    let mut rank = first_rank;
    while rank < first_rank + 3 {
        let mut file = File::D.0;
        while file <= File::F.0 {
            bits |= 1u128 << (rank as usize * File::COUNT + file as usize);
            file += 1;
        }
        rank += 1;
    }
    bits
}

/// A [`Bitboard`] represents a set of squares on the Janggi board as a set of bits.
///
/// Every movement rule returns its destinations as a [`Bitboard`], and the palaces
/// are stored as fixed masks.
///
/// The internal representation is a 128-bit number of which only the low 90 bits are used.
/// Bit `n` corresponds to the [`Square`] with index `n`, so the low order bits represent Red's side of the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Bitboard(pub(crate) u128);

impl Bitboard {
    pub const EMPTY_BOARD: Self = Self(0);
    pub const FULL_BOARD: Self = Self((1u128 << Square::COUNT) - 1);

    /// Red's palace: `D1`-`F3`.
    pub const RED_PALACE: Self = Self(palace_mask(Rank::ONE.0));

    /// Blue's palace: `D8`-`F10`.
    pub const BLUE_PALACE: Self = Self(palace_mask(Rank::EIGHT.0));

    /// Constructs a new [`Bitboard`] from the provided [`Square`].
    ///
    /// # Example
    /// ```
    /// # use janggi::{Bitboard, Square};
    /// let board = Bitboard::from_square(Square::E2);
    /// assert!(board.contains(Square::E2));
    /// assert_eq!(board.population(), 1);
    /// ```
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1u128 << square.0)
    }

    /// Fetches the palace belonging to `side`.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Bitboard, Side, Square};
    /// assert!(Bitboard::palace(Side::Red).contains(Square::E2));
    /// assert!(Bitboard::palace(Side::Blue).contains(Square::D10));
    /// assert!(!Bitboard::palace(Side::Blue).contains(Square::E2));
    /// ```
    #[inline(always)]
    pub const fn palace(side: Side) -> Self {
        match side {
            Side::Red => Self::RED_PALACE,
            Side::Blue => Self::BLUE_PALACE,
        }
    }

    /// Returns `true` if this [`Bitboard`] contains no squares.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `square` is in this [`Bitboard`].
    #[inline(always)]
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & Self::from_square(square).0 != 0
    }

    /// Returns `true` if `self` and `other` share at least one square.
    #[inline(always)]
    pub fn intersects(&self, other: impl Into<Self>) -> bool {
        self.0 & other.into().0 != 0
    }

    /// Adds every square of `other` to `self`.
    #[inline(always)]
    pub fn set(&mut self, other: impl Into<Self>) {
        self.0 |= other.into().0;
    }

    /// Removes every square of `other` from `self`.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Bitboard, Square};
    /// let mut board = Bitboard::RED_PALACE;
    /// board.clear(Square::E2);
    /// assert_eq!(board.population(), 8);
    /// assert!(!board.contains(Square::E2));
    /// ```
    #[inline(always)]
    pub fn clear(&mut self, other: impl Into<Self>) {
        self.0 &= !other.into().0;
    }

    /// Returns the lowest-index [`Square`] in this [`Bitboard`], if there is one.
    #[inline(always)]
    pub const fn lsb(&self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Some(Square(self.0.trailing_zeros() as u8))
        }
    }

    /// Removes and returns the lowest-index [`Square`] in this [`Bitboard`], if there is one.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let square = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(square)
    }

    /// Returns an iterator over all squares in this [`Bitboard`], in ascending order of index.
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bitboard: *self }
    }

    /// Counts the number of squares in this [`Bitboard`].
    ///
    /// # Example
    /// ```
    /// # use janggi::Bitboard;
    /// assert_eq!(Bitboard::RED_PALACE.population(), 9);
    /// assert_eq!(Bitboard::FULL_BOARD.population(), 90);
    /// ```
    #[inline(always)]
    pub const fn population(&self) -> u8 {
        self.0.count_ones() as u8
    }

    #[inline(always)]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl FromIterator<Square> for Bitboard {
    /// Constructs a new [`Bitboard`] from the provided iterator of [`Square`]s.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Bitboard, Square};
    /// let squares = [Square::D1, Square::E2, Square::F3];
    /// let board = Bitboard::from_iter(squares);
    /// assert_eq!(board.population(), 3);
    /// assert!(board.contains(Square::E2));
    /// ```
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::EMPTY_BOARD, |bb, square| bb.or(square.bitboard()))
    }
}

impl Extend<Square> for Bitboard {
    fn extend<T: IntoIterator<Item = Square>>(&mut self, iter: T) {
        for square in iter {
            self.set(square);
        }
    }
}

macro_rules! impl_bitwise_op {
    // Impl op and op_assign for Self
    ($op:tt, $op_assign:tt, $func:ident, $func_assign:ident, $op_tok:tt) => {
        impl<T> std::ops::$op<T> for Bitboard
        where
            Self: From<T>,
        {
            type Output = Self;
            #[inline(always)]
            fn $func(self, rhs: T) -> Self::Output {
                Self(self.0 $op_tok Self::from(rhs).0)
            }
        }

        impl<T> std::ops::$op_assign<T> for Bitboard
        where
            Self: From<T>,
        {
            #[inline(always)]
            fn $func_assign(&mut self, rhs: T) {
                self.0 = self.0 $op_tok Self::from(rhs).0;
            }
        }
    };
}

impl_bitwise_op!(BitAnd, BitAndAssign, bitand, bitand_assign, &);
impl_bitwise_op!(BitOr, BitOrAssign, bitor, bitor_assign, |);
impl_bitwise_op!(BitXor, BitXorAssign, bitxor, bitxor_assign, ^);

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0 & Self::FULL_BOARD.0)
    }
}

impl From<Square> for Bitboard {
    /// Wrapper for [`Bitboard::from_square`].
    #[inline(always)]
    fn from(value: Square) -> Self {
        Self::from_square(value)
    }
}

impl Default for Bitboard {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY_BOARD
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(Square::COUNT * 2 + Rank::COUNT);

        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let square = Square::new(file, rank);
                let occupant = if self.contains(square) { 'X' } else { '.' };

                board.push(occupant);
                board.push(' ');
            }
            board.push('\n');
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let squares = self.iter().map(|sq| sq.to_notation()).collect::<Vec<_>>();
        write!(f, "Bitboard[{}]", squares.join(", "))
    }
}

/// An iterator over all set bits in a [`Bitboard`].
///
/// See [`Bitboard::iter`].
pub struct BitboardIter {
    bitboard: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.bitboard.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bitboard.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {
    #[inline(always)]
    fn len(&self) -> usize {
        self.bitboard.population() as usize
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bitboard: self }
    }
}

impl IntoIterator for &Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bitboard: *self }
    }
}
