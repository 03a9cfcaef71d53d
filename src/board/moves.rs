/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, Context, Result};

use super::{NotationError, Piece, Square};

/// Represents a move made on a Janggi board: a piece leaves one [`Square`] for another.
///
/// A move whose origin and destination are the same square is a *pass*: the turn changes hands but nothing on the board does.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new [`Move`] from `from` to `to`.
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Creates a pass for the piece standing on `square`.
    #[inline(always)]
    pub const fn pass(square: Square) -> Self {
        Self::new(square, square)
    }

    /// Creates a [`Move`] from the notation of its two squares.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Move, Square};
    /// let mv = Move::from_notation("c7", "C6").unwrap();
    /// assert_eq!(mv, Move::new(Square::C7, Square::C6));
    /// assert!(Move::from_notation("C7", "C11").is_err());
    /// ```
    pub fn from_notation(from: &str, to: &str) -> Result<Self, NotationError> {
        Ok(Self::new(from.parse()?, to.parse()?))
    }

    /// The square this move starts from.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The square this move ends on.
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Returns `true` if this move leaves the piece where it is.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Move, Square};
    /// assert!(Move::pass(Square::E2).is_pass());
    /// assert!(!Move::new(Square::E2, Square::E3).is_pass());
    /// ```
    #[inline(always)]
    pub const fn is_pass(&self) -> bool {
        self.from.index() == self.to.index()
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;

    /// Parses a [`Move`] written as two squares, optionally separated by `-`, such as `"A7-A6"` or `"e2e3"`.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Move, Square};
    /// assert_eq!("A7-A6".parse::<Move>().unwrap(), Move::new(Square::A7, Square::A6));
    /// assert_eq!("e9e10".parse::<Move>().unwrap(), Move::new(Square::E9, Square::E10));
    /// assert!("A7".parse::<Move>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (from, to) = match s.split_once('-') {
            Some(squares) => squares,
            None => {
                // The destination starts at the second file letter
                let split = s
                    .char_indices()
                    .skip(1)
                    .find(|(_, c)| c.is_ascii_alphabetic())
                    .map(|(i, _)| i)
                    .ok_or_else(|| anyhow!("Move must contain two squares. Got {s:?}"))?;
                s.split_at(split)
            }
        };

        Self::from_notation(from.trim(), to.trim()).with_context(|| format!("Invalid move {s:?}"))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Everything needed to take back a move made with [`crate::Position::apply`].
///
/// Tokens record the moved piece, the move itself, and any captured piece with the roster slot it was taken from.
#[must_use = "an applied move can only be taken back with its Undo token"]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Undo {
    mv: Move,
    piece: Piece,
    captured: Option<(Piece, usize)>,
}

impl Undo {
    #[inline(always)]
    pub(crate) const fn new(mv: Move, piece: Piece, captured: Option<(Piece, usize)>) -> Self {
        Self {
            mv,
            piece,
            captured,
        }
    }

    /// The move this token takes back.
    #[inline(always)]
    pub const fn mv(&self) -> Move {
        self.mv
    }

    /// The piece that moved.
    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The piece that was captured, if any.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        match self.captured {
            Some((piece, _)) => Some(piece),
            None => None,
        }
    }

    /// The captured piece along with its index in its side's roster.
    #[inline(always)]
    pub(crate) const fn captured_with_index(&self) -> Option<(Piece, usize)> {
        self.captured
    }
}
