/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Deref, Index},
};

use anyhow::{bail, Result};

use super::{Bitboard, File, Move, Piece, Rank, Side, Square, Undo};

/// Represents every live piece of a game, where it stands, and which pieces each side has left.
///
/// A [`Position`] knows nothing about whose turn it is or whether the game is over; see [`crate::Game`] for that.
///
/// Three views are kept in sync by every mutation:
/// - the [`Board`], mapping squares to pieces,
/// - a roster per [`Side`], listing its live pieces with the General first,
/// - a side table mapping each [`Piece`] to the square it stands on.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    /// Mailbox representation of the game board.
    pub(crate) board: Board,

    /// Live pieces of each side, in the order they were placed.
    rosters: [Vec<Piece>; Side::COUNT],

    /// Square of each piece, indexed by [`Piece::slot`]. `None` if the piece is not on the board.
    squares: [Option<Square>; Piece::COUNT],
}

impl Position {
    /// Creates a new, empty [`Position`] with no pieces on the board.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Position, Side};
    /// let position = Position::new();
    /// assert!(position.roster(Side::Red).is_empty());
    /// assert!(position.occupied().is_empty());
    /// ```
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            rosters: [Vec::with_capacity(Piece::PER_SIDE), Vec::with_capacity(Piece::PER_SIDE)],
            squares: [None; Piece::COUNT],
        }
    }

    /// Creates the [`Position`] every game starts from: all 32 pieces on their starting squares.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Piece, Position, Side, Square};
    /// let position = Position::startpos();
    /// assert_eq!(position.roster(Side::Blue).len(), 16);
    /// assert_eq!(position.square_of(Piece::general(Side::Red)), Some(Square::E2));
    /// ```
    pub fn startpos() -> Self {
        let mut position = Self::new();
        for side in Side::all() {
            for piece in Piece::all(side) {
                position.put(piece, piece.starting_square());
            }
        }
        position
    }

    /// Fetches the underlying [`Board`] of this [`Position`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The live pieces of `side`. If `side` still has its General, it is listed first.
    #[inline(always)]
    pub fn roster(&self, side: Side) -> &[Piece] {
        &self.rosters[side]
    }

    /// The square `piece` stands on, or `None` if it is not on the board.
    #[inline(always)]
    pub fn square_of(&self, piece: Piece) -> Option<Square> {
        self.squares[piece]
    }

    /// The square of `side`'s General, if it is on the board.
    #[inline(always)]
    pub fn general_square(&self, side: Side) -> Option<Square> {
        self.square_of(Piece::general(side))
    }

    /// Number of `side`'s pieces that are no longer on the board.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Position, Side};
    /// assert_eq!(Position::startpos().captured(Side::Red), 0);
    /// assert_eq!(Position::new().captured(Side::Red), 16);
    /// ```
    #[inline(always)]
    pub fn captured(&self, side: Side) -> usize {
        Piece::PER_SIDE - self.rosters[side].len()
    }

    /// Places `piece` on `square`, adding it to its side's roster.
    ///
    /// Fails if `square` is occupied or `piece` is already on the board.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Piece, Position, Side, Square};
    /// let mut position = Position::new();
    /// let general = Piece::general(Side::Red);
    /// assert!(position.place(general, Square::E2).is_ok());
    /// assert!(position.place(general, Square::E1).is_err());
    /// assert!(position.place(Piece::general(Side::Blue), Square::E2).is_err());
    /// ```
    pub fn place(&mut self, piece: Piece, square: Square) -> Result<()> {
        if let Some(occupant) = self.board.piece_at(square) {
            bail!("Cannot place {piece} on {square}: it is occupied by {occupant}");
        }
        if let Some(current) = self.square_of(piece) {
            bail!("Cannot place {piece} on {square}: it is already on {current}");
        }

        self.put(piece, square);
        Ok(())
    }

    /// Removes and returns the piece on `square`, if there is one.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Piece, Position, Side, Square};
    /// let mut position = Position::startpos();
    /// assert_eq!(position.remove(Square::E2), Some(Piece::general(Side::Red)));
    /// assert_eq!(position.remove(Square::E2), None);
    /// assert_eq!(position.captured(Side::Red), 1);
    /// ```
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let piece = self.board.take(square)?;
        self.squares[piece] = None;
        let roster = &mut self.rosters[piece.side()];
        if let Some(index) = roster.iter().position(|&p| p == piece) {
            roster.remove(index);
        }
        Some(piece)
    }

    /// Adds `piece` to the board and its roster. The caller guarantees `square` is empty and `piece` is not on the board.
    fn put(&mut self, piece: Piece, square: Square) {
        self.board.place(piece, square);
        self.squares[piece] = Some(square);
        let roster = &mut self.rosters[piece.side()];
        if piece.is_general() {
            roster.insert(0, piece);
        } else {
            roster.push(piece);
        }
    }

    /// Moves the piece on `mv.from()` to `mv.to()`, capturing whatever enemy piece stands there.
    ///
    /// Returns `None` (and changes nothing) if there is no piece on `mv.from()`.
    /// Movement rules are not checked; pass the returned [`Undo`] to [`Position::undo`] to restore the position exactly.
    ///
    /// A pass (`from == to`) changes nothing and captures nothing.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Move, Position, Square};
    /// let mut position = Position::startpos();
    /// let before = position.clone();
    ///
    /// let undo = position.apply(Move::new(Square::A4, Square::A5)).unwrap();
    /// assert!(position.has(Square::A5));
    ///
    /// position.undo(undo);
    /// assert!(position == before);
    /// ```
    pub fn apply(&mut self, mv: Move) -> Option<Undo> {
        let (from, to) = (mv.from(), mv.to());
        let piece = self.board.piece_at(from)?;
        if from == to {
            return Some(Undo::new(mv, piece, None));
        }

        let captured = match self.board.take(to) {
            Some(victim) => {
                self.squares[victim] = None;
                let roster = &mut self.rosters[victim.side()];
                let index = roster.iter().position(|&p| p == victim);
                if let Some(index) = index {
                    roster.remove(index);
                }
                Some((victim, index.unwrap_or(roster.len())))
            }
            None => None,
        };

        self.board.take(from);
        self.board.place(piece, to);
        self.squares[piece] = Some(to);

        Some(Undo::new(mv, piece, captured))
    }

    /// Reverts a move made by [`Position::apply`], restoring board, rosters and side table.
    ///
    /// Tokens must be undone in the reverse order they were created.
    pub fn undo(&mut self, undo: Undo) {
        let (from, to) = (undo.mv().from(), undo.mv().to());
        if from == to {
            return;
        }

        let piece = undo.piece();
        self.board.take(to);
        self.board.place(piece, from);
        self.squares[piece] = Some(from);

        if let Some((victim, index)) = undo.captured_with_index() {
            self.board.place(victim, to);
            self.squares[victim] = Some(to);
            let roster = &mut self.rosters[victim.side()];
            roster.insert(index.min(roster.len()), victim);
        }
    }

    /// Returns `true` if any enemy piece can move onto the square of `side`'s General.
    ///
    /// A side with no General on the board is never in check.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Position, Side};
    /// let position = Position::startpos();
    /// assert!(!position.is_in_check(Side::Red));
    /// assert!(!position.is_in_check(Side::Blue));
    /// assert!(!Position::new().is_in_check(Side::Red));
    /// ```
    pub fn is_in_check(&self, side: Side) -> bool {
        let Some(general) = self.general_square(side) else {
            return false;
        };

        self.rosters[side.opponent()].iter().any(|&piece| {
            self.square_of(piece)
                .is_some_and(|from| piece.legal_destinations(&self.board, from).contains(general))
        })
    }

    /// Returns `true` if `mv`, made by the piece standing on its origin, would leave that piece's General out of check.
    ///
    /// The position is left unchanged.
    pub fn is_safe(&mut self, mv: Move) -> bool {
        let Some(piece) = self.board.piece_at(mv.from()) else {
            return false;
        };
        let Some(undo) = self.apply(mv) else {
            return false;
        };

        let safe = !self.is_in_check(piece.side());
        self.undo(undo);
        safe
    }

    /// Returns `true` if `side` is in check and no move of any of its pieces gets it out of check.
    ///
    /// Every trial move is undone before returning, so the position is left unchanged.
    pub fn is_checkmate(&mut self, side: Side) -> bool {
        if !self.is_in_check(side) {
            return false;
        }

        let roster = self.rosters[side].clone();
        for piece in roster {
            let Some(from) = self.square_of(piece) else {
                continue;
            };

            for to in piece.legal_destinations(&self.board, from) ^ from {
                if self.is_safe(Move::new(from, to)) {
                    return false;
                }
            }
        }

        true
    }

    /// Every move `side` could make, except passing, that does not leave its own General in check.
    ///
    /// Moves are listed in roster order, then by destination square.
    pub fn legal_moves(&mut self, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        let roster = self.rosters[side].clone();
        for piece in roster {
            let Some(from) = self.square_of(piece) else {
                continue;
            };

            for to in piece.legal_destinations(&self.board, from) ^ from {
                let mv = Move::new(from, to);
                if self.is_safe(mv) {
                    moves.push(mv);
                }
            }
        }

        moves
    }
}

impl Deref for Position {
    type Target = Board;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.board
    }
}

impl Default for Position {
    /// The starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        for side in Side::all() {
            writeln!(f, "{side}: {:?}", self.roster(side))?;
        }
        Ok(())
    }
}

/// Represents all pieces and their locations on a Janggi board.
///
/// Has no knowledge of rosters or turns. If you need those, see [`Position`].
///
/// Internally uses a mailbox for piece lookups and a [`Bitboard`] per side for occupancy.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// All squares occupied by a specific side.
    sides: [Bitboard; Side::COUNT],

    /// The piece on each square, if any.
    mailbox: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use janggi::Board;
    /// let board = Board::new();
    /// assert!(board.occupied().is_empty());
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            sides: [Bitboard::EMPTY_BOARD; Side::COUNT],
            mailbox: [None; Square::COUNT],
        }
    }

    /// Returns `true` if there is a piece at the given [`Square`].
    ///
    /// # Example
    /// ```
    /// # use janggi::{Board, Square};
    /// let board = Board::default();
    /// assert_eq!(board.has(Square::E2), true);
    /// assert_eq!(board.has(Square::E1), false);
    /// ```
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.mailbox[square.index()].is_some()
    }

    /// Places the provided [`Piece`] on the supplied [`Square`].
    ///
    /// If another piece occupies this square, this does *not* remove that piece.
    /// Use [`Board::take`] first.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Board, Piece, Side, Square};
    /// let mut board = Board::new();
    /// board.place(Piece::general(Side::Red), Square::E2);
    /// assert_eq!(board.piece_at(Square::E2), Some(Piece::general(Side::Red)));
    /// ```
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.sides[piece.side()].set(square);
        self.mailbox[square] = Some(piece);
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Board, Piece, Side, Square};
    /// let mut board = Board::default();
    /// assert_eq!(board.take(Square::E9), Some(Piece::general(Side::Blue)));
    /// assert_eq!(board.take(Square::E9), None);
    /// ```
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.mailbox[square].take()?;
        self.sides[piece.side()].clear(square);
        Some(piece)
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Board, PieceKind, Side, Square};
    /// let board = Board::default();
    /// let chariot = board.piece_at(Square::A1).unwrap();
    /// assert_eq!(chariot.side(), Side::Red);
    /// assert_eq!(chariot.kind(), PieceKind::Chariot);
    /// assert_eq!(board.piece_at(Square::E5), None);
    /// ```
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// All squares occupied by `side`.
    #[inline(always)]
    pub const fn occupied_by(&self, side: Side) -> Bitboard {
        self.sides[side.index()]
    }

    /// All occupied squares.
    #[inline(always)]
    pub const fn occupied(&self) -> Bitboard {
        self.sides[0].or(self.sides[1])
    }

    /// An iterator over every occupied square and the piece on it, from `A1` to `I10`.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| Some((square, self.piece_at(square)?)))
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.mailbox[index]
    }
}

impl Default for Board {
    /// A board with all pieces on their starting squares.
    fn default() -> Self {
        let mut board = Self::new();
        for side in Side::all() {
            for piece in Piece::all(side) {
                board.place(piece, piece.starting_square());
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{:>2}|", rank.to_string())?;

            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, " {}", piece.char())?,
                    None => write!(f, " .")?,
                }
            }

            writeln!(f)?;
        }

        write!(f, "  +")?;
        for _ in File::iter() {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for file in File::iter() {
            write!(f, " {file}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    fn assert_consistent(position: &Position) {
        for side in Side::all() {
            let roster = position.roster(side);
            assert_eq!(roster.len() + position.captured(side), Piece::PER_SIDE);
            for &piece in roster {
                let square = position.square_of(piece).unwrap();
                assert_eq!(position.piece_at(square), Some(piece));
            }
            if position.general_square(side).is_some() {
                assert!(roster[0].is_general());
            }
        }
        for (square, piece) in position.iter() {
            assert_eq!(position.square_of(piece), Some(square));
        }
    }

    #[test]
    fn test_startpos() {
        let position = Position::startpos();
        assert_consistent(&position);
        assert_eq!(position.occupied().population(), 32);
        assert_eq!(position.occupied_by(Side::Red).population(), 16);
        assert_eq!(position.general_square(Side::Blue), Some(Square::E9));
        assert_eq!(position.board(), &Board::default());
    }

    #[test]
    fn test_board_display() {
        let board = Board::default();
        let expected = "\
10| r e h a . a e h r
 9| . . . . g . . . .
 8| . c . . . . . c .
 7| s . s . s . s . s
 6| . . . . . . . . .
 5| . . . . . . . . .
 4| S . S . S . S . S
 3| . C . . . . . C .
 2| . . . . G . . . .
 1| R E H A . A E H R
  +------------------
    A B C D E F G H I";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_capture_and_undo_restores_roster_order() {
        let mut position = Position::startpos();
        let before = position.clone();

        // Red's left Chariot takes Blue's left Chariot straight up the A file after clearing the Soldiers
        let red_soldier = position.remove(Square::A4).unwrap();
        let blue_soldier = position.remove(Square::A7).unwrap();
        let cleared = position.clone();

        let victim = position.piece_at(Square::A10).unwrap();
        let undo = position.apply(Move::new(Square::A1, Square::A10)).unwrap();
        assert_eq!(undo.captured(), Some(victim));
        assert_eq!(position.square_of(victim), None);
        assert!(!position.roster(Side::Blue).contains(&victim));
        assert_consistent(&position);

        position.undo(undo);
        assert!(position == cleared);
        assert_consistent(&position);

        position.place(red_soldier, Square::A4).unwrap();
        position.place(blue_soldier, Square::A7).unwrap();
        assert_eq!(position.board(), before.board());
        assert_consistent(&position);
    }

    #[test]
    fn test_pass_changes_nothing() {
        let mut position = Position::startpos();
        let before = position.clone();
        let undo = position.apply(Move::new(Square::E2, Square::E2)).unwrap();
        assert_eq!(undo.captured(), None);
        assert!(position == before);
        position.undo(undo);
        assert!(position == before);
    }

    #[test]
    fn test_apply_from_empty_square() {
        let mut position = Position::startpos();
        assert!(position.apply(Move::new(Square::E5, Square::E6)).is_none());
    }

    #[test]
    fn test_general_is_first_in_roster() {
        let mut position = Position::new();
        let soldier = Piece::new(Side::Red, PieceKind::Soldier, 0).unwrap();
        position.place(soldier, Square::E4).unwrap();
        position.place(Piece::general(Side::Red), Square::E2).unwrap();
        assert_eq!(position.roster(Side::Red), &[Piece::general(Side::Red), soldier]);
        assert_consistent(&position);
    }

    #[test]
    fn test_check_detection() {
        let mut position = Position::new();
        position.place(Piece::general(Side::Red), Square::E2).unwrap();
        position.place(Piece::general(Side::Blue), Square::D9).unwrap();
        let chariot = Piece::new(Side::Blue, PieceKind::Chariot, 0).unwrap();
        position.place(chariot, Square::E7).unwrap();
        assert!(position.is_in_check(Side::Red));
        assert!(!position.is_in_check(Side::Blue));

        position.remove(Square::E7);
        assert!(!position.is_in_check(Side::Red));
    }

    #[test]
    fn test_start_has_no_checkmate() {
        let mut position = Position::startpos();
        let before = position.clone();
        assert!(!position.is_checkmate(Side::Red));
        assert!(!position.is_checkmate(Side::Blue));
        assert!(position == before);
    }
}
