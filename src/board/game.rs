/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref};

use anyhow::Result;
use log::{debug, info, trace};
use thiserror::Error;

use super::{Bitboard, Move, NotationError, Piece, Position, Side, Square};

/// Whether a game is still being played, and if not, who won it.
///
/// Once a side has won, the status never changes again.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    #[default]
    Unfinished,
    RedWon,
    BlueWon,
}

impl GameStatus {
    /// The status of a game that `side` has won.
    ///
    /// # Example
    /// ```
    /// # use janggi::{GameStatus, Side};
    /// assert_eq!(GameStatus::won_by(Side::Red), GameStatus::RedWon);
    /// assert_eq!(GameStatus::won_by(Side::Blue), GameStatus::BlueWon);
    /// ```
    #[inline(always)]
    pub const fn won_by(side: Side) -> Self {
        match side {
            Side::Red => Self::RedWon,
            Side::Blue => Self::BlueWon,
        }
    }

    /// The winner of the game, if it is over.
    #[inline(always)]
    pub const fn winner(&self) -> Option<Side> {
        match self {
            Self::Unfinished => None,
            Self::RedWon => Some(Side::Red),
            Self::BlueWon => Some(Side::Blue),
        }
    }

    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        !matches!(self, Self::Unfinished)
    }

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unfinished => "UNFINISHED",
            Self::RedWon => "RED_WON",
            Self::BlueWon => "BLUE_WON",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reasons why a move was rejected.
///
/// A rejected move never changes the game.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is over ({0})")]
    GameOver(GameStatus),

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("there is no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {square} belongs to {owner}, but it is {turn}'s turn")]
    WrongTurn {
        square: Square,
        owner: Side,
        turn: Side,
    },

    #[error("{piece} cannot move from {from} to {to}")]
    Unreachable {
        piece: Piece,
        from: Square,
        to: Square,
    },

    #[error("{0} cannot pass while in check")]
    PassWhileInCheck(Side),

    /// The move is allowed by the piece's movement rules, but would leave (or put) the mover's General in check.
    #[error("{0} would leave the mover's general in check")]
    LeavesGeneralInCheck(Move),
}

/// Details about a move that was accepted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    /// The move that was made.
    pub mv: Move,

    /// The side that made the move.
    pub side: Side,

    /// The enemy piece removed from the board, if any.
    pub captured: Option<Piece>,

    /// Whether the opponent's General is attacked after this move.
    pub gives_check: bool,

    /// Whether this move checkmated the opponent, ending the game.
    pub checkmate: bool,
}

impl MoveOutcome {
    /// Returns `true` if this move was a pass.
    #[inline(always)]
    pub const fn is_pass(&self) -> bool {
        self.mv.is_pass()
    }
}

/// A game of Janggi.
///
/// This type encapsulates a [`Position`] and adds the side to move and the game's status.
/// It is the primary type for playing a game: every move is validated against the movement rules and the check rules before it is made.
///
/// The basic methods you're probably looking for are [`Game::new`], [`Game::make_move`], and [`Game::game_state`].
///
/// # Example
/// ```
/// # use janggi::{Game, GameStatus, Side};
/// let mut game = Game::new();
/// assert_eq!(game.turn(), Side::Blue);
///
/// assert!(game.make_move("C7", "C6"));
/// assert_eq!(game.turn(), Side::Red);
///
/// // Red cannot move Blue's pieces
/// assert!(!game.make_move("C6", "C5"));
/// assert_eq!(game.game_state(), GameStatus::Unfinished);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    /// Pieces and their locations.
    position: Position,

    /// The side to move next.
    turn: Side,

    status: GameStatus,
}

impl Game {
    /// Creates a new [`Game`] from the starting position, with Blue to move.
    #[inline(always)]
    pub fn new() -> Self {
        Self::from_position(Position::startpos(), Side::default())
    }

    /// Creates a new [`Game`] with no pieces on the board and Blue to move.
    ///
    /// Pieces can be added with [`Game::place`], which is useful for setting up specific situations.
    #[inline(always)]
    pub fn empty() -> Self {
        Self::from_position(Position::new(), Side::default())
    }

    /// Creates an unfinished [`Game`] from the provided [`Position`] and side to move.
    #[inline(always)]
    pub fn from_position(position: Position, turn: Side) -> Self {
        Self {
            position,
            turn,
            status: GameStatus::Unfinished,
        }
    }

    /// The current [`Position`] of the game.
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// The side to move next.
    #[inline(always)]
    pub const fn turn(&self) -> Side {
        self.turn
    }

    /// Sets the side to move next.
    #[inline(always)]
    pub fn set_turn(&mut self, side: Side) {
        self.turn = side;
    }

    /// Whether the game is still being played, and if not, who won.
    #[inline(always)]
    pub const fn game_state(&self) -> GameStatus {
        self.status
    }

    /// Places `piece` on `square`. See [`Position::place`].
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) -> Result<()> {
        self.position.place(piece, square)
    }

    /// Removes the piece on `square`, if any. See [`Position::remove`].
    #[inline(always)]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.position.remove(square)
    }

    /// Returns `true` if `side` is in check and has no move that escapes it.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Game, Side};
    /// let game = Game::new();
    /// assert!(!game.is_checkmate(Side::Red));
    /// ```
    pub fn is_checkmate(&self, side: Side) -> bool {
        self.position.clone().is_checkmate(side)
    }

    /// Every move `side` could make, except passing, that does not leave its own General in check.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Game, Side};
    /// let game = Game::new();
    /// assert_eq!(game.legal_moves(Side::Blue).len(), 31);
    /// ```
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        self.position.clone().legal_moves(side)
    }

    /// Squares the piece on `square` may move to according to its movement rules, including `square` itself.
    ///
    /// Returns an empty set if `square` is empty.
    /// Moves that would leave the mover's General in check are still included.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Game, Square};
    /// let game = Game::new();
    /// // Six moves around the palace, plus staying put
    /// assert_eq!(game.legal_destinations_from(Square::E2).population(), 7);
    /// assert!(game.legal_destinations_from(Square::E5).is_empty());
    /// ```
    pub fn legal_destinations_from(&self, square: Square) -> Bitboard {
        match self.board().piece_at(square) {
            Some(piece) => piece.legal_destinations(self.board(), square),
            None => Bitboard::EMPTY_BOARD,
        }
    }

    /// Attempts to move the piece on `from` to `to`, both given in square notation such as `"E7"`.
    ///
    /// Returns `true` if the move was accepted. On rejection the game is left unchanged.
    /// Moving a piece onto its own square passes the turn.
    pub fn make_move(&mut self, from: &str, to: &str) -> bool {
        self.try_make_move(from, to).is_ok()
    }

    /// Same as [`Game::make_move`], but reports why a move was rejected.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Game, MoveError, Square};
    /// let mut game = Game::new();
    /// assert!(matches!(game.try_make_move("E9", "Z1"), Err(MoveError::Notation(_))));
    /// assert_eq!(game.try_make_move("E5", "E4"), Err(MoveError::EmptySquare(Square::E5)));
    ///
    /// let outcome = game.try_make_move("E7", "E6").unwrap();
    /// assert!(outcome.captured.is_none());
    /// ```
    pub fn try_make_move(&mut self, from: &str, to: &str) -> Result<MoveOutcome, MoveError> {
        let mv = self
            .ensure_unfinished()
            .and_then(|()| Ok(Move::from_notation(from, to)?))
            .inspect_err(|err| trace!("Rejected {from:?} -> {to:?}: {err}"))?;

        self.play(mv)
    }

    /// Attempts to make `mv` for the side to move.
    ///
    /// The move must start on one of the mover's pieces, follow that piece's movement rules,
    /// and not leave the mover's General in check. A pass is not allowed while in check.
    ///
    /// After a piece moves, the opponent is checked for checkmate; if they are mated, the mover wins.
    /// The turn passes to the opponent after every accepted move.
    pub fn play(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        self.try_play(mv)
            .inspect_err(|err| trace!("Rejected {mv} for {}: {err}", self.turn))
    }

    fn try_play(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        self.ensure_unfinished()?;

        let (from, to) = (mv.from(), mv.to());
        let side = self.turn;
        let piece = self
            .board()
            .piece_at(from)
            .ok_or(MoveError::EmptySquare(from))?;

        if piece.side() != side {
            return Err(MoveError::WrongTurn {
                square: from,
                owner: piece.side(),
                turn: side,
            });
        }

        if !piece.legal_destinations(self.board(), from).contains(to) {
            return Err(MoveError::Unreachable { piece, from, to });
        }

        let captured = if mv.is_pass() {
            if self.position.is_in_check(side) {
                return Err(MoveError::PassWhileInCheck(side));
            }
            None
        } else {
            let undo = self
                .position
                .apply(mv)
                .ok_or(MoveError::EmptySquare(from))?;

            if self.position.is_in_check(side) {
                self.position.undo(undo);
                return Err(MoveError::LeavesGeneralInCheck(mv));
            }

            undo.captured()
        };

        let opponent = side.opponent();
        let gives_check = self.position.is_in_check(opponent);
        let checkmate = !mv.is_pass() && gives_check && self.position.is_checkmate(opponent);

        match captured {
            Some(victim) => debug!("{side} played {mv}, capturing {victim}"),
            None if mv.is_pass() => debug!("{side} passed"),
            None => debug!("{side} played {mv}"),
        }

        if checkmate {
            self.status = GameStatus::won_by(side);
            info!("{side} checkmated {opponent} with {mv}");
        }

        self.turn = opponent;

        Ok(MoveOutcome {
            mv,
            side,
            captured,
            gives_check,
            checkmate,
        })
    }

    #[inline(always)]
    fn ensure_unfinished(&self) -> Result<(), MoveError> {
        if self.status.is_over() {
            Err(MoveError::GameOver(self.status))
        } else {
            Ok(())
        }
    }
}

impl Deref for Game {
    type Target = Position;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.position
    }
}

impl Default for Game {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.position)?;
        write!(f, "Status: {}  Turn: {}", self.status, self.turn)?;
        for side in Side::all() {
            if self.position.is_in_check(side) {
                write!(f, "  ({side} in check)")?;
            }
        }
        Ok(())
    }
}
