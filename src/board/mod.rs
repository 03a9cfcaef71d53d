/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Sets of squares stored as bits.
mod bitboard;

/// Turn order, game status and move validation.
mod game;

/// Movement rules of every kind of piece.
mod movegen;

/// Moves and the tokens that take them back.
mod moves;

/// Move-tree node counting, used to verify move generation.
mod perft;

/// Sides, piece kinds and individual pieces.
mod piece;

/// Board contents, rosters and check detection.
mod position;

/// Squares, files, ranks and their notation.
mod square;

pub use bitboard::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;
