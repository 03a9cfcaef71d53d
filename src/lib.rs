/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A rules engine for Janggi (Korean chess).
//!
//! The main entry point is [`Game`], which validates moves, tracks whose turn it is,
//! and detects check and checkmate.
//!
//! ```
//! # use janggi::{Game, GameStatus, Side};
//! let mut game = Game::new();
//! assert!(game.make_move("C7", "C6"));
//! assert_eq!(game.turn(), Side::Red);
//! assert!(!game.is_in_check(Side::Red));
//! assert_eq!(game.game_state(), GameStatus::Unfinished);
//! ```

/// Board representation, movement rules and game arbitration.
mod board;

/// Command-line interface of the `janggi` binary.
mod cli;

pub use board::*;
pub use cli::*;
