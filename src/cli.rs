/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use crate::{Move, Square};

/// Play through, inspect, and verify games of Janggi.
#[derive(Debug, Clone, Parser)]
#[command(version, about, rename_all = "lower")]
pub struct Cli {
    /// Log more details to stderr: `-v` for info, `-vv` for debug, `-vvv` for trace.
    ///
    /// Ignored if `RUST_LOG` is set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The log level selected by the number of `-v` flags.
    ///
    /// # Example
    /// ```
    /// # use clap::Parser;
    /// # use janggi::Cli;
    /// # use log::LevelFilter;
    /// let cli = Cli::parse_from(["janggi", "-vv", "perft", "1"]);
    /// assert_eq!(cli.log_level(), LevelFilter::Debug);
    /// ```
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// A command to run against a new game.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Play the provided moves in order from the starting position, reporting the result of each.
    ///
    /// Moves are written as two squares, such as `C7-C6` or `c7c6`. Rejected moves are reported and skipped.
    #[command(alias = "r")]
    Replay {
        /// Moves to play, starting with Blue.
        moves: Vec<Move>,
    },

    /// Shows where the piece on a square may move.
    #[command(alias = "m")]
    Moves {
        square: Square,

        /// Moves to play from the starting position first.
        #[arg(short, long, num_args = 1..)]
        after: Vec<Move>,
    },

    /// Performs a perft from the starting position at the supplied depth, printing total node count.
    #[command(alias = "p")]
    Perft {
        depth: usize,

        /// If set, the node count after each move at the root is printed as well.
        #[arg(short, long, default_value = "false")]
        split: bool,
    },
}
