/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use janggi::{perft, splitperft, Cli, Command, Game, Move, Square};
use log::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match cli.command {
        Command::Replay { moves } => replay(&moves),
        Command::Moves { square, after } => moves(square, &after),
        Command::Perft { depth, split } => run_perft(depth, split),
    }
}

/// Plays `moves` from the starting position, printing whether each was accepted.
fn replay(moves: &[Move]) -> Result<()> {
    let mut game = Game::new();

    for (i, &mv) in moves.iter().enumerate() {
        let side = game.turn();
        match game.play(mv) {
            Ok(outcome) => {
                let mut notes = Vec::new();
                if let Some(captured) = outcome.captured {
                    notes.push(format!("captures {captured}"));
                }
                if outcome.checkmate {
                    notes.push(String::from("checkmate"));
                } else if outcome.gives_check {
                    notes.push(String::from("check"));
                }

                if notes.is_empty() {
                    println!("{:>3}. {side} {mv}", i + 1);
                } else {
                    println!("{:>3}. {side} {mv} ({})", i + 1, notes.join(", "));
                }
            }
            Err(err) => println!("{:>3}. {side} {mv} rejected: {err}", i + 1),
        }
    }

    println!("\n{game}");
    if let Some(winner) = game.game_state().winner() {
        println!("{winner} wins by checkmate");
    }
    Ok(())
}

/// Prints the destinations of the piece on `square` after playing `after` from the starting position.
fn moves(square: Square, after: &[Move]) -> Result<()> {
    let mut game = Game::new();
    for &mv in after {
        game.play(mv).with_context(|| format!("Failed to play {mv}"))?;
    }

    let Some(piece) = game.board().piece_at(square) else {
        bail!("There is no piece on {square}");
    };

    let destinations = game.legal_destinations_from(square);
    let legal = game.legal_moves(piece.side());

    println!("{}\n", game.board());
    println!("{piece} on {square}:");
    for to in destinations {
        let mv = Move::new(square, to);
        let note = if mv.is_pass() {
            " (pass)"
        } else if !legal.contains(&mv) {
            " (leaves general in check)"
        } else {
            ""
        };
        println!("  {to}{note}");
    }

    Ok(())
}

/// Runs a perft from the starting position and prints the node count.
fn run_perft(depth: usize, split: bool) -> Result<()> {
    let game = Game::new();
    info!("Running perft({depth}) with {} to move", game.turn());

    let now = Instant::now();
    let nodes = if split {
        let results = splitperft(&game, depth);
        for (mv, nodes) in &results {
            println!("{mv}\t{nodes}");
        }
        println!();
        results.iter().map(|(_, nodes)| nodes).sum::<u64>()
    } else {
        perft(&game, depth)
    };
    let elapsed = now.elapsed();

    let nps = nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    println!("{nodes} nodes in {elapsed:.1?} ({nps:.0} nodes/sec)");

    Ok(())
}
