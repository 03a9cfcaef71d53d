/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Game, Move, Position, Side};

/// Perform a perft at the specified depth, collecting only data about the number of possible positions (nodes).
///
/// Passes are not counted as moves, and the tree is not cut short when a side is checkmated.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
///
/// # Example
/// ```
/// # use janggi::{perft, Game};
/// let game = Game::new();
/// assert_eq!(perft(&game, 1), 31);
/// assert_eq!(perft(&game, 2), 961);
/// ```
#[inline(always)]
pub fn perft(game: &Game, depth: usize) -> u64 {
    perft_generic::<true, false>(game, depth)
}

/// Perform a splitperft at the specified depth, returning the number of nodes reachable after each move available at the root.
///
/// Results are in the same order as [`Game::legal_moves`].
pub fn splitperft(game: &Game, depth: usize) -> Vec<(Move, u64)> {
    let side = game.turn();
    let mut position = game.position().clone();

    if depth == 0 {
        return Vec::new();
    }

    position
        .legal_moves(side)
        .into_iter()
        .filter_map(|mv| {
            let undo = position.apply(mv)?;
            let nodes = perft_position::<true>(&mut position, side.opponent(), depth - 1);
            position.undo(undo);
            Some((mv, nodes))
        })
        .collect()
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting and splitperft.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
/// If `SPLIT` is set to `true`, this will also print the node count of each root move.
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(game: &Game, depth: usize) -> u64 {
    if !SPLIT {
        let mut position = game.position().clone();
        return perft_position::<BULK>(&mut position, game.turn(), depth);
    }

    splitperft(game, depth)
        .into_iter()
        .fold(0, |nodes, (mv, new_nodes)| {
            println!("{mv}\t{new_nodes}");
            nodes + new_nodes
        })
}

/// Counts the leaves of the move tree below `position` with `side` to move, making and taking back each move in place.
fn perft_position<const BULK: bool>(position: &mut Position, side: Side, depth: usize) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves(side);

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && depth == 1 {
        return moves.len() as u64;
    }

    moves.into_iter().fold(0, |nodes, mv| {
        let Some(undo) = position.apply(mv) else {
            return nodes;
        };
        let new_nodes = perft_position::<BULK>(position, side.opponent(), depth - 1);
        position.undo(undo);
        nodes + new_nodes
    })
}
