/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Bitboard, Board, Piece, PieceKind, Side, Square};

/// One-square steps along ranks and files, as `(file, rank)` deltas.
const ORTHOGONAL_DELTAS: [(i8, i8); 4] = [
    (0, 1),  // Up
    (0, -1), // Down
    (1, 0),  // Right
    (-1, 0), // Left
];

/// Squares one orthogonal step away from each square.
const ORTHOGONAL_STEPS: [Bitboard; Square::COUNT] = generate_leaper_mobility(&ORTHOGONAL_DELTAS);

/// Palace diagonals connecting each corner of a palace to its centre, and the centre to every corner.
const PALACE_DIAGONAL_STEPS: [Bitboard; Square::COUNT] = {
    let mut steps = [Bitboard::EMPTY_BOARD; Square::COUNT];

    let mut i = 0;
    while i < PALACE_CORNERS.len() {
        let (center, corners) = PALACE_CORNERS[i];
        let mut j = 0;
        while j < corners.len() {
            let corner = corners[j];
            steps[center.index()] = steps[center.index()].or(corner.bitboard());
            steps[corner.index()] = center.bitboard();
            j += 1;
        }
        i += 1;
    }

    steps
};

/// The centre of each palace, with the four corners joined to it by diagonals.
const PALACE_CORNERS: [(Square, [Square; 4]); Side::COUNT] = [
    (
        Square::E2,
        [Square::D1, Square::F1, Square::D3, Square::F3],
    ),
    (
        Square::E9,
        [Square::D8, Square::F8, Square::D10, Square::F10],
    ),
];

/// Generates a table of all squares reachable from each square by a single step of each delta.
const fn generate_leaper_mobility(deltas: &[(i8, i8)]) -> [Bitboard; Square::COUNT] {
    let mut mobility = [Bitboard::EMPTY_BOARD; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let mut j = 0;
        while j < deltas.len() {
            let (df, dr) = deltas[j];
            if let Some(to) = square.offset(df, dr) {
                mobility[i] = mobility[i].or(to.bitboard());
            }
            j += 1;
        }
        i += 1;
    }

    mobility
}

/// Returns the palace centre and the opposite corner of `corner`, if `corner` is a palace corner.
///
/// # Example
/// ```
/// # use janggi::{opposite_corner, Square};
/// assert_eq!(opposite_corner(Square::D1), Some((Square::E2, Square::F3)));
/// assert_eq!(opposite_corner(Square::F8), Some((Square::E9, Square::D10)));
/// assert_eq!(opposite_corner(Square::E2), None);
/// ```
#[inline(always)]
pub const fn opposite_corner(corner: Square) -> Option<(Square, Square)> {
    let mut i = 0;
    while i < PALACE_CORNERS.len() {
        let (center, _) = PALACE_CORNERS[i];
        let (row, col) = corner.coords();
        let (center_row, center_col) = center.coords();
        let (dr, dc) = (row as i8 - center_row as i8, col as i8 - center_col as i8);
        if (dr == 1 || dr == -1) && (dc == 1 || dc == -1) {
            return match center.offset(-dc, -dr) {
                Some(opposite) => Some((center, opposite)),
                None => None,
            };
        }
        i += 1;
    }
    None
}

/// Squares one orthogonal step away from `square`.
#[inline(always)]
pub const fn orthogonal_steps(square: Square) -> Bitboard {
    ORTHOGONAL_STEPS[square.index()]
}

/// Squares joined to `square` by a single palace diagonal step.
///
/// Empty unless `square` is the centre or a corner of a palace.
///
/// # Example
/// ```
/// # use janggi::{palace_diagonal_steps, Square};
/// assert_eq!(palace_diagonal_steps(Square::E2).population(), 4);
/// assert_eq!(palace_diagonal_steps(Square::F10), Square::E9.bitboard());
/// assert!(palace_diagonal_steps(Square::E1).is_empty());
/// ```
#[inline(always)]
pub const fn palace_diagonal_steps(square: Square) -> Bitboard {
    PALACE_DIAGONAL_STEPS[square.index()]
}

/// Diagonal palace steps a Soldier of `side` may take from `square`.
///
/// Soldiers only ever move diagonally towards the enemy's back rank.
#[inline(always)]
pub const fn soldier_palace_steps(square: Square, side: Side) -> Bitboard {
    match (side, square) {
        (Side::Blue, Square::D3 | Square::F3) => Square::E2.bitboard(),
        (Side::Blue, Square::E2) => Square::D1.bitboard().or(Square::F1.bitboard()),
        (Side::Red, Square::D8 | Square::F8) => Square::E9.bitboard(),
        (Side::Red, Square::E9) => Square::D10.bitboard().or(Square::F10.bitboard()),
        _ => Bitboard::EMPTY_BOARD,
    }
}

/// All squares `piece` may move to from `from` on `board`.
///
/// The result always contains `from` itself, which represents passing the turn,
/// and never contains a square occupied by a friendly piece.
/// Whether the move exposes the mover's own General is not considered here.
pub fn legal_destinations(piece: Piece, board: &Board, from: Square) -> Bitboard {
    let side = piece.side();
    let destinations = match piece.kind() {
        PieceKind::General | PieceKind::Guard => palace_destinations(board, from, side),
        PieceKind::Horse => horse_destinations(board, from, side),
        PieceKind::Elephant => elephant_destinations(board, from, side),
        PieceKind::Chariot => chariot_destinations(board, from, side),
        PieceKind::Cannon => cannon_destinations(board, from, side),
        PieceKind::Soldier => soldier_destinations(board, from, side),
    };

    destinations | from
}

/// Destinations of a General or Guard: one step orthogonally, or diagonally along a palace line, never leaving its own palace.
pub fn palace_destinations(board: &Board, from: Square, side: Side) -> Bitboard {
    let steps = orthogonal_steps(from) | palace_diagonal_steps(from);
    steps & Bitboard::palace(side) & !board.occupied_by(side)
}

/// Destinations of a Horse: one orthogonal step onto an empty square, then one diagonal step outward.
pub fn horse_destinations(board: &Board, from: Square, side: Side) -> Bitboard {
    let mut destinations = Bitboard::EMPTY_BOARD;

    for (df, dr) in ORTHOGONAL_DELTAS {
        let Some(step) = from.offset(df, dr) else {
            continue;
        };
        if board.has(step) {
            continue;
        }

        for (ddf, ddr) in outward_diagonals(df, dr) {
            if let Some(to) = step.offset(ddf, ddr) {
                destinations.set(to);
            }
        }
    }

    destinations & !board.occupied_by(side)
}

/// Destinations of an Elephant: one orthogonal step, then two diagonal steps outward, with every intermediate square empty.
pub fn elephant_destinations(board: &Board, from: Square, side: Side) -> Bitboard {
    let mut destinations = Bitboard::EMPTY_BOARD;

    for (df, dr) in ORTHOGONAL_DELTAS {
        let Some(step) = from.offset(df, dr) else {
            continue;
        };
        if board.has(step) {
            continue;
        }

        for (ddf, ddr) in outward_diagonals(df, dr) {
            let Some(diagonal) = step.offset(ddf, ddr) else {
                continue;
            };
            if board.has(diagonal) {
                continue;
            }
            if let Some(to) = diagonal.offset(ddf, ddr) {
                destinations.set(to);
            }
        }
    }

    destinations & !board.occupied_by(side)
}

/// Destinations of a Chariot: any distance orthogonally until blocked, plus the palace diagonals.
pub fn chariot_destinations(board: &Board, from: Square, side: Side) -> Bitboard {
    let mut destinations = Bitboard::EMPTY_BOARD;

    for (df, dr) in ORTHOGONAL_DELTAS {
        let mut square = from;
        while let Some(next) = square.offset(df, dr) {
            destinations.set(next);
            if board.has(next) {
                break;
            }
            square = next;
        }
    }

    destinations |= palace_diagonal_steps(from);

    // A corner reaches the opposite corner if the centre between them is empty
    if let Some((center, opposite)) = opposite_corner(from) {
        if !board.has(center) {
            destinations.set(opposite);
        }
    }

    destinations & !board.occupied_by(side)
}

/// Destinations of a Cannon: orthogonally or along a palace diagonal, jumping over exactly one screen.
///
/// Neither the screen nor the captured piece may be a Cannon.
pub fn cannon_destinations(board: &Board, from: Square, side: Side) -> Bitboard {
    let mut destinations = Bitboard::EMPTY_BOARD;

    for (df, dr) in ORTHOGONAL_DELTAS {
        let mut square = from;
        let mut jumped = false;
        while let Some(next) = square.offset(df, dr) {
            square = next;
            match board.piece_at(next) {
                Some(piece) if piece.is_cannon() => break,
                Some(_) if jumped => {
                    destinations.set(next);
                    break;
                }
                Some(_) => jumped = true,
                None if jumped => destinations.set(next),
                None => {}
            }
        }
    }

    if let Some((center, opposite)) = opposite_corner(from) {
        let screened = board.piece_at(center).is_some_and(|screen| !screen.is_cannon());
        let target_is_cannon = board.piece_at(opposite).is_some_and(|p| p.is_cannon());
        if screened && !target_is_cannon {
            destinations.set(opposite);
        }
    }

    destinations & !board.occupied_by(side)
}

/// Destinations of a Soldier: one step forward or sideways, plus forward palace diagonals inside the enemy palace.
pub fn soldier_destinations(board: &Board, from: Square, side: Side) -> Bitboard {
    let mut destinations = soldier_palace_steps(from, side);

    for (df, dr) in [(0, side.forward()), (1, 0), (-1, 0)] {
        if let Some(to) = from.offset(df, dr) {
            destinations.set(to);
        }
    }

    destinations & !board.occupied_by(side)
}

/// The two diagonal directions that continue outward from an orthogonal step.
#[inline(always)]
const fn outward_diagonals(df: i8, dr: i8) -> [(i8, i8); 2] {
    if df == 0 {
        [(-1, dr), (1, dr)]
    } else {
        [(df, -1), (df, 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(pieces: &[(Side, PieceKind, Square)]) -> Board {
        let mut board = Board::new();
        let mut counts = [[0u8; PieceKind::COUNT]; Side::COUNT];
        for &(side, kind, square) in pieces {
            let index = counts[side][kind];
            counts[side.index()][kind.index()] += 1;
            let piece = Piece::new(side, kind, index).unwrap();
            board.place(piece, square);
        }
        board
    }

    fn squares(squares: &[Square]) -> Bitboard {
        squares.iter().copied().collect()
    }

    fn piece_at(board: &Board, square: Square) -> Piece {
        board.piece_at(square).unwrap()
    }

    #[test]
    fn test_palace_diagonals() {
        assert_eq!(
            palace_diagonal_steps(Square::E9),
            squares(&[Square::D8, Square::F8, Square::D10, Square::F10])
        );
        assert_eq!(palace_diagonal_steps(Square::D3), Square::E2.bitboard());
        assert!(palace_diagonal_steps(Square::E1).is_empty());
        assert!(palace_diagonal_steps(Square::E5).is_empty());
        assert_eq!(opposite_corner(Square::F3), Some((Square::E2, Square::D1)));
        assert_eq!(opposite_corner(Square::D10), Some((Square::E9, Square::F8)));
        assert_eq!(opposite_corner(Square::E1), None);
        assert_eq!(opposite_corner(Square::C3), None);
    }

    #[test]
    fn test_general_in_palace_centre() {
        let board = board_with(&[(Side::Red, PieceKind::General, Square::E2)]);
        let general = piece_at(&board, Square::E2);
        let destinations = general.legal_destinations(&board, Square::E2);
        // Eight neighbours plus the pass
        assert_eq!(destinations.population(), 9);
        assert_eq!(destinations, Bitboard::RED_PALACE);
    }

    #[test]
    fn test_guard_on_palace_edge() {
        let board = board_with(&[
            (Side::Blue, PieceKind::Guard, Square::E10),
            (Side::Blue, PieceKind::Guard, Square::D10),
        ]);
        let guard = piece_at(&board, Square::E10);
        // No diagonals from an edge midpoint, and D10 is friendly
        assert_eq!(
            guard.legal_destinations(&board, Square::E10),
            squares(&[Square::E10, Square::E9, Square::F10])
        );
    }

    #[test]
    fn test_horse_blocking() {
        let board = board_with(&[
            (Side::Red, PieceKind::Horse, Square::E5),
            (Side::Red, PieceKind::Soldier, Square::E6),
            (Side::Blue, PieceKind::Soldier, Square::F4),
        ]);
        let horse = piece_at(&board, Square::E5);
        assert_eq!(
            horse.legal_destinations(&board, Square::E5),
            squares(&[
                Square::E5,
                // Down, through E4
                Square::D3,
                Square::F3,
                // Right, through F5
                Square::G6,
                Square::G4,
                // Left, through D5
                Square::C6,
                Square::C4,
            ])
        );
    }

    #[test]
    fn test_elephant_blocking() {
        let board = board_with(&[
            (Side::Blue, PieceKind::Elephant, Square::E5),
            (Side::Red, PieceKind::Soldier, Square::D7),
            (Side::Blue, PieceKind::Soldier, Square::F3),
        ]);
        let elephant = piece_at(&board, Square::E5);
        assert_eq!(
            elephant.legal_destinations(&board, Square::E5),
            squares(&[
                Square::E5,
                // Up, through E6 then F7
                Square::G8,
                // Down, through E4 then D3, with F3 blocked
                Square::C2,
                // Right, through F5 then G6 / G4
                Square::H7,
                Square::H3,
                // Left, through D5 then C6 / C4
                Square::B7,
                Square::B3,
            ])
        );
    }

    #[test]
    fn test_chariot_lines() {
        let board = board_with(&[
            (Side::Red, PieceKind::Chariot, Square::A1),
            (Side::Red, PieceKind::Soldier, Square::A4),
            (Side::Blue, PieceKind::Horse, Square::D1),
        ]);
        let chariot = piece_at(&board, Square::A1);
        assert_eq!(
            chariot.legal_destinations(&board, Square::A1),
            squares(&[Square::A1, Square::A2, Square::A3, Square::B1, Square::C1, Square::D1])
        );
    }

    #[test]
    fn test_chariot_palace_diagonals() {
        let board = board_with(&[(Side::Red, PieceKind::Chariot, Square::D8)]);
        let chariot = piece_at(&board, Square::D8);
        let destinations = chariot.legal_destinations(&board, Square::D8);
        assert!(destinations.contains(Square::E9));
        assert!(destinations.contains(Square::F10));

        let board = board_with(&[
            (Side::Red, PieceKind::Chariot, Square::D8),
            (Side::Blue, PieceKind::General, Square::E9),
        ]);
        let destinations = chariot.legal_destinations(&board, Square::D8);
        assert!(destinations.contains(Square::E9));
        assert!(!destinations.contains(Square::F10));
    }

    #[test]
    fn test_cannon_requires_screen() {
        let board = board_with(&[
            (Side::Red, PieceKind::Cannon, Square::B3),
            (Side::Blue, PieceKind::Soldier, Square::B7),
        ]);
        let cannon = piece_at(&board, Square::B3);
        // The first piece up the file is a screen, so only squares beyond it count
        let destinations = cannon.legal_destinations(&board, Square::B3);
        assert_eq!(
            destinations,
            squares(&[Square::B3, Square::B8, Square::B9, Square::B10])
        );
    }

    #[test]
    fn test_cannon_captures_past_screen() {
        let board = board_with(&[
            (Side::Red, PieceKind::Cannon, Square::B3),
            (Side::Red, PieceKind::Soldier, Square::B4),
            (Side::Blue, PieceKind::Chariot, Square::B7),
            (Side::Blue, PieceKind::Soldier, Square::D3),
        ]);
        let cannon = piece_at(&board, Square::B3);
        assert_eq!(
            cannon.legal_destinations(&board, Square::B3),
            squares(&[
                Square::B3,
                Square::B5,
                Square::B6,
                Square::B7,
                Square::E3,
                Square::F3,
                Square::G3,
                Square::H3,
                Square::I3
            ])
        );
    }

    #[test]
    fn test_cannon_never_jumps_or_takes_cannons() {
        let board = board_with(&[
            (Side::Red, PieceKind::Cannon, Square::B3),
            (Side::Red, PieceKind::Cannon, Square::B4),
            (Side::Blue, PieceKind::Soldier, Square::D3),
            (Side::Blue, PieceKind::Cannon, Square::F3),
        ]);
        let cannon = piece_at(&board, Square::B3);
        assert_eq!(
            cannon.legal_destinations(&board, Square::B3),
            squares(&[Square::B3, Square::E3])
        );
    }

    #[test]
    fn test_cannon_palace_diagonal() {
        let board = board_with(&[
            (Side::Blue, PieceKind::Cannon, Square::D1),
            (Side::Red, PieceKind::Guard, Square::E2),
        ]);
        let cannon = piece_at(&board, Square::D1);
        assert!(cannon.legal_destinations(&board, Square::D1).contains(Square::F3));

        let board = board_with(&[(Side::Blue, PieceKind::Cannon, Square::D1)]);
        assert!(!cannon.legal_destinations(&board, Square::D1).contains(Square::F3));
    }

    #[test]
    fn test_soldier_steps() {
        let board = board_with(&[
            (Side::Red, PieceKind::Soldier, Square::E4),
            (Side::Blue, PieceKind::Soldier, Square::E7),
        ]);
        let red = piece_at(&board, Square::E4);
        assert_eq!(
            red.legal_destinations(&board, Square::E4),
            squares(&[Square::E4, Square::E5, Square::D4, Square::F4])
        );
        let blue = piece_at(&board, Square::E7);
        assert_eq!(
            blue.legal_destinations(&board, Square::E7),
            squares(&[Square::E7, Square::E6, Square::D7, Square::F7])
        );
    }

    #[test]
    fn test_soldier_palace_diagonals_are_forward_only() {
        let board = board_with(&[(Side::Blue, PieceKind::Soldier, Square::E2)]);
        let soldier = piece_at(&board, Square::E2);
        assert_eq!(
            soldier.legal_destinations(&board, Square::E2),
            squares(&[Square::E2, Square::E1, Square::D2, Square::F2, Square::D1, Square::F1])
        );

        let board = board_with(&[(Side::Red, PieceKind::Soldier, Square::D8)]);
        let soldier = piece_at(&board, Square::D8);
        assert!(soldier.legal_destinations(&board, Square::D8).contains(Square::E9));

        // Red soldiers never step back towards their own palace
        let board = board_with(&[(Side::Red, PieceKind::Soldier, Square::E2)]);
        let soldier = piece_at(&board, Square::E2);
        assert_eq!(
            soldier.legal_destinations(&board, Square::E2),
            squares(&[Square::E2, Square::E3, Square::D2, Square::F2])
        );
    }
}
