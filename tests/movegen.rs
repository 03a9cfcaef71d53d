/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use janggi::{Bitboard, Game, Piece, PieceKind, Side, Square};

/// Asserts that the piece on `square` in `game` can move to exactly `expected` (plus passing).
fn test_destinations(game: &Game, square: &str, expected: &[&str]) {
    let from: Square = square.parse().unwrap();
    let mut expected: Bitboard = expected.iter().map(|s| s.parse::<Square>().unwrap()).collect();
    expected.set(from);

    let destinations = game.legal_destinations_from(from);
    assert_eq!(
        destinations, expected,
        "Destinations of {square} differ on\n{game}\nExpected: {expected:?}\nGot: {destinations:?}"
    );
}

fn piece(side: Side, kind: PieceKind, index: u8) -> Piece {
    Piece::new(side, kind, index).unwrap()
}

#[cfg(test)]
mod startpos_destinations {
    use super::*;

    #[test]
    fn test_generals() {
        let game = Game::new();
        test_destinations(&game, "E2", &["D2", "D3", "E1", "E3", "F2", "F3"]);
        test_destinations(&game, "E9", &["D8", "D9", "E8", "E10", "F8", "F9"]);
    }

    #[test]
    fn test_guards() {
        let game = Game::new();
        test_destinations(&game, "D1", &["D2", "E1"]);
        test_destinations(&game, "F10", &["F9", "E10"]);
    }

    #[test]
    fn test_horses() {
        let game = Game::new();
        test_destinations(&game, "C1", &["D3"]);
        test_destinations(&game, "H10", &["G8", "I8"]);
    }

    #[test]
    fn test_elephants() {
        let game = Game::new();
        test_destinations(&game, "B1", &["D4"]);
        test_destinations(&game, "B10", &["D7"]);
        // Blocked by its own Cannon on one side and its own Soldier on the other
        test_destinations(&game, "G10", &[]);
    }

    #[test]
    fn test_chariots() {
        let game = Game::new();
        test_destinations(&game, "A1", &["A2", "A3"]);
        test_destinations(&game, "I10", &["I9", "I8"]);
    }

    #[test]
    fn test_cannons_have_no_screen() {
        let game = Game::new();
        test_destinations(&game, "B3", &[]);
        test_destinations(&game, "H8", &[]);
    }

    #[test]
    fn test_soldiers() {
        let game = Game::new();
        test_destinations(&game, "A4", &["A5", "B4"]);
        test_destinations(&game, "E4", &["D4", "E5", "F4"]);
        test_destinations(&game, "I7", &["H7", "I6"]);
    }

    #[test]
    fn test_empty_square_has_no_destinations() {
        let game = Game::new();
        assert!(game.legal_destinations_from(Square::E5).is_empty());
    }

    #[test]
    fn test_every_destination_set_contains_its_origin() {
        let game = Game::new();
        for side in Side::all() {
            for &piece in game.roster(side) {
                let from = game.square_of(piece).unwrap();
                let destinations = game.legal_destinations_from(from);
                assert!(destinations.contains(from), "{piece} on {from}");
                assert!(
                    !destinations.intersects(game.occupied_by(side) ^ from),
                    "{piece} on {from} can move onto a friendly piece"
                );
            }
        }
    }
}

#[cfg(test)]
mod scenario_destinations {
    use super::*;

    #[test]
    fn test_blocked_horse_branch() {
        let mut game = Game::empty();
        game.place(piece(Side::Red, PieceKind::Horse, 0), Square::E5).unwrap();
        test_destinations(&game, "E5", &["D7", "F7", "D3", "F3", "G6", "G4", "C6", "C4"]);

        game.place(piece(Side::Blue, PieceKind::Soldier, 0), Square::E6).unwrap();
        test_destinations(&game, "E5", &["D3", "F3", "G6", "G4", "C6", "C4"]);
    }

    #[test]
    fn test_cannon_jumps_a_screen_of_either_side() {
        let mut game = Game::empty();
        game.place(piece(Side::Red, PieceKind::Cannon, 0), Square::E5).unwrap();
        test_destinations(&game, "E5", &[]);

        game.place(piece(Side::Red, PieceKind::Soldier, 0), Square::E6).unwrap();
        test_destinations(&game, "E5", &["E7", "E8", "E9", "E10"]);

        game.place(piece(Side::Blue, PieceKind::Horse, 0), Square::C5).unwrap();
        test_destinations(&game, "E5", &["E7", "E8", "E9", "E10", "B5", "A5"]);
    }

    #[test]
    fn test_chariot_crosses_palace_through_empty_centre() {
        let mut game = Game::empty();
        game.place(piece(Side::Blue, PieceKind::Chariot, 0), Square::F3).unwrap();
        game.place(piece(Side::Red, PieceKind::Guard, 0), Square::D1).unwrap();
        let destinations = game.legal_destinations_from(Square::F3);
        assert!(destinations.contains(Square::E2));
        assert!(destinations.contains(Square::D1));

        game.place(piece(Side::Red, PieceKind::General, 0), Square::E2).unwrap();
        let destinations = game.legal_destinations_from(Square::F3);
        assert!(destinations.contains(Square::E2));
        assert!(!destinations.contains(Square::D1));
    }

    #[test]
    fn test_cannon_crosses_palace_over_centre_screen() {
        let mut game = Game::empty();
        game.place(piece(Side::Red, PieceKind::Cannon, 0), Square::D10).unwrap();
        game.place(piece(Side::Blue, PieceKind::General, 0), Square::E9).unwrap();
        game.place(piece(Side::Blue, PieceKind::Guard, 0), Square::F8).unwrap();
        assert!(game.legal_destinations_from(Square::D10).contains(Square::F8));

        // A Cannon in the far corner can be neither captured nor jumped to
        game.remove(Square::F8);
        game.place(piece(Side::Blue, PieceKind::Cannon, 0), Square::F8).unwrap();
        assert!(!game.legal_destinations_from(Square::D10).contains(Square::F8));

        // Nor can a Cannon in the centre serve as the screen
        game.remove(Square::F8);
        game.place(piece(Side::Blue, PieceKind::Guard, 0), Square::F8).unwrap();
        game.remove(Square::E9);
        game.place(piece(Side::Blue, PieceKind::Cannon, 1), Square::E9).unwrap();
        assert!(!game.legal_destinations_from(Square::D10).contains(Square::F8));
        test_destinations(&game, "D10", &[]);
    }

    #[test]
    fn test_general_cannot_leave_palace() {
        let mut game = Game::empty();
        game.place(Piece::general(Side::Blue), Square::D8).unwrap();
        test_destinations(&game, "D8", &["D9", "E8", "E9"]);
    }

    #[test]
    fn test_soldier_on_last_rank_moves_sideways_only() {
        let mut game = Game::empty();
        game.place(piece(Side::Red, PieceKind::Soldier, 0), Square::A10).unwrap();
        test_destinations(&game, "A10", &["B10"]);
    }
}
