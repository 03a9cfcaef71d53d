/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Result};

use super::{legal_destinations, Bitboard, Board, Square};

/// Represents one of the two players of a Janggi game.
///
/// Blue always makes the first move, and therefore [`Side`] defaults to [`Side::Blue`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Side {
    Red,
    #[default]
    Blue,
}

impl Side {
    /// Number of side variants.
    pub const COUNT: usize = 2;

    /// An array of both sides, starting with Red.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Red, Self::Blue]
    }

    /// Returns this [`Side`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use janggi::Side;
    /// assert_eq!(Side::Red.opponent(), Side::Blue);
    /// assert_eq!(Side::Blue.opponent(), Side::Red);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    /// Returns this [`Side`] as a `usize`.
    ///
    /// Will be `0` for Red, `1` for Blue.
    ///
    /// Useful for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The rank direction this [`Side`]'s Soldiers advance in.
    ///
    /// Red starts on ranks 1-4 and advances upwards. Blue starts on ranks 7-10 and advances downwards.
    ///
    /// # Example
    /// ```
    /// # use janggi::Side;
    /// assert_eq!(Side::Red.forward(), 1);
    /// assert_eq!(Side::Blue.forward(), -1);
    /// ```
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::Red => 1,
            Self::Blue => -1,
        }
    }

    /// Parses a [`Side`] from its name, case-insensitive.
    ///
    /// # Example
    /// ```
    /// # use janggi::Side;
    /// assert_eq!(Side::from_name("red").unwrap(), Side::Red);
    /// assert_eq!(Side::from_name("BLUE").unwrap(), Side::Blue);
    /// assert!(Side::from_name("green").is_err());
    /// ```
    pub fn from_name(side: &str) -> Result<Self> {
        if side.eq_ignore_ascii_case("red") {
            Ok(Self::Red)
        } else if side.eq_ignore_ascii_case("blue") {
            Ok(Self::Blue)
        } else {
            bail!("Side must be either \"red\" or \"blue\" (case-insensitive). Found {side:?}")
        }
    }

    /// The upper-case name of this [`Side`], as used when reporting game results.
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Blue => "BLUE",
        }
    }
}

/// Represents the kind (or "role") that a Janggi piece can be.
///
/// Variants are ordered the same way each side's roster lists them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    General,
    Guard,
    Horse,
    Elephant,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 7;

    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [General, Guard, Horse, Elephant, Chariot, Cannon, Soldier]
    }

    /// How many pieces of this kind each side starts with.
    ///
    /// # Example
    /// ```
    /// # use janggi::PieceKind;
    /// assert_eq!(PieceKind::General.count(), 1);
    /// assert_eq!(PieceKind::Chariot.count(), 2);
    /// assert_eq!(PieceKind::Soldier.count(), 5);
    /// ```
    #[inline(always)]
    pub const fn count(&self) -> u8 {
        match self {
            Self::General => 1,
            Self::Soldier => 5,
            _ => 2,
        }
    }

    /// Position of the first piece of this kind within a side's slots.
    #[inline(always)]
    const fn slot_offset(&self) -> usize {
        match self {
            Self::General => 0,
            Self::Guard => 1,
            Self::Horse => 3,
            Self::Elephant => 5,
            Self::Chariot => 7,
            Self::Cannon => 9,
            Self::Soldier => 11,
        }
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Parses a [`PieceKind`] from its single-character symbol, case-insensitive.
    #[inline(always)]
    pub fn from_char(kind: char) -> Result<Self> {
        match kind.to_ascii_lowercase() {
            'g' => Ok(Self::General),
            'a' => Ok(Self::Guard),
            'h' => Ok(Self::Horse),
            'e' => Ok(Self::Elephant),
            'r' => Ok(Self::Chariot),
            'c' => Ok(Self::Cannon),
            's' => Ok(Self::Soldier),
            _ => bail!("Invalid char for PieceKind: Got {kind}."),
        }
    }

    /// The lower-case symbol of this [`PieceKind`].
    ///
    /// Guards use `a` (for "advisor") so that they do not collide with the General.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::General => 'g',
            Self::Guard => 'a',
            Self::Horse => 'h',
            Self::Elephant => 'e',
            Self::Chariot => 'r',
            Self::Cannon => 'c',
            Self::Soldier => 's',
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Guard => "guard",
            Self::Horse => "horse",
            Self::Elephant => "elephant",
            Self::Chariot => "chariot",
            Self::Cannon => "cannon",
            Self::Soldier => "soldier",
        }
    }
}

impl<T> Index<PieceKind> for [T; PieceKind::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: PieceKind) -> &Self::Output {
        &self[index.index()]
    }
}

impl FromStr for PieceKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceKind::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown piece kind {s:?}"))
    }
}

/// Squares each piece starts on, indexed by [`Side`] and then by [`Piece::slot`] within that side.
const STARTING_SQUARES: [[Square; Piece::PER_SIDE]; Side::COUNT] = [
    // Red
    [
        Square::E2,
        Square::D1,
        Square::F1,
        Square::C1,
        Square::H1,
        Square::B1,
        Square::G1,
        Square::A1,
        Square::I1,
        Square::B3,
        Square::H3,
        Square::A4,
        Square::C4,
        Square::E4,
        Square::G4,
        Square::I4,
    ],
    // Blue
    [
        Square::E9,
        Square::D10,
        Square::F10,
        Square::C10,
        Square::H10,
        Square::B10,
        Square::G10,
        Square::A10,
        Square::I10,
        Square::B8,
        Square::H8,
        Square::A7,
        Square::C7,
        Square::E7,
        Square::G7,
        Square::I7,
    ],
];

/// Represents one individual piece of the game, such as Red's second Chariot.
///
/// Pieces keep their identity for the whole game: the [`Side`], the [`PieceKind`], and
/// an index that distinguishes pieces of the same kind (`0` for the first Horse, `1` for the second, etc.).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    side: Side,
    kind: PieceKind,
    index: u8,
}

impl Piece {
    /// Number of pieces each side starts with.
    pub const PER_SIDE: usize = 16;

    /// Number of pieces in a full game.
    pub const COUNT: usize = Self::PER_SIDE * Side::COUNT;

    /// Creates a new [`Piece`], checking that `index` is within the number of pieces of that kind.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Piece, PieceKind, Side};
    /// assert!(Piece::new(Side::Red, PieceKind::Soldier, 4).is_ok());
    /// assert!(Piece::new(Side::Red, PieceKind::Soldier, 5).is_err());
    /// assert!(Piece::new(Side::Blue, PieceKind::General, 1).is_err());
    /// ```
    pub fn new(side: Side, kind: PieceKind, index: u8) -> Result<Self> {
        if index >= kind.count() {
            bail!(
                "Invalid index for {side} {}: must be less than {}. Got {index}.",
                kind.name(),
                kind.count()
            );
        }

        Ok(Self::new_unchecked(side, kind, index))
    }

    /// Creates a new [`Piece`] without validating `index`.
    #[inline(always)]
    pub const fn new_unchecked(side: Side, kind: PieceKind, index: u8) -> Self {
        debug_assert!(index < kind.count());
        Self { side, kind, index }
    }

    /// Shorthand for the only General of `side`.
    #[inline(always)]
    pub const fn general(side: Side) -> Self {
        Self::new_unchecked(side, PieceKind::General, 0)
    }

    /// All sixteen pieces of `side`, in roster order: General, Guards, Horses, Elephants, Chariots, Cannons, Soldiers.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Piece, PieceKind, Side};
    /// let pieces: Vec<_> = Piece::all(Side::Blue).collect();
    /// assert_eq!(pieces.len(), 16);
    /// assert_eq!(pieces[0], Piece::general(Side::Blue));
    /// assert_eq!(pieces[15].kind(), PieceKind::Soldier);
    /// ```
    pub fn all(side: Side) -> impl Iterator<Item = Self> {
        PieceKind::all().into_iter().flat_map(move |kind| {
            (0..kind.count()).map(move |index| Self::new_unchecked(side, kind, index))
        })
    }

    #[inline(always)]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn index(&self) -> u8 {
        self.index
    }

    #[inline(always)]
    pub const fn is_general(&self) -> bool {
        matches!(self.kind, PieceKind::General)
    }

    #[inline(always)]
    pub const fn is_cannon(&self) -> bool {
        matches!(self.kind, PieceKind::Cannon)
    }

    /// A unique number in `0..32` for this piece, used to index per-piece tables.
    ///
    /// Red's pieces occupy `0..16` and Blue's `16..32`, each in roster order.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Piece, PieceKind, Side};
    /// assert_eq!(Piece::general(Side::Red).slot(), 0);
    /// assert_eq!(Piece::new(Side::Red, PieceKind::Chariot, 1).unwrap().slot(), 8);
    /// assert_eq!(Piece::new(Side::Blue, PieceKind::Soldier, 4).unwrap().slot(), 31);
    /// ```
    #[inline(always)]
    pub const fn slot(&self) -> usize {
        self.side.index() * Self::PER_SIDE + self.kind.slot_offset() + self.index as usize
    }

    /// The square this piece occupies at the start of a game.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Piece, PieceKind, Side, Square};
    /// assert_eq!(Piece::general(Side::Red).starting_square(), Square::E2);
    /// assert_eq!(Piece::general(Side::Blue).starting_square(), Square::E9);
    /// assert_eq!(Piece::new(Side::Blue, PieceKind::Cannon, 1).unwrap().starting_square(), Square::H8);
    /// ```
    #[inline(always)]
    pub const fn starting_square(&self) -> Square {
        STARTING_SQUARES[self.side.index()][self.kind.slot_offset() + self.index as usize]
    }

    /// Squares this piece may move to from `from` on `board`, including `from` itself (a pass).
    ///
    /// This applies movement rules only; it does not consider whether the move would expose the mover's General.
    #[inline(always)]
    pub fn legal_destinations(&self, board: &Board, from: Square) -> Bitboard {
        legal_destinations(*self, board, from)
    }

    /// The symbol of this piece: upper-case for Red, lower-case for Blue.
    ///
    /// # Example
    /// ```
    /// # use janggi::{Piece, PieceKind, Side};
    /// assert_eq!(Piece::general(Side::Red).char(), 'G');
    /// assert_eq!(Piece::general(Side::Blue).char(), 'g');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self.side {
            Side::Red => self.kind.char().to_ascii_uppercase(),
            Side::Blue => self.kind.char(),
        }
    }

    /// Human-readable name, such as `"RED chariot 2"`.
    pub fn name(&self) -> String {
        if self.kind.count() == 1 {
            format!("{} {}", self.side, self.kind.name())
        } else {
            format!("{} {} {}", self.side, self.kind.name(), self.index + 1)
        }
    }
}

impl<T> Index<Side> for [T; Side::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Side) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Side> for [T; Side::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl<T> Index<Piece> for [T; Piece::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Piece) -> &Self::Output {
        &self[index.slot()]
    }
}

impl<T> IndexMut<Piece> for [T; Piece::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Piece) -> &mut Self::Output {
        &mut self[index.slot()]
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_unique() {
        let mut seen = [false; Piece::COUNT];
        for side in Side::all() {
            for piece in Piece::all(side) {
                assert!(!seen[piece], "{piece:?} shares a slot");
                seen[piece] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_starting_squares_are_unique() {
        let mut seen = [false; Square::COUNT];
        for side in Side::all() {
            for piece in Piece::all(side) {
                let square = piece.starting_square();
                assert!(!seen[square], "{piece:?} starts on an occupied square {square}");
                seen[square] = true;
            }
        }
    }

    #[test]
    fn test_starting_squares_are_mirrored() {
        for (red, blue) in Piece::all(Side::Red).zip(Piece::all(Side::Blue)) {
            let (red_row, red_col) = red.starting_square().coords();
            let (blue_row, blue_col) = blue.starting_square().coords();
            assert_eq!(red_col, blue_col, "{red:?} / {blue:?}");
            assert_eq!(red_row + blue_row, 9, "{red:?} / {blue:?}");
        }
    }

    #[test]
    fn test_kind_counts() {
        let total: u8 = PieceKind::all().iter().map(PieceKind::count).sum();
        assert_eq!(total as usize, Piece::PER_SIDE);
        assert_eq!(Piece::all(Side::Red).count(), Piece::PER_SIDE);
    }

    #[test]
    fn test_parsing() {
        for kind in PieceKind::all() {
            assert_eq!(PieceKind::from_char(kind.char()).unwrap(), kind);
            assert_eq!(kind.name().parse::<PieceKind>().unwrap(), kind);
        }
        assert!(PieceKind::from_char('k').is_err());
        assert_eq!("Red".parse::<Side>().unwrap(), Side::Red);
        assert!("white".parse::<Side>().is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(Piece::general(Side::Red).to_string(), "RED general");
        let horse = Piece::new(Side::Blue, PieceKind::Horse, 1).unwrap();
        assert_eq!(horse.to_string(), "BLUE horse 2");
        assert_eq!(Side::default(), Side::Blue);
    }
}
