//! The `chess` crate implements the rules of chess on top of bitboards.
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! The crate is layered from the bottom up:
//!
//!  -  [`bitboard`](bitboard/index.html): 64-bit square sets, directional shifts and fills, and
//!     the magic-bitboard attack tables.
//!  -  [`Move`](struct.Move.html): a move packed into 32 bits.
//!  -  [`Board`](struct.Board.html): piece placement, kept both as bitboards and as a mailbox.
//!  -  [`MoveGenerator`](struct.MoveGenerator.html): attack analysis and legal move emission.
//!  -  [`Position`](struct.Position.html): turn, castling rights, en passant, clocks and the undo
//!     history; the FEN boundary.
//!  -  [`variations`](variations/index.html): perft counting.
//!
//! ```rust
//! use chess::Position;
//!
//! let mut pos = Position::new();
//! let mv = pos.parse_move("e2e4").expect("legal move");
//! pos.make_move(mv);
//! assert_eq!(pos.to_fen_str(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
//! pos.unmake_move();
//! assert_eq!(pos, Position::new());
//! ```
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]

use std::ops;
use std::fmt;
use std::mem;
use std::str::FromStr;
use std::convert::TryFrom;

pub mod error;
pub use error::{Error, Result};
use error::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// Both colors, white first
    pub const ALL: [Color; Color::COUNT] = [Color::White, Color::Black];

    /// The direction in which this color's pawns advance
    pub fn forward(self) -> Direction {
        match self {
            Color::White => Direction::North,
            Color::Black => Direction::South,
        }
    }

    /// The direction opposite to [`forward`](#method.forward)
    pub fn backward(self) -> Direction {
        self.forward().opposite()
    }

    /// The two directions in which this color's pawns capture, queen-side first
    pub fn pawn_attack_directions(self) -> [Direction; 2] {
        match self {
            Color::White => [Direction::NorthWest, Direction::NorthEast],
            Color::Black => [Direction::SouthWest, Direction::SouthEast],
        }
    }

    /// The rank on which this color's pawns promote
    pub fn promotion_rank(self) -> Rank {
        match self {
            Color::White => Rank::R8,
            Color::Black => Rank::R1,
        }
    }

    /// The rank from which this color's pawns may advance two squares
    pub fn pawn_start_rank(self) -> Rank {
        match self {
            Color::White => Rank::R2,
            Color::Black => Rank::R7,
        }
    }

    /// The rank on which this color's king and rooks start
    pub fn back_rank(self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => 'w'.fmt(f),
            Color::Black => 'b'.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(ParseColorError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

impl TryFrom<usize> for Color {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> std::result::Result<Self, Self::Error> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Color>(value as u8)) }
        } else {
            Err(TryFromIntError)
        }
    }
}

impl From<Color> for usize {
    fn from(value: Color) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece
///
/// An empty square is represented as `Option<Piece>::None` throughout the crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// The number of piece types
    pub const COUNT: usize = Piece::King as usize + 1;

    /// All piece types in index order
    pub const ALL: [Piece; Piece::COUNT] =
        [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King];

    /// Pieces a pawn may promote to, in the order promotions are generated
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Knight, Piece::Rook, Piece::Bishop];

    /// Returns the FEN letter for this piece in the given color
    pub fn to_char(self, c: Color) -> char {
        let ch = match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        };

        match c {
            Color::White => ch,
            Color::Black => ch.to_ascii_lowercase(),
        }
    }

    /// Parses a FEN letter, returning the color (from its case) and piece
    pub fn from_char(ch: char) -> std::result::Result<(Color, Piece), ParsePieceError> {
        let piece = match ch.to_ascii_uppercase() {
            'P' => Piece::Pawn,
            'N' => Piece::Knight,
            'B' => Piece::Bishop,
            'R' => Piece::Rook,
            'Q' => Piece::Queen,
            'K' => Piece::King,
            _ => return Err(ParsePieceError),
        };
        let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };

        Ok((color, piece))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_char(Color::White).fmt(f)
    }
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(Piece::from_char(ch)?.1),
            _ => Err(ParsePieceError),
        }
    }
}

impl TryFrom<usize> for Piece {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> std::result::Result<Self, Self::Error> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Piece>(value as u8)) }
        } else {
            Err(TryFromIntError)
        }
    }
}

impl From<Piece> for usize {
    fn from(value: Piece) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum File {
    // discriminants are spelled out so nothing can go wrong when we use transmute later
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ((b'a' + *self as u8) as char).fmt(f)
    }
}

impl FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.as_bytes() {
            [c @ b'a' ..= b'h'] => File::try_from((c - b'a') as usize).map_err(|_| ParseFileError),
            _ => Err(ParseFileError),
        }
    }
}

impl TryFrom<usize> for File {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> std::result::Result<Self, Self::Error> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, File>(value as u8)) }
        } else {
            Err(TryFromIntError)
        }
    }
}

impl From<File> for usize {
    fn from(value: File) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Rank {
    // discriminants are spelled out so nothing can go wrong when we use transmute later
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ((b'1' + *self as u8) as char).fmt(f)
    }
}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.as_bytes() {
            [c @ b'1' ..= b'8'] => Rank::try_from((c - b'1') as usize).map_err(|_| ParseRankError),
            _ => Err(ParseRankError),
        }
    }
}

impl TryFrom<usize> for Rank {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> std::result::Result<Self, Self::Error> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Rank>(value as u8)) }
        } else {
            Err(TryFromIntError)
        }
    }
}

impl From<Rank> for usize {
    fn from(value: Rank) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, labeled using the `File` and `Rank` as coordinates.
///
/// Squares are numbered rank by rank, so `A1` is 0, `H1` is 7, `A2` is 8 and `H8` is 63.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Square {
    // discriminants are spelled out so nothing can go wrong when we use transmute later
    A1 =  0, B1 =  1, C1 =  2, D1 =  3, E1 =  4, F1 =  5, G1 =  6, H1 =  7,
    A2 =  8, B2 =  9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = Square::H8 as usize + 1;

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        Square::try_from(((rank as usize) << 3) + file as usize).expect("INFALLIBLE")
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        File::try_from((self as usize) & 7).expect("INFALLIBLE")
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        Rank::try_from((self as usize) >> 3).expect("INFALLIBLE")
    }

    /// Returns the neighbouring square in direction `dir`, or `None` if it is off the board
    pub fn offset(self, dir: Direction) -> Option<Square> {
        bitboard::Bitboard::from(self).shift(dir).peek()
    }

    /// Returns an iterator over all squares from `A1` to `H8`
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..Square::COUNT).map(|i| Square::try_from(i).expect("INFALLIBLE"))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.file().to_string() + &self.rank().to_string()).fmt(f)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.len() == 2 && s.is_char_boundary(1) {
            let file = s[..1].parse().map_err(|_| ParseSquareError)?;
            let rank = s[1..].parse().map_err(|_| ParseSquareError)?;
            Ok(Square::from_coord(file, rank))
        } else {
            Err(ParseSquareError)
        }
    }
}

impl TryFrom<usize> for Square {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> std::result::Result<Self, Self::Error> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Square>(value as u8)) }
        } else {
            Err(TryFromIntError)
        }
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// One of the four lines through a square along which a sliding piece moves
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Axis {
    Horizontal = 0,
    Vertical = 1,
    /// The a1-h8 direction
    Diagonal = 2,
    /// The h1-a8 direction
    AntiDiagonal = 3,
}

impl Axis {
    /// The number of axes
    pub const COUNT: usize = 4;

    /// All axes in index order
    pub const ALL: [Axis; Axis::COUNT] =
        [Axis::Horizontal, Axis::Vertical, Axis::Diagonal, Axis::AntiDiagonal];

    /// Returns `true` for the axes along which rooks move
    pub fn is_orthogonal(self) -> bool {
        matches!(self, Axis::Horizontal | Axis::Vertical)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A step on the board: one of the eight compass directions or one of the eight knight jumps
///
/// Each direction has a square offset, used by
/// [`Bitboard::shift_by`](bitboard/struct.Bitboard.html#method.shift_by), and a mask which
/// clears the squares that a shift by that offset would wrap around from the opposite edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Direction {
    North, South, East, West,
    NorthEast, NorthWest, SouthEast, SouthWest,
    NorthNorthEast, NorthNorthWest, NorthEastEast, NorthWestWest,
    SouthSouthEast, SouthSouthWest, SouthEastEast, SouthWestWest,
}

impl Direction {
    /// The eight king steps
    pub const COMPASS: [Direction; 8] = [
        Direction::North, Direction::South, Direction::East, Direction::West,
        Direction::NorthEast, Direction::NorthWest, Direction::SouthEast, Direction::SouthWest,
    ];

    /// The eight knight jumps
    pub const KNIGHT: [Direction; 8] = [
        Direction::NorthNorthEast, Direction::NorthNorthWest,
        Direction::NorthEastEast, Direction::NorthWestWest,
        Direction::SouthSouthEast, Direction::SouthSouthWest,
        Direction::SouthEastEast, Direction::SouthWestWest,
    ];

    /// Rook directions
    pub const ORTHOGONAL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    /// Bishop directions
    pub const DIAGONAL: [Direction; 4] =
        [Direction::NorthEast, Direction::NorthWest, Direction::SouthEast, Direction::SouthWest];

    /// The change in square index for a single step
    pub fn offset(self) -> i8 {
        use Direction::*;

        match self {
            North => 8,
            South => -8,
            East => 1,
            West => -1,
            NorthEast => 9,
            NorthWest => 7,
            SouthEast => -7,
            SouthWest => -9,
            NorthNorthEast => 17,
            NorthNorthWest => 15,
            NorthEastEast => 10,
            NorthWestWest => 6,
            SouthSouthEast => -15,
            SouthSouthWest => -17,
            SouthEastEast => -6,
            SouthWestWest => -10,
        }
    }

    /// The squares that can legitimately be reached by a step in this direction
    ///
    /// A step east can never land on the a-file; if it appears to, it wrapped around from the
    /// h-file. Masking the shifted bitboard with this value removes such squares.
    pub fn mask(self) -> bitboard::Bitboard {
        use bitboard::Bitboard;
        use Direction::*;

        match self {
            North | South => Bitboard::FULL,
            East | NorthEast | SouthEast | NorthNorthEast | SouthSouthEast => !Bitboard::FILE_A,
            West | NorthWest | SouthWest | NorthNorthWest | SouthSouthWest => !Bitboard::FILE_H,
            NorthEastEast | SouthEastEast => !(Bitboard::FILE_A | Bitboard::FILE_B),
            NorthWestWest | SouthWestWest => !(Bitboard::FILE_G | Bitboard::FILE_H),
        }
    }

    /// Returns the direction pointing the other way
    pub fn opposite(self) -> Direction {
        use Direction::*;

        match self {
            North => South,
            South => North,
            East => West,
            West => East,
            NorthEast => SouthWest,
            NorthWest => SouthEast,
            SouthEast => NorthWest,
            SouthWest => NorthEast,
            NorthNorthEast => SouthSouthWest,
            NorthNorthWest => SouthSouthEast,
            NorthEastEast => SouthWestWest,
            NorthWestWest => SouthEastEast,
            SouthSouthEast => NorthNorthWest,
            SouthSouthWest => NorthNorthEast,
            SouthEastEast => NorthWestWest,
            SouthWestWest => NorthEastEast,
        }
    }

    /// Returns the sliding axis of a compass direction, or `None` for knight jumps
    pub fn axis(self) -> Option<Axis> {
        use Direction::*;

        match self {
            East | West => Some(Axis::Horizontal),
            North | South => Some(Axis::Vertical),
            NorthEast | SouthWest => Some(Axis::Diagonal),
            NorthWest | SouthEast => Some(Axis::AntiDiagonal),
            _ => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod bitboard;
pub mod moves;
pub use moves::Move;
pub mod board;
pub use board::Board;
pub mod movegen;
pub use movegen::MoveGenerator;
pub mod position;
pub use position::{Position, CastlingRights, Termination};
pub use position::zobrist::Zobrist;
pub mod variations;


#[cfg(test)]
mod piece_tests {
    use std::convert::TryFrom;
    use super::*;

    #[test]
    fn fromstr_trait_is_case_insensitive() {
        for (s, p) in &[("P", Piece::Pawn), ("n", Piece::Knight), ("B", Piece::Bishop),
                        ("r", Piece::Rook), ("Q", Piece::Queen), ("k", Piece::King)] {
            assert_eq!(s.parse::<Piece>(), Ok(*p));
        }
        assert!("X".parse::<Piece>().is_err());
        assert!("PP".parse::<Piece>().is_err());
        assert!("".parse::<Piece>().is_err());
    }

    #[test]
    fn fen_letters_carry_color() {
        assert_eq!(Piece::Knight.to_char(Color::White), 'N');
        assert_eq!(Piece::Knight.to_char(Color::Black), 'n');
        assert_eq!(Piece::from_char('q'), Ok((Color::Black, Piece::Queen)));
        assert_eq!(Piece::from_char('K'), Ok((Color::White, Piece::King)));
        assert!(Piece::from_char('x').is_err());
    }

    #[test]
    fn usize_conversions_are_consistent() {
        for (i, p) in Piece::ALL.iter().enumerate() {
            assert_eq!(usize::from(*p), i);
            assert_eq!(Piece::try_from(i), Ok(*p));
        }
        assert!(Piece::try_from(6).is_err());
    }
}


#[cfg(test)]
mod direction_tests {
    use super::*;

    #[test]
    fn opposite_negates_the_offset() {
        for d in Direction::COMPASS.iter().chain(Direction::KNIGHT.iter()) {
            assert_eq!(d.opposite().offset(), -d.offset());
            assert_eq!(d.opposite().opposite(), *d);
        }
    }

    #[test]
    fn compass_directions_have_an_axis_and_knights_do_not() {
        for d in Direction::COMPASS.iter() {
            assert_eq!(d.axis(), d.opposite().axis());
            assert!(d.axis().is_some());
        }
        for d in Direction::KNIGHT.iter() {
            assert_eq!(d.axis(), None);
        }
        assert!(Direction::North.axis().map_or(false, Axis::is_orthogonal));
        assert!(!Direction::NorthEast.axis().map_or(true, Axis::is_orthogonal));
    }
}
