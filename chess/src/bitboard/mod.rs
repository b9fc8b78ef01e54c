//! Provides a representation of sets of squares and the attack tables built from them
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! # Shifts, Fills and Slides
//! All movement on a bitboard is expressed in terms of a [`Direction`](../enum.Direction.html).
//! [`Bitboard::shift`](struct.Bitboard.html#method.shift) moves every square one step in a
//! direction, dropping squares which would leave the board (including those that would wrap
//! around from the h-file to the a-file or vice versa).
//!
//! ```rust
//! use chess::{Square, Direction};
//! use chess::bitboard::Bitboard;
//!
//! let pawns = Bitboard::from(Square::A2) | Square::H2.into();
//! let mut attacks = pawns.shift(Direction::NorthEast);
//! assert_eq!(attacks.pop(), Some(Square::B3));
//! assert_eq!(attacks.pop(), None);
//! ```
//!
//! [`Bitboard::fill`](struct.Bitboard.html#method.fill) repeats a shift as long as it stays
//! within a given area, and [`Bitboard::slide`](struct.Bitboard.html#method.slide) turns a fill
//! through empty squares into the attacks of a sliding piece, stopping at and including the first
//! blocker:
//!
//! ```rust
//! use chess::{Square, Direction};
//! use chess::bitboard::Bitboard;
//!
//! let blockers = Bitboard::from(Square::A4);
//! let mut ray = Bitboard::from(Square::A1).slide(Direction::North, !blockers);
//! assert_eq!(ray.pop(), Some(Square::A2));
//! assert_eq!(ray.pop(), Some(Square::A3));
//! assert_eq!(ray.pop(), Some(Square::A4));
//! assert_eq!(ray.pop(), None);
//! ```
//!
//! # Attack Tables
//! The [`magic`](magic/index.html) module provides constant-time attack lookups for every piece
//! except pawns, whose attacks are computed for all pawns at once with `shift`.
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use std::iter::FusedIterator;
use std::iter::{FromIterator, Extend};
use std::ops;
use std::fmt;
use super::*;

pub mod magic;
pub use magic::{king_attacks, knight_attacks, bishop_attacks, rook_attacks, queen_attacks};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A set of squares with each bit representing one square
///
/// A `Bitboard` is, essentially, a set of [`Square`](../enum.Square.html)s stored in a 64-bit
/// integer. Each bit corresponds to one `Square`. If the bit is set, that `Square` is present. If
/// it is clear, the `Square` is not present. The diagram below shows the layout of the bits.
///
/// ```text
///     a    b    c    d    e    f    g    h
///    ---------------------------------------
/// 8 | 56 | 57 | 58 | 59 | 60 | 61 | 62 | 63 | 8
///    ---------------------------------------
/// 7 | 48 | 49 | 50 | 51 | 52 | 53 | 54 | 55 | 7
///    ---------------------------------------
/// 6 | 40 | 41 | 42 | 43 | 44 | 45 | 46 | 47 | 6
///    ---------------------------------------
/// 5 | 32 | 33 | 34 | 35 | 36 | 37 | 38 | 39 | 5
///    ---------------------------------------
/// 4 | 24 | 25 | 26 | 27 | 28 | 29 | 30 | 31 | 4
///    ---------------------------------------
/// 3 | 16 | 17 | 18 | 19 | 20 | 21 | 22 | 23 | 3
///    ---------------------------------------
/// 2 | 08 | 09 | 10 | 11 | 12 | 13 | 14 | 15 | 2
///    ---------------------------------------
/// 1 | 00 | 01 | 02 | 03 | 04 | 05 | 06 | 07 | 1
///    ---------------------------------------
///     a    b    c    d    e    f    g    h
/// ```
///
/// `Bitboard` implements all the bit-wise logic operators: `|`, `&`, `^`, `!`, `|=`, `&=`, and
/// `^=`, plus `-` for set difference. It also has methods that are typical for sets and
/// collections, such as `insert`, `remove`, `len`, and `contains`. It implements IntoIterator.
/// However, since it's only a 64-bit value, it implement's `Copy`, and there's no need for the
/// borrowing iterator methods `iter` and `iter_mut`.
///
/// The bit-shift operators are not implemented as they wouldn't be well-defined for a
/// 2-dimensional `Bitboard`. Instead, [`shift`](#method.shift) takes a `Direction`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(u64);

impl Bitboard {
    /// The empty set
    pub const EMPTY: Bitboard = Bitboard(0);
    /// Every square on the board
    pub const FULL: Bitboard = Bitboard(!0);

    /// The a-file
    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    /// The b-file
    pub const FILE_B: Bitboard = Bitboard(0x0202_0202_0202_0202);
    /// The g-file
    pub const FILE_G: Bitboard = Bitboard(0x4040_4040_4040_4040);
    /// The h-file
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);
    /// The first rank
    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00ff);
    /// The eighth rank
    pub const RANK_8: Bitboard = Bitboard(0xff00_0000_0000_0000);
    /// Squares on the edge of the board
    pub const EDGES: Bitboard = Bitboard(0xff81_8181_8181_81ff);
    /// Dark squares (a1 is dark)
    pub const DARK_SQUARES: Bitboard = Bitboard(0xaa55_aa55_aa55_aa55);
    /// Light squares
    pub const LIGHT_SQUARES: Bitboard = Bitboard(!0xaa55_aa55_aa55_aa55);

    /// Creates a new, empty bitboard
    pub fn new() -> Bitboard {
        Default::default()
    }

    /// Returns the underlying 64-bit integer
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Returns the number of squares in the bitboard
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the bitboard is empty
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the bitboard contains `sq`
    pub fn contains(self, sq: Square) -> bool {
        !(self & sq.into()).is_empty()
    }

    /// Returns `true` if `self` intersects `other`
    pub fn intersects(self, other: Bitboard) -> bool {
        !(self & other).is_empty()
    }

    /// Returns `true` if `self` does not intersect `other`
    pub fn is_disjoint(self, other: Bitboard) -> bool {
        (self & other).is_empty()
    }

    /// Returns `true` if every square of `self` is also in `other`
    pub fn is_subset(self, other: Bitboard) -> bool {
        (self - other).is_empty()
    }

    /// Adds a square to the bitboard if it is not already present
    pub fn insert(&mut self, sq: Square) {
        *self |= sq.into();
    }

    /// Removes a square from the bitboard if it is present
    pub fn remove(&mut self, sq: Square) {
        *self &= !Bitboard::from(sq);
    }

    /// Toggles a square in the bitboard
    pub fn toggle(&mut self, sq: Square) {
        *self ^= sq.into();
    }

    /// Removes the lowest square from the bitboard and returns it
    pub fn pop(&mut self) -> Option<Square> {
        let sq = self.peek();
        // clear the least significant bit
        self.0 &= self.0.wrapping_sub(1);
        sq
    }

    /// Returns the square that would be removed by a pop command
    pub fn peek(self) -> Option<Square> {
        if self.0 != 0 {
            // get the least significant bit
            Some(Square::try_from(self.0.trailing_zeros() as usize).expect("INFALLIBLE"))
        } else {
            None
        }
    }

    /// Returns a bitboard with every square moved by `n` square indices: toward h8 if `n` is
    /// positive, toward a1 if it is negative
    ///
    /// Squares shifted past a1 or h8 are dropped. Files are not taken into account, so a shift by
    /// one wraps from the h-file onto the a-file of the next rank; use [`shift`](#method.shift)
    /// to avoid that.
    pub fn shift_by(self, n: i8) -> Bitboard {
        if n >= 0 {
            Bitboard(self.0 << n)
        } else {
            Bitboard(self.0 >> -n)
        }
    }

    /// Returns a bitboard with every square moved one step in direction `dir`, dropping squares
    /// which would leave the board
    pub fn shift(self, dir: Direction) -> Bitboard {
        self.shift_by(dir.offset()) & dir.mask()
    }

    /// Returns `self` extended by repeated steps in `dir`, as long as each step lands inside
    /// `area`
    ///
    /// The fill doubles its step length on every round (1, 2, then 4 steps), so it reaches the
    /// edge of the board in three rounds regardless of the number of squares in `self`. Only
    /// meaningful for compass directions.
    pub fn fill(self, dir: Direction, area: Bitboard) -> Bitboard {
        let n = dir.offset();
        let mut gen = self;
        let mut pro = area & dir.mask();

        gen |= pro & gen.shift_by(n);
        pro &= pro.shift_by(n);
        gen |= pro & gen.shift_by(2 * n);
        pro &= pro.shift_by(2 * n);
        gen |= pro & gen.shift_by(4 * n);

        gen
    }

    /// Returns the squares attacked in direction `dir` by sliding pieces on the squares of
    /// `self`, where `empty` is the set of unoccupied squares
    ///
    /// Each ray stops at, and includes, the first square not in `empty`.
    pub fn slide(self, dir: Direction, empty: Bitboard) -> Bitboard {
        self.fill(dir, empty).shift(dir)
    }

    /// Returns an 8x8 text diagram of the bitboard, rank 8 first, with `1` for present squares
    /// and `.` for absent ones
    pub fn diagram(self) -> String {
        let mut s = String::with_capacity(8 * 17);

        for r in (0..Rank::COUNT).rev() {
            for f in 0..File::COUNT {
                if f > 0 {
                    s.push(' ');
                }
                s.push(if self.0 >> (r * 8 + f) & 1 != 0 { '1' } else { '.' });
            }
            s.push('\n');
        }

        s
    }
}

impl ops::Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}

impl ops::BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl ops::BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl ops::BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0
    }
}

impl ops::Sub for Bitboard {
    type Output = Self;

    /// Set difference
    fn sub(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & !rhs.0)
    }
}

impl ops::SubAssign for Bitboard {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 &= !rhs.0
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Octal for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Octal::fmt(&self.0, f)
    }
}

impl fmt::Binary for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl From<u64> for Bitboard {
    fn from(val: u64) -> Bitboard {
        Bitboard(val)
    }
}

impl From<Bitboard> for u64 {
    fn from(bb: Bitboard) -> u64 {
        bb.0
    }
}

impl From<Square> for Bitboard {
    fn from(sq: Square) -> Bitboard {
        Bitboard(1 << sq as u64)
    }
}

impl From<File> for Bitboard {
    fn from(f: File) -> Bitboard {
        Bitboard(Bitboard::FILE_A.0 << f as u64)
    }
}

impl From<Rank> for Bitboard {
    fn from(r: Rank) -> Bitboard {
        Bitboard(Bitboard::RANK_1.0 << (8 * r as u64))
    }
}

impl From<IntoIter> for Bitboard {
    fn from(iter: IntoIter) -> Bitboard {
        iter.0
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl FromIterator<Square> for Bitboard {
    /// If converting from `bitboard::IntoIter`, use `Bitboard::from()` instead as that is faster
    fn from_iter<I: IntoIterator<Item=Square>>(iter: I) -> Self {
        let mut bd = Bitboard::new();

        for sq in iter {
            bd.insert(sq);
        }

        bd
    }
}

impl Extend<Square> for Bitboard {
    fn extend<I: IntoIterator<Item=Square>>(&mut self, iter: I) {
        for sq in iter {
            self.insert(sq);
        }
    }
}

/// Iterator over the squares of a `Bitboard`, lowest square first
#[derive(Debug, Copy, Clone)]
pub struct IntoIter(Bitboard);

impl Iterator for IntoIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl ExactSizeIterator for IntoIter {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl FusedIterator for IntoIter { }

#[cfg(test)]
mod tests {
    use super::*;

    fn squares(sqs: &[Square]) -> Bitboard {
        sqs.iter().copied().collect()
    }

    #[test]
    fn set_operations() {
        // test new() method and Default trait
        assert_eq!(Bitboard::new(), Bitboard(0));
        assert_eq!(Bitboard::new(), Default::default());

        // test len() and is_empty() methods
        assert_eq!(Bitboard::new().len(), 0);
        assert!(Bitboard::new().is_empty());
        assert_eq!(Bitboard::FULL.len(), 64);
        assert!(!Bitboard::FULL.is_empty());

        // test contains() method
        assert!(Bitboard::from(Square::A1).contains(Square::A1));
        assert!(Bitboard::from(Square::H8).contains(Square::H8));
        assert!(!Bitboard::from(Square::A1).contains(Square::H8));

        // test intersects(), is_disjoint() and is_subset() methods
        let ab = squares(&[Square::A1, Square::B1]);
        assert!(ab.intersects(Square::B1.into()));
        assert!(ab.is_disjoint(Square::C1.into()));
        assert!(Bitboard::from(Square::A1).is_subset(ab));
        assert!(!ab.is_subset(Square::A1.into()));
        assert_eq!(ab - Square::A1.into(), Bitboard::from(Square::B1));

        // test insert(), remove() and toggle() methods
        let mut bb = Bitboard::new();
        bb.insert(Square::E4);
        bb.insert(Square::E4);
        assert_eq!(bb.len(), 1);
        bb.toggle(Square::D5);
        bb.toggle(Square::E4);
        assert_eq!(bb, Square::D5.into());
        bb.remove(Square::D5);
        bb.remove(Square::D5);
        assert!(bb.is_empty());
    }

    #[test]
    fn pop_returns_squares_lowest_first() {
        let mut bb = squares(&[Square::H8, Square::A1, Square::C3]);
        assert_eq!(bb.peek(), Some(Square::A1));
        assert_eq!(bb.pop(), Some(Square::A1));
        assert_eq!(bb.pop(), Some(Square::C3));
        assert_eq!(bb.pop(), Some(Square::H8));
        assert_eq!(bb.pop(), None);
        assert_eq!(bb.peek(), None);
        assert_eq!(squares(&[Square::B2, Square::G7]).into_iter().len(), 2);
    }

    #[test]
    fn files_and_ranks_convert() {
        assert_eq!(Bitboard::from(File::A), Bitboard::FILE_A);
        assert_eq!(Bitboard::from(File::H), Bitboard::FILE_H);
        assert_eq!(Bitboard::from(Rank::R1), Bitboard::RANK_1);
        assert_eq!(Bitboard::from(Rank::R8), Bitboard::RANK_8);
        assert_eq!(
            Bitboard::EDGES,
            Bitboard::FILE_A | Bitboard::FILE_H | Bitboard::RANK_1 | Bitboard::RANK_8
        );
        assert!(Bitboard::DARK_SQUARES.contains(Square::A1));
        assert!(Bitboard::LIGHT_SQUARES.contains(Square::H1));
        assert!(Bitboard::DARK_SQUARES.contains(Square::H8));
    }

    #[test]
    fn shifts_do_not_wrap_files() {
        let h_file = Bitboard::FILE_H;
        assert!(h_file.shift(Direction::East).is_empty());
        assert!(h_file.shift(Direction::NorthEast).is_empty());
        assert!(Bitboard::FILE_A.shift(Direction::West).is_empty());
        assert!(Bitboard::FILE_B.shift(Direction::NorthWestWest).is_empty());
        assert!(Bitboard::FILE_G.shift(Direction::SouthEastEast).is_empty());
        assert!(Bitboard::RANK_8.shift(Direction::North).is_empty());
        assert!(Bitboard::RANK_1.shift(Direction::SouthSouthWest).is_empty());
        assert_eq!(Bitboard::FILE_A.shift(Direction::East), Bitboard::FILE_B);
        assert_eq!(Bitboard::RANK_1.shift(Direction::North), Rank::R2.into());

        // `shift_by` does wrap
        assert_eq!(Bitboard::from(Square::H1).shift_by(1), Square::A2.into());
        assert_eq!(Bitboard::from(Square::A2).shift_by(-1), Square::H1.into());
    }

    #[test]
    fn knight_shifts_land_where_expected() {
        let g1 = Bitboard::from(Square::G1);
        let jumps: Bitboard = Direction::KNIGHT.iter()
            .fold(Bitboard::new(), |acc, d| acc | g1.shift(*d));
        assert_eq!(jumps, squares(&[Square::E2, Square::F3, Square::H3]));
    }

    #[test]
    fn fill_reaches_the_edge_within_area() {
        let e4 = Bitboard::from(Square::E4);
        assert_eq!(e4.fill(Direction::North, Bitboard::FULL), Bitboard::from(File::E) - Rank::R1.into()
            - Rank::R2.into() - Rank::R3.into());
        assert_eq!(
            Bitboard::from(Square::A1).fill(Direction::NorthEast, Bitboard::FULL).len(),
            8
        );
        // the fill stops before leaving the area
        let area = !Bitboard::from(Square::E7);
        assert_eq!(e4.fill(Direction::North, area), squares(&[Square::E4, Square::E5, Square::E6]));
    }

    #[test]
    fn slide_includes_the_first_blocker() {
        let empty = !squares(&[Square::C3, Square::F6]);
        let d4 = Bitboard::from(Square::D4);
        assert_eq!(d4.slide(Direction::SouthWest, empty), Square::C3.into());
        assert_eq!(d4.slide(Direction::NorthEast, empty), squares(&[Square::E5, Square::F6]));
        assert_eq!(
            d4.slide(Direction::West, empty),
            squares(&[Square::A4, Square::B4, Square::C4])
        );
        assert!(Bitboard::from(Square::H4).slide(Direction::East, Bitboard::FULL).is_empty());
    }

    #[test]
    fn formatting() {
        assert_eq!(format!("{}", Bitboard::from(0x0123456789abcdef)), "123456789abcdef");
        assert_eq!(format!("{:016x}", Bitboard::from(0x0123456789abcdef)), "0123456789abcdef");
        assert_eq!(format!("{:X}", Bitboard::from(0x0123456789ABCDEF)), "123456789ABCDEF");
        assert_eq!(format!("{:o}", Bitboard::from(0o17)), "17");
        assert_eq!(format!("{:b}", Bitboard::from(5)), "101");

        let diagram = Bitboard::from(Square::A1).diagram();
        let last = diagram.lines().last().expect("eight lines");
        assert_eq!(last, "1 . . . . . . .");
        assert_eq!(diagram.lines().count(), 8);
    }
}
