//! Constant-time attack lookups: magic bitboards for sliders, flat tables for kings and knights
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! The tables are built the first time any of them is used, or when [`init`](fn.init.html) is
//! called. Magic multipliers are found by a seeded search, so the tables are identical on every
//! run.
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::time::Instant;
use lazy_static::lazy_static;
use log::debug;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use super::*;

/// Seed for the magic multiplier search
pub const MAGIC_SEED: u64 = 0x7374_6f63_6b70_6967;

lazy_static! {
    static ref MAGICS: Magics = {
        let start = Instant::now();
        let magics = Magics::find(MAGIC_SEED);
        debug!("magic attack tables built in {:?}", start.elapsed());
        magics
    };

    static ref KING_ATTACKS: [Bitboard; Square::COUNT] = step_attacks(&Direction::COMPASS);
    static ref KNIGHT_ATTACKS: [Bitboard; Square::COUNT] = step_attacks(&Direction::KNIGHT);
}

/// Builds all attack tables now rather than on first use
pub fn init() {
    lazy_static::initialize(&MAGICS);
    lazy_static::initialize(&KING_ATTACKS);
    lazy_static::initialize(&KNIGHT_ATTACKS);
}

/// Squares attacked by a king on `sq`
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

/// Squares attacked by a knight on `sq`
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

/// Squares attacked by a bishop on `sq`, given the occupied squares `occ`
pub fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    MAGICS.bishop(sq).attacks(occ)
}

/// Squares attacked by a rook on `sq`, given the occupied squares `occ`
pub fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    MAGICS.rook(sq).attacks(occ)
}

/// Squares attacked by a queen on `sq`, given the occupied squares `occ`
pub fn queen_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    bishop_attacks(sq, occ) | rook_attacks(sq, occ)
}

/// Rook attacks computed ray by ray, without any table
pub fn slow_rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    Slider::Rook.slow_attacks(sq, occ)
}

/// Bishop attacks computed ray by ray, without any table
pub fn slow_bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    Slider::Bishop.slow_attacks(sq, occ)
}

/// Returns the magic multipliers in use for rooks and bishops, indexed by square
pub fn multipliers() -> ([u64; Square::COUNT], [u64; Square::COUNT]) {
    let mut rooks = [0; Square::COUNT];
    let mut bishops = [0; Square::COUNT];

    for sq in Square::iter() {
        rooks[sq as usize] = MAGICS.rook(sq).magic();
        bishops[sq as usize] = MAGICS.bishop(sq).magic();
    }

    (rooks, bishops)
}

fn step_attacks(dirs: &[Direction]) -> [Bitboard; Square::COUNT] {
    let mut table = [Bitboard::EMPTY; Square::COUNT];

    for sq in Square::iter() {
        let from = Bitboard::from(sq);
        table[sq as usize] = dirs.iter().fold(Bitboard::EMPTY, |acc, &d| acc | from.shift(d));
    }

    table
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The two kinds of sliding piece with their own tables; queens use both
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Slider {
    /// Moves along ranks and files
    Rook,
    /// Moves along diagonals
    Bishop,
}

impl Slider {
    fn directions(self) -> &'static [Direction; 4] {
        match self {
            Slider::Rook => &Direction::ORTHOGONAL,
            Slider::Bishop => &Direction::DIAGONAL,
        }
    }

    /// The squares whose occupancy can change this slider's attacks from `sq`
    ///
    /// This is every square the slider reaches on an empty board, less the final square of each
    /// ray, which is attacked whether or not it is occupied.
    pub fn relevant_mask(self, sq: Square) -> Bitboard {
        let from = Bitboard::from(sq);

        self.directions().iter().fold(Bitboard::EMPTY, |acc, &d| {
            let ray = from.slide(d, Bitboard::FULL);
            acc | (ray - last_of(ray, d))
        })
    }

    /// Attacks from `sq` computed with one slide per direction
    pub fn slow_attacks(self, sq: Square, occ: Bitboard) -> Bitboard {
        let from = Bitboard::from(sq);

        self.directions()
            .iter()
            .fold(Bitboard::EMPTY, |acc, &d| acc | from.slide(d, !occ))
    }
}

/// The square of `ray` furthest along direction `dir`
fn last_of(ray: Bitboard, dir: Direction) -> Bitboard {
    ray - ray.shift(dir.opposite())
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The lookup data for one slider on one square
///
/// The relevant occupancy, multiplied by the magic number, leaves a unique table index in its
/// top bits for every occupancy that produces a distinct set of attacks.
#[derive(Debug, Clone)]
pub struct Magic {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    attacks: Vec<Bitboard>,
}

impl Magic {
    fn index(&self, occ: Bitboard) -> usize {
        ((occ & self.mask).bits().wrapping_mul(self.magic) >> self.shift) as usize
    }

    /// Looks up the attacks for the occupied squares `occ`
    pub fn attacks(&self, occ: Bitboard) -> Bitboard {
        self.attacks[self.index(occ)]
    }

    /// The relevant occupancy mask
    pub fn mask(&self) -> Bitboard {
        self.mask
    }

    /// The magic multiplier
    pub fn magic(&self) -> u64 {
        self.magic
    }

    /// The number of index bits, which is also the number of squares in the mask
    pub fn index_bits(&self) -> u32 {
        64 - self.shift
    }

    /// Searches for a magic multiplier for `slider` on `sq`
    ///
    /// Every subset of the relevant mask is enumerated with the carry-rippler trick and paired
    /// with its reference attacks. Candidates are sparse random numbers. A candidate succeeds if
    /// no two subsets with different attacks land on the same index. The scratch table is
    /// stamped with the attempt number so it never has to be cleared between candidates.
    pub fn find(slider: Slider, sq: Square, rng: &mut StdRng) -> Magic {
        let mask = slider.relevant_mask(sq);
        let bits = mask.len() as u32;
        let shift = 64 - bits;
        let size = 1usize << bits;

        let mut occupancies = Vec::with_capacity(size);
        let mut reference = Vec::with_capacity(size);
        let mut subset = Bitboard::EMPTY;
        loop {
            occupancies.push(subset);
            reference.push(slider.slow_attacks(sq, subset));
            subset = Bitboard(subset.0.wrapping_sub(mask.0) & mask.0);
            if subset.is_empty() {
                break;
            }
        }

        let mut table = vec![Bitboard::EMPTY; size];
        let mut stamps = vec![0u32; size];
        let mut attempt = 0u32;

        loop {
            let magic = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();

            // a useful multiplier spreads the mask over the top byte
            if (mask.0.wrapping_mul(magic) >> 56).count_ones() < 6 {
                continue;
            }

            attempt += 1;
            let mut collision = false;

            for (occ, att) in occupancies.iter().zip(&reference) {
                let i = (occ.0.wrapping_mul(magic) >> shift) as usize;

                if stamps[i] != attempt {
                    stamps[i] = attempt;
                    table[i] = *att;
                } else if table[i] != *att {
                    collision = true;
                    break;
                }
            }

            if !collision {
                return Magic { mask, magic, shift, attacks: table };
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Magic lookup data for every square, for both rooks and bishops
#[derive(Debug, Clone)]
pub struct Magics {
    rook: Vec<Magic>,
    bishop: Vec<Magic>,
}

impl Magics {
    /// Runs the magic multiplier search for all squares with a generator seeded by `seed`
    pub fn find(seed: u64) -> Magics {
        let mut rng = StdRng::seed_from_u64(seed);

        let rook = Square::iter().map(|sq| Magic::find(Slider::Rook, sq, &mut rng)).collect();
        let bishop = Square::iter().map(|sq| Magic::find(Slider::Bishop, sq, &mut rng)).collect();

        Magics { rook, bishop }
    }

    /// Rook lookup data for `sq`
    pub fn rook(&self, sq: Square) -> &Magic {
        &self.rook[sq as usize]
    }

    /// Bishop lookup data for `sq`
    pub fn bishop(&self, sq: Square) -> &Magic {
        &self.bishop[sq as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subsets(mask: Bitboard) -> Vec<Bitboard> {
        let mut all = Vec::new();
        let mut subset = Bitboard::EMPTY;
        loop {
            all.push(subset);
            subset = Bitboard(subset.0.wrapping_sub(mask.0) & mask.0);
            if subset.is_empty() {
                break all;
            }
        }
    }

    #[test]
    fn relevant_masks_exclude_ray_ends() {
        assert_eq!(Slider::Rook.relevant_mask(Square::A1).len(), 12);
        assert_eq!(Slider::Rook.relevant_mask(Square::E4).len(), 10);
        assert_eq!(Slider::Bishop.relevant_mask(Square::A1).len(), 6);
        assert_eq!(Slider::Bishop.relevant_mask(Square::E4).len(), 9);
        assert_eq!(Slider::Bishop.relevant_mask(Square::B1).len(), 5);

        let a1 = Slider::Rook.relevant_mask(Square::A1);
        assert!(!a1.contains(Square::A1));
        assert!(!a1.contains(Square::A8));
        assert!(!a1.contains(Square::H1));
        assert!(a1.contains(Square::A7));
        assert!(a1.contains(Square::G1));

        for sq in Square::iter() {
            assert!(!Slider::Rook.relevant_mask(sq).contains(sq));
            assert!(!Slider::Bishop.relevant_mask(sq).contains(sq));
            assert!(Slider::Bishop.relevant_mask(sq).is_disjoint(Bitboard::EDGES));
        }
    }

    #[test]
    fn slow_attacks_stop_at_blockers() {
        let occ = Bitboard::from(Square::E6) | Square::C4.into() | Square::G2.into();
        let rook = slow_rook_attacks(Square::E4, occ);
        assert!(rook.contains(Square::E6));
        assert!(!rook.contains(Square::E7));
        assert!(rook.contains(Square::C4));
        assert!(!rook.contains(Square::B4));
        assert!(rook.contains(Square::H4));
        assert!(rook.contains(Square::E1));
        assert_eq!(rook.len(), 2 + 3 + 2 + 3);

        let bishop = slow_bishop_attacks(Square::E4, occ);
        assert!(bishop.contains(Square::G2));
        assert!(!bishop.contains(Square::H1));
        assert!(bishop.contains(Square::A8));
        assert!(!bishop.contains(Square::E4));
    }

    #[test]
    fn magic_lookups_match_slow_attacks_for_every_occupancy() {
        for sq in Square::iter() {
            let rook = MAGICS.rook(sq);
            for occ in subsets(rook.mask()) {
                assert_eq!(rook.attacks(occ), slow_rook_attacks(sq, occ), "rook on {}", sq);
            }

            let bishop = MAGICS.bishop(sq);
            for occ in subsets(bishop.mask()) {
                assert_eq!(bishop.attacks(occ), slow_bishop_attacks(sq, occ), "bishop on {}", sq);
            }
        }
    }

    #[test]
    fn irrelevant_occupancy_is_ignored() {
        // pieces on the edges and off the lines never change the lookup
        let noise = Bitboard::EDGES | Square::B2.into() | Square::G7.into();
        assert_eq!(rook_attacks(Square::D4, noise), slow_rook_attacks(Square::D4, noise));
        assert_eq!(bishop_attacks(Square::D4, noise), slow_bishop_attacks(Square::D4, noise));
        assert_eq!(
            queen_attacks(Square::D4, noise),
            slow_rook_attacks(Square::D4, noise) | slow_bishop_attacks(Square::D4, noise)
        );
    }

    #[test]
    fn search_is_deterministic() {
        let mut a = StdRng::seed_from_u64(MAGIC_SEED);
        let mut b = StdRng::seed_from_u64(MAGIC_SEED);
        let first = Magic::find(Slider::Bishop, Square::C1, &mut a);
        let second = Magic::find(Slider::Bishop, Square::C1, &mut b);
        assert_eq!(first.magic(), second.magic());
        assert_eq!(first.index_bits(), first.mask().len() as u32);
    }

    #[test]
    fn multipliers_are_the_ones_in_use() {
        let (rooks, bishops) = multipliers();
        assert!(rooks.iter().chain(bishops.iter()).all(|&m| m != 0));
        assert_eq!(rooks[Square::H8 as usize], MAGICS.rook(Square::H8).magic());
        assert_eq!(bishops[Square::D5 as usize], MAGICS.bishop(Square::D5).magic());
    }

    #[test]
    fn step_tables() {
        assert_eq!(king_attacks(Square::A1).len(), 3);
        assert_eq!(king_attacks(Square::E4).len(), 8);
        assert_eq!(king_attacks(Square::H5).len(), 5);
        assert_eq!(knight_attacks(Square::A1).len(), 2);
        assert_eq!(knight_attacks(Square::D4).len(), 8);
        assert_eq!(knight_attacks(Square::B1).len(), 3);
        assert!(knight_attacks(Square::G1).contains(Square::F3));
        assert!(knight_attacks(Square::G1).contains(Square::E2));
        assert!(knight_attacks(Square::G1).contains(Square::H3));
    }
}
