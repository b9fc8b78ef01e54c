//! Contains structure and data for Zobrist hash keys
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use super::*;

const ZOBRIST_SEED: u64 = 0x0b5e_55ed_c0ff_ee42;

struct Keys {
    placement: [[[u64; Square::COUNT]; Piece::COUNT]; Color::COUNT],
    castling: [u64; CastlingRights::COUNT],
    ep_file: [u64; File::COUNT],
    black_to_move: u64,
}

lazy_static! {
    static ref KEYS: Keys = {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut keys = Keys {
            placement: [[[0; Square::COUNT]; Piece::COUNT]; Color::COUNT],
            castling: [0; CastlingRights::COUNT],
            ep_file: [0; File::COUNT],
            black_to_move: 0,
        };

        for by_piece in keys.placement.iter_mut() {
            for by_square in by_piece.iter_mut() {
                rng.fill(&mut by_square[..]);
            }
        }
        // no rights at all hashes to nothing
        rng.fill(&mut keys.castling[1..]);
        rng.fill(&mut keys.ep_file[..]);
        keys.black_to_move = rng.gen();

        keys
    };
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A 64-bit hash key generated from a position
///
/// Each feature of the position toggles its own random key in or out, so the key can be kept up
/// to date as moves are made and unmade, and always equals the key computed from scratch with
/// [`from_position`](#method.from_position).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct Zobrist(u64);

impl Zobrist {
    /// Creates a new zobrist key
    pub fn new() -> Zobrist {
        Zobrist(0)
    }

    /// Computes the key of a position from scratch
    pub fn from_position(pos: &Position) -> Zobrist {
        let mut key = Zobrist::new();
        let board = pos.board();

        for sq in board.occupied() {
            if let Some((c, p)) = board.piece_at(sq) {
                key.toggle_piece_placement(c, p, sq);
            }
        }
        key.toggle_castling_rights(pos.castling_rights());
        if let Some(sq) = pos.ep_square() {
            key.toggle_ep_square(sq);
        }
        if pos.turn() == Color::Black {
            key.toggle_turn();
        }

        key
    }

    /// Toggles piece placement
    pub fn toggle_piece_placement(&mut self, c: Color, p: Piece, sq: Square) {
        self.0 ^= KEYS.placement[c as usize][p as usize][sq as usize];
    }

    /// Toggles an en passant square
    pub fn toggle_ep_square(&mut self, sq: Square) {
        self.0 ^= KEYS.ep_file[sq.file() as usize];
    }

    /// Toggles a whole set of castling rights
    pub fn toggle_castling_rights(&mut self, rights: CastlingRights) {
        self.0 ^= KEYS.castling[rights.bits() as usize];
    }

    /// Toggles whose turn it is
    pub fn toggle_turn(&mut self) {
        self.0 ^= KEYS.black_to_move;
    }

    /// Toggles every piece a move displaces, for the side `c` making it
    pub fn toggle_move(&mut self, mv: Move, c: Color) {
        let piece = mv.piece();

        self.toggle_piece_placement(c, piece, mv.from());
        self.toggle_piece_placement(c, mv.promotion().unwrap_or(piece), mv.to());
        if let Some(captured) = mv.captured() {
            self.toggle_piece_placement(!c, captured, mv.captured_square());
        }
        if mv.is_castle() {
            let (rook_from, rook_to) = mv.castle_rook_squares();
            self.toggle_piece_placement(c, Piece::Rook, rook_from);
            self.toggle_piece_placement(c, Piece::Rook, rook_to);
        }
    }
}

impl fmt::Display for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl fmt::LowerHex for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Zobrist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl From<Zobrist> for u64 {
    /// Allows using the key to get a hash table index
    ///
    /// # Example
    /// ```rust
    /// use chess::Position;
    ///
    /// let pos = Position::new();
    /// let table_size: usize = 0x10_0000;
    /// let index = u64::from(pos.zobrist_key()) as usize & (table_size - 1);
    /// assert!(index < table_size);
    /// ```
    fn from(key: Zobrist) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_the_key() {
        let mut key = Zobrist::new();
        key.toggle_piece_placement(Color::White, Piece::Queen, Square::D1);
        assert_ne!(key, Zobrist::new());
        key.toggle_piece_placement(Color::White, Piece::Queen, Square::D1);
        assert_eq!(key, Zobrist::new());

        key.toggle_castling_rights(CastlingRights::NONE);
        assert_eq!(key, Zobrist::new());
        key.toggle_castling_rights(CastlingRights::ALL);
        key.toggle_turn();
        key.toggle_turn();
        key.toggle_castling_rights(CastlingRights::ALL);
        assert_eq!(key, Zobrist::new());
    }

    #[test]
    fn ep_keys_depend_only_on_the_file() {
        let mut a = Zobrist::new();
        let mut b = Zobrist::new();
        a.toggle_ep_square(Square::E3);
        b.toggle_ep_square(Square::E6);
        assert_eq!(a, b);
        b.toggle_ep_square(Square::D6);
        assert_ne!(a, b);
    }

    #[test]
    fn start_position_key_matches_from_scratch() {
        let pos = Position::new();
        assert_eq!(pos.zobrist_key(), Zobrist::from_position(&pos));
        assert_ne!(pos.zobrist_key(), Zobrist::new());
    }
}
