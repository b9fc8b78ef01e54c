//! Piece placement, kept both as bitboards and as a square-indexed mailbox
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use super::*;
use bitboard::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The placement of pieces on the board
///
/// Every piece is recorded in four places: the bitboard for its piece type, the bitboard for its
/// color, the `empty` bitboard, and the mailbox. They are only changed together, through
/// [`add_piece`](#method.add_piece) and [`remove_piece`](#method.remove_piece), so the following
/// always hold:
///
///  -  the mailbox entry for a square names the one piece-type bitboard containing that square,
///     or is `None` if no piece-type bitboard does;
///  -  the two color bitboards and `empty` are pairwise disjoint and together cover the board;
///  -  the piece-type bitboards are pairwise disjoint.
///
/// The board knows nothing about whose turn it is or what is legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    pieces: [Bitboard; Piece::COUNT],
    colors: [Bitboard; Color::COUNT],
    empty: Bitboard,
    mailbox: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Returns a board with no pieces on it
    pub fn new() -> Board {
        Board {
            pieces: [Bitboard::EMPTY; Piece::COUNT],
            colors: [Bitboard::EMPTY; Color::COUNT],
            empty: Bitboard::FULL,
            mailbox: [None; Square::COUNT],
        }
    }

    /// Places a piece on an empty square
    pub fn add_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        debug_assert!(self.mailbox[sq as usize].is_none(), "{} is occupied", sq);
        self.pieces[piece as usize].toggle(sq);
        self.colors[color as usize].toggle(sq);
        self.empty.toggle(sq);
        self.mailbox[sq as usize] = Some(piece);
    }

    /// Takes the given piece off its square
    pub fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        debug_assert_eq!(self.piece_at(sq), Some((color, piece)));
        self.pieces[piece as usize].toggle(sq);
        self.colors[color as usize].toggle(sq);
        self.empty.toggle(sq);
        self.mailbox[sq as usize] = None;
    }

    /// Makes a move for `color` on the board without any check of its legality
    pub fn make_move(&mut self, mv: Move, color: Color) {
        let piece = mv.piece();

        self.remove_piece(mv.from(), color, piece);
        if let Some(captured) = mv.captured() {
            self.remove_piece(mv.captured_square(), !color, captured);
        }
        self.add_piece(mv.to(), color, mv.promotion().unwrap_or(piece));

        if mv.is_castle() {
            let (rook_from, rook_to) = mv.castle_rook_squares();
            self.remove_piece(rook_from, color, Piece::Rook);
            self.add_piece(rook_to, color, Piece::Rook);
        }
    }

    /// Takes back a move made by [`make_move`](#method.make_move)
    pub fn unmake_move(&mut self, mv: Move, color: Color) {
        let piece = mv.piece();

        if mv.is_castle() {
            let (rook_from, rook_to) = mv.castle_rook_squares();
            self.remove_piece(rook_to, color, Piece::Rook);
            self.add_piece(rook_from, color, Piece::Rook);
        }

        self.remove_piece(mv.to(), color, mv.promotion().unwrap_or(piece));
        if let Some(captured) = mv.captured() {
            self.add_piece(mv.captured_square(), !color, captured);
        }
        self.add_piece(mv.from(), color, piece);
    }

    /// Returns the color and type of the piece on `sq`
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.mailbox[sq as usize].map(|p| {
            if self.colors[Color::White as usize].contains(sq) {
                (Color::White, p)
            } else {
                (Color::Black, p)
            }
        })
    }

    /// Returns the type of the piece on `sq`
    pub fn piece_type_at(&self, sq: Square) -> Option<Piece> {
        self.mailbox[sq as usize]
    }

    /// All occupied squares
    pub fn occupied(&self) -> Bitboard {
        !self.empty
    }

    /// Squares occupied by `color`
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.colors[color as usize]
    }

    /// Squares occupied by pieces of type `piece` of either color
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.pieces[piece as usize]
    }

    /// Squares occupied by `color`'s pieces of type `piece`
    pub fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[piece as usize] & self.colors[color as usize]
    }

    /// Unoccupied squares
    pub fn empty(&self) -> Bitboard {
        self.empty
    }

    /// The square of `color`'s king, if it has one
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color, Piece::King).peek()
    }

    /// Returns the pieces of color `by` which attack `sq`, with sliders seeing through nothing
    /// but the board's own occupancy
    pub fn attackers(&self, sq: Square, by: Color) -> Bitboard {
        self.attackers_with(sq, by, self.occupied())
    }

    /// Like [`attackers`](#method.attackers), but for a hypothetical occupancy `occ`
    pub fn attackers_with(&self, sq: Square, by: Color, occ: Bitboard) -> Bitboard {
        use Piece::*;

        let target = Bitboard::from(sq);
        let [left, right] = (!by).pawn_attack_directions();
        let queens = self.pieces_of(by, Queen);

        (target.shift(left) | target.shift(right)) & self.pieces_of(by, Pawn)
            | knight_attacks(sq) & self.pieces_of(by, Knight)
            | king_attacks(sq) & self.pieces_of(by, King)
            | bishop_attacks(sq, occ) & (self.pieces_of(by, Bishop) | queens)
            | rook_attacks(sq, occ) & (self.pieces_of(by, Rook) | queens)
    }

    /// Returns `true` if any piece of color `by` attacks `sq`
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        !self.attackers(sq, by).is_empty()
    }

    /// Returns `true` if neither side can possibly deliver checkmate
    ///
    /// Any pawn, rook or queen keeps the position alive. Otherwise, with at most one minor piece
    /// per side the position is dead. With more minor pieces, any knight keeps it alive, and a
    /// set of bishops is dead only when they all stand on squares of one color.
    pub fn is_dead_position(&self) -> bool {
        use Piece::*;

        if !(self.pieces(Pawn) | self.pieces(Rook) | self.pieces(Queen)).is_empty() {
            return false;
        }

        let minors = |c| (self.pieces_of(c, Knight) | self.pieces_of(c, Bishop)).len();
        if minors(Color::White) <= 1 && minors(Color::Black) <= 1 {
            return true;
        }

        if !self.pieces(Knight).is_empty() {
            return false;
        }

        let bishops = self.pieces(Bishop);
        bishops.is_subset(Bitboard::LIGHT_SQUARES) || bishops.is_subset(Bitboard::DARK_SQUARES)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    /// Draws the board with rank 8 at the top, using FEN letters and `.` for empty squares
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in (0..Rank::COUNT).rev() {
            let rank = Rank::try_from(r).expect("INFALLIBLE");
            write!(f, "{} ", rank)?;

            for file in 0..File::COUNT {
                let sq = Square::from_coord(File::try_from(file).expect("INFALLIBLE"), rank);
                let ch = match self.piece_at(sq) {
                    Some((c, p)) => p.to_char(c),
                    None => '.',
                };
                write!(f, " {}", ch)?;
            }

            writeln!(f)?;
        }

        write!(f, "   a b c d e f g h")
    }
}
