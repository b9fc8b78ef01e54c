//! Attack analysis and legal move generation
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Moves are generated fully legal in one pass. Before any move is emitted the generator works out,
//! for the side to move:
//!
//!  -  which squares the opponent attacks, looking through the king so that it cannot step back
//!     along a checking line;
//!  -  which pieces give check, and the squares between the king and a checking slider;
//!  -  which pieces are pinned to the king, and along which axis.
//!
//! From those, every piece's destinations are masked down to the legal ones.
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use super::*;
use bitboard::*;
use Piece::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Generates legal moves, keeping the attack analysis of the last position it ran on
///
/// The analysis is replaced on every call to [`generate`](#method.generate). The accessors only
/// describe the position most recently generated for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveGenerator {
    attacked: Bitboard,
    checkers: Bitboard,
    check_ray: Bitboard,
    pinned: Bitboard,
    pins: [Bitboard; Axis::COUNT],
    targets: Bitboard,
}

impl MoveGenerator {
    /// Creates a generator with an empty analysis
    pub fn new() -> MoveGenerator {
        Default::default()
    }

    /// Squares attacked by the side not to move, as if the moving king were not on the board
    pub fn attacked(&self) -> Bitboard {
        self.attacked
    }

    /// Pieces giving check
    pub fn checkers(&self) -> Bitboard {
        self.checkers
    }

    /// Empty squares between the king and a checking slider
    pub fn check_ray(&self) -> Bitboard {
        self.check_ray
    }

    /// Pieces of the side to move which are pinned to their king
    pub fn pinned(&self) -> Bitboard {
        self.pinned
    }

    /// The lines along `axis` to which pinned pieces are confined, from the king up to and
    /// including the pinning piece
    pub fn pins(&self, axis: Axis) -> Bitboard {
        self.pins[axis as usize]
    }

    /// Squares a piece other than the king may move to: any square not occupied by the side to
    /// move when not in check, the checker and the squares between it and the king when in single
    /// check, and nothing in double check
    pub fn targets(&self) -> Bitboard {
        self.targets
    }

    /// Returns `true` if the side to move is in check
    pub fn is_check(&self) -> bool {
        !self.checkers.is_empty()
    }

    /// Returns `true` if the side to move is in check from two pieces at once
    pub fn is_double_check(&self) -> bool {
        self.checkers.len() > 1
    }

    /// Replaces `moves` with the legal moves for `turn`
    ///
    /// Moves come out grouped by piece: king moves first, then pawns, knights, bishops, rooks,
    /// queens, and castling last. In double check only king moves are generated.
    pub fn generate(
        &mut self,
        board: &Board,
        turn: Color,
        castling: CastlingRights,
        ep: Option<Square>,
        moves: &mut Vec<Move>,
    ) {
        moves.clear();
        self.analyze(board, turn);

        let king = match board.king_square(turn) {
            Some(king) => king,
            None => return,
        };

        self.king_moves(board, turn, king, moves);
        if self.is_double_check() {
            return;
        }

        self.pawn_moves(board, turn, moves);
        if let Some(ep) = ep {
            self.en_passant(board, turn, king, ep, moves);
        }

        let occ = board.occupied();
        for &piece in &[Knight, Bishop, Rook, Queen] {
            for from in board.pieces_of(turn, piece) {
                let attacks = match piece {
                    Knight => knight_attacks(from),
                    Bishop => bishop_attacks(from, occ),
                    Rook => rook_attacks(from, occ),
                    _ => queen_attacks(from, occ),
                };

                for to in attacks & self.targets & self.pin_line(from) {
                    moves.push(step(board, from, to, piece));
                }
            }
        }

        if !self.is_check() {
            self.castling(board, turn, king, castling, moves);
        }
    }

    fn analyze(&mut self, board: &Board, us: Color) {
        let them = !us;
        let ours = board.occupied_by(us);
        let theirs = board.occupied_by(them);
        let king = board.king_square(us);
        let king_bb = king.map_or(Bitboard::EMPTY, Bitboard::from);
        let see_through_king = board.occupied() - king_bb;

        let diagonal = board.pieces_of(them, Bishop) | board.pieces_of(them, Queen);
        let orthogonal = board.pieces_of(them, Rook) | board.pieces_of(them, Queen);
        let their_pawns = board.pieces_of(them, Pawn);

        let [left, right] = them.pawn_attack_directions();
        self.attacked = their_pawns.shift(left) | their_pawns.shift(right);
        for sq in board.pieces_of(them, Knight) {
            self.attacked |= knight_attacks(sq);
        }
        if let Some(sq) = board.king_square(them) {
            self.attacked |= king_attacks(sq);
        }
        for sq in diagonal {
            self.attacked |= bishop_attacks(sq, see_through_king);
        }
        for sq in orthogonal {
            self.attacked |= rook_attacks(sq, see_through_king);
        }

        self.checkers = Bitboard::EMPTY;
        self.check_ray = Bitboard::EMPTY;
        self.pinned = Bitboard::EMPTY;
        self.pins = [Bitboard::EMPTY; Axis::COUNT];

        if let Some(king) = king {
            let [left, right] = us.pawn_attack_directions();
            self.checkers |= (king_bb.shift(left) | king_bb.shift(right)) & their_pawns;
            self.checkers |= knight_attacks(king) & board.pieces_of(them, Knight);

            for &dir in Direction::COMPASS.iter() {
                let axis = dir.axis().expect("INFALLIBLE");
                let sliders = if axis.is_orthogonal() { orthogonal } else { diagonal };

                // passes through our own pieces and stops on the first of theirs
                let ray = king_bb.slide(dir, !theirs);
                let end = ray & theirs;
                if end.is_disjoint(sliders) {
                    continue;
                }

                let between = ray - end;
                let blockers = between & ours;
                match blockers.len() {
                    0 => {
                        self.checkers |= end;
                        self.check_ray |= between;
                    }
                    1 => {
                        self.pinned |= blockers;
                        self.pins[axis as usize] |= ray;
                    }
                    _ => {}
                }
            }
        }

        self.targets = match self.checkers.len() {
            0 => !ours,
            1 => self.checkers | self.check_ray,
            _ => Bitboard::EMPTY,
        };
    }

    /// The squares a piece on `sq` may stay within: its pin line if it is pinned, otherwise
    /// the whole board
    fn pin_line(&self, sq: Square) -> Bitboard {
        if !self.pinned.contains(sq) {
            return Bitboard::FULL;
        }

        self.pins.iter().copied().find(|line| line.contains(sq)).unwrap_or(Bitboard::EMPTY)
    }

    /// Destinations of pawns shifted in `dir`, honoring pins along the axis of `dir`
    fn pawn_shift(&self, pawns: Bitboard, dir: Direction) -> Bitboard {
        let pins = self.pins[dir.axis().expect("INFALLIBLE") as usize];
        (pawns - self.pinned).shift(dir) | ((pawns & pins).shift(dir) & pins)
    }

    fn king_moves(&self, board: &Board, us: Color, king: Square, moves: &mut Vec<Move>) {
        for to in king_attacks(king) - board.occupied_by(us) - self.attacked {
            moves.push(step(board, king, to, King));
        }
    }

    fn pawn_moves(&self, board: &Board, us: Color, moves: &mut Vec<Move>) {
        let pawns = board.pieces_of(us, Pawn);
        let empty = board.empty();
        let forward = us.forward();
        let promotion = Bitboard::from(us.promotion_rank());
        let third_rank = Bitboard::from(us.pawn_start_rank()).shift(forward);

        let single = self.pawn_shift(pawns, forward) & empty;
        for to in single & self.targets {
            push_pawn(moves, board, origin(to, forward), to, promotion.contains(to));
        }

        let double = (single & third_rank).shift(forward) & empty & self.targets;
        for to in double {
            let from = origin(origin(to, forward), forward);
            moves.push(Move::double_push(from, to));
        }

        let theirs = board.occupied_by(!us);
        for &dir in us.pawn_attack_directions().iter() {
            for to in self.pawn_shift(pawns, dir) & theirs & self.targets {
                push_pawn(moves, board, origin(to, dir), to, promotion.contains(to));
            }
        }
    }

    fn en_passant(&self, board: &Board, us: Color, king: Square, ep: Square, moves: &mut Vec<Move>) {
        let them = !us;
        let victim = match ep.offset(us.backward()) {
            Some(sq) => sq,
            None => return,
        };

        if !board.empty().contains(ep) || !board.pieces_of(them, Pawn).contains(victim) {
            return;
        }

        // the capture must resolve any check, by blocking or by taking the checker
        if !self.targets.contains(ep) && !self.checkers.contains(victim) {
            return;
        }

        let diagonal = board.pieces_of(them, Bishop) | board.pieces_of(them, Queen);
        let orthogonal = board.pieces_of(them, Rook) | board.pieces_of(them, Queen);

        for &dir in us.pawn_attack_directions().iter() {
            let from = match ep.offset(dir.opposite()) {
                Some(sq) if board.pieces_of(us, Pawn).contains(sq) => sq,
                _ => continue,
            };

            if self.pinned.contains(from) {
                let axis = dir.axis().expect("INFALLIBLE");
                if !self.pins[axis as usize].contains(ep) {
                    continue;
                }
            }

            // both pawns leave the rank at once, which can expose the king along it
            let occ = (board.occupied() - Bitboard::from(from) - victim.into()) | ep.into();
            let exposed = rook_attacks(king, occ) & orthogonal | bishop_attacks(king, occ) & diagonal;
            if !exposed.is_empty() {
                continue;
            }

            moves.push(Move::en_passant(from, ep));
        }
    }

    fn castling(
        &self,
        board: &Board,
        us: Color,
        king: Square,
        rights: CastlingRights,
        moves: &mut Vec<Move>,
    ) {
        let rank = us.back_rank();
        let at = |file| Square::from_coord(file, rank);

        if king != at(File::E) {
            return;
        }

        let rooks = board.pieces_of(us, Rook);
        let sides = [
            (CastlingRights::kingside(us), File::H, File::G, &[File::F, File::G][..], &[File::F, File::G][..]),
            (CastlingRights::queenside(us), File::A, File::C, &[File::B, File::C, File::D][..], &[File::C, File::D][..]),
        ];

        for &(right, rook_file, dest, empty, safe) in sides.iter() {
            if !rights.contains(right) || !rooks.contains(at(rook_file)) {
                continue;
            }
            if empty.iter().any(|&f| !board.empty().contains(at(f))) {
                continue;
            }
            if safe.iter().any(|&f| self.attacked.contains(at(f))) {
                continue;
            }

            moves.push(Move::castle(king, at(dest)));
        }
    }
}

/// The square one step back from `to` against `dir`
fn origin(to: Square, dir: Direction) -> Square {
    Square::try_from((to as i8 - dir.offset()) as usize).expect("INFALLIBLE")
}

/// A non-pawn move to `to`, capturing whatever stands there
fn step(board: &Board, from: Square, to: Square, piece: Piece) -> Move {
    match board.piece_type_at(to) {
        Some(captured) => Move::capture(from, to, piece, captured),
        None => Move::basic(from, to, piece),
    }
}

fn push_pawn(moves: &mut Vec<Move>, board: &Board, from: Square, to: Square, promotes: bool) {
    let mv = step(board, from, to, Pawn);

    if promotes {
        for &p in Piece::PROMOTIONS.iter() {
            moves.push(mv.with_promotion(p));
        }
    } else {
        moves.push(mv);
    }
}
