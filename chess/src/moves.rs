//! Contains the packed representation of a chess move
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::convert::TryFrom;
use super::*;

const SQUARE_MASK: u32 = 0x3f;
const PIECE_MASK: u32 = 0x7;
const NO_PIECE: u32 = 7;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const CAPTURED_SHIFT: u32 = 15;
const PROMOTION_SHIFT: u32 = 18;

const DOUBLE_PUSH: u32 = 1 << 21;
const CASTLE: u32 = 1 << 22;
const EN_PASSANT: u32 = 1 << 23;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move packed into 32 bits
///
/// | bits  | field                                   |
/// |-------|-----------------------------------------|
/// | 0-5   | origin square                           |
/// | 6-11  | destination square                      |
/// | 12-14 | moving piece                            |
/// | 15-17 | captured piece, or 7 if none            |
/// | 18-20 | promotion piece, or 7 if none           |
/// | 21    | two-square pawn advance                 |
/// | 22    | castling (origin and destination are the king's squares) |
/// | 23    | en passant capture                      |
///
/// A `Move` carries everything needed to make it on a [`Board`](struct.Board.html) and to take it
/// back again, but nothing ties it to a particular position. Making a move that was not generated
/// for the current position leaves the board in an unspecified state.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    fn pack(from: Square, to: Square, piece: Piece, captured: Option<Piece>, flags: u32) -> Move {
        let captured = captured.map_or(NO_PIECE, |p| p as u32);

        Move(
            (from as u32) << FROM_SHIFT
                | (to as u32) << TO_SHIFT
                | (piece as u32) << PIECE_SHIFT
                | captured << CAPTURED_SHIFT
                | NO_PIECE << PROMOTION_SHIFT
                | flags
        )
    }

    fn field(self, shift: u32, mask: u32) -> u32 {
        (self.0 >> shift) & mask
    }

    /// A move of `piece` to an empty square
    pub fn basic(from: Square, to: Square, piece: Piece) -> Move {
        Move::pack(from, to, piece, None, 0)
    }

    /// A move of `piece` capturing `captured` on the destination square
    pub fn capture(from: Square, to: Square, piece: Piece, captured: Piece) -> Move {
        Move::pack(from, to, piece, Some(captured), 0)
    }

    /// A two-square pawn advance
    pub fn double_push(from: Square, to: Square) -> Move {
        Move::pack(from, to, Piece::Pawn, None, DOUBLE_PUSH)
    }

    /// A castling move, given as the king's origin and destination
    pub fn castle(from: Square, to: Square) -> Move {
        Move::pack(from, to, Piece::King, None, CASTLE)
    }

    /// An en passant capture, given as the capturing pawn's origin and destination
    pub fn en_passant(from: Square, to: Square) -> Move {
        Move::pack(from, to, Piece::Pawn, Some(Piece::Pawn), EN_PASSANT)
    }

    /// Returns the same move promoting to `promotion`
    pub fn with_promotion(self, promotion: Piece) -> Move {
        let cleared = self.0 & !(PIECE_MASK << PROMOTION_SHIFT);
        Move(cleared | (promotion as u32) << PROMOTION_SHIFT)
    }

    /// The square the piece moves from
    pub fn from(self) -> Square {
        Square::try_from(self.field(FROM_SHIFT, SQUARE_MASK) as usize).expect("INFALLIBLE")
    }

    /// The square the piece moves to
    pub fn to(self) -> Square {
        Square::try_from(self.field(TO_SHIFT, SQUARE_MASK) as usize).expect("INFALLIBLE")
    }

    /// The piece being moved
    pub fn piece(self) -> Piece {
        Piece::try_from(self.field(PIECE_SHIFT, PIECE_MASK) as usize).expect("INFALLIBLE")
    }

    /// The piece being captured, if any
    pub fn captured(self) -> Option<Piece> {
        Piece::try_from(self.field(CAPTURED_SHIFT, PIECE_MASK) as usize).ok()
    }

    /// The piece being promoted to, if any
    pub fn promotion(self) -> Option<Piece> {
        Piece::try_from(self.field(PROMOTION_SHIFT, PIECE_MASK) as usize).ok()
    }

    /// Returns `true` if the move captures a piece
    pub fn is_capture(self) -> bool {
        self.field(CAPTURED_SHIFT, PIECE_MASK) != NO_PIECE
    }

    /// Returns `true` if the move promotes a pawn
    pub fn is_promotion(self) -> bool {
        self.field(PROMOTION_SHIFT, PIECE_MASK) != NO_PIECE
    }

    /// Returns `true` for moves which are neither captures nor promotions
    pub fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    /// Returns `true` for a two-square pawn advance
    pub fn is_double_push(self) -> bool {
        self.0 & DOUBLE_PUSH != 0
    }

    /// Returns `true` for castling
    pub fn is_castle(self) -> bool {
        self.0 & CASTLE != 0
    }

    /// Returns `true` for an en passant capture
    pub fn is_en_passant(self) -> bool {
        self.0 & EN_PASSANT != 0
    }

    /// The square of the captured piece, which for en passant is behind the destination
    pub fn captured_square(self) -> Square {
        if self.is_en_passant() {
            Square::from_coord(self.to().file(), self.from().rank())
        } else {
            self.to()
        }
    }

    /// For castling, the rook's origin and destination squares
    pub fn castle_rook_squares(self) -> (Square, Square) {
        let rank = self.from().rank();

        if self.to().file() == File::G {
            (Square::from_coord(File::H, rank), Square::from_coord(File::F, rank))
        } else {
            (Square::from_coord(File::A, rank), Square::from_coord(File::D, rank))
        }
    }

    /// The packed representation
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.promotion() {
            Some(p) => write!(f, "{}{}{}", self.from(), self.to(), p.to_char(Color::Black)),
            None => write!(f, "{}{}", self.from(), self.to()),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.piece(), self.from())?;
        match self.captured() {
            Some(p) => write!(f, "x{}{}", p, self.to())?,
            None => write!(f, "-{}", self.to())?,
        }
        if let Some(p) = self.promotion() {
            write!(f, "={}", p)?;
        }
        if self.is_castle() {
            write!(f, " (castle)")?;
        } else if self.is_en_passant() {
            write!(f, " (ep)")?;
        } else if self.is_double_push() {
            write!(f, " (double)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_decode_to_what_was_packed() {
        let mv = Move::capture(Square::G7, Square::H8, Piece::Pawn, Piece::Rook)
            .with_promotion(Piece::Knight);
        assert_eq!(mv.from(), Square::G7);
        assert_eq!(mv.to(), Square::H8);
        assert_eq!(mv.piece(), Piece::Pawn);
        assert_eq!(mv.captured(), Some(Piece::Rook));
        assert_eq!(mv.promotion(), Some(Piece::Knight));
        assert!(mv.is_capture());
        assert!(mv.is_promotion());
        assert!(!mv.is_quiet());
        assert!(!mv.is_castle() && !mv.is_en_passant() && !mv.is_double_push());

        // promotion can be replaced
        assert_eq!(mv.with_promotion(Piece::Queen).promotion(), Some(Piece::Queen));
        assert_eq!(mv.with_promotion(Piece::Queen).captured(), Some(Piece::Rook));
    }

    #[test]
    fn builders_set_exactly_one_shape() {
        // 1. basic
        let mv = Move::basic(Square::G1, Square::F3, Piece::Knight);
        assert!(mv.is_quiet());
        assert_eq!(mv.captured(), None);
        assert_eq!(mv.promotion(), None);
        assert_eq!(mv.captured_square(), Square::F3);

        // 2. double push
        let mv = Move::double_push(Square::E2, Square::E4);
        assert!(mv.is_double_push() && mv.is_quiet());
        assert_eq!(mv.piece(), Piece::Pawn);

        // 3. castle
        let mv = Move::castle(Square::E8, Square::C8);
        assert!(mv.is_castle() && mv.is_quiet());
        assert_eq!(mv.piece(), Piece::King);
        assert_eq!(mv.castle_rook_squares(), (Square::A8, Square::D8));
        assert_eq!(Move::castle(Square::E1, Square::G1).castle_rook_squares(), (Square::H1, Square::F1));

        // 4. en passant
        let mv = Move::en_passant(Square::E5, Square::D6);
        assert!(mv.is_en_passant() && mv.is_capture());
        assert_eq!(mv.captured(), Some(Piece::Pawn));
        assert_eq!(mv.captured_square(), Square::D5);
    }

    #[test]
    fn display_uses_coordinate_notation() {
        assert_eq!(Move::double_push(Square::E2, Square::E4).to_string(), "e2e4");
        assert_eq!(
            Move::basic(Square::E7, Square::E8, Piece::Pawn).with_promotion(Piece::Queen).to_string(),
            "e7e8q"
        );
        assert_eq!(format!("{:?}", Move::capture(Square::B5, Square::C6, Piece::Bishop, Piece::Knight)),
            "Bb5xNc6");
    }

    #[test]
    fn distinct_moves_pack_differently() {
        let a = Move::basic(Square::E7, Square::E8, Piece::Pawn).with_promotion(Piece::Queen);
        let b = Move::basic(Square::E7, Square::E8, Piece::Pawn).with_promotion(Piece::Rook);
        assert_ne!(a, b);
        assert_ne!(a.bits(), b.bits());
    }
}
