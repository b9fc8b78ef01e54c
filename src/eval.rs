//! Static evaluation of chess positions
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use chess::{Board, Color, Piece, Position, Square, Termination};
use crate::search::{Evaluator, Score};

const PIECE_VAL: [i16; Piece::COUNT] = [ 100, 320, 330, 500, 1000, 0 ];

// Tables are from white's point of view, indexed a1, b1, ..., h8. Black squares are mirrored
// across the middle of the board.
const PIECE_SQUARE_VAL: [[i16; Square::COUNT]; Piece::COUNT] = [
    [ // Pawn
     //  a    b    c    d    e    f    g    h
         0,   0,   0,   0,   0,   0,   0,   0, // 1
         5,  10,  10, -25, -30,  10,  10,   5, // 2
         4,  -5,  -5,   5,   4, -10,  -5,   4, // 3
        -5,  -2,   2,  15,  16,   0,  -2,  -5, // 4
         5,   7,  10,  20,  20,  10,   7,   5, // 5
        10,  15,  20,  30,  30,  20,  15,  10, // 6
        70,  70,  70,  70,  70,  70,  70,  70, // 7
         0,   0,   0,   0,   0,   0,   0,   0, // 8
    ],
    [ // Knight
     //  a    b    c    d    e    f    g    h
       -40, -30, -20, -20, -20, -20, -30, -40, // 1
       -30, -10,   0,   5,   5,   0, -10, -30, // 2
       -20,   7,  10,  12,  12,  10,   7, -20, // 3
       -20,   5,  15,  20,  20,  15,   5, -20, // 4
       -20,   5,  15,  25,  25,  15,   5, -20, // 5
       -20,   7,  12,  15,  15,  12,   7, -20, // 6
       -30, -10,   0,   0,   0,   0, -10, -30, // 7
       -40, -30, -20, -20, -20, -20, -30, -40, // 8
    ],
    [ // Bishop
     //  a    b    c    d    e    f    g    h
       -20, -10, -50, -10, -10, -50, -10, -20, // 1
        -7,   5,   0,   0,   0,   0,  15, -10, // 2
       -10,  13,  10,   5,   5,  10,  10, -10, // 3
       -10,   5,  13,  10,  10,  10,   5, -10, // 4
       -10,   5,   7,  13,  10,   7,   5, -10, // 5
       -10,   0,   5,   7,  10,   5,   0, -10, // 6
       -10,   0,   0,   2,   2,   2,   0,  -7, // 7
       -20, -10, -10, -10, -10, -10, -10, -20, // 8
    ],
    [ // Rook
     //  a    b    c    d    e    f    g    h
       -20, -10,  20,  30,  30,  20, -20, -30, // 1
       -10,   5,  10,  10,  10,  10,   5, -10, // 2
        10,   5,   0,   0,   0,   0,   5,  10, // 3
        10,   5,   0,   0,   0,   0,   5,  10, // 4
        10,   5,   0,   0,   0,   0,   5,  10, // 5
        10,   5,   0,   0,   0,   0,   5,  10, // 6
        20,  30,  40,  50,  50,  40,  30,  20, // 7
        10,  10,  20,  40,  40,  20,  10,  10, // 8
    ],
    [ 0; Square::COUNT ], // Queen
    [ 0; Square::COUNT ], // King
];

const MID_KING_TABLE: [i16; Square::COUNT] = [
     //  a    b    c    d    e    f    g    h
        20,  30,  10,   0,   0,  10,  40,  20, // 1
        10,  10,   0, -10, -10,   0,  10,  10, // 2
       -10, -20, -20, -20, -20, -20, -20, -10, // 3
       -30, -30, -30, -30, -30, -30, -30, -30, // 4
       -40, -40, -40, -40, -40, -40, -40, -40, // 5
       -50, -50, -50, -50, -50, -50, -50, -50, // 6
       -60, -60, -60, -60, -60, -60, -60, -60, // 7
       -70, -70, -70, -70, -70, -70, -70, -70, // 8
];

const END_KING_TABLE: [i16; Square::COUNT] = [
     //  a    b    c    d    e    f    g    h
       -50, -40, -30, -20, -20, -30, -40, -50, // 1
       -40, -30, -20, -10, -10, -20, -30, -40, // 2
       -30, -20,  20,  30,  30,  20, -20, -30, // 3
       -20, -10,  30,  50,  50,  30, -10, -20, // 4
       -20, -10,  30,  50,  50,  30, -10, -20, // 5
       -30, -20,  20,  30,  30,  20, -20, -30, // 6
       -40, -30, -20, -10, -10, -20, -30, -40, // 7
       -50, -40, -30, -20, -20, -30, -40, -50, // 8
];

/// Returns the value of a piece.
pub fn piece_val(piece: Piece) -> i16 {
    PIECE_VAL[piece as usize]
}

/// Index into the tables for a square seen from `color`'s side of the board
fn table_index(color: Color, sq: Square) -> usize {
    match color {
        Color::White => sq as usize,
        Color::Black => sq as usize ^ 0o70,
    }
}

/// Returns the material and placement score of a board from white's point of view.
///
/// The king moves from its middlegame table to its endgame table as the material comes off.
/// The result never reaches the mate scores.
pub fn material(board: &Board) -> Score {
    use Piece::*;

    let mut val = [0; Color::COUNT];
    let mut total_piece_val = 0;

    for color in Color::ALL.iter().copied() {
        for piece in [Pawn, Knight, Bishop, Rook, Queen].iter().copied() {
            for sq in board.pieces_of(color, piece) {
                val[color as usize] += PIECE_VAL[piece as usize]
                    + PIECE_SQUARE_VAL[piece as usize][table_index(color, sq)];
                total_piece_val += PIECE_VAL[piece as usize];
            }
        }
    }

    for color in Color::ALL.iter().copied() {
        if let Some(sq) = board.king_square(color) {
            let i = table_index(color, sq);

            val[color as usize] += if total_piece_val > 3*PIECE_VAL[Queen as usize] {
                MID_KING_TABLE[i]
            } else if total_piece_val > 2*PIECE_VAL[Queen as usize] {
                (MID_KING_TABLE[i] + END_KING_TABLE[i])/2
            } else {
                END_KING_TABLE[i]
            };
        }
    }

    Score::from(val[Color::White as usize] - val[Color::Black as usize]).clamp_static()
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Scores chess positions by material and piece placement, with white maximizing
///
/// Checkmate scores as a mate for the side which delivered it; every other finished game is a
/// draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Material;

impl Evaluator<Position> for Material {
    fn evaluate(&self, pos: &Position) -> Score {
        match pos.termination() {
            Some(Termination::Checkmate) => match pos.turn() {
                Color::White => -Score::MATE,
                Color::Black => Score::MATE,
            },
            Some(_) => Score::DRAW,
            None => material(pos.board()),
        }
    }
}
