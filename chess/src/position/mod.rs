//! Contains structures related to the `Position`.
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryInto;
use std::fmt;
use std::ops;
use std::str::FromStr;
use lazy_static::lazy_static;
use regex::Regex;
use super::*;

use bitboard::*;

use Color::*;
use Piece::*;

pub mod zobrist;
use zobrist::Zobrist;

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Once the half-move clock reaches this value no further moves are generated
pub const DRAW_CLOCK: u32 = 50;

lazy_static! {
    static ref MOVE_TEXT: Regex =
        Regex::new("^([a-h][1-8])([a-h][1-8])([qrbnQRBN]?)$").expect("INFALLIBLE");
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The castling rights of both sides, as a 4-bit mask
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// The number of distinct sets of rights
    pub const COUNT: usize = 16;

    /// No castling rights
    pub const NONE: CastlingRights = CastlingRights(0);
    /// White may castle king-side (`K`)
    pub const WHITE_KINGSIDE: CastlingRights = CastlingRights(1);
    /// White may castle queen-side (`Q`)
    pub const WHITE_QUEENSIDE: CastlingRights = CastlingRights(2);
    /// Black may castle king-side (`k`)
    pub const BLACK_KINGSIDE: CastlingRights = CastlingRights(4);
    /// Black may castle queen-side (`q`)
    pub const BLACK_QUEENSIDE: CastlingRights = CastlingRights(8);
    /// Every castling right
    pub const ALL: CastlingRights = CastlingRights(15);

    /// The king-side right of color `c`
    pub fn kingside(c: Color) -> CastlingRights {
        match c {
            White => CastlingRights::WHITE_KINGSIDE,
            Black => CastlingRights::BLACK_KINGSIDE,
        }
    }

    /// The queen-side right of color `c`
    pub fn queenside(c: Color) -> CastlingRights {
        match c {
            White => CastlingRights::WHITE_QUEENSIDE,
            Black => CastlingRights::BLACK_QUEENSIDE,
        }
    }

    /// The rights which survive a move from or to `sq`
    ///
    /// Touching a king's home square clears both of that side's rights, and touching a rook's home
    /// square clears the one right it belongs to, whether or not the piece is still there.
    pub fn kept_after_touching(sq: Square) -> CastlingRights {
        let lost = match sq {
            Square::E1 => CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE,
            Square::H1 => CastlingRights::WHITE_KINGSIDE,
            Square::A1 => CastlingRights::WHITE_QUEENSIDE,
            Square::E8 => CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE,
            Square::H8 => CastlingRights::BLACK_KINGSIDE,
            Square::A8 => CastlingRights::BLACK_QUEENSIDE,
            _ => CastlingRights::NONE,
        };

        !lost
    }

    /// Returns `true` if every right in `other` is also in `self`
    pub fn contains(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no castling is allowed
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Adds the rights in `other`
    pub fn insert(&mut self, other: CastlingRights) {
        self.0 |= other.0;
    }

    /// Removes the rights in `other`
    pub fn remove(&mut self, other: CastlingRights) {
        self.0 &= !other.0;
    }

    /// The underlying mask
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl ops::BitOr for CastlingRights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        CastlingRights(self.0 | rhs.0)
    }
}

impl ops::BitAnd for CastlingRights {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        CastlingRights(self.0 & rhs.0)
    }
}

impl ops::Not for CastlingRights {
    type Output = Self;

    fn not(self) -> Self::Output {
        CastlingRights(!self.0 & CastlingRights::ALL.0)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return "-".fmt(f);
        }

        let mut s = String::with_capacity(4);
        for (right, ch) in &[
            (CastlingRights::WHITE_KINGSIDE, 'K'),
            (CastlingRights::WHITE_QUEENSIDE, 'Q'),
            (CastlingRights::BLACK_KINGSIDE, 'k'),
            (CastlingRights::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.contains(*right) {
                s.push(*ch);
            }
        }
        s.fmt(f)
    }
}

impl FromStr for CastlingRights {
    type Err = ParseFenError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "-" {
            return Ok(CastlingRights::NONE);
        }
        if s.is_empty() {
            return Err(ParseFenError::ParseCastling);
        }

        let mut rights = CastlingRights::NONE;
        for c in s.chars() {
            match c {
                'K' => rights.insert(CastlingRights::WHITE_KINGSIDE),
                'Q' => rights.insert(CastlingRights::WHITE_QUEENSIDE),
                'k' => rights.insert(CastlingRights::BLACK_KINGSIDE),
                'q' => rights.insert(CastlingRights::BLACK_QUEENSIDE),
                _ => return Err(ParseFenError::ParseCastling),
            }
        }

        Ok(rights)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Why a game has ended
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The side to move is in check and has no legal move
    Checkmate,
    /// The side to move is not in check and has no legal move
    Stalemate,
    /// The half-move clock has reached its limit
    FiftyMoveClock,
    /// Neither side has the material to deliver mate
    InsufficientMaterial,
}

impl Termination {
    /// Returns `true` for every reason except checkmate
    pub fn is_draw(self) -> bool {
        self != Termination::Checkmate
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::FiftyMoveClock => "draw by the half-move clock",
            Termination::InsufficientMaterial => "draw by insufficient material",
        }.fmt(f)
    }
}

/// What is needed to take back one move
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Undo {
    mv: Move,
    castling: CastlingRights,
    ep_square: Option<Square>,
    half_move_clock: u32,
    zobrist: Zobrist,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A game in progress: the board plus everything else needed to know which moves are legal, and a
/// history of moves made so they can be taken back.
///
/// # Instantiation
///  -  The [`new`](#method.new) method creates a `Position` containing the standard starting
///     position.
///  -  The [`from_fen_str`](#method.from_fen_str) method (along with its synonyms `from_str` and
///     `str::parse`) creates a new `Position` from a string containing [Forsyth-Edwards
///     Notation (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
///
/// # Making Moves
/// A search makes and unmakes moves on a single `Position`, strictly last in, first out.
/// [`make_move`](#method.make_move) regenerates the legal moves of the new position straight
/// away, so [`moves`](#method.moves) is ready to use. [`unmake_move`](#method.unmake_move) does
/// not, since a search going back up the tree already holds the moves it was iterating over. Use
/// [`undo`](#method.undo) when the moves of the restored position are needed again.
///
/// ```rust
/// use chess::Position;
///
/// let mut pos = Position::new();
///
/// for mv in pos.moves().to_vec() {
///     pos.make_move(mv);
///     // do something useful
///     pos.unmake_move();
/// }
/// ```
///
/// Two positions compare equal when their boards, side to move, castling rights, en passant
/// squares and clocks are equal; the history and the cached moves are not compared.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    turn: Color,
    castling: CastlingRights,
    ep_square: Option<Square>,
    half_move_clock: u32,
    move_number: u32,
    zobrist: Zobrist,
    history: Vec<Undo>,
    generator: MoveGenerator,
    moves: Vec<Move>,
    stale: bool,
}

impl Position {
    /// Returns the standard starting position
    pub fn new() -> Position {
        Position::from_fen_str(START_FEN).expect("INFALLIBLE")
    }

    fn empty_board() -> Position {
        Position {
            board: Board::new(),
            turn: White,
            castling: CastlingRights::NONE,
            ep_square: None,
            half_move_clock: 0,
            move_number: 1,
            zobrist: Zobrist::new(),
            history: Vec::new(),
            generator: MoveGenerator::new(),
            moves: Vec::new(),
            stale: true,
        }
    }

    /// Parse a position from a FEN string
    ///
    /// The half-move clock and full-move number may be left off, and default to 0 and 1.
    pub fn from_fen_str(s: &str) -> std::result::Result<Position, ParseFenError> {
        use ParseFenError::*;

        let mut pos = Position::empty_board();
        let mut fields = s.split_whitespace();

        // parse the board
        let placement = fields.next().ok_or(Empty)?;
        let mut r = Rank::COUNT - 1;
        let mut f = 0;
        for c in placement.chars() {
            match c {
                '1' ..= '8' => {
                    f += c.to_digit(10).expect("INFALLIBLE") as usize;
                    if f > File::COUNT {
                        return Err(ParseBoard);
                    }
                }
                '/' => {
                    if f == File::COUNT && r > 0 {
                        r -= 1;
                        f = 0;
                    } else {
                        return Err(ParseBoard);
                    }
                }
                _ => {
                    let sq = match (f.try_into(), r.try_into()) {
                        (Ok(f), Ok(r)) => Square::from_coord(f, r),
                        _ => return Err(ParseBoard),
                    };
                    let (color, piece) = Piece::from_char(c)?;
                    pos.board.add_piece(sq, color, piece);
                    f += 1;
                }
            }
        }
        if r > 0 || f < File::COUNT {
            return Err(ParseBoard);
        }

        // parse the turn
        pos.turn = fields.next().ok_or(ParseTurn)?.parse()?;

        // parse the castling rights
        pos.castling = fields.next().ok_or(ParseCastling)?.parse()?;

        // parse en passant square
        match fields.next() {
            Some("-") => {}
            Some(ep_square) => pos.ep_square = Some(ep_square.parse()?),
            None => return Err(ParseEnPassant),
        }

        // parse half move clock, if present
        if let Some(plies) = fields.next() {
            pos.half_move_clock = plies.parse().map_err(|_| ParseHalfMoveClock)?;
        }

        // parse move number, if present
        if let Some(move_number) = fields.next() {
            pos.move_number = move_number.parse().map_err(|_| ParseMoveNumber)?;
        }

        pos.validate()?;
        pos.zobrist = Zobrist::from_position(&pos);
        pos.generate_moves();

        Ok(pos)
    }

    fn validate(&self) -> std::result::Result<(), ParseFenError> {
        use ParseFenError::*;

        let board = &self.board;

        for &c in Color::ALL.iter() {
            // Step 1: verify exactly one king per side
            if board.pieces_of(c, King).len() != 1 {
                return Err(KingCount);
            }
            // Step 2: no pawns on ranks 1 and 8
            if board.pieces_of(c, Pawn).intersects(Bitboard::RANK_1 | Bitboard::RANK_8) {
                return Err(InvalidPawnRank);
            }
        }

        // Step 3: opponent's king is not attacked
        let their_king = board.king_square(!self.turn).ok_or(KingCount)?;
        if board.is_attacked(their_king, self.turn) {
            return Err(KingCapturable);
        }

        // Step 4: if there is an EP square, it must be empty and a pawn must have just passed it
        if let Some(ep) = self.ep_square {
            let expected = if self.turn == White { Rank::R6 } else { Rank::R3 };
            let passed = ep.offset(self.turn.backward()).ok_or(EnPassantPawn)?;
            if ep.rank() != expected {
                return Err(EnPassantPawn);
            }
            if !board.empty().contains(ep) || !board.pieces_of(!self.turn, Pawn).contains(passed) {
                return Err(EnPassantPawn);
            }
        }

        // Step 5: if castling rights exist, king and rook must be on their home squares
        for &c in Color::ALL.iter() {
            let rank = c.back_rank();
            let home = |file| Square::from_coord(file, rank);
            let (kingside, queenside) = (CastlingRights::kingside(c), CastlingRights::queenside(c));

            if !self.castling.contains(kingside) && !self.castling.contains(queenside) {
                continue;
            }
            if !board.pieces_of(c, King).contains(home(File::E)) {
                return Err(InvalidCastling);
            }
            if self.castling.contains(kingside) && !board.pieces_of(c, Rook).contains(home(File::H)) {
                return Err(InvalidCastling);
            }
            if self.castling.contains(queenside) && !board.pieces_of(c, Rook).contains(home(File::A)) {
                return Err(InvalidCastling);
            }
        }

        Ok(())
    }

    /// Converts the position to a FEN string
    pub fn to_fen_str(&self) -> String {
        let mut placement = String::new();

        for r in (0..Rank::COUNT).rev() {
            let rank: Rank = r.try_into().expect("INFALLIBLE");
            let mut count = 0;

            for f in 0..File::COUNT {
                let sq = Square::from_coord(f.try_into().expect("INFALLIBLE"), rank);
                match self.board.piece_at(sq) {
                    Some((c, p)) => {
                        if count > 0 {
                            placement += &count.to_string();
                            count = 0;
                        }
                        placement.push(p.to_char(c));
                    }
                    None => count += 1,
                }
            }
            if count > 0 {
                placement += &count.to_string();
            }
            if r > 0 {
                placement.push('/');
            }
        }

        let ep_square = match self.ep_square {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!("{} {} {} {} {} {}", placement, self.turn, self.castling, ep_square,
                                     self.half_move_clock, self.move_number)
    }

    /// Returns the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the color whose turn it is
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the castling rights
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the square a pawn passed over on the last move, if the last move was a two-square
    /// advance
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the number of plies since the last pawn move or capture
    pub fn half_move_clock(&self) -> u32 {
        self.half_move_clock
    }

    /// Returns the full-move number, which starts at 1 and increases after each move by black
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Returns the Zobrist key of the position
    pub fn zobrist_key(&self) -> Zobrist {
        self.zobrist
    }

    /// Returns the number of moves that can be taken back
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns the last move made, if it has not been taken back
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|u| u.mv)
    }

    /// Returns the move generator along with its analysis from the last generation, for
    /// displaying attacked squares, pins and checks
    pub fn generator(&self) -> &MoveGenerator {
        &self.generator
    }

    /// Makes a move generated for this position, then generates the moves of the new position
    ///
    /// The move must come from [`moves`](#method.moves) or [`legal_moves`](#method.legal_moves)
    /// of this position; anything else leaves the position in an unspecified state.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.turn;

        self.history.push(Undo {
            mv,
            castling: self.castling,
            ep_square: self.ep_square,
            half_move_clock: self.half_move_clock,
            zobrist: self.zobrist,
        });

        self.board.make_move(mv, us);
        self.zobrist.toggle_move(mv, us);

        self.zobrist.toggle_castling_rights(self.castling);
        self.castling = self.castling
            & CastlingRights::kept_after_touching(mv.from())
            & CastlingRights::kept_after_touching(mv.to());
        self.zobrist.toggle_castling_rights(self.castling);

        if let Some(sq) = self.ep_square {
            self.zobrist.toggle_ep_square(sq);
        }
        self.ep_square = if mv.is_double_push() { mv.from().offset(us.forward()) } else { None };
        if let Some(sq) = self.ep_square {
            self.zobrist.toggle_ep_square(sq);
        }

        if mv.piece() == Pawn || mv.is_capture() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }

        if us == Black {
            self.move_number += 1;
        }
        self.turn = !us;
        self.zobrist.toggle_turn();

        self.generate_moves();
    }

    /// Takes back the last move, returning it, or `None` if there is no move to take back
    ///
    /// The moves of the restored position are not regenerated: [`moves`](#method.moves) is stale
    /// until [`generate_moves`](#method.generate_moves) is called.
    pub fn unmake_move(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;

        self.turn = !self.turn;
        if self.turn == Black {
            self.move_number -= 1;
        }
        self.board.unmake_move(undo.mv, self.turn);
        self.castling = undo.castling;
        self.ep_square = undo.ep_square;
        self.half_move_clock = undo.half_move_clock;
        self.zobrist = undo.zobrist;
        self.stale = true;

        Some(undo.mv)
    }

    /// Takes back the last move and regenerates the moves of the restored position
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.unmake_move();
        self.generate_moves();
        mv
    }

    /// Generates and caches the moves of the position, returning them
    ///
    /// Once the half-move clock has reached its limit, or neither side can mate, the game is over
    /// and no moves are generated at all.
    pub fn generate_moves(&mut self) -> &[Move] {
        if self.half_move_clock >= DRAW_CLOCK || self.board.is_dead_position() {
            self.moves.clear();
        } else {
            self.generator.generate(
                &self.board, self.turn, self.castling, self.ep_square, &mut self.moves,
            );
        }
        self.stale = false;

        &self.moves
    }

    /// Returns the moves cached by the last generation
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the cached moves, regenerating them first if a move has been unmade since
    pub fn current_moves(&mut self) -> &[Move] {
        if self.stale {
            return self.generate_moves();
        }
        &self.moves
    }

    /// Generates every legal move, regardless of the half-move clock or the material left
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut generator = MoveGenerator::new();
        let mut moves = Vec::new();
        generator.generate(&self.board, self.turn, self.castling, self.ep_square, &mut moves);
        moves
    }

    fn has_legal_moves(&self) -> bool {
        (!self.stale && !self.moves.is_empty()) || !self.legal_moves().is_empty()
    }

    /// Returns `true` if the side to move is in check
    pub fn is_check(&self) -> bool {
        match self.board.king_square(self.turn) {
            Some(king) => self.board.is_attacked(king, !self.turn),
            None => false,
        }
    }

    /// Returns `true` if the side to move has been checkmated
    pub fn is_checkmate(&self) -> bool {
        self.termination() == Some(Termination::Checkmate)
    }

    /// Returns `true` if the game is over for any reason
    pub fn is_game_over(&self) -> bool {
        self.termination().is_some()
    }

    /// Returns `true` if neither side has the material to mate
    pub fn is_dead_position(&self) -> bool {
        self.board.is_dead_position()
    }

    /// Returns why the game is over, or `None` if it is not
    ///
    /// A position without legal moves is checkmate or stalemate even when the half-move clock
    /// has also run out.
    pub fn termination(&self) -> Option<Termination> {
        if !self.has_legal_moves() {
            if self.is_check() {
                Some(Termination::Checkmate)
            } else {
                Some(Termination::Stalemate)
            }
        } else if self.half_move_clock >= DRAW_CLOCK {
            Some(Termination::FiftyMoveClock)
        } else if self.board.is_dead_position() {
            Some(Termination::InsufficientMaterial)
        } else {
            None
        }
    }

    /// Parses a move in coordinate notation, such as `e2e4` or `e7e8q`, and returns the legal
    /// move it names
    pub fn parse_move(&self, s: &str) -> Result<Move> {
        let caps = MOVE_TEXT.captures(s.trim())
            .ok_or_else(|| Error::parse(format!("bad move text `{}`", s)))?;

        let from: Square = caps[1].parse()?;
        let to: Square = caps[2].parse()?;
        let promotion = match &caps[3] {
            "" => None,
            p => Some(p.parse::<Piece>()?),
        };

        self.legal_moves()
            .into_iter()
            .find(|m| m.from() == from && m.to() == to && m.promotion() == promotion)
            .ok_or_else(|| Error::IllegalMove(s.trim().to_owned()))
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.turn == other.turn
            && self.castling == other.castling
            && self.ep_square == other.ep_square
            && self.half_move_clock == other.half_move_clock
            && self.move_number == other.move_number
    }
}

impl Eq for Position { }

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl FromStr for Position {
    type Err = ParseFenError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Position::from_fen_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Position::new() must return the standard starting position.
    #[test]
    fn new_returns_the_standard_starting_position() {
        assert_eq!(Position::new().to_fen_str(), START_FEN);
        assert_eq!(Position::new().moves().len(), 20);
    }

    /// Tests for Position::from_fen_str()
    mod from_fen_str {
        use super::*;
        use ParseFenError::*;

        // 1. empty string returns Err(Empty)
        #[test]
        fn empty_string_returns_error() {
            assert_eq!(Position::from_fen_str(""), Err(Empty));
            assert_eq!(Position::from_fen_str(" \t\r\n"), Err(Empty));
        }

        // 2. 0 or 9 in board string returns Err(ParseBoard)
        #[test]
        fn invalid_empty_square_count_returns_error() {
            assert_eq!(Position::from_fen_str("0K1k5/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
            assert_eq!(Position::from_fen_str("K1k5/9/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
        }

        // 3. ranks which are too long or too short return Err(ParseBoard)
        #[test]
        fn bad_rank_lengths_return_error() {
            assert_eq!(Position::from_fen_str("K1k6/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8B w - - 0 1"), Err(ParseBoard));
            assert_eq!(Position::from_fen_str("K1k4/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/6B w - - 0 1"), Err(ParseBoard));
        }

        // 4. the wrong number of ranks returns Err(ParseBoard)
        #[test]
        fn bad_rank_count_returns_error() {
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
        }

        // 5. an unknown piece letter returns Err(ParseBoard)
        #[test]
        fn bad_piece_returns_error() {
            assert_eq!(Position::from_fen_str("K1k4x/8/8/8/8/8/8/8 w - - 0 1"), Err(ParseBoard));
        }

        // 6. turn field
        #[test]
        fn turn_field() {
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8"), Err(ParseTurn));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 x - - 0 1"), Err(ParseTurn));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 b - - 0 1")
                .expect("valid fen").turn(), Color::Black);
        }

        // 7. castling field
        #[test]
        fn castling_field() {
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w"), Err(ParseCastling));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w X - 0 1"), Err(ParseCastling));
            let pos = Position::from_fen_str("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").expect("valid fen");
            assert_eq!(pos.castling_rights(),
                CastlingRights::WHITE_KINGSIDE | CastlingRights::BLACK_QUEENSIDE);
        }

        // 8. en passant field
        #[test]
        fn en_passant_field() {
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w -"), Err(ParseEnPassant));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w - e9 0 1"), Err(ParseEnPassant));
            let pos = Position::from_fen_str("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("valid fen");
            assert_eq!(pos.ep_square(), Some(Square::D6));
        }

        // 9. clocks default when missing and are validated when present
        #[test]
        fn clock_fields() {
            let pos = Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w - -").expect("valid fen");
            assert_eq!(pos.half_move_clock(), 0);
            assert_eq!(pos.move_number(), 1);
            let pos = Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - 12 40").expect("valid fen");
            assert_eq!(pos.half_move_clock(), 12);
            assert_eq!(pos.move_number(), 40);
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - x 1"), Err(ParseHalfMoveClock));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - 0 x"), Err(ParseMoveNumber));
        }

        // 10. impossible positions are rejected
        #[test]
        fn impossible_positions_return_error() {
            assert_eq!(Position::from_fen_str("K1k1k3/8/8/8/8/8/8/8 w - - 0 1"), Err(KingCount));
            assert_eq!(Position::from_fen_str("K7/8/8/8/8/8/8/8 w - - 0 1"), Err(KingCount));
            assert_eq!(Position::from_fen_str("KPk5/8/8/8/8/8/8/8 w - - 0 1"), Err(InvalidPawnRank));
            assert_eq!(Position::from_fen_str("Kk6/8/8/8/8/8/8/8 w - - 0 1"), Err(KingCapturable));
            assert_eq!(Position::from_fen_str("4k3/8/8/3pP3/8/8/8/4K3 w - e6 0 1"), Err(EnPassantPawn));
            assert_eq!(Position::from_fen_str("4k3/8/3p4/4P3/8/8/8/4K3 w - d6 0 1"), Err(EnPassantPawn));
            assert_eq!(Position::from_fen_str("4k3/8/8/8/8/8/8/4K3 w K - 0 1"), Err(InvalidCastling));
            assert_eq!(Position::from_fen_str("4k3/8/8/8/8/8/8/R2K4 w Q - 0 1"), Err(InvalidCastling));
        }

        // 11. parsing and formatting agree
        #[test]
        fn back_to_identical_fen() {
            for fen in &[
                START_FEN,
                "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
                "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            ] {
                assert_eq!(Position::from_fen_str(fen).expect("valid fen").to_fen_str(), *fen);
            }
        }
    }

    mod castling_rights {
        use super::*;

        #[test]
        fn display_and_parse_agree() {
            for s in &["KQkq", "K", "Qk", "q", "-"] {
                let rights: CastlingRights = s.parse().expect("valid rights");
                assert_eq!(rights.to_string(), *s);
            }
            assert!("".parse::<CastlingRights>().is_err());
        }

        #[test]
        fn home_squares_clear_rights() {
            assert_eq!(
                CastlingRights::ALL & CastlingRights::kept_after_touching(Square::E1),
                CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE
            );
            assert_eq!(
                CastlingRights::ALL & CastlingRights::kept_after_touching(Square::H8),
                CastlingRights::ALL & !CastlingRights::BLACK_KINGSIDE
            );
            assert_eq!(CastlingRights::kept_after_touching(Square::E4), CastlingRights::ALL);
        }
    }

    mod make_move {
        use super::*;

        fn play(pos: &mut Position, moves: &[&str]) {
            for text in moves {
                let mv = pos.parse_move(text).expect("legal move");
                pos.make_move(mv);
            }
        }

        #[test]
        fn counters_and_en_passant_follow_the_moves() {
            let mut pos = Position::new();
            play(&mut pos, &["e2e4"]);
            assert_eq!(pos.ep_square(), Some(Square::E3));
            assert_eq!(pos.half_move_clock(), 0);
            assert_eq!(pos.move_number(), 1);

            play(&mut pos, &["g8f6"]);
            assert_eq!(pos.ep_square(), None);
            assert_eq!(pos.half_move_clock(), 1);
            assert_eq!(pos.move_number(), 2);
            assert_eq!(pos.to_fen_str(),
                "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2");

            pos.unmake_move();
            pos.unmake_move();
            assert_eq!(pos, Position::new());
            assert_eq!(pos.zobrist_key(), Position::new().zobrist_key());
        }

        #[test]
        fn current_moves_regenerates_after_unmake() {
            let mut pos = Position::new();
            play(&mut pos, &["e2e4"]);
            let replies = pos.moves().to_vec();
            assert_eq!(pos.current_moves(), &replies[..]);

            pos.unmake_move();
            assert_eq!(pos.moves(), &replies[..]);
            assert_eq!(pos.current_moves().len(), 20);
            assert!(pos.current_moves().iter().any(|mv| mv.to_string() == "e2e4"));
        }

        #[test]
        fn rook_and_king_moves_clear_castling_rights() {
            let mut pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().expect("valid fen");
            play(&mut pos, &["a1a8"]);
            assert_eq!(pos.castling_rights().to_string(), "Kk");
            play(&mut pos, &["e8d7"]);
            assert_eq!(pos.castling_rights().to_string(), "K");
            play(&mut pos, &["e1g1"]);
            assert!(pos.castling_rights().is_empty());
            assert_eq!(pos.to_fen_str(), "R6r/3k4/8/8/8/8/8/5RK1 b - - 2 2");
        }

        #[test]
        fn undo_regenerates_moves() {
            let mut pos = Position::new();
            play(&mut pos, &["e2e4"]);
            assert_eq!(pos.moves().len(), 20);
            assert_eq!(pos.undo().map(|m| m.to_string()), Some("e2e4".to_owned()));
            assert_eq!(pos.moves().len(), 20);
            assert!(pos.moves().iter().all(|m| pos.board().piece_at(m.from()).map(|(c, _)| c) == Some(White)));
            assert_eq!(pos.undo(), None);
        }

        #[test]
        fn parse_move_rejects_bad_and_illegal_text() {
            let pos = Position::new();
            assert!(matches!(pos.parse_move("e2e5"), Err(Error::IllegalMove(_))));
            assert!(matches!(pos.parse_move("e2"), Err(Error::ParseError(_))));
            assert!(matches!(pos.parse_move("e7e8x"), Err(Error::ParseError(_))));
            assert_eq!(pos.parse_move(" g1f3 ").map(|m| m.piece()), Ok(Knight));
        }
    }

    mod termination {
        use super::*;

        fn termination(fen: &str) -> Option<Termination> {
            fen.parse::<Position>().expect("valid fen").termination()
        }

        #[test]
        fn reasons_are_reported() {
            assert_eq!(termination(START_FEN), None);
            assert_eq!(termination("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"), Some(Termination::Checkmate));
            assert_eq!(termination("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1"), Some(Termination::Stalemate));
            assert_eq!(termination("4k3/8/8/8/8/8/4P3/4K3 w - - 50 80"), Some(Termination::FiftyMoveClock));
            assert_eq!(termination("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1"), Some(Termination::InsufficientMaterial));
        }

        #[test]
        fn checkmate_takes_precedence_over_the_clock() {
            let pos: Position = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 60 80".parse().expect("valid fen");
            assert!(pos.moves().is_empty());
            assert!(pos.is_checkmate());
            assert!(pos.is_game_over());
        }

        #[test]
        fn short_circuits_only_affect_generated_moves() {
            let pos: Position = "4k3/8/8/8/8/8/8/2B1K3 w - - 0 1".parse().expect("valid fen");
            assert!(pos.moves().is_empty());
            assert!(!pos.legal_moves().is_empty());
            assert!(pos.is_dead_position());
        }
    }
}
