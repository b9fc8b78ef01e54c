//! Defines the error types needed by the chess crate
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` crate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cannot parse string. Carries a diagnostic message.
    ParseError(String),
    /// Failed to convert an integer to an another type
    TryFromIntError,
    /// The move text is well formed but names no legal move in the position
    IllegalMove(String),
}

impl Error {
    /// Shorthand for building a `ParseError` from anything printable.
    pub(crate) fn parse<T: fmt::Display>(msg: T) -> Error {
        Error::ParseError(msg.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            ParseError(msg) => write!(f, "cannot parse string: {}", msg),
            TryFromIntError => "integer out of range".fmt(f),
            IllegalMove(mv) => write!(f, "illegal move: {}", mv),
        }
    }
}

impl std::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` crate
pub type Result<T> = std::result::Result<T, Error>;

macro_rules! parse_error {
    ($name:ident, $what:expr) => {
        #[doc = concat!("Error returned when a string cannot be parsed as a ", $what)]
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        pub struct $name;

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                concat!("invalid ", $what).fmt(f)
            }
        }

        impl std::error::Error for $name { }

        impl From<$name> for Error {
            fn from(err: $name) -> Self {
                Error::parse(err)
            }
        }
    };
}

parse_error!(ParseColorError, "color");
parse_error!(ParsePieceError, "piece");
parse_error!(ParseFileError, "file");
parse_error!(ParseRankError, "rank");
parse_error!(ParseSquareError, "square");

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error returned when a FEN string cannot be parsed, or describes an impossible position
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseFenError {
    /// The string is empty
    Empty,
    /// The piece placement field is malformed
    ParseBoard,
    /// The side to move is missing or is not `w` or `b`
    ParseTurn,
    /// The castling field is missing or malformed
    ParseCastling,
    /// The en passant field is missing or malformed
    ParseEnPassant,
    /// The half-move clock is not a number
    ParseHalfMoveClock,
    /// The full-move number is not a number
    ParseMoveNumber,
    /// A side has no king or more than one
    KingCount,
    /// A pawn stands on the first or last rank
    InvalidPawnRank,
    /// The side to move could capture the opposing king
    KingCapturable,
    /// The en passant square is occupied, or there is no pawn that could have just passed it
    EnPassantPawn,
    /// A castling right is set but the king or rook is not on its home square
    InvalidCastling,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseFenError::*;

        match self {
            Empty => "empty FEN string",
            ParseBoard => "invalid piece placement",
            ParseTurn => "invalid side to move",
            ParseCastling => "invalid castling rights",
            ParseEnPassant => "invalid en passant square",
            ParseHalfMoveClock => "invalid half-move clock",
            ParseMoveNumber => "invalid full-move number",
            KingCount => "missing king or multiple kings of the same color",
            InvalidPawnRank => "pawn on first or last rank",
            KingCapturable => "king is under attack on opponent's move",
            EnPassantPawn => "en passant square without capturable pawn",
            InvalidCastling => "castling rights aren't valid for this position",
        }.fmt(f)
    }
}

impl std::error::Error for ParseFenError { }

impl From<ParseFenError> for Error {
    fn from(err: ParseFenError) -> Self {
        Error::parse(err)
    }
}

impl From<ParseColorError> for ParseFenError {
    fn from(_: ParseColorError) -> Self {
        ParseFenError::ParseTurn
    }
}

impl From<ParsePieceError> for ParseFenError {
    fn from(_: ParsePieceError) -> Self {
        ParseFenError::ParseBoard
    }
}

impl From<ParseSquareError> for ParseFenError {
    fn from(_: ParseSquareError) -> Self {
        ParseFenError::ParseEnPassant
    }
}

/// Error returned when an integer is out of range for the target type
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TryFromIntError;

impl fmt::Display for TryFromIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "integer out of range".fmt(f)
    }
}

impl std::error::Error for TryFromIntError { }

impl From<TryFromIntError> for Error {
    fn from(_: TryFromIntError) -> Self {
        Error::TryFromIntError
    }
}
