use thiserror::Error;

use crate::piece::Color;

/// Error when parsing a [`Coord`](crate::coord::Coord).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFile(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRank(char),
    #[error("square {0:?} must be two characters")]
    BadLength(String),
    #[error("square ({file}, {rank}) is off the board")]
    OutOfRange { file: u8, rank: u8 },
}

/// Error when parsing a [`Move`](crate::moves::Move) in coordinate form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("move {0:?} must be 4 or 5 characters")]
    BadLength(String),
    #[error(transparent)]
    Square(#[from] CoordParseError),
    #[error("unexpected promotion char {0:?}")]
    UnexpectedPromotion(char),
}

/// A board array or field set that does not describe a usable position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: usize },
    #[error("en passant target {0} is not on rank 3 or 6")]
    EnPassantRank(String),
    #[error("en passant target {0} does not follow a pawn double step")]
    EnPassantPawn(String),
    #[error("{0} king is attacked but it is not {0} to move")]
    OpponentInCheck(Color),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN needs at least 4 fields, got {0}")]
    MissingFields(usize),
    #[error("FEN placement must have 8 ranks, got {0}")]
    RankCount(usize),
    #[error("FEN rank {rank} does not describe 8 squares")]
    RankWidth { rank: usize },
    #[error("unexpected piece char {0:?}")]
    UnexpectedPiece(char),
    #[error("unexpected side to move {0:?}")]
    UnexpectedTurn(String),
    #[error("unexpected castling char {0:?}")]
    UnexpectedCastling(char),
    #[error("bad en passant field: {0}")]
    EnPassant(#[from] CoordParseError),
    #[error(transparent)]
    Position(#[from] PositionError),
}

/// A textual move list that could not be replayed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("ply {ply}: {source}")]
    Parse { ply: usize, source: MoveParseError },
    #[error("ply {ply}: {mv} is not legal")]
    Illegal { ply: usize, mv: String },
    #[error(transparent)]
    Fen(#[from] FenError),
}
