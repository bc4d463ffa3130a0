//! A pure chess rules engine.
//!
//! A [`Position`] is an immutable value. Ask it for legal moves, play a move to get
//! a new position (or `None` if the move is illegal), and read the game result.
//! Nothing is cached between calls, so older positions stay valid as history.

pub mod coord;
pub mod piece;
pub mod moves;
pub mod position;
pub mod fen;
pub mod movegen;
pub mod attacks;
pub mod legal;
pub mod apply;
pub mod result;
pub mod error;
pub mod perft;
pub mod selfplay;

pub use coord::Coord;
pub use moves::Move;
pub use piece::{Color, Piece, PieceKind};
pub use position::{Board, CastlingRights, GameResult, Position, Side};
