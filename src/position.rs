use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attacks::is_attacked_by;
use crate::coord::{in_bounds, Coord};
use crate::error::PositionError;
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind};

/// Square contents indexed `[file][rank]`.
pub type BoardArray = [[Option<Piece>; 8]; 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    squares: BoardArray,
}

impl Board {
    pub const fn empty() -> Self { Self { squares: [[None; 8]; 8] } }

    pub const fn from_array(squares: BoardArray) -> Self { Self { squares } }

    pub const fn to_array(&self) -> BoardArray { self.squares }

    #[inline]
    pub fn get(&self, c: Coord) -> Option<Piece> {
        self.squares[c.file() as usize][c.rank() as usize]
    }

    /// Contents of `(file, rank)`; off-board squares hold nothing.
    #[inline]
    pub fn piece_at(&self, file: i8, rank: i8) -> Option<Piece> {
        if in_bounds(file, rank) { self.squares[file as usize][rank as usize] } else { None }
    }

    #[inline]
    pub fn set(&mut self, c: Coord, piece: Option<Piece>) {
        self.squares[c.file() as usize][c.rank() as usize] = piece;
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(move |c| self.get(c).map(|p| (c, p)))
    }

    pub fn find(&self, piece: Piece) -> impl Iterator<Item = Coord> + '_ {
        self.occupied().filter(move |&(_, p)| p == piece).map(|(c, _)| c)
    }
}

/// Castling direction. Kingside is toward the h-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Kingside,
    Queenside,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Kingside, Side::Queenside];

    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// File of the rook that castles on this side.
    pub const fn rook_file(self) -> u8 {
        match self { Side::Kingside => 7, Side::Queenside => 0 }
    }

    /// Files the king and the rook end up on.
    pub const fn king_to_file(self) -> u8 {
        match self { Side::Kingside => 6, Side::Queenside => 2 }
    }

    pub const fn rook_to_file(self) -> u8 {
        match self { Side::Kingside => 5, Side::Queenside => 3 }
    }

    /// Direction of the king's travel along the back rank.
    pub const fn step(self) -> i8 {
        match self { Side::Kingside => 1, Side::Queenside => -1 }
    }
}

pub const KING_HOME_FILE: u8 = 4;

/// Which castling moves are still permitted. Flags are only ever cleared during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    flags: [[bool; 2]; 2],
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights { flags: [[true; 2]; 2] };
    pub const NONE: CastlingRights = CastlingRights { flags: [[false; 2]; 2] };

    pub const fn new(white_kingside: bool, white_queenside: bool, black_kingside: bool, black_queenside: bool) -> Self {
        Self { flags: [[white_kingside, white_queenside], [black_kingside, black_queenside]] }
    }

    #[inline]
    pub fn has(&self, color: Color, side: Side) -> bool {
        self.flags[color.index()][side.index()]
    }

    #[inline]
    pub fn clear(&mut self, color: Color, side: Side) {
        self.flags[color.index()][side.index()] = false;
    }

    pub fn clear_both(&mut self, color: Color) {
        self.flags[color.index()] = [false; 2];
    }

    /// Only position setup (FEN) may add rights.
    pub(crate) fn grant(&mut self, color: Color, side: Side) {
        self.flags[color.index()][side.index()] = true;
    }

    /// True if every flag set in `self` is also set in `earlier`.
    pub fn is_subset_of(&self, earlier: &CastlingRights) -> bool {
        Color::BOTH.iter().all(|&c| Side::BOTH.iter().all(|&s| !self.has(c, s) || earlier.has(c, s)))
    }
}

impl Default for CastlingRights {
    fn default() -> Self { Self::ALL }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameResult {
    #[default]
    Ongoing,
    WhiteWins,
    BlackWins,
    Stalemate,
}

impl GameResult {
    #[inline]
    pub fn is_terminal(self) -> bool { self != GameResult::Ongoing }

    /// Result when `loser` has been checkmated.
    pub fn checkmated(loser: Color) -> Self {
        match loser { Color::White => GameResult::BlackWins, Color::Black => GameResult::WhiteWins }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Ongoing => write!(f, "ongoing"),
            GameResult::WhiteWins => write!(f, "white wins"),
            GameResult::BlackWins => write!(f, "black wins"),
            GameResult::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// A complete game state. Immutable: playing a move yields a new `Position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PositionRepr", into = "PositionRepr")]
pub struct Position {
    pub(crate) turn: Color,
    pub(crate) board: Board,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Coord>,
    pub(crate) result: GameResult,
}

/// Plain serialized form of a [`Position`], validated on the way back in.
#[derive(Serialize, Deserialize)]
struct PositionRepr {
    turn: Color,
    board: BoardArray,
    castling: CastlingRights,
    en_passant: Option<Coord>,
    result: GameResult,
}

impl TryFrom<PositionRepr> for Position {
    type Error = PositionError;

    fn try_from(r: PositionRepr) -> Result<Self, Self::Error> {
        Position::from_parts(r.board, r.turn, r.castling, r.en_passant, r.result)
    }
}

impl From<Position> for PositionRepr {
    fn from(p: Position) -> Self {
        PositionRepr {
            turn: p.turn,
            board: p.board.to_array(),
            castling: p.castling,
            en_passant: p.en_passant,
            result: p.result,
        }
    }
}

const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// The standard starting position, white to move.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        for color in Color::BOTH {
            for (file, kind) in BACK_ROW.iter().enumerate() {
                let file = file as u8;
                board.set(Coord::new_unchecked(file, color.back_rank()), Some(Piece::new(color, *kind)));
                board.set(Coord::new_unchecked(file, color.pawn_rank()), Some(Piece::new(color, PieceKind::Pawn)));
            }
        }
        Position {
            turn: Color::White,
            board,
            castling: CastlingRights::ALL,
            en_passant: None,
            result: GameResult::Ongoing,
        }
    }

    /// Rebuild a position from its board-array form and flags.
    ///
    /// Requires exactly one king per side, the king of the side not to move out
    /// of attack, and an en passant target (if any) that a pawn of the side not
    /// to move has just skipped.
    pub fn from_parts(
        board: BoardArray,
        turn: Color,
        castling: CastlingRights,
        en_passant: Option<Coord>,
        result: GameResult,
    ) -> Result<Self, PositionError> {
        let board = Board::from_array(board);
        for color in Color::BOTH {
            let count = board.find(Piece::new(color, PieceKind::King)).count();
            if count != 1 {
                return Err(PositionError::KingCount { color, count });
            }
        }
        if let Some(ep) = en_passant {
            // The skipped square sits one rank in front of the double-stepper's home rank.
            let mover = !turn;
            if ep.rank() as i8 != mover.pawn_rank() as i8 + mover.forward() {
                return Err(PositionError::EnPassantRank(ep.to_string()));
            }
            // The pawn stands just past the skipped square; the squares it crossed are empty.
            let pawn = ep.offset(0, mover.forward()).and_then(|c| board.get(c));
            let start = ep.offset(0, -mover.forward()).and_then(|c| board.get(c));
            if pawn != Some(Piece::new(mover, PieceKind::Pawn)) || board.get(ep).is_some() || start.is_some() {
                return Err(PositionError::EnPassantPawn(ep.to_string()));
            }
        }
        // The side that just moved cannot have left its king attacked.
        let waiting = !turn;
        if let Some(king) = board.find(Piece::new(waiting, PieceKind::King)).next() {
            if is_attacked_by(&board, king, turn) {
                return Err(PositionError::OpponentInCheck(waiting));
            }
        }
        Ok(Position { turn, board, castling, en_passant, result })
    }

    #[inline]
    pub fn turn(&self) -> Color { self.turn }

    #[inline]
    pub fn board(&self) -> &Board { &self.board }

    #[inline]
    pub fn castling(&self) -> CastlingRights { self.castling }

    /// The square a pawn skipped on the previous move, capturable en passant now.
    #[inline]
    pub fn en_passant(&self) -> Option<Coord> { self.en_passant }

    #[inline]
    pub fn result(&self) -> GameResult { self.result }

    #[inline]
    pub fn piece_at(&self, c: Coord) -> Option<Piece> { self.board.get(c) }

    pub fn board_array(&self) -> BoardArray { self.board.to_array() }

    /// Squares holding pieces of the side to move.
    pub fn friendly_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.board.occupied().filter(move |(_, p)| p.color == self.turn).map(|(c, _)| c)
    }

    pub fn king_coord(&self, color: Color) -> Option<Coord> {
        self.board.find(Piece::new(color, PieceKind::King)).next()
    }

    pub fn in_check(&self) -> bool { crate::attacks::in_check(self) }

    pub fn legal_moves_from(&self, from: Coord) -> Vec<Move> { crate::legal::legal_moves_from(self, from) }

    pub fn legal_moves(&self) -> Vec<Move> { crate::legal::legal_moves(self) }

    pub fn legal_destinations(&self, from: Coord) -> Vec<Coord> { crate::legal::legal_destinations(self, from) }

    pub fn can_move(&self, mv: &Move) -> bool { crate::legal::can_move(self, mv) }

    pub fn needs_promotion(&self, from: Coord, to: Coord) -> bool { crate::legal::does_need_promotion(self, from, to) }

    /// The position after `mv`, or `None` if `mv` is not legal here.
    pub fn after_move(&self, mv: &Move) -> Option<Position> { crate::apply::after_move(self, mv) }
}

impl Default for Position {
    fn default() -> Self { Self::initial() }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = match self.board.piece_at(file, rank) {
                    Some(p) => p.to_char(),
                    None => '.',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{} to move", self.turn)?;
        if self.result.is_terminal() {
            write!(f, " ({})", self.result)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn initial_position_shape() {
        let p = Position::initial();
        assert_eq!(p.turn(), Color::White);
        assert_eq!(p.castling(), CastlingRights::ALL);
        assert_eq!(p.en_passant(), None);
        assert_eq!(p.result(), GameResult::Ongoing);
        assert_eq!(p.board().occupied().count(), 32);
        let e1 = "e1".parse().unwrap();
        let d8 = "d8".parse().unwrap();
        assert_eq!(p.piece_at(e1), Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(p.piece_at(d8), Some(Piece::new(Color::Black, PieceKind::Queen)));
    }

    #[test]
    fn off_board_lookup_is_empty() {
        let p = Position::initial();
        assert_eq!(p.board().piece_at(-1, 0), None);
        assert_eq!(p.board().piece_at(0, 8), None);
        assert!(p.board().piece_at(0, 0).is_some());
    }

    #[test]
    fn board_array_round_trip() {
        let p = Position::initial();
        let back = Position::from_parts(p.board_array(), p.turn(), p.castling(), p.en_passant(), p.result()).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn from_parts_requires_one_king_each() {
        let mut arr = Position::initial().board_array();
        arr[4][7] = None;
        let err = Position::from_parts(arr, Color::White, CastlingRights::NONE, None, GameResult::Ongoing);
        assert_eq!(err, Err(PositionError::KingCount { color: Color::Black, count: 0 }));
    }

    #[test]
    fn from_parts_checks_en_passant_square() {
        let e3: Coord = "e3".parse().unwrap();
        let e6: Coord = "e6".parse().unwrap();
        let mut arr = Position::initial().board_array();
        // e2e4
        arr[4][1] = None;
        arr[4][3] = Some(Piece::new(Color::White, PieceKind::Pawn));
        assert!(Position::from_parts(arr, Color::Black, CastlingRights::ALL, Some(e3), GameResult::Ongoing).is_ok());
        assert_eq!(
            Position::from_parts(arr, Color::White, CastlingRights::ALL, Some(e3), GameResult::Ongoing),
            Err(PositionError::EnPassantRank("e3".into()))
        );
        assert_eq!(
            Position::from_parts(arr, Color::White, CastlingRights::ALL, Some(e6), GameResult::Ongoing),
            Err(PositionError::EnPassantPawn("e6".into()))
        );
        // No pawn passed through e3 if e2 is still occupied.
        let start = Position::initial().board_array();
        assert_eq!(
            Position::from_parts(start, Color::Black, CastlingRights::ALL, Some(e3), GameResult::Ongoing),
            Err(PositionError::EnPassantPawn("e3".into()))
        );
    }

    #[test]
    fn from_parts_rejects_an_attacked_waiting_king() {
        let mut arr = Board::empty().to_array();
        arr[4][7] = Some(Piece::new(Color::Black, PieceKind::King));
        arr[5][0] = Some(Piece::new(Color::White, PieceKind::King));
        arr[4][0] = Some(Piece::new(Color::White, PieceKind::Rook));
        assert_eq!(
            Position::from_parts(arr, Color::White, CastlingRights::NONE, None, GameResult::Ongoing),
            Err(PositionError::OpponentInCheck(Color::Black))
        );
        // With black to move it is an ordinary check.
        let p = Position::from_parts(arr, Color::Black, CastlingRights::NONE, None, GameResult::Ongoing).unwrap();
        assert!(p.in_check());
    }

    #[test]
    fn castling_flags_clear_independently() {
        let mut rights = CastlingRights::ALL;
        rights.clear(Color::White, Side::Queenside);
        assert!(rights.has(Color::White, Side::Kingside));
        assert!(!rights.has(Color::White, Side::Queenside));
        assert!(rights.is_subset_of(&CastlingRights::ALL));
        assert!(!CastlingRights::ALL.is_subset_of(&rights));
        rights.clear_both(Color::Black);
        assert_eq!(rights, CastlingRights::new(true, false, false, false));
    }
}
