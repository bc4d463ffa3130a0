//! Pseudo-legal move generation: every geometrically valid move of the side to
//! move, without regard to whether it leaves that side's own king attacked.

use crate::attacks::is_attacked_by;
use crate::coord::Coord;
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::{Position, Side, KING_HOME_FILE};

pub const KNIGHT_DELTAS: [(i8, i8); 8] = [(1, 2), (2, 1), (-1, 2), (-2, 1), (1, -2), (2, -1), (-1, -2), (-2, -1)];

pub const KING_STEPS: [(i8, i8); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

pub const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

struct Gen<'a> {
    pos: &'a Position,
    from: Coord,
    color: Color,
    moves: Vec<Move>,
}

impl Gen<'_> {
    /// Push `to` unless it holds a friendly piece.
    fn allow(&mut self, to: Coord) {
        if self.pos.board.get(to).map_or(true, |p| p.color != self.color) {
            self.moves.push(Move::new(self.from, to));
        }
    }

    fn step(&mut self, df: i8, dr: i8) {
        if let Some(to) = self.from.offset(df, dr) {
            self.allow(to);
        }
    }

    /// Slide until the edge or the first piece; an enemy blocker is included.
    fn ray(&mut self, df: i8, dr: i8) {
        let mut cur = self.from;
        while let Some(to) = cur.offset(df, dr) {
            self.allow(to);
            if self.pos.board.get(to).is_some() {
                break;
            }
            cur = to;
        }
    }

    /// A pawn arriving on the last rank emits one move per promotion kind.
    fn pawn_to(&mut self, to: Coord) {
        if to.rank() == self.color.promotion_rank() {
            for kind in PieceKind::PROMOTIONS {
                self.moves.push(Move::promoting(self.from, to, kind));
            }
        } else {
            self.moves.push(Move::new(self.from, to));
        }
    }

    fn pawn(&mut self) {
        let pos = self.pos;
        let fwd = self.color.forward();
        if let Some(one) = self.from.offset(0, fwd) {
            if pos.board.get(one).is_none() {
                self.pawn_to(one);
                if self.from.rank() == self.color.pawn_rank() {
                    if let Some(two) = self.from.offset(0, 2 * fwd) {
                        if pos.board.get(two).is_none() {
                            self.moves.push(Move::new(self.from, two));
                        }
                    }
                }
            }
        }
        for df in [-1, 1] {
            let Some(to) = self.from.offset(df, fwd) else { continue };
            match pos.board.get(to) {
                Some(p) if p.color != self.color => self.pawn_to(to),
                None if pos.en_passant == Some(to) => self.moves.push(Move::new(self.from, to)),
                _ => {}
            }
        }
    }

    fn king(&mut self) {
        for (df, dr) in KING_STEPS {
            self.step(df, dr);
        }
        for side in Side::BOTH {
            if let Some(to) = castle_target(self.pos, self.from, self.color, side) {
                self.moves.push(Move::new(self.from, to));
            }
        }
    }
}

/// Destination of the king when castling on `side` is currently available.
///
/// Requires the right, the king and rook on their home squares, an empty path
/// between them, and neither the king's square nor the square it crosses attacked.
/// Whether the destination is attacked is left to the legality filter.
fn castle_target(pos: &Position, from: Coord, color: Color, side: Side) -> Option<Coord> {
    let rank = color.back_rank();
    if !pos.castling.has(color, side) || from != Coord::new_unchecked(KING_HOME_FILE, rank) {
        return None;
    }
    let rook_sq = Coord::new_unchecked(side.rook_file(), rank);
    if pos.board.get(rook_sq) != Some(Piece::new(color, PieceKind::Rook)) {
        return None;
    }
    let (lo, hi) = if side.rook_file() < KING_HOME_FILE {
        (side.rook_file() + 1, KING_HOME_FILE)
    } else {
        (KING_HOME_FILE + 1, side.rook_file())
    };
    if (lo..hi).any(|file| pos.board.get(Coord::new_unchecked(file, rank)).is_some()) {
        return None;
    }
    let transit = from.offset(side.step(), 0)?;
    if is_attacked_by(&pos.board, from, !color) || is_attacked_by(&pos.board, transit, !color) {
        return None;
    }
    Some(Coord::new_unchecked(side.king_to_file(), rank))
}

/// Pseudo-legal moves of the piece on `from`.
///
/// Empty when the square is empty, holds an opponent's piece, or the game is over.
pub fn pseudo_legal_from(pos: &Position, from: Coord) -> Vec<Move> {
    if pos.result.is_terminal() {
        return Vec::new();
    }
    let Some(piece) = pos.board.get(from) else { return Vec::new() };
    if piece.color != pos.turn {
        return Vec::new();
    }
    let mut mg = Gen { pos, from, color: piece.color, moves: Vec::with_capacity(28) };
    match piece.kind {
        PieceKind::Pawn => mg.pawn(),
        PieceKind::Knight => {
            for (df, dr) in KNIGHT_DELTAS {
                mg.step(df, dr);
            }
        }
        PieceKind::Bishop => BISHOP_DIRS.iter().for_each(|&(df, dr)| mg.ray(df, dr)),
        PieceKind::Rook => ROOK_DIRS.iter().for_each(|&(df, dr)| mg.ray(df, dr)),
        PieceKind::Queen => {
            BISHOP_DIRS.iter().chain(ROOK_DIRS.iter()).for_each(|&(df, dr)| mg.ray(df, dr))
        }
        PieceKind::King => mg.king(),
    }
    mg.moves
}

pub fn pseudo_legal_moves(pos: &Position) -> Vec<Move> {
    pos.friendly_coords().flat_map(|c| pseudo_legal_from(pos, c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Coord { s.parse().unwrap() }

    fn targets(pos: &Position, from: &str) -> Vec<String> {
        let mut v: Vec<String> = pseudo_legal_from(pos, sq(from)).iter().map(|m| m.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn startpos_has_twenty_pseudo_moves() {
        assert_eq!(pseudo_legal_moves(&Position::initial()).len(), 20);
    }

    #[test]
    fn opponent_and_empty_squares_generate_nothing() {
        let p = Position::initial();
        assert!(pseudo_legal_from(&p, sq("e7")).is_empty());
        assert!(pseudo_legal_from(&p, sq("e4")).is_empty());
    }

    #[test]
    fn knight_from_corner_skips_friendly() {
        let p = Position::initial();
        assert_eq!(targets(&p, "b1"), vec!["b1a3", "b1c3"]);
    }

    #[test]
    fn rook_ray_stops_at_blockers() {
        let p = Position::from_fen("4k3/8/8/8/1p6/8/8/1R2K3 w - - 0 1").unwrap();
        assert_eq!(targets(&p, "b1"), vec!["b1a1", "b1b2", "b1b3", "b1b4", "b1c1", "b1d1"]);
    }

    #[test]
    fn pawn_promotions_are_enumerated() {
        let p = Position::from_fen("3rk3/2P5/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = pseudo_legal_from(&p, sq("c7"));
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.promotes_to.is_some_and(PieceKind::is_promotion_target)));
    }

    #[test]
    fn blocked_pawn_cannot_double_step() {
        let p = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(pseudo_legal_from(&p, sq("e2")).is_empty());
    }

    #[test]
    fn castling_needs_empty_path() {
        let p = Position::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1").unwrap();
        let t = targets(&p, "e1");
        assert!(t.contains(&"e1g1".to_string()));
        assert!(!t.contains(&"e1c1".to_string()));
    }

    #[test]
    fn castling_blocked_by_attacked_transit() {
        // Black rook on f8 covers f1.
        let p = Position::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let t = targets(&p, "e1");
        assert!(!t.contains(&"e1g1".to_string()));
        assert!(t.contains(&"e1c1".to_string()));
    }
}
