//! Square attack detection.
//!
//! A square is attacked by `attacker` when one of its pieces could capture on it.
//! Pawns attack diagonally whether or not the square is occupied; pawn pushes and
//! castling never attack. Lookups walk outward from the target, so this never
//! calls back into move generation.

use crate::coord::Coord;
use crate::movegen::{BISHOP_DIRS, KING_STEPS, KNIGHT_DELTAS, ROOK_DIRS};
use crate::piece::{Color, Piece, PieceKind};
use crate::position::{Board, Position};

pub fn is_attacked_by(board: &Board, target: Coord, attacker: Color) -> bool {
    let holds = |df: i8, dr: i8, kind: PieceKind| {
        target.offset(df, dr).and_then(|c| board.get(c)) == Some(Piece::new(attacker, kind))
    };

    // A pawn attacking `target` stands one rank behind it, from the attacker's view.
    let back = -attacker.forward();
    if holds(-1, back, PieceKind::Pawn) || holds(1, back, PieceKind::Pawn) {
        return true;
    }
    if KNIGHT_DELTAS.iter().any(|&(df, dr)| holds(df, dr, PieceKind::Knight)) {
        return true;
    }
    if KING_STEPS.iter().any(|&(df, dr)| holds(df, dr, PieceKind::King)) {
        return true;
    }
    slider_hits(board, target, attacker, &ROOK_DIRS, PieceKind::Rook)
        || slider_hits(board, target, attacker, &BISHOP_DIRS, PieceKind::Bishop)
}

/// First piece along each ray is an attacking `kind` or queen.
fn slider_hits(board: &Board, target: Coord, attacker: Color, dirs: &[(i8, i8)], kind: PieceKind) -> bool {
    dirs.iter().any(|&(df, dr)| {
        let mut cur = target;
        while let Some(next) = cur.offset(df, dr) {
            if let Some(p) = board.get(next) {
                return p.color == attacker && (p.kind == kind || p.kind == PieceKind::Queen);
            }
            cur = next;
        }
        false
    })
}

/// Is `coord` attacked by the side not to move?
pub fn is_attacked(pos: &Position, coord: Coord) -> bool {
    is_attacked_by(&pos.board, coord, !pos.turn)
}

/// Is the king of `color` attacked by the other side?
///
/// Panics if `color` has no king, which no validated position allows.
pub fn king_attacked(pos: &Position, color: Color) -> bool {
    let king = pos
        .king_coord(color)
        .unwrap_or_else(|| panic!("position has no {color} king:\n{pos}"));
    is_attacked_by(&pos.board, king, !color)
}

/// Is the side to move in check?
pub fn in_check(pos: &Position) -> bool {
    king_attacked(pos, pos.turn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Coord { s.parse().unwrap() }

    #[test]
    fn pawns_attack_diagonally_only() {
        let p = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(is_attacked_by(p.board(), sq("d3"), Color::White));
        assert!(is_attacked_by(p.board(), sq("f3"), Color::White));
        assert!(!is_attacked_by(p.board(), sq("e3"), Color::White));
        assert!(!is_attacked_by(p.board(), sq("e4"), Color::White));
    }

    #[test]
    fn black_pawns_attack_downward() {
        let p = Position::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(is_attacked(&p, sq("c4")));
        assert!(is_attacked(&p, sq("e4")));
        assert!(!is_attacked(&p, sq("c6")));
    }

    #[test]
    fn sliders_are_blocked() {
        let p = Position::from_fen("4k3/8/8/8/q2P4/8/8/4K3 w - - 0 1").unwrap();
        assert!(is_attacked(&p, sq("c4")));
        assert!(is_attacked(&p, sq("d4")));
        assert!(!is_attacked(&p, sq("e4")));
        assert!(is_attacked(&p, sq("d1")));
    }

    #[test]
    fn knight_and_king_contacts() {
        let p = Position::from_fen("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1").unwrap();
        assert!(in_check(&p));
        assert!(is_attacked(&p, sq("d7")));
        assert!(!is_attacked(&p, sq("e6")));
    }

    #[test]
    fn startpos_is_quiet() {
        let p = Position::initial();
        assert!(!in_check(&p));
        assert!(!is_attacked(&p, sq("e4")));
        assert!(is_attacked(&p, sq("e6")));
    }
}
