use log::{debug, info};

use crate::coord::Coord;
use crate::error::ReplayError;
use crate::legal::can_move;
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::{Position, Side};
use crate::result::evaluate_result;

/// The position after `mv`, without checking legality and without updating the result.
///
/// `mv` must at least be pseudo-legal for `pos`; the legality filter uses this
/// to look one ply ahead.
///
/// # Panics
///
/// If `mv.from` is empty.
pub fn apply_move(pos: &Position, mv: &Move) -> Position {
    let mut next = *pos;
    let moving = pos
        .board
        .get(mv.from)
        .unwrap_or_else(|| panic!("no piece to move on {} for {mv}", mv.from));
    let color = moving.color;
    let placed = match mv.promotes_to {
        Some(kind) => Piece::new(color, kind),
        None => moving,
    };

    // En passant lands on the skipped square; the captured pawn sits beside the mover.
    if moving.kind == PieceKind::Pawn && pos.en_passant == Some(mv.to) && mv.from.file() != mv.to.file() {
        next.board.set(Coord::new_unchecked(mv.to.file(), mv.from.rank()), None);
    }

    if moving.kind == PieceKind::King && mv.from.file().abs_diff(mv.to.file()) == 2 {
        let side = if mv.to.file() > mv.from.file() { Side::Kingside } else { Side::Queenside };
        let rank = mv.from.rank();
        let rook = next.board.get(Coord::new_unchecked(side.rook_file(), rank));
        next.board.set(Coord::new_unchecked(side.rook_file(), rank), None);
        next.board.set(Coord::new_unchecked(side.rook_to_file(), rank), rook);
    }

    next.board.set(mv.from, None);
    next.board.set(mv.to, Some(placed));

    if moving.kind == PieceKind::King {
        next.castling.clear_both(color);
    }
    // A rook leaving its corner, or being captured there, ends castling on that side.
    for c in Color::BOTH {
        for side in Side::BOTH {
            let corner = Coord::new_unchecked(side.rook_file(), c.back_rank());
            if mv.from == corner || mv.to == corner {
                next.castling.clear(c, side);
            }
        }
    }

    next.en_passant = if moving.kind == PieceKind::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
        Some(Coord::new_unchecked(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2))
    } else {
        None
    };

    next.turn = !pos.turn;
    next
}

/// Play `mv` if it is legal, recomputing the game result. `None` means rejected.
pub fn after_move(pos: &Position, mv: &Move) -> Option<Position> {
    if !can_move(pos, mv) {
        debug!("rejected {mv}: not legal for {} (result: {})", pos.turn, pos.result);
        return None;
    }
    let mut next = apply_move(pos, mv);
    next.result = evaluate_result(&next);
    if next.result.is_terminal() {
        info!("{mv} ends the game: {}", next.result);
    }
    Some(next)
}

/// Play a list of coordinate-form moves (`e2e4`, `e7e8q`) from `start`.
pub fn play_moves<S: AsRef<str>>(start: &Position, moves: &[S]) -> Result<Position, ReplayError> {
    let mut pos = *start;
    for (ply, text) in moves.iter().enumerate() {
        let text = text.as_ref();
        let mv: Move = text.parse().map_err(|source| ReplayError::Parse { ply, source })?;
        pos = after_move(&pos, &mv).ok_or_else(|| ReplayError::Illegal { ply, mv: text.to_string() })?;
    }
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{CastlingRights, GameResult};
    use pretty_assertions::assert_eq;

    fn play(pos: &Position, mv: &str) -> Position {
        pos.after_move(&mv.parse().unwrap()).unwrap_or_else(|| panic!("{mv} should be legal"))
    }

    fn sq(s: &str) -> Coord { s.parse().unwrap() }

    #[test]
    fn double_step_sets_skipped_square() {
        let p = play(&Position::initial(), "e2e4");
        assert_eq!(p.en_passant(), Some(sq("e3")));
        assert_eq!(p.turn(), Color::Black);
        let p = play(&p, "g8f6");
        assert_eq!(p.en_passant(), None);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let p = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let next = play(&p, "e5d6");
        assert_eq!(next.piece_at(sq("d5")), None);
        assert_eq!(next.piece_at(sq("d6")), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(next.board().occupied().count(), 3);
    }

    #[test]
    fn castling_moves_the_rook() {
        let p = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = play(&p, "e1g1");
        assert_eq!(next.piece_at(sq("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(next.piece_at(sq("h1")), None);
        assert_eq!(next.castling(), CastlingRights::new(false, false, true, true));
        let next = play(&next, "e8c8");
        assert_eq!(next.piece_at(sq("d8")), Some(Piece::new(Color::Black, PieceKind::Rook)));
        assert_eq!(next.piece_at(sq("a8")), None);
        assert_eq!(next.castling(), CastlingRights::NONE);
    }

    #[test]
    fn capturing_a_home_rook_clears_its_right() {
        let p = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = play(&p, "a1a8");
        assert_eq!(next.castling(), CastlingRights::new(true, false, true, false));
    }

    #[test]
    fn promotion_places_the_chosen_piece() {
        let p = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let next = play(&p, "b7b8n");
        assert_eq!(next.piece_at(sq("b8")), Some(Piece::new(Color::White, PieceKind::Knight)));
        assert_eq!(next.piece_at(sq("b7")), None);
    }

    #[test]
    fn illegal_move_is_rejected_without_change() {
        let p = Position::initial();
        assert_eq!(p.after_move(&"e2e5".parse().unwrap()), None);
        assert_eq!(p.after_move(&"e7e5".parse().unwrap()), None);
        assert_eq!(p.result(), GameResult::Ongoing);
    }

    #[test]
    fn move_lists_replay_or_report_the_bad_ply() {
        let p = play_moves(&Position::initial(), &["e2e4", "e7e5", "g1f3"]).unwrap();
        assert_eq!(p.turn(), Color::Black);
        let err = play_moves(&Position::initial(), &["e2e4", "e2e4"]).unwrap_err();
        assert_eq!(err, ReplayError::Illegal { ply: 1, mv: "e2e4".into() });
        assert!(matches!(play_moves(&Position::initial(), &["zz"]), Err(ReplayError::Parse { ply: 0, .. })));
    }
}
