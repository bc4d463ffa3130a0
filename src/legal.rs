use crate::apply::apply_move;
use crate::attacks::king_attacked;
use crate::coord::Coord;
use crate::movegen::pseudo_legal_from;
use crate::moves::Move;
use crate::piece::PieceKind;
use crate::position::Position;

/// Legal moves of the piece on `from`: pseudo-legal moves that do not leave the
/// mover's king attacked once played.
pub fn legal_moves_from(pos: &Position, from: Coord) -> Vec<Move> {
    let mover = pos.turn;
    pseudo_legal_from(pos, from)
        .into_iter()
        .filter(|mv| !king_attacked(&apply_move(pos, mv), mover))
        .collect()
}

/// Every legal move for the side to move.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    pos.friendly_coords().flat_map(|c| legal_moves_from(pos, c)).collect()
}

pub fn has_legal_move(pos: &Position) -> bool {
    pos.friendly_coords().any(|c| !legal_moves_from(pos, c).is_empty())
}

/// Destinations reachable from `from`, in generation order, each listed once.
pub fn legal_destinations(pos: &Position, from: Coord) -> Vec<Coord> {
    let mut out: Vec<Coord> = Vec::new();
    for mv in legal_moves_from(pos, from) {
        if !out.contains(&mv.to) {
            out.push(mv.to);
        }
    }
    out
}

/// Exact membership in the legal moves from `mv.from`, promotion included.
pub fn can_move(pos: &Position, mv: &Move) -> bool {
    legal_moves_from(pos, mv.from).contains(mv)
}

/// True if moving the piece on `from` to `to` needs a promotion choice.
pub fn does_need_promotion(pos: &Position, from: Coord, to: Coord) -> bool {
    pos.board.get(from).is_some_and(|p| p.kind == PieceKind::Pawn) && to.rank() == pos.turn.promotion_rank()
}
