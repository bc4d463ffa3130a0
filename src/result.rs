use crate::attacks::in_check;
use crate::legal::has_legal_move;
use crate::position::{GameResult, Position};

/// Game result for `pos` with its side to move about to play.
///
/// No legal move while in check is a loss for the side to move; without check
/// it is stalemate. Ignores any result already stored on `pos`.
pub fn evaluate_result(pos: &Position) -> GameResult {
    let mut probe = *pos;
    probe.result = GameResult::Ongoing;
    if has_legal_move(&probe) {
        GameResult::Ongoing
    } else if in_check(&probe) {
        GameResult::checkmated(probe.turn)
    } else {
        GameResult::Stalemate
    }
}
