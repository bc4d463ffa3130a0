// Perft: leaf counts of the legal move tree, for validating move generation.
use log::trace;
use rayon::prelude::*;

use crate::apply::apply_move;
use crate::legal::legal_moves;
use crate::moves::Move;
use crate::position::Position;

pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = legal_moves(pos);
    if depth == 1 { return moves.len() as u64; }
    moves.iter().map(|mv| perft(&apply_move(pos, mv), depth - 1)).sum()
}

/// Node counts per root move.
pub fn perft_divide(pos: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 { return Vec::new(); }
    legal_moves(pos)
        .into_iter()
        .map(|mv| {
            let nodes = perft(&apply_move(pos, &mv), depth - 1);
            trace!("{mv}: {nodes}");
            (mv, nodes)
        })
        .collect()
}

/// Root-split perft over the current rayon pool.
pub fn perft_parallel(pos: &Position, depth: u32) -> u64 {
    if depth <= 1 { return perft(pos, depth); }
    legal_moves(pos)
        .par_iter()
        .map(|mv| perft(&apply_move(pos, mv), depth - 1))
        .sum()
}
