use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::apply::after_move;
use crate::error::FenError;
use crate::fen::STARTPOS;
use crate::legal::legal_moves;
use crate::moves::Move;
use crate::position::{GameResult, Position};

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub seed: u64,
    pub start_fen: Option<String>, // defaults to the initial position
    pub openings_path: Option<PathBuf>, // optional FEN list (one per line); overrides start_fen
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 16, max_plies: 200, seed: 42, start_fen: None, openings_path: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub start_fen: String,
    pub moves: Vec<String>,
    pub result: GameResult,
    pub final_fen: String,
}

/// Play `params.games` games of uniformly random legal moves.
///
/// Deterministic per seed regardless of thread count: game `i` draws from its own
/// generator seeded with `seed ^ i`.
pub fn generate_games(params: &SelfPlayParams) -> Result<Vec<GameRecord>, FenError> {
    generate_games_with(params, |_| {})
}

/// As [`generate_games`], calling `on_game` as each game finishes (from worker threads).
pub fn generate_games_with<F>(params: &SelfPlayParams, on_game: F) -> Result<Vec<GameRecord>, FenError>
where
    F: Fn(&GameRecord) + Sync,
{
    let starts = start_positions(params)?;
    let games = (0..params.games)
        .into_par_iter()
        .map(|gi| {
            let mut rng = SmallRng::seed_from_u64(params.seed ^ gi as u64);
            let start = starts[rng.gen_range(0..starts.len())];
            let record = play_random_game(&start, params.max_plies, &mut rng);
            on_game(&record);
            record
        })
        .collect();
    Ok(games)
}

pub fn play_random_game(start: &Position, max_plies: usize, rng: &mut SmallRng) -> GameRecord {
    let mut pos = *start;
    let mut moves = Vec::new();
    while moves.len() < max_plies && !pos.result().is_terminal() {
        let Some(mv) = select_random_move(&pos, rng) else { break };
        // Chosen from the legal list, so this cannot be rejected.
        let Some(next) = after_move(&pos, &mv) else { break };
        moves.push(mv.to_string());
        pos = next;
    }
    GameRecord { start_fen: start.to_fen(), moves, result: pos.result(), final_fen: pos.to_fen() }
}

fn select_random_move(pos: &Position, rng: &mut SmallRng) -> Option<Move> {
    let moves = legal_moves(pos);
    if moves.is_empty() { None } else { Some(moves[rng.gen_range(0..moves.len())]) }
}

fn start_positions(params: &SelfPlayParams) -> Result<Vec<Position>, FenError> {
    if let Some(ref path) = params.openings_path {
        let openings = load_openings(path);
        if !openings.is_empty() {
            return Ok(openings);
        }
        log::warn!("no usable openings in {}, falling back to start position", path.display());
    }
    let fen = params.start_fen.as_deref().unwrap_or(STARTPOS);
    Ok(vec![Position::from_fen(fen)?])
}

/// Non-terminal positions from a FEN-per-line file; blank lines, `#` comments and bad FENs are skipped.
pub fn load_openings<P: AsRef<Path>>(path: P) -> Vec<Position> {
    let Ok(f) = File::open(path.as_ref()) else {
        log::warn!("cannot open openings file {}", path.as_ref().display());
        return Vec::new();
    };
    BufReader::new(f)
        .lines()
        .map_while(Result::ok)
        .filter(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
        .filter_map(|l| match Position::from_fen(l.trim()) {
            Ok(p) if !p.result().is_terminal() => Some(p),
            Ok(_) => None,
            Err(e) => {
                log::debug!("skipping opening {:?}: {e}", l.trim());
                None
            }
        })
        .collect()
}

/// One JSON object per line.
pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], path: P) -> anyhow::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_jsonl<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<GameRecord>> {
    let rdr = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for line in rdr.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}
