use chesscore::selfplay::{generate_games_with, write_jsonl, SelfPlayParams};
use chesscore::GameResult;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chesscore-selfplay", about = "Generate random-move games and write them as JSON lines")]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Start every game from this FEN instead of the initial position
    #[arg(long)]
    fen: Option<String>,
    /// File of FENs (one per line) to pick start positions from
    #[arg(long)]
    openings: Option<PathBuf>,
    #[arg(long, default_value = "out/games.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        seed: a.seed,
        start_fen: a.fen,
        openings_path: a.openings,
    };
    eprintln!("Generating {} games (max_plies={}, threads={}, seed={})", a.games, a.max_plies, a.threads, a.seed);

    let bar = ProgressBar::new(a.games as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}]")?);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(a.threads.max(1)).build()?;
    let games = pool.install(|| generate_games_with(&params, |_| bar.inc(1)))?;
    bar.finish();

    let count = |r: GameResult| games.iter().filter(|g| g.result == r).count();
    eprintln!(
        "white wins: {} black wins: {} stalemates: {} unfinished: {}",
        count(GameResult::WhiteWins),
        count(GameResult::BlackWins),
        count(GameResult::Stalemate),
        count(GameResult::Ongoing),
    );

    if let Some(dir) = a.out.parent() {
        std::fs::create_dir_all(dir)?;
    }
    write_jsonl(&games, &a.out)?;
    eprintln!("Wrote {} games to {}", games.len(), a.out.display());
    Ok(())
}
