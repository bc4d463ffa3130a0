use chesscore::perft::{perft, perft_divide, perft_parallel};
use chesscore::Position;
use clap::Parser;
use std::time::Instant;

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for chesscore")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Print node counts per root move
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Also count with cozy-chess and compare
    #[arg(long, default_value_t = false)]
    compare: bool,
}

#[cfg(feature = "cozy-compare")]
fn cozy_perft(board: &cozy_chess::Board, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut nodes = 0u64;
    board.generate_moves(|moves| {
        for m in moves {
            let mut child = board.clone();
            child.play(m);
            nodes += cozy_perft(&child, depth - 1);
        }
        false
    });
    nodes
}

#[cfg(feature = "cozy-compare")]
fn cozy_count(fen: &str, depth: u32) -> anyhow::Result<u64> {
    let board = if fen == "startpos" {
        cozy_chess::Board::default()
    } else {
        cozy_chess::Board::from_fen(fen, false).map_err(|e| anyhow::anyhow!("cozy-chess rejected FEN: {e:?}"))?
    };
    Ok(cozy_perft(&board, depth))
}

#[cfg(not(feature = "cozy-compare"))]
fn cozy_count(_fen: &str, _depth: u32) -> anyhow::Result<u64> {
    anyhow::bail!("--compare requires the cozy-compare feature")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let pos = Position::from_fen(&args.fen).map_err(|e| anyhow::anyhow!("Invalid FEN: {e}"))?;

    if args.divide {
        let mut total = 0u64;
        for (mv, nodes) in perft_divide(&pos, args.depth) {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!("\nnodes: {total}");
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 { perft(&pos, args.depth) } else { perft_parallel(&pos, args.depth) };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }

    if args.compare {
        let reference = cozy_count(&args.fen, args.depth)?;
        if reference == nodes {
            println!("cozy-chess agrees: {reference}");
        } else {
            anyhow::bail!("mismatch: chesscore={nodes} cozy-chess={reference}");
        }
    }
    Ok(())
}
