use anyhow::Result;
use chesscore::legal::legal_destinations;
use chesscore::{Color, Coord, GameResult, Move, PieceKind, Position};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against a random mover", long_about = None)]
struct Args {
    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// Seed for the random mover
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn parse_color(color_str: &str) -> Result<Color> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Ask for a promotion piece until one of q/r/b/n is given.
fn ask_promotion() -> Result<Option<PieceKind>> {
    loop {
        let Some(input) = read_line("Promote to (q/r/b/n): ")? else { return Ok(None) };
        match input.chars().next().and_then(PieceKind::from_char) {
            Some(kind) if kind.is_promotion_target() => return Ok(Some(kind)),
            _ => println!("Choose one of q, r, b, n"),
        }
    }
}

enum Input {
    Play(Move),
    Undo,
    Quit,
}

fn get_human_move(pos: &Position) -> Result<Input> {
    loop {
        let Some(input) = read_line("Your move (e.g. e2e4, a square like e2 to list targets, undo, quit): ")? else {
            return Ok(Input::Quit);
        };
        match input.as_str() {
            "quit" => return Ok(Input::Quit),
            "undo" => return Ok(Input::Undo),
            _ => {}
        }
        if let Ok(from) = input.parse::<Coord>() {
            let targets: Vec<String> = legal_destinations(pos, from).iter().map(|c| c.to_string()).collect();
            println!("{from}: {}", if targets.is_empty() { "no moves".to_string() } else { targets.join(" ") });
            continue;
        }
        let mut mv: Move = match input.parse() {
            Ok(mv) => mv,
            Err(e) => {
                println!("Invalid move format ({e})! Use format like 'e2e4'");
                continue;
            }
        };
        if mv.promotes_to.is_none() && pos.needs_promotion(mv.from, mv.to) {
            match ask_promotion()? {
                Some(kind) => mv.promotes_to = Some(kind),
                None => return Ok(Input::Quit),
            }
        }
        if pos.can_move(&mv) {
            return Ok(Input::Play(mv));
        }
        println!("Illegal move!");
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let human = parse_color(&args.color)?;
    let mut rng = SmallRng::seed_from_u64(args.seed);

    let mut pos = match args.fen.as_deref() {
        Some(fen) => Position::from_fen(fen).map_err(|e| anyhow::anyhow!("Invalid FEN string: {e}"))?,
        None => Position::initial(),
    };
    // Earlier positions, for undo.
    let mut history: Vec<Position> = Vec::new();

    loop {
        println!("\n{pos}");
        match pos.result() {
            GameResult::Ongoing => {}
            GameResult::WhiteWins => { println!("White wins by checkmate!"); break; }
            GameResult::BlackWins => { println!("Black wins by checkmate!"); break; }
            GameResult::Stalemate => { println!("It's a stalemate!"); break; }
        }
        if pos.in_check() {
            println!("Check!");
        }

        if pos.turn() == human {
            match get_human_move(&pos)? {
                Input::Play(mv) => {
                    if let Some(next) = pos.after_move(&mv) {
                        history.push(pos);
                        pos = next;
                    }
                }
                Input::Undo => {
                    // Take back the engine's reply and our own move.
                    if history.len() >= 2 {
                        history.pop();
                        pos = history.pop().unwrap_or(pos);
                    } else {
                        println!("Nothing to undo");
                    }
                }
                Input::Quit => {
                    println!("Thanks for playing!");
                    break;
                }
            }
        } else {
            let moves = pos.legal_moves();
            if moves.is_empty() {
                println!("No legal moves available!");
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            println!("\nEngine plays: {mv}");
            if let Some(next) = pos.after_move(&mv) {
                history.push(pos);
                pos = next;
            }
        }
    }
    println!("{} plies on the board", history.len());
    Ok(())
}
