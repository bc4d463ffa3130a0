//! FEN import and export.
//!
//! Move clocks are not tracked: the last two fields are ignored on input and
//! written as `0 1`.

use crate::coord::Coord;
use crate::error::FenError;
use crate::piece::{Color, Piece};
use crate::position::{BoardArray, CastlingRights, GameResult, Position, Side};
use crate::result::evaluate_result;

pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a FEN string. `"startpos"` is accepted as the initial position.
    ///
    /// The game result is recomputed from the parsed position.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        if fen.trim() == "startpos" {
            return Ok(Position::initial());
        }
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::MissingFields(fields.len()));
        }
        let board = parse_placement(fields[0])?;
        let turn = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::UnexpectedTurn(other.to_string())),
        };
        let castling = parse_castling(fields[2])?;
        let en_passant = match fields[3] {
            "-" => None,
            sq => Some(sq.parse::<Coord>()?),
        };
        let mut pos = Position::from_parts(board, turn, castling, en_passant, GameResult::Ongoing)?;
        pos.result = evaluate_result(&pos);
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board.piece_at(file, rank) {
                    Some(p) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(p.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out.push_str(match self.turn { Color::White => " w ", Color::Black => " b " });
        let before = out.len();
        for (color, side, c) in CASTLING_CHARS {
            if self.castling.has(color, side) {
                out.push(c);
            }
        }
        if out.len() == before {
            out.push('-');
        }
        match self.en_passant {
            Some(sq) => out.push_str(&format!(" {sq}")),
            None => out.push_str(" -"),
        }
        out.push_str(" 0 1");
        out
    }
}

const CASTLING_CHARS: [(Color, Side, char); 4] = [
    (Color::White, Side::Kingside, 'K'),
    (Color::White, Side::Queenside, 'Q'),
    (Color::Black, Side::Kingside, 'k'),
    (Color::Black, Side::Queenside, 'q'),
];

fn parse_placement(field: &str) -> Result<BoardArray, FenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::RankCount(rows.len()));
    }
    let mut board: BoardArray = [[None; 8]; 8];
    // FEN lists rank 8 first.
    for (i, row) in rows.iter().enumerate() {
        let rank = 7 - i;
        let mut file = 0usize;
        for ch in row.chars() {
            if let Some(n) = ch.to_digit(10).filter(|n| (1..=8).contains(n)) {
                file += n as usize;
            } else {
                let piece = Piece::from_char(ch).ok_or(FenError::UnexpectedPiece(ch))?;
                if file >= 8 {
                    return Err(FenError::RankWidth { rank: rank + 1 });
                }
                board[file][rank] = Some(piece);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::RankWidth { rank: rank + 1 });
            }
        }
        if file != 8 {
            return Err(FenError::RankWidth { rank: rank + 1 });
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    for ch in field.chars() {
        let (color, side, _) = CASTLING_CHARS
            .iter()
            .copied()
            .find(|&(_, _, c)| c == ch)
            .ok_or(FenError::UnexpectedCastling(ch))?;
        rights.grant(color, side);
    }
    Ok(rights)
}
