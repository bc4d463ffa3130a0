use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::MoveParseError;
use crate::piece::PieceKind;

/// A move of the piece on `from` to `to`.
///
/// `promotes_to` is set exactly when a pawn reaches the opponent's back rank.
/// Castling is written as the king's two-file move (`e1g1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub promotes_to: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to, promotes_to: None }
    }

    #[inline]
    pub const fn promoting(from: Coord, to: Coord, kind: PieceKind) -> Self {
        Self { from, to, promotes_to: Some(kind) }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotes_to {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(MoveParseError::BadLength(s.to_string()));
        }
        let from: Coord = s[0..2].parse()?;
        let to: Coord = s[2..4].parse()?;
        // Any piece letter parses; whether it is a legal promotion is the rules' call.
        let promotes_to = match s[4..].chars().next() {
            None => None,
            Some(c) => Some(PieceKind::from_char(c).ok_or(MoveParseError::UnexpectedPromotion(c))?),
        };
        Ok(Move { from, to, promotes_to })
    }
}
