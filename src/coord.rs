use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoordParseError;

/// A square on the 8x8 board. Both components are always in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Coord {
    file: u8,
    rank: u8,
}

impl Coord {
    /// Returns `None` unless both `file` and `rank` lie in `0..8`.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 { Some(Self { file, rank }) } else { None }
    }

    #[inline]
    pub const fn file(self) -> u8 { self.file }

    #[inline]
    pub const fn rank(self) -> u8 { self.rank }

    /// The square `df` files to the right and `dr` ranks up, if still on the board.
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if in_bounds(file, rank) { Some(Self { file: file as u8, rank: rank as u8 }) } else { None }
    }

    /// All 64 squares, file-major (a1, a2, ..., a8, b1, ...).
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..8u8).flat_map(|file| (0..8u8).map(move |rank| Coord { file, rank }))
    }

    pub(crate) const fn new_unchecked(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Self { file, rank }
    }
}

#[inline]
pub(crate) fn in_bounds(file: i8, rank: i8) -> bool {
    (0..8).contains(&file) && (0..8).contains(&rank)
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, (b'1' + self.rank) as char)
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(CoordParseError::BadLength(s.to_string()));
        }
        let file = match bytes[0] {
            c @ b'a'..=b'h' => c - b'a',
            c => return Err(CoordParseError::UnexpectedFile(c as char)),
        };
        let rank = match bytes[1] {
            c @ b'1'..=b'8' => c - b'1',
            c => return Err(CoordParseError::UnexpectedRank(c as char)),
        };
        Ok(Coord { file, rank })
    }
}

impl TryFrom<(u8, u8)> for Coord {
    type Error = CoordParseError;

    fn try_from((file, rank): (u8, u8)) -> Result<Self, Self::Error> {
        Coord::new(file, rank).ok_or(CoordParseError::OutOfRange { file, rank })
    }
}

impl From<Coord> for (u8, u8) {
    fn from(c: Coord) -> Self { (c.file, c.rank) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_out_of_range() {
        assert!(Coord::new(7, 7).is_some());
        assert!(Coord::new(8, 0).is_none());
        assert!(Coord::new(0, 8).is_none());
    }

    #[test]
    fn offset_stays_on_board() {
        let a1 = Coord::new(0, 0).unwrap();
        assert_eq!(a1.offset(1, 2), Coord::new(1, 2));
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, 8), None);
    }

    #[test]
    fn algebraic_text() {
        let e4: Coord = "e4".parse().unwrap();
        assert_eq!((e4.file(), e4.rank()), (4, 3));
        assert_eq!(e4.to_string(), "e4");
        assert_eq!("i1".parse::<Coord>(), Err(CoordParseError::UnexpectedFile('i')));
        assert_eq!("a9".parse::<Coord>(), Err(CoordParseError::UnexpectedRank('9')));
        assert!("e44".parse::<Coord>().is_err());
    }

    #[test]
    fn all_squares_are_distinct() {
        let squares: std::collections::HashSet<Coord> = Coord::all().collect();
        assert_eq!(squares.len(), 64);
    }
}
