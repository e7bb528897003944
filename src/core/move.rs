use super::board::BOARD_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rejected move coordinates or notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("square ({row}, {col}) is off the 8x8 board")]
    OutOfBounds { row: usize, col: usize },
    #[error("cannot parse `{0}` as a square (expected a1..h8)")]
    Notation(String),
}

/// 着手 (0-indexed の行・列)
///
/// The bounds are checked once at construction, so every `Move` held by the
/// engine addresses a real square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Move {
    row: u8,
    col: u8,
}

/// Coarse square class used for move ordering. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MoveTier {
    Corner,
    Edge,
    Interior,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Result<Self, MoveError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(MoveError::OutOfBounds { row, col });
        }
        Ok(Move::at(row, col))
    }

    /// Callers guarantee `row, col < BOARD_SIZE`.
    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Move {
            row: row as u8,
            col: col as u8,
        }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    pub fn tier(self) -> MoveTier {
        let last = BOARD_SIZE - 1;
        let row_edge = self.row() == 0 || self.row() == last;
        let col_edge = self.col() == 0 || self.col() == last;
        match (row_edge, col_edge) {
            (true, true) => MoveTier::Corner,
            (true, false) | (false, true) => MoveTier::Edge,
            (false, false) => MoveTier::Interior,
        }
    }
}

impl TryFrom<(usize, usize)> for Move {
    type Error = MoveError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Move::new(row, col)
    }
}

impl From<Move> for (usize, usize) {
    fn from(mv: Move) -> Self {
        (mv.row(), mv.col())
    }
}

/// Standard Othello notation: column letter, then 1-based row (`(2, 3)` is `d3`).
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || MoveError::Notation(s.to_string());
        let mut chars = s.trim().chars();
        let file = chars.next().ok_or_else(bad)?.to_ascii_lowercase();
        let rank: usize = chars.as_str().parse().map_err(|_| bad())?;
        if !file.is_ascii_lowercase() || rank == 0 {
            return Err(bad());
        }
        let col = (file as u8 - b'a') as usize;
        Move::new(rank - 1, col).map_err(|_| bad())
    }
}
