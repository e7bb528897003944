use serde::{Deserialize, Serialize};
use std::fmt;

/// プレイヤー (石の色)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Black, // 先手
    White, // 後手
}

impl Default for PlayerId {
    fn default() -> Self {
        PlayerId::Black
    }
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::Black => PlayerId::White,
            PlayerId::White => PlayerId::Black,
        }
    }

    /// Single-character form used by board diagrams.
    pub fn symbol(self) -> char {
        match self {
            PlayerId::Black => 'B',
            PlayerId::White => 'W',
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerId::Black => write!(f, "Black"),
            PlayerId::White => write!(f, "White"),
        }
    }
}
