use super::r#move::Move;
use super::types::PlayerId;
use crate::logic;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: usize = 8;

/// 盤面 (局面)
///
/// Holds the 8x8 grid and the side to move. `Clone` is a full deep copy, which
/// is what every search branch relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub(crate) cells: [[Option<PlayerId>; BOARD_SIZE]; BOARD_SIZE],
    current_player: PlayerId,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Canonical start: White on d4/e5, Black on e4/d5, Black to move.
    pub fn new() -> Self {
        let mut board = Board::empty(PlayerId::Black);
        let c = BOARD_SIZE / 2;
        board.cells[c - 1][c - 1] = Some(PlayerId::White);
        board.cells[c - 1][c] = Some(PlayerId::Black);
        board.cells[c][c - 1] = Some(PlayerId::Black);
        board.cells[c][c] = Some(PlayerId::White);
        board
    }

    pub(crate) fn empty(current_player: PlayerId) -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
            current_player,
        }
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn get(&self, mv: Move) -> Option<PlayerId> {
        self.cells[mv.row()][mv.col()]
    }

    pub(crate) fn place_piece(&mut self, mv: Move, player: PlayerId) {
        self.cells[mv.row()][mv.col()] = Some(player);
    }

    pub fn is_valid_move(&self, mv: Move) -> bool {
        logic::is_valid_move_for(self, mv, self.current_player)
    }

    /// Discs the side to move would flip by playing `mv`.
    pub fn flips_for(&self, mv: Move) -> Vec<Move> {
        logic::flips_for(self, mv, self.current_player)
    }

    /// 着手: returns `false` and leaves the board untouched if `mv` is illegal.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        let flips = self.flips_for(mv);
        if flips.is_empty() {
            return false;
        }

        let player = self.current_player;
        self.place_piece(mv, player);
        for f in flips {
            self.place_piece(f, player);
        }
        self.current_player = player.opponent();
        true
    }

    /// Hands the turn to the opponent without placing a disc.
    pub fn pass(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Row-major list of the side to move's legal squares. Recomputed per call.
    pub fn legal_moves(&self) -> Vec<Move> {
        logic::legal_moves_for(self, self.current_player)
    }

    pub fn has_legal_move(&self) -> bool {
        logic::has_legal_move(self, self.current_player)
    }

    /// 終局判定: neither colour can move.
    pub fn is_terminal(&self) -> bool {
        !logic::has_legal_move(self, self.current_player)
            && !logic::has_legal_move(self, self.current_player.opponent())
    }

    /// (black, white)
    pub fn score(&self) -> (usize, usize) {
        let mut black = 0;
        let mut white = 0;
        for cell in self.cells.iter().flatten() {
            match cell {
                Some(PlayerId::Black) => black += 1,
                Some(PlayerId::White) => white += 1,
                None => {}
            }
        }
        (black, white)
    }

    pub fn count(&self, player: PlayerId) -> usize {
        let (black, white) = self.score();
        match player {
            PlayerId::Black => black,
            PlayerId::White => white,
        }
    }

    pub fn total_discs(&self) -> usize {
        let (black, white) = self.score();
        black + white
    }

    /// Player with more discs, `None` on a tie.
    pub fn leader(&self) -> Option<PlayerId> {
        let (black, white) = self.score();
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(PlayerId::Black),
            std::cmp::Ordering::Less => Some(PlayerId::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "{}", r + 1)?;
            for cell in row {
                let ch = cell.map(PlayerId::symbol).unwrap_or('.');
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "{} to move", self.current_player)
    }
}
