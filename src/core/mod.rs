pub mod board;
pub mod r#move;
pub mod setup;
pub mod types;

pub use board::{Board, BOARD_SIZE};
pub use r#move::{Move, MoveError, MoveTier};
pub use setup::{setup_from_strings, SetupError};
pub use types::PlayerId;

/// New game at the canonical four-disc start, Black to move.
pub fn new_game() -> Board {
    Board::new()
}
