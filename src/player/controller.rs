use crate::core::{Board, Move};

/// プレイヤー操作のtrait
///
/// `None` means the side to move has nothing to play and must pass.
pub trait PlayerController {
    fn select_move(&self, board: &Board) -> Option<Move>;
    fn name(&self) -> &str;
}
