use crate::core::{Move, BOARD_SIZE};

// Square weights for Othello, same for both colours.
// Row 0 is the top edge. The table is symmetric under both mirrors and the
// transpose, so orientation does not matter.
//
// Corners are worth the most. X-squares (diagonal to a corner) and C-squares
// (orthogonal to a corner) hand the corner to the opponent and are penalised.
pub const POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

/// Largest entry of the table, used to normalise bonuses to `[-0.5, 1.0]`.
pub const MAX_WEIGHT: i32 = 100;

pub fn get_pst_value(mv: Move) -> i32 {
    POSITION_WEIGHTS[mv.row()][mv.col()]
}

/// Non-negative weight for weighted-random draws. Penalised squares get 0.
pub fn draw_weight(mv: Move) -> f64 {
    get_pst_value(mv).max(0) as f64
}
