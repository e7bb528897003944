//! Evaluator trait for board evaluation
//!
//! Search engines hold an evaluator by composition and call it at their leaves.

use super::eval::{self, EvalWeights};
use crate::core::{Board, PlayerId};

/// Trait for evaluating board positions
pub trait Evaluator: Send + Sync {
    /// Evaluate the board from `perspective`'s point of view
    ///
    /// Returns:
    ///   - Positive score: `perspective` is ahead
    ///   - Negative score: the opponent is ahead
    ///   - Zero: Equal position
    fn evaluate(&self, board: &Board, perspective: PlayerId) -> f64;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}

/// Weighted blend of the terms in [`eval`].
#[derive(Debug, Clone)]
pub struct HeuristicEvaluator {
    weights: EvalWeights,
}

impl HeuristicEvaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new(EvalWeights::default())
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &Board, perspective: PlayerId) -> f64 {
        eval::evaluate(board, perspective, &self.weights)
    }

    fn name(&self) -> &str {
        if self.weights.phased {
            "heuristic (phased)"
        } else {
            "heuristic"
        }
    }
}

/// Disc difference only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceCountEvaluator;

impl Evaluator for PieceCountEvaluator {
    fn evaluate(&self, board: &Board, perspective: PlayerId) -> f64 {
        eval::material(board, perspective)
    }

    fn name(&self) -> &str {
        "piece count"
    }
}
