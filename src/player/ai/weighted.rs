use super::evaluator::{Evaluator, HeuristicEvaluator};
use crate::core::{Board, Move};
use crate::player::PlayerController;
use rand::distributions::{Distribution, WeightedIndex};
use rand::prelude::*;
use std::cell::RefCell;

/// Picks one item with probability proportional to `weight(item)`.
///
/// Negative or NaN weights count as zero. If no item has positive weight the
/// draw is uniform. `None` only for an empty slice.
pub fn weighted_choice<'a, T, R, F>(items: &'a [T], weight: F, rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> f64,
{
    if items.is_empty() {
        return None;
    }
    let weights = items.iter().map(|item| {
        let w = weight(item);
        if w.is_finite() && w > 0.0 {
            w
        } else {
            0.0
        }
    });
    match WeightedIndex::new(weights) {
        Ok(dist) => Some(&items[dist.sample(rng)]),
        Err(_) => items.choose(rng),
    }
}

/// Samples moves from a softmax over one-ply evaluations.
pub struct WeightedRandomAI<E: Evaluator = HeuristicEvaluator> {
    pub name: String,
    pub temperature: f64,
    evaluator: E,
    rng: RefCell<StdRng>,
}

impl WeightedRandomAI<HeuristicEvaluator> {
    pub fn new(name: &str) -> Self {
        Self::with_evaluator(name, HeuristicEvaluator::default())
    }
}

impl<E: Evaluator> WeightedRandomAI<E> {
    pub fn with_evaluator(name: &str, evaluator: E) -> Self {
        Self {
            name: name.to_string(),
            temperature: 1.0,
            evaluator,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RefCell::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Softmax-like probability distribution from scores
    fn get_probabilities(&self, board: &Board, moves: &[Move]) -> Vec<f64> {
        let me = board.current_player();
        let scores: Vec<f64> = moves
            .iter()
            .map(|&mv| {
                let mut next_board = board.clone();
                next_board.apply_move(mv);
                self.evaluator.evaluate(&next_board, me)
            })
            .collect();

        if scores.is_empty() {
            return vec![];
        }

        let temperature = self.temperature.max(f64::EPSILON);
        let max_score = scores.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let exps: Vec<f64> = scores
            .iter()
            .map(|&s| ((s - max_score) / temperature).exp())
            .collect();
        let sum_exp: f64 = exps.iter().sum();

        exps.iter().map(|&e| e / sum_exp).collect()
    }
}

impl<E: Evaluator> PlayerController for WeightedRandomAI<E> {
    fn select_move(&self, board: &Board) -> Option<Move> {
        let moves = board.legal_moves();
        let probs = self.get_probabilities(board, &moves);
        let indices: Vec<usize> = (0..moves.len()).collect();
        let mut rng = self.rng.borrow_mut();
        weighted_choice(&indices, |&i| probs[i], &mut *rng).map(|&i| moves[i])
    }

    fn name(&self) -> &str {
        &self.name
    }
}
