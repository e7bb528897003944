use super::config::AIConfig;
use super::evaluator::{Evaluator, HeuristicEvaluator};
use super::pst;
use super::weighted::weighted_choice;
use crate::core::{Board, Move, PlayerId};
use crate::player::PlayerController;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};

/// How an opponent chance node turns its replies into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceModel {
    /// Flip a coin per node: a weighted-random reply with probability `p`,
    /// the best reply for the opponent otherwise.
    #[default]
    Sampled,
    /// `p * E[weighted reply] + (1 - p) * min`. Deterministic.
    Expected,
}

/// Searches against an opponent who sometimes plays a positional guess
/// instead of the strongest reply.
pub struct ExpectimaxAI<E: Evaluator = HeuristicEvaluator> {
    pub name: String,
    pub depth: usize,
    opponent_randomness: f64,
    chance_model: ChanceModel,
    samples: usize,
    evaluator: E,
    rng: RefCell<StdRng>,
    nodes_evaluated: Cell<usize>,
}

impl ExpectimaxAI<HeuristicEvaluator> {
    pub fn new(name: &str) -> Self {
        let config = AIConfig::get();
        Self::with_evaluator(
            name,
            config.search.expectimax_depth,
            HeuristicEvaluator::new(config.evaluation.expectimax.clone()),
        )
        .with_randomness(config.search.opponent_randomness)
        .with_samples(config.search.expectimax_samples)
    }
}

impl<E: Evaluator> ExpectimaxAI<E> {
    pub fn with_evaluator(name: &str, depth: usize, evaluator: E) -> Self {
        Self {
            name: name.to_string(),
            depth: depth.max(1),
            opponent_randomness: 0.3,
            chance_model: ChanceModel::default(),
            samples: 1,
            evaluator,
            rng: RefCell::new(StdRng::from_entropy()),
            nodes_evaluated: Cell::new(0),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RefCell::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Probability that the opponent plays a weighted-random reply.
    /// Clamped to `[0, 1]`.
    pub fn with_randomness(mut self, p: f64) -> Self {
        self.opponent_randomness = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self
    }

    pub fn with_chance_model(mut self, model: ChanceModel) -> Self {
        self.chance_model = model;
        self
    }

    /// Independent evaluations averaged per root move.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples.max(1);
        self
    }

    pub fn opponent_randomness(&self) -> f64 {
        self.opponent_randomness
    }

    pub fn nodes_evaluated(&self) -> usize {
        self.nodes_evaluated.get()
    }

    pub fn search_root(&self, board: &Board) -> Option<(Move, f64)> {
        self.nodes_evaluated.set(0);
        let me = board.current_player();
        let mut moves = board.legal_moves();
        moves.sort_by_key(|mv| mv.tier());

        // 期待値モードは毎回同じ値になるので1回で十分
        let samples = match self.chance_model {
            ChanceModel::Sampled => self.samples,
            ChanceModel::Expected => 1,
        };

        let mut best: Option<(Move, f64)> = None;
        for mv in moves {
            let mut next_board = board.clone();
            next_board.apply_move(mv);
            let total: f64 = (0..samples)
                .map(|_| self.expectimax(&next_board, self.depth - 1, false, me))
                .sum();
            let value = total / samples as f64;

            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((mv, value));
            }
        }

        if let Some((mv, value)) = best {
            log::debug!(
                "{}: {} (value {:.2}, depth {}, p {:.2}, {:?}, {} nodes)",
                self.name,
                mv,
                value,
                self.depth,
                self.opponent_randomness,
                self.chance_model,
                self.nodes_evaluated()
            );
        }
        best
    }

    fn expectimax(
        &self,
        board: &Board,
        depth: usize,
        is_maximizing: bool,
        perspective: PlayerId,
    ) -> f64 {
        self.nodes_evaluated.set(self.nodes_evaluated.get() + 1);

        if depth == 0 {
            return self.evaluator.evaluate(board, perspective);
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            let mut passed = board.clone();
            passed.pass();
            if !passed.has_legal_move() {
                return self.evaluator.evaluate(board, perspective);
            }
            return self.expectimax(&passed, depth - 1, !is_maximizing, perspective);
        }

        let child_value = |mv: Move, maximizing: bool| {
            let mut next_board = board.clone();
            next_board.apply_move(mv);
            self.expectimax(&next_board, depth - 1, maximizing, perspective)
        };

        if is_maximizing {
            return moves
                .iter()
                .map(|&mv| child_value(mv, false))
                .fold(f64::NEG_INFINITY, f64::max);
        }

        let p = self.opponent_randomness;
        match self.chance_model {
            ChanceModel::Sampled => {
                let random_reply = p > 0.0 && {
                    let mut rng = self.rng.borrow_mut();
                    rng.gen::<f64>() < p
                };
                if random_reply {
                    let picked = {
                        let mut rng = self.rng.borrow_mut();
                        weighted_choice(&moves, |&mv| pst::draw_weight(mv), &mut *rng).copied()
                    };
                    if let Some(mv) = picked {
                        return child_value(mv, true);
                    }
                }
                moves
                    .iter()
                    .map(|&mv| child_value(mv, true))
                    .fold(f64::INFINITY, f64::min)
            }
            ChanceModel::Expected => {
                let values: Vec<f64> = moves.iter().map(|&mv| child_value(mv, true)).collect();
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                if p == 0.0 {
                    return min;
                }
                let weights: Vec<f64> = moves.iter().map(|&mv| pst::draw_weight(mv)).collect();
                p * weighted_mean(&values, &weights) + (1.0 - p) * min
            }
        }
    }
}

/// Mean of `values` under `weights`; plain mean when the weights sum to zero.
fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        values.iter().zip(weights).map(|(v, w)| v * w).sum::<f64>() / total
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl<E: Evaluator> PlayerController for ExpectimaxAI<E> {
    fn select_move(&self, board: &Board) -> Option<Move> {
        self.search_root(board).map(|(mv, _)| mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ai::eval::EvalWeights;
    use crate::player::ai::evaluator::PieceCountEvaluator;
    use crate::player::ai::minimax::MinimaxAI;

    fn engine(depth: usize) -> ExpectimaxAI {
        ExpectimaxAI::with_evaluator(
            "Expectimax AI",
            depth,
            HeuristicEvaluator::new(EvalWeights::stability()),
        )
        .with_seed(42)
    }

    fn midgame() -> Board {
        Board::from_rows(
            &[
                ". . . . . . . .",
                ". . . . . . . .",
                ". . W B B . . .",
                ". . . W B W . .",
                ". . B B W B . .",
                ". . . W . W . .",
                ". . . . . . . .",
                ". . . . . . . .",
            ],
            PlayerId::Black,
        )
        .unwrap()
    }

    #[test]
    fn test_returns_a_legal_move() {
        let board = Board::new();
        let ai = engine(3);
        for _ in 0..5 {
            let mv = ai.select_move(&board).unwrap();
            assert!(board.legal_moves().contains(&mv));
        }
    }

    #[test]
    fn test_no_randomness_matches_minimax() {
        for board in [Board::new(), midgame()] {
            for depth in 1..=3 {
                let expectimax = engine(depth).with_randomness(0.0);
                let minimax = MinimaxAI::with_evaluator(
                    "Minimax AI",
                    depth,
                    HeuristicEvaluator::new(EvalWeights::stability()),
                )
                .with_pruning(false);
                assert_eq!(
                    expectimax.search_root(&board),
                    minimax.search_root(&board),
                    "depth {}",
                    depth
                );
            }
        }
    }

    #[test]
    fn test_expected_model_is_deterministic() {
        let board = midgame();
        let a = engine(3)
            .with_seed(1)
            .with_chance_model(ChanceModel::Expected);
        let b = engine(3)
            .with_seed(999)
            .with_chance_model(ChanceModel::Expected);
        let first = a.search_root(&board);
        assert!(first.is_some());
        assert_eq!(first, b.search_root(&board));
        assert_eq!(first, a.search_root(&board));
    }

    /// Rates White holding a1 at +10, anything else by disc count.
    struct CornerTaken;

    impl Evaluator for CornerTaken {
        fn evaluate(&self, board: &Board, perspective: PlayerId) -> f64 {
            if board.get(Move::new(0, 0).unwrap()) == Some(PlayerId::White) {
                10.0
            } else {
                PieceCountEvaluator.evaluate(board, perspective)
            }
        }

        fn name(&self) -> &str {
            "corner taken"
        }
    }

    /// White to move. Of its five replies only the corner a1 has a positive
    /// square weight; every other reply is worth -3 to Black.
    fn corner_reply_board() -> Board {
        Board::from_rows(
            &[
                ". B W . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . B W . . .",
                ". . . W B . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
            ],
            PlayerId::White,
        )
        .unwrap()
    }

    fn chance_engine(model: ChanceModel, p: f64) -> ExpectimaxAI<CornerTaken> {
        ExpectimaxAI::with_evaluator("Expectimax AI", 1, CornerTaken)
            .with_chance_model(model)
            .with_randomness(p)
    }

    #[test]
    fn test_expected_value_sits_between_min_and_weighted_mean() {
        let board = corner_reply_board();
        let value = |p: f64| {
            chance_engine(ChanceModel::Expected, p).expectimax(&board, 1, false, PlayerId::Black)
        };
        assert_eq!(value(0.0), -3.0);
        assert_eq!(value(1.0), 10.0);
        assert!((value(0.5) - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_sampled_random_reply_follows_square_weights() {
        let board = corner_reply_board();
        let min = chance_engine(ChanceModel::Sampled, 0.0)
            .expectimax(&board, 1, false, PlayerId::Black);
        assert_eq!(min, -3.0);

        for seed in 0..20 {
            let ai = chance_engine(ChanceModel::Sampled, 1.0).with_seed(seed);
            let value = ai.expectimax(&board, 1, false, PlayerId::Black);
            // only a1 can be drawn, so the node is worth exactly that reply
            assert_eq!(value, 10.0, "seed {}", seed);
        }
    }

    #[test]
    fn test_randomness_is_clamped() {
        assert_eq!(engine(1).with_randomness(3.0).opponent_randomness(), 1.0);
        assert_eq!(engine(1).with_randomness(-1.0).opponent_randomness(), 0.0);
    }

    #[test]
    fn test_samples_keep_moves_legal() {
        let board = midgame();
        let ai = engine(2).with_randomness(1.0).with_samples(4);
        let mv = ai.select_move(&board).unwrap();
        assert!(board.legal_moves().contains(&mv));
    }

    #[test]
    fn test_no_legal_move_gives_none() {
        let board = Board::from_rows(
            &[
                "B B B B B B B B",
                "B B B B B B B B",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
            ],
            PlayerId::White,
        )
        .unwrap();
        assert_eq!(engine(2).select_move(&board), None);
    }
}
