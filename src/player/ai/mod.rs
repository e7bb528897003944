pub mod config;
pub mod eval;
pub mod evaluator;
pub mod expectimax;
pub mod mcts;
pub mod minimax;
pub mod pst;
pub mod random;
pub mod tree;
pub mod weighted;

pub use config::AIConfig;
pub use evaluator::{Evaluator, HeuristicEvaluator, PieceCountEvaluator};
pub use expectimax::{ChanceModel, ExpectimaxAI};
pub use mcts::{MctsAI, Playout};
pub use minimax::MinimaxAI;
pub use random::RandomAI;
pub use weighted::WeightedRandomAI;

use crate::player::PlayerController;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine families that can be picked by name at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    Minimax,
    Expectimax,
    Mcts,
    Random,
    Weighted,
}

impl EngineKind {
    pub const ALL: [EngineKind; 5] = [
        EngineKind::Minimax,
        EngineKind::Expectimax,
        EngineKind::Mcts,
        EngineKind::Random,
        EngineKind::Weighted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EngineKind::Minimax => "Minimax AI",
            EngineKind::Expectimax => "Expectimax AI",
            EngineKind::Mcts => "MCTS AI",
            EngineKind::Random => "Random AI",
            EngineKind::Weighted => "Weighted AI",
        }
    }

    /// Builds a fresh engine from `config`. Stochastic engines are seeded when
    /// `seed` is given.
    pub fn build(self, config: &AIConfig, seed: Option<u64>) -> Box<dyn PlayerController> {
        let name = self.label();
        let search = &config.search;
        match self {
            EngineKind::Minimax => Box::new(MinimaxAI::with_evaluator(
                name,
                search.minimax_depth,
                HeuristicEvaluator::new(config.evaluation.minimax.clone()),
            )),
            EngineKind::Expectimax => {
                let ai = ExpectimaxAI::with_evaluator(
                    name,
                    search.expectimax_depth,
                    HeuristicEvaluator::new(config.evaluation.expectimax.clone()),
                )
                .with_randomness(search.opponent_randomness)
                .with_samples(search.expectimax_samples);
                Box::new(match seed {
                    Some(seed) => ai.with_seed(seed),
                    None => ai,
                })
            }
            EngineKind::Mcts => {
                let ai = MctsAI::with_params(name, search.mcts_iterations, search.exploration_weight)
                    .with_position_bonus(search.position_bonus);
                Box::new(match seed {
                    Some(seed) => ai.with_seed(seed),
                    None => ai,
                })
            }
            EngineKind::Random => Box::new(match seed {
                Some(seed) => RandomAI::with_seed(name, seed),
                None => RandomAI::new(name),
            }),
            EngineKind::Weighted => {
                let ai = WeightedRandomAI::with_evaluator(
                    name,
                    HeuristicEvaluator::new(config.evaluation.minimax.clone()),
                );
                Box::new(match seed {
                    Some(seed) => ai.with_seed(seed),
                    None => ai,
                })
            }
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Board;

    #[test]
    fn test_every_engine_plays_the_opening() {
        let mut config = AIConfig::default();
        config.search.minimax_depth = 2;
        config.search.expectimax_depth = 2;
        config.search.mcts_iterations = 20;

        let board = Board::new();
        for kind in EngineKind::ALL {
            let engine = kind.build(&config, Some(3));
            assert_eq!(engine.name(), kind.label());
            let mv = engine.select_move(&board).unwrap();
            assert!(board.legal_moves().contains(&mv), "{}", kind);
        }
    }

    #[test]
    fn test_config_constructors_use_the_shared_config() {
        let search = &AIConfig::get().search;
        assert_eq!(MinimaxAI::new("Minimax AI").depth, search.minimax_depth.max(1));
        assert_eq!(ExpectimaxAI::new("Expectimax AI").depth, search.expectimax_depth.max(1));
        assert_eq!(MctsAI::new("MCTS AI").iterations, search.mcts_iterations);
    }

    #[test]
    fn test_kind_serialises_as_snake_case() {
        assert_eq!(serde_json::to_string(&EngineKind::Mcts).unwrap(), "\"mcts\"");
        let kind: EngineKind = serde_json::from_str("\"expectimax\"").unwrap();
        assert_eq!(kind, EngineKind::Expectimax);
    }
}
