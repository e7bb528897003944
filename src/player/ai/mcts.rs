use super::config::AIConfig;
use super::pst;
use super::tree::{NodeId, SearchTree};
use super::weighted::weighted_choice;
use crate::core::{Board, Move, PlayerId};
use crate::player::PlayerController;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Move policy used by random playouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playout {
    #[default]
    Uniform,
    /// Drawn in proportion to the (non-negative) square weights.
    Weighted,
}

/// Monte Carlo Tree Search with UCT selection.
pub struct MctsAI {
    pub name: String,
    pub iterations: usize,
    pub exploration_weight: f64,
    position_bonus: f64,
    playout: Playout,
    rng: RefCell<StdRng>,
}

impl MctsAI {
    pub fn new(name: &str) -> Self {
        let search = &AIConfig::get().search;
        Self::with_params(name, search.mcts_iterations, search.exploration_weight)
            .with_position_bonus(search.position_bonus)
    }

    pub fn with_params(name: &str, iterations: usize, exploration_weight: f64) -> Self {
        Self {
            name: name.to_string(),
            iterations,
            exploration_weight,
            position_bonus: 0.0,
            playout: Playout::default(),
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RefCell::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Adds `bonus * weight / 100` for the square a child moved to.
    pub fn with_position_bonus(mut self, bonus: f64) -> Self {
        self.position_bonus = bonus;
        self
    }

    pub fn with_playout(mut self, playout: Playout) -> Self {
        self.playout = playout;
        self
    }

    /// Runs every iteration from `board` and returns the resulting tree.
    pub fn build_tree(&self, board: &Board) -> SearchTree {
        let me = board.current_player();
        let mut tree = SearchTree::new(board.clone());

        for _ in 0..self.iterations {
            let leaf = self.select(&tree);
            let node = if tree.get(leaf).is_fully_expanded() {
                leaf
            } else {
                self.expand(&mut tree, leaf)
            };
            let result = self.simulate(&tree.get(node).board, me);
            tree.backpropagate(node, result);
        }
        tree
    }

    /// Descends through fully expanded nodes by UCT.
    fn select(&self, tree: &SearchTree) -> NodeId {
        let mut id = tree.root();
        loop {
            let node = tree.get(id);
            if !node.is_fully_expanded() || node.children.is_empty() {
                return id;
            }
            match tree.select_uct(id, self.exploration_weight, self.position_bonus) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    /// 角 → 辺 → 内側 の順で未展開の手を一つ選び、子ノードを追加する
    fn expand(&self, tree: &mut SearchTree, id: NodeId) -> NodeId {
        let mv = {
            let untried = &tree.get(id).untried;
            let best_tier = untried.iter().map(|mv| mv.tier()).min();
            let candidates: Vec<Move> = untried
                .iter()
                .copied()
                .filter(|mv| Some(mv.tier()) == best_tier)
                .collect();
            match candidates.choose(&mut *self.rng.borrow_mut()) {
                Some(&mv) => mv,
                None => return id,
            }
        };

        let node = tree.get_mut(id);
        node.untried.retain(|&m| m != mv);
        let mut board = node.board.clone();
        board.apply_move(mv);
        if !board.has_legal_move() && !board.is_terminal() {
            // 相手は打てないのでパスした局面を保存する
            board.pass();
        }
        tree.add_child(id, mv, board)
    }

    /// Plays to the end and scores 1.0 if `me` has strictly more discs.
    fn simulate(&self, board: &Board, me: PlayerId) -> f64 {
        let mut board = board.clone();
        let mut rng = self.rng.borrow_mut();
        loop {
            let moves = board.legal_moves();
            if moves.is_empty() {
                board.pass();
                if !board.has_legal_move() {
                    break;
                }
                continue;
            }
            let picked = match self.playout {
                Playout::Uniform => moves.choose(&mut *rng),
                Playout::Weighted => weighted_choice(&moves, |&mv| pst::draw_weight(mv), &mut *rng),
            };
            if let Some(&mv) = picked {
                board.apply_move(mv);
            }
        }

        if board.leader() == Some(me) {
            1.0
        } else {
            0.0
        }
    }
}

impl PlayerController for MctsAI {
    fn select_move(&self, board: &Board) -> Option<Move> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return None;
        }
        if self.iterations == 0 {
            return moves.iter().copied().min_by_key(|mv| mv.tier());
        }

        let tree = self.build_tree(board);
        let best = tree.best_root_child()?;
        log::debug!(
            "{}: {:?} (win rate {:.3} over {} visits, {} iterations, {} nodes)",
            self.name,
            best.mv,
            best.win_rate(),
            best.visits,
            self.iterations,
            tree.len()
        );
        best.mv
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(iterations: usize) -> MctsAI {
        MctsAI::with_params("MCTS AI", iterations, 1.4).with_seed(7)
    }

    #[test]
    fn test_zero_iterations_still_moves() {
        let board = Board::new();
        let mv = engine(0).select_move(&board).unwrap();
        assert_eq!(mv, board.legal_moves()[0]);
    }

    #[test]
    fn test_zero_iterations_prefers_the_corner() {
        let board = Board::from_rows(
            &[
                ". W B . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . W B . . .",
                ". . . B W . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
            ],
            PlayerId::Black,
        )
        .unwrap();
        assert_eq!(engine(0).select_move(&board), Some(Move::new(0, 0).unwrap()));
    }

    #[test]
    fn test_returns_a_legal_move() {
        let board = Board::new();
        for iterations in [1, 2, 50] {
            let mv = engine(iterations).select_move(&board).unwrap();
            assert!(board.legal_moves().contains(&mv), "{} iterations", iterations);
        }
        let weighted = engine(50).with_playout(Playout::Weighted).with_position_bonus(0.3);
        assert!(board.legal_moves().contains(&weighted.select_move(&board).unwrap()));
    }

    #[test]
    fn test_no_legal_move_gives_none() {
        let board = Board::from_rows(
            &[
                "B B B B B B B B",
                ". . . . . . . .",
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
        assert_eq!(engine(0).select_move(&board), None);
        assert_eq!(engine(20).select_move(&board), None);
    }

    #[test]
    fn test_every_iteration_reaches_the_root() {
        let tree = engine(64).build_tree(&Board::new());
        let root = tree.get(tree.root());
        assert_eq!(root.visits, 64);
        assert!(root.is_fully_expanded());
        let child_visits: u32 = root.children.iter().map(|&c| tree.get(c).visits).sum();
        assert_eq!(child_visits, 64);
    }

    #[test]
    fn test_same_seed_same_move() {
        let board = Board::new();
        assert_eq!(engine(100).select_move(&board), engine(100).select_move(&board));
    }

    #[test]
    fn test_child_after_forced_pass_stores_passed_board() {
        // Either capture leaves White without a reply, so Black moves again.
        let board = Board::from_rows(
            &[
                "B W . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                "B W . . . . . .",
            ],
            PlayerId::Black,
        )
        .unwrap();
        let tree = engine(2).build_tree(&board);
        let root = tree.get(tree.root());
        assert_eq!(root.children.len(), 2);
        for &child in &root.children {
            let node = tree.get(child);
            assert_eq!(node.board.current_player(), PlayerId::Black);
            assert_eq!(node.untried.len(), 1);
        }
    }

    #[test]
    fn test_playout_scores_from_the_root_side() {
        let won = Board::from_rows(
            &[
                "B B B . . . . .",
                ". . . . . . . .",
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
        let ai = engine(1);
        assert_eq!(ai.simulate(&won, PlayerId::Black), 1.0);
        assert_eq!(ai.simulate(&won, PlayerId::White), 0.0);
    }
}
