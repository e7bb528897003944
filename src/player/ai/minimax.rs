use super::config::AIConfig;
use super::evaluator::{Evaluator, HeuristicEvaluator};
use crate::core::{Board, Move, PlayerId};
use crate::player::PlayerController;
use std::cell::Cell;

pub struct MinimaxAI<E: Evaluator = HeuristicEvaluator> {
    pub name: String,
    pub depth: usize,
    pruning: bool,
    move_ordering: bool,
    evaluator: E,
    nodes_evaluated: Cell<usize>,
}

impl MinimaxAI<HeuristicEvaluator> {
    /// Depth and weights from [`AIConfig::get`].
    pub fn new(name: &str) -> Self {
        let config = AIConfig::get();
        Self::with_evaluator(
            name,
            config.search.minimax_depth,
            HeuristicEvaluator::new(config.evaluation.minimax.clone()),
        )
    }
}

impl<E: Evaluator> MinimaxAI<E> {
    pub fn with_evaluator(name: &str, depth: usize, evaluator: E) -> Self {
        Self {
            name: name.to_string(),
            depth: depth.max(1),
            pruning: true,
            move_ordering: true,
            evaluator,
            nodes_evaluated: Cell::new(0),
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth.max(1);
        self
    }

    /// Alpha-beta cut-offs. Turning them off changes the node count, never the
    /// value of the chosen move.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Try corners, then edges, then interior squares first.
    pub fn with_move_ordering(mut self, move_ordering: bool) -> Self {
        self.move_ordering = move_ordering;
        self
    }

    /// Nodes visited by the most recent search.
    pub fn nodes_evaluated(&self) -> usize {
        self.nodes_evaluated.get()
    }

    /// Best root move together with its backed-up value.
    pub fn search_root(&self, board: &Board) -> Option<(Move, f64)> {
        self.nodes_evaluated.set(0);
        let me = board.current_player();
        let mut moves = board.legal_moves();
        self.order_moves(&mut moves);

        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best: Option<(Move, f64)> = None;

        for mv in moves {
            let mut next_board = board.clone();
            next_board.apply_move(mv);
            // 自分の一手は打ったので、次は相手の番 (is_maximizing = false)
            let value = self.minimax(&next_board, self.depth - 1, alpha, beta, false, me);

            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((mv, value));
            }
            if self.pruning {
                if let Some((_, best_value)) = best {
                    alpha = alpha.max(best_value);
                }
            }
        }

        if let Some((mv, value)) = best {
            log::debug!(
                "{}: {} (value {:.2}, depth {}, {} nodes)",
                self.name,
                mv,
                value,
                self.depth,
                self.nodes_evaluated()
            );
        }
        best
    }

    fn minimax(
        &self,
        board: &Board,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        is_maximizing: bool,
        perspective: PlayerId,
    ) -> f64 {
        self.nodes_evaluated.set(self.nodes_evaluated.get() + 1);

        if depth == 0 {
            return self.evaluator.evaluate(board, perspective);
        }

        let mut moves = board.legal_moves();
        if moves.is_empty() {
            let mut passed = board.clone();
            passed.pass();
            if !passed.has_legal_move() {
                // 終局
                return self.evaluator.evaluate(board, perspective);
            }
            return self.minimax(&passed, depth - 1, alpha, beta, !is_maximizing, perspective);
        }
        self.order_moves(&mut moves);

        if is_maximizing {
            let mut max_eval = f64::NEG_INFINITY;
            for mv in moves {
                let mut next_board = board.clone();
                next_board.apply_move(mv);
                let eval = self.minimax(&next_board, depth - 1, alpha, beta, false, perspective);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if self.pruning && beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = f64::INFINITY;
            for mv in moves {
                let mut next_board = board.clone();
                next_board.apply_move(mv);
                let eval = self.minimax(&next_board, depth - 1, alpha, beta, true, perspective);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if self.pruning && beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }

    fn order_moves(&self, moves: &mut [Move]) {
        if self.move_ordering {
            // stable: row-major order survives inside each tier
            moves.sort_by_key(|mv| mv.tier());
        }
    }
}

impl<E: Evaluator> PlayerController for MinimaxAI<E> {
    fn select_move(&self, board: &Board) -> Option<Move> {
        self.search_root(board).map(|(mv, _)| mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
