//! Arena-allocated search tree for MCTS.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`], so parent
//! links need no shared ownership. The tree is built and dropped within a
//! single decision.

use super::pst;
use crate::core::{Board, Move};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Position after `mv` (and after a forced pass, if one followed).
    pub board: Board,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// `None` only at the root.
    pub mv: Option<Move>,
    pub visits: u32,
    /// Accumulated playout results, from the root player's side.
    pub wins: f64,
    pub untried: Vec<Move>,
}

impl SearchNode {
    fn new(board: Board, parent: Option<NodeId>, mv: Option<Move>) -> Self {
        let untried = board.legal_moves();
        Self {
            board,
            parent,
            children: Vec::new(),
            mv,
            visits: 0,
            wins: 0.0,
            untried,
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCT score seen from the parent. Unvisited nodes score `+inf`.
    pub fn uct_score(&self, parent_ln_visits: f64, exploration: f64, position_bonus: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        let mut score = self.wins / visits + exploration * (parent_ln_visits / visits).sqrt();
        if position_bonus != 0.0 {
            if let Some(mv) = self.mv {
                score += position_bonus * pst::get_pst_value(mv) as f64 / pst::MAX_WEIGHT as f64;
            }
        }
        score
    }
}

#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new(root_board: Board) -> Self {
        Self {
            nodes: vec![SearchNode::new(root_board, None, None)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocates a child of `parent` holding `board`, reached by `mv`.
    pub fn add_child(&mut self, parent: NodeId, mv: Move, board: Board) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new(board, Some(parent), Some(mv)));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Child with the highest UCT score; the first one wins ties.
    pub fn select_uct(&self, id: NodeId, exploration: f64, position_bonus: f64) -> Option<NodeId> {
        let node = self.get(id);
        let parent_ln_visits = (node.visits.max(1) as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &child in &node.children {
            let score = self
                .get(child)
                .uct_score(parent_ln_visits, exploration, position_bonus);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Adds one visit and `result` to every node from `leaf` up to the root.
    pub fn backpropagate(&mut self, leaf: NodeId, result: f64) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            node.wins += result;
            current = node.parent;
        }
    }

    /// Root child with the highest win rate; the first one wins ties.
    pub fn best_root_child(&self) -> Option<&SearchNode> {
        let mut best: Option<&SearchNode> = None;
        for &child in &self.get(self.root()).children {
            let node = self.get(child);
            if best.map_or(true, |b| node.win_rate() > b.win_rate()) {
                best = Some(node);
            }
        }
        best
    }
}
