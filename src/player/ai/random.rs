use crate::core::{Board, Move};
use crate::player::PlayerController;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cell::RefCell;

pub struct RandomAI {
    pub name: String,
    rng: RefCell<StdRng>,
}

impl RandomAI {
    pub fn new(name: &str) -> Self {
        Self::with_rng(name, StdRng::from_entropy())
    }

    pub fn with_seed(name: &str, seed: u64) -> Self {
        Self::with_rng(name, StdRng::seed_from_u64(seed))
    }

    fn with_rng(name: &str, rng: StdRng) -> Self {
        RandomAI {
            name: name.to_string(),
            rng: RefCell::new(rng),
        }
    }
}

impl PlayerController for RandomAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn select_move(&self, board: &Board) -> Option<Move> {
        let legal_moves = board.legal_moves();
        legal_moves.choose(&mut *self.rng.borrow_mut()).copied()
    }
}
