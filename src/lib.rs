//! Othello engine: rules, three search strategies (minimax with alpha-beta,
//! expectimax against a noisy opponent, MCTS with UCT) and self-play tooling.

pub mod core;
pub mod display;
pub mod game;
pub mod logging;
pub mod logic;
pub mod player;
pub mod selfplay;

mod logic_tests;
