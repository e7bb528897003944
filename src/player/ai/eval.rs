//! # Evaluation Module
//!
//! Static evaluation of an Othello position from a chosen player's point of
//! view (positive = good for `perspective`).
//!
//! ## Terms
//! 1. **Material**: own discs minus opponent discs.
//! 2. **Positional**: sum of [`POSITION_WEIGHTS`] over own discs minus the
//!    opponent's.
//! 3. **Mobility**: own legal moves minus opponent legal moves.
//! 4. **Corner / edge control**: owned corners and owned non-corner edge squares.
//! 5. **Stability**: corners are fully stable, edges partly, interior discs earn
//!    a little per same-colour neighbour.
//!
//! ## Game phase
//! With `phased` set, the disc count picks a [`GamePhase`] whose scale factors
//! move weight from positional play and mobility toward raw material as the
//! board fills up.

use crate::core::{Board, Move, MoveTier, PlayerId, BOARD_SIZE};
use crate::logic::{legal_moves_for, same_colour_neighbours};
use crate::player::ai::pst::POSITION_WEIGHTS;
use serde::{Deserialize, Serialize};

const CORNER_STABILITY: f64 = 2.0;
const EDGE_STABILITY: f64 = 1.0;
const NEIGHBOUR_STABILITY: f64 = 0.1;

const EARLY_GAME_DISCS: usize = 20;
const MID_GAME_DISCS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Early,
    Mid,
    End,
}

impl GamePhase {
    pub fn of(board: &Board) -> Self {
        match board.total_discs() {
            n if n < EARLY_GAME_DISCS => GamePhase::Early,
            n if n < MID_GAME_DISCS => GamePhase::Mid,
            _ => GamePhase::End,
        }
    }

    fn scale(self) -> PhaseScale {
        match self {
            GamePhase::Early => PhaseScale {
                material: 0.2,
                positional: 1.0,
                mobility: 1.0,
                stability: 0.5,
            },
            GamePhase::Mid => PhaseScale {
                material: 1.0,
                positional: 1.0,
                mobility: 0.7,
                stability: 1.0,
            },
            GamePhase::End => PhaseScale {
                material: 4.0,
                positional: 0.3,
                mobility: 0.2,
                stability: 1.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PhaseScale {
    material: f64,
    positional: f64,
    mobility: f64,
    stability: f64,
}

impl PhaseScale {
    const FLAT: PhaseScale = PhaseScale {
        material: 1.0,
        positional: 1.0,
        mobility: 1.0,
        stability: 1.0,
    };
}

/// Coefficients of each evaluation term. Zero switches a term off entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub material: f64,
    pub positional: f64,
    pub mobility: f64,
    pub corner: f64,
    pub edge: f64,
    pub stability: f64,
    pub phased: bool,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self::blended()
    }
}

impl EvalWeights {
    /// Disc difference plus flat corner and edge bonuses.
    pub fn classic() -> Self {
        EvalWeights {
            material: 1.0,
            positional: 0.0,
            mobility: 0.0,
            corner: 4.0,
            edge: 2.0,
            stability: 0.0,
            phased: false,
        }
    }

    /// `classic` plus mobility and stability.
    pub fn stability() -> Self {
        EvalWeights {
            mobility: 0.5,
            stability: 1.0,
            ..Self::classic()
        }
    }

    /// Weight table, mobility and stability, blended by game phase.
    pub fn blended() -> Self {
        EvalWeights {
            material: 1.0,
            positional: 1.0,
            mobility: 5.0,
            corner: 0.0,
            edge: 0.0,
            stability: 2.0,
            phased: true,
        }
    }

    pub fn material_only() -> Self {
        EvalWeights {
            material: 1.0,
            positional: 0.0,
            mobility: 0.0,
            corner: 0.0,
            edge: 0.0,
            stability: 0.0,
            phased: false,
        }
    }
}

/// Evaluates `board` for `perspective` with the given coefficients.
pub fn evaluate(board: &Board, perspective: PlayerId, weights: &EvalWeights) -> f64 {
    let scale = if weights.phased {
        GamePhase::of(board).scale()
    } else {
        PhaseScale::FLAT
    };

    let mut score = 0.0;
    if weights.material != 0.0 {
        score += weights.material * scale.material * material(board, perspective);
    }
    if weights.positional != 0.0 {
        score += weights.positional * scale.positional * positional(board, perspective);
    }
    if weights.mobility != 0.0 {
        score += weights.mobility * scale.mobility * mobility(board, perspective);
    }
    if weights.corner != 0.0 {
        score += weights.corner * corner_control(board, perspective);
    }
    if weights.edge != 0.0 {
        score += weights.edge * edge_control(board, perspective);
    }
    if weights.stability != 0.0 {
        score += weights.stability * scale.stability * stability(board, perspective);
    }
    score
}

/// +1 for an own disc, -1 for an opponent disc, 0 for empty.
fn sign(board: &Board, mv: Move, perspective: PlayerId) -> f64 {
    match board.get(mv) {
        Some(p) if p == perspective => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}

fn squares() -> impl Iterator<Item = Move> {
    (0..BOARD_SIZE * BOARD_SIZE).map(|i| Move::at(i / BOARD_SIZE, i % BOARD_SIZE))
}

pub fn material(board: &Board, perspective: PlayerId) -> f64 {
    board.count(perspective) as f64 - board.count(perspective.opponent()) as f64
}

pub fn positional(board: &Board, perspective: PlayerId) -> f64 {
    squares()
        .map(|mv| sign(board, mv, perspective) * POSITION_WEIGHTS[mv.row()][mv.col()] as f64)
        .sum()
}

/// Both counts are generated for an explicit colour; the side to move is
/// never toggled.
pub fn mobility(board: &Board, perspective: PlayerId) -> f64 {
    let own = legal_moves_for(board, perspective).len() as f64;
    let theirs = legal_moves_for(board, perspective.opponent()).len() as f64;
    own - theirs
}

pub fn corner_control(board: &Board, perspective: PlayerId) -> f64 {
    squares()
        .filter(|mv| mv.tier() == MoveTier::Corner)
        .map(|mv| sign(board, mv, perspective))
        .sum()
}

/// Edge squares excluding the corners.
pub fn edge_control(board: &Board, perspective: PlayerId) -> f64 {
    squares()
        .filter(|mv| mv.tier() == MoveTier::Edge)
        .map(|mv| sign(board, mv, perspective))
        .sum()
}

pub fn stability(board: &Board, perspective: PlayerId) -> f64 {
    squares()
        .map(|mv| sign(board, mv, perspective) * disc_stability(board, mv))
        .sum()
}

fn disc_stability(board: &Board, mv: Move) -> f64 {
    match mv.tier() {
        MoveTier::Corner => CORNER_STABILITY,
        MoveTier::Edge => EDGE_STABILITY,
        MoveTier::Interior => {
            same_colour_neighbours(board, mv) as f64 * NEIGHBOUR_STABILITY
        }
    }
}
