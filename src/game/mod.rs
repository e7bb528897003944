use crate::core::{Board, Move, PlayerId};
use crate::player::PlayerController;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 60 placements plus passes; anything longer means two engines keep passing.
const MAX_TURNS: usize = 200;

/// Final state of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub black: usize,
    pub white: usize,
    /// `None` is a draw.
    pub winner: Option<PlayerId>,
    /// Discs placed, passes excluded.
    pub plies: usize,
}

impl GameOutcome {
    fn from_board(board: &Board, plies: usize) -> Self {
        let (black, white) = board.score();
        GameOutcome {
            black,
            white,
            winner: board.leader(),
            plies,
        }
    }

    /// Black's discs minus White's.
    pub fn margin(&self) -> i64 {
        self.black as i64 - self.white as i64
    }
}

/// 棋譜 (game record) written after a game. `None` entries are passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KifuData {
    pub black: String,
    pub white: String,
    /// Position the game started from.
    #[serde(default)]
    pub start: Board,
    pub moves: Vec<Option<Move>>,
    pub outcome: GameOutcome,
    pub timestamp: String,
}

impl KifuData {
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
    }

    /// Replays the record from `start`, checking every move.
    /// `on_move` sees each board after the entry is applied.
    ///
    /// A pass recorded while moves were available is an engine passing on
    /// its own; it is replayed with a warning.
    pub fn replay<F>(&self, mut on_move: F) -> anyhow::Result<Board>
    where
        F: FnMut(usize, Option<Move>, &Board),
    {
        let mut board = self.start.clone();
        for (i, &entry) in self.moves.iter().enumerate() {
            match entry {
                Some(mv) => {
                    if !board.apply_move(mv) {
                        bail!(
                            "entry {}: {} is not legal for {}",
                            i + 1,
                            mv,
                            board.current_player()
                        );
                    }
                }
                None => {
                    if board.is_terminal() {
                        bail!("entry {}: pass after the game is over", i + 1);
                    }
                    if board.has_legal_move() {
                        log::warn!(
                            "entry {}: {} passed with moves available",
                            i + 1,
                            board.current_player()
                        );
                    }
                    board.pass();
                }
            }
            on_move(i, entry, &board);
        }
        if !board.is_terminal() {
            bail!("record ends before the game is over");
        }
        Ok(board)
    }
}

/// Authoritative game loop. Applies the pass rule for the engines.
pub struct Game {
    pub start: Board,
    pub board: Board,
    pub history: Vec<Option<Move>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    pub fn from_board(board: Board) -> Self {
        Game {
            start: board.clone(),
            board,
            history: Vec::new(),
        }
    }

    pub fn play(
        &mut self,
        black: &dyn PlayerController,
        white: &dyn PlayerController,
    ) -> anyhow::Result<GameOutcome> {
        self.play_with(black, white, |_, _| {})
    }

    /// Plays until neither side can move. `on_move` sees the board after every
    /// turn, passes included.
    pub fn play_with<F>(
        &mut self,
        black: &dyn PlayerController,
        white: &dyn PlayerController,
        mut on_move: F,
    ) -> anyhow::Result<GameOutcome>
    where
        F: FnMut(&Board, Option<Move>),
    {
        while !self.board.is_terminal() {
            if self.history.len() >= MAX_TURNS {
                bail!("game did not finish within {} turns", MAX_TURNS);
            }
            let turn = self.step(black, white)?;
            on_move(&self.board, turn);
        }

        let plies = self.history.iter().flatten().count();
        let outcome = GameOutcome::from_board(&self.board, plies);
        log::debug!(
            "{} vs {}: {}-{} after {} plies",
            black.name(),
            white.name(),
            outcome.black,
            outcome.white,
            plies
        );
        Ok(outcome)
    }

    /// Plays one turn: a move, or a pass when the side to move has none.
    pub fn step(
        &mut self,
        black: &dyn PlayerController,
        white: &dyn PlayerController,
    ) -> anyhow::Result<Option<Move>> {
        let player = self.board.current_player();
        let controller = match player {
            PlayerId::Black => black,
            PlayerId::White => white,
        };

        let turn = if self.board.has_legal_move() {
            match controller.select_move(&self.board) {
                Some(mv) => {
                    if !self.board.apply_move(mv) {
                        bail!("{} ({}) chose illegal move {}", controller.name(), player, mv);
                    }
                    Some(mv)
                }
                None => {
                    log::warn!("{} ({}) passed with moves available", controller.name(), player);
                    self.board.pass();
                    None
                }
            }
        } else {
            self.board.pass();
            None
        };

        self.history.push(turn);
        Ok(turn)
    }

    pub fn to_kifu(&self, black: &str, white: &str) -> KifuData {
        let plies = self.history.iter().flatten().count();
        KifuData {
            black: black.to_string(),
            white: white.to_string(),
            start: self.start.clone(),
            moves: self.history.clone(),
            outcome: GameOutcome::from_board(&self.board, plies),
            timestamp: chrono::Local::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ai::RandomAI;
    use std::cell::Cell;

    /// Always answers with the same square, legal or not.
    struct Stubborn(Move);

    impl PlayerController for Stubborn {
        fn select_move(&self, _board: &Board) -> Option<Move> {
            Some(self.0)
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    /// Never moves.
    struct Passer;

    impl PlayerController for Passer {
        fn select_move(&self, _board: &Board) -> Option<Move> {
            None
        }

        fn name(&self) -> &str {
            "Passer"
        }
    }

    /// Declines its first turn, then plays like `inner`.
    struct PassesOnce {
        inner: RandomAI,
        passed: Cell<bool>,
    }

    impl PlayerController for PassesOnce {
        fn select_move(&self, board: &Board) -> Option<Move> {
            if self.passed.replace(true) {
                self.inner.select_move(board)
            } else {
                None
            }
        }

        fn name(&self) -> &str {
            "Passes Once"
        }
    }

    #[test]
    fn test_random_games_end_terminal() {
        for seed in 0..10 {
            let black = RandomAI::with_seed("Random AI", seed);
            let white = RandomAI::with_seed("Random AI", seed + 100);
            let mut game = Game::new();
            let outcome = game.play(&black, &white).unwrap();

            assert!(game.board.is_terminal());
            assert_eq!(outcome.black + outcome.white, game.board.total_discs());
            assert_eq!(outcome.plies + 4, game.board.total_discs());
            assert_eq!(outcome.winner, game.board.leader());
        }
    }

    #[test]
    fn test_illegal_engine_move_is_an_error() {
        let mut game = Game::new();
        let corner = Stubborn(Move::new(0, 0).unwrap());
        let err = game.play(&corner, &corner).unwrap_err();
        assert!(err.to_string().contains("illegal"));
        assert_eq!(game.board, Board::new());
    }

    #[test]
    fn test_engines_that_never_move_are_stopped() {
        let mut game = Game::new();
        assert!(game.play(&Passer, &Passer).is_err());
        assert!(game.history.iter().all(Option::is_none));
    }

    #[test]
    fn test_forced_pass_is_recorded() {
        // White cannot answer either capture, so the record holds a pass.
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
        let black = RandomAI::with_seed("Random AI", 1);
        let white = RandomAI::with_seed("Random AI", 2);
        let mut game = Game::from_board(board);
        let outcome = game.play(&black, &white).unwrap();

        assert_eq!(game.history.len(), 3);
        assert!(game.history[0].is_some());
        assert_eq!(game.history[1], None);
        assert!(game.history[2].is_some());
        assert_eq!(outcome.winner, Some(PlayerId::Black));
        assert_eq!(outcome.black, 6);

        let kifu = game.to_kifu(black.name(), white.name());
        assert_eq!(kifu.start, game.start);
        assert_eq!(kifu.replay(|_, _, _| {}).unwrap(), game.board);
    }

    #[test]
    fn test_voluntary_pass_replays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pass.json");

        let black = RandomAI::with_seed("Random AI", 3);
        let white = PassesOnce {
            inner: RandomAI::with_seed("Random AI", 4),
            passed: Cell::new(false),
        };
        let mut game = Game::new();
        game.play(&black, &white).unwrap();
        // White's first turn is entry 2 and the opening always leaves White a move
        assert_eq!(game.history[1], None);

        game.to_kifu(black.name(), white.name()).save(&path).unwrap();
        let board = KifuData::load(&path).unwrap().replay(|_, _, _| {}).unwrap();
        assert_eq!(board, game.board);
    }

    #[test]
    fn test_kifu_replays_to_the_same_board() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");

        let black = RandomAI::with_seed("Random AI", 5);
        let white = RandomAI::with_seed("Random AI", 6);
        let mut game = Game::new();
        let outcome = game.play(&black, &white).unwrap();
        let kifu = game.to_kifu(black.name(), white.name());
        kifu.save(&path).unwrap();

        let loaded = KifuData::load(&path).unwrap();
        assert_eq!(loaded, kifu);
        let mut seen = 0;
        let board = loaded.replay(|_, _, _| seen += 1).unwrap();
        assert_eq!(board, game.board);
        assert_eq!(seen, game.history.len());
        assert_eq!(loaded.outcome, outcome);
    }

    #[test]
    fn test_replay_rejects_a_bad_record() {
        let kifu = KifuData {
            black: "a".into(),
            white: "b".into(),
            start: Board::new(),
            moves: vec![Some(Move::new(0, 0).unwrap())],
            outcome: GameOutcome::from_board(&Board::new(), 0),
            timestamp: String::new(),
        };
        assert!(kifu.replay(|_, _, _| {}).is_err());
    }
}
