use crate::core::PlayerId;
use crate::game::{Game, GameOutcome};
use crate::player::ai::AIConfig;
use crate::player::EngineKind;
use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

pub const KIFU_DIR: &str = "selfplay_kifu";

#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub num_games: usize,
    pub black: EngineKind,
    pub white: EngineKind,
    pub ai_config: AIConfig,
    /// Game `i` seeds its engines from `base_seed + i`.
    pub base_seed: Option<u64>,
    pub parallel: bool,
    pub save_kifus: bool,
    pub kifu_dir: PathBuf,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            black: EngineKind::Minimax,
            white: EngineKind::Mcts,
            ai_config: AIConfig::default(),
            base_seed: None,
            parallel: false,
            save_kifus: false,
            kifu_dir: PathBuf::from(KIFU_DIR),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub game: usize,
    pub winner: Option<PlayerId>,
    pub black_discs: usize,
    pub white_discs: usize,
    pub plies: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
    pub avg_plies: f64,
    /// Mean of black discs minus white discs.
    pub avg_margin: f64,
    pub avg_time_ms: f64,
    pub black_engine: String,
    pub white_engine: String,
    pub timestamp: String,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new(black: EngineKind, white: EngineKind) -> Self {
        Self {
            total_games: 0,
            black_wins: 0,
            white_wins: 0,
            draws: 0,
            avg_plies: 0.0,
            avg_margin: 0.0,
            avg_time_ms: 0.0,
            black_engine: black.label().to_string(),
            white_engine: white.label().to_string(),
            timestamp: chrono::Local::now().to_rfc3339(),
            games: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Some(PlayerId::Black) => self.black_wins += 1,
            Some(PlayerId::White) => self.white_wins += 1,
            None => self.draws += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let n = self.games.len() as f64;
        let total_plies: usize = self.games.iter().map(|g| g.plies).sum();
        let total_margin: i64 = self
            .games
            .iter()
            .map(|g| g.black_discs as i64 - g.white_discs as i64)
            .sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_plies = total_plies as f64 / n;
        self.avg_margin = total_margin as f64 / n;
        self.avg_time_ms = total_time as f64 / n;
    }

    pub fn win_rate(&self, player: PlayerId) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        let wins = match player {
            PlayerId::Black => self.black_wins,
            PlayerId::White => self.white_wins,
        };
        wins as f64 / self.total_games as f64
    }
}

pub fn run_selfplay(config: SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    config.ai_config.validate()?;
    if config.save_kifus {
        std::fs::create_dir_all(&config.kifu_dir)
            .with_context(|| format!("creating {}", config.kifu_dir.display()))?;
    }

    log::info!(
        "self-play: {} games, {} (Black) vs {} (White){}",
        config.num_games,
        config.black,
        config.white,
        if config.parallel { ", parallel" } else { "" }
    );

    let finished = AtomicUsize::new(0);
    let play = |game_num: usize| -> anyhow::Result<GameResult> {
        let result = play_one(&config, game_num)?;
        let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
        log::info!(
            "game {}/{} (#{}): {} {}-{} in {} plies ({:.1}s)",
            done,
            config.num_games,
            game_num,
            match result.winner {
                Some(PlayerId::Black) => "Black wins",
                Some(PlayerId::White) => "White wins",
                None => "Draw",
            },
            result.black_discs,
            result.white_discs,
            result.plies,
            result.time_ms as f64 / 1000.0
        );
        Ok(result)
    };

    let results: Vec<GameResult> = if config.parallel {
        (1..=config.num_games)
            .into_par_iter()
            .map(play)
            .collect::<anyhow::Result<_>>()?
    } else {
        (1..=config.num_games)
            .map(play)
            .collect::<anyhow::Result<_>>()?
    };

    let mut stats = SelfPlayStats::new(config.black, config.white);
    for result in results {
        stats.add_result(result);
    }
    log::info!(
        "self-play done: Black {} / White {} / Draw {} (avg margin {:+.1})",
        stats.black_wins,
        stats.white_wins,
        stats.draws,
        stats.avg_margin
    );
    Ok(stats)
}

fn play_one(config: &SelfPlayConfig, game_num: usize) -> anyhow::Result<GameResult> {
    let start_time = Instant::now();
    // 先手と後手で別のシードを使う
    let seeds = config
        .base_seed
        .map(|seed| seed.wrapping_add(game_num as u64).wrapping_mul(2));
    let black = config.black.build(&config.ai_config, seeds);
    let white = config
        .white
        .build(&config.ai_config, seeds.map(|s| s.wrapping_add(1)));

    let mut game = Game::new();
    let outcome: GameOutcome = game
        .play(black.as_ref(), white.as_ref())
        .with_context(|| format!("game {}", game_num))?;

    if config.save_kifus {
        save_kifu(config, &game, game_num, black.name(), white.name())?;
    }

    Ok(GameResult {
        game: game_num,
        winner: outcome.winner,
        black_discs: outcome.black,
        white_discs: outcome.white,
        plies: outcome.plies,
        time_ms: start_time.elapsed().as_millis(),
    })
}

fn save_kifu(
    config: &SelfPlayConfig,
    game: &Game,
    game_num: usize,
    black: &str,
    white: &str,
) -> anyhow::Result<()> {
    let filename = config.kifu_dir.join(format!(
        "game_{:04}_{}.json",
        game_num,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));
    game.to_kifu(black, white).save(&filename)?;
    log::debug!("saved {}", filename.display());
    Ok(())
}
