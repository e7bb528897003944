use clap::Parser;
use othello_aho_ai::core::Board;
use othello_aho_ai::display::{self, DisplayState};
use othello_aho_ai::game::Game;
use othello_aho_ai::logging;
use othello_aho_ai::player::ai::AIConfig;
use othello_aho_ai::player::EngineKind;
use othello_aho_ai::selfplay::{run_selfplay, SelfPlayConfig};
use std::path::PathBuf;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum EngineCli {
    Minimax,
    Expectimax,
    Mcts,
    Random,
    Weighted,
}

impl From<EngineCli> for EngineKind {
    fn from(cli: EngineCli) -> Self {
        match cli {
            EngineCli::Minimax => EngineKind::Minimax,
            EngineCli::Expectimax => EngineKind::Expectimax,
            EngineCli::Mcts => EngineKind::Mcts,
            EngineCli::Random => EngineKind::Random,
            EngineCli::Weighted => EngineKind::Weighted,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "othello-ai", about = "Engine-vs-engine Othello")]
struct Cli {
    /// Engine playing Black
    #[arg(long, value_enum, default_value = "minimax")]
    black: EngineCli,

    /// Engine playing White
    #[arg(long, value_enum, default_value = "mcts")]
    white: EngineCli,

    /// Number of games to play
    #[arg(short = 'g', long, default_value_t = 1)]
    games: usize,

    /// Play games on all cores
    #[arg(long)]
    parallel: bool,

    /// Write every game to selfplay_kifu/
    #[arg(long)]
    save_kifu: bool,

    /// Base seed for the stochastic engines
    #[arg(long)]
    seed: Option<u64>,

    /// AI config file (defaults to ai_config.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the board after every move of a single game
    #[arg(long)]
    watch: bool,

    /// Fallback log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = logging::setup_logging(&cli.log_level)?;

    let ai_config = match &cli.config {
        Some(path) => AIConfig::load_from(path)?,
        None => AIConfig::get().clone(),
    };

    if cli.watch {
        return watch_game(&cli, &ai_config);
    }

    let stats = run_selfplay(SelfPlayConfig {
        num_games: cli.games,
        black: cli.black.into(),
        white: cli.white.into(),
        ai_config,
        base_seed: cli.seed,
        parallel: cli.parallel,
        save_kifus: cli.save_kifu,
        ..SelfPlayConfig::default()
    })?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn watch_game(cli: &Cli, ai_config: &AIConfig) -> anyhow::Result<()> {
    let black_kind: EngineKind = cli.black.into();
    let white_kind: EngineKind = cli.white.into();
    let black = black_kind.build(ai_config, cli.seed);
    let white = white_kind.build(ai_config, cli.seed.map(|s| s.wrapping_add(1)));

    let start = Board::new();
    display::render_board(&start, &DisplayState::with_legal_moves(&start))?;

    let mut game = Game::new();
    let mut render_error = None;
    let outcome = game.play_with(black.as_ref(), white.as_ref(), |board, turn| {
        let mover = board.current_player().opponent();
        let state = DisplayState {
            last_move: turn,
            status_msg: Some(match turn {
                Some(mv) => format!("{} plays {}", mover, mv),
                None => format!("{} passes", mover),
            }),
            ..DisplayState::with_legal_moves(board)
        };
        println!();
        if let Err(e) = display::render_board(board, &state) {
            render_error.get_or_insert(e);
        }
    })?;
    if let Some(e) = render_error {
        return Err(e.into());
    }

    if cli.save_kifu {
        std::fs::create_dir_all(othello_aho_ai::selfplay::KIFU_DIR)?;
        let path = PathBuf::from(othello_aho_ai::selfplay::KIFU_DIR).join(format!(
            "game_0001_{}.json",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ));
        game.to_kifu(black.name(), white.name()).save(&path)?;
        log::info!("saved {}", path.display());
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
