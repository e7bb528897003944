//! Replays a saved game record, checking every move.

use clap::Parser;
use othello_aho_ai::display::{self, DisplayState};
use othello_aho_ai::game::KifuData;
use othello_aho_ai::logging;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "replay_kifu", about = "Replay and check a saved Othello game")]
struct Cli {
    /// Game record written by othello-ai --save-kifu
    kifu_file: PathBuf,

    /// Print the board after every entry
    #[arg(long)]
    step: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = logging::setup_logging("warn")?;
    let step = cli.step;

    let kifu = KifuData::load(&cli.kifu_file)?;
    println!("{} (Black) vs {} (White), {}", kifu.black, kifu.white, kifu.timestamp);

    let mut render_error = None;
    let board = kifu.replay(|i, turn, board| {
        if !step {
            return;
        }
        let state = DisplayState {
            last_move: turn,
            status_msg: Some(match turn {
                Some(mv) => format!("{}. {}", i + 1, mv),
                None => format!("{}. pass", i + 1),
            }),
            ..DisplayState::new()
        };
        if let Err(e) = display::render_board(board, &state) {
            render_error.get_or_insert(e);
        }
    })?;
    if let Some(e) = render_error {
        return Err(e.into());
    }

    display::render_board(&board, &DisplayState::new())?;
    let (black, white) = board.score();
    if (black, white) != (kifu.outcome.black, kifu.outcome.white) {
        anyhow::bail!(
            "recorded score {}-{} does not match replayed {}-{}",
            kifu.outcome.black,
            kifu.outcome.white,
            black,
            white
        );
    }
    println!("{} moves replayed, final score {}-{}", kifu.moves.len(), black, white);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_path_and_step_flag() {
        let cli = Cli::try_parse_from(["replay_kifu", "game.json", "--step"]).unwrap();
        assert_eq!(cli.kifu_file, PathBuf::from("game.json"));
        assert!(cli.step);

        let cli = Cli::try_parse_from(["replay_kifu", "game.json"]).unwrap();
        assert!(!cli.step);
        assert!(Cli::try_parse_from(["replay_kifu"]).is_err());
    }
}
