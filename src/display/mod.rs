use crate::core::{Board, Move, PlayerId, BOARD_SIZE};
use crossterm::style::Stylize;
use std::io::{self, Write};

/// What to draw on top of the discs.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    /// Squares drawn as hints, usually the legal moves.
    pub highlights: Vec<Move>,
    pub last_move: Option<Move>,
    pub status_msg: Option<String>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hints for every legal move of the side to move.
    pub fn with_legal_moves(board: &Board) -> Self {
        Self {
            highlights: board.legal_moves(),
            ..Self::default()
        }
    }
}

/// Writes the board to stdout with colours.
pub fn render_board(board: &Board, state: &DisplayState) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_board(&mut out, board, state)?;
    out.flush()
}

pub fn write_board<W: Write>(out: &mut W, board: &Board, state: &DisplayState) -> io::Result<()> {
    if let Some(msg) = &state.status_msg {
        writeln!(out, "{}", msg.clone().bold().yellow())?;
    }

    // 列ラベル
    write!(out, "   ")?;
    for col in 0..BOARD_SIZE {
        write!(out, " {} ", (b'a' + col as u8) as char)?;
    }
    writeln!(out)?;

    for row in 0..BOARD_SIZE {
        write!(out, "{:2} ", row + 1)?;
        for col in 0..BOARD_SIZE {
            let mv = Move::at(row, col);
            let is_last = state.last_move == Some(mv);
            match board.get(mv) {
                Some(PlayerId::Black) if is_last => write!(out, "{}", "(B)".black().on_red())?,
                Some(PlayerId::White) if is_last => write!(out, "{}", "(W)".white().on_red())?,
                Some(PlayerId::Black) => write!(out, "{}", " B ".black().on_green())?,
                Some(PlayerId::White) => write!(out, "{}", " W ".white().on_green())?,
                None if state.highlights.contains(&mv) => {
                    write!(out, "{}", " * ".yellow().on_green())?
                }
                None => write!(out, "{}", " . ".dark_green().on_green())?,
            }
        }
        writeln!(out)?;
    }

    let (black, white) = board.score();
    let status = if board.is_terminal() {
        match board.leader() {
            Some(player) => format!("{} wins", player),
            None => "Draw".to_string(),
        }
    } else {
        format!("{} to move", board.current_player())
    };
    writeln!(out, "Black {:2}  White {:2}  {}", black, white, status)
}
