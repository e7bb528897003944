use crate::core::{Board, Move, PlayerId, BOARD_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),
    #[error("row {row}: expected 8 cells, got {found}")]
    RowWidth { row: usize, found: usize },
    #[error("row {row}: unknown cell `{ch}` (use B, W or .)")]
    Cell { row: usize, ch: char },
}

/// 文字列配列から盤面を作る
///
/// One string per row, `B` / `W` / `.` per cell; whitespace between cells is
/// ignored, so `"B W . ."` and `"BW.."` read the same.
pub fn setup_from_strings(rows: &[&str], to_move: PlayerId) -> Result<Board, SetupError> {
    if rows.len() != BOARD_SIZE {
        return Err(SetupError::RowCount(rows.len()));
    }

    let mut board = Board::empty(to_move);
    for (r, line) in rows.iter().enumerate() {
        let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        if cells.len() != BOARD_SIZE {
            return Err(SetupError::RowWidth {
                row: r,
                found: cells.len(),
            });
        }
        for (c, ch) in cells.into_iter().enumerate() {
            let owner = match ch.to_ascii_uppercase() {
                'B' | 'X' => PlayerId::Black,
                'W' | 'O' => PlayerId::White,
                '.' | '-' => continue,
                _ => return Err(SetupError::Cell { row: r, ch }),
            };
            board.place_piece(Move::at(r, c), owner);
        }
    }
    Ok(board)
}

impl Board {
    pub fn from_rows(rows: &[&str], to_move: PlayerId) -> Result<Board, SetupError> {
        setup_from_strings(rows, to_move)
    }
}

pub fn get_standard_setup() -> Vec<&'static str> {
    vec![
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . W B . . .",
        ". . . B W . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
    ]
}
