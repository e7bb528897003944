use crate::core::{Board, Move, PlayerId, BOARD_SIZE};

/// 8方向 (行, 列)
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 合法手生成 (手番を明示する)
///
/// Works for either colour without touching `board.current_player()`.
pub fn legal_moves_for(board: &Board, player: PlayerId) -> Vec<Move> {
    let mut moves = Vec::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let mv = Move::at(row, col);
            if is_valid_move_for(board, mv, player) {
                moves.push(mv);
            }
        }
    }
    moves
}

pub fn has_legal_move(board: &Board, player: PlayerId) -> bool {
    (0..BOARD_SIZE * BOARD_SIZE)
        .map(|i| Move::at(i / BOARD_SIZE, i % BOARD_SIZE))
        .any(|mv| is_valid_move_for(board, mv, player))
}

pub fn is_valid_move_for(board: &Board, mv: Move, player: PlayerId) -> bool {
    if board.get(mv).is_some() {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| would_flip_in_direction(board, mv, player, dr, dc))
}

/// 挟める列があるか: 隣が相手の石で、その先に自分の石がある
pub fn would_flip_in_direction(
    board: &Board,
    mv: Move,
    player: PlayerId,
    dr: i32,
    dc: i32,
) -> bool {
    let opponent = player.opponent();
    let mut curr = match offset(mv, dr, dc) {
        Some(next) if board.get(next) == Some(opponent) => next,
        _ => return false,
    };

    while let Some(next) = offset(curr, dr, dc) {
        match board.get(next) {
            None => return false,
            Some(p) if p == player => return true,
            Some(_) => curr = next,
        }
    }
    false
}

/// Every disc `player` would flip by playing `mv`, direction by direction.
/// Empty when the move is illegal.
pub fn flips_for(board: &Board, mv: Move, player: PlayerId) -> Vec<Move> {
    let mut flips = Vec::new();
    if board.get(mv).is_some() {
        return flips;
    }
    for &(dr, dc) in DIRECTIONS.iter() {
        if !would_flip_in_direction(board, mv, player, dr, dc) {
            continue;
        }
        let mut curr = mv;
        while let Some(next) = offset(curr, dr, dc) {
            if board.get(next) != Some(player.opponent()) {
                break;
            }
            flips.push(next);
            curr = next;
        }
    }
    flips
}

pub fn offset(mv: Move, dr: i32, dc: i32) -> Option<Move> {
    let r = mv.row() as i32 + dr;
    let c = mv.col() as i32 + dc;
    let size = BOARD_SIZE as i32;
    if r >= 0 && r < size && c >= 0 && c < size {
        Some(Move::at(r as usize, c as usize))
    } else {
        None
    }
}

/// Same-colour discs among the (up to 8) neighbours of `mv`.
pub fn same_colour_neighbours(board: &Board, mv: Move) -> usize {
    let Some(owner) = board.get(mv) else {
        return 0;
    };
    DIRECTIONS
        .iter()
        .filter_map(|&(dr, dc)| offset(mv, dr, dc))
        .filter(|&n| board.get(n) == Some(owner))
        .count()
}
