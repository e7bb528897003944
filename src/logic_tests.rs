#[cfg(test)]
mod tests {
    use crate::core::{new_game, Board, Move, PlayerId};
    use crate::logic::{flips_for, legal_moves_for};
    use rand::prelude::*;

    fn mv(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn test_start_position() {
        let board = new_game();
        assert_eq!(board.score(), (2, 2));
        assert_eq!(board.current_player(), PlayerId::Black);
        assert_eq!(
            board.legal_moves(),
            vec![mv(2, 3), mv(3, 2), mv(4, 5), mv(5, 4)]
        );
        assert_eq!(legal_moves_for(&board, PlayerId::White).len(), 4);
    }

    #[test]
    fn test_opening_move_flips_one_disc() {
        let mut board = new_game();
        assert_eq!(board.flips_for(mv(2, 3)), vec![mv(3, 3)]);
        assert!(board.apply_move(mv(2, 3)));
        assert_eq!(board.get(mv(3, 3)), Some(PlayerId::Black));
        assert_eq!(board.score(), (4, 1));
        assert_eq!(board.current_player(), PlayerId::White);
    }

    #[test]
    fn test_illegal_move_changes_nothing() {
        let mut board = new_game();
        let before = board.clone();
        // occupied, no capture, and a corner with nothing to flip
        for m in [mv(3, 3), mv(2, 2), mv(0, 0)] {
            assert!(!board.apply_move(m));
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_legal_moves_is_idempotent() {
        let mut board = new_game();
        board.apply_move(mv(2, 3));
        let first = board.legal_moves();
        assert_eq!(board.legal_moves(), first);
        assert_eq!(board.legal_moves(), first);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = new_game();
        let mut copy = original.clone();
        copy.apply_move(mv(2, 3));
        copy.pass();
        assert_eq!(original, Board::new());
        assert_ne!(copy, original);
    }

    #[test]
    fn test_flips_in_several_directions() {
        let board = Board::from_rows(
            &[
                "B . B . B . . .",
                ". W W W . . . .",
                "B W . W B . . .",
                ". W W W . . . .",
                "B . B . B . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
            ],
            PlayerId::Black,
        )
        .unwrap();
        let mut flips = flips_for(&board, mv(2, 2), PlayerId::Black);
        flips.sort();
        assert_eq!(
            flips,
            vec![
                mv(1, 1),
                mv(1, 2),
                mv(1, 3),
                mv(2, 1),
                mv(2, 3),
                mv(3, 1),
                mv(3, 2),
                mv(3, 3)
            ]
        );
        let mut after = board.clone();
        assert!(after.apply_move(mv(2, 2)));
        assert_eq!(after.score(), (8 + 9, 0));
    }

    #[test]
    fn test_full_board_is_terminal() {
        let rows = ["BWBWBWBW"; 8];
        let board = Board::from_rows(&rows, PlayerId::Black).unwrap();
        assert!(board.is_terminal());
        assert!(board.legal_moves().is_empty());
        assert_eq!(board.score(), (32, 32));
        assert_eq!(board.leader(), None);
    }

    #[test]
    fn test_one_sided_board_is_terminal() {
        let board = Board::from_rows(
            &[
                "B B . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
                ". . . . . . . .",
            ],
            PlayerId::White,
        )
        .unwrap();
        assert!(board.is_terminal());
        // the check does not change whose turn it is
        assert_eq!(board.current_player(), PlayerId::White);
    }

    #[test]
    fn test_pass_only_changes_the_side_to_move() {
        let mut board = new_game();
        let cells = board.cells;
        board.pass();
        assert_eq!(board.current_player(), PlayerId::White);
        assert_eq!(board.cells, cells);
    }

    #[test]
    fn test_random_games_stay_consistent() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..30 {
            let mut board = new_game();
            while !board.is_terminal() {
                let moves = board.legal_moves();
                let Some(&m) = moves.choose(&mut rng) else {
                    board.pass();
                    continue;
                };
                let before = board.total_discs();
                let flipped = board.flips_for(m).len();
                let (b0, w0) = board.score();
                let mover = board.current_player();

                assert!(flipped >= 1);
                assert!(board.apply_move(m));
                assert_eq!(board.total_discs(), before + 1);
                assert_eq!(board.current_player(), mover.opponent());

                let (b1, w1) = board.score();
                match mover {
                    PlayerId::Black => assert_eq!((b1, w1), (b0 + 1 + flipped, w0 - flipped)),
                    PlayerId::White => assert_eq!((b1, w1), (b0 - flipped, w0 + 1 + flipped)),
                }
            }
            assert!(board.total_discs() <= 64);
        }
    }
}
