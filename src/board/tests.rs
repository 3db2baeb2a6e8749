use super::*;
use crate::InvalidMove;

#[test]
fn test_letter_from_char() {
    assert_eq!(Letter::try_from('S').unwrap(), Letter::S);
    assert_eq!(Letter::try_from('O').unwrap(), Letter::O);
    assert_eq!(
        Letter::try_from('X'),
        Err(InvalidMove::IllegalLetter { letter: 'X' })
    );
    assert!(Letter::try_from(' ').is_err());
}

#[test]
fn test_lowercase_letter_rejected() {
    assert_eq!(
        Letter::try_from('o'),
        Err(InvalidMove::IllegalLetter { letter: 'o' })
    );

    let mut board = Board::new(3);
    assert_eq!(
        board.apply(0, 0, 's'),
        Err(InvalidMove::IllegalLetter { letter: 's' })
    );
    assert!(board.is_empty(Pos::new(0, 0)));
}

#[test]
fn test_cell_from_letter() {
    assert_eq!(Cell::from(Letter::S), Cell::S);
    assert_eq!(Cell::from(Letter::O).letter(), Some(Letter::O));
    assert_eq!(Cell::Empty.letter(), None);
}

#[test]
fn test_new_board_is_empty() {
    let board = Board::new(4);
    assert_eq!(board.size(), 4);
    assert_eq!(board.empty_count(), 16);
    assert!(!board.is_full());
    assert!(board.rows().flatten().all(|c| c.is_empty()));
}

#[test]
fn test_apply_valid_move() {
    let mut board = Board::new(3);
    let mv = board.apply(0, 0, 'S').unwrap();
    assert_eq!(mv, Move::new(0, 0, Letter::S));
    assert_eq!(board.get(Pos::new(0, 0)), Cell::S);
    assert_eq!(board.empty_count(), 8);
}

#[test]
fn test_apply_occupied_leaves_board_unchanged() {
    let mut board = Board::new(3);
    board.apply(1, 1, 'O').unwrap();
    let before = board.clone();

    assert_eq!(
        board.apply(1, 1, 'S'),
        Err(InvalidMove::Occupied { row: 1, col: 1 })
    );
    assert_eq!(board, before);
}

#[test]
fn test_apply_out_of_bounds_leaves_board_unchanged() {
    let mut board = Board::new(3);
    let before = board.clone();

    assert!(matches!(
        board.apply(3, 0, 'S'),
        Err(InvalidMove::OutOfBounds { row: 3, col: 0, size: 3 })
    ));
    assert!(board.apply(0, 7, 'S').is_err());
    assert_eq!(board, before);
}

#[test]
fn test_apply_illegal_letter_leaves_board_unchanged() {
    let mut board = Board::new(3);
    let before = board.clone();

    assert!(board.apply(0, 0, 'X').is_err());
    assert_eq!(board, before);
}

#[test]
fn test_board_full() {
    let mut board = Board::new(3);
    for row in 0..3 {
        for col in 0..3 {
            assert!(!board.is_full());
            board.apply(row, col, 'O').unwrap();
        }
    }
    assert!(board.is_full());
    assert!(board.legal_moves().is_empty());
}

#[test]
fn test_legal_moves_pair_both_letters() {
    let mut board = Board::new(3);
    board.apply(0, 0, 'S').unwrap();
    let moves = board.legal_moves();
    assert_eq!(moves.len(), 16);
    assert!(moves.iter().all(|m| board.is_empty(m.pos)));
    assert!(moves.contains(&Move::new(2, 2, Letter::O)));
}

#[test]
fn test_pos_offset() {
    let pos = Pos::new(0, 1);
    assert_eq!(pos.offset((1, 1), 2, 3), None);
    assert_eq!(pos.offset((1, 0), 2, 3), Some(Pos::new(2, 1)));
    assert_eq!(pos.offset((1, -1), 1, 3), Some(Pos::new(1, 0)));
    assert_eq!(pos.offset((1, -1), 2, 3), None);
}

#[test]
fn test_center() {
    assert_eq!(Board::new(3).center(), Pos::new(1, 1));
    assert_eq!(Board::new(6).center(), Pos::new(3, 3));
}

#[test]
fn test_display() {
    let mut board = Board::new(3);
    board.apply(0, 0, 'S').unwrap();
    board.apply(2, 1, 'O').unwrap();
    assert_eq!(board.to_string(), "S . .\n. . .\n. O .\n");
}

#[test]
#[should_panic(expected = "outside the 3x3 board")]
fn test_get_past_last_column_panics() {
    let mut board = Board::new(3);
    board.apply(1, 0, 'S').unwrap();
    // (0, 3) would alias (1, 0) in row-major storage
    let _ = board.get(Pos::new(0, 3));
}
