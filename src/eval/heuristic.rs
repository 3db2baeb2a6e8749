//! Static evaluation of SOS positions
//!
//! The evaluation is one-sided: it rewards S-O-S patterns on the board and
//! never subtracts anything for the opponent. Letters are not owned by
//! either side, so the minimax search supplies all the adversarial play.

use crate::board::{Board, Pos, DIRECTIONS, LINE_LEN};

use super::patterns::{window_score, PatternScore};

/// Evaluate the board for the maximizing side.
///
/// Sums [`window_score`] over every in-bounds 3-cell window on the four
/// axes, plus [`PatternScore::CENTER`] when the center cell is occupied.
#[must_use]
pub fn evaluate(board: &Board) -> i32 {
    let pattern_score = evaluate_patterns(board);
    let position_score = if board.is_empty(board.center()) {
        0
    } else {
        PatternScore::CENTER
    };
    pattern_score + position_score
}

/// Pattern score over all windows
fn evaluate_patterns(board: &Board) -> i32 {
    let size = board.size();
    let far = LINE_LEN as isize - 1;
    let mut score = 0;

    for row in 0..size {
        for col in 0..size {
            let start = Pos::new(row, col);
            for &dir in &DIRECTIONS {
                let (Some(mid), Some(end)) = (start.offset(dir, 1, size), start.offset(dir, far, size))
                else {
                    continue;
                };
                score += window_score(board.get(start), board.get(mid), board.get(end));
            }
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_scores_zero() {
        assert_eq!(evaluate(&Board::new(3)), 0);
        assert_eq!(evaluate(&Board::new(8)), 0);
    }

    #[test]
    fn test_center_bonus() {
        let mut board = Board::new(3);
        board.apply(1, 1, 'S').unwrap();
        assert_eq!(evaluate(&board), PatternScore::CENTER);
    }

    #[test]
    fn test_full_line() {
        let mut board = Board::new(3);
        board.apply(0, 0, 'S').unwrap();
        board.apply(0, 1, 'O').unwrap();
        board.apply(0, 2, 'S').unwrap();
        assert_eq!(evaluate(&board), PatternScore::SOS);
    }

    #[test]
    fn test_partial_patterns() {
        // S O _ on the top row, and S _ S down the left column
        let mut board = Board::new(3);
        board.apply(0, 0, 'S').unwrap();
        board.apply(0, 1, 'O').unwrap();
        board.apply(2, 0, 'S').unwrap();
        assert_eq!(evaluate(&board), PatternScore::TWO_THIRDS + PatternScore::SPLIT);
    }

    #[test]
    fn test_completing_a_line_scores_higher() {
        let mut board = Board::new(4);
        board.apply(1, 0, 'S').unwrap();
        board.apply(1, 1, 'O').unwrap();
        let before = evaluate(&board);
        board.apply(1, 2, 'S').unwrap();
        assert!(evaluate(&board) > before);
    }
}
