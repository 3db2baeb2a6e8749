//! Pattern scores for SOS evaluation
//!
//! Scores are awarded per 3-cell window, read in scan order along an axis.

use crate::board::Cell;

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Completed S-O-S
    pub const SOS: i32 = 100;
    /// S-O-_ or _-O-S: one letter from a line
    pub const TWO_THIRDS: i32 = 15;
    /// S-_-S: needs an O in the gap
    pub const SPLIT: i32 = 10;
    /// Center cell occupied
    pub const CENTER: i32 = 5;
}

/// Score of one window `(a, b, c)`
#[inline]
pub fn window_score(a: Cell, b: Cell, c: Cell) -> i32 {
    match (a, b, c) {
        (Cell::S, Cell::O, Cell::S) => PatternScore::SOS,
        (Cell::S, Cell::Empty, Cell::S) => PatternScore::SPLIT,
        (Cell::S, Cell::O, Cell::Empty) | (Cell::Empty, Cell::O, Cell::S) => {
            PatternScore::TWO_THIRDS
        }
        _ => 0,
    }
}
