//! S-O-S line detection
//!
//! Lines are found by scanning every cell along the four directed axes and
//! are recorded once, in the order they were found. Each undirected segment
//! can be reached from two scan origins, so candidates are deduplicated by
//! their unordered endpoint pair against everything already recorded.

use tracing::debug;

use crate::board::{Board, Cell, Pos, DIRECTIONS, LINE_LEN};
use crate::player::Side;

/// A completed S-O-S line, credited to the side that formed it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub start: Pos,
    pub end: Pos,
    pub owner: Side,
}

impl Line {
    /// Same segment regardless of direction and owner
    #[inline]
    pub fn same_segment(&self, start: Pos, end: Pos) -> bool {
        (self.start == start && self.end == end) || (self.start == end && self.end == start)
    }
}

/// Append-only record of every line found during a game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineRegistry {
    lines: Vec<Line>,
}

impl LineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Line] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Check whether a segment was already recorded, in either direction
    pub fn contains_segment(&self, start: Pos, end: Pos) -> bool {
        self.lines.iter().any(|l| l.same_segment(start, end))
    }

    fn push(&mut self, line: Line) {
        self.lines.push(line);
    }
}

/// Find the S-O-S window starting at `start` along `dir`, if any.
/// Returns the far endpoint.
#[inline]
fn sos_at(board: &Board, start: Pos, dir: (isize, isize)) -> Option<Pos> {
    let size = board.size();
    let mid = start.offset(dir, 1, size)?;
    let end = start.offset(dir, LINE_LEN as isize - 1, size)?;
    let is_sos = board.get(start) == Cell::S && board.get(mid) == Cell::O && board.get(end) == Cell::S;
    is_sos.then_some(end)
}

/// Scan the whole board and record every line not yet in `registry`.
///
/// New lines are credited to `side`; attribution follows the caller's turn
/// context and is not checked against who placed the letters. Returns how
/// many lines were added. Calling again without a board change returns 0.
pub fn detect_new_lines(board: &Board, registry: &mut LineRegistry, side: Side) -> usize {
    let size = board.size();
    let mut found = 0;

    for row in 0..size {
        for col in 0..size {
            let start = Pos::new(row, col);
            if board.get(start) != Cell::S {
                continue;
            }
            for &dir in &DIRECTIONS {
                let Some(end) = sos_at(board, start, dir) else {
                    continue;
                };
                if registry.contains_segment(start, end) {
                    continue;
                }
                debug!(%start, %end, ?side, "new SOS line");
                registry.push(Line {
                    start,
                    end,
                    owner: side,
                });
                found += 1;
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        let mut board = Board::new(rows.len());
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                if ch != '.' {
                    board.apply(r, c, ch).unwrap();
                }
            }
        }
        board
    }

    #[test]
    fn test_detects_all_four_axes() {
        let horizontal = board_from(&["SOS", "...", "..."]);
        let vertical = board_from(&["S..", "O..", "S.."]);
        let diagonal = board_from(&["S..", ".O.", "..S"]);
        let anti = board_from(&["..S", ".O.", "S.."]);

        for board in [horizontal, vertical, diagonal, anti] {
            let mut registry = LineRegistry::new();
            assert_eq!(detect_new_lines(&board, &mut registry, Side::Blue), 1);
            assert_eq!(registry.len(), 1);
        }
    }

    #[test]
    fn test_line_endpoints_and_owner() {
        let board = board_from(&["..S", ".O.", "S.."]);
        let mut registry = LineRegistry::new();
        detect_new_lines(&board, &mut registry, Side::Red);

        let line = registry.as_slice()[0];
        assert_eq!(line.start, Pos::new(0, 2));
        assert_eq!(line.end, Pos::new(2, 0));
        assert_eq!(line.owner, Side::Red);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let board = board_from(&["SOS", "O..", "S.."]);
        let mut registry = LineRegistry::new();
        assert_eq!(detect_new_lines(&board, &mut registry, Side::Blue), 2);
        assert_eq!(detect_new_lines(&board, &mut registry, Side::Red), 0);
        assert!(registry.iter().all(|l| l.owner == Side::Blue));
    }

    #[test]
    fn test_reversed_segment_is_duplicate() {
        let mut registry = LineRegistry::new();
        registry.push(Line {
            start: Pos::new(0, 2),
            end: Pos::new(0, 0),
            owner: Side::Blue,
        });
        let board = board_from(&["SOS", "...", "..."]);
        assert_eq!(detect_new_lines(&board, &mut registry, Side::Red), 0);
    }

    #[test]
    fn test_one_letter_can_close_several_lines() {
        // The centre S closes a horizontal and a vertical line
        let mut board = board_from(&[
            "..S..", //
            "..O..", //
            "SO...", //
            ".....", //
            ".....", //
        ]);
        let mut registry = LineRegistry::new();
        assert_eq!(detect_new_lines(&board, &mut registry, Side::Blue), 0);

        board.apply(2, 2, 'S').unwrap();
        assert_eq!(detect_new_lines(&board, &mut registry, Side::Red), 2);
        assert!(registry.iter().all(|l| l.owner == Side::Red));
    }

    #[test]
    fn test_sos_reversed_pattern_is_not_a_line() {
        let board = board_from(&["OSO", "...", "..."]);
        let mut registry = LineRegistry::new();
        assert_eq!(detect_new_lines(&board, &mut registry, Side::Blue), 0);
    }

    #[test]
    fn test_every_axis_counted_once() {
        let board = board_from(&["SOS", "OOO", "SOS"]);
        let mut registry = LineRegistry::new();
        let detected = detect_new_lines(&board, &mut registry, Side::Blue);
        // Rows 0 and 2, columns 0 and 2, both diagonals
        assert_eq!(detected, 6);
        assert_eq!(registry.len(), 6);
    }
}
