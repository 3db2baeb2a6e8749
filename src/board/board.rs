//! Board structure with validated move application

use std::fmt;

use super::{Cell, Letter, Move, Pos};
use crate::InvalidMove;

/// Square SOS board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Row-major cells
    cells: Vec<Cell>,
}

impl Board {
    /// Empty `size`×`size` board.
    ///
    /// Size validation lives in [`crate::GameConfig`]; the board itself
    /// only requires a non-zero size.
    pub fn new(size: usize) -> Self {
        debug_assert!(size > 0);
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major index. Panics off the board: a column past the edge would
    /// otherwise alias a cell of the next row.
    #[inline]
    fn index(&self, pos: Pos) -> usize {
        assert!(
            self.contains(pos),
            "{pos} is outside the {0}x{0} board",
            self.size
        );
        pos.row * self.size + pos.col
    }

    /// Check if position lies on the board
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Get cell at position.
    ///
    /// # Panics
    ///
    /// If `pos` is not on the board.
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        self.cells[self.index(pos)]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_empty()
    }

    /// Validate and apply a move from outside the engine.
    ///
    /// Fails without touching the board if the coordinates are out of
    /// range, the cell is occupied or the letter is not S/O.
    pub fn apply(&mut self, row: usize, col: usize, letter: char) -> Result<Move, InvalidMove> {
        let pos = Pos::new(row, col);
        if !self.contains(pos) {
            return Err(InvalidMove::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        if !self.is_empty(pos) {
            return Err(InvalidMove::Occupied { row, col });
        }
        let letter = Letter::try_from(letter)?;

        self.place(pos, letter);
        Ok(Move { pos, letter })
    }

    /// Place a letter without validation.
    /// Use [`Board::apply`] for game moves.
    #[inline]
    pub(crate) fn place(&mut self, pos: Pos, letter: Letter) {
        let idx = self.index(pos);
        self.cells[idx] = letter.into();
    }

    /// Overwrite a cell, used to restore trial moves
    #[inline]
    pub(crate) fn set(&mut self, pos: Pos, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    /// True iff no empty cell remains
    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Number of empty cells
    #[inline]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Empty positions in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| Pos::new(i / self.size, i % self.size))
    }

    /// Every legal move: each empty cell paired with both letters
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.empty_count() * Letter::ALL.len());
        for pos in self.empty_cells() {
            for letter in Letter::ALL {
                moves.push(Move { pos, letter });
            }
        }
        moves
    }

    /// Center cell (lower-right of the middle four on even boards)
    #[inline]
    pub fn center(&self) -> Pos {
        Pos::new(self.size / 2, self.size / 2)
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                let c = cell.letter().map_or('.', Letter::as_char);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
