//! Board representation for SOS

pub mod board;

#[cfg(test)]
mod tests;

pub use board::Board;

/// Smallest board that can hold an S-O-S line
pub const MIN_BOARD_SIZE: usize = 3;

/// Length of an S-O-S line
pub const LINE_LEN: usize = 3;

/// Axis vectors scanned for lines (each undirected axis once)
pub const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// A playable letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Letter {
    #[display("S")]
    S,
    #[display("O")]
    O,
}

impl Letter {
    /// Both letters, in enumeration order
    pub const ALL: [Letter; 2] = [Letter::S, Letter::O];

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Letter::S => 'S',
            Letter::O => 'O',
        }
    }
}

impl TryFrom<char> for Letter {
    type Error = crate::InvalidMove;

    /// Accepts exactly `S` or `O`; anything else, lowercase included, is
    /// rejected.
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'S' => Ok(Letter::S),
            'O' => Ok(Letter::O),
            letter => Err(crate::InvalidMove::IllegalLetter { letter }),
        }
    }
}

/// Contents of a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    S,
    O,
}

impl Cell {
    /// Letter held by the cell, if any
    #[inline]
    pub fn letter(self) -> Option<Letter> {
        match self {
            Cell::Empty => None,
            Cell::S => Some(Letter::S),
            Cell::O => Some(Letter::O),
        }
    }
}

impl From<Letter> for Cell {
    #[inline]
    fn from(letter: Letter) -> Self {
        match letter {
            Letter::S => Cell::S,
            Letter::O => Cell::O,
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `n` times along `(dr, dc)`, staying inside a `size`×`size` board
    #[inline]
    pub fn offset(self, (dr, dc): (isize, isize), n: isize, size: usize) -> Option<Pos> {
        let row = self.row.checked_add_signed(dr * n)?;
        let col = self.col.checked_add_signed(dc * n)?;
        (row < size && col < size).then_some(Pos { row, col })
    }
}

/// A candidate move: a letter placed on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{letter} at {pos}")]
pub struct Move {
    pub pos: Pos,
    pub letter: Letter,
}

impl Move {
    #[inline]
    pub fn new(row: usize, col: usize, letter: Letter) -> Self {
        Self {
            pos: Pos::new(row, col),
            letter,
        }
    }
}
