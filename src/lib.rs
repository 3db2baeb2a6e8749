//! SOS game engine with a computer opponent
//!
//! Two players take turns placing an `S` or an `O` on an N×N board. Three
//! cells in a row (horizontal, vertical or diagonal) reading S-O-S form a
//! line, credited to the side that completed it:
//! - Simple: the first line wins the game
//! - General: play continues until the board is full, most lines wins
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation and move validation
//! - [`rules`]: Line detection and the two variant policies
//! - [`eval`]: Static position evaluation
//! - [`search`]: Minimax search with alpha-beta pruning
//! - [`player`]: Human and computer players
//! - [`engine`]: Game state tying everything together
//! - [`ui`]: egui front-end
//!
//! # Quick Start
//!
//! ```
//! use sos::{GameConfig, PlayerKind, Variant};
//!
//! let mut game = GameConfig {
//!     board_size: 3,
//!     variant: Variant::General,
//!     blue: PlayerKind::Computer,
//!     red: PlayerKind::Computer,
//! }
//! .build()
//! .unwrap();
//!
//! while let Some(mv) = game.request_move() {
//!     game.take_turn(mv).unwrap();
//! }
//! println!("{}", game.outcome());
//! ```

pub mod board;
pub mod engine;
pub mod eval;
pub mod player;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Letter, Move, Pos};
pub use engine::{GameConfig, GameState, TurnReport, BOARD_SIZES};
pub use player::{Behavior, ComputerPlayer, HumanPlayer, Player, PlayerKind, Side};
pub use rules::{Line, Outcome, Variant};
pub use search::{SearchResult, Searcher, TieBreak};

/// A move the engine refused. The board is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidMove {
    #[display("({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },
    #[display("({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
    #[display("'{letter}' is not a playable letter (S or O)")]
    IllegalLetter { letter: char },
    #[display("the game is already over")]
    GameOver,
}

/// The searcher was asked for a move on a full board
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no legal move: the board is full")]
pub struct NoLegalMove;

/// A game could not be created from the given settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board size {size} is too small (minimum 3)")]
    BoardTooSmall { size: usize },
}
