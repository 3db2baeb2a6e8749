//! GUI module for the SOS game
//!
//! A native front-end using egui/eframe: a setup screen for board size,
//! mode and player kinds, then the board with one panel per side.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::SosApp;
pub use game_state::{AiState, Session};
