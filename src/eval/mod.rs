//! Evaluation module for SOS
//!
//! Contains:
//! - Pattern score constants
//! - Static heuristic evaluation

pub mod heuristic;
pub mod patterns;

pub use heuristic::evaluate;
pub use patterns::PatternScore;
