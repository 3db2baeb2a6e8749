//! Game rules for SOS
//!
//! This module implements the rule set for SOS including:
//! - Line detection (S-O-S triples on four axes)
//! - Variant policies (Simple and General scoring, end of game)

pub mod lines;
pub mod variant;

// Re-exports for convenient access
pub use lines::{detect_new_lines, Line, LineRegistry};
pub use variant::{GeneralRules, Outcome, SimpleRules, Tally, Variant, VariantRules};
