//! Search module for the SOS computer opponent
//!
//! Contains:
//! - Fixed-depth minimax with alpha-beta pruning
//! - Injectable root tie-break policy

pub mod alphabeta;

pub use alphabeta::{SearchResult, SearchStats, Searcher, TieBreak, SEARCH_DEPTH};
