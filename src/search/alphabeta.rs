//! Minimax search with alpha-beta pruning
//!
//! The computer side is always the maximizing player at the root. Every
//! legal move is tried in place on the caller's board through a
//! [`TrialMove`] guard, so the board holds only committed moves whenever
//! the search is not inside a trial.
//!
//! # Example
//!
//! ```
//! use sos::board::Board;
//! use sos::search::Searcher;
//!
//! let mut searcher = Searcher::with_seed(7);
//! let mut board = Board::new(3);
//!
//! let result = searcher.search(&mut board).unwrap();
//! let best = result.best_move.unwrap();
//! println!("Best move: {best}");
//! ```

use std::ops::{Deref, DerefMut};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use tracing::{instrument, trace};

use crate::board::{Board, Cell, Move, Pos};
use crate::eval::evaluate;
use crate::NoLegalMove;

/// Plies searched from the root, the root move included
pub const SEARCH_DEPTH: u8 = 3;

/// Ordering applied to root moves before they are searched.
///
/// The first move with a strictly better score is kept, so the ordering
/// decides which of several equally scored moves is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Shuffle root moves with the searcher's PRNG
    #[default]
    Shuffle,
    /// Keep generation order (row-major, S before O)
    FirstGenerated,
}

/// Search statistics for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, root children included
    pub nodes: u64,
    /// Sibling lists cut short by `beta <= alpha`
    pub cutoffs: u64,
    /// Leaves scored by the static evaluator
    pub evaluations: u64,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found; `None` only if the search was given no moves
    pub best_move: Option<Move>,
    /// Minimax score of the best move
    pub score: i32,
    pub stats: SearchStats,
}

/// A letter placed for the duration of one search branch.
///
/// Dereferences to the board; the previous cell is restored on drop, so
/// every return path of the branch (including pruning) undoes the move.
struct TrialMove<'a> {
    board: &'a mut Board,
    pos: Pos,
    prev: Cell,
}

impl<'a> TrialMove<'a> {
    fn new(board: &'a mut Board, mv: Move) -> Self {
        let prev = board.get(mv.pos);
        board.place(mv.pos, mv.letter);
        Self {
            board,
            pos: mv.pos,
            prev,
        }
    }
}

impl Deref for TrialMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for TrialMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        self.board.set(self.pos, self.prev);
    }
}

/// Fixed-depth alpha-beta searcher
#[derive(Debug, Clone)]
pub struct Searcher {
    rng: Pcg32,
    tie_break: TieBreak,
    stats: SearchStats,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    /// Searcher seeded from the thread RNG
    pub fn new() -> Self {
        Self::with_rng(Pcg32::from_rng(&mut rand::rng()))
    }

    /// Reproducible searcher for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    fn with_rng(rng: Pcg32) -> Self {
        Self {
            rng,
            tie_break: TieBreak::default(),
            stats: SearchStats::default(),
        }
    }

    /// Independent searcher with the same policy, seeded from this one's
    /// stream. Advances this searcher's PRNG.
    pub fn fork(&mut self) -> Searcher {
        Self::with_rng(Pcg32::from_rng(&mut self.rng)).tie_break(self.tie_break)
    }

    /// Replace the root ordering policy
    #[must_use]
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Choose a move for the side to play.
    ///
    /// The board is mutated during the search and is identical to its
    /// input state when this returns.
    #[instrument(skip_all, fields(size = board.size(), empty = board.empty_count()))]
    pub fn search(&mut self, board: &mut Board) -> Result<SearchResult, NoLegalMove> {
        let mut moves = board.legal_moves();
        if moves.is_empty() {
            return Err(NoLegalMove);
        }
        if self.tie_break == TieBreak::Shuffle {
            moves.shuffle(&mut self.rng);
        }

        self.stats = SearchStats::default();
        let mut best_move = None;
        let mut best_score = i32::MIN;
        let mut alpha = i32::MIN;

        for mv in moves {
            let score = {
                let mut trial = TrialMove::new(board, mv);
                self.minimax(&mut trial, SEARCH_DEPTH - 1, alpha, i32::MAX, false)
            };
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_score);
        }

        trace!(
            nodes = self.stats.nodes,
            cutoffs = self.stats.cutoffs,
            evaluations = self.stats.evaluations,
            score = best_score,
            "search finished"
        );

        Ok(SearchResult {
            best_move,
            score: best_score,
            stats: self.stats,
        })
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.stats.nodes += 1;

        let moves = board.legal_moves();
        if depth == 0 || moves.is_empty() {
            self.stats.evaluations += 1;
            return evaluate(board);
        }

        if maximizing {
            let mut best = i32::MIN;
            for mv in moves {
                let mut trial = TrialMove::new(board, mv);
                let score = self.minimax(&mut trial, depth - 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in moves {
                let mut trial = TrialMove::new(board, mv);
                let score = self.minimax(&mut trial, depth - 1, alpha, beta, true);
                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }
}
