//! Players and their move-producing behaviour
//!
//! A player is a [`Side`] plus a [`Behavior`]. Humans hand their move to the
//! engine through [`HumanPlayer::submit`]; the computer runs the alpha-beta
//! [`Searcher`] on the board it is given.

use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

use crate::board::{Board, Move};
use crate::search::Searcher;

/// One of the two fixed sides. Blue moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Side {
    #[display("Blue")]
    Blue,
    #[display("Red")]
    Red,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Blue, Side::Red];

    /// The other side
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    /// Slot in per-side arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Blue => 0,
            Side::Red => 1,
        }
    }
}

/// Kind of behaviour, used to configure a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display, derive_more::IsVariant)]
pub enum PlayerKind {
    #[default]
    #[display("Human")]
    Human,
    #[display("Computer")]
    Computer,
}

impl PlayerKind {
    pub fn into_behavior(self) -> Box<dyn Behavior> {
        match self {
            PlayerKind::Human => Box::new(HumanPlayer::new()),
            PlayerKind::Computer => Box::new(ComputerPlayer::new()),
        }
    }
}

/// Something that can produce a move for the side to play
pub trait Behavior: fmt::Debug + Send {
    fn kind(&self) -> PlayerKind;

    /// Produce a move for `side` on `board`, or `None` if there is none.
    ///
    /// Implementations may mutate the board temporarily but must leave it
    /// as they found it.
    fn choose_move(&mut self, board: &mut Board, side: Side) -> Option<Move>;

    /// Detached behaviour of the same kind that can run away from the game,
    /// e.g. on a worker thread.
    fn fork(&mut self) -> Box<dyn Behavior>;
}

/// Interactive player: hands out the moves submitted to it, in order
#[derive(Debug, Clone, Default)]
pub struct HumanPlayer {
    pending: VecDeque<Move>,
}

impl HumanPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Player that will replay `moves` one per turn
    pub fn scripted(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            pending: moves.into_iter().collect(),
        }
    }

    /// Queue a move picked by the user
    pub fn submit(&mut self, mv: Move) {
        self.pending.push_back(mv);
    }
}

impl Behavior for HumanPlayer {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn choose_move(&mut self, _board: &mut Board, _side: Side) -> Option<Move> {
        self.pending.pop_front()
    }

    /// Queued moves stay with this player
    fn fork(&mut self) -> Box<dyn Behavior> {
        Box::new(HumanPlayer::new())
    }
}

/// Computer player backed by the alpha-beta searcher
#[derive(Debug, Clone, Default)]
pub struct ComputerPlayer {
    searcher: Searcher,
}

impl ComputerPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_searcher(searcher: Searcher) -> Self {
        Self { searcher }
    }
}

impl Behavior for ComputerPlayer {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Computer
    }

    fn choose_move(&mut self, board: &mut Board, side: Side) -> Option<Move> {
        match self.searcher.search(board) {
            Ok(result) => {
                debug!(%side, score = result.score, nodes = result.stats.nodes, "computer move chosen");
                result.best_move
            }
            Err(err) => {
                debug!(%side, %err, "computer has no move");
                None
            }
        }
    }

    fn fork(&mut self) -> Box<dyn Behavior> {
        Box::new(ComputerPlayer::with_searcher(self.searcher.fork()))
    }
}

/// A side and its behaviour
#[derive(Debug)]
pub struct Player {
    side: Side,
    behavior: Box<dyn Behavior>,
}

impl Player {
    pub fn new(side: Side, behavior: Box<dyn Behavior>) -> Self {
        Self { side, behavior }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn kind(&self) -> PlayerKind {
        self.behavior.kind()
    }

    #[inline]
    pub fn is_computer(&self) -> bool {
        self.kind().is_computer()
    }

    pub(crate) fn choose_move(&mut self, board: &mut Board) -> Option<Move> {
        self.behavior.choose_move(board, self.side)
    }

    pub(crate) fn fork_behavior(&mut self) -> Box<dyn Behavior> {
        self.behavior.fork()
    }
}
