//! Game session management for the SOS GUI

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::{
    ConfigError, GameConfig, GameState, Letter, Move, Outcome, Pos,
    Side, Variant,
};

/// Minimum time a computer move stays "thinking", so computer-vs-computer
/// games can be followed on screen
const AI_MOVE_DELAY: Duration = Duration::from_millis(500);

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<Option<Move>>,
        start_time: Instant,
    },
}

/// One game on screen, with presentation-only bookkeeping
pub struct Session {
    pub game: GameState,
    pub config: GameConfig,
    pub ai_state: AiState,
    /// Letter picked by the human to move
    pub selected_letter: Option<Letter>,
    pub last_move: Option<Pos>,
    /// Side that placed each letter, for colouring
    pub placed_by: HashMap<Pos, Side>,
    pub move_count: usize,
    pub last_ai_time: Option<Duration>,
    pub message: Option<String>,
    /// Set when the last move earned another turn
    pub again: bool,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            game: config.build()?,
            config,
            ai_state: AiState::Idle,
            selected_letter: None,
            last_move: None,
            placed_by: HashMap::new(),
            move_count: 0,
            last_ai_time: None,
            message: None,
            again: false,
        })
    }

    /// Check if it's a human's turn
    pub fn is_human_turn(&self) -> bool {
        !self.game.is_over() && !self.game.current_player().is_computer()
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.game.is_over() && self.game.current_player().is_computer()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Pick the letter for the side to move
    pub fn select_letter(&mut self, side: Side, letter: Letter) {
        if side == self.game.current_side() && self.is_human_turn() {
            self.selected_letter = Some(letter);
            self.message = None;
        } else {
            self.message = Some(format!("It's {}'s turn!", self.game.current_side()));
        }
    }

    /// Attempt to place the selected letter at the given position
    pub fn try_place(&mut self, pos: Pos) -> Result<(), String> {
        if self.game.is_over() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() || !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        let Some(letter) = self.selected_letter else {
            return Err("Please select a letter first (S or O)".to_string());
        };

        self.execute_move(Move { pos, letter })
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, mv: Move) -> Result<(), String> {
        let report = self.game.take_turn(mv).map_err(|err| format!("Invalid move: {err}"))?;

        self.placed_by.insert(report.mv.pos, report.side);
        self.last_move = Some(report.mv.pos);
        self.move_count += 1;
        self.selected_letter = None;
        self.again = report.repeated;
        self.message = None;
        Ok(())
    }

    /// Start AI thinking on a worker thread.
    ///
    /// The worker runs a fork of the side's configured behaviour on a copy
    /// of the board; only the chosen move comes back to the game.
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }

        let mut board = self.game.board().clone();
        let side = self.game.current_side();
        let mut behavior = self.game.fork_current_behavior();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let mv = behavior.choose_move(&mut board, side);
            let _ = tx.send(mv);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => {
                if start_time.elapsed() < AI_MOVE_DELAY {
                    return;
                }
                match receiver.try_recv() {
                    Ok(mv) => Some((mv, start_time.elapsed())),
                    Err(TryRecvError::Empty) => None,
                    Err(TryRecvError::Disconnected) => {
                        self.ai_state = AiState::Idle;
                        self.message = Some("AI error".to_string());
                        return;
                    }
                }
            }
            AiState::Idle => None,
        };

        if let Some((mv, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.last_ai_time = Some(elapsed);

            match mv {
                Some(mv) => {
                    debug!(%mv, ?elapsed, "AI move received");
                    if let Err(msg) = self.execute_move(mv) {
                        warn!(%msg, "AI move refused");
                        self.message = Some(msg);
                    }
                }
                None => self.message = Some("AI could not find a move".to_string()),
            }
        }
    }

    /// AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// "Current turn" line for the status bar
    pub fn turn_text(&self) -> String {
        let side = self.game.current_side();
        if self.again {
            format!("Current turn: {side} (again!)")
        } else {
            format!("Current turn: {side}")
        }
    }

    /// Final message, once the game is over
    pub fn game_over_text(&self) -> Option<String> {
        let scores = format!(
            "Blue: {} | Red: {}",
            self.game.score(Side::Blue),
            self.game.score(Side::Red)
        );
        match self.game.outcome() {
            Outcome::InProgress => None,
            Outcome::Winner(side) => Some(format!("Winner: {side}\n{scores}")),
            Outcome::Draw => Some(format!("It's a draw!\n{scores}")),
            Outcome::NoWinner => Some(format!("Board full, no SOS\n{scores}")),
        }
    }

    /// Scores are only shown in General games
    pub fn shows_score(&self) -> bool {
        self.game.variant() == Variant::General
    }
}
