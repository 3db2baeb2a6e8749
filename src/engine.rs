//! Game engine tying the board, line detection and variant rules together
//!
//! A [`GameState`] is created per game and never reset. The caller drives
//! each turn:
//!
//! 1. **Apply**: [`GameState::apply_move`] validates and places a letter
//! 2. **Detect**: [`GameState::detect_and_score_new_lines`] records new
//!    lines for the side to move and updates score, winner and draw
//! 3. **Hand over**: [`GameState::switch_turn`] when the variant does not
//!    grant another turn ([`GameState::finish_turn`] makes that call)
//!
//! [`GameState::take_turn`] runs all three steps.
//!
//! # Example
//!
//! ```
//! use sos::{GameState, PlayerKind, Side, Variant};
//!
//! let mut game = GameState::new(
//!     3,
//!     Variant::Simple,
//!     PlayerKind::Human.into_behavior(),
//!     PlayerKind::Human.into_behavior(),
//! )
//! .unwrap();
//!
//! game.apply_move(0, 0, 'S').unwrap();
//! game.detect_and_score_new_lines();
//! game.switch_turn();
//! game.apply_move(0, 1, 'O').unwrap();
//! game.detect_and_score_new_lines();
//! game.switch_turn();
//! game.apply_move(0, 2, 'S').unwrap();
//!
//! assert_eq!(game.detect_and_score_new_lines(), 1);
//! assert_eq!(game.winner(), Some(Side::Blue));
//! ```

use tracing::{debug, info, instrument, warn};

use crate::board::{Board, Move, MIN_BOARD_SIZE};
use crate::player::{Behavior, ComputerPlayer, Player, PlayerKind, Side};
use crate::rules::{detect_new_lines, Line, LineRegistry, Outcome, Tally, Variant, VariantRules};
use crate::{ConfigError, InvalidMove};

/// Board sizes offered by the setup screen
pub const BOARD_SIZES: std::ops::RangeInclusive<usize> = 3..=8;

/// Settings for a new game.
///
/// Defaults match the setup screen: a 6×6 Simple game between two humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub variant: Variant,
    pub blue: PlayerKind,
    pub red: PlayerKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 6,
            variant: Variant::Simple,
            blue: PlayerKind::Human,
            red: PlayerKind::Human,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall {
                size: self.board_size,
            });
        }
        Ok(())
    }

    /// Create a fresh game from these settings
    pub fn build(&self) -> Result<GameState, ConfigError> {
        GameState::new(
            self.board_size,
            self.variant,
            self.blue.into_behavior(),
            self.red.into_behavior(),
        )
    }
}

/// What happened during one [`GameState::take_turn`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub side: Side,
    pub mv: Move,
    pub new_lines: usize,
    /// Same side plays again
    pub repeated: bool,
    pub outcome: Outcome,
}

/// State of one SOS game
#[derive(Debug)]
pub struct GameState {
    board: Board,
    players: [Player; 2],
    current: Side,
    rules: Box<dyn VariantRules>,
    tally: Tally,
    lines: LineRegistry,
}

impl GameState {
    /// Create a game on an empty `size`×`size` board with Blue to move.
    #[instrument(skip(blue, red), fields(blue_kind = ?blue.kind(), red_kind = ?red.kind()))]
    pub fn new(
        size: usize,
        variant: Variant,
        blue: Box<dyn Behavior>,
        red: Box<dyn Behavior>,
    ) -> Result<Self, ConfigError> {
        if size < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall { size });
        }
        info!("new game");
        Ok(Self {
            board: Board::new(size),
            players: [Player::new(Side::Blue, blue), Player::new(Side::Red, red)],
            current: Side::Blue,
            rules: variant.rules(),
            tally: Tally::default(),
            lines: LineRegistry::new(),
        })
    }

    // =========================================================================
    // Turn flow
    // =========================================================================

    /// Validate and place a letter for the side to move.
    ///
    /// On error the board is unchanged. Moves are refused once the game is
    /// over.
    pub fn apply_move(&mut self, row: usize, col: usize, letter: char) -> Result<Move, InvalidMove> {
        if self.is_over() {
            warn!(row, col, %letter, "move after game over");
            return Err(InvalidMove::GameOver);
        }
        match self.board.apply(row, col, letter) {
            Ok(mv) => {
                debug!(side = %self.current, %mv, "move applied");
                Ok(mv)
            }
            Err(err) => {
                warn!(side = %self.current, %err, "move rejected");
                Err(err)
            }
        }
    }

    /// [`Self::apply_move`] for a typed move
    #[inline]
    pub fn play(&mut self, mv: Move) -> Result<Move, InvalidMove> {
        self.apply_move(mv.pos.row, mv.pos.col, mv.letter.as_char())
    }

    /// Record lines formed since the last call, credit them to the side to
    /// move and let the variant update score, winner and draw.
    ///
    /// Returns the number of new lines; a second call without a move in
    /// between returns 0.
    pub fn detect_and_score_new_lines(&mut self) -> usize {
        let side = self.current;
        let count = detect_new_lines(&self.board, &mut self.lines, side);
        self.rules.score_new_lines(&mut self.tally, side, count);
        if self.board.is_full() {
            self.rules.settle_full_board(&mut self.tally);
        }
        if self.is_over() {
            info!(
                outcome = %self.tally.outcome,
                blue = self.score(Side::Blue),
                red = self.score(Side::Red),
                "game over"
            );
        }
        count
    }

    /// Hand the turn to the other side
    #[inline]
    pub fn switch_turn(&mut self) {
        self.current = self.current.opponent();
    }

    /// Switch turns unless the game is over or the variant grants another
    /// move. Returns true when the same side plays again.
    pub fn finish_turn(&mut self, new_lines: usize) -> bool {
        if self.is_over() {
            return false;
        }
        if self.rules.repeats_turn(new_lines) {
            debug!(side = %self.current, new_lines, "turn repeats");
            return true;
        }
        self.switch_turn();
        false
    }

    /// Apply, detect and hand over in one step
    pub fn take_turn(&mut self, mv: Move) -> Result<TurnReport, InvalidMove> {
        let side = self.current;
        let mv = self.play(mv)?;
        let new_lines = self.detect_and_score_new_lines();
        let repeated = self.finish_turn(new_lines);
        Ok(TurnReport {
            side,
            mv,
            new_lines,
            repeated,
            outcome: self.outcome(),
        })
    }

    // =========================================================================
    // Move sources
    // =========================================================================

    /// Ask the side to move for its move. Nothing is applied.
    pub fn request_move(&mut self) -> Option<Move> {
        if self.is_over() {
            return None;
        }
        let player = &mut self.players[self.current.index()];
        player.choose_move(&mut self.board)
    }

    /// Run the computer search for the side to move.
    ///
    /// Uses the side's own behaviour when it is a computer, otherwise a
    /// fresh searcher (a hint for a human). `None` when the board is full.
    pub fn computer_choose_move(&mut self) -> Option<Move> {
        if self.current_player().is_computer() {
            return self.request_move();
        }
        ComputerPlayer::new().choose_move(&mut self.board, self.current)
    }

    /// Detached copy of the side to move's behaviour, for searching off the
    /// game (the GUI runs it on a worker thread over a cloned board).
    ///
    /// A computer fork keeps its searcher's policy and draws its PRNG seed
    /// from the configured searcher.
    pub fn fork_current_behavior(&mut self) -> Box<dyn Behavior> {
        self.players[self.current.index()].fork_behavior()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    #[inline]
    pub fn current_side(&self) -> Side {
        self.current
    }

    #[inline]
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    #[inline]
    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// Score shown for `side` under the active variant
    #[inline]
    pub fn score(&self, side: Side) -> u32 {
        self.rules.score(&self.tally, side)
    }

    #[inline]
    pub fn winner(&self) -> Option<Side> {
        self.tally.outcome.winner()
    }

    #[inline]
    pub fn is_draw(&self) -> bool {
        self.tally.outcome.is_draw()
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.tally.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.tally.outcome.is_over()
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.rules.variant()
    }

    /// Every line found so far, in detection order
    #[inline]
    pub fn lines(&self) -> &[Line] {
        self.lines.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Letter, Pos};
    use crate::player::HumanPlayer;
    use crate::search::{Searcher, TieBreak};

    fn human_game(size: usize, variant: Variant) -> GameState {
        GameState::new(
            size,
            variant,
            Box::new(HumanPlayer::new()),
            Box::new(HumanPlayer::new()),
        )
        .unwrap()
    }

    fn computer_game(size: usize, variant: Variant, seed: u64) -> GameState {
        GameState::new(
            size,
            variant,
            Box::new(ComputerPlayer::with_searcher(Searcher::with_seed(seed))),
            Box::new(ComputerPlayer::with_searcher(Searcher::with_seed(seed + 1))),
        )
        .unwrap()
    }

    /// Apply, detect and always switch, returning the new line count
    fn step(game: &mut GameState, row: usize, col: usize, letter: char) -> usize {
        game.apply_move(row, col, letter).unwrap();
        let found = game.detect_and_score_new_lines();
        game.switch_turn();
        found
    }

    #[test]
    fn test_new_game() {
        let game = human_game(5, Variant::General);
        assert_eq!(game.size(), 5);
        assert_eq!(game.variant(), Variant::General);
        assert_eq!(game.current_side(), Side::Blue);
        assert_eq!(game.score(Side::Blue), 0);
        assert_eq!(game.score(Side::Red), 0);
        assert_eq!(game.winner(), None);
        assert!(!game.is_draw());
        assert!(game.lines().is_empty());
        assert_eq!(game.board().empty_count(), 25);
    }

    #[test]
    fn test_board_too_small() {
        let err = GameState::new(
            2,
            Variant::Simple,
            PlayerKind::Human.into_behavior(),
            PlayerKind::Human.into_behavior(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::BoardTooSmall { size: 2 });
    }

    #[test]
    fn test_config_defaults_and_build() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 6);
        assert!(config.validate().is_ok());

        let game = GameConfig {
            board_size: 4,
            variant: Variant::General,
            blue: PlayerKind::Computer,
            red: PlayerKind::Human,
        }
        .build()
        .unwrap();
        assert!(game.player(Side::Blue).is_computer());
        assert!(!game.player(Side::Red).is_computer());
        assert_eq!(game.variant(), Variant::General);

        let bad = GameConfig {
            board_size: 1,
            ..config
        };
        assert!(bad.validate().is_err());
        assert!(bad.build().is_err());
    }

    #[test]
    fn test_switch_turn() {
        let mut game = human_game(3, Variant::Simple);
        game.switch_turn();
        assert_eq!(game.current_side(), Side::Red);
        game.switch_turn();
        assert_eq!(game.current_side(), Side::Blue);
    }

    #[test]
    fn test_invalid_moves_leave_board_unchanged() {
        let mut game = human_game(3, Variant::Simple);
        game.apply_move(1, 1, 'S').unwrap();
        let before = game.board().clone();

        assert_eq!(
            game.apply_move(1, 1, 'O'),
            Err(InvalidMove::Occupied { row: 1, col: 1 })
        );
        assert!(matches!(
            game.apply_move(0, 3, 'O'),
            Err(InvalidMove::OutOfBounds { .. })
        ));
        assert_eq!(
            game.apply_move(0, 0, 'Q'),
            Err(InvalidMove::IllegalLetter { letter: 'Q' })
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_side(), Side::Blue);
    }

    #[test]
    fn test_lowercase_letter_is_not_coerced() {
        let mut game = human_game(3, Variant::Simple);
        assert_eq!(
            game.apply_move(0, 0, 's'),
            Err(InvalidMove::IllegalLetter { letter: 's' })
        );
        assert_eq!(game.board().get(Pos::new(0, 0)), Cell::Empty);
        assert_eq!(game.current_side(), Side::Blue);
    }

    #[test]
    fn test_simple_example_game() {
        let mut game = human_game(3, Variant::Simple);
        assert_eq!(step(&mut game, 0, 0, 'S'), 0);
        assert_eq!(step(&mut game, 0, 1, 'O'), 0);

        game.apply_move(0, 2, 'S').unwrap();
        assert_eq!(game.detect_and_score_new_lines(), 1);
        assert_eq!(game.winner(), Some(Side::Blue));
        assert_eq!(game.score(Side::Blue), 1);
        assert_eq!(game.score(Side::Red), 0);
        assert!(!game.is_draw());
        assert!(game.is_over());

        let line = game.lines()[0];
        assert_eq!(line.owner, Side::Blue);
        assert!(line.same_segment(Pos::new(0, 0), Pos::new(0, 2)));
    }

    #[test]
    fn test_detection_idempotent() {
        let mut game = human_game(4, Variant::General);
        game.apply_move(2, 0, 'S').unwrap();
        game.apply_move(2, 1, 'O').unwrap();
        game.apply_move(2, 2, 'S').unwrap();
        assert_eq!(game.detect_and_score_new_lines(), 1);
        assert_eq!(game.detect_and_score_new_lines(), 0);
        assert_eq!(game.score(Side::Blue), 1);
        assert_eq!(game.lines().len(), 1);
    }

    #[test]
    fn test_simple_rejects_moves_after_win() {
        let mut game = human_game(3, Variant::Simple);
        step(&mut game, 0, 0, 'S');
        step(&mut game, 0, 1, 'O');
        step(&mut game, 0, 2, 'S');
        let before = game.board().clone();

        assert_eq!(game.apply_move(2, 2, 'S'), Err(InvalidMove::GameOver));
        assert_eq!(game.board(), &before);
        assert_eq!(game.request_move(), None);
    }

    #[test]
    fn test_simple_full_board_no_winner() {
        let mut game = human_game(3, Variant::Simple);
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(step(&mut game, row, col, 'O'), 0);
            }
        }
        assert_eq!(game.outcome(), Outcome::NoWinner);
        assert!(game.is_over());
        assert_eq!(game.winner(), None);
        assert!(!game.is_draw());
    }

    #[test]
    fn test_general_accumulates_score() {
        let mut game = human_game(4, Variant::General);
        step(&mut game, 0, 0, 'S'); // Blue
        step(&mut game, 0, 1, 'O'); // Red

        game.apply_move(0, 2, 'S').unwrap(); // Blue
        let found = game.detect_and_score_new_lines();
        assert_eq!(found, 1);
        assert!(game.finish_turn(found));
        assert_eq!(game.current_side(), Side::Blue);

        step(&mut game, 2, 0, 'S'); // Blue again
        step(&mut game, 3, 3, 'O'); // Red

        game.apply_move(1, 0, 'O').unwrap(); // Blue
        assert_eq!(game.detect_and_score_new_lines(), 1);

        assert_eq!(game.score(Side::Blue), 2);
        assert_eq!(game.score(Side::Red), 0);
        assert_eq!(game.winner(), None);
        assert!(!game.is_over());
    }

    #[test]
    fn test_general_full_board_draw() {
        let mut game = human_game(3, Variant::General);
        for row in 0..3 {
            for col in 0..3 {
                step(&mut game, row, col, 'O');
            }
        }
        assert!(game.is_draw());
        assert_eq!(game.winner(), None);
        assert_eq!(game.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_general_full_board_winner() {
        let mut game = human_game(3, Variant::General);
        // Blue completes the top row, then the rest is filled with O
        let moves = [
            (0, 0, Letter::S),
            (0, 1, Letter::O),
            (0, 2, Letter::S),
            (1, 0, Letter::O),
            (1, 1, Letter::O),
            (1, 2, Letter::O),
            (2, 0, Letter::O),
            (2, 1, Letter::O),
            (2, 2, Letter::O),
        ];
        let mut reports = Vec::new();
        for (row, col, letter) in moves {
            reports.push(game.take_turn(Move::new(row, col, letter)).unwrap());
        }

        assert_eq!(reports[2].side, Side::Blue);
        assert_eq!(reports[2].new_lines, 1);
        assert!(reports[2].repeated);
        assert_eq!(reports[3].side, Side::Blue);

        assert_eq!(game.score(Side::Blue), 1);
        assert_eq!(game.score(Side::Red), 0);
        assert_eq!(game.winner(), Some(Side::Blue));
        assert!(!game.is_draw());
        assert_eq!(reports[8].outcome, Outcome::Winner(Side::Blue));
    }

    #[test]
    fn test_take_turn_rejects_without_side_effects() {
        let mut game = human_game(3, Variant::General);
        game.take_turn(Move::new(0, 0, Letter::S)).unwrap();
        assert_eq!(game.current_side(), Side::Red);

        let err = game.take_turn(Move::new(0, 0, Letter::O)).unwrap_err();
        assert_eq!(err, InvalidMove::Occupied { row: 0, col: 0 });
        assert_eq!(game.current_side(), Side::Red);
        assert_eq!(game.board().get(Pos::new(0, 0)), Cell::S);
    }

    #[test]
    fn test_request_move_from_scripted_human() {
        let mv = Move::new(1, 1, Letter::O);
        let mut game = GameState::new(
            3,
            Variant::Simple,
            Box::new(HumanPlayer::scripted([mv])),
            Box::new(HumanPlayer::new()),
        )
        .unwrap();

        assert_eq!(game.request_move(), Some(mv));
        assert!(game.board().is_empty(mv.pos));
    }

    #[test]
    fn test_computer_choose_move_is_legal() {
        let mut game = human_game(3, Variant::Simple);
        step(&mut game, 0, 0, 'S');
        let before = game.board().clone();

        let mv = game.computer_choose_move().unwrap();
        assert!(before.is_empty(mv.pos));
        assert!(Letter::ALL.contains(&mv.letter));
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_computer_choose_move_full_board() {
        let mut game = human_game(3, Variant::General);
        for row in 0..3 {
            for col in 0..3 {
                step(&mut game, row, col, 'O');
            }
        }
        assert_eq!(game.computer_choose_move(), None);
    }

    #[test]
    fn test_forked_behavior_uses_configured_searcher() {
        let searcher = Searcher::with_seed(3).tie_break(TieBreak::FirstGenerated);
        let mut game = GameState::new(
            3,
            Variant::General,
            Box::new(ComputerPlayer::with_searcher(searcher)),
            Box::new(HumanPlayer::new()),
        )
        .unwrap();
        game.apply_move(1, 1, 'O').unwrap();
        let mut board = game.board().clone();

        let mut forked = game.fork_current_behavior();
        assert_eq!(forked.kind(), PlayerKind::Computer);
        let mv = forked.choose_move(&mut board, Side::Blue);

        // First-generated ordering ignores the seed
        let expected = Searcher::with_seed(99)
            .tie_break(TieBreak::FirstGenerated)
            .search(&mut board)
            .unwrap()
            .best_move;
        assert_eq!(mv, expected);
        assert_eq!(&board, game.board());
    }

    fn play_out(game: &mut GameState) -> usize {
        let mut turns = 0;
        while !game.is_over() {
            let mv = game.request_move().expect("computer always has a move");
            game.take_turn(mv).unwrap();
            turns += 1;
            assert!(turns <= game.size() * game.size());
        }
        turns
    }

    #[test]
    fn test_computer_vs_computer_simple() {
        for seed in 0..4 {
            let mut game = computer_game(3, Variant::Simple, seed);
            play_out(&mut game);
            match game.outcome() {
                Outcome::Winner(side) => {
                    assert_eq!(game.score(side), 1);
                    assert_eq!(game.score(side.opponent()), 0);
                    assert!(!game.lines().is_empty());
                }
                Outcome::NoWinner => {
                    assert!(game.board().is_full());
                    assert!(game.lines().is_empty());
                }
                other => panic!("unexpected outcome {other:?}"),
            }
            assert!(!game.is_draw());
        }
    }

    #[test]
    fn test_computer_vs_computer_general() {
        for seed in 0..4 {
            let mut game = computer_game(3, Variant::General, seed);
            let turns = play_out(&mut game);
            assert_eq!(turns, 9);
            assert!(game.board().is_full());

            let blue = game.score(Side::Blue);
            let red = game.score(Side::Red);
            assert_eq!((blue + red) as usize, game.lines().len());
            match game.outcome() {
                Outcome::Draw => assert_eq!(blue, red),
                Outcome::Winner(Side::Blue) => assert!(blue > red),
                Outcome::Winner(Side::Red) => assert!(red > blue),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
    }
}
