//! Rule variants
//!
//! Both variants share line detection and differ only in what a new line
//! is worth and when the game ends. The active policy is a trait object
//! held by [`crate::GameState`].

use std::fmt;

use crate::player::Side;

/// Rule variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display, derive_more::IsVariant)]
pub enum Variant {
    /// First completed line wins
    #[default]
    #[display("Simple")]
    Simple,
    /// Play to a full board, one point per line
    #[display("General")]
    General,
}

impl Variant {
    /// Policy implementing this variant
    pub fn rules(self) -> Box<dyn VariantRules> {
        match self {
            Variant::Simple => Box::new(SimpleRules),
            Variant::General => Box::new(GeneralRules),
        }
    }
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Outcome {
    #[default]
    InProgress,
    Winner(Side),
    Draw,
    /// Simple game filled the board without any line
    NoWinner,
}

impl Outcome {
    #[inline]
    pub fn is_over(self) -> bool {
        !self.is_in_progress()
    }

    #[inline]
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Winner(side) => Some(side),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => f.write_str("in progress"),
            Outcome::Winner(side) => write!(f, "{side} wins"),
            Outcome::Draw => f.write_str("draw"),
            Outcome::NoWinner => f.write_str("no winner"),
        }
    }
}

/// Running score and terminal flags of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    /// Lines credited per side, indexed by [`Side::index`]
    pub lines: [u32; 2],
    pub outcome: Outcome,
}

impl Tally {
    #[inline]
    pub fn lines_of(&self, side: Side) -> u32 {
        self.lines[side.index()]
    }
}

/// Scoring and end-of-game policy of a variant
pub trait VariantRules: fmt::Debug + Send + Sync {
    fn variant(&self) -> Variant;

    /// Account for `count` lines just credited to `side`
    fn score_new_lines(&self, tally: &mut Tally, side: Side, count: usize);

    /// Settle the outcome once the board has no empty cell
    fn settle_full_board(&self, tally: &mut Tally);

    /// Whether `side` keeps the turn after a move that formed `new_lines`
    fn repeats_turn(&self, new_lines: usize) -> bool;

    /// Score shown for `side`
    fn score(&self, tally: &Tally, side: Side) -> u32;
}

/// First line wins outright
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRules;

impl VariantRules for SimpleRules {
    fn variant(&self) -> Variant {
        Variant::Simple
    }

    fn score_new_lines(&self, tally: &mut Tally, side: Side, count: usize) {
        if count > 0 && tally.outcome.is_in_progress() {
            tally.outcome = Outcome::Winner(side);
        }
    }

    fn settle_full_board(&self, tally: &mut Tally) {
        if tally.outcome.is_in_progress() {
            tally.outcome = Outcome::NoWinner;
        }
    }

    fn repeats_turn(&self, _new_lines: usize) -> bool {
        false
    }

    fn score(&self, tally: &Tally, side: Side) -> u32 {
        u32::from(tally.outcome.winner() == Some(side))
    }
}

/// Lines accumulate until the board is full
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralRules;

impl VariantRules for GeneralRules {
    fn variant(&self) -> Variant {
        Variant::General
    }

    fn score_new_lines(&self, tally: &mut Tally, side: Side, count: usize) {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        let slot = &mut tally.lines[side.index()];
        *slot = slot.saturating_add(count);
    }

    fn settle_full_board(&self, tally: &mut Tally) {
        if tally.outcome.is_over() {
            return;
        }
        let blue = tally.lines_of(Side::Blue);
        let red = tally.lines_of(Side::Red);
        tally.outcome = match blue.cmp(&red) {
            std::cmp::Ordering::Greater => Outcome::Winner(Side::Blue),
            std::cmp::Ordering::Less => Outcome::Winner(Side::Red),
            std::cmp::Ordering::Equal => Outcome::Draw,
        };
    }

    fn repeats_turn(&self, new_lines: usize) -> bool {
        new_lines > 0
    }

    fn score(&self, tally: &Tally, side: Side) -> u32 {
        tally.lines_of(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_selects_policy() {
        assert_eq!(Variant::Simple.rules().variant(), Variant::Simple);
        assert_eq!(Variant::General.rules().variant(), Variant::General);
    }

    #[test]
    fn test_simple_first_line_wins() {
        let rules = SimpleRules;
        let mut tally = Tally::default();

        rules.score_new_lines(&mut tally, Side::Red, 0);
        assert!(tally.outcome.is_in_progress());

        rules.score_new_lines(&mut tally, Side::Red, 2);
        assert_eq!(tally.outcome, Outcome::Winner(Side::Red));
        assert_eq!(rules.score(&tally, Side::Red), 1);
        assert_eq!(rules.score(&tally, Side::Blue), 0);

        // A later credit never changes the winner
        rules.score_new_lines(&mut tally, Side::Blue, 1);
        assert_eq!(tally.outcome, Outcome::Winner(Side::Red));
    }

    #[test]
    fn test_simple_full_board_without_line() {
        let rules = SimpleRules;
        let mut tally = Tally::default();
        rules.settle_full_board(&mut tally);
        assert_eq!(tally.outcome, Outcome::NoWinner);
        assert!(tally.outcome.is_over());
        assert_eq!(tally.outcome.winner(), None);
    }

    #[test]
    fn test_general_accumulates() {
        let rules = GeneralRules;
        let mut tally = Tally::default();
        rules.score_new_lines(&mut tally, Side::Blue, 1);
        rules.score_new_lines(&mut tally, Side::Blue, 1);
        rules.score_new_lines(&mut tally, Side::Red, 0);
        assert_eq!(rules.score(&tally, Side::Blue), 2);
        assert_eq!(rules.score(&tally, Side::Red), 0);
        assert!(tally.outcome.is_in_progress());
    }

    #[test]
    fn test_general_full_board() {
        let rules = GeneralRules;

        let mut tally = Tally {
            lines: [1, 3],
            ..Tally::default()
        };
        rules.settle_full_board(&mut tally);
        assert_eq!(tally.outcome, Outcome::Winner(Side::Red));

        let mut tally = Tally {
            lines: [2, 2],
            ..Tally::default()
        };
        rules.settle_full_board(&mut tally);
        assert_eq!(tally.outcome, Outcome::Draw);
    }

    #[test]
    fn test_turn_repeat() {
        assert!(GeneralRules.repeats_turn(1));
        assert!(!GeneralRules.repeats_turn(0));
        assert!(!SimpleRules.repeats_turn(1));
    }
}
