//! Command-line interface for the SOS game.

use clap::{Parser, Subcommand, ValueEnum};
use sos::{GameConfig, PlayerKind, Variant};

/// SOS - place S and O, complete S-O-S lines
#[derive(Parser, Debug)]
#[command(name = "sos")]
#[command(about = "SOS board game with a minimax computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run; opens the window when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Board size pre-selected on the setup screen
    #[arg(long, default_value_t = 6)]
    pub size: usize,

    /// Game mode pre-selected on the setup screen
    #[arg(long, value_enum, default_value_t = Mode::Simple)]
    pub mode: Mode,

    /// Blue player (moves first)
    #[arg(long, value_enum, default_value_t = Kind::Human)]
    pub blue: Kind,

    /// Red player
    #[arg(long, value_enum, default_value_t = Kind::Human)]
    pub red: Kind,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play computer against computer in the terminal
    SelfPlay {
        /// Board size
        #[arg(long, default_value_t = 3)]
        size: usize,

        /// Game mode
        #[arg(long, value_enum, default_value_t = Mode::General)]
        mode: Mode,

        /// Seed for the searchers' tie-breaking; random when omitted
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Simple,
    General,
}

impl From<Mode> for Variant {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Simple => Variant::Simple,
            Mode::General => Variant::General,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Human,
    Computer,
}

impl From<Kind> for PlayerKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Human => PlayerKind::Human,
            Kind::Computer => PlayerKind::Computer,
        }
    }
}

impl Cli {
    /// Settings for the setup screen
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            board_size: self.size,
            variant: self.mode.into(),
            blue: self.blue.into(),
            red: self.red.into(),
        }
    }
}
