//! SOS game
//!
//! Opens the egui window by default; `sos self-play` runs a computer game
//! in the terminal.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use sos::ui::SosApp;
use sos::{ComputerPlayer, GameConfig, GameState, Searcher, Side, Variant};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::SelfPlay { size, mode, seed }) => self_play(size, mode.into(), seed),
        None => run_gui(cli.game_config()),
    }
}

/// Open the game window with the setup screen pre-filled
fn run_gui(config: GameConfig) -> Result<()> {
    config.validate().context("invalid game settings")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 680.0])
            .with_min_inner_size([720.0, 540.0])
            .with_title("SOS Game"),
        ..Default::default()
    };

    eframe::run_native(
        "SOS",
        options,
        Box::new(move |cc| Ok(Box::new(SosApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}

/// Play a computer-vs-computer game and print the result
fn self_play(size: usize, variant: Variant, seed: Option<u64>) -> Result<()> {
    let searcher = |offset: u64| match seed {
        Some(seed) => Searcher::with_seed(seed.wrapping_add(offset)),
        None => Searcher::new(),
    };
    let mut game = GameState::new(
        size,
        variant,
        Box::new(ComputerPlayer::with_searcher(searcher(0))),
        Box::new(ComputerPlayer::with_searcher(searcher(1))),
    )
    .context("cannot create game")?;

    let mut turns = 0usize;
    while let Some(mv) = game.request_move() {
        let side = game.current_side();
        let report = game
            .take_turn(mv)
            .with_context(|| format!("{side} played an illegal move: {mv}"))?;
        turns += 1;
        if report.new_lines > 0 {
            println!("{side}: {mv} (+{})", report.new_lines);
        } else {
            println!("{side}: {mv}");
        }
    }
    info!(turns, outcome = %game.outcome(), "self-play finished");

    println!();
    print!("{}", game.board());
    println!();
    for line in game.lines() {
        println!("{} line {} - {}", line.owner, line.start, line.end);
    }
    if variant == Variant::General {
        println!(
            "Score: Blue {} | Red {}",
            game.score(Side::Blue),
            game.score(Side::Red)
        );
    }
    println!("{}", game.outcome());
    Ok(())
}
