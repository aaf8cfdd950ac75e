//! Micro Tetris runner (default binary).
//!
//! Reads configuration from the environment, takes over the terminal for one session,
//! then prints the result and the high-score table on the restored screen.

use anyhow::{Context, Result};

use micro_tetris::config::Config;
use micro_tetris::core::{run, Game, Summary};
use micro_tetris::input::TerminalInput;
use micro_tetris::logging;
use micro_tetris::scores::{format_table, ScoreFile, ScoreRecord};
use micro_tetris::term::{BoardView, CrosstermSurface, TerminalGuard, ViewConfig};

fn main() -> Result<()> {
    let config = Config::from_env();

    if let Some(path) = &config.log_path {
        logging::init_file(path, &config.log_filter)?;
    }
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    let seed = config.seed();
    tracing::info!(seed, player = %config.player, "starting session");

    let summary = play(&config, seed)?;
    tracing::info!(
        points = summary.points,
        level = summary.level,
        lines = summary.lines,
        score = summary.score,
        outcome = ?summary.outcome,
        "session over"
    );

    report(&config, &summary);
    Ok(())
}

/// Run one session with the terminal in raw mode. The terminal is restored before
/// returning, whatever the outcome.
fn play(config: &Config, seed: u32) -> Result<Summary> {
    let mut guard = TerminalGuard::enter().context("failed to set up the terminal")?;

    let mut game = Game::new(seed);
    let mut input = TerminalInput::new(config.keys);
    let mut view = BoardView::new(
        CrosstermSurface::stdout(),
        ViewConfig {
            clear_delay: config.clear_delay,
            show_preview: config.show_preview,
            help: config.keys.help_lines().into_iter().collect(),
        },
    );

    let result = run(&mut game, &mut input, &mut view).context("game loop failed");

    // Always try to restore terminal state.
    guard.exit()?;
    result
}

fn report(config: &Config, summary: &Summary) {
    println!(
        "Your score: {} points x level {} = {}\n",
        summary.points, summary.level, summary.score
    );

    let Some(path) = &config.score_file else {
        return;
    };
    let file = ScoreFile::new(path);
    let record = ScoreRecord::new(summary.points, summary.level, &config.player);
    match file.record(&record) {
        Ok(table) => print!("{}", format_table(&table)),
        Err(err) => {
            tracing::warn!(error = %format!("{:#}", err), "could not save score");
            eprintln!("High scores unavailable: {:#}", err);
        }
    }
}
