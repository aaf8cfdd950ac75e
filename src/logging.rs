//! Diagnostic logging.
//!
//! The game owns the terminal in raw mode, so log output never goes to stdout or stderr.
//! When a log path is configured, `tracing` events are appended to that file as plain
//! text; otherwise no subscriber is installed and events are dropped.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber writing to `path`, filtered by `filter`
/// (`EnvFilter` directives such as `info` or `micro_tetris_core=trace`).
pub fn init_file(path: &Path, filter: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter {:?}", filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {}", err))
}
