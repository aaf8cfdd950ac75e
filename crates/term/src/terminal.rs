//! Raw-mode terminal session.
//!
//! [`TerminalGuard::enter`] switches to raw mode and the alternate screen. The previous
//! terminal state is restored by [`TerminalGuard::exit`] or, failing that, on drop, so an
//! early return never leaves the shell in raw mode.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{Attribute, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        // From here on a failure still restores through Drop.
        let guard = Self { active: true };

        let mut buf: Vec<u8> = Vec::new();
        buf.queue(terminal::EnterAlternateScreen)?;
        buf.queue(cursor::Hide)?;
        buf.queue(terminal::DisableLineWrap)?;
        write_stdout(&buf).context("failed to prepare the screen")?;

        tracing::debug!("terminal entered");
        Ok(guard)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Restore the terminal. Calling it again is a no-op.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut buf: Vec<u8> = Vec::new();
        buf.queue(ResetColor)?;
        buf.queue(SetAttribute(Attribute::Reset))?;
        buf.queue(terminal::EnableLineWrap)?;
        buf.queue(cursor::Show)?;
        buf.queue(terminal::LeaveAlternateScreen)?;
        let screen = write_stdout(&buf).context("failed to restore the screen");

        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        tracing::debug!("terminal restored");
        screen
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            tracing::warn!(error = %err, "terminal restore failed");
        }
    }
}

fn write_stdout(buf: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(buf)?;
    stdout.flush()
}
