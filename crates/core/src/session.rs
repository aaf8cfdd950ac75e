//! Session state - level, points, line progress and run state
//!
//! Owned by the game loop. The line clearing engine feeds `lines_cleared`; the level is
//! derived from it once per rendered frame by [`Session::settle_level`], which rolls
//! every ten pending lines into one level.

use crate::types::{RunState, LINES_PER_LEVEL, START_LEVEL};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Player quit (or interrupted).
    Quit,
    /// A new piece could not spawn.
    ToppedOut,
}

/// Final numbers of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub points: u32,
    pub level: u32,
    pub lines: u32,
    pub score: u64,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    level: u32,
    points: u32,
    /// Lines cleared since the last level-up (rolled into `level` by `settle_level`).
    lines_cleared: u32,
    /// Lines cleared over the whole session.
    total_lines: u32,
    state: RunState,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            level: START_LEVEL,
            points: 0,
            lines_cleared: 0,
            total_lines: 0,
            state: RunState::Running,
            outcome: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_terminated(&self) -> bool {
        self.state == RunState::Terminated
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn add_points(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    /// Count one completed line
    pub fn record_line(&mut self) {
        self.lines_cleared += 1;
        self.total_lines += 1;
    }

    /// Roll pending lines into levels.
    ///
    /// Idempotent: calling it again without new lines changes nothing. Returns the
    /// number of levels gained.
    pub fn settle_level(&mut self) -> u32 {
        let mut gained = 0;
        while self.lines_cleared >= LINES_PER_LEVEL {
            self.lines_cleared -= LINES_PER_LEVEL;
            self.level += 1;
            gained += 1;
        }
        if gained > 0 {
            tracing::debug!(level = self.level, "level up");
        }
        gained
    }

    /// Toggle between running and paused. Terminated sessions stay terminated.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            RunState::Terminated => RunState::Terminated,
        };
    }

    /// End the session. The first recorded outcome wins.
    pub fn terminate(&mut self, outcome: Outcome) {
        self.state = RunState::Terminated;
        self.outcome.get_or_insert(outcome);
    }

    /// Final score: points multiplied by level
    pub fn final_score(&self) -> u64 {
        u64::from(self.points) * u64::from(self.level)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            points: self.points,
            level: self.level,
            lines: self.total_lines,
            score: self.final_score(),
            outcome: self.outcome.unwrap_or(Outcome::Quit),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
