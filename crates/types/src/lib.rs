//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, score persistence).
//!
//! # Board Geometry
//!
//! The board is a flat, row-major array of `BOARD_COLS * BOARD_ROWS` cells:
//!
//! - **Columns**: 12 (indexed 0-11). Columns 0 and 11 are sentinel border, 1-10 are playable
//! - **Rows**: 23 (indexed 0-22). Row 0 is hidden spawn headroom, rows 1-20 are visible
//!   playfield, rows 21-22 are sentinel border
//! - **Spawn anchor**: flat index 17 (row 1, column 5)
//!
//! The border ring is permanently occupied, so collision detection never needs an explicit
//! bounds check: any placement leaving the interior lands on an occupied border cell.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_GRAVITY_US` | 500000 | Gravity period seed (microseconds) |
//! | `GRAVITY_DECAY_BASE` | 3000 | Decay divisor base, `3000 - 10 * level` |
//! | `LINE_CLEAR_PAUSE_MS` | 180 | Default presentation delay around a line clear |
//!
//! # Examples
//!
//! ```
//! use micro_tetris_types::{Color, GameAction, BOARD_COLS, BOARD_SIZE, SPAWN_ANCHOR};
//!
//! assert_eq!(BOARD_COLS, 12);
//! assert_eq!(BOARD_SIZE, 276);
//! assert_eq!(SPAWN_ANCHOR % BOARD_COLS, 5);
//!
//! assert!(Color::Reset.is_empty());
//! assert!(!Color::Red.is_empty());
//!
//! assert_eq!(GameAction::from_index(3), Some(GameAction::HardDrop));
//! ```

/// Board width in cells, including the left and right sentinel columns.
pub const BOARD_COLS: usize = 12;

/// Board height in cells, including hidden headroom and the bottom sentinel rows.
pub const BOARD_ROWS: usize = 23;

/// Total number of cells on the board.
pub const BOARD_SIZE: usize = BOARD_COLS * BOARD_ROWS;

/// Number of playable columns (classic 10-wide playfield).
pub const PLAYFIELD_COLS: usize = BOARD_COLS - 2;

/// Number of sentinel rows at the bottom of the board.
///
/// Two rows deep so that an anchor one row below the playfield plus the largest
/// shape offset (`2 * BOARD_COLS`) still indexes into the array.
pub const BORDER_ROWS: usize = 2;

/// Number of rows scanned for completed lines (every row above the bottom sentinel).
pub const SCAN_ROWS: usize = BOARD_ROWS - BORDER_ROWS;

/// First row drawn on screen (row 0 is hidden spawn headroom).
pub const FIRST_VISIBLE_ROW: usize = 1;

/// Flat index where every new piece is anchored (row 1, column 5).
pub const SPAWN_ANCHOR: usize = 17;

/// Number of distinct piece kinds.
pub const PIECE_KINDS: usize = 7;

/// Gravity period seed in microseconds.
pub const INITIAL_GRAVITY_US: u64 = 500_000;

/// Gravity decay divisor base: each firing shortens the period by
/// `period / (GRAVITY_DECAY_BASE - GRAVITY_DECAY_PER_LEVEL * level)`.
pub const GRAVITY_DECAY_BASE: i64 = 3000;

/// Per-level step of the gravity decay divisor.
pub const GRAVITY_DECAY_PER_LEVEL: i64 = 10;

/// Cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Level a new session starts at.
pub const START_LEVEL: u32 = 1;

/// Default presentation delay shown after a row vanishes and after the stack settles.
pub const LINE_CLEAR_PAUSE_MS: u32 = 180;

/// Default key bindings, in the order left, rotate, right, drop, pause, quit.
pub const DEFAULT_KEYS: &str = "jkl pq";

/// Player name recorded when none is available from the environment.
pub const ANONYMOUS_PLAYER: &str = "anonymous";

/// Number of records kept in the high-score file.
pub const HIGH_SCORE_LIMIT: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_defaults() {
        assert_eq!(BOARD_SIZE, 276);
        assert_eq!(PLAYFIELD_COLS, 10);
        assert_eq!(SCAN_ROWS, 21);
        assert_eq!(SPAWN_ANCHOR / BOARD_COLS, FIRST_VISIBLE_ROW);
    }

    #[test]
    fn default_keys_cover_every_action() {
        assert_eq!(DEFAULT_KEYS.chars().count(), GameAction::ALL.len());
    }
}

/// Cell colors, numbered like ANSI SGR color offsets.
///
/// `Reset` (0) marks an empty cell; any other value marks an occupied cell
/// rendered with that color. `LightGrey` doubles as the sentinel border color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Color {
    #[default]
    Reset = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    LightGrey = 7,
}

impl Color {
    /// Color used for the permanent sentinel border.
    pub const BORDER: Color = Color::LightGrey;

    /// True for the empty color.
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self == Color::Reset
    }

    /// Numeric color code (ANSI offset).
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A cell on the game board.
///
/// - `Color::Reset`: empty cell
/// - any other color: occupied cell
pub type Cell = Color;

/// Player actions bound to keys.
///
/// The discriminant order matches the order of characters in a key map string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Advance piece to its next rotation state
    Rotate,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece to its resting position
    HardDrop,
    /// Toggle pause
    Pause,
    /// End the session
    Quit,
}

impl GameAction {
    /// Every action, in key map order.
    pub const ALL: [GameAction; 6] = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::Pause,
        GameAction::Quit,
    ];

    /// Action at position `index` of a key map string.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short label used by the on-screen key help.
    pub fn label(self) -> &'static str {
        match self {
            GameAction::MoveLeft => "left",
            GameAction::Rotate => "rotate",
            GameAction::MoveRight => "right",
            GameAction::HardDrop => "drop",
            GameAction::Pause => "pause",
            GameAction::Quit => "quit",
        }
    }
}

/// One symbol consumed by the game loop per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A key bound to an action.
    Action(GameAction),
    /// Synthetic "descend" request from the gravity timer.
    Gravity,
    /// Hard interrupt (Ctrl-C); ends the session from any state.
    Interrupt,
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Paused,
    Terminated,
}
