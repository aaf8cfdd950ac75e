//! Terminal input module (engine-facing).
//!
//! This module maps `crossterm` key events into [`crate::types::Input`] and provides
//! [`TerminalInput`], the blocking input source the game loop reads from. It multiplexes
//! key presses with the gravity timer on a single thread.

pub mod map;
pub mod source;

pub use micro_tetris_core as core;
pub use micro_tetris_types as types;

pub use map::{is_interrupt, KeyMap, KeyMapError};
pub use source::TerminalInput;
