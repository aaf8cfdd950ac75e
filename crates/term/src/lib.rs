//! Terminal presentation module.
//!
//! A small rendering layer for playing in a raw terminal, with no widget toolkit:
//!
//! - [`Surface`]: cursor, color and text primitives, backed by crossterm
//! - [`BoardView`]: the core [`Renderer`](crate::core::Renderer), repainting only cells that
//!   changed since the last frame
//! - [`TerminalGuard`]: raw mode and alternate screen for the length of a session

pub mod surface;
pub mod terminal;
pub mod view;

pub use micro_tetris_core as core;
pub use micro_tetris_types as types;

pub use surface::{to_crossterm, CrosstermSurface, Surface};
pub use terminal::TerminalGuard;
pub use view::{BoardView, ViewConfig, INFO_COL};
