//! Micro Tetris (workspace facade crate).
//!
//! The game lives in dedicated crates under `crates/`; this package re-exports them under
//! stable names and adds the pieces the binary needs (environment configuration and log
//! setup).

pub mod config;
pub mod logging;

pub use micro_tetris_core as core;
pub use micro_tetris_input as input;
pub use micro_tetris_scores as scores;
pub use micro_tetris_term as term;
pub use micro_tetris_types as types;

pub use config::Config;
