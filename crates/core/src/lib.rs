//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and the game loop.
//! It has **no dependencies** on a terminal: input and presentation are reached through
//! the [`InputSource`] and [`Renderer`] traits, which makes it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Scripted input sources and recording renderers drive whole sessions
//! - **Single-threaded**: All board mutation happens on the caller's thread
//!
//! # Module Structure
//!
//! - [`shapes`]: Tetromino geometry as anchor offsets, with per-kind rotation cycles
//! - [`board`]: 12x23 flat board with a permanent sentinel border and collision checks
//! - [`piece`]: The active piece; move, rotate, descend and hard drop attempts
//! - [`lines`]: Line clearing engine with presentation hooks
//! - [`session`]: Level, points and line progress; run state
//! - [`gravity`]: Gravity period decay and the deadline-based gravity timer
//! - [`rng`]: Uniform random piece selection
//! - [`game`]: Input-driven state machine and the session loop
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: Every piece is one of the 7 kinds with equal probability
//! - **Rotation**: One direction, no wall kicks; a blocked rotation is ignored
//! - **Hard drop**: One point per row dropped; the piece locks on the next gravity tick
//! - **Lock**: One point per locked piece
//! - **Levels**: One level per 10 cleared lines; final score is points times level
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//!
//! use micro_tetris_core::{Game, PieceKind, Step};
//! use micro_tetris_core::types::{GameAction, Input};
//!
//! let mut game = Game::with_first_piece(12345, PieceKind::I);
//!
//! let step = game
//!     .handle(Input::Action(GameAction::HardDrop), |_, _| Ok::<_, Infallible>(()))
//!     .unwrap();
//! assert_eq!(step, Step::Moved);
//! assert_eq!(game.session().points(), 19); // one point per row dropped
//!
//! // The next gravity tick locks the piece.
//! let step = game
//!     .handle(Input::Gravity, |_, _| Ok::<_, Infallible>(()))
//!     .unwrap();
//! assert!(matches!(step, Step::Locked { .. }));
//! ```

pub mod board;
pub mod game;
pub mod gravity;
pub mod lines;
pub mod piece;
pub mod rng;
pub mod session;
pub mod shapes;

pub use micro_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game::{run, Frame, Game, InputSource, Renderer, Step};
pub use gravity::{next_period, GravityTimer};
pub use lines::{clear_lines, ClearPhase, ClearedRows};
pub use piece::{Direction, Piece};
pub use rng::SimpleRng;
pub use session::{Outcome, Session, Summary};
pub use shapes::{PieceKind, Shape};
