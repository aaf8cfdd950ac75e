//! Game module - the input-driven state machine
//!
//! [`Game`] owns the board, the active piece, the next-piece peek, the session state and
//! the piece RNG. [`Game::handle`] consumes one input symbol:
//!
//! - a gravity signal descends the piece, or locks it when it cannot descend (commit to
//!   the board, award a point, clear lines, spawn the next piece, detect top-out),
//! - an action moves, rotates, hard-drops, pauses or quits.
//!
//! [`run`] drives a whole session against an [`InputSource`] and a [`Renderer`]. Between
//! frames the board only holds settled cells; the falling piece is stamped right before a
//! frame is rendered and erased again once the next input arrives.
//!
//! Everything runs on the caller's thread. The gravity timer never touches game state, it
//! only makes the input source yield [`Input::Gravity`].

use std::io;

use crate::board::Board;
use crate::lines::{clear_lines, ClearPhase, ClearedRows};
use crate::piece::{Direction, Piece};
use crate::rng::SimpleRng;
use crate::session::{Outcome, Session, Summary};
use crate::shapes::{PieceKind, Shape};
use crate::types::{GameAction, Input, RunState};

/// Result of handling one input symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The piece moved, rotated or dropped.
    Moved,
    /// The action was rejected by a collision (or ignored in the current state).
    Rejected,
    /// The piece locked; the next piece spawned.
    Locked { cleared: ClearedRows },
    /// The piece locked and the next piece could not spawn.
    ToppedOut { cleared: ClearedRows },
    /// The session entered the paused state.
    Paused,
    /// The session resumed.
    Resumed,
    /// The player quit.
    Quit,
}

/// Read-only view handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub board: &'a Board,
    pub session: &'a Session,
    /// The piece that spawns after the current one.
    pub next: Shape,
}

/// Source of input symbols: key presses and gravity signals.
pub trait InputSource {
    /// Start the gravity timer for `level`.
    fn arm_gravity(&mut self, level: u32);

    /// Block until a bound key is pressed or the gravity timer fires.
    ///
    /// The timer period is re-derived from `level` on each firing.
    fn next_input(&mut self, level: u32) -> io::Result<Input>;

    /// Block until a bound key is pressed. Gravity firings stay pending and are
    /// delivered by a later [`InputSource::next_input`] call.
    fn next_key(&mut self) -> io::Result<Input>;

    /// Stop the gravity timer for good.
    fn disarm_gravity(&mut self);
}

/// Presentation of the game state.
pub trait Renderer {
    /// Draw a frame. Implementations may repaint only what changed since the last frame.
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()>;

    /// Show one phase of a line clear, holding it on screen for a moment.
    fn present_clear(&mut self, frame: &Frame<'_>, phase: ClearPhase) -> io::Result<()>;

    /// Forget what is on screen so the next frame repaints everything.
    fn invalidate(&mut self);
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    piece: Piece,
    next: Shape,
    session: Session,
    rng: SimpleRng,
    /// Whether the active piece is currently stamped into the board.
    stamped: bool,
}

impl Game {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let first = rng.next_kind();
        Self::with_first_piece(seed, first)
    }

    /// Create a new game whose first piece is `kind`
    pub fn with_first_piece(seed: u32, kind: PieceKind) -> Self {
        let mut rng = SimpleRng::new(seed);
        // Keep the draw sequence aligned with `new` for the same seed.
        let _ = rng.next_kind();
        let next = rng.next_kind().spawn_shape();

        Self {
            board: Board::new(),
            piece: Piece::spawn(kind),
            next,
            session: Session::new(),
            rng,
            stamped: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Replace the active piece (e.g. to stage a position).
    pub fn set_piece(&mut self, piece: Piece) {
        self.piece = piece;
    }

    pub fn next_shape(&self) -> Shape {
        self.next
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> RunState {
        self.session.state()
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            board: &self.board,
            session: &self.session,
            next: self.next,
        }
    }

    /// Stamp the active piece into the board for rendering
    pub fn stamp(&mut self) {
        if !self.stamped && self.piece.fits(&self.board) {
            self.board.place(&self.piece.shape(), self.piece.anchor(), false);
            self.stamped = true;
        }
    }

    /// Erase the stamped piece, leaving only settled cells
    pub fn erase(&mut self) {
        if self.stamped {
            self.board.place(&self.piece.shape(), self.piece.anchor(), true);
            self.stamped = false;
        }
    }

    /// Handle one input symbol.
    ///
    /// `present` is invoked for every line-clear phase; its error aborts handling.
    /// Must be called with the active piece erased.
    pub fn handle<E>(
        &mut self,
        input: Input,
        present: impl FnMut(&Frame<'_>, ClearPhase) -> Result<(), E>,
    ) -> Result<Step, E> {
        debug_assert!(!self.stamped, "handle() called with the piece stamped");

        match (self.session.state(), input) {
            (RunState::Terminated, _) => Ok(Step::Rejected),
            (_, Input::Interrupt) => {
                self.session.terminate(Outcome::Quit);
                Ok(Step::Quit)
            }
            (RunState::Paused, Input::Action(GameAction::Pause)) => {
                self.session.toggle_pause();
                Ok(Step::Resumed)
            }
            (RunState::Paused, _) => Ok(Step::Rejected),
            (RunState::Running, Input::Gravity) => self.descend(present),
            (RunState::Running, Input::Action(action)) => Ok(self.apply_action(action)),
        }
    }

    fn apply_action(&mut self, action: GameAction) -> Step {
        let moved = match action {
            GameAction::MoveLeft => self.piece.try_move(&self.board, Direction::Left),
            GameAction::MoveRight => self.piece.try_move(&self.board, Direction::Right),
            GameAction::Rotate => self.piece.try_rotate(&self.board),
            GameAction::HardDrop => {
                let rows = self.piece.hard_drop(&self.board);
                self.session.add_points(rows);
                rows > 0
            }
            GameAction::Pause => {
                self.session.toggle_pause();
                return Step::Paused;
            }
            GameAction::Quit => {
                self.session.terminate(Outcome::Quit);
                return Step::Quit;
            }
        };

        if moved {
            Step::Moved
        } else {
            Step::Rejected
        }
    }

    /// Gravity tick: descend one row or lock.
    fn descend<E>(
        &mut self,
        present: impl FnMut(&Frame<'_>, ClearPhase) -> Result<(), E>,
    ) -> Result<Step, E> {
        if self.piece.try_descend(&self.board) {
            return Ok(Step::Moved);
        }
        self.lock(present)
    }

    /// Commit the active piece, clear lines and spawn the next piece.
    fn lock<E>(
        &mut self,
        mut present: impl FnMut(&Frame<'_>, ClearPhase) -> Result<(), E>,
    ) -> Result<Step, E> {
        self.board
            .place(&self.piece.shape(), self.piece.anchor(), false);
        self.session.add_points(1);
        tracing::debug!(
            kind = ?self.piece.kind(),
            anchor = self.piece.anchor(),
            points = self.session.points(),
            "piece locked"
        );

        let next = self.next;
        let cleared = clear_lines(
            &mut self.board,
            &mut self.session,
            |board, session, phase| present(&Frame { board, session, next }, phase),
        )?;

        if self.spawn() {
            Ok(Step::Locked { cleared })
        } else {
            tracing::debug!(points = self.session.points(), "spawn blocked, topped out");
            self.session.terminate(Outcome::ToppedOut);
            Ok(Step::ToppedOut { cleared })
        }
    }

    /// Promote the peeked shape to the active piece and peek a new one.
    ///
    /// Returns false when the new piece does not fit at the spawn anchor.
    fn spawn(&mut self) -> bool {
        self.piece = Piece::spawn(self.next.kind());
        self.next = self.rng.next_kind().spawn_shape();
        self.piece.fits(&self.board)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Drive a session until it terminates.
///
/// Each iteration handles the pending input, then (unless the session ended) stamps the
/// active piece, settles the level, draws, waits for the next input and erases the piece.
/// While paused, input is read with [`InputSource::next_key`] so gravity stays deferred.
/// The gravity timer is disarmed before returning, on success and on error.
pub fn run<I, R>(game: &mut Game, input: &mut I, renderer: &mut R) -> io::Result<Summary>
where
    I: InputSource,
    R: Renderer,
{
    input.arm_gravity(game.session.level());
    let result = drive(game, input, renderer);
    input.disarm_gravity();
    game.erase();
    result.map(|()| game.session.summary())
}

fn drive<I, R>(game: &mut Game, input: &mut I, renderer: &mut R) -> io::Result<()>
where
    I: InputSource,
    R: Renderer,
{
    let mut pending: Option<Input> = None;

    loop {
        if let Some(symbol) = pending.take() {
            let step = game.handle(symbol, |frame, phase| renderer.present_clear(frame, phase))?;
            match step {
                Step::Quit | Step::ToppedOut { .. } => return Ok(()),
                Step::Paused => {
                    renderer.invalidate();
                    pause(game, input)?;
                    if game.session.is_terminated() {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }

        game.session.settle_level();
        game.stamp();
        let drawn = renderer.draw(&game.frame());
        let next = drawn.and_then(|()| input.next_input(game.session.level()));
        game.erase();
        pending = Some(next?);
    }
}

/// Block until the pause key (or an interrupt) is read again.
fn pause<I: InputSource>(game: &mut Game, input: &mut I) -> io::Result<()> {
    tracing::debug!("paused");
    while game.state() == RunState::Paused {
        let symbol = input.next_key()?;
        game.handle(symbol, |_, _| Ok::<_, io::Error>(()))?;
    }
    tracing::debug!(state = ?game.state(), "pause ended");
    Ok(())
}
