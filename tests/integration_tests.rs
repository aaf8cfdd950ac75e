//! Integration tests for the game loop
//!
//! Sessions are driven through `run` with a scripted input source and a renderer that
//! records what it was asked to show.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::io;

use micro_tetris::core::{
    run, ClearPhase, Frame, Game, InputSource, Outcome, Piece, PieceKind, Renderer, Session,
    Step,
};
use micro_tetris::types::{Color, GameAction, Input, RunState, BOARD_COLS, SPAWN_ANCHOR};

/// Plays back a fixed list of inputs, then interrupts.
#[derive(Default)]
struct Script {
    inputs: VecDeque<Input>,
    /// Fail with an I/O error once the script runs out instead of interrupting.
    fail_at_end: bool,
    armed: u32,
    disarmed: u32,
    key_reads: u32,
}

impl Script {
    fn new(inputs: impl IntoIterator<Item = Input>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            ..Self::default()
        }
    }

    fn pop(&mut self) -> io::Result<Input> {
        match self.inputs.pop_front() {
            Some(input) => Ok(input),
            None if self.fail_at_end => Err(io::Error::new(io::ErrorKind::Other, "closed")),
            None => Ok(Input::Interrupt),
        }
    }
}

impl InputSource for Script {
    fn arm_gravity(&mut self, _level: u32) {
        self.armed += 1;
    }

    fn next_input(&mut self, _level: u32) -> io::Result<Input> {
        self.pop()
    }

    fn next_key(&mut self) -> io::Result<Input> {
        self.key_reads += 1;
        self.pop()
    }

    fn disarm_gravity(&mut self) {
        self.disarmed += 1;
    }
}

#[derive(Default)]
struct Recorder {
    frames: usize,
    phases: Vec<ClearPhase>,
    invalidations: usize,
    /// Piece cells visible in the last frame (non-empty interior cells).
    last_filled: usize,
    levels: Vec<u32>,
}

impl Renderer for Recorder {
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.frames += 1;
        self.last_filled = frame.board.filled_count();
        self.levels.push(frame.session.level());
        Ok(())
    }

    fn present_clear(&mut self, _frame: &Frame<'_>, phase: ClearPhase) -> io::Result<()> {
        self.phases.push(phase);
        Ok(())
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}

fn handle(game: &mut Game, input: Input) -> Step {
    match game.handle(input, |_, _| Ok::<_, Infallible>(())) {
        Ok(step) => step,
        Err(never) => match never {},
    }
}

fn drop_key() -> Input {
    Input::Action(GameAction::HardDrop)
}

#[test]
fn test_hard_drop_then_gravity_locks() {
    let mut game = Game::with_first_piece(7, PieceKind::I);
    let mut input = Script::new([drop_key(), Input::Gravity, Input::Action(GameAction::Quit)]);
    let mut renderer = Recorder::default();

    let summary = run(&mut game, &mut input, &mut renderer).unwrap();

    // 19 rows dropped plus one point for the lock.
    assert_eq!(summary.points, 20);
    assert_eq!(summary.level, 1);
    assert_eq!(summary.score, 20);
    assert_eq!(summary.outcome, Outcome::Quit);
    assert_eq!(game.state(), RunState::Terminated);

    // The locked I stays on the bottom row; the new piece is erased after the loop.
    assert_eq!(game.board().filled_count(), 4);
    assert!((4..=7).all(|col| game.board().get_at(col, 20) == Some(Color::LightGrey)));

    assert_eq!(renderer.frames, 3);
    assert_eq!(renderer.levels, vec![1, 1, 1]);
    assert_eq!(input.armed, 1);
    assert_eq!(input.disarmed, 1);
}

#[test]
fn test_gravity_lock_clears_row_and_shifts_stack() {
    let mut game = Game::with_first_piece(3, PieceKind::I);
    {
        let board = game.board_mut();
        // Bottom row full except the four columns the I will fill.
        for col in [1, 2, 3, 8, 9, 10] {
            board.set(col, 20, Color::Red);
        }
        board.set(1, 19, Color::Green);
        board.set(9, 18, Color::Cyan);
    }

    let mut input = Script::new([drop_key(), Input::Gravity]);
    let mut renderer = Recorder::default();
    let summary = run(&mut game, &mut input, &mut renderer).unwrap();

    assert_eq!(
        renderer.phases,
        vec![
            ClearPhase::Removed { row: 20 },
            ClearPhase::Compacted { row: 20 }
        ]
    );
    assert_eq!(summary.lines, 1);
    // Line clears score nothing: 19 rows dropped plus the lock.
    assert_eq!(summary.points, 20);

    let board = game.board();
    assert_eq!(board.get_at(1, 20), Some(Color::Green));
    assert_eq!(board.get_at(9, 19), Some(Color::Cyan));
    assert_eq!(board.filled_count(), 2);
    for col in 2..BOARD_COLS - 1 {
        if col != 9 {
            assert_eq!(board.get_at(col, 20), Some(Color::Reset), "col {}", col);
        }
    }
}

#[test]
fn test_pause_defers_everything_but_resume() {
    let mut game = Game::with_first_piece(11, PieceKind::T);
    let mut input = Script::new([
        Input::Action(GameAction::Pause),
        Input::Action(GameAction::MoveLeft),
        Input::Action(GameAction::Quit),
        Input::Action(GameAction::Pause),
        Input::Action(GameAction::MoveRight),
        Input::Action(GameAction::Quit),
    ]);
    let mut renderer = Recorder::default();

    let summary = run(&mut game, &mut input, &mut renderer).unwrap();

    // MoveLeft and Quit were swallowed by the pause; Pause resumed.
    assert_eq!(input.key_reads, 3);
    assert_eq!(renderer.invalidations, 1);
    assert_eq!(game.piece().anchor(), SPAWN_ANCHOR + 1);
    assert_eq!(summary.outcome, Outcome::Quit);
}

#[test]
fn test_interrupt_while_paused_terminates() {
    let mut game = Game::with_first_piece(11, PieceKind::O);
    let mut input = Script::new([Input::Action(GameAction::Pause), Input::Interrupt]);
    let mut renderer = Recorder::default();

    let summary = run(&mut game, &mut input, &mut renderer).unwrap();
    assert_eq!(summary.outcome, Outcome::Quit);
    assert_eq!(summary.points, 0);
    assert_eq!(input.disarmed, 1);
}

#[test]
fn test_top_out_ends_session() {
    let mut game = Game::with_first_piece(5, PieceKind::I);
    {
        let board = game.board_mut();
        // Rows 2..=20 filled except the last column, so nothing clears.
        for row in 2..=20 {
            for col in 1..BOARD_COLS - 2 {
                board.set(col, row, Color::Blue);
            }
        }
    }

    let mut input = Script::new([Input::Gravity]);
    let mut renderer = Recorder::default();
    let summary = run(&mut game, &mut input, &mut renderer).unwrap();

    assert_eq!(summary.outcome, Outcome::ToppedOut);
    assert_eq!(summary.points, 1);
    assert_eq!(summary.lines, 0);
    assert_eq!(renderer.frames, 1);
}

#[test]
fn test_input_error_propagates_and_disarms() {
    let mut game = Game::new(99);
    let mut input = Script::new([Input::Action(GameAction::MoveLeft)]);
    input.fail_at_end = true;
    let mut renderer = Recorder::default();

    let err = run(&mut game, &mut input, &mut renderer).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::Other);
    assert_eq!(input.disarmed, 1);
    // The active piece is never left stamped into the board.
    assert_eq!(game.board().filled_count(), 0);
}

#[test]
fn test_frames_show_active_piece() {
    let mut game = Game::new(42);
    let mut input = Script::new([
        Input::Action(GameAction::Rotate),
        Input::Gravity,
        Input::Action(GameAction::MoveLeft),
    ]);
    let mut renderer = Recorder::default();
    run(&mut game, &mut input, &mut renderer).unwrap();

    assert_eq!(renderer.frames, 4);
    assert_eq!(renderer.last_filled, 4);
}

#[test]
fn test_hard_drop_score_matches_height() {
    for kind in PieceKind::ALL {
        let mut game = Game::with_first_piece(1, kind);
        let mut probe = Piece::spawn(kind);
        let height = probe.hard_drop(game.board());

        assert_eq!(handle(&mut game, drop_key()), Step::Moved);
        assert_eq!(game.session().points(), height, "{:?}", kind);
        assert_eq!(game.piece().anchor(), probe.anchor());

        // A second drop goes nowhere.
        assert_eq!(handle(&mut game, drop_key()), Step::Rejected);
        assert_eq!(game.session().points(), height);
    }
}

#[test]
fn test_level_follows_cleared_lines() {
    let mut session = Session::new();
    let mut previous = session.level();
    for line in 1..=35 {
        session.record_line();
        if line % 3 == 0 {
            session.settle_level();
        }
        assert!(session.level() >= previous);
        previous = session.level();
    }
    session.settle_level();
    assert_eq!(session.total_lines(), 35);
    assert_eq!(session.level(), 4);
    assert_eq!(session.lines_cleared(), 5);

    session.add_points(10);
    assert_eq!(session.final_score(), 40);
}

#[test]
fn test_same_seed_same_pieces() {
    let mut a = Game::new(2024);
    let mut b = Game::new(2024);
    for _ in 0..20 {
        assert_eq!(a.piece(), b.piece());
        assert_eq!(a.next_shape(), b.next_shape());
        handle(&mut a, drop_key());
        handle(&mut a, Input::Gravity);
        handle(&mut b, drop_key());
        handle(&mut b, Input::Gravity);
        if a.state() == RunState::Terminated {
            break;
        }
    }
}
