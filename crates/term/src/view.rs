//! BoardView: the terminal [`Renderer`] for a game session.
//!
//! The view keeps a shadow copy of what it last painted and only repaints board cells whose
//! color changed. Each board cell is two terminal columns wide so blocks come out roughly
//! square. An info panel to the right of the board shows level, points, lines, the next
//! piece and the key legend.

use std::io;
use std::thread;
use std::time::Duration;

use crate::core::{ClearPhase, Frame, Renderer, Session, Shape};
use crate::surface::Surface;
use crate::types::{Cell, Color, BOARD_COLS, BOARD_SIZE, FIRST_VISIBLE_ROW, LINE_CLEAR_PAUSE_MS, SCAN_ROWS};

/// Terminal column of board column 0.
const H_OFFSET: u16 = 1;
/// Last board row shown (the upper sentinel row).
const LAST_VISIBLE_ROW: usize = SCAN_ROWS;
/// Terminal column where the info panel starts.
pub const INFO_COL: u16 = H_OFFSET + 2 * BOARD_COLS as u16 + 2;

const LEVEL_ROW: u16 = 2;
const POINTS_ROW: u16 = 3;
const LINES_ROW: u16 = 4;
const PREVIEW_LABEL_ROW: u16 = 6;
/// Screen row of the preview shape's anchor.
const PREVIEW_ANCHOR_ROW: u16 = 8;
const KEYS_ROW: u16 = 11;

/// Preview area: rows -1..=1 and columns -1..=2 around the anchor cover every spawn shape.
const PREVIEW_ROWS: std::ops::RangeInclusive<isize> = -1..=1;
const PREVIEW_COLS: std::ops::RangeInclusive<isize> = -1..=2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// How long each line-clear phase stays on screen.
    pub clear_delay: Duration,
    pub show_preview: bool,
    /// Key legend lines, printed under the preview.
    pub help: Vec<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            clear_delay: Duration::from_millis(u64::from(LINE_CLEAR_PAUSE_MS)),
            show_preview: true,
            help: Vec::new(),
        }
    }
}

pub struct BoardView<S: Surface> {
    surface: S,
    config: ViewConfig,
    /// Last painted color per board cell; `None` means unknown.
    shadow: [Option<Cell>; BOARD_SIZE],
    /// Last printed (level, points, lines).
    stats: Option<(u32, u32, u32)>,
    preview: Option<Shape>,
    /// The screen must be cleared and the static text reprinted.
    stale: bool,
}

impl<S: Surface> BoardView<S> {
    pub fn new(surface: S, config: ViewConfig) -> Self {
        Self {
            surface,
            config,
            shadow: [None; BOARD_SIZE],
            stats: None,
            preview: None,
            stale: true,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    fn repaint_static(&mut self) -> io::Result<()> {
        self.surface.clear_screen()?;
        self.surface.set_text_color(Color::Reset)?;
        if self.config.show_preview {
            self.surface.move_cursor(INFO_COL, PREVIEW_LABEL_ROW)?;
            self.surface.print("Next:")?;
        }
        if !self.config.help.is_empty() {
            self.surface.move_cursor(INFO_COL, KEYS_ROW)?;
            self.surface.print("Keys:")?;
            for (row, line) in (KEYS_ROW + 1..).zip(&self.config.help) {
                self.surface.move_cursor(INFO_COL, row)?;
                self.surface.print(line)?;
            }
        }
        self.stale = false;
        Ok(())
    }

    fn paint_board(&mut self, cells: &[Cell]) -> io::Result<usize> {
        let mut painted = 0;
        for row in FIRST_VISIBLE_ROW..=LAST_VISIBLE_ROW {
            for col in 0..BOARD_COLS {
                let idx = row * BOARD_COLS + col;
                let Some(&cell) = cells.get(idx) else {
                    continue;
                };
                if self.shadow[idx] == Some(cell) {
                    continue;
                }
                self.shadow[idx] = Some(cell);
                self.surface
                    .paint(H_OFFSET + 2 * col as u16, row as u16, cell)?;
                painted += 1;
            }
        }
        self.surface.reset_attributes()?;
        Ok(painted)
    }

    fn paint_stats(&mut self, session: &Session) -> io::Result<()> {
        let stats = (session.level(), session.points(), session.total_lines());
        if self.stats == Some(stats) {
            return Ok(());
        }
        self.stats = Some(stats);

        let (level, points, lines) = stats;
        for (row, text) in [
            (LEVEL_ROW, format!("Level  : {}", level)),
            (POINTS_ROW, format!("Points : {}", points)),
            (LINES_ROW, format!("Lines  : {}", lines)),
        ] {
            self.surface.move_cursor(INFO_COL, row)?;
            self.surface.print(&text)?;
        }
        Ok(())
    }

    fn paint_preview(&mut self, next: Shape) -> io::Result<()> {
        if self.preview == Some(next) {
            return Ok(());
        }
        self.preview = Some(next);

        let minos = next.mino_coords();
        for dr in PREVIEW_ROWS {
            for dc in PREVIEW_COLS {
                let color = if minos.contains(&(dr, dc)) {
                    next.color()
                } else {
                    Color::Reset
                };
                let col = INFO_COL as isize + 2 * (dc + 1);
                let row = PREVIEW_ANCHOR_ROW as isize + dr;
                self.surface.paint(col as u16, row as u16, color)?;
            }
        }
        self.surface.reset_attributes()
    }
}

impl<S: Surface> Renderer for BoardView<S> {
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        if self.stale {
            self.repaint_static()?;
        }
        let painted = self.paint_board(frame.board.cells())?;
        tracing::trace!(painted, "board drawn");
        self.paint_stats(frame.session)?;
        if self.config.show_preview {
            self.paint_preview(frame.next)?;
        }
        self.surface.flush()
    }

    fn present_clear(&mut self, frame: &Frame<'_>, phase: ClearPhase) -> io::Result<()> {
        self.draw(frame)?;
        tracing::trace!(?phase, "line clear shown");
        if !self.config.clear_delay.is_zero() {
            thread::sleep(self.config.clear_delay);
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.shadow = [None; BOARD_SIZE];
        self.stats = None;
        self.preview = None;
        self.stale = true;
    }
}
