//! Surface: the minimal drawing primitives the board view needs.
//!
//! [`CrosstermSurface`] queues crossterm commands into a byte buffer and writes the whole
//! buffer to its sink on [`Surface::flush`], so one frame reaches the terminal in a single
//! write. Tests substitute a recording surface.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::types::Color;

/// Drawing primitives. Coordinates are 0-based terminal (column, row).
pub trait Surface {
    fn clear_screen(&mut self) -> io::Result<()>;
    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()>;
    fn set_text_color(&mut self, color: Color) -> io::Result<()>;
    fn set_background(&mut self, color: Color) -> io::Result<()>;
    fn reset_attributes(&mut self) -> io::Result<()>;
    fn print(&mut self, text: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;

    /// Paint one board cell: a two-column block in `color`.
    fn paint(&mut self, col: u16, row: u16, color: Color) -> io::Result<()> {
        self.move_cursor(col, row)?;
        self.set_background(color)?;
        self.print("  ")
    }
}

/// Surface backed by any writer (stdout in the binary).
pub struct CrosstermSurface<W: Write> {
    out: W,
    buf: Vec<u8>,
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Bytes queued since the last flush.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl CrosstermSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Surface for CrosstermSurface<W> {
    fn clear_screen(&mut self) -> io::Result<()> {
        self.buf.queue(ResetColor)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.buf.queue(cursor::MoveTo(0, 0))?;
        Ok(())
    }

    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()> {
        self.buf.queue(cursor::MoveTo(col, row))?;
        Ok(())
    }

    fn set_text_color(&mut self, color: Color) -> io::Result<()> {
        self.buf.queue(SetForegroundColor(to_crossterm(color)))?;
        Ok(())
    }

    fn set_background(&mut self, color: Color) -> io::Result<()> {
        self.buf.queue(SetBackgroundColor(to_crossterm(color)))?;
        Ok(())
    }

    fn reset_attributes(&mut self) -> io::Result<()> {
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.buf.queue(Print(text))?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        self.buf.clear();
        Ok(())
    }
}

/// Map a palette color to the terminal's standard 8-color set.
pub fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Reset => style::Color::Reset,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::LightGrey => style::Color::Grey,
    }
}
