//! Board module - manages the game grid
//!
//! The board is a fixed 12x23 grid of colors stored as a flat row-major array.
//! Coordinates: flat index `row * BOARD_COLS + col`.
//!
//! A permanently occupied sentinel ring (left column, right column, bottom two rows)
//! surrounds the playfield. Collision detection relies on that ring instead of explicit
//! bounds checks: any placement leaving the interior touches an occupied border cell.
//! Indices past either end of the array count as occupied too, so the array edge is
//! simply the outermost part of the ring.

use crate::shapes::Shape;
use crate::types::{Cell, Color, BOARD_COLS, BOARD_ROWS, BOARD_SIZE, SCAN_ROWS};

/// The game board - 12 columns x 23 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a board with the sentinel border filled and the interior cleared
    pub fn new() -> Self {
        let mut cells = [Color::Reset; BOARD_SIZE];
        for (idx, cell) in cells.iter_mut().enumerate() {
            if Self::is_border(idx) {
                *cell = Color::BORDER;
            }
        }
        Self { cells }
    }

    /// Flat index of (col, row); `None` outside the array
    #[inline(always)]
    pub fn index(col: usize, row: usize) -> Option<usize> {
        if col >= BOARD_COLS || row >= BOARD_ROWS {
            return None;
        }
        Some(row * BOARD_COLS + col)
    }

    /// True for cells of the permanent sentinel ring
    pub fn is_border(idx: usize) -> bool {
        let col = idx % BOARD_COLS;
        let row = idx / BOARD_COLS;
        col == 0 || col == BOARD_COLS - 1 || row >= SCAN_ROWS
    }

    /// Absolute cell indices covered by `shape` anchored at `anchor`.
    ///
    /// Returns `None` when a mino would fall outside the array.
    pub fn cells_of(shape: &Shape, anchor: usize) -> Option<[usize; 4]> {
        let offsets = shape.offsets();
        let mut out = [anchor; 4];
        for (slot, offset) in out[1..].iter_mut().zip(offsets) {
            *slot = anchor.checked_add_signed(offset)?;
        }
        if anchor >= BOARD_SIZE || out.iter().any(|&idx| idx >= BOARD_SIZE) {
            return None;
        }
        Some(out)
    }

    /// Check whether all four cells of `shape` at `anchor` are empty
    pub fn fits(&self, shape: &Shape, anchor: usize) -> bool {
        match Self::cells_of(shape, anchor) {
            Some(cells) => cells.iter().all(|&idx| self.cells[idx].is_empty()),
            None => false,
        }
    }

    /// Write the shape's color (or the empty color when `clear` is set) into its four cells.
    ///
    /// Callers only stamp placements that `fits` accepted; erasing clears exactly
    /// the cells the matching stamp wrote.
    pub fn place(&mut self, shape: &Shape, anchor: usize, clear: bool) {
        let color = if clear { Color::Reset } else { shape.color() };
        if let Some(cells) = Self::cells_of(shape, anchor) {
            for idx in cells {
                if !Self::is_border(idx) {
                    self.cells[idx] = color;
                }
            }
        }
    }

    /// Get cell at flat index
    pub fn get(&self, idx: usize) -> Option<Cell> {
        self.cells.get(idx).copied()
    }

    /// Get cell at (col, row)
    pub fn get_at(&self, col: usize, row: usize) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set an interior cell at (col, row).
    ///
    /// Returns false for border cells and out-of-range coordinates; the sentinel ring
    /// cannot be overwritten.
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) if !Self::is_border(idx) => {
                self.cells[idx] = cell;
                true
            }
            _ => false,
        }
    }

    /// Check if every interior cell of `row` is occupied
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= SCAN_ROWS {
            return false;
        }
        self.interior(row).iter().all(|cell| !cell.is_empty())
    }

    /// Zero the interior cells of `row`
    pub fn clear_row(&mut self, row: usize) {
        if row >= SCAN_ROWS {
            return;
        }
        for cell in self.interior_mut(row) {
            *cell = Color::Reset;
        }
    }

    /// Shift every row above `row` down by one, overwriting `row`.
    ///
    /// The topmost row is emptied afterwards. Rows below `row` are untouched.
    pub fn collapse_onto(&mut self, row: usize) {
        if row >= SCAN_ROWS {
            return;
        }
        for dst in (1..=row).rev() {
            let src_start = (dst - 1) * BOARD_COLS + 1;
            let dst_start = dst * BOARD_COLS + 1;
            // copy_within handles the overlapping rows
            self.cells
                .copy_within(src_start..src_start + BOARD_COLS - 2, dst_start);
        }
        self.clear_row(0);
    }

    /// Interior slice (columns 1..=10) of `row`
    fn interior(&self, row: usize) -> &[Cell] {
        let start = row * BOARD_COLS + 1;
        &self.cells[start..start + BOARD_COLS - 2]
    }

    fn interior_mut(&mut self, row: usize) -> &mut [Cell] {
        let start = row * BOARD_COLS + 1;
        &mut self.cells[start..start + BOARD_COLS - 2]
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count occupied interior cells
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(idx, cell)| !Self::is_border(idx) && !cell.is_empty())
            .count()
    }

    /// Empty the interior, keeping the border
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
