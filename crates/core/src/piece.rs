//! Piece controller - the active falling piece
//!
//! A piece is a shape plus an anchor index into the board. Every movement is an
//! attempt: the candidate placement is checked with [`Board::fits`] and adopted only if
//! it fits. A rejected attempt leaves the piece untouched and is not an error.
//!
//! Rotation follows the shape's rotation cycle with no wall kicks: either the next
//! state fits at the same anchor or the piece keeps its current state.

use crate::board::Board;
use crate::shapes::{PieceKind, Shape};
use crate::types::{BOARD_COLS, SPAWN_ANCHOR};

/// Horizontal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: Shape,
    anchor: usize,
}

impl Piece {
    /// Create a piece of `kind` in its spawn orientation at the spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind.spawn_shape(), SPAWN_ANCHOR)
    }

    pub fn new(shape: Shape, anchor: usize) -> Self {
        Self { shape, anchor }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    /// Check if the piece fits where it currently is
    pub fn fits(&self, board: &Board) -> bool {
        board.fits(&self.shape, self.anchor)
    }

    /// Board cells covered by the piece
    pub fn cells(&self) -> Option<[usize; 4]> {
        Board::cells_of(&self.shape, self.anchor)
    }

    /// Try to shift one column left or right
    pub fn try_move(&mut self, board: &Board, direction: Direction) -> bool {
        let Some(candidate) = self.anchor.checked_add_signed(direction.delta()) else {
            return false;
        };
        self.try_anchor(board, candidate)
    }

    /// Try to advance to the next rotation state at the same anchor
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let candidate = self.shape.next();
        if board.fits(&candidate, self.anchor) {
            self.shape = candidate;
            return true;
        }
        false
    }

    /// Try to descend one row. A failure is the lock condition.
    pub fn try_descend(&mut self, board: &Board) -> bool {
        self.try_anchor(board, self.anchor + BOARD_COLS)
    }

    /// Descend until the next row no longer fits.
    ///
    /// Returns the number of rows descended (one point per row).
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        let mut rows = 0;
        while self.try_descend(board) {
            rows += 1;
        }
        rows
    }

    fn try_anchor(&mut self, board: &Board, candidate: usize) -> bool {
        if board.fits(&self.shape, candidate) {
            self.anchor = candidate;
            return true;
        }
        false
    }
}
