//! Shapes module - tetromino geometry and rotation cycles
//!
//! Every piece is stored as an anchor cell plus three signed offsets into the flat
//! board array. Each piece kind owns an ordered cycle of rotation states; state 0 is
//! the spawn orientation and rotating advances cyclically through the owned sequence.
//!
//! Offsets are expressed with the board width baked in, so a shape is only meaningful
//! against a board of `BOARD_COLS` columns.

use crate::types::{Color, BOARD_COLS, PIECE_KINDS};

/// Offset of a single mino relative to the anchor cell (flat index delta).
pub type MinoOffset = isize;

/// The three non-anchor minos of a piece.
pub type ShapeOffsets = [MinoOffset; 3];

const C: isize = BOARD_COLS as isize;

const TL: isize = -C - 1; // top left
const TC: isize = -C; // top center
const TR: isize = -C + 1; // top right
const ML: isize = -1; // middle left
const MR: isize = 1; // middle right
const EMR: isize = 2; // extra middle right
const BL: isize = C - 1; // bottom left
const BC: isize = C; // bottom center
const BR: isize = C + 1; // bottom right
const EBC: isize = 2 * C; // extra bottom center

const Z_STATES: &[ShapeOffsets] = &[[TL, TC, MR], [TC, ML, BL]];
const S_STATES: &[ShapeOffsets] = &[[TR, TC, ML], [TC, MR, BR]];
const T_STATES: &[ShapeOffsets] = &[
    [ML, MR, BC],
    [TC, MR, BC],
    [TC, ML, MR],
    [TC, ML, BC],
];
const O_STATES: &[ShapeOffsets] = &[[TL, TC, ML]];
const L_STATES: &[ShapeOffsets] = &[
    [ML, BL, MR],
    [TC, BC, BR],
    [TR, ML, MR],
    [TL, TC, BC],
];
const J_STATES: &[ShapeOffsets] = &[
    [ML, BR, MR],
    [TR, TC, BC],
    [TL, MR, ML],
    [TC, BC, BL],
];
const I_STATES: &[ShapeOffsets] = &[[ML, MR, EMR], [TC, BC, EBC]];

/// The seven tetromino piece kinds, in random-selection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Z,
    S,
    T,
    O,
    L,
    J,
    I,
}

impl PieceKind {
    /// Every kind, indexed by its catalog position.
    pub const ALL: [PieceKind; PIECE_KINDS] = [
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
    ];

    /// Kind at catalog position `index` (0..7).
    ///
    /// # Examples
    ///
    /// ```
    /// use micro_tetris_core::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(6), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Catalog position of this kind.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn color(self) -> Color {
        match self {
            PieceKind::Z => Color::Red,
            PieceKind::S => Color::Green,
            PieceKind::T => Color::Yellow,
            PieceKind::O => Color::Blue,
            PieceKind::L => Color::Magenta,
            PieceKind::J => Color::Cyan,
            PieceKind::I => Color::LightGrey,
        }
    }

    /// Ordered rotation states; index 0 is the spawn orientation.
    pub fn rotations(self) -> &'static [ShapeOffsets] {
        match self {
            PieceKind::Z => Z_STATES,
            PieceKind::S => S_STATES,
            PieceKind::T => T_STATES,
            PieceKind::O => O_STATES,
            PieceKind::L => L_STATES,
            PieceKind::J => J_STATES,
            PieceKind::I => I_STATES,
        }
    }

    /// Shape used when a piece of this kind spawns.
    pub fn spawn_shape(self) -> Shape {
        Shape {
            kind: self,
            rotation: 0,
        }
    }
}

/// One rotation state of one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: PieceKind,
    rotation: u8,
}

impl Shape {
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Position of this state within the kind's rotation cycle.
    pub fn rotation(&self) -> usize {
        self.rotation as usize
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Offsets of the three minos that complete the piece around its anchor.
    pub fn offsets(&self) -> ShapeOffsets {
        self.kind.rotations()[self.rotation()]
    }

    /// The next state in the rotation cycle (wraps back to the spawn orientation).
    pub fn next(&self) -> Shape {
        let len = self.kind.rotations().len();
        Shape {
            kind: self.kind,
            rotation: ((self.rotation() + 1) % len) as u8,
        }
    }

    /// Number of distinct states in this shape's rotation cycle.
    pub fn cycle_len(&self) -> usize {
        self.kind.rotations().len()
    }

    /// (row, col) of each mino relative to the anchor, anchor first.
    ///
    /// Used to draw a shape away from the board (the next-piece preview). Column deltas
    /// of every state lie in -1..=2, which makes the split unambiguous.
    pub fn mino_coords(&self) -> [(isize, isize); 4] {
        let mut out = [(0, 0); 4];
        for (slot, offset) in out[1..].iter_mut().zip(self.offsets()) {
            let row = (offset + 1).div_euclid(C);
            *slot = (row, offset - row * C);
        }
        out
    }
}
