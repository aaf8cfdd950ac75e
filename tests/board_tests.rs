//! Board tests - sentinel border, collision and row operations

use micro_tetris::core::{Board, PieceKind};
use micro_tetris::types::{Color, BOARD_COLS, BOARD_ROWS, BOARD_SIZE, SCAN_ROWS};

fn fill_interior_row(board: &mut Board, row: usize, color: Color) {
    for col in 1..BOARD_COLS - 1 {
        assert!(board.set(col, row, color));
    }
}

#[test]
fn test_board_new_has_border_and_empty_interior() {
    let board = Board::new();
    assert_eq!(board.cells().len(), BOARD_SIZE);

    for row in 0..BOARD_ROWS {
        for col in 0..BOARD_COLS {
            let cell = board.get_at(col, row).unwrap();
            let border = col == 0 || col == BOARD_COLS - 1 || row >= SCAN_ROWS;
            if border {
                assert_eq!(cell, Color::BORDER, "({}, {}) should be border", col, row);
            } else {
                assert!(cell.is_empty(), "({}, {}) should be empty", col, row);
            }
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_border_cannot_be_overwritten() {
    let mut board = Board::new();
    assert!(!board.set(0, 5, Color::Reset));
    assert!(!board.set(BOARD_COLS - 1, 5, Color::Reset));
    assert!(!board.set(4, SCAN_ROWS, Color::Reset));
    assert!(!board.set(4, BOARD_ROWS, Color::Red));
    assert_eq!(board.get_at(0, 5), Some(Color::BORDER));
}

#[test]
fn test_fits_on_empty_board() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        assert!(board.fits(&kind.spawn_shape(), 17), "{:?} should fit at spawn", kind);
    }
}

#[test]
fn test_fits_rejects_border_and_array_edges() {
    let board = Board::new();
    let t = PieceKind::T.spawn_shape(); // [ML, MR, BC]

    // Anchor in column 1: ML lands on the left border.
    assert!(!board.fits(&t, Board::index(1, 5).unwrap()));
    // Anchor in row 20: BC lands on the bottom border.
    assert!(!board.fits(&t, Board::index(5, 20).unwrap()));
    assert!(board.fits(&t, Board::index(5, 19).unwrap()));

    // Offsets pointing before the start or past the end of the array.
    let z = PieceKind::Z.spawn_shape(); // TL, TC reach up one row
    assert!(!board.fits(&z, 5));
    let vertical_i = PieceKind::I.spawn_shape().next(); // reaches two rows down
    assert!(!board.fits(&vertical_i, BOARD_SIZE - 6));
    assert!(!board.fits(&t, BOARD_SIZE + 40));
}

#[test]
fn test_fits_rejects_occupied_cell() {
    let mut board = Board::new();
    let o = PieceKind::O.spawn_shape(); // [TL, TC, ML]
    let anchor = Board::index(5, 10).unwrap();
    assert!(board.fits(&o, anchor));

    board.set(4, 9, Color::Red);
    assert!(!board.fits(&o, anchor));
}

#[test]
fn test_place_and_erase() {
    let mut board = Board::new();
    let shape = PieceKind::L.spawn_shape();
    let anchor = Board::index(5, 10).unwrap();
    let cells = Board::cells_of(&shape, anchor).unwrap();

    board.place(&shape, anchor, false);
    for idx in cells {
        assert_eq!(board.get(idx), Some(Color::Magenta));
    }
    assert_eq!(board.filled_count(), 4);
    assert!(!board.fits(&shape, anchor));

    board.place(&shape, anchor, true);
    assert_eq!(board, Board::new());
}

#[test]
fn test_row_full_detection() {
    let mut board = Board::new();
    for col in 1..BOARD_COLS - 2 {
        board.set(col, 15, Color::Blue);
    }
    assert!(!board.is_row_full(15));

    board.set(BOARD_COLS - 2, 15, Color::Blue);
    assert!(board.is_row_full(15));

    // Sentinel rows are never reported as full lines.
    assert!(!board.is_row_full(SCAN_ROWS));
}

#[test]
fn test_collapse_shifts_rows_down() {
    let mut board = Board::new();
    board.set(3, 0, Color::Red);
    board.set(4, 17, Color::Green);
    fill_interior_row(&mut board, 18, Color::Cyan);
    board.set(6, 19, Color::Yellow);

    board.clear_row(18);
    board.collapse_onto(18);

    assert_eq!(board.get_at(3, 1), Some(Color::Red));
    assert_eq!(board.get_at(4, 18), Some(Color::Green));
    // Rows below the collapsed one are untouched.
    assert_eq!(board.get_at(6, 19), Some(Color::Yellow));
    // The top row is empty afterwards.
    assert!((1..BOARD_COLS - 1).all(|col| board.get_at(col, 0) == Some(Color::Reset)));
    assert_eq!(board.filled_count(), 3);
    // Border survives the shift.
    assert_eq!(board.get_at(0, 0), Some(Color::BORDER));
}

#[test]
fn test_clear_restores_new_board() {
    let mut board = Board::new();
    fill_interior_row(&mut board, 20, Color::Red);
    board.clear();
    assert_eq!(board, Board::new());
}
