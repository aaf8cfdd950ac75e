//! Line clearing engine
//!
//! Scans the playable rows top to bottom. For every fully occupied row:
//!
//! 1. count it and show the player the row about to vanish ([`ClearPhase::Removed`]),
//! 2. zero the row's interior,
//! 3. shift every row above it down by one ([`ClearPhase::Compacted`]),
//! 4. re-check the same row index, since compaction moved a new row into it.
//!
//! The presentation hook runs between the steps so the renderer can repaint and pause.
//! It is called on the game loop's thread; the board is never mutated while it runs.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::session::Session;
use crate::types::SCAN_ROWS;

/// Rows cleared by one scan, in clearing order
pub type ClearedRows = ArrayVec<usize, SCAN_ROWS>;

/// Presentation points of a line clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearPhase {
    /// The completed row has been zeroed.
    Removed { row: usize },
    /// The rows above have settled onto `row`.
    Compacted { row: usize },
}

/// Clear every completed row, compacting the stack after each one.
///
/// `present` sees the board and session after each phase. An error from it aborts the
/// scan with the board in a consistent state (the current row cleared or compacted).
pub fn clear_lines<E>(
    board: &mut Board,
    session: &mut Session,
    mut present: impl FnMut(&Board, &Session, ClearPhase) -> Result<(), E>,
) -> Result<ClearedRows, E> {
    let mut cleared = ClearedRows::new();
    let mut row = 0;

    while row < SCAN_ROWS {
        if !board.is_row_full(row) {
            row += 1;
            continue;
        }

        session.record_line();
        // Each clear consumes one full row and compaction never completes a row,
        // so the scan can never clear more rows than exist.
        cleared.push(row);
        tracing::debug!(row, total = session.total_lines(), "line cleared");

        board.clear_row(row);
        present(board, session, ClearPhase::Removed { row })?;

        board.collapse_onto(row);
        present(board, session, ClearPhase::Compacted { row })?;
    }

    Ok(cleared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, BOARD_COLS};
    use std::convert::Infallible;

    fn fill_row(board: &mut Board, row: usize) {
        for col in 1..BOARD_COLS - 1 {
            board.set(col, row, Color::Yellow);
        }
    }

    #[test]
    fn test_no_full_rows() {
        let mut board = Board::new();
        let mut session = Session::new();
        board.set(3, 20, Color::Red);
        let before = board.clone();

        let cleared = clear_lines(&mut board, &mut session, |_, _, _| Ok::<_, Infallible>(()));
        assert!(cleared.unwrap().is_empty());
        assert_eq!(board, before);
        assert_eq!(session.total_lines(), 0);
    }

    #[test]
    fn test_two_rows_with_gap() {
        let mut board = Board::new();
        let mut session = Session::new();
        fill_row(&mut board, 20);
        fill_row(&mut board, 18);
        board.set(2, 19, Color::Green);
        board.set(7, 17, Color::Cyan);

        let cleared = clear_lines(&mut board, &mut session, |_, _, _| Ok::<_, Infallible>(()))
            .unwrap();
        assert_eq!(cleared.as_slice(), &[18, 20]);
        assert_eq!(session.total_lines(), 2);

        // Row 17's cell fell two rows, row 19's fell one.
        assert_eq!(board.get_at(7, 19), Some(Color::Cyan));
        assert_eq!(board.get_at(2, 20), Some(Color::Green));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_presentation_order() {
        let mut board = Board::new();
        let mut session = Session::new();
        fill_row(&mut board, 20);

        let mut phases = Vec::new();
        clear_lines(&mut board, &mut session, |b, _, phase| {
            phases.push((phase, b.is_row_full(20)));
            Ok::<_, Infallible>(())
        })
        .unwrap();

        assert_eq!(
            phases,
            vec![
                (ClearPhase::Removed { row: 20 }, false),
                (ClearPhase::Compacted { row: 20 }, false),
            ]
        );
    }

    #[test]
    fn test_presentation_error_aborts() {
        let mut board = Board::new();
        let mut session = Session::new();
        fill_row(&mut board, 19);
        fill_row(&mut board, 20);

        let result = clear_lines(&mut board, &mut session, |_, _, _| Err("closed"));
        assert_eq!(result, Err("closed"));
        assert_eq!(session.total_lines(), 1);
        assert!(!board.is_row_full(19));
        assert!(board.is_row_full(20));
    }
}
