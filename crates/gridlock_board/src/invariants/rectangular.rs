//! Rectangular board invariant: every row has the board's length.

use super::Invariant;
use crate::Board;

/// Invariant: the board is N x N.
pub struct RectangularBoardInvariant;

impl Invariant<Board> for RectangularBoardInvariant {
    fn holds(board: &Board) -> bool {
        let size = board.size();
        board.rows().iter().all(|row| row.len() == size)
    }

    fn description() -> &'static str {
        "All rows have the same length as the board"
    }
}
