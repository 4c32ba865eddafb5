//! Full-board detection for gridlock.

use crate::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (no empty cell left).
///
/// A full board after a move that did not win is a tie.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().all(|c| c != Cell::Empty)
}
