//! Win detection for gridlock.

use crate::{Board, Cell, Player, WIN_LENGTH};
use tracing::instrument;

/// Line directions through a cell: horizontal, vertical and both diagonals.
///
/// Each direction is also walked in reverse, so these four cover all eight
/// neighbours.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Counts contiguous `player` cells starting next to `(row, col)` and moving
/// along `(d_row, d_col)`.
///
/// The starting cell itself is not counted. Counting stops at the first
/// off-grid coordinate or non-matching cell; there is no wraparound.
pub fn run_length(
    board: &Board,
    row: usize,
    col: usize,
    (d_row, d_col): (isize, isize),
    player: Player,
) -> usize {
    let (Ok(mut r), Ok(mut c)) = (isize::try_from(row), isize::try_from(col)) else {
        return 0;
    };

    let mut count = 0;
    loop {
        r += d_row;
        c += d_col;
        match board.get_signed(r, c) {
            Some(Cell::Occupied(p)) if p == player => count += 1,
            _ => return count,
        }
    }
}

/// Checks whether the mark just placed at `(row, col)` completes a line of
/// at least `win_length` for `player`.
#[instrument(skip(board))]
pub fn check_win_with_length(
    board: &Board,
    row: usize,
    col: usize,
    player: Player,
    win_length: usize,
) -> bool {
    DIRECTIONS.iter().any(|&(d_row, d_col)| {
        let forward = run_length(board, row, col, (d_row, d_col), player);
        let backward = run_length(board, row, col, (-d_row, -d_col), player);
        1 + forward + backward >= win_length
    })
}

/// Checks whether the mark just placed at `(row, col)` wins the game.
///
/// Uses [`WIN_LENGTH`] regardless of the board size.
pub fn check_win(board: &Board, row: usize, col: usize, player: Player) -> bool {
    check_win_with_length(board, row, col, player, WIN_LENGTH)
}
