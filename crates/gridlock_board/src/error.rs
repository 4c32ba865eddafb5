//! Board error types.

use crate::Player;
use derive_more::{Display, Error};

/// Error returned when a mark cannot be placed or a cell cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// The coordinate lies outside the grid.
    #[display("Cell ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Side length of the board.
        size: usize,
    },

    /// The cell already holds a mark.
    #[display("Cell ({row}, {col}) is already occupied by {by}")]
    Occupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Mark already in the cell.
        by: Player,
    },

    /// A wire symbol that is not `""`, `"X"` or `"O"`.
    #[display("Unknown cell symbol {symbol:?}")]
    UnknownSymbol {
        /// The rejected symbol.
        symbol: String,
    },
}

impl BoardError {
    /// True for the errors a move can produce (out of bounds or occupied).
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::Occupied { .. })
    }
}
