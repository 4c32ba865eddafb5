//! Gridlock board model - pure four-in-a-row game logic
//!
//! This crate knows nothing about connections or sessions. It provides:
//!
//! - **Types**: [`Player`], [`Cell`] and the square [`Board`] grid
//! - **Rules**: win detection along the four line directions and full-board detection
//! - **Invariants**: structural properties a board must keep between moves
//!
//! # Example
//!
//! ```
//! use gridlock_board::{Board, Player, rules};
//!
//! let mut board = Board::standard();
//! for col in 0..4 {
//!     board.place(1, col, Player::X).unwrap();
//! }
//! assert!(rules::check_win(&board, 1, 3, Player::X));
//! assert!(!rules::is_full(&board));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod types;

pub mod invariants;
pub mod rules;

pub use error::BoardError;
pub use types::{Board, Cell, Player};

/// Side length of the grid used by the game server.
pub const BOARD_SIZE: usize = 5;

/// Contiguous marks needed to win.
///
/// Deliberately shorter than [`BOARD_SIZE`]: a line of four anywhere on the
/// 5x5 grid wins.
pub const WIN_LENGTH: usize = 4;
