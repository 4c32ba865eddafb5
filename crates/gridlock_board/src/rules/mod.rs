//! Game rules for gridlock.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the turn engine can compose them in a fixed order:
//! win first, then full board.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{DIRECTIONS, check_win, check_win_with_length, run_length};
