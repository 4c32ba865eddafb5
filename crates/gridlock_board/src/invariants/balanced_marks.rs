//! Balanced marks invariant: X never trails O, and leads by at most one.

use super::Invariant;
use crate::{Board, Player};

/// Invariant: players alternate starting with X.
///
/// After any number of accepted moves the X count equals the O count or
/// exceeds it by exactly one.
pub struct BalancedMarksInvariant;

impl Invariant<Board> for BalancedMarksInvariant {
    fn holds(board: &Board) -> bool {
        let x = board.count(Player::X);
        let o = board.count(Player::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}
