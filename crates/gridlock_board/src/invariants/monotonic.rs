//! Monotonic board property: marks are never overwritten or removed.

use crate::{Board, Cell};

/// Returns true if `after` keeps every mark of `before`.
///
/// Boards of different sizes are never monotonic successors.
pub fn is_monotonic(before: &Board, after: &Board) -> bool {
    before.size() == after.size()
        && before
            .cells()
            .zip(after.cells())
            .all(|(b, a)| b == Cell::Empty || b == a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_placement_is_monotonic() {
        let before = Board::standard();
        let mut after = before.clone();
        after.place(3, 1, Player::X).expect("Valid placement");
        assert!(is_monotonic(&before, &after));
    }

    #[test]
    fn test_overwrite_is_not_monotonic() {
        let mut before = Board::standard();
        before.place(3, 1, Player::X).expect("Valid placement");
        let mut after = Board::standard();
        after.place(3, 1, Player::O).expect("Valid placement");
        assert!(!is_monotonic(&before, &after));
    }

    #[test]
    fn test_removal_is_not_monotonic() {
        let mut before = Board::standard();
        before.place(0, 0, Player::O).expect("Valid placement");
        assert!(!is_monotonic(&before, &Board::standard()));
    }
}
