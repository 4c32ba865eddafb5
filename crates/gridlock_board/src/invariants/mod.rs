//! First-class board invariants.
//!
//! Invariants are logical properties that must hold between moves. They are
//! testable independently and checked by the turn engine in debug builds.

mod balanced_marks;
mod monotonic;
mod rectangular;

pub use balanced_marks::BalancedMarksInvariant;
pub use monotonic::is_monotonic;
pub use rectangular::RectangularBoardInvariant;

use crate::Board;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invariant violated: {description}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All board invariants as a composable set.
pub type BoardInvariants = (RectangularBoardInvariant, BalancedMarksInvariant);

/// Checks every board invariant.
pub fn check_board(board: &Board) -> Result<(), Vec<InvariantViolation>> {
    BoardInvariants::check_all(board)
}
