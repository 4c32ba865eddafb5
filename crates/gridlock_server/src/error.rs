//! Session error types.
//!
//! None of these reach a client. The lobby logs them and drops the event.

use crate::connection::{ConnectionId, SessionId};
use derive_more::{Display, Error};
use gridlock_board::Player;

/// Reason a move or lookup was ignored.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// Coordinates off the board or the target cell is occupied.
    #[display("Invalid move at ({row}, {col})")]
    InvalidMove {
        /// Requested row as received.
        row: i64,
        /// Requested column as received.
        col: i64,
    },

    /// The mover's role does not hold the turn.
    #[display("It is not {role}'s turn")]
    NotYourTurn {
        /// Role of the connection that tried to move.
        role: Player,
    },

    /// The mover is not a participant of the session.
    #[display("Connection {connection} does not play in session {session_id}")]
    NotParticipant {
        /// Connection that sent the move.
        connection: ConnectionId,
        /// Session it addressed.
        session_id: SessionId,
    },

    /// No live session has this id.
    #[display("Session {session_id} not found")]
    NotFound {
        /// The unknown id.
        session_id: SessionId,
    },
}
