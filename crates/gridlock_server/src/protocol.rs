//! Wire protocol: named events exchanged with clients.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}` with
//! camelCase event names and payload fields.

use crate::connection::{ConnectionId, SessionId};
use derive_new::new;
use gridlock_board::{Board, Player};
use serde::{Deserialize, Serialize};

/// Event sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// Place a mark in a session.
    MakeMove {
        /// Session the move is for.
        session_id: SessionId,
        /// Target row, zero based.
        row: i64,
        /// Target column, zero based.
        col: i64,
    },
}

/// Game result announced in `gameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// X completed a line.
    X,
    /// O completed a line.
    O,
    /// The board filled up.
    Tie,
}

impl From<Player> for Winner {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Winner::X,
            Player::O => Winner::O,
        }
    }
}

/// Event sent to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[strum(serialize_all = "camelCase")]
pub enum ServerEvent {
    /// No opponent yet.
    Waiting {
        /// Text shown while waiting.
        message: String,
    },
    /// The client was seated in a session.
    GameStart {
        /// Session to address moves to.
        session_id: SessionId,
        /// Role assigned to this client.
        role: Player,
    },
    /// A move was accepted and the game continues.
    UpdateBoard {
        /// Board after the move.
        board: Board,
        /// Role to move next.
        current_player: Player,
    },
    /// The game ended.
    GameOver {
        /// Winning role or tie.
        winner: Winner,
    },
    /// The other participant left; the session is gone.
    OpponentDisconnected {},
}

impl ServerEvent {
    /// Event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// An outbound event addressed to one connection.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Envelope {
    /// Recipient.
    pub to: ConnectionId,
    /// Event to deliver.
    pub event: ServerEvent,
}
