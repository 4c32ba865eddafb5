//! Matchmaker: pairs each new connection with the one waiting, if any.

use crate::connection::{ConnectionId, SessionId};
use crate::registry::SessionRegistry;
use tracing::{debug, info, instrument};

/// What happened to a newly connected client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pairing {
    /// Parked in the pending slot until an opponent shows up.
    Waiting,
    /// Seated in a new session.
    Paired {
        /// The new session.
        session_id: SessionId,
        /// The connection that was waiting; plays X.
        x: ConnectionId,
        /// The connection that just arrived; plays O.
        o: ConnectionId,
    },
}

/// The single-seat waiting room.
///
/// Holds zero or one connection. Emptied the moment a pairing forms or the
/// waiting connection leaves.
#[derive(Debug, Default)]
pub struct Matchmaker {
    pending: Option<ConnectionId>,
}

impl Matchmaker {
    /// Creates a matchmaker with an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connection currently waiting, if any.
    pub fn pending(&self) -> Option<ConnectionId> {
        self.pending
    }

    /// Parks `connection` or pairs it with the waiting one.
    #[instrument(skip(self, registry))]
    pub fn on_connect(
        &mut self,
        connection: ConnectionId,
        registry: &mut SessionRegistry,
    ) -> Pairing {
        match self.pending.take() {
            Some(other) if other != connection => {
                let session_id = registry.create_session(other, connection).id().clone();
                info!(%session_id, x = %other, o = %connection, "Paired connections");
                Pairing::Paired {
                    session_id,
                    x: other,
                    o: connection,
                }
            }
            Some(same) => {
                debug!(connection = %same, "Connection already waiting");
                self.pending = Some(same);
                Pairing::Waiting
            }
            None => {
                info!("Connection waiting for an opponent");
                self.pending = Some(connection);
                Pairing::Waiting
            }
        }
    }

    /// Clears the slot if `connection` is the one waiting.
    ///
    /// Returns true when the slot was cleared.
    #[instrument(skip(self))]
    pub fn on_disconnect_while_pending(&mut self, connection: ConnectionId) -> bool {
        if self.pending == Some(connection) {
            info!("Waiting connection left");
            self.pending = None;
            true
        } else {
            false
        }
    }
}
