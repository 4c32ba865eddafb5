//! Connection gateway: delivers lobby decisions to live connections.

use crate::connection::{ConnectionId, ConnectionIds};
use crate::lobby::Lobby;
use crate::protocol::{ClientEvent, Envelope, ServerEvent};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument};

/// Sending half of a connection's outbound queue.
pub type Outbox = UnboundedSender<ServerEvent>;

/// Point-in-time counters for logs and health checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GatewayStats {
    /// Open connections.
    pub connections: usize,
    /// Live sessions.
    pub sessions: usize,
    /// Whether a connection is waiting for an opponent.
    pub waiting: bool,
}

#[derive(Debug)]
struct GatewayState {
    lobby: Lobby,
    ids: ConnectionIds,
    outboxes: HashMap<ConnectionId, Outbox>,
}

impl GatewayState {
    fn deliver(&self, envelopes: Vec<Envelope>) {
        for Envelope { to, event } in envelopes {
            let name = event.name();
            match self.outboxes.get(&to) {
                Some(outbox) => {
                    if outbox.send(event).is_err() {
                        debug!(connection = %to, event = name, "Outbox closed, event dropped");
                    } else {
                        debug!(connection = %to, event = name, "Event queued");
                    }
                }
                None => debug!(connection = %to, event = name, "No outbox, event dropped"),
            }
        }
    }
}

/// Shared handle to the lobby and every connection's outbox.
///
/// All state sits behind one mutex: each inbound event is decided and its
/// outbound events queued while the lock is held, so no two events interleave.
#[derive(Debug, Clone)]
pub struct Gateway {
    state: Arc<Mutex<GatewayState>>,
}

impl Gateway {
    /// Creates a gateway around `lobby`.
    #[instrument(skip(lobby))]
    pub fn new(lobby: Lobby) -> Self {
        info!("Creating connection gateway");
        Self {
            state: Arc::new(Mutex::new(GatewayState {
                lobby,
                ids: ConnectionIds::default(),
                outboxes: HashMap::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GatewayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new connection and runs matchmaking for it.
    #[instrument(skip(self, outbox))]
    pub fn connect(&self, outbox: Outbox) -> ConnectionId {
        let mut state = self.lock();
        let connection = state.ids.allocate();
        state.outboxes.insert(connection, outbox);
        info!(%connection, "Player connected");

        let envelopes = state.lobby.connect(connection);
        state.deliver(envelopes);
        connection
    }

    /// Handles one inbound event from `connection`.
    #[instrument(skip(self))]
    pub fn handle(&self, connection: ConnectionId, event: ClientEvent) {
        let mut state = self.lock();
        let envelopes = state.lobby.handle(connection, event);
        state.deliver(envelopes);
    }

    /// Forgets `connection` and notifies whoever was playing against it.
    #[instrument(skip(self))]
    pub fn disconnect(&self, connection: ConnectionId) {
        let mut state = self.lock();
        state.outboxes.remove(&connection);
        info!(%connection, "Player disconnected");

        let envelopes = state.lobby.disconnect(connection);
        state.deliver(envelopes);
    }

    /// Current counters.
    pub fn stats(&self) -> GatewayStats {
        let state = self.lock();
        GatewayStats {
            connections: state.outboxes.len(),
            sessions: state.lobby.registry().len(),
            waiting: state.lobby.pending().is_some(),
        }
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new(Lobby::default())
    }
}
