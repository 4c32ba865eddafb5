//! Connection and session identifiers.

use derive_more::{Display, From};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Opaque handle for one transport connection.
///
/// Allocated by the gateway when a socket is accepted and never reused within
/// the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wraps a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Hands out increasing connection ids.
#[derive(Debug, Default)]
pub struct ConnectionIds {
    next: u64,
}

impl ConnectionIds {
    /// Allocates the next unused id.
    pub fn allocate(&mut self) -> ConnectionId {
        self.next += 1;
        ConnectionId(self.next)
    }
}
