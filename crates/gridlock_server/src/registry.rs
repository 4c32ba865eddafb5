//! Session registry: the sole owner of live game sessions.

use crate::connection::{ConnectionId, SessionId};
use crate::error::SessionError;
use crate::session::GameSession;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Maps session ids to live sessions.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, GameSession>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and stores a session with `x` moving first against `o`.
    ///
    /// The id is `"{x}-{o}"`. Connection ids are never reused, so a clash
    /// only happens if the same pair is seated twice while the first game is
    /// live; the id then gets a `#n` suffix.
    #[instrument(skip(self))]
    pub fn create_session(&mut self, x: ConnectionId, o: ConnectionId) -> &GameSession {
        let base = format!("{x}-{o}");
        let mut id = base.clone();
        let mut n = 1;
        while self.sessions.contains_key(&id) {
            warn!(session_id = %id, "Session id already live");
            id = format!("{base}#{n}");
            n += 1;
        }

        info!(session_id = %id, live = self.sessions.len() + 1, "Registering session");
        self.sessions
            .entry(id.clone())
            .or_insert_with(|| GameSession::new(id, x, o))
    }

    /// Gets a session by ID.
    pub fn get(&self, id: &str) -> Result<&GameSession, SessionError> {
        self.sessions.get(id).ok_or_else(|| SessionError::NotFound {
            session_id: id.to_string(),
        })
    }

    /// Gets a session by ID for mutation.
    pub fn get_mut(&mut self, id: &str) -> Result<&mut GameSession, SessionError> {
        self.sessions.get_mut(id).ok_or_else(|| SessionError::NotFound {
            session_id: id.to_string(),
        })
    }

    /// Removes a session. Removing an absent id is a no-op.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &str) -> Option<GameSession> {
        let removed = self.sessions.remove(id);
        let live = self.sessions.len();
        if removed.is_some() {
            info!(session_id = id, live, "Session removed");
        } else {
            debug!(session_id = id, "Session already gone");
        }
        removed
    }

    /// Ids of every session `connection` plays in.
    ///
    /// A connection sits in at most one session today; callers still handle
    /// any number.
    pub fn find_sessions_by_participant(&self, connection: ConnectionId) -> Vec<SessionId> {
        self.sessions
            .values()
            .filter(|s| s.participants().contains(connection))
            .map(|s| s.id().clone())
            .collect()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no session is live.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Lists all live session IDs.
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.keys().cloned().collect()
    }
}
