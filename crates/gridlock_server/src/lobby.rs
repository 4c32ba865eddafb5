//! Lobby: the owned state behind the gateway.
//!
//! Turns connect, move and disconnect events into addressed outbound events.
//! Nothing here touches a socket, so the whole game flow is testable without
//! a transport.

use crate::connection::ConnectionId;
use crate::matchmaker::{Matchmaker, Pairing};
use crate::protocol::{ClientEvent, Envelope, ServerEvent, Winner};
use crate::registry::SessionRegistry;
use crate::session::{MoveResult, Outcome};
use gridlock_board::Player;
use tracing::{debug, info, instrument};

/// Message sent to a client parked in the pending slot.
pub const DEFAULT_WAITING_MESSAGE: &str = "Waiting for an opponent...";

/// Session registry and pending slot, owned together.
#[derive(Debug)]
pub struct Lobby {
    registry: SessionRegistry,
    matchmaker: Matchmaker,
    waiting_message: String,
}

impl Lobby {
    /// Creates an empty lobby.
    pub fn new(waiting_message: impl Into<String>) -> Self {
        Self {
            registry: SessionRegistry::new(),
            matchmaker: Matchmaker::new(),
            waiting_message: waiting_message.into(),
        }
    }

    /// Live sessions.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Connection waiting for an opponent, if any.
    pub fn pending(&self) -> Option<ConnectionId> {
        self.matchmaker.pending()
    }

    /// Handles a new connection.
    #[instrument(skip(self))]
    pub fn connect(&mut self, connection: ConnectionId) -> Vec<Envelope> {
        match self.matchmaker.on_connect(connection, &mut self.registry) {
            Pairing::Waiting => vec![Envelope::new(
                connection,
                ServerEvent::Waiting {
                    message: self.waiting_message.clone(),
                },
            )],
            Pairing::Paired { session_id, x, o } => vec![
                Envelope::new(
                    x,
                    ServerEvent::GameStart {
                        session_id: session_id.clone(),
                        role: Player::X,
                    },
                ),
                Envelope::new(
                    o,
                    ServerEvent::GameStart {
                        session_id,
                        role: Player::O,
                    },
                ),
            ],
        }
    }

    /// Handles an inbound client event.
    pub fn handle(&mut self, connection: ConnectionId, event: ClientEvent) -> Vec<Envelope> {
        match event {
            ClientEvent::MakeMove {
                session_id,
                row,
                col,
            } => self.make_move(connection, &session_id, row, col),
        }
    }

    /// Applies a move and reports the result to both participants.
    ///
    /// Unknown sessions and illegal moves produce no events.
    #[instrument(skip(self))]
    pub fn make_move(
        &mut self,
        connection: ConnectionId,
        session_id: &str,
        row: i64,
        col: i64,
    ) -> Vec<Envelope> {
        let session = match self.registry.get_mut(session_id) {
            Ok(session) => session,
            Err(e) => {
                debug!(error = %e, "Move ignored");
                return Vec::new();
            }
        };

        let applied = match session.apply_move(connection, row, col) {
            MoveResult::Applied(applied) => applied,
            MoveResult::Ignored(e) => {
                debug!(error = %e, "Move ignored");
                return Vec::new();
            }
        };

        let participants = *session.participants();
        let event = match applied.outcome {
            Outcome::Continue { next } => ServerEvent::UpdateBoard {
                board: applied.board,
                current_player: next,
            },
            Outcome::Win(player) => ServerEvent::GameOver {
                winner: Winner::from(player),
            },
            Outcome::Tie => ServerEvent::GameOver {
                winner: Winner::Tie,
            },
        };

        if applied.outcome.is_terminal() {
            info!(session_id, outcome = ?applied.outcome, "Game finished");
            self.registry.remove(session_id);
        }

        participants
            .both()
            .into_iter()
            .map(|to| Envelope::new(to, event.clone()))
            .collect()
    }

    /// Cleans up after a connection leaves.
    ///
    /// Empties the pending slot if it held `connection`, then tears down every
    /// session it played in, telling the opponent.
    #[instrument(skip(self))]
    pub fn disconnect(&mut self, connection: ConnectionId) -> Vec<Envelope> {
        self.matchmaker.on_disconnect_while_pending(connection);

        let mut envelopes = Vec::new();
        for session_id in self.registry.find_sessions_by_participant(connection) {
            if let Some(session) = self.registry.remove(&session_id)
                && let Some(opponent) = session.participants().opponent_of(connection)
            {
                info!(%session_id, %opponent, "Notifying opponent of disconnect");
                envelopes.push(Envelope::new(
                    opponent,
                    ServerEvent::OpponentDisconnected {},
                ));
            }
        }
        envelopes
    }
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new(DEFAULT_WAITING_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(raw: u64) -> ConnectionId {
        ConnectionId::new(raw)
    }

    fn paired_lobby() -> (Lobby, String) {
        let mut lobby = Lobby::default();
        lobby.connect(conn(1));
        let envelopes = lobby.connect(conn(2));
        let session_id = match &envelopes[0].event {
            ServerEvent::GameStart { session_id, .. } => session_id.clone(),
            other => panic!("Expected gameStart, got {other:?}"),
        };
        (lobby, session_id)
    }

    #[test]
    fn test_first_connect_gets_waiting() {
        let mut lobby = Lobby::new("hold on");
        let envelopes = lobby.connect(conn(1));
        assert_eq!(
            envelopes,
            vec![Envelope::new(
                conn(1),
                ServerEvent::Waiting {
                    message: "hold on".to_string()
                }
            )]
        );
        assert_eq!(lobby.pending(), Some(conn(1)));
    }

    #[test]
    fn test_second_connect_starts_game_for_both() {
        let mut lobby = Lobby::default();
        lobby.connect(conn(1));
        let envelopes = lobby.connect(conn(2));

        assert_eq!(
            envelopes,
            vec![
                Envelope::new(
                    conn(1),
                    ServerEvent::GameStart {
                        session_id: "1-2".to_string(),
                        role: Player::X
                    }
                ),
                Envelope::new(
                    conn(2),
                    ServerEvent::GameStart {
                        session_id: "1-2".to_string(),
                        role: Player::O
                    }
                ),
            ]
        );
        assert_eq!(lobby.pending(), None);
    }

    #[test]
    fn test_move_broadcasts_update() {
        let (mut lobby, id) = paired_lobby();
        let envelopes = lobby.make_move(conn(1), &id, 2, 2);

        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].to, conn(1));
        assert_eq!(envelopes[1].to, conn(2));
        match &envelopes[0].event {
            ServerEvent::UpdateBoard {
                board,
                current_player,
            } => {
                assert_eq!(*current_player, Player::O);
                assert_eq!(
                    board.get(2, 2),
                    Some(gridlock_board::Cell::Occupied(Player::X))
                );
            }
            other => panic!("Expected updateBoard, got {other:?}"),
        }
        assert_eq!(envelopes[0].event, envelopes[1].event);
    }

    #[test]
    fn test_illegal_moves_emit_nothing() {
        let (mut lobby, id) = paired_lobby();

        // O out of turn
        assert!(lobby.make_move(conn(2), &id, 0, 0).is_empty());
        // stranger
        assert!(lobby.make_move(conn(9), &id, 0, 0).is_empty());
        // unknown session
        assert!(lobby.make_move(conn(1), "9-9", 0, 0).is_empty());
        // off the board
        assert!(lobby.make_move(conn(1), &id, 5, 5).is_empty());

        lobby.make_move(conn(1), &id, 2, 2);
        // occupied
        assert!(lobby.make_move(conn(2), &id, 2, 2).is_empty());
        assert_eq!(
            *lobby.registry().get(&id).expect("Live session").turn(),
            Player::O
        );
    }

    #[test]
    fn test_win_broadcasts_game_over_and_removes_session() {
        let (mut lobby, id) = paired_lobby();
        for col in 0..3 {
            lobby.make_move(conn(1), &id, 1, col);
            lobby.make_move(conn(2), &id, 3, col);
        }
        let envelopes = lobby.make_move(conn(1), &id, 1, 3);

        let expected = ServerEvent::GameOver { winner: Winner::X };
        assert_eq!(
            envelopes,
            vec![
                Envelope::new(conn(1), expected.clone()),
                Envelope::new(conn(2), expected),
            ]
        );
        assert!(lobby.registry().is_empty());
        assert!(lobby.make_move(conn(2), &id, 4, 4).is_empty());
    }

    #[test]
    fn test_tie_broadcasts_game_over_and_removes_session() {
        let (mut lobby, id) = paired_lobby();

        // Column pairs alternate by row, so no four-line forms:
        //   X X O O X
        //   O O X X O
        //   ...
        let mark = |row: i64, col: i64| (col / 2 + row) % 2 == 0;
        let cells: Vec<(i64, i64)> = (0..5).flat_map(|r| (0..5).map(move |c| (r, c))).collect();
        let (xs, os): (Vec<_>, Vec<_>) = cells.into_iter().partition(|&(r, c)| mark(r, c));
        assert_eq!((xs.len(), os.len()), (13, 12));

        let mut last = Vec::new();
        for i in 0..25 {
            let (mover, (row, col)) = if i % 2 == 0 {
                (conn(1), xs[i / 2])
            } else {
                (conn(2), os[i / 2])
            };
            last = lobby.make_move(mover, &id, row, col);
            assert_eq!(last.len(), 2, "move {i} at ({row}, {col}) was dropped");
            if i < 24 {
                assert!(matches!(last[0].event, ServerEvent::UpdateBoard { .. }));
            }
        }

        let expected = ServerEvent::GameOver {
            winner: Winner::Tie,
        };
        assert_eq!(
            last,
            vec![
                Envelope::new(conn(1), expected.clone()),
                Envelope::new(conn(2), expected),
            ]
        );
        assert!(lobby.registry().is_empty());
        assert!(lobby.make_move(conn(2), &id, 0, 0).is_empty());
    }

    #[test]
    fn test_disconnect_while_waiting_frees_slot() {
        let mut lobby = Lobby::default();
        lobby.connect(conn(1));

        assert!(lobby.disconnect(conn(1)).is_empty());
        assert_eq!(lobby.pending(), None);

        let envelopes = lobby.connect(conn(3));
        assert!(matches!(envelopes[0].event, ServerEvent::Waiting { .. }));
        assert_eq!(lobby.pending(), Some(conn(3)));
    }

    #[test]
    fn test_disconnect_in_game_notifies_opponent() {
        let (mut lobby, id) = paired_lobby();
        let envelopes = lobby.disconnect(conn(2));

        assert_eq!(
            envelopes,
            vec![Envelope::new(conn(1), ServerEvent::OpponentDisconnected {})]
        );
        assert!(lobby.registry().get(&id).is_err());
    }

    #[test]
    fn test_disconnect_of_stranger_is_noop() {
        let (mut lobby, _) = paired_lobby();
        assert!(lobby.disconnect(conn(42)).is_empty());
        assert_eq!(lobby.registry().len(), 1);
    }
}
