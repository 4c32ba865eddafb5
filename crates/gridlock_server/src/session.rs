//! Game session and turn engine.

use crate::connection::{ConnectionId, SessionId};
use crate::error::SessionError;
use derive_getters::Getters;
use gridlock_board::{Board, Player, invariants, rules};
use tracing::{debug, info, instrument};

/// The two connections playing a session, keyed by role.
///
/// Fixed when the session is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participants {
    /// Connection playing X.
    pub x: ConnectionId,
    /// Connection playing O.
    pub o: ConnectionId,
}

impl Participants {
    /// Role held by `connection`, if it plays in this session.
    pub fn role_of(&self, connection: ConnectionId) -> Option<Player> {
        if connection == self.x {
            Some(Player::X)
        } else if connection == self.o {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Connection holding `role`.
    pub fn connection(&self, role: Player) -> ConnectionId {
        match role {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// The opponent of `connection`, if it plays in this session.
    pub fn opponent_of(&self, connection: ConnectionId) -> Option<ConnectionId> {
        self.role_of(connection)
            .map(|role| self.connection(role.opponent()))
    }

    /// Returns true if `connection` plays in this session.
    pub fn contains(&self, connection: ConnectionId) -> bool {
        self.role_of(connection).is_some()
    }

    /// Both connections, X first.
    pub fn both(&self) -> [ConnectionId; 2] {
        [self.x, self.o]
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Game goes on with `next` to move.
    Continue {
        /// Role that moves next.
        next: Player,
    },
    /// The mover completed a line.
    Win(Player),
    /// The board filled up without a line.
    Tie,
}

impl Outcome {
    /// Returns true for win and tie.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continue { .. })
    }
}

/// A move that changed the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    /// Role that moved.
    pub player: Player,
    /// Row of the placed mark.
    pub row: usize,
    /// Column of the placed mark.
    pub col: usize,
    /// What the move decided.
    pub outcome: Outcome,
    /// Board after the move.
    pub board: Board,
}

/// Tagged result of [`GameSession::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// The move was dropped; the session is unchanged.
    Ignored(SessionError),
    /// The move was placed.
    Applied(AppliedMove),
}

/// One game in progress.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    /// Session ID.
    id: SessionId,
    /// The board, exclusively owned by this session.
    board: Board,
    /// Role to move.
    turn: Player,
    /// Who plays which role.
    participants: Participants,
}

impl GameSession {
    /// Creates a session with an empty board and X to move.
    #[instrument]
    pub fn new(id: SessionId, x: ConnectionId, o: ConnectionId) -> Self {
        info!(session_id = %id, %x, %o, "Creating new game session");
        Self {
            id,
            board: Board::standard(),
            turn: Player::X,
            participants: Participants { x, o },
        }
    }

    /// Applies a move sent by `connection`.
    ///
    /// The mover's role comes from the participant table, never from the
    /// client. Anything illegal comes back as [`MoveResult::Ignored`] with the
    /// session untouched.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn apply_move(&mut self, connection: ConnectionId, row: i64, col: i64) -> MoveResult {
        let Some(role) = self.participants.role_of(connection) else {
            return MoveResult::Ignored(SessionError::NotParticipant {
                connection,
                session_id: self.id.clone(),
            });
        };

        if role != self.turn {
            debug!(%role, turn = %self.turn, "Move out of turn");
            return MoveResult::Ignored(SessionError::NotYourTurn { role });
        }

        let (Ok(r), Ok(c)) = (usize::try_from(row), usize::try_from(col)) else {
            return MoveResult::Ignored(SessionError::InvalidMove { row, col });
        };

        let before = cfg!(debug_assertions).then(|| self.board.clone());

        if let Err(e) = self.board.place(r, c, role) {
            debug!(error = %e, "Placement rejected");
            return MoveResult::Ignored(SessionError::InvalidMove { row, col });
        }

        debug_assert!(
            before
                .as_ref()
                .is_none_or(|b| invariants::is_monotonic(b, &self.board)),
            "board lost a mark"
        );
        debug_assert!(
            invariants::check_board(&self.board).is_ok(),
            "board invariants violated after move"
        );

        let outcome = if rules::check_win(&self.board, r, c, role) {
            Outcome::Win(role)
        } else if rules::is_full(&self.board) {
            Outcome::Tie
        } else {
            self.turn = role.opponent();
            Outcome::Continue { next: self.turn }
        };

        info!(%role, row = r, col = c, ?outcome, "Move applied");
        debug!(board = %self.board.render(), "Board after move");

        MoveResult::Applied(AppliedMove {
            player: role,
            row: r,
            col: c,
            outcome,
            board: self.board.clone(),
        })
    }
}
