//! Gridlock server library - matchmaking and refereeing for 5x5 four-in-a-row
//!
//! # Architecture
//!
//! - **Registry**: owns every live [`GameSession`]
//! - **Matchmaker**: the single-seat waiting room that pairs connections
//! - **Session**: per-game turn engine returning a tagged [`MoveResult`]
//! - **Lobby**: registry and matchmaker together, mapping events to [`Envelope`]s
//! - **Gateway**: serializes all events through one lock and delivers envelopes
//! - **Transport**: axum WebSocket endpoint speaking the JSON [`protocol`]
//!
//! # Example
//!
//! ```
//! use gridlock_server::{ConnectionId, Lobby, ServerEvent};
//!
//! let mut lobby = Lobby::default();
//! let first = lobby.connect(ConnectionId::new(1));
//! assert!(matches!(first[0].event, ServerEvent::Waiting { .. }));
//!
//! let started = lobby.connect(ConnectionId::new(2));
//! assert_eq!(started.len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod connection;
mod error;
mod gateway;
mod lobby;
mod matchmaker;
mod registry;
mod session;
mod telemetry;
mod transport;

pub mod protocol;

// Crate-level exports - Configuration
pub use cli::Cli;
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, ServerConfig};

// Crate-level exports - Identifiers and errors
pub use connection::{ConnectionId, ConnectionIds, SessionId};
pub use error::SessionError;

// Crate-level exports - Game flow
pub use gateway::{Gateway, GatewayStats, Outbox};
pub use lobby::{DEFAULT_WAITING_MESSAGE, Lobby};
pub use matchmaker::{Matchmaker, Pairing};
pub use protocol::{ClientEvent, Envelope, ServerEvent, Winner};
pub use registry::SessionRegistry;
pub use session::{AppliedMove, GameSession, MoveResult, Outcome, Participants};

// Crate-level exports - Runtime
pub use telemetry::{DEFAULT_FILTER, init_tracing};
pub use transport::router;

// Crate-level exports - Board types
pub use gridlock_board::{BOARD_SIZE, Board, Cell, Player, WIN_LENGTH};
