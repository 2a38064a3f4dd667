//! Table error types.

use thiserror::Error;

use crate::entities::Username;

/// Errors surfaced by table sessions and their actors.
///
/// `E` is the engine's own error type. Engine failures pass through
/// transparently, keeping the engine's message and source chain.
#[derive(Debug, Error)]
pub enum TableError<E> {
    /// Username already registered as a member
    #[error("member {0} already exists")]
    DuplicateMember(Username),

    /// Seating requested for a username that never joined
    #[error("{0} must be added as a member before taking a seat")]
    NotAMember(Username),

    /// Every seat is taken
    #[error("table is full ({max_players} players max)")]
    TableFull { max_players: usize },

    /// Action tag outside the supported set
    #[error(transparent)]
    InvalidAction(#[from] ActionParseError),

    /// No seated player goes by this username
    #[error("player {0} not found")]
    PlayerNotFound(Username),

    /// The table actor has shut down
    #[error("table is closed")]
    TableClosed,

    #[error(transparent)]
    Engine(E),
}

/// Result type for table operations
pub type TableResult<T, E> = Result<T, TableError<E>>;

/// Errors from turning a wire tag into a [`crate::entities::PlayerAction`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ActionParseError {
    #[error("unknown action `{0}`")]
    UnknownKind(String),

    #[error("a bet requires an amount")]
    MissingAmount,
}

/// Configuration error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}
