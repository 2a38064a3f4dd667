//! Table module: one poker table in front of an external betting engine.
//!
//! This module implements:
//! - TableSession: membership directory, seating, action forwarding, and
//!   the adapter turning engine events into [`TableEvent`]s
//! - TableActor: async actor owning a session, with a per-turn clock
//! - Message-based communication with tokio channels
//! - Table configuration and validation
//!
//! ## Architecture
//!
//! A [`TableSession`] is plain synchronous state with a single owner. To
//! share a table between tasks, move the session into a [`TableActor`],
//! spawn [`TableActor::run`], and talk to it through cloned
//! [`TableHandle`]s.
//!
//! ## Example
//!
//! ```ignore
//! use poker_table::table::{TableActor, TableSession};
//! use poker_table::entities::{PlayerAction, Username};
//!
//! #[tokio::main]
//! async fn main() {
//!     // `MyEngine` implements `poker_table::BettingEngine`
//!     let session: TableSession<MyEngine, ConnectionId> = TableSession::new(1000);
//!     let (actor, handle) = TableActor::new(session);
//!     tokio::spawn(actor.run());
//!
//!     handle.add_member(Username::new("alice"), alice_conn).await?;
//!     handle.add_player(Username::new("alice")).await?;
//!     handle.player_action(Username::new("alice"), PlayerAction::Check).await?;
//! }
//! ```

pub mod actions;
pub mod actor;
pub mod config;
pub mod errors;
pub mod events;
pub mod messages;
pub mod session;

pub use actions::ActionKind;
pub use actor::{TableActor, TableHandle};
pub use config::TableConfig;
pub use errors::{ActionParseError, ConfigError, TableError, TableResult};
pub use events::{SubscriptionId, Subscribers, TableEvent};
pub use messages::{TableMessage, TableStateResponse};
pub use session::TableSession;
