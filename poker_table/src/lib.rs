//! # Poker Table
//!
//! Table sessions for multiplayer Texas Hold'em, layered over an external
//! betting engine.
//!
//! The crate owns everything around a hand but nothing inside it: who is
//! connected to a table, who may take a seat, how player actions reach the
//! engine, and how engine progress is reported back. Dealing, betting
//! rules, pots, and showdown belong to whichever [`BettingEngine`] the table
//! is built with.
//!
//! ## Core Modules
//!
//! - [`engine`]: the [`BettingEngine`] contract and the events it reports
//! - [`table`]: table sessions, the table actor, configuration, and errors
//! - [`entities`]: usernames, table ids, and player actions
//!
//! ## Example
//!
//! ```ignore
//! use poker_table::{TableSession, entities::{PlayerAction, Username}};
//!
//! let mut table: TableSession<MyEngine, ConnectionId> = TableSession::new(1000);
//! table.add_member(Username::new("alice"), alice_conn)?;
//! table.add_member(Username::new("bob"), bob_conn)?;
//! table.add_player(&Username::new("alice"))?;
//! table.add_player(&Username::new("bob"))?;
//! table.init_new_round()?;
//! table.player_action(&Username::new("alice"), PlayerAction::Check)?;
//! ```

pub mod constants;
pub mod engine;
pub mod entities;

/// Table sessions, actors, configuration, and errors.
pub mod table;

pub use engine::{BettingEngine, EngineEvent, EngineSettings};
pub use entities::{LastAction, PlayerAction, TableId, Usd, Username};
pub use table::{
    TableActor, TableConfig, TableError, TableEvent, TableHandle, TableResult, TableSession,
};
