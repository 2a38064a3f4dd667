//! Table actor message types.

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use super::{
    errors::TableResult,
    events::{SubscriptionId, TableEvent},
};
use crate::entities::{PlayerAction, TableId, Usd, Username};

/// Messages that can be sent to a [`super::TableActor`]
///
/// `H` is the member connection handle type and `Err` the engine error type.
#[derive(Debug)]
pub enum TableMessage<H, Err> {
    /// Register a connected user
    AddMember {
        username: Username,
        handle: H,
        response: oneshot::Sender<TableResult<(), Err>>,
    },

    /// Forget a member's connection; answers whether they were a member
    RemoveMember {
        username: Username,
        response: oneshot::Sender<bool>,
    },

    /// Seat a member
    AddPlayer {
        username: Username,
        response: oneshot::Sender<TableResult<(), Err>>,
    },

    /// Player action (check, fold, bet, call, all-in)
    TakeAction {
        username: Username,
        action: PlayerAction,
        response: oneshot::Sender<TableResult<(), Err>>,
    },

    /// Deal the next hand
    InitNewRound {
        response: oneshot::Sender<TableResult<(), Err>>,
    },

    /// Get current table state
    GetState {
        response: oneshot::Sender<TableStateResponse>,
    },

    /// Subscribe to table events
    Subscribe {
        sender: mpsc::Sender<TableEvent>,
        response: oneshot::Sender<SubscriptionId>,
    },

    /// Unsubscribe from table events
    Unsubscribe { id: SubscriptionId },

    /// Close table
    Close { response: oneshot::Sender<()> },
}

/// Table state response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStateResponse {
    /// Table ID
    pub table_id: TableId,

    /// Table name
    pub table_name: String,

    /// Connected members
    pub member_count: usize,

    /// Seated player count, as reported by the engine. Includes players
    /// whose connection was removed.
    pub player_count: usize,

    /// Connected members currently holding a seat, sorted by name. Shorter
    /// than `player_count` while a seated player has no connection.
    pub connected_players: Vec<Username>,

    /// Maximum players
    pub max_players: usize,

    /// Small blind
    pub small_blind: Usd,

    /// Big blind
    pub big_blind: Usd,

    /// Buy-in per seat
    pub buy_in: Usd,

    /// Player to act, if a hand is running
    pub current_player: Option<Username>,
}

impl TableStateResponse {
    pub fn is_full(&self) -> bool {
        self.player_count >= self.max_players
    }
}
