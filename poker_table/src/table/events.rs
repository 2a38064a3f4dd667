//! Table events and the subscribers that receive them.

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};
use tokio::sync::mpsc;

use crate::entities::{LastAction, Username};

/// Notification published by a table whenever its engine reports progress.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TableEvent {
    /// A new hand was dealt.
    NewRound,
    /// Action moved to `current_player`; `last_action` is what the
    /// previous player did.
    Turn {
        current_player: Option<Username>,
        last_action: Option<LastAction>,
    },
    /// Community cards were revealed.
    Deal,
    /// The hand concluded and pots were settled.
    GameOver,
}

impl fmt::Display for TableEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewRound => write!(f, "new round dealt"),
            Self::Turn {
                current_player,
                last_action,
            } => {
                match current_player {
                    Some(username) => write!(f, "{username}'s turn")?,
                    None => write!(f, "turn ended")?,
                }
                if let Some(last_action) = last_action {
                    write!(f, " (last: {last_action})")?;
                }
                Ok(())
            }
            Self::Deal => write!(f, "community cards dealt"),
            Self::GameOver => write!(f, "game over"),
        }
    }
}

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Registry of channels receiving [`TableEvent`]s.
///
/// Dropping the registry drops every sender, which ends each
/// subscriber's stream.
#[derive(Debug, Default)]
pub struct Subscribers {
    next_id: u64,
    senders: HashMap<SubscriptionId, mpsc::Sender<TableEvent>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, sender: mpsc::Sender<TableEvent>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.senders.insert(id, sender);
        id
    }

    /// Returns whether `id` was subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.senders.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Send `event` to every subscriber without blocking.
    ///
    /// A full channel loses this event but keeps its subscription. A closed
    /// channel is unsubscribed.
    pub fn publish(&mut self, event: &TableEvent) {
        self.senders.retain(|id, sender| {
            match sender.try_send(event.clone()) {
                Ok(_) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("Subscriber {} channel full, dropping {}", id, event);
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {} disconnected, removing", id);
                    false
                }
            }
        });
    }
}
