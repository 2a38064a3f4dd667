//! Wire tags for player actions.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::errors::ActionParseError;
use crate::entities::{PlayerAction, Usd};

/// Action tags as they arrive from clients.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Check,
    Fold,
    Bet,
    Call,
    AllIn,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Check,
        ActionKind::Fold,
        ActionKind::Bet,
        ActionKind::Call,
        ActionKind::AllIn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Check => "check",
            ActionKind::Fold => "fold",
            ActionKind::Bet => "bet",
            ActionKind::Call => "call",
            ActionKind::AllIn => "allIn",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ActionParseError::UnknownKind(s.to_string()))
    }
}

impl From<PlayerAction> for ActionKind {
    fn from(value: PlayerAction) -> Self {
        match value {
            PlayerAction::Check => Self::Check,
            PlayerAction::Fold => Self::Fold,
            PlayerAction::Bet(_) => Self::Bet,
            PlayerAction::Call => Self::Call,
            PlayerAction::AllIn => Self::AllIn,
        }
    }
}

impl PlayerAction {
    /// Build an action from a wire tag and an optional bet amount.
    ///
    /// The amount is only read for `bet`, where it is required.
    pub fn parse(kind: &str, amount: Option<Usd>) -> Result<Self, ActionParseError> {
        let action = match kind.parse::<ActionKind>()? {
            ActionKind::Check => Self::Check,
            ActionKind::Fold => Self::Fold,
            ActionKind::Bet => Self::Bet(amount.ok_or(ActionParseError::MissingAmount)?),
            ActionKind::Call => Self::Call,
            ActionKind::AllIn => Self::AllIn,
        };
        Ok(action)
    }

    pub fn kind(&self) -> ActionKind {
        (*self).into()
    }
}
