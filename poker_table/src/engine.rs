//! Contract between a table session and the betting engine it drives.
//!
//! The engine owns every poker rule: seat order, blinds, dealing, betting
//! legality, pots, and showdown. A session only seats players, forwards
//! their actions, starts rounds, and reads back the events the engine
//! queued while doing so.

use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt};

use super::entities::{LastAction, SeatIndex, Usd, Username};

/// Parameters an engine is built with.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EngineSettings {
    pub small_blind: Usd,
    pub big_blind: Usd,
    pub min_players: usize,
    pub max_players: usize,
}

/// Notifications an engine queues while it advances a hand.
///
/// Payloads are captured when the event is queued, so a single call that
/// moves the action several times yields one accurate `Turn` per move.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum EngineEvent {
    /// Blinds posted and hole cards dealt.
    NewRound,
    /// Action moved to `current_player`; `last_action` is what the player
    /// before them did.
    Turn {
        current_player: Option<Username>,
        last_action: Option<LastAction>,
    },
    /// Community cards revealed.
    Deal,
    /// Winners determined and pots settled.
    GameOver,
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::NewRound => "newRound",
            Self::Turn { .. } => "turn",
            Self::Deal => "deal",
            Self::GameOver => "gameOver",
        };
        write!(f, "{repr}")
    }
}

/// A betting engine a [`crate::table::TableSession`] delegates to.
///
/// Action methods take the seat returned by [`BettingEngine::seat_of`].
/// Any legality check (turn order, minimum raise, stack size) belongs to
/// the engine and surfaces through [`BettingEngine::Error`], which the
/// session hands back to its caller untouched.
pub trait BettingEngine {
    type Error: std::error::Error + Send + Sync + 'static;

    fn from_settings(settings: EngineSettings) -> Self
    where
        Self: Sized;

    /// Seat a player with a starting stack of `buy_in`.
    fn add_player(&mut self, name: &Username, buy_in: Usd) -> Result<(), Self::Error>;

    /// Number of players currently seated.
    fn player_count(&self) -> usize;

    fn seat_of(&self, name: &Username) -> Option<SeatIndex>;

    fn check(&mut self, seat: SeatIndex) -> Result<(), Self::Error>;
    fn fold(&mut self, seat: SeatIndex) -> Result<(), Self::Error>;
    fn bet(&mut self, seat: SeatIndex, amount: Usd) -> Result<(), Self::Error>;
    fn call(&mut self, seat: SeatIndex) -> Result<(), Self::Error>;
    fn all_in(&mut self, seat: SeatIndex) -> Result<(), Self::Error>;

    /// Post blinds, reset the deck, and deal the next hand.
    fn init_new_round(&mut self) -> Result<(), Self::Error>;

    /// Action taken by the player who acted before the current one.
    fn previous_player_action(&self) -> Option<LastAction>;

    /// Player whose turn it is, if a hand is in progress.
    fn current_player(&self) -> Option<Username>;

    /// Take every event queued since the last drain, oldest first.
    fn drain_events(&mut self) -> VecDeque<EngineEvent>;

    /// `Turn` event for the engine's state right now. Engines queue this
    /// at the moment the action moves.
    fn turn_event(&self) -> EngineEvent {
        EngineEvent::Turn {
            current_player: self.current_player(),
            last_action: self.previous_player_action(),
        }
    }
}
