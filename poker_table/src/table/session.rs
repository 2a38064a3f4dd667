//! Table session: membership, seating, and action forwarding for one table.

use std::collections::HashMap;
use tokio::sync::mpsc;

use super::{
    config::TableConfig,
    errors::{ConfigError, TableError, TableResult},
    events::{Subscribers, SubscriptionId, TableEvent},
};
use crate::{
    engine::{BettingEngine, EngineEvent},
    entities::{PlayerAction, TableId, Usd, Username},
};

/// One poker table in front of a [`BettingEngine`].
///
/// `H` is whatever the caller uses to reach a member (a socket, a channel
/// sender, a session token). The session stores it and hands it back but
/// never uses it.
pub struct TableSession<E, H> {
    /// Table ID
    id: TableId,

    /// Table configuration
    config: TableConfig,

    /// Username to connection handle mapping
    members: HashMap<Username, H>,

    /// Engine owning seats, stacks, and hand progression
    engine: E,

    /// Channels receiving table events
    subscribers: Subscribers,
}

impl<E: BettingEngine, H> TableSession<E, H> {
    /// Create a table with default blinds and player bounds and the given
    /// buy-in.
    pub fn new(buy_in: Usd) -> Self {
        Self::build(TableConfig::with_buy_in(buy_in))
    }

    /// Create a table from a full configuration
    ///
    /// # Errors
    ///
    /// Returns error if `config` fails validation
    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: TableConfig) -> Self {
        let engine = E::from_settings(config.engine_settings());
        let session = Self {
            id: TableId::new(),
            config,
            members: HashMap::new(),
            engine,
            subscribers: Subscribers::new(),
        };
        log::info!(
            "Table {} '{}' created (blinds ${}/{}, buy-in ${})",
            session.id,
            session.config.name,
            session.config.small_blind,
            session.config.big_blind,
            session.config.buy_in
        );
        session
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Read-only access to the engine, e.g. for seat or stack queries
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn has_member(&self, username: &Username) -> bool {
        self.members.contains_key(username)
    }

    pub fn member(&self, username: &Username) -> Option<&H> {
        self.members.get(username)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn members(&self) -> impl Iterator<Item = &Username> {
        self.members.keys()
    }

    /// Register a connected user under `username`
    ///
    /// Names are compared after [`Username`] sanitizing, so `"big fish"`
    /// and `"big_fish"` are the same member, as are names that only differ
    /// past the length limit. The second of such a pair gets
    /// [`TableError::DuplicateMember`].
    pub fn add_member(&mut self, username: Username, handle: H) -> TableResult<(), E::Error> {
        if self.has_member(&username) {
            return Err(TableError::DuplicateMember(username));
        }
        log::info!("Table {}: {} joined", self.id, username);
        self.members.insert(username, handle);
        Ok(())
    }

    /// Forget a member's connection. Their seat, if any, stays with the
    /// engine.
    pub fn remove_member(&mut self, username: &Username) -> Option<H> {
        let handle = self.members.remove(username);
        if handle.is_some() {
            log::info!("Table {}: {} left", self.id, username);
        }
        handle
    }

    /// Seat a member with the table's buy-in
    pub fn add_player(&mut self, username: &Username) -> TableResult<(), E::Error> {
        if !self.has_member(username) {
            return Err(TableError::NotAMember(username.clone()));
        }

        let max_players = self.config.max_players;
        if self.engine.player_count() >= max_players {
            return Err(TableError::TableFull { max_players });
        }

        let buy_in = self.config.buy_in;
        self.delegate(|engine| engine.add_player(username, buy_in))?;
        log::info!(
            "Table {}: {} seated with ${} ({}/{})",
            self.id,
            username,
            buy_in,
            self.engine.player_count(),
            max_players
        );
        Ok(())
    }

    pub fn player_count(&self) -> usize {
        self.engine.player_count()
    }

    /// Forward `action` to the engine for the player seated as `username`
    ///
    /// Whether the action is legal right now is for the engine to decide.
    pub fn player_action(
        &mut self,
        username: &Username,
        action: PlayerAction,
    ) -> TableResult<(), E::Error> {
        let seat = self
            .engine
            .seat_of(username)
            .ok_or_else(|| TableError::PlayerNotFound(username.clone()))?;

        log::debug!("Table {}: {} {}", self.id, username, action);
        self.delegate(|engine| match action {
            PlayerAction::Check => engine.check(seat),
            PlayerAction::Fold => engine.fold(seat),
            PlayerAction::Bet(amount) => engine.bet(seat, amount),
            PlayerAction::Call => engine.call(seat),
            PlayerAction::AllIn => engine.all_in(seat),
        })
    }

    /// Forward an action given as a wire tag (`check`, `fold`, `bet`,
    /// `call`, `allIn`) and an optional bet amount
    pub fn dispatch(
        &mut self,
        username: &Username,
        kind: &str,
        amount: Option<Usd>,
    ) -> TableResult<(), E::Error> {
        let action = PlayerAction::parse(kind, amount)?;
        self.player_action(username, action)
    }

    /// Ask the engine to deal the next hand
    pub fn init_new_round(&mut self) -> TableResult<(), E::Error> {
        self.delegate(|engine| engine.init_new_round())
    }

    pub fn current_player(&self) -> Option<Username> {
        self.engine.current_player()
    }

    /// Receive every [`TableEvent`] this table publishes from now on
    pub fn subscribe(&mut self, sender: mpsc::Sender<TableEvent>) -> SubscriptionId {
        let id = self.subscribers.subscribe(sender);
        log::debug!("Table {}: subscriber {} added", self.id, id);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.unsubscribe(id);
        if removed {
            log::debug!("Table {}: subscriber {} removed", self.id, id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Run an engine call, then publish whatever it queued, even when the
    /// call itself failed.
    fn delegate<T>(
        &mut self,
        call: impl FnOnce(&mut E) -> Result<T, E::Error>,
    ) -> TableResult<T, E::Error> {
        let result = call(&mut self.engine).map_err(TableError::Engine);
        self.publish_engine_events();
        result
    }

    fn publish_engine_events(&mut self) {
        for event in self.engine.drain_events() {
            let event = match event {
                EngineEvent::NewRound => TableEvent::NewRound,
                EngineEvent::Turn {
                    current_player,
                    last_action,
                } => TableEvent::Turn {
                    current_player,
                    last_action,
                },
                EngineEvent::Deal => TableEvent::Deal,
                EngineEvent::GameOver => TableEvent::GameOver,
            };
            log::info!("Table {}: {}", self.id, event);
            self.subscribers.publish(&event);
        }
    }
}
