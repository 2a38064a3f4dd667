//! Table actor implementation with async message handling.

use super::{
    errors::{TableError, TableResult},
    events::{SubscriptionId, TableEvent},
    messages::{TableMessage, TableStateResponse},
    session::TableSession,
};
use crate::{
    constants::CHANNEL_CAPACITY,
    engine::BettingEngine,
    entities::{PlayerAction, TableId, Username},
};
use tokio::{
    sync::{mpsc, oneshot},
    time::{Duration, Instant, interval},
};

/// Longest gap between two turn clock checks
const MAX_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Table actor handle for sending messages
pub struct TableHandle<H, Err> {
    sender: mpsc::Sender<TableMessage<H, Err>>,
    table_id: TableId,
}

impl<H, Err> Clone for TableHandle<H, Err> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            table_id: self.table_id,
        }
    }
}

impl<H, Err> TableHandle<H, Err> {
    /// Create a new table handle
    pub fn new(sender: mpsc::Sender<TableMessage<H, Err>>, table_id: TableId) -> Self {
        Self { sender, table_id }
    }

    /// Get table ID
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Whether the actor has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Send a message to the table
    pub async fn send(&self, message: TableMessage<H, Err>) -> TableResult<(), Err> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TableError::TableClosed)
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> TableMessage<H, Err>,
    ) -> TableResult<T, Err> {
        let (response, rx) = oneshot::channel();
        self.send(message(response)).await?;
        rx.await.map_err(|_| TableError::TableClosed)
    }

    pub async fn add_member(&self, username: Username, handle: H) -> TableResult<(), Err> {
        self.request(|response| TableMessage::AddMember {
            username,
            handle,
            response,
        })
        .await?
    }

    pub async fn remove_member(&self, username: Username) -> TableResult<bool, Err> {
        self.request(|response| TableMessage::RemoveMember { username, response })
            .await
    }

    pub async fn add_player(&self, username: Username) -> TableResult<(), Err> {
        self.request(|response| TableMessage::AddPlayer { username, response })
            .await?
    }

    pub async fn player_action(
        &self,
        username: Username,
        action: PlayerAction,
    ) -> TableResult<(), Err> {
        self.request(|response| TableMessage::TakeAction {
            username,
            action,
            response,
        })
        .await?
    }

    pub async fn init_new_round(&self) -> TableResult<(), Err> {
        self.request(|response| TableMessage::InitNewRound { response })
            .await?
    }

    pub async fn state(&self) -> TableResult<TableStateResponse, Err> {
        self.request(|response| TableMessage::GetState { response })
            .await
    }

    /// Subscribe to table events
    ///
    /// # Returns
    ///
    /// * `(SubscriptionId, mpsc::Receiver<TableEvent>)` - Id for unsubscribing and the event stream
    pub async fn subscribe(&self) -> TableResult<(SubscriptionId, mpsc::Receiver<TableEvent>), Err> {
        let (sender, events) = mpsc::channel(CHANNEL_CAPACITY);
        let id = self
            .request(|response| TableMessage::Subscribe { sender, response })
            .await?;
        Ok((id, events))
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) -> TableResult<(), Err> {
        self.send(TableMessage::Unsubscribe { id }).await
    }

    /// Stop the actor. The session and every subscription are dropped.
    pub async fn close(&self) -> TableResult<(), Err> {
        self.request(|response| TableMessage::Close { response })
            .await
    }
}

/// Table actor owning a single [`TableSession`]
///
/// All access to the session goes through the actor's inbox, so a table is
/// only ever driven by one task. The actor also keeps the turn clock: a
/// player who holds the action longer than the table's
/// `max_time_per_turn` is folded.
pub struct TableActor<E: BettingEngine, H> {
    /// Table state
    session: TableSession<E, H>,

    /// Message inbox
    inbox: mpsc::Receiver<TableMessage<H, E::Error>>,

    /// Player holding the action and when they got it
    turn_clock: Option<(Username, Instant)>,

    /// Is table closed
    is_closed: bool,
}

impl<E: BettingEngine, H> TableActor<E, H> {
    /// Create a new table actor
    ///
    /// # Returns
    ///
    /// * `(TableActor, TableHandle)` - Actor and handle for sending messages
    pub fn new(session: TableSession<E, H>) -> (Self, TableHandle<H, E::Error>) {
        let (sender, inbox) = mpsc::channel(CHANNEL_CAPACITY);
        let handle = TableHandle::new(sender, session.id());

        let actor = Self {
            session,
            inbox,
            turn_clock: None,
            is_closed: false,
        };

        (actor, handle)
    }

    /// Run the table actor event loop
    ///
    /// Returns once the table is closed or every handle is dropped.
    pub async fn run(mut self) {
        let id = self.session.id();
        log::info!("Table {} '{}' starting", id, self.session.config().name);

        let tick_period = self.session.config().max_time_per_turn().min(MAX_TICK_PERIOD);
        let mut tick_interval = interval(tick_period);

        loop {
            tokio::select! {
                message = self.inbox.recv() => {
                    match message {
                        Some(message) => self.handle_message(message),
                        None => break,
                    }

                    if self.is_closed {
                        break;
                    }
                }

                _ = tick_interval.tick() => {
                    self.tick();
                }
            }
        }

        log::info!("Table {} '{}' closed", id, self.session.config().name);
    }

    /// Handle a table message
    fn handle_message(&mut self, message: TableMessage<H, E::Error>) {
        match message {
            TableMessage::AddMember {
                username,
                handle,
                response,
            } => {
                let result = self.session.add_member(username, handle);
                let _ = response.send(result);
            }

            TableMessage::RemoveMember { username, response } => {
                let removed = self.session.remove_member(&username).is_some();
                let _ = response.send(removed);
            }

            TableMessage::AddPlayer { username, response } => {
                let result = self.session.add_player(&username);
                let _ = response.send(result);
            }

            TableMessage::TakeAction {
                username,
                action,
                response,
            } => {
                let result = self.session.player_action(&username, action);
                if result.is_ok() {
                    self.turn_clock = None;
                }
                self.sync_turn_clock();
                let _ = response.send(result);
            }

            TableMessage::InitNewRound { response } => {
                let result = self.session.init_new_round();
                self.turn_clock = None;
                self.sync_turn_clock();
                let _ = response.send(result);
            }

            TableMessage::GetState { response } => {
                let _ = response.send(self.get_state());
            }

            TableMessage::Subscribe { sender, response } => {
                let id = self.session.subscribe(sender);
                let _ = response.send(id);
            }

            TableMessage::Unsubscribe { id } => {
                self.session.unsubscribe(id);
            }

            TableMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(());
            }
        }
    }

    /// Get current table state
    fn get_state(&self) -> TableStateResponse {
        let config = self.session.config();
        let engine = self.session.engine();

        let mut connected_players: Vec<Username> = self
            .session
            .members()
            .filter(|username| engine.seat_of(username).is_some())
            .cloned()
            .collect();
        connected_players.sort();

        TableStateResponse {
            table_id: self.session.id(),
            table_name: config.name.clone(),
            member_count: self.session.member_count(),
            player_count: self.session.player_count(),
            connected_players,
            max_players: config.max_players,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            buy_in: config.buy_in,
            current_player: self.session.current_player(),
        }
    }

    /// Restart the turn clock whenever the action moves to someone else
    fn sync_turn_clock(&mut self) {
        match self.session.current_player() {
            Some(current) => {
                let unchanged = matches!(&self.turn_clock, Some((holder, _)) if *holder == current);
                if !unchanged {
                    self.turn_clock = Some((current, Instant::now()));
                }
            }
            None => self.turn_clock = None,
        }
    }

    /// Fold the acting player if their time is up
    fn tick(&mut self) {
        self.sync_turn_clock();

        let limit = self.session.config().max_time_per_turn();
        let username = match &self.turn_clock {
            Some((username, started)) if started.elapsed() >= limit => username.clone(),
            _ => return,
        };

        log::warn!(
            "Table {}: {} took longer than {}ms to act, folding",
            self.session.id(),
            username,
            limit.as_millis()
        );
        if let Err(e) = self.session.player_action(&username, PlayerAction::Fold) {
            log::error!(
                "Table {}: failed to fold {} after timeout: {}",
                self.session.id(),
                username,
                e
            );
        }

        self.turn_clock = None;
        self.sync_turn_clock();
    }
}
