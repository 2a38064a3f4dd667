//! Scripted betting engine shared by the integration tests.
//!
//! Enforces turn order and stack sizes, walks through four betting streets,
//! and ends the hand when one player is left or the river is checked
//! through. It keeps no pot and ranks no hands.
#![allow(dead_code)]

use std::collections::VecDeque;

use poker_table::{
    BettingEngine, EngineEvent, EngineSettings, LastAction, PlayerAction, Usd, Username,
    entities::SeatIndex,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptedError {
    #[error("{0} is already seated")]
    AlreadySeated(Username),
    #[error("need {0}+ players")]
    NotEnoughPlayers(usize),
    #[error("no hand in progress")]
    NoHandInProgress,
    #[error("not your turn")]
    OutOfTurn,
    #[error("need ${needed}, have ${stack}")]
    InsufficientChips { needed: Usd, stack: Usd },
}

#[derive(Debug, Clone)]
pub struct Seat {
    pub name: Username,
    pub stack: Usd,
    pub folded: bool,
    pub acted: bool,
}

#[derive(Debug)]
pub struct ScriptedEngine {
    pub settings: EngineSettings,
    pub seats: Vec<Seat>,
    /// Every accepted action, in order
    pub history: Vec<LastAction>,
    pub street: u8,
    pub rounds_started: usize,
    current: Option<SeatIndex>,
    previous: Option<LastAction>,
    events: VecDeque<EngineEvent>,
}

impl ScriptedEngine {
    fn active_seats(&self) -> impl Iterator<Item = SeatIndex> + '_ {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, seat)| !seat.folded)
            .map(|(idx, _)| idx)
    }

    fn next_active_after(&self, seat: SeatIndex) -> Option<SeatIndex> {
        let n = self.seats.len();
        (1..=n)
            .map(|offset| (seat + offset) % n)
            .find(|idx| !self.seats[*idx].folded)
    }

    fn finish_hand(&mut self) {
        self.current = None;
        self.events.push_back(EngineEvent::GameOver);
    }

    fn act(&mut self, seat: SeatIndex, action: PlayerAction) -> Result<(), ScriptedError> {
        let current = self.current.ok_or(ScriptedError::NoHandInProgress)?;
        if current != seat {
            return Err(ScriptedError::OutOfTurn);
        }

        let player = &mut self.seats[seat];
        match action {
            PlayerAction::Bet(amount) => {
                if amount > player.stack {
                    return Err(ScriptedError::InsufficientChips {
                        needed: amount,
                        stack: player.stack,
                    });
                }
                player.stack -= amount;
            }
            PlayerAction::AllIn => player.stack = 0,
            PlayerAction::Fold => player.folded = true,
            PlayerAction::Check | PlayerAction::Call => {}
        }
        player.acted = true;

        let last = LastAction {
            username: player.name.clone(),
            action,
        };
        self.history.push(last.clone());
        self.previous = Some(last);

        if self.active_seats().count() < 2 {
            self.finish_hand();
            return Ok(());
        }

        let street_done = self.active_seats().all(|idx| self.seats[idx].acted);
        if street_done {
            self.street += 1;
            if self.street == 4 {
                self.finish_hand();
                return Ok(());
            }
            for seat in &mut self.seats {
                seat.acted = false;
            }
            self.events.push_back(EngineEvent::Deal);
            let first = self.active_seats().next();
            self.current = first;
        } else {
            self.current = self.next_active_after(seat);
        }
        let turn = self.turn_event();
        self.events.push_back(turn);
        Ok(())
    }
}

impl BettingEngine for ScriptedEngine {
    type Error = ScriptedError;

    fn from_settings(settings: EngineSettings) -> Self {
        Self {
            settings,
            seats: Vec::new(),
            history: Vec::new(),
            street: 0,
            rounds_started: 0,
            current: None,
            previous: None,
            events: VecDeque::new(),
        }
    }

    fn add_player(&mut self, name: &Username, buy_in: Usd) -> Result<(), ScriptedError> {
        if self.seat_of(name).is_some() {
            return Err(ScriptedError::AlreadySeated(name.clone()));
        }
        self.seats.push(Seat {
            name: name.clone(),
            stack: buy_in,
            folded: false,
            acted: false,
        });
        Ok(())
    }

    fn player_count(&self) -> usize {
        self.seats.len()
    }

    fn seat_of(&self, name: &Username) -> Option<SeatIndex> {
        self.seats.iter().position(|seat| seat.name == *name)
    }

    fn check(&mut self, seat: SeatIndex) -> Result<(), ScriptedError> {
        self.act(seat, PlayerAction::Check)
    }

    fn fold(&mut self, seat: SeatIndex) -> Result<(), ScriptedError> {
        self.act(seat, PlayerAction::Fold)
    }

    fn bet(&mut self, seat: SeatIndex, amount: Usd) -> Result<(), ScriptedError> {
        self.act(seat, PlayerAction::Bet(amount))
    }

    fn call(&mut self, seat: SeatIndex) -> Result<(), ScriptedError> {
        self.act(seat, PlayerAction::Call)
    }

    fn all_in(&mut self, seat: SeatIndex) -> Result<(), ScriptedError> {
        self.act(seat, PlayerAction::AllIn)
    }

    fn init_new_round(&mut self) -> Result<(), ScriptedError> {
        if self.seats.len() < self.settings.min_players {
            return Err(ScriptedError::NotEnoughPlayers(self.settings.min_players));
        }
        for seat in &mut self.seats {
            seat.folded = false;
            seat.acted = false;
        }
        self.street = 0;
        self.rounds_started += 1;
        self.previous = None;
        self.current = Some(0);
        self.events.push_back(EngineEvent::NewRound);
        let turn = self.turn_event();
        self.events.push_back(turn);
        Ok(())
    }

    fn previous_player_action(&self) -> Option<LastAction> {
        self.previous.clone()
    }

    fn current_player(&self) -> Option<Username> {
        self.current.map(|seat| self.seats[seat].name.clone())
    }

    fn drain_events(&mut self) -> VecDeque<EngineEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Member connection handle used across the tests
pub type ConnId = u32;

pub type Session = poker_table::TableSession<ScriptedEngine, ConnId>;

pub fn name(s: &str) -> Username {
    Username::new(s)
}

/// Session with every name registered as a member and seated, in order.
pub fn seated_session(buy_in: Usd, names: &[&str]) -> Session {
    let mut session = Session::new(buy_in);
    for (conn, n) in names.iter().enumerate() {
        session.add_member(name(n), conn as ConnId).unwrap();
        session.add_player(&name(n)).unwrap();
    }
    session
}
