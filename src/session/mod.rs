//! Event-loop driver.
//!
//! A [`Session`] owns a [`GameState`], a [`TimerQueue`] and a [`Clock`].
//! It feeds player actions through the reducer and turns the returned
//! [`Command`]s into timers. The host calls [`Session::poll`] whenever it
//! wakes up (typically at [`Session::next_deadline`]) to fire due timers.
//!
//! Starting or resetting a game cancels every pending timer.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use memory_match::core::GameConfig;
//! use memory_match::session::{ManualClock, Session};
//!
//! let clock = ManualClock::new();
//! let mut session = Session::with_seed(GameConfig::default(), 42, clock.clone()).unwrap();
//! session.start("ada");
//!
//! let first = session.state().cards()[0].id;
//! session.click(first);
//! assert_eq!(session.state().selection(), &[first]);
//!
//! clock.advance(Duration::from_secs(1));
//! assert_eq!(session.poll(), 0);
//! ```

mod clock;
mod timers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use timers::{PendingTimer, TimerId, TimerQueue};

use std::time::Duration;

use tracing::trace;

use crate::core::{Action, CardId, ConfigError, GameConfig, GameState, GameView};
use crate::rules::{self, Command, Outcome};

/// A game plus the timers it has asked for.
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    state: GameState,
    timers: TimerQueue,
    clock: C,
}

impl Session<SystemClock> {
    /// Session on the wall clock with entropy-seeded shuffles.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_state(GameState::from_entropy(config)?, SystemClock::new()))
    }
}

impl<C: Clock> Session<C> {
    /// Session with a fixed shuffle seed.
    pub fn with_seed(config: GameConfig, seed: u64, clock: C) -> Result<Self, ConfigError> {
        Ok(Self::from_state(GameState::new(config, seed)?, clock))
    }

    /// Drive an existing state, e.g. one restored from a snapshot.
    ///
    /// Timers pending when the snapshot was taken are not restored.
    pub fn from_state(state: GameState, clock: C) -> Self {
        Self {
            state,
            timers: TimerQueue::new(),
            clock,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access, for arranging fixed decks in tests and demos.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn view(&self) -> GameView {
        self.state.view()
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Leave the start screen.
    pub fn start(&mut self, player_name: impl Into<String>) -> Outcome {
        self.dispatch(Action::start(player_name))
    }

    /// Flip a card.
    pub fn click(&mut self, id: CardId) -> Outcome {
        self.dispatch(Action::ClickCard(id))
    }

    /// Re-deal ("reset" / "play again").
    pub fn reset(&mut self) -> Outcome {
        self.dispatch(Action::Reset)
    }

    /// Apply an action and schedule whatever it asks for.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let outcome = rules::apply(&mut self.state, &action);

        if outcome.is_accepted() && matches!(action, Action::StartGame { .. } | Action::Reset) {
            if !self.timers.is_empty() {
                trace!(cancelled = self.timers.len(), "timers cancelled by new deal");
            }
            self.timers.clear();
        }

        let now = self.clock.now();
        for command in &outcome.commands {
            let Command::Schedule { after, action } = command;
            let id = self.timers.schedule(now + *after, action.clone());
            trace!(%id, action = action.name(), ?after, "timer scheduled");
        }

        outcome
    }

    /// Fire every timer due at the clock's current time.
    ///
    /// Returns how many fired.
    pub fn poll(&mut self) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(self.clock.now()) {
            trace!(id = %timer.id, action = timer.action.name(), "timer fired");
            self.dispatch(timer.action);
            fired += 1;
        }
        fired
    }

    /// When the next timer is due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Time left until the next timer, zero if one is overdue.
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|due| due.saturating_sub(self.clock.now()))
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
