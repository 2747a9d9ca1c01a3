//! # memory-match
//!
//! A memory-matching card game engine: a shuffled deck of image pairs,
//! two-at-a-time flipping, match evaluation, move/match counting and win
//! detection.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: Game logic is a reducer, `(state, action) -> (state, outcome)`.
//!    Nothing in `rules` sleeps or reads a clock.
//!
//! 2. **Effects as Data**: Delayed transitions (mismatch flip-back, win
//!    reveal) come back as `Command`s for a driver to schedule.
//!
//! 3. **Injectable Randomness**: Shuffles draw from a seedable `GameRng`,
//!    so any game can be reproduced from its seed and history.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`, which
//!   keeps `reduce` cheap.
//!
//! - **Deal Numbers**: Every deal bumps a counter that timer actions carry.
//!   Timers from before a reset are ignored, and the session also drops
//!   them outright.
//!
//! ## Modules
//!
//! - `core`: Cards, configuration, RNG, actions, state, errors
//! - `rules`: The reducer and its outcome types
//! - `session`: Clock, timer queue, and the driver tying them to a game

pub mod core;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Card, CardFace, CardId, CardView, ConfigError, GameConfig, GameRng,
    GameRngState, GameState, GameView, ImageId, LayoutError, Phase, SnapshotError,
};

pub use crate::rules::{Command, Evaluation, GameResult, Ignored, Outcome};

pub use crate::session::{Clock, ManualClock, Session, SystemClock, TimerQueue};
