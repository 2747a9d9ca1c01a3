//! Core game types: cards, configuration, RNG, actions, state, errors.
//!
//! Everything here is plain data. The transitions that move a game
//! forward live in [`crate::rules`].

pub mod card;
pub mod config;
pub mod rng;
pub mod action;
pub mod state;
pub mod error;

pub use card::{Card, CardFace, CardId, ImageId};
pub use config::{GameConfig, DEFAULT_IMAGES};
pub use rng::{GameRng, GameRngState};
pub use action::{Action, ActionRecord};
pub use state::{CardView, GameState, GameView, Phase};
pub use error::{ConfigError, LayoutError, SnapshotError};
