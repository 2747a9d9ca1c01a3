//! Game rules as a reducer.
//!
//! - Which clicks are accepted
//! - How a pair is evaluated
//! - When the game is won
//!
//! Time-based effects are returned as commands rather than performed, so
//! everything in this module is deterministic.

pub mod engine;

pub use engine::{
    apply, legal_clicks, reduce, replay, result, Command, Evaluation, GameResult, Ignored, Outcome,
};
