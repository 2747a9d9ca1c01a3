//! Actions: everything that can change a game.
//!
//! Three actions come from the player (start, click, reset). The other two
//! are fired by the session's timers after the delays the rules request:
//!
//! - `FlipBack` turns a mismatched pair face-down again
//! - `RevealWin` raises the win flag once the last match has settled
//!
//! Timer actions carry the deal number they were scheduled in. If the
//! deck has been re-dealt since, the rules ignore them.

use serde::{Deserialize, Serialize};

use super::card::CardId;

/// A game action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Leave the start screen and deal the first deck.
    StartGame { player_name: String },

    /// Flip a card.
    ClickCard(CardId),

    /// Re-deal from scratch ("reset" / "play again").
    Reset,

    /// Turn a mismatched pair face-down.
    FlipBack { deal: u64, cards: [CardId; 2] },

    /// Raise the win flag.
    RevealWin { deal: u64 },
}

impl Action {
    /// Create a start action.
    #[must_use]
    pub fn start(player_name: impl Into<String>) -> Self {
        Action::StartGame {
            player_name: player_name.into(),
        }
    }

    /// Check if this action is fired by a timer rather than the player.
    #[must_use]
    pub fn is_timer(&self) -> bool {
        matches!(self, Action::FlipBack { .. } | Action::RevealWin { .. })
    }

    /// Deal number a timer action was scheduled in.
    #[must_use]
    pub fn timer_deal(&self) -> Option<u64> {
        match self {
            Action::FlipBack { deal, .. } | Action::RevealWin { deal } => Some(*deal),
            _ => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::StartGame { .. } => "start_game",
            Action::ClickCard(_) => "click_card",
            Action::Reset => "reset",
            Action::FlipBack { .. } => "flip_back",
            Action::RevealWin { .. } => "reveal_win",
        }
    }
}

/// An accepted action with its position in the game's history.
///
/// Used for:
/// - Replay (rebuild a state from seed + history)
/// - Debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Position in the history (starts at 0).
    pub sequence: u64,

    /// Deal number current when the action was accepted.
    pub deal: u64,

    /// The action taken.
    pub action: Action,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(sequence: u64, deal: u64, action: Action) -> Self {
        Self {
            sequence,
            deal,
            action,
        }
    }
}
