//! The game reducer.
//!
//! [`apply`] moves a [`GameState`] forward by one [`Action`] and reports
//! what happened in an [`Outcome`]. Delays are never waited on here: when
//! the rules need something to happen later (flip a mismatched pair back,
//! raise the win flag) the outcome carries a [`Command::Schedule`] that a
//! driver such as [`crate::session::Session`] executes.
//!
//! Rejected actions leave the state untouched and are reported through
//! [`Outcome::ignored`]. Nothing here returns an error.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::{Action, ActionRecord, CardId, ConfigError, GameConfig, GameState, Phase};

/// Why an action was a no-op.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ignored {
    /// `StartGame` with an empty name.
    EmptyPlayerName,
    /// `StartGame` after the game already left the start screen.
    AlreadyStarted,
    /// `Reset` before the first start.
    NotStarted,
    /// No card with this ID in the current deck.
    UnknownCard(CardId),
    /// A pair is still being evaluated.
    Evaluating,
    AlreadyMatched(CardId),
    AlreadyFaceUp(CardId),
    /// Two cards are already selected.
    SelectionFull,
    /// Timer scheduled in an earlier deal.
    StaleTimer { deal: u64, current: u64 },
    /// `FlipBack` that does not match the pending mismatch.
    NoPendingFlip,
    /// `RevealWin` with pairs left to find.
    NotAllMatched,
    /// `RevealWin` after the flag is already up.
    AlreadyWon,
}

/// Result of comparing two selected cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evaluation {
    Match([CardId; 2]),
    /// Both stay face-up until the scheduled `FlipBack`.
    Mismatch([CardId; 2]),
    /// A selected ID no longer resolved to a card.
    Aborted,
}

/// Deferred work for the driver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Dispatch `action` once `after` has elapsed.
    Schedule { after: Duration, action: Action },
}

/// What a single [`apply`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Set when the action was rejected. The state is unchanged.
    pub ignored: Option<Ignored>,

    /// Set when the action completed a pair selection.
    pub evaluation: Option<Evaluation>,

    /// Timers to start.
    pub commands: SmallVec<[Command; 1]>,
}

impl Outcome {
    fn ignored(reason: Ignored) -> Self {
        Self {
            ignored: Some(reason),
            ..Self::default()
        }
    }

    fn evaluated(evaluation: Evaluation) -> Self {
        Self {
            evaluation: Some(evaluation),
            ..Self::default()
        }
    }

    /// Check if the action changed the state.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.ignored.is_none()
    }
}

/// Summary of a won game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub player_name: String,
    pub moves: u32,
}

/// Apply an action in place.
///
/// Accepted actions are appended to the state's history.
pub fn apply(state: &mut GameState, action: &Action) -> Outcome {
    let outcome = match action {
        Action::StartGame { player_name } => start_game(state, player_name),
        Action::ClickCard(id) => click_card(state, *id),
        Action::Reset => reset(state),
        Action::FlipBack { deal, cards } => flip_back(state, *deal, *cards),
        Action::RevealWin { deal } => reveal_win(state, *deal),
    };

    match &outcome.ignored {
        Some(reason) => debug!(action = action.name(), ?reason, "action ignored"),
        None => state.record(action),
    }

    outcome
}

/// Pure form of [`apply`]: `(state, action) -> (state, outcome)`.
///
/// Cloning is cheap; the deck and history are persistent structures.
#[must_use]
pub fn reduce(state: &GameState, action: &Action) -> (GameState, Outcome) {
    let mut next = state.clone();
    let outcome = apply(&mut next, action);
    (next, outcome)
}

/// Cards a click on which would currently be accepted.
#[must_use]
pub fn legal_clicks(state: &GameState) -> Vec<CardId> {
    if state.is_evaluating() || state.selection().len() >= 2 {
        return Vec::new();
    }

    state
        .cards()
        .iter()
        .filter(|card| !card.is_face_up())
        .map(|card| card.id)
        .collect()
}

/// Returns `Some(result)` once the win flag is up.
#[must_use]
pub fn result(state: &GameState) -> Option<GameResult> {
    state.is_game_won().then(|| GameResult {
        player_name: state.player_name().to_string(),
        moves: state.moves(),
    })
}

/// Rebuild a state from its seed and history.
///
/// Deals draw from the same seeded stream, so the same records produce
/// the same decks and card IDs.
pub fn replay<'a, I>(config: GameConfig, seed: u64, records: I) -> Result<GameState, ConfigError>
where
    I: IntoIterator<Item = &'a ActionRecord>,
{
    let mut state = GameState::new(config, seed)?;
    for record in records {
        apply(&mut state, &record.action);
    }
    Ok(state)
}

fn start_game(state: &mut GameState, player_name: &str) -> Outcome {
    if player_name.is_empty() {
        return Outcome::ignored(Ignored::EmptyPlayerName);
    }
    if state.phase() != Phase::NotStarted {
        return Outcome::ignored(Ignored::AlreadyStarted);
    }

    state.player_name = player_name.to_string();
    state.deal_cards();
    state.phase = Phase::Playing;
    info!(player = player_name, deal = state.deal(), "game started");
    Outcome::default()
}

fn reset(state: &mut GameState) -> Outcome {
    if state.phase() == Phase::NotStarted {
        return Outcome::ignored(Ignored::NotStarted);
    }

    state.deal_cards();
    state.phase = Phase::Playing;
    info!(deal = state.deal(), "game reset");
    Outcome::default()
}

fn click_card(state: &mut GameState, id: CardId) -> Outcome {
    let (is_matched, is_flipped) = match state.card(id) {
        Some(card) => (card.is_matched, card.is_flipped),
        None => return Outcome::ignored(Ignored::UnknownCard(id)),
    };
    if state.is_evaluating() {
        return Outcome::ignored(Ignored::Evaluating);
    }
    if is_matched {
        return Outcome::ignored(Ignored::AlreadyMatched(id));
    }
    if is_flipped {
        return Outcome::ignored(Ignored::AlreadyFaceUp(id));
    }
    if state.selection().len() >= 2 {
        return Outcome::ignored(Ignored::SelectionFull);
    }

    if let Some(card) = state.card_mut(id) {
        card.is_flipped = true;
    }
    state.selection.push(id);

    if state.selection().len() == 2 {
        evaluate(state)
    } else {
        Outcome::default()
    }
}

fn evaluate(state: &mut GameState) -> Outcome {
    state.evaluating = true;
    state.moves += 1;

    let pair = [state.selection[0], state.selection[1]];
    let is_match = match (state.card(pair[0]), state.card(pair[1])) {
        (Some(first), Some(second)) => first.pairs_with(second),
        _ => {
            for id in pair {
                if let Some(card) = state.card_mut(id) {
                    card.is_flipped = false;
                }
            }
            state.selection.clear();
            state.evaluating = false;
            debug!(?pair, "evaluation aborted, card missing");
            return Outcome::evaluated(Evaluation::Aborted);
        }
    };

    if is_match {
        for id in pair {
            if let Some(card) = state.card_mut(id) {
                card.is_matched = true;
                card.is_flipped = false;
            }
        }
        state.matches += 1;
        state.selection.clear();
        state.evaluating = false;
        debug!(?pair, moves = state.moves(), matches = state.matches(), "match");

        let mut outcome = Outcome::evaluated(Evaluation::Match(pair));
        if state.all_matched() {
            info!(moves = state.moves(), "all pairs found");
            outcome.commands.push(Command::Schedule {
                after: state.config().win_reveal_delay(),
                action: Action::RevealWin { deal: state.deal() },
            });
        }
        outcome
    } else {
        debug!(?pair, moves = state.moves(), "mismatch");

        let mut outcome = Outcome::evaluated(Evaluation::Mismatch(pair));
        outcome.commands.push(Command::Schedule {
            after: state.config().flip_back_delay(),
            action: Action::FlipBack {
                deal: state.deal(),
                cards: pair,
            },
        });
        outcome
    }
}

fn flip_back(state: &mut GameState, deal: u64, cards: [CardId; 2]) -> Outcome {
    if deal != state.deal() {
        return Outcome::ignored(Ignored::StaleTimer {
            deal,
            current: state.deal(),
        });
    }
    if !state.is_evaluating() || state.selection() != cards.as_slice() {
        return Outcome::ignored(Ignored::NoPendingFlip);
    }

    for id in cards {
        if let Some(card) = state.card_mut(id) {
            if !card.is_matched {
                card.is_flipped = false;
            }
        }
    }
    state.selection.clear();
    state.evaluating = false;
    Outcome::default()
}

fn reveal_win(state: &mut GameState, deal: u64) -> Outcome {
    if deal != state.deal() {
        return Outcome::ignored(Ignored::StaleTimer {
            deal,
            current: state.deal(),
        });
    }
    if state.is_game_won() {
        return Outcome::ignored(Ignored::AlreadyWon);
    }
    if !state.all_matched() {
        return Outcome::ignored(Ignored::NotAllMatched);
    }

    state.won = true;
    state.phase = Phase::Won;
    info!(player = state.player_name(), moves = state.moves(), "game won");
    Outcome::default()
}
