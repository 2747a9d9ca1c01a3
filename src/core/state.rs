//! Game state: the deck, the selection buffer, and the session counters.
//!
//! ## GameState
//!
//! One record owns everything a game session needs:
//! - Deck (card list with flip/match flags)
//! - Selection buffer (at most two face-up, unresolved cards)
//! - Moves, matches, win flag
//! - Phase, player name, deal number
//! - RNG and action history
//!
//! Transitions live in [`crate::rules`]; this module only provides the
//! data and the dealing primitive. The deck and history use `im`
//! persistent structures, so cloning a state for the pure reducer is O(1).
//!
//! ## GameView
//!
//! A plain, serializable snapshot for the presentation layer.

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::info;

use super::action::{Action, ActionRecord};
use super::card::{Card, CardFace, CardId, ImageId};
use super::config::GameConfig;
use super::error::{ConfigError, LayoutError, SnapshotError};
use super::rng::{GameRng, GameRngState};

/// Game-level progression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Start screen; no deck yet.
    #[default]
    NotStarted,
    /// A deck is on the table.
    Playing,
    /// Every pair found and the win flag raised.
    Won,
}

/// Complete state of one game session.
#[derive(Clone, Debug)]
pub struct GameState {
    config: Arc<GameConfig>,

    pub(crate) phase: Phase,
    pub(crate) player_name: String,

    /// Incremented on every deal. Timer actions from older deals are stale.
    deal: u64,

    /// The deck in table order.
    cards: Vector<Card>,

    /// Card ID -> index into `cards`.
    positions: FxHashMap<CardId, usize>,

    /// Face-up, unresolved cards in click order.
    pub(crate) selection: SmallVec<[CardId; 2]>,

    /// Set while a pair is being evaluated. Gates click acceptance.
    pub(crate) evaluating: bool,

    pub(crate) moves: u32,
    pub(crate) matches: u32,
    pub(crate) won: bool,

    /// Next card ID to allocate. Never rewound.
    next_card_id: u32,

    rng: GameRng,

    history: Vector<ActionRecord>,
}

impl GameState {
    /// Create a state on the start screen with a seeded shuffle source.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, GameRng::new(seed))
    }

    /// Create a state whose shuffles are seeded from entropy.
    pub fn from_entropy(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, GameRng::from_entropy())
    }

    fn with_rng(config: GameConfig, rng: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            phase: Phase::NotStarted,
            player_name: String::new(),
            deal: 0,
            cards: Vector::new(),
            positions: FxHashMap::default(),
            selection: SmallVec::new(),
            evaluating: false,
            moves: 0,
            matches: 0,
            won: false,
            next_card_id: 0,
            rng,
            history: Vector::new(),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Current deal number (0 before the first deal).
    #[must_use]
    pub fn deal(&self) -> u64 {
        self.deal
    }

    /// The deck in table order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        let index = *self.positions.get(&id)?;
        self.cards.get(index)
    }

    /// Card at a table position.
    #[must_use]
    pub fn card_at(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        let index = *self.positions.get(&id)?;
        self.cards.get_mut(index)
    }

    /// Currently selected cards, in click order.
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    #[must_use]
    pub fn is_evaluating(&self) -> bool {
        self.evaluating
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn matches(&self) -> u32 {
        self.matches
    }

    /// Matches needed to win.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.config.pair_count()
    }

    /// Check if every pair has been found.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.phase != Phase::NotStarted && self.matches as usize == self.pair_count()
    }

    /// The win flag. Trails `all_matched` by the reveal delay.
    #[must_use]
    pub fn is_game_won(&self) -> bool {
        self.won
    }

    /// Resource path for an image.
    #[must_use]
    pub fn image_path(&self, image: ImageId) -> Option<&str> {
        self.config.images.get(image.index()).map(String::as_str)
    }

    /// Seed of the shuffle source.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Dealing ===

    /// Deal a fresh shuffled deck.
    ///
    /// Two cards per image, fresh IDs, uniform shuffle. Clears the
    /// selection, counters, win flag and evaluation gate.
    pub(crate) fn deal_cards(&mut self) {
        let pairs = self.pair_count();
        let mut images: Vec<ImageId> = (0..pairs)
            .chain(0..pairs)
            .map(|i| ImageId::new(i as u8))
            .collect();
        self.rng.shuffle(&mut images);
        self.install(images);
    }

    /// Re-deal with a fixed post-shuffle order and enter `Playing`.
    ///
    /// Each configured image must appear exactly twice. The RNG is not
    /// consumed, so arranged games cannot be rebuilt by [`crate::rules::replay`].
    pub fn arrange(&mut self, layout: &[ImageId]) -> Result<(), LayoutError> {
        let pairs = self.pair_count();
        if layout.len() != pairs * 2 {
            return Err(LayoutError::WrongLength {
                expected: pairs * 2,
                actual: layout.len(),
            });
        }

        let mut counts = vec![0usize; pairs];
        for image in layout {
            match counts.get_mut(image.index()) {
                Some(count) => *count += 1,
                None => {
                    return Err(LayoutError::UnknownImage {
                        index: image.index(),
                        available: pairs,
                    })
                }
            }
        }
        if let Some(index) = counts.iter().position(|&count| count != 2) {
            return Err(LayoutError::NotPaired {
                index,
                count: counts[index],
            });
        }

        self.install(layout.to_vec());
        self.phase = Phase::Playing;
        Ok(())
    }

    fn install(&mut self, images: Vec<ImageId>) {
        self.deal += 1;

        let mut cards = Vector::new();
        let mut positions = FxHashMap::default();
        for (index, image) in images.into_iter().enumerate() {
            let id = CardId::new(self.next_card_id);
            self.next_card_id += 1;
            positions.insert(id, index);
            cards.push_back(Card::new(id, image));
        }

        self.cards = cards;
        self.positions = positions;
        self.selection.clear();
        self.evaluating = false;
        self.moves = 0;
        self.matches = 0;
        self.won = false;

        info!(deal = self.deal, cards = self.cards.len(), "dealt new deck");
    }

    // === History ===

    pub(crate) fn record(&mut self, action: &Action) {
        let sequence = u64::try_from(self.history.len()).unwrap_or(u64::MAX);
        self.history
            .push_back(ActionRecord::new(sequence, self.deal, action.clone()));
    }

    // === Presentation ===

    /// Snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> GameView {
        GameView {
            player_name: self.player_name.clone(),
            phase: self.phase,
            cards: self
                .cards
                .iter()
                .map(|card| CardView {
                    id: card.id,
                    image: self.image_path(card.image).unwrap_or_default().to_string(),
                    face: card.face(),
                    is_flipped: card.is_flipped,
                    is_matched: card.is_matched,
                })
                .collect(),
            moves: self.moves,
            matches: self.matches,
            pair_count: self.pair_count(),
            is_game_won: self.won,
        }
    }

    // === Snapshots ===

    /// Encode the full state, including RNG position, with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let snapshot = Snapshot {
            config: (*self.config).clone(),
            phase: self.phase,
            player_name: self.player_name.clone(),
            deal: self.deal,
            cards: self.cards.clone(),
            selection: self.selection.clone(),
            evaluating: self.evaluating,
            moves: self.moves,
            matches: self.matches,
            won: self.won,
            next_card_id: self.next_card_id,
            rng: self.rng.state(),
            history: self.history.clone(),
        };
        bincode::serialize(&snapshot).map_err(SnapshotError::Encode)
    }

    /// Restore a state produced by [`GameState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = bincode::deserialize(bytes).map_err(SnapshotError::Decode)?;
        snapshot.config.validate()?;

        let positions = snapshot
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| (card.id, index))
            .collect();

        Ok(Self {
            config: Arc::new(snapshot.config),
            phase: snapshot.phase,
            player_name: snapshot.player_name,
            deal: snapshot.deal,
            cards: snapshot.cards,
            positions,
            selection: snapshot.selection,
            evaluating: snapshot.evaluating,
            moves: snapshot.moves,
            matches: snapshot.matches,
            won: snapshot.won,
            next_card_id: snapshot.next_card_id,
            rng: GameRng::from_state(&snapshot.rng),
            history: snapshot.history,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    config: GameConfig,
    phase: Phase,
    player_name: String,
    deal: u64,
    cards: Vector<Card>,
    selection: SmallVec<[CardId; 2]>,
    evaluating: bool,
    moves: u32,
    matches: u32,
    won: bool,
    next_card_id: u32,
    rng: GameRngState,
    history: Vector<ActionRecord>,
}

/// One card as the presentation layer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    /// Image resource path.
    pub image: String,
    pub face: CardFace,
    pub is_flipped: bool,
    pub is_matched: bool,
}

/// Everything the presentation layer renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub player_name: String,
    pub phase: Phase,
    pub cards: Vec<CardView>,
    pub moves: u32,
    pub matches: u32,
    pub pair_count: usize,
    pub is_game_won: bool,
}
