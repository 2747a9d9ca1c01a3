//! Card identification and per-card state.
//!
//! Every card on the table has a unique `CardId` and shows one `ImageId`.
//!
//! ## Card Lifecycle
//!
//! ```text
//! Hidden -> FaceUp -> Matched (terminal)
//!              \
//!               -> Hidden (flip-back after a mismatch)
//! ```
//!
//! ## Usage
//!
//! ```
//! use memory_match::core::{Card, CardFace, CardId, ImageId};
//!
//! let mut card = Card::new(CardId::new(7), ImageId::new(2));
//! assert_eq!(card.face(), CardFace::Hidden);
//!
//! card.is_flipped = true;
//! assert_eq!(card.face(), CardFace::FaceUp);
//! assert!(card.is_face_up());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card.
///
/// Allocated from a monotonic counter owned by the game state and never
/// reused, not even across re-deals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Index of an image in the configured image list.
///
/// Two cards match when they carry the same `ImageId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImageId(pub u8);

impl ImageId {
    /// Create an image ID.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Position in `GameConfig::images`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Image({})", self.0)
    }
}

/// What the player currently sees of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    /// Face-down.
    Hidden,
    /// Face-up, awaiting evaluation or flip-back.
    FaceUp,
    /// Permanently face-up.
    Matched,
}

/// A single card in the deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID, stable for the deck's lifetime.
    pub id: CardId,

    /// The image shown on the front.
    pub image: ImageId,

    /// Face-up and not yet resolved as a match.
    pub is_flipped: bool,

    /// Resolved as part of a pair. Only a re-deal clears it.
    pub is_matched: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(id: CardId, image: ImageId) -> Self {
        Self {
            id,
            image,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Derive the visible face from the flags.
    #[must_use]
    pub const fn face(&self) -> CardFace {
        if self.is_matched {
            CardFace::Matched
        } else if self.is_flipped {
            CardFace::FaceUp
        } else {
            CardFace::Hidden
        }
    }

    /// Whether the front is showing (flipped or matched).
    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }

    /// Whether this card pairs with `other`.
    ///
    /// A card never pairs with itself.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.image == other.image
    }
}
