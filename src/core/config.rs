//! Game configuration: the image set and the two presentation delays.

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// The stock image set. Each appears twice per deck.
pub const DEFAULT_IMAGES: [&str; 6] = [
    "/i1.png",
    "/i2.png",
    "/i3.png",
    "/i4.png",
    "/i5.png",
    "/i6.png",
];

/// How long a mismatched pair stays face-up (ms).
pub const DEFAULT_FLIP_BACK_DELAY_MS: u64 = 900;

/// Delay between the final match and the win flag (ms).
pub const DEFAULT_WIN_REVEAL_DELAY_MS: u64 = 500;

/// Largest image set an `ImageId` can index.
pub const MAX_IMAGES: usize = u8::MAX as usize + 1;

/// Game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Image resource identifiers; one pair per entry.
    pub images: Vec<String>,

    /// Time a mismatched pair stays visible before flipping back.
    /// Gives the player a look at both cards.
    pub flip_back_delay_ms: u64,

    /// Time between the last match and the win flag.
    /// Lets the final flip animation finish before the win overlay.
    pub win_reveal_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            images: DEFAULT_IMAGES.iter().map(|s| (*s).to_string()).collect(),
            flip_back_delay_ms: DEFAULT_FLIP_BACK_DELAY_MS,
            win_reveal_delay_ms: DEFAULT_WIN_REVEAL_DELAY_MS,
        }
    }
}

impl GameConfig {
    /// Replace the image set.
    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    /// Set the mismatch flip-back delay.
    pub fn with_flip_back_delay(mut self, delay: Duration) -> Self {
        self.flip_back_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the win reveal delay.
    pub fn with_win_reveal_delay(mut self, delay: Duration) -> Self {
        self.win_reveal_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn flip_back_delay(&self) -> Duration {
        Duration::from_millis(self.flip_back_delay_ms)
    }

    #[must_use]
    pub fn win_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.win_reveal_delay_ms)
    }

    /// Number of distinct images, i.e. matches needed to win.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.images.len()
    }

    /// Cards per deal.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.images.len() * 2
    }

    /// Check the image set.
    ///
    /// Images must be non-empty, non-blank, unique, and no more than
    /// [`MAX_IMAGES`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.is_empty() {
            return Err(ConfigError::NoImages);
        }
        if self.images.len() > MAX_IMAGES {
            return Err(ConfigError::TooManyImages {
                count: self.images.len(),
                max: MAX_IMAGES,
            });
        }

        let mut seen = FxHashSet::default();
        for (index, path) in self.images.iter().enumerate() {
            if path.trim().is_empty() {
                return Err(ConfigError::BlankImage { index });
            }
            if !seen.insert(path.as_str()) {
                return Err(ConfigError::DuplicateImage { path: path.clone() });
            }
        }

        Ok(())
    }
}
