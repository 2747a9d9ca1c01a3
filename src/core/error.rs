//! Error types.
//!
//! Gameplay itself never fails: rejected clicks and stale timers are
//! reported as [`Ignored`](crate::rules::Ignored) reasons, not errors.
//! The types here cover construction-time problems only.

use thiserror::Error;

/// Invalid `GameConfig`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least one image is required")]
    NoImages,

    #[error("{count} images configured, at most {max} supported")]
    TooManyImages { count: usize, max: usize },

    #[error("image {index} has a blank path")]
    BlankImage { index: usize },

    #[error("image path {path:?} is listed more than once")]
    DuplicateImage { path: String },
}

/// Invalid fixed deck order passed to `GameState::arrange`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has {actual} cards, deck needs {expected}")]
    WrongLength { expected: usize, actual: usize },

    #[error("layout references image {index}, only {available} configured")]
    UnknownImage { index: usize, available: usize },

    #[error("image {index} appears {count} times, expected exactly 2")]
    NotPaired { index: usize, count: usize },
}

/// Failure to encode or restore a binary state snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] bincode::Error),

    #[error("snapshot carries an invalid config: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::NoImages.to_string(), "at least one image is required");
        assert_eq!(
            ConfigError::DuplicateImage { path: "/i1.png".into() }.to_string(),
            "image path \"/i1.png\" is listed more than once"
        );
    }

    #[test]
    fn test_layout_error_messages() {
        let err = LayoutError::NotPaired { index: 3, count: 1 };
        assert_eq!(err.to_string(), "image 3 appears 1 times, expected exactly 2");
    }

    #[test]
    fn test_snapshot_error_from_config() {
        let err: SnapshotError = ConfigError::NoImages.into();
        assert!(matches!(err, SnapshotError::Config(ConfigError::NoImages)));
    }
}
