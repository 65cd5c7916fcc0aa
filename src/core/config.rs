//! Game configuration.
//!
//! The binary fills a `GameConfig` from command-line flags; tests build one
//! directly with the `with_*` setters.

use std::path::{Path, PathBuf};

/// Default location of the city catalog.
pub const DEFAULT_CATALOG_PATH: &str = "cities.json";

/// Default location of the saved game.
pub const DEFAULT_SAVE_PATH: &str = "save.json";

/// Where the game reads its data and how it seeds its choices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// JSON file holding the sequence of city records.
    pub catalog_path: PathBuf,

    /// JSON snapshot rewritten after every turn.
    pub save_path: PathBuf,

    /// Seed for the computer's choices. `None` draws one from the OS.
    pub seed: Option<u64>,

    /// Ignore and discard any saved game.
    pub fresh: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            seed: None,
            fresh: false,
        }
    }
}

impl GameConfig {
    /// Configuration with default paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog path.
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl AsRef<Path>) -> Self {
        self.catalog_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the snapshot path.
    #[must_use]
    pub fn with_save_path(mut self, path: impl AsRef<Path>) -> Self {
        self.save_path = path.as_ref().to_path_buf();
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start a new game even if a snapshot exists.
    #[must_use]
    pub fn fresh(mut self) -> Self {
        self.fresh = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.catalog_path, PathBuf::from("cities.json"));
        assert_eq!(config.save_path, PathBuf::from("save.json"));
        assert_eq!(config.seed, None);
        assert!(!config.fresh);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_catalog_path("data/ru.json")
            .with_save_path("/tmp/game.json")
            .with_seed(7)
            .fresh();

        assert_eq!(config.catalog_path, PathBuf::from("data/ru.json"));
        assert_eq!(config.save_path, PathBuf::from("/tmp/game.json"));
        assert_eq!(config.seed, Some(7));
        assert!(config.fresh);
    }
}
