//! Core types: city records, the catalog, game state, RNG, configuration.
//!
//! Nothing here knows about turns or files; the rules live in `rules` and
//! storage in `persistence`.

pub mod city;
pub mod catalog;
pub mod state;
pub mod rng;
pub mod config;

pub use city::{first_letter, fold_char, last_letter, normalize_name, CityRecord, Coords};
pub use catalog::CityCatalog;
pub use state::{GameState, Turn};
pub use rng::{ChoiceSource, GameRng};
pub use config::{GameConfig, DEFAULT_CATALOG_PATH, DEFAULT_SAVE_PATH};
