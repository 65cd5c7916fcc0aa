//! Everything that touches disk: the catalog file and the saved game.
//!
//! - `load_catalog`: read the static city list once at startup
//! - `GameStore`: save after every turn, load once at startup
//! - `Snapshot`: the JSON shape of a saved game

pub mod catalog_file;
pub mod snapshot;
pub mod store;

pub use catalog_file::load_catalog;
pub use snapshot::{decode, encode, Snapshot};
pub use store::{GameStore, JsonFileStore, MemoryStore};
