//! # city-chain
//!
//! A human vs. computer word-chain game over city names. Each city must start
//! with the letter the previous one ended with, and no city may be named twice.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: `TurnEngine` validates and selects moves; it owns no
//!    I/O and never touches disk.
//!
//! 2. **Injected randomness**: the computer's choices come from a
//!    `ChoiceSource`, normally a seeded `GameRng`, so games replay exactly.
//!
//! 3. **Outcomes are values**: a rejected city is a `TurnRejection`, not an
//!    error. Errors are reserved for bad data, storage and console failures.
//!
//! ## Modules
//!
//! - `core`: City records, catalog, game state, RNG, configuration
//! - `rules`: The turn engine and game outcomes
//! - `persistence`: Catalog loading and saved-game storage
//! - `game`: Controller loop and the console channel
//! - `error`: Error types

pub mod core;
pub mod rules;
pub mod persistence;
pub mod game;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    CityCatalog, CityRecord, Coords,
    GameState, Turn, GameRng, ChoiceSource,
    GameConfig,
};

pub use crate::rules::{Outcome, Phase, TurnEngine, TurnRejection, TurnResult};

pub use crate::persistence::{load_catalog, GameStore, JsonFileStore, MemoryStore, Snapshot};

pub use crate::game::{ConsoleIo, GameController, GameEvent, Prompt, RunResult, ScriptedIo, TurnIo};

pub use crate::error::{ControllerError, DataFormatError, EngineError, PersistError};
