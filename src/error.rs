//! Error types.
//!
//! Turn rejections are not errors: they are ordinary game outcomes and live in
//! `rules::TurnRejection`. Everything here is a failure of data, storage, I/O,
//! or engine misuse.

use std::path::PathBuf;

use thiserror::Error;

use crate::rules::Phase;

/// The city catalog could not be built from its source.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog must be a sequence of city records")]
    NotASequence,
    #[error("record {index} is not an object")]
    NotARecord { index: usize },
    #[error("record {index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("record {index} has invalid `{field}`: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },
    #[error("record {index} has an empty name")]
    EmptyName { index: usize },
    #[error("catalog contains no cities")]
    EmptyCatalog,
}

/// A saved game could not be written or read back.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("snapshot {} is not accessible: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("snapshot is inconsistent: {0}")]
    Invalid(String),
}

/// The turn engine was driven out of order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("the game has not been started")]
    NotStarted,
    #[error("operation not allowed while {phase}")]
    OutOfTurn { phase: Phase },
    #[error("the catalog has no cities to open with")]
    EmptyCatalog,
    #[error("the game is already finished")]
    AlreadyFinished,
}

/// Failures that stop the game controller.
///
/// Save failures are deliberately absent: they are reported and the game
/// goes on.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
