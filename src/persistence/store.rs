//! Durable storage for the saved game.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::snapshot::{decode, encode};
use crate::core::GameState;
use crate::error::PersistError;

/// Somewhere a game snapshot can be kept between runs.
///
/// `load` distinguishes "nothing saved" (`Ok(None)`) from "something saved
/// but unreadable" (`Err`).
pub trait GameStore {
    /// Overwrite the stored snapshot with `state`.
    fn save(&mut self, state: &GameState) -> Result<(), PersistError>;

    /// Read the stored snapshot, if there is one.
    fn load(&mut self) -> Result<Option<GameState>, PersistError>;

    /// Forget the stored snapshot. Clearing an empty store is not an error.
    fn clear(&mut self) -> Result<(), PersistError>;
}

/// Snapshot kept as a JSON file.
///
/// Each save writes a sibling temp file and renames it over the target, so a
/// crash mid-write leaves either the old snapshot or the new one.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("save.json");
        self.path
            .with_file_name(format!(".{}.tmp-{}", name, std::process::id()))
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl GameStore for JsonFileStore {
    fn save(&mut self, state: &GameState) -> Result<(), PersistError> {
        let text = encode(state)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.temp_path();
        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        };
        if let Err(e) = write() {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error(e));
        }

        debug!(path = %self.path.display(), cities = state.used_count(), "game saved");
        Ok(())
    }

    fn load(&mut self) -> Result<Option<GameState>, PersistError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        decode(&text).map(Some)
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Snapshot kept in memory as its serialized text.
///
/// Goes through the same JSON codec as the file store, so tests exercise the
/// real format. `with_text` plants arbitrary content, e.g. a corrupt snapshot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    text: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            saves: 0,
        }
    }

    /// The stored text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// How many times `save` succeeded.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl GameStore for MemoryStore {
    fn save(&mut self, state: &GameState) -> Result<(), PersistError> {
        self.text = Some(encode(state)?);
        self.saves += 1;
        Ok(())
    }

    fn load(&mut self) -> Result<Option<GameState>, PersistError> {
        self.text.as_deref().map(decode).transpose()
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        self.text = None;
        Ok(())
    }
}
