//! Game progress: which cities have been named and what letter comes next.
//!
//! ## Invariant
//!
//! Whenever `last_city_name` is non-empty, `required_letter` is the
//! lower-cased last character of it. Before the first city is played both
//! are empty and nothing is constrained.
//!
//! `turn` records whose move the game is waiting for, so a reloaded game
//! picks up exactly where it stopped and a finished game stays finished.
//!
//! Uses `im` persistent collections so the controller can keep cheap
//! before/after copies of the state around.

use im::{HashSet as ImHashSet, Vector};

use super::catalog::CityCatalog;
use super::city::{last_letter, normalize_name};

/// Whose move a game is waiting for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Turn {
    #[default]
    Human,
    Computer,
    /// An outcome was reached; nothing more can be played.
    Finished,
}

/// Mutable record of a game in progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    /// Normalized names of every city played so far.
    used: ImHashSet<String>,
    /// The same names in the order they were played.
    history: Vector<String>,
    required_letter: Option<char>,
    last_city_name: String,
    turn: Turn,
}

impl GameState {
    /// A state with nothing played yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a state from its persisted parts.
    ///
    /// Duplicate names in `used_cities` collapse to one entry. Returns `None`
    /// when `required_letter` disagrees with the last letter of
    /// `last_city_name`.
    #[must_use]
    pub fn restore(
        used_cities: impl IntoIterator<Item = String>,
        required_letter: Option<char>,
        last_city_name: impl Into<String>,
    ) -> Option<Self> {
        let last_city_name = last_city_name.into();
        if !last_city_name.trim().is_empty() && last_letter(&last_city_name) != required_letter {
            return None;
        }

        let mut state = Self {
            required_letter,
            last_city_name,
            ..Self::default()
        };
        for name in used_cities {
            let key = normalize_name(&name);
            if !key.is_empty() && state.used.insert(key.clone()).is_none() {
                state.history.push_back(key);
            }
        }
        Some(state)
    }

    /// Set whose move the restored game is waiting for.
    #[must_use]
    pub fn with_turn(mut self, turn: Turn) -> Self {
        self.turn = turn;
        self
    }

    /// Whether an opening city has been played.
    #[must_use]
    pub fn is_started(&self) -> bool {
        !self.last_city_name.is_empty()
    }

    /// Whose move the game is waiting for.
    #[must_use]
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Whether the game reached an outcome.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.turn == Turn::Finished
    }

    /// Whether a city (any case, any padding) has already been played.
    #[must_use]
    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(&normalize_name(name))
    }

    /// Number of cities played.
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Played cities (normalized) in the order they were named.
    pub fn used_cities(&self) -> impl Iterator<Item = &str> + '_ {
        self.history.iter().map(String::as_str)
    }

    /// Letter the next city must start with, once the game has started.
    #[must_use]
    pub fn required_letter(&self) -> Option<char> {
        self.required_letter
    }

    /// Name of the most recently accepted city, or `""` before the start.
    #[must_use]
    pub fn last_city_name(&self) -> &str {
        &self.last_city_name
    }

    /// Played names that the given catalog does not know.
    ///
    /// A non-empty result means the snapshot was written against a different
    /// catalog.
    #[must_use]
    pub fn missing_from(&self, catalog: &CityCatalog) -> Vec<String> {
        self.history
            .iter()
            .filter(|name| !catalog.contains(name))
            .cloned()
            .collect()
    }

    /// Accept a city: the single mutation point of a turn.
    ///
    /// Returns false, leaving the state untouched, if the name was already
    /// played or has no letters.
    pub(crate) fn record(&mut self, name: &str) -> bool {
        let key = normalize_name(name);
        let Some(letter) = last_letter(&key) else {
            return false;
        };
        if self.used.contains(&key) {
            return false;
        }

        self.used.insert(key.clone());
        self.history.push_back(key);
        self.required_letter = Some(letter);
        self.last_city_name = name.trim().to_string();
        true
    }

    pub(crate) fn set_turn(&mut self, turn: Turn) {
        self.turn = turn;
    }
}
