//! On-disk form of a saved game.
//!
//! ```json
//! {
//!   "used_cities": ["boston", "norfolk"],
//!   "last_letter": "k",
//!   "last_city_name": "Norfolk",
//!   "computer_to_move": false,
//!   "finished": true
//! }
//! ```
//!
//! `last_letter` is a one-character string, empty before the first city.
//! Files without the last three fields load as a game waiting for the human.

use serde::{Deserialize, Serialize};

use crate::core::{fold_char, GameState, Turn};
use crate::error::PersistError;

/// Serializable snapshot of a `GameState`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Played cities, normalized, in the order they were named.
    pub used_cities: Vec<String>,
    pub last_letter: String,
    #[serde(default)]
    pub last_city_name: String,
    /// The human's city was saved but the computer has not replied yet.
    #[serde(default)]
    pub computer_to_move: bool,
    #[serde(default)]
    pub finished: bool,
}

impl Snapshot {
    /// Capture a state.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            used_cities: state.used_cities().map(str::to_string).collect(),
            last_letter: state
                .required_letter()
                .map(String::from)
                .unwrap_or_default(),
            last_city_name: state.last_city_name().to_string(),
            computer_to_move: state.turn() == Turn::Computer,
            finished: state.is_finished(),
        }
    }

    /// Turn the snapshot back into a state, checking its invariant.
    pub fn into_state(self) -> Result<GameState, PersistError> {
        let mut letters = self.last_letter.trim().chars();
        let letter = letters.next().map(fold_char);
        if letters.next().is_some() {
            return Err(PersistError::Invalid(format!(
                "last_letter {:?} is not a single character",
                self.last_letter
            )));
        }

        let turn = match (self.finished, self.computer_to_move) {
            (false, false) => Turn::Human,
            (false, true) => Turn::Computer,
            (true, false) => Turn::Finished,
            (true, true) => {
                return Err(PersistError::Invalid(
                    "a finished game cannot have the computer to move".to_string(),
                ))
            }
        };

        let last_city_name = self.last_city_name.clone();
        GameState::restore(self.used_cities, letter, self.last_city_name)
            .map(|state| state.with_turn(turn))
            .ok_or_else(|| {
                PersistError::Invalid(format!(
                    "last_letter {:?} does not end last_city_name {:?}",
                    self.last_letter, last_city_name
                ))
            })
    }
}

/// Serialize a state to the snapshot JSON text.
pub fn encode(state: &GameState) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(&Snapshot::capture(state))?)
}

/// Parse snapshot JSON text into a state.
pub fn decode(text: &str) -> Result<GameState, PersistError> {
    serde_json::from_str::<Snapshot>(text)?.into_state()
}
