//! What the controller tells the player.

use std::fmt;

use crate::core::CityRecord;
use crate::rules::Outcome;

/// Context shown when asking the human for a city.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub required_letter: Option<char>,
    pub last_city_name: String,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.required_letter {
            Some(letter) => write!(
                f,
                "Your city after {} (starts with '{}'): ",
                self.last_city_name,
                letter.to_uppercase()
            ),
            None => write!(f, "Your city: "),
        }
    }
}

/// Something that happened in the game, in the order it happened.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A new game opened with this city.
    Started(CityRecord),
    /// A saved game was picked up where it left off.
    Restored {
        last_city_name: String,
        used: usize,
    },
    /// The saved game could not be read; a new game follows.
    StaleSnapshot(String),
    HumanAccepted(CityRecord),
    ComputerPlayed(CityRecord),
    /// Progress could not be saved; the game goes on.
    SaveFailed(String),
    /// The game is over. `chain` lists every city named, in order.
    Finished { outcome: Outcome, chain: Vec<String> },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Started(city) => write!(f, "New game. I start: {city}"),
            GameEvent::Restored {
                last_city_name,
                used,
            } => write!(
                f,
                "Saved game restored: {used} cities named, last was {last_city_name}"
            ),
            GameEvent::StaleSnapshot(reason) => {
                write!(f, "Could not read the saved game ({reason}); starting over")
            }
            GameEvent::HumanAccepted(city) => write!(f, "Accepted: {city}"),
            GameEvent::ComputerPlayed(city) => write!(f, "My city: {city}"),
            GameEvent::SaveFailed(reason) => write!(f, "Warning: progress not saved ({reason})"),
            GameEvent::Finished { outcome, chain } => {
                write!(f, "Game over, {outcome}.")?;
                if !chain.is_empty() {
                    write!(f, "\nChain: {}", chain.join(" -> "))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::TurnRejection;

    #[test]
    fn test_prompt_display() {
        let prompt = Prompt {
            required_letter: Some('n'),
            last_city_name: "Boston".to_string(),
        };
        assert_eq!(prompt.to_string(), "Your city after Boston (starts with 'N'): ");
    }

    #[test]
    fn test_finished_display() {
        let event = GameEvent::Finished {
            outcome: Outcome::HumanLost(TurnRejection::WrongLetter),
            chain: vec!["boston".to_string(), "nashville".to_string()],
        };
        assert_eq!(
            event.to_string(),
            "Game over, you lost: that city starts with the wrong letter.\nChain: boston -> nashville"
        );
    }
}
