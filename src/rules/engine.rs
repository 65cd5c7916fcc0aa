//! The turn engine: validates the human's city, picks the computer's reply
//! and decides when the chain is broken.
//!
//! ## Phases
//!
//! ```text
//! NotStarted --start/resume--> AwaitingHumanMove
//! NotStarted --resume (computer to move)--> AwaitingComputerMove
//! AwaitingHumanMove --accepted--> AwaitingComputerMove
//! AwaitingHumanMove --rejected--> Finished(HumanLost)
//! AwaitingHumanMove --finish_if_stuck--> Finished(ComputerWon)
//! AwaitingComputerMove --played--> AwaitingHumanMove
//! AwaitingComputerMove --no candidates--> Finished(HumanWon)
//! ```
//!
//! The engine owns the catalog and the choice source. `GameState` stays with
//! the caller and is lent to each operation, so the caller decides when to
//! persist it. Accepted moves also update `GameState::turn`, so a saved state
//! says whose move comes next.

use crate::core::{first_letter, ChoiceSource, CityCatalog, CityRecord, GameState, Turn};
use crate::error::EngineError;

/// Why a move was not accepted.
///
/// These are ordinary game results, not errors: every one of them ends the
/// game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnRejection {
    /// The city was already named in this game.
    AlreadyUsed,
    /// The catalog has no city by that name (including blank input).
    UnknownCity,
    /// The city does not start with the required letter.
    WrongLetter,
    /// No unused city starts with the required letter.
    NoCandidates,
}

impl std::fmt::Display for TurnRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TurnRejection::AlreadyUsed => "that city has already been named",
            TurnRejection::UnknownCity => "no such city in the catalog",
            TurnRejection::WrongLetter => "that city starts with the wrong letter",
            TurnRejection::NoCandidates => "no unused city starts with the required letter",
        };
        f.write_str(text)
    }
}

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The computer had no city to reply with.
    HumanWon,
    /// After the computer's move no city is left for the human.
    ComputerWon,
    /// The human's city was rejected.
    HumanLost(TurnRejection),
}

impl Outcome {
    /// Whether the human won.
    #[must_use]
    pub fn human_won(&self) -> bool {
        matches!(self, Outcome::HumanWon)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::HumanWon => write!(f, "you won: the computer has no city left"),
            Outcome::ComputerWon => write!(f, "the computer won: no city is left for you"),
            Outcome::HumanLost(reason) => write!(f, "you lost: {reason}"),
        }
    }
}

/// Where the engine is in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    NotStarted,
    AwaitingHumanMove,
    AwaitingComputerMove,
    Finished(Outcome),
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::NotStarted => write!(f, "not started"),
            Phase::AwaitingHumanMove => write!(f, "awaiting the human move"),
            Phase::AwaitingComputerMove => write!(f, "awaiting the computer move"),
            Phase::Finished(outcome) => write!(f, "finished ({outcome})"),
        }
    }
}

/// Result of a single move.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnResult {
    /// The move was accepted; carries the catalog record of the city.
    Accepted(CityRecord),
    /// The move was refused and the game is over.
    Rejected(TurnRejection),
}

impl TurnResult {
    /// The accepted city, if any.
    #[must_use]
    pub fn accepted(&self) -> Option<&CityRecord> {
        match self {
            TurnResult::Accepted(city) => Some(city),
            TurnResult::Rejected(_) => None,
        }
    }
}

/// Validation and selection logic for one game.
#[derive(Clone, Debug)]
pub struct TurnEngine<R: ChoiceSource> {
    catalog: CityCatalog,
    rng: R,
    phase: Phase,
}

impl<R: ChoiceSource> TurnEngine<R> {
    /// Create an engine over a catalog with the given choice source.
    pub fn new(catalog: CityCatalog, rng: R) -> Self {
        Self {
            catalog,
            rng,
            phase: Phase::NotStarted,
        }
    }

    /// The catalog this engine plays over.
    pub fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The outcome, once the game is finished.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Open a new game with a uniformly random city from the whole catalog.
    ///
    /// Replaces whatever `state` held.
    pub fn start(&mut self, state: &mut GameState) -> Result<CityRecord, EngineError> {
        self.expect_phase(Phase::NotStarted)?;

        let records = self.catalog.records();
        let index = self
            .rng
            .choose_index(records.len())
            .ok_or(EngineError::EmptyCatalog)?;
        let city = records.get(index).ok_or(EngineError::EmptyCatalog)?;

        let mut fresh = GameState::new();
        fresh.record(&city.name);
        *state = fresh;

        self.phase = Phase::AwaitingHumanMove;
        Ok(played(city))
    }

    /// Continue a restored game from whichever move it was waiting for.
    pub fn resume(&mut self, state: &GameState) -> Result<(), EngineError> {
        self.expect_phase(Phase::NotStarted)?;
        if !state.is_started() {
            return Err(EngineError::NotStarted);
        }
        self.phase = match state.turn() {
            Turn::Human => Phase::AwaitingHumanMove,
            Turn::Computer => Phase::AwaitingComputerMove,
            Turn::Finished => return Err(EngineError::AlreadyFinished),
        };
        Ok(())
    }

    /// Check and apply the human's city.
    ///
    /// Rejections are checked in order: already used, unknown, wrong letter.
    /// A rejection finishes the game and leaves `state` untouched.
    pub fn submit_human_city(
        &mut self,
        state: &mut GameState,
        name: &str,
    ) -> Result<TurnResult, EngineError> {
        self.expect_phase(Phase::AwaitingHumanMove)?;

        match self.check_human_city(state, name) {
            Ok(city) => {
                let city = city.clone();
                if !state.record(&city.name) {
                    return Ok(self.reject_human(TurnRejection::AlreadyUsed));
                }
                state.set_turn(Turn::Computer);
                self.phase = Phase::AwaitingComputerMove;
                Ok(TurnResult::Accepted(played(&city)))
            }
            Err(rejection) => Ok(self.reject_human(rejection)),
        }
    }

    /// Let the computer reply with a uniformly random legal city.
    ///
    /// With no legal city the human wins and `state` is left as it was. An
    /// out-of-range pick from the choice source counts as no city.
    pub fn computer_turn(&mut self, state: &mut GameState) -> Result<TurnResult, EngineError> {
        self.expect_phase(Phase::AwaitingComputerMove)?;

        let candidates = candidates(&self.catalog, state);
        let Some(city) = self
            .rng
            .choose_index(candidates.len())
            .and_then(|index| candidates.get(index))
            .map(|city| played(city))
        else {
            self.phase = Phase::Finished(Outcome::HumanWon);
            return Ok(TurnResult::Rejected(TurnRejection::NoCandidates));
        };

        state.record(&city.name);
        state.set_turn(Turn::Human);
        self.phase = Phase::AwaitingHumanMove;
        Ok(TurnResult::Accepted(city))
    }

    /// True iff no unused city starts with the current required letter.
    ///
    /// Pure: never touches `state` or the phase.
    #[must_use]
    pub fn is_terminal(&self, state: &GameState) -> bool {
        match state.required_letter() {
            Some(_) => candidates(&self.catalog, state).is_empty(),
            None => self
                .catalog
                .records()
                .iter()
                .all(|city| state.is_used(&city.name)),
        }
    }

    /// Legal replies for the current required letter, in catalog order.
    #[must_use]
    pub fn candidates<'a>(&'a self, state: &GameState) -> Vec<&'a CityRecord> {
        candidates(&self.catalog, state)
    }

    /// End the game early if the human has no legal city left.
    ///
    /// Only meaningful while the human is to move; returns the outcome if the
    /// game was finished.
    pub fn finish_if_stuck(&mut self, state: &GameState) -> Option<Outcome> {
        if self.phase == Phase::AwaitingHumanMove && self.is_terminal(state) {
            self.phase = Phase::Finished(Outcome::ComputerWon);
            return Some(Outcome::ComputerWon);
        }
        None
    }

    fn check_human_city(&self, state: &GameState, name: &str) -> Result<&CityRecord, TurnRejection> {
        if state.is_used(name) {
            return Err(TurnRejection::AlreadyUsed);
        }
        let city = self.catalog.find(name).ok_or(TurnRejection::UnknownCity)?;
        if first_letter(name) != state.required_letter() {
            return Err(TurnRejection::WrongLetter);
        }
        Ok(city)
    }

    fn reject_human(&mut self, rejection: TurnRejection) -> TurnResult {
        self.phase = Phase::Finished(Outcome::HumanLost(rejection));
        TurnResult::Rejected(rejection)
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), EngineError> {
        if self.phase == expected {
            return Ok(());
        }
        match self.phase {
            Phase::NotStarted => Err(EngineError::NotStarted),
            phase => Err(EngineError::OutOfTurn { phase }),
        }
    }
}

fn candidates<'a>(catalog: &'a CityCatalog, state: &GameState) -> Vec<&'a CityRecord> {
    let Some(letter) = state.required_letter() else {
        return Vec::new();
    };
    catalog
        .starting_with(letter)
        .filter(|city| !state.is_used(&city.name))
        .collect()
}

fn played(city: &CityRecord) -> CityRecord {
    CityRecord {
        used: true,
        ..city.clone()
    }
}
