//! The game loop: load or start, alternate turns, save after each one.

use tracing::{debug, info, warn};

use super::events::{GameEvent, Prompt};
use super::io::TurnIo;
use crate::core::{ChoiceSource, GameState, Turn};
use crate::error::ControllerError;
use crate::persistence::GameStore;
use crate::rules::{Outcome, Phase, TurnEngine, TurnResult};

/// How `GameController::run` returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunResult {
    /// The game reached an outcome.
    Finished(Outcome),
    /// Input ran out mid-game. The game is saved and can be resumed.
    Suspended,
}

/// Drives one game from launch to outcome.
pub struct GameController<R: ChoiceSource, S: GameStore, I: TurnIo> {
    engine: TurnEngine<R>,
    state: GameState,
    store: S,
    io: I,
}

impl<R: ChoiceSource, S: GameStore, I: TurnIo> GameController<R, S, I> {
    pub fn new(engine: TurnEngine<R>, store: S, io: I) -> Self {
        Self {
            engine,
            state: GameState::new(),
            store,
            io,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &TurnEngine<R> {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    /// Take the controller apart after a run.
    pub fn into_parts(self) -> (TurnEngine<R>, GameState, S, I) {
        (self.engine, self.state, self.store, self.io)
    }

    /// Throw away any saved game so the next launch starts fresh.
    pub fn discard_saved_game(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to discard saved game");
        }
    }

    /// Play until an outcome is reached or input runs out.
    pub fn run(&mut self) -> Result<RunResult, ControllerError> {
        if self.engine.phase() == Phase::NotStarted {
            self.launch()?;
        }

        loop {
            if let Some(outcome) = self.engine.outcome() {
                return self.finish(outcome);
            }
            if self.engine.phase() == Phase::AwaitingComputerMove {
                self.computer_step()?;
                continue;
            }
            if let Some(outcome) = self.engine.finish_if_stuck(&self.state) {
                return self.finish(outcome);
            }

            let prompt = Prompt {
                required_letter: self.state.required_letter(),
                last_city_name: self.state.last_city_name().to_string(),
            };
            let Some(line) = self.io.next_human_input(&prompt)? else {
                info!(cities = self.state.used_count(), "input closed, game suspended");
                return Ok(RunResult::Suspended);
            };

            self.human_step(&line)?;
        }
    }

    fn human_step(&mut self, line: &str) -> Result<(), ControllerError> {
        match self.engine.submit_human_city(&mut self.state, line)? {
            TurnResult::Rejected(rejection) => {
                debug!(input = line, ?rejection, "human city rejected");
            }
            TurnResult::Accepted(city) => {
                debug!(city = %city.name, "human city accepted");
                self.persist()?;
                self.io.announce(&GameEvent::HumanAccepted(city))?;
            }
        }
        Ok(())
    }

    fn computer_step(&mut self) -> Result<(), ControllerError> {
        match self.engine.computer_turn(&mut self.state)? {
            TurnResult::Rejected(rejection) => {
                debug!(?rejection, "computer has no reply");
            }
            TurnResult::Accepted(city) => {
                debug!(
                    city = %city.name,
                    left = self.engine.candidates(&self.state).len(),
                    "computer city played"
                );
                self.persist()?;
                self.io.announce(&GameEvent::ComputerPlayed(city))?;
            }
        }
        Ok(())
    }

    /// Restore the saved game, or open a new one.
    ///
    /// A saved game that already reached an outcome is kept only as a record;
    /// the next launch replaces it with a new game.
    fn launch(&mut self) -> Result<(), ControllerError> {
        match self.store.load() {
            Ok(Some(state)) if state.is_finished() => {
                info!(
                    last_city = state.last_city_name(),
                    cities = state.used_count(),
                    "saved game already finished, starting a new one"
                );
            }
            Ok(Some(state)) if state.is_started() => return self.restore(state),
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "saved game unreadable, starting a new one");
                self.io.announce(&GameEvent::StaleSnapshot(e.to_string()))?;
            }
        }

        let city = self.engine.start(&mut self.state)?;
        info!(city = %city.name, catalog = self.engine.catalog().len(), "new game started");
        self.persist()?;
        self.io.announce(&GameEvent::Started(city))?;
        Ok(())
    }

    fn restore(&mut self, state: GameState) -> Result<(), ControllerError> {
        let missing = state.missing_from(self.engine.catalog());
        if !missing.is_empty() {
            warn!(?missing, "saved game names cities the catalog does not know");
        }

        self.engine.resume(&state)?;
        self.state = state;
        info!(
            last_city = self.state.last_city_name(),
            cities = self.state.used_count(),
            "saved game restored"
        );
        self.io.announce(&GameEvent::Restored {
            last_city_name: self.state.last_city_name().to_string(),
            used: self.state.used_count(),
        })?;
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) -> Result<RunResult, ControllerError> {
        info!(%outcome, cities = self.state.used_count(), "game finished");
        self.state.set_turn(Turn::Finished);
        self.persist()?;
        self.io.announce(&GameEvent::Finished {
            outcome,
            chain: self.state.used_cities().map(str::to_string).collect(),
        })?;
        Ok(RunResult::Finished(outcome))
    }

    /// Save the current state. A failed save is reported, never fatal.
    fn persist(&mut self) -> Result<(), ControllerError> {
        if let Err(e) = self.store.save(&self.state) {
            warn!(error = %e, "failed to save game");
            self.io.announce(&GameEvent::SaveFailed(e.to_string()))?;
        }
        Ok(())
    }
}
