//! Game controller integration tests.
//!
//! Whole games are driven through `ScriptedIo` so every prompt and
//! announcement can be checked.

use std::io::Write;
use std::sync::{Arc, Mutex};

use city_chain::core::{ChoiceSource, CityCatalog, CityRecord, GameState, Turn};
use city_chain::error::PersistError;
use city_chain::game::{GameController, GameEvent, RunResult, ScriptedIo};
use city_chain::persistence::{GameStore, JsonFileStore, MemoryStore};
use city_chain::rules::{Outcome, TurnEngine, TurnRejection};

/// Picks the first choice every time.
struct First;

impl ChoiceSource for First {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then_some(0)
    }
}

/// A store whose saves always fail.
#[derive(Default)]
struct BrokenStore {
    attempts: usize,
}

impl GameStore for BrokenStore {
    fn save(&mut self, _state: &GameState) -> Result<(), PersistError> {
        self.attempts += 1;
        Err(PersistError::Io {
            path: "save.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn load(&mut self) -> Result<Option<GameState>, PersistError> {
        Ok(None)
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        Ok(())
    }
}

/// Captures formatted log output.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn engine(names: &[&str]) -> TurnEngine<First> {
    let catalog = CityCatalog::new(names.iter().map(|n| CityRecord::named(*n)).collect()).unwrap();
    TurnEngine::new(catalog, First)
}

fn finished(events: &[GameEvent]) -> Option<&GameEvent> {
    events.iter().find(|e| matches!(e, GameEvent::Finished { .. }))
}

#[test]
fn test_new_game_human_wins() {
    let mut controller = GameController::new(
        engine(&["Boston", "Nashville", "Norfolk"]),
        MemoryStore::new(),
        ScriptedIo::new(["Norfolk"]),
    );

    let result = controller.run().unwrap();

    assert_eq!(result, RunResult::Finished(Outcome::HumanWon));
    let (_, state, store, io) = controller.into_parts();

    assert_eq!(io.prompts().len(), 1);
    assert_eq!(io.prompts()[0].required_letter, Some('n'));
    assert!(matches!(&io.events()[0], GameEvent::Started(c) if c.name == "Boston"));
    assert!(matches!(&io.events()[1], GameEvent::HumanAccepted(c) if c.name == "Norfolk"));
    assert_eq!(
        finished(io.events()),
        Some(&GameEvent::Finished {
            outcome: Outcome::HumanWon,
            chain: vec!["boston".to_string(), "norfolk".to_string()],
        })
    );

    // start, human turn, final audit save
    assert_eq!(store.saves(), 3);
    assert_eq!(store.clone().load().unwrap(), Some(state));
}

#[test]
fn test_rejection_ends_game() {
    let mut controller = GameController::new(
        engine(&["Boston", "Nashville", "Norfolk"]),
        MemoryStore::new(),
        ScriptedIo::new(["Atlanta", "Norfolk"]),
    );

    let result = controller.run().unwrap();

    assert_eq!(
        result,
        RunResult::Finished(Outcome::HumanLost(TurnRejection::UnknownCity))
    );
    assert_eq!(controller.io().remaining(), 1);
    assert_eq!(controller.state().used_count(), 1);
    // start and final save only; the rejection itself changes nothing
    assert_eq!(controller.store().saves(), 2);
}

#[test]
fn test_computer_wins_when_human_is_stuck() {
    let mut controller = GameController::new(
        engine(&["Boston", "Nashville", "Essen"]),
        MemoryStore::new(),
        ScriptedIo::new(["Nashville"]),
    );

    let result = controller.run().unwrap();

    assert_eq!(result, RunResult::Finished(Outcome::ComputerWon));
    let events = controller.io().events();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::ComputerPlayed(c) if c.name == "Essen")));
    assert_eq!(controller.io().prompts().len(), 1);
}

#[test]
fn test_long_chain() {
    let names = ["Aab", "Bbc", "Ccd", "Dde", "Eef", "Ffa"];
    let mut controller = GameController::new(
        engine(&names),
        MemoryStore::new(),
        ScriptedIo::new(["Bbc", "Dde", "Ffa"]),
    );

    let result = controller.run().unwrap();

    // Aab, Bbc, Ccd, Dde, Eef, Ffa: every city played, then the computer is stuck on 'a'.
    assert_eq!(result, RunResult::Finished(Outcome::HumanWon));
    assert_eq!(controller.state().used_count(), 6);
    assert_eq!(controller.store().saves(), 1 + 5 + 1);
}

#[test]
fn test_suspend_and_resume() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    let names = ["Aab", "Bbc", "Ccd", "Dde", "Eef", "Ffa"];

    let mut first = GameController::new(
        engine(&names),
        JsonFileStore::new(&path),
        ScriptedIo::new(["Bbc"]),
    );
    assert_eq!(first.run().unwrap(), RunResult::Suspended);
    let saved = first.state().clone();
    assert_eq!(saved.last_city_name(), "Ccd");

    let mut second = GameController::new(
        engine(&names),
        JsonFileStore::new(&path),
        ScriptedIo::new(["Dde", "Ffa"]),
    );
    let result = second.run().unwrap();

    assert_eq!(result, RunResult::Finished(Outcome::HumanWon));
    assert_eq!(
        second.io().events()[0],
        GameEvent::Restored {
            last_city_name: "Ccd".to_string(),
            used: 3,
        }
    );
    assert_eq!(second.io().prompts()[0].required_letter, Some('d'));
    assert_eq!(second.state().used_count(), 6);
}

#[test]
fn test_corrupt_snapshot_starts_new_game() {
    let mut controller = GameController::new(
        engine(&["Boston", "Nashville", "Norfolk"]),
        MemoryStore::with_text("{\"used_cities\": [\"bos"),
        ScriptedIo::new(Vec::<String>::new()),
    );

    let result = controller.run().unwrap();

    assert_eq!(result, RunResult::Suspended);
    let events = controller.io().events();
    assert!(matches!(events[0], GameEvent::StaleSnapshot(_)));
    assert!(matches!(&events[1], GameEvent::Started(c) if c.name == "Boston"));
    assert_eq!(
        controller.store().clone().load().unwrap().unwrap().last_city_name(),
        "Boston"
    );
}

#[test]
fn test_unstarted_snapshot_starts_new_game() {
    let mut store = MemoryStore::new();
    store.save(&GameState::new()).unwrap();

    let mut controller = GameController::new(
        engine(&["Boston", "Nashville"]),
        store,
        ScriptedIo::new(Vec::<String>::new()),
    );
    controller.run().unwrap();

    assert!(matches!(&controller.io().events()[0], GameEvent::Started(_)));
}

#[test]
fn test_save_failure_is_reported_not_fatal() {
    let mut controller = GameController::new(
        engine(&["Boston", "Nashville", "Norfolk"]),
        BrokenStore::default(),
        ScriptedIo::new(["Norfolk"]),
    );

    let result = controller.run().unwrap();

    assert_eq!(result, RunResult::Finished(Outcome::HumanWon));
    assert_eq!(controller.store().attempts, 3);
    let failures = controller
        .io()
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::SaveFailed(_)))
        .count();
    assert_eq!(failures, 3);
    assert!(finished(controller.io().events()).is_some());
}

#[test]
fn test_discard_saved_game() {
    let saved = GameState::restore(
        vec!["Nashville".to_string()],
        Some('e'),
        "Nashville",
    )
    .unwrap();
    let mut store = MemoryStore::new();
    store.save(&saved).unwrap();

    let mut controller = GameController::new(
        engine(&["Boston", "Nashville", "Norfolk"]),
        store,
        ScriptedIo::new(Vec::<String>::new()),
    );
    controller.discard_saved_game();
    controller.run().unwrap();

    assert!(matches!(&controller.io().events()[0], GameEvent::Started(c) if c.name == "Boston"));
}

// =============================================================================
// Relaunching
// =============================================================================

#[test]
fn test_relaunch_after_human_won_starts_new_game() {
    let mut first = GameController::new(
        engine(&["Boston", "Norfolk", "Nashville"]),
        MemoryStore::new(),
        ScriptedIo::new(["Norfolk"]),
    );
    assert_eq!(first.run().unwrap(), RunResult::Finished(Outcome::HumanWon));
    let (_, _, store, _) = first.into_parts();
    assert!(store.clone().load().unwrap().unwrap().is_finished());

    let mut second = GameController::new(
        engine(&["Boston", "Norfolk", "Nashville", "Kiel"]),
        store,
        ScriptedIo::new(Vec::<String>::new()),
    );
    assert_eq!(second.run().unwrap(), RunResult::Suspended);

    let events = second.io().events();
    assert!(matches!(&events[0], GameEvent::Started(c) if c.name == "Boston"));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Restored { .. })));
    assert_eq!(second.io().prompts()[0].required_letter, Some('n'));
    assert_eq!(second.state().used_count(), 1);
}

#[test]
fn test_relaunch_after_rejection_starts_new_game() {
    let mut first = GameController::new(
        engine(&["Boston", "Nashville", "Norfolk"]),
        MemoryStore::new(),
        ScriptedIo::new(["Atlanta"]),
    );
    assert_eq!(
        first.run().unwrap(),
        RunResult::Finished(Outcome::HumanLost(TurnRejection::UnknownCity))
    );
    let (_, _, store, _) = first.into_parts();

    let mut second = GameController::new(
        engine(&["Boston", "Nashville", "Norfolk"]),
        store,
        ScriptedIo::new(["Atlanta"]),
    );
    second.run().unwrap();

    assert!(matches!(&second.io().events()[0], GameEvent::Started(_)));
    assert!(second.io().events().iter().all(|e| !matches!(e, GameEvent::Restored { .. })));
}

#[test]
fn test_relaunch_with_computer_to_move() {
    let saved = GameState::restore(
        vec!["Boston".to_string(), "Nashville".to_string()],
        Some('e'),
        "Nashville",
    )
    .unwrap()
    .with_turn(Turn::Computer);
    let mut store = MemoryStore::new();
    store.save(&saved).unwrap();

    let mut controller = GameController::new(
        engine(&["Boston", "Nashville", "Essen", "Norfolk"]),
        store,
        ScriptedIo::new(Vec::<String>::new()),
    );
    assert_eq!(controller.run().unwrap(), RunResult::Suspended);

    let events = controller.io().events();
    assert!(matches!(events[0], GameEvent::Restored { used: 2, .. }));
    assert!(matches!(&events[1], GameEvent::ComputerPlayed(c) if c.name == "Essen"));
    assert_eq!(controller.io().prompts()[0].required_letter, Some('n'));
    assert_eq!(controller.state().turn(), Turn::Human);
}

#[test]
fn test_restore_with_cities_missing_from_catalog() {
    let saved = GameState::restore(
        vec!["Nantes".to_string(), "Boston".to_string()],
        Some('n'),
        "Boston",
    )
    .unwrap();
    let mut store = MemoryStore::new();
    store.save(&saved).unwrap();

    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer({
            let logs = logs.clone();
            move || logs.clone()
        })
        .finish();

    let mut controller = GameController::new(
        engine(&["Boston", "Nashville"]),
        store,
        ScriptedIo::new(["Nashville"]),
    );
    let result = tracing::subscriber::with_default(subscriber, || controller.run().unwrap());

    assert_eq!(result, RunResult::Finished(Outcome::HumanWon));
    assert!(matches!(controller.io().events()[0], GameEvent::Restored { used: 2, .. }));
    let logs = logs.contents();
    assert!(logs.contains("saved game names cities the catalog does not know"));
    assert!(logs.contains("nantes"));
}
