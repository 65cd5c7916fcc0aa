//! Running a game: the controller loop and the channel to the player.
//!
//! The controller only needs a `TurnIo` to get the human's next line, so the
//! same loop serves the interactive console and scripted test drivers.

mod controller;
mod events;
mod io;

pub use controller::{GameController, RunResult};
pub use events::{GameEvent, Prompt};
pub use io::{ConsoleIo, ScriptedIo, TurnIo};
