//! Game rules: the turn engine and its outcomes.
//!
//! The engine answers three questions:
//! - Is the human's city acceptable?
//! - Which city does the computer answer with?
//! - Is the chain broken (no legal city left)?

pub mod engine;

pub use engine::{Outcome, Phase, TurnEngine, TurnRejection, TurnResult};
