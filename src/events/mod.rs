//! Command/event interface between the engine and its surroundings.
//!
//! Commands flow in (start, answer, restart); events flow out to whatever
//! renders the race, plays tones and stores the best score. The engine knows
//! nothing about how any of that is done.

mod command;
mod event;

pub use command::Command;
pub use event::{EngineEvent, Outcome, Resolution, ToneKind};
