//! The round engine and its support types.
//!
//! - `RoundEngine`: state machine driving a race
//! - `RaceBuilder`: wires config, seed and collaborators together
//! - `RoundHistory`: what happened in each round of the current game

mod builder;
mod history;
mod round_engine;

pub use builder::RaceBuilder;
pub use history::{HistorySummary, OperatorTally, RoundHistory, RoundRecord};
pub use round_engine::RoundEngine;
