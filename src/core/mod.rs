//! Core engine types: state, phases, configuration, RNG, errors.
//!
//! Everything here is independent of how a round is generated or timed.

pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use config::RaceConfig;
pub use error::{RaceError, SoundError, StoreError};
pub use rng::GameRng;
pub use state::{car_position, GameResult, GameState, Phase};
