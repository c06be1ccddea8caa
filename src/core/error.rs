//! Error types.
//!
//! Nothing in the round logic is fatal. These errors describe rejected
//! commands, bad configuration, and collaborator failures that the engine
//! logs and swallows.

use thiserror::Error;

use super::state::Phase;

/// Errors surfaced by the engine API.
#[derive(Error, Debug)]
pub enum RaceError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("command {command} is not accepted while {phase}")]
    CommandRejected { command: &'static str, phase: Phase },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Sound(#[from] SoundError),
}

/// Best-score persistence failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("best-score storage is unavailable")]
    Unavailable,
    #[error("could not encode or decode the best-score record")]
    Codec(#[from] bincode::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Audio cue failures.
#[derive(Error, Debug)]
pub enum SoundError {
    #[error("audio output is unavailable: {0}")]
    Unavailable(String),
}
