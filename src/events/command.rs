//! Inbound commands from the presenter.

use serde::{Deserialize, Serialize};

/// A player action routed to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Leave the start screen and begin the countdown.
    StartGame,
    /// The player clicked the option showing this value.
    SubmitAnswer(u32),
    /// Throw away the current game and count down to a fresh one.
    Restart,
}

impl Command {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Command::StartGame => "StartGame",
            Command::SubmitAnswer(_) => "SubmitAnswer",
            Command::Restart => "Restart",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::SubmitAnswer(value) => write!(f, "SubmitAnswer({value})"),
            other => f.write_str(other.name()),
        }
    }
}
