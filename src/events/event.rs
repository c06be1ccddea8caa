//! Outbound engine events.
//!
//! Everything the outside world needs to render, play or persist is
//! announced as an [`EngineEvent`]. The engine queues events in the order
//! they happen; the host drains them after each command or fired task.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::GameResult;
use crate::problems::{Operator, OPTION_COUNT};

/// How a submitted answer was judged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// What closed the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// The player picked an option.
    Answered,
    /// The round clock ran out.
    TimedOut,
}

impl Resolution {
    /// Status line for the presenter.
    #[must_use]
    pub fn message(self, outcome: Outcome) -> &'static str {
        match (self, outcome) {
            (Resolution::TimedOut, _) => "Time expired! Your car slides back.",
            (Resolution::Answered, Outcome::Correct) => "Correct!",
            (Resolution::Answered, Outcome::Incorrect) => "Incorrect. Your car slides back!",
        }
    }
}

/// Which tone the sound cue should play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToneKind {
    Correct,
    Incorrect,
}

impl ToneKind {
    /// Sine frequency: C5 for a hit, F4 for a miss.
    #[must_use]
    pub fn frequency_hz(self) -> f32 {
        match self {
            ToneKind::Correct => 523.25,
            ToneKind::Incorrect => 349.23,
        }
    }

    /// Length of the exponential fade-out.
    #[must_use]
    pub fn duration(self) -> Duration {
        Duration::from_millis(300)
    }
}

/// Something the engine did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Pre-game countdown beat. `0` is "GO".
    CountdownTick { remaining: u32 },
    ProblemPresented {
        operand_a: u32,
        operand_b: u32,
        operator: Operator,
    },
    OptionsPresented { values: [u32; OPTION_COUNT] },
    TimerTick { seconds_left: u32 },
    AnswerResult {
        outcome: Outcome,
        resolution: Resolution,
        /// Solved equation, present on misses.
        hint: Option<String>,
    },
    ScoreChanged { score: u32 },
    CarMoved { position: f32 },
    LivesChanged { count: u32 },
    GameEnded { result: GameResult, final_score: u32 },
    PlayTone { kind: ToneKind },
    UpdateBestScore { new_value: u32 },
}

impl EngineEvent {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::CountdownTick { .. } => "CountdownTick",
            EngineEvent::ProblemPresented { .. } => "ProblemPresented",
            EngineEvent::OptionsPresented { .. } => "OptionsPresented",
            EngineEvent::TimerTick { .. } => "TimerTick",
            EngineEvent::AnswerResult { .. } => "AnswerResult",
            EngineEvent::ScoreChanged { .. } => "ScoreChanged",
            EngineEvent::CarMoved { .. } => "CarMoved",
            EngineEvent::LivesChanged { .. } => "LivesChanged",
            EngineEvent::GameEnded { .. } => "GameEnded",
            EngineEvent::PlayTone { .. } => "PlayTone",
            EngineEvent::UpdateBestScore { .. } => "UpdateBestScore",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_frequencies() {
        assert!(ToneKind::Correct.frequency_hz() > ToneKind::Incorrect.frequency_hz());
        assert_eq!(ToneKind::Incorrect.duration(), Duration::from_millis(300));
    }

    #[test]
    fn test_timeout_message_ignores_outcome() {
        assert_eq!(
            Resolution::TimedOut.message(Outcome::Incorrect),
            Resolution::TimedOut.message(Outcome::Correct)
        );
        assert_ne!(
            Resolution::Answered.message(Outcome::Incorrect),
            Resolution::TimedOut.message(Outcome::Incorrect)
        );
    }

    #[test]
    fn test_event_serialization() {
        let event = EngineEvent::AnswerResult {
            outcome: Outcome::Incorrect,
            resolution: Resolution::TimedOut,
            hint: Some("28 ÷ 7 = 4".to_string()),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
        assert_eq!(deserialized.name(), "AnswerResult");
    }
}
