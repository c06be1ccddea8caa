//! # math-race
//!
//! Round engine for a timed multiple-choice arithmetic race.
//!
//! A player answers arithmetic problems against a 10 second clock. Each hit
//! moves their car one step along the track, each miss or timeout costs a
//! life and a step back. Reaching the target score wins; running out of
//! lives loses.
//!
//! ## Design Principles
//!
//! 1. **Event-driven**: The engine only moves on commands (start, answer,
//!    restart) and on scheduled tasks it asked for. It never blocks.
//!
//! 2. **Deterministic**: All randomness comes from a seeded `GameRng`, all
//!    time from an injected `Scheduler`. A seed plus a command log replays a
//!    game exactly.
//!
//! 3. **No rendering**: Output is a stream of `EngineEvent`s. Sound and
//!    storage are traits the host implements.
//!
//! ## Modules
//!
//! - `core`: State, phases, configuration, RNG, errors
//! - `problems`: Problem and answer-option generation
//! - `timing`: Scheduler capability and the round timer
//! - `events`: Inbound commands and outbound events
//! - `services`: Sound cue and best-score store collaborators
//! - `engine`: The round engine, builder and round history
//!
//! ## Example
//!
//! ```
//! use math_race::{Phase, RaceBuilder};
//!
//! let mut engine = RaceBuilder::new().seed(7).build().unwrap();
//! engine.start_game().unwrap();
//! assert_eq!(engine.run_until_input(), Phase::RoundActive);
//!
//! let answer = engine.problem().unwrap().correct_answer;
//! engine.submit_answer(answer);
//! assert_eq!(engine.state().score(), 1);
//! ```

pub mod core;
pub mod engine;
pub mod events;
pub mod problems;
pub mod services;
pub mod timing;

// Re-export commonly used types
pub use crate::core::{
    car_position, GameResult, GameRng, GameState, Phase, RaceConfig, RaceError,
    SoundError, StoreError,
};

pub use crate::engine::{
    HistorySummary, OperatorTally, RaceBuilder, RoundEngine, RoundHistory, RoundRecord,
};

pub use crate::events::{Command, EngineEvent, Outcome, Resolution, ToneKind};

pub use crate::problems::{OptionSet, Operator, Problem, OPTION_COUNT};

pub use crate::services::{
    BestScoreStore, FileStore, MemoryStore, NullStore, RecordingCue, SilentCue, SoundCue,
    BEST_SCORE_KEY,
};

pub use crate::timing::{ManualClock, RoundTimer, Scheduler, Task, TaskHandle, TimerStep};
