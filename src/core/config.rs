//! Race configuration.
//!
//! All tunables of a game live here: how many points win, how many lives the
//! player gets, how long a round lasts and how long the engine waits between
//! rounds. The defaults reproduce the arcade rules (5 to win, 3 lives, 10
//! seconds per problem).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::RaceError;

/// Complete race configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Score that ends the game in a win.
    pub target_score: u32,

    /// Lives at game start. Also the upper bound for lives.
    pub starting_lives: u32,

    /// Seconds on the clock at the start of each round.
    pub round_seconds: u32,

    /// Seconds of "3, 2, 1" before the first round. The "GO" beat follows.
    pub countdown_seconds: u32,

    /// Interval between timer ticks.
    pub tick_interval: Duration,

    /// Pause after a correct answer before the next round.
    pub correct_delay: Duration,

    /// Pause after a miss before the next round. Longer so the hint can be read.
    pub wrong_delay: Duration,

    /// Rejected distractor draws before falling back to an outward scan.
    pub max_distractor_attempts: u32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            target_score: 5,
            starting_lives: 3,
            round_seconds: 10,
            countdown_seconds: 3,
            tick_interval: Duration::from_secs(1),
            correct_delay: Duration::from_millis(800),
            wrong_delay: Duration::from_millis(2000),
            max_distractor_attempts: 1000,
        }
    }
}

impl RaceConfig {
    /// Set the winning score.
    #[must_use]
    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = target;
        self
    }

    /// Set the starting lives.
    #[must_use]
    pub fn with_starting_lives(mut self, lives: u32) -> Self {
        self.starting_lives = lives;
        self
    }

    /// Set the per-round time limit in seconds.
    #[must_use]
    pub fn with_round_seconds(mut self, seconds: u32) -> Self {
        self.round_seconds = seconds;
        self
    }

    /// Set the pre-game countdown length.
    #[must_use]
    pub fn with_countdown_seconds(mut self, seconds: u32) -> Self {
        self.countdown_seconds = seconds;
        self
    }

    /// Set both inter-round delays.
    #[must_use]
    pub fn with_delays(mut self, correct: Duration, wrong: Duration) -> Self {
        self.correct_delay = correct;
        self.wrong_delay = wrong;
        self
    }

    /// Set the distractor retry cap.
    #[must_use]
    pub fn with_max_distractor_attempts(mut self, attempts: u32) -> Self {
        self.max_distractor_attempts = attempts;
        self
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), RaceError> {
        let invalid = |reason: &str| Err(RaceError::InvalidConfig(reason.to_string()));

        if self.target_score == 0 {
            return invalid("target_score must be at least 1");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives must be at least 1");
        }
        if self.round_seconds == 0 {
            return invalid("round_seconds must be at least 1");
        }
        if self.tick_interval.is_zero() {
            return invalid("tick_interval must be non-zero");
        }
        Ok(())
    }
}
