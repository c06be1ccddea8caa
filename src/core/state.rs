//! Game state and engine phases.
//!
//! ## GameState
//!
//! The scalar state of one race: score, lives and the winning target.
//! Only the round engine mutates it. The clamping rules live here so they
//! hold no matter which path changes the numbers:
//! - score never drops below 0
//! - lives stay within `[0, starting_lives]`
//!
//! ## Phase
//!
//! Where the engine is in its lifecycle:
//!
//! ```text
//! Idle -> CountdownToStart -> RoundActive -> RoundResolvedPendingNext -> RoundActive
//!                                                                     \-> Win | Lose
//! ```

use serde::{Deserialize, Serialize};

use super::config::RaceConfig;

/// Engine lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing started yet.
    #[default]
    Idle,
    /// "3, 2, 1, GO" before the first round.
    CountdownToStart,
    /// A problem is on screen and the clock is running.
    RoundActive,
    /// The round was answered or timed out; the next one is scheduled.
    RoundResolvedPendingNext,
    /// Target score reached. Terminal until restart.
    Win,
    /// Out of lives. Terminal until restart.
    Lose,
}

impl Phase {
    /// Win or Lose.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Win | Phase::Lose)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::CountdownToStart => "counting down",
            Phase::RoundActive => "a round is active",
            Phase::RoundResolvedPendingNext => "waiting for the next round",
            Phase::Win => "won",
            Phase::Lose => "lost",
        };
        f.write_str(name)
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Lose,
}

/// Fraction of the track covered at `score`: 0.0 at the start, 1.0 at the goal.
#[must_use]
pub fn car_position(score: u32, target_score: u32) -> f32 {
    if target_score == 0 {
        return 0.0;
    }
    score as f32 / target_score as f32
}

/// Score and lives of the race in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    score: u32,
    lives: u32,
    max_lives: u32,
    target_score: u32,
}

impl GameState {
    /// Fresh state for a new game.
    #[must_use]
    pub fn new(config: &RaceConfig) -> Self {
        Self {
            score: 0,
            lives: config.starting_lives,
            max_lives: config.starting_lives,
            target_score: config.target_score,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    #[must_use]
    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    /// Back to score 0 and full lives.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.max_lives;
    }

    /// Add one point. Returns the new score.
    pub fn award_point(&mut self) -> u32 {
        self.score = self.score.saturating_add(1);
        self.score
    }

    /// Lose a life and a point, both floored at zero.
    pub fn penalize(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.score = self.score.saturating_sub(1);
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        self.score >= self.target_score
    }

    #[must_use]
    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }

    /// Track position for the current score.
    #[must_use]
    pub fn car_position(&self) -> f32 {
        car_position(self.score, self.target_score)
    }

    /// Overwrite score and lives.
    ///
    /// Score is clamped one short of the target and lives to the starting
    /// count. Used to set up mid-game positions in tests and replays.
    pub fn set(&mut self, score: u32, lives: u32) {
        self.score = score.min(self.target_score.saturating_sub(1));
        self.lives = lives.min(self.max_lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(&RaceConfig::default())
    }

    #[test]
    fn test_new_state() {
        let s = state();
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.target_score(), 5);
        assert!(!s.has_won());
    }

    #[test]
    fn test_penalize_floors_at_zero() {
        let mut s = state();
        s.penalize();
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives(), 2);

        s.penalize();
        s.penalize();
        s.penalize();
        assert_eq!(s.lives(), 0);
        assert_eq!(s.score(), 0);
        assert!(s.is_out_of_lives());
    }

    #[test]
    fn test_award_and_win() {
        let mut s = state();
        for expected in 1..=5 {
            assert_eq!(s.award_point(), expected);
        }
        assert!(s.has_won());
    }

    #[test]
    fn test_set_clamps_score_and_lives() {
        let mut s = state();
        s.set(2, 9);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.score(), 2);

        s.set(7, 3);
        assert_eq!(s.score(), 4);
        assert!(!s.has_won());

        s.reset();
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives(), 3);
    }

    #[test]
    fn test_car_position() {
        assert_eq!(car_position(0, 5), 0.0);
        assert_eq!(car_position(5, 5), 1.0);
        assert!((car_position(2, 5) - 0.4).abs() < f32::EPSILON);
        assert_eq!(car_position(3, 0), 0.0);
    }

    #[test]
    fn test_phase_terminal() {
        assert!(Phase::Win.is_terminal());
        assert!(Phase::Lose.is_terminal());
        assert!(!Phase::RoundActive.is_terminal());
        assert_eq!(Phase::default(), Phase::Idle);
    }
}
