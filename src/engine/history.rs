//! Per-game round history.
//!
//! Uses an `im` persistent vector so snapshots of the engine stay cheap to
//! clone while a game grows.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::events::{Outcome, Resolution};
use crate::problems::{OptionSet, Operator, Problem};

/// How one round went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number within the game.
    pub round: u32,
    pub problem: Problem,
    pub options: OptionSet,
    /// Value the player picked. `None` when the clock ran out.
    pub selected: Option<u32>,
    pub outcome: Outcome,
    pub resolution: Resolution,
}

/// Attempts and hits for one operator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorTally {
    pub attempts: u32,
    pub correct: u32,
}

/// Aggregate view of a history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistorySummary {
    pub rounds: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub timeouts: u32,
    pub by_operator: FxHashMap<Operator, OperatorTally>,
}

impl HistorySummary {
    /// Fraction of rounds answered correctly; 0.0 for an empty history.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(self.rounds)
    }
}

/// Ordered records of the current game.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoundHistory {
    records: Vector<RoundRecord>,
}

impl RoundHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: RoundRecord) {
        self.records.push_back(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&RoundRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn summary(&self) -> HistorySummary {
        let mut summary = HistorySummary::default();

        for record in &self.records {
            summary.rounds += 1;
            let tally = summary.by_operator.entry(record.problem.operator).or_default();
            tally.attempts += 1;

            match (record.outcome, record.resolution) {
                (Outcome::Correct, _) => {
                    summary.correct += 1;
                    tally.correct += 1;
                }
                (Outcome::Incorrect, Resolution::TimedOut) => summary.timeouts += 1,
                (Outcome::Incorrect, Resolution::Answered) => summary.incorrect += 1,
            }
        }

        summary
    }
}
