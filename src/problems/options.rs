//! Multiple-choice answer options.
//!
//! Each round shows four buttons: the correct answer and three distractors
//! drawn near it. Distractors are drawn as random offsets from the answer:
//! `[-5, 5]` for answers up to 10 and `[-10, 10]` above. A draw is rejected
//! if it equals the answer, goes negative, or repeats an earlier distractor.
//!
//! Rejection sampling has no natural bound, so draws are capped. Past the
//! cap the missing distractors are filled by scanning outward from the
//! answer (`+1, -1, +2, -2, ...`), which always terminates.

use log::warn;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::problem::Problem;
use crate::core::GameRng;

/// Number of options shown per round.
pub const OPTION_COUNT: usize = 4;

const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// Four distinct non-negative values, exactly one of them correct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionSet {
    values: [u32; OPTION_COUNT],
}

impl OptionSet {
    /// Draw options for `problem`.
    pub fn generate(problem: &Problem, rng: &mut GameRng, max_attempts: u32) -> Self {
        let answer = problem.correct_answer;
        let spread: i64 = if answer <= 10 { 5 } else { 10 };

        let mut distractors: SmallVec<[u32; DISTRACTOR_COUNT]> = SmallVec::new();
        let mut rejected = 0u32;

        while distractors.len() < DISTRACTOR_COUNT && rejected < max_attempts {
            let candidate = i64::from(answer) + rng.gen_offset(spread);
            match u32::try_from(candidate) {
                Ok(value) if value != answer && !distractors.contains(&value) => {
                    distractors.push(value);
                }
                _ => rejected += 1,
            }
        }

        if distractors.len() < DISTRACTOR_COUNT {
            warn!(
                "distractor draw for {} hit the cap after {} rejections, filling outward",
                problem, rejected
            );
            fill_outward(answer, &mut distractors);
        }

        let mut values = [distractors[0], distractors[1], distractors[2], answer];
        rng.shuffle(&mut values);
        Self { values }
    }

    /// Options in display order.
    #[must_use]
    pub fn values(&self) -> [u32; OPTION_COUNT] {
        self.values
    }

    /// Is `value` one of the displayed options?
    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        self.values.contains(&value)
    }

    /// Display slot of `value`, if shown.
    #[must_use]
    pub fn position(&self, value: u32) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().copied()
    }
}

fn fill_outward(answer: u32, distractors: &mut SmallVec<[u32; DISTRACTOR_COUNT]>) {
    let mut step = 1u32;
    while distractors.len() < DISTRACTOR_COUNT {
        let above = answer.checked_add(step);
        let below = answer.checked_sub(step);
        for candidate in [above, below].into_iter().flatten() {
            if distractors.len() < DISTRACTOR_COUNT && !distractors.contains(&candidate) {
                distractors.push(candidate);
            }
        }
        step += 1;
    }
}
