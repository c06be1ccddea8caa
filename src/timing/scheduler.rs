//! Scheduling capability.
//!
//! Every wait in a game (the per-round countdown, the pause between rounds,
//! the pre-game "3, 2, 1") is a one-shot task handed to a [`Scheduler`].
//! The host is responsible for handing due tasks back to the engine through
//! `RoundEngine::fire`.
//!
//! [`ManualClock`] is a virtual-time scheduler: nothing happens until the host
//! advances it, which makes whole games reproducible in tests.

use std::collections::BTreeMap;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Opaque handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(pub u64);

impl std::fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// What the engine should do when a task comes due.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    /// One beat of the pre-game countdown.
    CountdownTick,
    /// One second of the round clock.
    TimerTick,
    /// Present the next problem.
    AdvanceRound,
}

/// Schedule-after / cancel capability injected into the engine.
pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn schedule_after(&mut self, delay: Duration, task: Task) -> TaskHandle;

    /// Cancel a pending task.
    ///
    /// Returns `false` if the task already ran or was cancelled. Never an error.
    fn cancel(&mut self, handle: TaskHandle) -> bool;

    /// Time elapsed since the scheduler was created.
    fn now(&self) -> Duration;
}

/// Deterministic virtual-time scheduler.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, u64), Task>,
    deadlines: FxHashMap<u64, Duration>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deadline of the earliest pending task.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|&(at, _)| at)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its deadline.
    ///
    /// Tasks with equal deadlines come out in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskHandle, Task)> {
        let (&(at, id), _) = self.queue.iter().next()?;
        if at > until {
            return None;
        }
        let task = self.queue.remove(&(at, id))?;
        self.deadlines.remove(&id);
        self.now = self.now.max(at);
        Some((TaskHandle(id), task))
    }

    /// Move the clock forward without running anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualClock {
    fn schedule_after(&mut self, delay: Duration, task: Task) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        let at = self.now + delay;
        self.queue.insert((at, id), task);
        self.deadlines.insert(id, at);
        TaskHandle(id)
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(at) => self.queue.remove(&(at, handle.0)).is_some(),
            None => false,
        }
    }

    fn now(&self) -> Duration {
        self.now
    }
}
