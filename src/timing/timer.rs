//! Per-round countdown.

use std::time::Duration;

use super::scheduler::{Scheduler, Task, TaskHandle};

/// Result of delivering a timer tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerStep {
    /// Clock moved down; this many seconds remain.
    Ticked(u32),
    /// Clock hit zero. The timer has stopped.
    Expired,
    /// The tick belongs to a cancelled or replaced countdown.
    Stale,
}

/// Countdown for a single round.
///
/// At most one tick is pending at a time. Starting the timer again replaces
/// the previous countdown.
#[derive(Clone, Debug, Default)]
pub struct RoundTimer {
    seconds_left: u32,
    interval: Duration,
    handle: Option<TaskHandle>,
}

impl RoundTimer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            seconds_left: 0,
            interval,
            handle: None,
        }
    }

    #[must_use]
    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Does `handle` belong to the live countdown?
    #[must_use]
    pub fn owns(&self, handle: TaskHandle) -> bool {
        self.handle == Some(handle)
    }

    /// Reset to `seconds` and schedule the first tick.
    pub fn start(&mut self, seconds: u32, scheduler: &mut dyn Scheduler) {
        self.cancel(scheduler);
        self.seconds_left = seconds;
        self.handle = Some(scheduler.schedule_after(self.interval, Task::TimerTick));
    }

    /// Deliver a tick previously scheduled under `handle`.
    pub fn tick(&mut self, handle: TaskHandle, scheduler: &mut dyn Scheduler) -> TimerStep {
        if !self.owns(handle) {
            return TimerStep::Stale;
        }

        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            self.handle = None;
            return TimerStep::Expired;
        }

        self.handle = Some(scheduler.schedule_after(self.interval, Task::TimerTick));
        TimerStep::Ticked(self.seconds_left)
    }

    /// Stop the countdown. Returns `false` if nothing was running.
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        match self.handle.take() {
            Some(handle) => {
                scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }
}
