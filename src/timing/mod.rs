//! Time as an injected capability.
//!
//! The engine never sleeps or reads a wall clock. It asks a [`Scheduler`]
//! to run a [`Task`] later and gets the task back through `RoundEngine::fire`.

mod scheduler;
mod timer;

pub use scheduler::{ManualClock, Scheduler, Task, TaskHandle};
pub use timer::{RoundTimer, TimerStep};
