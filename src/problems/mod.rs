//! Problem and answer-option generation.
//!
//! - `Problem`: one arithmetic question with its exact answer
//! - `OptionSet`: the four shuffled choices shown for it

mod options;
mod problem;

pub use options::{OptionSet, OPTION_COUNT};
pub use problem::{Operator, Problem};
