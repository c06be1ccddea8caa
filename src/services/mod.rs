//! Collaborators the engine calls into: sound and best-score storage.
//!
//! Both are traits so hosts can plug in real audio or persistence. Failures
//! in either never reach game state.

mod sound;
mod store;

pub use sound::{RecordingCue, SilentCue, SoundCue};
pub use store::{BestScoreStore, FileStore, MemoryStore, NullStore, BEST_SCORE_KEY};
