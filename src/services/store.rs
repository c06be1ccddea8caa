//! Best-score persistence.
//!
//! The record is a single named integer that defaults to 0 when absent and
//! only ever goes up. Stores enforce the "only up" rule themselves so a stale
//! writer cannot lower it.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::StoreError;

/// Name of the best-score record.
pub const BEST_SCORE_KEY: &str = "mathRaceRecord";

/// Somewhere to keep the best score between sessions.
pub trait BestScoreStore {
    /// Read the stored best. `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<u32>, StoreError>;

    /// Store `value` if it beats the stored best.
    fn save(&mut self, value: u32) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Rc<Cell<Option<u32>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `best`.
    #[must_use]
    pub fn with_best(best: u32) -> Self {
        Self {
            slot: Rc::new(Cell::new(Some(best))),
        }
    }

    /// Current stored value.
    #[must_use]
    pub fn get(&self) -> Option<u32> {
        self.slot.get()
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.slot.get())
    }

    fn save(&mut self, value: u32) -> Result<(), StoreError> {
        if self.slot.get().map_or(true, |best| value > best) {
            self.slot.set(Some(value));
        }
        Ok(())
    }
}

/// Store with no backing; every call fails with `Unavailable`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStore;

impl BestScoreStore for NullStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn save(&mut self, _value: u32) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreRecord {
    key: String,
    value: u32,
}

/// Bincode-encoded record in a file named after the key.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store under `dir`, using the default record name.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{BEST_SCORE_KEY}.bin")),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path)?;
        let record: BestScoreRecord = bincode::deserialize(&bytes)?;
        Ok(Some(record.value))
    }

    fn save(&mut self, value: u32) -> Result<(), StoreError> {
        if let Some(best) = self.load()? {
            if best >= value {
                return Ok(());
            }
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let record = BestScoreRecord {
            key: BEST_SCORE_KEY.to_string(),
            value,
        };
        fs::write(&self.path, bincode::serialize(&record)?)?;
        Ok(())
    }
}
