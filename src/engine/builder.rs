//! Builder for a [`RoundEngine`] and its collaborators.

use super::round_engine::RoundEngine;
use crate::core::{RaceConfig, RaceError};
use crate::services::{BestScoreStore, MemoryStore, SilentCue, SoundCue};
use crate::timing::{ManualClock, Scheduler};

/// Builder for creating a RoundEngine.
pub struct RaceBuilder {
    config: RaceConfig,
    seed: u64,
    store: Box<dyn BestScoreStore>,
    sound: Box<dyn SoundCue>,
}

impl Default for RaceBuilder {
    fn default() -> Self {
        Self {
            config: RaceConfig::default(),
            seed: 42,
            store: Box::new(MemoryStore::new()),
            sound: Box::new(SilentCue),
        }
    }
}

impl RaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: RaceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn store(mut self, store: impl BestScoreStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn sound(mut self, sound: impl SoundCue + 'static) -> Self {
        self.sound = Box::new(sound);
        self
    }

    /// Build on top of a host-provided scheduler.
    pub fn build_with<S: Scheduler>(self, scheduler: S) -> Result<RoundEngine<S>, RaceError> {
        RoundEngine::new(self.config, self.seed, scheduler, self.store, self.sound)
    }

    /// Build on a fresh virtual clock.
    pub fn build(self) -> Result<RoundEngine<ManualClock>, RaceError> {
        self.build_with(ManualClock::new())
    }
}
