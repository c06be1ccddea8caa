//! Sound cue collaborator.
//!
//! Tones are best effort. A failing cue is logged by the engine and never
//! changes the game.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::SoundError;
use crate::events::ToneKind;

/// Plays the hit/miss tone.
pub trait SoundCue {
    fn play(&mut self, kind: ToneKind) -> Result<(), SoundError>;
}

/// Plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCue;

impl SoundCue for SilentCue {
    fn play(&mut self, _kind: ToneKind) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Records every tone requested. Clones share the log.
///
/// With `failing` set, each request is still recorded but reported as an
/// audio failure.
#[derive(Clone, Debug, Default)]
pub struct RecordingCue {
    played: Rc<RefCell<Vec<ToneKind>>>,
    failing: bool,
}

impl RecordingCue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A cue whose output device is gone.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            played: Rc::default(),
            failing: true,
        }
    }

    /// Tones requested so far.
    #[must_use]
    pub fn played(&self) -> Vec<ToneKind> {
        self.played.borrow().clone()
    }
}

impl SoundCue for RecordingCue {
    fn play(&mut self, kind: ToneKind) -> Result<(), SoundError> {
        self.played.borrow_mut().push(kind);
        if self.failing {
            return Err(SoundError::Unavailable("no audio device".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_cue_shares_log() {
        let cue = RecordingCue::new();
        let mut player = cue.clone();
        player.play(ToneKind::Correct).unwrap();
        player.play(ToneKind::Incorrect).unwrap();

        assert_eq!(cue.played(), vec![ToneKind::Correct, ToneKind::Incorrect]);
    }

    #[test]
    fn test_failing_cue_reports_error() {
        let mut cue = RecordingCue::failing();
        assert!(cue.play(ToneKind::Correct).is_err());
        assert_eq!(cue.played(), vec![ToneKind::Correct]);
    }
}
