use bevy_ecs::prelude::*;
use bevy_log::debug;
use std::ops::{Deref, DerefMut};

use crate::interaction::ScriptedClip;

// ============================================================================
// One-Shot Clip Sequences
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencePhase {
    #[default]
    NotStarted,
    Playing,
    Finished,
}

/// A clip that plays once, cannot be cancelled, and is never replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneShotClip {
    clip: ScriptedClip,
    phase: SequencePhase,
}

impl OneShotClip {
    #[must_use]
    pub const fn new(clip: ScriptedClip) -> Self {
        Self {
            clip,
            phase: SequencePhase::NotStarted,
        }
    }

    #[must_use]
    pub const fn clip(&self) -> ScriptedClip {
        self.clip
    }

    #[must_use]
    pub const fn phase(&self) -> SequencePhase {
        self.phase
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.phase, SequencePhase::Playing)
    }

    // Returns true only on the call that actually starts playback
    pub fn start(&mut self) -> bool {
        if self.phase != SequencePhase::NotStarted {
            return false;
        }
        debug!("starting {:?}", self.clip);
        self.phase = SequencePhase::Playing;
        true
    }

    // Skip without playing, e.g. when the intro is turned off
    pub const fn skip(&mut self) {
        self.phase = SequencePhase::Finished;
    }

    // Returns true once, when our clip completes while playing
    pub fn on_clip_finished(&mut self, clip: ScriptedClip) -> bool {
        if clip != self.clip || self.phase != SequencePhase::Playing {
            return false;
        }
        self.phase = SequencePhase::Finished;
        true
    }
}

// Walking out through the door: exit clip, then off to the destination page
#[derive(Resource, Debug, Clone, Copy)]
pub struct ExitSequence(pub OneShotClip);

impl Deref for ExitSequence {
    type Target = OneShotClip;

    fn deref(&self) -> &OneShotClip {
        &self.0
    }
}

impl DerefMut for ExitSequence {
    fn deref_mut(&mut self) -> &mut OneShotClip {
        &mut self.0
    }
}

impl Default for ExitSequence {
    fn default() -> Self {
        Self(OneShotClip::new(ScriptedClip::Exit))
    }
}

// Clip shown once when the app starts
#[derive(Resource, Debug, Clone, Copy)]
pub struct IntroSequence(pub OneShotClip);

impl Deref for IntroSequence {
    type Target = OneShotClip;

    fn deref(&self) -> &OneShotClip {
        &self.0
    }
}

impl DerefMut for IntroSequence {
    fn deref_mut(&mut self) -> &mut OneShotClip {
        &mut self.0
    }
}

impl Default for IntroSequence {
    fn default() -> Self {
        Self(OneShotClip::new(ScriptedClip::Intro))
    }
}

impl IntroSequence {
    // Gameplay waits until the intro is out of the way
    #[must_use]
    pub const fn blocks_gameplay(&self) -> bool {
        !matches!(self.0.phase(), SequencePhase::Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_plays_once_and_cannot_restart() {
        let mut exit = ExitSequence::default();
        assert!(exit.start());
        assert!(exit.is_playing());
        assert!(!exit.start());
        assert!(!exit.on_clip_finished(ScriptedClip::Sit));
        assert!(exit.on_clip_finished(ScriptedClip::Exit));
        assert!(!exit.on_clip_finished(ScriptedClip::Exit));
        assert!(!exit.start());
        assert_eq!(exit.phase(), SequencePhase::Finished);
    }

    #[test]
    fn completion_before_start_is_ignored() {
        let mut exit = ExitSequence::default();
        assert!(!exit.on_clip_finished(ScriptedClip::Exit));
        assert_eq!(exit.phase(), SequencePhase::NotStarted);
    }

    #[test]
    fn intro_blocks_until_finished_or_skipped() {
        let mut intro = IntroSequence::default();
        assert!(intro.blocks_gameplay());
        intro.start();
        assert!(intro.blocks_gameplay());
        intro.on_clip_finished(ScriptedClip::Intro);
        assert!(!intro.blocks_gameplay());

        let mut skipped = IntroSequence::default();
        skipped.skip();
        assert!(!skipped.blocks_gameplay());
    }
}
