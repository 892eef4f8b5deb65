use crate::interaction::ScriptedClip;

// ============================================================================
// Cutscene Playback
// ============================================================================

/// What the full-screen surface should show after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutsceneFrame {
    pub clip: ScriptedClip,
    pub frame: u32,
    // True only on the tick the clip reached its last frame
    pub finished_now: bool,
}

/// A clip the surface was asked to show. Frame counts are only known once the
/// clip's frames are on hand, so requests wait until then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipRequest {
    Play(ScriptedClip),
    Freeze(ScriptedClip),
}

impl ClipRequest {
    #[must_use]
    pub const fn clip(&self) -> ScriptedClip {
        match self {
            Self::Play(clip) | Self::Freeze(clip) => *clip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveClip {
    clip: ScriptedClip,
    frame_count: u32,
    elapsed: f32,
    finished: bool,
}

/// Plays numbered frame sequences at a fixed rate. A finished clip stays on
/// its last frame until something else is played or the surface is hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct CutscenePlayback {
    fps: f32,
    active: Option<ActiveClip>,
    pending: Option<ClipRequest>,
}

impl CutscenePlayback {
    #[must_use]
    pub const fn new(fps: f32) -> Self {
        Self {
            fps,
            active: None,
            pending: None,
        }
    }

    // The surface stays up while the next clip's frames are loading
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.active.is_some() || self.pending.is_some()
    }

    // A newer request replaces one that is still waiting. The current clip
    // stops ticking but keeps its frame on screen.
    pub const fn request(&mut self, request: ClipRequest) {
        self.pending = Some(request);
    }

    #[must_use]
    pub const fn pending(&self) -> Option<ClipRequest> {
        self.pending
    }

    // Frames for the pending clip are ready. Restarts from frame 0 even if the
    // same clip was already showing.
    pub fn begin_pending(&mut self, frame_count: u32) -> Option<ClipRequest> {
        let request = self.pending.take()?;
        match request {
            ClipRequest::Play(clip) => self.play(clip, frame_count),
            ClipRequest::Freeze(clip) => self.freeze(clip, frame_count),
        }
        Some(request)
    }

    // Frames for the pending clip could not be loaded. Returns the clip if
    // someone is waiting for it to finish.
    pub fn abandon_pending(&mut self) -> Option<ScriptedClip> {
        match self.pending.take()? {
            ClipRequest::Play(clip) => Some(clip),
            ClipRequest::Freeze(_) => None,
        }
    }

    fn play(&mut self, clip: ScriptedClip, frame_count: u32) {
        self.active = Some(ActiveClip {
            clip,
            frame_count: frame_count.max(1),
            elapsed: 0.0,
            finished: false,
        });
    }

    // Shows the last frame without playing or reporting completion
    fn freeze(&mut self, clip: ScriptedClip, frame_count: u32) {
        let frame_count = frame_count.max(1);
        self.active = Some(ActiveClip {
            clip,
            frame_count,
            elapsed: frame_count as f32 / self.fps,
            finished: true,
        });
    }

    pub const fn hide(&mut self) {
        self.active = None;
        self.pending = None;
    }

    // Nothing ticks while a request is waiting for its frames
    pub fn advance(&mut self, delta: f32) -> Option<CutsceneFrame> {
        if self.pending.is_some() {
            return None;
        }
        let fps = self.fps;
        let active = self.active.as_mut()?;
        let mut finished_now = false;
        if !active.finished {
            active.elapsed += delta;
            if active.elapsed * fps >= active.frame_count as f32 {
                active.finished = true;
                finished_now = true;
            }
        }
        let active = *active;
        Some(CutsceneFrame {
            clip: active.clip,
            frame: self.frame_index(&active),
            finished_now,
        })
    }

    fn frame_index(&self, active: &ActiveClip) -> u32 {
        let last = active.frame_count - 1;
        if active.finished {
            return last;
        }
        ((active.elapsed * self.fps) as u32).min(last)
    }
}

// Asset folder holding one clip's numbered frames, e.g. "interactiveanimations/sit"
#[must_use]
pub fn clip_folder(root: &str, clip: ScriptedClip) -> String {
    format!("{root}/{}", clip.asset_name())
}

// Frame of a looping sequence after `elapsed` seconds. None while there is
// nothing to show.
#[must_use]
pub fn loop_frame(elapsed: f32, fps: f32, frame_count: u32) -> Option<u32> {
    if frame_count == 0 || fps <= 0.0 {
        return None;
    }
    let tick = (elapsed.max(0.0) * fps) as u64;
    Some((tick % u64::from(frame_count)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(clip: ScriptedClip, fps: f32, frames: u32) -> CutscenePlayback {
        let mut playback = CutscenePlayback::new(fps);
        playback.request(ClipRequest::Play(clip));
        assert_eq!(playback.begin_pending(frames), Some(ClipRequest::Play(clip)));
        playback
    }

    #[test]
    fn plays_through_and_finishes_once() {
        let mut playback = playing(ScriptedClip::Sit, 10.0, 5);

        let mut finishes = 0;
        let mut last_frame = 0;
        for _ in 0..20 {
            let frame = playback.advance(0.05).expect("clip is visible");
            assert!(frame.frame >= last_frame, "frames never go backwards");
            last_frame = frame.frame;
            if frame.finished_now {
                finishes += 1;
            }
        }
        assert_eq!(finishes, 1);
        assert_eq!(last_frame, 4);
        assert!(playback.is_visible());
    }

    #[test]
    fn freeze_shows_last_frame_without_finishing() {
        let mut playback = CutscenePlayback::new(30.0);
        playback.request(ClipRequest::Freeze(ScriptedClip::Choice));
        playback.begin_pending(90);
        let frame = playback.advance(1.0).expect("clip is visible");
        assert_eq!(frame.frame, 89);
        assert!(!frame.finished_now);
    }

    #[test]
    fn replay_restarts_from_first_frame() {
        let mut playback = playing(ScriptedClip::Sit, 10.0, 3);
        let _ = playback.advance(1.0);
        playback.request(ClipRequest::Play(ScriptedClip::Sit));
        playback.begin_pending(3);
        let frame = playback.advance(0.0).expect("clip is visible");
        assert_eq!(frame.frame, 0);
        assert!(!frame.finished_now);
    }

    #[test]
    fn frame_count_comes_from_the_loaded_clip() {
        let mut playback = playing(ScriptedClip::Exit, 10.0, 12);
        let frame = playback.advance(5.0).expect("clip is visible");
        assert!(frame.finished_now);
        assert_eq!(frame.frame, 11);
    }

    #[test]
    fn waiting_request_keeps_surface_up_without_ticking() {
        let mut playback = playing(ScriptedClip::Sit, 10.0, 2);
        playback.request(ClipRequest::Play(ScriptedClip::Choice));
        assert!(playback.is_visible());
        assert_eq!(playback.advance(10.0), None);
        assert_eq!(playback.pending(), Some(ClipRequest::Play(ScriptedClip::Choice)));

        // The old clip never reports completion once replaced
        playback.begin_pending(4);
        let frame = playback.advance(0.1).expect("clip is visible");
        assert_eq!(frame.clip, ScriptedClip::Choice);
        assert!(!frame.finished_now);
    }

    #[test]
    fn abandoned_play_still_reports_its_clip() {
        let mut playback = CutscenePlayback::new(10.0);
        playback.request(ClipRequest::Play(ScriptedClip::Intro));
        assert_eq!(playback.abandon_pending(), Some(ScriptedClip::Intro));
        assert!(!playback.is_visible());

        playback.request(ClipRequest::Freeze(ScriptedClip::Choice));
        assert_eq!(playback.abandon_pending(), None);
        assert_eq!(playback.begin_pending(3), None);
    }

    #[test]
    fn hidden_surface_does_not_tick() {
        let mut playback = CutscenePlayback::new(10.0);
        assert_eq!(playback.advance(1.0), None);
        playback.request(ClipRequest::Play(ScriptedClip::Exit));
        playback.hide();
        assert!(!playback.is_visible());
        assert_eq!(playback.pending(), None);
        assert_eq!(playback.advance(1.0), None);
    }

    #[test]
    fn clip_folders_use_asset_names() {
        assert_eq!(
            clip_folder("interactiveanimations", ScriptedClip::Exit),
            "interactiveanimations/exitvideo"
        );
    }

    #[test]
    fn looping_frames_wrap_around() {
        assert_eq!(loop_frame(0.0, 10.0, 4), Some(0));
        assert_eq!(loop_frame(0.25, 10.0, 4), Some(2));
        assert_eq!(loop_frame(0.45, 10.0, 4), Some(0));
        assert_eq!(loop_frame(1.05, 10.0, 4), Some(2));
        assert_eq!(loop_frame(3600.0, 30.0, 7), Some((3600 * 30 % 7) as u32));
    }

    #[test]
    fn empty_loop_shows_nothing() {
        assert_eq!(loop_frame(1.0, 30.0, 0), None);
        assert_eq!(loop_frame(1.0, 0.0, 5), None);
    }
}
