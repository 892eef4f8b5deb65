use bevy::{
    asset::{LoadState, LoadedFolder, RecursiveDependencyLoadState},
    prelude::*,
};
use std::collections::HashMap;

use room_common::{
    cutscene::{ClipRequest, CutscenePlayback, clip_folder},
    interaction::ScriptedClip,
    motion::CharacterClip,
};

use crate::constants::CLIP_FOLDER;

// ============================================================================
// Client Resources
// ============================================================================

/// Reasons the player may not walk or look around. Movement is allowed only
/// when none is set.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementLocks {
    pub interaction: bool,
    pub exit: bool,
    pub intro: bool,
}

impl MovementLocks {
    #[must_use]
    pub const fn allowed(&self) -> bool {
        !(self.interaction || self.exit || self.intro)
    }
}

/// The three character clips in one blend graph.
#[derive(Resource)]
pub struct CharacterAnimations {
    pub graph_handle: Handle<AnimationGraph>,
    pub nodes: HashMap<CharacterClip, AnimationNodeIndex>,
}

impl CharacterAnimations {
    #[must_use]
    pub fn node(&self, clip: CharacterClip) -> Option<AnimationNodeIndex> {
        self.nodes.get(&clip).copied()
    }
}

/// How far along a clip's frames are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramesState {
    Loading,
    Ready(u32),
    Failed,
}

/// Cutscene playback plus the frames of the clips that may be shown next.
/// Each clip is a folder of numbered images; its frame count is however many
/// images the folder holds.
#[derive(Resource)]
pub struct CutscenePlayer {
    pub playback: CutscenePlayback,
    folders: HashMap<ScriptedClip, Handle<LoadedFolder>>,
    frames: HashMap<ScriptedClip, Vec<Handle<Image>>>,
}

impl CutscenePlayer {
    #[must_use]
    pub fn new(fps: f32) -> Self {
        Self {
            playback: CutscenePlayback::new(fps),
            folders: HashMap::new(),
            frames: HashMap::new(),
        }
    }

    // Only the requested clip and the one that can follow it stay loaded
    pub fn request(&mut self, request: ClipRequest, asset_server: &AssetServer) {
        let clip = request.clip();
        self.folders.retain(|held, _| keeps_loaded(clip, *held));
        self.frames.retain(|held, _| keeps_loaded(clip, *held));

        for wanted in std::iter::once(clip).chain(clip.follow_up()) {
            self.folders.entry(wanted).or_insert_with(|| {
                let folder = clip_folder(CLIP_FOLDER, wanted);
                debug!("loading frames from {folder}");
                asset_server.load_folder(folder)
            });
        }
        self.playback.request(request);
    }

    // Hiding the surface releases every frame
    pub fn hide(&mut self) {
        self.playback.hide();
        self.folders.clear();
        self.frames.clear();
    }

    pub fn frames_state(
        &mut self,
        clip: ScriptedClip,
        asset_server: &AssetServer,
        loaded: &Assets<LoadedFolder>,
    ) -> FramesState {
        if let Some(frames) = self.frames.get(&clip) {
            return FramesState::Ready(frames.len() as u32);
        }
        let Some(handle) = self.folders.get(&clip) else {
            return FramesState::Failed;
        };

        if asset_server.is_loaded_with_dependencies(handle)
            && let Some(folder) = loaded.get(handle)
        {
            let frames = ordered_frames(folder);
            if frames.is_empty() {
                return FramesState::Failed;
            }
            let count = frames.len() as u32;
            self.frames.insert(clip, frames);
            return FramesState::Ready(count);
        }

        if folder_failed(asset_server, handle) {
            FramesState::Failed
        } else {
            FramesState::Loading
        }
    }

    #[must_use]
    pub fn frame(&self, clip: ScriptedClip, frame: u32) -> Option<Handle<Image>> {
        self.frames.get(&clip)?.get(frame as usize).cloned()
    }
}

// Images of a loaded folder. Frame files are zero-padded, so path order is
// playback order.
#[must_use]
pub fn ordered_frames(folder: &LoadedFolder) -> Vec<Handle<Image>> {
    let mut frames: Vec<Handle<Image>> = folder
        .handles
        .iter()
        .filter_map(|handle| handle.clone().try_typed::<Image>().ok())
        .collect();
    frames.sort_by_key(|frame| frame.path().map(ToString::to_string));
    frames
}

#[must_use]
pub fn folder_failed(asset_server: &AssetServer, handle: &Handle<LoadedFolder>) -> bool {
    matches!(asset_server.load_state(handle), LoadState::Failed(_))
        || matches!(
            asset_server.recursive_dependency_load_state(handle),
            RecursiveDependencyLoadState::Failed(_)
        )
}

fn keeps_loaded(requested: ScriptedClip, held: ScriptedClip) -> bool {
    held == requested || requested.follow_up() == Some(held)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_lock_blocks_movement() {
        assert!(MovementLocks::default().allowed());
        let locks = MovementLocks {
            intro: true,
            ..default()
        };
        assert!(!locks.allowed());
        let locks = MovementLocks {
            interaction: true,
            exit: true,
            ..default()
        };
        assert!(!locks.allowed());
    }

    #[test]
    fn only_the_next_clips_stay_loaded() {
        assert!(keeps_loaded(ScriptedClip::Sit, ScriptedClip::Sit));
        assert!(keeps_loaded(ScriptedClip::Sit, ScriptedClip::Choice));
        assert!(!keeps_loaded(ScriptedClip::Sit, ScriptedClip::Exit));
        assert!(!keeps_loaded(ScriptedClip::PickupResume, ScriptedClip::Choice));
        assert!(keeps_loaded(ScriptedClip::ResumeDown, ScriptedClip::Choice));
    }

    #[test]
    fn folder_frames_skip_other_assets() {
        assert!(ordered_frames(&LoadedFolder { handles: Vec::new() }).is_empty());

        let folder = LoadedFolder {
            handles: vec![Handle::<Mesh>::default().untyped(), Handle::<Image>::default().untyped()],
        };
        assert_eq!(ordered_frames(&folder).len(), 1);
    }
}
