use bevy::{asset::LoadedFolder, prelude::*};

use room_common::{
    config::ExperienceConfig,
    cutscene::{ClipRequest, clip_folder},
    interaction::Effect,
};

use crate::{
    constants::CLIP_FOLDER,
    markers::CutsceneSurfaceMarker,
    messages::{ClipFinished, InteractionEffect},
    resources::{CutscenePlayer, FramesState},
};

// ============================================================================
// Cutscene Systems
// ============================================================================

// Start, freeze or hide clips as requested
pub fn cutscene_effects_system(
    mut effects: MessageReader<InteractionEffect>,
    asset_server: Res<AssetServer>,
    mut player: ResMut<CutscenePlayer>,
) {
    for InteractionEffect(effect) in effects.read() {
        match effect {
            Effect::PlayClip(clip) => player.request(ClipRequest::Play(*clip), &asset_server),
            Effect::Freeze(clip) => player.request(ClipRequest::Freeze(*clip), &asset_server),
            Effect::HideVideo => player.hide(),
            _ => {}
        }
    }
}

// Start a waiting clip once its frames are in, then advance the running clip
// and put its current frame on screen
pub fn cutscene_playback_system(
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    loaded: Res<Assets<LoadedFolder>>,
    mut player: ResMut<CutscenePlayer>,
    surface: Single<(&mut ImageNode, &mut Visibility), With<CutsceneSurfaceMarker>>,
    mut finished: MessageWriter<ClipFinished>,
) {
    if let Some(request) = player.playback.pending() {
        let clip = request.clip();
        match player.frames_state(clip, &asset_server, &loaded) {
            FramesState::Loading => {}
            FramesState::Ready(frames) => {
                debug!("showing {} ({frames} frames)", clip.asset_name());
                player.playback.begin_pending(frames);
            }
            FramesState::Failed => {
                warn!("no frames found in {}", clip_folder(CLIP_FOLDER, clip));
                // Whoever waits on the clip still gets its completion
                if let Some(clip) = player.playback.abandon_pending() {
                    finished.write(ClipFinished(clip));
                }
            }
        }
    }

    let (mut image, mut visibility) = surface.into_inner();

    let Some(frame) = player.playback.advance(time.delta_secs()) else {
        if !player.playback.is_visible() {
            visibility.set_if_neq(Visibility::Hidden);
        }
        return;
    };

    if let Some(handle) = player.frame(frame.clip, frame.frame)
        && image.image != handle
    {
        image.image = handle;
    }
    visibility.set_if_neq(Visibility::Visible);

    if frame.finished_now {
        finished.write(ClipFinished(frame.clip));
    }
}

// ============================================================================
// Cutscene Setup
// ============================================================================

pub fn setup_cutscene_system(mut commands: Commands, config: Res<ExperienceConfig>) {
    commands.insert_resource(CutscenePlayer::new(config.clip_fps));
}
