use bevy::prelude::*;
use std::time::Duration;

use room_common::{input::InputTracker, motion::MotionController};

use crate::{
    constants::{SOUND_WALKING, SOUND_ZAP},
    markers::{FootstepsMarker, PlayerMarker, ZapSoundMarker},
};

// ============================================================================
// Audio Setup
// ============================================================================

// Both loops start paused and are switched on and off every frame
pub fn setup_audio_system(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        AudioPlayer::new(asset_server.load(SOUND_WALKING)),
        PlaybackSettings::LOOP.paused(),
        FootstepsMarker,
    ));
    commands.spawn((
        AudioPlayer::new(asset_server.load(SOUND_ZAP)),
        PlaybackSettings::LOOP.paused(),
        ZapSoundMarker,
    ));
}

// Resume a loop, or pause it and rewind so it restarts from the top next time
pub fn set_loop_playing(sink: &mut AudioSink, playing: bool) {
    if playing && sink.is_paused() {
        sink.play();
    } else if !playing && !sink.is_paused() {
        sink.pause();
        if let Err(err) = sink.try_seek(Duration::ZERO) {
            debug!("could not rewind sound: {err:?}");
        }
    }
}

// ============================================================================
// Footsteps
// ============================================================================

// Walking sound while any movement key is held and the player may move
pub fn footsteps_system(
    input: Res<InputTracker>,
    players: Query<&MotionController, With<PlayerMarker>>,
    mut sinks: Query<&mut AudioSink, With<FootstepsMarker>>,
) {
    let enabled = players.iter().any(MotionController::is_enabled);
    let walking = enabled && input.any_movement();

    for mut sink in &mut sinks {
        set_loop_playing(&mut sink, walking);
    }
}
