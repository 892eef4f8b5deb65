use bevy::prelude::*;

use room_common::{
    collision::CollisionChecker,
    constants::PLAYER_COLLISION_RADIUS,
    input::InputTracker,
    interaction::Effect,
    motion::MotionController,
};

use crate::{
    markers::{MainCameraMarker, PlayerMarker},
    messages::InteractionEffect,
    resources::MovementLocks,
};

// ============================================================================
// Motion Systems
// ============================================================================

// Integrate one frame of input into the player's candidate position
pub fn movement_step_system(
    time: Res<Time>,
    input: Res<InputTracker>,
    locks: Res<MovementLocks>,
    camera: Single<&Transform, With<MainCameraMarker>>,
    mut players: Query<&mut MotionController, With<PlayerMarker>>,
) {
    let delta = time.delta_secs();
    let view_dir = camera.forward().as_vec3();

    for mut controller in &mut players {
        controller.set_enabled(locks.allowed());
        let step = controller.step(delta, &input, view_dir);
        if step.clip_changed {
            trace!("character clip -> {}", step.clip.name());
        }
    }
}

// Reject colliding moves, then place the player and the camera
pub fn movement_collision_system(
    checker: Res<CollisionChecker>,
    mut players: Query<(&mut MotionController, &mut Transform), (With<PlayerMarker>, Without<MainCameraMarker>)>,
    mut camera: Single<&mut Transform, (With<MainCameraMarker>, Without<PlayerMarker>)>,
) {
    for (mut controller, mut transform) in &mut players {
        let candidate = controller.position();
        if controller.apply_collision(&checker) {
            let hit = checker
                .first_hit(candidate, PLAYER_COLLISION_RADIUS)
                .map_or("?", |volume| volume.name.as_str());
            trace!("move to {candidate:?} vetoed by {hit}");
        }

        transform.translation = controller.position();
        transform.rotation = controller.rotation();
        camera.translation = controller.camera_position();
    }
}

// The interaction sequence takes the player's legs away while it runs
pub fn movement_lock_system(mut effects: MessageReader<InteractionEffect>, mut locks: ResMut<MovementLocks>) {
    for InteractionEffect(effect) in effects.read() {
        if let Effect::SetMovementEnabled(enabled) = effect {
            locks.interaction = !enabled;
            debug!("movement {}", if *enabled { "enabled" } else { "disabled" });
        }
    }
}
