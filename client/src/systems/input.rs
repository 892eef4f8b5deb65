use bevy::{
    input::mouse::{MouseButton, MouseMotion},
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use room_common::input::{InputTracker, Key};

use crate::{constants::MOUSE_SENSITIVITY, markers::MainCameraMarker, resources::MovementLocks};

const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.05;

const TRACKED_KEYS: [(KeyCode, Key); 9] = [
    (KeyCode::KeyW, Key::W),
    (KeyCode::KeyA, Key::A),
    (KeyCode::KeyS, Key::S),
    (KeyCode::KeyD, Key::D),
    (KeyCode::KeyF, Key::F),
    (KeyCode::KeyQ, Key::Q),
    (KeyCode::KeyE, Key::E),
    (KeyCode::KeyC, Key::C),
    (KeyCode::Space, Key::Space),
];

fn cursor_locked(cursor_options: &CursorOptions) -> bool {
    cursor_options.grab_mode != CursorGrabMode::None
}

// ============================================================================
// Input Tracker Systems
// ============================================================================

// Mirror the keyboard and left mouse button into the input tracker
pub fn input_tracker_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    cursor_options: Single<&CursorOptions>,
    mut input: ResMut<InputTracker>,
) {
    // Edges from the previous frame are consumed by now
    input.end_frame();
    sync_keys(&keyboard, &mut input);

    input.set_shooting(mouse.pressed(MouseButton::Left) && cursor_locked(&cursor_options));
}

// Copy held keys and this frame's presses. A key can go down and up between
// two frames, so the press edge is taken from `just_pressed`, not `pressed`.
pub fn sync_keys(keyboard: &ButtonInput<KeyCode>, input: &mut InputTracker) {
    for (code, key) in TRACKED_KEYS {
        if keyboard.pressed(code) {
            input.press(key);
        } else {
            input.release(key);
        }
        if keyboard.just_pressed(code) {
            input.tap(key);
        }
    }
}

// Forget held keys when the window loses focus, otherwise the release is never seen
pub fn input_focus_lost_system(mut focus: MessageReader<bevy::window::WindowFocused>, mut input: ResMut<InputTracker>) {
    if focus.read().any(|event| !event.focused) {
        input.clear();
    }
}

// ============================================================================
// Pointer Lock
// ============================================================================

// Toggle cursor lock with Escape key or mouse click
pub fn input_cursor_toggle_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    locks: Res<MovementLocks>,
    mut cursor_options: Single<&mut CursorOptions>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        let lock = !cursor_locked(&cursor_options);
        set_cursor_lock(&mut cursor_options, lock);
    }

    // A click only grabs the pointer while the player is free to look around
    if mouse.just_pressed(MouseButton::Left) && !cursor_locked(&cursor_options) && locks.allowed() {
        set_cursor_lock(&mut cursor_options, true);
    }
}

pub fn set_cursor_lock(cursor_options: &mut CursorOptions, lock: bool) {
    cursor_options.visible = !lock;
    cursor_options.grab_mode = if lock {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
}

// ============================================================================
// Mouse Look
// ============================================================================

// Rotate the camera from mouse motion while the pointer is locked
pub fn input_mouse_look_system(
    mut mouse_motion: MessageReader<MouseMotion>,
    cursor_options: Single<&CursorOptions>,
    locks: Res<MovementLocks>,
    mut camera: Single<&mut Transform, With<MainCameraMarker>>,
) {
    if !cursor_locked(&cursor_options) || !locks.allowed() {
        // Drain pending mouse events so they do not jump the view later
        for _ in mouse_motion.read() {}
        return;
    }

    let (mut yaw, mut pitch, _roll) = camera.rotation.to_euler(EulerRot::YXZ);
    for motion in mouse_motion.read() {
        yaw = motion.delta.x.mul_add(-MOUSE_SENSITIVITY, yaw);
        pitch = motion.delta.y.mul_add(-MOUSE_SENSITIVITY, pitch);
    }
    pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);

    camera.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_is_tracked_once() {
        for key in Key::ALL {
            let count = TRACKED_KEYS.iter().filter(|(_, tracked)| *tracked == key).count();
            assert_eq!(count, 1, "{key:?}");
        }
        assert!(!TRACKED_KEYS.iter().any(|(code, _)| *code == KeyCode::Escape));
    }

    #[test]
    fn quick_tap_within_one_frame_is_not_lost() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyQ);
        keyboard.release(KeyCode::KeyQ);

        let mut input = InputTracker::default();
        sync_keys(&keyboard, &mut input);
        assert!(input.just_pressed(Key::Q));
        assert!(!input.pressed(Key::Q));
    }

    #[test]
    fn held_key_fires_once() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        let mut input = InputTracker::default();
        keyboard.press(KeyCode::KeyF);
        sync_keys(&keyboard, &mut input);
        assert!(input.just_pressed(Key::F));

        // Next frame, still held
        keyboard.clear();
        input.end_frame();
        sync_keys(&keyboard, &mut input);
        assert!(input.pressed(Key::F));
        assert!(!input.just_pressed(Key::F));
    }

    #[test]
    fn cursor_lock_hides_pointer() {
        let mut options = CursorOptions::default();
        set_cursor_lock(&mut options, true);
        assert!(!options.visible);
        assert!(cursor_locked(&options));
        set_cursor_lock(&mut options, false);
        assert!(options.visible);
        assert!(!cursor_locked(&options));
    }
}
