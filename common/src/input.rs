use bevy_ecs::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Keys
// ============================================================================

// Keys the room reacts to. Movement keys double as
// context-sensitive commands while an interaction is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    F,
    Q,
    E,
    C,
    Space,
}

impl Key {
    pub const ALL: [Self; 9] = [
        Self::W,
        Self::A,
        Self::S,
        Self::D,
        Self::F,
        Self::Q,
        Self::E,
        Self::C,
        Self::Space,
    ];
    pub const MOVEMENT: [Self; 4] = [Self::W, Self::A, Self::S, Self::D];
}

// ============================================================================
// Input Tracker
// ============================================================================

/// Keys currently held plus the primary mouse button, read once per frame.
#[derive(Resource, Debug, Default, Clone)]
pub struct InputTracker {
    pressed: HashSet<Key>,
    just_pressed: HashSet<Key>,
    shooting: bool,
}

impl InputTracker {
    pub fn press(&mut self, key: Key) {
        if self.pressed.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub const fn set_shooting(&mut self, shooting: bool) {
        self.shooting = shooting;
    }

    #[must_use]
    pub fn pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    #[must_use]
    pub fn just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    // A press and release inside one frame still counts as an edge
    pub fn tap(&mut self, key: Key) {
        self.just_pressed.insert(key);
    }

    // Keys pressed this frame, always in `Key::ALL` order
    pub fn just_pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|key| self.just_pressed.contains(key))
    }

    #[must_use]
    pub const fn shooting(&self) -> bool {
        self.shooting
    }

    #[must_use]
    pub fn any_movement(&self) -> bool {
        Key::MOVEMENT.iter().any(|key| self.pressed(*key))
    }

    // Edge-triggered presses only live for the frame they arrived in
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    // Drop everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.shooting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn just_pressed_is_cleared_at_end_of_frame() {
        let mut input = InputTracker::default();
        input.press(Key::E);
        assert!(input.just_pressed(Key::E));
        input.end_frame();
        assert!(!input.just_pressed(Key::E));
        assert!(input.pressed(Key::E));

        // Holding the key does not re-trigger
        input.press(Key::E);
        assert!(!input.just_pressed(Key::E));
    }

    #[test]
    fn tapped_key_is_an_edge_without_being_held() {
        let mut input = InputTracker::default();
        input.tap(Key::Q);
        input.release(Key::Q);
        assert!(input.just_pressed(Key::Q));
        assert!(!input.pressed(Key::Q));
        input.end_frame();
        assert!(!input.just_pressed(Key::Q));
    }

    #[test]
    fn simultaneous_presses_come_out_in_fixed_order() {
        let mut input = InputTracker::default();
        for key in [Key::E, Key::Space, Key::D, Key::W] {
            input.press(key);
        }
        let keys: Vec<_> = input.just_pressed_keys().collect();
        assert_eq!(keys, vec![Key::W, Key::D, Key::E, Key::Space]);
    }

    #[test]
    fn movement_detection() {
        let mut input = InputTracker::default();
        input.press(Key::F);
        assert!(!input.any_movement());
        input.press(Key::D);
        assert!(input.any_movement());
        input.release(Key::D);
        assert!(!input.any_movement());
    }
}
