use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::{constants::*, interaction::InteractionState};

// ============================================================================
// Proximity Zones
// ============================================================================

/// Fixed spot on the floor plane with a per-axis tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityZone {
    pub x: f32,
    pub z: f32,
    pub tolerance: f32,
}

impl ProximityZone {
    #[must_use]
    pub const fn new(x: f32, z: f32, tolerance: f32) -> Self {
        Self { x, z, tolerance }
    }

    // Chebyshev check on X and Z, inclusive at the boundary. Height is ignored.
    #[must_use]
    pub fn contains(&self, position: Vec3) -> bool {
        (position.x - self.x).abs() <= self.tolerance && (position.z - self.z).abs() <= self.tolerance
    }
}

// ============================================================================
// Proximity Trigger
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProximityFlags {
    pub near_exit: bool,
    pub near_sit: bool,
}

impl ProximityFlags {
    #[must_use]
    pub const fn any(&self) -> bool {
        self.near_exit || self.near_sit
    }
}

/// Prompts the player can see this frame. At most one is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Exit,
    Sit,
}

/// What pressing the commit key inside a zone starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Exit,
    Sit,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct ProximityTrigger {
    pub exit: ProximityZone,
    pub sit: ProximityZone,
    flags: ProximityFlags,
}

impl Default for ProximityTrigger {
    fn default() -> Self {
        Self::new(
            ProximityZone::new(EXIT_ZONE_X, EXIT_ZONE_Z, ZONE_TOLERANCE),
            ProximityZone::new(SIT_ZONE_X, SIT_ZONE_Z, ZONE_TOLERANCE),
        )
    }
}

impl ProximityTrigger {
    #[must_use]
    pub const fn new(exit: ProximityZone, sit: ProximityZone) -> Self {
        Self {
            exit,
            sit,
            flags: ProximityFlags {
                near_exit: false,
                near_sit: false,
            },
        }
    }

    pub fn update(&mut self, position: Vec3) -> ProximityFlags {
        self.flags = ProximityFlags {
            near_exit: self.exit.contains(position),
            near_sit: self.sit.contains(position),
        };
        self.flags
    }

    #[must_use]
    pub const fn flags(&self) -> ProximityFlags {
        self.flags
    }

    // The prompt to draw, given whether an interaction or cutscene owns the screen.
    // Exit wins if the zones ever overlap.
    #[must_use]
    pub const fn visible_prompt(&self, screen_busy: bool) -> Option<Prompt> {
        if screen_busy {
            None
        } else if self.flags.near_exit {
            Some(Prompt::Exit)
        } else if self.flags.near_sit {
            Some(Prompt::Sit)
        } else {
            None
        }
    }

    // Decide what a commit press does with the current flags. Nothing happens
    // while movement is locked or an interaction is running, exit wins over
    // sit, and sitting is only possible from idle.
    #[must_use]
    pub fn commit(&self, commit_pressed: bool, movement_allowed: bool, state: InteractionState) -> Option<Commit> {
        if !commit_pressed || !movement_allowed || state != InteractionState::Idle || !self.flags.any() {
            return None;
        }
        if self.flags.near_exit {
            Some(Commit::Exit)
        } else {
            Some(Commit::Sit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inclusive_on_each_axis() {
        let zone = ProximityZone::new(0.0, 0.0, 2.0);
        assert!(zone.contains(Vec3::new(2.0, 0.0, 0.0)));
        assert!(zone.contains(Vec3::new(-2.0, 0.0, 0.0)));
        assert!(zone.contains(Vec3::new(0.0, 0.0, 2.0)));
        assert!(zone.contains(Vec3::new(0.0, 0.0, -2.0)));
        assert!(zone.contains(Vec3::new(2.0, 0.0, 2.0)));
        assert!(!zone.contains(Vec3::new(2.001, 0.0, 0.0)));
        assert!(!zone.contains(Vec3::new(0.0, 0.0, -2.001)));
    }

    #[test]
    fn check_is_chebyshev_not_euclidean() {
        let zone = ProximityZone::new(0.0, 0.0, 2.0);
        // Euclidean distance is ~2.69 but each axis is within tolerance
        assert!(zone.contains(Vec3::new(1.9, 0.0, 1.9)));
    }

    #[test]
    fn height_does_not_matter() {
        let zone = ProximityZone::new(0.0, 0.0, 2.0);
        assert!(zone.contains(Vec3::new(0.0, 1.2, 0.0)));
    }

    #[test]
    fn default_zones_match_the_room() {
        let mut trigger = ProximityTrigger::default();
        let flags = trigger.update(Vec3::new(-7.6, 0.0, 1.4));
        assert!(flags.near_sit);
        assert!(!flags.near_exit);

        let flags = trigger.update(Vec3::new(-8.4, 0.0, -5.54));
        assert!(flags.near_exit);
        assert!(!flags.near_sit);

        let flags = trigger.update(Vec3::new(0.0, 0.0, 3.0));
        assert!(!flags.any());
    }

    #[test]
    fn prompts_are_suppressed_while_busy() {
        let mut trigger = ProximityTrigger::default();
        trigger.update(Vec3::new(-7.6, 0.0, 1.4));
        assert_eq!(trigger.visible_prompt(false), Some(Prompt::Sit));
        assert_eq!(trigger.visible_prompt(true), None);
    }

    #[test]
    fn only_one_prompt_when_zones_overlap() {
        let mut trigger = ProximityTrigger::new(ProximityZone::new(0.0, 0.0, 2.0), ProximityZone::new(1.0, 0.0, 2.0));
        let flags = trigger.update(Vec3::new(0.5, 0.0, 0.0));
        assert!(flags.near_exit && flags.near_sit);
        assert_eq!(trigger.visible_prompt(false), Some(Prompt::Exit));
    }

    #[test]
    fn commit_at_zone_edges() {
        let mut trigger = ProximityTrigger::default();
        let idle = InteractionState::Idle;

        // Just inside the edge of each zone
        trigger.update(Vec3::new(EXIT_ZONE_X + ZONE_TOLERANCE - 0.01, 0.0, EXIT_ZONE_Z));
        assert_eq!(trigger.commit(true, true, idle), Some(Commit::Exit));
        trigger.update(Vec3::new(SIT_ZONE_X, 0.0, SIT_ZONE_Z - ZONE_TOLERANCE + 0.01));
        assert_eq!(trigger.commit(true, true, idle), Some(Commit::Sit));

        // Just outside
        trigger.update(Vec3::new(EXIT_ZONE_X + ZONE_TOLERANCE + 0.01, 0.0, EXIT_ZONE_Z));
        assert_eq!(trigger.commit(true, true, idle), None);
        trigger.update(Vec3::new(SIT_ZONE_X, 0.0, SIT_ZONE_Z - ZONE_TOLERANCE - 0.01));
        assert_eq!(trigger.commit(true, true, idle), None);
    }

    #[test]
    fn commit_needs_key_and_free_movement() {
        let mut trigger = ProximityTrigger::default();
        trigger.update(Vec3::new(SIT_ZONE_X, 0.0, SIT_ZONE_Z));
        assert_eq!(trigger.commit(false, true, InteractionState::Idle), None);
        assert_eq!(trigger.commit(true, false, InteractionState::Idle), None);
        assert_eq!(trigger.commit(true, true, InteractionState::Sitting), None);
        assert_eq!(trigger.commit(true, true, InteractionState::Choice), None);

        trigger.update(Vec3::new(EXIT_ZONE_X, 0.0, EXIT_ZONE_Z));
        assert_eq!(trigger.commit(true, false, InteractionState::Idle), None);
        assert_eq!(trigger.commit(true, true, InteractionState::Portfolio), None);
    }

    #[test]
    fn commit_prefers_exit_when_zones_overlap() {
        let mut trigger = ProximityTrigger::new(ProximityZone::new(0.0, 0.0, 2.0), ProximityZone::new(1.0, 0.0, 2.0));
        trigger.update(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(trigger.commit(true, true, InteractionState::Idle), Some(Commit::Exit));
    }

    #[test]
    fn sit_commit_starts_the_sit_clip() {
        use crate::{
            gallery::{PortfolioGallery, default_gallery_items},
            interaction::{Effect, InteractionMachine, ScriptedClip},
        };

        let mut machine = InteractionMachine::new(PortfolioGallery::new(default_gallery_items()).expect("gallery"));
        let mut trigger = ProximityTrigger::default();
        trigger.update(Vec3::new(SIT_ZONE_X, 0.0, SIT_ZONE_Z));

        assert_eq!(trigger.commit(true, true, machine.state()), Some(Commit::Sit));
        let effects = machine.enter_state(InteractionState::Sitting);
        assert_eq!(machine.state(), InteractionState::Sitting);
        assert!(effects.contains(&Effect::PlayClip(ScriptedClip::Sit)));

        // A second press while seated does nothing
        assert_eq!(trigger.commit(true, true, machine.state()), None);
    }
}
