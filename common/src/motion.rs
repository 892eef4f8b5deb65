use bevy_ecs::prelude::*;
use bevy_math::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use crate::{
    collision::{CollisionChecker, PositionVeto},
    constants::*,
    input::{InputTracker, Key},
};

// ============================================================================
// Direction Table
// ============================================================================

// Angle (radians, counter-clockwise seen from above) between the camera's
// forward direction and the direction the held keys ask for. W beats S and
// A beats D, so opposite keys never cancel out.
#[must_use]
pub fn direction_offset(input: &InputTracker) -> f32 {
    let (w, a, s, d) = (
        input.pressed(Key::W),
        input.pressed(Key::A),
        input.pressed(Key::S),
        input.pressed(Key::D),
    );

    if w {
        if a {
            FRAC_PI_4
        } else if d {
            -FRAC_PI_4
        } else {
            0.0
        }
    } else if s {
        if a {
            FRAC_PI_4 + FRAC_PI_2
        } else if d {
            -FRAC_PI_4 - FRAC_PI_2
        } else {
            PI
        }
    } else if a {
        FRAC_PI_2
    } else if d {
        -FRAC_PI_2
    } else {
        0.0
    }
}

// Flatten a view direction onto the floor plane. Falls back to -Z when looking straight up or down.
#[must_use]
pub fn planar_forward(view_dir: Vec3) -> Vec3 {
    let flat = Vec3::new(view_dir.x, 0.0, view_dir.z);
    if flat.length_squared() < PHYSICS_EPSILON {
        Vec3::NEG_Z
    } else {
        flat.normalize()
    }
}

// Yaw whose +Z axis points along the given direction
#[must_use]
pub fn yaw_of(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}

// Shortest signed angle from `from` to `to`, in (-PI, PI]
#[must_use]
pub fn angle_delta(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(TAU);
    if delta > PI { delta - TAU } else { delta }
}

// ============================================================================
// Character Animation Clips
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClip {
    Idle,
    Move,
    Zap,
}

impl CharacterClip {
    // Zap beats move beats idle
    #[must_use]
    pub const fn select(shooting: bool, moving: bool) -> Self {
        if shooting {
            Self::Zap
        } else if moving {
            Self::Move
        } else {
            Self::Idle
        }
    }

    // Name of the animation inside the character model
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Move => "move",
            Self::Zap => "zap",
        }
    }

    #[must_use]
    pub const fn repeats(self) -> bool {
        !matches!(self, Self::Zap)
    }

    #[must_use]
    pub const fn time_scale(self) -> f32 {
        match self {
            Self::Zap => ZAP_TIME_SCALE,
            Self::Idle | Self::Move => 1.0,
        }
    }
}

// ============================================================================
// Jumping
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Jump {
    pub airborne: bool,
    pub velocity: f32,
}

impl Jump {
    // Advance one frame and return the new height. The floor is at y = 0.
    pub fn step(&mut self, wants_jump: bool, height: f32) -> f32 {
        if wants_jump && !self.airborne {
            self.airborne = true;
            self.velocity = JUMP_IMPULSE;
        }
        if !self.airborne {
            return height;
        }

        self.velocity -= JUMP_GRAVITY;
        let height = height + self.velocity;
        if height <= 0.0 {
            self.airborne = false;
            self.velocity = 0.0;
            return 0.0;
        }
        height
    }
}

// ============================================================================
// Motion Controller
// ============================================================================

/// Result of one motion step, consumed by the animation and audio systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub clip: CharacterClip,
    pub clip_changed: bool,
    pub moving: bool,
}

/// Sole owner of the player's pose. Facing follows the camera and is not
/// steered independently.
#[derive(Component, Debug, Clone)]
pub struct MotionController {
    position: Vec3,
    yaw: f32,
    head_bob_timer: f32,
    clip: CharacterClip,
    zap_elapsed: f32,
    jump: Jump,
    veto: PositionVeto,
    enabled: bool,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(Vec3::new(PLAYER_START_X, 0.0, PLAYER_START_Z), PLAYER_START_YAW)
    }
}

impl MotionController {
    #[must_use]
    pub const fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            head_bob_timer: 0.0,
            clip: CharacterClip::Idle,
            zap_elapsed: 0.0,
            jump: Jump {
                airborne: false,
                velocity: 0.0,
            },
            veto: PositionVeto::new(position),
            enabled: true,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    #[must_use]
    pub const fn clip(&self) -> CharacterClip {
        self.clip
    }

    #[must_use]
    pub const fn head_bob_timer(&self) -> f32 {
        self.head_bob_timer
    }

    #[cfg(test)]
    const fn last_valid_position(&self) -> Vec3 {
        self.veto.last_valid()
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    // Cutscenes switch player control off and back on
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // Progress of the zap clip in [0, 1]; zero unless zapping.
    #[must_use]
    pub fn zap_progress(&self) -> f32 {
        if self.clip == CharacterClip::Zap {
            (self.zap_elapsed / ZAP_CLIP_DURATION).min(1.0)
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn bolt_ready(&self) -> bool {
        self.zap_progress() >= ZAP_BOLT_PROGRESS
    }

    // Integrate one frame of input. `view_dir` is the camera's world-space
    // forward vector. The new position is a candidate until `apply_collision`.
    pub fn step(&mut self, delta: f32, input: &InputTracker, view_dir: Vec3) -> MotionStep {
        let (shooting, moving, wants_jump) = if self.enabled {
            (input.shooting(), input.any_movement(), input.pressed(Key::Space))
        } else {
            (false, false, false)
        };

        let clip = CharacterClip::select(shooting, moving);
        let clip_changed = clip != self.clip;
        if clip_changed {
            self.clip = clip;
            self.zap_elapsed = 0.0;
        }
        if clip == CharacterClip::Zap {
            self.zap_elapsed += delta * ZAP_TIME_SCALE;
        }

        let forward = planar_forward(view_dir);
        let step = angle_delta(self.yaw, yaw_of(forward)).clamp(-YAW_FOLLOW_STEP, YAW_FOLLOW_STEP);
        self.yaw = angle_delta(0.0, self.yaw + step);

        let walking = moving && !shooting;
        if walking {
            self.head_bob_timer += delta;
            let direction = Quat::from_rotation_y(direction_offset(input)) * forward;
            self.position.x += direction.x * WALK_SPEED * delta;
            self.position.z += direction.z * WALK_SPEED * delta;
        } else {
            self.head_bob_timer = 0.0;
        }

        self.position.y = self.jump.step(wants_jump, self.position.y);

        MotionStep {
            clip,
            clip_changed,
            moving: walking,
        }
    }

    // Reject the whole move if it collides. Returns true when the move was vetoed.
    pub fn apply_collision(&mut self, checker: &CollisionChecker) -> bool {
        let candidate = self.position;
        self.position = self.veto.apply(checker, candidate, PLAYER_COLLISION_RADIUS);
        self.position != candidate
    }

    // Head height, a small offset along the facing, and a head bob while walking.
    #[must_use]
    pub fn camera_position(&self) -> Vec3 {
        let rotation = self.rotation();
        let base = self.position + Vec3::Y * CAMERA_HEAD_HEIGHT;
        let forward = rotation * Vec3::NEG_Z * CAMERA_FORWARD_OFFSET;

        let phase = self.head_bob_timer * HEAD_BOB_FREQUENCY;
        let bob_y = phase.sin() * HEAD_BOB_AMPLITUDE_VERTICAL;
        let bob_side = (phase * 0.5).sin() * HEAD_BOB_AMPLITUDE_HORIZONTAL;
        let side = rotation * Vec3::X * bob_side;

        base + forward + Vec3::new(side.x, bob_y, side.z)
    }
}
