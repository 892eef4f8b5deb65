// ============================================================================
// Floating-Point Comparisons
// ============================================================================

// Small value for floating-point comparisons (near-zero checks, division guards).
pub const PHYSICS_EPSILON: f32 = 1e-6;

// ============================================================================
// Player
// ============================================================================

pub const PLAYER_START_X: f32 = 0.0;
pub const PLAYER_START_Z: f32 = 3.0;
pub const PLAYER_START_YAW: f32 = std::f32::consts::PI;

// Collision cylinder, approximated as a box (meters)
pub const PLAYER_COLLISION_RADIUS: f32 = 0.25;
pub const PLAYER_COLLISION_FOOT_CLEARANCE: f32 = 0.1; // box starts slightly above the feet
pub const PLAYER_COLLISION_HEIGHT: f32 = 3.0;

// Walk speed (meters per second)
pub const WALK_SPEED: f32 = 4.0;

// Maximum yaw correction towards the camera per frame (radians)
pub const YAW_FOLLOW_STEP: f32 = 0.2;

// Jumping works per frame, not per second
pub const JUMP_IMPULSE: f32 = 0.15;
pub const JUMP_GRAVITY: f32 = 0.006;

// ============================================================================
// Camera
// ============================================================================

pub const CAMERA_HEAD_HEIGHT: f32 = 2.85; // above the player's feet
pub const CAMERA_FORWARD_OFFSET: f32 = -0.25; // along the player's facing

pub const HEAD_BOB_FREQUENCY: f32 = 6.0;
pub const HEAD_BOB_AMPLITUDE_VERTICAL: f32 = 0.05;
pub const HEAD_BOB_AMPLITUDE_HORIZONTAL: f32 = 0.05;

// ============================================================================
// Character Animation
// ============================================================================

pub const ANIMATION_FADE_SECS: f32 = 0.2;
pub const ZAP_TIME_SCALE: f32 = 5.0;
pub const ZAP_CLIP_DURATION: f32 = 1.0; // seconds at 1x
pub const ZAP_BOLT_PROGRESS: f32 = 0.8; // bolt fires once the zap clip is this far along

// ============================================================================
// Lightning
// ============================================================================

pub const LIGHTNING_SEGMENTS: usize = 10;
pub const LIGHTNING_JITTER: f32 = 0.2; // full width of the random offset per axis

// Impact sparks. Rates are per second, tuned from per-frame values at 60 Hz.
pub const SPARK_LIFETIME: f32 = 0.1;
pub const SPARK_SPEED_MIN: f32 = 1.8;
pub const SPARK_SPEED_MAX: f32 = 6.0;
pub const SPARK_GRAVITY: f32 = -36.0;
pub const SPARK_RADIUS: f32 = 0.025;

// ============================================================================
// Proximity Zones
// ============================================================================

pub const EXIT_ZONE_X: f32 = -8.40;
pub const EXIT_ZONE_Z: f32 = -5.54;
pub const SIT_ZONE_X: f32 = -7.60;
pub const SIT_ZONE_Z: f32 = 1.40;
pub const ZONE_TOLERANCE: f32 = 2.0;

// ============================================================================
// Scene Collision Volumes
// ============================================================================

pub const GROUND_PLANE_NAME: &str = "ground_plane";
pub const FLOOR_VOLUME_NAME: &str = "floor_1";
pub const GROUND_PLANE_SIZE: f32 = 50.0;
pub const GROUND_PLANE_THICKNESS: f32 = 0.02;

// Scene nodes turned into static collision volumes once the room has loaded
pub const COLLISION_NODE_NAMES: [&str; 15] = [
    "col_sofa_1",
    "col_Chair_2",
    "col_Desk",
    "col_wall",
    "col_window",
    "col_wall2",
    "col_wall3",
    "glass",
    "Dumbbell_4",
    "table_1",
    "Ball_1",
    FLOOR_VOLUME_NAME,
    "shootingtargets",
    "exitdoor_1",
    "exitdoor_2",
];

// ============================================================================
// Cutscenes
// ============================================================================

pub const CLIP_FRAMES_PER_SECOND: f32 = 30.0;
