// ============================================================================
// Client Constants
// ============================================================================

// Camera settings
pub const CAMERA_FOV_DEGREES: f32 = 57.5;
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 3000.0;

// Mouse sensitivity as radians per pixel
pub const MOUSE_SENSITIVITY: f32 = 0.002;

// Scene background (sky blue)
pub const BACKGROUND_COLOR: [f32; 3] = [0.659, 0.871, 0.941];

// Lights
pub const LIGHT_AMBIENT_BRIGHTNESS: f32 = 400.0;
pub const LIGHT_DIRECTIONAL_BRIGHTNESS: f32 = 6000.0;

// Models
pub const ROOM_MODEL: &str = "models/roomv8.glb";
pub const PLAYER_MODEL: &str = "models/player.glb";
pub const PLAYER_MODEL_SCALE: f32 = 1.8;
pub const PLAYER_HIDDEN_MESH: &str = "face001"; // would block the first-person camera
pub const PLAYER_RIGHT_HAND_BONE: &str = "mixamorigRightHand";

// Animation indices inside the player model (the T-pose clip is skipped)
pub const PLAYER_IDLE_ANIMATION_INDEX: usize = 0;
pub const PLAYER_MOVE_ANIMATION_INDEX: usize = 1;
pub const PLAYER_ZAP_ANIMATION_INDEX: usize = 3;

// Sounds
pub const SOUND_WALKING: &str = "sounds/walkingsound.ogg";
pub const SOUND_ZAP: &str = "sounds/shootsound.ogg";

// Asset folders
pub const CLIP_FOLDER: &str = "interactiveanimations";
pub const GALLERY_FOLDER: &str = "interactiveimages";
pub const BUTTON_FOLDER: &str = "buttonoverlays";
pub const SIT_PROMPT_IMAGE: &str = "buttonoverlays/sit.png";
pub const EXIT_PROMPT_IMAGE: &str = "buttonoverlays/exit.png";
pub const SCREEN_FOLDER: &str = "backgroundvideos";

// Room meshes that show a looping clip, each from "<SCREEN_FOLDER>/<name>loop"
pub const SCREEN_NAMES: [&str; 4] = ["news1", "news2", "news3", "wallpaper"];

// UI layout
pub const PROMPT_WIDTH: f32 = 200.0;
pub const OVERLAY_BUTTON_HEIGHT: f32 = 58.0;
pub const OVERLAY_MARGIN: f32 = 20.0;
pub const CROSSHAIR_SIZE: f32 = 20.0;
pub const CROSSHAIR_THICKNESS: f32 = 2.0;

// Stacking order of full-screen layers
pub const Z_PROMPT: i32 = 1000;
pub const Z_CUTSCENE: i32 = 2000;
pub const Z_GALLERY: i32 = 2001;
pub const Z_OVERLAY: i32 = 2002;

// Lightning
pub const LIGHTNING_COLOR: [f32; 3] = [0.0, 1.0, 1.0];
