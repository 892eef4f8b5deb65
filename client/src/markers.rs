use bevy::prelude::*;

// ============================================================================
// Player Markers
// ============================================================================

// Marker component for the player root entity
#[derive(Component)]
pub struct PlayerMarker;

// Marker component for the player's glTF model (for animation)
#[derive(Component)]
pub struct PlayerModelMarker;

// Marker component for the bone the lightning starts from
#[derive(Component)]
pub struct RightHandMarker;

// ============================================================================
// Camera & Scene Markers
// ============================================================================

// Marker component for the main camera
#[derive(Component)]
pub struct MainCameraMarker;

// Marker component for the room scene
#[derive(Component)]
pub struct RoomMarker;

// ============================================================================
// UI Markers
// ============================================================================

// Marker component for the crosshair UI
#[derive(Component)]
pub struct CrosshairUIMarker;

// Marker component for the "press F to sit" prompt
#[derive(Component)]
pub struct SitPromptMarker;

// Marker component for the exit door prompt
#[derive(Component)]
pub struct ExitPromptMarker;

// Marker component for the full-screen cutscene surface
#[derive(Component)]
pub struct CutsceneSurfaceMarker;

// Marker component for the container of freeze-frame prompt buttons
#[derive(Component)]
pub struct InteractionOverlayMarker;

// Marker component for the portfolio image
#[derive(Component)]
pub struct GalleryImageMarker;

// ============================================================================
// Audio Markers
// ============================================================================

// Marker component for the looping footsteps
#[derive(Component)]
pub struct FootstepsMarker;

// Marker component for the looping zap sound
#[derive(Component)]
pub struct ZapSoundMarker;
