use bevy::prelude::*;

pub mod animations;
pub mod audio;
pub mod cutscene;
pub mod input;
pub mod interaction;
pub mod lightning;
pub mod movement;
pub mod proximity;
pub mod scene;
pub mod screens;
pub mod ui;

// ============================================================================
// Frame Stages
// ============================================================================

/// Order of work inside one frame. Chained in `Update`, so every stage sees
/// the results of the stages before it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameStage {
    // Keyboard, mouse and pointer lock into the input tracker
    Input,
    // Clip selection, facing, walking and jumping
    Motion,
    // Zone flags and the sit / exit commits
    Proximity,
    // Interaction keys and clip completions
    Interaction,
    // Veto the candidate position, then place the camera
    Collision,
    // Cutscene, overlays, prompts, sound, animation, screens and lightning
    Presentation,
}
