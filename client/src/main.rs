use anyhow::{Context, Result};
use bevy::{
    log::LogPlugin,
    prelude::*,
    window::{CursorGrabMode, CursorOptions, WindowPosition},
};
use clap::Parser;
use std::path::PathBuf;

use room_client::{
    constants::BACKGROUND_COLOR,
    messages::{ClipFinished, InteractionEffect},
    resources::MovementLocks,
    systems::{
        FrameStage,
        animations::{animation_bind_system, animation_clip_system},
        audio::{footsteps_system, setup_audio_system},
        cutscene::{cutscene_effects_system, cutscene_playback_system, setup_cutscene_system},
        input::{input_cursor_toggle_system, input_focus_lost_system, input_mouse_look_system, input_tracker_system},
        interaction::{
            interaction_clip_finished_system, interaction_keys_system, interaction_link_system, intro_start_system,
        },
        lightning::{lightning_system, spark_system},
        movement::{movement_collision_system, movement_lock_system, movement_step_system},
        proximity::proximity_system,
        scene::{scene_collision_system, setup_world_system},
        screens::{screen_attach_system, screen_playback_system},
        ui::{setup_ui_system, ui_effects_system, ui_prompt_system},
    },
};
use room_common::{
    collision::CollisionChecker,
    config::ExperienceConfig,
    input::InputTracker,
    interaction::InteractionMachine,
    sequence::{ExitSequence, IntroSequence},
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "First-person portfolio room", long_about = None)]
struct Args {
    // JSON file overriding zones, gallery, clip rate and links
    #[arg(short, long)]
    config: Option<PathBuf>,

    // Folder holding models, sounds and images
    #[arg(long, default_value = "assets")]
    asset_base: String,

    // Start in the room without the intro clip
    #[arg(long)]
    skip_intro: bool,

    // Log filter in tracing's env-filter syntax
    #[arg(long, default_value = "info,wgpu=error,naga=warn")]
    log_filter: String,

    // Window X position
    #[arg(long)]
    window_x: Option<i32>,

    // Window Y position
    #[arg(long)]
    window_y: Option<i32>,

    // Window width
    #[arg(long, default_value = "1200")]
    window_width: u32,

    // Window height
    #[arg(long, default_value = "800")]
    window_height: u32,
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExperienceConfig::load(path)?,
        None => ExperienceConfig::default(),
    };
    if args.skip_intro {
        config.play_intro = false;
    }
    let machine = InteractionMachine::new(config.build_gallery().context("Invalid portfolio gallery")?);

    // Configure window position
    let window_position = if let (Some(x), Some(y)) = (args.window_x, args.window_y) {
        WindowPosition::At(IVec2::new(x, y))
    } else {
        WindowPosition::Automatic
    };

    let [r, g, b] = BACKGROUND_COLOR;

    // Start Bevy app
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Portfolio Room".to_string(),
                    resolution: (args.window_width, args.window_height).into(),
                    position: window_position,
                    ..default()
                }),
                // The pointer is grabbed on the first click
                primary_cursor_options: Some(CursorOptions {
                    visible: true,
                    grab_mode: CursorGrabMode::None,
                    hit_test: true,
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: args.asset_base,
                ..default()
            })
            .set(LogPlugin {
                filter: args.log_filter,
                ..default()
            }),
    )
    .insert_resource(ClearColor(Color::srgb(r, g, b)))
    .insert_resource(config.proximity())
    .insert_resource(config)
    .insert_resource(machine)
    .insert_resource(InputTracker::default())
    .insert_resource(CollisionChecker::default())
    .insert_resource(MovementLocks::default())
    .insert_resource(ExitSequence::default())
    .insert_resource(IntroSequence::default())
    .add_message::<ClipFinished>()
    .add_message::<InteractionEffect>()
    .configure_sets(
        Update,
        (
            FrameStage::Input,
            FrameStage::Motion,
            FrameStage::Proximity,
            FrameStage::Interaction,
            FrameStage::Collision,
            FrameStage::Presentation,
        )
            .chain(),
    )
    .add_systems(
        Startup,
        (
            setup_world_system,
            setup_ui_system,
            setup_audio_system,
            setup_cutscene_system,
            // Needs the cutscene player to exist
            intro_start_system,
        )
            .chain(),
    )
    .add_systems(
        Update,
        (
            // Drop held keys when focus is lost
            input_focus_lost_system,
            // Toggle cursor lock with Escape or a click
            input_cursor_toggle_system,
            // Keyboard and mouse into the input tracker
            input_tracker_system,
            // Mouse look while the pointer is locked
            input_mouse_look_system,
        )
            .chain()
            .in_set(FrameStage::Input),
    )
    .add_systems(Update, movement_step_system.in_set(FrameStage::Motion))
    .add_systems(Update, proximity_system.in_set(FrameStage::Proximity))
    .add_systems(
        Update,
        (interaction_clip_finished_system, interaction_keys_system)
            .chain()
            .in_set(FrameStage::Interaction),
    )
    .add_systems(
        Update,
        (
            // Volumes appear once the room scene is ready
            scene_collision_system,
            // Veto the move and place player and camera
            movement_collision_system,
        )
            .chain()
            .in_set(FrameStage::Collision),
    )
    .add_systems(
        Update,
        (
            movement_lock_system,
            cutscene_effects_system,
            cutscene_playback_system,
            ui_effects_system,
            ui_prompt_system,
            interaction_link_system,
            animation_bind_system,
            animation_clip_system,
            footsteps_system,
            screen_attach_system,
            screen_playback_system,
            lightning_system,
            spark_system,
        )
            .chain()
            .in_set(FrameStage::Presentation),
    )
    .run();

    Ok(())
}
