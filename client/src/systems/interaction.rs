use bevy::prelude::*;

use room_common::{
    config::ExperienceConfig,
    input::InputTracker,
    interaction::{Effect, InteractionMachine},
    sequence::{ExitSequence, IntroSequence},
};

use crate::{
    links::open_link,
    messages::{ClipFinished, InteractionEffect},
    resources::MovementLocks,
};

// ============================================================================
// Interaction Systems
// ============================================================================

// Route clip completions to whichever sequence is waiting on them
pub fn interaction_clip_finished_system(
    mut finished: MessageReader<ClipFinished>,
    config: Res<ExperienceConfig>,
    mut machine: ResMut<InteractionMachine>,
    mut intro: ResMut<IntroSequence>,
    mut exit: ResMut<ExitSequence>,
    mut locks: ResMut<MovementLocks>,
    mut effects: MessageWriter<InteractionEffect>,
    mut app_exit: MessageWriter<AppExit>,
) {
    for ClipFinished(clip) in finished.read() {
        debug!("clip finished: {}", clip.asset_name());

        if intro.on_clip_finished(*clip) {
            info!("intro finished");
            locks.intro = intro.blocks_gameplay();
            effects.write(InteractionEffect(Effect::HideVideo));
        } else if exit.on_clip_finished(*clip) {
            info!("exit clip finished, opening {}", config.exit_link);
            if let Err(err) = open_link(&config.exit_link) {
                warn!("{err:#}");
            }
            app_exit.write(AppExit::Success);
        } else {
            effects.write_batch(machine.on_clip_finished(*clip).into_iter().map(InteractionEffect));
        }
    }
}

// Feed this frame's key presses to the interaction machine
pub fn interaction_keys_system(
    input: Res<InputTracker>,
    mut machine: ResMut<InteractionMachine>,
    mut effects: MessageWriter<InteractionEffect>,
) {
    if !machine.in_interaction() {
        return;
    }

    for key in input.just_pressed_keys() {
        let before = machine.state();
        let produced = machine.on_key(key);
        if !produced.is_empty() {
            debug!("{key:?} in {before:?} -> {:?}", machine.state());
        }
        effects.write_batch(produced.into_iter().map(InteractionEffect));
    }
}

// Open portfolio links in the browser
pub fn interaction_link_system(mut effects: MessageReader<InteractionEffect>) {
    for InteractionEffect(effect) in effects.read() {
        if let Effect::OpenLink(url) = effect {
            info!("opening {url}");
            if let Err(err) = open_link(url) {
                warn!("{err:#}");
            }
        }
    }
}

// ============================================================================
// Intro
// ============================================================================

// Start the intro clip, unless it is disabled or skipped from the command line
pub fn intro_start_system(
    config: Res<ExperienceConfig>,
    mut intro: ResMut<IntroSequence>,
    mut locks: ResMut<MovementLocks>,
    mut effects: MessageWriter<InteractionEffect>,
) {
    if config.play_intro {
        if intro.start() {
            effects.write(InteractionEffect(Effect::PlayClip(intro.clip())));
        }
    } else {
        intro.skip();
    }
    locks.intro = intro.blocks_gameplay();
}
