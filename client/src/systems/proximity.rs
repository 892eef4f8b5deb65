use bevy::{prelude::*, window::CursorOptions};

use room_common::{
    input::{InputTracker, Key},
    interaction::{Effect, InteractionMachine, InteractionState},
    motion::MotionController,
    proximity::{Commit, ProximityTrigger},
    sequence::ExitSequence,
};

use crate::{
    markers::PlayerMarker,
    messages::InteractionEffect,
    resources::MovementLocks,
    systems::input::set_cursor_lock,
};

// ============================================================================
// Proximity Systems
// ============================================================================

// Refresh the zone flags and act on F inside a zone
pub fn proximity_system(
    input: Res<InputTracker>,
    players: Query<&MotionController, With<PlayerMarker>>,
    mut trigger: ResMut<ProximityTrigger>,
    mut machine: ResMut<InteractionMachine>,
    mut exit: ResMut<ExitSequence>,
    mut locks: ResMut<MovementLocks>,
    mut cursor_options: Single<&mut CursorOptions>,
    mut effects: MessageWriter<InteractionEffect>,
) {
    let Some(controller) = players.iter().next() else {
        return;
    };

    let before = trigger.flags();
    let flags = trigger.update(controller.position());
    if flags != before {
        debug!("zones: near exit {}, near sit {}", flags.near_exit, flags.near_sit);
    }

    match trigger.commit(input.just_pressed(Key::F), locks.allowed(), machine.state()) {
        Some(Commit::Exit) => {
            if let Some(effect) = begin_exit(&mut exit, &mut locks, &mut cursor_options) {
                info!("leaving the room");
                effects.write(InteractionEffect(effect));
            }
        }
        Some(Commit::Sit) => {
            info!("sitting down");
            effects.write_batch(machine.enter_state(InteractionState::Sitting).into_iter().map(InteractionEffect));
        }
        None => {}
    }
}

// Start the one-shot exit clip. Movement stays locked and the pointer is
// released for the rest of the session.
pub fn begin_exit(exit: &mut ExitSequence, locks: &mut MovementLocks, cursor_options: &mut CursorOptions) -> Option<Effect> {
    if !exit.start() {
        return None;
    }
    locks.exit = true;
    set_cursor_lock(cursor_options, false);
    Some(Effect::PlayClip(exit.clip()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::window::CursorGrabMode;
    use room_common::interaction::ScriptedClip;

    #[test]
    fn exit_locks_movement_and_frees_pointer() {
        let mut exit = ExitSequence::default();
        let mut locks = MovementLocks::default();
        let mut options = CursorOptions::default();
        set_cursor_lock(&mut options, true);

        let effect = begin_exit(&mut exit, &mut locks, &mut options);
        assert_eq!(effect, Some(Effect::PlayClip(ScriptedClip::Exit)));
        assert!(locks.exit);
        assert!(!locks.allowed());
        assert!(options.visible);
        assert_eq!(options.grab_mode, CursorGrabMode::None);
    }

    #[test]
    fn exit_starts_only_once() {
        let mut exit = ExitSequence::default();
        let mut locks = MovementLocks::default();
        let mut options = CursorOptions::default();
        assert!(begin_exit(&mut exit, &mut locks, &mut options).is_some());
        assert!(begin_exit(&mut exit, &mut locks, &mut options).is_none());
    }
}
