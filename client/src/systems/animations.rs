use bevy::prelude::*;
use std::time::Duration;

use room_common::{
    constants::ANIMATION_FADE_SECS,
    motion::{CharacterClip, MotionController},
};

use crate::{
    constants::{PLAYER_HIDDEN_MESH, PLAYER_RIGHT_HAND_BONE},
    markers::{PlayerMarker, PlayerModelMarker, RightHandMarker},
    resources::CharacterAnimations,
};

// Clip currently driving a bound animation player
#[derive(Component)]
pub struct CharacterRig {
    current: CharacterClip,
}

fn play_clip(
    transitions: &mut AnimationTransitions,
    player: &mut AnimationPlayer,
    node: AnimationNodeIndex,
    clip: CharacterClip,
    fade: Duration,
) {
    let active = transitions.play(player, node, fade).set_speed(clip.time_scale());
    if clip.repeats() {
        active.repeat();
    }
}

// ============================================================================
// Animation Systems
// ============================================================================

// Hook up the model's animation player once the glTF scene has spawned
pub fn animation_bind_system(
    mut commands: Commands,
    animations: Res<CharacterAnimations>,
    models: Query<Entity, With<PlayerModelMarker>>,
    children: Query<&Children>,
    names: Query<&Name>,
    mut players: Query<&mut AnimationPlayer, Without<CharacterRig>>,
) {
    for model in &models {
        for entity in children.iter_descendants(model) {
            if let Ok(mut player) = players.get_mut(entity) {
                let clip = CharacterClip::Idle;
                let Some(node) = animations.node(clip) else {
                    continue;
                };
                let mut transitions = AnimationTransitions::new();
                play_clip(&mut transitions, &mut player, node, clip, Duration::ZERO);
                commands.entity(entity).insert((
                    AnimationGraphHandle(animations.graph_handle.clone()),
                    transitions,
                    CharacterRig { current: clip },
                ));
                debug!("bound character animations to {entity}");

                // The rest of the model spawned with the player, prepare it now too
                for part in children.iter_descendants(model) {
                    let Ok(name) = names.get(part) else {
                        continue;
                    };
                    if name.as_str() == PLAYER_RIGHT_HAND_BONE {
                        commands.entity(part).insert(RightHandMarker);
                    } else if name.as_str().starts_with(PLAYER_HIDDEN_MESH) {
                        commands.entity(part).insert(Visibility::Hidden);
                    }
                }
            }
        }
    }
}

// Cross-fade to whichever clip the motion controller selected
pub fn animation_clip_system(
    animations: Res<CharacterAnimations>,
    controllers: Query<&MotionController, With<PlayerMarker>>,
    mut rigs: Query<(&mut AnimationPlayer, &mut AnimationTransitions, &mut CharacterRig)>,
) {
    let Some(controller) = controllers.iter().next() else {
        return;
    };
    let clip = controller.clip();

    for (mut player, mut transitions, mut rig) in &mut rigs {
        if rig.current == clip {
            continue;
        }
        let Some(node) = animations.node(clip) else {
            continue;
        };
        play_clip(
            &mut transitions,
            &mut player,
            node,
            clip,
            Duration::from_secs_f32(ANIMATION_FADE_SECS),
        );
        rig.current = clip;
    }
}
