use bevy::prelude::*;

use room_common::{
    interaction::{Effect, InteractionMachine, Overlay, OverlaySlot},
    proximity::{Prompt, ProximityTrigger},
    sequence::{ExitSequence, SequencePhase},
};

use crate::{
    constants::*,
    markers::*,
    messages::InteractionEffect,
    resources::CutscenePlayer,
};

// Full-window absolute node for a stacked layer
fn full_screen() -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        top: Val::Px(0.0),
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    }
}

// ============================================================================
// UI Setup System
// ============================================================================

pub fn setup_ui_system(mut commands: Commands, asset_server: Res<AssetServer>) {
    // Create crosshair UI
    let crosshair_color = Color::srgba(1.0, 1.0, 1.0, 0.8);

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(50.0),
                top: Val::Percent(50.0),
                width: Val::Px(0.0),
                height: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            CrosshairUIMarker,
        ))
        .with_children(|parent| {
            // Horizontal line
            parent.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(-CROSSHAIR_SIZE / 2.0),
                    top: Val::Px(-CROSSHAIR_THICKNESS / 2.0),
                    width: Val::Px(CROSSHAIR_SIZE),
                    height: Val::Px(CROSSHAIR_THICKNESS),
                    ..default()
                },
                BackgroundColor(crosshair_color),
            ));
            // Vertical line
            parent.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(-CROSSHAIR_THICKNESS / 2.0),
                    top: Val::Px(-CROSSHAIR_SIZE / 2.0),
                    width: Val::Px(CROSSHAIR_THICKNESS),
                    height: Val::Px(CROSSHAIR_SIZE),
                    ..default()
                },
                BackgroundColor(crosshair_color),
            ));
        });

    // Proximity prompts, centred and hidden until a zone is entered
    spawn_prompt(&mut commands, &asset_server, SIT_PROMPT_IMAGE, SitPromptMarker);
    spawn_prompt(&mut commands, &asset_server, EXIT_PROMPT_IMAGE, ExitPromptMarker);

    // Cutscene surface on black so letterboxing stays dark
    commands.spawn((
        full_screen(),
        ImageNode::default(),
        BackgroundColor(Color::BLACK),
        GlobalZIndex(Z_CUTSCENE),
        Visibility::Hidden,
        CutsceneSurfaceMarker,
    ));

    // Portfolio image above the cutscene
    commands.spawn((
        full_screen(),
        ImageNode::default(),
        BackgroundColor(Color::BLACK),
        GlobalZIndex(Z_GALLERY),
        Visibility::Hidden,
        GalleryImageMarker,
    ));

    // Button prompts over the freeze-frame or gallery
    commands.spawn((
        full_screen(),
        GlobalZIndex(Z_OVERLAY),
        Visibility::Hidden,
        InteractionOverlayMarker,
    ));
}

fn spawn_prompt(commands: &mut Commands, asset_server: &AssetServer, image: &'static str, marker: impl Component) {
    commands
        .spawn((
            Node {
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..full_screen()
            },
            GlobalZIndex(Z_PROMPT),
            Visibility::Hidden,
            marker,
        ))
        .with_children(|parent| {
            parent.spawn((
                ImageNode::new(asset_server.load(image)),
                Node {
                    width: Val::Px(PROMPT_WIDTH),
                    ..default()
                },
            ));
        });
}

// Row spanning the window that places one button in its slot
#[must_use]
pub fn slot_node(slot: OverlaySlot) -> Node {
    let (top, bottom) = match slot {
        OverlaySlot::TopCenter => (Val::Px(OVERLAY_MARGIN), Val::Auto),
        _ => (Val::Auto, Val::Px(OVERLAY_MARGIN)),
    };
    let justify_content = match slot {
        OverlaySlot::BottomLeft => JustifyContent::FlexStart,
        OverlaySlot::BottomCenter | OverlaySlot::TopCenter => JustifyContent::Center,
        OverlaySlot::BottomRight => JustifyContent::FlexEnd,
    };

    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        top,
        bottom,
        width: Val::Percent(100.0),
        padding: UiRect::horizontal(Val::Px(OVERLAY_MARGIN)),
        justify_content,
        ..default()
    }
}

// ============================================================================
// Overlay & Gallery
// ============================================================================

// Apply overlay and gallery effects. At most one overlay is shown at a time.
pub fn ui_effects_system(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut effects: MessageReader<InteractionEffect>,
    overlay: Single<(Entity, &mut Visibility), (With<InteractionOverlayMarker>, Without<GalleryImageMarker>)>,
    gallery: Single<(&mut ImageNode, &mut Visibility), (With<GalleryImageMarker>, Without<InteractionOverlayMarker>)>,
) {
    let (overlay, mut overlay_visibility) = overlay.into_inner();
    let (mut gallery_image, mut gallery_visibility) = gallery.into_inner();

    for InteractionEffect(effect) in effects.read() {
        match effect {
            Effect::ClearOverlay | Effect::PlayClip(_) => {
                commands.entity(overlay).despawn_related::<Children>();
                overlay_visibility.set_if_neq(Visibility::Hidden);
            }
            Effect::ShowOverlay(kind) => {
                commands.entity(overlay).despawn_related::<Children>();
                spawn_overlay_buttons(&mut commands, &asset_server, overlay, *kind);
                overlay_visibility.set_if_neq(Visibility::Inherited);
            }
            Effect::ShowGallery { image } => {
                gallery_image.image = asset_server.load(format!("{GALLERY_FOLDER}/{image}"));
                gallery_visibility.set_if_neq(Visibility::Inherited);
            }
            Effect::HideGallery => {
                gallery_visibility.set_if_neq(Visibility::Hidden);
            }
            _ => {}
        }
    }
}

fn spawn_overlay_buttons(commands: &mut Commands, asset_server: &AssetServer, root: Entity, overlay: Overlay) {
    commands.entity(root).with_children(|parent| {
        for (image, slot) in overlay.buttons() {
            parent.spawn(slot_node(*slot)).with_children(|row| {
                row.spawn((
                    ImageNode::new(asset_server.load(format!("{BUTTON_FOLDER}/{image}"))),
                    Node {
                        height: Val::Px(OVERLAY_BUTTON_HEIGHT),
                        ..default()
                    },
                ));
            });
        }
    });
}

// ============================================================================
// Prompts & Crosshair
// ============================================================================

/// Visibility of the sit prompt, the exit prompt and the crosshair.
#[must_use]
pub fn hud_visibility(prompt: Option<Prompt>, screen_busy: bool) -> [Visibility; 3] {
    let shown = |visible: bool| if visible { Visibility::Inherited } else { Visibility::Hidden };
    [
        shown(prompt == Some(Prompt::Sit)),
        shown(prompt == Some(Prompt::Exit)),
        shown(prompt.is_none() && !screen_busy),
    ]
}

pub fn ui_prompt_system(
    trigger: Res<ProximityTrigger>,
    machine: Res<InteractionMachine>,
    exit: Res<ExitSequence>,
    cutscene: Res<CutscenePlayer>,
    mut sit_prompt: Single<
        &mut Visibility,
        (With<SitPromptMarker>, Without<ExitPromptMarker>, Without<CrosshairUIMarker>),
    >,
    mut exit_prompt: Single<
        &mut Visibility,
        (With<ExitPromptMarker>, Without<SitPromptMarker>, Without<CrosshairUIMarker>),
    >,
    mut crosshair: Single<
        &mut Visibility,
        (With<CrosshairUIMarker>, Without<SitPromptMarker>, Without<ExitPromptMarker>),
    >,
) {
    let screen_busy =
        machine.in_interaction() || cutscene.playback.is_visible() || exit.phase() != SequencePhase::NotStarted;
    let [sit, exit, cross] = hud_visibility(trigger.visible_prompt(screen_busy), screen_busy);

    sit_prompt.set_if_neq(sit);
    exit_prompt.set_if_neq(exit);
    crosshair.set_if_neq(cross);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crosshair_gives_way_to_prompts() {
        assert_eq!(
            hud_visibility(None, false),
            [Visibility::Hidden, Visibility::Hidden, Visibility::Inherited]
        );
        assert_eq!(
            hud_visibility(Some(Prompt::Sit), false),
            [Visibility::Inherited, Visibility::Hidden, Visibility::Hidden]
        );
        assert_eq!(
            hud_visibility(Some(Prompt::Exit), false),
            [Visibility::Hidden, Visibility::Inherited, Visibility::Hidden]
        );
    }

    #[test]
    fn busy_screen_hides_everything() {
        assert_eq!(hud_visibility(None, true), [Visibility::Hidden; 3]);
    }

    #[test]
    fn top_slot_is_anchored_to_the_top() {
        let node = slot_node(OverlaySlot::TopCenter);
        assert_eq!(node.top, Val::Px(OVERLAY_MARGIN));
        assert_eq!(node.bottom, Val::Auto);
        assert_eq!(slot_node(OverlaySlot::BottomRight).justify_content, JustifyContent::FlexEnd);
    }
}
