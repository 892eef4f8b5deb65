use bevy::{
    camera::primitives::Aabb,
    gltf::GltfAssetLabel,
    prelude::*,
    scene::{SceneInstance, SceneRoot, SceneSpawner},
};
use std::collections::HashMap;

use room_common::{
    collision::{CollisionChecker, CollisionVolume},
    constants::COLLISION_NODE_NAMES,
    motion::{CharacterClip, MotionController},
};

use crate::{constants::*, markers::*, resources::CharacterAnimations};

// ============================================================================
// World Setup System
// ============================================================================

pub fn setup_world_system(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
) {
    let controller = MotionController::default();

    // Main camera, looking down -Z like the player at spawn
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(controller.camera_position()),
        IsDefaultUiCamera,
        MainCameraMarker,
    ));

    // Soft directional light from above
    commands.spawn((
        DirectionalLight {
            illuminance: LIGHT_DIRECTIONAL_BRIGHTNESS,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 7.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Ambient fill
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: LIGHT_AMBIENT_BRIGHTNESS,
        affects_lightmapped_meshes: false,
    });

    // The room. Its collision volumes are read once the scene has spawned.
    commands.spawn((
        SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(ROOM_MODEL))),
        RoomMarker,
    ));

    // Animation graph with the three character clips
    let clips = [
        (CharacterClip::Idle, PLAYER_IDLE_ANIMATION_INDEX),
        (CharacterClip::Move, PLAYER_MOVE_ANIMATION_INDEX),
        (CharacterClip::Zap, PLAYER_ZAP_ANIMATION_INDEX),
    ];
    let (graph, indices) = AnimationGraph::from_clips(
        clips
            .iter()
            .map(|(_, index)| asset_server.load(GltfAssetLabel::Animation(*index).from_asset(PLAYER_MODEL))),
    );
    let nodes: HashMap<_, _> = clips.iter().map(|(clip, _)| *clip).zip(indices).collect();
    commands.insert_resource(CharacterAnimations {
        graph_handle: graphs.add(graph),
        nodes,
    });

    // The player. The controller owns position and facing, the transform follows it.
    commands
        .spawn((
            Transform::from_translation(controller.position()).with_rotation(controller.rotation()),
            Visibility::default(),
            controller,
            PlayerMarker,
        ))
        .with_children(|parent| {
            parent.spawn((
                SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(PLAYER_MODEL))),
                Transform::from_scale(Vec3::splat(PLAYER_MODEL_SCALE)),
                PlayerModelMarker,
            ));
        });
}

// ============================================================================
// Scene Collision
// ============================================================================

// World-space corners of a mesh's local bounding box
fn world_corners(aabb: &Aabb, transform: &GlobalTransform) -> [Vec3; 8] {
    let center = Vec3::from(aabb.center);
    let half = Vec3::from(aabb.half_extents);
    let mut corners = [Vec3::ZERO; 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let sign = Vec3::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        );
        *corner = transform.transform_point(center + half * sign);
    }
    corners
}

// Build the static volumes from the room's named nodes once it has spawned
pub fn scene_collision_system(
    mut checker: ResMut<CollisionChecker>,
    scene_spawner: Res<SceneSpawner>,
    rooms: Query<(Entity, &SceneInstance), With<RoomMarker>>,
    children: Query<&Children>,
    names: Query<&Name>,
    bounds: Query<(&Aabb, &GlobalTransform)>,
) {
    if checker.is_loaded() {
        return;
    }
    let Some((room, instance)) = rooms.iter().next() else {
        return;
    };
    if !scene_spawner.instance_is_ready(**instance) {
        return;
    }

    let mut volumes = Vec::new();
    for entity in children.iter_descendants(room) {
        let Ok(name) = names.get(entity) else {
            continue;
        };
        if !COLLISION_NODE_NAMES.contains(&name.as_str()) {
            continue;
        }

        let corners = std::iter::once(entity)
            .chain(children.iter_descendants(entity))
            .filter_map(|part| bounds.get(part).ok())
            .flat_map(|(aabb, transform)| world_corners(aabb, transform));
        if let Some(volume) = CollisionVolume::enclosing(name.as_str(), corners) {
            trace!("collision volume {}: {:?} .. {:?}", volume.name, volume.min, volume.max);
            volumes.push(volume);
        }
    }

    // Bounds are computed a frame after the meshes appear
    if volumes.is_empty() {
        return;
    }

    volumes.push(CollisionVolume::ground_plane());
    let missing: Vec<_> = COLLISION_NODE_NAMES
        .iter()
        .filter(|name| !volumes.iter().any(|volume| volume.name == **name))
        .collect();
    if !missing.is_empty() {
        warn!("room is missing collision nodes: {missing:?}");
    }

    info!("loaded {} collision volumes", volumes.len());
    checker.load(volumes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_follow_the_node_transform() {
        let aabb = Aabb::from_min_max(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));
        let transform = GlobalTransform::from(Transform::from_xyz(3.0, 0.0, 0.0).with_scale(Vec3::splat(2.0)));
        let volume = CollisionVolume::enclosing("col_Desk", world_corners(&aabb, &transform)).expect("eight corners");
        assert!((volume.min - Vec3::new(1.0, 0.0, -2.0)).length() < 1e-5);
        assert!((volume.max - Vec3::new(5.0, 4.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn rotated_node_grows_its_box() {
        let aabb = Aabb::from_min_max(Vec3::new(-1.0, 0.0, -0.1), Vec3::new(1.0, 1.0, 0.1));
        let transform =
            GlobalTransform::from(Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4)));
        let volume = CollisionVolume::enclosing("col_wall", world_corners(&aabb, &transform)).expect("eight corners");
        assert!(volume.max.z > 0.7);
        assert!(volume.max.x > 0.7);
    }
}
