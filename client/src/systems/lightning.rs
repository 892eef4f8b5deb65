use bevy::{
    picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings},
    prelude::*,
};
use rand::prelude::*;

use room_common::{
    constants::{LIGHTNING_JITTER, SPARK_RADIUS},
    lightning::{Spark, bolt_path},
    motion::MotionController,
};

use crate::{
    constants::LIGHTNING_COLOR,
    markers::{MainCameraMarker, PlayerMarker, RightHandMarker, ZapSoundMarker},
    systems::audio::set_loop_playing,
};

// ============================================================================
// Components
// ============================================================================

// A spark thrown off at the bolt's impact point
#[derive(Component)]
pub struct SparkEffect(pub Spark);

fn lightning_color() -> Color {
    let [r, g, b] = LIGHTNING_COLOR;
    Color::srgb(r, g, b)
}

// ============================================================================
// Lightning System
// ============================================================================

// Draw the bolt from the hand to whatever the crosshair points at, once the
// zap animation has reached its release point
pub fn lightning_system(
    mut commands: Commands,
    mut ray_cast: MeshRayCast,
    mut gizmos: Gizmos,
    controllers: Query<(Entity, &MotionController), With<PlayerMarker>>,
    camera: Single<&GlobalTransform, With<MainCameraMarker>>,
    hands: Query<&GlobalTransform, With<RightHandMarker>>,
    parents: Query<&ChildOf>,
    mut sinks: Query<&mut AudioSink, With<ZapSoundMarker>>,
) {
    let Some((player, controller)) = controllers.iter().next() else {
        return;
    };

    let target = if controller.bolt_ready() {
        // Never hit the player's own meshes
        let not_player = |entity: Entity| entity != player && !parents.iter_ancestors(entity).any(|a| a == player);
        let settings = MeshRayCastSettings::default().with_filter(&not_player);
        let ray = Ray3d::new(camera.translation(), camera.forward());
        ray_cast.cast_ray(ray, &settings).first().map(|(_, hit)| hit.point)
    } else {
        None
    };

    if let Some(target) = target {
        let from = hands
            .iter()
            .next()
            .map_or_else(|| controller.camera_position(), GlobalTransform::translation);
        let mut rng = rand::rng();
        let mut jitter = || {
            Vec3::new(
                rng.random_range(-0.5..0.5),
                rng.random_range(-0.5..0.5),
                rng.random_range(-0.5..0.5),
            ) * LIGHTNING_JITTER
        };
        gizmos.linestrip(bolt_path(from, target, &mut jitter), lightning_color());

        // One new spark per frame while the bolt is hitting
        let spark = Spark::new(
            target,
            rng.random_range(0.0..std::f32::consts::TAU),
            rng.random_range(0.0..std::f32::consts::PI),
            rng.random_range(0.0..1.0),
        );
        commands.spawn(SparkEffect(spark));
    }

    for mut sink in &mut sinks {
        set_loop_playing(&mut sink, target.is_some());
    }
}

// Move, fade and expire impact sparks
pub fn spark_system(
    mut commands: Commands,
    time: Res<Time>,
    mut gizmos: Gizmos,
    mut sparks: Query<(Entity, &mut SparkEffect)>,
) {
    let color = lightning_color();
    for (entity, mut spark) in &mut sparks {
        if !spark.0.advance(time.delta_secs()) {
            commands.entity(entity).despawn();
            continue;
        }
        gizmos.sphere(
            Isometry3d::from_translation(spark.0.position),
            SPARK_RADIUS,
            color.with_alpha(spark.0.opacity()),
        );
    }
}
