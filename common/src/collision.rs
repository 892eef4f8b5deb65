use bevy_ecs::prelude::*;
use bevy_math::Vec3;

use crate::constants::*;

// ============================================================================
// Helper Functions
// ============================================================================

// Check if two 1D ranges overlap (touching counts as overlapping).
#[must_use]
pub fn ranges_overlap_1d(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_max >= b_min && a_min <= b_max
}

// ============================================================================
// Collision Volumes
// ============================================================================

/// Named static axis-aligned box taken from a scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionVolume {
    pub name: String,
    pub min: Vec3,
    pub max: Vec3,
}

impl CollisionVolume {
    #[must_use]
    pub fn new(name: impl Into<String>, min: Vec3, max: Vec3) -> Self {
        Self {
            name: name.into(),
            min: min.min(max),
            max: min.max(max),
        }
    }

    #[must_use]
    pub fn from_center_size(name: impl Into<String>, center: Vec3, size: Vec3) -> Self {
        let half = size.abs() / 2.0;
        Self::new(name, center - half, center + half)
    }

    // Smallest box holding every point, or None without points
    #[must_use]
    pub fn enclosing(name: impl Into<String>, points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), point| (min.min(point), max.max(point)));
        Some(Self::new(name, min, max))
    }

    // The synthetic ground plane placed under the room
    #[must_use]
    pub fn ground_plane() -> Self {
        Self::from_center_size(
            GROUND_PLANE_NAME,
            Vec3::new(0.0, GROUND_PLANE_THICKNESS / 2.0, 0.0),
            Vec3::new(GROUND_PLANE_SIZE, GROUND_PLANE_THICKNESS, GROUND_PLANE_SIZE),
        )
    }

    #[must_use]
    pub fn intersects(&self, min: Vec3, max: Vec3) -> bool {
        ranges_overlap_1d(self.min.x, self.max.x, min.x, max.x)
            && ranges_overlap_1d(self.min.y, self.max.y, min.y, max.y)
            && ranges_overlap_1d(self.min.z, self.max.z, min.z, max.z)
    }
}

// Box standing in for the player's vertical cylinder at `position`.
#[must_use]
pub fn player_bounds(position: Vec3, radius: f32) -> (Vec3, Vec3) {
    (
        Vec3::new(
            position.x - radius,
            position.y + PLAYER_COLLISION_FOOT_CLEARANCE,
            position.z - radius,
        ),
        Vec3::new(
            position.x + radius,
            position.y + PLAYER_COLLISION_HEIGHT,
            position.z + radius,
        ),
    )
}

// ============================================================================
// Collision Checker
// ============================================================================

/// Static volumes of the loaded room. Filled once when the scene is ready and
/// never changed afterwards.
#[derive(Resource, Debug, Default)]
pub struct CollisionChecker {
    volumes: Vec<CollisionVolume>,
    loaded: bool,
}

impl CollisionChecker {
    #[must_use]
    pub const fn new(volumes: Vec<CollisionVolume>) -> Self {
        Self { volumes, loaded: true }
    }

    // Install the scene volumes. Later calls are ignored so the list stays fixed for the session.
    pub fn load(&mut self, volumes: Vec<CollisionVolume>) -> bool {
        if self.loaded {
            bevy_log::warn!("collision volumes already loaded, ignoring {} new volumes", volumes.len());
            return false;
        }
        self.volumes = volumes;
        self.loaded = true;
        true
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn volumes(&self) -> &[CollisionVolume] {
        &self.volumes
    }

    #[must_use]
    pub fn is_excluded(name: &str) -> bool {
        name == GROUND_PLANE_NAME || name == FLOOR_VOLUME_NAME
    }

    // True as soon as any non-floor volume overlaps the player box.
    #[must_use]
    pub fn check_collision(&self, position: Vec3, radius: f32) -> bool {
        let (min, max) = player_bounds(position, radius);
        self.volumes
            .iter()
            .filter(|volume| !Self::is_excluded(&volume.name))
            .any(|volume| volume.intersects(min, max))
    }

    // First volume the player box overlaps, for diagnostics
    #[must_use]
    pub fn first_hit(&self, position: Vec3, radius: f32) -> Option<&CollisionVolume> {
        let (min, max) = player_bounds(position, radius);
        self.volumes
            .iter()
            .filter(|volume| !Self::is_excluded(&volume.name))
            .find(|volume| volume.intersects(min, max))
    }
}

// ============================================================================
// Position Veto
// ============================================================================

/// Remembers the last position that did not collide. A colliding move is
/// rejected as a whole, there is no sliding along obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionVeto {
    last_valid: Vec3,
}

impl PositionVeto {
    #[must_use]
    pub const fn new(start: Vec3) -> Self {
        Self { last_valid: start }
    }

    #[must_use]
    pub const fn last_valid(&self) -> Vec3 {
        self.last_valid
    }

    // Returns the position the player ends up at after the check.
    pub fn apply(&mut self, checker: &CollisionChecker, candidate: Vec3, radius: f32) -> Vec3 {
        if checker.check_collision(candidate, radius) {
            self.last_valid
        } else {
            self.last_valid = candidate;
            candidate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> CollisionChecker {
        CollisionChecker::new(vec![
            CollisionVolume::ground_plane(),
            CollisionVolume::new(FLOOR_VOLUME_NAME, Vec3::new(-10.0, -0.5, -10.0), Vec3::new(10.0, 0.05, 10.0)),
            CollisionVolume::new("col_Desk", Vec3::new(1.0, 0.0, 1.0), Vec3::new(2.0, 1.0, 2.0)),
            CollisionVolume::new("col_wall", Vec3::new(-5.0, 0.0, -6.0), Vec3::new(5.0, 3.0, -5.8)),
        ])
    }

    #[test]
    fn enclosing_box_spans_all_points() {
        let volume = CollisionVolume::enclosing(
            "col_Desk",
            [Vec3::new(1.0, 0.0, 2.0), Vec3::new(-1.0, 3.0, 0.5), Vec3::new(0.0, 1.0, -2.0)],
        )
        .expect("three points");
        assert_eq!(volume.min, Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(volume.max, Vec3::new(1.0, 3.0, 2.0));
        assert!(CollisionVolume::enclosing("empty", []).is_none());
    }

    #[test]
    fn ground_and_floor_never_collide() {
        let checker = room();
        // Standing on the floor in open space
        assert!(!checker.check_collision(Vec3::new(-3.0, 0.0, 3.0), PLAYER_COLLISION_RADIUS));
        // Even when sunk into the floor volume
        assert!(!checker.check_collision(Vec3::new(-3.0, -0.4, 3.0), PLAYER_COLLISION_RADIUS));
    }

    #[test]
    fn furniture_collides() {
        let checker = room();
        assert!(checker.check_collision(Vec3::new(1.5, 0.0, 1.5), PLAYER_COLLISION_RADIUS));
        // Radius reaches into the desk from outside its footprint
        assert!(checker.check_collision(Vec3::new(0.8, 0.0, 1.5), PLAYER_COLLISION_RADIUS));
        assert!(!checker.check_collision(Vec3::new(0.7, 0.0, 1.5), PLAYER_COLLISION_RADIUS));
        assert_eq!(
            checker
                .first_hit(Vec3::new(0.0, 0.0, -5.9), PLAYER_COLLISION_RADIUS)
                .map(|v| v.name.as_str()),
            Some("col_wall")
        );
    }

    #[test]
    fn jumping_over_low_furniture_clears_it() {
        let checker = room();
        // Desk top is at 1.0, the box starts 0.1 above the feet
        assert!(!checker.check_collision(Vec3::new(1.5, 1.0, 1.5), PLAYER_COLLISION_RADIUS));
    }

    #[test]
    fn veto_is_idempotent_for_colliding_positions() {
        let checker = room();
        let start = Vec3::new(0.0, 0.0, 0.0);
        let mut veto = PositionVeto::new(start);
        let blocked = Vec3::new(1.5, 0.0, 1.5);
        for _ in 0..5 {
            assert_eq!(veto.apply(&checker, blocked, PLAYER_COLLISION_RADIUS), start);
            assert_eq!(veto.last_valid(), start);
        }
    }

    #[test]
    fn veto_accepts_free_positions() {
        let checker = room();
        let mut veto = PositionVeto::new(Vec3::ZERO);
        let free = Vec3::new(-2.0, 0.0, 2.0);
        assert_eq!(veto.apply(&checker, free, PLAYER_COLLISION_RADIUS), free);
        assert_eq!(veto.last_valid(), free);
    }

    #[test]
    fn volumes_are_fixed_after_first_load() {
        let mut checker = CollisionChecker::default();
        assert!(!checker.is_loaded());
        assert!(checker.load(vec![CollisionVolume::ground_plane()]));
        assert!(!checker.load(Vec::new()));
        assert_eq!(checker.volumes().len(), 1);
    }
}
