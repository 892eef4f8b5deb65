use bevy_math::Vec3;

use crate::constants::{LIGHTNING_SEGMENTS, SPARK_GRAVITY, SPARK_LIFETIME, SPARK_SPEED_MAX, SPARK_SPEED_MIN};

// ============================================================================
// Lightning Bolt Geometry
// ============================================================================

// Zig-zag path from the hand to the target. Interior points are nudged by
// `jitter`, the two ends stay fixed.
pub fn bolt_path(from: Vec3, to: Vec3, mut jitter: impl FnMut() -> Vec3) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(LIGHTNING_SEGMENTS + 1);
    points.push(from);
    for i in 1..LIGHTNING_SEGMENTS {
        let t = i as f32 / LIGHTNING_SEGMENTS as f32;
        points.push(from.lerp(to, t) + jitter());
    }
    points.push(to);
    points
}

// ============================================================================
// Impact Sparks
// ============================================================================

/// One short-lived spark thrown off where the bolt hits. Falls under gravity
/// and fades out over its lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub position: Vec3,
    pub velocity: Vec3,
    age: f32,
}

impl Spark {
    // `theta` is around the vertical axis, `phi` down from +Z, `t` in 0..1
    // picks the speed
    #[must_use]
    pub fn new(position: Vec3, theta: f32, phi: f32, t: f32) -> Self {
        let speed = SPARK_SPEED_MIN + (SPARK_SPEED_MAX - SPARK_SPEED_MIN) * t.clamp(0.0, 1.0);
        let velocity = Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos()) * speed;
        Self {
            position,
            velocity,
            age: 0.0,
        }
    }

    // Returns false once the spark has burnt out
    pub fn advance(&mut self, delta: f32) -> bool {
        self.age += delta;
        if self.age >= SPARK_LIFETIME {
            return false;
        }
        self.position += self.velocity * delta;
        self.velocity.y += SPARK_GRAVITY * delta;
        true
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        (1.0 - self.age / SPARK_LIFETIME).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_bolt_without_jitter() {
        let points = bolt_path(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), || Vec3::ZERO);
        assert_eq!(points.len(), LIGHTNING_SEGMENTS + 1);
        assert_eq!(points[0], Vec3::ZERO);
        assert_eq!(points[LIGHTNING_SEGMENTS], Vec3::new(10.0, 0.0, 0.0));
        assert!((points[5].x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn ends_are_not_jittered() {
        let points = bolt_path(Vec3::ZERO, Vec3::ONE, || Vec3::splat(0.1));
        assert_eq!(points[0], Vec3::ZERO);
        assert_eq!(*points.last().expect("non-empty"), Vec3::ONE);
        assert!(points[1..LIGHTNING_SEGMENTS].iter().all(|p| p.y > 0.0));
    }

    #[test]
    fn spark_speed_stays_in_range() {
        for (theta, phi, t) in [(0.0, 0.0, 0.0), (1.0, 2.0, 1.0), (4.0, 0.5, 0.5), (6.0, 3.0, 2.0)] {
            let spark = Spark::new(Vec3::ZERO, theta, phi, t);
            let speed = spark.velocity.length();
            assert!(speed >= SPARK_SPEED_MIN - 1e-4 && speed <= SPARK_SPEED_MAX + 1e-4, "{speed}");
        }
    }

    #[test]
    fn spark_falls_fades_and_dies() {
        // Straight up along +Y
        let mut spark = Spark::new(Vec3::ZERO, std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2, 0.0);
        assert!((spark.opacity() - 1.0).abs() < 1e-6);

        assert!(spark.advance(0.05));
        assert!(spark.position.y > 0.0);
        assert!(spark.velocity.y < SPARK_SPEED_MIN);
        assert!(spark.opacity() > 0.4 && spark.opacity() < 0.6);

        assert!(!spark.advance(0.06));
    }
}
