//! Acceleration-limited velocity blending for characters.

use controller::{MovementPrimitive, MovementQuery};
use engine_core::Vec3;
use serde::{Deserialize, Serialize};

/// Moves the in-surface part of the velocity towards the desired velocity,
/// limited by a maximum acceleration. The component along the surface normal
/// is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringMovement {
    /// Largest velocity change per second (m/s²).
    pub max_acceleration: f32,
    /// Fraction of the remaining velocity difference closed per tick, before clamping.
    pub velocity_gain: f32,
}

impl Default for SteeringMovement {
    fn default() -> Self {
        Self {
            max_acceleration: 50.0,
            velocity_gain: 1.0,
        }
    }
}

/// Orthonormal frame with `normal` as its third axis.
struct SurfaceFrame {
    tangent: Vec3,
    binormal: Vec3,
    normal: Vec3,
}

impl SurfaceFrame {
    fn new(forward: Vec3, surface_up: Vec3, gravity_up: Vec3) -> Option<Self> {
        let normal = surface_up.try_normalize()?;
        let side = forward
            .cross(gravity_up)
            .try_normalize()
            .unwrap_or_else(|| gravity_up.any_orthonormal_vector());
        let tangent = side.cross(normal).try_normalize()?;
        let binormal = tangent.cross(normal);
        Some(Self {
            tangent,
            binormal,
            normal,
        })
    }

    fn to_local(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.dot(self.tangent), v.dot(self.binormal), v.dot(self.normal))
    }

    fn to_world(&self, v: Vec3) -> Vec3 {
        self.tangent * v.x + self.binormal * v.y + self.normal * v.z
    }
}

impl MovementPrimitive for SteeringMovement {
    fn calculate_movement(&self, query: &MovementQuery) -> Vec3 {
        let Some(frame) = SurfaceFrame::new(query.forward, query.surface_up, query.gravity_up)
        else {
            return query.current_velocity;
        };

        let current = frame.to_local(query.current_velocity - query.surface_velocity);
        let mut target = frame.to_local(query.desired_velocity);
        target.z = current.z;

        let mut change = (target - current) * self.velocity_gain;
        let max_change = self.max_acceleration * query.dt;
        if change.length_squared() > max_change * max_change {
            change = change.normalize() * max_change;
        }

        frame.to_world(current + change) + query.surface_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(current: Vec3, desired: Vec3) -> MovementQuery {
        MovementQuery {
            dt: 1.0 / 60.0,
            forward: Vec3::Z,
            surface_up: Vec3::Y,
            current_velocity: current,
            surface_velocity: Vec3::ZERO,
            desired_velocity: desired,
            gravity_up: Vec3::Y,
        }
    }

    #[test]
    fn velocity_change_is_acceleration_limited() {
        let steering = SteeringMovement::default();
        let v = steering.calculate_movement(&query(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)));
        let max_change = steering.max_acceleration / 60.0;
        assert!((v.length() - max_change).abs() < 1e-4);
        assert!(v.z > 0.0);
    }

    #[test]
    fn small_changes_reach_desired_velocity() {
        let steering = SteeringMovement::default();
        let v = steering.calculate_movement(&query(
            Vec3::new(0.0, 0.0, 9.8),
            Vec3::new(0.0, 0.0, 10.0),
        ));
        assert!((v - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn normal_component_is_preserved() {
        let steering = SteeringMovement::default();
        let v = steering.calculate_movement(&query(
            Vec3::new(0.0, -4.0, 0.0),
            Vec3::new(0.0, 25.0, 0.0),
        ));
        assert!((v.y + 4.0).abs() < 1e-5);
    }

    #[test]
    fn blend_is_relative_to_surface() {
        let steering = SteeringMovement::default();
        let mut q = query(Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO);
        q.surface_velocity = Vec3::new(3.0, 0.0, 0.0);
        let v = steering.calculate_movement(&q);
        assert!((v - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn forward_parallel_to_up_still_steers() {
        let steering = SteeringMovement::default();
        let mut q = query(Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0));
        q.forward = Vec3::Y;
        let v = steering.calculate_movement(&q);
        assert!((v - Vec3::new(0.1, 0.0, 0.0)).length() < 1e-5);
    }
}
