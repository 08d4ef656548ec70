//! Seam to the physics engine's velocity blender.

use glam::Vec3;

/// Inputs to one movement calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementQuery {
    /// Tick duration in seconds.
    pub dt: f32,
    /// Character forward in world space.
    pub forward: Vec3,
    /// Reference up for the blend: world up in the air, surface normal on the ground.
    pub surface_up: Vec3,
    pub current_velocity: Vec3,
    /// Velocity of the supporting surface, zero in the air.
    pub surface_velocity: Vec3,
    pub desired_velocity: Vec3,
    /// Opposite of gravity.
    pub gravity_up: Vec3,
}

/// Engine-specific blend of current towards desired velocity under
/// acceleration, friction and steering limits.
///
/// The resolver treats the output as a candidate and post-processes it.
pub trait MovementPrimitive {
    fn calculate_movement(&self, query: &MovementQuery) -> Vec3;
}

impl<F> MovementPrimitive for F
where
    F: Fn(&MovementQuery) -> Vec3,
{
    fn calculate_movement(&self, query: &MovementQuery) -> Vec3 {
        self(query)
    }
}
