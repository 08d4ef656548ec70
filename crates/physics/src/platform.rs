//! Kinematic moving platforms.

use crate::collision::CollisionGroup;
use crate::physics_world::PhysicsWorld;
use engine_core::Vec3;
use rapier3d::prelude::*;

/// A box that shuttles back and forth between two points at constant speed.
#[derive(Debug, Clone)]
pub struct KinematicPlatform {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    pub start: Vec3,
    pub end: Vec3,
    /// Travel speed (m/s).
    pub speed: f32,
    /// Distance travelled from `start` along the path.
    travelled: f32,
    /// `1.0` heading to `end`, `-1.0` heading back.
    heading: f32,
}

impl KinematicPlatform {
    pub fn spawn(
        world: &mut PhysicsWorld,
        start: Vec3,
        end: Vec3,
        half_extents: Vec3,
        speed: f32,
    ) -> Self {
        let body = world.add_kinematic_body(start);
        let collider = world.add_box_collider(body, half_extents, CollisionGroup::platform());
        Self {
            body,
            collider,
            start,
            end,
            speed,
            travelled: 0.0,
            heading: 1.0,
        }
    }

    pub fn path_length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Where the platform is supposed to be right now.
    pub fn target_position(&self) -> Vec3 {
        let length = self.path_length();
        if length <= f32::EPSILON {
            return self.start;
        }
        self.start.lerp(self.end, self.travelled / length)
    }

    /// Advance along the path, bouncing at both ends, and schedule the new
    /// position for the next physics step.
    pub fn advance(&mut self, world: &mut PhysicsWorld, dt: f32) {
        let length = self.path_length();
        if length > f32::EPSILON {
            self.travelled += self.heading * self.speed * dt;
            if self.travelled >= length {
                self.travelled = 2.0 * length - self.travelled;
                self.heading = -1.0;
            } else if self.travelled <= 0.0 {
                self.travelled = -self.travelled;
                self.heading = 1.0;
            }
            self.travelled = self.travelled.clamp(0.0, length);
        }
        world.set_kinematic_position(self.body, self.target_position());
    }
}
