//! Capsule character body: support query and velocity integration.

use crate::collision::CollisionGroup;
use crate::physics_world::{to_vec3, to_vector, PhysicsWorld};
use controller::{SupportInfo, SupportState};
use engine_core::Vec3;
use rapier3d::control::{CharacterLength, KinematicCharacterController};
use rapier3d::na::Unit;
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

/// Tunables for the support query and the kinematic mover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// How far below the capsule a surface still counts as contact (m).
    pub support_distance: f32,
    /// Steepest walkable slope. Steeper contacts report `Sliding`.
    pub max_slope_degrees: f32,
    /// Moving away from the surface faster than this breaks support (m/s).
    pub separation_speed: f32,
    /// Skin width kept between the capsule and obstacles (m).
    pub offset: f32,
    /// Ground snapping distance when walking down slopes and steps (m).
    pub snap_to_ground: f32,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            support_distance: 0.1,
            max_slope_degrees: 50.0,
            separation_speed: 0.5,
            offset: 0.01,
            snap_to_ground: 0.2,
        }
    }
}

impl SupportConfig {
    /// Classify a contact by its normal and the character's velocity relative to it.
    pub fn classify(&self, normal: Vec3, up: Vec3, relative_velocity: Vec3) -> SupportState {
        if relative_velocity.dot(normal) > self.separation_speed {
            SupportState::Unsupported
        } else if normal.dot(up) < self.max_slope_degrees.to_radians().cos() {
            SupportState::Sliding
        } else {
            SupportState::Supported
        }
    }
}

/// A kinematic capsule driven by the motion core.
pub struct CharacterBody {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    /// Half length of the capsule's cylindrical segment.
    pub half_height: f32,
    pub radius: f32,
    pub up: Vec3,
    pub config: SupportConfig,
    mover: KinematicCharacterController,
}

impl CharacterBody {
    /// Spawn a capsule of total `height` standing with its base at `position`.
    pub fn spawn(
        world: &mut PhysicsWorld,
        position: Vec3,
        height: f32,
        radius: f32,
        up: Vec3,
        config: SupportConfig,
    ) -> Self {
        let half_height = ((height - 2.0 * radius) * 0.5).max(0.0);
        let center = position + up * (half_height + radius);
        let body = world.add_kinematic_body(center);
        let collider =
            world.add_capsule_collider(body, half_height, radius, CollisionGroup::character());

        let mover = KinematicCharacterController {
            up: Unit::new_normalize(to_vector(up)),
            offset: CharacterLength::Absolute(config.offset),
            max_slope_climb_angle: config.max_slope_degrees.to_radians(),
            min_slope_slide_angle: config.max_slope_degrees.to_radians(),
            snap_to_ground: Some(CharacterLength::Absolute(config.snap_to_ground)),
            ..Default::default()
        };

        log::debug!(
            "spawned character capsule at {center} (half height {half_height}, radius {radius})"
        );

        Self {
            body,
            collider,
            half_height,
            radius,
            up,
            config,
            mover,
        }
    }

    fn filter(&self) -> QueryFilter<'static> {
        QueryFilter::default()
            .exclude_rigid_body(self.body)
            .exclude_sensors()
            .groups(CollisionGroup::character())
    }

    /// Capsule center.
    pub fn position(&self, world: &PhysicsWorld) -> Option<Vec3> {
        world
            .get_body_transform(self.body)
            .map(|transform| transform.position)
    }

    /// Lowest point of the capsule.
    pub fn foot_position(&self, world: &PhysicsWorld) -> Option<Vec3> {
        self.position(world)
            .map(|center| center - self.up * (self.half_height + self.radius))
    }

    /// Query what the capsule is standing on.
    ///
    /// Casts the capsule along `down` by the configured support distance.
    /// `velocity` is the velocity the controller requested last tick; it is
    /// only used to tell a character leaving the surface from one resting on it.
    pub fn check_support(
        &self,
        world: &PhysicsWorld,
        down: Vec3,
        velocity: Vec3,
    ) -> SupportInfo {
        let up = -down;
        let none = SupportInfo::unsupported(up);
        let (Some(body), Some(collider)) = (
            world.rigid_body_set.get(self.body),
            world.collider_set.get(self.collider),
        ) else {
            return none;
        };

        let options = ShapeCastOptions::with_max_time_of_impact(self.config.support_distance);
        let Some((hit_handle, hit)) = world.query_pipeline.cast_shape(
            &world.rigid_body_set,
            &world.collider_set,
            body.position(),
            &to_vector(down),
            collider.shape(),
            options,
            self.filter(),
        ) else {
            return none;
        };

        let mut normal = to_vec3(&hit.normal1);
        if normal.dot(up) < 0.0 {
            normal = -normal;
        }
        if !normal.is_normalized() {
            return none;
        }

        let contact = to_vec3(body.translation())
            + down * (self.half_height + self.radius + hit.time_of_impact);
        let surface_velocity = world
            .collider_set
            .get(hit_handle)
            .and_then(|hit_collider| hit_collider.parent())
            .and_then(|parent| world.rigid_body_set.get(parent))
            .map(|parent| to_vec3(&parent.velocity_at_point(&point![contact.x, contact.y, contact.z])))
            .unwrap_or(Vec3::ZERO);

        SupportInfo {
            state: self
                .config
                .classify(normal, up, velocity - surface_velocity),
            surface_normal: normal,
            surface_velocity,
        }
    }

    /// Move the capsule by `velocity * dt` with collide-and-slide and schedule
    /// the result for the next physics step.
    ///
    /// Returns the velocity actually achieved; components blocked by
    /// geometry are gone. `None` if the body no longer exists.
    pub fn integrate(&self, world: &mut PhysicsWorld, dt: f32, velocity: Vec3) -> Option<Vec3> {
        let (body, collider) = (
            world.rigid_body_set.get(self.body)?,
            world.collider_set.get(self.collider)?,
        );
        let start = *body.position();
        let movement = self.mover.move_shape(
            dt,
            &world.rigid_body_set,
            &world.collider_set,
            &world.query_pipeline,
            collider.shape(),
            &start,
            to_vector(velocity * dt),
            self.filter(),
            |_| {},
        );

        let next = start.translation.vector + movement.translation;
        world
            .rigid_body_set
            .get_mut(self.body)?
            .set_next_kinematic_translation(next);

        Some(to_vec3(&movement.translation) / dt)
    }
}
