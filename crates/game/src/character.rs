//! The player character entity.

use crate::camera::FollowCamera;
use crate::config::GameConfig;
use controller::{CharacterMotion, ControllerError};
use engine_core::Transform;
use hecs::{Entity, World};
use input::{Action, InputAction, InputAxis, Mouse, Movement};
use physics::{CharacterBody, PhysicsWorld};

/// Spawn the capsule, its motion record, input bindings and follow camera.
pub fn spawn_character(
    world: &mut World,
    physics: &mut PhysicsWorld,
    config: &GameConfig,
) -> Result<Entity, ControllerError> {
    let motion = CharacterMotion::new(config.character)?;
    let up = motion.tuning.up()?;
    let body = CharacterBody::spawn(
        physics,
        config.spawn,
        config.capsule_height,
        config.capsule_radius,
        up,
        config.support,
    );
    let center = body.position(physics).unwrap_or(config.spawn);

    let mut camera = FollowCamera::new(config.camera_position, center);
    camera.orbit_sensitivity = config.orbit_sensitivity;
    let transform = Transform::from_position_rotation(center, camera.yaw_orientation());

    physics.update_query_pipeline();
    log::info!("Character spawned at {center}, state {}", motion.state);

    Ok(world.spawn((
        transform,
        body,
        motion,
        camera,
        InputAxis::default(),
        InputAction::default(),
        Movement::default(),
        Action::default(),
        Mouse::default(),
    )))
}
