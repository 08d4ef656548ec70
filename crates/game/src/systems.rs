//! Per-tick ECS systems, run in the order they appear here.

use crate::camera::FollowCamera;
use controller::{CharacterMotion, ControllerError};
use engine_core::Transform;
use hecs::World;
use input::{
    apply_actions, fold_axes, motion_intent, update_mouse, Action, InputAction, InputAxis,
    InputState, Mouse, Movement,
};
use physics::{CharacterBody, KinematicPlatform, PhysicsWorld, SteeringMovement};

/// Fold held keys and buttons into movement axes, actions and mouse state.
pub fn input_system(world: &mut World, input: &InputState) {
    for (_, (axes, actions, movement, action, mouse)) in world.query_mut::<(
        &InputAxis,
        &InputAction,
        &mut Movement,
        &mut Action,
        &mut Mouse,
    )>() {
        *movement = fold_axes(axes, input);
        apply_actions(actions, input, action);
        update_mouse(input, mouse);
    }
}

/// Left-drag orbits the follow camera.
pub fn camera_orbit_system(world: &mut World, input: &InputState) {
    let dx = input.mouse_delta().x;
    if dx == 0.0 {
        return;
    }
    for (_, (mouse, camera)) in world.query_mut::<(&Mouse, &mut FollowCamera)>() {
        if mouse.left {
            camera.orbit(dx);
        }
    }
}

pub fn platform_system(world: &mut World, physics: &mut PhysicsWorld, dt: f32) {
    for (_, platform) in world.query_mut::<&mut KinematicPlatform>() {
        platform.advance(physics, dt);
    }
}

/// Support query, state transition, velocity resolution and integration
/// for every character.
///
/// A zero or invalid timestep skips the whole update; the resolver is never
/// called with it.
pub fn physics_character_system(
    world: &mut World,
    physics: &mut PhysicsWorld,
    steering: &SteeringMovement,
    dt: f32,
) -> Result<(), ControllerError> {
    if !(dt > 0.0 && dt.is_finite()) {
        log::trace!("Skipping character physics for timestep {dt}");
        return Ok(());
    }

    for (_, (body, motion, camera, movement, action)) in world.query_mut::<(
        &CharacterBody,
        &mut CharacterMotion,
        &FollowCamera,
        &Movement,
        &Action,
    )>() {
        let down = -motion.tuning.up()?;
        let support = body.check_support(physics, down, motion.requested);
        let intent = motion_intent(movement, action);

        let desired = motion.step(dt, &support, camera.yaw_orientation(), &intent, steering)?;
        if let Some(achieved) = body.integrate(physics, dt, desired) {
            motion.velocity = achieved;
        }
    }
    Ok(())
}

/// Copy the simulated capsule into the presentation transform and let the
/// camera follow it.
pub fn character_sync_system(world: &mut World, physics: &PhysicsWorld) {
    for (_, (body, transform, camera)) in
        world.query_mut::<(&CharacterBody, &mut Transform, &mut FollowCamera)>()
    {
        if let Some(center) = body.position(physics) {
            transform.position = center;
            camera.follow(center);
        }
        transform.set_yaw(camera.yaw());
    }
}
