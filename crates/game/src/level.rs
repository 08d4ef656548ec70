//! Test level: flat ground, a ramp, a wall and a moving platform.

use engine_core::{Quat, Vec3};
use hecs::World;
use physics::{KinematicPlatform, PhysicsWorld};

pub const RAMP_ANGLE_DEGREES: f32 = 20.0;

/// Build the static level. Moving platforms become entities so the
/// platform system can drive them.
pub fn spawn_level(world: &mut World, physics: &mut PhysicsWorld) {
    physics.add_ground_plane();

    // Ramp rising towards +Z, its low edge flush with the ground.
    let angle = RAMP_ANGLE_DEGREES.to_radians();
    let half = Vec3::new(3.0, 0.25, 6.0);
    let ramp_rotation = Quat::from_rotation_x(-angle);
    let ramp_center = Vec3::new(12.0, half.z * angle.sin() - half.y * angle.cos(), 6.0);
    physics.add_static_cuboid(ramp_center, ramp_rotation, half);

    physics.add_static_cuboid(
        Vec3::new(-8.0, 1.5, 0.0),
        Quat::IDENTITY,
        Vec3::new(0.25, 1.5, 10.0),
    );

    let platform = KinematicPlatform::spawn(
        physics,
        Vec3::new(3.0, 0.4, 6.0),
        Vec3::new(3.0, 0.4, 16.0),
        Vec3::new(1.5, 0.15, 1.5),
        2.0,
    );
    world.spawn((platform,));

    physics.update_query_pipeline();
    log::info!("Level ready: ground, {RAMP_ANGLE_DEGREES}° ramp, wall, moving platform");
}
