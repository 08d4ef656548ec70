//! Third-person follow camera.
//!
//! The camera trails the character inside a distance band, eases its look
//! target towards the character and orbits sideways while the left mouse
//! button is dragged. Its heading is also the character's orientation.

use engine_core::flatten;
use glam::{Quat, Vec3};

/// Fraction of the way the look target moves towards the character per tick.
pub const TARGET_LERP: f32 = 0.1;
/// Closer than this, the camera backs off.
pub const MIN_DISTANCE: f32 = 6.0;
/// Farther than this, the camera catches up.
pub const MAX_DISTANCE: f32 = 9.0;
/// Gain for the distance and height corrections.
pub const FOLLOW_GAIN: f32 = 0.04;
/// Camera height above the character.
pub const HEIGHT_OFFSET: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Sideways metres per pixel of mouse drag.
    pub orbit_sensitivity: f32,
}

impl FollowCamera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            orbit_sensitivity: 0.02,
        }
    }

    /// Horizontal look direction. Falls back to +Z when looking straight down.
    pub fn flat_direction(&self) -> Vec3 {
        flatten(self.target - self.position, Vec3::Y)
            .try_normalize()
            .unwrap_or(Vec3::Z)
    }

    /// Heading around +Y, zero when looking along +Z.
    pub fn yaw(&self) -> f32 {
        let dir = self.flat_direction();
        dir.x.atan2(dir.z)
    }

    /// Orientation handed to the character controller each tick.
    pub fn yaw_orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw())
    }

    pub fn right(&self) -> Vec3 {
        self.yaw_orientation() * Vec3::X
    }

    /// Track the character: ease the target, keep the distance inside
    /// `[MIN_DISTANCE, MAX_DISTANCE]` and hold the camera above the character.
    pub fn follow(&mut self, character: Vec3) {
        let direction = self.flat_direction();
        self.target = self.target.lerp(character, TARGET_LERP);

        let distance = self.position.distance(character);
        let amount =
            ((distance - MIN_DISTANCE).min(0.0) + (distance - MAX_DISTANCE).max(0.0)) * FOLLOW_GAIN;
        self.position += direction * amount;
        self.position.y += (character.y + HEIGHT_OFFSET - self.position.y) * FOLLOW_GAIN;
    }

    /// Swing sideways around the current target by a horizontal mouse delta.
    pub fn orbit(&mut self, mouse_dx: f32) {
        self.position += self.right() * (mouse_dx * -self.orbit_sensitivity);
    }
}
