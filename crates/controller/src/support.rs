//! Surface support reported by the physics engine each tick.

use glam::Vec3;

/// How the character capsule currently rests on the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportState {
    /// Standing on a walkable surface.
    Supported,
    /// Touching a surface too steep to stand on.
    Sliding,
    /// Nothing underneath within the query distance.
    Unsupported,
}

/// Result of a support query. Produced fresh every tick and discarded after use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportInfo {
    pub state: SupportState,
    /// Average unit normal of the supporting surfaces.
    pub surface_normal: Vec3,
    /// Average velocity of whatever the character stands on.
    pub surface_velocity: Vec3,
}

impl SupportInfo {
    /// No contact. The normal defaults to `up` so downstream math stays well defined.
    pub fn unsupported(up: Vec3) -> Self {
        Self {
            state: SupportState::Unsupported,
            surface_normal: up,
            surface_velocity: Vec3::ZERO,
        }
    }

    /// Standing on a static surface with the given normal.
    pub fn on_static(surface_normal: Vec3) -> Self {
        Self {
            state: SupportState::Supported,
            surface_normal,
            surface_velocity: Vec3::ZERO,
        }
    }

    pub fn supported(&self) -> bool {
        self.state == SupportState::Supported
    }
}
