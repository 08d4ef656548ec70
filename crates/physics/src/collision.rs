//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for the different kinds of colliders in a level.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (ground, ramps, walls)
    Environment = 1 << 0,
    /// Character capsules
    Character = 1 << 1,
    /// Kinematic moving platforms
    Platform = 1 << 2,
}

impl CollisionGroup {
    fn membership(self) -> Group {
        Group::from_bits_retain(self as u32)
    }

    /// Static geometry is hit by everything.
    pub fn environment() -> InteractionGroups {
        InteractionGroups::new(Self::Environment.membership(), Group::ALL)
    }

    /// Characters collide with anything they can stand on or bump into,
    /// but not with each other.
    pub fn character() -> InteractionGroups {
        InteractionGroups::new(
            Self::Character.membership(),
            Group::from_bits_retain(Self::Environment as u32 | Self::Platform as u32),
        )
    }

    pub fn platform() -> InteractionGroups {
        InteractionGroups::new(Self::Platform.membership(), Group::ALL)
    }
}
