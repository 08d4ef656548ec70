//! Physics for the character controller, using Rapier3D.
//!
//! Supplies the collaborators the motion core needs: the support query and
//! integrator on [`CharacterBody`] and the [`SteeringMovement`] velocity blender.

pub mod character;
pub mod collision;
pub mod physics_world;
pub mod platform;
pub mod steering;

pub use character::*;
pub use collision::*;
pub use physics_world::*;
pub use platform::*;
pub use steering::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

// Re-export common Rapier types
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
