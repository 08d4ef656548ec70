//! Core engine types and utilities for the character controller.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Checked vector math on top of glam
//! - The presentation transform
//! - Time management

pub mod math;
pub mod time;
pub mod transform;

pub use math::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec3};
pub use hecs::{Entity, World};
