//! Per-character movement parameters.

use crate::ControllerError;
use engine_core::try_normalize;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Immutable tuning set when a character is created.
///
/// Deserialized values are not checked until [`CharacterTuning::validate`];
/// [`CharacterTuning::new`] validates up front.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTuning {
    /// Steering speed while airborne (m/s).
    pub airborne_speed: f32,
    /// Walking speed while grounded (m/s).
    pub grounded_speed: f32,
    /// Apex height of a jump from rest (m).
    pub jump_height: f32,
    /// Forward axis in the character's local frame.
    pub local_forward: Vec3,
    /// Gravity acceleration. Need not be vertical.
    pub gravity: Vec3,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            airborne_speed: 8.0,
            grounded_speed: 10.0,
            jump_height: 1.5,
            local_forward: Vec3::Z,
            gravity: Vec3::new(0.0, -18.0, 0.0),
        }
    }
}

impl CharacterTuning {
    pub fn new(
        airborne_speed: f32,
        grounded_speed: f32,
        jump_height: f32,
        local_forward: Vec3,
        gravity: Vec3,
    ) -> Result<Self, ControllerError> {
        let tuning = Self {
            airborne_speed,
            grounded_speed,
            jump_height,
            local_forward,
            gravity,
        };
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ControllerError> {
        for (name, value) in [
            ("airborne_speed", self.airborne_speed),
            ("grounded_speed", self.grounded_speed),
            ("jump_height", self.jump_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ControllerError::InvalidTuning(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        try_normalize(self.gravity, "gravity")?;
        try_normalize(self.local_forward, "local forward axis")?;
        Ok(())
    }

    /// World up: the direction opposite gravity.
    pub fn up(&self) -> Result<Vec3, ControllerError> {
        Ok(try_normalize(-self.gravity, "gravity")?)
    }

    /// Take-off speed that reaches `jump_height` against constant `|gravity|`.
    pub fn jump_speed(&self) -> f32 {
        let g = f64::from(self.gravity.length());
        (2.0 * g * f64::from(self.jump_height)).sqrt() as f32
    }
}
