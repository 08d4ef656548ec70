//! Per-character motion record.

use crate::{
    next_state, resolve, CharacterMotionState, CharacterTuning, ControllerError, MotionIntent,
    MovementPrimitive, SupportInfo,
};
use glam::{Quat, Vec3};

/// Authoritative motion data for one character. Stored as an ECS component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterMotion {
    pub state: CharacterMotionState,
    pub tuning: CharacterTuning,
    /// Velocity as last written back by the physics integrator.
    pub velocity: Vec3,
    /// Velocity the last step asked for, before collision clipped it.
    pub requested: Vec3,
}

impl CharacterMotion {
    pub fn new(tuning: CharacterTuning) -> Result<Self, ControllerError> {
        tuning.validate()?;
        Ok(Self {
            state: CharacterMotionState::default(),
            tuning,
            velocity: Vec3::ZERO,
            requested: Vec3::ZERO,
        })
    }

    /// Run one tick: transition, then resolve against the new state.
    ///
    /// State and velocity are committed together, only if resolution succeeds.
    /// Returns the velocity to hand to the integrator.
    pub fn step(
        &mut self,
        dt: f32,
        support: &SupportInfo,
        orientation: Quat,
        intent: &MotionIntent,
        movement: &impl MovementPrimitive,
    ) -> Result<Vec3, ControllerError> {
        let next = next_state(self.state, support, intent.jump);
        let velocity = resolve(
            next,
            dt,
            support,
            orientation,
            self.velocity,
            &self.tuning,
            intent,
            movement,
        )?;

        if next != self.state {
            log::debug!("character {} -> {}", self.state, next);
        }
        self.state = next;
        self.velocity = velocity;
        self.requested = velocity;
        Ok(velocity)
    }
}
