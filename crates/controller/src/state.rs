//! Locomotion state machine.

use crate::{ControllerError, SupportInfo};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discrete locomotion state of a character.
///
/// `JumpStart` lasts exactly one tick: it selects the jump impulse in the
/// resolver and always falls through to `Airborne` on the next transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CharacterMotionState {
    Grounded = 0,
    /// Characters spawn airborne until the first support query lands them.
    #[default]
    Airborne = 1,
    JumpStart = 2,
}

impl CharacterMotionState {
    pub const ALL: [CharacterMotionState; 3] = [Self::Grounded, Self::Airborne, Self::JumpStart];

    pub fn label(self) -> &'static str {
        match self {
            Self::Grounded => "grounded",
            Self::Airborne => "airborne",
            Self::JumpStart => "jump_start",
        }
    }
}

impl fmt::Display for CharacterMotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CharacterMotionState {
    type Err = ControllerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.label() == s)
            .ok_or_else(|| ControllerError::InvalidState(format!("unknown label {s:?}")))
    }
}

impl TryFrom<u8> for CharacterMotionState {
    type Error = ControllerError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Grounded),
            1 => Ok(Self::Airborne),
            2 => Ok(Self::JumpStart),
            other => Err(ControllerError::InvalidState(format!(
                "unknown discriminant {other}"
            ))),
        }
    }
}

/// Transition function, evaluated once per tick before velocity resolution.
///
/// | current   | condition                  | next      |
/// |-----------|----------------------------|-----------|
/// | Airborne  | supported                  | Grounded  |
/// | Airborne  | otherwise                  | Airborne  |
/// | Grounded  | not supported              | Airborne  |
/// | Grounded  | supported, jump requested  | JumpStart |
/// | Grounded  | supported, no jump         | Grounded  |
/// | JumpStart | always                     | Airborne  |
pub fn next_state(
    current: CharacterMotionState,
    support: &SupportInfo,
    jump_requested: bool,
) -> CharacterMotionState {
    use CharacterMotionState::*;

    match current {
        Airborne if support.supported() => Grounded,
        Airborne => Airborne,
        Grounded if !support.supported() => Airborne,
        Grounded if jump_requested => JumpStart,
        Grounded => Grounded,
        JumpStart => Airborne,
    }
}
