//! Key bindings and the per-frame components they produce.

use crate::{InputState, KeyCode, MouseButton};
use controller::MotionIntent;

/// Logical movement axis a key can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementAxis {
    Forward,
    Right,
    Upward,
    Turn,
}

/// A key that pushes an axis by `scale` while held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBinding {
    pub key: KeyCode,
    pub axis: MovementAxis,
    pub scale: f32,
}

/// Axis bindings of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct InputAxis {
    pub bindings: Vec<AxisBinding>,
}

impl Default for InputAxis {
    /// WASD: D/A strafe right/left, W/S forward/back.
    fn default() -> Self {
        let bind = |key, axis, scale| AxisBinding { key, axis, scale };
        Self {
            bindings: vec![
                bind(KeyCode::KeyD, MovementAxis::Right, 1.0),
                bind(KeyCode::KeyA, MovementAxis::Right, -1.0),
                bind(KeyCode::KeyW, MovementAxis::Forward, 1.0),
                bind(KeyCode::KeyS, MovementAxis::Forward, -1.0),
            ],
        }
    }
}

/// Movement axes for this frame, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Movement {
    pub forward: f32,
    pub right: f32,
    pub upward: f32,
    pub turn: f32,
}

impl Movement {
    fn axis_mut(&mut self, axis: MovementAxis) -> &mut f32 {
        match axis {
            MovementAxis::Forward => &mut self.forward,
            MovementAxis::Right => &mut self.right,
            MovementAxis::Upward => &mut self.upward,
            MovementAxis::Turn => &mut self.turn,
        }
    }
}

/// Rebuild the movement axes from the keys held this frame.
///
/// Opposing keys cancel; the running sum per axis is clamped to `[-1, 1]`.
pub fn fold_axes(bindings: &InputAxis, input: &InputState) -> Movement {
    let mut movement = Movement::default();
    for binding in bindings
        .bindings
        .iter()
        .filter(|binding| input.is_key_held(binding.key))
    {
        let value = movement.axis_mut(binding.axis);
        *value = (*value + binding.scale).clamp(-1.0, 1.0);
    }
    movement
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionBinding {
    pub key: KeyCode,
    pub action: ActionKind,
}

/// Action bindings of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAction {
    pub bindings: Vec<ActionBinding>,
}

impl Default for InputAction {
    /// Space jumps.
    fn default() -> Self {
        Self {
            bindings: vec![ActionBinding {
                key: KeyCode::Space,
                action: ActionKind::Jump,
            }],
        }
    }
}

/// Requested actions. Set while the bound key is held, cleared on release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Action {
    pub jump: bool,
}

impl Action {
    fn set(&mut self, kind: ActionKind, value: bool) {
        match kind {
            ActionKind::Jump => self.jump = value,
        }
    }
}

pub fn apply_actions(bindings: &InputAction, input: &InputState, action: &mut Action) {
    for binding in &bindings.bindings {
        if input.is_key_released(binding.key) && !input.is_key_held(binding.key) {
            action.set(binding.action, false);
        }
        if input.is_key_held(binding.key) {
            if input.is_key_pressed(binding.key) {
                log::trace!("{:?} pressed ({:?})", binding.action, binding.key);
            }
            action.set(binding.action, true);
        }
    }
}

/// Mouse buttons held by the entity's player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mouse {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

pub fn update_mouse(input: &InputState, mouse: &mut Mouse) {
    mouse.left = input.is_mouse_held(MouseButton::Left);
    mouse.middle = input.is_mouse_held(MouseButton::Middle);
    mouse.right = input.is_mouse_held(MouseButton::Right);
}

/// Combine this frame's axes and actions into the controller's intent.
pub fn motion_intent(movement: &Movement, action: &Action) -> MotionIntent {
    MotionIntent::new(movement.forward, movement.right, movement.upward, action.jump)
}
