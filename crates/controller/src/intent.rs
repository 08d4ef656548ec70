use glam::Vec3;

/// Desired movement for one tick, derived from held input.
///
/// Axes are in `[-1, 1]`; constructors clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionIntent {
    pub forward: f32,
    pub right: f32,
    pub upward: f32,
    pub jump: bool,
}

impl MotionIntent {
    pub fn new(forward: f32, right: f32, upward: f32, jump: bool) -> Self {
        Self {
            forward: forward.clamp(-1.0, 1.0),
            right: right.clamp(-1.0, 1.0),
            upward: upward.clamp(-1.0, 1.0),
            jump,
        }
    }

    /// Local-space input direction, component order (right, up, forward).
    pub fn input_direction(&self) -> Vec3 {
        Vec3::new(self.right, self.upward, self.forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_axes() {
        let intent = MotionIntent::new(2.0, -3.0, 0.5, true);
        assert_eq!(intent.input_direction(), Vec3::new(-1.0, 0.5, 1.0));
        assert!(intent.jump);
    }
}
