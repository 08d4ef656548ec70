//! Velocity resolution for each locomotion state.

use crate::{
    CharacterMotionState, CharacterTuning, ControllerError, MotionIntent, MovementPrimitive,
    MovementQuery, SupportInfo,
};
use engine_core::{
    component_along, ensure_finite, ensure_rotation, rotate, try_normalize, with_component_along,
    MathError,
};
use glam::{Quat, Vec3};

/// Upward speed (relative to the surface) that still counts as "flat" on the ground.
pub const VERTICAL_EPSILON: f32 = 1e-3;

/// Below this `dot(surface_normal, up)` the slope re-projection is ill-conditioned
/// and is skipped.
pub const MIN_SUPPORT_DOT: f32 = 0.05;

/// Compute the next velocity for a character already transitioned to `state`.
///
/// `dt` must be positive; callers skip resolution on zero or paused ticks.
/// Non-finite inputs and zero-length gravity are reported as errors rather
/// than propagated as NaN.
#[allow(clippy::too_many_arguments)]
pub fn resolve(
    state: CharacterMotionState,
    dt: f32,
    support: &SupportInfo,
    orientation: Quat,
    current_velocity: Vec3,
    tuning: &CharacterTuning,
    intent: &MotionIntent,
    movement: &impl MovementPrimitive,
) -> Result<Vec3, ControllerError> {
    if !dt.is_finite() {
        return Err(MathError::NonFinite { what: "timestep" }.into());
    }
    debug_assert!(dt > 0.0, "resolve called with non-positive timestep {dt}");
    let current_velocity = ensure_finite(current_velocity, "current velocity")?;
    let orientation = ensure_rotation(orientation, "orientation")?;
    let input_direction = ensure_finite(intent.input_direction(), "movement intent")?;
    let up = tuning.up()?;

    match state {
        CharacterMotionState::Airborne => airborne(
            dt,
            orientation,
            current_velocity,
            tuning,
            input_direction,
            up,
            movement,
        ),
        CharacterMotionState::Grounded => grounded(
            dt,
            support,
            orientation,
            current_velocity,
            tuning,
            input_direction,
            up,
            movement,
        ),
        CharacterMotionState::JumpStart => Ok(jump_start(current_velocity, tuning, up)),
    }
}

fn airborne(
    dt: f32,
    orientation: Quat,
    current_velocity: Vec3,
    tuning: &CharacterTuning,
    input_direction: Vec3,
    up: Vec3,
    movement: &impl MovementPrimitive,
) -> Result<Vec3, ControllerError> {
    let desired_velocity = rotate(input_direction * tuning.airborne_speed, orientation);
    let candidate = movement.calculate_movement(&MovementQuery {
        dt,
        forward: rotate(tuning.local_forward, orientation),
        surface_up: up,
        current_velocity,
        surface_velocity: Vec3::ZERO,
        desired_velocity,
        gravity_up: up,
    });
    let candidate = ensure_finite(candidate, "movement output")?;

    // Steering must not change vertical speed: keep the pre-call component.
    let steered = with_component_along(candidate, up, component_along(current_velocity, up));
    Ok(steered + tuning.gravity * dt)
}

#[allow(clippy::too_many_arguments)]
fn grounded(
    dt: f32,
    support: &SupportInfo,
    orientation: Quat,
    current_velocity: Vec3,
    tuning: &CharacterTuning,
    input_direction: Vec3,
    up: Vec3,
    movement: &impl MovementPrimitive,
) -> Result<Vec3, ControllerError> {
    let surface_normal = try_normalize(support.surface_normal, "surface normal")?;
    let surface_velocity = ensure_finite(support.surface_velocity, "surface velocity")?;

    // Surface velocity goes into the blend directly so a moving platform is
    // tracked instantly instead of through the primitive's filtering.
    let desired_velocity = rotate(input_direction * tuning.grounded_speed, orientation);
    let candidate = movement.calculate_movement(&MovementQuery {
        dt,
        forward: rotate(tuning.local_forward, orientation),
        surface_up: surface_normal,
        current_velocity,
        surface_velocity,
        desired_velocity,
        gravity_up: up,
    });
    let mut relative = ensure_finite(candidate, "movement output")? - surface_velocity;

    if component_along(relative, up) > VERTICAL_EPSILON {
        let support_dot = surface_normal.dot(up);
        if support_dot < MIN_SUPPORT_DOT {
            log::warn!(
                "support normal {surface_normal} is nearly perpendicular to up ({support_dot:.4}), \
                 skipping horizontal re-projection"
            );
        } else {
            relative = project_horizontal(relative, surface_normal, up, support_dot);
        }
    }

    Ok(relative + surface_velocity)
}

/// Re-project a velocity running along a slope onto the horizontal plane,
/// stretched so its footprint matches the slope distance.
fn project_horizontal(velocity: Vec3, surface_normal: Vec3, up: Vec3, support_dot: f32) -> Vec3 {
    let speed = velocity.length();
    let direction = velocity / speed;
    let horizontal_len = speed / support_dot;
    surface_normal.cross(direction).cross(up) * horizontal_len
}

fn jump_start(current_velocity: Vec3, tuning: &CharacterTuning, up: Vec3) -> Vec3 {
    let take_off = tuning.jump_speed();
    let vertical = component_along(current_velocity, up);
    current_velocity + up * (take_off - vertical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SupportState;

    const DT: f32 = 1.0 / 60.0;

    /// Returns desired velocity with a vertical kick, so tests can tell
    /// whether the resolver scrubs it.
    fn kicking(query: &MovementQuery) -> Vec3 {
        query.desired_velocity + query.gravity_up * 42.0
    }

    fn passthrough(query: &MovementQuery) -> Vec3 {
        query.desired_velocity + query.surface_velocity
    }

    fn tuning_981() -> CharacterTuning {
        CharacterTuning {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            jump_height: 1.5,
            ..Default::default()
        }
    }

    #[test]
    fn jump_start_sets_vertical_speed_to_take_off_speed() {
        let tuning = tuning_981();
        let current = Vec3::new(2.0, 0.0, -3.0);
        let v = resolve(
            CharacterMotionState::JumpStart,
            DT,
            &SupportInfo::on_static(Vec3::Y),
            Quat::IDENTITY,
            current,
            &tuning,
            &MotionIntent::default(),
            &kicking,
        )
        .unwrap();

        let expected = (2.0_f64 * 9.81 * 1.5).sqrt() as f32;
        assert!((v.y - expected).abs() < 1e-6, "vertical {} vs {}", v.y, expected);
        assert!((v.y - 5.425).abs() < 1e-3);
        assert_eq!(v.x, 2.0);
        assert_eq!(v.z, -3.0);
    }

    #[test]
    fn jump_start_replaces_existing_vertical_component() {
        let tuning = tuning_981();
        let v = resolve(
            CharacterMotionState::JumpStart,
            DT,
            &SupportInfo::on_static(Vec3::Y),
            Quat::IDENTITY,
            Vec3::new(0.0, -3.0, 1.0),
            &tuning,
            &MotionIntent::default(),
            &kicking,
        )
        .unwrap();
        assert!((v.y - tuning.jump_speed()).abs() < 1e-5);
        assert_eq!(v.z, 1.0);
    }

    #[test]
    fn airborne_keeps_vertical_speed_before_gravity() {
        let tuning = CharacterTuning::default();
        let current = Vec3::new(1.0, 3.5, 0.0);
        let intent = MotionIntent::new(1.0, 0.0, 1.0, false);
        let v = resolve(
            CharacterMotionState::Airborne,
            DT,
            &SupportInfo::unsupported(Vec3::Y),
            Quat::IDENTITY,
            current,
            &tuning,
            &intent,
            &kicking,
        )
        .unwrap();

        let before_gravity = v - tuning.gravity * DT;
        assert!((before_gravity.y - 3.5).abs() < 1e-5);
        // Horizontal part comes from the primitive.
        assert!((v.z - tuning.airborne_speed).abs() < 1e-5);
    }

    #[test]
    fn airborne_integrates_gravity_along_tilted_gravity() {
        let tuning = CharacterTuning {
            gravity: Vec3::new(-10.0, 0.0, 0.0),
            ..Default::default()
        };
        let current = Vec3::new(2.0, 0.0, 0.0);
        let v = resolve(
            CharacterMotionState::Airborne,
            DT,
            &SupportInfo::unsupported(Vec3::X),
            Quat::IDENTITY,
            current,
            &tuning,
            &MotionIntent::default(),
            &kicking,
        )
        .unwrap();
        // up is +X here, so the "vertical" component is x.
        assert!((v.x - (2.0 - 10.0 * DT)).abs() < 1e-5);
    }

    #[test]
    fn grounded_flat_ground_has_no_vertical_drift() {
        let tuning = CharacterTuning::default();
        let intent = MotionIntent::new(1.0, 0.5, 0.0, false);
        let v = resolve(
            CharacterMotionState::Grounded,
            DT,
            &SupportInfo::on_static(Vec3::Y),
            Quat::from_rotation_y(0.7),
            Vec3::new(0.0, 0.2, 0.0),
            &tuning,
            &intent,
            &kicking,
        )
        .unwrap();
        assert!(v.dot(Vec3::Y).abs() <= VERTICAL_EPSILON);
        assert!(v.length() > 1.0);
    }

    #[test]
    fn grounded_slope_projects_onto_horizontal_plane() {
        let tuning = CharacterTuning::default();
        let angle = 20f32.to_radians();
        let normal = Vec3::new(0.0, angle.cos(), -angle.sin());
        // Uphill along +Z on a slope that rises towards +Z.
        let uphill = Vec3::new(0.0, angle.sin(), angle.cos()) * 4.0;
        let primitive = move |_: &MovementQuery| uphill;

        let v = resolve(
            CharacterMotionState::Grounded,
            DT,
            &SupportInfo::on_static(normal),
            Quat::IDENTITY,
            Vec3::ZERO,
            &tuning,
            &MotionIntent::new(1.0, 0.0, 0.0, false),
            &primitive,
        )
        .unwrap();

        assert!(v.y.abs() < 1e-5, "vertical {}", v.y);
        assert!(v.x.abs() < 1e-5);
        assert!((v.z - 4.0 / angle.cos()).abs() < 1e-4, "horizontal {}", v.z);
    }

    #[test]
    fn grounded_tracks_moving_platform() {
        let tuning = CharacterTuning::default();
        let platform = Vec3::new(3.0, 0.0, 0.0);
        let support = SupportInfo {
            state: SupportState::Supported,
            surface_normal: Vec3::Y,
            surface_velocity: platform,
        };
        let v = resolve(
            CharacterMotionState::Grounded,
            DT,
            &support,
            Quat::IDENTITY,
            Vec3::ZERO,
            &tuning,
            &MotionIntent::default(),
            &passthrough,
        )
        .unwrap();
        assert_eq!(v, platform);
    }

    #[test]
    fn grounded_rising_platform_keeps_its_velocity() {
        let tuning = CharacterTuning::default();
        let lift = Vec3::new(0.0, 2.0, 0.0);
        let support = SupportInfo {
            state: SupportState::Supported,
            surface_normal: Vec3::Y,
            surface_velocity: lift,
        };
        let v = resolve(
            CharacterMotionState::Grounded,
            DT,
            &support,
            Quat::IDENTITY,
            lift,
            &tuning,
            &MotionIntent::new(1.0, 0.0, 0.0, false),
            &passthrough,
        )
        .unwrap();
        assert!((v.y - 2.0).abs() < 1e-5);
        assert!((v.z - tuning.grounded_speed).abs() < 1e-5);
    }

    #[test]
    fn grounded_near_vertical_support_skips_reprojection() {
        let tuning = CharacterTuning::default();
        let wall = Vec3::new(1.0, 0.01, 0.0).normalize();
        let candidate = Vec3::new(0.0, 1.0, 2.0);
        let primitive = move |_: &MovementQuery| candidate;
        let v = resolve(
            CharacterMotionState::Grounded,
            DT,
            &SupportInfo::on_static(wall),
            Quat::IDENTITY,
            Vec3::ZERO,
            &tuning,
            &MotionIntent::default(),
            &primitive,
        )
        .unwrap();
        assert!(v.is_finite());
        assert_eq!(v, candidate);
    }

    #[test]
    fn resolve_is_idempotent() {
        let tuning = CharacterTuning::default();
        let support = SupportInfo {
            state: SupportState::Supported,
            surface_normal: Vec3::new(0.1, 0.9, 0.0).normalize(),
            surface_velocity: Vec3::new(0.5, 0.0, 0.0),
        };
        let intent = MotionIntent::new(0.3, -0.8, 0.0, false);
        let orientation = Quat::from_rotation_y(-1.2);
        for state in CharacterMotionState::ALL {
            let run = || {
                resolve(
                    state,
                    DT,
                    &support,
                    orientation,
                    Vec3::new(1.0, 0.5, -2.0),
                    &tuning,
                    &intent,
                    &kicking,
                )
                .unwrap()
            };
            assert_eq!(run(), run());
        }
    }

    #[test]
    fn non_finite_inputs_are_errors() {
        let tuning = CharacterTuning::default();
        let err = resolve(
            CharacterMotionState::Airborne,
            DT,
            &SupportInfo::unsupported(Vec3::Y),
            Quat::IDENTITY,
            Vec3::new(f32::NAN, 0.0, 0.0),
            &tuning,
            &MotionIntent::default(),
            &kicking,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ControllerError::Geometry(MathError::NonFinite {
                what: "current velocity"
            })
        );

        let bad_normal = SupportInfo::on_static(Vec3::ZERO);
        let err = resolve(
            CharacterMotionState::Grounded,
            DT,
            &bad_normal,
            Quat::IDENTITY,
            Vec3::ZERO,
            &tuning,
            &MotionIntent::default(),
            &kicking,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ControllerError::Geometry(MathError::ZeroLength {
                what: "surface normal"
            })
        );
    }

    #[test]
    fn primitive_producing_nan_is_an_error() {
        let tuning = CharacterTuning::default();
        let broken = |_: &MovementQuery| Vec3::splat(f32::NAN);
        let err = resolve(
            CharacterMotionState::Airborne,
            DT,
            &SupportInfo::unsupported(Vec3::Y),
            Quat::IDENTITY,
            Vec3::ZERO,
            &tuning,
            &MotionIntent::default(),
            &broken,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ControllerError::Geometry(MathError::NonFinite {
                what: "movement output"
            })
        );
    }

    #[test]
    fn non_finite_timestep_is_an_error() {
        for dt in [f32::NAN, f32::INFINITY] {
            let err = resolve(
                CharacterMotionState::Airborne,
                dt,
                &SupportInfo::unsupported(Vec3::Y),
                Quat::IDENTITY,
                Vec3::ZERO,
                &CharacterTuning::default(),
                &MotionIntent::default(),
                &passthrough,
            )
            .unwrap_err();
            assert_eq!(
                err,
                ControllerError::Geometry(MathError::NonFinite { what: "timestep" })
            );
        }
    }
}
