//! Small vector-math layer over glam.
//!
//! glam is happy to hand back NaN from `normalize` on a zero vector. The
//! controller treats that as a contract violation, so the helpers here
//! check their inputs and return a [`MathError`] instead.

use glam::{Quat, Vec3};
use thiserror::Error;

/// Squared length below which a vector is considered zero.
pub const ZERO_LENGTH_SQUARED: f32 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("{what} is not finite")]
    NonFinite { what: &'static str },
    #[error("{what} has zero length and cannot be normalized")]
    ZeroLength { what: &'static str },
}

/// Fail if any component of `v` is NaN or infinite.
pub fn ensure_finite(v: Vec3, what: &'static str) -> Result<Vec3, MathError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(MathError::NonFinite { what })
    }
}

/// Fail if the quaternion is non-finite or too far from unit length to be a rotation.
pub fn ensure_rotation(q: Quat, what: &'static str) -> Result<Quat, MathError> {
    if !q.is_finite() {
        return Err(MathError::NonFinite { what });
    }
    if q.length_squared() < ZERO_LENGTH_SQUARED {
        return Err(MathError::ZeroLength { what });
    }
    Ok(q.normalize())
}

/// Normalize `v`, refusing zero-length and non-finite input.
pub fn try_normalize(v: Vec3, what: &'static str) -> Result<Vec3, MathError> {
    let v = ensure_finite(v, what)?;
    let len_sq = v.length_squared();
    if len_sq < ZERO_LENGTH_SQUARED {
        return Err(MathError::ZeroLength { what });
    }
    Ok(v / len_sq.sqrt())
}

/// Rotate `v` by the unit quaternion `q`.
#[inline]
pub fn rotate(v: Vec3, q: Quat) -> Vec3 {
    q * v
}

/// Scalar component of `v` along the unit `axis`.
#[inline]
pub fn component_along(v: Vec3, axis: Vec3) -> f32 {
    v.dot(axis)
}

/// Replace the component of `v` along the unit `axis` with `value`,
/// leaving the perpendicular part untouched.
#[inline]
pub fn with_component_along(v: Vec3, axis: Vec3, value: f32) -> Vec3 {
    v - axis * v.dot(axis) + axis * value
}

/// Remove the component of `v` along the unit `axis`.
#[inline]
pub fn flatten(v: Vec3, axis: Vec3) -> Vec3 {
    v - axis * v.dot(axis)
}
