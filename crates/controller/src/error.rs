//! Error type for the motion core.

use engine_core::MathError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    /// A state value outside the defined locomotion states was decoded.
    /// Indicates corrupted or uninitialized character data.
    #[error("invalid character motion state: {0}")]
    InvalidState(String),
    #[error("invalid character tuning: {0}")]
    InvalidTuning(String),
    /// NaN, infinite or zero-length geometric input.
    #[error(transparent)]
    Geometry(#[from] MathError),
}
