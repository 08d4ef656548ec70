//! Character motion core: locomotion state machine and velocity resolver.
//!
//! Once per physics tick the host:
//! 1. asks the physics engine for a [`SupportInfo`],
//! 2. transitions the [`CharacterMotionState`] with [`next_state`],
//! 3. computes the next velocity with [`resolve`],
//! 4. hands that velocity back to the physics integrator.
//!
//! [`CharacterMotion::step`] performs steps 2 and 3 and commits the result.
//! Nothing here touches rapier or the ECS; the engine-specific velocity
//! blending is supplied through the [`MovementPrimitive`] trait.

pub mod error;
pub mod intent;
pub mod motion;
pub mod movement;
pub mod resolver;
pub mod state;
pub mod support;
pub mod tuning;

pub use error::*;
pub use intent::*;
pub use motion::*;
pub use movement::*;
pub use resolver::*;
pub use state::*;
pub use support::*;
pub use tuning::*;
