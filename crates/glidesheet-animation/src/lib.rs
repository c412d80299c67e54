//! Physics primitives for Glidesheet
//!
//! This crate provides the decay, spring and snap-point models that move a
//! sheet once the finger lets go. Everything here is a plain function of
//! state and frame time; scheduling frames is left to the caller.

pub mod decay;
pub mod error;
pub mod snap;
pub mod spring;
pub mod state;

pub use decay::{step_decay, DecayConfig, ExponentialDecaySpec, FloatDecayAnimationSpec};
pub use error::InvalidConfiguration;
pub use snap::{snap_point, SnapPoints, SNAP_PROJECTION};
pub use spring::{step_spring, SpringConfig};
pub use state::{PhysicsState, SpringState};

pub mod prelude {
    pub use crate::decay::{step_decay, DecayConfig, ExponentialDecaySpec, FloatDecayAnimationSpec};
    pub use crate::snap::{snap_point, SnapPoints};
    pub use crate::spring::{step_spring, SpringConfig};
    pub use crate::state::{PhysicsState, SpringState};
}

#[cfg(test)]
#[path = "tests/decay_tests.rs"]
mod decay_tests;

#[cfg(test)]
#[path = "tests/spring_tests.rs"]
mod spring_tests;

#[cfg(test)]
#[path = "tests/snap_tests.rs"]
mod snap_tests;
