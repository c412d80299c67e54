//! Damped spring physics.
//!
//! Each step evaluates the analytical solution of a damped harmonic
//! oscillator from the previous frame's position and velocity, so large
//! frame gaps cannot destabilise it the way explicit integration would.

use crate::error::{require_finite, require_non_negative, require_positive, InvalidConfiguration};
use crate::state::SpringState;

/// Longest time a single frame may advance a spring, in milliseconds.
const MAX_FRAME_MS: f32 = 64.0;

/// Damping ratios this close to 1.0 use the critically damped solution.
const CRITICAL_EPSILON: f32 = 1e-4;

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Damping coefficient `c`.
    pub damping: f32,
    pub mass: f32,
    /// Stiffness constant `k`. Higher values = faster animation.
    pub stiffness: f32,
    /// Finish as soon as the spring crosses its target instead of bouncing.
    pub overshoot_clamping: bool,
    /// Speed (units per second) under which the spring may come to rest.
    pub rest_speed_threshold: f32,
    /// Distance from the target under which the spring may come to rest.
    pub rest_displacement_threshold: f32,
}

impl SpringConfig {
    /// Create a bouncy spring.
    pub fn bouncy() -> Self {
        Self {
            damping: 6.0,
            stiffness: 180.0,
            ..Self::default()
        }
    }

    /// Create a stiff spring (fast, no bounce).
    pub fn stiff() -> Self {
        Self {
            damping: 40.0,
            stiffness: 400.0,
            overshoot_clamping: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        require_non_negative("damping", self.damping)?;
        require_positive("mass", self.mass)?;
        require_positive("stiffness", self.stiffness)?;
        require_non_negative("rest_speed_threshold", self.rest_speed_threshold)?;
        require_non_negative(
            "rest_displacement_threshold",
            self.rest_displacement_threshold,
        )?;
        require_finite("damping_ratio", self.damping_ratio())
    }

    /// `c / (2 * sqrt(k * m))`: 1.0 = critically damped, below bounces.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped angular frequency `sqrt(k / m)`.
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            mass: 1.0,
            stiffness: 100.0,
            overshoot_clamping: false,
            rest_speed_threshold: 0.001,
            rest_displacement_threshold: 0.001,
        }
    }
}

/// Displacement from the target and velocity after `t` seconds, starting
/// from displacement `x0` and velocity `v0`.
fn oscillate(config: &SpringConfig, x0: f32, v0: f32, t: f32) -> (f32, f32) {
    let zeta = config.damping_ratio();
    let omega0 = config.natural_frequency();

    if zeta < 1.0 - CRITICAL_EPSILON {
        let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
        let decay = zeta * omega0;
        let envelope = (-decay * t).exp();
        let (sin1, cos1) = (omega1 * t).sin_cos();
        let b = (v0 + decay * x0) / omega1;
        let x = envelope * (x0 * cos1 + b * sin1);
        let v = envelope * (v0 * cos1 - (decay * v0 + omega0 * omega0 * x0) / omega1 * sin1);
        (x, v)
    } else if zeta <= 1.0 + CRITICAL_EPSILON {
        let envelope = (-omega0 * t).exp();
        let b = v0 + omega0 * x0;
        let x = envelope * (x0 + b * t);
        let v = envelope * (v0 - omega0 * b * t);
        (x, v)
    } else {
        let root = omega0 * (zeta * zeta - 1.0).sqrt();
        let r1 = -zeta * omega0 + root;
        let r2 = -zeta * omega0 - root;
        let c2 = (v0 - r1 * x0) / (r2 - r1);
        let c1 = x0 - c2;
        let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
        (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
    }
}

/// Advance a spring toward `state.to_value` by one frame.
///
/// The first step after seeding covers zero time. On rest (or on crossing
/// the target with overshoot clamping) the state lands exactly on the target
/// with zero velocity and is marked finished.
pub fn step_spring(state: &mut SpringState, config: &SpringConfig, frame_time_nanos: u64) {
    let target = state.to_value;
    let physics = &mut state.physics;
    let previous = physics.position;
    let dt_ms = physics.advance_clock(frame_time_nanos).min(MAX_FRAME_MS);

    let (x, v) = oscillate(config, previous - target, physics.velocity, dt_ms / 1000.0);
    physics.position = target + x;
    physics.velocity = v;

    let overshooting = config.overshoot_clamping
        && if previous < target {
            physics.position > target
        } else {
            physics.position < target
        };
    let at_rest = physics.velocity.abs() < config.rest_speed_threshold;
    let near_target = (target - physics.position).abs() < config.rest_displacement_threshold;

    if overshooting || (at_rest && near_target) {
        physics.velocity = 0.0;
        physics.position = target;
        physics.finished = true;
    }
}
