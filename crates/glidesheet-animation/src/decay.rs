//! Exponential decay for flings that have no fixed target.
//!
//! Velocity shrinks geometrically by the deceleration coefficient every
//! millisecond and position integrates it:
//!
//! ```text
//! v(t) = v0 * d^t
//! x(t) = x0 + v0 / 1000 * d * (1 - d^t) / (1 - d)
//! ```
//!
//! with `t` in milliseconds and velocities in units per second.

use crate::error::{require_finite, require_positive, InvalidConfiguration};
use crate::state::PhysicsState;

/// Default per-millisecond deceleration coefficient.
pub const DEFAULT_DECELERATION: f32 = 0.998;

/// Speed (units per second) under which a decay counts as settled.
pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayConfig {
    /// Fraction of velocity kept after each millisecond, strictly in (0, 1).
    pub deceleration: f32,
    /// Speed in units per second under which the decay finishes.
    pub velocity_threshold: f32,
}

impl DecayConfig {
    pub fn with_deceleration(deceleration: f32) -> Self {
        Self {
            deceleration,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        require_finite("deceleration", self.deceleration)?;
        if self.deceleration <= 0.0 || self.deceleration >= 1.0 {
            return Err(InvalidConfiguration::OutOfRange {
                field: "deceleration",
                value: self.deceleration,
                expected: "strictly between 0 and 1",
            });
        }
        require_positive("velocity_threshold", self.velocity_threshold)
    }

    /// Distance covered per unit of per-millisecond velocity while the
    /// velocity shrinks by `velocity_factor`.
    fn distance_factor(&self, velocity_factor: f32) -> f32 {
        let d = self.deceleration;
        d * (1.0 - velocity_factor) / (1.0 - d)
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            deceleration: DEFAULT_DECELERATION,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
        }
    }
}

/// Advance a decay by one frame.
///
/// The first step after [`PhysicsState::seed`] covers zero time. Marks the
/// state finished once the speed drops below the configured threshold.
pub fn step_decay(state: &mut PhysicsState, config: &DecayConfig, frame_time_nanos: u64) {
    let dt_ms = state.advance_clock(frame_time_nanos);
    let kv = config.deceleration.powf(dt_ms);
    let kx = config.distance_factor(kv);

    state.position += state.velocity / 1000.0 * kx;
    state.velocity *= kv;

    if state.velocity.abs() < config.velocity_threshold {
        state.finished = true;
    }
}

/// Closed-form view of a fling curve, queried by elapsed play time.
///
/// Lets a host ask where a release will come to rest, or how long it will
/// take, without stepping it frame by frame.
pub trait FloatDecayAnimationSpec {
    /// Speed under which the curve counts as settled.
    fn abs_velocity_threshold(&self) -> f32;

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    /// Units per second after `play_time_nanos`.
    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    /// Play time until the speed drops under the threshold.
    fn get_duration_nanos(&self, initial_value: f32, initial_velocity: f32) -> i64;

    /// Where the curve comes to rest given unlimited time.
    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

/// Closed-form queries over the same curve [`step_decay`] integrates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExponentialDecaySpec {
    config: DecayConfig,
}

impl ExponentialDecaySpec {
    pub fn new(config: DecayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> DecayConfig {
        self.config
    }
}

impl FloatDecayAnimationSpec for ExponentialDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        self.config.velocity_threshold
    }

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let t_ms = play_time_nanos.max(0) as f32 / 1_000_000.0;
        let kv = self.config.deceleration.powf(t_ms);
        initial_value + initial_velocity / 1000.0 * self.config.distance_factor(kv)
    }

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let t_ms = play_time_nanos.max(0) as f32 / 1_000_000.0;
        initial_velocity * self.config.deceleration.powf(t_ms)
    }

    fn get_duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        let speed = initial_velocity.abs();
        let threshold = self.config.velocity_threshold;
        if speed <= threshold {
            return 0;
        }
        // Solve |v0| * d^t = threshold for t.
        let t_ms = (threshold / speed).ln() / self.config.deceleration.ln();
        (t_ms as f64 * 1_000_000.0) as i64
    }

    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        let d = self.config.deceleration;
        initial_value + initial_velocity / 1000.0 * d / (1.0 - d)
    }
}
