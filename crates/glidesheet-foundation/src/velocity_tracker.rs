//! Release velocity estimation for pan gestures.
//!
//! Uses the impulse strategy: each pair of consecutive samples contributes
//! the kinetic energy needed to move from the previous segment's velocity to
//! its own, and the accumulated energy is converted back into a velocity.

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this many milliseconds of the newest count.
const HORIZON_MS: i64 = 100;

/// If no movement for this duration, assume the pointer has stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug)]
struct Reading {
    time_ms: i64,
    position: f32,
}

/// 1D velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    readings: [Option<Reading>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            readings: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    /// Record `position` observed at `time_ms`.
    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.readings[self.newest] = Some(Reading { time_ms, position });
    }

    /// Velocity in units per second, or 0.0 with fewer than two usable
    /// samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.readings[self.newest] else {
            return 0.0;
        };

        // Walk backwards from the newest reading, oldest last.
        let mut window = [(0.0f32, 0.0f32); HISTORY_SIZE];
        let mut len = 0;
        let mut index = self.newest;
        let mut later = newest;
        while let Some(reading) = self.readings[index] {
            let age = newest.time_ms - reading.time_ms;
            let gap = later.time_ms - reading.time_ms;
            if age > HORIZON_MS || gap.abs() > ASSUME_STOPPED_MS {
                break;
            }
            window[len] = (-(age as f32), reading.position);
            len += 1;
            later = reading;
            if len == HISTORY_SIZE {
                break;
            }
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if len < 2 {
            return 0.0;
        }
        impulse_velocity(&window[..len]) * 1000.0
    }

    /// Velocity in units per second, limited to `max_velocity` in magnitude.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.readings = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// `window` holds `(time_ms, position)` pairs, newest first, times relative
/// to the newest (so zero or negative). Returns units per millisecond.
fn impulse_velocity(window: &[(f32, f32)]) -> f32 {
    let mut work = 0.0f32;
    let oldest = window.len() - 1;
    for i in (1..=oldest).rev() {
        let (earlier_time, earlier_position) = window[i];
        let (later_time, later_position) = window[i - 1];
        if earlier_time == later_time {
            continue;
        }
        let segment = (later_position - earlier_position) / (later_time - earlier_time);
        let previous = energy_to_velocity(work);
        work += (segment - previous) * segment.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// Converts kinetic energy to velocity using E = 0.5 * m * v^2 (with m = 1).
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
