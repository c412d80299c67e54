//! Physics state shared by the decay and spring models.

/// Per-cycle physics state of a single animated value.
///
/// One instance lives as long as the element it animates. It is reset at the
/// start of each settle cycle rather than recreated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicsState {
    /// Set once the model has come to rest. Cleared by [`PhysicsState::reset`].
    pub finished: bool,
    /// Velocity in units per second.
    pub velocity: f32,
    pub position: f32,
    /// Timestamp of the last step. `None` until the first step of a cycle,
    /// which therefore advances by zero time.
    pub time_nanos: Option<u64>,
}

impl PhysicsState {
    /// Clear every field back to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Begin a new cycle from `velocity`, keeping the current position.
    pub fn seed(&mut self, velocity: f32) {
        self.finished = false;
        self.velocity = velocity;
        self.time_nanos = None;
    }

    /// Milliseconds elapsed since the previous step, recording `frame_time_nanos`
    /// as the new reference.
    pub(crate) fn advance_clock(&mut self, frame_time_nanos: u64) -> f32 {
        let last = self.time_nanos.unwrap_or(frame_time_nanos);
        self.time_nanos = Some(frame_time_nanos);
        frame_time_nanos.saturating_sub(last) as f32 / 1_000_000.0
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Spring variant of [`PhysicsState`]: the same fields plus the value the
/// spring converges to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpringState {
    pub physics: PhysicsState,
    pub to_value: f32,
}

impl SpringState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
