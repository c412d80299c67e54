//! Positioning engine: turns one gesture sample per frame into a vertical
//! offset.
//!
//! While a finger is down the output follows it from the committed offset.
//! On release the engine either lets the sheet coast to a stop (decay) or
//! springs it to the nearest snap point. Whatever position the physics
//! leaves the sheet at becomes the committed offset for the next gesture.
//!
//! ```text
//!            Began/Active              Ended
//!   Idle ─────────────────▶ Dragging ─────────▶ Decaying | Springing
//!    ▲                         ▲                      │
//!    │         finished        │   Began/Active       │
//!    └─────────────────────────┴──────────────────────┘
//! ```

use glidesheet_animation::{
    step_decay, step_spring, DecayConfig, InvalidConfiguration, PhysicsState, SnapPoints,
    SpringConfig, SpringState,
};
use log::{debug, trace, warn};

use crate::gesture::{GesturePhase, GestureSample};

/// What the engine is doing this frame. Exactly one holds at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Motion {
    /// At rest on the committed offset.
    #[default]
    Idle,
    /// Following the finger.
    Dragging,
    /// Coasting after a fling.
    Decaying,
    /// Converging on a snap point.
    Springing,
}

/// Physical limits for a snapping sheet, checked whenever no finger is down.
///
/// Above `upper` the spring is re-aimed at the nearest snap point; below
/// `lower` the sheet is pinned to `lower` and the cycle ends.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SpringBounds {
    pub upper: Option<f32>,
    pub lower: Option<f32>,
}

impl SpringBounds {
    pub fn new(lower: Option<f32>, upper: Option<f32>) -> Self {
        Self { upper, lower }
    }

    fn validate(&self, points: &SnapPoints) -> Result<(), InvalidConfiguration> {
        for (field, bound) in [("upper", self.upper), ("lower", self.lower)] {
            if let Some(value) = bound.filter(|v| !v.is_finite()) {
                return Err(InvalidConfiguration::NonFinite { field, value });
            }
        }
        if let (Some(lower), Some(upper)) = (self.lower, self.upper) {
            if lower > upper {
                return Err(InvalidConfiguration::InvertedRange { lower, upper });
            }
        }
        for &point in points.as_slice() {
            let above = self.upper.is_some_and(|upper| point > upper);
            let below = self.lower.is_some_and(|lower| point < lower);
            if above || below {
                return Err(InvalidConfiguration::OutOfRange {
                    field: "snap_points",
                    value: point,
                    expected: "within the spring bounds",
                });
            }
        }
        Ok(())
    }
}

/// Spring resolution: where to snap and how to get there.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapConfig {
    pub spring: SpringConfig,
    pub snap_points: SnapPoints,
    pub bounds: SpringBounds,
}

impl SnapConfig {
    pub fn new(spring: SpringConfig, snap_points: SnapPoints) -> Self {
        Self {
            spring,
            snap_points,
            bounds: SpringBounds::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: SpringBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        self.spring.validate()?;
        self.bounds.validate(&self.snap_points)
    }
}

/// How the engine resolves a release.
#[derive(Clone, Debug, PartialEq)]
pub enum MotionConfig {
    Decay(DecayConfig),
    Spring(SnapConfig),
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        match self {
            MotionConfig::Decay(config) => config.validate(),
            MotionConfig::Spring(config) => config.validate(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        MotionConfig::Decay(DecayConfig::default())
    }
}

/// Called with the settled position when a spring comes to rest.
pub type SnapObserver = Box<dyn FnMut(f32)>;

pub struct PositioningEngine {
    config: MotionConfig,
    /// Decay uses only `state.physics`; `state.to_value` is the spring target.
    state: SpringState,
    offset: f32,
    motion: Motion,
    last_translation: f32,
    on_snap: Option<SnapObserver>,
}

impl std::fmt::Debug for PositioningEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositioningEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("offset", &self.offset)
            .field("motion", &self.motion)
            .field("on_snap", &self.on_snap.is_some())
            .finish()
    }
}

impl PositioningEngine {
    /// Create an engine resting at `offset`.
    pub fn new(config: MotionConfig, offset: f32) -> Result<Self, InvalidConfiguration> {
        config.validate()?;
        if !offset.is_finite() {
            return Err(InvalidConfiguration::NonFinite {
                field: "offset",
                value: offset,
            });
        }
        let mut state = SpringState::default();
        state.physics.position = offset;
        Ok(Self {
            config,
            state,
            offset,
            motion: Motion::Idle,
            last_translation: 0.0,
            on_snap: None,
        })
    }

    pub fn set_snap_observer(&mut self, observer: impl FnMut(f32) + 'static) {
        self.on_snap = Some(Box::new(observer));
    }

    pub fn clear_snap_observer(&mut self) {
        self.on_snap = None;
    }

    /// Advance one frame and return the raw (unclamped) position.
    pub fn on_frame(&mut self, sample: GestureSample, frame_time_nanos: u64) -> f32 {
        let sample = self.sanitize(sample);

        match sample.phase {
            GesturePhase::Began | GesturePhase::Active => self.track(sample),
            GesturePhase::Ended => {
                if self.motion == Motion::Dragging {
                    self.release(sample);
                }
            }
            GesturePhase::Undetermined => {}
        }

        if self.motion == Motion::Idle {
            self.state.physics.position = self.offset;
        }

        if self.is_animating() {
            self.advance(frame_time_nanos);
        }

        if let MotionConfig::Spring(_) = self.config {
            if self.motion != Motion::Dragging {
                self.enforce_bounds();
            }
        }

        self.state.physics.position
    }

    /// Committed rest position.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn physics(&self) -> &PhysicsState {
        &self.state.physics
    }

    /// The snap point being sprung to, while springing.
    pub fn target(&self) -> Option<f32> {
        (self.motion == Motion::Springing).then_some(self.state.to_value)
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.motion, Motion::Decaying | Motion::Springing)
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    fn sanitize(&mut self, mut sample: GestureSample) -> GestureSample {
        let starts_drag = match sample.phase {
            GesturePhase::Began => true,
            GesturePhase::Active => self.motion != Motion::Dragging,
            GesturePhase::Undetermined | GesturePhase::Ended => false,
        };
        if starts_drag {
            // Translations are relative to the gesture that is starting.
            self.last_translation = 0.0;
        }
        if !sample.translation.is_finite() {
            warn!(
                "non-finite translation {}; reusing {}",
                sample.translation, self.last_translation
            );
            sample.translation = self.last_translation;
        }
        if !sample.velocity.is_finite() {
            warn!("non-finite velocity {}; using 0", sample.velocity);
            sample.velocity = 0.0;
        }
        self.last_translation = sample.translation;
        sample
    }

    /// Finger down: interrupt any animation, then follow the finger.
    fn track(&mut self, sample: GestureSample) {
        if self.is_animating() {
            debug!(
                "{:?} interrupted at {}",
                self.motion, self.state.physics.position
            );
            self.commit();
        }
        if self.motion != Motion::Dragging {
            debug!("drag began from offset {}", self.offset);
            self.state.reset();
            self.motion = Motion::Dragging;
        }
        self.state.physics.finished = false;
        self.state.physics.position = self.offset + sample.translation;
    }

    /// Finger up: hand the release velocity to the physics model.
    fn release(&mut self, sample: GestureSample) {
        let physics = &mut self.state.physics;
        physics.position = self.offset + sample.translation;
        physics.seed(sample.velocity);
        match &self.config {
            MotionConfig::Decay(_) => {
                debug!("decay from {} at {} u/s", physics.position, sample.velocity);
                self.motion = Motion::Decaying;
            }
            MotionConfig::Spring(snap) => {
                let target = snap.snap_points.nearest(physics.position, sample.velocity);
                debug!(
                    "spring from {} at {} u/s toward {}",
                    physics.position, sample.velocity, target
                );
                self.state.to_value = target;
                self.motion = Motion::Springing;
            }
        }
    }

    fn advance(&mut self, frame_time_nanos: u64) {
        match &self.config {
            MotionConfig::Decay(config) => {
                step_decay(&mut self.state.physics, config, frame_time_nanos)
            }
            MotionConfig::Spring(snap) => {
                step_spring(&mut self.state, &snap.spring, frame_time_nanos)
            }
        }
        trace!(
            "{:?} position={} velocity={}",
            self.motion,
            self.state.physics.position,
            self.state.physics.velocity
        );

        if !self.state.physics.is_finite() {
            warn!(
                "{:?} produced a non-finite state; returning to offset {}",
                self.motion, self.offset
            );
            self.state.physics.position = self.offset;
            self.state.physics.velocity = 0.0;
            self.state.physics.finished = true;
            self.motion = Motion::Idle;
            return;
        }

        if self.state.physics.finished {
            let settled = self.state.physics.position;
            if self.motion == Motion::Springing {
                if let Some(observer) = self.on_snap.as_mut() {
                    observer(settled);
                }
            }
            debug!("{:?} settled at {}", self.motion, settled);
            self.commit();
        }
    }

    /// Recovery for a snapping sheet that ended up outside its bounds.
    fn enforce_bounds(&mut self) {
        let MotionConfig::Spring(snap) = &self.config else {
            return;
        };
        let position = self.state.physics.position;

        if let Some(upper) = snap.bounds.upper.filter(|upper| position > *upper) {
            let target = snap.snap_points.nearest(position, self.state.physics.velocity);
            debug!("position {position} above {upper}; re-aiming spring at {target}");
            self.state.to_value = target;
            if self.motion == Motion::Idle {
                self.state.physics.seed(0.0);
                self.motion = Motion::Springing;
            }
        } else if let Some(lower) = snap.bounds.lower.filter(|lower| position < *lower) {
            debug!("position {position} below {lower}; pinning");
            self.state.physics.position = lower;
            self.state.physics.velocity = 0.0;
            self.state.physics.finished = true;
            self.commit();
        }
    }

    /// Make the current position the rest offset and stop animating.
    fn commit(&mut self) {
        self.offset = self.state.physics.position;
        self.motion = Motion::Idle;
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
