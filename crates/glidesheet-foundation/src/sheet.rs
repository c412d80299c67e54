//! A draggable sheet: latch, positioning engine and clamp wired together.

use glidesheet_animation::{DecayConfig, InvalidConfiguration, SnapPoints, SpringConfig};
use log::debug;

use crate::clamp::{ClampMode, DisplayClamp, CATALOG_RANGE};
use crate::engine::{Motion, MotionConfig, PositioningEngine, SnapConfig};
use crate::latch::SampleLatch;

/// Everything a sheet needs, fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetConfig {
    pub motion: MotionConfig,
    pub clamp: ClampMode,
    pub initial_offset: f32,
}

impl SheetConfig {
    /// The catalog screen: free fling with the default deceleration, drawn
    /// between -55 and 200.
    pub fn catalog() -> Self {
        Self {
            motion: MotionConfig::Decay(DecayConfig::default()),
            clamp: ClampMode::Absolute(CATALOG_RANGE),
            initial_offset: 0.0,
        }
    }

    /// A sheet that springs between `points`.
    pub fn snapping(points: SnapPoints) -> Self {
        Self {
            motion: MotionConfig::Spring(SnapConfig::new(SpringConfig::default(), points)),
            clamp: ClampMode::Unbounded,
            initial_offset: 0.0,
        }
    }

    pub fn with_clamp(mut self, clamp: ClampMode) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_initial_offset(mut self, offset: f32) -> Self {
        self.initial_offset = offset;
        self
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::catalog()
    }
}

/// Owns one engine and feeds it from a [`SampleLatch`] once per frame.
#[derive(Debug)]
pub struct Sheet {
    latch: SampleLatch,
    engine: PositioningEngine,
    clamp: DisplayClamp,
}

impl Sheet {
    pub fn new(config: SheetConfig) -> Result<Self, InvalidConfiguration> {
        let engine = PositioningEngine::new(config.motion, config.initial_offset)?;
        debug!(
            "sheet at offset {} with {:?}",
            config.initial_offset, config.clamp
        );
        Ok(Self {
            latch: SampleLatch::new(),
            engine,
            clamp: config.clamp.into(),
        })
    }

    /// Handle for publishing gesture samples, possibly from another thread.
    pub fn latch(&self) -> SampleLatch {
        self.latch.clone()
    }

    /// Run one frame and return the clamped offset to draw at.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> f32 {
        let sample = self.latch.take_for_frame();
        let raw = self.engine.on_frame(sample, frame_time_nanos);
        self.clamp.apply(raw)
    }

    pub fn engine(&self) -> &PositioningEngine {
        &self.engine
    }

    pub fn set_snap_observer(&mut self, observer: impl FnMut(f32) + 'static) {
        self.engine.set_snap_observer(observer);
    }

    /// True once the sheet is at rest with no input waiting.
    pub fn is_settled(&self) -> bool {
        self.engine.motion() == Motion::Idle && self.latch.pending() == 0
    }
}
