//! Gesture handling and positioning for Glidesheet
//!
//! Pointer events (or samples from a native recogniser) go through a
//! [`SampleLatch`] into a [`PositioningEngine`], whose output passes a clamp
//! stage before it is drawn. [`Sheet`] wires the three together.

pub mod clamp;
pub mod engine;
pub mod frame_clock;
pub mod gesture;
pub mod gesture_constants;
pub mod latch;
pub mod sampler;
pub mod sheet;
pub mod velocity_tracker;

pub use clamp::{ClampMode, ClampRange, DiffClamp, DisplayClamp, CATALOG_RANGE};
pub use engine::{
    Motion, MotionConfig, PositioningEngine, SnapConfig, SnapObserver, SpringBounds,
};
pub use frame_clock::FrameClock;
pub use gesture::{GesturePhase, GestureSample};
pub use gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
pub use latch::SampleLatch;
pub use sampler::{PanGestureSampler, PointerEventKind, PointerInput};
pub use sheet::{Sheet, SheetConfig};
pub use velocity_tracker::VelocityTracker1D;

pub use glidesheet_animation::{
    DecayConfig, InvalidConfiguration, PhysicsState, SnapPoints, SpringConfig,
};

pub mod prelude {
    pub use crate::clamp::{ClampMode, ClampRange};
    pub use crate::engine::{Motion, MotionConfig, PositioningEngine, SnapConfig, SpringBounds};
    pub use crate::gesture::{GesturePhase, GestureSample};
    pub use crate::latch::SampleLatch;
    pub use crate::sheet::{Sheet, SheetConfig};
    pub use glidesheet_animation::prelude::*;
}
