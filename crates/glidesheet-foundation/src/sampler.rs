//! Turns raw pointer events into [`GestureSample`]s.
//!
//! Hosts with a native pan recogniser can publish samples directly; this
//! adapter is for hosts that only see pointer down/move/up.

use crate::gesture::GestureSample;
use crate::gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
use crate::velocity_tracker::VelocityTracker1D;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A vertical pointer reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub kind: PointerEventKind,
    pub y: f32,
    pub time_ms: i64,
}

impl PointerInput {
    pub fn new(kind: PointerEventKind, y: f32, time_ms: i64) -> Self {
        Self { kind, y, time_ms }
    }
}

#[derive(Clone, Debug)]
struct Press {
    origin: f32,
    dragging: bool,
}

/// Single-pointer pan recogniser.
#[derive(Clone, Debug)]
pub struct PanGestureSampler {
    press: Option<Press>,
    tracker: VelocityTracker1D,
    slop: f32,
    max_velocity: f32,
}

impl Default for PanGestureSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl PanGestureSampler {
    pub fn new() -> Self {
        Self {
            press: None,
            tracker: VelocityTracker1D::new(),
            slop: DRAG_THRESHOLD,
            max_velocity: MAX_FLING_VELOCITY,
        }
    }

    /// Override the touch slop. Zero makes every move an active drag.
    pub fn with_slop(mut self, slop: f32) -> Self {
        self.slop = slop.max(0.0);
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Feed one pointer event. Returns the sample it produces, if any.
    ///
    /// Events that arrive without a preceding `Down` are ignored, as is a
    /// second `Down` while a press is in progress.
    pub fn on_pointer(&mut self, input: PointerInput) -> Option<GestureSample> {
        match input.kind {
            PointerEventKind::Down => {
                if self.press.is_some() {
                    return None;
                }
                self.tracker.reset();
                self.tracker.add_data_point(input.time_ms, input.y);
                self.press = Some(Press {
                    origin: input.y,
                    dragging: false,
                });
                Some(GestureSample::began())
            }
            PointerEventKind::Move => {
                let press = self.press.as_mut()?;
                self.tracker.add_data_point(input.time_ms, input.y);
                let translation = input.y - press.origin;
                if !press.dragging && translation.abs() < self.slop {
                    return None;
                }
                press.dragging = true;
                let velocity = self.tracker.calculate_velocity_with_max(self.max_velocity);
                Some(GestureSample::active(translation, velocity))
            }
            PointerEventKind::Up => {
                let press = self.press.take()?;
                self.tracker.add_data_point(input.time_ms, input.y);
                let translation = if press.dragging {
                    input.y - press.origin
                } else {
                    0.0
                };
                let velocity = if press.dragging {
                    self.tracker.calculate_velocity_with_max(self.max_velocity)
                } else {
                    0.0
                };
                Some(GestureSample::ended(translation, velocity))
            }
            PointerEventKind::Cancel => {
                let press = self.press.take()?;
                let translation = if press.dragging {
                    input.y - press.origin
                } else {
                    0.0
                };
                Some(GestureSample::ended(translation, 0.0))
            }
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }
}
