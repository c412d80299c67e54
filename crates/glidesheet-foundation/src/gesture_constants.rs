//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's DPI factor.

/// Drag threshold in logical pixels.
///
/// A press must travel this far from where it went down before the sampler
/// reports it as an active drag. Smaller movements are finger jitter.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum release velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
