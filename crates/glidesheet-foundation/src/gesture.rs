//! Touch samples as delivered by a pan gesture recogniser.

/// Lifecycle of a pan gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No gesture has been seen yet.
    #[default]
    Undetermined,
    /// A finger went down. Interrupts any running animation.
    Began,
    /// The finger is moving.
    Active,
    /// The finger lifted; physics takes over.
    Ended,
}

impl GesturePhase {
    pub fn is_ended(self) -> bool {
        self == GesturePhase::Ended
    }
}

/// One gesture reading.
///
/// `translation` is measured from where the gesture began; `velocity` is in
/// units per second.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GestureSample {
    pub phase: GesturePhase,
    pub translation: f32,
    pub velocity: f32,
}

impl GestureSample {
    pub fn new(phase: GesturePhase, translation: f32, velocity: f32) -> Self {
        Self {
            phase,
            translation,
            velocity,
        }
    }

    pub fn began() -> Self {
        Self::new(GesturePhase::Began, 0.0, 0.0)
    }

    pub fn active(translation: f32, velocity: f32) -> Self {
        Self::new(GesturePhase::Active, translation, velocity)
    }

    pub fn ended(translation: f32, velocity: f32) -> Self {
        Self::new(GesturePhase::Ended, translation, velocity)
    }

    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.velocity.is_finite()
    }
}
