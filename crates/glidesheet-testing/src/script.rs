//! Frame-by-frame gesture sequences.

use glidesheet_foundation::GestureSample;

/// Builder for one gesture sample per frame.
///
/// ```ignore
/// let samples = GestureScript::new()
///     .press()
///     .drag_to(30.0, 200.0, 1)
///     .release(200.0)
///     .build();
/// ```
#[derive(Clone, Debug, Default)]
pub struct GestureScript {
    samples: Vec<GestureSample>,
    translation: f32,
}

impl GestureScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finger down.
    pub fn press(mut self) -> Self {
        self.translation = 0.0;
        self.samples.push(GestureSample::began());
        self
    }

    /// Move linearly to `translation` over `frames` frames, reporting
    /// `velocity` on each.
    pub fn drag_to(mut self, translation: f32, velocity: f32, frames: usize) -> Self {
        let frames = frames.max(1);
        let start = self.translation;
        for frame in 1..=frames {
            let t = frame as f32 / frames as f32;
            let sample = GestureSample::active(start + (translation - start) * t, velocity);
            self.samples.push(sample);
        }
        self.translation = translation;
        self
    }

    /// Hold the finger still for `frames` frames.
    pub fn hold(mut self, frames: usize) -> Self {
        for _ in 0..frames {
            self.samples.push(GestureSample::active(self.translation, 0.0));
        }
        self
    }

    /// Finger up with `velocity`.
    pub fn release(mut self, velocity: f32) -> Self {
        self.samples.push(GestureSample::ended(self.translation, velocity));
        self
    }

    /// Press, drag `distance` over `frames` frames and let go at the speed
    /// that drag implies at 60 FPS.
    pub fn fling(distance: f32, frames: usize) -> Self {
        let frames = frames.max(1);
        let velocity = distance / (frames as f32 / 60.0);
        Self::new()
            .press()
            .drag_to(distance, velocity, frames)
            .release(velocity)
    }

    /// Append a raw sample.
    pub fn sample(mut self, sample: GestureSample) -> Self {
        self.translation = sample.translation;
        self.samples.push(sample);
        self
    }

    pub fn build(self) -> Vec<GestureSample> {
        self.samples
    }

    pub fn samples(&self) -> &[GestureSample] {
        &self.samples
    }

    pub fn last(&self) -> Option<GestureSample> {
        self.samples.last().copied()
    }
}
