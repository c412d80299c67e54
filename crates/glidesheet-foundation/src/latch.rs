//! Hand-off of gesture samples from the input thread to the frame callback.
//!
//! Input may arrive at any rate and from any thread; the engine consumes at
//! most one sample per frame. Motion between frames collapses to the latest
//! reading, but gesture edges (`Began`, `Ended`) are never lost: each one is
//! delivered on its own frame, in arrival order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::gesture::{GesturePhase, GestureSample};

#[derive(Debug, Default)]
struct LatchInner {
    pending: VecDeque<GestureSample>,
    current: GestureSample,
}

/// Cloneable handle shared between the producer and the frame loop.
#[derive(Clone, Debug, Default)]
pub struct SampleLatch {
    inner: Arc<Mutex<LatchInner>>,
}

impl SampleLatch {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LatchInner> {
        // A panicking producer cannot leave the queue half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a sample for an upcoming frame.
    pub fn publish(&self, sample: GestureSample) {
        let mut inner = self.lock();
        if sample.phase == GesturePhase::Active {
            if let Some(last) = inner.pending.back_mut() {
                match last.phase {
                    GesturePhase::Active => {
                        *last = sample;
                        return;
                    }
                    GesturePhase::Began => {
                        last.translation = sample.translation;
                        last.velocity = sample.velocity;
                        return;
                    }
                    GesturePhase::Undetermined | GesturePhase::Ended => {}
                }
            }
        }
        inner.pending.push_back(sample);
    }

    /// The sample for this frame.
    ///
    /// With nothing new queued, the previous sample persists; a persisted
    /// `Began` becomes `Active` so it is only seen once.
    pub fn take_for_frame(&self) -> GestureSample {
        let mut inner = self.lock();
        if let Some(sample) = inner.pending.pop_front() {
            inner.current = sample;
            return sample;
        }
        if inner.current.phase == GesturePhase::Began {
            inner.current.phase = GesturePhase::Active;
        }
        inner.current
    }

    /// Number of samples waiting for a frame.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }
}
