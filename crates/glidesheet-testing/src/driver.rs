//! Fake 60 Hz frame loop for driving engines and sheets in tests.

use glidesheet_foundation::{GestureSample, Motion, PositioningEngine, Sheet};

/// One frame at 60 FPS.
pub const FRAME_NANOS: u64 = 16_666_667;

/// What the engine did on one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRecord {
    pub time_nanos: u64,
    pub sample: Option<GestureSample>,
    pub output: f32,
    pub motion: Motion,
    pub offset: f32,
}

/// Frames recorded by a [`FrameDriver`].
#[derive(Clone, Debug, Default)]
pub struct Trace {
    pub frames: Vec<FrameRecord>,
}

impl Trace {
    pub fn outputs(&self) -> Vec<f32> {
        self.frames.iter().map(|frame| frame.output).collect()
    }

    pub fn last_output(&self) -> Option<f32> {
        self.frames.last().map(|frame| frame.output)
    }

    /// Motions in order, with consecutive repeats collapsed.
    pub fn motions(&self) -> Vec<Motion> {
        let mut motions: Vec<Motion> = Vec::new();
        for frame in &self.frames {
            if motions.last() != Some(&frame.motion) {
                motions.push(frame.motion);
            }
        }
        motions
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn extend(&mut self, other: Trace) {
        self.frames.extend(other.frames);
    }
}

/// Deterministic frame clock.
#[derive(Clone, Debug)]
pub struct FrameDriver {
    time_nanos: u64,
    frame_nanos: u64,
    max_settle_frames: usize,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::with_frame_nanos(FRAME_NANOS)
    }

    pub fn with_frame_nanos(frame_nanos: u64) -> Self {
        Self {
            time_nanos: 0,
            frame_nanos,
            max_settle_frames: 3_600,
        }
    }

    pub fn time_nanos(&self) -> u64 {
        self.time_nanos
    }

    fn tick(&mut self) -> u64 {
        self.time_nanos += self.frame_nanos;
        self.time_nanos
    }

    /// Feed each sample to the engine on its own frame.
    pub fn run(&mut self, engine: &mut PositioningEngine, samples: &[GestureSample]) -> Trace {
        let mut trace = Trace::default();
        for &sample in samples {
            let time_nanos = self.tick();
            let output = engine.on_frame(sample, time_nanos);
            trace.frames.push(FrameRecord {
                time_nanos,
                sample: Some(sample),
                output,
                motion: engine.motion(),
                offset: engine.offset(),
            });
        }
        trace
    }

    /// Repeat `sample` until the engine stops animating.
    ///
    /// Panics if the engine is still moving after a minute of frames.
    pub fn settle(&mut self, engine: &mut PositioningEngine, sample: GestureSample) -> Trace {
        let mut trace = Trace::default();
        while engine.is_animating() {
            assert!(
                trace.len() < self.max_settle_frames,
                "engine still {:?} after {} frames",
                engine.motion(),
                trace.len()
            );
            trace.extend(self.run(engine, &[sample]));
        }
        log::trace!("settled after {} frames", trace.len());
        trace
    }

    /// Run a script, then keep its last sample until the engine rests.
    pub fn play(&mut self, engine: &mut PositioningEngine, samples: &[GestureSample]) -> Trace {
        let mut trace = self.run(engine, samples);
        if let Some(&last) = samples.last() {
            trace.extend(self.settle(engine, last));
        }
        trace
    }

    /// Publish each sample to the sheet's latch and run a frame, then run
    /// frames until the sheet settles.
    pub fn play_sheet(&mut self, sheet: &mut Sheet, samples: &[GestureSample]) -> Trace {
        let latch = sheet.latch();
        let mut trace = Trace::default();
        let mut pending = samples.iter();
        loop {
            let sample = pending.next().copied();
            if let Some(sample) = sample {
                latch.publish(sample);
            } else if sheet.is_settled() {
                break;
            }
            assert!(
                trace.len() < self.max_settle_frames + samples.len(),
                "sheet never settled"
            );
            let time_nanos = self.tick();
            let output = sheet.on_frame(time_nanos);
            trace.frames.push(FrameRecord {
                time_nanos,
                sample,
                output,
                motion: sheet.engine().motion(),
                offset: sheet.engine().offset(),
            });
        }
        trace
    }
}
