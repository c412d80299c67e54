//! Feeds a scripted pointer drag through a sheet and logs what it draws.
//!
//! ```text
//! sheet-replay [decay|spring] [--realtime]
//! ```
//!
//! By default frames are simulated at 60 FPS and the pointer events are fed
//! in by timestamp. With `--realtime` the pointer events come from their own
//! thread through the sheet's latch and frames are paced by the wall clock.

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use glidesheet_foundation::{
    ClampMode, ClampRange, FrameClock, PanGestureSampler, PointerEventKind, PointerInput,
    SampleLatch, Sheet, SheetConfig, SnapPoints,
};
use log::{debug, info};
use web_time::Instant;

const FRAME_NANOS: u64 = 16_666_667;
/// Ten seconds of frames.
const MAX_FRAMES: u64 = 600;
const SPRING_SNAP_POINTS: [f32; 3] = [0.0, -240.0, -480.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Decay,
    Spring,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Options {
    mode: Mode,
    realtime: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut options = Options {
        mode: Mode::Decay,
        realtime: false,
    };
    for arg in args {
        match arg.as_str() {
            "decay" => options.mode = Mode::Decay,
            "spring" => options.mode = Mode::Spring,
            "--realtime" => options.realtime = true,
            other => bail!("unknown argument `{other}` (expected decay, spring or --realtime)"),
        }
    }
    Ok(options)
}

fn sheet_config(mode: Mode) -> Result<SheetConfig> {
    Ok(match mode {
        Mode::Decay => SheetConfig::catalog(),
        Mode::Spring => {
            let points = SnapPoints::new(SPRING_SNAP_POINTS).context("snap points")?;
            let range = ClampRange::new(-480.0, 0.0).context("clamp range")?;
            SheetConfig::snapping(points).with_clamp(ClampMode::Absolute(range))
        }
    })
}

/// A quick upward flick: 20 units every 10 ms, then release.
fn pointer_script() -> Vec<PointerInput> {
    let mut events = vec![PointerInput::new(PointerEventKind::Down, 640.0, 0)];
    for step in 1..=10 {
        events.push(PointerInput::new(
            PointerEventKind::Move,
            640.0 - 20.0 * step as f32,
            step * 10,
        ));
    }
    events.push(PointerInput::new(PointerEventKind::Up, 420.0, 110));
    events
}

/// Publish the pointer script from its own thread, keeping its timing.
fn spawn_input(latch: SampleLatch) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut sampler = PanGestureSampler::new();
        let mut last_ms = 0;
        for input in pointer_script() {
            let wait = u64::try_from(input.time_ms - last_ms).unwrap_or(0);
            thread::sleep(Duration::from_millis(wait));
            last_ms = input.time_ms;
            if let Some(sample) = sampler.on_pointer(input) {
                debug!("input {:?} -> {:?}", input.kind, sample);
                latch.publish(sample);
            }
        }
    })
}

fn run_simulated(sheet: &mut Sheet) -> u64 {
    let latch = sheet.latch();
    let mut sampler = PanGestureSampler::new();
    let mut events = pointer_script().into_iter().peekable();

    for frame in 1..=MAX_FRAMES {
        let time_nanos = frame * FRAME_NANOS;
        while let Some(input) = events.next_if(|input| {
            u64::try_from(input.time_ms).unwrap_or(0) * 1_000_000 <= time_nanos
        }) {
            if let Some(sample) = sampler.on_pointer(input) {
                latch.publish(sample);
            }
        }
        let output = sheet.on_frame(time_nanos);
        debug!("frame {frame}: {:?} output={output}", sheet.engine().motion());
        if events.peek().is_none() && sheet.is_settled() {
            return frame;
        }
    }
    MAX_FRAMES
}

fn run_realtime(sheet: &mut Sheet) -> Result<u64> {
    let input = spawn_input(sheet.latch());
    let clock = FrameClock::new();
    let start = Instant::now();
    let mut frames = MAX_FRAMES;

    for frame in 1..=MAX_FRAMES {
        let output = sheet.on_frame(clock.now_nanos());
        debug!("frame {frame}: {:?} output={output}", sheet.engine().motion());
        if input.is_finished() && sheet.is_settled() {
            frames = frame;
            break;
        }
        let deadline = start + Duration::from_nanos(frame * FRAME_NANOS);
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }

    input
        .join()
        .map_err(|_| anyhow!("input thread panicked"))?;
    Ok(frames)
}

fn main() -> Result<()> {
    #[cfg(all(feature = "logging", not(target_arch = "wasm32")))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = parse_args(std::env::args().skip(1))?;
    info!("replaying {:?}", options);

    let mut sheet = Sheet::new(sheet_config(options.mode)?).context("sheet configuration")?;
    sheet.set_snap_observer(|position| info!("snapped to {position}"));

    let frames = if options.realtime {
        run_realtime(&mut sheet)?
    } else {
        run_simulated(&mut sheet)
    };

    if !sheet.is_settled() {
        bail!("sheet still moving after {frames} frames");
    }
    info!("settled after {frames} frames");
    println!("{}", sheet.engine().offset());
    Ok(())
}
