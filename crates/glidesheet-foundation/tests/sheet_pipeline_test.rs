//! Pointer events through sampler, latch, engine and clamp.

use glidesheet_foundation::{
    ClampMode, ClampRange, PanGestureSampler, PointerEventKind, PointerInput, Sheet, SheetConfig,
    SnapPoints,
};
use glidesheet_testing::prelude::*;

fn pointer(kind: PointerEventKind, y: f32, time_ms: i64) -> PointerInput {
    PointerInput::new(kind, y, time_ms)
}

#[test]
fn pointer_fling_on_catalog_sheet_stays_in_display_range() {
    let mut sampler = PanGestureSampler::new();
    let mut samples = Vec::new();
    samples.extend(sampler.on_pointer(pointer(PointerEventKind::Down, 500.0, 0)));
    for step in 1..=6 {
        let y = 500.0 + step as f32 * 25.0;
        samples.extend(sampler.on_pointer(pointer(PointerEventKind::Move, y, step * 16)));
    }
    samples.extend(sampler.on_pointer(pointer(PointerEventKind::Up, 675.0, 112)));
    assert!(samples.last().expect("release").velocity > 1_000.0);

    let mut sheet = Sheet::new(SheetConfig::catalog()).expect("catalog is valid");
    let trace = FrameDriver::new().play_sheet(&mut sheet, &samples);

    assert_within(&trace.outputs(), -55.0, 200.0, "catalog sheet");
    assert_eq!(trace.last_output(), Some(200.0));
    // The engine itself coasted well past the display range.
    assert!(sheet.engine().offset() > 200.0);
}

#[test]
fn samples_published_from_another_thread_settle_the_sheet() {
    let points = SnapPoints::new([0.0, -320.0]).expect("valid");
    let config = SheetConfig::snapping(points)
        .with_clamp(ClampMode::Absolute(ClampRange::new(-320.0, 0.0).expect("valid")));
    let mut sheet = Sheet::new(config).expect("valid");
    let latch = sheet.latch();

    let script = GestureScript::fling(-140.0, 8).build();
    std::thread::spawn(move || {
        for sample in script {
            latch.publish(sample);
        }
    })
    .join()
    .expect("input thread");

    let trace = FrameDriver::new().play_sheet(&mut sheet, &[]);

    assert_within(&trace.outputs(), -320.0, 0.0, "snapping sheet");
    assert_approx_eq(
        trace.last_output().expect("frames recorded"),
        -320.0,
        0.0,
        "sheet snaps open",
    );
    assert!(sheet.is_settled());
}
