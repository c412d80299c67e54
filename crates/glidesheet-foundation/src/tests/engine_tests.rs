use super::*;

use std::cell::RefCell;
use std::rc::Rc;

const FRAME: u64 = 16_666_667; // ~60 FPS

struct Clock(u64);

impl Clock {
    fn tick(&mut self) -> u64 {
        self.0 += FRAME;
        self.0
    }
}

fn decay_engine() -> PositioningEngine {
    PositioningEngine::new(MotionConfig::Decay(DecayConfig::default()), 0.0)
        .expect("default decay is valid")
}

fn spring_engine(points: &[f32]) -> PositioningEngine {
    let snap = SnapConfig::new(
        SpringConfig::default(),
        SnapPoints::new(points.iter().copied()).expect("valid snap points"),
    );
    PositioningEngine::new(MotionConfig::Spring(snap), 0.0).expect("valid spring")
}

/// Keep feeding `sample` until the engine stops animating.
fn settle(engine: &mut PositioningEngine, sample: GestureSample, clock: &mut Clock) -> Vec<f32> {
    let mut outputs = Vec::new();
    while engine.is_animating() {
        assert!(outputs.len() < 2_000, "engine never settled");
        outputs.push(engine.on_frame(sample, clock.tick()));
    }
    outputs
}

#[test]
fn fresh_engine_rests_on_offset() {
    let mut engine = PositioningEngine::new(MotionConfig::default(), 42.0).expect("valid");
    let mut clock = Clock(0);

    assert_eq!(engine.on_frame(GestureSample::default(), clock.tick()), 42.0);
    assert_eq!(engine.motion(), Motion::Idle);
    assert_eq!(engine.offset(), 42.0);
}

#[test]
fn drag_follows_finger_from_committed_offset() {
    let mut engine = PositioningEngine::new(MotionConfig::default(), -20.0).expect("valid");
    let mut clock = Clock(0);

    assert_eq!(engine.on_frame(GestureSample::began(), clock.tick()), -20.0);
    assert_eq!(engine.motion(), Motion::Dragging);
    assert_eq!(
        engine.on_frame(GestureSample::active(35.0, 400.0), clock.tick()),
        15.0
    );
    assert_eq!(
        engine.on_frame(GestureSample::active(-5.0, -300.0), clock.tick()),
        -25.0
    );
    // Offset only changes when a cycle finishes.
    assert_eq!(engine.offset(), -20.0);
}

#[test]
fn decay_commits_last_position_when_finished() {
    let mut engine = decay_engine();
    let mut clock = Clock(0);

    engine.on_frame(GestureSample::began(), clock.tick());
    engine.on_frame(GestureSample::active(50.0, 1_200.0), clock.tick());
    let released = engine.on_frame(GestureSample::ended(50.0, 1_200.0), clock.tick());
    assert_eq!(released, 50.0);
    assert_eq!(engine.motion(), Motion::Decaying);

    let outputs = settle(&mut engine, GestureSample::ended(50.0, 1_200.0), &mut clock);

    let last = *outputs.last().expect("decay ran");
    assert_eq!(engine.offset(), last);
    assert_eq!(engine.physics().position, last);
    assert!(engine.physics().finished);
    assert!(outputs.windows(2).all(|w| w[1] >= w[0]));
    // 50 + 1.2 * 0.998 / 0.002 is the limit of the curve.
    assert!(last > 500.0 && last < 649.0, "settled at {last}");

    // Persisting Ended does not restart the cycle.
    assert_eq!(
        engine.on_frame(GestureSample::ended(50.0, 1_200.0), clock.tick()),
        last
    );
    assert_eq!(engine.motion(), Motion::Idle);
}

#[test]
fn decay_interruption_commits_position_and_resets_state() {
    let mut engine = decay_engine();
    let mut clock = Clock(0);

    engine.on_frame(GestureSample::began(), clock.tick());
    engine.on_frame(GestureSample::active(10.0, 0.0), clock.tick());
    engine.on_frame(GestureSample::ended(10.0, 3_000.0), clock.tick());
    let mut in_flight = 0.0;
    for _ in 0..10 {
        in_flight = engine.on_frame(GestureSample::ended(10.0, 3_000.0), clock.tick());
    }
    assert!(engine.is_animating());
    assert!(in_flight > 10.0);

    let output = engine.on_frame(GestureSample::began(), clock.tick());

    assert_eq!(engine.offset(), in_flight);
    assert_eq!(output, in_flight);
    assert_eq!(engine.motion(), Motion::Dragging);
    let physics = engine.physics();
    assert!(!physics.finished);
    assert_eq!(physics.velocity, 0.0);
    assert_eq!(physics.time_nanos, None);
    assert_eq!(physics.position, in_flight);
}

#[test]
fn motion_without_began_still_interrupts() {
    let mut engine = decay_engine();
    let mut clock = Clock(0);

    engine.on_frame(GestureSample::began(), clock.tick());
    engine.on_frame(GestureSample::ended(0.0, -2_000.0), clock.tick());
    let in_flight = engine.on_frame(GestureSample::ended(0.0, -2_000.0), clock.tick());

    let output = engine.on_frame(GestureSample::active(4.0, 0.0), clock.tick());

    assert_eq!(engine.offset(), in_flight);
    assert_eq!(output, in_flight + 4.0);
    assert_eq!(engine.motion(), Motion::Dragging);
}

#[test]
fn spring_scenario_snaps_to_projected_point() {
    let mut engine = spring_engine(&[10.0, -20.0]);
    let snapped = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&snapped);
    engine.set_snap_observer(move |position| sink.borrow_mut().push(position));
    let mut clock = Clock(0);

    assert_eq!(engine.motion(), Motion::Idle);
    engine.on_frame(GestureSample::new(GesturePhase::Began, 0.0, 0.0), clock.tick());
    assert_eq!(engine.motion(), Motion::Dragging);
    assert_eq!(
        engine.on_frame(GestureSample::active(30.0, 200.0), clock.tick()),
        30.0
    );
    engine.on_frame(GestureSample::ended(30.0, 200.0), clock.tick());
    // 30 + 0.2 * 200 = 70, nearest of {10, -20} is 10.
    assert_eq!(engine.motion(), Motion::Springing);
    assert_eq!(engine.target(), Some(10.0));

    let outputs = settle(&mut engine, GestureSample::ended(30.0, 200.0), &mut clock);

    assert_eq!(outputs.last().copied(), Some(10.0));
    assert_eq!(engine.offset(), 10.0);
    assert_eq!(engine.motion(), Motion::Idle);
    assert_eq!(engine.target(), None);
    assert_eq!(snapped.borrow().as_slice(), &[10.0]);
}

#[test]
fn spring_release_from_rest_uses_velocity_projection() {
    let mut engine = spring_engine(&[10.0, -20.0]);
    let mut clock = Clock(0);

    engine.on_frame(GestureSample::began(), clock.tick());
    engine.on_frame(GestureSample::ended(0.0, 100.0), clock.tick());

    assert_eq!(engine.target(), Some(10.0));
}

#[test]
fn spring_interruption_idles_then_drags_from_committed_point() {
    let mut engine = spring_engine(&[0.0, -300.0]);
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    engine.set_snap_observer(move |_| *counter.borrow_mut() += 1);
    let mut clock = Clock(0);

    engine.on_frame(GestureSample::began(), clock.tick());
    engine.on_frame(GestureSample::ended(-120.0, -900.0), clock.tick());
    assert_eq!(engine.target(), Some(-300.0));
    let mut in_flight = 0.0;
    for _ in 0..5 {
        in_flight = engine.on_frame(GestureSample::ended(-120.0, -900.0), clock.tick());
    }

    engine.on_frame(GestureSample::began(), clock.tick());
    assert_eq!(engine.offset(), in_flight);
    assert_eq!(*calls.borrow(), 0, "interrupted springs do not report a snap");

    assert_eq!(
        engine.on_frame(GestureSample::active(15.0, 0.0), clock.tick()),
        in_flight + 15.0
    );
}

#[test]
fn lower_bound_pins_an_overshooting_spring() {
    let snap = SnapConfig::new(
        SpringConfig::bouncy(),
        SnapPoints::new([0.0, -300.0]).expect("valid"),
    )
    .with_bounds(SpringBounds::new(Some(-300.0), Some(0.0)));
    let mut engine = PositioningEngine::new(MotionConfig::Spring(snap), -250.0).expect("valid");
    let mut clock = Clock(0);

    engine.on_frame(GestureSample::began(), clock.tick());
    engine.on_frame(GestureSample::ended(0.0, -2_000.0), clock.tick());
    let outputs = settle(&mut engine, GestureSample::ended(0.0, -2_000.0), &mut clock);

    assert!(outputs.iter().all(|p| *p >= -300.0));
    assert_eq!(engine.offset(), -300.0);
    assert!(engine.physics().finished);
}

#[test]
fn upper_bound_springs_a_stray_offset_home() {
    let snap = SnapConfig::new(
        SpringConfig::default(),
        SnapPoints::new([0.0, -300.0]).expect("valid"),
    )
    .with_bounds(SpringBounds::new(None, Some(0.0)));
    let mut engine = PositioningEngine::new(MotionConfig::Spring(snap), 50.0).expect("valid");
    let mut clock = Clock(0);

    assert_eq!(engine.on_frame(GestureSample::default(), clock.tick()), 50.0);
    assert_eq!(engine.motion(), Motion::Springing);
    assert_eq!(engine.target(), Some(0.0));

    settle(&mut engine, GestureSample::default(), &mut clock);
    assert_eq!(engine.offset(), 0.0);
}

#[test]
fn non_finite_samples_degrade_to_last_good_values() {
    let mut engine = decay_engine();
    let mut clock = Clock(0);

    engine.on_frame(GestureSample::began(), clock.tick());
    engine.on_frame(GestureSample::active(25.0, 100.0), clock.tick());
    assert_eq!(
        engine.on_frame(GestureSample::active(f32::NAN, 100.0), clock.tick()),
        25.0
    );

    // A NaN release velocity becomes a release at rest.
    let output = engine.on_frame(GestureSample::ended(f32::INFINITY, f32::NAN), clock.tick());
    assert_eq!(output, 25.0);
    assert_eq!(engine.motion(), Motion::Idle);
    assert_eq!(engine.offset(), 25.0);
}

#[test]
fn non_finite_translation_on_new_gesture_starts_from_offset() {
    let mut engine = decay_engine();
    let mut clock = Clock(0);

    engine.on_frame(GestureSample::began(), clock.tick());
    engine.on_frame(GestureSample::active(100.0, 0.0), clock.tick());
    engine.on_frame(GestureSample::ended(100.0, 0.0), clock.tick());
    assert_eq!(engine.motion(), Motion::Idle);
    assert_eq!(engine.offset(), 100.0);

    let output = engine.on_frame(
        GestureSample::new(GesturePhase::Began, f32::NAN, 0.0),
        clock.tick(),
    );
    assert_eq!(output, engine.offset());
    assert_eq!(engine.motion(), Motion::Dragging);

    // Without a Began edge the first motion sample also starts from zero.
    engine.on_frame(GestureSample::ended(0.0, 0.0), clock.tick());
    let output = engine.on_frame(GestureSample::active(f32::INFINITY, 0.0), clock.tick());
    assert_eq!(output, 100.0);
}

#[test]
fn non_finite_physics_returns_to_offset() {
    let mut engine = spring_engine(&[0.0, -300.0]);
    let mut clock = Clock(0);

    engine.on_frame(GestureSample::began(), clock.tick());
    engine.on_frame(GestureSample::active(-100.0, 0.0), clock.tick());
    let output = engine.on_frame(GestureSample::ended(-100.0, 1e38), clock.tick());

    assert_eq!(output, engine.offset());
    assert_eq!(output, 0.0);
    assert_eq!(engine.motion(), Motion::Idle);
    assert!(engine.physics().finished);
    assert!(engine.physics().is_finite());
}

#[test]
fn construction_rejects_invalid_configuration() {
    assert!(matches!(
        PositioningEngine::new(MotionConfig::Decay(DecayConfig::with_deceleration(1.5)), 0.0),
        Err(InvalidConfiguration::OutOfRange {
            field: "deceleration",
            ..
        })
    ));
    assert!(matches!(
        PositioningEngine::new(MotionConfig::default(), f32::NAN),
        Err(InvalidConfiguration::NonFinite { field: "offset", .. })
    ));

    let outside = SnapConfig::new(
        SpringConfig::default(),
        SnapPoints::new([0.0, 40.0]).expect("valid"),
    )
    .with_bounds(SpringBounds::new(None, Some(0.0)));
    assert!(matches!(
        PositioningEngine::new(MotionConfig::Spring(outside), 0.0),
        Err(InvalidConfiguration::OutOfRange {
            field: "snap_points",
            ..
        })
    ));

    let inverted = SnapConfig::new(
        SpringConfig::default(),
        SnapPoints::new([0.0]).expect("valid"),
    )
    .with_bounds(SpringBounds::new(Some(10.0), Some(-10.0)));
    assert!(matches!(
        PositioningEngine::new(MotionConfig::Spring(inverted), 0.0),
        Err(InvalidConfiguration::InvertedRange { .. })
    ));
}
