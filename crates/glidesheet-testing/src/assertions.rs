//! Assertion helpers for offsets produced frame by frame.

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that every value lies in `[lower, upper]`.
pub fn assert_within(values: &[f32], lower: f32, upper: f32, msg: &str) {
    if let Some((index, value)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| !(lower..=upper).contains(*v))
    {
        panic!(
            "{}: frame {} produced {} outside [{}, {}]",
            msg, index, value, lower, upper
        );
    }
}

/// Assert that values never move against `direction` (its sign).
pub fn assert_monotonic(values: &[f32], direction: f32, msg: &str) {
    for (index, pair) in values.windows(2).enumerate() {
        let step = (pair[1] - pair[0]) * direction.signum();
        assert!(
            step >= -1e-4,
            "{}: frame {} moved from {} to {} against the fling",
            msg,
            index + 1,
            pair[0],
            pair[1]
        );
    }
}
