//! Snap-point selection for springs released with a velocity.

use smallvec::SmallVec;

use crate::error::InvalidConfiguration;

/// Seconds of travel assumed when projecting a release velocity.
pub const SNAP_PROJECTION: f32 = 0.2;

/// Pick the point nearest to `value + SNAP_PROJECTION * velocity`.
///
/// Ties go to the earliest point in `points`. Returns `None` when `points`
/// is empty.
pub fn snap_point(value: f32, velocity: f32, points: &[f32]) -> Option<f32> {
    let projected = value + SNAP_PROJECTION * velocity;
    let mut best: Option<(f32, f32)> = None;
    for &point in points {
        let distance = (projected - point).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((point, distance)),
        }
    }
    best.map(|(point, _)| point)
}

/// Ordered, non-empty set of finite rest offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints {
    points: SmallVec<[f32; 4]>,
}

impl SnapPoints {
    pub fn new(points: impl IntoIterator<Item = f32>) -> Result<Self, InvalidConfiguration> {
        let points: SmallVec<[f32; 4]> = points.into_iter().collect();
        if points.is_empty() {
            return Err(InvalidConfiguration::EmptySnapPoints);
        }
        if let Some((index, &value)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(InvalidConfiguration::NonFiniteSnapPoint { index, value });
        }
        Ok(Self { points })
    }

    /// Nearest point to the projected release position.
    pub fn nearest(&self, value: f32, velocity: f32) -> f32 {
        // Non-empty by construction.
        snap_point(value, velocity, &self.points).unwrap_or(self.points[0])
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
