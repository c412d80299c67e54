//! Bounds the engine's raw output to the range the sheet may be drawn in.

use glidesheet_animation::InvalidConfiguration;

/// Display range of the catalog screen's sheet.
pub const CATALOG_RANGE: ClampRange = ClampRange {
    lower: -55.0,
    upper: 200.0,
};

/// Closed display range `[lower, upper]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampRange {
    lower: f32,
    upper: f32,
}

impl ClampRange {
    pub fn new(lower: f32, upper: f32) -> Result<Self, InvalidConfiguration> {
        for (field, value) in [("lower", lower), ("upper", upper)] {
            if !value.is_finite() {
                return Err(InvalidConfiguration::NonFinite { field, value });
            }
        }
        if lower > upper {
            return Err(InvalidConfiguration::InvertedRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f32 {
        self.lower
    }

    pub fn upper(&self) -> f32 {
        self.upper
    }

    /// `max(lower, min(upper, x))`. Values in range pass through unchanged;
    /// NaN maps to `upper`.
    pub fn apply(&self, x: f32) -> f32 {
        x.min(self.upper).max(self.lower)
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.lower && x <= self.upper
    }
}

/// Clamp that follows the input's movement rather than its value.
///
/// Each call moves the output by the change in input since the previous
/// call, then clamps. Pushing past a bound and coming back therefore starts
/// moving away from the bound immediately.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffClamp {
    range: ClampRange,
    last_input: Option<f32>,
    output: f32,
}

impl DiffClamp {
    pub fn new(range: ClampRange) -> Self {
        Self {
            range,
            last_input: None,
            output: 0.0,
        }
    }

    pub fn apply(&mut self, x: f32) -> f32 {
        if !x.is_finite() {
            return self.output;
        }
        let delta = match self.last_input {
            Some(last) => x - last,
            None => x,
        };
        self.last_input = Some(x);
        self.output = self.range.apply(self.output + delta);
        self.output
    }

    pub fn range(&self) -> ClampRange {
        self.range
    }
}

/// Which clamp the sheet applies to the engine output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClampMode {
    Absolute(ClampRange),
    Differential(ClampRange),
    Unbounded,
}

/// Stateful form of [`ClampMode`] owned by a sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisplayClamp {
    Absolute(ClampRange),
    Differential(DiffClamp),
    Unbounded,
}

impl DisplayClamp {
    pub fn apply(&mut self, x: f32) -> f32 {
        match self {
            DisplayClamp::Absolute(range) => range.apply(x),
            DisplayClamp::Differential(diff) => diff.apply(x),
            DisplayClamp::Unbounded => x,
        }
    }
}

impl From<ClampMode> for DisplayClamp {
    fn from(mode: ClampMode) -> Self {
        match mode {
            ClampMode::Absolute(range) => DisplayClamp::Absolute(range),
            ClampMode::Differential(range) => DisplayClamp::Differential(DiffClamp::new(range)),
            ClampMode::Unbounded => DisplayClamp::Unbounded,
        }
    }
}
