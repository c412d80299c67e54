//! Configuration errors raised when a physics model is constructed.

/// A physics or clamp configuration that cannot drive a sheet.
///
/// Raised eagerly at construction; nothing in the per-frame path returns it.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidConfiguration {
    /// A coefficient is NaN or infinite.
    NonFinite { field: &'static str, value: f32 },
    /// A coefficient is finite but outside the range the model accepts.
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
    /// A spring needs at least one snap point to converge to.
    EmptySnapPoints,
    /// A snap point is NaN or infinite.
    NonFiniteSnapPoint { index: usize, value: f32 },
    /// A lower bound sits above its upper bound.
    InvertedRange { lower: f32, upper: f32 },
}

impl std::fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfiguration::NonFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            InvalidConfiguration::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "{field} must be {expected}, got {value}"),
            InvalidConfiguration::EmptySnapPoints => {
                write!(f, "snap points must not be empty")
            }
            InvalidConfiguration::NonFiniteSnapPoint { index, value } => {
                write!(f, "snap point #{index} must be finite, got {value}")
            }
            InvalidConfiguration::InvertedRange { lower, upper } => {
                write!(f, "lower bound {lower} is above upper bound {upper}")
            }
        }
    }
}

impl std::error::Error for InvalidConfiguration {}

/// Reject NaN and infinities for a named coefficient.
pub(crate) fn require_finite(field: &'static str, value: f32) -> Result<(), InvalidConfiguration> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidConfiguration::NonFinite { field, value })
    }
}

pub(crate) fn require_positive(
    field: &'static str,
    value: f32,
) -> Result<(), InvalidConfiguration> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(InvalidConfiguration::OutOfRange {
            field,
            value,
            expected: "greater than zero",
        })
    }
}

pub(crate) fn require_non_negative(
    field: &'static str,
    value: f32,
) -> Result<(), InvalidConfiguration> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidConfiguration::OutOfRange {
            field,
            value,
            expected: "zero or greater",
        })
    }
}
