//! Configuration error types.
//!
//! Running gauges never fail; malformed runtime state degrades silently.
//! These errors only surface when a gauge is described declaratively and the
//! description is rejected before it is applied.

/// Errors raised while reading or validating a gauge description.
#[derive(Debug, thiserror::Error)]
pub enum GaugeError {
    /// Screen positions follow the numeric keypad layout, 1 to 9.
    #[error("invalid grid position {0}, expected 1..=9")]
    InvalidGridPosition(u8),

    /// A percentage field was outside 0..=100.
    #[error("{field} must be a percentage in 0..=100, got {value}")]
    PercentOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: u32,
    },

    /// A success range with its bounds reversed.
    #[error("success range minimum {min} is greater than maximum {max}")]
    ReversedRange {
        /// Lower bound given.
        min: u32,
        /// Upper bound given.
        max: u32,
    },

    /// A gauge description without an identifier.
    #[error("gauge identifier must not be empty")]
    EmptyIdentifier,

    /// The description was not valid JSON for a gauge.
    #[error("failed to parse gauge description: {0}")]
    Parse(#[from] serde_json::Error),
}
