// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

use crate::params::Parameter;

/// Root error type for the exposure kernel.
///
/// The live pipeline never returns these: abnormal numeric input is
/// sanitised, out-of-envelope results are clamped, and an invalid lock
/// state cannot be constructed. Errors only surface from configuration
/// loading, capture metadata encoding, and the explicit reading check
/// offered to hosts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExposureError {
    /// Invalid configuration (range, gain, filter coefficient, JSON).
    #[error("config error: {0}")]
    Config(String),

    /// A physical quantity is non-positive or non-finite.
    #[error("domain error: {parameter} must be positive and finite, got {value}")]
    Domain { parameter: Parameter, value: f64 },

    /// Capture metadata could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type ExposureResult<T> = Result<T, ExposureError>;
