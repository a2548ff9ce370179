// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Types
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Data model, configuration, and error hierarchy for the exposure
//! kernel: the metered reading, the exposure triple, compensation,
//! scene classification results, and the bias weighting context.

pub mod config;
pub mod error;
pub mod params;
pub mod scene;

pub use config::{ExposureConfig, SmoothingReset};
pub use error::{ExposureError, ExposureResult};
pub use params::{
    clamp_range, sanitize_positive, BiasContext, Compensation, ExposureParams, MeteredReading,
    Parameter,
};
pub use scene::{SceneKind, SceneReading, SceneStrengths};
