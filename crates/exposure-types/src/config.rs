// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{ExposureError, ExposureResult};
use crate::params::Parameter;
use crate::scene::SceneStrengths;

/// When the bias smoothing filter forgets its previous output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingReset {
    /// Reset only when the auto parameter changes (or bias is disabled).
    #[default]
    RoleChange,
    /// Additionally reset when the scene category changes.
    RoleOrSceneChange,
}

/// Runtime configuration for the exposure kernel.
///
/// Every field has a default, so a JSON document only needs to name the
/// fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureConfig {
    /// Smallest solved f-number before quantization.
    /// Default: 0.95.
    pub aperture_min: f64,

    /// Largest solved f-number before quantization.
    /// Default: 22.0.
    pub aperture_max: f64,

    /// Shortest solved exposure in seconds.
    /// Default: 1/8000.
    pub shutter_min: f64,

    /// Longest solved exposure in seconds.
    /// Default: 1.0.
    pub shutter_max: f64,

    /// Lowest solved sensitivity.
    /// Default: 64.
    pub iso_min: f64,

    /// Highest solved sensitivity.
    /// Default: 6400.
    pub iso_max: f64,

    /// Manual aperture at start-up, snapped to the aperture table.
    /// Default: 5.6.
    pub initial_aperture: f64,

    /// Manual shutter at start-up, snapped to the shutter table.
    /// Default: 1/125.
    pub initial_shutter: f64,

    /// Manual ISO at start-up, snapped to the ISO table.
    /// Default: 400.
    pub initial_iso: f64,

    /// Nominal bias strength per scene category, each in [0, 1].
    /// Default: portrait 0.55, group 0.55, animal 0.65, plant 0.50,
    /// landscape 0.55.
    pub scene_strength: SceneStrengths,

    /// Whether scene bias starts enabled.
    /// Default: true.
    pub bias_enabled: bool,

    /// Initial global bias gain in [0, 1].
    /// Default: 1.0.
    pub global_gain: f64,

    /// Apply the single-pole filter to the biased auto value.
    /// Default: true.
    pub smoothing_enabled: bool,

    /// Filter coefficient: `y = y_prev * (1 - alpha) + x * alpha`.
    /// Default: 0.35.
    pub smoothing_alpha: f64,

    /// Reset policy for the filter state.
    /// Default: `RoleChange`.
    pub smoothing_reset: SmoothingReset,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            aperture_min: 0.95,
            aperture_max: 22.0,
            shutter_min: 1.0 / 8000.0,
            shutter_max: 1.0,
            iso_min: 64.0,
            iso_max: 6400.0,
            initial_aperture: 5.6,
            initial_shutter: 1.0 / 125.0,
            initial_iso: 400.0,
            scene_strength: SceneStrengths::default(),
            bias_enabled: true,
            global_gain: 1.0,
            smoothing_enabled: true,
            smoothing_alpha: 0.35,
            smoothing_reset: SmoothingReset::RoleChange,
        }
    }
}

impl ExposureConfig {
    /// Operating envelope `(min, max)` for one parameter.
    ///
    /// Solved values are clamped to this range and then snapped to the
    /// stop table, so the table wins: a bound that falls between two
    /// entries can be overshot by the nearest entry (`iso_max = 3000`
    /// yields ISO 3200 at the top end).
    pub fn envelope(&self, parameter: Parameter) -> (f64, f64) {
        match parameter {
            Parameter::Aperture => (self.aperture_min, self.aperture_max),
            Parameter::Shutter => (self.shutter_min, self.shutter_max),
            Parameter::Iso => (self.iso_min, self.iso_max),
        }
    }

    /// Starting manual value for one parameter.
    pub fn initial(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Aperture => self.initial_aperture,
            Parameter::Shutter => self.initial_shutter,
            Parameter::Iso => self.initial_iso,
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> ExposureResult<()> {
        for parameter in Parameter::ALL {
            let (lo, hi) = self.envelope(parameter);
            if !(lo.is_finite() && hi.is_finite()) || lo <= 0.0 || lo >= hi {
                return Err(ExposureError::Config(format!(
                    "{parameter} envelope must satisfy 0 < min < max, got [{lo}, {hi}]"
                )));
            }
            let initial = self.initial(parameter);
            if !initial.is_finite() || initial <= 0.0 {
                return Err(ExposureError::Config(format!(
                    "initial {parameter} must be > 0, got {initial}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.global_gain) {
            return Err(ExposureError::Config(format!(
                "global_gain must be in [0, 1], got {}",
                self.global_gain
            )));
        }
        for (kind, strength) in self.scene_strength.entries() {
            if !(0.0..=1.0).contains(&strength) {
                return Err(ExposureError::Config(format!(
                    "{} strength must be in [0, 1], got {strength}",
                    kind.label()
                )));
            }
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ExposureError::Config(format!(
                "smoothing_alpha must be in (0, 1], got {}",
                self.smoothing_alpha
            )));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> ExposureResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ExposureError::Config(format!("JSON parse error: {e}")))
    }
}
