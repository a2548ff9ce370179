// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Exposure Parameter Types
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ExposureError, ExposureResult};

/// Smallest value a physical quantity is allowed to take before `log2`.
pub const MIN_POSITIVE: f64 = 1e-6;

/// Largest value a physical quantity is allowed to take. Keeps `N²`
/// and `2^ev` finite.
pub const MAX_PHYSICAL: f64 = 1e9;

/// Compensation limit in thirds of a stop (±2 EV).
pub const MAX_COMPENSATION_THIRDS: i8 = 6;

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to nearest bound.
#[inline]
pub fn clamp_range(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.clamp(lo, hi)
}

/// Force a physical quantity into `[MIN_POSITIVE, MAX_PHYSICAL]`.
///
/// Non-finite and non-positive values are reported once per call via
/// `log::warn!`; tiny positive values are raised silently.
#[inline]
pub fn sanitize_positive(value: f64, parameter: Parameter) -> f64 {
    if value.is_nan() || value <= 0.0 {
        log::warn!("sanitize_positive: {parameter} = {value}, clamping to {MIN_POSITIVE:e}");
        return MIN_POSITIVE;
    }
    if value.is_infinite() || value > MAX_PHYSICAL {
        log::warn!("sanitize_positive: {parameter} = {value}, clamping to {MAX_PHYSICAL:e}");
        return MAX_PHYSICAL;
    }
    value.max(MIN_POSITIVE)
}

/// One side of the exposure triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    Aperture,
    Shutter,
    Iso,
}

impl Parameter {
    pub const ALL: [Parameter; 3] = [Parameter::Aperture, Parameter::Shutter, Parameter::Iso];

    pub fn name(self) -> &'static str {
        match self {
            Parameter::Aperture => "aperture",
            Parameter::Shutter => "shutter",
            Parameter::Iso => "iso",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Light-meter sample delivered by the host once per meter tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeteredReading {
    /// f-number the meter measured at.
    pub aperture: f64,
    /// Exposure duration in seconds.
    pub shutter_seconds: f64,
    /// Sensor gain.
    pub iso: f64,
}

impl MeteredReading {
    pub fn new(aperture: f64, shutter_seconds: f64, iso: f64) -> Self {
        Self {
            aperture,
            shutter_seconds,
            iso,
        }
    }

    /// Check the meter contract (every quantity positive and finite).
    ///
    /// The pipeline does not require this; it sanitises instead. Hosts
    /// that want to drop bad samples upstream can call it.
    pub fn validate(&self) -> ExposureResult<()> {
        for parameter in Parameter::ALL {
            let value = self.get(parameter);
            if !value.is_finite() || value <= 0.0 {
                return Err(ExposureError::Domain { parameter, value });
            }
        }
        Ok(())
    }

    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Aperture => self.aperture,
            Parameter::Shutter => self.shutter_seconds,
            Parameter::Iso => self.iso,
        }
    }

    /// Copy with every quantity forced into the positive finite domain.
    pub fn sanitized(&self) -> Self {
        Self {
            aperture: sanitize_positive(self.aperture, Parameter::Aperture),
            shutter_seconds: sanitize_positive(self.shutter_seconds, Parameter::Shutter),
            iso: sanitize_positive(self.iso, Parameter::Iso),
        }
    }
}

/// A complete exposure triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureParams {
    pub aperture: f64,
    pub shutter_seconds: f64,
    pub iso: f64,
}

impl ExposureParams {
    pub fn new(aperture: f64, shutter_seconds: f64, iso: f64) -> Self {
        Self {
            aperture,
            shutter_seconds,
            iso,
        }
    }

    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Aperture => self.aperture,
            Parameter::Shutter => self.shutter_seconds,
            Parameter::Iso => self.iso,
        }
    }

    pub fn set(&mut self, parameter: Parameter, value: f64) {
        match parameter {
            Parameter::Aperture => self.aperture = value,
            Parameter::Shutter => self.shutter_seconds = value,
            Parameter::Iso => self.iso = value,
        }
    }

    pub fn with(mut self, parameter: Parameter, value: f64) -> Self {
        self.set(parameter, value);
        self
    }
}

/// Exposure compensation, stored as a whole number of third stops in
/// `[-6, 6]` so it is exact and always on the 1/3-stop grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Compensation {
    thirds: i8,
}

impl Compensation {
    pub const ZERO: Compensation = Compensation { thirds: 0 };

    /// Nearest third stop to `stops`, saturated at ±2 EV.
    pub fn from_stops(stops: f64) -> Self {
        if !stops.is_finite() {
            log::warn!("Compensation::from_stops: non-finite value {stops}, using 0");
            return Self::ZERO;
        }
        let max = f64::from(MAX_COMPENSATION_THIRDS);
        Self {
            thirds: (stops * 3.0).round().clamp(-max, max) as i8,
        }
    }

    pub fn from_thirds(thirds: i32) -> Self {
        let max = i32::from(MAX_COMPENSATION_THIRDS);
        Self {
            thirds: thirds.clamp(-max, max) as i8,
        }
    }

    pub fn thirds(self) -> i8 {
        self.thirds
    }

    pub fn stops(self) -> f64 {
        f64::from(self.thirds) / 3.0
    }

    /// Move by `delta` third stops, saturating at the bounds.
    pub fn step(self, delta: i32) -> Self {
        Self::from_thirds(i32::from(self.thirds).saturating_add(delta))
    }
}

/// Runtime weighting applied on top of a scene's nominal bias strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasContext {
    /// Classifier confidence for the active scene, in [0, 1].
    pub confidence: f64,
    /// User-level master gain for all scene bias, in [0, 1].
    pub global_gain: f64,
}

impl BiasContext {
    pub fn new(confidence: f64, global_gain: f64) -> Self {
        Self {
            confidence: clamp_range(confidence, 0.0, 1.0),
            global_gain: clamp_range(global_gain, 0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_range_nan() {
        assert_eq!(clamp_range(f64::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_clamp_range_inf() {
        assert_eq!(clamp_range(f64::INFINITY, 0.0, 1.0), 1.0);
        assert_eq!(clamp_range(f64::NEG_INFINITY, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_sanitize_positive() {
        assert_eq!(sanitize_positive(0.0, Parameter::Iso), MIN_POSITIVE);
        assert_eq!(sanitize_positive(-3.0, Parameter::Iso), MIN_POSITIVE);
        assert_eq!(sanitize_positive(f64::NAN, Parameter::Iso), MIN_POSITIVE);
        assert_eq!(sanitize_positive(f64::INFINITY, Parameter::Iso), MAX_PHYSICAL);
        assert_eq!(sanitize_positive(2.8, Parameter::Aperture), 2.8);
    }

    #[test]
    fn test_reading_validate() {
        assert!(MeteredReading::new(2.8, 0.01, 100.0).validate().is_ok());
        let err = MeteredReading::new(2.8, 0.0, 100.0).validate().unwrap_err();
        assert_eq!(
            err,
            ExposureError::Domain {
                parameter: Parameter::Shutter,
                value: 0.0
            }
        );
    }

    #[test]
    fn test_reading_sanitized_is_finite() {
        let r = MeteredReading::new(f64::NAN, -1.0, f64::INFINITY).sanitized();
        assert!(r.aperture > 0.0 && r.shutter_seconds > 0.0 && r.iso.is_finite());
    }

    #[test]
    fn test_params_get_set() {
        let p = ExposureParams::new(2.8, 0.008, 400.0).with(Parameter::Iso, 800.0);
        assert_eq!(p.get(Parameter::Iso), 800.0);
        assert_eq!(p.get(Parameter::Aperture), 2.8);
        assert_eq!(p.get(Parameter::Shutter), 0.008);
    }

    #[test]
    fn test_compensation_quantizes_to_thirds() {
        assert_eq!(Compensation::from_stops(0.3).thirds(), 1);
        assert_eq!(Compensation::from_stops(-0.7).thirds(), -2);
        assert!((Compensation::from_stops(1.0).stops() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_compensation_saturates() {
        assert_eq!(Compensation::from_stops(5.0).thirds(), 6);
        assert_eq!(Compensation::from_stops(-5.0).thirds(), -6);
        assert_eq!(Compensation::from_thirds(6).step(1).thirds(), 6);
        assert_eq!(Compensation::from_thirds(-6).step(-4).thirds(), -6);
    }

    #[test]
    fn test_compensation_step_extreme_delta() {
        assert_eq!(Compensation::from_thirds(1).step(i32::MAX).thirds(), 6);
        assert_eq!(Compensation::from_thirds(-1).step(i32::MIN).thirds(), -6);
        assert_eq!(Compensation::from_stops(f64::NAN), Compensation::ZERO);
    }

    #[test]
    fn test_bias_context_clamps() {
        let ctx = BiasContext::new(1.4, f64::NAN);
        assert_eq!(ctx.confidence, 1.0);
        assert_eq!(ctx.global_gain, 0.0);
    }
}
