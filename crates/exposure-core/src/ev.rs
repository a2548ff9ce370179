// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — EV Resolver
// ─────────────────────────────────────────────────────────────────────
//! Exposure-value arithmetic.
//!
//! `EV100 = log2(N² / t) − log2(S / 100)` is the scene light value as if
//! metered at ISO 100. The target EV re-expresses it for a chosen ISO
//! and adds compensation.

use exposure_types::{sanitize_positive, MeteredReading, Parameter};

/// Sensitivity that reference-normalized EV is expressed at.
pub const REFERENCE_ISO: f64 = 100.0;

/// Scene EV normalized to ISO 100.
///
/// Inputs are sanitized to a small positive epsilon first, so the
/// result is always finite.
pub fn ev_at_ref(aperture: f64, shutter_seconds: f64, iso: f64) -> f64 {
    let n = sanitize_positive(aperture, Parameter::Aperture);
    let t = sanitize_positive(shutter_seconds, Parameter::Shutter);
    let s = sanitize_positive(iso, Parameter::Iso);
    ((n * n) / t).log2() - (s / REFERENCE_ISO).log2()
}

/// [`ev_at_ref`] for a whole meter sample.
pub fn reading_ev(reading: &MeteredReading) -> f64 {
    ev_at_ref(reading.aperture, reading.shutter_seconds, reading.iso)
}

/// EV the aperture/shutter pair must deliver at `target_iso`.
pub fn target_ev(ev_ref: f64, target_iso: f64, compensation: f64) -> f64 {
    let s = sanitize_positive(target_iso, Parameter::Iso);
    ev_ref + (s / REFERENCE_ISO).log2() + compensation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ev_reference_point() {
        // f/1, 1 s, ISO 100 is EV 0 by definition.
        assert!(ev_at_ref(1.0, 1.0, 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_sunny_sixteen() {
        // f/16, 1/125 s, ISO 100 ≈ EV 15.
        let ev = ev_at_ref(16.0, 1.0 / 125.0, 100.0);
        assert!((ev - 14.966).abs() < 1e-3, "ev = {ev}");
    }

    #[test]
    fn test_iso_normalization() {
        // Doubling ISO at the same exposure means one stop less light.
        let a = ev_at_ref(2.8, 1.0 / 60.0, 100.0);
        let b = ev_at_ref(2.8, 1.0 / 60.0, 200.0);
        assert!((a - b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_positive_inputs_stay_finite() {
        assert!(ev_at_ref(0.0, 0.0, 0.0).is_finite());
        assert!(ev_at_ref(-2.0, f64::NAN, f64::INFINITY).is_finite());
        assert!(target_ev(10.0, 0.0, 0.0).is_finite());
    }

    #[test]
    fn test_target_ev_scenario() {
        // ev_ref 10 at ISO 400 with no compensation is EV 12.
        assert!((target_ev(10.0, 400.0, 0.0) - 12.0).abs() < 1e-12);
        assert!((target_ev(10.0, 100.0, -1.0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_reading_ev_matches() {
        let r = MeteredReading::new(4.0, 1.0 / 250.0, 200.0);
        assert_eq!(reading_ev(&r), ev_at_ref(4.0, 1.0 / 250.0, 200.0));
    }
}
