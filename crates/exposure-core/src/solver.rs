// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Triangle Solver
// ─────────────────────────────────────────────────────────────────────
//! Solve the auto parameter from the two manual ones.
//!
//! | locked            | solved   | formula                                    |
//! |-------------------|----------|--------------------------------------------|
//! | {Iso, Aperture}   | shutter  | `N² / 2^target_ev`                         |
//! | {Iso, Shutter}    | aperture | `sqrt(t · 2^target_ev)`                    |
//! | {Aperture, Shutter} | iso    | `100 · 2^(log2(N²/t) − (ev_ref + comp))`   |
//!
//! The ISO branch uses `ev_ref + comp` directly: ISO is the unknown, so
//! there is no ISO to parameterize the target EV with.

use exposure_types::{
    clamp_range, sanitize_positive, ExposureConfig, ExposureParams, Parameter,
};

use crate::ev::{target_ev, REFERENCE_ISO};
use crate::lock::LockSet;

/// Shutter seconds that deliver `target_ev` at `aperture`.
pub fn solve_shutter(aperture: f64, target_ev: f64) -> f64 {
    (aperture * aperture) / target_ev.exp2()
}

/// f-number that delivers `target_ev` at `shutter_seconds`.
pub fn solve_aperture(shutter_seconds: f64, target_ev: f64) -> f64 {
    (shutter_seconds * target_ev.exp2()).sqrt()
}

/// ISO that makes `aperture`/`shutter_seconds` match `ev_ref + compensation`.
pub fn solve_iso(aperture: f64, shutter_seconds: f64, ev_ref: f64, compensation: f64) -> f64 {
    let ev_pair = ((aperture * aperture) / shutter_seconds).log2();
    REFERENCE_ISO * (ev_pair - (ev_ref + compensation)).exp2()
}

/// Unclamped, unquantized solver output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// The parameter that was solved.
    pub free: Parameter,
    /// EV the solve targeted (`ev_ref + comp` for the ISO branch).
    pub target_ev: f64,
    /// Manual values with the free slot replaced by the raw solution.
    pub params: ExposureParams,
}

impl Solution {
    pub fn raw(&self) -> f64 {
        self.params.get(self.free)
    }
}

/// Solve the free parameter of `lock` from the manual values in `manual`.
///
/// Only the two locked slots of `manual` are read.
pub fn solve(lock: LockSet, manual: &ExposureParams, ev_ref: f64, compensation: f64) -> Solution {
    let aperture = sanitize_positive(manual.aperture, Parameter::Aperture);
    let shutter = sanitize_positive(manual.shutter_seconds, Parameter::Shutter);
    let iso = sanitize_positive(manual.iso, Parameter::Iso);

    let free = lock.free();
    let (target, value) = match free {
        Parameter::Shutter => {
            let target = target_ev(ev_ref, iso, compensation);
            (target, solve_shutter(aperture, target))
        }
        Parameter::Aperture => {
            let target = target_ev(ev_ref, iso, compensation);
            (target, solve_aperture(shutter, target))
        }
        Parameter::Iso => {
            let target = ev_ref + compensation;
            (target, solve_iso(aperture, shutter, ev_ref, compensation))
        }
    };

    Solution {
        free,
        target_ev: target,
        params: ExposureParams::new(aperture, shutter, iso).with(free, value),
    }
}

/// Clamp a solved value into the operating envelope of `parameter`.
///
/// Out-of-envelope results are a usability policy, not an error.
pub fn clamp_to_envelope(value: f64, parameter: Parameter, config: &ExposureConfig) -> f64 {
    let (lo, hi) = config.envelope(parameter);
    clamp_range(value, lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ev::ev_at_ref;

    #[test]
    fn test_shutter_solve_f56_iso400_at_ev10() {
        // Aperture 5.6 and ISO 400 locked, ev_ref 10, no compensation.
        let manual = ExposureParams::new(5.6, 1.0, 400.0);
        let sol = solve(LockSet::IsoAperture, &manual, 10.0, 0.0);
        assert_eq!(sol.free, Parameter::Shutter);
        assert!((sol.target_ev - 12.0).abs() < 1e-12);
        assert!((sol.raw() - 5.6 * 5.6 / 4096.0).abs() < 1e-15);
        assert!((sol.raw() - 0.00766).abs() < 1e-5);
    }

    #[test]
    fn test_iso_solve_with_plus_one_comp() {
        // Aperture 2.8 and shutter 1/500 locked, ev_ref 9, +1 compensation.
        let manual = ExposureParams::new(2.8, 1.0 / 500.0, 100.0);
        let sol = solve(LockSet::ApertureShutter, &manual, 9.0, 1.0);
        assert_eq!(sol.free, Parameter::Iso);
        assert!((sol.raw() - 382.8).abs() < 0.1, "iso = {}", sol.raw());
    }

    #[test]
    fn test_aperture_solve() {
        // 1/125 s at EV 12: N = sqrt(4096 / 125).
        let manual = ExposureParams::new(1.0, 1.0 / 125.0, 400.0);
        let sol = solve(LockSet::IsoShutter, &manual, 10.0, 0.0);
        assert_eq!(sol.free, Parameter::Aperture);
        assert!((sol.raw() - (4096.0f64 / 125.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_locked_values_untouched() {
        let manual = ExposureParams::new(5.6, 1.0 / 60.0, 800.0);
        let sol = solve(LockSet::IsoAperture, &manual, 8.0, 0.0);
        assert_eq!(sol.params.aperture, 5.6);
        assert_eq!(sol.params.iso, 800.0);
    }

    #[test]
    fn test_round_trip_each_branch() {
        let manual = ExposureParams::new(4.0, 1.0 / 250.0, 320.0);
        for lock in LockSet::ALL {
            let sol = solve(lock, &manual, 11.3, -0.6667);
            let p = sol.params;
            let ev_ref = ev_at_ref(p.aperture, p.shutter_seconds, p.iso);
            let recomputed = if lock.free() == Parameter::Iso {
                ev_ref
            } else {
                target_ev(ev_ref, p.iso, 0.0)
            };
            assert!(
                (recomputed - sol.target_ev).abs() < 1e-9,
                "{lock:?}: {recomputed} vs {}",
                sol.target_ev
            );
        }
    }

    #[test]
    fn test_compensation_brightens() {
        // More compensation means a longer shutter.
        let manual = ExposureParams::new(5.6, 1.0, 400.0);
        let base = solve(LockSet::IsoAperture, &manual, 10.0, 0.0).raw();
        let plus = solve(LockSet::IsoAperture, &manual, 10.0, 1.0).raw();
        assert!(plus < base);
    }

    #[test]
    fn test_extreme_ev_stays_clampable() {
        let config = ExposureConfig::default();
        let manual = ExposureParams::new(5.6, 1.0 / 125.0, 400.0);
        for ev in [-4000.0, 4000.0] {
            for lock in LockSet::ALL {
                let sol = solve(lock, &manual, ev, 0.0);
                let clamped = clamp_to_envelope(sol.raw(), sol.free, &config);
                let (lo, hi) = config.envelope(sol.free);
                assert!((lo..=hi).contains(&clamped), "{lock:?} ev={ev}: {clamped}");
            }
        }
    }

    #[test]
    fn test_clamp_to_envelope() {
        let config = ExposureConfig::default();
        assert_eq!(clamp_to_envelope(0.5, Parameter::Aperture, &config), 0.95);
        assert_eq!(clamp_to_envelope(30.0, Parameter::Shutter, &config), 1.0);
        assert_eq!(clamp_to_envelope(12.0, Parameter::Iso, &config), 64.0);
        assert_eq!(clamp_to_envelope(f64::NAN, Parameter::Iso, &config), 64.0);
        assert_eq!(clamp_to_envelope(800.0, Parameter::Iso, &config), 800.0);
    }
}
