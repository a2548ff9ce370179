// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Overlay Text
// ─────────────────────────────────────────────────────────────────────
//! Text burned into captured frames and shown in the meter readout.

use exposure_types::{Compensation, ExposureParams, MeteredReading};

/// `1/125` below one second, `2.5s` below ten, `15s` above.
pub fn format_shutter(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("1/{}", (1.0 / seconds).round() as i64)
    } else if seconds < 10.0 {
        format!("{seconds:.1}s")
    } else {
        format!("{}s", seconds.round() as i64)
    }
}

/// `f/5.6`
pub fn format_aperture(f_number: f64) -> String {
    format!("f/{f_number:.1}")
}

/// `+0.3EV`, `-1.0EV`, `+0.0EV`
pub fn format_compensation(compensation: Compensation) -> String {
    let stops = compensation.stops();
    let sign = if stops >= 0.0 { "+" } else { "-" };
    format!("{sign}{:.1}EV", stops.abs())
}

/// Single-line summary: `ISO 400 • f/5.6 • 1/125 • +0.0EV`.
pub fn overlay_line(params: &ExposureParams, compensation: Compensation) -> String {
    format!(
        "ISO {} • {} • {} • {}",
        params.iso.round() as i64,
        format_aperture(params.aperture),
        format_shutter(params.shutter_seconds),
        format_compensation(compensation)
    )
}

/// Meter diagnostics: `EV100=10.00  (f=2.8, t≈1/60, ISO≈200)`.
pub fn meter_line(reading: &MeteredReading, ev_ref: f64) -> String {
    format!(
        "EV100={ev_ref:.2}  (f={:.1}, t≈{}, ISO≈{:.0})",
        reading.aperture,
        format_shutter(reading.shutter_seconds),
        reading.iso
    )
}
