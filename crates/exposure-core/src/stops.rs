// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Stop Tables and Quantizer
// ─────────────────────────────────────────────────────────────────────
//! Legal discrete values for each exposure parameter, in third stops,
//! and nearest-entry snapping.
//!
//! Tables are ascending. Marked values follow camera convention rather
//! than exact powers of two (1/6 s, 1/13 s, f/7.1).

use exposure_types::Parameter;

/// f-numbers, f/1.0 to f/22.
pub const APERTURE_STOPS: [f64; 28] = [
    1.0, 1.1, 1.2, 1.4, 1.6, 1.8, 2.0, 2.2, 2.5, 2.8, 3.2, 3.5, 4.0, 4.5, 5.0, 5.6, 6.3, 7.1,
    8.0, 9.0, 10.0, 11.0, 13.0, 14.0, 16.0, 18.0, 20.0, 22.0,
];

/// Exposure durations in seconds, 1/8000 s to 1 s.
pub const SHUTTER_STOPS: [f64; 40] = [
    1.0 / 8000.0,
    1.0 / 6400.0,
    1.0 / 5000.0,
    1.0 / 4000.0,
    1.0 / 3200.0,
    1.0 / 2500.0,
    1.0 / 2000.0,
    1.0 / 1600.0,
    1.0 / 1250.0,
    1.0 / 1000.0,
    1.0 / 800.0,
    1.0 / 640.0,
    1.0 / 500.0,
    1.0 / 400.0,
    1.0 / 320.0,
    1.0 / 250.0,
    1.0 / 200.0,
    1.0 / 160.0,
    1.0 / 125.0,
    1.0 / 100.0,
    1.0 / 80.0,
    1.0 / 60.0,
    1.0 / 50.0,
    1.0 / 40.0,
    1.0 / 30.0,
    1.0 / 25.0,
    1.0 / 20.0,
    1.0 / 15.0,
    1.0 / 13.0,
    1.0 / 10.0,
    1.0 / 8.0,
    1.0 / 6.0,
    1.0 / 5.0,
    0.25,
    0.3,
    0.4,
    0.5,
    0.6,
    0.8,
    1.0,
];

/// Sensitivities, ISO 64 to ISO 6400.
pub const ISO_STOPS: [f64; 21] = [
    64.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 320.0, 400.0, 500.0, 640.0, 800.0, 1000.0,
    1250.0, 1600.0, 2000.0, 2500.0, 3200.0, 4000.0, 5000.0, 6400.0,
];

/// Ascending table of legal values for one parameter. Never empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopTable {
    parameter: Parameter,
    values: &'static [f64],
}

pub static APERTURE_TABLE: StopTable = StopTable {
    parameter: Parameter::Aperture,
    values: &APERTURE_STOPS,
};

pub static SHUTTER_TABLE: StopTable = StopTable {
    parameter: Parameter::Shutter,
    values: &SHUTTER_STOPS,
};

pub static ISO_TABLE: StopTable = StopTable {
    parameter: Parameter::Iso,
    values: &ISO_STOPS,
};

/// Table for one parameter.
pub fn table_for(parameter: Parameter) -> &'static StopTable {
    match parameter {
        Parameter::Aperture => &APERTURE_TABLE,
        Parameter::Shutter => &SHUTTER_TABLE,
        Parameter::Iso => &ISO_TABLE,
    }
}

/// Snap `value` to the nearest entry of `table`.
pub fn quantize(value: f64, table: &StopTable) -> f64 {
    table.quantize(value)
}

impl StopTable {
    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    pub fn values(&self) -> &'static [f64] {
        self.values
    }

    pub fn min(&self) -> f64 {
        self.values[0]
    }

    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn contains(&self, value: f64) -> bool {
        self.values.iter().any(|&entry| entry == value)
    }

    /// Index of the entry with the smallest `|entry - value|`.
    ///
    /// Ties go to the lower entry: the scan is ascending and only a
    /// strictly smaller distance replaces the current best. NaN maps to
    /// the first entry.
    pub fn nearest_index(&self, value: f64) -> usize {
        let mut best = 0;
        let mut best_dist = (self.values[0] - value).abs();
        for (i, &entry) in self.values.iter().enumerate().skip(1) {
            let dist = (entry - value).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    pub fn quantize(&self, value: f64) -> f64 {
        self.values[self.nearest_index(value)]
    }

    /// Snap `value`, then move `delta` entries, saturating at the ends.
    pub fn step(&self, value: f64, delta: i32) -> f64 {
        let last = self.values.len() as i64 - 1;
        let idx = (self.nearest_index(value) as i64 + i64::from(delta)).clamp(0, last);
        self.values[idx as usize]
    }
}
