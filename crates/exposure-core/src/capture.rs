// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Capture-Time Freezer
// ─────────────────────────────────────────────────────────────────────
//! Immutable record of the settings used for one capture.
//!
//! The snapshot is taken before any hardware work starts. It owns
//! copies of everything it reports, so later meter ticks, lock toggles
//! or scene updates cannot change it.

use serde::{Deserialize, Serialize};

use exposure_types::{
    Compensation, ExposureConfig, ExposureError, ExposureParams, ExposureResult, Parameter,
    SceneReading,
};

use crate::bias::SmoothingCache;
use crate::lock::LockSet;
use crate::overlay::overlay_line;
use crate::pipeline::{evaluate, PipelineInputs};

/// Settings and overlay text frozen at the instant of capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSnapshot {
    params: ExposureParams,
    compensation: Compensation,
    lock: LockSet,
    ev_ref: f64,
    biased: bool,
    scene: Option<SceneReading>,
    overlay: String,
}

impl CaptureSnapshot {
    /// Evaluate the pipeline once for `inputs` and freeze the result.
    ///
    /// `cache` is read, never advanced: the evaluation runs on a copy.
    pub fn freeze(
        inputs: &PipelineInputs,
        config: &ExposureConfig,
        cache: &SmoothingCache,
    ) -> Self {
        let mut scratch = cache.clone();
        let readout = evaluate(inputs, config, &mut scratch);
        let snapshot = Self {
            params: readout.params,
            compensation: inputs.compensation,
            lock: readout.lock,
            ev_ref: readout.ev_ref,
            biased: readout.biased,
            scene: inputs.scene,
            overlay: overlay_line(&readout.params, inputs.compensation),
        };
        log::info!("capture frozen: {}", snapshot.overlay);
        snapshot
    }

    pub fn params(&self) -> ExposureParams {
        self.params
    }

    pub fn compensation(&self) -> Compensation {
        self.compensation
    }

    pub fn lock(&self) -> LockSet {
        self.lock
    }

    /// The parameter that was auto when the capture was taken.
    pub fn auto_parameter(&self) -> Parameter {
        self.lock.free()
    }

    pub fn ev_ref(&self) -> f64 {
        self.ev_ref
    }

    pub fn biased(&self) -> bool {
        self.biased
    }

    /// Scene classification active at capture, if any.
    pub fn scene(&self) -> Option<SceneReading> {
        self.scene
    }

    /// Text to burn into the frame.
    pub fn overlay(&self) -> &str {
        &self.overlay
    }

    /// Encode as JSON capture metadata.
    pub fn to_json(&self) -> ExposureResult<String> {
        serde_json::to_string(self).map_err(|e| ExposureError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> ExposureResult<Self> {
        serde_json::from_str(json).map_err(|e| ExposureError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use exposure_types::{MeteredReading, SceneKind};

    use super::*;
    use crate::pipeline::ExposureController;
    use crate::stops::{APERTURE_TABLE, ISO_TABLE, SHUTTER_TABLE};

    fn reading_at(ev: f64) -> MeteredReading {
        MeteredReading::new(1.0, (-ev).exp2(), 100.0)
    }

    #[test]
    fn test_capture_matches_live_pipeline() {
        let mut c = ExposureController::new(ExposureConfig::default()).unwrap();
        c.set_bias_enabled(false);
        let live = c.compute(&reading_at(10.0));
        let snap = c.capture(&reading_at(10.0));
        assert_eq!(snap.params(), live.params);
        assert_eq!(snap.overlay(), "ISO 400 • f/5.6 • 1/125 • +0.0EV");
        assert_eq!(snap.auto_parameter(), Parameter::Shutter);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_updates() {
        let mut c = ExposureController::new(ExposureConfig::default()).unwrap();
        c.update_scene(Some(SceneReading::new(SceneKind::Landscape, 0.8)));
        let snap = c.capture(&reading_at(11.0));
        let frozen = snap.clone();

        c.toggle_lock(Parameter::Shutter);
        c.step_compensation(3);
        c.update_scene(None);
        for ev in [2.0, 6.0, 14.0] {
            c.compute(&reading_at(ev));
        }
        assert_eq!(snap, frozen);
        assert_eq!(snap.compensation(), Compensation::ZERO);
        assert_eq!(snap.lock(), LockSet::IsoAperture);
        assert_eq!(snap.scene().map(|s| s.kind), Some(SceneKind::Landscape));
    }

    #[test]
    fn test_snapshot_values_on_tables() {
        let mut c = ExposureController::new(ExposureConfig::default()).unwrap();
        c.update_scene(Some(SceneReading::new(SceneKind::Portrait, 0.95)));
        c.set_compensation(-0.7);
        let snap = c.capture(&reading_at(13.7));
        let p = snap.params();
        assert!(APERTURE_TABLE.contains(p.aperture));
        assert!(SHUTTER_TABLE.contains(p.shutter_seconds));
        assert!(ISO_TABLE.contains(p.iso));
        assert!(snap.overlay().ends_with("-0.7EV"));
    }

    #[test]
    fn test_json_metadata() {
        let c = ExposureController::new(ExposureConfig::default()).unwrap();
        let snap = c.capture(&reading_at(9.0));
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"overlay\""));
        let back = CaptureSnapshot::from_json(&json).unwrap();
        assert_eq!(back.overlay(), snap.overlay());
        assert_eq!(back.lock(), snap.lock());
    }

    #[test]
    fn test_json_malformed() {
        assert!(matches!(
            CaptureSnapshot::from_json("[]"),
            Err(ExposureError::Serialization(_))
        ));
    }
}
