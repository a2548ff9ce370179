// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Shared Controller
// ─────────────────────────────────────────────────────────────────────
//! Thread-safe handle for hosts whose meter, UI and capture events
//! arrive on different threads.
//!
//! Every call takes the lock once, so a solve always sees one
//! consistent `{reading, lock, compensation, bias}` view and the
//! smoothing cache has a single writer at a time.

use std::sync::Arc;

use parking_lot::Mutex;

use exposure_types::{Compensation, MeteredReading, Parameter, SceneKind, SceneReading};

use crate::capture::CaptureSnapshot;
use crate::lock::{LockSet, LockTransition};
use crate::pipeline::{ExposureController, ExposureReadout, PipelineInputs};
use crate::scene::SceneSource;

/// Cloneable, lock-guarded [`ExposureController`].
#[derive(Clone)]
pub struct SharedExposureController {
    inner: Arc<Mutex<ExposureController>>,
}

impl SharedExposureController {
    pub fn new(controller: ExposureController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with<R>(&self, f: impl FnOnce(&mut ExposureController) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    pub fn compute(&self, reading: &MeteredReading) -> ExposureReadout {
        self.inner.lock().compute(reading)
    }

    pub fn refresh(&self, reading: &MeteredReading, source: &dyn SceneSource) -> ExposureReadout {
        self.inner.lock().refresh(reading, source)
    }

    pub fn capture(&self, reading: &MeteredReading) -> CaptureSnapshot {
        self.inner.lock().capture(reading)
    }

    /// Copy-on-read view of the current state paired with `reading`.
    pub fn inputs(&self, reading: &MeteredReading) -> PipelineInputs {
        self.inner.lock().inputs(reading)
    }

    pub fn lock_set(&self) -> LockSet {
        self.inner.lock().lock()
    }

    pub fn toggle_lock(&self, parameter: Parameter) -> LockTransition {
        self.inner.lock().toggle_lock(parameter)
    }

    pub fn select_lock(&self, lock: LockSet) {
        self.inner.lock().select_lock(lock);
    }

    pub fn step(&self, parameter: Parameter, delta: i32) -> bool {
        self.inner.lock().step(parameter, delta)
    }

    pub fn set_compensation(&self, stops: f64) -> Compensation {
        self.inner.lock().set_compensation(stops)
    }

    pub fn set_bias_enabled(&self, enabled: bool) {
        self.inner.lock().set_bias_enabled(enabled);
    }

    pub fn set_global_gain(&self, gain: f64) {
        self.inner.lock().set_global_gain(gain);
    }

    pub fn set_scene_strength(&self, kind: SceneKind, strength: f64) {
        self.inner.lock().set_scene_strength(kind, strength);
    }

    pub fn update_scene(&self, scene: Option<SceneReading>) {
        self.inner.lock().update_scene(scene);
    }
}
