// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Exposure Pipeline
// ─────────────────────────────────────────────────────────────────────
//! Per-tick exposure computation and the host-owned controller state.
//!
//! One evaluation runs:
//!
//! ```text
//! reading → EV100 → solve(lock) → clamp → quantize
//!         → scene bias (auto aperture/shutter only) → filter → quantize
//! ```
//!
//! The host pulls a fresh [`ExposureReadout`] by calling
//! [`ExposureController::compute`] from its refresh loop. Nothing is
//! pushed, and no state lives outside the controller.

use exposure_types::{
    clamp_range, sanitize_positive, BiasContext, Compensation, ExposureConfig, ExposureParams,
    ExposureResult, MeteredReading, Parameter, SceneKind, SceneReading, SceneStrengths,
};

use crate::bias::{blend, blend_weight, SceneBias, SmoothingCache};
use crate::capture::CaptureSnapshot;
use crate::ev::reading_ev;
use crate::lock::{LockSet, LockTransition};
use crate::scene::SceneSource;
use crate::solver::{clamp_to_envelope, solve};
use crate::stops::table_for;

/// Everything one evaluation reads, captured at a single instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineInputs {
    pub reading: MeteredReading,
    pub lock: LockSet,
    pub compensation: Compensation,
    /// Manual values; only the two locked slots are used.
    pub manual: ExposureParams,
    pub scene: Option<SceneReading>,
    pub bias_enabled: bool,
    pub global_gain: f64,
    /// Nominal bias strength per scene category.
    pub scene_strength: SceneStrengths,
}

/// Result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureReadout {
    /// Final triple; every value is a stop-table entry.
    pub params: ExposureParams,
    pub lock: LockSet,
    /// The solved (auto) parameter.
    pub free: Parameter,
    /// Metered scene EV at ISO 100.
    pub ev_ref: f64,
    /// EV the solve targeted.
    pub target_ev: f64,
    /// Solver output before clamping and quantization.
    pub raw: f64,
    /// True when a scene bias pull was applied to the auto value.
    pub biased: bool,
}

/// Run the full pipeline once.
///
/// `cache` is only touched for the auto parameter and is cleared
/// whenever no bias pull applies.
pub fn evaluate(
    inputs: &PipelineInputs,
    config: &ExposureConfig,
    cache: &mut SmoothingCache,
) -> ExposureReadout {
    let reading = inputs.reading.sanitized();
    let ev_ref = reading_ev(&reading);
    let solution = solve(
        inputs.lock,
        &inputs.manual,
        ev_ref,
        inputs.compensation.stops(),
    );
    let free = solution.free;
    let table = table_for(free);
    let quantized = table.quantize(clamp_to_envelope(solution.raw(), free, config));

    let mut value = quantized;
    let mut biased = false;
    match active_pull(inputs, free) {
        Some((scene, bias, ctx)) => {
            let blended = blend(quantized, bias.center_for(free), bias.strength, &ctx);
            let filtered = if config.smoothing_enabled {
                cache.filter(
                    free,
                    scene.kind,
                    blended,
                    config.smoothing_alpha,
                    config.smoothing_reset,
                )
            } else {
                cache.clear();
                blended
            };
            value = table.quantize(filtered);
            biased = true;
        }
        None => cache.clear(),
    }

    ExposureReadout {
        params: solution.params.with(free, value),
        lock: inputs.lock,
        free,
        ev_ref,
        target_ev: solution.target_ev,
        raw: solution.raw(),
        biased,
    }
}

/// Scene, bias entry and weighting when a non-zero pull applies to `free`.
fn active_pull(
    inputs: &PipelineInputs,
    free: Parameter,
) -> Option<(SceneReading, SceneBias, BiasContext)> {
    if !inputs.bias_enabled || free == Parameter::Iso {
        return None;
    }
    let scene = inputs.scene?;
    let bias = SceneBias::for_scene_with(scene.kind, &inputs.scene_strength);
    bias.center_for(free)?;
    let ctx = BiasContext::new(scene.confidence, inputs.global_gain);
    if blend_weight(bias.strength, &ctx) == 0.0 {
        return None;
    }
    Some((scene, bias, ctx))
}

/// Host-owned exposure state: lock pair, compensation, manual values,
/// bias settings, and the smoothing cache.
#[derive(Debug, Clone)]
pub struct ExposureController {
    config: ExposureConfig,
    lock: LockSet,
    compensation: Compensation,
    manual: ExposureParams,
    bias_enabled: bool,
    global_gain: f64,
    scene_strength: SceneStrengths,
    scene: Option<SceneReading>,
    smoothing: SmoothingCache,
    last: Option<ExposureReadout>,
}

impl ExposureController {
    pub fn new(config: ExposureConfig) -> ExposureResult<Self> {
        config.validate()?;
        let mut manual = ExposureParams::new(0.0, 0.0, 0.0);
        for parameter in Parameter::ALL {
            manual.set(parameter, table_for(parameter).quantize(config.initial(parameter)));
        }
        Ok(Self {
            lock: LockSet::default(),
            compensation: Compensation::ZERO,
            manual,
            bias_enabled: config.bias_enabled,
            global_gain: config.global_gain,
            scene_strength: config.scene_strength,
            scene: None,
            smoothing: SmoothingCache::new(),
            last: None,
            config,
        })
    }

    pub fn config(&self) -> &ExposureConfig {
        &self.config
    }

    pub fn lock(&self) -> LockSet {
        self.lock
    }

    pub fn compensation(&self) -> Compensation {
        self.compensation
    }

    pub fn manual(&self) -> ExposureParams {
        self.manual
    }

    pub fn bias_enabled(&self) -> bool {
        self.bias_enabled
    }

    pub fn global_gain(&self) -> f64 {
        self.global_gain
    }

    pub fn scene_strength(&self) -> SceneStrengths {
        self.scene_strength
    }

    pub fn scene(&self) -> Option<SceneReading> {
        self.scene
    }

    pub fn smoothing(&self) -> &SmoothingCache {
        &self.smoothing
    }

    /// Most recent live readout.
    pub fn last(&self) -> Option<&ExposureReadout> {
        self.last.as_ref()
    }

    /// Copy of the current state paired with `reading`.
    pub fn inputs(&self, reading: &MeteredReading) -> PipelineInputs {
        PipelineInputs {
            reading: *reading,
            lock: self.lock,
            compensation: self.compensation,
            manual: self.manual,
            scene: self.scene,
            bias_enabled: self.bias_enabled,
            global_gain: self.global_gain,
            scene_strength: self.scene_strength,
        }
    }

    /// Evaluate the live pipeline for one refresh tick.
    pub fn compute(&mut self, reading: &MeteredReading) -> ExposureReadout {
        let inputs = self.inputs(reading);
        let readout = evaluate(&inputs, &self.config, &mut self.smoothing);
        self.last = Some(readout);
        readout
    }

    /// Pull the latest scene from `source`, then [`compute`](Self::compute).
    pub fn refresh(
        &mut self,
        reading: &MeteredReading,
        source: &dyn SceneSource,
    ) -> ExposureReadout {
        self.update_scene(source.latest());
        self.compute(reading)
    }

    /// Record a classifier result. Used on the next evaluation.
    pub fn update_scene(&mut self, scene: Option<SceneReading>) {
        self.scene = scene;
    }

    /// Lock `parameter`.
    ///
    /// A newly locked parameter keeps the value last shown for it, so
    /// the display does not jump.
    pub fn toggle_lock(&mut self, parameter: Parameter) -> LockTransition {
        let transition = self.lock.toggle(parameter);
        if let LockTransition::Swapped { locked, .. } = transition {
            self.seed_from_display(locked);
            self.smoothing.clear();
        }
        transition
    }

    /// Switch directly to `lock`, as a lock-mode picker would.
    ///
    /// The previously auto parameter, if it becomes manual, keeps its
    /// last shown value.
    pub fn select_lock(&mut self, lock: LockSet) {
        if lock == self.lock {
            return;
        }
        let previous_free = self.lock.free();
        log::debug!("lock select: {:?} -> {lock:?}", self.lock);
        self.lock = lock;
        if lock.contains(previous_free) {
            self.seed_from_display(previous_free);
        }
        self.smoothing.clear();
    }

    fn seed_from_display(&mut self, parameter: Parameter) {
        if let Some(last) = &self.last {
            let shown = last.params.get(parameter);
            self.manual.set(parameter, table_for(parameter).quantize(shown));
        }
    }

    /// Set a manual value, snapped to its stop table.
    pub fn set_manual(&mut self, parameter: Parameter, value: f64) {
        let value = sanitize_positive(value, parameter);
        self.manual.set(parameter, table_for(parameter).quantize(value));
    }

    /// Move a locked parameter by `delta` third stops.
    ///
    /// Returns `false` without changing anything when `parameter` is the
    /// auto one.
    pub fn step(&mut self, parameter: Parameter, delta: i32) -> bool {
        if !self.lock.contains(parameter) {
            log::debug!("step ignored: {parameter} is auto");
            return false;
        }
        let current = self.manual.get(parameter);
        let next = table_for(parameter).step(current, delta);
        log::debug!("step {parameter}: {current} -> {next}");
        self.manual.set(parameter, next);
        true
    }

    /// Set compensation in stops, snapped to thirds within ±2.
    pub fn set_compensation(&mut self, stops: f64) -> Compensation {
        self.compensation = Compensation::from_stops(stops);
        self.compensation
    }

    /// Move compensation by `delta` third stops.
    pub fn step_compensation(&mut self, delta: i32) -> Compensation {
        self.compensation = self.compensation.step(delta);
        self.compensation
    }

    pub fn set_bias_enabled(&mut self, enabled: bool) {
        if self.bias_enabled != enabled {
            log::debug!("scene bias {}", if enabled { "enabled" } else { "disabled" });
        }
        self.bias_enabled = enabled;
        if !enabled {
            self.smoothing.clear();
        }
    }

    /// Set the global bias gain, clamped to [0, 1].
    pub fn set_global_gain(&mut self, gain: f64) {
        self.global_gain = clamp_range(gain, 0.0, 1.0);
    }

    /// Set the nominal bias strength for one scene category, clamped to
    /// [0, 1]. `Other` has no bias and is left alone.
    pub fn set_scene_strength(&mut self, kind: SceneKind, strength: f64) {
        self.scene_strength.set(kind, strength);
        log::debug!(
            "{} strength set to {}",
            kind.label(),
            self.scene_strength.get(kind)
        );
    }

    /// Evaluate once for `reading` and freeze the result.
    ///
    /// Runs on a copy of the smoothing cache, so capturing does not
    /// advance the live filter.
    pub fn capture(&self, reading: &MeteredReading) -> CaptureSnapshot {
        let inputs = self.inputs(reading);
        CaptureSnapshot::freeze(&inputs, &self.config, &self.smoothing)
    }
}
