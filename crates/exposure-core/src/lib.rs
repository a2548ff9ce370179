// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Core Engine
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Manual-assist exposure control: derives a full aperture / shutter /
//! ISO triple from a live meter reading while the user holds two of the
//! three fixed.
//!
//! # Invariants
//!
//! 1. **Exactly two parameters are manual**: [`LockSet`] has one variant
//!    per valid pair, and `toggle` only ever swaps one member.
//!
//! 2. **Displayed and captured values are stop-table entries**: every
//!    solved or biased value is clamped to the operating envelope and
//!    then snapped by the quantizer.
//!
//! 3. **Non-finite input never propagates**: meter values are forced
//!    into a positive finite range before any `log2`.
//!
//! 4. **Scene bias only moves the auto parameter**, and never ISO. The
//!    smoothing cache is cleared whenever the auto role changes or bias
//!    is disabled.
//!
//! 5. **Captures are frozen**: a [`CaptureSnapshot`] owns copies of its
//!    values and is never updated after it is taken.

pub mod bias;
pub mod capture;
pub mod ev;
pub mod lock;
pub mod overlay;
pub mod pipeline;
pub mod scene;
pub mod shared;
pub mod solver;
pub mod stops;

pub use bias::{blend, SceneBias, SmoothingCache};
pub use capture::CaptureSnapshot;
pub use ev::{ev_at_ref, target_ev};
pub use lock::{LockSet, LockTransition};
pub use pipeline::{evaluate, ExposureController, ExposureReadout, PipelineInputs};
pub use scene::{ExternalScene, SceneSource, StaticScene};
pub use shared::SharedExposureController;
pub use solver::{solve, Solution};
pub use stops::{quantize, table_for, StopTable};
