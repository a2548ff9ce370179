// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Scene Source Interface
// ─────────────────────────────────────────────────────────────────────
//! Seam between the exposure pipeline and the host's scene classifier.
//!
//! The classifier runs on its own cadence and is owned by the host. The
//! pipeline only borrows it for the duration of one refresh, so no
//! reference cycle can form between the two.

use exposure_types::SceneReading;

/// Anything that can report the most recent scene classification.
pub trait SceneSource: Send + Sync {
    /// Latest result, or `None` before the first classification.
    fn latest(&self) -> Option<SceneReading>;
}

/// Fixed scene result. Useful for tests and for hosts without a
/// classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticScene(pub Option<SceneReading>);

impl SceneSource for StaticScene {
    fn latest(&self) -> Option<SceneReading> {
        self.0
    }
}

type LatestFn = Box<dyn Fn() -> Option<SceneReading> + Send + Sync>;

/// Scene source that calls a host-provided function.
pub struct ExternalScene {
    latest_fn: LatestFn,
}

impl ExternalScene {
    pub fn new(latest_fn: impl Fn() -> Option<SceneReading> + Send + Sync + 'static) -> Self {
        Self {
            latest_fn: Box::new(latest_fn),
        }
    }
}

impl SceneSource for ExternalScene {
    fn latest(&self) -> Option<SceneReading> {
        (self.latest_fn)()
    }
}
