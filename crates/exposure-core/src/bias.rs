// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Scene Bias Blender
// ─────────────────────────────────────────────────────────────────────
//! Soft pull of the auto parameter toward a scene-appropriate value.
//!
//! ```text
//! a      = clamp(strength · confidence · global_gain, 0, 1)
//! m      = a² (3 − 2a)                  // smoothstep
//! result = current · (1 − m) + center · m
//! ```
//!
//! ISO is never biased, and a manual parameter is never touched: the
//! blender only ever sees the auto parameter's value.

use serde::{Deserialize, Serialize};

use exposure_types::{
    clamp_range, BiasContext, Parameter, SceneKind, SceneStrengths, SmoothingReset,
};

/// Preferred aperture/shutter centers for one scene category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneBias {
    /// Preferred f-number, if the scene has one.
    pub f_center: Option<f64>,
    /// Preferred shutter in seconds, if the scene has one.
    pub t_center: Option<f64>,
    /// Nominal strength before confidence and gain, in [0, 1].
    pub strength: f64,
}

impl SceneBias {
    pub const NONE: SceneBias = SceneBias {
        f_center: None,
        t_center: None,
        strength: 0.0,
    };

    /// Centers for `kind` with the default strengths.
    pub fn for_scene(kind: SceneKind) -> Self {
        Self::for_scene_with(kind, &SceneStrengths::default())
    }

    /// Centers for `kind` with the strength taken from `strengths`.
    pub fn for_scene_with(kind: SceneKind, strengths: &SceneStrengths) -> Self {
        let (f, t) = match kind {
            SceneKind::Portrait => (2.2, 1.0 / 200.0),
            SceneKind::Group(_) => (7.1, 1.0 / 100.0),
            SceneKind::Animal => (2.8, 1.0 / 600.0),
            // close-up feel
            SceneKind::Plant => (2.8, 1.0 / 200.0),
            SceneKind::Landscape => (9.0, 1.0 / 125.0),
            SceneKind::Other => return Self::NONE,
        };
        Self {
            f_center: Some(f),
            t_center: Some(t),
            strength: strengths.get(kind),
        }
    }

    /// Center for the given auto parameter. Always `None` for ISO.
    pub fn center_for(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Aperture => self.f_center,
            Parameter::Shutter => self.t_center,
            Parameter::Iso => None,
        }
    }
}

/// Smoothstep easing on [0, 1].
#[inline]
pub fn smoothstep(a: f64) -> f64 {
    a * a * (3.0 - 2.0 * a)
}

/// Eased mix weight `m` for a scene strength under `ctx`.
pub fn blend_weight(strength: f64, ctx: &BiasContext) -> f64 {
    let strength = clamp_range(strength, 0.0, 1.0);
    let confidence = clamp_range(ctx.confidence, 0.0, 1.0);
    let gain = clamp_range(ctx.global_gain, 0.0, 1.0);
    if strength == 0.0 || confidence == 0.0 || gain == 0.0 {
        return 0.0;
    }
    smoothstep(clamp_range(strength * confidence * gain, 0.0, 1.0))
}

/// Pull `current` toward `center`.
///
/// Returns `current` bit-for-bit when there is no center or any weight
/// factor is zero, and `center` exactly when every factor is one.
pub fn blend(current: f64, center: Option<f64>, strength: f64, ctx: &BiasContext) -> f64 {
    let Some(center) = center else {
        return current;
    };
    let m = blend_weight(strength, ctx);
    if m == 0.0 {
        return current;
    }
    current * (1.0 - m) + center * m
}

/// Last filtered value for the parameter currently in the auto role.
///
/// Holds state for one role only; any change of role starts the filter
/// over from the next input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothingCache {
    role: Option<Parameter>,
    scene: Option<SceneKind>,
    value: Option<f64>,
}

impl SmoothingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<Parameter> {
        self.role
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            log::debug!("smoothing cache cleared (role {:?})", self.role);
        }
        *self = Self::default();
    }

    /// Run `y = y_prev · (1 − α) + input · α` for `role`.
    ///
    /// The first input after a reset passes through unchanged.
    pub fn filter(
        &mut self,
        role: Parameter,
        scene: SceneKind,
        input: f64,
        alpha: f64,
        policy: SmoothingReset,
    ) -> f64 {
        let role_changed = self.role != Some(role);
        let scene_changed = self
            .scene
            .map_or(true, |prev| !prev.same_category(scene));
        let reset = role_changed
            || (policy == SmoothingReset::RoleOrSceneChange && scene_changed);

        let alpha = clamp_range(alpha, 0.0, 1.0);
        let output = match self.value {
            Some(prev) if !reset => prev * (1.0 - alpha) + input * alpha,
            _ => input,
        };

        if reset && self.value.is_some() {
            log::debug!("smoothing reset: role {:?} -> {role}, scene {scene}", self.role);
        }
        self.role = Some(role);
        self.scene = Some(scene);
        self.value = Some(output);
        output
    }
}
