// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Scene Classification Types
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::params::clamp_range;

/// Scene category reported by the external classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneKind {
    Portrait,
    /// Two or more faces; carries the face count.
    Group(u32),
    Animal,
    Plant,
    Landscape,
    Other,
}

impl SceneKind {
    pub fn label(self) -> &'static str {
        match self {
            SceneKind::Portrait => "portrait",
            SceneKind::Group(_) => "group",
            SceneKind::Animal => "animal",
            SceneKind::Plant => "plant",
            SceneKind::Landscape => "landscape",
            SceneKind::Other => "other",
        }
    }

    /// True when both kinds are the same category, ignoring face count.
    pub fn same_category(self, other: SceneKind) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneKind::Group(n) => write!(f, "group({n})"),
            other => f.write_str(other.label()),
        }
    }
}

/// One classifier result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneReading {
    pub kind: SceneKind,
    /// Overall classifier confidence in [0, 1].
    pub confidence: f64,
}

impl SceneReading {
    pub fn new(kind: SceneKind, confidence: f64) -> Self {
        Self {
            kind,
            confidence: clamp_range(confidence, 0.0, 1.0),
        }
    }
}

/// User-tunable nominal bias strength per scene category, each in
/// [0, 1]. `Other` has no bias centers and so no strength slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStrengths {
    pub portrait: f64,
    pub group: f64,
    pub animal: f64,
    pub plant: f64,
    pub landscape: f64,
}

impl Default for SceneStrengths {
    fn default() -> Self {
        Self {
            portrait: 0.55,
            group: 0.55,
            animal: 0.65,
            plant: 0.50,
            landscape: 0.55,
        }
    }
}

impl SceneStrengths {
    /// Strength for `kind`. Always 0 for `Other`.
    pub fn get(&self, kind: SceneKind) -> f64 {
        match kind {
            SceneKind::Portrait => self.portrait,
            SceneKind::Group(_) => self.group,
            SceneKind::Animal => self.animal,
            SceneKind::Plant => self.plant,
            SceneKind::Landscape => self.landscape,
            SceneKind::Other => 0.0,
        }
    }

    /// Set the strength for `kind`, clamped to [0, 1]. Ignored for `Other`.
    pub fn set(&mut self, kind: SceneKind, strength: f64) {
        let strength = clamp_range(strength, 0.0, 1.0);
        match kind {
            SceneKind::Portrait => self.portrait = strength,
            SceneKind::Group(_) => self.group = strength,
            SceneKind::Animal => self.animal = strength,
            SceneKind::Plant => self.plant = strength,
            SceneKind::Landscape => self.landscape = strength,
            SceneKind::Other => {}
        }
    }

    pub(crate) fn entries(&self) -> [(SceneKind, f64); 5] {
        [
            (SceneKind::Portrait, self.portrait),
            (SceneKind::Group(2), self.group),
            (SceneKind::Animal, self.animal),
            (SceneKind::Plant, self.plant),
            (SceneKind::Landscape, self.landscape),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_category_ignores_face_count() {
        assert!(SceneKind::Group(2).same_category(SceneKind::Group(5)));
        assert!(!SceneKind::Group(2).same_category(SceneKind::Portrait));
    }

    #[test]
    fn test_display() {
        assert_eq!(SceneKind::Group(3).to_string(), "group(3)");
        assert_eq!(SceneKind::Landscape.to_string(), "landscape");
    }

    #[test]
    fn test_reading_clamps_confidence() {
        assert_eq!(SceneReading::new(SceneKind::Animal, 2.0).confidence, 1.0);
        assert_eq!(SceneReading::new(SceneKind::Animal, f64::NAN).confidence, 0.0);
    }

    #[test]
    fn test_strengths_set_clamps() {
        let mut strengths = SceneStrengths::default();
        strengths.set(SceneKind::Group(4), 1.7);
        strengths.set(SceneKind::Plant, -0.2);
        strengths.set(SceneKind::Other, 0.9);
        assert_eq!(strengths.get(SceneKind::Group(2)), 1.0);
        assert_eq!(strengths.get(SceneKind::Plant), 0.0);
        assert_eq!(strengths.get(SceneKind::Other), 0.0);
        assert_eq!(strengths.get(SceneKind::Animal), 0.65);
    }
}
