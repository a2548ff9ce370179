// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Lock State Machine
// ─────────────────────────────────────────────────────────────────────
//! Which two of the three exposure parameters are manual.
//!
//! `LockSet` has exactly three states, one per valid pair, so a set of
//! any other size cannot be expressed.
//!
//! `toggle(p)`:
//! - `p` already locked: no-op. Unlocking alone would leave one lock.
//! - otherwise `p` is locked and one current member is evicted. The
//!   victim is the first member found in [`EVICTION_PRIORITY`].
//!
//! | from                | toggle   | to                 |
//! |---------------------|----------|--------------------|
//! | {Iso, Aperture}     | Shutter  | {Iso, Shutter}     |
//! | {Iso, Shutter}      | Aperture | {Iso, Aperture}    |
//! | {Aperture, Shutter} | Iso      | {Iso, Shutter}     |

use serde::{Deserialize, Serialize};

use exposure_types::Parameter;

/// Eviction order when a new parameter is locked: Aperture is released
/// first, Iso last.
pub const EVICTION_PRIORITY: [Parameter; 3] =
    [Parameter::Aperture, Parameter::Shutter, Parameter::Iso];

/// The pair of manual parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LockSet {
    /// ISO and aperture manual, shutter solved.
    #[default]
    IsoAperture,
    /// ISO and shutter manual, aperture solved.
    IsoShutter,
    /// Aperture and shutter manual, ISO solved.
    ApertureShutter,
}

/// Outcome of a [`LockSet::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTransition {
    /// The parameter was already locked.
    Unchanged,
    /// `locked` became manual and `evicted` became auto.
    Swapped {
        locked: Parameter,
        evicted: Parameter,
    },
}

impl LockSet {
    pub const ALL: [LockSet; 3] = [
        LockSet::IsoAperture,
        LockSet::IsoShutter,
        LockSet::ApertureShutter,
    ];

    /// The state whose free parameter is `free`.
    pub fn with_free(free: Parameter) -> Self {
        match free {
            Parameter::Shutter => LockSet::IsoAperture,
            Parameter::Aperture => LockSet::IsoShutter,
            Parameter::Iso => LockSet::ApertureShutter,
        }
    }

    /// The auto (solved) parameter.
    pub fn free(self) -> Parameter {
        match self {
            LockSet::IsoAperture => Parameter::Shutter,
            LockSet::IsoShutter => Parameter::Aperture,
            LockSet::ApertureShutter => Parameter::Iso,
        }
    }

    pub fn locked(self) -> [Parameter; 2] {
        match self {
            LockSet::IsoAperture => [Parameter::Iso, Parameter::Aperture],
            LockSet::IsoShutter => [Parameter::Iso, Parameter::Shutter],
            LockSet::ApertureShutter => [Parameter::Aperture, Parameter::Shutter],
        }
    }

    pub fn contains(self, parameter: Parameter) -> bool {
        self.free() != parameter
    }

    /// Lock `parameter`, evicting one current member if needed.
    pub fn toggle(&mut self, parameter: Parameter) -> LockTransition {
        if self.contains(parameter) {
            return LockTransition::Unchanged;
        }
        let members = self.locked();
        // `parameter` is the free one, so both members are eviction candidates.
        let evicted = EVICTION_PRIORITY
            .into_iter()
            .find(|p| members.contains(p))
            .unwrap_or(members[0]);
        *self = LockSet::with_free(evicted);
        log::debug!("lock toggle: locked {parameter}, evicted {evicted}");
        LockTransition::Swapped {
            locked: parameter,
            evicted,
        }
    }
}
