//! Action kinds and run results.

use serde::{Deserialize, Serialize};

/// What the player does during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// No player input; the lifetime runs out and the success point is used
    /// as a percent chance.
    None,
    /// Hold confirm to fill the bar, release to empty it.
    #[default]
    Fill,
    /// The cursor patrols the bar; press confirm to stop it.
    Cursor,
}

impl ActionKind {
    /// Returns `true` if the player drives the run (and may cancel it).
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeResult {
    /// Not decided (still running, or a no-action gauge without a chance).
    #[default]
    None,
    /// The scored position landed in the success window.
    Success,
    /// The scored position missed the success window.
    Failure,
    /// The player cancelled.
    Cancel,
}

impl GaugeResult {
    /// Value stored into the result variable.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Success => 1,
            Self::Failure => 2,
            Self::Cancel => 3,
        }
    }

    /// Returns `true` once a result has been decided.
    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::None)
    }
}
