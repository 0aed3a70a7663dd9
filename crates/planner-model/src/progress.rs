//! Persisted wizard position

use crate::lenient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::status::UnknownValue;

/// One-based wizard step number (1..=7)
pub type StepNumber = u8;

/// Substep identifier within a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Substep {
    /// First substep
    #[default]
    A,
    /// Second substep
    B,
    /// Third substep
    C,
}

impl Substep {
    /// Wire value
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
        }
    }
}

impl fmt::Display for Substep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Substep {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            other => Err(UnknownValue {
                kind: "substep",
                value: other.to_string(),
            }),
        }
    }
}

/// Where the user is in the wizard and which steps they have finished
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepProgress {
    /// Step currently open
    #[serde(default = "StepProgress::first_step")]
    pub current_step: StepNumber,
    /// Substep currently open
    #[serde(default, deserialize_with = "lenient::value")]
    pub current_substep: Substep,
    /// Finished steps, kept sorted and unique
    #[serde(default)]
    pub completed_steps: BTreeSet<StepNumber>,
    /// Parked on the screen between step 3 and step 4
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub at_interstitial: bool,
    /// Last write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Fields this build does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StepProgress {
    /// Number of wizard steps
    pub const TOTAL_STEPS: StepNumber = 7;

    fn first_step() -> StepNumber {
        1
    }

    /// Record a finished step; returns `false` if it was already recorded
    pub fn mark_complete(&mut self, step: StepNumber) -> bool {
        self.completed_steps.insert(step)
    }

    /// Whether `step` has been finished
    #[inline]
    #[must_use]
    pub fn is_complete(&self, step: StepNumber) -> bool {
        self.completed_steps.contains(&step)
    }

    /// Whether the final step has ever been finished
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.is_complete(Self::TOTAL_STEPS)
    }

    /// Whether the user may open `step`
    ///
    /// Before the first full pass steps unlock in order; afterwards every
    /// step is open.
    #[must_use]
    pub fn is_step_accessible(&self, step: StepNumber) -> bool {
        if !(1..=Self::TOTAL_STEPS).contains(&step) {
            return false;
        }
        self.is_finished() || step == 1 || self.is_complete(step - 1)
    }

    /// Rounded percentage of finished steps
    #[must_use]
    pub fn overall_percent(&self) -> u32 {
        let done = u32::try_from(self.completed_steps.len()).unwrap_or(u32::MAX);
        let total = u32::from(Self::TOTAL_STEPS);
        (done * 100 + total / 2) / total
    }
}

impl Default for StepProgress {
    fn default() -> Self {
        Self {
            current_step: Self::first_step(),
            current_substep: Substep::A,
            completed_steps: BTreeSet::new(),
            at_interstitial: false,
            updated_at: None,
            extra: Map::new(),
        }
    }
}
