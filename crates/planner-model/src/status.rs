//! Timing buckets and status enums
//!
//! Wire values follow the stored documents: `q1`..`q4`/`might`,
//! `not-started`/`in-progress`/`complete`, and `still-a-dream`/`did-it`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A string that matched none of an enum's wire values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: '{value}'")]
pub struct UnknownValue {
    /// Which enum was being parsed
    pub kind: &'static str,
    /// The rejected text
    pub value: String,
}

impl UnknownValue {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Quarter-timing bucket an actionable item is scheduled into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timing {
    /// January - March
    Q1,
    /// April - June
    Q2,
    /// July - September
    Q3,
    /// October - December
    Q4,
    /// Unscheduled / optional
    Might,
}

impl Timing {
    /// All buckets in display order
    pub const ALL: [Timing; 5] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4, Self::Might];

    /// The four calendar quarters (legacy quarterly record)
    pub const QUARTERS: [Timing; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Wire value
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
            Self::Might => "might",
        }
    }

    /// Display label used by the dashboard and the print export
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Q1 (Jan-Mar)",
            Self::Q2 => "Q2 (Apr-Jun)",
            Self::Q3 => "Q3 (Jul-Sep)",
            Self::Q4 => "Q4 (Oct-Dec)",
            Self::Might => "Might Do",
        }
    }

    /// Position in [`Timing::ALL`]
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this is one of the four calendar quarters
    #[inline]
    #[must_use]
    pub const fn is_quarter(self) -> bool {
        !matches!(self, Self::Might)
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timing {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "q1" => Ok(Self::Q1),
            "q2" => Ok(Self::Q2),
            "q3" => Ok(Self::Q3),
            "q4" => Ok(Self::Q4),
            "might" => Ok(Self::Might),
            other => Err(UnknownValue::new("timing", other)),
        }
    }
}

/// Progress of a single actionable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionStatus {
    /// Nothing done yet
    #[default]
    NotStarted,
    /// Under way
    InProgress,
    /// Done
    Complete,
}

impl ActionStatus {
    /// All statuses in display order
    pub const ALL: [ActionStatus; 3] = [Self::NotStarted, Self::InProgress, Self::Complete];

    /// Wire value
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Complete => "complete",
        }
    }

    /// Whether the item is done
    #[inline]
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(Self::NotStarted),
            "in-progress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            other => Err(UnknownValue::new("action status", other)),
        }
    }
}

/// Status of a whimsy list item
///
/// Older documents used `not-started`/`complete`; both are read as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WhimsyStatus {
    /// Not done yet
    #[default]
    #[serde(alias = "not-started")]
    StillADream,
    /// Done
    #[serde(alias = "complete")]
    DidIt,
}

impl WhimsyStatus {
    /// Wire value
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StillADream => "still-a-dream",
            Self::DidIt => "did-it",
        }
    }
}

impl fmt::Display for WhimsyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WhimsyStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "still-a-dream" | "not-started" => Ok(Self::StillADream),
            "did-it" | "complete" => Ok(Self::DidIt),
            other => Err(UnknownValue::new("whimsy status", other)),
        }
    }
}

/// Overall status of a focus area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusAreaStatus {
    /// Nothing done yet
    #[default]
    NotStarted,
    /// Under way
    InProgress,
    /// Done
    Complete,
    /// Dropped
    Abandon,
}

impl FocusAreaStatus {
    /// Percentage weight used by the focus-area progress figure
    #[inline]
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::NotStarted | Self::Abandon => 0,
            Self::InProgress => 50,
            Self::Complete => 100,
        }
    }
}

impl FromStr for FocusAreaStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(Self::NotStarted),
            "in-progress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            "abandon" => Ok(Self::Abandon),
            other => Err(UnknownValue::new("focus area status", other)),
        }
    }
}
