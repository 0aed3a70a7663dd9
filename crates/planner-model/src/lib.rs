//! Life Planner Model
//!
//! Typed records persisted by the planning wizard.
//!
//! # Core Concepts
//!
//! - [`User`], [`Onboarding`], [`Settings`]: profile and preferences
//! - [`VisionRecord`]: free-text ideas gathered across steps 1-5
//! - [`FocusArea`]: a multi-year theme with strategies, sub-steps, timings and statuses
//! - [`WhimsyItem`]: the independent "be whimsical" list
//! - [`StepProgress`]: persisted wizard position and completed steps
//!
//! Records serialize with the camelCase field names used by the stored
//! documents, and keep unrecognised fields in an `extra` map so a
//! read-modify-write never drops data it does not understand.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod focus_area;
mod ids;
mod lenient;
mod limits;
mod progress;
mod records;
mod status;

pub use focus_area::FocusArea;
pub use ids::{FocusAreaId, IdeaId};
pub use limits::{PlanLimits, PlanWarning};
pub use progress::{StepNumber, StepProgress, Substep};
pub use records::{
    Idea, IdeaCategory, Onboarding, QuarterlyItem, QuarterlyRecord, ReminderFrequency, Settings,
    User, UserPatch, VisionRecord, WhimsyItem,
};
pub use status::{ActionStatus, FocusAreaStatus, Timing, UnknownValue, WhimsyStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
