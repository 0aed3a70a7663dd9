//! Life Planner Render
//!
//! Read-only views over a stored plan. Both renderers take the quarterly
//! roadmap from [`planner_roadmap::Roadmap`], so the dashboard and the
//! printed plan always list the same items in the same buckets.
//!
//! - [`DashboardView`]: serializable view model of the plan overview
//! - [`print_plan`]: Markdown document for printing or sharing

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod dashboard;
pub mod print;

pub use dashboard::{
    CurrentState, DashboardView, FocusAreaCard, LifeVision, PlanProgress, Reflections, WhimsyEntry,
};
pub use print::{plan_title, print_plan};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
