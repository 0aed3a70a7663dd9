//! Life Planner Roadmap
//!
//! Flattens focus areas into the actionable items a user schedules, and
//! groups the scheduled ones into timing buckets. The dashboard, the
//! print export and the roadmap editor all go through the same
//! functions so their listings never disagree.
//!
//! # Pipeline
//!
//! ```text
//! FocusArea ──strategies()──► strategy texts (priority first)
//!           ──actionable_items()──► sub-steps + milestone, or the strategy itself
//!           ──Roadmap::build()──► q1 | q2 | q3 | q4 | might
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use planner_roadmap::Roadmap;
//!
//! let roadmap = Roadmap::build(&store.focus_areas());
//! for (timing, items) in roadmap.non_empty() {
//!     println!("{}: {}", timing.label(), items.len());
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod aggregate;
pub mod objectives;

pub use aggregate::{
    actionable_items, strategies, strategy_items, ActionableItem, Roadmap, StatusSummary,
};
pub use objectives::{unassigned_objectives, unassigned_warning};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
