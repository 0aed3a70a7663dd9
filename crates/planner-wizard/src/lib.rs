//! Life Planner Wizard
//!
//! The seven-step planning flow: a pure step/substep state machine, the
//! routes it maps to, a typed command bus for edits, and a controller
//! that ties them to a [`RecordStore`](planner_store::RecordStore) and a
//! [`Navigator`].
//!
//! # Architecture
//!
//! ```text
//! Wizard<S, N>
//!   ├── machine::apply / proceed   (Session + Transition -> Outcome)
//!   ├── Presentation               (collapsed substeps, expanded items)
//!   ├── CommandRegistry<S>         (CommandKind -> CommandHandler)
//!   ├── RecordStore<S>             (persisted progress and records)
//!   └── N: Navigator               (told about every route change)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use planner_store::{MemoryStorage, RecordStore};
//! use planner_wizard::{Navigation, RecordingNavigator, Wizard};
//!
//! let mut wizard = Wizard::new(RecordStore::new(MemoryStorage::new()), RecordingNavigator::new());
//! wizard.save_profile("Alex", 2027)?;
//! wizard.finish_onboarding()?;
//! if let Navigation::Blocked(signal) = wizard.next_step() {
//!     println!("{}", signal.warning);
//!     wizard.proceed_anyway();
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod controller;
pub mod error;
pub mod machine;
pub mod presentation;
pub mod route;
pub mod steps;

pub use commands::{
    Command, CommandHandler, CommandKind, CommandOutcome, CommandRegistry, FocusAreaHandler,
    VisionHandler, WhimsyHandler, YEAR_HORIZONS,
};
pub use controller::{Navigation, Wizard};
pub use error::{CommandError, RouteError, WizardError, WizardResult};
pub use machine::{Checks, Effect, GuardSignal, Outcome, Session, Stage, Transition};
pub use presentation::Presentation;
pub use route::{Navigator, RecordingNavigator, Route};
pub use steps::{StepDef, FIRST_STEP, FOCUS_AREA_STEP, LAST_STEP, STEPS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
