//! Error types for the wizard

use crate::commands::CommandKind;
use planner_store::StoreError;

/// A route name or parameter could not be understood
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// No route by this name
    #[error("unknown route: {0}")]
    UnknownRoute(String),

    /// A required parameter is absent
    #[error("route '{route}' is missing parameter '{param}'")]
    MissingParam {
        /// Route name
        route: String,
        /// Missing parameter
        param: &'static str,
    },

    /// A parameter is present but not acceptable
    #[error("route '{route}' has invalid {param} '{value}'")]
    InvalidParam {
        /// Route name
        route: String,
        /// Parameter name
        param: &'static str,
        /// Value given
        value: String,
    },
}

/// A command could not be carried out
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Nothing registered for this kind of command
    #[error("no handler registered for {0:?}")]
    NoHandler(CommandKind),

    /// The handler received a command it does not serve
    #[error("handler cannot process {0:?}")]
    Unsupported(CommandKind),

    /// The command's input is not acceptable
    #[error("invalid command: {0}")]
    Invalid(String),

    /// Persisting the change failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Umbrella error for wizard operations
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Persisting the change failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Command failed
    #[error("command failed: {0}")]
    Command(#[from] CommandError),

    /// Bad route
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    /// Input rejected before anything was saved
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for wizard operations
pub type WizardResult<T> = Result<T, WizardError>;
