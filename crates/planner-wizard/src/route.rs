//! Routes and the navigation collaborator

use crate::error::RouteError;
use crate::machine::Stage;
use crate::steps;
use planner_model::{Onboarding, StepNumber, Substep};
use std::fmt;

/// A screen the wizard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Welcome screens 1..=3
    Onboarding {
        /// Screen number
        screen: u8,
    },
    /// A wizard step
    Step {
        /// Step number
        step: StepNumber,
        /// Substep
        substep: Substep,
    },
    /// Between step 3 and step 4
    Transition,
    /// Plan overview
    Dashboard,
    /// Reminder settings
    Settings,
}

impl Route {
    /// Route name as used by [`Route::parse`]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Onboarding { .. } => "onboarding",
            Self::Step { .. } => "step",
            Self::Transition => "transition",
            Self::Dashboard => "dashboard",
            Self::Settings => "settings",
        }
    }

    /// Route parameters as name/value pairs
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Onboarding { screen } => vec![("screen", screen.to_string())],
            Self::Step { step, substep } => {
                vec![("step", step.to_string()), ("substep", substep.to_string())]
            }
            Self::Transition | Self::Dashboard | Self::Settings => Vec::new(),
        }
    }

    /// Strict parse of a route name and its parameters
    pub fn try_parse(name: &str, params: &[(&str, &str)]) -> Result<Self, RouteError> {
        let param = |key: &'static str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .ok_or(RouteError::MissingParam {
                    route: name.to_string(),
                    param: key,
                })
        };
        let invalid = |key: &'static str, value: &str| RouteError::InvalidParam {
            route: name.to_string(),
            param: key,
            value: value.to_string(),
        };

        match name {
            "onboarding" => {
                let raw = param("screen")?;
                let screen: u8 = raw.parse().map_err(|_| invalid("screen", raw))?;
                if !(1..=Onboarding::SCREENS).contains(&screen) {
                    return Err(invalid("screen", raw));
                }
                Ok(Self::Onboarding { screen })
            }
            "step" => {
                let raw_step = param("step")?;
                let def = raw_step
                    .parse::<StepNumber>()
                    .ok()
                    .and_then(steps::step)
                    .ok_or_else(|| invalid("step", raw_step))?;
                let substep = match params.iter().find(|(k, _)| *k == "substep") {
                    Some(&(_, raw)) => raw
                        .parse::<Substep>()
                        .ok()
                        .filter(|s| def.contains(*s))
                        .ok_or_else(|| invalid("substep", raw))?,
                    None => def.first_substep(),
                };
                Ok(Self::Step {
                    step: def.number,
                    substep,
                })
            }
            "transition" => Ok(Self::Transition),
            "dashboard" => Ok(Self::Dashboard),
            "settings" => Ok(Self::Settings),
            other => Err(RouteError::UnknownRoute(other.to_string())),
        }
    }

    /// Parse a route, falling back to the dashboard on any error
    #[must_use]
    pub fn parse(name: &str, params: &[(&str, &str)]) -> Self {
        Self::try_parse(name, params).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "route not found, showing dashboard");
            Self::Dashboard
        })
    }
}

impl From<Stage> for Route {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Step { step, substep } => Self::Step { step, substep },
            Stage::Interstitial => Self::Transition,
            Stage::Dashboard => Self::Dashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Onboarding { screen } => write!(f, "onboarding/{screen}"),
            Self::Step { step, substep } => write!(f, "step/{step}{substep}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Navigation collaborator, told about every screen change
pub trait Navigator {
    /// Show `route`
    fn navigate(&mut self, route: Route);
}

/// Navigator that remembers every route it was sent
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    routes: Vec<Route>,
}

impl RecordingNavigator {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route, oldest first
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Most recent route
    #[must_use]
    pub fn last(&self) -> Option<Route> {
        self.routes.last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: Route) {
        tracing::trace!(%route, "navigate");
        self.routes.push(route);
    }
}
