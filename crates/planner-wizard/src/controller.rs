//! Wizard controller: state machine + record store + navigator
//!
//! The controller owns the [`Session`], asks the pure machine for each
//! move, applies the resulting effects to the store and presentation
//! state, persists the new position and tells the navigator. Storage
//! failures while persisting are logged and the move still happens.

use crate::commands::{Command, CommandOutcome, CommandRegistry};
use crate::error::{WizardError, WizardResult};
use crate::machine::{self, Checks, Effect, GuardSignal, Outcome, Session, Stage, Transition};
use crate::presentation::Presentation;
use crate::route::{Navigator, Route};
use chrono::Utc;
use planner_model::{Onboarding, StepNumber, Substep, UserPatch};
use planner_store::{RecordStore, Storage, StoreResult};

/// What a navigation request led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Moved and navigated to this route
    Moved(Route),
    /// Nothing to do from here
    Stayed,
    /// Held back by a warning; call [`Wizard::proceed_anyway`] to override
    Blocked(GuardSignal),
}

/// Interactive wizard over a record store
pub struct Wizard<S: Storage, N> {
    store: RecordStore<S>,
    navigator: N,
    session: Session,
    presentation: Presentation,
    commands: CommandRegistry<S>,
    pending: Option<GuardSignal>,
}

impl<S: Storage, N: std::fmt::Debug> std::fmt::Debug for Wizard<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wizard")
            .field("session", &self.session)
            .field("navigator", &self.navigator)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<S: Storage + 'static, N: Navigator> Wizard<S, N> {
    /// Create a wizard, restoring the session from stored progress
    pub fn new(store: RecordStore<S>, navigator: N) -> Self {
        let session = Session::restore(&store.step_progress());
        Self {
            store,
            navigator,
            session,
            presentation: Presentation::new(),
            commands: CommandRegistry::with_defaults(),
            pending: None,
        }
    }

    /// With a custom command registry
    #[must_use]
    pub fn with_commands(mut self, commands: CommandRegistry<S>) -> Self {
        self.commands = commands;
        self
    }

    /// Record store
    #[inline]
    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    /// Current session
    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Presentation state
    #[inline]
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Mutable presentation state
    #[inline]
    pub fn presentation_mut(&mut self) -> &mut Presentation {
        &mut self.presentation
    }

    /// Navigator
    #[inline]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Warning awaiting a decision, if any
    #[inline]
    pub fn pending(&self) -> Option<GuardSignal> {
        self.pending
    }

    /// Route to open on launch
    ///
    /// Onboarding until it is finished, then the dashboard once the last
    /// step is done, otherwise the stored step and substep.
    pub fn initial_route(&self) -> Route {
        let onboarding = self.store.onboarding();
        if !onboarding.completed {
            let screen = onboarding.current_screen.clamp(1, Onboarding::SCREENS);
            return Route::Onboarding { screen };
        }
        Route::from(self.session.stage)
    }

    /// Navigate to the initial route
    pub fn start(&mut self) -> Route {
        let route = self.initial_route();
        tracing::debug!(%route, "starting wizard");
        self.navigator.navigate(route);
        route
    }

    // ------------------------------------------------------------------
    // Onboarding
    // ------------------------------------------------------------------

    /// Save name and planning year from the first welcome screen
    pub fn save_profile(&mut self, name: &str, planning_year: i32) -> WizardResult<Route> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WizardError::InvalidInput("name must not be blank".into()));
        }
        self.store.set_user(
            &UserPatch::name(name)
                .with_planning_year(planning_year)
                .with_created_at(Utc::now()),
        )?;
        self.show_onboarding_screen(2)
    }

    /// Move from a later welcome screen to the next one
    pub fn next_onboarding_screen(&mut self) -> WizardResult<Route> {
        let screen = self.store.onboarding().current_screen;
        if screen <= 1 {
            return Err(WizardError::InvalidInput(
                "save a name before continuing".into(),
            ));
        }
        if screen >= Onboarding::SCREENS {
            return self.finish_onboarding();
        }
        self.show_onboarding_screen(screen + 1)
    }

    fn show_onboarding_screen(&mut self, screen: u8) -> WizardResult<Route> {
        self.store.update_onboarding(|o| o.current_screen = screen)?;
        let route = Route::Onboarding { screen };
        self.navigator.navigate(route);
        Ok(route)
    }

    /// Finish onboarding and open step 1a
    pub fn finish_onboarding(&mut self) -> WizardResult<Route> {
        self.store.update_onboarding(|o| {
            o.completed = true;
            o.current_screen = Onboarding::SCREENS;
        })?;
        self.store.set_step_position(1, Substep::A)?;
        self.session = Session::restore(&self.store.step_progress());
        tracing::info!("onboarding complete");
        let route = Route::from(self.session.stage);
        self.navigator.navigate(route);
        Ok(route)
    }

    // ------------------------------------------------------------------
    // Step navigation
    // ------------------------------------------------------------------

    /// Advance to the next substep
    pub fn next_substep(&mut self) -> Navigation {
        self.run(Transition::NextSubstep)
    }

    /// Go back one substep
    pub fn prev_substep(&mut self) -> Navigation {
        self.run(Transition::PrevSubstep)
    }

    /// Finish the current step
    pub fn next_step(&mut self) -> Navigation {
        self.run(Transition::NextStep)
    }

    /// Go back to the previous step's last substep
    pub fn prev_step(&mut self) -> Navigation {
        self.run(Transition::PrevStep)
    }

    /// Finish the last step and open the dashboard
    pub fn complete(&mut self) -> Navigation {
        self.run(Transition::Complete)
    }

    /// Leave the interstitial for step 4
    pub fn continue_from_interstitial(&mut self) -> Navigation {
        self.run(Transition::ContinueFromInterstitial)
    }

    /// Stay on the interstitial for now
    pub fn take_break(&mut self) -> Navigation {
        if self.session.stage == Stage::Interstitial {
            tracing::debug!("taking a break at the interstitial");
        }
        Navigation::Stayed
    }

    /// Open a step from the dashboard menu
    pub fn jump_to_step(&mut self, step: StepNumber) -> Navigation {
        self.run(Transition::JumpTo(step))
    }

    /// Run the held-back transition despite its warning
    pub fn proceed_anyway(&mut self) -> Navigation {
        let Some(signal) = self.pending.take() else {
            return Navigation::Stayed;
        };
        tracing::info!(warning = %signal.warning, "proceeding despite warning");
        let outcome = machine::proceed(&self.session, signal.pending);
        self.settle(outcome)
    }

    /// Drop the held-back transition
    pub fn dismiss_warning(&mut self) -> Option<GuardSignal> {
        self.pending.take()
    }

    fn run(&mut self, transition: Transition) -> Navigation {
        self.pending = None;
        let checks = if machine::is_guarded(&self.session, transition) {
            self.checks()
        } else {
            Checks::default()
        };
        let outcome = machine::apply(&self.session, transition, checks);
        self.settle(outcome)
    }

    fn checks(&self) -> Checks {
        let vision = self.store.vision();
        let areas = self.store.focus_areas();
        Checks {
            unassigned_objectives: planner_roadmap::unassigned_objectives(&vision, &areas).len(),
        }
    }

    fn settle(&mut self, outcome: Outcome) -> Navigation {
        match outcome {
            Outcome::Moved { session, effects } => {
                for effect in effects {
                    self.apply_effect(effect);
                }
                self.session = session;
                self.persist_position();
                let route = Route::from(self.session.stage);
                self.navigator.navigate(route);
                Navigation::Moved(route)
            }
            Outcome::Unchanged => Navigation::Stayed,
            Outcome::Blocked(signal) => {
                self.pending = Some(signal);
                Navigation::Blocked(signal)
            }
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::CollapseSubstep { step, substep } => self.presentation.collapse(step, substep),
            Effect::MarkStepComplete(step) => {
                logged(self.store.mark_step_complete(step), "mark step complete");
                tracing::info!(step, "step complete");
            }
            Effect::PruneBlankFocusAreas => {
                logged(self.store.prune_blank_focus_areas(), "prune blank focus areas");
            }
        }
    }

    fn persist_position(&self) {
        match self.session.stage {
            Stage::Step { step, substep } => {
                logged(self.store.set_step_position(step, substep), "save position");
            }
            Stage::Interstitial => {
                logged(self.store.set_at_interstitial(), "save position");
            }
            Stage::Dashboard => {}
        }
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Apply an edit through the command registry
    pub fn execute(&self, command: &Command) -> WizardResult<CommandOutcome> {
        Ok(self.commands.dispatch(&self.store, command)?)
    }
}

fn logged<T>(result: StoreResult<T>, what: &str) {
    if let Err(e) = result {
        tracing::error!(error = %e, "failed to {what}; continuing with unsaved state");
    }
}
