//! Step/substep state machine
//!
//! Transitions are pure: they take a [`Session`] and return an
//! [`Outcome`] holding the next session plus the [`Effect`]s the caller
//! must carry out (persisting completion, pruning blank focus areas,
//! collapsing a substep). Nothing here touches storage or navigation.
//!
//! # Guard
//!
//! Leaving step 3 substep b, by either `NextSubstep` or `NextStep`, is
//! blocked while future goals remain unassigned. The caller supplies the
//! count through [`Checks`]; a blocked transition returns
//! [`Outcome::Blocked`] and the session is untouched. [`proceed`] runs the
//! same transition with the guard lifted.

use crate::steps::{self, StepDef, FIRST_STEP, FOCUS_AREA_STEP, LAST_STEP};
use planner_model::{PlanWarning, StepNumber, StepProgress, Substep};
use std::collections::BTreeSet;

/// Where the user is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Inside a step
    Step {
        /// Step number
        step: StepNumber,
        /// Current substep
        substep: Substep,
    },
    /// Between step 3 and step 4
    Interstitial,
    /// Terminal overview
    Dashboard,
}

impl Stage {
    /// Stage at the first substep of a step
    #[must_use]
    pub fn start_of(def: &StepDef) -> Self {
        Self::Step {
            step: def.number,
            substep: def.first_substep(),
        }
    }
}

/// Explicit wizard session: position plus which steps are done
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Current stage
    pub stage: Stage,
    /// Steps finished at least once
    pub completed_steps: BTreeSet<StepNumber>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            stage: Stage::Step {
                step: FIRST_STEP,
                substep: Substep::A,
            },
            completed_steps: BTreeSet::new(),
        }
    }
}

impl Session {
    /// Fresh session at (1, a)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted progress
    ///
    /// A finished plan restores to the dashboard, a parked one to the
    /// interstitial. An unknown step also lands on the dashboard; an
    /// unknown substep snaps to the step's first.
    #[must_use]
    pub fn restore(progress: &StepProgress) -> Self {
        let completed_steps = progress.completed_steps.clone();
        if progress.is_finished() {
            return Self {
                stage: Stage::Dashboard,
                completed_steps,
            };
        }
        if progress.at_interstitial {
            return Self {
                stage: Stage::Interstitial,
                completed_steps,
            };
        }
        let stage = match steps::step(progress.current_step) {
            Some(def) if def.contains(progress.current_substep) => Stage::Step {
                step: def.number,
                substep: progress.current_substep,
            },
            Some(def) => {
                tracing::warn!(
                    step = def.number,
                    substep = %progress.current_substep,
                    "stored substep not in step, starting step over"
                );
                Stage::start_of(def)
            }
            None => {
                tracing::warn!(step = progress.current_step, "stored step out of range");
                Stage::Dashboard
            }
        };
        Self {
            stage,
            completed_steps,
        }
    }

    /// Current step and substep, when inside a step
    #[must_use]
    pub fn position(&self) -> Option<(StepNumber, Substep)> {
        match self.stage {
            Stage::Step { step, substep } => Some((step, substep)),
            Stage::Interstitial | Stage::Dashboard => None,
        }
    }

    fn current(&self) -> Option<(&'static StepDef, Substep)> {
        let (step, substep) = self.position()?;
        Some((steps::step(step)?, substep))
    }

    fn indices(&self, substep: Substep) -> Option<(usize, usize)> {
        let (def, current) = self.current()?;
        Some((def.index_of(substep)?, def.index_of(current)?))
    }

    /// Substep is shown: at or before the current one
    #[must_use]
    pub fn is_visible(&self, substep: Substep) -> bool {
        self.indices(substep).is_some_and(|(i, cur)| i <= cur)
    }

    /// Substep is done: strictly before the current one
    #[must_use]
    pub fn is_complete(&self, substep: Substep) -> bool {
        self.indices(substep).is_some_and(|(i, cur)| i < cur)
    }

    /// Whether the current substep is the step's last
    #[must_use]
    pub fn at_last_substep(&self) -> bool {
        self.current()
            .is_some_and(|(def, substep)| def.last_substep() == substep)
    }

    /// Whether `step` may be opened directly
    #[must_use]
    pub fn is_step_accessible(&self, step: StepNumber) -> bool {
        if !(FIRST_STEP..=LAST_STEP).contains(&step) {
            return false;
        }
        self.completed_steps.contains(&LAST_STEP)
            || step == FIRST_STEP
            || self.completed_steps.contains(&(step - 1))
    }
}

/// A requested move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// To the next substep of the step
    NextSubstep,
    /// To the previous substep of the step
    PrevSubstep,
    /// Finish the step
    NextStep,
    /// To the last substep of the previous step
    PrevStep,
    /// Finish the last step and open the dashboard
    Complete,
    /// From the interstitial into step 4
    ContinueFromInterstitial,
    /// Open a step at its first substep
    JumpTo(StepNumber),
}

/// Side effect the caller must apply after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Collapse the substep just left (presentation only)
    CollapseSubstep {
        /// Step
        step: StepNumber,
        /// Substep left
        substep: Substep,
    },
    /// Persist a step as finished
    MarkStepComplete(StepNumber),
    /// Remove focus areas with blank titles
    PruneBlankFocusAreas,
}

/// A move that was held back by a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardSignal {
    /// What the user is warned about
    pub warning: PlanWarning,
    /// Transition to run if they proceed anyway
    pub pending: Transition,
}

/// Result of a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The session moved
    Moved {
        /// New session
        session: Session,
        /// Effects to apply, in order
        effects: Vec<Effect>,
    },
    /// Nothing to do from here
    Unchanged,
    /// Held back; the session is untouched
    Blocked(GuardSignal),
}

impl Outcome {
    /// Whether the session moved
    #[inline]
    #[must_use]
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Facts about the plan that guards consult
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checks {
    /// Future goals not linked to any focus area
    pub unassigned_objectives: usize,
}

/// Whether `transition` from `session` is subject to the unassigned-objectives guard
#[must_use]
pub fn is_guarded(session: &Session, transition: Transition) -> bool {
    let Some((step, substep)) = session.position() else {
        return false;
    };
    match transition {
        Transition::NextSubstep => step == FOCUS_AREA_STEP && substep == Substep::B,
        Transition::NextStep => step == FOCUS_AREA_STEP,
        _ => false,
    }
}

/// Run a transition with guards in force
#[must_use]
pub fn apply(session: &Session, transition: Transition, checks: Checks) -> Outcome {
    if is_guarded(session, transition) && checks.unassigned_objectives > 0 {
        let signal = GuardSignal {
            warning: PlanWarning::UnassignedObjectives {
                count: checks.unassigned_objectives,
            },
            pending: transition,
        };
        tracing::debug!(?transition, count = checks.unassigned_objectives, "transition blocked");
        return Outcome::Blocked(signal);
    }
    proceed(session, transition)
}

/// Run a transition ignoring guards
#[must_use]
pub fn proceed(session: &Session, transition: Transition) -> Outcome {
    let outcome = match transition {
        Transition::NextSubstep => next_substep(session),
        Transition::PrevSubstep => prev_substep(session),
        Transition::NextStep => next_step(session),
        Transition::PrevStep => prev_step(session),
        Transition::Complete => complete(session),
        Transition::ContinueFromInterstitial => continue_from_interstitial(session),
        Transition::JumpTo(step) => jump_to(session, step),
    };
    if let Outcome::Moved { session: next, .. } = &outcome {
        tracing::debug!(?transition, from = ?session.stage, to = ?next.stage, "transition");
    }
    outcome
}

fn moved(session: &Session, stage: Stage, effects: Vec<Effect>) -> Outcome {
    let mut next = session.clone();
    next.stage = stage;
    for effect in &effects {
        if let Effect::MarkStepComplete(step) = effect {
            next.completed_steps.insert(*step);
        }
    }
    Outcome::Moved {
        session: next,
        effects,
    }
}

fn next_substep(session: &Session) -> Outcome {
    let Some((def, substep)) = session.current() else {
        return Outcome::Unchanged;
    };
    match def.after(substep) {
        Some(next) => moved(
            session,
            Stage::Step {
                step: def.number,
                substep: next,
            },
            vec![Effect::CollapseSubstep {
                step: def.number,
                substep,
            }],
        ),
        None => Outcome::Unchanged,
    }
}

fn prev_substep(session: &Session) -> Outcome {
    let Some((def, substep)) = session.current() else {
        return Outcome::Unchanged;
    };
    match def.before(substep) {
        Some(prev) => moved(
            session,
            Stage::Step {
                step: def.number,
                substep: prev,
            },
            Vec::new(),
        ),
        None => Outcome::Unchanged,
    }
}

fn next_step(session: &Session) -> Outcome {
    let Some((def, _)) = session.current() else {
        return Outcome::Unchanged;
    };
    if def.number == FOCUS_AREA_STEP {
        return moved(
            session,
            Stage::Interstitial,
            vec![Effect::PruneBlankFocusAreas],
        );
    }
    if def.number == LAST_STEP {
        return complete(session);
    }
    match steps::step(def.number + 1) {
        Some(next) => moved(
            session,
            Stage::start_of(next),
            vec![Effect::MarkStepComplete(def.number)],
        ),
        None => Outcome::Unchanged,
    }
}

fn prev_step(session: &Session) -> Outcome {
    let target = match session.stage {
        Stage::Step { step, .. } if step > FIRST_STEP => step - 1,
        Stage::Interstitial => FOCUS_AREA_STEP,
        Stage::Step { .. } | Stage::Dashboard => return Outcome::Unchanged,
    };
    match steps::step(target) {
        Some(def) => moved(
            session,
            Stage::Step {
                step: def.number,
                substep: def.last_substep(),
            },
            Vec::new(),
        ),
        None => Outcome::Unchanged,
    }
}

fn complete(session: &Session) -> Outcome {
    let Some((def, substep)) = session.current() else {
        return Outcome::Unchanged;
    };
    if def.number != LAST_STEP || def.last_substep() != substep {
        return Outcome::Unchanged;
    }
    moved(
        session,
        Stage::Dashboard,
        vec![Effect::MarkStepComplete(LAST_STEP)],
    )
}

fn continue_from_interstitial(session: &Session) -> Outcome {
    if session.stage != Stage::Interstitial {
        return Outcome::Unchanged;
    }
    match steps::step(FOCUS_AREA_STEP + 1) {
        Some(def) => moved(
            session,
            Stage::start_of(def),
            vec![Effect::MarkStepComplete(FOCUS_AREA_STEP)],
        ),
        None => Outcome::Unchanged,
    }
}

fn jump_to(session: &Session, step: StepNumber) -> Outcome {
    let Some(def) = steps::step(step) else {
        tracing::warn!(step, "jump to unknown step, falling back to dashboard");
        return moved(session, Stage::Dashboard, Vec::new());
    };
    if !session.is_step_accessible(step) {
        tracing::debug!(step, "step not yet accessible");
        return Outcome::Unchanged;
    }
    moved(session, Stage::start_of(def), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(step: StepNumber, substep: Substep) -> Session {
        Session {
            stage: Stage::Step { step, substep },
            completed_steps: (1..step).collect(),
        }
    }

    fn moved_to(outcome: Outcome) -> (Session, Vec<Effect>) {
        match outcome {
            Outcome::Moved { session, effects } => (session, effects),
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn next_substep_collapses_the_one_left() {
        let (next, effects) = moved_to(apply(&at(1, Substep::A), Transition::NextSubstep, Checks::default()));
        assert_eq!(next.position(), Some((1, Substep::B)));
        assert_eq!(
            effects,
            vec![Effect::CollapseSubstep {
                step: 1,
                substep: Substep::A
            }]
        );
    }

    #[test]
    fn substep_moves_stop_at_the_ends() {
        assert_eq!(
            apply(&at(1, Substep::C), Transition::NextSubstep, Checks::default()),
            Outcome::Unchanged
        );
        assert_eq!(
            apply(&at(1, Substep::A), Transition::PrevSubstep, Checks::default()),
            Outcome::Unchanged
        );
    }

    #[test]
    fn next_step_marks_complete_and_resets_substep() {
        let (next, effects) = moved_to(proceed(&at(2, Substep::B), Transition::NextStep));
        assert_eq!(next.position(), Some((3, Substep::A)));
        assert_eq!(effects, vec![Effect::MarkStepComplete(2)]);
        assert!(next.completed_steps.contains(&2));
    }

    #[test]
    fn prev_step_lands_on_last_substep() {
        let (next, _) = moved_to(proceed(&at(5, Substep::A), Transition::PrevStep));
        assert_eq!(next.position(), Some((4, Substep::C)));
        assert_eq!(proceed(&at(1, Substep::A), Transition::PrevStep), Outcome::Unchanged);
    }

    #[test]
    fn leaving_step_three_is_guarded() {
        let session = at(3, Substep::B);
        let checks = Checks {
            unassigned_objectives: 2,
        };
        assert_eq!(
            apply(&session, Transition::NextStep, checks),
            Outcome::Blocked(GuardSignal {
                warning: PlanWarning::UnassignedObjectives { count: 2 },
                pending: Transition::NextStep,
            })
        );

        let (next, effects) = moved_to(proceed(&session, Transition::NextStep));
        assert_eq!(next.stage, Stage::Interstitial);
        assert_eq!(effects, vec![Effect::PruneBlankFocusAreas]);
        assert!(!next.completed_steps.contains(&3));
    }

    #[test]
    fn next_substep_at_the_end_of_step_three_is_guarded() {
        let session = at(3, Substep::B);
        let checks = Checks {
            unassigned_objectives: 1,
        };
        assert!(is_guarded(&session, Transition::NextSubstep));
        assert_eq!(
            apply(&session, Transition::NextSubstep, checks),
            Outcome::Blocked(GuardSignal {
                warning: PlanWarning::UnassignedObjectives { count: 1 },
                pending: Transition::NextSubstep,
            })
        );
        assert_eq!(proceed(&session, Transition::NextSubstep), Outcome::Unchanged);
        assert_eq!(
            apply(&session, Transition::NextSubstep, Checks::default()),
            Outcome::Unchanged
        );
        assert!(!is_guarded(&at(3, Substep::A), Transition::NextSubstep));
    }

    #[test]
    fn unguarded_when_all_goals_assigned() {
        let outcome = apply(&at(3, Substep::B), Transition::NextStep, Checks::default());
        assert!(outcome.is_moved());
    }

    #[test]
    fn interstitial_continue_and_back() {
        let session = Session {
            stage: Stage::Interstitial,
            completed_steps: [1, 2].into_iter().collect(),
        };
        let (next, effects) = moved_to(proceed(&session, Transition::ContinueFromInterstitial));
        assert_eq!(next.position(), Some((4, Substep::A)));
        assert_eq!(effects, vec![Effect::MarkStepComplete(3)]);

        let (back, _) = moved_to(proceed(&session, Transition::PrevStep));
        assert_eq!(back.position(), Some((3, Substep::B)));
    }

    #[test]
    fn complete_only_from_last_substep_of_last_step() {
        assert_eq!(proceed(&at(6, Substep::C), Transition::Complete), Outcome::Unchanged);
        let (next, effects) = moved_to(proceed(&at(7, Substep::A), Transition::Complete));
        assert_eq!(next.stage, Stage::Dashboard);
        assert_eq!(effects, vec![Effect::MarkStepComplete(7)]);
    }

    #[test]
    fn visibility_and_completion() {
        let session = at(4, Substep::B);
        assert!(session.is_visible(Substep::A));
        assert!(session.is_visible(Substep::B));
        assert!(!session.is_visible(Substep::C));
        assert!(session.is_complete(Substep::A));
        assert!(!session.is_complete(Substep::B));

        let dashboard = Session {
            stage: Stage::Dashboard,
            ..Session::default()
        };
        assert!(!dashboard.is_visible(Substep::A));
    }

    #[test]
    fn jump_respects_access_and_falls_back() {
        let session = at(2, Substep::A);
        assert_eq!(proceed(&session, Transition::JumpTo(5)), Outcome::Unchanged);
        let (next, _) = moved_to(proceed(&session, Transition::JumpTo(1)));
        assert_eq!(next.position(), Some((1, Substep::A)));
        let (next, _) = moved_to(proceed(&session, Transition::JumpTo(9)));
        assert_eq!(next.stage, Stage::Dashboard);
    }

    #[test]
    fn restore_from_progress() {
        let mut progress = StepProgress::default();
        progress.current_step = 4;
        progress.current_substep = Substep::C;
        assert_eq!(Session::restore(&progress).position(), Some((4, Substep::C)));

        progress.current_step = 7;
        progress.current_substep = Substep::C;
        assert_eq!(Session::restore(&progress).position(), Some((7, Substep::A)));

        progress.current_step = 12;
        assert_eq!(Session::restore(&progress).stage, Stage::Dashboard);

        let mut parked = StepProgress::default();
        parked.at_interstitial = true;
        assert_eq!(Session::restore(&parked).stage, Stage::Interstitial);

        let mut finished = StepProgress::default();
        finished.mark_complete(7);
        assert_eq!(Session::restore(&finished).stage, Stage::Dashboard);
    }
}
