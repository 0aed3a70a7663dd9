//! Wizard flow against an in-memory store

use planner_model::{FocusArea, PlanWarning, Substep};
use planner_store::{MemoryStorage, RecordStore};
use planner_test_utils::{onboarded_store, store_with_goals};
use planner_wizard::machine::{self, Checks, GuardSignal, Outcome, Session, Stage, Transition};
use planner_wizard::steps::{self, STEPS};
use planner_wizard::{Navigation, RecordingNavigator, Route, Wizard};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

type TestWizard = Wizard<Arc<MemoryStorage>, RecordingNavigator>;

fn wizard_at(store: RecordStore<Arc<MemoryStorage>>, step: u8, substep: Substep) -> TestWizard {
    for done in 1..step {
        store.mark_step_complete(done).unwrap();
    }
    store.set_step_position(step, substep).unwrap();
    Wizard::new(store, RecordingNavigator::new())
}

fn goals_fixture() -> RecordStore<Arc<MemoryStorage>> {
    let mut linked = FocusArea::new("Health", "🏃", "");
    linked.link_idea("Run a marathon");
    let blank = FocusArea::new("   ", "", "");
    store_with_goals(&["Run a marathon", "Learn piano"], vec![linked, blank])
}

#[test]
fn guard_blocks_before_any_mutation() {
    let mut wizard = wizard_at(goals_fixture(), 3, Substep::B);

    let Navigation::Blocked(signal) = wizard.next_step() else {
        panic!("expected the move to be held back");
    };
    assert_eq!(signal.warning, PlanWarning::UnassignedObjectives { count: 1 });
    assert_eq!(signal.pending, Transition::NextStep);

    assert_eq!(wizard.store().focus_areas().len(), 2);
    assert!(!wizard.store().step_progress().is_complete(3));
    assert_eq!(
        wizard.session().stage,
        Stage::Step {
            step: 3,
            substep: Substep::B
        }
    );
    assert!(wizard.navigator().routes().is_empty());
    assert_eq!(wizard.pending(), Some(signal));
}

#[test]
fn proceeding_prunes_and_parks_at_interstitial() {
    let mut wizard = wizard_at(goals_fixture(), 3, Substep::B);
    assert!(matches!(wizard.next_step(), Navigation::Blocked(_)));

    assert_eq!(wizard.proceed_anyway(), Navigation::Moved(Route::Transition));
    let areas = wizard.store().focus_areas();
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].title, "Health");
    assert!(!wizard.store().step_progress().is_complete(3));
    assert!(wizard.pending().is_none());

    assert_eq!(
        wizard.continue_from_interstitial(),
        Navigation::Moved(Route::Step {
            step: 4,
            substep: Substep::A
        })
    );
    assert!(wizard.store().step_progress().is_complete(3));
}

#[test]
fn next_substep_at_the_end_of_step_three_warns_then_stays() {
    let mut wizard = wizard_at(goals_fixture(), 3, Substep::B);
    let Navigation::Blocked(signal) = wizard.next_substep() else {
        panic!("expected the unassigned goals warning");
    };
    assert_eq!(signal.pending, Transition::NextSubstep);
    assert_eq!(signal.warning, PlanWarning::UnassignedObjectives { count: 1 });

    assert_eq!(wizard.proceed_anyway(), Navigation::Stayed);
    assert_eq!(wizard.store().focus_areas().len(), 2);
    let progress = wizard.store().step_progress();
    assert_eq!((progress.current_step, progress.current_substep), (3, Substep::B));
}

#[test]
fn dismissed_warning_leaves_everything_in_place() {
    let mut wizard = wizard_at(goals_fixture(), 3, Substep::B);
    assert!(matches!(wizard.next_step(), Navigation::Blocked(_)));
    assert!(wizard.dismiss_warning().is_some());
    assert_eq!(wizard.proceed_anyway(), Navigation::Stayed);
    assert_eq!(wizard.store().focus_areas().len(), 2);
}

#[test]
fn linking_every_goal_lifts_the_guard() {
    let store = goals_fixture();
    let id = store.focus_areas()[0].id.clone();
    store
        .update_focus_area(&id, |a| a.link_idea("Learn piano"))
        .unwrap();
    let mut wizard = wizard_at(store, 3, Substep::B);
    assert_eq!(wizard.next_step(), Navigation::Moved(Route::Transition));
}

#[test]
fn interstitial_survives_a_restart() {
    let storage = Arc::new(MemoryStorage::new());
    let store = RecordStore::new(Arc::clone(&storage));
    store.update_onboarding(|o| o.completed = true).unwrap();
    let mut wizard = wizard_at(store, 3, Substep::B);
    assert_eq!(wizard.next_step(), Navigation::Moved(Route::Transition));
    assert_eq!(wizard.take_break(), Navigation::Stayed);

    let mut reopened = Wizard::new(RecordStore::new(storage), RecordingNavigator::new());
    assert_eq!(reopened.start(), Route::Transition);
    assert_eq!(
        reopened.continue_from_interstitial(),
        Navigation::Moved(Route::Step {
            step: 4,
            substep: Substep::A
        })
    );
}

#[test]
fn full_flow_reaches_dashboard() {
    let storage = Arc::new(MemoryStorage::new());
    let mut wizard = Wizard::new(RecordStore::new(Arc::clone(&storage)), RecordingNavigator::new());

    assert_eq!(wizard.start(), Route::Onboarding { screen: 1 });
    wizard.save_profile("Alex", 2027).unwrap();
    wizard.next_onboarding_screen().unwrap();
    wizard.next_onboarding_screen().unwrap();

    let mut moves = 0;
    while wizard.session().stage != Stage::Dashboard {
        let nav = match wizard.session().stage {
            Stage::Interstitial => wizard.continue_from_interstitial(),
            Stage::Step { .. } if wizard.session().at_last_substep() => wizard.next_step(),
            Stage::Step { .. } => wizard.next_substep(),
            Stage::Dashboard => unreachable!(),
        };
        assert!(matches!(nav, Navigation::Moved(_)), "stuck at {:?}", wizard.session());
        moves += 1;
        assert!(moves < 50);
    }

    let progress = wizard.store().step_progress();
    assert!(progress.is_finished());
    assert_eq!(wizard.store().overall_progress(), 100);
    assert_eq!(wizard.navigator().last(), Some(Route::Dashboard));

    // 9 substep advances, 7 step exits, 1 interstitial exit
    assert_eq!(moves, 9 + 7 + 1);

    let mut reopened = Wizard::new(RecordStore::new(storage), RecordingNavigator::new());
    assert_eq!(reopened.start(), Route::Dashboard);
    assert_eq!(
        reopened.jump_to_step(2),
        Navigation::Moved(Route::Step {
            step: 2,
            substep: Substep::A
        })
    );
}

#[test]
fn locked_steps_cannot_be_jumped_to() {
    let mut wizard = Wizard::new(onboarded_store("Sam"), RecordingNavigator::new());
    assert_eq!(wizard.jump_to_step(5), Navigation::Stayed);
    assert_eq!(
        wizard.jump_to_step(1),
        Navigation::Moved(Route::Step {
            step: 1,
            substep: Substep::A
        })
    );
}

fn session_at(step: u8, substep: Substep) -> Session {
    Session {
        stage: Stage::Step { step, substep },
        ..Session::new()
    }
}

proptest! {
    #[test]
    fn boundary_substep_moves_are_no_ops(index in 0..STEPS.len(), unassigned in 0usize..4) {
        let def = &STEPS[index];
        let checks = Checks { unassigned_objectives: unassigned };

        let first = session_at(def.number, def.first_substep());
        prop_assert_eq!(machine::apply(&first, Transition::PrevSubstep, checks), Outcome::Unchanged);

        let last = session_at(def.number, def.last_substep());
        prop_assert_eq!(machine::proceed(&last, Transition::NextSubstep), Outcome::Unchanged);
        let expected = if def.number == steps::FOCUS_AREA_STEP && unassigned > 0 {
            Outcome::Blocked(GuardSignal {
                warning: PlanWarning::UnassignedObjectives { count: unassigned },
                pending: Transition::NextSubstep,
            })
        } else {
            Outcome::Unchanged
        };
        prop_assert_eq!(machine::apply(&last, Transition::NextSubstep, checks), expected);
    }

    #[test]
    fn current_substep_is_visible_but_not_complete(index in 0..STEPS.len(), pick in 0usize..3) {
        let def = &STEPS[index];
        let current = def.substeps[pick % def.substeps.len()];
        let session = session_at(def.number, current);

        prop_assert!(session.is_visible(current));
        prop_assert!(!session.is_complete(current));
        for s in def.substeps {
            prop_assert!(!session.is_complete(*s) || session.is_visible(*s));
            prop_assert_eq!(session.is_visible(*s), def.index_of(*s) <= def.index_of(current));
        }
    }

    #[test]
    fn blocked_moves_keep_the_session(unassigned in 1usize..10) {
        let session = session_at(steps::FOCUS_AREA_STEP, Substep::B);
        let checks = Checks { unassigned_objectives: unassigned };
        match machine::apply(&session, Transition::NextStep, checks) {
            Outcome::Blocked(signal) => prop_assert_eq!(
                signal.warning,
                PlanWarning::UnassignedObjectives { count: unassigned }
            ),
            other => prop_assert!(false, "expected block, got {:?}", other),
        }
    }
}
