//! Testing utilities for the life planner workspace
//!
//! Shared fixtures and store builders.

#![allow(missing_docs)]

use planner_model::{FocusArea, FocusAreaId, Idea, IdeaCategory, Timing, UserPatch};
use planner_store::{MemoryStorage, RecordStore};
use std::sync::Arc;

/// Focus area "fa1" with one prioritized strategy broken into two
/// sub-steps and a final milestone, each timed.
pub fn marathon_area() -> FocusArea {
    let mut area = FocusArea::new("Prioritize well-being", "🏃", "Get fit");
    area.id = FocusAreaId::from("fa1");
    area.actions.push(Idea::new("Run marathon"));
    area.prioritized_actions.push("Run marathon".to_string());
    area.add_sub_step("Run marathon", "Join gym");
    area.add_sub_step("Run marathon", "Train 10k");
    area.set_final_milestone("Run marathon", "Finish marathon");
    area.set_action_timing("Join gym", Some(Timing::Q1));
    area.set_action_timing("Train 10k", Some(Timing::Q2));
    area.set_action_timing("Finish marathon", Some(Timing::Q4));
    area
}

/// Focus area with only plain strategies, none broken down
pub fn plain_area(title: &str, strategies: &[&str]) -> FocusArea {
    let mut area = FocusArea::new(title, "", "");
    for s in strategies {
        area.add_action(s);
    }
    area
}

pub fn memory_store() -> RecordStore<Arc<MemoryStorage>> {
    RecordStore::new(Arc::new(MemoryStorage::new()))
}

/// Store past onboarding with a named user
pub fn onboarded_store(name: &str) -> RecordStore<Arc<MemoryStorage>> {
    let store = memory_store();
    store
        .set_user(&UserPatch::name(name).with_planning_year(2027))
        .unwrap();
    store.update_onboarding(|o| o.completed = true).unwrap();
    store
}

/// Store holding the given future goals and focus areas
pub fn store_with_goals(
    goals: &[&str],
    areas: Vec<FocusArea>,
) -> RecordStore<Arc<MemoryStorage>> {
    let store = onboarded_store("Alex");
    for goal in goals {
        store.add_idea(IdeaCategory::FutureGoals, goal).unwrap();
    }
    store.set_focus_areas(&areas).unwrap();
    store
}
