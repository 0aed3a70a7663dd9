//! Future goals that no focus area has claimed

use planner_model::{FocusArea, Idea, PlanWarning, VisionRecord};
use std::collections::HashSet;

/// Future goals whose text is not linked by any focus area, in stored order
pub fn unassigned_objectives<'a>(vision: &'a VisionRecord, areas: &[FocusArea]) -> Vec<&'a Idea> {
    let linked: HashSet<&str> = areas
        .iter()
        .flat_map(|a| a.linked_ideas.iter().map(String::as_str))
        .collect();
    vision
        .future_goals
        .iter()
        .filter(|goal| !linked.contains(goal.text.as_str()))
        .collect()
}

/// Warning to raise before leaving focus-area setup, if any goal is unclaimed
pub fn unassigned_warning(vision: &VisionRecord, areas: &[FocusArea]) -> Option<PlanWarning> {
    let count = unassigned_objectives(vision, areas).len();
    (count > 0).then_some(PlanWarning::UnassignedObjectives { count })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vision(goals: &[&str]) -> VisionRecord {
        let mut vision = VisionRecord::default();
        vision.future_goals = goals.iter().map(|g| Idea::new(*g)).collect();
        vision
    }

    #[test]
    fn counts_goals_not_linked_anywhere() {
        let vision = vision(&["Run a marathon", "Learn Spanish", "Write a book"]);
        let mut health = FocusArea::new("Health", "", "");
        health.link_idea("Run a marathon");
        let mut growth = FocusArea::new("Growth", "", "");
        growth.link_idea("Write a book");

        let unassigned = unassigned_objectives(&vision, &[health, growth]);
        let texts: Vec<_> = unassigned.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Learn Spanish"]);
    }

    #[test]
    fn warning_only_when_something_is_unassigned() {
        let vision = vision(&["A", "B"]);
        assert_eq!(
            unassigned_warning(&vision, &[]),
            Some(PlanWarning::UnassignedObjectives { count: 2 })
        );

        let mut area = FocusArea::new("All", "", "");
        area.link_idea("A");
        area.link_idea("B");
        assert_eq!(unassigned_warning(&vision, &[area]), None);
    }
}
