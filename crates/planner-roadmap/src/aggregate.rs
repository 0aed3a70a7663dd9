//! Focus-area aggregation into timing buckets

use planner_model::{ActionStatus, FocusArea, FocusAreaId, Timing};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Strategy texts of an area: prioritized first, then the rest in stored order
pub fn strategies(area: &FocusArea) -> Vec<&str> {
    let mut out: Vec<&str> = area.prioritized_actions.iter().map(String::as_str).collect();
    out.extend(
        area.actions
            .iter()
            .map(|a| a.text.as_str())
            .filter(|text| !area.is_prioritized(text)),
    );
    out
}

/// Actionable-item texts for one strategy
///
/// A strategy flagged as having no sub-steps, or with neither sub-steps
/// nor a final milestone, is its own single item. Otherwise the items are
/// its sub-steps in order followed by the milestone, when one is set.
pub fn strategy_items<'a>(area: &'a FocusArea, strategy: &'a str) -> Vec<&'a str> {
    let sub_steps = area.sub_steps(strategy);
    let milestone = area.final_milestone(strategy);

    if area.has_no_sub_steps_flag(strategy) || (sub_steps.is_empty() && milestone.is_none()) {
        return vec![strategy];
    }

    let mut items: Vec<&str> = sub_steps.iter().map(String::as_str).collect();
    items.extend(milestone);
    items
}

/// Every actionable-item text of an area, in strategy order
pub fn actionable_items(area: &FocusArea) -> Vec<&str> {
    strategies(area)
        .into_iter()
        .flat_map(|s| strategy_items(area, s))
        .collect()
}

/// A scheduled item as shown in aggregated views
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionableItem {
    /// Item text
    pub text: String,
    /// Owning focus area
    pub focus_area_id: FocusAreaId,
    /// Owning focus area's title
    pub focus_area_title: String,
    /// Owning focus area's emoji
    pub focus_area_emoji: String,
    /// Progress, `not-started` when never set
    pub status: ActionStatus,
}

/// Count of roadmap items per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    /// Items not started
    pub not_started: usize,
    /// Items under way
    pub in_progress: usize,
    /// Items done
    pub complete: usize,
}

impl StatusSummary {
    /// Total items counted
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.not_started + self.in_progress + self.complete
    }

    fn record(&mut self, status: ActionStatus) {
        match status {
            ActionStatus::NotStarted => self.not_started += 1,
            ActionStatus::InProgress => self.in_progress += 1,
            ActionStatus::Complete => self.complete += 1,
        }
    }
}

/// Scheduled items grouped by timing bucket
///
/// Buckets are always iterated q1, q2, q3, q4, might. Inside a bucket
/// items keep input order: focus area, then strategy, then sub-step.
/// Items without a timing are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roadmap {
    buckets: [Vec<ActionableItem>; 5],
}

impl Roadmap {
    /// Aggregate a list of focus areas
    pub fn build(areas: &[FocusArea]) -> Self {
        let mut roadmap = Self::default();
        for area in areas {
            for text in actionable_items(area) {
                let Some(&timing) = area.action_timings.get(text) else {
                    continue;
                };
                roadmap.buckets[timing.index()].push(ActionableItem {
                    text: text.to_string(),
                    focus_area_id: area.id.clone(),
                    focus_area_title: area.title.clone(),
                    focus_area_emoji: area.emoji.clone(),
                    status: area.status_of(text),
                });
            }
        }
        tracing::trace!(areas = areas.len(), items = roadmap.len(), "roadmap aggregated");
        roadmap
    }

    /// Items in one bucket
    #[inline]
    #[must_use]
    pub fn bucket(&self, timing: Timing) -> &[ActionableItem] {
        &self.buckets[timing.index()]
    }

    /// Every bucket in display order, empty ones included
    pub fn iter(&self) -> impl Iterator<Item = (Timing, &[ActionableItem])> {
        Timing::ALL
            .into_iter()
            .map(move |t| (t, self.bucket(t)))
    }

    /// Only the buckets holding something
    pub fn non_empty(&self) -> impl Iterator<Item = (Timing, &[ActionableItem])> {
        self.iter().filter(|(_, items)| !items.is_empty())
    }

    /// Whether nothing is scheduled
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Number of scheduled items
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Items per status across all buckets
    #[must_use]
    pub fn status_summary(&self) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for item in self.buckets.iter().flatten() {
            summary.record(item.status);
        }
        summary
    }
}

impl Serialize for Roadmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Timing::ALL.len()))?;
        for (timing, items) in self.iter() {
            map.serialize_entry(timing.as_str(), items)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_model::PlanLimits;

    fn area() -> FocusArea {
        let mut area = FocusArea::new("Health", "💪", "");
        area.add_action("Sleep more");
        area.add_action("Run marathon");
        area.add_action("Eat greens");
        area.toggle_priority("Run marathon", true, PlanLimits::DEFAULT_MAX_PRIORITY_ACTIONS)
            .unwrap();
        area
    }

    #[test]
    fn priority_strategies_come_first() {
        assert_eq!(
            strategies(&area()),
            vec!["Run marathon", "Sleep more", "Eat greens"]
        );
    }

    #[test]
    fn strategy_without_breakdown_is_its_own_item() {
        let area = area();
        assert_eq!(strategy_items(&area, "Sleep more"), vec!["Sleep more"]);
    }

    #[test]
    fn milestone_alone_replaces_strategy() {
        let mut area = area();
        area.set_final_milestone("Eat greens", "Cook weekly");
        assert_eq!(strategy_items(&area, "Eat greens"), vec!["Cook weekly"]);
    }

    #[test]
    fn no_sub_steps_flag_wins() {
        let mut area = area();
        area.add_sub_step("Run marathon", "Join gym");
        area.no_sub_steps_flags.insert("Run marathon".into(), true);
        assert_eq!(strategy_items(&area, "Run marathon"), vec!["Run marathon"]);
    }

    #[test]
    fn untimed_items_are_omitted() {
        let mut area = area();
        area.set_action_timing("Sleep more", Some(Timing::Might));
        let roadmap = Roadmap::build(&[area]);
        assert_eq!(roadmap.len(), 1);
        assert_eq!(roadmap.bucket(Timing::Might)[0].text, "Sleep more");
        assert_eq!(
            roadmap.bucket(Timing::Might)[0].status,
            ActionStatus::NotStarted
        );
    }

    #[test]
    fn shared_text_shares_timing_and_status() {
        let mut area = area();
        area.add_sub_step("Run marathon", "Buy shoes");
        area.add_sub_step("Eat greens", "Buy shoes");
        area.set_action_timing("Buy shoes", Some(Timing::Q1));
        area.set_action_status("Buy shoes", ActionStatus::Complete);
        let roadmap = Roadmap::build(&[area]);
        let q1 = roadmap.bucket(Timing::Q1);
        assert_eq!(q1.len(), 2);
        assert!(q1.iter().all(|i| i.status == ActionStatus::Complete));
    }

    #[test]
    fn status_summary_counts() {
        let mut area = area();
        for (text, timing, status) in [
            ("Sleep more", Timing::Q1, ActionStatus::Complete),
            ("Run marathon", Timing::Q2, ActionStatus::InProgress),
            ("Eat greens", Timing::Q2, ActionStatus::NotStarted),
        ] {
            area.set_action_timing(text, Some(timing));
            area.set_action_status(text, status);
        }
        let summary = Roadmap::build(&[area]).status_summary();
        assert_eq!(
            summary,
            StatusSummary {
                not_started: 1,
                in_progress: 1,
                complete: 1
            }
        );
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn serializes_every_bucket_in_order() {
        let json = serde_json::to_string(&Roadmap::default()).unwrap();
        assert_eq!(json, r#"{"q1":[],"q2":[],"q3":[],"q4":[],"might":[]}"#);
    }
}
