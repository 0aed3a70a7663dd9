//! Focus areas and their strategy breakdowns
//!
//! Strategies are plain texts. Sub-steps, milestones, timings and statuses
//! hang off text-keyed maps: `no_sub_steps_flags`, `action_sub_steps` and
//! `action_final_milestones` are keyed by strategy text, while
//! `action_timings` and `action_statuses` are keyed by actionable-item text
//! (the strategy itself, one of its sub-steps, or its final milestone).
//! Two identical texts therefore share one timing and one status.

use crate::ids::FocusAreaId;
use crate::lenient;
use crate::limits::PlanWarning;
use crate::records::Idea;
use crate::status::{ActionStatus, FocusAreaStatus, Timing};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A multi-year theme grouping related strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusArea {
    /// Stable identifier
    pub id: FocusAreaId,
    /// Title; blank areas are discarded when leaving step 3
    #[serde(default)]
    pub title: String,
    /// Decorative emoji
    #[serde(default)]
    pub emoji: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Texts of future goals assigned to this area
    #[serde(default)]
    pub linked_ideas: Vec<String>,
    /// Candidate strategies
    #[serde(default)]
    pub actions: Vec<Idea>,
    /// Up to three strategy texts surfaced first
    #[serde(default)]
    pub prioritized_actions: Vec<String>,
    /// Strategies explicitly marked as having no sub-steps
    #[serde(default)]
    pub no_sub_steps_flags: IndexMap<String, bool>,
    /// Ordered sub-steps per strategy
    #[serde(default)]
    pub action_sub_steps: IndexMap<String, Vec<String>>,
    /// Culminating milestone per strategy
    #[serde(default)]
    pub action_final_milestones: IndexMap<String, String>,
    /// Timing bucket per actionable item
    #[serde(default, deserialize_with = "lenient::map")]
    pub action_timings: IndexMap<String, Timing>,
    /// Status per actionable item
    #[serde(default, deserialize_with = "lenient::map")]
    pub action_statuses: IndexMap<String, ActionStatus>,
    /// Overall status
    #[serde(default, deserialize_with = "lenient::value")]
    pub status: FocusAreaStatus,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Fields this build does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FocusArea {
    /// Create an empty focus area with a fresh id
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        emoji: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: FocusAreaId::generate(),
            title: title.into(),
            emoji: emoji.into(),
            description: description.into(),
            linked_ideas: Vec::new(),
            actions: Vec::new(),
            prioritized_actions: Vec::new(),
            no_sub_steps_flags: IndexMap::new(),
            action_sub_steps: IndexMap::new(),
            action_final_milestones: IndexMap::new(),
            action_timings: IndexMap::new(),
            action_statuses: IndexMap::new(),
            status: FocusAreaStatus::NotStarted,
            created_at: Some(Utc::now()),
            updated_at: None,
            extra: Map::new(),
        }
    }

    /// Whether the title is empty or whitespace
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// Stamp the last-write time
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Add a strategy; empty text is ignored
    pub fn add_action(&mut self, text: &str) -> Option<&Idea> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.actions.push(Idea::new(text));
        self.actions.last()
    }

    /// Whether a strategy is prioritized
    #[inline]
    #[must_use]
    pub fn is_prioritized(&self, strategy: &str) -> bool {
        self.prioritized_actions.iter().any(|a| a == strategy)
    }

    /// Whether selecting `strategy` stays within `limit`
    #[must_use]
    pub fn can_prioritize(&self, strategy: &str, limit: usize) -> bool {
        self.is_prioritized(strategy) || self.prioritized_actions.len() < limit
    }

    /// Select or deselect a priority strategy
    ///
    /// Selecting beyond `limit` leaves the list untouched and reports
    /// [`PlanWarning::PriorityLimit`].
    pub fn toggle_priority(
        &mut self,
        strategy: &str,
        checked: bool,
        limit: usize,
    ) -> Result<(), PlanWarning> {
        if !checked {
            self.prioritized_actions.retain(|a| a != strategy);
            return Ok(());
        }
        if !self.can_prioritize(strategy, limit) {
            return Err(PlanWarning::PriorityLimit { limit });
        }
        if !self.is_prioritized(strategy) {
            self.prioritized_actions.push(strategy.to_string());
        }
        Ok(())
    }

    /// Whether a strategy is flagged as having no sub-steps
    #[inline]
    #[must_use]
    pub fn has_no_sub_steps_flag(&self, strategy: &str) -> bool {
        self.no_sub_steps_flags.get(strategy).copied().unwrap_or(false)
    }

    /// Set the "no sub-steps" flag; setting it discards existing sub-steps and milestone
    pub fn set_no_sub_steps(&mut self, strategy: &str, flag: bool) {
        if flag {
            self.action_sub_steps.shift_remove(strategy);
            self.action_final_milestones.shift_remove(strategy);
        }
        self.no_sub_steps_flags.insert(strategy.to_string(), flag);
    }

    /// Sub-steps recorded for a strategy
    #[must_use]
    pub fn sub_steps(&self, strategy: &str) -> &[String] {
        self.action_sub_steps
            .get(strategy)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Final milestone recorded for a strategy, if non-empty
    #[must_use]
    pub fn final_milestone(&self, strategy: &str) -> Option<&str> {
        self.action_final_milestones
            .get(strategy)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    /// Append a sub-step; empty text is ignored
    pub fn add_sub_step(&mut self, strategy: &str, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.action_sub_steps
            .entry(strategy.to_string())
            .or_default()
            .push(text.to_string());
        true
    }

    /// Set the final milestone; empty text is ignored
    pub fn set_final_milestone(&mut self, strategy: &str, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.action_final_milestones
            .insert(strategy.to_string(), text.to_string());
        true
    }

    /// Remove a sub-step by position; drops the strategy key once empty
    pub fn remove_sub_step(&mut self, strategy: &str, index: usize) -> Option<String> {
        let steps = self.action_sub_steps.get_mut(strategy)?;
        if index >= steps.len() {
            return None;
        }
        let removed = steps.remove(index);
        if steps.is_empty() {
            self.action_sub_steps.shift_remove(strategy);
        }
        Some(removed)
    }

    /// Remove the final milestone
    pub fn clear_final_milestone(&mut self, strategy: &str) -> Option<String> {
        self.action_final_milestones.shift_remove(strategy)
    }

    /// Assign or clear an actionable item's timing bucket
    pub fn set_action_timing(&mut self, item: &str, timing: Option<Timing>) {
        match timing {
            Some(t) => {
                self.action_timings.insert(item.to_string(), t);
            }
            None => {
                self.action_timings.shift_remove(item);
            }
        }
    }

    /// Set an actionable item's status
    pub fn set_action_status(&mut self, item: &str, status: ActionStatus) {
        self.action_statuses.insert(item.to_string(), status);
    }

    /// Status of an actionable item, `not-started` when unrecorded
    #[must_use]
    pub fn status_of(&self, item: &str) -> ActionStatus {
        self.action_statuses.get(item).copied().unwrap_or_default()
    }

    /// Link a future goal; returns `false` if already linked or empty
    pub fn link_idea(&mut self, text: &str) -> bool {
        if text.is_empty() || self.linked_ideas.iter().any(|i| i == text) {
            return false;
        }
        self.linked_ideas.push(text.to_string());
        true
    }

    /// Unlink a future goal
    pub fn unlink_idea(&mut self, text: &str) -> bool {
        let before = self.linked_ideas.len();
        self.linked_ideas.retain(|i| i != text);
        before != self.linked_ideas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn area_with_actions(texts: &[&str]) -> FocusArea {
        let mut area = FocusArea::new("Health", "💪", "");
        for t in texts {
            area.add_action(t);
        }
        area
    }

    #[test]
    fn priority_limit_leaves_list_unchanged() {
        let mut area = area_with_actions(&["a", "b", "c", "d"]);
        for t in ["a", "b", "c"] {
            area.toggle_priority(t, true, 3).unwrap();
        }
        assert!(!area.can_prioritize("d", 3));
        assert!(area.can_prioritize("a", 3));
        let err = area.toggle_priority("d", true, 3).unwrap_err();
        assert_eq!(err, PlanWarning::PriorityLimit { limit: 3 });
        assert_eq!(area.prioritized_actions, vec!["a", "b", "c"]);
    }

    #[test]
    fn reselecting_at_limit_is_not_a_warning() {
        let mut area = area_with_actions(&["a", "b", "c"]);
        for t in ["a", "b", "c"] {
            area.toggle_priority(t, true, 3).unwrap();
        }
        assert!(area.toggle_priority("b", true, 3).is_ok());
        area.toggle_priority("b", false, 3).unwrap();
        assert_eq!(area.prioritized_actions, vec!["a", "c"]);
    }

    #[test]
    fn no_sub_steps_flag_discards_breakdown() {
        let mut area = area_with_actions(&["Run marathon"]);
        area.add_sub_step("Run marathon", "Join gym");
        area.set_final_milestone("Run marathon", "Finish");
        area.set_no_sub_steps("Run marathon", true);

        assert!(area.sub_steps("Run marathon").is_empty());
        assert!(area.final_milestone("Run marathon").is_none());
        assert!(area.has_no_sub_steps_flag("Run marathon"));

        area.set_no_sub_steps("Run marathon", false);
        assert!(!area.has_no_sub_steps_flag("Run marathon"));
    }

    #[test]
    fn removing_last_sub_step_drops_key() {
        let mut area = area_with_actions(&["s"]);
        assert!(area.add_sub_step("s", " one "));
        assert!(!area.add_sub_step("s", "   "));
        assert_eq!(area.sub_steps("s").to_vec(), vec!["one".to_string()]);
        assert_eq!(area.remove_sub_step("s", 3), None);
        assert_eq!(area.remove_sub_step("s", 0).as_deref(), Some("one"));
        assert!(!area.action_sub_steps.contains_key("s"));
    }

    #[test]
    fn timing_none_removes_entry() {
        let mut area = area_with_actions(&["s"]);
        area.set_action_timing("s", Some(Timing::Q2));
        assert_eq!(area.action_timings.get("s"), Some(&Timing::Q2));
        area.set_action_timing("s", None);
        assert!(area.action_timings.is_empty());
    }

    #[test]
    fn status_defaults_to_not_started() {
        let mut area = area_with_actions(&["s"]);
        assert_eq!(area.status_of("s"), ActionStatus::NotStarted);
        area.set_action_status("s", ActionStatus::Complete);
        assert_eq!(area.status_of("s"), ActionStatus::Complete);
    }

    #[test]
    fn link_idea_deduplicates() {
        let mut area = FocusArea::new("", "", "");
        assert!(area.is_blank());
        assert!(area.link_idea("Get fit"));
        assert!(!area.link_idea("Get fit"));
        assert!(area.unlink_idea("Get fit"));
        assert!(!area.unlink_idea("Get fit"));
    }

    #[test]
    fn deserializes_stored_document() {
        let area: FocusArea = serde_json::from_str(
            r#"{
                "id": "fa1",
                "title": "Health",
                "actions": [{"id": "1", "text": "Run marathon"}],
                "prioritizedActions": ["Run marathon"],
                "actionSubSteps": {"Run marathon": ["Join gym", "Train 10k"]},
                "actionFinalMilestones": {"Run marathon": "Finish marathon"},
                "actionTimings": {"Join gym": "q1", "Train 10k": "q2", "Finish marathon": "q4", "Stale": ""},
                "expandedActions": {"Run marathon": true},
                "topActions": []
            }"#,
        )
        .unwrap();
        assert_eq!(area.action_timings.len(), 3);
        assert_eq!(area.final_milestone("Run marathon"), Some("Finish marathon"));
        assert!(area.extra.contains_key("expandedActions"));
        assert_eq!(area.status, FocusAreaStatus::NotStarted);
    }
}
