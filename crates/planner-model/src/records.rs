//! Profile, vision, whimsy, legacy quarterly and settings records

use crate::ids::{FocusAreaId, IdeaId};
use crate::lenient;
use crate::status::{ActionStatus, Timing, UnknownValue, WhimsyStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A free-text entry ("bubble")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Stable identifier
    pub id: IdeaId,
    /// Entered text
    pub text: String,
    /// Fields this build does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Idea {
    /// Create an idea with a fresh id
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: IdeaId::generate(),
            text: text.into(),
            extra: Map::new(),
        }
    }
}

/// User profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Year being planned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planning_year: Option<i32>,
    /// Profile creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Fields this build does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial user update; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New planning year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planning_year: Option<i32>,
    /// Creation stamp (set once at onboarding)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserPatch {
    /// Patch that only renames
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// With planning year
    #[inline]
    #[must_use]
    pub fn with_planning_year(mut self, year: i32) -> Self {
        self.planning_year = Some(year);
        self
    }

    /// With creation stamp
    #[inline]
    #[must_use]
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}

/// Onboarding progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Onboarding {
    /// Whether onboarding finished
    #[serde(default)]
    pub completed: bool,
    /// Screen currently shown (1..=3)
    #[serde(default = "Onboarding::first_screen")]
    pub current_screen: u8,
    /// Fields this build does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Onboarding {
    /// Number of onboarding screens
    pub const SCREENS: u8 = 3;

    fn first_screen() -> u8 {
        1
    }
}

impl Default for Onboarding {
    fn default() -> Self {
        Self {
            completed: false,
            current_screen: Self::first_screen(),
            extra: Map::new(),
        }
    }
}

/// Category of vision idea lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdeaCategory {
    /// Step 1a brainstorm
    LifeVision,
    /// Step 2a areas of alignment
    HighMarks,
    /// Step 2b gaps
    Regrets,
    /// Step 3a near-term objectives
    FutureGoals,
    /// Step 4a proud of
    ProudOf,
    /// Step 4b learnings
    Learnings,
    /// Step 4c barriers
    Barriers,
}

impl IdeaCategory {
    /// Every category
    pub const ALL: [IdeaCategory; 7] = [
        Self::LifeVision,
        Self::HighMarks,
        Self::Regrets,
        Self::FutureGoals,
        Self::ProudOf,
        Self::Learnings,
        Self::Barriers,
    ];

    /// Short name used on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LifeVision => "vision",
            Self::HighMarks => "high-marks",
            Self::Regrets => "regrets",
            Self::FutureGoals => "goals",
            Self::ProudOf => "proud",
            Self::Learnings => "learnings",
            Self::Barriers => "barriers",
        }
    }
}

impl fmt::Display for IdeaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdeaCategory {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownValue {
                kind: "idea category",
                value: s.to_string(),
            })
    }
}

/// Vision, baseline, objectives and reflections gathered in steps 1-5
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionRecord {
    /// Life vision brainstorm
    #[serde(default)]
    pub life_vision_ideas: Vec<Idea>,
    /// Life vision statement
    #[serde(default)]
    pub life_vision_statement: String,
    /// Where life already matches the vision
    #[serde(default)]
    pub high_marks: Vec<Idea>,
    /// Gaps against the vision
    #[serde(default)]
    pub regrets: Vec<Idea>,
    /// Near-term objectives
    #[serde(default)]
    pub future_goals: Vec<Idea>,
    /// Planning horizon in years (3, 5 or 10)
    #[serde(default = "VisionRecord::default_years")]
    pub years_from_now: u32,
    /// Prior-year accomplishments
    #[serde(default)]
    pub proud_of: Vec<Idea>,
    /// Prior-year learnings
    #[serde(default)]
    pub learnings: Vec<Idea>,
    /// Barriers to objectives
    #[serde(default)]
    pub barriers: Vec<Idea>,
    /// Last write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Fields this build does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VisionRecord {
    /// Default horizon
    pub const DEFAULT_YEARS: u32 = 5;

    fn default_years() -> u32 {
        Self::DEFAULT_YEARS
    }

    /// Ideas in a category
    #[must_use]
    pub fn ideas(&self, category: IdeaCategory) -> &[Idea] {
        match category {
            IdeaCategory::LifeVision => &self.life_vision_ideas,
            IdeaCategory::HighMarks => &self.high_marks,
            IdeaCategory::Regrets => &self.regrets,
            IdeaCategory::FutureGoals => &self.future_goals,
            IdeaCategory::ProudOf => &self.proud_of,
            IdeaCategory::Learnings => &self.learnings,
            IdeaCategory::Barriers => &self.barriers,
        }
    }

    /// Mutable ideas in a category
    pub fn ideas_mut(&mut self, category: IdeaCategory) -> &mut Vec<Idea> {
        match category {
            IdeaCategory::LifeVision => &mut self.life_vision_ideas,
            IdeaCategory::HighMarks => &mut self.high_marks,
            IdeaCategory::Regrets => &mut self.regrets,
            IdeaCategory::FutureGoals => &mut self.future_goals,
            IdeaCategory::ProudOf => &mut self.proud_of,
            IdeaCategory::Learnings => &mut self.learnings,
            IdeaCategory::Barriers => &mut self.barriers,
        }
    }

    /// Remove an idea by id from every category; returns how many were removed
    pub fn remove_idea(&mut self, id: &IdeaId) -> usize {
        let mut removed = 0;
        for category in IdeaCategory::ALL {
            let list = self.ideas_mut(category);
            let before = list.len();
            list.retain(|idea| &idea.id != id);
            removed += before - list.len();
        }
        removed
    }
}

impl Default for VisionRecord {
    fn default() -> Self {
        Self {
            life_vision_ideas: Vec::new(),
            life_vision_statement: String::new(),
            high_marks: Vec::new(),
            regrets: Vec::new(),
            future_goals: Vec::new(),
            years_from_now: Self::DEFAULT_YEARS,
            proud_of: Vec::new(),
            learnings: Vec::new(),
            barriers: Vec::new(),
            updated_at: None,
            extra: Map::new(),
        }
    }
}

/// Entry on the whimsy list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhimsyItem {
    /// Stable identifier
    pub id: IdeaId,
    /// Entered text
    pub text: String,
    /// Dream or done
    #[serde(default, deserialize_with = "lenient::value")]
    pub status: WhimsyStatus,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Fields this build does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WhimsyItem {
    /// Create a new dream
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: IdeaId::generate(),
            text: text.into(),
            status: WhimsyStatus::StillADream,
            created_at: Some(Utc::now()),
            extra: Map::new(),
        }
    }
}

/// Item in the legacy per-quarter record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyItem {
    /// Stable identifier
    pub id: IdeaId,
    /// Entered text
    #[serde(default)]
    pub text: String,
    /// Owning focus area, if any
    #[serde(default)]
    pub focus_area_id: Option<FocusAreaId>,
    /// Progress
    #[serde(default, deserialize_with = "lenient::value")]
    pub status: ActionStatus,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Fields this build does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuarterlyItem {
    /// Create a new item
    #[must_use]
    pub fn new(text: impl Into<String>, focus_area_id: Option<FocusAreaId>) -> Self {
        Self {
            id: IdeaId::generate(),
            text: text.into(),
            focus_area_id,
            status: ActionStatus::NotStarted,
            created_at: Some(Utc::now()),
            extra: Map::new(),
        }
    }
}

/// Legacy quarterly roadmap, superseded by per-focus-area timings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyRecord {
    /// January - March
    #[serde(default)]
    pub q1: Vec<QuarterlyItem>,
    /// April - June
    #[serde(default)]
    pub q2: Vec<QuarterlyItem>,
    /// July - September
    #[serde(default)]
    pub q3: Vec<QuarterlyItem>,
    /// October - December
    #[serde(default)]
    pub q4: Vec<QuarterlyItem>,
    /// Last write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Fields this build does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuarterlyRecord {
    /// Items for a quarter; `None` for [`Timing::Might`], which this record never had
    pub fn quarter_mut(&mut self, quarter: Timing) -> Option<&mut Vec<QuarterlyItem>> {
        match quarter {
            Timing::Q1 => Some(&mut self.q1),
            Timing::Q2 => Some(&mut self.q2),
            Timing::Q3 => Some(&mut self.q3),
            Timing::Q4 => Some(&mut self.q4),
            Timing::Might => None,
        }
    }

    /// Remove an item by id from every quarter; returns how many were removed
    pub fn remove_item(&mut self, id: &IdeaId) -> usize {
        [&mut self.q1, &mut self.q2, &mut self.q3, &mut self.q4]
            .into_iter()
            .map(|items| {
                let before = items.len();
                items.retain(|item| &item.id != id);
                before - items.len()
            })
            .sum()
    }
}

/// How often reminders fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    /// Never
    #[default]
    None,
    /// Every day
    Daily,
    /// Every week
    Weekly,
    /// Every quarter
    Quarterly,
}

impl FromStr for ReminderFrequency {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "quarterly" => Ok(Self::Quarterly),
            other => Err(UnknownValue {
                kind: "reminder frequency",
                value: other.to_string(),
            }),
        }
    }
}

/// Reminder preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Reminder cadence
    #[serde(default, deserialize_with = "lenient::value")]
    pub reminder_frequency: ReminderFrequency,
    /// Time of day, `HH:MM`
    #[serde(default = "Settings::default_time")]
    pub reminder_time: String,
    /// Weekday for weekly reminders
    #[serde(default = "Settings::default_day")]
    pub reminder_day: String,
    /// Whether notifications are allowed
    #[serde(default)]
    pub notifications_enabled: bool,
    /// Last write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Fields this build does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settings {
    fn default_time() -> String {
        "12:00".to_string()
    }

    fn default_day() -> String {
        "monday".to_string()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminder_frequency: ReminderFrequency::None,
            reminder_time: Self::default_time(),
            reminder_day: Self::default_day(),
            notifications_enabled: false,
            updated_at: None,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn vision_defaults_from_empty_document() {
        let vision: VisionRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(vision, VisionRecord::default());
        assert_eq!(vision.years_from_now, 5);
    }

    #[test]
    fn vision_remove_idea_hits_every_category() {
        let mut vision = VisionRecord::default();
        let goal = Idea::new("Run a marathon");
        let id = goal.id.clone();
        vision.future_goals.push(goal);
        vision.barriers.push(Idea {
            id: id.clone(),
            text: "same id".into(),
            extra: Map::new(),
        });
        vision.learnings.push(Idea::new("keep"));

        assert_eq!(vision.remove_idea(&id), 2);
        assert!(vision.future_goals.is_empty());
        assert!(vision.barriers.is_empty());
        assert_eq!(vision.learnings.len(), 1);
    }

    #[test]
    fn idea_category_parse() {
        assert_eq!("goals".parse::<IdeaCategory>().unwrap(), IdeaCategory::FutureGoals);
        assert!("nope".parse::<IdeaCategory>().is_err());
        for c in IdeaCategory::ALL {
            assert_eq!(c.as_str().parse::<IdeaCategory>().unwrap(), c);
        }
    }

    #[test]
    fn user_patch_skips_absent_fields() {
        let json = serde_json::to_value(UserPatch::name("Alex")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Alex"}));
    }

    #[test]
    fn whimsy_item_without_status_is_a_dream() {
        let item: WhimsyItem = serde_json::from_str(r#"{"id": "1", "text": "Skydive"}"#).unwrap();
        assert_eq!(item.status, WhimsyStatus::StillADream);
    }

    #[test]
    fn quarterly_might_has_no_slot() {
        let mut record = QuarterlyRecord::default();
        assert!(record.quarter_mut(Timing::Might).is_none());
        record.quarter_mut(Timing::Q2).unwrap().push(QuarterlyItem::new("x", None));
        let id = record.q2[0].id.clone();
        assert_eq!(record.remove_item(&id), 1);
    }

    #[test]
    fn settings_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.reminder_frequency, ReminderFrequency::None);
        assert_eq!(settings.reminder_time, "12:00");
        assert_eq!(settings.reminder_day, "monday");
        assert!(!settings.notifications_enabled);
    }

    #[test]
    fn idea_keeps_legacy_fields() {
        let idea: Idea =
            serde_json::from_str(r#"{"id": "1", "text": "Run", "quarterlyStatus": "not-started"}"#)
                .unwrap();
        let json = serde_json::to_value(&idea).unwrap();
        assert_eq!(json["quarterlyStatus"], "not-started");
    }
}
