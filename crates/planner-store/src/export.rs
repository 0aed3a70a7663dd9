//! Single-document export of every user-facing record

use chrono::{DateTime, Utc};
use planner_model::{FocusArea, QuarterlyRecord, Settings, User, VisionRecord, WhimsyItem};
use serde::{Deserialize, Serialize};

/// Everything a user would want to back up, plus when it was taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// User profile
    #[serde(default)]
    pub user: User,
    /// Vision record
    #[serde(default)]
    pub vision: VisionRecord,
    /// Focus areas
    #[serde(default)]
    pub focus_areas: Vec<FocusArea>,
    /// Legacy quarterly record
    #[serde(default)]
    pub quarterly: QuarterlyRecord,
    /// Whimsy list
    #[serde(default)]
    pub whimsy: Vec<WhimsyItem>,
    /// Reminder settings
    #[serde(default)]
    pub settings: Settings,
    /// Snapshot time
    pub exported_at: DateTime<Utc>,
}

impl ExportDocument {
    /// Pretty JSON for download
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a downloaded document
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_camel_case_field_names() {
        let doc = ExportDocument {
            user: User::default(),
            vision: VisionRecord::default(),
            focus_areas: Vec::new(),
            quarterly: QuarterlyRecord::default(),
            whimsy: Vec::new(),
            settings: Settings::default(),
            exported_at: Utc::now(),
        };
        let json = doc.to_json_pretty().unwrap();
        assert!(json.contains("\"focusAreas\""));
        assert!(json.contains("\"exportedAt\""));
        assert_eq!(ExportDocument::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn missing_sections_default() {
        let doc =
            ExportDocument::from_json(r#"{"exportedAt":"2026-03-01T10:00:00Z"}"#).unwrap();
        assert!(doc.focus_areas.is_empty());
        assert_eq!(doc.vision.years_from_now, 5);
    }
}
