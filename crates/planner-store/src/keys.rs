//! Storage keys, one per logical record

use std::fmt;

/// Logical record stored under its own key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// User profile
    User,
    /// Onboarding flag and screen
    Onboarding,
    /// Step progress
    Steps,
    /// Vision record
    Vision,
    /// Focus-area list
    FocusAreas,
    /// Legacy quarterly record
    Quarterly,
    /// Whimsy list
    Whimsy,
    /// Reminder settings
    Settings,
    /// Legacy current-step key; only ever cleared
    CurrentStep,
}

impl RecordKey {
    /// Every key, in clearing order
    pub const ALL: [RecordKey; 9] = [
        Self::User,
        Self::Onboarding,
        Self::Steps,
        Self::Vision,
        Self::FocusAreas,
        Self::Quarterly,
        Self::Whimsy,
        Self::Settings,
        Self::CurrentStep,
    ];

    /// Key text in storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "lifePlanner_user",
            Self::Onboarding => "lifePlanner_onboarding",
            Self::Steps => "lifePlanner_steps",
            Self::Vision => "lifePlanner_vision",
            Self::FocusAreas => "lifePlanner_focusAreas",
            Self::Quarterly => "lifePlanner_quarterly",
            Self::Whimsy => "lifePlanner_whimsy",
            Self::Settings => "lifePlanner_settings",
            Self::CurrentStep => "lifePlanner_currentStep",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
