//! Plan limits and validation warnings

/// Caps enforced while editing a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLimits {
    /// Maximum number of focus areas
    pub max_focus_areas: usize,
    /// Maximum prioritized strategies per focus area
    pub max_priority_actions: usize,
}

impl PlanLimits {
    /// Default focus-area cap
    pub const DEFAULT_MAX_FOCUS_AREAS: usize = 5;
    /// Default priority cap
    pub const DEFAULT_MAX_PRIORITY_ACTIONS: usize = 3;

    /// Create default limits
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With focus-area cap
    #[inline]
    #[must_use]
    pub fn with_max_focus_areas(mut self, max: usize) -> Self {
        self.max_focus_areas = max;
        self
    }

    /// With priority cap
    #[inline]
    #[must_use]
    pub fn with_max_priority_actions(mut self, max: usize) -> Self {
        self.max_priority_actions = max;
        self
    }
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            max_focus_areas: Self::DEFAULT_MAX_FOCUS_AREAS,
            max_priority_actions: Self::DEFAULT_MAX_PRIORITY_ACTIONS,
        }
    }
}

/// Recoverable condition the user is asked to confirm or correct
///
/// Never fatal: the edit that produced it was not applied, or (for
/// unassigned objectives) the move waits for an explicit override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlanWarning {
    /// Tried to prioritize more strategies than allowed
    #[error("you can only select up to {limit} priority actions per focus area")]
    PriorityLimit {
        /// Cap in force
        limit: usize,
    },

    /// Tried to create more focus areas than allowed
    #[error("you can have a maximum of {limit} focus areas")]
    FocusAreaLimit {
        /// Cap in force
        limit: usize,
    },

    /// Future goals not linked to any focus area
    #[error("{count} objective(s) not assigned to a focus area")]
    UnassignedObjectives {
        /// Number of unlinked goals
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let limits = PlanLimits::new();
        assert_eq!(limits.max_focus_areas, 5);
        assert_eq!(limits.max_priority_actions, 3);
    }

    #[test]
    fn builder_overrides() {
        let limits = PlanLimits::new().with_max_focus_areas(2).with_max_priority_actions(1);
        assert_eq!(limits, PlanLimits { max_focus_areas: 2, max_priority_actions: 1 });
    }

    #[test]
    fn warning_display() {
        let w = PlanWarning::PriorityLimit { limit: 3 };
        assert!(w.to_string().contains("up to 3"));
    }
}
