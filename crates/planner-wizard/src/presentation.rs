//! Transient display state, never persisted

use planner_model::{StepNumber, Substep};
use std::collections::HashSet;

/// Which substeps are collapsed and which dashboard items are expanded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    collapsed: HashSet<(StepNumber, Substep)>,
    expanded: HashSet<String>,
}

impl Presentation {
    /// Empty state: nothing collapsed, nothing expanded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse a substep
    pub fn collapse(&mut self, step: StepNumber, substep: Substep) {
        self.collapsed.insert((step, substep));
    }

    /// Flip a substep; returns whether it is now collapsed
    pub fn toggle_substep(&mut self, step: StepNumber, substep: Substep) -> bool {
        if self.collapsed.remove(&(step, substep)) {
            false
        } else {
            self.collapsed.insert((step, substep));
            true
        }
    }

    /// Whether a substep is collapsed
    #[must_use]
    pub fn is_collapsed(&self, step: StepNumber, substep: Substep) -> bool {
        self.collapsed.contains(&(step, substep))
    }

    /// Flip a dashboard item; returns whether it is now expanded
    pub fn toggle_item(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    /// Whether a dashboard item is expanded
    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.collapsed.clear();
        self.expanded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles() {
        let mut p = Presentation::new();
        assert!(!p.is_collapsed(1, Substep::A));
        p.collapse(1, Substep::A);
        assert!(p.is_collapsed(1, Substep::A));
        assert!(!p.toggle_substep(1, Substep::A));
        assert!(p.toggle_substep(1, Substep::A));

        assert!(p.toggle_item("fa1"));
        assert!(p.is_expanded("fa1"));
        p.clear();
        assert_eq!(p, Presentation::default());
    }
}
