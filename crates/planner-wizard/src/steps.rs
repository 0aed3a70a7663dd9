//! The seven wizard steps and their substeps

use planner_model::{StepNumber, Substep};

/// Static description of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDef {
    /// 1-based step number
    pub number: StepNumber,
    /// Heading shown above the step
    pub title: &'static str,
    /// Substeps in order
    pub substeps: &'static [Substep],
    /// Suggested timebox, if the step has a timer
    pub timer_minutes: Option<u32>,
}

use Substep::{A, B, C};

/// Every step, in order
pub const STEPS: [StepDef; 7] = [
    StepDef {
        number: 1,
        title: "Paint Your Life Vision",
        substeps: &[A, B, C],
        timer_minutes: Some(5),
    },
    StepDef {
        number: 2,
        title: "Baseline Your Current Reality",
        substeps: &[A, B],
        timer_minutes: Some(5),
    },
    StepDef {
        number: 3,
        title: "Bring Your Vision to Life",
        substeps: &[A, B],
        timer_minutes: Some(10),
    },
    StepDef {
        number: 4,
        title: "Reflect on & Learn from Prior Year",
        substeps: &[A, B, C],
        timer_minutes: Some(10),
    },
    StepDef {
        number: 5,
        title: "Identify Priorities for Next Year",
        substeps: &[A, B],
        timer_minutes: Some(10),
    },
    StepDef {
        number: 6,
        title: "Build a Quarterly Roadmap",
        substeps: &[A, B, C],
        timer_minutes: None,
    },
    StepDef {
        number: 7,
        title: "Be Whimsical",
        substeps: &[A],
        timer_minutes: None,
    },
];

/// Number of the first step
pub const FIRST_STEP: StepNumber = 1;

/// Number of the last step
pub const LAST_STEP: StepNumber = 7;

/// Step whose exit checks for unassigned objectives and leads to the interstitial
pub const FOCUS_AREA_STEP: StepNumber = 3;

/// Look up a step; `None` outside 1..=7
#[must_use]
pub fn step(number: StepNumber) -> Option<&'static StepDef> {
    STEPS.iter().find(|s| s.number == number)
}

impl StepDef {
    /// First substep
    #[inline]
    #[must_use]
    pub fn first_substep(&self) -> Substep {
        self.substeps.first().copied().unwrap_or_default()
    }

    /// Last substep
    #[inline]
    #[must_use]
    pub fn last_substep(&self) -> Substep {
        self.substeps.last().copied().unwrap_or_default()
    }

    /// Position of a substep within this step
    #[inline]
    #[must_use]
    pub fn index_of(&self, substep: Substep) -> Option<usize> {
        self.substeps.iter().position(|s| *s == substep)
    }

    /// Whether the step has this substep
    #[inline]
    #[must_use]
    pub fn contains(&self, substep: Substep) -> bool {
        self.index_of(substep).is_some()
    }

    /// Substep after `substep`, if any
    #[must_use]
    pub fn after(&self, substep: Substep) -> Option<Substep> {
        let i = self.index_of(substep)?;
        self.substeps.get(i + 1).copied()
    }

    /// Substep before `substep`, if any
    #[must_use]
    pub fn before(&self, substep: Substep) -> Option<Substep> {
        let i = self.index_of(substep)?;
        i.checked_sub(1).and_then(|j| self.substeps.get(j).copied())
    }

    /// Title of one of this step's substeps
    #[must_use]
    pub fn substep_title(&self, substep: Substep) -> Option<&'static str> {
        if !self.contains(substep) {
            return None;
        }
        let title = match (self.number, substep) {
            (1, A) => "Brainstorm",
            (1, B) => "Validate",
            (1, C) => "Create Vision Statement",
            (2, A) => "Identify Areas of Alignment",
            (2, B) => "Identify Gaps",
            (3, A) => "Define Near-Term Objectives",
            (3, B) => "Create Near-Term Focus Areas",
            (4, A) => "Brainstorm What You're Proud Of",
            (4, B) => "Brainstorm Learnings",
            (4, C) => "Identify Barriers to Near-Term Objectives",
            (5, A) => "Brainstorm Strategies",
            (5, B) => "Focus Your Efforts",
            (6, A) => "Get Specific",
            (6, B) => "Build a Roadmap",
            (6, C) => "Validate",
            (7, A) => "Be Whimsical!",
            _ => return None,
        };
        Some(title)
    }
}
