//! Dashboard view model
//!
//! A snapshot of the whole plan as the overview screen presents it. The
//! view is plain data: it serializes to camelCase JSON for `--json`
//! output and prints as terminal text through [`fmt::Display`].

use chrono::{Datelike, NaiveDate};
use planner_model::{
    FocusArea, FocusAreaId, FocusAreaStatus, Idea, IdeaId, StepNumber, User, VisionRecord,
    WhimsyItem, WhimsyStatus,
};
use planner_roadmap::{Roadmap, StatusSummary};
use planner_store::{RecordStore, Storage};
use serde::Serialize;
use std::fmt;

/// Emoji shown next to a focus area without its own
const DEFAULT_AREA_EMOJI: &str = "📌";

const WHIMSY_EMOJIS: [&str; 6] = ["⭐", "🌟", "🌈", "🦄", "✨", "💫"];

/// Life vision statement and brainstorm
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeVision {
    /// Statement, when written
    pub statement: Option<String>,
    /// Brainstormed ideas
    pub ideas: Vec<String>,
}

/// Current-state baseline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentState {
    /// Where life already matches the vision
    pub strengths: Vec<String>,
    /// Gaps against the vision
    pub gaps: Vec<String>,
}

/// A titled focus area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusAreaCard {
    /// Area id
    pub id: FocusAreaId,
    /// Title
    pub title: String,
    /// Emoji, or a pin when none was chosen
    pub emoji: String,
    /// Objectives assigned to the area
    pub linked_ideas: Vec<String>,
    /// Overall status
    pub status: FocusAreaStatus,
}

/// Prior-year reflections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflections {
    /// Accomplishments
    pub proud_of: Vec<String>,
    /// Learnings
    pub learnings: Vec<String>,
    /// Barriers
    pub barriers: Vec<String>,
}

impl Reflections {
    /// Whether nothing was reflected on
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proud_of.is_empty() && self.learnings.is_empty() && self.barriers.is_empty()
    }
}

/// Whimsy list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhimsyEntry {
    /// Item id
    pub id: IdeaId,
    /// Text
    pub text: String,
    /// Stable decorative emoji
    pub emoji: &'static str,
    /// Normalised status
    pub status: WhimsyStatus,
}

impl WhimsyEntry {
    fn new(item: &WhimsyItem) -> Self {
        Self {
            id: item.id.clone(),
            text: item.text.clone(),
            emoji: whimsy_emoji(item.id.as_str()),
            status: item.status,
        }
    }

    /// Whether the dream came true
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == WhimsyStatus::DidIt
    }
}

/// Emoji picked from the id's character codes, so it never changes between renders
fn whimsy_emoji(id: &str) -> &'static str {
    let sum: u64 = id.chars().map(|c| u64::from(u32::from(c))).sum();
    let index = usize::try_from(sum % WHIMSY_EMOJIS.len() as u64).unwrap_or_default();
    WHIMSY_EMOJIS[index]
}

/// Completion figures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgress {
    /// Share of the seven steps completed, 0..=100
    pub overall: u32,
    /// Mean focus-area status weight, 0..=100
    pub focus_areas: u32,
    /// Steps completed
    pub completed_steps: Vec<StepNumber>,
}

/// Everything the plan overview shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// "<name>'s <year> Life Plan"
    pub title: String,
    /// Vision statement and ideas
    pub life_vision: LifeVision,
    /// Baseline
    pub current_state: CurrentState,
    /// Horizon used in the focus-area heading
    pub years_from_now: u32,
    /// Focus areas with a title
    pub focus_areas: Vec<FocusAreaCard>,
    /// Prior-year reflections
    pub reflections: Reflections,
    /// Scheduled items per bucket
    pub roadmap: Roadmap,
    /// Roadmap item counts per status
    pub roadmap_summary: StatusSummary,
    /// Whimsy list
    pub whimsy: Vec<WhimsyEntry>,
    /// Completion figures
    pub progress: PlanProgress,
}

fn texts(ideas: &[Idea]) -> Vec<String> {
    ideas.iter().map(|i| i.text.clone()).collect()
}

impl DashboardView {
    /// Read every record from a store and build the view
    pub fn from_store<S: Storage>(store: &RecordStore<S>, today: NaiveDate) -> Self {
        let progress = PlanProgress {
            overall: store.overall_progress(),
            focus_areas: store.focus_area_progress(),
            completed_steps: store.step_progress().completed_steps.into_iter().collect(),
        };
        Self::build(
            &store.user(),
            &store.vision(),
            &store.focus_areas(),
            &store.whimsy(),
            progress,
            today,
        )
    }

    /// Build the view from loaded records
    ///
    /// `today` supplies the year when the user never picked one.
    #[must_use]
    pub fn build(
        user: &User,
        vision: &VisionRecord,
        areas: &[FocusArea],
        whimsy: &[WhimsyItem],
        progress: PlanProgress,
        today: NaiveDate,
    ) -> Self {
        let statement = vision.life_vision_statement.trim();
        let roadmap = Roadmap::build(areas);
        let roadmap_summary = roadmap.status_summary();
        Self {
            title: crate::print::plan_title(user, today.year()),
            life_vision: LifeVision {
                statement: (!statement.is_empty()).then(|| statement.to_string()),
                ideas: texts(&vision.life_vision_ideas),
            },
            current_state: CurrentState {
                strengths: texts(&vision.high_marks),
                gaps: texts(&vision.regrets),
            },
            years_from_now: vision.years_from_now,
            focus_areas: areas
                .iter()
                .filter(|a| !a.is_blank())
                .map(|a| FocusAreaCard {
                    id: a.id.clone(),
                    title: a.title.clone(),
                    emoji: if a.emoji.is_empty() {
                        DEFAULT_AREA_EMOJI.to_string()
                    } else {
                        a.emoji.clone()
                    },
                    linked_ideas: a.linked_ideas.clone(),
                    status: a.status,
                })
                .collect(),
            reflections: Reflections {
                proud_of: texts(&vision.proud_of),
                learnings: texts(&vision.learnings),
                barriers: texts(&vision.barriers),
            },
            roadmap,
            roadmap_summary,
            whimsy: whimsy.iter().map(WhimsyEntry::new).collect(),
            progress,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, label: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "  {label}:")?;
    for item in items {
        writeln!(f, "    - {item}")?;
    }
    Ok(())
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(
            f,
            "Progress: {}% of steps, {}% across focus areas",
            self.progress.overall, self.progress.focus_areas
        )?;

        writeln!(f, "\n📝 Life Vision")?;
        match &self.life_vision.statement {
            Some(statement) => {
                writeln!(f, "  \"{statement}\"")?;
                write_list(f, "Vision Ideas", &self.life_vision.ideas)?;
            }
            None => writeln!(f, "  Complete Step 1 to add your life vision statement.")?,
        }

        writeln!(f, "\n📊 Current State Baseline")?;
        if self.current_state.strengths.is_empty() && self.current_state.gaps.is_empty() {
            writeln!(f, "  Complete Step 2 to add your baseline assessment.")?;
        }
        write_list(f, "Strengths", &self.current_state.strengths)?;
        write_list(f, "Gaps", &self.current_state.gaps)?;

        writeln!(f, "\n🎯 {}-Year Focus Areas", self.years_from_now)?;
        if self.focus_areas.is_empty() {
            writeln!(f, "  Complete Step 3 to define your focus areas.")?;
        }
        for area in &self.focus_areas {
            writeln!(f, "  {} {} [{}]", area.emoji, area.title, area.id)?;
            for idea in &area.linked_ideas {
                writeln!(f, "    - {idea}")?;
            }
        }

        writeln!(f, "\n💭 Annual Reflections")?;
        if self.reflections.is_empty() {
            writeln!(f, "  Complete Step 4 to add your annual reflections.")?;
        }
        write_list(f, "What I'm Proud Of", &self.reflections.proud_of)?;
        write_list(f, "Learnings", &self.reflections.learnings)?;
        write_list(f, "Barriers", &self.reflections.barriers)?;

        writeln!(f, "\n🗓️ Quarterly Roadmap")?;
        if self.roadmap.is_empty() {
            writeln!(f, "  Complete Step 6 to build your quarterly roadmap.")?;
        } else {
            for (timing, items) in self.roadmap.iter() {
                let plural = if items.len() == 1 { "" } else { "s" };
                writeln!(f, "  {} ({} item{plural})", timing.label(), items.len())?;
                for item in items {
                    writeln!(
                        f,
                        "    [{}] {} ({} {})",
                        if item.status.is_complete() { "x" } else { " " },
                        item.text,
                        if item.focus_area_emoji.is_empty() {
                            DEFAULT_AREA_EMOJI
                        } else {
                            &item.focus_area_emoji
                        },
                        item.focus_area_title
                    )?;
                }
            }
        }

        writeln!(f, "\n🌟 Whimsy List")?;
        if self.whimsy.is_empty() {
            writeln!(f, "  Complete Step 7 to add whimsical ideas.")?;
        }
        for entry in &self.whimsy {
            let mark = if entry.is_done() { "Did it!" } else { "Still a Dream" };
            writeln!(f, "  {} {} ({mark})", entry.emoji, entry.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whimsy_emoji_is_stable_per_id() {
        // "ab" sums to 195, 195 % 6 == 3
        assert_eq!(whimsy_emoji("ab"), "🦄");
        assert_eq!(whimsy_emoji("ab"), whimsy_emoji("ab"));
        assert_eq!(whimsy_emoji(""), "⭐");
    }

    #[test]
    fn reflections_empty() {
        assert!(Reflections::default().is_empty());
        let r = Reflections {
            barriers: vec!["Time".into()],
            ..Reflections::default()
        };
        assert!(!r.is_empty());
    }
}
