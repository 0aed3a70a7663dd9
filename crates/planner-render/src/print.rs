//! Printable plan export as Markdown
//!
//! Sections without content are left out entirely. The quarterly
//! roadmap lists only buckets holding items, and complete items are
//! checked.

use chrono::{Datelike, NaiveDate};
use planner_model::{FocusArea, Idea, User, VisionRecord, WhimsyItem};
use planner_roadmap::Roadmap;
use planner_store::ExportDocument;

const PRINT_WHIMSY_EMOJIS: [&str; 10] = ["✨", "🌟", "💫", "🎯", "🚀", "🎨", "🎭", "🎪", "🎢", "🌈"];

/// "<name>'s <year> Life Plan", with `fallback_year` when no year was chosen
#[must_use]
pub fn plan_title(user: &User, fallback_year: i32) -> String {
    let year = user.planning_year.unwrap_or(fallback_year);
    format!("{}'s {year} Life Plan", user.name)
}

/// Render a plan snapshot as a Markdown document dated `generated_on`
#[must_use]
pub fn print_plan(doc: &ExportDocument, generated_on: NaiveDate) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", plan_title(&doc.user, generated_on.year())));
    out.push_str("_Strategic Planning for Your Life_\n\n");
    out.push_str(&format!(
        "Generated on {}\n",
        generated_on.format("%B %-d, %Y")
    ));

    vision_section(&mut out, &doc.vision);
    focus_area_section(&mut out, &doc.focus_areas, doc.vision.years_from_now);
    reflection_section(&mut out, &doc.vision);
    roadmap_section(&mut out, &Roadmap::build(&doc.focus_areas));
    whimsy_section(&mut out, &doc.whimsy);

    tracing::debug!(bytes = out.len(), "plan printed");
    out
}

fn bullets(out: &mut String, ideas: &[Idea]) {
    for idea in ideas {
        out.push_str(&format!("- {}\n", idea.text));
    }
}

fn titled_bullets(out: &mut String, title: &str, ideas: &[Idea]) {
    if ideas.is_empty() {
        return;
    }
    out.push_str(&format!("\n### {title}\n\n"));
    bullets(out, ideas);
}

fn vision_section(out: &mut String, vision: &VisionRecord) {
    let statement = vision.life_vision_statement.trim();
    if !statement.is_empty() || !vision.life_vision_ideas.is_empty() {
        out.push_str("\n## Life Vision\n");
        if !statement.is_empty() {
            out.push_str(&format!("\n> \"{statement}\"\n"));
        }
        titled_bullets(out, "Vision Ideas", &vision.life_vision_ideas);
    }

    if !vision.high_marks.is_empty() || !vision.regrets.is_empty() {
        out.push_str("\n## Current State Baseline\n");
        titled_bullets(out, "Where I've Succeeded", &vision.high_marks);
        titled_bullets(out, "Areas for Growth", &vision.regrets);
    }
}

fn focus_area_section(out: &mut String, areas: &[FocusArea], years: u32) {
    if areas.is_empty() {
        return;
    }
    out.push_str(&format!("\n## Focus Areas ({years} Year Goals)\n"));
    for area in areas {
        let title = if area.is_blank() { "Untitled" } else { area.title.trim() };
        if area.emoji.is_empty() {
            out.push_str(&format!("\n### {title}\n"));
        } else {
            out.push_str(&format!("\n### {} {title}\n", area.emoji));
        }
        if !area.description.is_empty() {
            out.push_str(&format!("\n{}\n", area.description));
        }
        if !area.prioritized_actions.is_empty() {
            out.push_str("\n#### Top Priorities\n\n");
            for action in &area.prioritized_actions {
                out.push_str(&format!("- ✓ {action}\n"));
            }
        }
        if !area.actions.is_empty() {
            out.push_str("\n#### All Actions\n\n");
            bullets(out, &area.actions);
        }
    }
}

fn reflection_section(out: &mut String, vision: &VisionRecord) {
    if vision.proud_of.is_empty() && vision.learnings.is_empty() && vision.barriers.is_empty() {
        return;
    }
    out.push_str("\n## Annual Reflections\n");
    titled_bullets(out, "What I'm Proud Of", &vision.proud_of);
    titled_bullets(out, "Key Learnings", &vision.learnings);
    titled_bullets(out, "Barriers to Address", &vision.barriers);
}

fn roadmap_section(out: &mut String, roadmap: &Roadmap) {
    if roadmap.is_empty() {
        return;
    }
    out.push_str("\n## Quarterly Roadmap\n");
    for (timing, items) in roadmap.non_empty() {
        out.push_str(&format!("\n### {}\n\n", timing.label()));
        for item in items {
            let check = if item.status.is_complete() { "x" } else { " " };
            let area = if item.focus_area_emoji.is_empty() {
                item.focus_area_title.clone()
            } else {
                format!("{} {}", item.focus_area_emoji, item.focus_area_title)
            };
            out.push_str(&format!("- [{check}] {} _({area})_\n", item.text));
        }
    }
}

fn whimsy_section(out: &mut String, whimsy: &[WhimsyItem]) {
    if whimsy.is_empty() {
        return;
    }
    out.push_str("\n## Whimsy List\n\n");
    out.push_str("Things that sound fun, challenging, or just plain whimsical.\n\n");
    for (item, emoji) in whimsy.iter().zip(PRINT_WHIMSY_EMOJIS.iter().cycle()) {
        out.push_str(&format!("- {emoji} {}\n", item.text));
    }
}
