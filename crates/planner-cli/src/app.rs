//! Subcommand handlers

use crate::config::PlannerConfig;
use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local};
use clap::ArgMatches;
use planner_model::{
    ActionStatus, FocusAreaId, FocusAreaStatus, IdeaCategory, IdeaId, StepNumber, Timing,
    WhimsyStatus,
};
use planner_render::{print_plan, DashboardView};
use planner_roadmap::{strategy_items, strategies, Roadmap};
use planner_store::{ExportDocument, FileStorage, RecordStore};
use planner_wizard::steps;
use planner_wizard::{Command, CommandOutcome, Navigation, Navigator, Route, Wizard};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit code when a move or edit was held back by a warning
const WARNED: u8 = 2;

type CliWizard = Wizard<FileStorage, TerminalNavigator>;

/// Prints every screen change
#[derive(Debug, Default)]
pub(crate) struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, route: Route) {
        println!("→ {}", describe(route));
    }
}

/// Human-readable name of a screen
pub(crate) fn describe(route: Route) -> String {
    match route {
        Route::Onboarding { screen } => format!("Welcome screen {screen} of 3"),
        Route::Step { step, substep } => match steps::step(step) {
            Some(def) => format!(
                "Step {step}{substep}: {} / {}",
                def.title,
                def.substep_title(substep).unwrap_or_default()
            ),
            None => route.to_string(),
        },
        Route::Transition => "Take a break: focus areas are set, reflections come next".into(),
        Route::Dashboard => "Dashboard".into(),
        Route::Settings => "Settings".into(),
    }
}

fn open_store(config: &PlannerConfig) -> Result<RecordStore<FileStorage>> {
    let storage = FileStorage::open(&config.data_dir)
        .with_context(|| format!("cannot open data directory {}", config.data_dir.display()))?;
    Ok(RecordStore::new(storage).with_limits(config.limits()))
}

/// Run the selected subcommand
pub(crate) fn run(matches: &ArgMatches, config: &PlannerConfig) -> Result<ExitCode> {
    let mut wizard = Wizard::new(open_store(config)?, TerminalNavigator);

    let Some((name, args)) = matches.subcommand() else {
        bail!("no command given");
    };
    match name {
        "status" => status(&wizard),
        "init" => init(&mut wizard, args, config),
        "next" => navigate(&mut wizard, args, Wizard::next_substep),
        "back" => navigate(&mut wizard, args, Wizard::prev_substep),
        "next-step" => navigate(&mut wizard, args, Wizard::next_step),
        "prev-step" => navigate(&mut wizard, args, Wizard::prev_step),
        "continue" => navigate(&mut wizard, args, Wizard::continue_from_interstitial),
        "complete" => navigate(&mut wizard, args, Wizard::complete),
        "goto" => {
            let step = *args
                .get_one::<StepNumber>("step")
                .context("missing step")?;
            navigate(&mut wizard, args, |w| w.jump_to_step(step))
        }
        "idea" => idea(&wizard, args),
        "vision" => vision(&wizard, args),
        "area" => area(&wizard, args),
        "strategy" => strategy(&wizard, args),
        "timing" => {
            let bucket = string(args, "bucket")?;
            let timing = match bucket.as_str() {
                "none" => None,
                other => Some(other.parse::<Timing>()?),
            };
            execute(
                &wizard,
                &Command::SetTiming {
                    area: area_id(args)?,
                    item: string(args, "item")?,
                    timing,
                },
            )
        }
        "item-status" => execute(
            &wizard,
            &Command::SetStatus {
                area: area_id(args)?,
                item: string(args, "item")?,
                status: *args
                    .get_one::<ActionStatus>("status")
                    .context("missing status")?,
            },
        ),
        "whimsy" => whimsy(&wizard, args),
        "roadmap" => roadmap(&wizard, args),
        "dashboard" => {
            let view = DashboardView::from_store(wizard.store(), Local::now().date_naive());
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{view}");
            }
            Ok(ExitCode::SUCCESS)
        }
        "print" => {
            let markdown = print_plan(&wizard.store().export_all(), Local::now().date_naive());
            emit(args.get_one::<PathBuf>("out"), &markdown)
        }
        "export" => {
            let json = wizard.store().export_all().to_json_pretty()?;
            emit(args.get_one::<PathBuf>("out"), &json)
        }
        "import" => {
            let path = args.get_one::<PathBuf>("file").context("missing file")?;
            import(&wizard, path)
        }
        "clear" => {
            if !args.get_flag("yes") {
                bail!("this deletes every record; pass --yes to confirm");
            }
            wizard.store().clear_all()?;
            println!("All data cleared.");
            Ok(ExitCode::SUCCESS)
        }
        other => bail!("unknown command '{other}'"),
    }
}

fn string(args: &ArgMatches, name: &str) -> Result<String> {
    args.get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing {name}"))
}

fn area_id(args: &ArgMatches) -> Result<FocusAreaId> {
    Ok(FocusAreaId::from(string(args, "area")?))
}

fn emit(out: Option<&PathBuf>, contents: &str) -> Result<ExitCode> {
    match out {
        Some(path) => {
            std::fs::write(path, contents)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{contents}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn ensure_onboarded(wizard: &CliWizard) -> Result<()> {
    if !wizard.store().is_onboarding_complete() {
        bail!("run `life-planner init --name <NAME>` first");
    }
    Ok(())
}

fn status(wizard: &CliWizard) -> Result<ExitCode> {
    let store = wizard.store();
    let route = wizard.initial_route();
    println!("Now: {}", describe(route));
    if !store.is_onboarding_complete() {
        return Ok(ExitCode::SUCCESS);
    }

    let user = store.user();
    println!(
        "{}",
        planner_render::plan_title(&user, Local::now().year())
    );
    let session = wizard.session();
    for def in &steps::STEPS {
        let mark = if session.completed_steps.contains(&def.number) {
            "✓"
        } else if session.is_step_accessible(def.number) {
            "·"
        } else {
            "🔒"
        };
        println!("  {mark} {}. {}", def.number, def.title);
    }
    println!("Progress: {}%", store.overall_progress());

    let vision = store.vision();
    let areas = store.focus_areas();
    let unassigned = planner_roadmap::unassigned_objectives(&vision, &areas);
    if !unassigned.is_empty() {
        println!("Objectives without a focus area:");
        for idea in unassigned {
            println!("  - {}", idea.text);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn init(wizard: &mut CliWizard, args: &ArgMatches, config: &PlannerConfig) -> Result<ExitCode> {
    if wizard.store().is_onboarding_complete() {
        bail!("already set up; use `life-planner clear --yes` to start over");
    }
    let this_year = Local::now().year();
    let year = args.get_one::<i32>("year").copied().unwrap_or(this_year);
    if !(this_year..=this_year + 2).contains(&year) {
        bail!("planning year must be between {this_year} and {}", this_year + 2);
    }

    wizard.save_profile(&string(args, "name")?, year)?;
    wizard.next_onboarding_screen()?;
    wizard.next_onboarding_screen()?;
    wizard.execute(&Command::SetYearsFromNow {
        years: config.default_years_from_now,
    })?;
    Ok(ExitCode::SUCCESS)
}

fn navigate(
    wizard: &mut CliWizard,
    args: &ArgMatches,
    step: impl FnOnce(&mut CliWizard) -> Navigation,
) -> Result<ExitCode> {
    ensure_onboarded(wizard)?;
    let force = args.try_get_one::<bool>("force").ok().flatten().copied().unwrap_or(false);
    match step(wizard) {
        Navigation::Moved(_) => Ok(ExitCode::SUCCESS),
        Navigation::Stayed => {
            println!("Nothing to do from {}", describe(Route::from(wizard.session().stage)));
            Ok(ExitCode::SUCCESS)
        }
        Navigation::Blocked(signal) if force => {
            eprintln!("warning: {}", signal.warning);
            wizard.proceed_anyway();
            Ok(ExitCode::SUCCESS)
        }
        Navigation::Blocked(signal) => {
            eprintln!("warning: {}", signal.warning);
            eprintln!("Link them to a focus area, or rerun with --force to continue anyway.");
            Ok(ExitCode::from(WARNED))
        }
    }
}

fn execute(wizard: &CliWizard, command: &Command) -> Result<ExitCode> {
    match wizard.execute(command)? {
        CommandOutcome::Applied => println!("Saved."),
        CommandOutcome::Created(id) => println!("Created {id}"),
        CommandOutcome::Ignored => println!("Nothing to change."),
        CommandOutcome::Warning(warning) => {
            eprintln!("warning: {warning}");
            return Ok(ExitCode::from(WARNED));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn idea(wizard: &CliWizard, args: &ArgMatches) -> Result<ExitCode> {
    match args.subcommand() {
        Some(("add", sub)) => execute(
            wizard,
            &Command::AddIdea {
                category: *sub
                    .get_one::<IdeaCategory>("category")
                    .context("missing category")?,
                text: string(sub, "text")?,
            },
        ),
        Some(("delete", sub)) => execute(
            wizard,
            &Command::DeleteIdea {
                id: IdeaId::from(string(sub, "id")?),
            },
        ),
        Some(("list", _)) => {
            let vision = wizard.store().vision();
            for category in IdeaCategory::ALL {
                let ideas = vision.ideas(category);
                if ideas.is_empty() {
                    continue;
                }
                println!("{category}:");
                for idea in ideas {
                    println!("  {}  {}", idea.id, idea.text);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => bail!("expected add, delete or list"),
    }
}

fn vision(wizard: &CliWizard, args: &ArgMatches) -> Result<ExitCode> {
    match args.subcommand() {
        Some(("statement", sub)) => execute(
            wizard,
            &Command::SetVisionStatement {
                text: string(sub, "text")?,
            },
        ),
        Some(("years", sub)) => execute(
            wizard,
            &Command::SetYearsFromNow {
                years: *sub.get_one::<u32>("years").context("missing years")?,
            },
        ),
        _ => bail!("expected statement or years"),
    }
}

fn area(wizard: &CliWizard, args: &ArgMatches) -> Result<ExitCode> {
    let command = match args.subcommand() {
        Some(("add", sub)) => Command::AddFocusArea {
            title: string(sub, "title")?,
            emoji: sub.get_one::<String>("emoji").cloned().unwrap_or_default(),
            description: sub
                .get_one::<String>("description")
                .cloned()
                .unwrap_or_default(),
        },
        Some(("edit", sub)) => Command::EditFocusArea {
            area: area_id(sub)?,
            title: sub.get_one::<String>("title").cloned(),
            emoji: sub.get_one::<String>("emoji").cloned(),
            description: sub.get_one::<String>("description").cloned(),
        },
        Some(("delete", sub)) => Command::DeleteFocusArea {
            area: area_id(sub)?,
        },
        Some(("link", sub)) => Command::LinkIdea {
            area: area_id(sub)?,
            text: string(sub, "text")?,
            linked: !sub.get_flag("unlink"),
        },
        Some(("status", sub)) => Command::SetFocusAreaStatus {
            area: area_id(sub)?,
            status: *sub
                .get_one::<FocusAreaStatus>("status")
                .context("missing status")?,
        },
        Some(("list", _)) => return list_areas(wizard),
        _ => bail!("expected add, edit, delete, link, status or list"),
    };
    execute(wizard, &command)
}

fn list_areas(wizard: &CliWizard) -> Result<ExitCode> {
    let areas = wizard.store().focus_areas();
    if areas.is_empty() {
        println!("No focus areas yet.");
    }
    for area in &areas {
        println!("{} {} [{}] ({:?})", area.emoji, area.title, area.id, area.status);
        for idea in &area.linked_ideas {
            println!("  objective: {idea}");
        }
        for strategy in strategies(area) {
            let star = if area.is_prioritized(strategy) { "★" } else { " " };
            println!("  {star} {strategy}");
            for item in strategy_items(area, strategy) {
                if item == strategy {
                    continue;
                }
                let timing = area
                    .action_timings
                    .get(item)
                    .map_or("unscheduled", |t| t.as_str());
                println!("      - {item} ({timing}, {})", area.status_of(item));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn strategy(wizard: &CliWizard, args: &ArgMatches) -> Result<ExitCode> {
    let command = match args.subcommand() {
        Some(("add", sub)) => Command::AddStrategy {
            area: area_id(sub)?,
            text: string(sub, "text")?,
        },
        Some(("priority", sub)) => Command::TogglePriority {
            area: area_id(sub)?,
            strategy: string(sub, "strategy")?,
            checked: !sub.get_flag("off"),
        },
        Some(("no-substeps", sub)) => Command::SetNoSubSteps {
            area: area_id(sub)?,
            strategy: string(sub, "strategy")?,
            flag: !sub.get_flag("off"),
        },
        Some(("substep", sub)) => Command::AddSubStep {
            area: area_id(sub)?,
            strategy: string(sub, "strategy")?,
            text: string(sub, "text")?,
        },
        Some(("remove-substep", sub)) => Command::RemoveSubStep {
            area: area_id(sub)?,
            strategy: string(sub, "strategy")?,
            index: *sub.get_one::<usize>("index").context("missing index")?,
        },
        Some(("milestone", sub)) => Command::SetFinalMilestone {
            area: area_id(sub)?,
            strategy: string(sub, "strategy")?,
            text: sub.get_one::<String>("text").cloned(),
        },
        _ => bail!("expected add, priority, no-substeps, substep, remove-substep or milestone"),
    };
    execute(wizard, &command)
}

fn whimsy(wizard: &CliWizard, args: &ArgMatches) -> Result<ExitCode> {
    let command = match args.subcommand() {
        Some(("add", sub)) => Command::AddWhimsy {
            text: string(sub, "text")?,
        },
        Some(("delete", sub)) => Command::DeleteWhimsy {
            id: IdeaId::from(string(sub, "id")?),
        },
        Some(("status", sub)) => Command::SetWhimsyStatus {
            id: IdeaId::from(string(sub, "id")?),
            status: *sub
                .get_one::<WhimsyStatus>("status")
                .context("missing status")?,
        },
        _ => bail!("expected add, delete or status"),
    };
    execute(wizard, &command)
}

fn roadmap(wizard: &CliWizard, args: &ArgMatches) -> Result<ExitCode> {
    let roadmap = Roadmap::build(&wizard.store().focus_areas());
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&roadmap)?);
        return Ok(ExitCode::SUCCESS);
    }
    for (timing, items) in roadmap.iter() {
        println!("{}", timing.label());
        if items.is_empty() {
            println!("  No actions scheduled.");
        }
        for item in items {
            let check = if item.status.is_complete() { "x" } else { " " };
            println!(
                "  [{check}] {} ({} {}) {}",
                item.text, item.focus_area_emoji, item.focus_area_title, item.status
            );
        }
    }
    let summary = roadmap.status_summary();
    println!(
        "{} scheduled: {} not started, {} in progress, {} complete",
        summary.total(),
        summary.not_started,
        summary.in_progress,
        summary.complete
    );
    Ok(ExitCode::SUCCESS)
}

fn import(wizard: &CliWizard, path: &Path) -> Result<ExitCode> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let doc = ExportDocument::from_json(&text)
        .with_context(|| format!("{} is not a plan export", path.display()))?;
    wizard.store().import_all(&doc)?;
    println!("Imported plan exported at {}", doc.exported_at);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(dir: &Path) -> PlannerConfig {
        PlannerConfig::default().with_data_dir(dir)
    }

    fn life_planner(config: &PlannerConfig, args: &[&str]) -> ExitCode {
        let argv = std::iter::once("life-planner").chain(args.iter().copied());
        let matches = crate::cli().try_get_matches_from(argv).unwrap();
        run(&matches, config).unwrap()
    }

    fn reopen(config: &PlannerConfig) -> RecordStore<FileStorage> {
        open_store(config).unwrap()
    }

    #[test]
    fn init_then_walk_into_step_two() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let year = Local::now().year().to_string();

        assert_eq!(
            life_planner(&config, &["init", "--name", "Alex", "--year", &year]),
            ExitCode::SUCCESS
        );
        for _ in 0..2 {
            life_planner(&config, &["next"]);
        }
        life_planner(&config, &["next-step"]);

        let store = reopen(&config);
        assert_eq!(store.user().name, "Alex");
        let progress = store.step_progress();
        assert_eq!(progress.current_step, 2);
        assert!(progress.is_complete(1));
    }

    #[test]
    fn navigation_requires_onboarding() {
        let dir = tempfile::tempdir().unwrap();
        let matches = crate::cli().try_get_matches_from(["life-planner", "next"]).unwrap();
        assert!(run(&matches, &config(dir.path())).is_err());
    }

    #[test]
    fn guard_warns_then_force_proceeds() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        life_planner(&config, &["init", "--name", "Alex"]);
        life_planner(&config, &["idea", "add", "goals", "Learn piano"]);
        {
            let store = reopen(&config);
            for step in 1..3 {
                store.mark_step_complete(step).unwrap();
            }
            store.set_step_position(3, planner_model::Substep::B).unwrap();
        }

        assert_eq!(life_planner(&config, &["next-step"]), ExitCode::from(WARNED));
        assert_eq!(reopen(&config).step_progress().current_step, 3);

        assert_eq!(life_planner(&config, &["next-step", "--force"]), ExitCode::SUCCESS);
        assert!(reopen(&config).step_progress().at_interstitial);

        life_planner(&config, &["continue"]);
        let progress = reopen(&config).step_progress();
        assert_eq!(progress.current_step, 4);
        assert!(progress.is_complete(3));
    }

    #[test]
    fn edits_flow_into_roadmap_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        life_planner(&config, &["init", "--name", "Alex"]);
        life_planner(&config, &["area", "add", "Health", "--emoji", "🏃"]);
        let id = reopen(&config).focus_areas()[0].id.to_string();

        life_planner(&config, &["strategy", "add", &id, "Run marathon"]);
        life_planner(&config, &["strategy", "substep", &id, "Run marathon", "Join gym"]);
        life_planner(&config, &["timing", &id, "Join gym", "q1"]);
        life_planner(&config, &["item-status", &id, "Join gym", "complete"]);

        let roadmap = Roadmap::build(&reopen(&config).focus_areas());
        assert_eq!(roadmap.bucket(Timing::Q1).len(), 1);
        assert!(roadmap.bucket(Timing::Q1)[0].status.is_complete());

        let out = dir.path().join("backup.json");
        let out_str = out.to_string_lossy().into_owned();
        life_planner(&config, &["export", "--out", &out_str]);
        life_planner(&config, &["clear", "--yes"]);
        assert!(reopen(&config).focus_areas().is_empty());

        life_planner(&config, &["import", &out_str]);
        let store = reopen(&config);
        assert_eq!(store.focus_areas().len(), 1);
        assert!(store.is_onboarding_complete());
    }

    #[test]
    fn focus_area_limit_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlannerConfig {
            max_focus_areas: 1,
            ..config(dir.path())
        };
        assert_eq!(life_planner(&config, &["area", "add", "One"]), ExitCode::SUCCESS);
        assert_eq!(
            life_planner(&config, &["area", "add", "Two"]),
            ExitCode::from(WARNED)
        );
    }

    #[test]
    fn describes_steps_by_title() {
        let text = describe(Route::Step {
            step: 6,
            substep: planner_model::Substep::B,
        });
        assert_eq!(text, "Step 6b: Build a Quarterly Roadmap / Build a Roadmap");
    }
}
