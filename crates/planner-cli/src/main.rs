//! `life-planner`: drive the planning wizard from the terminal

mod app;
mod config;
mod logging;

use clap::{value_parser, Arg, ArgAction, Command};
use config::PlannerConfig;
use planner_model::{ActionStatus, FocusAreaStatus, IdeaCategory, StepNumber, WhimsyStatus};
use std::path::PathBuf;
use std::process::ExitCode;

fn force_arg() -> Arg {
    Arg::new("force")
        .long("force")
        .action(ArgAction::SetTrue)
        .help("Proceed even when objectives are still unassigned")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn out_arg() -> Arg {
    Arg::new("out")
        .long("out")
        .value_parser(value_parser!(PathBuf))
        .help("Write to this file instead of stdout")
}

fn area_arg() -> Arg {
    Arg::new("area").required(true).help("Focus area id")
}

fn text_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).required(true).help(help)
}

fn cli() -> Command {
    Command::new("life-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Guided life planning: vision, focus areas and a quarterly roadmap")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config file (default: <config dir>/life-planner/config.toml)"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the plan records"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Tracing filter used when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More logging (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(Command::new("status").about("Show where you are in the plan"))
        .subcommand(
            Command::new("init")
                .about("Complete onboarding")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .required(true)
                        .help("Your name"),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32))
                        .help("Year to plan (this year or one of the next two)"),
                ),
        )
        .subcommand(
            Command::new("next")
                .about("Advance to the next substep")
                .arg(force_arg()),
        )
        .subcommand(Command::new("back").about("Go back one substep"))
        .subcommand(
            Command::new("next-step")
                .about("Finish the current step")
                .arg(force_arg()),
        )
        .subcommand(Command::new("prev-step").about("Go back to the previous step"))
        .subcommand(Command::new("continue").about("Leave the break screen for step 4"))
        .subcommand(Command::new("complete").about("Finish the plan and open the dashboard"))
        .subcommand(
            Command::new("goto").about("Open a step").arg(
                Arg::new("step")
                    .required(true)
                    .value_parser(value_parser!(StepNumber))
                    .help("Step number 1-7"),
            ),
        )
        .subcommand(
            Command::new("idea")
                .about("Vision ideas")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("category")
                                .required(true)
                                .value_parser(value_parser!(IdeaCategory))
                                .help("vision, high-marks, regrets, goals, proud, learnings or barriers"),
                        )
                        .arg(text_arg("text", "Idea text")),
                )
                .subcommand(Command::new("delete").arg(text_arg("id", "Idea id")))
                .subcommand(Command::new("list").about("List ideas with their ids")),
        )
        .subcommand(
            Command::new("vision")
                .about("Vision statement and horizon")
                .subcommand_required(true)
                .subcommand(Command::new("statement").arg(text_arg("text", "Statement")))
                .subcommand(
                    Command::new("years").arg(
                        Arg::new("years")
                            .required(true)
                            .value_parser(value_parser!(u32))
                            .help("3, 5 or 10"),
                    ),
                ),
        )
        .subcommand(
            Command::new("area")
                .about("Focus areas")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(text_arg("title", "Title"))
                        .arg(Arg::new("emoji").long("emoji").default_value(""))
                        .arg(Arg::new("description").long("description").default_value("")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(area_arg())
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("emoji").long("emoji"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(Command::new("delete").arg(area_arg()))
                .subcommand(
                    Command::new("link")
                        .arg(area_arg())
                        .arg(text_arg("text", "Objective text"))
                        .arg(
                            Arg::new("unlink")
                                .long("unlink")
                                .action(ArgAction::SetTrue)
                                .help("Remove the link instead"),
                        ),
                )
                .subcommand(
                    Command::new("status").arg(area_arg()).arg(
                        Arg::new("status")
                            .required(true)
                            .value_parser(value_parser!(FocusAreaStatus))
                            .help("not-started, in-progress, complete or abandon"),
                    ),
                )
                .subcommand(Command::new("list").about("List focus areas and their strategies")),
        )
        .subcommand(
            Command::new("strategy")
                .about("Strategies and their breakdown")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(area_arg())
                        .arg(text_arg("text", "Strategy text")),
                )
                .subcommand(
                    Command::new("priority")
                        .arg(area_arg())
                        .arg(text_arg("strategy", "Strategy text"))
                        .arg(Arg::new("off").long("off").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("no-substeps")
                        .arg(area_arg())
                        .arg(text_arg("strategy", "Strategy text"))
                        .arg(Arg::new("off").long("off").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("substep")
                        .arg(area_arg())
                        .arg(text_arg("strategy", "Strategy text"))
                        .arg(text_arg("text", "Sub-step text")),
                )
                .subcommand(
                    Command::new("remove-substep")
                        .arg(area_arg())
                        .arg(text_arg("strategy", "Strategy text"))
                        .arg(
                            Arg::new("index")
                                .required(true)
                                .value_parser(value_parser!(usize))
                                .help("Position, starting at 0"),
                        ),
                )
                .subcommand(
                    Command::new("milestone")
                        .arg(area_arg())
                        .arg(text_arg("strategy", "Strategy text"))
                        .arg(Arg::new("text").help("Milestone text; omit to clear")),
                ),
        )
        .subcommand(
            Command::new("timing")
                .about("Schedule an actionable item")
                .arg(area_arg())
                .arg(text_arg("item", "Item text"))
                .arg(text_arg("bucket", "q1, q2, q3, q4, might or none")),
        )
        .subcommand(
            Command::new("item-status")
                .about("Record progress on an actionable item")
                .arg(area_arg())
                .arg(text_arg("item", "Item text"))
                .arg(
                    Arg::new("status")
                        .required(true)
                        .value_parser(value_parser!(ActionStatus))
                        .help("not-started, in-progress or complete"),
                ),
        )
        .subcommand(
            Command::new("whimsy")
                .about("Whimsy list")
                .subcommand_required(true)
                .subcommand(Command::new("add").arg(text_arg("text", "Dream")))
                .subcommand(Command::new("delete").arg(text_arg("id", "Item id")))
                .subcommand(
                    Command::new("status").arg(text_arg("id", "Item id")).arg(
                        Arg::new("status")
                            .required(true)
                            .value_parser(value_parser!(WhimsyStatus))
                            .help("still-a-dream or did-it"),
                    ),
                ),
        )
        .subcommand(
            Command::new("roadmap")
                .about("Scheduled items per quarter")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Plan overview")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("print")
                .about("Printable plan as Markdown")
                .arg(out_arg()),
        )
        .subcommand(
            Command::new("export")
                .about("Back up every record as JSON")
                .arg(out_arg()),
        )
        .subcommand(
            Command::new("import")
                .about("Replace every record from a backup")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("clear").about("Delete every record").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm deletion"),
            ),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    let config = match PlannerConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let config = match matches.get_one::<PathBuf>("data-dir") {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    };
    let config = match matches.get_one::<String>("log-level") {
        Some(level) => config.with_log_level(level),
        None => config,
    };
    logging::init(matches.get_count("verbose"), &config.log_level);

    match app::run(&matches, &config) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn parses_nested_commands() {
        let m = cli()
            .try_get_matches_from(["life-planner", "-vv", "idea", "add", "goals", "Run a marathon"])
            .unwrap();
        assert_eq!(m.get_count("verbose"), 2);
        let (name, sub) = m.subcommand().unwrap();
        assert_eq!(name, "idea");
        let (name, add) = sub.subcommand().unwrap();
        assert_eq!(name, "add");
        assert_eq!(
            add.get_one::<IdeaCategory>("category"),
            Some(&IdeaCategory::FutureGoals)
        );
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(cli()
            .try_get_matches_from(["life-planner", "whimsy", "status", "w1", "maybe"])
            .is_err());
    }
}
