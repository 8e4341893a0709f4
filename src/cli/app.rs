//! Main CLI application

use crate::config::{parse_config_auto, parse_config_file, validate_config};
use crate::error::{ExecutionError, Result};
use crate::runner::{Engine, Registry, RunOptions};
use crate::ui::Reporter;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::time::Instant;

/// Name of the task run when none is given on the command line
const DEFAULT_TASK: &str = "default";

/// Build the clap command
fn build_command() -> Command {
    Command::new("graft")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A minimal YAML-based build-task orchestrator")
        .arg(
            Arg::new("task")
                .value_name("TASK")
                .default_value(DEFAULT_TASK)
                .help("Root task to run"),
        )
        .arg(
            Arg::new("force")
                .short('f')
                .long("force")
                .help("Force rebuilding already created outputs")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mute")
                .short('m')
                .long("mute")
                .help("Mute stderr output from successful commands")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("all")
                .short('a')
                .long("all")
                .help("Display all stdout output from successful commands")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .value_name("FILE")
                .help("Path to the graft.yml task file"),
        )
}

/// Run the CLI application
pub async fn run() -> Result<()> {
    let matches = build_command().get_matches();
    run_with_matches(matches).await
}

async fn run_with_matches(matches: ArgMatches) -> Result<()> {
    let reporter = Reporter::new();

    let (config, task_path) = match matches.get_one::<String>("file") {
        Some(path) => {
            let path = PathBuf::from(path);
            (parse_config_file(&path)?, path)
        }
        None => parse_config_auto()?,
    };
    validate_config(&config)?;

    reporter.using_file(&task_path);

    let registry = Registry::load(config);
    let root = matches
        .get_one::<String>("task")
        .map(String::as_str)
        .unwrap_or(DEFAULT_TASK);

    if !registry.contains(root) {
        reporter.available_tasks(&registry.names());
        return Err(ExecutionError::UnknownTask(root.to_string()).into());
    }

    let options = RunOptions {
        force: matches.get_flag("force"),
        mute: matches.get_flag("mute"),
        all: matches.get_flag("all"),
    };

    let started = Instant::now();
    let engine = Engine::new(registry, options, reporter);
    engine.run(root).await?;

    reporter.run_finished(started.elapsed());

    Ok(())
}
