use std::fs;
use std::path::{Path, PathBuf};

use crate::checker::{
    CheckerKind, CheckerOptions, CheckerResult, CheckerRunner, LinkRegistry, plan_checkers,
};
use crate::cli::{CheckArgs, Cli};
use crate::config::Config;
use crate::error::Result;
use crate::git::{ChangeScope, GitChanges};
use crate::heuristics::{Problem, RuleSet};
use crate::output::{JsonFormatter, OutputFormat, OutputFormatter, RunResult, TextFormatter};
use crate::scanner::{FileCommandClassifier, FileResolver, SourceFile};
use crate::{EXIT_FATAL, EXIT_SUCCESS};

use super::load_config;

/// Per-run settings taken from the command line.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub base_dir: PathBuf,
    pub default_configs: bool,
    pub double_quotes: bool,
    pub only: Option<CheckerKind>,
}

impl CheckSettings {
    #[must_use]
    pub fn from_args(args: &CheckArgs, base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            default_configs: args.default_configs,
            double_quotes: args.double_quotes,
            only: args.only.map(CheckerKind::from),
        }
    }
}

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli, registry: &LinkRegistry) -> i32 {
    match run_check_impl(args, cli, registry) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    }
}

/// Resolve the file set, run everything over it and report.
///
/// # Errors
/// Returns an error if configuration cannot be loaded, no change set is
/// available when no paths were given, or the report cannot be written.
pub fn run_check_impl(args: &CheckArgs, cli: &Cli, registry: &LinkRegistry) -> Result<i32> {
    let config = load_config(args.config.as_deref(), cli.no_config)?;
    let base_dir = std::env::current_dir()?;

    let files = resolve_files(args, &config, &base_dir)?;
    if files.is_empty() {
        if !cli.quiet {
            println!("No source files to check.");
        }
        return Ok(EXIT_SUCCESS);
    }
    log::info!("Checking {} file(s)", files.len());

    let settings = CheckSettings::from_args(args, &base_dir);
    let run = check_files(&files, &config, &settings, registry)?;

    let output = format_output(args.format, &run, cli)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(run.exit_code())
}

fn resolve_files(args: &CheckArgs, config: &Config, base_dir: &Path) -> Result<Vec<SourceFile>> {
    let classifier = FileCommandClassifier::new(&config.scanner.classifier_pattern);
    let resolver = FileResolver::new(&config.scanner, &classifier, base_dir)
        .with_skip_warnings(!args.no_skip_warnings);

    let scope = match (&args.diff, args.staged) {
        (Some(base_ref), _) => ChangeScope::Since(base_ref.clone()),
        (None, true) => ChangeScope::Staged,
        (None, false) => ChangeScope::WorkingTree,
    };
    resolver.resolve(&args.paths, &GitChanges::new(base_dir, scope))
}

/// Run the external checkers and the custom rules over `files`.
///
/// # Errors
/// Returns an error if the checker commands or the rule set cannot be built
/// from the configuration.
pub fn check_files(
    files: &[SourceFile],
    config: &Config,
    settings: &CheckSettings,
    registry: &LinkRegistry,
) -> Result<RunResult> {
    let options = CheckerOptions {
        base_dir: settings.base_dir.clone(),
        default_configs: settings.default_configs,
        link_extension: config.scanner.link_extension().to_string(),
    };
    let commands = plan_checkers(&config.checkers, settings.only, &options)?;
    let rules = RuleSet::new(&config.custom, settings.double_quotes)?;

    let runner = CheckerRunner::new(registry, &settings.base_dir);
    let checkers: Vec<CheckerResult> = commands
        .iter()
        .map(|command| runner.invoke(command, files))
        .collect();

    let problems = run_rules(&rules, files);
    Ok(RunResult::aggregate(files.len(), checkers, problems))
}

fn run_rules(rules: &RuleSet, files: &[SourceFile]) -> Vec<Problem> {
    let mut problems = Vec::new();
    for file in files {
        match rules.check_file(&file.absolute, &file.display) {
            Ok(found) => problems.extend(found),
            Err(e) => log::warn!("{e}"),
        }
    }
    problems
}

fn format_output(format: OutputFormat, run: &RunResult, cli: &Cli) -> Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(cli.color.into()).format(run),
        OutputFormat::Json => JsonFormatter.format(run),
    }
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
        if !quiet {
            println!("Report written to: {}", path.display());
        }
    } else {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
