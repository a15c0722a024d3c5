use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::{CheckerConfig, CheckersConfig};
use crate::error::{Result, StyleGuardError};

/// Lines pylint uses for hard errors, as opposed to advisory messages.
pub const HARD_ERROR_PATTERN: &str = "^[A-Z]:";

/// Pylint message layout that puts the category letter first, so
/// [`HARD_ERROR_PATTERN`] can see it. Modern pylint leads with the path.
pub const PYLINT_MSG_TEMPLATE: &str = "{C}:{line:3d},{column:2d}: {msg} ({symbol})";

const PYLINT_LOCAL_CONFIGS: &[&str] = &["pylintrc", ".pylintrc"];
const PYCODESTYLE_LOCAL_CONFIGS: &[&str] = &["setup.cfg", "tox.ini", ".pycodestyle"];

/// Import placement and line break before a binary operator.
const PYCODESTYLE_ALWAYS_IGNORED: &[&str] = &["E402", "W503"];
/// Line length, reported by pylint already when it runs.
const PYCODESTYLE_LINE_LENGTH: &str = "E501";

/// The external checkers that can be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerKind {
    Pylint,
    Pycodestyle,
}

impl CheckerKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pylint => "pylint",
            Self::Pycodestyle => "pycodestyle",
        }
    }
}

impl fmt::Display for CheckerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a finished checker run is judged.
#[derive(Debug, Clone)]
pub enum FailureMode {
    /// Any nonzero exit status fails.
    ExitCode,
    /// A nonzero exit status fails only if some output line matches.
    PatternMatch(Regex),
}

impl FailureMode {
    #[must_use]
    pub fn is_failure(&self, success: bool, output: &str) -> bool {
        if success {
            return false;
        }
        match self {
            Self::ExitCode => true,
            Self::PatternMatch(pattern) => output.lines().any(|line| pattern.is_match(line)),
        }
    }
}

/// Settings shared by every checker in one run.
#[derive(Debug, Clone)]
pub struct CheckerOptions {
    /// Directory searched for per-directory configuration files and used as
    /// the checkers' working directory.
    pub base_dir: PathBuf,
    /// Run the checkers without any configuration flag.
    pub default_configs: bool,
    /// Extension given to temporary links for extensionless sources.
    pub link_extension: String,
}

/// One external checker invocation, minus the file list.
#[derive(Debug, Clone)]
pub struct CheckerCommand {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    /// Extension files must carry for the checker to accept them.
    pub requires_extension: Option<String>,
    pub failure: FailureMode,
}

impl CheckerCommand {
    /// Pylint: judged by hard-error lines, and needs a recognized extension.
    ///
    /// # Errors
    /// Returns an error if the hard-error pattern fails to compile.
    pub fn pylint(config: &CheckerConfig, options: &CheckerOptions) -> Result<Self> {
        let pattern = Regex::new(HARD_ERROR_PATTERN)
            .map_err(|e| StyleGuardError::Config(format!("invalid hard-error pattern: {e}")))?;

        let mut args = vec!["--reports=n".to_string(), "--score=n".to_string()];
        if !options.default_configs {
            args.push(format!("--msg-template={PYLINT_MSG_TEMPLATE}"));
            let rcfile = config.config.clone().or_else(|| {
                find_local_config(&options.base_dir, PYLINT_LOCAL_CONFIGS)
            });
            if let Some(rcfile) = rcfile {
                args.push(format!("--rcfile={}", rcfile.display()));
            }
        }

        Ok(Self {
            name: CheckerKind::Pylint.name().to_string(),
            program: program_or(config, CheckerKind::Pylint),
            args,
            requires_extension: Some(options.link_extension.clone()),
            failure: FailureMode::PatternMatch(pattern),
        })
    }

    /// Pycodestyle: judged by exit status, accepts any file name.
    ///
    /// A project-local configuration file, when present, is left for
    /// pycodestyle to discover instead of passing the configured one.
    #[must_use]
    pub fn pycodestyle(
        config: &CheckerConfig,
        options: &CheckerOptions,
        pylint_runs: bool,
    ) -> Self {
        let mut ignored: Vec<&str> = PYCODESTYLE_ALWAYS_IGNORED.to_vec();
        if pylint_runs {
            ignored.push(PYCODESTYLE_LINE_LENGTH);
        }
        let mut args = vec![format!("--ignore={}", ignored.join(","))];

        let has_local_config =
            find_local_config(&options.base_dir, PYCODESTYLE_LOCAL_CONFIGS).is_some();
        if !options.default_configs
            && !has_local_config
            && let Some(path) = &config.config
        {
            args.push(format!("--config={}", path.display()));
        }

        Self {
            name: CheckerKind::Pycodestyle.name().to_string(),
            program: program_or(config, CheckerKind::Pycodestyle),
            args,
            requires_extension: None,
            failure: FailureMode::ExitCode,
        }
    }
}

/// The checkers to run, in report order.
///
/// # Errors
/// Returns an error if a checker command cannot be built.
pub fn plan_checkers(
    checkers: &CheckersConfig,
    only: Option<CheckerKind>,
    options: &CheckerOptions,
) -> Result<Vec<CheckerCommand>> {
    let wanted = |kind: CheckerKind, config: &CheckerConfig| {
        config.enabled && only.is_none_or(|o| o == kind)
    };
    let pylint_runs = wanted(CheckerKind::Pylint, &checkers.pylint);

    let mut commands = Vec::new();
    if pylint_runs {
        commands.push(CheckerCommand::pylint(&checkers.pylint, options)?);
    }
    if wanted(CheckerKind::Pycodestyle, &checkers.pycodestyle) {
        commands.push(CheckerCommand::pycodestyle(
            &checkers.pycodestyle,
            options,
            pylint_runs,
        ));
    }
    Ok(commands)
}

fn program_or(config: &CheckerConfig, kind: CheckerKind) -> String {
    config
        .program
        .clone()
        .unwrap_or_else(|| kind.name().to_string())
}

fn find_local_config(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
