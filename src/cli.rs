use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::checker::CheckerKind;
use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// External checker selection for `--only`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckerChoice {
    Pylint,
    Pycodestyle,
}

impl From<CheckerChoice> for CheckerKind {
    fn from(choice: CheckerChoice) -> Self {
        match choice {
            CheckerChoice::Pylint => Self::Pylint,
            CheckerChoice::Pycodestyle => Self::Pycodestyle,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "style-guard")]
#[command(author, version, about = "Run style checkers and custom heuristics over source files")]
#[command(long_about = "Runs pylint, pycodestyle and a set of custom heuristics over the given \
    files and directories, or over the files changed in the git working tree.\n\n\
    Exit codes:\n  \
    0 - All checks passed\n  \
    1 - Configuration or runtime error\n  \
    2 - Problems found or a checker failed\n  \
    130 - Interrupted")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check files with the external checkers and custom heuristics
    Check(CheckArgs),

    /// Generate a default configuration file
    Init(InitArgs),

    /// Configuration file utilities
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Files or directories to check (default: files changed in git)
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run the checkers with their default configuration
    #[arg(long)]
    pub default_configs: bool,

    /// Always prefer double quotes in the quote-consistency check
    #[arg(long)]
    pub double_quotes: bool,

    /// Run only one of the external checkers
    #[arg(long, value_enum)]
    pub only: Option<CheckerChoice>,

    /// Do not warn about explicitly named files that are skipped
    #[arg(long)]
    pub no_skip_warnings: bool,

    /// Check files changed since a git reference (e.g., main, HEAD~3)
    #[arg(long, value_name = "REF", conflicts_with = "staged")]
    pub diff: Option<String>,

    /// Check only files staged for commit
    #[arg(long)]
    pub staged: bool,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for the configuration file
    #[arg(short, long, default_value = ".style-guard.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate configuration file syntax and semantics
    Validate {
        /// Path to configuration file
        #[arg(short, long, default_value = ".style-guard.toml")]
        config: PathBuf,
    },

    /// Show the effective configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ConfigOutputFormat,
    },
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
