mod json;
mod text;

pub use json::JsonFormatter;
pub use text::{ColorMode, TextFormatter};

use crate::checker::CheckerResult;
use crate::error::Result;
use crate::heuristics::Problem;
use crate::{EXIT_PROBLEMS, EXIT_SUCCESS};

/// Label of the report section holding custom rule problems.
pub const CUSTOM_SECTION: &str = "custom";

/// Everything one run produced, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub files_checked: usize,
    pub checkers: Vec<CheckerResult>,
    pub problems: Vec<Problem>,
}

impl RunResult {
    /// Merge checker results and custom problems into one run result.
    #[must_use]
    pub const fn aggregate(
        files_checked: usize,
        checkers: Vec<CheckerResult>,
        problems: Vec<Problem>,
    ) -> Self {
        Self {
            files_checked,
            checkers,
            problems,
        }
    }

    /// Clean only when no checker failed and no custom problem was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty() && self.checkers.iter().all(|c| !c.failed)
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            EXIT_SUCCESS
        } else {
            EXIT_PROBLEMS
        }
    }
}

/// Trait for formatting run results into various output formats.
pub trait OutputFormatter {
    /// Format the run result into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, run: &RunResult) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
