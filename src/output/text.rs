use std::fmt::Write;

use crate::checker::CheckerResult;
use crate::error::Result;
use crate::heuristics::Problem;
use crate::path_utils::normalize_separators;

use super::{CUSTOM_SECTION, OutputFormatter, RunResult};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn section_header(&self, name: &str, failed: bool) -> String {
        let color = if failed { ansi::RED } else { ansi::CYAN };
        self.colorize(&format!("=== {name} ==="), color)
    }

    fn format_checker(&self, result: &CheckerResult, output: &mut String) {
        let _ = writeln!(output, "{}", self.section_header(&result.name, result.failed));
        let _ = writeln!(output, "{}", result.output.trim_end());
    }

    fn format_problems(&self, problems: &[Problem], output: &mut String) {
        let _ = writeln!(output, "{}", self.section_header(CUSTOM_SECTION, true));
        for problem in problems {
            let _ = writeln!(output, "{}", format_problem(problem));
        }
    }

    fn format_summary(&self, run: &RunResult) -> String {
        let mut summary = format!("Summary: {} file(s) checked", run.files_checked);
        for checker in &run.checkers {
            let status = if checker.failed {
                self.colorize("failed", ansi::RED)
            } else {
                self.colorize("passed", ansi::GREEN)
            };
            let _ = write!(summary, ", {} {status}", checker.name);
        }

        let count = run.problems.len();
        let problems = if count == 0 {
            self.colorize("0", ansi::GREEN)
        } else {
            self.colorize(&count.to_string(), ansi::YELLOW)
        };
        let _ = write!(summary, ", {problems} custom problem(s)");
        summary
    }
}

/// `path:line: message`, or `path: message` for file-level problems.
#[must_use]
pub fn format_problem(problem: &Problem) -> String {
    let path = normalize_separators(&problem.path.to_string_lossy());
    if problem.line == 0 {
        format!("{path}: {}", problem.message)
    } else {
        format!("{path}:{}: {}", problem.line, problem.message)
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, run: &RunResult) -> Result<String> {
        let mut output = String::new();

        // Sections without content are left out entirely.
        for checker in run.checkers.iter().filter(|c| c.has_output()) {
            self.format_checker(checker, &mut output);
            output.push('\n');
        }
        if !run.problems.is_empty() {
            self.format_problems(&run.problems, &mut output);
            output.push('\n');
        }

        let _ = writeln!(output, "{}", self.format_summary(run));
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
