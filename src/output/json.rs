use serde::Serialize;

use crate::checker::CheckerResult;
use crate::error::Result;
use crate::heuristics::{Problem, Rule};
use crate::path_utils::normalize_separators;

use super::{OutputFormatter, RunResult};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    exit_code: i32,
    summary: Summary,
    checkers: &'a [CheckerResult],
    problems: Vec<JsonProblem<'a>>,
}

#[derive(Serialize)]
struct Summary {
    files_checked: usize,
    checkers_failed: usize,
    problems: usize,
}

#[derive(Serialize)]
struct JsonProblem<'a> {
    path: String,
    line: usize,
    rule: Rule,
    message: &'a str,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, run: &RunResult) -> Result<String> {
        let output = JsonOutput {
            exit_code: run.exit_code(),
            summary: Summary {
                files_checked: run.files_checked,
                checkers_failed: run.checkers.iter().filter(|c| c.failed).count(),
                problems: run.problems.len(),
            },
            checkers: &run.checkers,
            problems: run.problems.iter().map(convert_problem).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert_problem(problem: &Problem) -> JsonProblem<'_> {
    JsonProblem {
        path: normalize_separators(&problem.path.to_string_lossy()),
        line: problem.line,
        rule: problem.rule,
        message: &problem.message,
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
