use std::path::Path;

use super::*;
use crate::heuristics::Rule;

fn checker(name: &str, failed: bool) -> CheckerResult {
    CheckerResult::new(name, String::new(), failed)
}

fn problem() -> Problem {
    Problem::new(Path::new("a.py"), 3, Rule::BareExcept, "bare except")
}

#[test]
fn clean_run_exits_zero() {
    let run = RunResult::aggregate(
        2,
        vec![checker("pylint", false), checker("pycodestyle", false)],
        Vec::new(),
    );
    assert!(run.is_clean());
    assert_eq!(run.exit_code(), EXIT_SUCCESS);
}

#[test]
fn any_failed_checker_exits_two() {
    let run = RunResult::aggregate(
        2,
        vec![checker("pylint", false), checker("pycodestyle", true)],
        Vec::new(),
    );
    assert_eq!(run.exit_code(), EXIT_PROBLEMS);
}

#[test]
fn any_custom_problem_exits_two() {
    let run = RunResult::aggregate(1, vec![checker("pylint", false)], vec![problem()]);
    assert!(!run.is_clean());
    assert_eq!(run.exit_code(), 2);
}

#[test]
fn run_without_checkers_or_problems_is_clean() {
    assert_eq!(RunResult::default().exit_code(), 0);
}

#[test]
fn output_format_from_str() {
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert!("sarif".parse::<OutputFormat>().is_err());
}
