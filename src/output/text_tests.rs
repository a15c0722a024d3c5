use std::path::Path;

use super::*;
use crate::heuristics::Rule;

fn formatter() -> TextFormatter {
    TextFormatter::new(ColorMode::Never)
}

fn run(checkers: Vec<CheckerResult>, problems: Vec<Problem>) -> RunResult {
    RunResult::aggregate(3, checkers, problems)
}

#[test]
fn empty_sections_are_omitted() {
    let result = run(
        vec![
            CheckerResult::new("pylint", String::new(), false),
            CheckerResult::new("pycodestyle", "  \n".to_string(), false),
        ],
        Vec::new(),
    );

    let output = formatter().format(&result).unwrap();
    assert!(!output.contains("==="));
    assert_eq!(
        output,
        "Summary: 3 file(s) checked, pylint passed, pycodestyle passed, 0 custom problem(s)\n"
    );
}

#[test]
fn checker_output_is_labeled() {
    let result = run(
        vec![CheckerResult::new(
            "pycodestyle",
            "a.py:1:80: E501 line too long\n".to_string(),
            true,
        )],
        Vec::new(),
    );

    let output = formatter().format(&result).unwrap();
    assert!(output.starts_with("=== pycodestyle ===\na.py:1:80: E501 line too long\n\n"));
    assert!(output.contains("pycodestyle failed"));
}

#[test]
fn custom_problems_use_path_line_message() {
    let problems = vec![
        Problem::new(Path::new("pkg/a.py"), 0, Rule::MissingFooter, "missing footer"),
        Problem::new(Path::new("pkg/a.py"), 7, Rule::BareExcept, "bare except"),
    ];
    let output = formatter().format(&run(Vec::new(), problems)).unwrap();

    assert!(output.contains("=== custom ===\npkg/a.py: missing footer\npkg/a.py:7: bare except\n"));
    assert!(output.ends_with("2 custom problem(s)\n"));
}

#[test]
fn sections_follow_checker_order_then_custom() {
    let result = run(
        vec![
            CheckerResult::new("pylint", "p\n".to_string(), false),
            CheckerResult::new("pycodestyle", "c\n".to_string(), false),
        ],
        vec![Problem::new(Path::new("a.py"), 1, Rule::DebugCall, "debug")],
    );
    let output = formatter().format(&result).unwrap();

    let pylint = output.find("=== pylint ===").unwrap();
    let pycodestyle = output.find("=== pycodestyle ===").unwrap();
    let custom = output.find("=== custom ===").unwrap();
    assert!(pylint < pycodestyle && pycodestyle < custom);
}

#[test]
fn colors_only_when_enabled() {
    let result = run(vec![CheckerResult::new("pylint", "x\n".to_string(), true)], Vec::new());

    let plain = TextFormatter::new(ColorMode::Never).format(&result).unwrap();
    assert!(!plain.contains('\x1b'));

    let colored = TextFormatter::new(ColorMode::Always).format(&result).unwrap();
    assert!(colored.contains("\x1b[31m=== pylint ===\x1b[0m"));
}

#[test]
fn format_problem_normalizes_separators() {
    let problem = Problem::new(Path::new("pkg\\a.py"), 2, Rule::InconsistentQuotes, "quotes");
    assert_eq!(format_problem(&problem), "pkg/a.py:2: quotes");
}
