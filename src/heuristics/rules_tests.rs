use std::path::Path;

use tempfile::TempDir;

use super::*;
use crate::config::CustomConfig;

const FOOTER: &str = "# vim: set ts=4 sw=4 et:\n";

fn rules() -> RuleSet {
    RuleSet::new(&CustomConfig::default(), false).unwrap()
}

fn with_footer(body: &str) -> String {
    format!("{body}{FOOTER}")
}

fn check(source: &str) -> Vec<Problem> {
    rules().check(Path::new("pkg/module.py"), source)
}

#[test]
fn clean_file_with_footer_has_no_problems() {
    let problems = check(&with_footer("x = 'a'\n"));
    assert!(problems.is_empty(), "unexpected: {problems:?}");
}

#[test]
fn missing_footer_is_reported_once_at_line_zero() {
    let problems = check("x = 'a'\ny = 'b'\n");
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].rule, Rule::MissingFooter);
    assert_eq!(problems[0].line, 0);
}

#[test]
fn empty_footer_marker_disables_footer_rule() {
    let config = CustomConfig {
        footer_marker: String::new(),
        ..CustomConfig::default()
    };
    let rules = RuleSet::new(&config, false).unwrap();
    assert!(rules.check(Path::new("a.py"), "x = 1\n").is_empty());
}

#[test]
fn bare_except_reported_at_its_line() {
    let source = with_footer("try:\n    run()\n  except:  \n    pass\n");
    let problems = check(&source);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].rule, Rule::BareExcept);
    assert_eq!(problems[0].line, 3);
}

#[test]
fn named_except_is_fine() {
    let problems = check(&with_footer("try:\n    run()\nexcept ValueError:\n    pass\n"));
    assert!(problems.is_empty());
}

#[test]
fn bare_except_inside_docstring_is_ignored() {
    let source = with_footer("\"\"\"\nExample:\n    except:\n\"\"\"\n");
    assert!(check(&source).is_empty());
}

#[test]
fn debug_call_is_named_in_message() {
    let problems = check(&with_footer("import pdb\npdb.set_trace()\n"));
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].rule, Rule::DebugCall);
    assert_eq!(problems[0].line, 2);
    assert!(problems[0].message.contains("pdb.set_trace"));
}

#[test]
fn ipdb_call_is_detected() {
    let problems = check(&with_footer("ipdb.post_mortem()\n"));
    assert_eq!(problems.len(), 1);
    assert!(problems[0].message.contains("ipdb.post_mortem"));
}

#[test]
fn debug_call_with_statement_separator_is_skipped() {
    let problems = check(&with_footer("import pdb; pdb.set_trace()\n"));
    assert!(problems.is_empty());
}

#[test]
fn debug_call_in_comment_is_skipped() {
    assert!(check(&with_footer("# pdb.set_trace()\n")).is_empty());
}

#[test]
fn alternate_quote_without_preferred_is_inconsistent() {
    let problems = check(&with_footer("a = 'x'\nb = \"y\"\n"));
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].rule, Rule::InconsistentQuotes);
    assert_eq!(problems[0].line, 2);
    assert!(problems[0].message.contains("single"));
}

#[test]
fn double_preferred_file_flags_single_quoted_line() {
    let body = "a = \"1\"\nb = \"2\"\nc = \"3\"\nd = \"4\"\ne = \"5\"\nf = \"6\"\n\
                g = 'x'\nh = 'y'\n";
    let problems = rules().check(Path::new("m.py"), &format!("{body}# it's\n{FOOTER}"));
    let lines: Vec<_> = problems
        .iter()
        .filter(|p| p.rule == Rule::InconsistentQuotes)
        .map(|p| p.line)
        .collect();
    assert_eq!(lines, vec![7, 8]);
}

#[test]
fn forced_double_quotes_flag_single_quotes() {
    let rules = RuleSet::new(&CustomConfig::default(), true).unwrap();
    let problems = rules.check(Path::new("m.py"), &with_footer("a = 'x'\n"));
    assert_eq!(problems.len(), 1);
    assert!(problems[0].message.contains("double"));
}

#[test]
fn quote_exemptions() {
    let rules = RuleSet::new(&CustomConfig::default(), true).unwrap();
    let exempt_lines = [
        "    :param name: the user's name\n",
        "s = \"'\"\n",
        "s = '\"'\n",
        "x = '''a''' + \"\"\"b\"\"\"\n",
        "mixed = 'a' + \"b\"\n",
    ];
    for line in exempt_lines {
        let problems = rules.check(Path::new("m.py"), &with_footer(line));
        assert!(problems.is_empty(), "{line:?} produced {problems:?}");
    }
}

#[test]
fn template_files_are_exempt_from_quote_rule() {
    let rules = RuleSet::new(&CustomConfig::default(), true).unwrap();
    let source = with_footer("html = '<a href=x>'\n");
    assert!(
        rules
            .check(Path::new("app/templates/page.py"), &source)
            .is_empty()
    );
    assert!(
        rules
            .check(Path::new("mail_template.py"), &source)
            .is_empty()
    );
    assert_eq!(rules.check(Path::new("app/page.py"), &source).len(), 1);
}

#[test]
fn configured_exemptions_extend_builtin_list() {
    let config = CustomConfig {
        quote_exempt: vec!["legacy/**".to_string()],
        ..CustomConfig::default()
    };
    let rules = RuleSet::new(&config, true).unwrap();
    let source = with_footer("a = 'x'\n");
    assert!(rules.check(Path::new("legacy/old.py"), &source).is_empty());
}

#[test]
fn invalid_exempt_glob_is_rejected() {
    let config = CustomConfig {
        quote_exempt: vec!["[".to_string()],
        ..CustomConfig::default()
    };
    let err = RuleSet::new(&config, false).unwrap_err();
    assert!(err.to_string().contains("Invalid glob pattern"));
}

#[test]
fn problems_follow_detection_order() {
    let source = "except:\nimport pdb\npdb.run(x)\na = \"q\"\nb = 'r'\nc = 's'\n";
    let rules: Vec<_> = check(source).into_iter().map(|p| p.rule).collect();
    assert_eq!(
        rules,
        vec![
            Rule::MissingFooter,
            Rule::BareExcept,
            Rule::DebugCall,
            Rule::InconsistentQuotes
        ]
    );
}

#[test]
fn rule_set_is_idempotent() {
    let source = "except:\nx = \"y\"\npdb.set_trace()\n";
    assert_eq!(check(source), check(source));
}

#[test]
fn check_file_reads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tool");
    std::fs::write(&path, "except:\n").unwrap();

    let problems = rules().check_file(&path, Path::new("tool")).unwrap();
    assert_eq!(problems.len(), 2);
    assert_eq!(problems[1].path, Path::new("tool"));
}

#[test]
fn check_file_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.py");
    assert!(rules().check_file(&missing, &missing).is_err());
}

#[test]
fn rule_names_display_in_kebab_case() {
    assert_eq!(Rule::BareExcept.to_string(), "bare-except");
    assert_eq!(Rule::InconsistentQuotes.to_string(), "inconsistent-quotes");
}
