use super::*;

#[test]
fn no_quotes_prefers_single() {
    assert_eq!(QuotePreference::estimate("x = 1\n"), QuotePreference::SINGLE);
}

#[test]
fn no_double_quotes_prefers_single() {
    let source = "a = 'x'\nb = 'y'\n";
    assert_eq!(QuotePreference::estimate(source), QuotePreference::SINGLE);
}

#[test]
fn only_double_quotes_prefers_double() {
    let source = "a = \"x\"\n";
    assert_eq!(QuotePreference::estimate(source), QuotePreference::DOUBLE);
}

#[test]
fn double_must_exceed_twice_single() {
    // 4 double, 2 single: ratio exactly 2.0 is not enough
    let source = "a = \"x\"\nb = \"y\"\nc = 'z'\n";
    assert_eq!(QuotePreference::estimate(source), QuotePreference::SINGLE);

    // 6 double, 2 single
    let source = "a = \"x\"\nb = \"y\"\nc = \"w\"\nd = 'z'\n";
    assert_eq!(QuotePreference::estimate(source), QuotePreference::DOUBLE);
}

#[test]
fn twelve_double_five_single_prefers_double() {
    let source = "a = \"1\"\nb = \"2\"\nc = \"3\"\nd = \"4\"\ne = \"5\"\nf = \"6\"\n\
                  g = 'x'\nh = 'y'\n# it's\n";
    assert_eq!(source.chars().filter(|&c| c == '"').count(), 12);
    assert_eq!(source.chars().filter(|&c| c == '\'').count(), 5);
    assert_eq!(QuotePreference::estimate(source), QuotePreference::DOUBLE);
}

#[test]
fn triple_double_delimiters_are_not_counted() {
    // Two docstring delimiters (6 double quotes) and one single-quoted string.
    let source = "\"\"\"Module doc.\"\"\"\nx = 'a'\n";
    assert_eq!(QuotePreference::estimate(source), QuotePreference::SINGLE);
}

#[test]
fn only_triple_double_quotes_prefers_single() {
    let source = "\"\"\"Doc.\"\"\"\n";
    assert_eq!(QuotePreference::estimate(source), QuotePreference::SINGLE);
}

#[test]
fn override_forces_double() {
    let source = "a = 'x'\n";
    assert_eq!(
        QuotePreference::estimate_with_override(source, true),
        QuotePreference::DOUBLE
    );
    assert_eq!(
        QuotePreference::estimate_with_override(source, false),
        QuotePreference::SINGLE
    );
}

#[test]
fn alternate_is_the_other_quote() {
    assert_eq!(QuotePreference::SINGLE.alternate, '"');
    assert_eq!(QuotePreference::DOUBLE.alternate, '\'');
    assert_eq!(QuotePreference::DOUBLE.preferred_name(), "double");
    assert_eq!(QuotePreference::SINGLE.preferred_name(), "single");
}
