use super::*;

#[test]
fn default_config_is_valid() {
    assert!(validate_config_semantics(&Config::default()).is_ok());
}

#[test]
fn empty_source_extensions_rejected() {
    let mut config = Config::default();
    config.scanner.source_extensions.clear();
    let err = validate_config_semantics(&config).unwrap_err();
    assert!(err.to_string().contains("source_extensions"));
}

#[test]
fn multi_character_ignore_prefix_rejected() {
    let mut config = Config::default();
    config.scanner.ignore_prefix = "__".to_string();
    let err = validate_config_semantics(&config).unwrap_err();
    assert!(err.to_string().contains("ignore_prefix"));
}

#[test]
fn empty_ignore_prefix_rejected() {
    let mut config = Config::default();
    config.scanner.ignore_prefix = String::new();
    assert!(validate_config_semantics(&config).is_err());
}

#[test]
fn blank_program_rejected() {
    let mut config = Config::default();
    config.checkers.pycodestyle.program = Some("  ".to_string());
    let err = validate_config_semantics(&config).unwrap_err();
    assert!(err.to_string().contains("checkers.pycodestyle.program"));
}

#[test]
fn invalid_quote_exempt_glob_rejected() {
    let mut config = Config::default();
    config.custom.quote_exempt.push("src/[".to_string());
    let err = validate_config_semantics(&config).unwrap_err();
    assert!(matches!(err, StyleGuardError::InvalidPattern { .. }));
}
