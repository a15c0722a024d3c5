use globset::Glob;

use crate::error::{Result, StyleGuardError};

use super::{CheckerConfig, Config};

/// Reject configurations that parse but cannot work.
///
/// # Errors
/// Returns a `Config` or `InvalidPattern` error describing the first problem found.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    if config.scanner.source_extensions.is_empty() {
        return Err(StyleGuardError::Config(
            "scanner.source_extensions must not be empty".to_string(),
        ));
    }

    if config.scanner.ignore_prefix.chars().count() != 1 {
        return Err(StyleGuardError::Config(format!(
            "scanner.ignore_prefix must be a single character, got '{}'",
            config.scanner.ignore_prefix
        )));
    }

    for (name, checker) in [
        ("pylint", &config.checkers.pylint),
        ("pycodestyle", &config.checkers.pycodestyle),
    ] {
        validate_checker(name, checker)?;
    }

    for pattern in &config.custom.quote_exempt {
        Glob::new(pattern).map_err(|e| StyleGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }

    Ok(())
}

fn validate_checker(name: &str, checker: &CheckerConfig) -> Result<()> {
    if checker.program.as_deref().is_some_and(|p| p.trim().is_empty()) {
        return Err(StyleGuardError::Config(format!(
            "checkers.{name}.program cannot be empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
