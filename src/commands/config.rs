use std::fmt::Write;
use std::fs;
use std::path::Path;

use crate::cli::{Cli, ConfigAction, ConfigArgs, ConfigOutputFormat};
use crate::config::{CheckerConfig, Config, FileConfigLoader, RealFileSystem};
use crate::{EXIT_FATAL, EXIT_SUCCESS, Result, StyleGuardError};

use super::load_config;

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    match &args.action {
        ConfigAction::Validate { config } => run_config_validate(config),
        ConfigAction::Show { config, format } => run_config_show(config.as_deref(), *format, cli),
    }
}

fn run_config_validate(config_path: &Path) -> i32 {
    match run_config_validate_impl(config_path) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    }
}

/// Validates a configuration file.
///
/// # Errors
/// Returns an error if the file doesn't exist, contains invalid TOML, or has semantic errors.
pub fn run_config_validate_impl(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        return Err(StyleGuardError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let content = fs::read_to_string(config_path)
        .map_err(|source| StyleGuardError::file_read(config_path, source))?;
    FileConfigLoader::<RealFileSystem>::parse_config(&content)?;
    Ok(())
}

fn run_config_show(config_path: Option<&Path>, format: ConfigOutputFormat, cli: &Cli) -> i32 {
    match run_config_show_impl(config_path, format, cli.no_config) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    }
}

/// Shows the effective configuration.
///
/// # Errors
/// Returns an error if the configuration file cannot be loaded or serialization fails.
pub fn run_config_show_impl(
    config_path: Option<&Path>,
    format: ConfigOutputFormat,
    no_config: bool,
) -> Result<String> {
    let config = load_config(config_path, no_config)?;

    match format {
        ConfigOutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            Ok(format!("{json}\n"))
        }
        ConfigOutputFormat::Text => Ok(format_config_text(&config)),
    }
}

#[must_use]
pub fn format_config_text(config: &Config) -> String {
    let mut output = String::new();

    output.push_str("=== Effective Configuration ===\n\n");

    let scanner = &config.scanner;
    output.push_str("[scanner]\n");
    let _ = writeln!(output, "  source_extensions = {:?}", scanner.source_extensions);
    let _ = writeln!(output, "  skip_extensions = {:?}", scanner.skip_extensions);
    let _ = writeln!(output, "  skip_dirs = {:?}", scanner.skip_dirs);
    let _ = writeln!(output, "  ignore_prefix = {:?}", scanner.ignore_prefix);
    let _ = writeln!(output, "  classifier_pattern = {:?}", scanner.classifier_pattern);

    format_checker(&mut output, "pylint", &config.checkers.pylint);
    format_checker(&mut output, "pycodestyle", &config.checkers.pycodestyle);

    let custom = &config.custom;
    output.push_str("\n[custom]\n");
    if custom.footer_marker.is_empty() {
        output.push_str("  footer_marker = \"\"  # disabled\n");
    } else {
        let _ = writeln!(output, "  footer_marker = {:?}", custom.footer_marker);
    }
    let _ = writeln!(output, "  prefer_double_quotes = {}", custom.prefer_double_quotes);
    if !custom.quote_exempt.is_empty() {
        let _ = writeln!(output, "  quote_exempt = {:?}", custom.quote_exempt);
    }
    let _ = writeln!(output, "  debug_modules = {:?}", custom.debug_modules);

    output
}

fn format_checker(output: &mut String, name: &str, checker: &CheckerConfig) {
    let _ = writeln!(output, "\n[checkers.{name}]");
    let _ = writeln!(output, "  enabled = {}", checker.enabled);
    if let Some(program) = &checker.program {
        let _ = writeln!(output, "  program = {program:?}");
    }
    if let Some(config) = &checker.config {
        let _ = writeln!(output, "  config = {:?}", config.display().to_string());
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
