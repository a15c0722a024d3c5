use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level `.style-guard.toml` contents. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub checkers: CheckersConfig,
    pub custom: CustomConfig,
}

/// File discovery and classification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScannerConfig {
    /// Extensions accepted as source without asking the classifier.
    /// The first entry is the extension given to temporary links.
    pub source_extensions: Vec<String>,

    /// Binary or generated file extensions that are never checked.
    pub skip_extensions: Vec<String>,

    /// Directory names pruned from walks and dropped from change sets.
    pub skip_dirs: Vec<String>,

    /// Files whose name starts with this character are skipped during walks.
    pub ignore_prefix: String,

    /// Case-insensitive substring the classifier output must contain.
    pub classifier_pattern: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            source_extensions: vec!["py".to_string()],
            skip_extensions: to_strings(&[
                "pyc", "pyo", "so", "o", "a", "dll", "dylib", "exe", "png", "jpg", "jpeg", "gif",
                "ico", "svg", "pdf", "zip", "gz", "bz2", "xz", "tar", "whl", "egg", "mo", "db",
                "sqlite", "pickle", "pkl",
            ]),
            skip_dirs: to_strings(&[
                ".git",
                ".hg",
                ".svn",
                ".bzr",
                "__pycache__",
                ".tox",
                ".mypy_cache",
                ".pytest_cache",
                "node_modules",
                "build",
                "dist",
            ]),
            ignore_prefix: ".".to_string(),
            classifier_pattern: "python".to_string(),
        }
    }
}

impl ScannerConfig {
    /// Extension temporary links are given so extension-filtering checkers accept them.
    #[must_use]
    pub fn link_extension(&self) -> &str {
        self.source_extensions.first().map_or("py", String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckersConfig {
    pub pylint: CheckerConfig,
    pub pycodestyle: CheckerConfig,
}

impl Default for CheckersConfig {
    fn default() -> Self {
        Self {
            pylint: CheckerConfig::enabled(),
            pycodestyle: CheckerConfig::enabled(),
        }
    }
}

/// Settings for one external checker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckerConfig {
    pub enabled: bool,

    /// Program to run instead of the checker's default binary name.
    pub program: Option<String>,

    /// Project-specific configuration file. Takes precedence over a
    /// configuration file found in the current directory.
    pub config: Option<PathBuf>,
}

impl CheckerConfig {
    #[must_use]
    pub const fn enabled() -> Self {
        Self {
            enabled: true,
            program: None,
            config: None,
        }
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self::enabled()
    }
}

/// Settings for the custom heuristic rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CustomConfig {
    /// Substring every file must contain. Empty disables the check.
    pub footer_marker: String,

    /// Always prefer double quotes instead of estimating per file.
    pub prefer_double_quotes: bool,

    /// Extra globs exempt from the quote-consistency rule.
    pub quote_exempt: Vec<String>,

    /// Debugger modules whose calls must not be committed.
    pub debug_modules: Vec<String>,
}

impl Default for CustomConfig {
    fn default() -> Self {
        Self {
            footer_marker: "# vim:".to_string(),
            prefer_double_quotes: false,
            quote_exempt: Vec::new(),
            debug_modules: to_strings(&["pdb", "ipdb", "pudb"]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
