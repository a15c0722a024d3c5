use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(String),

    /// No paths were given and the working tree has no usable change set.
    #[error("Cannot determine changed files: {0}. Pass files or directories explicitly.")]
    NoChangeSet(String),

    #[error("File classifier failed: {0}")]
    Classifier(String),

    #[error("Interrupted")]
    Interrupted,
}

impl StyleGuardError {
    /// Create a `FileRead` error for the given path.
    #[must_use]
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StyleGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
