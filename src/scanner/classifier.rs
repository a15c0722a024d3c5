use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{Result, StyleGuardError};

/// Decides which ambiguous files are source code.
///
/// Called once per resolution with the whole batch so implementations that
/// spawn a process do so once, not per file.
pub trait Classifier {
    /// Return the subset of `paths` recognized as source.
    ///
    /// # Errors
    /// Returns an error if the classification backend cannot be run.
    fn classify(&self, paths: &[PathBuf]) -> Result<HashSet<PathBuf>>;
}

/// Classifier backed by the Unix `file` utility.
///
/// `file -b` prints one description per argument, in argument order; a file
/// is recognized when its description contains the language name,
/// case-insensitively (e.g. "Python script, ASCII text executable").
#[derive(Debug, Clone)]
pub struct FileCommandClassifier {
    program: String,
    pattern: String,
}

impl FileCommandClassifier {
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        Self::with_program("file", pattern)
    }

    #[must_use]
    pub fn with_program(program: &str, pattern: &str) -> Self {
        Self {
            program: program.to_string(),
            pattern: pattern.to_lowercase(),
        }
    }

    fn matches(&self, description: &str) -> bool {
        description.to_lowercase().contains(&self.pattern)
    }
}

impl Classifier for FileCommandClassifier {
    fn classify(&self, paths: &[PathBuf]) -> Result<HashSet<PathBuf>> {
        if paths.is_empty() {
            return Ok(HashSet::new());
        }

        log::debug!("Classifying {} file(s) with '{}'", paths.len(), self.program);
        let output = Command::new(&self.program)
            .arg("-b")
            .arg("--")
            .args(paths)
            .output()
            .map_err(|e| {
                StyleGuardError::Classifier(format!("failed to run {}: {e}", self.program))
            })?;

        if !output.status.success() {
            return Err(StyleGuardError::Classifier(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let recognized = paths
            .iter()
            .zip(stdout.lines())
            .filter(|(_, description)| self.matches(description))
            .map(|(path, description)| {
                log::trace!("{}: {description}", path.display());
                path.clone()
            })
            .collect();
        Ok(recognized)
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
