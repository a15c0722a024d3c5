//! Version-control change sets.
//!
//! When no paths are given, the files to check come from git. Three scopes
//! are supported: the working tree (`git status`), the index (`--staged`),
//! and everything changed since a reference (`--diff <REF>`).

mod diff;
mod status;

use std::path::{Path, PathBuf};

use crate::Result;

pub use diff::GitDiff;
pub use status::{GitStatus, parse_porcelain};

/// Paths reported as changed, relative to the working tree root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub root: PathBuf,
    pub paths: Vec<PathBuf>,
}

/// Supplies the change set used when no explicit paths are given.
pub trait ChangedFiles {
    /// # Errors
    /// Returns an error if the environment cannot supply a change set.
    fn changed_files(&self) -> Result<ChangeSet>;
}

/// Which changes to consider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChangeScope {
    #[default]
    WorkingTree,
    Staged,
    Since(String),
}

/// Git-backed change set, discovered from a starting directory.
#[derive(Debug, Clone)]
pub struct GitChanges {
    start: PathBuf,
    scope: ChangeScope,
}

impl GitChanges {
    #[must_use]
    pub fn new(start: &Path, scope: ChangeScope) -> Self {
        Self {
            start: start.to_path_buf(),
            scope,
        }
    }
}

impl ChangedFiles for GitChanges {
    fn changed_files(&self) -> Result<ChangeSet> {
        let changes = match &self.scope {
            ChangeScope::WorkingTree => GitStatus::discover(&self.start)?.change_set()?,
            ChangeScope::Staged => GitDiff::discover(&self.start)?.staged_change_set()?,
            ChangeScope::Since(base_ref) => {
                GitDiff::discover(&self.start)?.change_set_since(base_ref)?
            }
        };
        log::debug!(
            "{} changed path(s) under {}",
            changes.paths.len(),
            changes.root.display()
        );
        Ok(changes)
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
