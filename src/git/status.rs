use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Result, StyleGuardError};

use super::ChangeSet;

/// Working-tree change set from `git status`: modified, added, renamed and
/// untracked files, relative to the repository root.
pub struct GitStatus {
    workdir: PathBuf,
}

impl GitStatus {
    /// Locate the repository containing `path`.
    ///
    /// # Errors
    /// Returns an error if `path` is not inside a git working tree.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = gix::discover(path)
            .map_err(|e| StyleGuardError::Git(format!("Failed to discover git repository: {e}")))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| StyleGuardError::Git("Repository has no working directory".into()))?
            .to_path_buf();
        Ok(Self { workdir })
    }

    /// Run `git status` and collect the changed paths.
    ///
    /// # Errors
    /// Returns an error if git cannot be run or exits unsuccessfully.
    pub fn change_set(&self) -> Result<ChangeSet> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.workdir)
            .args(["status", "--porcelain", "-z", "--untracked-files=all"])
            .output()
            .map_err(|e| StyleGuardError::Git(format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(StyleGuardError::Git(format!(
                "git status failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(ChangeSet {
            root: self.workdir.clone(),
            paths: parse_porcelain(&String::from_utf8_lossy(&output.stdout)),
        })
    }
}

/// Parse `git status --porcelain -z` output.
///
/// Deleted files are dropped; renames and copies report their new path.
#[must_use]
pub fn parse_porcelain(output: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut records = output.split('\0').filter(|r| !r.is_empty());

    while let Some(record) = records.next() {
        let Some((status, path)) = record.get(..2).zip(record.get(3..)) else {
            continue;
        };
        if status.contains(['R', 'C']) {
            // The original path follows as its own record.
            records.next();
        }
        if status.contains('D') {
            continue;
        }
        paths.push(PathBuf::from(path));
    }

    paths
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
