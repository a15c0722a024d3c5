use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::filter::{FileClass, SourceFilter};

/// Files found under one directory, split by what is known about them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkOutcome {
    pub sources: Vec<PathBuf>,
    pub unknown: Vec<PathBuf>,
}

/// Recursive walk that prunes skipped directories.
///
/// Symbolic links are reported as-is: their targets are neither followed
/// nor resolved.
pub struct DirectoryScanner<'a> {
    filter: &'a SourceFilter,
}

impl<'a> DirectoryScanner<'a> {
    #[must_use]
    pub const fn new(filter: &'a SourceFilter) -> Self {
        Self { filter }
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .filter
                .is_skipped_dir(&entry.file_name().to_string_lossy())
    }

    #[must_use]
    pub fn scan(&self, root: &Path) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();

        let entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_pruned(e));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.into_path();
            match self.filter.classify_walked(&path) {
                FileClass::Source => outcome.sources.push(path),
                FileClass::Unknown => outcome.unknown.push(path),
                FileClass::Skipped(reason) => {
                    log::trace!("Skipping {}: {reason}", path.display());
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
