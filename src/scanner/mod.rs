//! File set resolution.
//!
//! Candidates come from explicit arguments (files and directory walks) or,
//! when none are given, from the version-control change set. Names decide
//! most cases; whatever is left ambiguous goes to the [`Classifier`] in a
//! single batch.

mod classifier;
mod directory;
mod filter;

pub use classifier::{Classifier, FileCommandClassifier};
pub use directory::{DirectoryScanner, WalkOutcome};
pub use filter::{FileClass, SkipReason, SourceFilter};

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::config::ScannerConfig;
use crate::error::{Result, StyleGuardError};
use crate::git::{ChangeSet, ChangedFiles};
use crate::path_utils::{absolutize, display_path};

/// A file selected for checking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    /// Absolute, lexically normalized path. Symlinks are not resolved.
    pub absolute: PathBuf,
    /// Shorter of the base-relative and absolute forms, used in reports
    /// and on checker command lines.
    pub display: PathBuf,
}

impl SourceFile {
    #[must_use]
    pub fn new(absolute: PathBuf, base_dir: &Path) -> Self {
        let display = display_path(&absolute, base_dir);
        Self { absolute, display }
    }

    #[must_use]
    pub fn has_extension(&self, ext: &str) -> bool {
        self.absolute.extension().is_some_and(|e| e == ext)
    }
}

/// Builds the set of files to check.
pub struct FileResolver<'a> {
    filter: SourceFilter,
    classifier: &'a dyn Classifier,
    base_dir: PathBuf,
    warn_skipped: bool,
}

impl<'a> FileResolver<'a> {
    #[must_use]
    pub fn new(config: &ScannerConfig, classifier: &'a dyn Classifier, base_dir: &Path) -> Self {
        Self {
            filter: SourceFilter::new(config),
            classifier,
            base_dir: base_dir.to_path_buf(),
            warn_skipped: true,
        }
    }

    /// Whether explicitly named files that get skipped are reported.
    #[must_use]
    pub const fn with_skip_warnings(mut self, warn: bool) -> Self {
        self.warn_skipped = warn;
        self
    }

    /// Resolve explicit arguments, or the change set when there are none.
    ///
    /// # Errors
    /// Returns [`StyleGuardError::NoChangeSet`] when no arguments are given
    /// and `changes` cannot supply a change set.
    pub fn resolve(&self, args: &[PathBuf], changes: &dyn ChangedFiles) -> Result<Vec<SourceFile>> {
        if !args.is_empty() {
            return Ok(self.resolve_paths(args));
        }
        let change_set = changes
            .changed_files()
            .map_err(|e| StyleGuardError::NoChangeSet(e.to_string()))?;
        Ok(self.resolve_change_set(&change_set))
    }

    /// Resolve explicit file and directory arguments.
    #[must_use]
    pub fn resolve_paths(&self, args: &[PathBuf]) -> Vec<SourceFile> {
        let mut candidates = Candidates::default();

        for arg in args {
            let absolute = absolutize(arg, &self.base_dir);
            if absolute.is_dir() {
                let WalkOutcome { sources, unknown } =
                    DirectoryScanner::new(&self.filter).scan(&absolute);
                log::debug!(
                    "{}: {} source file(s), {} to classify",
                    arg.display(),
                    sources.len(),
                    unknown.len()
                );
                sources.into_iter().for_each(|p| candidates.push(p, true));
                unknown.into_iter().for_each(|p| candidates.push(p, false));
            } else if absolute.exists() || absolute.is_symlink() {
                match self.filter.classify_explicit(&absolute) {
                    FileClass::Source => candidates.push(absolute, true),
                    FileClass::Unknown => candidates.push(absolute, false),
                    FileClass::Skipped(reason) => self.report_skipped(arg, &reason),
                }
            } else {
                log::warn!("{}: no such file or directory", arg.display());
            }
        }

        self.finish(candidates)
    }

    /// Resolve a version-control change set.
    ///
    /// Directories, deleted paths and anything under a skipped top-level
    /// directory are dropped.
    #[must_use]
    pub fn resolve_change_set(&self, changes: &ChangeSet) -> Vec<SourceFile> {
        let mut candidates = Candidates::default();

        for relative in &changes.paths {
            let absolute = absolutize(relative, &changes.root);
            if absolute.is_dir() || !(absolute.exists() || absolute.is_symlink()) {
                log::trace!("Dropping {}: not a file", relative.display());
                continue;
            }
            match self.filter.classify_changed(relative) {
                FileClass::Source => candidates.push(absolute, true),
                FileClass::Unknown => candidates.push(absolute, false),
                FileClass::Skipped(reason) => {
                    log::debug!("Skipping {}: {reason}", relative.display());
                }
            }
        }

        self.finish(candidates)
    }

    fn report_skipped(&self, path: &Path, reason: &SkipReason) {
        if self.warn_skipped {
            log::warn!("Skipping {}: {reason}", path.display());
        } else {
            log::debug!("Skipping {}: {reason}", path.display());
        }
    }

    fn finish(&self, candidates: Candidates) -> Vec<SourceFile> {
        let ambiguous: Vec<PathBuf> = candidates
            .0
            .iter()
            .filter(|(_, known)| !**known)
            .map(|(path, _)| path.clone())
            .collect();

        let recognized = match self.classifier.classify(&ambiguous) {
            Ok(recognized) => recognized,
            Err(e) => {
                log::warn!("{e}; {} unrecognized file(s) skipped", ambiguous.len());
                Default::default()
            }
        };

        candidates
            .0
            .into_iter()
            .filter(|(path, known)| {
                let keep = *known || recognized.contains(path);
                if !keep {
                    log::debug!("Skipping {}: not recognized as source", path.display());
                }
                keep
            })
            .map(|(path, _)| SourceFile::new(path, &self.base_dir))
            .collect()
    }
}

/// Discovery-ordered candidates keyed by absolute path; `true` when the
/// extension alone identified the file as source.
#[derive(Default)]
struct Candidates(IndexMap<PathBuf, bool>);

impl Candidates {
    fn push(&mut self, path: PathBuf, known: bool) {
        let entry = self.0.entry(path).or_insert(known);
        *entry |= known;
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
