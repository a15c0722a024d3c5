use std::fmt;
use std::path::{Component, Path};

use crate::config::ScannerConfig;

const README_PREFIX: &str = "README";
const EGG_INFO_SUFFIX: &str = ".egg-info";

/// Why a candidate was dropped without consulting the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    IgnorePrefix,
    Readme,
    SkippedExtension(String),
    SkippedDirectory(String),
    Directory,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IgnorePrefix => write!(f, "hidden file"),
            Self::Readme => write!(f, "README file"),
            Self::SkippedExtension(ext) => write!(f, "skipped extension .{ext}"),
            Self::SkippedDirectory(dir) => write!(f, "inside skipped directory '{dir}'"),
            Self::Directory => write!(f, "is a directory"),
        }
    }
}

/// Outcome of looking at a candidate path by name alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileClass {
    /// Known source extension.
    Source,
    /// No extension or an unrecognized one; the classifier decides.
    Unknown,
    Skipped(SkipReason),
}

/// Name-based classification rules built from `[scanner]` settings.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    source_extensions: Vec<String>,
    skip_extensions: Vec<String>,
    skip_dirs: Vec<String>,
    ignore_prefix: Option<char>,
}

impl SourceFilter {
    #[must_use]
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            source_extensions: config.source_extensions.clone(),
            skip_extensions: config.skip_extensions.clone(),
            skip_dirs: config.skip_dirs.clone(),
            ignore_prefix: config.ignore_prefix.chars().next(),
        }
    }

    /// Whether a directory with this name is pruned from walks.
    #[must_use]
    pub fn is_skipped_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == name) || name.ends_with(EGG_INFO_SUFFIX)
    }

    #[must_use]
    pub fn has_source_extension(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.source_extensions.iter().any(|e| *e == ext))
    }

    fn skipped_extension(&self, path: &Path) -> Option<String> {
        extension_of(path)
            .filter(|ext| self.skip_extensions.iter().any(|e| e == ext))
            .map(str::to_string)
    }

    /// Classify a file found while walking a directory.
    #[must_use]
    pub fn classify_walked(&self, path: &Path) -> FileClass {
        let name = file_name_of(path);
        if self.ignore_prefix.is_some_and(|p| name.starts_with(p)) {
            return FileClass::Skipped(SkipReason::IgnorePrefix);
        }
        if name.starts_with(README_PREFIX) {
            return FileClass::Skipped(SkipReason::Readme);
        }
        self.classify_by_extension(path)
    }

    /// Classify a file named explicitly on the command line.
    ///
    /// Hidden and README files are honored here: the user asked for them.
    #[must_use]
    pub fn classify_explicit(&self, path: &Path) -> FileClass {
        self.classify_by_extension(path)
    }

    /// Classify a path reported by the change set, relative to the working tree root.
    #[must_use]
    pub fn classify_changed(&self, relative: &Path) -> FileClass {
        if let Some(Component::Normal(top)) = relative.components().next() {
            let top = top.to_string_lossy();
            // A lone file name has no top-level directory.
            if relative.components().count() > 1 && self.is_skipped_dir(&top) {
                return FileClass::Skipped(SkipReason::SkippedDirectory(top.into_owned()));
            }
        }
        self.classify_by_extension(relative)
    }

    fn classify_by_extension(&self, path: &Path) -> FileClass {
        if let Some(ext) = self.skipped_extension(path) {
            return FileClass::Skipped(SkipReason::SkippedExtension(ext));
        }
        if self.has_source_extension(path) {
            FileClass::Source
        } else {
            FileClass::Unknown
        }
    }
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn file_name_of(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
