//! The slice of the filesystem the config loader touches, behind a trait
//! so loader tests can run against an in-memory map.

use std::path::{Path, PathBuf};

pub trait FileSystem {
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    /// # Errors
    /// Returns an error if the working directory is gone or unreadable.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Per-user config directory, e.g. `~/.config/style-guard` on Linux or
    /// `%APPDATA%\style-guard` on Windows.
    fn config_dir(&self) -> Option<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "style-guard")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}
