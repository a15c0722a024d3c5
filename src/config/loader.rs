use std::path::{Path, PathBuf};

use crate::error::{Result, StyleGuardError};

use super::Config;
use super::filesystem::{FileSystem, RealFileSystem};
use super::validation::validate_config_semantics;

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default location.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    fn load(&self) -> Result<Config>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

pub const LOCAL_CONFIG_NAME: &str = ".style-guard.toml";
const USER_CONFIG_NAME: &str = "config.toml";

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `.style-guard.toml` in current directory
/// 2. Platform-specific user config directory (`<config dir>/style-guard/config.toml`)
/// 3. Returns `Config::default()` if no config found
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    /// Returns an error on TOML syntax errors or invalid values.
    pub fn parse_config(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        validate_config_semantics(&config)?;
        Ok(config)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<Config> {
        if let Some(local_path) = self.local_config_path()
            && self.fs.exists(&local_path)
        {
            return self.load_from_path(&local_path);
        }

        if let Some(user_path) = self.user_config_path()
            && self.fs.exists(&user_path)
        {
            return self.load_from_path(&user_path);
        }

        log::debug!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        log::debug!("Loading configuration from {}", path.display());
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| StyleGuardError::file_read(path, source))?;
        Self::parse_config(&content)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
