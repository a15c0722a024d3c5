pub mod check;
pub mod config;
pub mod init;

pub use check::{CheckSettings, check_files, run_check, run_check_impl};
pub use config::{format_config_text, run_config, run_config_show_impl, run_config_validate_impl};
pub use init::{generate_config_template, run_init, run_init_impl};

use std::path::Path;

use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::Result;

/// Load configuration from `path`, the default search locations, or not at all.
pub(crate) fn load_config(path: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        log::debug!("Configuration loading disabled");
        return Ok(Config::default());
    }
    let loader = FileConfigLoader::new();
    path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}
