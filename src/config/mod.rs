mod filesystem;
mod loader;
mod model;
mod validation;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME};
pub use model::{CheckerConfig, CheckersConfig, Config, CustomConfig, ScannerConfig};
pub use validation::validate_config_semantics;
