//! Subcommand implementations.

pub mod config;
pub mod list;
pub mod save;
pub mod scan;
pub mod verify;

use std::path::{Path, PathBuf};

use tracing::debug;

use bizcard_core::BizcardConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bizcard")
        .join("config.json")
}

/// Config file in effect: the `--config` flag, else the default location.
pub fn resolve_config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration and apply environment overrides.
///
/// An explicit path must exist. The default path falls back to built-in
/// defaults when no file has been created yet.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BizcardConfig> {
    let mut config = match config_path {
        Some(path) => read_config(Path::new(path))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                read_config(&path)?
            } else {
                debug!("No config file at {}, using defaults", path.display());
                BizcardConfig::default()
            }
        }
    };

    config.apply_env();
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<BizcardConfig> {
    debug!("Loading config from {}", path.display());
    BizcardConfig::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))
}
