mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, LogConfig, StreakConfig, TaskConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Resolve the data directory without touching the filesystem.
///
/// `DAYBOARD_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/dayboard[-dev]/`, with `DAYBOARD_ENV=dev` selecting the
/// development directory.
pub fn data_dir_path() -> PathBuf {
    match std::env::var_os("DAYBOARD_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("DAYBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dayboard-dev")
            } else {
                base_dir.join("dayboard")
            }
        }
    }
}

/// Returns the data directory, creating it if needed.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = data_dir_path();
    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
