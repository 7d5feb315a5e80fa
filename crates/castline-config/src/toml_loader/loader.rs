//! Core TOML config loading: path resolution, reading, default file creation.

use crate::schema::CastlineConfig;
use crate::validation;
use castline_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::info;

use super::template::default_config_toml;

/// Environment variable naming a config file to use instead of the
/// platform default.
pub const ENV_CONFIG_PATH: &str = "CASTLINE_CONFIG";

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. The result is validated and
/// any validation failure is returned.
pub fn load_from_path(path: &Path) -> Result<CastlineConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: CastlineConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    validation::validate(&config)?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the default path (see [`default_config_path`]).
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<CastlineConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(CastlineConfig::default())
        }
        other => other,
    }
}

/// The config file to use when none is given on the command line.
///
/// `CASTLINE_CONFIG` wins when set and non-empty. Otherwise:
/// On macOS: `~/Library/Application Support/castline/config.toml`
/// On Linux: `~/.config/castline/config.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    resolve_config_path(|key| std::env::var(key).ok(), dirs::config_dir())
}

pub(crate) fn resolve_config_path<F>(
    lookup: F,
    platform_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(ENV_CONFIG_PATH).filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let config_dir = platform_dir
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("castline").join("config.toml"))
}

/// Write the commented default config to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}
