//! castline configuration system.
//!
//! TOML-based configuration with per-section defaults, environment
//! overrides for credentials, and validation. Partial configs work out
//! of the box.
//!
//! ```rust,no_run
//! use castline_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    CastlineConfig, LogLevel, LoggingConfig, PublisherConfig, SessionConfig, SubscriberConfig,
    UiConfig, CONFIG_SCHEMA_VERSION,
};
pub use validation::{require_credentials, validate};

use castline_common::ConfigError;
use std::path::Path;

/// Load config from `path` (or the platform default when `None`) and apply
/// `CASTLINE_*` environment overrides to the credentials.
pub fn load_config(path: Option<&Path>) -> Result<CastlineConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    config
        .session
        .apply_overrides(|key| std::env::var(key).ok());

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string with credentials redacted.
pub fn config_to_json(config: &CastlineConfig) -> String {
    let mut redacted = config.clone();
    for secret in [&mut redacted.session.api_key, &mut redacted.session.token] {
        if !secret.is_empty() {
            *secret = "[REDACTED]".into();
        }
    }
    serde_json::to_string_pretty(&redacted)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
