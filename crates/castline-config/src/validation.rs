//! Configuration validation.
//!
//! Collects every problem in one pass so the user sees them all at once.

use crate::schema::CastlineConfig;
use castline_common::ConfigError;

/// Longest accepted publisher display name, in characters.
const MAX_PUBLISHER_NAME: usize = 64;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &CastlineConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(&mut errors, "ui.alert_capacity", config.ui.alert_capacity, 1, 256);

    let name_len = config.publisher.name.chars().count();
    if name_len > MAX_PUBLISHER_NAME {
        errors.push(format!(
            "publisher.name is {name_len} characters, at most {MAX_PUBLISHER_NAME} allowed"
        ));
    }

    for (field, value) in [
        ("session.api_key", &config.session.api_key),
        ("session.session_id", &config.session.session_id),
        ("session.token", &config.session.token),
    ] {
        if value.trim() != value.as_str() {
            errors.push(format!("{field} has leading or trailing whitespace"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Fail unless every credential field is filled in.
pub fn require_credentials(config: &CastlineConfig) -> Result<(), ConfigError> {
    let missing = config.session.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "missing credentials: {}",
            missing.join(", ")
        )))
    }
}

/// Push an error if `value` is outside `[min, max]`.
fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
