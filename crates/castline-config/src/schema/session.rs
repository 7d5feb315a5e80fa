//! Session credentials.

use serde::{Deserialize, Serialize};

/// Environment variable overriding `session.api_key`.
pub const ENV_API_KEY: &str = "CASTLINE_API_KEY";
/// Environment variable overriding `session.session_id`.
pub const ENV_SESSION_ID: &str = "CASTLINE_SESSION_ID";
/// Environment variable overriding `session.token`.
pub const ENV_TOKEN: &str = "CASTLINE_TOKEN";

/// Credentials used to join a media session.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub api_key: String,
    pub session_id: String,
    pub token: String,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("api_key", &"[REDACTED]")
            .field("session_id", &self.session_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl SessionConfig {
    /// Replace fields with values returned by `lookup` for the `CASTLINE_*` keys.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, field: &mut String| {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                *field = value;
            }
        };
        pick(ENV_API_KEY, &mut self.api_key);
        pick(ENV_SESSION_ID, &mut self.session_id);
        pick(ENV_TOKEN, &mut self.token);
    }

    /// Names of credential fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_empty() {
            missing.push("session.api_key");
        }
        if self.session_id.is_empty() {
            missing.push("session.session_id");
        }
        if self.token.is_empty() {
            missing.push("session.token");
        }
        missing
    }
}
