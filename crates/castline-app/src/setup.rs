//! Translate config into session-layer types.

use castline_config::CastlineConfig;
use castline_session::{Credentials, PublisherSettings};

/// Name used for the publication when the config leaves it empty.
pub fn default_publisher_name() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "castline".to_string())
}

pub fn credentials(config: &CastlineConfig) -> Credentials {
    Credentials::new(
        config.session.api_key.clone(),
        config.session.session_id.clone(),
        config.session.token.clone(),
    )
}

pub fn publisher_settings(config: &CastlineConfig, fallback_name: String) -> PublisherSettings {
    let publisher = &config.publisher;
    PublisherSettings {
        name: if publisher.name.is_empty() {
            fallback_name
        } else {
            publisher.name.clone()
        },
        audio_fallback: publisher.audio_fallback,
        quality: publisher.quality,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castline_common::ShareQuality;

    #[test]
    fn empty_name_uses_fallback() {
        let config = CastlineConfig::default();
        let settings = publisher_settings(&config, "desk-01".into());
        assert_eq!(settings.name, "desk-01");
        assert!(!settings.audio_fallback);
    }

    #[test]
    fn configured_values_are_copied() {
        let mut config = CastlineConfig::default();
        config.publisher.name = "demo".into();
        config.publisher.quality = ShareQuality::Low;
        config.publisher.audio_fallback = true;

        let settings = publisher_settings(&config, "unused".into());
        assert_eq!(settings.name, "demo");
        assert_eq!(settings.quality, ShareQuality::Low);
        assert!(settings.audio_fallback);
    }

    #[test]
    fn credentials_come_from_session_section() {
        let mut config = CastlineConfig::default();
        config.session.api_key = "k".into();
        config.session.session_id = "s".into();
        config.session.token = "t".into();

        let creds = credentials(&config);
        assert_eq!(creds.api_key(), "k");
        assert_eq!(creds.session_id(), "s");
        assert_eq!(creds.token(), "t");
    }

    #[test]
    fn default_publisher_name_is_never_empty() {
        assert!(!default_publisher_name().is_empty());
    }
}
