use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CastlineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("session error: {0}")]
    Session(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("session.token is empty".into());
        assert_eq!(
            err.to_string(),
            "config validation error: session.token is empty"
        );
    }

    #[test]
    fn castline_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: CastlineError = config_err.into();
        assert!(matches!(err, CastlineError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn castline_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: CastlineError = io_err.into();
        assert!(matches!(err, CastlineError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn castline_error_session_and_other() {
        let err = CastlineError::Session("connect failed".into());
        assert_eq!(err.to_string(), "session error: connect failed");

        let err = CastlineError::Other("something odd".into());
        assert_eq!(err.to_string(), "something odd");
    }
}
