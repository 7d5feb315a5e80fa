/// Immutable identity used to join a session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    session_id: String,
    token: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        session_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            session_id: session_id.into(),
            token: token.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("session_id", &self.session_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
