use funnel_config::AuthConfig;

/// Caller identity attached to every request.
///
/// Passed in explicitly so callers and tests decide where it comes from.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub token: Option<String>,
    pub company_id: Option<String>,
    pub role: Option<String>,
}

impl AuthContext {
    /// No credentials at all
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            token: config.token.clone(),
            company_id: config.company_id.clone(),
            role: config.role.clone(),
        }
    }
}

// Keeps the token out of logs and panic messages.
impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("company_id", &self.company_id)
            .field("role", &self.role)
            .finish()
    }
}
