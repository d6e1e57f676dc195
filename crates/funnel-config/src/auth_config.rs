use serde::Deserialize;

/// Caller identity forwarded to the challenge API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bearer token. Never logged.
    pub token: Option<String>,
    /// Tenant the caller acts for
    pub company_id: Option<String>,
    pub role: Option<String>,
}
