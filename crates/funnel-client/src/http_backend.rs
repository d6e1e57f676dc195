use crate::{AuthContext, ChallengeBackend, ClientError, ClientResult, with_retry};

use async_trait::async_trait;
use funnel_config::{ClientConfig, Config, RetryConfig};
use funnel_core::{Envelope, ItemEnvelope, NewWorkItem, Stage, WorkItem, WorkItemPatch};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

const CHALLENGES_PATH: &str = "/challenges";

/// Everything but RFC 3986 unreserved characters, so an id stays one path segment
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// `ChallengeBackend` over the challenge REST API
pub struct HttpChallengeBackend {
    pub base_url: String,
    auth: AuthContext,
    retry: RetryConfig,
    client: ReqwestClient,
}

impl HttpChallengeBackend {
    /// Create a backend with the given client settings.
    ///
    /// # Arguments
    /// * `client_config` - Base URL (e.g. "https://host/api") and request timeout
    /// * `auth` - Identity sent with every request
    pub fn new(client_config: &ClientConfig, auth: AuthContext) -> ClientResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(client_config.timeout())
            .build()?;

        Ok(Self {
            base_url: client_config.base_url.trim_end_matches('/').to_string(),
            auth,
            retry: RetryConfig::default(),
            client,
        })
    }

    /// Create a backend from the full application config.
    pub fn from_config(config: &Config) -> ClientResult<Self> {
        Ok(Self::new(&config.client, AuthContext::from_config(&config.auth))?
            .with_retry(config.retry.clone()))
    }

    /// Replace the retry policy used for reads
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Build a request carrying the caller's identity headers
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(ref token) = self.auth.token {
            req = req.bearer_auth(token);
        }
        if let Some(ref company_id) = self.auth.company_id {
            req = req.header("X-Company-Id", company_id);
        }
        if let Some(ref role) = self.auth.role {
            req = req.header("X-User-Role", role);
        }

        req
    }

    /// Send a request and return the raw body of a successful response
    async fn execute(&self, req: reqwest::RequestBuilder) -> ClientResult<String> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        Ok(body)
    }

    /// Map a non-2xx response to `ClientError::Api`.
    ///
    /// Understands `{"error": {"code", "message"}}`, `{"error": "..", "message": ".."}`
    /// and `{"message": ".."}`; anything else falls back to the status line.
    fn api_error(status: StatusCode, body: &str) -> ClientError {
        let fallback_code = format!("HTTP_{}", status.as_u16());
        let fallback_message = status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string();

        let (code, message) = match serde_json::from_str::<Value>(body) {
            Ok(value) => match value.get("error") {
                Some(Value::Object(error)) => (
                    error
                        .get("code")
                        .and_then(|v| v.as_str())
                        .map(String::from)
                        .unwrap_or(fallback_code),
                    error
                        .get("message")
                        .and_then(|v| v.as_str())
                        .map(String::from)
                        .unwrap_or(fallback_message),
                ),
                Some(Value::String(error)) => (
                    error.clone(),
                    value
                        .get("message")
                        .and_then(|v| v.as_str())
                        .map(String::from)
                        .unwrap_or_else(|| error.clone()),
                ),
                _ => (
                    value
                        .get("code")
                        .and_then(|v| v.as_str())
                        .map(String::from)
                        .unwrap_or(fallback_code),
                    value
                        .get("message")
                        .and_then(|v| v.as_str())
                        .map(String::from)
                        .unwrap_or(fallback_message),
                ),
            },
            Err(_) => (fallback_code, fallback_message),
        };

        ClientError::api_error(status.as_u16(), code, message)
    }

    fn decode<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
        Ok(serde_json::from_str(body)?)
    }

    /// GET a list endpoint, accepting any known envelope shape
    async fn fetch_items(&self, path: &str) -> ClientResult<Vec<WorkItem>> {
        let body = self.execute(self.request(Method::GET, path)).await?;

        // An empty 2xx body is an empty list
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(Self::decode::<Envelope<WorkItem>>(&body)?.into_items())
    }

    pub(crate) fn item_path(id: &str) -> String {
        format!("{}/{}", CHALLENGES_PATH, utf8_percent_encode(id, ID_SEGMENT))
    }
}

#[async_trait]
impl ChallengeBackend for HttpChallengeBackend {
    async fn list_all(&self) -> ClientResult<Vec<WorkItem>> {
        with_retry(&self.retry, "list challenges", || {
            self.fetch_items(CHALLENGES_PATH)
        })
        .await
    }

    async fn list_by_stage(&self, stage: Stage) -> ClientResult<Vec<WorkItem>> {
        let path = format!("{}?stage={}", CHALLENGES_PATH, stage.as_str());
        let operation = format!("list challenges in {}", stage);
        with_retry(&self.retry, &operation, || self.fetch_items(&path)).await
    }

    async fn create(&self, item: &NewWorkItem) -> ClientResult<WorkItem> {
        let mut body = item.clone();
        if body.company_id.is_none() {
            body.company_id = self.auth.company_id.clone();
        }

        let req = self.request(Method::POST, CHALLENGES_PATH).json(&body);
        let response = self.execute(req).await?;
        Ok(Self::decode::<ItemEnvelope<WorkItem>>(&response)?.into_item())
    }

    async fn update(&self, id: &str, patch: &WorkItemPatch) -> ClientResult<WorkItem> {
        let req = self.request(Method::PUT, &Self::item_path(id)).json(patch);
        let response = self.execute(req).await?;
        Ok(Self::decode::<ItemEnvelope<WorkItem>>(&response)?.into_item())
    }

    async fn update_stage(&self, id: &str, stage: Stage) -> ClientResult<()> {
        let path = format!("{}/stage?value={}", Self::item_path(id), stage.as_str());
        self.execute(self.request(Method::PUT, &path)).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.execute(self.request(Method::DELETE, &Self::item_path(id)))
            .await?;
        Ok(())
    }
}
