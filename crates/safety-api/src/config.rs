//! Configuration for the backend client.

use std::env;
use std::time::Duration;

use crate::error::ApiError;

/// Backend used when `AKSHA_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Model requested from `/ai/chat` when none is given.
pub const DEFAULT_CHAT_MODEL: &str = "gemma3";

/// Configuration for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,

    /// Prefix for account, location and alert routes.
    pub api_prefix: String,

    /// Prefix for AI assistant routes ("/ai" or "/api/ai" depending on deployment).
    pub ai_prefix: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Model name sent with chat requests.
    pub chat_model: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_prefix: "/api/v1".to_string(),
            ai_prefix: "/ai".to_string(),
            timeout: Duration::from_secs(30),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `AKSHA_API_URL` - Backend base URL (default: http://localhost:5001)
    /// - `AKSHA_API_PREFIX` - Account/alert route prefix (default: /api/v1)
    /// - `AKSHA_AI_PREFIX` - AI route prefix (default: /ai)
    /// - `AKSHA_API_TIMEOUT_SECS` - Request timeout (default: 30)
    /// - `AKSHA_CHAT_MODEL` - Chat model (default: gemma3)
    pub fn from_env() -> Result<Self, ApiError> {
        let defaults = Self::default();

        let base_url = env::var("AKSHA_API_URL").unwrap_or(defaults.base_url);
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::Config(format!(
                "AKSHA_API_URL must start with http:// or https://, got {}",
                base_url
            )));
        }

        let api_prefix = env::var("AKSHA_API_PREFIX").unwrap_or(defaults.api_prefix);
        let ai_prefix = env::var("AKSHA_AI_PREFIX").unwrap_or(defaults.ai_prefix);

        let timeout = env::var("AKSHA_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let chat_model = env::var("AKSHA_CHAT_MODEL").unwrap_or(defaults.chat_model);

        Ok(Self::builder()
            .base_url(base_url)
            .api_prefix(api_prefix)
            .ai_prefix(ai_prefix)
            .timeout(timeout)
            .chat_model(chat_model)
            .build())
    }

    /// Create a new config builder.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Full URL of an account/alert route, e.g. `api_url("/alerts/sos")`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    /// Full URL of an AI route, e.g. `ai_url("/chat")`.
    pub fn ai_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.ai_prefix, path)
    }
}

/// Builder for ApiConfig.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    config: ApiConfig,
}

impl ApiConfigBuilder {
    /// Set the base URL. A trailing slash is removed.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the account/alert route prefix.
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.api_prefix = normalize_prefix(prefix.into());
        self
    }

    /// Set the AI route prefix.
    pub fn ai_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.ai_prefix = normalize_prefix(prefix.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the chat model.
    pub fn chat_model(mut self, model: impl Into<String>) -> Self {
        self.config.chat_model = model.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ApiConfig {
        self.config
    }
}

/// Ensure a leading slash and no trailing slash; empty stays empty.
fn normalize_prefix(prefix: String) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
