//! Chat backend for OpenAI-compatible completion endpoints.

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use safety_core::{ChatMessage, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::backend::{last_user_message, ChatBackend};
use crate::error::ChatError;

/// System prompt used when the history does not carry one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Aksha's AI safety assistant integrated with a personal safety app. \
Your purpose is to provide helpful information about personal safety, using the app features, \
and offering guidance during emergencies. Be concise, clear, and compassionate in your responses. \
Always prioritize user safety and well-being in your advice.";

/// System prompt for emergency guidance requests.
pub const EMERGENCY_SYSTEM_PROMPT: &str = "You are an emergency response assistant in a safety app called Aksha. \
Provide clear, step-by-step guidance for emergency situations as a numbered list of actions. \
Be concise and prioritize the user's immediate safety.";

/// Configuration for [`CompletionsBackend`].
#[derive(Debug, Clone)]
pub struct CompletionsConfig {
    /// Base URL; requests go to `<api_url>/v1/chat/completions`.
    pub api_url: String,

    /// Bearer key, if the endpoint needs one.
    pub api_key: Option<String>,

    /// Model name to use.
    pub model: String,

    /// System prompt added when the history has none.
    pub system_prompt: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Number of most recent history messages sent with each request.
    pub history_window: usize,
}

impl Default for CompletionsConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: Some(500),
            temperature: Some(0.7),
            history_window: 6,
        }
    }
}

impl CompletionsConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `AKSHA_COMPLETIONS_URL` - Endpoint base URL
    ///
    /// Optional environment variables:
    /// - `AKSHA_COMPLETIONS_KEY` - Bearer key
    /// - `AKSHA_COMPLETIONS_MODEL` - Model name (default: gpt-3.5-turbo)
    /// - `AKSHA_COMPLETIONS_SYSTEM_PROMPT` - System prompt override
    /// - `AKSHA_COMPLETIONS_MAX_TOKENS` - Max tokens (default: 500)
    /// - `AKSHA_COMPLETIONS_TEMPERATURE` - Temperature (default: 0.7)
    /// - `AKSHA_COMPLETIONS_HISTORY_WINDOW` - Messages sent per request (default: 6)
    pub fn from_env() -> Result<Self, ChatError> {
        let api_url = env::var("AKSHA_COMPLETIONS_URL").map_err(|_| {
            ChatError::Configuration("AKSHA_COMPLETIONS_URL not set".to_string())
        })?;

        let defaults = Self::default();

        let api_key = env::var("AKSHA_COMPLETIONS_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let model = env::var("AKSHA_COMPLETIONS_MODEL").unwrap_or(defaults.model);

        let system_prompt =
            env::var("AKSHA_COMPLETIONS_SYSTEM_PROMPT").unwrap_or(defaults.system_prompt);

        let max_tokens = env::var("AKSHA_COMPLETIONS_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.max_tokens);

        let temperature = env::var("AKSHA_COMPLETIONS_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        let history_window = env::var("AKSHA_COMPLETIONS_HISTORY_WINDOW")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.history_window);

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
            history_window,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> CompletionsConfigBuilder {
        CompletionsConfigBuilder::default()
    }
}

/// Builder for CompletionsConfig.
#[derive(Debug, Default)]
pub struct CompletionsConfigBuilder {
    config: CompletionsConfig,
}

impl CompletionsConfigBuilder {
    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the history window.
    pub fn history_window(mut self, messages: usize) -> Self {
        self.config.history_window = messages;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CompletionsConfig {
        self.config
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetails {
    message: String,
}

/// Talks to an OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct CompletionsBackend {
    client: Client,
    config: CompletionsConfig,
    name: String,
}

impl CompletionsBackend {
    /// Create a backend with the given configuration.
    pub fn new(config: CompletionsConfig) -> Result<Self, ChatError> {
        let client = Client::builder().build().map_err(|e| {
            ChatError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        let name = format!("Completions({})", config.model);
        info!(
            "Completions backend initialized: {} model {}",
            config.api_url, config.model
        );

        Ok(Self {
            client,
            config,
            name,
        })
    }

    /// Create a backend from environment variables.
    ///
    /// See [`CompletionsConfig::from_env`].
    pub fn from_env() -> Result<Self, ChatError> {
        Self::new(CompletionsConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &CompletionsConfig {
        &self.config
    }

    /// Prepend the system prompt unless the history has one, then keep
    /// only the last `history_window` messages (the system prompt is
    /// always kept).
    fn build_messages(&self, history: &[ChatMessage]) -> Vec<ChatMessage> {
        let system = history
            .iter()
            .find(|m| m.role == Role::System)
            .cloned()
            .unwrap_or_else(|| ChatMessage::system(self.config.system_prompt.clone()));

        let conversation: Vec<&ChatMessage> =
            history.iter().filter(|m| m.role != Role::System).collect();
        let skip = conversation
            .len()
            .saturating_sub(self.config.history_window.max(1));

        let mut messages = Vec::with_capacity(self.config.history_window + 1);
        messages.push(system);
        messages.extend(conversation.into_iter().skip(skip).cloned());
        messages
    }

    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String, ChatError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending completion request to {}", url);

        let mut builder = self.client.post(&url).json(&request);
        if let Some(ref key) = self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ChatError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiErrorBody>(&error_text) {
                return Err(ChatError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(ChatError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            ChatError::ProcessingFailed(format!("Failed to parse response: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                warn!("No content in completion response");
                ChatError::ProcessingFailed("no content in response".to_string())
            })
    }
}

#[async_trait]
impl ChatBackend for CompletionsBackend {
    async fn reply(&self, history: &[ChatMessage]) -> Result<String, ChatError> {
        if last_user_message(history).is_none() {
            return Err(ChatError::NoUserMessage);
        }
        let messages = self.build_messages(history);
        self.chat_completion(messages).await
    }

    async fn emergency_guidance(
        &self,
        situation: &str,
        location: Option<&str>,
    ) -> Result<String, ChatError> {
        let mut prompt = format!(
            "I'm in this emergency situation: {}. What should I do?",
            situation
        );
        if let Some(location) = location {
            prompt.push_str(&format!(" My location: {}.", location));
        }

        let messages = vec![
            ChatMessage::system(EMERGENCY_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];
        self.chat_completion(messages).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
