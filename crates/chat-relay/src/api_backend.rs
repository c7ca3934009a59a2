//! Chat backend over the Aksha backend's AI routes.

use async_trait::async_trait;
use safety_api::ApiClient;
use safety_core::ChatMessage;
use tracing::debug;

use crate::backend::{last_user_message, ChatBackend};
use crate::error::ChatError;

/// Sends chat turns to `/ai/chat` and emergencies to `/ai/emergency`.
#[derive(Debug, Clone)]
pub struct ApiChatBackend {
    client: ApiClient,
    model: Option<String>,
}

impl ApiChatBackend {
    /// Create a backend using the client's configured chat model.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            model: None,
        }
    }

    /// Request a specific model instead of the configured default.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[async_trait]
impl ChatBackend for ApiChatBackend {
    async fn reply(&self, history: &[ChatMessage]) -> Result<String, ChatError> {
        if last_user_message(history).is_none() {
            return Err(ChatError::NoUserMessage);
        }

        let response = self.client.chat(history, self.model.as_deref()).await?;
        debug!("Backend chat reply: {:?}", response.reply());

        response
            .reply()
            .map(str::to_string)
            .ok_or_else(|| ChatError::ProcessingFailed("empty reply from backend".to_string()))
    }

    async fn emergency_guidance(
        &self,
        situation: &str,
        location: Option<&str>,
    ) -> Result<String, ChatError> {
        let response = self.client.emergency(situation, location).await?;
        if response.response.trim().is_empty() {
            return Err(ChatError::ProcessingFailed(
                "empty guidance from backend".to_string(),
            ));
        }
        Ok(response.response)
    }

    fn name(&self) -> &str {
        "AkshaBackend"
    }
}
