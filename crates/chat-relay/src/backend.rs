//! The remote assistant seam.

use async_trait::async_trait;
use safety_core::{ChatMessage, Role};

use crate::error::ChatError;

/// A remote assistant that can answer a chat history.
///
/// # Example
///
/// ```rust
/// use chat_relay::{ChatBackend, ChatError, ChatMessage};
/// use async_trait::async_trait;
///
/// struct Parrot;
///
/// #[async_trait]
/// impl ChatBackend for Parrot {
///     async fn reply(&self, history: &[ChatMessage]) -> Result<String, ChatError> {
///         history
///             .last()
///             .map(|m| m.content.clone())
///             .ok_or(ChatError::NoUserMessage)
///     }
///
///     fn name(&self) -> &str {
///         "Parrot"
///     }
/// }
/// ```
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Answer the conversation. `history` ends with the user's latest message.
    async fn reply(&self, history: &[ChatMessage]) -> Result<String, ChatError>;

    /// Step-by-step guidance for an emergency situation.
    ///
    /// Backends without a dedicated route return [`ChatError::Unsupported`].
    async fn emergency_guidance(
        &self,
        _situation: &str,
        _location: Option<&str>,
    ) -> Result<String, ChatError> {
        Err(ChatError::Unsupported(self.name().to_string()))
    }

    /// Name for logs and reply attribution.
    fn name(&self) -> &str;
}

/// The most recent user message in a history.
pub(crate) fn last_user_message(history: &[ChatMessage]) -> Option<&ChatMessage> {
    history.iter().rev().find(|m| m.role == Role::User)
}
