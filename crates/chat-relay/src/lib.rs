//! Chat relay for the Aksha safety assistant.
//!
//! User messages go to one or more remote backends in order; the first
//! that answers wins. When every backend fails (network down, non-2xx,
//! empty answer) the relay substitutes a canned reply picked by keyword
//! matching, so the user always gets an answer.
//!
//! - [`ChatRelay`] - Backend chain plus fallback
//! - [`ChatBackend`] - Trait for remote assistants
//! - [`ApiChatBackend`] - The Aksha backend's `/ai/chat` route
//! - [`CompletionsBackend`] - Any OpenAI-compatible `/v1/chat/completions` endpoint
//! - [`CannedResponder`] - Keyword-matched offline replies
//!
//! # Example
//!
//! ```rust
//! use chat_relay::{ChatMessage, ChatRelay, ReplySource};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), chat_relay::ChatError> {
//!     // No backends configured: every reply comes from the canned table.
//!     let relay = ChatRelay::offline();
//!     let reply = relay
//!         .send_chat(&[ChatMessage::user("I think I'm being followed")])
//!         .await?;
//!
//!     assert_eq!(reply.source, ReplySource::Canned);
//!     assert!(reply.text.contains("populated areas"));
//!     Ok(())
//! }
//! ```

mod api_backend;
mod backend;
mod canned;
mod completions;
mod conversation;
mod error;
mod relay;

pub use api_backend::ApiChatBackend;
pub use backend::ChatBackend;
pub use canned::{CannedResponder, KeywordRule};
pub use completions::{
    CompletionsBackend, CompletionsConfig, CompletionsConfigBuilder, DEFAULT_SYSTEM_PROMPT,
    EMERGENCY_SYSTEM_PROMPT,
};
pub use conversation::{Conversation, WELCOME_MESSAGE};
pub use error::ChatError;
pub use relay::{ChatRelay, ChatReply, ReplySource};

// Re-export the shared message type for convenience
pub use safety_core::{ChatMessage, Role};
