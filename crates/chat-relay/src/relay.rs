//! Backend chain with canned fallback.

use std::fmt;
use std::sync::Arc;

use safety_core::ChatMessage;
use tracing::{debug, info, warn};

use crate::backend::{last_user_message, ChatBackend};
use crate::canned::CannedResponder;
use crate::error::ChatError;

/// Where a reply came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    /// A remote backend, by name.
    Backend(String),
    /// The offline keyword table.
    Canned,
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplySource::Backend(name) => write!(f, "{}", name),
            ReplySource::Canned => write!(f, "offline"),
        }
    }
}

/// An assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
}

impl ChatReply {
    /// Whether the reply came from the canned table.
    pub fn is_fallback(&self) -> bool {
        self.source == ReplySource::Canned
    }
}

/// Sends chat turns to each backend in order and falls back to canned
/// replies when none answers. Failures are never retried.
#[derive(Clone)]
pub struct ChatRelay {
    backends: Vec<Arc<dyn ChatBackend>>,
    canned: CannedResponder,
}

impl ChatRelay {
    /// Create a relay over `backends`, tried in order.
    pub fn new(backends: Vec<Arc<dyn ChatBackend>>) -> Self {
        Self {
            backends,
            canned: CannedResponder::new(),
        }
    }

    /// A relay with no backends; every reply is canned.
    pub fn offline() -> Self {
        Self::new(Vec::new())
    }

    /// Append a backend to the chain.
    pub fn with_backend(mut self, backend: impl ChatBackend + 'static) -> Self {
        self.backends.push(Arc::new(backend));
        self
    }

    /// Replace the canned tables.
    pub fn with_canned(mut self, canned: CannedResponder) -> Self {
        self.canned = canned;
        self
    }

    /// Names of the configured backends, in order.
    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Answer the latest user message in `history`.
    ///
    /// Only fails when there is nothing to answer; backend failures
    /// degrade to a canned reply.
    pub async fn send_chat(&self, history: &[ChatMessage]) -> Result<ChatReply, ChatError> {
        let question = last_user_message(history)
            .map(|m| m.content.clone())
            .filter(|c| !c.trim().is_empty())
            .ok_or(ChatError::NoUserMessage)?;

        for backend in &self.backends {
            match backend.reply(history).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(backend = backend.name(), "Chat answered");
                    return Ok(ChatReply {
                        text,
                        source: ReplySource::Backend(backend.name().to_string()),
                    });
                }
                Ok(_) => warn!(backend = backend.name(), "Empty chat reply, trying next"),
                Err(e) => warn!(backend = backend.name(), error = %e, "Chat backend failed"),
            }
        }

        info!("No chat backend answered, using canned reply");
        Ok(ChatReply {
            text: self.canned.reply(&question),
            source: ReplySource::Canned,
        })
    }

    /// Step-by-step guidance for an emergency situation.
    pub async fn emergency_guidance(
        &self,
        situation: &str,
        location: Option<&str>,
    ) -> ChatReply {
        for backend in &self.backends {
            match backend.emergency_guidance(situation, location).await {
                Ok(text) if !text.trim().is_empty() => {
                    return ChatReply {
                        text,
                        source: ReplySource::Backend(backend.name().to_string()),
                    };
                }
                Ok(_) => warn!(backend = backend.name(), "Empty guidance, trying next"),
                Err(ChatError::Unsupported(_)) => {
                    debug!(backend = backend.name(), "No emergency route")
                }
                Err(e) => warn!(backend = backend.name(), error = %e, "Guidance request failed"),
            }
        }

        info!("No backend gave guidance, using canned guidance");
        ChatReply {
            text: self.canned.emergency_guidance(situation),
            source: ReplySource::Canned,
        }
    }
}

impl fmt::Debug for ChatRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatRelay")
            .field("backends", &self.backend_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        name: &'static str,
        answer: Result<&'static str, ()>,
        calls: Arc<AtomicUsize>,
    }

    impl Fixed {
        fn ok(name: &'static str, text: &'static str) -> Self {
            Self {
                name,
                answer: Ok(text),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                answer: Err(()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for Fixed {
        async fn reply(&self, _history: &[ChatMessage]) -> Result<String, ChatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
                .map(str::to_string)
                .map_err(|_| ChatError::Network("connection refused".to_string()))
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    #[tokio::test]
    async fn test_first_backend_wins() {
        let relay = ChatRelay::offline()
            .with_backend(Fixed::ok("one", "from one"))
            .with_backend(Fixed::ok("two", "from two"));

        let reply = relay.send_chat(&[ChatMessage::user("hi")]).await.unwrap();
        assert_eq!(reply.text, "from one");
        assert_eq!(reply.source, ReplySource::Backend("one".to_string()));
    }

    #[tokio::test]
    async fn test_failure_moves_to_next_backend_once() {
        let failing = Fixed::failing("down");
        let calls = failing.calls.clone();
        let relay = ChatRelay::offline()
            .with_backend(failing)
            .with_backend(Fixed::ok("up", "answer"));

        let reply = relay.send_chat(&[ChatMessage::user("hi")]).await.unwrap();
        assert_eq!(reply.source.to_string(), "up");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_reply_falls_back_to_canned() {
        let relay = ChatRelay::offline()
            .with_backend(Fixed::ok("blank", "   "))
            .with_backend(Fixed::failing("down"));

        let reply = relay
            .send_chat(&[ChatMessage::user("Is it safe to walk home?")])
            .await
            .unwrap();
        assert!(reply.is_fallback());
        assert!(reply.text.contains("well-lit"));
    }

    #[tokio::test]
    async fn test_no_user_message() {
        let relay = ChatRelay::offline();
        assert!(matches!(
            relay.send_chat(&[]).await,
            Err(ChatError::NoUserMessage)
        ));
        assert!(matches!(
            relay
                .send_chat(&[ChatMessage::assistant("Welcome"), ChatMessage::user("  ")])
                .await,
            Err(ChatError::NoUserMessage)
        ));
    }

    #[tokio::test]
    async fn test_emergency_skips_unsupported_backends() {
        let relay = ChatRelay::offline().with_backend(Fixed::ok("chat-only", "x"));

        let reply = relay
            .emergency_guidance("someone is following me", None)
            .await;
        assert!(reply.is_fallback());
        assert!(reply.text.starts_with("If someone is following you"));
    }

    #[test]
    fn test_backend_names() {
        let relay = ChatRelay::offline()
            .with_backend(Fixed::ok("a", "x"))
            .with_backend(Fixed::failing("b"));
        assert_eq!(relay.backend_names(), vec!["a", "b"]);
        assert_eq!(format!("{:?}", relay), "ChatRelay { backends: [\"a\", \"b\"] }");
    }
}
