//! Hand-off of an alert to the platform's messaging facility.

use async_trait::async_trait;

use crate::error::DispatchError;

/// Proof that the messaging facility was invoked.
///
/// This is not a delivery receipt: on most platforms the hand-off opens a
/// pre-filled compose screen and the user still has to press send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    /// Which facility accepted the hand-off (e.g. "sms-uri").
    pub channel: String,
    /// Number of recipients handed over.
    pub recipient_count: usize,
    /// Facility-specific detail, such as the URI that was opened.
    pub detail: Option<String>,
}

/// Sends a text to a list of phone numbers, best effort.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Hand the message to the messaging facility.
    async fn send_text(
        &self,
        recipients: &[String],
        body: &str,
    ) -> Result<DispatchReceipt, DispatchError>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}
