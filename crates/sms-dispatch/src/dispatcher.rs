//! [`Dispatcher`] implementation over `sms:` links.

use async_trait::async_trait;
use safety_core::{DispatchError, DispatchReceipt, Dispatcher};
use tracing::info;

use crate::link::{SmsLink, SmsPlatform};
use crate::opener::LinkOpener;

/// Dispatches alerts by opening a pre-filled `sms:` link.
#[derive(Debug, Clone)]
pub struct SmsDispatcher<O: LinkOpener> {
    opener: O,
    platform: SmsPlatform,
}

impl<O: LinkOpener> SmsDispatcher<O> {
    /// Create a dispatcher for the given platform.
    pub fn new(opener: O, platform: SmsPlatform) -> Self {
        Self { opener, platform }
    }

    /// The opener in use.
    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// The target platform.
    pub fn platform(&self) -> SmsPlatform {
        self.platform
    }
}

#[async_trait]
impl<O: LinkOpener> Dispatcher for SmsDispatcher<O> {
    async fn send_text(
        &self,
        recipients: &[String],
        body: &str,
    ) -> Result<DispatchReceipt, DispatchError> {
        let link = SmsLink::new(recipients, body, self.platform);
        let uri = link.to_uri()?;
        let recipient_count = link.numbers().len();
        self.opener.open(&uri).await?;

        info!(
            opener = self.opener.name(),
            platform = %self.platform,
            "SMS compose handed off to {} recipient(s)",
            recipient_count
        );

        Ok(DispatchReceipt {
            channel: "sms-uri".to_string(),
            recipient_count,
            detail: Some(uri),
        })
    }

    fn name(&self) -> &str {
        "sms"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opener::RecordingOpener;

    #[tokio::test]
    async fn test_send_text_opens_link() {
        let opener = RecordingOpener::new();
        let dispatcher = SmsDispatcher::new(opener.clone(), SmsPlatform::Android);
        let recipients = vec!["+1555000111".to_string(), "+1555000222".to_string()];

        let receipt = dispatcher.send_text(&recipients, "Help 42%").await.unwrap();

        assert_eq!(receipt.channel, "sms-uri");
        assert_eq!(receipt.recipient_count, 2);
        assert_eq!(
            opener.last().await.as_deref(),
            Some("sms:+1555000111;+1555000222?body=Help%2042%25")
        );
    }

    #[tokio::test]
    async fn test_recipient_count_skips_blank_numbers() {
        let opener = RecordingOpener::new();
        let dispatcher = SmsDispatcher::new(opener.clone(), SmsPlatform::Android);
        let recipients = vec![
            "+1555000111".to_string(),
            "   ".to_string(),
            "+1555000222".to_string(),
        ];

        let receipt = dispatcher.send_text(&recipients, "Help").await.unwrap();

        assert_eq!(receipt.recipient_count, 2);
        assert_eq!(
            opener.last().await.as_deref(),
            Some("sms:+1555000111;+1555000222?body=Help")
        );
    }

    #[tokio::test]
    async fn test_send_text_without_recipients() {
        let opener = RecordingOpener::new();
        let dispatcher = SmsDispatcher::new(opener.clone(), SmsPlatform::Ios);

        let err = dispatcher.send_text(&[], "Help").await.unwrap_err();
        assert!(matches!(err, DispatchError::NoRecipients));
        assert!(opener.opened().await.is_empty());
    }
}
