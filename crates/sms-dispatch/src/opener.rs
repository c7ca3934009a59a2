//! URI openers: the last step of the hand-off.

use std::sync::Arc;

use async_trait::async_trait;
use safety_core::DispatchError;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Something that can open a URI (launch the handler registered for it).
#[async_trait]
pub trait LinkOpener: Send + Sync {
    /// Open the URI. Success means the handler was launched, nothing more.
    async fn open(&self, uri: &str) -> Result<(), DispatchError>;

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}

/// Opens URIs with the host's default handler.
///
/// Uses `xdg-open` on Linux and other Unixes, `open` on macOS and
/// `cmd /C start` on Windows, unless a program is given explicitly.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
    args: Vec<String>,
}

impl Default for SystemOpener {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::with_program("open", Vec::<String>::new())
        } else if cfg!(target_os = "windows") {
            Self::with_program("cmd", ["/C", "start", ""])
        } else {
            Self::with_program("xdg-open", Vec::<String>::new())
        }
    }
}

impl SystemOpener {
    /// Use the platform's default opener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific program; the URI is appended after `args`.
    pub fn with_program<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The program that will be spawned.
    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl LinkOpener for SystemOpener {
    async fn open(&self, uri: &str) -> Result<(), DispatchError> {
        debug!("Opening URI with {}: {}", self.program, uri);

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(uri)
            .status()
            .await
            .map_err(|e| {
                DispatchError::Unavailable(format!("failed to spawn {}: {}", self.program, e))
            })?;

        if !status.success() {
            return Err(DispatchError::Failed(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        info!("Handed URI to {}", self.program);
        Ok(())
    }

    fn name(&self) -> &str {
        "system"
    }
}

/// Keeps opened URIs in memory instead of launching anything.
///
/// Used for dry runs and tests. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// URIs opened so far, oldest first.
    pub async fn opened(&self) -> Vec<String> {
        self.opened.lock().await.clone()
    }

    /// The most recently opened URI.
    pub async fn last(&self) -> Option<String> {
        self.opened.lock().await.last().cloned()
    }
}

#[async_trait]
impl LinkOpener for RecordingOpener {
    async fn open(&self, uri: &str) -> Result<(), DispatchError> {
        self.opened.lock().await.push(uri.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_opener() {
        let opener = RecordingOpener::new();
        let shared = opener.clone();

        opener.open("sms:1?body=a").await.unwrap();
        opener.open("sms:2?body=b").await.unwrap();

        assert_eq!(shared.opened().await.len(), 2);
        assert_eq!(shared.last().await.as_deref(), Some("sms:2?body=b"));
    }

    #[tokio::test]
    async fn test_system_opener_missing_program() {
        let opener = SystemOpener::with_program("aksha-no-such-opener", Vec::<String>::new());
        let err = opener.open("sms:1?body=a").await.unwrap_err();
        assert!(matches!(err, DispatchError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_opener_exit_status() {
        let ok = SystemOpener::with_program("true", Vec::<String>::new());
        assert!(ok.open("sms:1?body=a").await.is_ok());

        let failing = SystemOpener::with_program("false", Vec::<String>::new());
        assert!(matches!(
            failing.open("sms:1?body=a").await,
            Err(DispatchError::Failed(_))
        ));
    }
}
