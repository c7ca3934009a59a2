//! SMS hand-off for emergency alerts.
//!
//! Mobile platforms do not let an app send an SMS silently; the closest
//! equivalent is opening an `sms:` URI, which launches the messaging app
//! with recipients and body pre-filled. This crate provides:
//!
//! - [`SmsLink`] - Builds the `sms:` URI with the platform's recipient separator
//! - [`LinkOpener`] - Hands a URI to something that can open it
//! - [`SmsDispatcher`] - A [`safety_core::Dispatcher`] built on the two
//!
//! # Example
//!
//! ```rust
//! use sms_dispatch::{SmsLink, SmsPlatform};
//!
//! let recipients = vec!["+1555000111".to_string(), "+1555000222".to_string()];
//! let link = SmsLink::new(&recipients, "Help me", SmsPlatform::Android);
//! assert_eq!(link.to_uri().unwrap(), "sms:+1555000111;+1555000222?body=Help%20me");
//! ```

mod dispatcher;
mod link;
mod opener;

pub use dispatcher::SmsDispatcher;
pub use link::{SmsLink, SmsPlatform};
pub use opener::{LinkOpener, RecordingOpener, SystemOpener};

// Re-export the error type callers match on
pub use safety_core::DispatchError;
