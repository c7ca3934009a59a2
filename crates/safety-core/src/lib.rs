//! Core types and emergency-alert logic for the Aksha safety companion.
//!
//! This crate holds everything the SOS path needs that does not touch a
//! device or the network:
//!
//! - [`compose_alert`] - Builds the outbound emergency text and recipient list
//! - [`ContactSelection`] - The (at most five) emergency contacts picked by the user
//! - [`LocationAcquirer`] - Fresh-then-cached location policy with a bounded wait
//! - [`SosFlow`] - Ties acquisition, composition and dispatch together
//! - [`LocationProvider`] / [`BatteryProvider`] / [`Dispatcher`] - Collaborator seams
//!
//! # Example
//!
//! ```rust
//! use safety_core::{compose_alert, BatteryReading, Contact, LocationSample};
//!
//! let contacts = vec![Contact::new("Alice", ["+1555000111"])];
//! let location = LocationSample::new(12.345678, 77.123456);
//! let battery = BatteryReading::new(42, false);
//!
//! let alert = compose_alert(&contacts, Some(&location), Some(&battery));
//! assert_eq!(alert.recipients, vec!["+1555000111".to_string()]);
//! assert!(alert.body.contains("https://maps.google.com/?q=12.345678,77.123456"));
//! assert!(alert.body.contains("42%"));
//! ```

mod alert;
mod battery;
mod chat;
mod contacts;
mod dispatch;
mod error;
mod location;
mod sos;

pub use alert::{
    compose_alert, maps_link, AlertMessage, LOCATION_UNAVAILABLE_SENTENCE, SOS_PREAMBLE,
};
pub use battery::{BatteryProvider, BatteryReading, NoBattery};
pub use chat::{ChatMessage, Role};
pub use contacts::{contacts_with_phone_numbers, Contact, ContactSelection, MAX_SELECTED_CONTACTS};
pub use dispatch::{DispatchReceipt, Dispatcher};
pub use error::{DispatchError, LocationError, SelectionError, SosError};
pub use location::{
    LastKnownCache, LocationAcquirer, LocationFix, LocationProvider, LocationSample,
    DEFAULT_LOCATION_TIMEOUT,
};
pub use sos::{SosFlow, SosReport};

// Re-export async_trait for collaborator implementations
pub use async_trait::async_trait;
