//! Error types for the SOS path.

use thiserror::Error;

/// Errors returned by a [`LocationProvider`](crate::LocationProvider).
#[derive(Debug, Error)]
pub enum LocationError {
    /// The user has not granted location access.
    #[error("location permission denied")]
    PermissionDenied,

    /// The provider is not reachable or has no fix yet.
    #[error("location unavailable: {0}")]
    Unavailable(String),

    /// The provider sent something we could not understand.
    #[error("invalid location data: {0}")]
    Invalid(String),
}

/// Errors from changing the emergency-contact selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The selection already holds the maximum number of contacts.
    #[error("maximum of {max} emergency contacts reached")]
    MaximumReached { max: usize },

    /// The contact has no phone number and cannot receive an alert.
    #[error("contact {0} has no phone number")]
    NoPhoneNumber(String),
}

/// Errors from handing a message to the platform's messaging facility.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No recipients were supplied.
    #[error("no recipients to send to")]
    NoRecipients,

    /// The messaging facility could not be invoked at all.
    #[error("messaging facility unavailable: {0}")]
    Unavailable(String),

    /// The messaging facility was invoked but reported failure.
    #[error("hand-off failed: {0}")]
    Failed(String),
}

/// Errors from triggering an SOS.
#[derive(Debug, Error)]
pub enum SosError {
    /// No selected contact has a phone number.
    #[error("no emergency contacts with a phone number are selected")]
    NoContacts,

    /// The alert could not be handed to the messaging facility.
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}
