//! The SOS flow: acquire location, sample battery, compose, dispatch.

use tracing::{info, warn};

use crate::alert::{compose_alert, AlertMessage};
use crate::battery::BatteryProvider;
use crate::contacts::{Contact, ContactSelection};
use crate::dispatch::{DispatchReceipt, Dispatcher};
use crate::error::SosError;
use crate::location::{LocationAcquirer, LocationFix, LocationProvider};

/// What happened during a successful SOS.
#[derive(Debug, Clone)]
pub struct SosReport {
    /// The alert that was handed off.
    pub alert: AlertMessage,
    /// Where the embedded location came from.
    pub location: LocationFix,
    /// Hand-off receipt from the dispatcher.
    pub receipt: DispatchReceipt,
}

/// Runs an SOS against a set of collaborators.
pub struct SosFlow<P: LocationProvider, B: BatteryProvider, D: Dispatcher> {
    location: LocationAcquirer<P>,
    battery: B,
    dispatcher: D,
}

impl<P: LocationProvider, B: BatteryProvider, D: Dispatcher> SosFlow<P, B, D> {
    /// Create a flow.
    pub fn new(location: LocationAcquirer<P>, battery: B, dispatcher: D) -> Self {
        Self {
            location,
            battery,
            dispatcher,
        }
    }

    /// The location acquirer, for recording tracked samples.
    pub fn location(&self) -> &LocationAcquirer<P> {
        &self.location
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Trigger an SOS to the selected contacts.
    pub async fn trigger(&self, selection: &ContactSelection) -> Result<SosReport, SosError> {
        self.trigger_to(selection.contacts()).await
    }

    /// Trigger an SOS to an explicit contact list.
    ///
    /// Returns [`SosError::NoContacts`] before touching location or the
    /// dispatcher when no contact has a phone number.
    pub async fn trigger_to(&self, contacts: &[Contact]) -> Result<SosReport, SosError> {
        if !contacts.iter().any(Contact::has_phone_number) {
            warn!("SOS aborted: no emergency contacts with a phone number");
            return Err(SosError::NoContacts);
        }

        let fix = self.location.acquire().await;
        let battery = self.battery.battery().await;
        let alert = compose_alert(contacts, fix.sample(), battery.as_ref());

        info!(
            recipients = alert.recipients.len(),
            location = fix.label(),
            dispatcher = self.dispatcher.name(),
            "Dispatching SOS alert"
        );

        let receipt = self
            .dispatcher
            .send_text(&alert.recipients, &alert.body)
            .await?;

        Ok(SosReport {
            alert,
            location: fix,
            receipt,
        })
    }
}
