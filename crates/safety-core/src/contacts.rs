//! Emergency contacts and the bounded selection the SOS path sends to.

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;

/// Maximum number of contacts that can be selected for SOS alerts.
pub const MAX_SELECTED_CONTACTS: usize = 5;

/// A device contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Name shown to the user.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Phone numbers in the order the contact store lists them.
    #[serde(default)]
    pub phone_numbers: Vec<String>,
}

impl Contact {
    /// Create a contact.
    pub fn new<I, S>(display_name: impl Into<String>, phone_numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            display_name: display_name.into(),
            phone_numbers: phone_numbers.into_iter().map(Into::into).collect(),
        }
    }

    /// The number an alert is sent to: the first non-blank phone number.
    pub fn primary_number(&self) -> Option<&str> {
        self.phone_numbers
            .iter()
            .map(|n| n.trim())
            .find(|n| !n.is_empty())
    }

    /// Whether this contact can receive an alert.
    pub fn has_phone_number(&self) -> bool {
        self.primary_number().is_some()
    }

    /// Whether both describe the same person: same display name and same
    /// primary number. Two entries named "Mom" with different numbers are
    /// different contacts.
    pub fn same_as(&self, other: &Contact) -> bool {
        self.display_name == other.display_name && self.primary_number() == other.primary_number()
    }
}

/// Keep only contacts that can receive an alert.
pub fn contacts_with_phone_numbers(contacts: impl IntoIterator<Item = Contact>) -> Vec<Contact> {
    contacts.into_iter().filter(Contact::has_phone_number).collect()
}

/// The user's chosen emergency contacts, at most [`MAX_SELECTED_CONTACTS`].
///
/// Contacts are identified by display name plus primary number (see
/// [`Contact::same_as`]). The cap is enforced here, when contacts are
/// added, rather than when an alert is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSelection {
    selected: Vec<Contact>,
}

impl ContactSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the first five distinct contacts that have a phone number.
    pub fn preselect(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let mut selection = Self::new();
        for contact in contacts {
            if selection.is_full() {
                break;
            }
            if contact.has_phone_number() && !selection.contains(&contact) {
                selection.selected.push(contact);
            }
        }
        selection
    }

    /// Add a contact.
    ///
    /// Selecting a contact that is already selected is a no-op. Adding a
    /// sixth contact fails with [`SelectionError::MaximumReached`] and
    /// leaves the selection unchanged.
    pub fn select(&mut self, contact: Contact) -> Result<(), SelectionError> {
        if self.contains(&contact) {
            return Ok(());
        }
        if !contact.has_phone_number() {
            return Err(SelectionError::NoPhoneNumber(contact.display_name));
        }
        if self.is_full() {
            return Err(SelectionError::MaximumReached {
                max: MAX_SELECTED_CONTACTS,
            });
        }
        self.selected.push(contact);
        Ok(())
    }

    /// Remove a contact. Returns whether it was selected.
    pub fn deselect(&mut self, contact: &Contact) -> bool {
        let before = self.selected.len();
        self.selected.retain(|c| !c.same_as(contact));
        self.selected.len() != before
    }

    /// Select the contact if unselected, deselect it otherwise.
    ///
    /// Returns whether the contact is selected afterwards.
    pub fn toggle(&mut self, contact: Contact) -> Result<bool, SelectionError> {
        if self.deselect(&contact) {
            return Ok(false);
        }
        self.select(contact)?;
        Ok(true)
    }

    /// Whether this contact is selected.
    pub fn contains(&self, contact: &Contact) -> bool {
        self.selected.iter().any(|c| c.same_as(contact))
    }

    /// Selected contacts in selection order.
    pub fn contacts(&self) -> &[Contact] {
        &self.selected
    }

    /// Number of selected contacts.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether the cap has been reached.
    pub fn is_full(&self) -> bool {
        self.selected.len() >= MAX_SELECTED_CONTACTS
    }
}
