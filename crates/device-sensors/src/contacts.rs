//! Contacts loaded from a JSON export.

use std::path::{Path, PathBuf};

use safety_core::Contact;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SensorError;

/// A phone number as exported: either a bare string or an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Plain(String),
    Entry { number: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContact {
    name: String,
    #[serde(default)]
    phone_numbers: Vec<RawNumber>,
}

impl From<RawContact> for Contact {
    fn from(raw: RawContact) -> Self {
        let numbers = raw.phone_numbers.into_iter().map(|n| match n {
            RawNumber::Plain(number) | RawNumber::Entry { number } => number,
        });
        Contact::new(raw.name, numbers)
    }
}

/// The device address book, as a JSON file.
///
/// ```json
/// [
///   {"name": "Mom", "phoneNumbers": ["+91 98450 00000"]},
///   {"name": "Ravi", "phoneNumbers": [{"label": "mobile", "number": "+91 99000 11111"}]}
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct JsonContactStore {
    path: PathBuf,
}

impl JsonContactStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every contact, including those without phone numbers.
    ///
    /// A missing file is an empty address book.
    pub async fn load(&self) -> Result<Vec<Contact>, SensorError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Contact file {} not found", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let raw: Vec<RawContact> = serde_json::from_str(&json)?;
        debug!("Loaded {} contacts from {}", raw.len(), self.path.display());
        Ok(raw.into_iter().map(Contact::from).collect())
    }

    /// Find a contact by display name, ignoring case.
    pub async fn find(&self, name: &str) -> Result<Option<Contact>, SensorError> {
        let name = name.trim();
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|c| c.display_name.eq_ignore_ascii_case(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = r#"[
        {"name": "Mom", "phoneNumbers": ["+91 98450 00000", "080 1234"]},
        {"name": "Ravi", "phoneNumbers": [{"label": "mobile", "number": "+91 99000 11111"}]},
        {"name": "Old Landline"}
    ]"#;

    #[tokio::test]
    async fn test_load_both_number_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, BOOK).unwrap();

        let contacts = JsonContactStore::new(&path).load().await.unwrap();
        assert_eq!(contacts.len(), 3);
        assert_eq!(contacts[0].primary_number(), Some("+91 98450 00000"));
        assert_eq!(contacts[1].primary_number(), Some("+91 99000 11111"));
        assert!(!contacts[2].has_phone_number());
    }

    #[tokio::test]
    async fn test_find_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, BOOK).unwrap();

        let store = JsonContactStore::new(&path);
        assert_eq!(store.find(" ravi ").await.unwrap().unwrap().display_name, "Ravi");
        assert!(store.find("Nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = JsonContactStore::new(dir.path().join("none.json"));
        assert!(missing.load().await.unwrap().is_empty());

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonContactStore::new(&path).load().await,
            Err(SensorError::Json(_))
        ));
    }
}
