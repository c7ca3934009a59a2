//! Emergency alert composition.

use crate::battery::BatteryReading;
use crate::contacts::Contact;
use crate::location::LocationSample;

/// First line of every alert.
pub const SOS_PREAMBLE: &str = "EMERGENCY SOS! I need help.";

/// Replaces the location block when no sample is available.
pub const LOCATION_UNAVAILABLE_SENTENCE: &str =
    "My location is unavailable right now. Please call me immediately.";

/// An outbound emergency text and who it goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    /// Full message text.
    pub body: String,
    /// Phone numbers, one per contributing contact, in selection order.
    pub recipients: Vec<String>,
}

impl AlertMessage {
    /// Whether there is anyone to send to.
    pub fn has_recipients(&self) -> bool {
        !self.recipients.is_empty()
    }
}

/// Google Maps link for a coordinate, 6 decimal places.
pub fn maps_link(latitude: f64, longitude: f64) -> String {
    format!("https://maps.google.com/?q={:.6},{:.6}", latitude, longitude)
}

/// Build the emergency message for an SOS.
///
/// Never fails: a missing location becomes a fixed "please call" sentence
/// and missing battery telemetry is reported as unknown. Contacts without
/// a phone number contribute no recipient. Checking that at least one
/// recipient exists is the caller's job.
pub fn compose_alert(
    selected_contacts: &[Contact],
    location: Option<&LocationSample>,
    battery: Option<&BatteryReading>,
) -> AlertMessage {
    let mut body = String::from(SOS_PREAMBLE);
    body.push('\n');

    match location {
        Some(sample) => {
            body.push_str(&format!(
                "My current location: {}\n",
                maps_link(sample.latitude, sample.longitude)
            ));
            if let Some(accuracy) = sample.accuracy_meters {
                body.push_str(&format!("Accuracy: ±{:.0} m\n", accuracy));
            }
            body.push_str(&format!(
                "Captured at: {}\n",
                sample.captured_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        None => {
            body.push_str(LOCATION_UNAVAILABLE_SENTENCE);
            body.push('\n');
        }
    }

    match battery {
        Some(reading) => body.push_str(&format!(
            "Battery: {}% ({})",
            reading.percent,
            if reading.is_charging {
                "charging"
            } else {
                "not charging"
            }
        )),
        None => body.push_str("Battery: unknown"),
    }

    let recipients = selected_contacts
        .iter()
        .filter_map(|c| c.primary_number().map(str::to_string))
        .collect();

    AlertMessage { body, recipients }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn alice() -> Contact {
        Contact::new("Alice", ["+1555000111"])
    }

    #[test]
    fn test_end_to_end_scenario() {
        let location = LocationSample::new(12.345678, 77.123456);
        let battery = BatteryReading::new(42, false);

        let alert = compose_alert(&[alice()], Some(&location), Some(&battery));

        assert_eq!(alert.recipients, vec!["+1555000111".to_string()]);
        assert!(alert
            .body
            .contains("https://maps.google.com/?q=12.345678,77.123456"));
        assert!(alert.body.contains("42%"));
        assert!(alert.body.contains("not charging"));
        assert!(alert.body.starts_with(SOS_PREAMBLE));
    }

    #[test]
    fn test_coordinates_padded_to_six_places() {
        let location = LocationSample::new(-1.5, 100.0);
        let alert = compose_alert(&[alice()], Some(&location), None);
        assert!(alert
            .body
            .contains("https://maps.google.com/?q=-1.500000,100.000000"));
    }

    #[test]
    fn test_accuracy_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 8, 21, 15, 0).unwrap();
        let location = LocationSample::new(1.0, 2.0)
            .with_accuracy(14.6)
            .captured_at(at);

        let alert = compose_alert(&[alice()], Some(&location), None);
        assert!(alert.body.contains("Accuracy: ±15 m"));
        assert!(alert.body.contains("Captured at: 2024-03-08 21:15:00 UTC"));
    }

    #[test]
    fn test_full_body_layout() {
        let at = Utc.with_ymd_and_hms(2024, 3, 8, 21, 15, 0).unwrap();
        let location = LocationSample::new(12.5, 77.25)
            .with_accuracy(8.0)
            .captured_at(at);

        let alert = compose_alert(&[alice()], Some(&location), Some(&BatteryReading::new(9, false)));
        assert_eq!(
            alert.body,
            "EMERGENCY SOS! I need help.\n\
             My current location: https://maps.google.com/?q=12.500000,77.250000\n\
             Accuracy: ±8 m\n\
             Captured at: 2024-03-08 21:15:00 UTC\n\
             Battery: 9% (not charging)"
        );
    }

    #[test]
    fn test_no_location() {
        let alert = compose_alert(&[alice()], None, Some(&BatteryReading::new(80, true)));

        assert!(!alert.body.contains("maps.google.com"));
        assert!(alert.body.contains(LOCATION_UNAVAILABLE_SENTENCE));
        assert!(alert.body.contains("Battery: 80% (charging)"));
    }

    #[test]
    fn test_no_battery() {
        let alert = compose_alert(&[alice()], None, None);
        assert!(alert.body.ends_with("Battery: unknown"));
    }

    #[test]
    fn test_recipients_skip_contacts_without_numbers() {
        let contacts = vec![
            alice(),
            Contact::new("Nobody", Vec::<String>::new()),
            Contact::new("Bob", ["", "+1555000222", "+1555000333"]),
        ];

        let alert = compose_alert(&contacts, None, None);
        assert_eq!(
            alert.recipients,
            vec!["+1555000111".to_string(), "+1555000222".to_string()]
        );
    }

    #[test]
    fn test_no_contacts_gives_empty_recipients() {
        let alert = compose_alert(&[], None, None);
        assert!(!alert.has_recipients());
    }
}
