//! Backend request and response types.

use safety_core::{ChatMessage, LocationSample};
use serde::{Deserialize, Serialize};

/// Message attached to server-side SOS flags.
pub const SOS_SERVER_MESSAGE: &str = "I need help! This is my current location.";

/// The signed-in user as the backend describes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend user ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Identity-provider user ID.
    pub clerk_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub clerk_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<&'a str>,
}

/// Login response: the user plus a JWT.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

/// A location as the backend expects it.
///
/// Note the GeoJSON order: `coordinates` is `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPayload {
    pub coordinates: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Capture time in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl LocationPayload {
    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }
}

impl From<&LocationSample> for LocationPayload {
    fn from(sample: &LocationSample) -> Self {
        Self {
            coordinates: [sample.longitude, sample.latitude],
            accuracy: sample.accuracy_meters,
            altitude: None,
            heading: None,
            speed: None,
            timestamp: Some(sample.captured_at.timestamp_millis()),
        }
    }
}

/// Generic `{success, message}` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LocationUpdate<'a> {
    pub location: &'a LocationPayload,
}

#[derive(Debug, Serialize)]
pub(crate) struct SosRequest<'a> {
    pub location: &'a LocationPayload,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UnsafeReport<'a> {
    pub location: &'a LocationPayload,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub model: &'a str,
}

/// Reply from `/ai/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// The assistant's reply text.
    #[serde(default)]
    pub response: String,
    /// The full history including the reply, when the backend echoes it.
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
}

impl ChatResponse {
    /// The reply text: `response` if set, else the last assistant message.
    pub fn reply(&self) -> Option<&str> {
        if !self.response.trim().is_empty() {
            return Some(&self.response);
        }
        self.messages.as_ref().and_then(|messages| {
            messages
                .iter()
                .rev()
                .find(|m| m.role == safety_core::Role::Assistant)
                .map(|m| m.content.as_str())
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EmergencyRequest<'a> {
    pub situation: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
}

/// Reply from `/ai/emergency`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmergencyResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelsResponse {
    #[serde(default)]
    pub models: Vec<String>,
}

/// Error body shape used by the backend.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_location_payload_order() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let sample = LocationSample::new(12.5, 77.25)
            .with_accuracy(8.0)
            .captured_at(at);

        let payload = LocationPayload::from(&sample);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["coordinates"][0], 77.25);
        assert_eq!(json["coordinates"][1], 12.5);
        assert_eq!(json["accuracy"], 8.0);
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
        assert!(json.get("altitude").is_none());
        assert_eq!(payload.latitude(), 12.5);
    }

    #[test]
    fn test_login_response_flatten() {
        let body = r#"{
            "_id": "u1",
            "clerkId": "user_2abc",
            "firstName": "Asha",
            "lastName": "Rao",
            "email": "asha@example.com",
            "token": "jwt-token"
        }"#;
        let parsed: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.token, "jwt-token");
        assert_eq!(parsed.user.id, "u1");
        assert_eq!(parsed.user.profile_picture, None);
    }

    #[test]
    fn test_chat_response_reply() {
        let with_text: ChatResponse =
            serde_json::from_str(r#"{"response":"Stay calm."}"#).unwrap();
        assert_eq!(with_text.reply(), Some("Stay calm."));

        let with_messages: ChatResponse = serde_json::from_str(
            r#"{"response":"","messages":[{"role":"user","content":"hi"},{"role":"assistant","content":"Hello!"}]}"#,
        )
        .unwrap();
        assert_eq!(with_messages.reply(), Some("Hello!"));

        let empty: ChatResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.reply(), None);
    }
}
