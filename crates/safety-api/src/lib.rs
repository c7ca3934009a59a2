//! Client for the Aksha safety backend.
//!
//! Wraps the backend's JSON API behind typed methods:
//!
//! - Identity exchange and profile (`/api/v1/auth/login`, `/api/v1/users/profile`)
//! - Location telemetry and server-side SOS flagging (`/api/v1/users/location`,
//!   `/api/v1/alerts/sos`, `/api/v1/alerts/sos/end`, `/api/v1/alerts/unsafe`)
//! - The AI assistant (`/ai/chat`, `/ai/emergency`, `/ai/models`)
//!
//! Requests carry `Authorization: Bearer <token>` once a token has been
//! stored by [`ApiClient::login`]. Tokens and the user profile live in a
//! [`KeyValueStore`]; a 401 from the backend clears the token.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use safety_api::{ApiClient, ApiConfig, FileStore};
//!
//! # async fn example() -> Result<(), safety_api::ApiError> {
//! let store = Arc::new(FileStore::new("/tmp/aksha"));
//! let client = ApiClient::new(ApiConfig::from_env()?, store)?;
//!
//! let user = client.login("user_2abc", None, None).await?;
//! println!("Signed in as {} {}", user.first_name, user.last_name);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod store;
mod types;

pub use client::ApiClient;
pub use config::{ApiConfig, ApiConfigBuilder, DEFAULT_API_URL, DEFAULT_CHAT_MODEL};
pub use error::{ApiError, StoreError};
pub use store::{FileStore, KeyValueStore, MemoryStore, AUTH_TOKEN_KEY, USER_DATA_KEY};
pub use types::{
    ChatResponse, EmergencyResponse, LocationPayload, StatusResponse, User, SOS_SERVER_MESSAGE,
};
