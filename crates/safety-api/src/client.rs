//! Backend HTTP client.

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use safety_core::ChatMessage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::store::{KeyValueStore, AUTH_TOKEN_KEY, USER_DATA_KEY};
use crate::types::{
    ChatRequest, ChatResponse, EmergencyRequest, EmergencyResponse, ErrorBody, LocationPayload,
    LocationUpdate, LoginRequest, LoginResponse, ModelsResponse, SosRequest, StatusResponse,
    UnsafeReport, User, SOS_SERVER_MESSAGE,
};

/// Client for the Aksha backend.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    /// Create a client. No request is made until a method is called.
    pub fn new(config: ApiConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            http,
            config,
            store,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The stored bearer token, if any.
    pub async fn auth_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.store.get(AUTH_TOKEN_KEY).await?)
    }

    /// Store a bearer token.
    pub async fn set_auth_token(&self, token: &str) -> Result<(), ApiError> {
        Ok(self.store.set(AUTH_TOKEN_KEY, token).await?)
    }

    /// Forget the bearer token.
    pub async fn clear_auth_token(&self) -> Result<(), ApiError> {
        Ok(self.store.delete(AUTH_TOKEN_KEY).await?)
    }

    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    /// Exchange an identity-provider user ID for a backend JWT.
    ///
    /// Stores the token and the user's profile for later requests.
    pub async fn login(
        &self,
        clerk_id: &str,
        session_id: Option<&str>,
        session_token: Option<&str>,
    ) -> Result<User, ApiError> {
        info!("Logging in with clerk ID {}", clerk_id);

        let body = LoginRequest {
            clerk_id,
            session_id,
            session_token,
        };
        let response: LoginResponse = self
            .send(Method::POST, self.config.api_url("/auth/login"), Some(&body))
            .await?;

        self.set_auth_token(&response.token).await?;
        let user_json = serde_json::to_string(&response.user)?;
        self.store.set(USER_DATA_KEY, &user_json).await?;

        info!("Logged in as {}", response.user.email);
        Ok(response.user)
    }

    /// The cached profile of the signed-in user.
    ///
    /// A corrupt cache entry reads as signed out.
    pub async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let Some(json) = self.store.get(USER_DATA_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Ignoring unreadable cached profile: {}", e);
                Ok(None)
            }
        }
    }

    /// Forget the token and the cached profile.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.clear_auth_token().await?;
        self.store.delete(USER_DATA_KEY).await?;
        info!("Logged out");
        Ok(())
    }

    /// Whether a token is stored. Does not validate it with the backend.
    pub async fn is_authenticated(&self) -> bool {
        matches!(self.auth_token().await, Ok(Some(_)))
    }

    /// Fetch the profile from the backend, validating the token.
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.send(Method::GET, self.config.api_url("/users/profile"), None::<&()>)
            .await
    }

    // ------------------------------------------------------------------
    // Location and alerts
    // ------------------------------------------------------------------

    /// Upload the current location (live sharing).
    pub async fn update_location(
        &self,
        location: &LocationPayload,
    ) -> Result<StatusResponse, ApiError> {
        let body = LocationUpdate { location };
        self.send(Method::POST, self.config.api_url("/users/location"), Some(&body))
            .await
    }

    /// Flag an SOS on the server so contacts following the user are alerted.
    pub async fn trigger_sos(&self, location: &LocationPayload) -> Result<StatusResponse, ApiError> {
        let body = SosRequest {
            location,
            message: SOS_SERVER_MESSAGE,
        };
        self.send(Method::POST, self.config.api_url("/alerts/sos"), Some(&body))
            .await
    }

    /// Clear the server-side SOS flag.
    pub async fn end_sos(&self) -> Result<StatusResponse, ApiError> {
        self.send(
            Method::POST,
            self.config.api_url("/alerts/sos/end"),
            Some(&serde_json::json!({})),
        )
        .await
    }

    /// Report a location as unsafe.
    pub async fn report_unsafe(
        &self,
        location: &LocationPayload,
        description: &str,
    ) -> Result<StatusResponse, ApiError> {
        let body = UnsafeReport {
            location,
            description,
        };
        self.send(Method::POST, self.config.api_url("/alerts/unsafe"), Some(&body))
            .await
    }

    // ------------------------------------------------------------------
    // AI assistant
    // ------------------------------------------------------------------

    /// Send a chat history and get the assistant's reply.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        model: Option<&str>,
    ) -> Result<ChatResponse, ApiError> {
        let body = ChatRequest {
            messages,
            model: model.unwrap_or(&self.config.chat_model),
        };
        self.send(Method::POST, self.config.ai_url("/chat"), Some(&body))
            .await
    }

    /// Ask for guidance on an emergency situation.
    pub async fn emergency(
        &self,
        situation: &str,
        location: Option<&str>,
    ) -> Result<EmergencyResponse, ApiError> {
        let body = EmergencyRequest {
            situation,
            location,
        };
        self.send(Method::POST, self.config.ai_url("/emergency"), Some(&body))
            .await
    }

    /// List the models the backend can chat with.
    pub async fn models(&self) -> Result<Vec<String>, ApiError> {
        let response: ModelsResponse = self
            .send(Method::GET, self.config.ai_url("/models"), None::<&()>)
            .await?;
        Ok(response.models)
    }

    /// Make a JSON request, attaching the bearer token when one is stored.
    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header("Content-Type", "application/json");

        if let Some(token) = self.auth_token().await? {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| "API request failed".to_string());

            if status == StatusCode::UNAUTHORIZED {
                warn!("Backend rejected token, clearing it: {}", message);
                self.clear_auth_token().await?;
                return Err(ApiError::Unauthorized(message));
            }

            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish()
    }
}
