// lib/src/api/client.rs

// Thin JSON-over-HTTP wrapper around the MediVerse REST endpoints. Every call
// is a single POST; there is no retry and no token handling. A non-2xx answer
// becomes `ApiError::Http` carrying the server's `error` string.

use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::paths;
use crate::config::{ClientConfig, TriggerBodyShape};
use crate::errors::ApiError;
use mediverse_models::{
    AuthResponse, Credentials, EmergencyResult, EmergencyTrigger, GeoPoint, RegistrationInput, Role,
    UpdateResponse, User, UserId,
};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    body_shape: TriggerBodyShape,
}

impl ApiClient {
    /// Builds a client with the HTTP library's default timeouts.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(ApiClient {
            http: Client::builder().build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            body_shape: TriggerBodyShape::default(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(ApiClient {
            http: builder.build()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            body_shape: config.emergency.body_shape,
        })
    }

    pub fn with_body_shape(mut self, body_shape: TriggerBodyShape) -> Self {
        self.body_shape = body_shape;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn login_patient(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.login(Role::Patient, credentials).await
    }

    pub async fn register_patient(&self, input: &RegistrationInput) -> Result<AuthResponse, ApiError> {
        self.register(Role::Patient, input).await
    }

    pub async fn login_doctor(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.login(Role::Doctor, credentials).await
    }

    pub async fn register_doctor(&self, input: &RegistrationInput) -> Result<AuthResponse, ApiError> {
        self.register(Role::Doctor, input).await
    }

    /// Posts to the login endpoint of `role`.
    pub async fn login(&self, role: Role, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.post_json(paths::login(role), credentials).await
    }

    /// Posts `{...input, role}` to the register endpoint of `role`.
    pub async fn register(&self, role: Role, input: &RegistrationInput) -> Result<AuthResponse, ApiError> {
        self.post_json(paths::register(role), &input.body(role)).await
    }

    pub async fn update_patient(&self, user: &User) -> Result<UpdateResponse, ApiError> {
        self.post_json(paths::PATIENT_UPDATE, user).await
    }

    /// The trigger body in the configured shape.
    pub fn trigger_body(&self, user_id: &UserId, location: GeoPoint) -> EmergencyTrigger {
        match self.body_shape {
            TriggerBodyShape::UserLocation => EmergencyTrigger::UserLocation {
                user_id: user_id.clone(),
                location,
            },
            TriggerBodyShape::PatientGps => EmergencyTrigger::PatientGps {
                patient_id: user_id.clone(),
                gps: location,
            },
        }
    }

    pub async fn trigger_emergency(&self, user_id: &UserId, location: GeoPoint) -> Result<EmergencyResult, ApiError> {
        let body = self.trigger_body(user_id, location);
        self.post_json(paths::EMERGENCY_TRIGGER, &body).await
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&text)?);
        }

        let error = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.error.or(b.message));
        warn!("POST {} failed with {}: {}", url, status, error.as_deref().unwrap_or("<no error message>"));
        Err(ApiError::Http { status: status.as_u16(), error })
    }
}
