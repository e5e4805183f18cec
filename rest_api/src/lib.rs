// rest_api/src/lib.rs

// Development stand-in for the MediVerse backend. Accounts, sessions and
// dispatches live in memory and vanish with the process. Paths, bodies and
// status codes follow what the client expects from the real service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use mediverse_models::{
    ApiReply, AuthResponse, Credentials, EmergencyResult, EmergencyTrigger, RegistrationInput, Role,
    UpdateResponse, User, UserId,
};

pub mod config;

pub use crate::config::{load_stub_config, DispatchReplyConfig, StubConfig};

/// bcrypt's minimum cost; stored hashes only need to be real, not strong.
const STUB_BCRYPT_COST: u32 = 4;

#[derive(Debug, Error)]
pub enum StubError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Username '{0}' is already taken")]
    UserExists(String),
    #[error("Patient not found")]
    PatientNotFound,
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let status = match self {
            StubError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            StubError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            StubError::UserExists(_) => StatusCode::CONFLICT,
            StubError::PatientNotFound => StatusCode::NOT_FOUND,
            StubError::Hashing(_) | StubError::SerdeJson(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body: AuthResponse = ApiReply::failed(self.to_string());
        (status, Json(body)).into_response()
    }
}

struct Account {
    role: Role,
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct StubData {
    // keyed by (role, lowercased username): the two portals are separate
    accounts: HashMap<(Role, String), Account>,
    dispatches: Vec<EmergencyTrigger>,
}

/// Shared server state. Cloning shares the same data, so a test can keep a
/// handle and inspect what the server received.
#[derive(Clone)]
pub struct StubState {
    data: Arc<Mutex<StubData>>,
    dispatch_reply: Arc<EmergencyResult>,
}

impl Default for StubState {
    fn default() -> Self {
        StubState::new(DispatchReplyConfig::default().to_result())
    }
}

impl StubState {
    pub fn new(dispatch_reply: EmergencyResult) -> Self {
        StubState {
            data: Arc::new(Mutex::new(StubData::default())),
            dispatch_reply: Arc::new(dispatch_reply),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StubData> {
        // A panicked handler cannot leave the maps half-written, so keep going.
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Every trigger body received so far, oldest first.
    pub fn dispatches(&self) -> Vec<EmergencyTrigger> {
        self.lock().dispatches.clone()
    }

    /// Server-side streak of the patient called `username`.
    pub fn streak_of(&self, username: &str) -> Option<u32> {
        self.lock()
            .accounts
            .get(&(Role::Patient, username.to_lowercase()))
            .map(|a| a.user.streak)
    }

    pub fn account_count(&self) -> usize {
        self.lock().accounts.len()
    }
}

pub fn router(state: StubState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/auth/register/:role", post(register_handler))
        .route("/api/auth/login/:role", post(login_handler))
        .route("/api/patient/update", post(update_handler))
        .route("/api/emergency/trigger", post(trigger_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: StubState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

async fn health_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "message": "MediVerse stub API is healthy" })))
}

async fn register_handler(
    State(state): State<StubState>,
    Path(role): Path<Role>,
    Json(input): Json<RegistrationInput>,
) -> Result<Json<AuthResponse>, StubError> {
    input.validate(role).map_err(|e| StubError::InvalidInput(e.to_string()))?;
    let key = (role, input.username.trim().to_lowercase());
    let password_hash = bcrypt::hash(&input.password, STUB_BCRYPT_COST)?;

    let id = Uuid::new_v4().to_string();
    let mut user = User::new(UserId::Text(id.clone()), input.name.trim(), input.username.trim());
    user.role = Some(role);
    if !input.email.is_empty() {
        user.extra.insert("email".into(), json!(input.email));
    }
    user.extra.insert("phone".into(), json!(input.phone));
    match role {
        Role::Patient => {
            user.extra.insert("age".into(), json!(input.age));
            user.extra.insert("address".into(), json!(input.address));
        }
        Role::Doctor => {
            user.extra.insert("department".into(), json!(input.department));
            user.extra.insert("hospital_name".into(), json!(input.hospital_name));
        }
    }

    let mut data = state.lock();
    if data.accounts.contains_key(&key) {
        warn!("Rejecting duplicate {} registration for '{}'", role, key.1);
        return Err(StubError::UserExists(input.username));
    }
    let reply = ApiReply::ok(serde_json::to_value(&user)?);
    info!("Registered {} '{}' as {}", role, user.username, id);
    data.accounts.insert(key, Account { role, user, password_hash });
    Ok(Json(reply))
}

async fn login_handler(
    State(state): State<StubState>,
    Path(role): Path<Role>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>, StubError> {
    let key = (role, credentials.username.trim().to_lowercase());
    let (user, password_hash) = {
        let data = state.lock();
        let account = data.accounts.get(&key).ok_or(StubError::InvalidCredentials)?;
        (account.user.clone(), account.password_hash.clone())
    };

    if !bcrypt::verify(&credentials.password, &password_hash)? {
        warn!("Failed {} login for '{}'", role, key.1);
        return Err(StubError::InvalidCredentials);
    }
    info!("{} '{}' logged in", role, user.username);
    Ok(Json(ApiReply::ok(serde_json::to_value(&user)?)))
}

async fn update_handler(
    State(state): State<StubState>,
    Json(incoming): Json<User>,
) -> Result<Json<UpdateResponse>, StubError> {
    let id = incoming.id.clone().ok_or(StubError::PatientNotFound)?;
    let mut data = state.lock();
    let account = data
        .accounts
        .values_mut()
        .find(|a| a.role == Role::Patient && a.user.id.as_ref() == Some(&id))
        .ok_or(StubError::PatientNotFound)?;

    let mut updated = incoming;
    updated.role = Some(account.role);
    account.user = updated.clone();
    info!("Patient {} updated (streak {})", id, updated.streak);
    Ok(Json(ApiReply::ok(updated)))
}

async fn trigger_handler(
    State(state): State<StubState>,
    Json(trigger): Json<EmergencyTrigger>,
) -> Result<Json<EmergencyResult>, StubError> {
    trigger
        .point()
        .validate()
        .map_err(|e| StubError::InvalidInput(e.to_string()))?;

    let mut data = state.lock();
    if !data.accounts.values().any(|a| a.user.id.as_ref() == Some(trigger.user_id())) {
        return Err(StubError::PatientNotFound);
    }
    info!("Emergency for {} at {}", trigger.user_id(), trigger.point());
    data.dispatches.push(trigger);
    Ok(Json((*state.dispatch_reply).clone()))
}
