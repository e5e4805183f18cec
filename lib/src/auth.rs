// lib/src/auth.rs

// Login, registration and logout on top of the API client. A successful login
// is the whole session: the returned user, tagged with the role used to sign
// in, is written to the local store and read back on the next start.

use log::{info, warn};

use crate::api::ApiClient;
use crate::errors::{ApiError, MediverseError, MediverseResult};
use crate::store::LocalStore;
use mediverse_models::{AuthResponse, Credentials, RegistrationInput, Role, User};

/// Shown when a login fails without a server-provided reason.
pub const LOGIN_FAILED: &str = "Login Failed";
/// Shown when a registration fails without a server-provided reason.
pub const REGISTRATION_FAILED: &str = "Registration Failed";

pub struct AuthService<'a> {
    client: &'a ApiClient,
    store: &'a LocalStore,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a ApiClient, store: &'a LocalStore) -> Self {
        AuthService { client, store }
    }

    /// Signs in through the endpoint for `role` and saves the session.
    ///
    /// On failure nothing is written and the error carries the server's
    /// `error` string, or `LOGIN_FAILED` when there is none.
    pub async fn login(&self, role: Role, credentials: &Credentials) -> MediverseResult<User> {
        credentials.validate()?;
        let reply = self
            .client
            .login(role, credentials)
            .await
            .map_err(|e| rejected("login", e, LOGIN_FAILED))?;

        if !reply.success {
            return Err(MediverseError::Rejected(reply.error.unwrap_or_else(|| LOGIN_FAILED.to_string())));
        }
        let raw = reply.user.ok_or_else(|| {
            warn!("Login for '{}' succeeded without a user in the reply", credentials.username);
            MediverseError::Rejected(LOGIN_FAILED.to_string())
        })?;

        let user = match serde_json::from_value::<User>(raw) {
            Ok(user) => user.with_role(role),
            Err(e) => {
                warn!("Login for '{}' returned an unreadable user: {}", credentials.username, e);
                return Err(MediverseError::Rejected(LOGIN_FAILED.to_string()));
            }
        };
        self.store.save_user(&user)?;
        info!("Signed in as '{}' ({})", user.username, role);
        Ok(user)
    }

    /// Creates an account. This does not sign the user in.
    pub async fn register(&self, role: Role, input: &RegistrationInput) -> MediverseResult<AuthResponse> {
        input.validate(role)?;
        let reply = self
            .client
            .register(role, input)
            .await
            .map_err(|e| rejected("registration", e, REGISTRATION_FAILED))?;

        if !reply.success {
            return Err(MediverseError::Rejected(
                reply.error.clone().unwrap_or_else(|| REGISTRATION_FAILED.to_string()),
            ));
        }
        info!("Registered '{}' as {}", input.username, role);
        Ok(reply)
    }

    /// Drops the saved session. Returns whether one existed.
    pub fn logout(&self) -> MediverseResult<bool> {
        let existed = self.store.clear_user()?;
        if existed {
            info!("Signed out");
        }
        Ok(existed)
    }

    pub fn current_user(&self) -> MediverseResult<Option<User>> {
        self.store.load_user()
    }

    pub fn require_user(&self) -> MediverseResult<User> {
        self.current_user()?.ok_or(MediverseError::NotLoggedIn)
    }
}

fn rejected(action: &str, err: ApiError, fallback: &str) -> MediverseError {
    warn!("{} request failed: {}", action, err);
    MediverseError::Rejected(err.server_message().unwrap_or(fallback).to_string())
}
