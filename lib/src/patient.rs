// lib/src/patient.rs

use log::{debug, warn};

use crate::api::ApiClient;
use crate::errors::{MediverseError, MediverseResult};
use crate::store::LocalStore;
use mediverse_models::User;

pub const UPDATE_FAILED: &str = "Update failed";

/// Pushes the cached user to `/patient/update`.
pub struct PatientService<'a> {
    client: &'a ApiClient,
    store: &'a LocalStore,
}

impl<'a> PatientService<'a> {
    pub fn new(client: &'a ApiClient, store: &'a LocalStore) -> Self {
        PatientService { client, store }
    }

    /// Sends `user` and, when the server answers with a user, stores that
    /// answer as the new session. No version check: last write wins.
    pub async fn update(&self, user: &User) -> MediverseResult<User> {
        let reply = self.client.update_patient(user).await?;
        if !reply.success {
            let message = reply.error.unwrap_or_else(|| UPDATE_FAILED.to_string());
            warn!("Patient update rejected: {}", message);
            return Err(MediverseError::Rejected(message));
        }

        match reply.user {
            Some(mut updated) => {
                if updated.role.is_none() {
                    updated.role = user.role;
                }
                self.store.save_user(&updated)?;
                debug!("Session replaced by update reply for '{}'", updated.username);
                Ok(updated)
            }
            None => Ok(user.clone()),
        }
    }
}
