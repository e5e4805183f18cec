// lib/src/emergency/dispatch.rs

// SOS flow: family guard, position lookup with a fallback coordinate, one POST
// to the trigger endpoint, then the answer is cached for the tracking panel.
// Network failures are terminal for the attempt; the caller tells the user to
// call emergency services directly.

use std::time::Duration;

use log::{error, info, warn};
use tokio::time::timeout;

use crate::api::ApiClient;
use crate::config::{EmergencyConfig, DEFAULT_FALLBACK_LOCATION, DEFAULT_GEOLOCATION_TIMEOUT_SECS};
use crate::emergency::geolocation::{GeolocationError, Geolocator};
use crate::errors::{MediverseError, MediverseResult, DISPATCH_FAILED_MESSAGE};
use crate::family::FamilyCircle;
use crate::store::LocalStore;
use mediverse_models::{EmergencyResult, GeoPoint, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub result: EmergencyResult,
    /// The coordinate that was actually sent.
    pub location: GeoPoint,
    pub used_fallback: bool,
}

pub struct EmergencyDispatcher<'a> {
    client: &'a ApiClient,
    store: &'a LocalStore,
    geolocator: &'a dyn Geolocator,
    fallback: GeoPoint,
    locate_timeout: Duration,
}

impl<'a> EmergencyDispatcher<'a> {
    pub fn new(client: &'a ApiClient, store: &'a LocalStore, geolocator: &'a dyn Geolocator) -> Self {
        EmergencyDispatcher {
            client,
            store,
            geolocator,
            fallback: DEFAULT_FALLBACK_LOCATION,
            locate_timeout: Duration::from_secs(DEFAULT_GEOLOCATION_TIMEOUT_SECS),
        }
    }

    pub fn with_config(mut self, config: &EmergencyConfig) -> Self {
        self.fallback = config.fallback_location();
        self.locate_timeout = config.geolocation_timeout();
        self
    }

    pub fn with_fallback(mut self, fallback: GeoPoint) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_locate_timeout(mut self, locate_timeout: Duration) -> Self {
        self.locate_timeout = locate_timeout;
        self
    }

    /// The position to send and whether it is the fallback.
    pub async fn locate(&self) -> (GeoPoint, bool) {
        let lookup = match timeout(self.locate_timeout, self.geolocator.current_position()).await {
            Ok(result) => result,
            Err(_) => Err(GeolocationError::Timeout),
        };
        match lookup {
            Ok(point) => (point, false),
            Err(e) => {
                warn!("Geolocation failed ({}), using fallback {}", e, self.fallback);
                (self.fallback, true)
            }
        }
    }

    /// Requests an ambulance for `user_id`.
    pub async fn dispatch(&self, user_id: &UserId) -> MediverseResult<DispatchOutcome> {
        if FamilyCircle::new(self.store).is_empty()? {
            return Err(MediverseError::NoFamilyContact);
        }

        let (location, used_fallback) = self.locate().await;
        info!("Triggering emergency for user {} at {}", user_id, location);

        let result = match self.client.trigger_emergency(user_id, location).await {
            Ok(result) => result,
            Err(e) => {
                error!("Emergency dispatch failed: {}", e);
                return Err(MediverseError::DispatchFailed(e));
            }
        };

        self.store.save_emergency(&result)?;
        info!(
            "Ambulance from '{}' dispatched, ETA {}",
            result.hospital.name, result.ambulance.eta
        );
        Ok(DispatchOutcome { result, location, used_fallback })
    }

    /// Dispatches for the signed-in user.
    pub async fn dispatch_for_session(&self) -> MediverseResult<DispatchOutcome> {
        let user = self.store.load_user()?.ok_or(MediverseError::NotLoggedIn)?;
        let Some(user_id) = user.id else {
            error!("Saved session for '{}' has no user id, nothing to dispatch for", user.username);
            return Err(MediverseError::Rejected(DISPATCH_FAILED_MESSAGE.to_string()));
        };
        self.dispatch(&user_id).await
    }

    /// The answer of the last dispatch, while it has not been dismissed.
    pub fn tracking(&self) -> MediverseResult<Option<EmergencyResult>> {
        self.store.load_emergency()
    }

    /// Hides the tracking panel. Pending requests are not affected.
    pub fn dismiss(&self) -> MediverseResult<bool> {
        self.store.clear_emergency()
    }
}
