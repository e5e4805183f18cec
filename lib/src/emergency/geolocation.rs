// lib/src/emergency/geolocation.rs

use async_trait::async_trait;
use thiserror::Error;

use mediverse_models::GeoPoint;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable: {0}")]
    Unavailable(String),
    #[error("position lookup timed out")]
    Timeout,
}

/// Source of the device position used for an SOS.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError>;
}

/// Always reports the same coordinate, e.g. one given on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub GeoPoint);

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        self.0
            .validate()
            .map(|_| self.0)
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))
    }
}

/// A device without any position source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPosition;

#[async_trait]
impl Geolocator for NoPosition {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        Err(GeolocationError::Unavailable("no position source".to_string()))
    }
}

/// The user refused location access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedPosition;

#[async_trait]
impl Geolocator for DeniedPosition {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}
