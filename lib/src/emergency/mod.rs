// lib/src/emergency/mod.rs

pub mod dispatch;
pub mod geolocation;

pub use dispatch::{DispatchOutcome, EmergencyDispatcher};
pub use geolocation::{DeniedPosition, FixedPosition, GeolocationError, Geolocator, NoPosition};
