// lib/src/lib.rs

//! Client library for the MediVerse patient/doctor API.
//!
//! The remote server is an external collaborator; this crate owns the HTTP
//! contract ([`api`]), the device-local state ([`store`], [`family`],
//! [`streak`]) and the SOS flow ([`emergency`]).

pub mod api;
pub mod auth;
pub mod config;
pub mod emergency;
pub mod errors;
pub mod family;
pub mod patient;
pub mod store;
pub mod streak;

pub use api::ApiClient;
pub use auth::{AuthService, LOGIN_FAILED, REGISTRATION_FAILED};
pub use config::{load_client_config, ClientConfig, EmergencyConfig, TriggerBodyShape};
pub use emergency::{DispatchOutcome, EmergencyDispatcher, GeolocationError, Geolocator};
pub use errors::{ApiError, MediverseError, MediverseResult, DISPATCH_FAILED_MESSAGE};
pub use family::FamilyCircle;
pub use patient::PatientService;
pub use store::LocalStore;
pub use streak::{mark_todays_dose, next_streak, StreakOutcome, StreakTracker, StreakUpdate};

pub use mediverse_models as models;
