// models/src/lib.rs

//! Data types shared by the MediVerse client library, the CLI and the
//! development stub server. Everything here is plain serde data with the wire
//! names the remote API uses.

pub mod errors;
pub mod medical;

pub use errors::{ValidationError, ValidationResult};
pub use medical::{
    Ambulance, Appointment, ApiReply, AuthResponse, Credentials, EmergencyResult,
    EmergencyTrigger, FamilyContact, GeoPoint, Hospital, RegistrationInput, Role,
    UpdateResponse, User, UserId,
};
