// models/src/medical/mod.rs

pub mod emergency;
pub mod family;
pub mod login;
pub mod registration;
pub mod responses;
pub mod role;
pub mod user;

pub use emergency::{Ambulance, EmergencyResult, EmergencyTrigger, GeoPoint, Hospital};
pub use family::FamilyContact;
pub use login::Credentials;
pub use registration::RegistrationInput;
pub use responses::{ApiReply, AuthResponse, UpdateResponse};
pub use role::Role;
pub use user::{Appointment, User, UserId};
