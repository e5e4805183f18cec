// models/src/medical/emergency.rs

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::{ValidationError, ValidationResult};
use crate::medical::UserId;

/// A WGS84 coordinate as the trigger endpoint expects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        let in_range = self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng);
        if in_range {
            Ok(())
        } else {
            Err(ValidationError::CoordinateOutOfRange { lat: self.lat, lng: self.lng })
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Body of `POST /emergency/trigger`.
///
/// Two shapes are in circulation and the server side has accepted both at
/// different times, so neither is treated as canonical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmergencyTrigger {
    /// `{ "userId": .., "location": { "lat", "lng" } }`
    UserLocation {
        #[serde(rename = "userId")]
        user_id: UserId,
        location: GeoPoint,
    },
    /// `{ "patientId": .., "gps": { "lat", "lng" } }`
    PatientGps {
        #[serde(rename = "patientId")]
        patient_id: UserId,
        gps: GeoPoint,
    },
}

impl EmergencyTrigger {
    pub fn user_id(&self) -> &UserId {
        match self {
            EmergencyTrigger::UserLocation { user_id, .. } => user_id,
            EmergencyTrigger::PatientGps { patient_id, .. } => patient_id,
        }
    }

    pub fn point(&self) -> GeoPoint {
        match self {
            EmergencyTrigger::UserLocation { location, .. } => *location,
            EmergencyTrigger::PatientGps { gps, .. } => *gps,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ambulance {
    #[serde(default, deserialize_with = "text_or_number")]
    pub eta: String,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub contact: String,
}

/// What the dispatch service answers with: who is coming and from where.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyResult {
    #[serde(default)]
    pub hospital: Hospital,
    #[serde(default)]
    pub ambulance: Ambulance,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("expected text or number, found {}", other))),
    }
}
