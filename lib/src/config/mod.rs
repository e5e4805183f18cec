// lib/src/config/mod.rs

//! Client configuration: built-in defaults, then an optional config file, then
//! `MEDIVERSE__*` environment variables. Command-line flags are applied on top
//! by the caller.

mod defaults;

pub use defaults::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{MediverseError, MediverseResult};
use mediverse_models::{GeoPoint, ValidationError};

/// Which body shape `POST /emergency/trigger` is sent with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerBodyShape {
    /// `{ userId, location: { lat, lng } }`
    #[default]
    UserLocation,
    /// `{ patientId, gps: { lat, lng } }`
    PatientGps,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyConfig {
    #[serde(default)]
    pub body_shape: TriggerBodyShape,
    pub fallback_lat: f64,
    pub fallback_lng: f64,
    pub geolocation_timeout_secs: u64,
}

impl EmergencyConfig {
    pub fn fallback_location(&self) -> GeoPoint {
        GeoPoint::new(self.fallback_lat, self.fallback_lng)
    }

    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_secs)
    }
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        EmergencyConfig {
            body_shape: TriggerBodyShape::default(),
            fallback_lat: DEFAULT_FALLBACK_LOCATION.lat,
            fallback_lng: DEFAULT_FALLBACK_LOCATION.lng,
            geolocation_timeout_secs: DEFAULT_GEOLOCATION_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Directory holding the local key-value store.
    pub data_dir: PathBuf,
    /// Unset means the HTTP library default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub emergency: EmergencyConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: default_data_dir(),
            request_timeout_secs: None,
            emergency: EmergencyConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> MediverseResult<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ValidationError::invalid("api_base_url", "must start with http:// or https://").into());
        }
        self.emergency.fallback_location().validate()?;
        Ok(())
    }
}

/// Loads the client configuration.
///
/// With `config_file` set the file must exist; otherwise `mediverse.*` in the
/// working directory is used when present.
pub fn load_client_config(config_file: Option<&Path>) -> MediverseResult<ClientConfig> {
    let defaults = ClientConfig::default();
    let mut builder = Config::builder()
        .set_default("api_base_url", defaults.api_base_url.clone())?
        .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())?
        .set_default("emergency.body_shape", "user_location")?
        .set_default("emergency.fallback_lat", defaults.emergency.fallback_lat)?
        .set_default("emergency.fallback_lng", defaults.emergency.fallback_lng)?
        .set_default(
            "emergency.geolocation_timeout_secs",
            defaults.emergency.geolocation_timeout_secs as i64,
        )?;

    builder = match config_file {
        Some(path) => {
            debug!("Loading client config from {}", path.display());
            builder.add_source(File::from(path).required(true))
        }
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE_NAME).required(false)),
    };

    let config: ClientConfig = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
        .map_err(MediverseError::Config)?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_production_api() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.emergency.fallback_location(), DEFAULT_FALLBACK_LOCATION);
        assert_eq!(config.emergency.body_shape, TriggerBodyShape::UserLocation);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
api_base_url = "http://127.0.0.1:5000/api"
data_dir = "/tmp/mediverse-test"
request_timeout_secs = 15

[emergency]
body_shape = "patient_gps"
fallback_lat = 12.97
fallback_lng = 77.59
geolocation_timeout_secs = 3
"#
        )
        .unwrap();

        let config = load_client_config(Some(file.path())).unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:5000/api");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/mediverse-test"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.emergency.body_shape, TriggerBodyShape::PatientGps);
        assert_eq!(config.emergency.fallback_location(), GeoPoint::new(12.97, 77.59));
        assert_eq!(config.emergency.geolocation_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_client_config(Some(Path::new("/definitely/not/here/mediverse.toml")));
        assert!(matches!(result, Err(MediverseError::Config(_))));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let config = ClientConfig { api_base_url: "ftp://example.com".into(), ..ClientConfig::default() };
        assert!(matches!(config.validate(), Err(MediverseError::Validation(_))));
    }
}
