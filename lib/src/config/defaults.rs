// lib/src/config/defaults.rs

use std::path::PathBuf;

use mediverse_models::GeoPoint;

/// Production API root. Paths such as `/auth/login/patient` are appended to it.
pub const DEFAULT_API_BASE_URL: &str = "https://mediverse-backend-production.up.railway.app/api";

/// Base name of the optional config file looked up in the working directory
/// (`mediverse.toml`, `mediverse.yaml`, ...).
pub const DEFAULT_CONFIG_FILE_NAME: &str = "mediverse";

/// Prefix for environment overrides, e.g. `MEDIVERSE__API_BASE_URL`.
pub const ENV_PREFIX: &str = "MEDIVERSE";
pub const ENV_SEPARATOR: &str = "__";

/// Coordinate posted when the device position cannot be read.
pub const DEFAULT_FALLBACK_LOCATION: GeoPoint = GeoPoint::new(28.4595, 77.0266);

pub const DEFAULT_GEOLOCATION_TIMEOUT_SECS: u64 = 10;

pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mediverse")
}
