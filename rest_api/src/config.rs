// rest_api/src/config.rs

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use mediverse_models::{Ambulance, EmergencyResult, Hospital};

pub const DEFAULT_STUB_PORT: u16 = 5000;
pub const DEFAULT_STUB_HOST: &str = "127.0.0.1";

/// Settings for the development server. Read from `mediverse_stub.*` in the
/// working directory (or an explicit file) and `MEDIVERSE_STUB__*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct StubConfig {
    pub host: String,
    pub port: u16,
    /// What every emergency trigger is answered with.
    pub dispatch: DispatchReplyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchReplyConfig {
    pub hospital_name: String,
    pub eta: String,
    pub driver_name: String,
    pub driver_contact: String,
}

impl DispatchReplyConfig {
    pub fn to_result(&self) -> EmergencyResult {
        EmergencyResult {
            hospital: Hospital { name: self.hospital_name.clone() },
            ambulance: Ambulance {
                eta: self.eta.clone(),
                driver_name: self.driver_name.clone(),
                contact: self.driver_contact.clone(),
            },
        }
    }
}

impl Default for DispatchReplyConfig {
    fn default() -> Self {
        DispatchReplyConfig {
            hospital_name: "City General Hospital".to_string(),
            eta: "8 mins".to_string(),
            driver_name: "Suresh Yadav".to_string(),
            driver_contact: "+91 98765 43210".to_string(),
        }
    }
}

pub fn load_stub_config(config_file: Option<&Path>) -> Result<StubConfig> {
    let reply = DispatchReplyConfig::default();
    let mut builder = Config::builder()
        .set_default("host", DEFAULT_STUB_HOST)?
        .set_default("port", DEFAULT_STUB_PORT as i64)?
        .set_default("dispatch.hospital_name", reply.hospital_name)?
        .set_default("dispatch.eta", reply.eta)?
        .set_default("dispatch.driver_name", reply.driver_name)?
        .set_default("dispatch.driver_contact", reply.driver_contact)?;

    builder = match config_file {
        Some(path) => builder.add_source(File::from(path).required(true)),
        None => builder.add_source(File::with_name("mediverse_stub").required(false)),
    };

    builder
        .add_source(Environment::with_prefix("MEDIVERSE_STUB").separator("__").try_parsing(true))
        .build()
        .context("Failed to assemble stub configuration")?
        .try_deserialize()
        .context("Failed to parse stub configuration")
}
