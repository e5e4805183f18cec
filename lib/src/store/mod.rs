// lib/src/store/mod.rs

// Local persistence for the client: an embedded sled tree holding a handful of
// JSON blobs under fixed keys. Every write is flushed before returning so a
// crash right after a command never loses the session.

pub mod keys;

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::{Config, Db};

use crate::errors::MediverseResult;
use mediverse_models::{EmergencyResult, User};

#[derive(Clone)]
pub struct LocalStore {
    db: Db,
}

impl LocalStore {
    /// Opens (creating if needed) the store under `data_dir`.
    pub fn open(data_dir: &Path) -> MediverseResult<Self> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join("store");
        debug!("Opening local store at {}", path.display());
        let db = Config::new().path(path).flush_every_ms(None).open()?;
        Ok(LocalStore { db })
    }

    /// An in-memory store that disappears on drop.
    pub fn temporary() -> MediverseResult<Self> {
        let db = Config::new().temporary(true).open()?;
        Ok(LocalStore { db })
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> MediverseResult<Option<T>> {
        match self.db.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> MediverseResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.db.insert(key, bytes)?;
        self.db.flush()?;
        Ok(())
    }

    /// Removes `key`, returning whether anything was stored under it.
    pub fn remove(&self, key: &str) -> MediverseResult<bool> {
        let existed = self.db.remove(key)?.is_some();
        self.db.flush()?;
        Ok(existed)
    }

    /// The saved session. A blob that no longer parses reads as no session.
    pub fn load_user(&self) -> MediverseResult<Option<User>> {
        match self.get_json::<User>(keys::USER) {
            Ok(user) => Ok(user),
            Err(crate::errors::MediverseError::Serialization(e)) => {
                warn!("Discarding unreadable saved session: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn save_user(&self, user: &User) -> MediverseResult<()> {
        self.put_json(keys::USER, user)
    }

    pub fn clear_user(&self) -> MediverseResult<bool> {
        self.remove(keys::USER)
    }

    pub fn load_emergency(&self) -> MediverseResult<Option<EmergencyResult>> {
        self.get_json(keys::EMERGENCY)
    }

    pub fn save_emergency(&self, result: &EmergencyResult) -> MediverseResult<()> {
        self.put_json(keys::EMERGENCY, result)
    }

    pub fn clear_emergency(&self) -> MediverseResult<bool> {
        self.remove(keys::EMERGENCY)
    }
}
