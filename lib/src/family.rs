// lib/src/family.rs

use log::info;

use crate::errors::MediverseResult;
use crate::store::{keys, LocalStore};
use mediverse_models::FamilyContact;

/// The device-local list of emergency contacts. Never sent to the server.
pub struct FamilyCircle<'a> {
    store: &'a LocalStore,
}

impl<'a> FamilyCircle<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        FamilyCircle { store }
    }

    pub fn contacts(&self) -> MediverseResult<Vec<FamilyContact>> {
        Ok(self.store.get_json(keys::FAMILY)?.unwrap_or_default())
    }

    pub fn is_empty(&self) -> MediverseResult<bool> {
        Ok(self.contacts()?.is_empty())
    }

    /// Adds `contact`, replacing an existing one with the same name
    /// (case-insensitive). Returns true when an entry was replaced.
    pub fn add(&self, contact: FamilyContact) -> MediverseResult<bool> {
        contact.validate()?;
        let mut contacts = self.contacts()?;
        let replaced = match contacts.iter_mut().find(|c| same_name(&c.name, &contact.name)) {
            Some(existing) => {
                *existing = contact;
                true
            }
            None => {
                contacts.push(contact);
                false
            }
        };
        self.store.put_json(keys::FAMILY, &contacts)?;
        info!("Family circle now has {} contact(s)", contacts.len());
        Ok(replaced)
    }

    /// Removes the contact called `name`. Returns whether one was found.
    pub fn remove(&self, name: &str) -> MediverseResult<bool> {
        let mut contacts = self.contacts()?;
        let before = contacts.len();
        contacts.retain(|c| !same_name(&c.name, name));
        if contacts.len() == before {
            return Ok(false);
        }
        self.store.put_json(keys::FAMILY, &contacts)?;
        Ok(true)
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
