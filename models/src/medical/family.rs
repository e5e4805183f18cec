// models/src/medical/family.rs

use serde::{Deserialize, Serialize};

use crate::errors::{require, ValidationError, ValidationResult};

/// An emergency contact kept on the device and notified on SOS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyContact {
    pub name: String,
    pub phone: String,
}

impl FamilyContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        FamilyContact { name: name.into(), phone: phone.into() }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        require("name", &self.name)?;
        require("phone", &self.phone)?;
        let digits = self.phone.chars().filter(|c| c.is_ascii_digit()).count();
        let allowed = self
            .phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
        if !allowed || digits < 3 {
            return Err(ValidationError::invalid("phone", format!("'{}' is not a dialable number", self.phone)));
        }
        Ok(())
    }

    /// The `tel:` link the dashboard offers for calling this contact.
    pub fn tel_uri(&self) -> String {
        let dialable: String = self.phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
        format!("tel:{}", dialable)
    }
}
