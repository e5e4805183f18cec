// models/src/medical/login.rs

use serde::{Deserialize, Serialize};

use crate::errors::{require, ValidationResult};

/// Login form input. Only ever held in memory for the duration of one request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials { username: username.into(), password: password.into() }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        require("username", &self.username)?;
        require("password", &self.password)
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
