// models/src/medical/responses.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::medical::User;

/// The `{ success, user?, error? }` envelope every auth and update endpoint
/// answers with. `user` is generic because register responses are not
/// guaranteed to carry a complete user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiReply<U> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub user: Option<U>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn none<U>() -> Option<U> {
    None
}

impl<U> ApiReply<U> {
    pub fn ok(user: U) -> Self {
        ApiReply { success: true, user: Some(user), error: None, extra: Map::new() }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        ApiReply { success: false, user: None, error: Some(error.into()), extra: Map::new() }
    }
}

/// Login/register reply, passed back to callers exactly as received.
pub type AuthResponse = ApiReply<Value>;

/// Reply of `POST /patient/update`.
pub type UpdateResponse = ApiReply<User>;
