// models/src/medical/user.rs

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::medical::{FamilyContact, Role};

/// Server-assigned user identifier. The backend has used both numeric and
/// string ids, so both are accepted and written back as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId::Text(s.to_string())
    }
}

impl From<i64> for UserId {
    fn from(n: i64) -> Self {
        UserId::Number(n)
    }
}

/// An upcoming visit as the dashboard lists it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default)]
    pub doc_name: String,
    #[serde(default)]
    pub hospital: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

/// The signed-in user: the object the last successful auth or update
/// response returned, plus the role the user logged in with.
///
/// The typed fields are a lenient view of that object. Values the view cannot
/// read fall back to defaults instead of failing. Serializing writes the
/// server object back unchanged, except for fields whose typed value was
/// modified, so `_id`, odd value types and unmodelled fields round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct User {
    pub id: Option<UserId>,
    pub name: String,
    pub username: String,
    pub role: Option<Role>,
    pub streak: u32,
    pub appointments: Vec<Appointment>,
    pub family_members: Vec<FamilyContact>,
    /// Every field outside the typed view.
    pub extra: Map<String, Value>,
    raw: Map<String, Value>,
}

const ID: &str = "id";
const MONGO_ID: &str = "_id";
const NAME: &str = "name";
const USERNAME: &str = "username";
const ROLE: &str = "role";
const STREAK: &str = "streak";
const APPOINTMENTS: &str = "appointments";
const FAMILY_MEMBERS: &str = "family_members";
const VIEW_FIELDS: [&str; 8] = [ID, MONGO_ID, NAME, USERNAME, ROLE, STREAK, APPOINTMENTS, FAMILY_MEMBERS];

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, username: impl Into<String>) -> Self {
        User {
            id: Some(id.into()),
            name: name.into(),
            username: username.into(),
            role: None,
            streak: 0,
            appointments: Vec::new(),
            family_members: Vec::new(),
            extra: Map::new(),
            raw: Map::new(),
        }
    }

    /// The session's role; sessions saved without one are patients.
    pub fn role(&self) -> Role {
        self.role.unwrap_or_default()
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// The object as it goes on the wire and into the local store.
    pub fn to_map(&self) -> Map<String, Value> {
        let base = User::from(self.raw.clone());
        let mut map = self.raw.clone();

        if self.id != base.id {
            map.remove(ID);
            map.remove(MONGO_ID);
            if let Some(id) = &self.id {
                let key = if self.raw.contains_key(MONGO_ID) && !self.raw.contains_key(ID) { MONGO_ID } else { ID };
                map.insert(key.to_string(), id_value(id));
            }
        }
        if self.name != base.name {
            map.insert(NAME.to_string(), Value::String(self.name.clone()));
        }
        if self.username != base.username {
            map.insert(USERNAME.to_string(), Value::String(self.username.clone()));
        }
        if self.role != base.role {
            match self.role {
                Some(role) => map.insert(ROLE.to_string(), Value::String(role.as_str().to_string())),
                None => map.remove(ROLE),
            };
        }
        if self.streak != base.streak {
            map.insert(STREAK.to_string(), Value::from(self.streak));
        }
        if self.appointments != base.appointments {
            map.insert(APPOINTMENTS.to_string(), json!(self.appointments));
        }
        if self.family_members != base.family_members {
            map.insert(FAMILY_MEMBERS.to_string(), json!(self.family_members));
        }

        for key in base.extra.keys() {
            if !self.extra.contains_key(key) {
                map.remove(key);
            }
        }
        for (key, value) in &self.extra {
            if !VIEW_FIELDS.contains(&key.as_str()) && base.extra.get(key) != Some(value) {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }
}

impl From<Map<String, Value>> for User {
    fn from(raw: Map<String, Value>) -> Self {
        let id = [ID, MONGO_ID]
            .iter()
            .filter_map(|key| raw.get(*key))
            .find_map(|value| UserId::deserialize(value).ok());
        let extra = raw
            .iter()
            .filter(|(key, _)| !VIEW_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        User {
            id,
            name: text_field(&raw, NAME),
            username: text_field(&raw, USERNAME),
            role: raw.get(ROLE).and_then(|value| Role::deserialize(value).ok()),
            streak: raw.get(STREAK).map(count_value).unwrap_or(0),
            appointments: list_field(&raw, APPOINTMENTS),
            family_members: list_field(&raw, FAMILY_MEMBERS),
            extra,
            raw,
        }
    }
}

impl From<User> for Map<String, Value> {
    fn from(user: User) -> Self {
        user.to_map()
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.to_map() == other.to_map()
    }
}

fn text_field(raw: &Map<String, Value>, key: &str) -> String {
    raw.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

// Anything that is not a readable JSON array reads as an empty list.
fn list_field<T: DeserializeOwned>(raw: &Map<String, Value>, key: &str) -> Vec<T> {
    raw.get(key)
        .filter(|value| value.is_array())
        .and_then(|value| Vec::<T>::deserialize(value).ok())
        .unwrap_or_default()
}

// Streaks arrive as numbers, numeric strings or null.
fn count_value(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn id_value(id: &UserId) -> Value {
    match id {
        UserId::Number(n) => Value::from(*n),
        UserId::Text(s) => Value::String(s.clone()),
    }
}
