// models/src/medical/registration.rs

use serde::{Deserialize, Serialize};

use crate::errors::{require, ValidationError, ValidationResult};
use crate::medical::Role;

/// Registration form input for either portal.
///
/// Every field is sent on the wire, including the ones the chosen role does
/// not use, which travel as empty strings. `department` and `hospital_name`
/// only matter for doctors; `age` and `address` only for patients.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub hospital_name: String,
}

/// The body posted to a register endpoint: the form plus the role.
#[derive(Debug, Serialize)]
pub struct RegistrationBody<'a> {
    #[serde(flatten)]
    pub input: &'a RegistrationInput,
    pub role: Role,
}

impl RegistrationInput {
    /// Checks the fields the registration form marks as required for `role`.
    pub fn validate(&self, role: Role) -> ValidationResult<()> {
        require("name", &self.name)?;
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            return Err(ValidationError::invalid("email", "must contain '@'"));
        }
        match role {
            Role::Patient => {
                match self.age {
                    None => return Err(ValidationError::missing("age")),
                    Some(0) => return Err(ValidationError::invalid("age", "must be positive")),
                    Some(age) if age > 150 => {
                        return Err(ValidationError::invalid("age", format!("{} is not a plausible age", age)));
                    }
                    Some(_) => {}
                }
                require("phone", &self.phone)?;
                require("address", &self.address)?;
            }
            Role::Doctor => {
                require("department", &self.department)?;
                require("hospital_name", &self.hospital_name)?;
                require("phone", &self.phone)?;
            }
        }
        require("username", &self.username)?;
        require("password", &self.password)
    }

    pub fn body(&self, role: Role) -> RegistrationBody<'_> {
        RegistrationBody { input: self, role }
    }
}

impl std::fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("age", &self.age)
            .field("phone", &self.phone)
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"***")
            .field("department", &self.department)
            .field("hospital_name", &self.hospital_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> RegistrationInput {
        RegistrationInput {
            name: "Asha Verma".into(),
            email: "asha@example.com".into(),
            age: Some(34),
            phone: "+91 98100 00000".into(),
            address: "Sector 14, Gurugram".into(),
            username: "asha".into(),
            password: "s3cret".into(),
            ..Default::default()
        }
    }

    #[test]
    fn patient_form_requires_age_phone_and_address() {
        assert!(patient().validate(Role::Patient).is_ok());

        let mut no_age = patient();
        no_age.age = None;
        assert_eq!(no_age.validate(Role::Patient), Err(ValidationError::missing("age")));

        let mut no_address = patient();
        no_address.address.clear();
        assert_eq!(no_address.validate(Role::Patient), Err(ValidationError::missing("address")));
    }

    #[test]
    fn doctor_form_requires_department_and_hospital() {
        let mut input = patient();
        input.age = None;
        input.address.clear();
        assert_eq!(input.validate(Role::Doctor), Err(ValidationError::missing("department")));

        input.department = "Cardiology".into();
        input.hospital_name = "Medanta".into();
        assert!(input.validate(Role::Doctor).is_ok());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut input = patient();
        input.email = "not-an-email".into();
        assert!(matches!(
            input.validate(Role::Patient),
            Err(ValidationError::InvalidField { field: "email", .. })
        ));
    }

    #[test]
    fn body_carries_role_and_every_field() {
        let input = patient();
        let value = serde_json::to_value(input.body(Role::Patient)).unwrap();
        assert_eq!(value["role"], "patient");
        assert_eq!(value["age"], 34);
        assert_eq!(value["department"], "");
        assert_eq!(value["hospital_name"], "");
    }
}
