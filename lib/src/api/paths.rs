// lib/src/api/paths.rs

//! Endpoint paths, relative to the configured API base URL.

use mediverse_models::Role;

pub const LOGIN_PATIENT: &str = "/auth/login/patient";
pub const REGISTER_PATIENT: &str = "/auth/register/patient";
pub const LOGIN_DOCTOR: &str = "/auth/login/doctor";
pub const REGISTER_DOCTOR: &str = "/auth/register/doctor";
pub const PATIENT_UPDATE: &str = "/patient/update";
pub const EMERGENCY_TRIGGER: &str = "/emergency/trigger";

pub fn login(role: Role) -> &'static str {
    match role {
        Role::Patient => LOGIN_PATIENT,
        Role::Doctor => LOGIN_DOCTOR,
    }
}

pub fn register(role: Role) -> &'static str {
    match role {
        Role::Patient => REGISTER_PATIENT,
        Role::Doctor => REGISTER_DOCTOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_picks_the_endpoint() {
        assert_eq!(login(Role::Patient), "/auth/login/patient");
        assert_eq!(login(Role::Doctor), "/auth/login/doctor");
        assert_eq!(register(Role::Patient), "/auth/register/patient");
        assert_eq!(register(Role::Doctor), "/auth/register/doctor");
    }
}
