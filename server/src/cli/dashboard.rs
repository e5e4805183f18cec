// server/src/cli/dashboard.rs

use colored::Colorize;
use serde_json::Value;

use mediverse_models::{EmergencyResult, FamilyContact, Role, User};

fn extra_text<'a>(user: &'a User, key: &str) -> &'a str {
    user.extra.get(key).and_then(Value::as_str).unwrap_or("-")
}

/// The role decides which view the signed-in user gets.
pub fn print_dashboard(user: &User, streak: u32, family: &[FamilyContact], active: Option<&EmergencyResult>) {
    match user.role() {
        Role::Patient => print_patient_dashboard(user, streak, family, active),
        Role::Doctor => print_doctor_dashboard(user),
    }
}

fn print_patient_dashboard(user: &User, streak: u32, family: &[FamilyContact], active: Option<&EmergencyResult>) {
    println!("{}", format!("Patient dashboard: {}", user.name).bold().cyan());
    println!("  Username:      {}", user.username);
    println!("  Daily streak:  {} day(s)", streak.to_string().green().bold());

    if user.appointments.is_empty() {
        println!("  Appointments:  none");
    } else {
        println!("  Appointments:");
        for appointment in &user.appointments {
            println!(
                "    {} at {} on {} {}",
                appointment.doc_name, appointment.hospital, appointment.date, appointment.time
            );
        }
    }

    if family.is_empty() {
        println!("  Family circle: {}", "empty, add a contact before using SOS".yellow());
    } else {
        println!("  Family circle: {} contact(s)", family.len());
    }

    if let Some(result) = active {
        println!("  {}", "Emergency in progress".red().bold());
        print_tracking(result);
    }
}

fn print_doctor_dashboard(user: &User) {
    println!("{}", format!("Doctor dashboard: {}", user.name).bold().cyan());
    println!("  Username:   {}", user.username);
    println!("  Department: {}", extra_text(user, "department"));
    println!("  Hospital:   {}", extra_text(user, "hospital_name"));
}

pub fn print_tracking(result: &EmergencyResult) {
    println!("    Hospital:  {}", result.hospital.name);
    println!("    ETA:       {}", result.ambulance.eta);
    println!("    Driver:    {}", result.ambulance.driver_name);
    println!("    Contact:   {}", result.ambulance.contact);
}

pub fn print_family(contacts: &[FamilyContact]) {
    if contacts.is_empty() {
        println!("No family contacts saved.");
        return;
    }
    for contact in contacts {
        println!("  {:<20} {}  ({})", contact.name, contact.phone, contact.tel_uri());
    }
}
