// server/tests/cli_parse.rs

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use mediverse_cli::cli::{CliArgs, Commands, EmergencyCommand, FamilyCommand};
use mediverse_models::Role;

fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse_from(std::iter::once("mediverse-cli").chain(args.iter().copied()))
}

#[test]
fn login_defaults_to_the_patient_portal() {
    let args = parse(&["login", "--username", "asha", "--password", "pw"]).unwrap();
    assert_eq!(
        args.command,
        Commands::Login { role: Role::Patient, username: "asha".into(), password: "pw".into() }
    );
}

#[test]
fn role_is_case_insensitive_and_checked() {
    let args = parse(&["login", "--role", "Doctor", "--username", "rao", "--password", "pw"]).unwrap();
    assert!(matches!(args.command, Commands::Login { role: Role::Doctor, .. }));
    assert!(parse(&["login", "--role", "nurse", "--username", "x", "--password", "pw"]).is_err());
}

#[test]
fn global_flags_work_after_the_subcommand() {
    let args = parse(&["whoami", "--api-url", "http://127.0.0.1:5000/api", "--data-dir", "/tmp/mv"]).unwrap();
    assert_eq!(args.api_url.as_deref(), Some("http://127.0.0.1:5000/api"));
    assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/mv")));
    assert_eq!(args.command, Commands::Whoami);
}

#[test]
fn register_collects_doctor_fields() {
    let args = parse(&[
        "register", "--role", "doctor", "--name", "Dr. Rao", "--phone", "+91 98111 22222",
        "--username", "rao", "--password", "pw", "--department", "Cardiology", "--hospital-name", "Medanta",
    ])
    .unwrap();
    let Commands::Register(register) = args.command else { panic!("expected register") };
    let input = register.to_input();
    assert_eq!(register.role, Role::Doctor);
    assert_eq!(input.department, "Cardiology");
    assert_eq!(input.hospital_name, "Medanta");
    assert_eq!(input.age, None);
    assert!(input.validate(Role::Doctor).is_ok());
}

#[test]
fn sos_position_needs_both_coordinates() {
    let args = parse(&["sos", "--lat", "-33.86", "--lng", "151.2", "--yes"]).unwrap();
    assert_eq!(args.command, Commands::Sos { lat: Some(-33.86), lng: Some(151.2), yes: true });
    assert!(parse(&["sos", "--lat", "28.4"]).is_err());
    assert_eq!(parse(&["sos"]).unwrap().command, Commands::Sos { lat: None, lng: None, yes: false });
}

#[test]
fn streak_accepts_an_explicit_date() {
    let args = parse(&["streak", "--date", "2026-10-18"]).unwrap();
    assert_eq!(args.command, Commands::Streak { date: NaiveDate::from_ymd_opt(2026, 10, 18) });
    assert!(parse(&["streak", "--date", "yesterday"]).is_err());
}

#[test]
fn family_and_emergency_subcommands() {
    let Commands::Family(family) = parse(&["family", "add", "--name", "Ravi", "--phone", "12345"]).unwrap().command
    else {
        panic!("expected family")
    };
    assert_eq!(family.command, FamilyCommand::Add { name: "Ravi".into(), phone: "12345".into() });

    let Commands::Emergency(emergency) = parse(&["emergency", "clear"]).unwrap().command else {
        panic!("expected emergency")
    };
    assert_eq!(emergency.command, EmergencyCommand::Clear);
}
