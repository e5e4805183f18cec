// lib/tests/stub_round_trip.rs

// Runs the client against the in-memory development server end to end.

use chrono::NaiveDate;
use tokio::net::TcpListener;

use mediverse::models::{Credentials, FamilyContact, GeoPoint, RegistrationInput, Role};
use mediverse::emergency::FixedPosition;
use mediverse::{
    mark_todays_dose, ApiClient, AuthService, EmergencyDispatcher, FamilyCircle, LocalStore, MediverseError,
    StreakUpdate,
};
use mediverse_rest_stub::{serve, StubState};

async fn start_stub() -> (String, StubState) {
    let state = StubState::default();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let served = state.clone();
    tokio::spawn(async move {
        serve(listener, served).await.unwrap();
    });
    (format!("http://{}/api", addr), state)
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn register_login_streak_and_sos() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (base_url, stub) = start_stub().await;
    let client = ApiClient::new(base_url).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path()).unwrap();
    let auth = AuthService::new(&client, &store);

    let form = RegistrationInput {
        name: "Asha Verma".into(),
        age: Some(34),
        phone: "+91 98100 00000".into(),
        address: "Sector 14, Gurugram".into(),
        username: "asha".into(),
        password: "s3cret".into(),
        ..Default::default()
    };
    auth.register(Role::Patient, &form).await.unwrap();
    assert!(auth.current_user().unwrap().is_none(), "registration must not sign in");

    let duplicate = auth.register(Role::Patient, &form).await.unwrap_err();
    assert!(matches!(duplicate, MediverseError::Rejected(_)));

    let wrong = auth.login(Role::Patient, &Credentials::new("asha", "nope")).await.unwrap_err();
    assert_eq!(wrong.to_string(), "Invalid credentials");

    let user = auth.login(Role::Patient, &Credentials::new("asha", "s3cret")).await.unwrap();
    assert_eq!(user.name, "Asha Verma");
    assert_eq!(user.role(), Role::Patient);

    let first = mark_todays_dose(&client, &store, day("2026-10-17")).await.unwrap();
    assert_eq!(first.update, StreakUpdate::Started(1));
    assert!(first.mirrored);
    let second = mark_todays_dose(&client, &store, day("2026-10-18")).await.unwrap();
    assert_eq!(second.update, StreakUpdate::Continued(2));
    assert_eq!(store.load_user().unwrap().unwrap().streak, 2);
    assert_eq!(stub.streak_of("asha"), Some(2));

    FamilyCircle::new(&store).add(FamilyContact::new("Ravi", "+91 99999 00000")).unwrap();
    let here = FixedPosition(GeoPoint::new(28.47, 77.03));
    let outcome = EmergencyDispatcher::new(&client, &store, &here)
        .dispatch_for_session()
        .await
        .unwrap();
    assert!(!outcome.used_fallback);
    assert!(!outcome.result.hospital.name.is_empty());

    let dispatches = stub.dispatches();
    assert_eq!(dispatches.len(), 1);
    assert_eq!(Some(dispatches[0].user_id()), user.id.as_ref());
    assert_eq!(dispatches[0].point(), GeoPoint::new(28.47, 77.03));
}

#[tokio::test]
async fn doctor_account_is_separate_from_patient_account() {
    let (base_url, _stub) = start_stub().await;
    let client = ApiClient::new(base_url).unwrap();
    let store = LocalStore::temporary().unwrap();
    let auth = AuthService::new(&client, &store);

    let form = RegistrationInput {
        name: "Dr. Kavya Rao".into(),
        phone: "+91 98111 22222".into(),
        username: "rao".into(),
        password: "s3cret".into(),
        department: "Cardiology".into(),
        hospital_name: "Medanta".into(),
        ..Default::default()
    };
    auth.register(Role::Doctor, &form).await.unwrap();

    let as_patient = auth.login(Role::Patient, &Credentials::new("rao", "s3cret")).await;
    assert!(as_patient.is_err());

    let doctor = auth.login(Role::Doctor, &Credentials::new("rao", "s3cret")).await.unwrap();
    assert_eq!(doctor.role(), Role::Doctor);

    let streak = mark_todays_dose(&client, &store, day("2026-10-18")).await.unwrap_err();
    assert!(matches!(streak, MediverseError::Rejected(_)));
}

#[tokio::test]
async fn streak_survives_failed_mirror() {
    let (base_url, _stub) = start_stub().await;
    let client = ApiClient::new(base_url).unwrap();
    let store = LocalStore::temporary().unwrap();

    // A session the server has never heard of: the update answers 404.
    let ghost = mediverse::models::User::new(999i64, "Ghost", "ghost");
    store.save_user(&ghost).unwrap();
    let outcome = mark_todays_dose(&client, &store, day("2026-10-18")).await.unwrap();
    assert_eq!(outcome.update, StreakUpdate::Started(1));
    assert!(!outcome.mirrored);
    assert_eq!(store.load_user().unwrap().unwrap().streak, 0);
    assert_eq!(mediverse::StreakTracker::new(&store).state(&ghost).unwrap().count, 1);
}

fn patient_form(name: &str, username: &str) -> RegistrationInput {
    RegistrationInput {
        name: name.into(),
        age: Some(40),
        phone: "+91 98100 11111".into(),
        address: "DLF Phase 2, Gurugram".into(),
        username: username.into(),
        password: "s3cret".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn next_patient_on_the_device_starts_their_own_streak() {
    let (base_url, stub) = start_stub().await;
    let client = ApiClient::new(base_url).unwrap();
    let store = LocalStore::temporary().unwrap();
    let auth = AuthService::new(&client, &store);
    auth.register(Role::Patient, &patient_form("Asha Verma", "asha")).await.unwrap();
    auth.register(Role::Patient, &patient_form("Ravi Verma", "ravi")).await.unwrap();

    auth.login(Role::Patient, &Credentials::new("asha", "s3cret")).await.unwrap();
    mark_todays_dose(&client, &store, day("2026-10-17")).await.unwrap();
    mark_todays_dose(&client, &store, day("2026-10-18")).await.unwrap();
    auth.logout().unwrap();

    auth.login(Role::Patient, &Credentials::new("ravi", "s3cret")).await.unwrap();
    let ravi = mark_todays_dose(&client, &store, day("2026-10-18")).await.unwrap();
    assert_eq!(ravi.update, StreakUpdate::Started(1));
    assert_eq!(stub.streak_of("ravi"), Some(1));
    auth.logout().unwrap();

    auth.login(Role::Patient, &Credentials::new("asha", "s3cret")).await.unwrap();
    let again = mark_todays_dose(&client, &store, day("2026-10-18")).await.unwrap();
    assert_eq!(again.update, StreakUpdate::AlreadyMarked(2));
    let next_day = mark_todays_dose(&client, &store, day("2026-10-19")).await.unwrap();
    assert_eq!(next_day.update, StreakUpdate::Continued(3));
    assert_eq!(stub.streak_of("asha"), Some(3));
}

#[tokio::test]
async fn fresh_device_continues_the_server_streak() {
    let (base_url, stub) = start_stub().await;
    let client = ApiClient::new(base_url).unwrap();
    let auth_store = LocalStore::temporary().unwrap();
    let auth = AuthService::new(&client, &auth_store);
    auth.register(Role::Patient, &patient_form("Asha Verma", "asha")).await.unwrap();
    auth.login(Role::Patient, &Credentials::new("asha", "s3cret")).await.unwrap();
    mark_todays_dose(&client, &auth_store, day("2026-10-17")).await.unwrap();
    assert_eq!(stub.streak_of("asha"), Some(1));

    // Same account on a second device with an empty store.
    let other_device = LocalStore::temporary().unwrap();
    AuthService::new(&client, &other_device)
        .login(Role::Patient, &Credentials::new("asha", "s3cret"))
        .await
        .unwrap();
    let outcome = mark_todays_dose(&client, &other_device, day("2026-10-18")).await.unwrap();
    assert_eq!(outcome.update, StreakUpdate::Continued(2));
    assert_eq!(stub.streak_of("asha"), Some(2));
}

