// server/tests/cli_flow.rs

// Drives the CLI handlers against the in-memory development server.

use std::io::Cursor;

use tokio::net::TcpListener;

use mediverse::ClientConfig;
use mediverse_cli::cli::handlers::handle_sos;
use mediverse_cli::cli::{run_command, CliContext, Commands, FamilyCommand, FamilyCommandWrapper, RegisterArgs};
use mediverse_models::Role;
use mediverse_rest_stub::{serve, StubState};

async fn context(dir: &tempfile::TempDir) -> (CliContext, StubState) {
    let state = StubState::default();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let served = state.clone();
    tokio::spawn(async move {
        serve(listener, served).await.unwrap();
    });
    let config = ClientConfig {
        api_base_url: format!("http://{}/api", addr),
        data_dir: dir.path().to_path_buf(),
        ..ClientConfig::default()
    };
    (CliContext::from_config(config).unwrap(), state)
}

fn register_asha() -> Commands {
    Commands::Register(RegisterArgs {
        role: Role::Patient,
        name: "Asha Verma".into(),
        email: String::new(),
        age: Some(34),
        phone: "+91 98100 00000".into(),
        address: "Sector 14, Gurugram".into(),
        username: "asha".into(),
        password: "s3cret".into(),
        department: String::new(),
        hospital_name: String::new(),
    })
}

fn login_asha() -> Commands {
    Commands::Login { role: Role::Patient, username: "asha".into(), password: "s3cret".into() }
}

#[tokio::test]
async fn register_login_and_logout() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, _stub) = context(&dir).await;

    run_command(&ctx, register_asha()).await.unwrap();
    assert!(ctx.store.load_user().unwrap().is_none());

    run_command(&ctx, login_asha()).await.unwrap();
    assert_eq!(ctx.store.load_user().unwrap().unwrap().username, "asha");
    run_command(&ctx, Commands::Whoami).await.unwrap();

    run_command(&ctx, Commands::Logout).await.unwrap();
    assert!(ctx.store.load_user().unwrap().is_none());
}

#[tokio::test]
async fn wrong_password_reports_the_server_message() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, _stub) = context(&dir).await;
    run_command(&ctx, register_asha()).await.unwrap();

    let err = run_command(
        &ctx,
        Commands::Login { role: Role::Patient, username: "asha".into(), password: "nope".into() },
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn sos_needs_family_then_falls_back_without_position() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, stub) = context(&dir).await;
    run_command(&ctx, register_asha()).await.unwrap();
    run_command(&ctx, login_asha()).await.unwrap();

    let refused = handle_sos(&ctx, None, true, &mut Cursor::new("")).await;
    assert!(refused.is_err());
    assert!(stub.dispatches().is_empty());

    let add = FamilyCommand::Add { name: "Ravi".into(), phone: "+91 99999 00000".into() };
    run_command(&ctx, Commands::Family(FamilyCommandWrapper { command: add })).await.unwrap();

    // Declining the prompt sends nothing.
    handle_sos(&ctx, None, false, &mut Cursor::new("n\n")).await.unwrap();
    assert!(stub.dispatches().is_empty());

    handle_sos(&ctx, None, false, &mut Cursor::new("yes\n")).await.unwrap();
    let dispatches = stub.dispatches();
    assert_eq!(dispatches.len(), 1);
    assert_eq!(dispatches[0].point(), ctx.config.emergency.fallback_location());
    assert!(ctx.store.load_emergency().unwrap().is_some());
}
