// rest_api/src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use tokio::net::TcpListener;

use mediverse_rest_stub::{load_stub_config, serve, StubState};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Optional single argument: path to a config file.
    let config_file = std::env::args().nth(1).map(PathBuf::from);
    let config = load_stub_config(config_file.as_deref())?;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind stub API to {}", addr))?;
    info!("MediVerse stub API listening on http://{}/api", addr);
    println!("MediVerse stub API listening on http://{}/api", addr);

    serve(listener, StubState::new(config.dispatch.to_result())).await?;
    Ok(())
}
