// server/src/main.rs

// Entry point for the MediVerse command line client.

use anyhow::Result;
use mediverse_cli::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    start_cli().await
}
