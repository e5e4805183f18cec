// server/src/cli/cli.rs

// Parses the command line, assembles the client from configuration and
// dispatches to the handlers.

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use mediverse::{load_client_config, ApiClient, ClientConfig, LocalStore};

use crate::cli::commands::{CliArgs, Commands};
use crate::cli::handlers;

/// Everything a command needs: resolved configuration, the API client and
/// the opened local store.
pub struct CliContext {
    pub config: ClientConfig,
    pub client: ApiClient,
    pub store: LocalStore,
}

impl CliContext {
    /// Loads the configuration file and environment, then applies the
    /// `--api-url` and `--data-dir` overrides.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let mut config = load_client_config(args.config.as_deref())?;
        if let Some(api_url) = &args.api_url {
            config.api_base_url = api_url.clone();
        }
        if let Some(data_dir) = &args.data_dir {
            config.data_dir = data_dir.clone();
        }
        config.validate()?;
        CliContext::from_config(config)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        debug!("API at {}, data in {}", config.api_base_url, config.data_dir.display());
        let client = ApiClient::from_config(&config).context("Failed to build HTTP client")?;
        let store = LocalStore::open(&config.data_dir)
            .with_context(|| format!("Failed to open local store in {}", config.data_dir.display()))?;
        Ok(CliContext { config, client, store })
    }
}

pub async fn run_command(ctx: &CliContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { role, username, password } => handlers::handle_login(ctx, role, username, password).await,
        Commands::Register(args) => handlers::handle_register(ctx, &args).await,
        Commands::Logout => handlers::handle_logout(ctx),
        Commands::Whoami => handlers::handle_whoami(ctx),
        Commands::Streak { date } => handlers::handle_streak(ctx, date).await,
        Commands::Family(wrapper) => handlers::handle_family(ctx, wrapper.command),
        Commands::Sos { lat, lng, yes } => {
            let stdin = std::io::stdin();
            handlers::handle_sos(ctx, lat.zip(lng), yes, &mut stdin.lock()).await
        }
        Commands::Emergency(wrapper) => handlers::handle_emergency(ctx, wrapper.command),
    }
}

pub async fn start_cli() -> Result<()> {
    let args = CliArgs::parse();
    let ctx = CliContext::from_args(&args)?;
    run_command(&ctx, args.command).await
}
