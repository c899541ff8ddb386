use anyhow::Result;
use clap::Parser;

use roster::cli::{self, Cli};
use roster::{ApiClient, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    log::debug!(
        "Configuration loaded (environment: {}, api: {})",
        config.environment,
        config.api_base_url
    );

    let client = ApiClient::new(config)?;

    if let Err(e) = cli::run(cli, &client).await {
        if let Some(client_error) = e.downcast_ref::<roster::ClientError>() {
            if client_error.is_unauthorized() {
                eprintln!("Session is missing or expired. Run `roster login` first.");
            }
        }
        return Err(e);
    }

    Ok(())
}
