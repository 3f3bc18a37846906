//! Command handlers for the CLI

use am_api::ServerConfig;
use am_db::MaintenanceDatabase;
use std::sync::Arc;

use crate::error::{CliError, CliResult};
use crate::{Cli, Commands, MigrateDirection};

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> CliResult<()> {
    let mut config = ServerConfig::from_env();
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }

    match cli.command {
        Commands::Migrate { direction } => migrate(&config, direction).await,
        Commands::Start { host, port } => {
            if let Some(host) = host {
                config.bind_addr = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            start(&config).await
        }
        Commands::Status { api_url } => status(&api_url).await,
    }
}

async fn migrate(config: &ServerConfig, direction: MigrateDirection) -> CliResult<()> {
    let database = MaintenanceDatabase::connect(&config.database_config()).await?;

    match direction {
        MigrateDirection::Up => {
            database.init_schema().await?;
            println!("Database schema created at {}", config.database_url);
        }
        MigrateDirection::Down => {
            database.drop_schema().await?;
            println!("Database schema dropped at {}", config.database_url);
        }
    }
    Ok(())
}

async fn start(config: &ServerConfig) -> CliResult<()> {
    // Reject a missing or short secret before touching the database
    config.jwt_config()?;

    tracing::info!(
        address = %config.bind_address(),
        database = %config.database_url,
        "Starting asset maintenance API"
    );

    let database = Arc::new(MaintenanceDatabase::connect(&config.database_config()).await?);
    am_api::run_server(config, database)
        .await
        .map_err(|e| CliError::server(e.to_string()))
}

async fn status(api_url: &str) -> CliResult<()> {
    let url = format!("{}/api/health", api_url.trim_end_matches('/'));
    println!("Checking server status at {}...", url);

    let response = reqwest::Client::new().get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CliError::api(status.as_u16(), body));
    }

    let body = response.json::<serde_json::Value>().await?;
    println!("Status: {}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
