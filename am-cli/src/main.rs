//! Asset maintenance tracker CLI
//!
//! Configuration is loaded from environment variables (via .env file).
//! Command-line arguments override environment variables; the flags below
//! fall back to the matching `AM_*` variable when omitted.
//!
//! Usage:
//!   am migrate up    - Create the database schema
//!   am migrate down  - Drop the database schema
//!   am start         - Start the API server (runs migrations first)
//!   am status        - Query a running server's health endpoint

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;

#[derive(Parser)]
#[command(name = "am")]
#[command(about = "Asset maintenance tracker")]
#[command(version)]
pub struct Cli {
    /// Database URL
    #[arg(long, global = true, env = "AM_DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or drop the database schema
    Migrate {
        #[command(subcommand)]
        direction: MigrateDirection,
    },

    /// Start the API server
    Start {
        /// Host to bind to
        #[arg(short = 'H', long, env = "AM_BIND_ADDR")]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long, env = "AM_PORT")]
        port: Option<u16>,
    },

    /// Show server status
    Status {
        /// API server URL
        #[arg(short, long, env = "AM_API_URL", default_value = "http://localhost:3000")]
        api_url: String,
    },
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrateDirection {
    /// Create tables and indexes
    Up,
    /// Drop every table
    Down,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging();

    if let Err(e) = commands::run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "am_cli=info,am_api=info,am_db=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_arguments_fall_back_to_environment() {
        let cli = Cli::command();
        let env_of = |cmd: &clap::Command, id: &str| {
            cmd.get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(OsStr::to_os_string)
        };

        assert_eq!(env_of(&cli, "database_url").as_deref(), Some(OsStr::new("AM_DATABASE_URL")));

        let start = cli.find_subcommand("start").unwrap();
        assert_eq!(env_of(start, "host").as_deref(), Some(OsStr::new("AM_BIND_ADDR")));
        assert_eq!(env_of(start, "port").as_deref(), Some(OsStr::new("AM_PORT")));

        let status = cli.find_subcommand("status").unwrap();
        assert_eq!(env_of(status, "api_url").as_deref(), Some(OsStr::new("AM_API_URL")));
    }

    #[test]
    fn test_parse_migrate() {
        let cli = Cli::parse_from(["am", "migrate", "down"]);
        assert!(matches!(
            cli.command,
            Commands::Migrate {
                direction: MigrateDirection::Down
            }
        ));
    }

    #[test]
    fn test_parse_start_overrides() {
        let cli = Cli::parse_from([
            "am",
            "--database-url",
            "sqlite::memory:",
            "start",
            "-H",
            "127.0.0.1",
            "--port",
            "8080",
        ]);
        assert_eq!(cli.database_url.as_deref(), Some("sqlite::memory:"));
        match cli.command {
            Commands::Start { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
            }
            _ => panic!("expected start"),
        }
    }

    #[test]
    fn test_status_default_url() {
        let cli = Cli::parse_from(["am", "status"]);
        match cli.command {
            Commands::Status { api_url } => assert_eq!(api_url, "http://localhost:3000"),
            _ => panic!("expected status"),
        }
    }
}
