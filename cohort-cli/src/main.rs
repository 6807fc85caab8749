//! Cohort CLI
//!
//! Command-line interface for researchers working with a federated-analytics
//! broker: browse collaborations and nodes, submit tasks, wait for results.

mod commands;
mod config;
mod id_resolver;
mod types;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cohort")]
#[command(about = "Federated analytics researcher CLI", long_about = None)]
struct Cli {
    /// Broker URL without port
    #[arg(long, env = "COHORT_BROKER_URL", default_value = "http://localhost")]
    url: String,

    /// Broker port
    #[arg(long, env = "COHORT_BROKER_PORT", default_value_t = 5000)]
    port: u16,

    /// Path prefix of the broker API
    #[arg(long, env = "COHORT_API_PATH", default_value = "/api")]
    api_path: String,

    /// Username to log in with
    #[arg(short, long, env = "COHORT_USERNAME")]
    username: String,

    /// Password to log in with
    #[arg(short, long, env = "COHORT_PASSWORD", hide_env_values = true)]
    password: String,

    /// Private key of the organization, for encrypted collaborations
    #[arg(long, env = "COHORT_PRIVATE_KEY")]
    private_key: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cohort_cli=info,cohort_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        broker_url: cli.url,
        broker_port: cli.port,
        api_path: cli.api_path,
        username: cli.username,
        password: cli.password,
        private_key: cli.private_key,
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
