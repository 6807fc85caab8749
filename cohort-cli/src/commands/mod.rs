//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod collaboration;
mod km;
mod node;
mod result;
mod task;

pub use collaboration::CollaborationCommands;
pub use km::KmArgs;
pub use node::NodeCommands;
pub use result::ResultCommands;
pub use task::TaskCommands;

use anyhow::{Context, Result};
use clap::Subcommand;
use cohort_client::BrokerClient;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Collaborations visible to the user
    Collaboration {
        #[command(subcommand)]
        command: CollaborationCommands,
    },
    /// Nodes visible to the user
    Node {
        #[command(subcommand)]
        command: NodeCommands,
    },
    /// Task submission and lookup
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Result records
    #[command(name = "result")]
    Results {
        #[command(subcommand)]
        command: ResultCommands,
    },
    /// Kaplan-Meier curve of a finished survival task
    Km(KmArgs),
}

/// Handle a CLI command
///
/// Logs in, then routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = connect(config).await?;

    match command {
        Commands::Collaboration { command } => {
            collaboration::handle_collaboration_command(command, &client).await
        }
        Commands::Node { command } => node::handle_node_command(command, &client).await,
        Commands::Task { command } => task::handle_task_command(command, &client).await,
        Commands::Results { command } => result::handle_result_command(command, &client).await,
        Commands::Km(args) => km::handle_km_command(args, &client).await,
    }
}

/// Build a client, log in and select the payload codec
async fn connect(config: &Config) -> Result<BrokerClient> {
    let mut client = BrokerClient::new(config.api_base());

    client
        .authenticate(&config.username, &config.password)
        .await
        .with_context(|| format!("Failed to authenticate with {}", client.base_url()))?;

    client
        .setup_encryption(config.private_key.as_deref())
        .context("Failed to set up encryption")?;

    Ok(client)
}
