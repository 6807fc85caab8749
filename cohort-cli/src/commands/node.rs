//! Node command handlers

use anyhow::Result;
use clap::Subcommand;
use cohort_client::BrokerClient;
use cohort_core::domain::node::Node;
use colored::*;

/// Node subcommands
#[derive(Subcommand)]
pub enum NodeCommands {
    /// List nodes
    List {
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle_node_command(command: NodeCommands, client: &BrokerClient) -> Result<()> {
    match command {
        NodeCommands::List { json } => list_nodes(client, json).await,
    }
}

async fn list_nodes(client: &BrokerClient, json: bool) -> Result<()> {
    if json {
        let nodes = client.list_nodes_raw().await?;
        println!("{}", serde_json::to_string_pretty(&nodes)?);
        return Ok(());
    }

    let nodes = client.list_nodes().await?;

    if nodes.is_empty() {
        println!("{}", "No nodes found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} node(s):", nodes.len()).bold());
    println!();
    for node in &nodes {
        print_node(node);
    }

    Ok(())
}

fn print_node(node: &Node) {
    let status = match node.status.as_deref() {
        Some("online") => "online".green(),
        Some(other) => other.red(),
        None => "unknown".dimmed(),
    };

    println!("  {} {} {}", "▸".cyan(), node.name.bold(), format!("#{}", node.id).dimmed());
    println!("    Status:        {}", status);
    if let Some(org) = &node.organization {
        println!("    Organization:  {}", org.id);
    }
    if let Some(collab) = &node.collaboration {
        println!("    Collaboration: {}", collab.id);
    }
    if let Some(last_seen) = &node.last_seen {
        println!("    Last seen:     {}", last_seen.dimmed());
    }
    println!();
}
