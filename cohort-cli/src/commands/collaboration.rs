//! Collaboration command handlers

use anyhow::Result;
use clap::Subcommand;
use cohort_client::BrokerClient;
use colored::*;

/// Collaboration subcommands
#[derive(Subcommand)]
pub enum CollaborationCommands {
    /// List collaborations and their organizations
    List {
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle_collaboration_command(
    command: CollaborationCommands,
    client: &BrokerClient,
) -> Result<()> {
    match command {
        CollaborationCommands::List { json } => list_collaborations(client, json).await,
    }
}

async fn list_collaborations(client: &BrokerClient, json: bool) -> Result<()> {
    if json {
        println!("{}", collaborations_json(client).await?);
        return Ok(());
    }

    let collaborations = client.list_collaborations().await?;

    if collaborations.is_empty() {
        println!("{}", "No collaborations found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} collaboration(s):", collaborations.len()).bold()
    );
    println!();

    for collab in collaborations {
        let organization_ids = client.organization_ids(&collab).await?;
        let organizations: Vec<String> = organization_ids.iter().map(u64::to_string).collect();

        println!("  {} {} {}", "▸".cyan(), collab.name.bold(), format!("#{}", collab.id).dimmed());
        println!(
            "    Encrypted:     {}",
            if collab.is_encrypted() { "yes".yellow() } else { "no".normal() }
        );
        println!("    Organizations: {}", organizations.join(", "));
        println!();
    }

    Ok(())
}

/// The collaborations exactly as the broker sent them, pretty-printed
async fn collaborations_json(client: &BrokerClient) -> Result<String> {
    let collaborations = client.list_collaborations_raw().await?;
    Ok(serde_json::to_string_pretty(&collaborations)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::logged_in;

    #[tokio::test]
    async fn test_json_output_is_verbatim() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/collaboration")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id": 4, "name": "km",
                     "organizations": "/api/organization?collaboration_id=4",
                     "tasks": "/api/task?collaboration_id=4"}]"#,
            )
            .create_async()
            .await;

        let client = logged_in(&mut server).await;
        let output = collaborations_json(&client).await.unwrap();
        let printed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            printed,
            serde_json::json!([{
                "id": 4,
                "name": "km",
                "organizations": "/api/organization?collaboration_id=4",
                "tasks": "/api/task?collaboration_id=4"
            }])
        );
    }
}
