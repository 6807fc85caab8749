//! ID resolver module
//!
//! Turns the collaboration a user typed (ID, name, or nothing) into the
//! broker's collaboration record.

use anyhow::{Context, Result, anyhow};
use cohort_client::BrokerClient;
use cohort_core::domain::collaboration::Collaboration;

use crate::types::CollaborationRef;

/// Resolve a collaboration reference
///
/// - No reference: the first collaboration the broker lists for the user
/// - An ID: fetched directly
/// - A name: matched case-insensitively against all visible collaborations
///
/// # Errors
/// Returns an error if:
/// - The user has no collaborations
/// - No collaboration matches the name
/// - Multiple collaborations share the name (ambiguous)
/// - API call fails
pub async fn resolve_collaboration(
    client: &BrokerClient,
    reference: Option<&CollaborationRef>,
) -> Result<Collaboration> {
    let name = match reference {
        Some(CollaborationRef::Id(id)) => {
            return client
                .get_collaboration(*id)
                .await
                .with_context(|| format!("Failed to fetch collaboration {}", id));
        }
        Some(CollaborationRef::Name(name)) => Some(name),
        None => None,
    };

    let collaborations = client
        .list_collaborations()
        .await
        .context("Failed to fetch collaborations for resolution")?;

    let Some(name) = name else {
        return collaborations
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No collaborations available for this user"));
    };

    pick_by_name(collaborations, name)
}

fn pick_by_name(collaborations: Vec<Collaboration>, name: &str) -> Result<Collaboration> {
    let mut matches: Vec<_> = collaborations
        .into_iter()
        .filter(|c| c.name.eq_ignore_ascii_case(name))
        .collect();

    match matches.len() {
        0 => Err(anyhow!("No collaboration named '{}'", name)),
        1 => Ok(matches.remove(0)),
        _ => {
            let ids: Vec<String> = matches.iter().map(|c| c.id.to_string()).collect();
            Err(anyhow!(
                "Ambiguous name '{}' matches multiple collaborations: {}",
                name,
                ids.join(", ")
            ))
        }
    }
}
