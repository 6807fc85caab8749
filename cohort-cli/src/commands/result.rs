//! Result command handlers
//!
//! Fetching single result records, all records of a task, and waiting for a
//! task to finish.

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use cohort_client::{BrokerClient, PollOutcome};
use cohort_core::domain::result::ResultRecord;
use colored::*;
use serde_json::Value;

use crate::types::PollArgs;

/// Result subcommands
#[derive(Subcommand)]
pub enum ResultCommands {
    /// Get a result record
    Get {
        /// Result ID
        id: u64,
    },
    /// List all result records of a task
    Task {
        /// Task ID
        task_id: u64,
    },
    /// Wait for the first result of a task to finish
    Wait {
        /// Task ID
        task_id: u64,

        #[command(flatten)]
        poll: PollArgs,
    },
}

pub async fn handle_result_command(command: ResultCommands, client: &BrokerClient) -> Result<()> {
    match command {
        ResultCommands::Get { id } => get_result(client, id).await,
        ResultCommands::Task { task_id } => list_task_results(client, task_id).await,
        ResultCommands::Wait { task_id, poll } => {
            let outcome = client
                .await_task_results(task_id, poll.max_attempts, poll.delay)
                .await
                .with_context(|| format!("Failed to wait for task {}", task_id))?;
            report_outcome(client, outcome)
        }
    }
}

async fn get_result(client: &BrokerClient, id: u64) -> Result<()> {
    let record = client.get_result(id).await?;
    print_result_record(client, &record);
    Ok(())
}

async fn list_task_results(client: &BrokerClient, task_id: u64) -> Result<()> {
    let records = client.results_from_task(task_id).await?;

    if records.is_empty() {
        println!(
            "{}",
            format!("No results found for task {}.", task_id).yellow()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} result(s) for task {}:", records.len(), task_id).bold()
    );
    println!();
    for record in &records {
        print_result_record(client, record);
        println!();
    }

    Ok(())
}

/// Print a finished record, or fail when the attempt budget ran out
pub(super) fn report_outcome(client: &BrokerClient, outcome: PollOutcome) -> Result<()> {
    match outcome {
        PollOutcome::Finished(record) => {
            print_result_record(client, &record);
            Ok(())
        }
        PollOutcome::Pending { last, attempts } => {
            println!(
                "{}",
                format!(
                    "⚠ Result {} still pending after {} attempt(s)",
                    last.id, attempts
                )
                .yellow()
            );
            bail!("result {} did not finish in time", last.id)
        }
    }
}

/// Payload of a record after a decoding attempt
#[derive(Debug)]
enum PayloadView {
    Missing,
    Decoded(Value),
    Undecodable { raw: Value, error: String },
}

fn payload_view(client: &BrokerClient, record: &ResultRecord) -> PayloadView {
    match client.decode_result(record) {
        Ok(None) => PayloadView::Missing,
        Ok(Some(value)) => PayloadView::Decoded(value),
        Err(err) => PayloadView::Undecodable {
            raw: record.payload().cloned().unwrap_or_default(),
            error: err.to_string(),
        },
    }
}

/// Print a result record with its decoded payload
///
/// A payload that cannot be decoded is shown raw after a warning.
pub(super) fn print_result_record(client: &BrokerClient, record: &ResultRecord) {
    let status = if record.is_finished() {
        "finished".green()
    } else {
        "pending".yellow()
    };

    println!("{}", format!("Result {}:", record.id).bold());
    println!("  Status:       {}", status);
    if let Some(org) = &record.organization {
        println!("  Organization: {}", org.id);
    }
    if let Some(task) = &record.task {
        println!("  Task:         {}", task.id);
    }
    if let Some(started) = record.started_at {
        println!("  Started:      {}", started.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(finished) = record.finished_at {
        println!("  Finished:     {}", finished.format("%Y-%m-%d %H:%M:%S"));

        if let Some(started) = record.started_at {
            let seconds = finished.signed_duration_since(started).num_seconds();
            println!("  Duration:     {}s", seconds);
        }
    }

    match payload_view(client, record) {
        PayloadView::Missing => {}
        PayloadView::Decoded(payload) => {
            println!("\n{}", "Payload:".bold());
            println!("{:#}", payload);
        }
        PayloadView::Undecodable { raw, error } => {
            println!(
                "\n{}",
                format!("⚠ Could not decode payload of result {}: {}", record.id, error).yellow()
            );
            println!("{}", "Raw payload:".bold());
            println!("{:#}", raw);
        }
    }

    if let Some(log) = record.log.as_deref().filter(|log| !log.is_empty()) {
        println!("\n{}", "Log:".bold());
        println!("{}", log.dimmed());
    }
}
