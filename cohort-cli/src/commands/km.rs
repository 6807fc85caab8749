//! Kaplan-Meier command handler
//!
//! Reads the survival curve out of a finished task and prints it as a
//! table, or writes it as CSV for plotting elsewhere.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use cohort_client::BrokerClient;
use cohort_client::survival::{DEFAULT_TIME_COLUMN, KaplanMeierCurve, SURVIVAL_COLUMN};
use cohort_core::domain::result::ResultRecord;
use colored::*;

/// Arguments of the `km` command
#[derive(Args)]
pub struct KmArgs {
    /// Task ID of the survival analysis
    task_id: u64,

    /// Column holding event times
    #[arg(long, default_value = DEFAULT_TIME_COLUMN)]
    time_column: String,

    /// Write the curve as CSV to this file instead of printing it
    #[arg(short, long, conflicts_with = "json")]
    output: Option<PathBuf>,

    /// Print the curve as JSON
    #[arg(long)]
    json: bool,
}

pub async fn handle_km_command(args: KmArgs, client: &BrokerClient) -> Result<()> {
    let records = client
        .results_from_task(args.task_id)
        .await
        .with_context(|| format!("Failed to fetch results of task {}", args.task_id))?;

    let record = select_finished(&records, args.task_id)?;

    let payload = client
        .decode_result(record)?
        .ok_or_else(|| anyhow!("Result {} has no payload", record.id))?;

    let curve = KaplanMeierCurve::from_payload(&payload, &args.time_column)
        .with_context(|| format!("Result {} is not a Kaplan-Meier curve", record.id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&curve)?);
        return Ok(());
    }

    if let Some(path) = &args.output {
        std::fs::write(path, curve.to_csv(&args.time_column))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!(
            "{}",
            format!("✓ Wrote {} point(s) to {}", curve.points.len(), path.display()).green()
        );
        return Ok(());
    }

    if curve.is_empty() {
        println!("{}", "The curve has no points.".yellow());
        return Ok(());
    }

    println!("{}", "Kaplan-Meier curve:".bold());
    println!("  {:>14}  {:>12}", args.time_column.cyan(), SURVIVAL_COLUMN.cyan());
    for point in &curve.points {
        println!("  {:>14}  {:>12.4}", point.time, point.survival);
    }

    Ok(())
}

/// The first finished record; organizations finish in any order
fn select_finished(records: &[ResultRecord], task_id: u64) -> Result<&ResultRecord> {
    records
        .iter()
        .find(|record| record.is_finished())
        .ok_or_else(|| anyhow!("Task {} has no finished result yet", task_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(body: serde_json::Value) -> Vec<ResultRecord> {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_select_first_finished_record() {
        let records = records(json!([
            {"id": 40, "finished_at": null},
            {"id": 41, "result": "eyJhIjogMX0=", "finished_at": "2024-05-02T09:01:12"},
            {"id": 42, "result": "eyJhIjogMn0=", "finished_at": "2024-05-02T09:03:00"}
        ]));

        assert_eq!(select_finished(&records, 12).unwrap().id, 41);
    }

    #[test]
    fn test_select_finished_rejects_pending_task() {
        let records = records(json!([{"id": 40, "finished_at": null}]));

        let err = select_finished(&records, 12).unwrap_err();
        assert!(err.to_string().contains("Task 12 has no finished result"));
        assert!(select_finished(&[], 12).is_err());
    }
}
