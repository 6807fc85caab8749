//! Result poller
//!
//! Waits for the first result record of a task to finish. Fetches happen
//! strictly one after another with a fixed delay in between, and stop once
//! the attempt budget is used up.

use std::time::Duration;

use async_trait::async_trait;
use cohort_core::domain::result::ResultRecord;
use cohort_core::domain::task::Task;
use tracing::{debug, info, warn};

use crate::BrokerClient;
use crate::error::{ClientError, Result};

/// Anything a result record can be fetched from
#[async_trait]
pub trait ResultSource: Send + Sync {
    async fn fetch_result(&self, result_id: u64) -> Result<ResultRecord>;
}

#[async_trait]
impl ResultSource for BrokerClient {
    async fn fetch_result(&self, result_id: u64) -> Result<ResultRecord> {
        self.get_result(result_id).await
    }
}

/// How a poll ended
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// The record reported a completion timestamp
    Finished(ResultRecord),
    /// The attempt budget ran out; `last` is the last record fetched and is
    /// still pending
    Pending { last: ResultRecord, attempts: u32 },
}

impl PollOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, PollOutcome::Finished(_))
    }

    /// The last fetched record, finished or not
    pub fn record(&self) -> &ResultRecord {
        match self {
            PollOutcome::Finished(record) => record,
            PollOutcome::Pending { last, .. } => last,
        }
    }

    /// The finished record, if there is one
    pub fn finished(self) -> Option<ResultRecord> {
        match self {
            PollOutcome::Finished(record) => Some(record),
            PollOutcome::Pending { .. } => None,
        }
    }
}

/// Poll the first result of `task` until it finishes or `max_attempts` fetches
/// have been made
///
/// Waits `delay` between fetches, never after the last one. Fetch errors are
/// returned as-is without retrying.
///
/// # Errors
/// Returns `ClientError::InvalidRequest` without fetching when the task has
/// no result references or `max_attempts` is zero.
pub async fn await_result<S>(
    source: &S,
    task: &Task,
    max_attempts: u32,
    delay: Duration,
) -> Result<PollOutcome>
where
    S: ResultSource + ?Sized,
{
    let result_ref = task.first_result().ok_or_else(|| {
        ClientError::InvalidRequest(format!("task {} has no result references", task.id))
    })?;

    if max_attempts == 0 {
        return Err(ClientError::InvalidRequest(
            "max_attempts must be at least 1".to_string(),
        ));
    }

    let mut attempts = 0;

    loop {
        attempts += 1;
        let record = source.fetch_result(result_ref.id).await?;
        debug!(
            "Fetched result {} (attempt {}/{}): {}",
            record.id,
            attempts,
            max_attempts,
            if record.is_finished() { "finished" } else { "pending" }
        );

        if record.is_finished() {
            info!(
                "Result {} of task {} finished after {} attempt(s)",
                record.id, task.id, attempts
            );
            return Ok(PollOutcome::Finished(record));
        }

        if attempts >= max_attempts {
            warn!(
                "Result {} of task {} still pending after {} attempt(s)",
                record.id, task.id, attempts
            );
            return Ok(PollOutcome::Pending {
                last: record,
                attempts,
            });
        }

        tokio::time::sleep(delay).await;
    }
}

impl BrokerClient {
    /// Poll the first result of `task`, see [`await_result`]
    pub async fn await_result(
        &self,
        task: &Task,
        max_attempts: u32,
        delay: Duration,
    ) -> Result<PollOutcome> {
        await_result(self, task, max_attempts, delay).await
    }

    /// Look a task up by ID and poll its first result
    pub async fn await_task_results(
        &self,
        task_id: u64,
        max_attempts: u32,
        delay: Duration,
    ) -> Result<PollOutcome> {
        let task = self.get_task(task_id).await?;
        await_result(self, &task, max_attempts, delay).await
    }
}
