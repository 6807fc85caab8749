//! Result-related API endpoints

use cohort_core::domain::result::ResultRecord;
use cohort_core::dto::page::Page;

use crate::BrokerClient;
use crate::error::Result;

impl BrokerClient {
    // =============================================================================
    // Result Records
    // =============================================================================

    /// Get a single result record by ID
    ///
    /// # Arguments
    /// * `result_id` - The result ID, taken from a task's result references
    pub async fn get_result(&self, result_id: u64) -> Result<ResultRecord> {
        let url = format!("{}/result/{}", self.base_url, result_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List every result record belonging to a task
    ///
    /// # Arguments
    /// * `task_id` - The task ID
    pub async fn results_from_task(&self, task_id: u64) -> Result<Vec<ResultRecord>> {
        let url = format!("{}/result", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("task_id", task_id)])
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        let page: Page<ResultRecord> = self.handle_response(response).await?;
        Ok(page.into_items())
    }
}
