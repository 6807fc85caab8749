//! Task-related API endpoints

use cohort_core::domain::task::Task;
use cohort_core::dto::task::{CreateTask, OrganizationInput, TaskRequest};
use tracing::info;

use crate::BrokerClient;
use crate::error::{ClientError, Result};

impl BrokerClient {
    // =============================================================================
    // Task Submission
    // =============================================================================

    /// Submit a task to the organizations of a collaboration
    ///
    /// The input is serialized to JSON and encoded separately for every
    /// target organization.
    ///
    /// # Returns
    /// The task handle, carrying one result reference per organization
    ///
    /// # Example
    /// ```no_run
    /// # use cohort_client::BrokerClient;
    /// # use cohort_core::dto::task::{CreateTask, DatabaseRef, TaskInput};
    /// # async fn example(client: &BrokerClient) -> anyhow::Result<()> {
    /// let input = TaskInput::new("master")
    ///     .kwarg("time_column_name", "Survival.time")
    ///     .kwarg("censor_column_name", "deadstatus.event");
    ///
    /// let task = client.create_task(CreateTask {
    ///     name: "Kaplan-Meier Task".to_string(),
    ///     image: "ghcr.io/mdw-nl/v6-km-studyathon:v0.0.16".to_string(),
    ///     collaboration_id: 1,
    ///     organization_ids: vec![2, 3, 4],
    ///     input,
    ///     description: Some("Survival analysis using Kaplan-Meier".to_string()),
    ///     databases: vec![DatabaseRef::default()],
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_task(&self, req: CreateTask) -> Result<Task> {
        if req.organization_ids.is_empty() {
            return Err(ClientError::InvalidRequest(
                "a task needs at least one organization".to_string(),
            ));
        }

        let serialized = serde_json::to_vec(&req.input).map_err(|e| {
            ClientError::InvalidRequest(format!("Failed to serialize task input: {}", e))
        })?;

        let organizations = req
            .organization_ids
            .iter()
            .map(|&id| -> Result<OrganizationInput> {
                Ok(OrganizationInput {
                    id,
                    input: self.cryptor.encrypt(&serialized)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let body = TaskRequest {
            name: req.name,
            image: req.image,
            collaboration_id: req.collaboration_id,
            description: req.description.unwrap_or_default(),
            organizations,
            databases: req.databases,
        };

        let url = format!("{}/task", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.bearer()?)
            .json(&body)
            .send()
            .await?;

        let task: Task = self.handle_response(response).await?;
        info!(
            "Created task {} ({} result record(s))",
            task.id,
            task.results.items().len()
        );
        Ok(task)
    }

    /// Get a task by ID
    ///
    /// # Arguments
    /// * `task_id` - The task ID
    pub async fn get_task(&self, task_id: u64) -> Result<Task> {
        let url = format!("{}/task/{}", self.base_url, task_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_core::dto::task::{DatabaseRef, TaskInput};
    use mockito::Matcher;
    use serde_json::json;

    fn km_request() -> CreateTask {
        CreateTask {
            name: "Kaplan-Meier Task".to_string(),
            image: "ghcr.io/mdw-nl/v6-km-studyathon:v0.0.16".to_string(),
            collaboration_id: 1,
            organization_ids: vec![2, 3],
            input: TaskInput::new("master").master(true),
            description: None,
            databases: vec![DatabaseRef::default()],
        }
    }

    #[tokio::test]
    async fn test_create_task_encodes_input_per_organization() {
        // base64 of {"method":"master","kwargs":{},"args":[],"master":true}
        let encoded = "eyJtZXRob2QiOiJtYXN0ZXIiLCJrd2FyZ3MiOnt9LCJhcmdzIjpbXSwibWFzdGVyIjp0cnVlfQ==";

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/task")
            .match_header("authorization", "Bearer abc")
            .match_body(Matcher::Json(json!({
                "name": "Kaplan-Meier Task",
                "image": "ghcr.io/mdw-nl/v6-km-studyathon:v0.0.16",
                "collaboration_id": 1,
                "description": "",
                "organizations": [
                    {"id": 2, "input": encoded},
                    {"id": 3, "input": encoded}
                ],
                "databases": [{"label": "default"}]
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 12, "results": [{"id": 40}, {"id": 41}]}"#)
            .create_async()
            .await;

        let mut client = BrokerClient::new(format!("{}/api", server.url()));
        client.token = Some("abc".to_string());

        let task = client.create_task(km_request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(task.id, 12);
        assert_eq!(task.first_result().map(|r| r.id), Some(40));
    }

    #[tokio::test]
    async fn test_create_task_without_organizations() {
        let mut client = BrokerClient::new("http://localhost:5000/api");
        client.token = Some("abc".to_string());

        let mut req = km_request();
        req.organization_ids.clear();

        let err = client.create_task(req).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_get_task() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/task/12")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 12, "name": "Kaplan-Meier Task", "results": [{"id": 40}]}"#)
            .create_async()
            .await;

        let mut client = BrokerClient::new(format!("{}/api", server.url()));
        client.token = Some("abc".to_string());

        let task = client.get_task(12).await.unwrap();
        assert_eq!(task.name.as_deref(), Some("Kaplan-Meier Task"));
    }
}
