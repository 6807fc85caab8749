//! Node-related API endpoints

use cohort_core::domain::node::Node;
use cohort_core::dto::page::Page;
use serde_json::Value;

use crate::BrokerClient;
use crate::error::Result;

impl BrokerClient {
    /// List the nodes visible to the authenticated user
    pub async fn list_nodes(&self) -> Result<Vec<Node>> {
        let url = format!("{}/node", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        let page: Page<Node> = self.handle_response(response).await?;
        Ok(page.into_items())
    }

    /// List nodes as the broker sent them, for verbatim JSON output
    pub async fn list_nodes_raw(&self) -> Result<Vec<Value>> {
        let url = format!("{}/node", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        let page: Page<Value> = self.handle_response(response).await?;
        Ok(page.into_items())
    }
}
