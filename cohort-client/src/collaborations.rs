//! Collaboration-related API endpoints

use cohort_core::domain::collaboration::{Collaboration, Organization};
use cohort_core::dto::page::Page;
use serde_json::Value;

use crate::BrokerClient;
use crate::error::Result;

impl BrokerClient {
    // =============================================================================
    // Collaborations
    // =============================================================================

    /// List the collaborations visible to the authenticated user
    ///
    /// # Returns
    /// A list of collaborations, in the order the broker returns them
    pub async fn list_collaborations(&self) -> Result<Vec<Collaboration>> {
        let url = format!("{}/collaboration", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        let page: Page<Collaboration> = self.handle_response(response).await?;
        Ok(page.into_items())
    }

    /// List collaborations as the broker sent them, for verbatim JSON output
    pub async fn list_collaborations_raw(&self) -> Result<Vec<Value>> {
        let url = format!("{}/collaboration", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        let page: Page<Value> = self.handle_response(response).await?;
        Ok(page.into_items())
    }

    /// Get a collaboration by ID
    ///
    /// # Arguments
    /// * `collaboration_id` - The collaboration ID
    pub async fn get_collaboration(&self, collaboration_id: u64) -> Result<Collaboration> {
        let url = format!("{}/collaboration/{}", self.base_url, collaboration_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List the organizations taking part in a collaboration
    ///
    /// # Arguments
    /// * `collaboration_id` - The collaboration ID
    pub async fn list_organizations(&self, collaboration_id: u64) -> Result<Vec<Organization>> {
        let url = format!("{}/organization", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("collaboration_id", collaboration_id)])
            .bearer_auth(self.bearer()?)
            .send()
            .await?;

        let page: Page<Organization> = self.handle_response(response).await?;
        Ok(page.into_items())
    }

    /// Organization IDs of a collaboration
    ///
    /// Uses the embedded organization list when the broker sent one and asks
    /// the organization endpoint otherwise.
    pub async fn organization_ids(&self, collaboration: &Collaboration) -> Result<Vec<u64>> {
        if !collaboration.organizations.is_empty() {
            return Ok(collaboration.organization_ids());
        }

        let organizations = self.list_organizations(collaboration.id).await?;
        Ok(organizations.iter().map(|org| org.id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;

    fn authenticated(server: &mockito::Server) -> BrokerClient {
        let mut client = BrokerClient::new(format!("{}/api", server.url()));
        client.token = Some("abc".to_string());
        client
    }

    #[tokio::test]
    async fn test_list_collaborations_sends_bearer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/collaboration")
            .match_header("authorization", "Bearer abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id": 1, "name": "studyathon", "encrypted": false,
                     "organizations": [{"id": 2}, {"id": 3}, {"id": 4}]}]"#,
            )
            .create_async()
            .await;

        let collaborations = authenticated(&server).list_collaborations().await.unwrap();

        mock.assert_async().await;
        assert_eq!(collaborations.len(), 1);
        assert_eq!(collaborations[0].organization_ids(), vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_list_collaborations_paginated() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/collaboration")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"id": 5, "name": "km"}], "links": {}}"#)
            .create_async()
            .await;

        let collaborations = authenticated(&server).list_collaborations().await.unwrap();
        assert_eq!(collaborations[0].id, 5);
    }

    #[tokio::test]
    async fn test_get_collaboration_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/collaboration/9")
            .with_status(404)
            .with_body(r#"{"msg": "collaboration id=9 is not found"}"#)
            .create_async()
            .await;

        let err = authenticated(&server).get_collaboration(9).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(ref body) if body.contains("id=9")));
        assert!(err.is_not_found());
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_list_collaborations_raw_keeps_fields_as_sent() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/collaboration")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": [{"id": 4, "name": "km",
                     "organizations": "/api/organization?collaboration_id=4"}]}"#,
            )
            .create_async()
            .await;

        let raw = authenticated(&server)
            .list_collaborations_raw()
            .await
            .unwrap();

        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0]["organizations"], "/api/organization?collaboration_id=4");
        assert!(raw[0].get("encrypted").is_none());
    }

    #[tokio::test]
    async fn test_organization_ids_embedded() {
        let server = mockito::Server::new_async().await;
        let collaboration: Collaboration = serde_json::from_str(
            r#"{"id": 1, "name": "studyathon", "organizations": [{"id": 2}, {"id": 3}]}"#,
        )
        .unwrap();

        let ids = authenticated(&server)
            .organization_ids(&collaboration)
            .await
            .unwrap();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_organization_ids_from_link() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/organization")
            .match_query(mockito::Matcher::UrlEncoded(
                "collaboration_id".into(),
                "4".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": [{"id": 7, "name": "fysio"}, {"id": 8, "name": "ortho"}]}"#)
            .create_async()
            .await;

        let collaboration: Collaboration = serde_json::from_str(
            r#"{"id": 4, "name": "km", "organizations": "/api/organization?collaboration_id=4"}"#,
        )
        .unwrap();

        let ids = authenticated(&server)
            .organization_ids(&collaboration)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(ids, vec![7, 8]);
    }

    #[tokio::test]
    async fn test_requires_authentication() {
        let client = BrokerClient::new("http://localhost:5000/api");
        let err = client.list_collaborations().await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }
}
