//! Organization search and verification endpoints.

use dsf_model::{MessageAck, SearchResult, SearchSettings, SearchTerms, VerificationRequest};
use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Runs the organization search for one disease.
    pub async fn search_disease(
        &self,
        disease_id: &str,
        settings: &SearchSettings,
    ) -> Result<SearchResult> {
        tracing::info!("Searching organizations for {}", disease_id);
        let result: SearchResult = self
            .send_json(
                Method::POST,
                self.endpoint(&["search", "disease", disease_id])?,
                Some(settings),
            )
            .await?;
        tracing::info!(
            "Search for {} returned {} organizations",
            disease_id,
            result.organizations.len()
        );
        Ok(result)
    }

    /// Fetches the terms the backend would search for a disease.
    pub async fn search_terms(&self, disease_id: &str) -> Result<SearchTerms> {
        self.get_json(self.endpoint(&["search", "terms", disease_id])?)
            .await
    }

    /// Records a human verification decision for an organization.
    pub async fn verify_organization(
        &self,
        organization_id: &str,
        request: &VerificationRequest,
    ) -> Result<MessageAck> {
        self.send_json(
            Method::POST,
            self.endpoint(&["verification", "verify", organization_id])?,
            Some(request),
        )
        .await
    }
}
