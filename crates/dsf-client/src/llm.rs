//! Extraction model diagnostics (`/llm`).

use dsf_model::{ExtractionRequest, ExtractionResult, LlmHealth, LlmModels};
use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// Asks the backend whether its extraction model is reachable.
    pub async fn llm_health(&self) -> Result<LlmHealth> {
        self.get_json(self.endpoint(&["llm", "health"])?).await
    }

    /// Lists the models the backend's provider can serve.
    pub async fn llm_models(&self) -> Result<Vec<String>> {
        let models: LlmModels = self.get_json(self.endpoint(&["llm", "models"])?).await?;
        Ok(models.models)
    }

    /// Runs organization extraction on a piece of text.
    ///
    /// A model failure surfaces as a 500 whose `detail` carries the backend
    /// message.
    pub async fn test_extraction(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        tracing::info!("Test extraction for {}", request.disease_name);
        let result: ExtractionResult = self
            .send_json(
                Method::POST,
                self.endpoint(&["llm", "test-extraction"])?,
                Some(request),
            )
            .await?;
        tracing::debug!(
            "Extraction returned {} organizations",
            result.organizations.len()
        );
        Ok(result)
    }
}
