//! NANDO import and comprehensive search endpoints (`/nando`).

use dsf_model::{MessageAck, NandoHierarchy, NandoImportOutcome};
use reqwest::Method;

use crate::client::{ApiClient, UploadFile};
use crate::error::{ApiError, Result};

impl ApiClient {
    /// Uploads a NANDO taxonomy spreadsheet.
    ///
    /// A response with `status: "error"` is returned as
    /// [`ApiError::ImportRejected`].
    pub async fn import_nando(&self, file: UploadFile) -> Result<NandoImportOutcome> {
        let outcome = self
            .upload(self.endpoint(&["nando", "import"])?, file)
            .await?;
        accept_outcome(outcome)
    }

    /// Uploads a spreadsheet of custom (non-NANDO) diseases.
    pub async fn import_custom_diseases(&self, file: UploadFile) -> Result<NandoImportOutcome> {
        let outcome = self
            .upload(self.endpoint(&["nando", "import", "custom"])?, file)
            .await?;
        accept_outcome(outcome)
    }

    /// Fetches child diseases grouped by parent NANDO id.
    pub async fn nando_hierarchy(&self) -> Result<NandoHierarchy> {
        self.get_json(self.endpoint(&["nando", "hierarchy"])?).await
    }

    /// Starts the backend's search over every searchable disease.
    ///
    /// The job runs in the background; the acknowledgement only confirms it
    /// was scheduled.
    pub async fn run_comprehensive_search(&self) -> Result<MessageAck> {
        let ack: MessageAck = self
            .send_json::<(), _>(
                Method::POST,
                self.endpoint(&["nando", "search", "comprehensive"])?,
                None,
            )
            .await?;
        tracing::info!("Comprehensive search scheduled: {}", ack.message);
        Ok(ack)
    }
}

fn accept_outcome(outcome: NandoImportOutcome) -> Result<NandoImportOutcome> {
    if outcome.is_success() {
        tracing::info!(
            "NANDO import finished: {} imported, {} skipped",
            outcome.imported,
            outcome.skipped.unwrap_or(0)
        );
        Ok(outcome)
    } else {
        Err(ApiError::ImportRejected(outcome.message))
    }
}

#[cfg(test)]
mod tests {
    use dsf_model::ImportStatus;

    use super::*;

    #[test]
    fn test_accept_outcome_rejects_error_status() {
        let outcome = NandoImportOutcome {
            status: ImportStatus::Error,
            message: "missing columns".to_string(),
            imported: 0,
            skipped: None,
            errors: None,
        };
        match accept_outcome(outcome) {
            Err(ApiError::ImportRejected(message)) => assert_eq!(message, "missing columns"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
