//! Diagnostics for the backend's extraction model (`/llm`).

use serde::{Deserialize, Serialize};

use crate::organization::OrganizationType;

/// Reachability of the extraction model as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmHealthStatus {
    Healthy,
    Unhealthy,
    #[serde(other)]
    Unknown,
}

/// Body of `GET /llm/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmHealth {
    pub status: LlmHealthStatus,
}

impl LlmHealth {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == LlmHealthStatus::Healthy
    }
}

/// Body of `GET /llm/models`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmModels {
    #[serde(default)]
    pub models: Vec<String>,
}

/// Body of `POST /llm/test-extraction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub text: String,
    pub disease_name: String,
}

impl ExtractionRequest {
    pub fn new(text: impl Into<String>, disease_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            disease_name: disease_name.into(),
        }
    }
}

/// Organization candidate pulled out of free text by the model.
///
/// The model output is loosely structured, so every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedOrganization {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default, rename = "type")]
    pub organization_type: Option<OrganizationType>,
}

/// Result of a test extraction. The backend answers with an empty list when
/// the model reply could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default)]
    pub organizations: Vec<ExtractedOrganization>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status() {
        let health: LlmHealth = serde_json::from_str(r#"{"status": "healthy"}"#).unwrap();
        assert!(health.is_healthy());

        let health: LlmHealth = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();
        assert_eq!(health.status, LlmHealthStatus::Unknown);
        assert!(!health.is_healthy());
    }

    #[test]
    fn test_extraction_result_tolerates_sparse_entries() {
        let json = r#"{"organizations": [
            {"name": "日本ALS協会", "url": "https://alsjapan.org", "type": "patient"},
            {"description": "no name given", "type": "patient/family/support"}
        ]}"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.organizations.len(), 2);
        assert_eq!(
            result.organizations[0].organization_type,
            Some(OrganizationType::Patient)
        );
        assert!(result.organizations[1].name.is_empty());
        assert_eq!(
            result.organizations[1].organization_type,
            Some(OrganizationType::Other)
        );
    }

    #[test]
    fn test_extraction_request_body() {
        let body = serde_json::to_value(ExtractionRequest::new("text", "ALS")).unwrap();
        assert_eq!(body, serde_json::json!({"text": "text", "disease_name": "ALS"}));
    }
}
