//! Organization search settings and results.

use serde::{Deserialize, Serialize};

use crate::organization::Organization;

/// Options forwarded to the backend search pipeline.
///
/// The client does not interpret these; they are sent as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSettings {
    /// Fuzzy matching of search terms.
    pub enable_approximate_match: bool,
    /// Two-pass verification of extracted organizations.
    pub enable_two_stage_verification: bool,
    /// Require a human decision before an organization is marked verified.
    pub require_human_verification: bool,
    /// Token budget for the extraction model.
    pub max_tokens: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            enable_approximate_match: true,
            enable_two_stage_verification: true,
            require_human_verification: false,
            max_tokens: 4000,
        }
    }
}

/// Response of `POST /search/disease/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub disease_id: Option<String>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// Response of `GET /search/terms/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerms {
    #[serde(default)]
    pub disease_id: Option<String>,
    #[serde(default)]
    pub search_terms: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_wire_names() {
        let body = serde_json::to_value(SearchSettings::default()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "enableApproximateMatch": true,
                "enableTwoStageVerification": true,
                "requireHumanVerification": false,
                "maxTokens": 4000
            })
        );
    }

    #[test]
    fn test_result_without_organizations() {
        let result: SearchResult = serde_json::from_str(r#"{"disease_id": "d1"}"#).unwrap();
        assert!(result.organizations.is_empty());
        assert_eq!(result.disease_id.as_deref(), Some("d1"));
    }
}
