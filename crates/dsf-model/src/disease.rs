//! Disease resources.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::nando::nando_id_in_group;

/// A disease as served by `GET /diseases`.
///
/// Only `is_searchable` is editable from the client. Every other field is
/// display data and is never changed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    /// Stable external identifier (primary key).
    pub id: String,

    /// Display name (Japanese).
    pub name: String,

    /// NANDO classification id, e.g. `NANDO:1200002`.
    #[serde(default)]
    pub nando_id: Option<String>,

    /// Whether the organization search pipeline includes this disease.
    /// Missing in a payload means `false`.
    #[serde(default)]
    pub is_searchable: bool,

    /// Name in kana.
    #[serde(default)]
    pub name_kana: Option<String>,

    /// English name.
    #[serde(default)]
    pub name_en: Option<String>,

    /// Free-text overview.
    #[serde(default)]
    pub overview: Option<String>,

    /// Free-text characteristics.
    #[serde(default)]
    pub characteristics: Option<String>,

    /// Estimated patient count.
    #[serde(default)]
    pub patient_count: Option<u64>,

    /// Keywords the backend generated for searching.
    #[serde(default)]
    pub search_keywords: Option<Vec<String>>,

    /// Classification type reported by the NANDO import.
    #[serde(default)]
    pub disease_type: Option<String>,

    /// NANDO id of the parent disease.
    #[serde(default)]
    pub parent_disease_id: Option<String>,

    /// Designated intractable disease.
    #[serde(default)]
    pub is_designated_intractable: bool,

    /// Chronic childhood disease.
    #[serde(default)]
    pub is_chronic_childhood: bool,

    /// Creation timestamp as sent by the server.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update timestamp as sent by the server.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl DiseaseRecord {
    /// Creates a record with only the fields the workspace cares about.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nando_id: None,
            is_searchable: false,
            name_kana: None,
            name_en: None,
            overview: None,
            characteristics: None,
            patient_count: None,
            search_keywords: None,
            disease_type: None,
            parent_disease_id: None,
            is_designated_intractable: false,
            is_chronic_childhood: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the NANDO id.
    #[must_use]
    pub fn with_nando_id(mut self, nando_id: impl Into<String>) -> Self {
        self.nando_id = Some(nando_id.into());
        self
    }

    /// Sets the searchable flag.
    #[must_use]
    pub fn with_searchable(mut self, is_searchable: bool) -> Self {
        self.is_searchable = is_searchable;
        self
    }

    /// Sets the English name.
    #[must_use]
    pub fn with_name_en(mut self, name_en: impl Into<String>) -> Self {
        self.name_en = Some(name_en.into());
        self
    }

    /// Whether this disease belongs to a NANDO group (see [`nando_id_in_group`]).
    #[must_use]
    pub fn in_group(&self, group: &str) -> bool {
        self.nando_id
            .as_deref()
            .is_some_and(|id| nando_id_in_group(id, group))
    }

    /// Case-insensitive substring match on name, NANDO id and English name.
    ///
    /// `needle_lower` must already be lowercase. An empty needle matches
    /// every record.
    #[must_use]
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        if needle_lower.is_empty() {
            return true;
        }
        let contains = |value: &str| value.to_lowercase().contains(needle_lower);
        contains(&self.name)
            || self.nando_id.as_deref().is_some_and(contains)
            || self.name_en.as_deref().is_some_and(contains)
    }

    /// Broader match used by the disease catalog listing.
    ///
    /// Adds the kana reading and the generated search keywords to the fields
    /// checked by [`DiseaseRecord::matches_lowercase`].
    #[must_use]
    pub fn matches_catalog_lowercase(&self, needle_lower: &str) -> bool {
        if self.matches_lowercase(needle_lower) {
            return true;
        }
        let contains = |value: &str| value.to_lowercase().contains(needle_lower);
        self.name_kana.as_deref().is_some_and(contains)
            || self
                .search_keywords
                .as_deref()
                .is_some_and(|keywords| keywords.iter().any(|k| contains(k)))
    }
}

/// Minimal disease reference used in hierarchy responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub nando_id: Option<String>,
}

/// Response of `GET /diseases/{id}/hierarchy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseHierarchy {
    /// The disease the hierarchy was requested for.
    pub disease: DiseaseSummary,

    /// Parent disease, absent for roots.
    #[serde(default)]
    pub parent: Option<DiseaseSummary>,

    /// Direct children.
    #[serde(default)]
    pub children: Vec<DiseaseSummary>,
}

/// Response of `GET /diseases/hierarchy/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyStats {
    pub total_diseases: u64,
    pub searchable_diseases: u64,
    #[serde(default)]
    pub excluded_categories: Vec<String>,
    /// Preformatted percentage, e.g. `"42.0%"`.
    #[serde(default)]
    pub reduction_rate: Option<String>,
    #[serde(default)]
    pub subtypes_count: u64,
    #[serde(default)]
    pub subtypes_patterns: u64,
}

/// Response of `GET /nando/hierarchy`: child diseases keyed by parent NANDO id.
pub type NandoHierarchy = BTreeMap<String, Vec<DiseaseRecord>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_payload_defaults() {
        let record: DiseaseRecord =
            serde_json::from_str(r#"{"id": "d1", "name": "Fabry"}"#).unwrap();
        assert_eq!(record.id, "d1");
        assert!(!record.is_searchable);
        assert!(record.nando_id.is_none());
        assert!(!record.is_designated_intractable);
    }

    #[test]
    fn test_full_payload() {
        let json = r#"{
            "id": "d2",
            "name": "ファブリー病",
            "name_kana": "ふぁぶりーびょう",
            "name_en": "Fabry disease",
            "nando_id": "NANDO:1200002",
            "is_searchable": true,
            "patient_count": 1200,
            "search_keywords": ["fabry", "GLA"],
            "is_designated_intractable": true,
            "is_chronic_childhood": false,
            "created_at": "2024-05-01T10:00:00"
        }"#;
        let record: DiseaseRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_searchable);
        assert_eq!(record.patient_count, Some(1200));
        assert_eq!(record.search_keywords.as_deref().map(<[String]>::len), Some(2));
        assert_eq!(record.created_at.as_deref(), Some("2024-05-01T10:00:00"));
    }

    #[test]
    fn test_matches_lowercase() {
        let record = DiseaseRecord::new("d1", "ファブリー病")
            .with_nando_id("NANDO:1200002")
            .with_name_en("Fabry Disease");

        assert!(record.matches_lowercase(""));
        assert!(record.matches_lowercase("fabry"));
        assert!(record.matches_lowercase("nando:12"));
        assert!(record.matches_lowercase("ファブリー"));
        assert!(!record.matches_lowercase("gaucher"));
    }

    #[test]
    fn test_catalog_match_includes_kana_and_keywords() {
        let mut record = DiseaseRecord::new("d1", "ファブリー病");
        record.name_kana = Some("ふぁぶりーびょう".to_string());
        record.search_keywords = Some(vec!["GLA".to_string(), "alpha-galactosidase".to_string()]);

        assert!(!record.matches_lowercase("ふぁぶりー"));
        assert!(record.matches_catalog_lowercase("ふぁぶりー"));
        assert!(!record.matches_lowercase("gla"));
        assert!(record.matches_catalog_lowercase("gla"));
        assert!(record.matches_catalog_lowercase("galactosidase"));
        assert!(!record.matches_catalog_lowercase("gaucher"));
    }

    #[test]
    fn test_in_group_without_nando_id() {
        let record = DiseaseRecord::new("d1", "x");
        assert!(!record.in_group("1"));
        assert!(!record.in_group(""));
    }

    #[test]
    fn test_hierarchy_children_default() {
        let json = r#"{"disease": {"id": "d1", "name": "x", "nando_id": null}, "parent": null}"#;
        let hierarchy: DiseaseHierarchy = serde_json::from_str(json).unwrap();
        assert!(hierarchy.parent.is_none());
        assert!(hierarchy.children.is_empty());
    }

    #[test]
    fn test_hierarchy_stats() {
        let json = r#"{
            "total_diseases": 100,
            "searchable_diseases": 60,
            "excluded_categories": ["遺伝検査用疾患群"],
            "reduction_rate": "40.0%",
            "subtypes_count": 12,
            "subtypes_patterns": 5
        }"#;
        let stats: HierarchyStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_diseases, 100);
        assert_eq!(stats.reduction_rate.as_deref(), Some("40.0%"));
    }
}
