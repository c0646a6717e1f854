//! Disease detail and search page aggregation.
//!
//! The primary record is required. Hierarchy, keywords and search terms are
//! enrichments: each one that fails is recorded as a warning and the page
//! still renders from the data that did arrive.

use dsf_client::ApiError;
use dsf_model::{DiseaseCustomKeyword, DiseaseHierarchy, DiseaseRecord, NewKeyword};

use crate::backend::DiseaseSource;

/// An enrichment request that failed while the primary fetch succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialFailure {
    /// Which part is missing, e.g. `"hierarchy"`.
    pub part: &'static str,
    pub message: String,
}

impl PartialFailure {
    fn new(part: &'static str, err: &ApiError) -> Self {
        tracing::warn!("Failed to load {part}: {err}");
        Self {
            part,
            message: err.user_message().to_string(),
        }
    }
}

/// Everything shown on a disease detail page.
#[derive(Debug, Clone)]
pub struct DiseaseDetail {
    pub disease: DiseaseRecord,
    pub hierarchy: Option<DiseaseHierarchy>,
    pub keywords: Vec<DiseaseCustomKeyword>,
    pub warnings: Vec<PartialFailure>,
}

impl DiseaseDetail {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Re-fetch the keyword list, replacing any previous keyword warning.
    pub async fn refresh_keywords<S: DiseaseSource>(&mut self, source: &S) {
        self.warnings.retain(|w| w.part != KEYWORDS);
        match source.list_keywords(&self.disease.id).await {
            Ok(keywords) => self.keywords = keywords,
            Err(err) => self.warnings.push(PartialFailure::new(KEYWORDS, &err)),
        }
    }

    /// Add a keyword and refresh the list.
    pub async fn add_keyword<S: DiseaseSource>(
        &mut self,
        source: &S,
        keyword: &NewKeyword,
    ) -> Result<DiseaseCustomKeyword, ApiError> {
        let added = source.add_keyword(&self.disease.id, keyword).await?;
        tracing::info!("Added keyword '{}' to {}", added.keyword, self.disease.id);
        self.refresh_keywords(source).await;
        Ok(added)
    }

    /// Delete a keyword and refresh the list.
    pub async fn delete_keyword<S: DiseaseSource>(
        &mut self,
        source: &S,
        keyword_id: i64,
    ) -> Result<(), ApiError> {
        source.delete_keyword(keyword_id).await?;
        tracing::info!("Deleted keyword {} from {}", keyword_id, self.disease.id);
        self.refresh_keywords(source).await;
        Ok(())
    }
}

const HIERARCHY: &str = "hierarchy";
const KEYWORDS: &str = "keywords";
const SEARCH_TERMS: &str = "search terms";

/// Load a disease with its hierarchy and custom keywords.
pub async fn load_disease_detail<S: DiseaseSource>(
    source: &S,
    disease_id: &str,
) -> Result<DiseaseDetail, ApiError> {
    let disease = source.get_disease(disease_id).await?;
    let mut warnings = Vec::new();

    let hierarchy = match source.get_hierarchy(disease_id).await {
        Ok(hierarchy) => Some(hierarchy),
        Err(err) => {
            warnings.push(PartialFailure::new(HIERARCHY, &err));
            None
        }
    };

    let keywords = match source.list_keywords(disease_id).await {
        Ok(keywords) => keywords,
        Err(err) => {
            warnings.push(PartialFailure::new(KEYWORDS, &err));
            Vec::new()
        }
    };

    Ok(DiseaseDetail {
        disease,
        hierarchy,
        keywords,
        warnings,
    })
}

/// A disease with the terms the organization search would use.
#[derive(Debug, Clone)]
pub struct SearchOverview {
    pub disease: DiseaseRecord,
    pub search_terms: Vec<String>,
    pub warnings: Vec<PartialFailure>,
}

/// Load the data shown before running an organization search.
pub async fn load_search_overview<S: DiseaseSource>(
    source: &S,
    disease_id: &str,
) -> Result<SearchOverview, ApiError> {
    let disease = source.get_disease(disease_id).await?;
    let mut warnings = Vec::new();

    let search_terms = match source.search_terms(disease_id).await {
        Ok(terms) => terms.search_terms,
        Err(err) => {
            warnings.push(PartialFailure::new(SEARCH_TERMS, &err));
            Vec::new()
        }
    };

    Ok(SearchOverview {
        disease,
        search_terms,
        warnings,
    })
}
