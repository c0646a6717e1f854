//! Detail and search page loaders with failing enrichments.

use std::future::{Future, ready};
use std::sync::Mutex;

use dsf_client::ApiError;
use dsf_model::{
    DiseaseCustomKeyword, DiseaseHierarchy, DiseaseRecord, DiseaseSummary, KeywordType,
    MessageAck, NewKeyword, SearchTerms,
};
use dsf_workspace::{DiseaseSource, load_disease_detail, load_search_overview};

struct FakeSource {
    hierarchy_fails: bool,
    terms_fail: bool,
    keywords: Mutex<Vec<DiseaseCustomKeyword>>,
}

impl FakeSource {
    fn healthy() -> Self {
        Self {
            hierarchy_fails: false,
            terms_fail: false,
            keywords: Mutex::new(vec![keyword(1, "tremor")]),
        }
    }
}

fn keyword(id: i64, text: &str) -> DiseaseCustomKeyword {
    DiseaseCustomKeyword {
        id,
        disease_id: "d1".into(),
        keyword: text.into(),
        keyword_type: Some("symptom".into()),
        added_by: Some("manual".into()),
        created_at: None,
    }
}

fn summary(id: &str) -> DiseaseSummary {
    DiseaseSummary {
        id: id.into(),
        name: id.to_uppercase(),
        nando_id: None,
    }
}

impl DiseaseSource for FakeSource {
    fn get_disease(
        &self,
        disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<DiseaseRecord>> + Send {
        let result = if disease_id == "d1" {
            Ok(DiseaseRecord::new("d1", "Fabry"))
        } else {
            Err(ApiError::NotFound("Disease not found".into()))
        };
        ready(result)
    }

    fn get_hierarchy(
        &self,
        disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<DiseaseHierarchy>> + Send {
        let result = if self.hierarchy_fails {
            Err(ApiError::Status {
                status: 500,
                detail: "hierarchy unavailable".into(),
            })
        } else {
            Ok(DiseaseHierarchy {
                disease: summary(disease_id),
                parent: Some(summary("root")),
                children: Vec::new(),
            })
        };
        ready(result)
    }

    fn list_keywords(
        &self,
        _disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<Vec<DiseaseCustomKeyword>>> + Send {
        ready(Ok(self.keywords.lock().unwrap().clone()))
    }

    fn add_keyword(
        &self,
        _disease_id: &str,
        new: &NewKeyword,
    ) -> impl Future<Output = dsf_client::Result<DiseaseCustomKeyword>> + Send {
        let mut keywords = self.keywords.lock().unwrap();
        let added = keyword(keywords.len() as i64 + 1, &new.keyword);
        keywords.push(added.clone());
        ready(Ok(added))
    }

    fn delete_keyword(
        &self,
        keyword_id: i64,
    ) -> impl Future<Output = dsf_client::Result<MessageAck>> + Send {
        self.keywords.lock().unwrap().retain(|k| k.id != keyword_id);
        ready(Ok(MessageAck::default()))
    }

    fn search_terms(
        &self,
        disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<SearchTerms>> + Send {
        let result = if self.terms_fail {
            Err(ApiError::Network("timed out".into()))
        } else {
            Ok(SearchTerms {
                disease_id: Some(disease_id.into()),
                search_terms: vec!["Fabry".into(), "ファブリー病".into()],
            })
        };
        ready(result)
    }
}

#[tokio::test]
async fn test_detail_with_all_parts() {
    let detail = load_disease_detail(&FakeSource::healthy(), "d1").await.unwrap();

    assert!(detail.is_complete());
    assert_eq!(detail.disease.name, "Fabry");
    assert_eq!(detail.hierarchy.unwrap().parent.unwrap().id, "root");
    assert_eq!(detail.keywords.len(), 1);
}

#[tokio::test]
async fn test_hierarchy_failure_is_a_warning() {
    let source = FakeSource {
        hierarchy_fails: true,
        ..FakeSource::healthy()
    };

    let detail = load_disease_detail(&source, "d1").await.unwrap();

    assert!(detail.hierarchy.is_none());
    assert_eq!(detail.keywords.len(), 1);
    assert_eq!(detail.warnings.len(), 1);
    assert_eq!(detail.warnings[0].part, "hierarchy");
}

#[tokio::test]
async fn test_missing_disease_is_fatal() {
    let err = load_disease_detail(&FakeSource::healthy(), "missing")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_keyword_edits_refetch_list() {
    let source = FakeSource::healthy();
    let mut detail = load_disease_detail(&source, "d1").await.unwrap();

    let added = detail
        .add_keyword(&source, &NewKeyword::manual("enzyme therapy", KeywordType::Treatment))
        .await
        .unwrap();
    assert_eq!(added.keyword, "enzyme therapy");
    assert_eq!(detail.keywords.len(), 2);

    detail.delete_keyword(&source, 1).await.unwrap();
    let remaining: Vec<_> = detail.keywords.iter().map(|k| k.keyword.as_str()).collect();
    assert_eq!(remaining, vec!["enzyme therapy"]);
}

#[tokio::test]
async fn test_search_overview_tolerates_missing_terms() {
    let source = FakeSource {
        terms_fail: true,
        ..FakeSource::healthy()
    };

    let overview = load_search_overview(&source, "d1").await.unwrap();
    assert!(overview.search_terms.is_empty());
    assert_eq!(overview.warnings[0].part, "search terms");

    let overview = load_search_overview(&FakeSource::healthy(), "d1").await.unwrap();
    assert_eq!(overview.search_terms.len(), 2);
    assert!(overview.warnings.is_empty());
}
