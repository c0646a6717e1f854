//! Backend seams used by the controller and the detail loaders.
//!
//! [`ApiClient`] implements both traits. Tests substitute in-memory fakes.

use std::future::Future;

use dsf_client::{ApiClient, UploadFile};
use dsf_model::{
    DiseaseCustomKeyword, DiseaseHierarchy, DiseaseRecord, MessageAck, NewKeyword, PendingChange,
    SearchTerms,
};

/// Requests issued by the searchability workspace.
pub trait SearchableBackend {
    /// Fetch the full disease list.
    fn list_diseases(
        &self,
    ) -> impl Future<Output = dsf_client::Result<Vec<DiseaseRecord>>> + Send;

    /// Persist a batch of changes atomically.
    fn batch_update_searchable(
        &self,
        changes: &[PendingChange],
    ) -> impl Future<Output = dsf_client::Result<MessageAck>> + Send;

    /// Download the searchable set as spreadsheet bytes.
    fn export_searchable(&self) -> impl Future<Output = dsf_client::Result<Vec<u8>>> + Send;

    /// Upload a spreadsheet of searchable settings.
    fn import_searchable(
        &self,
        file: UploadFile,
    ) -> impl Future<Output = dsf_client::Result<MessageAck>> + Send;
}

/// Requests issued by the disease detail and search pages.
pub trait DiseaseSource {
    fn get_disease(
        &self,
        disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<DiseaseRecord>> + Send;

    fn get_hierarchy(
        &self,
        disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<DiseaseHierarchy>> + Send;

    fn list_keywords(
        &self,
        disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<Vec<DiseaseCustomKeyword>>> + Send;

    fn add_keyword(
        &self,
        disease_id: &str,
        keyword: &NewKeyword,
    ) -> impl Future<Output = dsf_client::Result<DiseaseCustomKeyword>> + Send;

    fn delete_keyword(
        &self,
        keyword_id: i64,
    ) -> impl Future<Output = dsf_client::Result<MessageAck>> + Send;

    fn search_terms(
        &self,
        disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<SearchTerms>> + Send;
}

impl SearchableBackend for ApiClient {
    fn list_diseases(
        &self,
    ) -> impl Future<Output = dsf_client::Result<Vec<DiseaseRecord>>> + Send {
        ApiClient::list_diseases(self)
    }

    fn batch_update_searchable(
        &self,
        changes: &[PendingChange],
    ) -> impl Future<Output = dsf_client::Result<MessageAck>> + Send {
        ApiClient::batch_update_searchable(self, changes)
    }

    fn export_searchable(&self) -> impl Future<Output = dsf_client::Result<Vec<u8>>> + Send {
        ApiClient::export_searchable(self)
    }

    fn import_searchable(
        &self,
        file: UploadFile,
    ) -> impl Future<Output = dsf_client::Result<MessageAck>> + Send {
        ApiClient::import_searchable(self, file)
    }
}

impl DiseaseSource for ApiClient {
    fn get_disease(
        &self,
        disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<DiseaseRecord>> + Send {
        ApiClient::get_disease(self, disease_id)
    }

    fn get_hierarchy(
        &self,
        disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<DiseaseHierarchy>> + Send {
        ApiClient::get_hierarchy(self, disease_id)
    }

    fn list_keywords(
        &self,
        disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<Vec<DiseaseCustomKeyword>>> + Send {
        ApiClient::list_keywords(self, disease_id)
    }

    fn add_keyword(
        &self,
        disease_id: &str,
        keyword: &NewKeyword,
    ) -> impl Future<Output = dsf_client::Result<DiseaseCustomKeyword>> + Send {
        ApiClient::add_keyword(self, disease_id, keyword)
    }

    fn delete_keyword(
        &self,
        keyword_id: i64,
    ) -> impl Future<Output = dsf_client::Result<MessageAck>> + Send {
        ApiClient::delete_keyword(self, keyword_id)
    }

    fn search_terms(
        &self,
        disease_id: &str,
    ) -> impl Future<Output = dsf_client::Result<SearchTerms>> + Send {
        ApiClient::search_terms(self, disease_id)
    }
}
