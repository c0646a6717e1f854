//! Disease endpoints (`/diseases`).

use dsf_model::{
    DiseaseCustomKeyword, DiseaseHierarchy, DiseaseRecord, HierarchyStats, KeywordList, MessageAck,
    NewKeyword, PendingChange,
};
use reqwest::Method;

use crate::client::{ApiClient, UploadFile};
use crate::error::Result;

impl ApiClient {
    /// Fetches every disease.
    pub async fn list_diseases(&self) -> Result<Vec<DiseaseRecord>> {
        let diseases: Vec<DiseaseRecord> = self.get_json(self.endpoint(&["diseases"])?).await?;
        tracing::debug!("Fetched {} diseases", diseases.len());
        Ok(diseases)
    }

    /// Fetches one disease.
    pub async fn get_disease(&self, disease_id: &str) -> Result<DiseaseRecord> {
        self.get_json(self.endpoint(&["diseases", disease_id])?).await
    }

    /// Fetches the parent and children of a disease.
    pub async fn get_hierarchy(&self, disease_id: &str) -> Result<DiseaseHierarchy> {
        self.get_json(self.endpoint(&["diseases", disease_id, "hierarchy"])?)
            .await
    }

    /// Fetches the diseases currently included in organization search.
    pub async fn list_searchable(&self) -> Result<Vec<DiseaseRecord>> {
        self.get_json(self.endpoint(&["diseases", "searchable"])?).await
    }

    /// Server-side name search.
    pub async fn search_diseases(&self, query: &str) -> Result<Vec<DiseaseRecord>> {
        self.get_json(self.endpoint(&["diseases", "search", query])?)
            .await
    }

    /// Fetches hierarchy statistics for the whole disease set.
    pub async fn hierarchy_stats(&self) -> Result<HierarchyStats> {
        self.get_json(self.endpoint(&["diseases", "hierarchy", "stats"])?)
            .await
    }

    /// Persists a batch of searchable-flag changes in one request.
    pub async fn batch_update_searchable(&self, changes: &[PendingChange]) -> Result<MessageAck> {
        tracing::info!("Saving {} searchable changes", changes.len());
        self.send_json(
            Method::POST,
            self.endpoint(&["diseases", "batch-update-searchable"])?,
            Some(changes),
        )
        .await
    }

    /// Updates the searchable flag of a single disease.
    pub async fn update_searchable(
        &self,
        disease_id: &str,
        is_searchable: bool,
    ) -> Result<DiseaseRecord> {
        let mut url = self.endpoint(&["diseases", disease_id, "searchable"])?;
        url.query_pairs_mut()
            .append_pair("is_searchable", if is_searchable { "true" } else { "false" });
        self.send_json::<(), _>(Method::PATCH, url, None).await
    }

    /// Downloads the searchable set as a spreadsheet.
    pub async fn export_searchable(&self) -> Result<Vec<u8>> {
        self.get_bytes(self.endpoint(&["diseases", "searchable", "export"])?)
            .await
    }

    /// Uploads a spreadsheet of searchable settings.
    pub async fn import_searchable(&self, file: UploadFile) -> Result<MessageAck> {
        self.upload(self.endpoint(&["diseases", "searchable", "import"])?, file)
            .await
    }

    /// Attaches a custom keyword to a disease.
    pub async fn add_keyword(
        &self,
        disease_id: &str,
        keyword: &NewKeyword,
    ) -> Result<DiseaseCustomKeyword> {
        self.send_json(
            Method::POST,
            self.endpoint(&["diseases", disease_id, "keywords"])?,
            Some(keyword),
        )
        .await
    }

    /// Lists the custom keywords of a disease.
    pub async fn list_keywords(&self, disease_id: &str) -> Result<Vec<DiseaseCustomKeyword>> {
        let list: KeywordList = self
            .get_json(self.endpoint(&["diseases", disease_id, "keywords"])?)
            .await?;
        Ok(list.keywords)
    }

    /// Deletes a custom keyword.
    pub async fn delete_keyword(&self, keyword_id: i64) -> Result<MessageAck> {
        let keyword_id = keyword_id.to_string();
        self.send_json::<(), _>(
            Method::DELETE,
            self.endpoint(&["diseases", "keywords", &keyword_id])?,
            None,
        )
        .await
    }

    /// Uploads a spreadsheet of custom keywords.
    pub async fn import_keywords(&self, file: UploadFile) -> Result<MessageAck> {
        self.upload(self.endpoint(&["diseases", "keywords", "import"])?, file)
            .await
    }
}
