//! Resource types for the Disease Support Finder API.
//!
//! These types mirror the JSON resources served under `/api/v1` and are the
//! contract every other crate in the workspace relies on.
//!
//! # Module Organization
//!
//! - [`disease`]: Disease records, hierarchy views and hierarchy statistics
//! - [`nando`]: NANDO classification identifiers and group prefixes
//! - [`change`]: Pending searchable-flag changes sent in batch updates
//! - [`keyword`]: Custom search keywords attached to a disease
//! - [`organization`]: Support organizations and their verification state
//! - [`search`]: Search settings, results and search terms
//! - [`import`]: Upload outcomes and plain message acknowledgements
//! - [`llm`]: Extraction model health, model list and test extraction
//!
//! # Example
//!
//! ```
//! use dsf_model::DiseaseRecord;
//!
//! let json = r#"{"id": "d1", "name": "Disease", "nando_id": "NANDO:1200002"}"#;
//! let record: DiseaseRecord = serde_json::from_str(json).unwrap();
//!
//! assert!(!record.is_searchable);
//! assert!(record.in_group("1"));
//! ```

pub mod change;
pub mod disease;
pub mod import;
pub mod keyword;
pub mod llm;
pub mod nando;
pub mod organization;
pub mod search;

pub use change::PendingChange;
pub use disease::{DiseaseHierarchy, DiseaseRecord, DiseaseSummary, HierarchyStats, NandoHierarchy};
pub use import::{ImportStatus, MessageAck, NandoImportOutcome};
pub use keyword::{DiseaseCustomKeyword, KeywordList, KeywordType, NewKeyword};
pub use llm::{
    ExtractedOrganization, ExtractionRequest, ExtractionResult, LlmHealth, LlmHealthStatus,
    LlmModels,
};
pub use nando::{NANDO_PREFIX, group_prefix, nando_id_in_group};
pub use organization::{Organization, OrganizationType, VerificationRequest, VerificationStatus};
pub use search::{SearchResult, SearchSettings, SearchTerms};
