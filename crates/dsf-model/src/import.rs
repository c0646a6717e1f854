//! Upload outcomes and acknowledgements.

use serde::{Deserialize, Serialize};

/// Status field of a NANDO import response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Success,
    Error,
}

/// Response of `POST /nando/import` and `POST /nando/import/custom`.
///
/// The backend answers `200 OK` with `status: "error"` when the file was
/// readable but rejected, so callers must check [`NandoImportOutcome::is_success`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NandoImportOutcome {
    pub status: ImportStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub imported: u64,
    #[serde(default)]
    pub skipped: Option<u64>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl NandoImportOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ImportStatus::Success
    }
}

/// Plain `{message}` acknowledgement, optionally with a status string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAck {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
