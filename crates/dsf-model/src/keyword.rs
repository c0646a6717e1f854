//! Custom search keywords.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of a custom keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordType {
    Symptom,
    Treatment,
    #[default]
    Other,
}

impl KeywordType {
    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Symptom => "symptom",
            Self::Treatment => "treatment",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for KeywordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "symptom" => Ok(Self::Symptom),
            "treatment" => Ok(Self::Treatment),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown keyword type: {other}")),
        }
    }
}

/// A keyword attached to a disease by an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseCustomKeyword {
    pub id: i64,
    pub disease_id: String,
    pub keyword: String,
    /// Kept as text: older rows may carry categories this client does not know.
    #[serde(default)]
    pub keyword_type: Option<String>,
    #[serde(default)]
    pub added_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /diseases/{id}/keywords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewKeyword {
    pub keyword: String,
    pub keyword_type: KeywordType,
    pub added_by: String,
}

impl NewKeyword {
    /// A manually added keyword.
    pub fn manual(keyword: impl Into<String>, keyword_type: KeywordType) -> Self {
        Self {
            keyword: keyword.into(),
            keyword_type,
            added_by: "manual".to_string(),
        }
    }
}

/// Response of `GET /diseases/{id}/keywords`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordList {
    #[serde(default)]
    pub keywords: Vec<DiseaseCustomKeyword>,
}
