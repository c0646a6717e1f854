//! Support organizations found by the search pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of support organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationType {
    /// Patient association.
    Patient,
    /// Family association.
    Family,
    /// Support group or foundation.
    Support,
    /// Anything the backend reports that is not one of the above.
    #[serde(other)]
    Other,
}

impl OrganizationType {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Family => "family",
            Self::Support => "support",
            Self::Other => "other",
        }
    }
}

/// Human verification state of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown verification status: {other}")),
        }
    }
}

/// A support organization linked to a disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub disease_id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default, rename = "type")]
    pub organization_type: Option<OrganizationType>,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    /// Relevance score assigned by the search step, on a 0 to 100 scale.
    #[serde(default)]
    pub relevance_score: Option<f64>,
    /// Page the organization was extracted from.
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /verification/verify/{orgId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
