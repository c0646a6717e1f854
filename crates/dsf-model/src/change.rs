//! Pending searchable-flag changes.

use serde::{Deserialize, Serialize};

/// Desired searchable value for one disease.
///
/// A list of these is the body of `POST /diseases/batch-update-searchable`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingChange {
    pub disease_id: String,
    pub is_searchable: bool,
}

impl PendingChange {
    pub fn new(disease_id: impl Into<String>, is_searchable: bool) -> Self {
        Self {
            disease_id: disease_id.into(),
            is_searchable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let body = serde_json::to_value(vec![PendingChange::new("d1", true)]).unwrap();
        assert_eq!(
            body,
            serde_json::json!([{"disease_id": "d1", "is_searchable": true}])
        );
    }
}
