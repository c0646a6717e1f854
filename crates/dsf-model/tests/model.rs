//! Decoding of full backend payloads.

use dsf_model::{
    DiseaseRecord, NandoHierarchy, NandoImportOutcome, Organization, OrganizationType,
    SearchResult, VerificationStatus,
};

#[test]
fn test_full_disease_payload() {
    let json = r#"{
        "id": "6f1c",
        "name": "ファブリー病",
        "name_kana": "ふぁぶりーびょう",
        "name_en": "Fabry disease",
        "nando_id": "NANDO:1200002",
        "is_searchable": true,
        "overview": "Lysosomal storage disorder",
        "patient_count": 1200,
        "search_keywords": ["Fabry", "α-galactosidase"],
        "disease_type": "designated",
        "parent_disease_id": "NANDO:1200000",
        "is_designated_intractable": true,
        "is_chronic_childhood": false,
        "created_at": "2024-05-01T10:00:00",
        "updated_at": null
    }"#;

    let record: DiseaseRecord = serde_json::from_str(json).unwrap();

    assert_eq!(record.name_en.as_deref(), Some("Fabry disease"));
    assert_eq!(record.patient_count, Some(1200));
    assert_eq!(record.search_keywords.as_ref().map(Vec::len), Some(2));
    assert!(record.in_group("12"));
    assert!(!record.in_group("2"));
    assert!(record.updated_at.is_none());
}

#[test]
fn test_nando_hierarchy_keyed_by_parent() {
    let json = r#"{
        "NANDO:1200000": [
            {"id": "a", "name": "A", "nando_id": "NANDO:1200001"},
            {"id": "b", "name": "B", "nando_id": "NANDO:1200002"}
        ],
        "NANDO:2100000": []
    }"#;

    let hierarchy: NandoHierarchy = serde_json::from_str(json).unwrap();

    assert_eq!(hierarchy.len(), 2);
    assert_eq!(hierarchy["NANDO:1200000"][1].id, "b");
    assert!(hierarchy["NANDO:2100000"].is_empty());
}

#[test]
fn test_import_outcome_with_errors() {
    let json = r#"{
        "status": "success",
        "message": "Imported 10 diseases",
        "imported": 10,
        "skipped": 2,
        "errors": ["row 4: missing name", "row 9: missing name"]
    }"#;

    let outcome: NandoImportOutcome = serde_json::from_str(json).unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.skipped, Some(2));
    assert_eq!(outcome.errors.unwrap().len(), 2);
}

#[test]
fn test_search_result_with_unknown_organization_type() {
    let json = r#"{
        "disease_id": "d1",
        "organizations": [
            {"id": "o1", "disease_id": "d1", "name": "Fabry Family Network",
             "type": "family", "verification_status": "verified", "relevance_score": 0.92},
            {"id": "o2", "disease_id": "d1", "name": "Clinic", "type": "hospital"}
        ]
    }"#;

    let result: SearchResult = serde_json::from_str(json).unwrap();
    let organizations: &[Organization] = &result.organizations;

    assert_eq!(organizations[0].organization_type, Some(OrganizationType::Family));
    assert_eq!(organizations[0].verification_status, VerificationStatus::Verified);
    assert_eq!(organizations[1].organization_type, Some(OrganizationType::Other));
    assert_eq!(organizations[1].verification_status, VerificationStatus::Pending);
    assert!(result.count.is_none());
}
