//! Document type classification by signature root key
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

use crate::registry::DocumentType;
use serde_json::{Map, Value};

/// Signature keys in priority order. When a document carries more than one,
/// the earliest entry wins.
pub const SIGNATURES: [(&str, DocumentType); 8] = [
    ("patterns", DocumentType::DesignPatterns),
    ("vulnerabilities", DocumentType::SecurityVulnerabilities),
    ("algorithms_and_data_structures", DocumentType::AlgorithmsDataStructures),
    ("datahub_entities", DocumentType::Datahub),
    ("feasibility_analysis", DocumentType::FeasibilityAnalysis),
    ("etl_subsystems", DocumentType::EtlSubsystems),
    ("cloud_architecture_patterns", DocumentType::CloudArchitecture),
    ("repository_discovery", DocumentType::RepoDiscovery),
];

/// Return the highest-priority document type whose signature key is present
pub fn classify(root: &Map<String, Value>) -> Option<DocumentType> {
    SIGNATURES
        .iter()
        .find(|(key, _)| root.contains_key(*key))
        .map(|(_, doc_type)| *doc_type)
}

/// Return every document type whose signature key is present, in priority order
pub fn signature_matches(root: &Map<String, Value>) -> Vec<DocumentType> {
    SIGNATURES
        .iter()
        .filter(|(key, _)| root.contains_key(*key))
        .map(|(_, doc_type)| *doc_type)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_signature_keys_match_registry() {
        for (key, doc_type) in SIGNATURES {
            assert_eq!(doc_type.main_key(), key);
        }
        let order: Vec<DocumentType> = SIGNATURES.iter().map(|(_, t)| *t).collect();
        assert_eq!(order, DocumentType::ALL.to_vec());
    }

    #[test]
    fn test_classify_each_type() {
        for (key, doc_type) in SIGNATURES {
            let doc = root(json!({ key: [] }));
            assert_eq!(classify(&doc), Some(doc_type));
        }
    }

    #[test]
    fn test_classify_unknown() {
        let doc = root(json!({"unknown_type": [{"name": "x"}]}));
        assert_eq!(classify(&doc), None);
        assert!(signature_matches(&doc).is_empty());

        assert_eq!(classify(&Map::new()), None);
    }

    #[test]
    fn test_ambiguous_document_takes_first_match() {
        let doc = root(json!({
            "repository_discovery": [],
            "vulnerabilities": [],
            "patterns": [],
        }));
        assert_eq!(classify(&doc), Some(DocumentType::DesignPatterns));
        assert_eq!(
            signature_matches(&doc),
            vec![
                DocumentType::DesignPatterns,
                DocumentType::SecurityVulnerabilities,
                DocumentType::RepoDiscovery,
            ]
        );
    }

    #[test]
    fn test_nested_keys_are_ignored() {
        // `patterns` inside a vulnerability entry is a field, not a signature
        let doc = root(json!({
            "vulnerabilities": [{"name": "SQLi", "patterns": ["execute("]}]
        }));
        assert_eq!(
            signature_matches(&doc),
            vec![DocumentType::SecurityVulnerabilities]
        );
    }
}
