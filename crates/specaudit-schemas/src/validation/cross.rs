//! Consistency checks that span several documents
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

use crate::validation::document::Document;
use crate::validation::error::{Finding, FindingKind, Findings};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Checks run over the documents that passed their schema check
#[derive(Debug, Default, Clone, Copy)]
pub struct CrossDocumentChecker;

impl CrossDocumentChecker {
    pub fn new() -> Self {
        Self
    }

    /// Run every cross-document check, in a fixed order
    pub fn check(&self, documents: &[Document]) -> Findings {
        debug!(documents = documents.len(), "Running cross-document checks");
        let mut findings = self.check_duplicate_names(documents);
        findings.extend(self.check_cross_references(documents));
        findings.extend(self.check_report_fields(documents));
        findings
    }

    /// One error per entry name that appears more than once, in any catalog
    pub fn check_duplicate_names(&self, documents: &[Document]) -> Findings {
        // name -> (occurrences, distinct paths in first-seen order)
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut seen: Vec<(&str, usize, Vec<&Path>)> = Vec::new();

        for document in documents {
            for name in document.entries().filter_map(Document::entry_name) {
                let slot = *index.entry(name).or_insert_with(|| {
                    seen.push((name, 0, Vec::new()));
                    seen.len() - 1
                });
                let (_, count, paths) = &mut seen[slot];
                *count += 1;
                if !paths.contains(&document.path()) {
                    paths.push(document.path());
                }
            }
        }

        seen.into_iter()
            .filter(|(_, count, _)| *count > 1)
            .map(|(name, _, paths)| {
                let listed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                warn!(entry = name, files = listed.len(), "Duplicate entry name");
                let mut finding = Finding::new(
                    FindingKind::DuplicateName,
                    paths.first().copied(),
                    format!(
                        "Duplicate pattern name '{}' found in: {}",
                        name,
                        listed.join(", ")
                    ),
                );
                finding.location = Some(name.to_string());
                finding
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Catalogs do not reference each other yet, so there is nothing to resolve
    pub fn check_cross_references(&self, _documents: &[Document]) -> Findings {
        Findings::new()
    }

    /// One warning per entry whose `report_fields` is present but empty
    pub fn check_report_fields(&self, documents: &[Document]) -> Findings {
        let mut findings = Findings::new();
        for document in documents {
            for entry in document.entries() {
                let empty = matches!(entry.get("report_fields"), Some(Value::Array(items)) if items.is_empty());
                if !empty {
                    continue;
                }
                let name = Document::entry_name(entry).unwrap_or("<unnamed>");
                findings.add(Finding::new(
                    FindingKind::EmptyFields,
                    Some(document.path()),
                    format!(
                        "Empty report_fields in {} for pattern '{}'",
                        document.path().display(),
                        name
                    ),
                ));
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DocumentType;
    use serde_json::json;
    use std::path::PathBuf;

    fn document(path: &str, doc_type: DocumentType, entries: Value) -> Document {
        let root = json!({ doc_type.main_key(): entries });
        Document::new(
            PathBuf::from(path),
            doc_type,
            root.as_object().cloned().unwrap(),
        )
    }

    #[test]
    fn test_duplicates_across_documents() {
        let documents = vec![
            document(
                "specs/a.yaml",
                DocumentType::DesignPatterns,
                json!([{"name": "Singleton"}, {"name": "Factory"}]),
            ),
            document(
                "specs/b.yaml",
                DocumentType::CloudArchitecture,
                json!([{"name": "Singleton"}]),
            ),
        ];

        let findings = CrossDocumentChecker::new().check_duplicate_names(&documents);
        assert_eq!(findings.len(), 1);
        let finding = &findings.items[0];
        assert_eq!(finding.kind, FindingKind::DuplicateName);
        assert_eq!(
            finding.message,
            "Duplicate pattern name 'Singleton' found in: specs/a.yaml, specs/b.yaml"
        );
    }

    #[test]
    fn test_duplicates_within_one_document() {
        let documents = vec![document(
            "specs/a.yaml",
            DocumentType::DesignPatterns,
            json!([{"name": "X"}, {"name": "X"}, {"name": "x"}]),
        )];

        let findings = CrossDocumentChecker::new().check_duplicate_names(&documents);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings.items[0].message,
            "Duplicate pattern name 'X' found in: specs/a.yaml"
        );
    }

    #[test]
    fn test_empty_report_fields_warns_once_per_entry() {
        let documents = vec![document(
            "specs/a.yaml",
            DocumentType::DesignPatterns,
            json!([
                {"name": "A", "report_fields": []},
                {"name": "B", "report_fields": ["location"]},
                {"name": "C", "report_fields": []},
            ]),
        )];

        let findings = CrossDocumentChecker::new().check(&documents);
        assert!(!findings.has_errors());
        let messages: Vec<_> = findings.warnings().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Empty report_fields in specs/a.yaml for pattern 'A'",
                "Empty report_fields in specs/a.yaml for pattern 'C'",
            ]
        );
    }

    #[test]
    fn test_cross_references_is_noop() {
        let documents = vec![document(
            "specs/a.yaml",
            DocumentType::Datahub,
            json!([{"name": "dataset"}]),
        )];
        assert!(CrossDocumentChecker::new()
            .check_cross_references(&documents)
            .is_empty());
    }
}
