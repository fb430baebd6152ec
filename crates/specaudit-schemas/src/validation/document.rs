//! Single-document validation: parse, classify, schema-check
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

use crate::classify::{classify, signature_matches};
use crate::loader::SpecParser;
use crate::registry::{DocumentType, Schema, SectionItems};
use crate::validation::base::{SchemaValidator, ValidationContext, ValidationHelpers};
use crate::validation::error::{Finding, FindingKind, Findings, ValidationError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// A parsed specification document that passed its schema check
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: PathBuf,
    doc_type: DocumentType,
    root: Map<String, Value>,
}

impl Document {
    pub fn new(path: PathBuf, doc_type: DocumentType, root: Map<String, Value>) -> Self {
        Self {
            path,
            doc_type,
            root,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Entries of the main collection; non-mapping items are skipped
    pub fn entries(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.root
            .get(self.doc_type.main_key())
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
    }

    /// The `name` of an entry, when it is a string
    pub fn entry_name(entry: &Map<String, Value>) -> Option<&str> {
        entry.get("name").and_then(Value::as_str)
    }
}

/// Result of validating one file
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    /// Detected type, when classification succeeded
    pub doc_type: Option<DocumentType>,
    pub findings: Findings,
    /// Present only when the document is fully valid
    pub document: Option<Document>,
}

impl DocumentOutcome {
    fn failed(path: &Path, doc_type: Option<DocumentType>, findings: Findings) -> Self {
        Self {
            path: path.to_path_buf(),
            doc_type,
            findings,
            document: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.document.is_some() && !self.findings.has_errors()
    }
}

impl SchemaValidator for Schema {
    type Input = Map<String, Value>;

    fn validate_with_context(
        &self,
        root: &Map<String, Value>,
        context: &ValidationContext,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let main_context = context.child(self.main_key);
        match root.get(self.main_key) {
            Some(Value::Array(entries)) => {
                for (index, entry) in entries.iter().enumerate() {
                    let entry_context = main_context.child_index(index);
                    match entry {
                        Value::Object(fields) => errors.extend(ValidationHelpers::validate_fields(
                            self.entry_fields,
                            fields,
                            &entry_context,
                        )),
                        other => errors.extend(
                            ValidationHelpers::validate_type(other, "object", false, &entry_context)
                                .err(),
                        ),
                    }
                }
            }
            Some(other) => errors.extend(
                ValidationHelpers::validate_type(other, "array", false, &main_context).err(),
            ),
            None => errors.extend(
                ValidationHelpers::validate_required_field(root, self.main_key, context).err(),
            ),
        }

        for section in self.sections {
            let Some(value) = root.get(section.key) else {
                continue;
            };
            let section_context = context.child(section.key);
            let Value::Array(items) = value else {
                errors.extend(
                    ValidationHelpers::validate_type(value, "array", false, &section_context).err(),
                );
                continue;
            };

            match section.items {
                SectionItems::Strings => {
                    errors.extend(ValidationHelpers::validate_string_items(items, &section_context))
                }
                SectionItems::Entries(fields) => {
                    for (index, item) in items.iter().enumerate() {
                        let item_context = section_context.child_index(index);
                        match item {
                            Value::Object(map) => errors.extend(
                                ValidationHelpers::validate_fields(fields, map, &item_context),
                            ),
                            other => errors.extend(
                                ValidationHelpers::validate_type(other, "object", false, &item_context)
                                    .err(),
                            ),
                        }
                    }
                }
            }
        }

        errors
    }
}

/// Validates one specification file at a time
#[derive(Debug, Default, Clone)]
pub struct DocumentValidator {
    parser: SpecParser,
}

impl DocumentValidator {
    pub fn new() -> Self {
        Self {
            parser: SpecParser::new(),
        }
    }

    /// Read, parse, classify and schema-check one file
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn validate_path(&self, path: &Path) -> DocumentOutcome {
        match self.parser.parse_file(path) {
            Ok(root) => self.validate_root(path, root),
            Err(error) => {
                warn!(error = %error, "Specification could not be loaded");
                DocumentOutcome::failed(path, None, Finding::from_loader_error(&error).into())
            }
        }
    }

    /// Validate YAML text as if it had been read from `path`
    pub fn validate_str(&self, content: &str, path: &Path) -> DocumentOutcome {
        match self.parser.parse_content(content, path) {
            Ok(root) => self.validate_root(path, root),
            Err(error) => {
                DocumentOutcome::failed(path, None, Finding::from_loader_error(&error).into())
            }
        }
    }

    /// Classify and schema-check an already parsed root mapping
    pub fn validate_root(&self, path: &Path, root: Map<String, Value>) -> DocumentOutcome {
        let Some(doc_type) = classify(&root) else {
            warn!("Unknown specification type");
            return DocumentOutcome::failed(
                path,
                None,
                Finding::new(
                    FindingKind::UnknownType,
                    Some(path),
                    format!("Unknown specification type in {}", path.display()),
                )
                .into(),
            );
        };

        let matches = signature_matches(&root);
        if matches.len() > 1 {
            let names: Vec<&str> = matches.iter().map(DocumentType::as_str).collect();
            warn!(matches = ?names, "Ambiguous specification type");
            return DocumentOutcome::failed(
                path,
                Some(doc_type),
                Finding::new(
                    FindingKind::AmbiguousType,
                    Some(path),
                    format!(
                        "Ambiguous specification type in {}: matches {} (first match '{}')",
                        path.display(),
                        names.join(", "),
                        doc_type
                    ),
                )
                .into(),
            );
        }

        debug!(doc_type = %doc_type, "Classified specification");

        let errors = doc_type.schema().collect_errors(&root);
        if !errors.is_empty() {
            warn!(violations = errors.len(), "Schema validation failed");
            let findings = errors
                .into_iter()
                .map(|error| Finding::schema(path, error))
                .collect::<Vec<_>>();
            return DocumentOutcome::failed(path, Some(doc_type), findings.into());
        }

        DocumentOutcome {
            path: path.to_path_buf(),
            doc_type: Some(doc_type),
            findings: Findings::new(),
            document: Some(Document::new(path.to_path_buf(), doc_type, root)),
        }
    }
}
