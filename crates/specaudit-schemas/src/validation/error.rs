//! Finding and validation error types
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

use crate::loader::LoaderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A violation with detailed context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The validation rule that was violated
    pub rule: String,
    /// What was expected
    pub expected: String,
    /// What was actually found
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rule '{}' violated: expected {}, but found {}",
            self.rule, self.expected, self.actual
        )
    }
}

/// A schema violation inside one document, located by its entry path
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// Location within the document, e.g. `patterns -> 0 -> category`
    pub location: String,
    /// Human-readable error message
    pub message: String,
    /// Detailed schema violations
    pub schema_violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: {}", self.location, self.message)
    }
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<P, M>(location: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            location: location.into(),
            message: message.into(),
            schema_violations: Vec::new(),
        }
    }

    /// Create a validation error with violations
    pub fn with_violations<P, M>(location: P, message: M, violations: Vec<Violation>) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            location: location.into(),
            message: message.into(),
            schema_violations: violations,
        }
    }

    /// Create a violation for a specific rule
    pub fn create_violation<R, E, A>(rule: R, expected: E, actual: A) -> Violation
    where
        R: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Violation {
            rule: rule.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Whether a finding fails the session outright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Kinds of findings a session can collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// A file or directory could not be read
    Io,
    /// Malformed YAML
    Syntax,
    /// Root node is not a mapping
    RootShape,
    /// No signature key at the root
    UnknownType,
    /// More than one signature key at the root
    AmbiguousType,
    /// Entry missing a field, wrong shape, or value outside an enum
    Schema,
    /// Same entry name in more than one place
    DuplicateName,
    /// Directory holds no specification files
    NoFiles,
    /// An entry's `report_fields` list is empty
    EmptyFields,
}

impl FindingKind {
    /// Severity implied by the kind
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::EmptyFields => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Stable identifier used in machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            FindingKind::Io => "IOError",
            FindingKind::Syntax => "SyntaxError",
            FindingKind::RootShape => "RootShapeError",
            FindingKind::UnknownType => "UnknownTypeError",
            FindingKind::AmbiguousType => "AmbiguousTypeError",
            FindingKind::Schema => "SchemaError",
            FindingKind::DuplicateName => "DuplicateNameError",
            FindingKind::NoFiles => "NoFilesError",
            FindingKind::EmptyFields => "EmptyFieldsWarning",
        }
    }
}

/// One error or warning collected by a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    /// File (or directory) the finding is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Location inside the document, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Finding {
    /// Create a finding; severity follows the kind
    pub fn new(kind: FindingKind, source: Option<&Path>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            source: source.map(Path::to_path_buf),
            location: None,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Map a loader failure onto the finding taxonomy
    pub fn from_loader_error(error: &LoaderError) -> Self {
        let kind = match error {
            LoaderError::IoError { .. } | LoaderError::DirectoryNotFound { .. } => FindingKind::Io,
            LoaderError::YamlParseError { .. }
            | LoaderError::EncodingError { .. }
            | LoaderError::ConversionError { .. } => FindingKind::Syntax,
            LoaderError::RootShapeError { .. } => FindingKind::RootShape,
        };
        Self::new(kind, Some(error.path()), error.to_string())
    }

    /// Wrap an in-document schema violation
    pub fn schema(source: &Path, error: ValidationError) -> Self {
        Self {
            kind: FindingKind::Schema,
            severity: Severity::Error,
            source: Some(source.to_path_buf()),
            message: format!(
                "Schema validation error in {} at {}: {}",
                source.display(),
                error.location,
                error.message
            ),
            location: Some(error.location),
            violations: error.schema_violations,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// An ordered collection of findings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    pub items: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a finding to the collection
    pub fn add(&mut self, finding: Finding) {
        self.items.push(finding);
    }

    /// Append another collection, keeping order
    pub fn extend(&mut self, other: Findings) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.items.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Finding::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.items.iter().filter(|f| f.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.items.iter().filter(|f| f.is_warning())
    }
}

impl From<Finding> for Findings {
    fn from(finding: Finding) -> Self {
        Self {
            items: vec![finding],
        }
    }
}

impl From<Vec<Finding>> for Findings {
    fn from(items: Vec<Finding>) -> Self {
        Self { items }
    }
}

impl IntoIterator for Findings {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_severity() {
        assert_eq!(FindingKind::EmptyFields.severity(), Severity::Warning);
        assert_eq!(FindingKind::DuplicateName.severity(), Severity::Error);
        assert_eq!(FindingKind::Io.code(), "IOError");
    }

    #[test]
    fn test_schema_finding_message() {
        let error = ValidationError::new("patterns -> 0", "'hints' is a required property");
        let finding = Finding::schema(Path::new("specs/a.yaml"), error);
        assert_eq!(finding.kind, FindingKind::Schema);
        assert_eq!(finding.location.as_deref(), Some("patterns -> 0"));
        assert_eq!(
            finding.to_string(),
            "Schema validation error in specs/a.yaml at patterns -> 0: 'hints' is a required property"
        );
    }

    #[test]
    fn test_findings_partition() {
        let mut findings = Findings::new();
        findings.add(Finding::new(FindingKind::EmptyFields, None, "warn"));
        findings.add(Finding::new(FindingKind::Syntax, None, "err"));

        assert!(findings.has_errors());
        assert_eq!(findings.errors().count(), 1);
        assert_eq!(findings.warnings().count(), 1);
    }

    #[test]
    fn test_finding_serialization() {
        let finding = Finding::new(FindingKind::NoFiles, Some(Path::new("specs")), "No YAML files found in specs");
        let value = serde_json::to_value(&finding).unwrap();
        assert_eq!(value["kind"], "no_files");
        assert_eq!(value["severity"], "error");
        assert!(value.get("location").is_none());
        assert!(value.get("violations").is_none());
    }
}
