//! Validation session: runs the pipeline and owns the verdict
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

use crate::loader::discover_spec_files;
use crate::validation::cross::CrossDocumentChecker;
use crate::validation::document::{Document, DocumentOutcome, DocumentValidator};
use crate::validation::error::{Finding, FindingKind, Findings, Severity};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Reported once per file during a directory run
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 1-based index of the file being validated
    pub current: usize,
    pub total: usize,
    pub path: &'a Path,
}

/// Counts gathered over a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub files_checked: usize,
    pub files_valid: usize,
    pub documents_cross_checked: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Serialisable snapshot of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub strict: bool,
    pub passed: bool,
    pub summary: ValidationSummary,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

/// Accumulates findings over one or more validation runs
///
/// Strict mode never changes what is collected, only what [`passed`](Self::passed)
/// returns.
#[derive(Debug, Clone)]
pub struct ValidationSession {
    strict: bool,
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
    validator: DocumentValidator,
    checker: CrossDocumentChecker,
    summary: ValidationSummary,
}

impl Default for ValidationSession {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ValidationSession {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            errors: Vec::new(),
            warnings: Vec::new(),
            validator: DocumentValidator::new(),
            checker: CrossDocumentChecker::new(),
            summary: ValidationSummary::default(),
        }
    }

    /// Validate a single file. Cross-document checks are not run.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn validate_one(&mut self, path: impl AsRef<Path>) -> bool {
        let outcome = self.validator.validate_path(path.as_ref());
        self.record(outcome).is_some()
    }

    /// Validate every specification file in a directory, then cross-check them
    pub fn validate_all(&mut self, dir: impl AsRef<Path>) -> bool {
        self.validate_all_with_progress(dir, |_| {})
    }

    /// [`validate_all`](Self::validate_all) with a callback invoked before each file
    #[instrument(skip(self, dir, on_file), fields(dir = %dir.as_ref().display()))]
    pub fn validate_all_with_progress<F>(&mut self, dir: impl AsRef<Path>, mut on_file: F) -> bool
    where
        F: FnMut(Progress<'_>),
    {
        let dir = dir.as_ref();
        let files = match discover_spec_files(dir) {
            Ok(files) => files,
            Err(error) => {
                self.push(Finding::from_loader_error(&error));
                return false;
            }
        };

        if files.is_empty() {
            self.push(Finding::new(
                FindingKind::NoFiles,
                Some(dir),
                format!("No YAML files found in {}", dir.display()),
            ));
            return false;
        }

        info!(files = files.len(), "Validating specification directory");

        let total = files.len();
        let mut all_valid = true;
        let mut documents: Vec<Document> = Vec::new();
        for (index, path) in files.iter().enumerate() {
            on_file(Progress {
                current: index + 1,
                total,
                path,
            });
            let outcome = self.validator.validate_path(path);
            match self.record(outcome) {
                Some(document) => documents.push(document),
                None => all_valid = false,
            }
        }

        let mut cross_ok = true;
        if !documents.is_empty() {
            self.summary.documents_cross_checked += documents.len();
            let findings = self.checker.check(&documents);
            cross_ok = !findings.has_errors();
            self.extend(findings);
        }

        debug!(all_valid, cross_ok, "Directory validation finished");
        all_valid && cross_ok
    }

    /// Fold one outcome into the session, returning the document if it was valid
    fn record(&mut self, outcome: DocumentOutcome) -> Option<Document> {
        self.summary.files_checked += 1;
        let valid = outcome.is_valid();
        self.extend(outcome.findings);
        if valid {
            self.summary.files_valid += 1;
            outcome.document
        } else {
            None
        }
    }

    fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
        }
    }

    fn extend(&mut self, findings: Findings) {
        for finding in findings {
            self.push(finding);
        }
    }

    pub fn errors(&self) -> &[Finding] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Final verdict: no errors, and no warnings when strict
    pub fn passed(&self) -> bool {
        !self.has_errors() && !(self.strict && self.has_warnings())
    }

    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary {
            errors: self.errors.len(),
            warnings: self.warnings.len(),
            ..self.summary
        }
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            strict: self.strict,
            passed: self.passed(),
            summary: self.summary(),
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
        }
    }
}
