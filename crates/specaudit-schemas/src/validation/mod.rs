//! Validation of audit catalog documents
//!
//! Single documents are checked by [`DocumentValidator`] against the static
//! schema of their detected type. Documents that pass are handed to the
//! [`CrossDocumentChecker`]. [`ValidationSession`] drives both and keeps the
//! ordered error and warning lists.
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod cross;
pub mod document;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use base::{SchemaValidator, ValidationContext, ValidationHelpers};
pub use cross::CrossDocumentChecker;
pub use document::{Document, DocumentOutcome, DocumentValidator};
pub use error::{Finding, FindingKind, Findings, Severity, ValidationError, ValidationResult, Violation};
pub use session::{Progress, SessionReport, ValidationSession, ValidationSummary};
