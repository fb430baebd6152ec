//! Specaudit Schemas - registry, classifier and validators for audit catalogs
//!
//! This crate validates the YAML specification documents that describe the
//! audit catalogs (design patterns, security vulnerabilities, algorithms,
//! DataHub entities, feasibility analyses, ETL subsystems, cloud architecture
//! patterns and repository discovery rules).
//!
//! ## Pipeline
//!
//! - **Schema Registry** ([`registry`]): one static schema per [`DocumentType`]
//! - **Type Classifier** ([`classify`]): picks the document type from root keys
//! - **Document Validator** ([`validation::document`]): parse, classify and
//!   schema-check a single file
//! - **Cross-Document Checker** ([`validation::cross`]): duplicate names and
//!   empty metadata across every valid document
//! - **Validation Session** ([`validation::session`]): runs the above over a
//!   file or a directory and owns the verdict
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use specaudit_schemas::ValidationSession;
//!
//! let mut session = ValidationSession::new(false);
//! session.validate_all("specs");
//!
//! for error in session.errors() {
//!     println!("error: {}", error);
//! }
//! for warning in session.warnings() {
//!     println!("warning: {}", warning);
//! }
//! std::process::exit(if session.passed() { 0 } else { 1 });
//! ```
//!
//! ## Strict Mode
//!
//! A strict session collects exactly the same findings as a lenient one. The
//! difference is in [`ValidationSession::passed`]: under strict mode any
//! warning fails the session.
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

pub mod classify;
pub mod loader;
pub mod registry;
pub mod validation;

// Re-export commonly used types for convenience
pub use classify::{classify, signature_matches, SIGNATURES};
pub use registry::{
    main_key_for, schema_for, DocumentType, FieldShape, FieldSpec, Schema, SectionItems,
    SectionSpec, UnknownDocumentType,
};
pub use validation::{
    CrossDocumentChecker, Document, DocumentOutcome, DocumentValidator, Finding, FindingKind,
    Findings, Progress, SchemaValidator, SessionReport, Severity, ValidationContext,
    ValidationError, ValidationHelpers, ValidationResult, ValidationSession, ValidationSummary,
    Violation,
};
