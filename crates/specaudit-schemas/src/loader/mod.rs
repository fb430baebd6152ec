//! Specification file loading
//!
//! This module covers the parse step of document validation:
//! - Discovery of `.yaml`/`.yml` files in a specs directory
//! - YAML parsing with a mapping-at-root check
//! - Conversion to `serde_json` values for schema checks
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use specaudit_schemas::loader::{discover_spec_files, SpecParser};
//! use std::path::Path;
//!
//! let parser = SpecParser::new();
//! for path in discover_spec_files(Path::new("specs"))? {
//!     let root = parser.parse_file(&path)?;
//!     println!("{}: {} root keys", path.display(), root.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;

pub use error::{LoaderError, LoaderResult};
pub use parser::{discover_spec_files, is_spec_file, SpecParser, SPEC_EXTENSIONS};
