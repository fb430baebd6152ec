//! Error types for specification loading
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Failures while reading or parsing a specification file
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Error reading {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specs directory does not exist or is not a directory
    #[error("Specs directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Malformed YAML
    #[error("YAML syntax error in {}: {source}", path.display())]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Content that is not UTF-8 text
    #[error("YAML syntax error in {}: {source}", path.display())]
    EncodingError {
        path: PathBuf,
        source: std::str::Utf8Error,
    },

    /// YAML that has no JSON-compatible representation (e.g. sequence keys)
    #[error("YAML syntax error in {}: unsupported structure: {source}", path.display())]
    ConversionError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The root node is not a mapping
    #[error("Specification file {} must contain a dictionary at root level", path.display())]
    RootShapeError { path: PathBuf, found: &'static str },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create an encoding error with path context
    pub fn encoding_error(path: PathBuf, error: std::str::Utf8Error) -> Self {
        Self::EncodingError {
            path,
            source: error,
        }
    }

    /// Create a YAML-to-JSON conversion error with path context
    pub fn conversion_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::ConversionError {
            path,
            source: error,
        }
    }

    /// Create a root shape error
    pub fn root_shape(path: PathBuf, found: &'static str) -> Self {
        Self::RootShapeError { path, found }
    }

    /// Get the path associated with this error
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::IoError { path, .. }
            | Self::DirectoryNotFound { path }
            | Self::YamlParseError { path, .. }
            | Self::EncodingError { path, .. }
            | Self::ConversionError { path, .. }
            | Self::RootShapeError { path, .. } => path,
        }
    }

    /// Whether the file was read but its content is malformed
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::YamlParseError { .. }
                | Self::EncodingError { .. }
                | Self::ConversionError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let path = PathBuf::from("test.yaml");

        let io_err = LoaderError::io_error(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
        );
        assert!(matches!(io_err, LoaderError::IoError { .. }));
        assert_eq!(io_err.path(), &path);
        assert!(io_err.to_string().starts_with("Error reading test.yaml"));
        assert!(!io_err.is_syntax_error());
    }

    #[test]
    fn test_syntax_error_message() {
        let parse_err = LoaderError::yaml_parse_error(
            PathBuf::from("bad.yaml"),
            serde_yaml::from_str::<serde_yaml::Value>("{").unwrap_err(),
        );
        assert!(parse_err.is_syntax_error());
        assert!(parse_err.to_string().starts_with("YAML syntax error in bad.yaml"));
    }

    #[test]
    fn test_encoding_error_is_syntax() {
        let bytes = [0xffu8, 0xfe];
        let err = LoaderError::encoding_error(
            PathBuf::from("bin.yaml"),
            std::str::from_utf8(&bytes).unwrap_err(),
        );
        assert!(err.is_syntax_error());
        assert!(err.to_string().starts_with("YAML syntax error in bin.yaml"));
    }

    #[test]
    fn test_root_shape_message() {
        let err = LoaderError::root_shape(PathBuf::from("list.yaml"), "sequence");
        assert_eq!(
            err.to_string(),
            "Specification file list.yaml must contain a dictionary at root level"
        );
    }
}
