//! YAML parsing and specification file discovery
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::{Map, Value};
use serde_yaml::Value as YamlValue;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// File extensions recognised as specification files
pub const SPEC_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Whether a path names a specification file by extension
pub fn is_spec_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SPEC_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List the specification files directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into.
pub fn discover_spec_files(dir: &Path) -> LoaderResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LoaderError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries =
        std::fs::read_dir(dir).map_err(|e| LoaderError::io_error(dir.to_path_buf(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoaderError::io_error(dir.to_path_buf(), e))?;
        let path = entry.path();
        if path.is_file() && is_spec_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "Discovered specification files");
    Ok(files)
}

/// Parser turning YAML text into a root mapping
#[derive(Debug, Default, Clone, Copy)]
pub struct SpecParser;

impl SpecParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a specification file
    ///
    /// Content that is not UTF-8 is a syntax error, not an I/O failure.
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Map<String, Value>> {
        let bytes =
            std::fs::read(path).map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;
        trace!(path = %path.display(), bytes = bytes.len(), "Read specification file");

        let content = std::str::from_utf8(&bytes)
            .map_err(|e| LoaderError::encoding_error(path.to_path_buf(), e))?;
        self.parse_content(content, path)
    }

    /// Parse YAML content; `path` is only used for error context
    pub fn parse_content(&self, content: &str, path: &Path) -> LoaderResult<Map<String, Value>> {
        if content.trim().is_empty() {
            return Err(LoaderError::root_shape(path.to_path_buf(), "null"));
        }

        let mut yaml_value: YamlValue = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;
        yaml_value
            .apply_merge()
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        if !yaml_value.is_mapping() {
            return Err(LoaderError::root_shape(
                path.to_path_buf(),
                yaml_kind(&yaml_value),
            ));
        }

        // Convert to JSON Value for consistent handling
        stringify_scalar_keys(&mut yaml_value);
        match serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::conversion_error(path.to_path_buf(), e))?
        {
            Value::Object(map) => Ok(map),
            _ => Err(LoaderError::root_shape(path.to_path_buf(), "mapping")),
        }
    }
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "boolean",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}

/// Rewrite null, boolean and numeric mapping keys as strings.
///
/// Sequence and mapping keys are left alone and fail the JSON conversion.
fn stringify_scalar_keys(value: &mut YamlValue) {
    match value {
        YamlValue::Sequence(items) => items.iter_mut().for_each(stringify_scalar_keys),
        YamlValue::Mapping(map) => {
            for (key, mut item) in std::mem::take(map) {
                stringify_scalar_keys(&mut item);
                let key = match key {
                    YamlValue::Null => YamlValue::String("null".to_string()),
                    YamlValue::Bool(b) => YamlValue::String(b.to_string()),
                    YamlValue::Number(n) => YamlValue::String(n.to_string()),
                    other => other,
                };
                map.insert(key, item);
            }
        }
        YamlValue::Tagged(tagged) => stringify_scalar_keys(&mut tagged.value),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_spec_file_detection() {
        assert!(is_spec_file(Path::new("patterns.yaml")));
        assert!(is_spec_file(Path::new("patterns.yml")));
        assert!(is_spec_file(Path::new("PATTERNS.YAML")));
        assert!(!is_spec_file(Path::new("patterns.json")));
        assert!(!is_spec_file(Path::new("patterns")));
    }

    #[test]
    fn test_parse_mapping() {
        let parser = SpecParser::new();
        let root = parser
            .parse_content("patterns:\n  - name: Singleton\n", Path::new("a.yaml"))
            .unwrap();
        assert!(root["patterns"].is_array());
        assert_eq!(root["patterns"][0]["name"], "Singleton");
    }

    #[test]
    fn test_parse_rejects_non_mapping_root() {
        let parser = SpecParser::new();

        let err = parser
            .parse_content("- a\n- b\n", Path::new("list.yaml"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::RootShapeError { found: "sequence", .. }));

        let err = parser.parse_content("", Path::new("empty.yaml")).unwrap_err();
        assert!(matches!(err, LoaderError::RootShapeError { found: "null", .. }));

        let err = parser.parse_content("just text", Path::new("s.yaml")).unwrap_err();
        assert!(matches!(err, LoaderError::RootShapeError { found: "string", .. }));
    }

    #[test]
    fn test_parse_syntax_error() {
        let parser = SpecParser::new();
        let err = parser
            .parse_content("invalid: yaml: syntax: error:\n  - unclosed", Path::new("bad.yaml"))
            .unwrap_err();
        assert!(err.is_syntax_error());
        assert!(err.to_string().contains("YAML syntax error"));
    }

    #[test]
    fn test_parse_resolves_merge_keys() {
        let parser = SpecParser::new();
        let content = "defaults: &d {category: creational, hints: [x], report_fields: [y]}\n\
                       patterns:\n  - <<: *d\n    name: A\n";
        let root = parser.parse_content(content, Path::new("merge.yaml")).unwrap();

        let entry = &root["patterns"][0];
        assert_eq!(entry["name"], "A");
        assert_eq!(entry["category"], "creational");
        assert_eq!(entry["hints"][0], "x");
        assert!(entry.get("<<").is_none());
    }

    #[test]
    fn test_parse_stringifies_scalar_keys() {
        let parser = SpecParser::new();
        let root = parser
            .parse_content("~: 1\ntrue: yes\n3: three\npatterns: []\n", Path::new("keys.yaml"))
            .unwrap();
        assert_eq!(root["null"], 1);
        assert!(root.contains_key("true"));
        assert_eq!(root["3"], "three");

        let err = parser
            .parse_content("? [a, b]\n: 1\n", Path::new("seq_key.yaml"))
            .unwrap_err();
        assert!(err.is_syntax_error());
    }

    #[test]
    fn test_parse_file_invalid_utf8_is_syntax_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bin.yaml");
        fs::write(&path, [0xffu8, 0xfe, 0x00]).unwrap();

        let err = SpecParser::new().parse_file(&path).unwrap_err();
        assert!(matches!(err, LoaderError::EncodingError { .. }));
        assert!(err.is_syntax_error());
    }

    #[test]
    fn test_parse_file_missing_is_io_error() {
        let dir = tempdir().unwrap();
        let err = SpecParser::new()
            .parse_file(&dir.path().join("missing.yaml"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::IoError { .. }));
    }

    #[test]
    fn test_discover_spec_files_sorted_and_flat() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.yaml"), "patterns: []").unwrap();
        fs::write(dir.path().join("a.yml"), "patterns: []").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.yaml"), "patterns: []").unwrap();

        let files = discover_spec_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.yml", "b.yaml"]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = discover_spec_files(&missing).unwrap_err();
        assert!(matches!(err, LoaderError::DirectoryNotFound { .. }));
    }
}
