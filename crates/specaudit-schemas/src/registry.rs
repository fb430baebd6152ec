//! Schema registry for the audit catalog document types
//!
//! Every catalog is one [`DocumentType`] variant with a static [`Schema`]
//! table. The tables are business rules of the catalog format and are not
//! configurable at runtime.
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of catalog document types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    DesignPatterns,
    SecurityVulnerabilities,
    AlgorithmsDataStructures,
    Datahub,
    FeasibilityAnalysis,
    EtlSubsystems,
    CloudArchitecture,
    RepoDiscovery,
}

impl DocumentType {
    /// Every document type, in classification priority order
    pub const ALL: [DocumentType; 8] = [
        DocumentType::DesignPatterns,
        DocumentType::SecurityVulnerabilities,
        DocumentType::AlgorithmsDataStructures,
        DocumentType::Datahub,
        DocumentType::FeasibilityAnalysis,
        DocumentType::EtlSubsystems,
        DocumentType::CloudArchitecture,
        DocumentType::RepoDiscovery,
    ];

    /// The tag used in reports and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::DesignPatterns => "design_patterns",
            DocumentType::SecurityVulnerabilities => "security_vulnerabilities",
            DocumentType::AlgorithmsDataStructures => "algorithms_data_structures",
            DocumentType::Datahub => "datahub",
            DocumentType::FeasibilityAnalysis => "feasibility_analysis",
            DocumentType::EtlSubsystems => "etl_subsystems",
            DocumentType::CloudArchitecture => "cloud_architecture",
            DocumentType::RepoDiscovery => "repo_discovery",
        }
    }

    /// The schema for this document type
    pub fn schema(&self) -> &'static Schema {
        schema_for(*self)
    }

    /// The root key holding this type's entry collection
    pub fn main_key(&self) -> &'static str {
        self.schema().main_key
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a document type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown document type '{0}'")]
pub struct UnknownDocumentType(pub String);

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownDocumentType(s.to_string()))
    }
}

/// The shape a field value must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    String,
    Integer,
    StringArray,
    Object,
}

impl FieldShape {
    /// JSON Schema type name used in messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldShape::String => "string",
            FieldShape::Integer => "integer",
            FieldShape::StringArray => "array",
            FieldShape::Object => "object",
        }
    }

    /// Whether the value has this shape (array items are checked separately)
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldShape::String => value.is_string(),
            FieldShape::Integer => {
                value.is_i64()
                    || value.is_u64()
                    || value.as_f64().map(|f| f.fract() == 0.0).unwrap_or(false)
            }
            FieldShape::StringArray => value.is_array(),
            FieldShape::Object => value.is_object(),
        }
    }

    fn json_schema(&self) -> Value {
        match self {
            FieldShape::String => json!({"type": "string"}),
            FieldShape::Integer => json!({"type": "integer"}),
            FieldShape::StringArray => json!({"type": "array", "items": {"type": "string"}}),
            FieldShape::Object => json!({"type": "object"}),
        }
    }
}

/// One field of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: FieldShape,
    pub required: bool,
    /// Legal values for restricted string fields
    pub allowed: Option<&'static [&'static str]>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, shape: FieldShape) -> Self {
        Self {
            name,
            shape,
            required: true,
            allowed: None,
        }
    }

    pub const fn optional(name: &'static str, shape: FieldShape) -> Self {
        Self {
            name,
            shape,
            required: false,
            allowed: None,
        }
    }

    pub const fn one_of(self, allowed: &'static [&'static str]) -> Self {
        Self {
            allowed: Some(allowed),
            ..self
        }
    }

    fn json_schema(&self) -> Value {
        let mut schema = self.shape.json_schema();
        if let (Some(allowed), Some(obj)) = (self.allowed, schema.as_object_mut()) {
            obj.insert("enum".to_string(), json!(allowed));
        }
        schema
    }
}

/// Items of an auxiliary root section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionItems {
    Strings,
    Entries(&'static [FieldSpec]),
}

/// An optional root-level section other than the main collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub key: &'static str,
    pub items: SectionItems,
}

/// Structural rules for one document type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub doc_type: DocumentType,
    pub main_key: &'static str,
    pub entry_fields: &'static [FieldSpec],
    pub sections: &'static [SectionSpec],
}

impl Schema {
    /// Look up an entry field by name
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.entry_fields.iter().find(|f| f.name == name)
    }

    /// Names of the required entry fields, in declaration order
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entry_fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
    }

    /// Render this schema as an equivalent Draft 7 JSON Schema
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        properties.insert(
            self.main_key.to_string(),
            json!({
                "type": "array",
                "items": entries_schema(self.entry_fields),
            }),
        );

        for section in self.sections {
            let items = match section.items {
                SectionItems::Strings => json!({"type": "string"}),
                SectionItems::Entries(fields) => entries_schema(fields),
            };
            properties.insert(
                section.key.to_string(),
                json!({"type": "array", "items": items}),
            );
        }

        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": self.doc_type.as_str(),
            "type": "object",
            "properties": properties,
            "required": [self.main_key],
        })
    }
}

fn entries_schema(fields: &[FieldSpec]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| (f.name.to_string(), f.json_schema()))
        .collect();
    let required: Vec<&str> = fields.iter().filter(|f| f.required).map(|f| f.name).collect();

    json!({
        "type": "object",
        "required": required,
        "properties": properties,
    })
}

/// Legal values of a design pattern's `category`
pub const PATTERN_CATEGORIES: &[&str] = &["creational", "structural", "behavioral", "architectural"];

/// Legal values of a vulnerability's `severity`
pub const SEVERITY_LEVELS: &[&str] = &["Critical", "High", "Medium", "Low", "Varies"];

const NAME: FieldSpec = FieldSpec::required("name", FieldShape::String);
const CATEGORY: FieldSpec = FieldSpec::required("category", FieldShape::String);
const HINTS: FieldSpec = FieldSpec::required("hints", FieldShape::StringArray);
const REPORT_FIELDS: FieldSpec = FieldSpec::required("report_fields", FieldShape::StringArray);

static DESIGN_PATTERNS: Schema = Schema {
    doc_type: DocumentType::DesignPatterns,
    main_key: "patterns",
    entry_fields: &[
        NAME,
        CATEGORY.one_of(PATTERN_CATEGORIES),
        HINTS,
        REPORT_FIELDS,
    ],
    sections: &[],
};

const SEVERITY_LEVEL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("level", FieldShape::String),
    FieldSpec::required("description", FieldShape::String),
    FieldSpec::required("response_time", FieldShape::String),
];

static SECURITY_VULNERABILITIES: Schema = Schema {
    doc_type: DocumentType::SecurityVulnerabilities,
    main_key: "vulnerabilities",
    entry_fields: &[
        NAME,
        CATEGORY,
        FieldSpec::required("owasp_category", FieldShape::String),
        FieldSpec::required("severity", FieldShape::String).one_of(SEVERITY_LEVELS),
        FieldSpec::required("description", FieldShape::String),
        FieldSpec::required("detection_hints", FieldShape::StringArray),
        FieldSpec::optional("patterns", FieldShape::StringArray),
        FieldSpec::optional("safe_alternatives", FieldShape::StringArray),
        REPORT_FIELDS,
    ],
    sections: &[
        SectionSpec {
            key: "severity_levels",
            items: SectionItems::Entries(SEVERITY_LEVEL_FIELDS),
        },
        SectionSpec {
            key: "owasp_top_10_2021",
            items: SectionItems::Strings,
        },
    ],
};

static ALGORITHMS_DATA_STRUCTURES: Schema = Schema {
    doc_type: DocumentType::AlgorithmsDataStructures,
    main_key: "algorithms_and_data_structures",
    entry_fields: &[
        NAME,
        CATEGORY,
        FieldSpec::optional("paths", FieldShape::StringArray),
        HINTS,
        FieldSpec::optional("time_complexity", FieldShape::Object),
        FieldSpec::optional("space_complexity", FieldShape::String),
        REPORT_FIELDS,
    ],
    sections: &[],
};

static DATAHUB: Schema = Schema {
    doc_type: DocumentType::Datahub,
    main_key: "datahub_entities",
    entry_fields: &[
        NAME,
        FieldSpec::required("urn_pattern", FieldShape::String),
        FieldSpec::required("aspect_name", FieldShape::String),
        REPORT_FIELDS,
    ],
    sections: &[],
};

static FEASIBILITY_ANALYSIS: Schema = Schema {
    doc_type: DocumentType::FeasibilityAnalysis,
    main_key: "feasibility_analysis",
    entry_fields: &[
        NAME,
        CATEGORY,
        FieldSpec::required("analysis_type", FieldShape::String),
        HINTS,
        REPORT_FIELDS,
    ],
    sections: &[],
};

static ETL_SUBSYSTEMS: Schema = Schema {
    doc_type: DocumentType::EtlSubsystems,
    main_key: "etl_subsystems",
    entry_fields: &[
        NAME,
        FieldSpec::required("id", FieldShape::Integer),
        CATEGORY,
        HINTS,
        REPORT_FIELDS,
    ],
    sections: &[],
};

static CLOUD_ARCHITECTURE: Schema = Schema {
    doc_type: DocumentType::CloudArchitecture,
    main_key: "cloud_architecture_patterns",
    entry_fields: &[NAME, CATEGORY, HINTS, REPORT_FIELDS],
    sections: &[],
};

static REPO_DISCOVERY: Schema = Schema {
    doc_type: DocumentType::RepoDiscovery,
    main_key: "repository_discovery",
    entry_fields: &[NAME, CATEGORY, HINTS, REPORT_FIELDS],
    sections: &[],
};

/// The schema for a document type
pub fn schema_for(doc_type: DocumentType) -> &'static Schema {
    match doc_type {
        DocumentType::DesignPatterns => &DESIGN_PATTERNS,
        DocumentType::SecurityVulnerabilities => &SECURITY_VULNERABILITIES,
        DocumentType::AlgorithmsDataStructures => &ALGORITHMS_DATA_STRUCTURES,
        DocumentType::Datahub => &DATAHUB,
        DocumentType::FeasibilityAnalysis => &FEASIBILITY_ANALYSIS,
        DocumentType::EtlSubsystems => &ETL_SUBSYSTEMS,
        DocumentType::CloudArchitecture => &CLOUD_ARCHITECTURE,
        DocumentType::RepoDiscovery => &REPO_DISCOVERY,
    }
}

/// The root key of a document type's entry collection
pub fn main_key_for(doc_type: DocumentType) -> &'static str {
    schema_for(doc_type).main_key
}
