//! Schema and type listing handlers

use crate::cli::{OutputFormat, SchemaArgs};
use crate::error::Result;
use crate::output::OutputWriter;
use serde::Serialize;
use specaudit_schemas::{DocumentType, SIGNATURES};

/// One row of `specaudit types`
#[derive(Debug, Serialize)]
struct TypeInfo {
    #[serde(rename = "type")]
    doc_type: DocumentType,
    signature_key: &'static str,
    required_fields: Vec<&'static str>,
}

/// Handle the schema command
pub fn handle_schema(args: SchemaArgs, output: &mut OutputWriter) -> Result<()> {
    let doc_type: DocumentType = args.doc_type.parse()?;
    output.data(&doc_type.schema().to_json_schema())
}

/// Handle the types command
pub fn handle_types(output: &mut OutputWriter) -> Result<()> {
    let types: Vec<TypeInfo> = SIGNATURES
        .iter()
        .map(|(key, doc_type)| TypeInfo {
            doc_type: *doc_type,
            signature_key: *key,
            required_fields: doc_type.schema().required_fields().collect(),
        })
        .collect();

    if output.format() != OutputFormat::Human {
        return output.data(&types);
    }

    let rows = types
        .iter()
        .map(|t| {
            vec![
                t.doc_type.to_string(),
                t.signature_key.to_string(),
                t.required_fields.join(", "),
            ]
        })
        .collect();
    output.table(&["TYPE", "SIGNATURE KEY", "REQUIRED FIELDS"], rows)
}
