//! The rendered JSON Schemas must agree with the built-in checker
//!
//! External tools consume `Schema::to_json_schema`; these tests run a real
//! JSON Schema validator over the same documents the built-in checker sees.

use serde_json::{json, Value};
use specaudit_schemas::{DocumentType, SchemaValidator};

fn builtin_accepts(doc_type: DocumentType, doc: &Value) -> bool {
    let root = doc.as_object().cloned().unwrap();
    doc_type.schema().collect_errors(&root).is_empty()
}

fn json_schema_accepts(doc_type: DocumentType, doc: &Value) -> bool {
    let schema = doc_type.schema().to_json_schema();
    let validator = jsonschema::validator_for(&schema).expect("rendered schema should compile");
    validator.is_valid(doc)
}

fn assert_agree(doc_type: DocumentType, doc: Value, expected: bool) {
    assert_eq!(builtin_accepts(doc_type, &doc), expected, "built-in: {}", doc);
    assert_eq!(json_schema_accepts(doc_type, &doc), expected, "jsonschema: {}", doc);
}

#[test]
fn test_every_rendered_schema_compiles() {
    for doc_type in DocumentType::ALL {
        let schema = doc_type.schema().to_json_schema();
        assert!(jsonschema::validator_for(&schema).is_ok(), "{}", doc_type);
        assert_eq!(schema["title"], doc_type.as_str());
    }
}

#[test]
fn test_design_patterns_agreement() {
    let t = DocumentType::DesignPatterns;
    let entry = json!({
        "name": "Singleton",
        "category": "creational",
        "hints": ["getInstance"],
        "report_fields": ["location"],
    });

    assert_agree(t, json!({"patterns": [entry.clone()]}), true);
    assert_agree(t, json!({"patterns": []}), true);

    let mut bad_category = entry.clone();
    bad_category["category"] = json!("invalid_category");
    assert_agree(t, json!({"patterns": [bad_category]}), false);

    let mut missing = entry.clone();
    missing.as_object_mut().unwrap().remove("hints");
    assert_agree(t, json!({"patterns": [missing]}), false);

    let mut bad_item = entry.clone();
    bad_item["report_fields"] = json!(["ok", 1]);
    assert_agree(t, json!({"patterns": [bad_item]}), false);

    // extra fields stay allowed
    let mut extra = entry;
    extra["notes"] = json!("free text");
    assert_agree(t, json!({"patterns": [extra]}), true);

    assert_agree(t, json!({"patterns": {"name": "x"}}), false);
    assert_agree(t, json!({"patterns": ["x"]}), false);
}

#[test]
fn test_security_sections_agreement() {
    let t = DocumentType::SecurityVulnerabilities;
    let vulnerability = json!({
        "name": "XSS",
        "category": "Injection",
        "owasp_category": "A03:2021 - Injection",
        "severity": "Varies",
        "description": "Reflected input",
        "detection_hints": ["innerHTML"],
        "report_fields": ["location"],
    });

    assert_agree(
        t,
        json!({
            "vulnerabilities": [vulnerability.clone()],
            "severity_levels": [{"level": "High", "description": "d", "response_time": "1 day"}],
            "owasp_top_10_2021": ["A01"],
        }),
        true,
    );
    assert_agree(
        t,
        json!({
            "vulnerabilities": [vulnerability.clone()],
            "severity_levels": [{"level": "High"}],
        }),
        false,
    );
    assert_agree(
        t,
        json!({"vulnerabilities": [vulnerability.clone()], "owasp_top_10_2021": "A01"}),
        false,
    );

    let mut lowercase = vulnerability;
    lowercase["severity"] = json!("high");
    assert_agree(t, json!({"vulnerabilities": [lowercase]}), false);
}

#[test]
fn test_etl_and_algorithms_agreement() {
    let etl = json!({
        "name": "Deduplication",
        "id": 8,
        "category": "Clean",
        "hints": ["dedupe"],
        "report_fields": ["location"],
    });
    assert_agree(DocumentType::EtlSubsystems, json!({"etl_subsystems": [etl.clone()]}), true);

    let mut text_id = etl;
    text_id["id"] = json!("8");
    assert_agree(DocumentType::EtlSubsystems, json!({"etl_subsystems": [text_id]}), false);

    let algorithm = json!({
        "name": "Binary Search",
        "category": "search",
        "hints": ["bisect"],
        "report_fields": ["location"],
        "time_complexity": {"average": "O(log n)"},
        "space_complexity": "O(1)",
    });
    assert_agree(
        DocumentType::AlgorithmsDataStructures,
        json!({"algorithms_and_data_structures": [algorithm.clone()]}),
        true,
    );

    let mut flat = algorithm;
    flat["time_complexity"] = json!("O(log n)");
    assert_agree(
        DocumentType::AlgorithmsDataStructures,
        json!({"algorithms_and_data_structures": [flat]}),
        false,
    );
}
