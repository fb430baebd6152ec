//! Base validation trait and common utilities
//!
//! Copyright (c) 2025 Specaudit Team
//! Licensed under the Apache-2.0 license

use crate::registry::{FieldShape, FieldSpec};
use crate::validation::error::{ValidationError, ValidationResult};
use serde_json::{Map, Value};

/// Tracks the location inside a document while walking it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    segments: Vec<String>,
}

impl ValidationContext {
    /// Create a context positioned at the document root
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child context for a mapping key
    pub fn child<P: AsRef<str>>(&self, key: P) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.as_ref().to_string());
        Self { segments }
    }

    /// Create a child context for a sequence index
    pub fn child_index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    /// Location rendered as `patterns -> 0 -> category`
    pub fn location(&self) -> String {
        if self.segments.is_empty() {
            "(root)".to_string()
        } else {
            self.segments.join(" -> ")
        }
    }
}

/// Base trait for structural validators
pub trait SchemaValidator {
    /// The type being validated
    type Input: ?Sized;

    /// Collect every violation under the given context
    fn validate_with_context(
        &self,
        input: &Self::Input,
        context: &ValidationContext,
    ) -> Vec<ValidationError>;

    /// Collect every violation from the document root
    fn collect_errors(&self, input: &Self::Input) -> Vec<ValidationError> {
        self.validate_with_context(input, &ValidationContext::new())
    }

    /// Validate and report the first violation, if any
    fn validate(&self, input: &Self::Input) -> ValidationResult<()> {
        match self.collect_errors(input).into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Helper functions for common validation patterns
pub struct ValidationHelpers;

impl ValidationHelpers {
    /// Short rendering of a value for messages, matching its YAML spelling
    pub fn describe_value(value: &Value) -> String {
        match value {
            Value::String(s) => format!("'{}'", s),
            Value::Null => "None".to_string(),
            other => other.to_string(),
        }
    }

    /// Validate that a value is one of the legal strings
    pub fn validate_enum_value(
        value: &str,
        allowed_values: &[&str],
        context: &ValidationContext,
    ) -> ValidationResult<()> {
        if allowed_values.contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::with_violations(
                context.location(),
                format!("'{}' is not one of [{}]", value, allowed_values.join(", ")),
                vec![ValidationError::create_violation(
                    "enum_value",
                    format!("one of: {}", allowed_values.join(", ")),
                    value.to_string(),
                )],
            ))
        }
    }

    /// Validate that a value has the expected type
    pub fn validate_type(
        value: &Value,
        expected: &str,
        accepts: bool,
        context: &ValidationContext,
    ) -> ValidationResult<()> {
        if accepts {
            return Ok(());
        }
        let actual = Self::describe_value(value);
        Err(ValidationError::with_violations(
            context.location(),
            format!("{} is not of type '{}'", actual, expected),
            vec![ValidationError::create_violation(
                "type",
                expected.to_string(),
                actual,
            )],
        ))
    }

    /// Validate that a required field is present in a mapping
    pub fn validate_required_field(
        entry: &Map<String, Value>,
        field_name: &str,
        context: &ValidationContext,
    ) -> ValidationResult<()> {
        if entry.contains_key(field_name) {
            Ok(())
        } else {
            Err(ValidationError::with_violations(
                context.location(),
                format!("'{}' is a required property", field_name),
                vec![ValidationError::create_violation(
                    "required",
                    format!("{} to be present", field_name),
                    "field is missing",
                )],
            ))
        }
    }

    /// Validate every item of a sequence is a string
    pub fn validate_string_items(items: &[Value], context: &ValidationContext) -> Vec<ValidationError> {
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                Self::validate_type(item, "string", item.is_string(), &context.child_index(i)).err()
            })
            .collect()
    }

    /// Validate one field value against its spec: shape, items and enum
    pub fn validate_field(
        spec: &FieldSpec,
        value: &Value,
        context: &ValidationContext,
    ) -> Vec<ValidationError> {
        if let Err(error) =
            Self::validate_type(value, spec.shape.type_name(), spec.shape.accepts(value), context)
        {
            return vec![error];
        }

        let mut errors = Vec::new();
        if let (FieldShape::StringArray, Value::Array(items)) = (spec.shape, value) {
            errors.extend(Self::validate_string_items(items, context));
        }
        if let (Some(allowed), Some(text)) = (spec.allowed, value.as_str()) {
            if let Err(error) = Self::validate_enum_value(text, allowed, context) {
                errors.push(error);
            }
        }
        errors
    }

    /// Validate a mapping against a field table
    pub fn validate_fields(
        fields: &[FieldSpec],
        entry: &Map<String, Value>,
        context: &ValidationContext,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for spec in fields.iter().filter(|f| f.required) {
            if let Err(error) = Self::validate_required_field(entry, spec.name, context) {
                errors.push(error);
            }
        }

        for spec in fields {
            if let Some(value) = entry.get(spec.name) {
                errors.extend(Self::validate_field(spec, value, &context.child(spec.name)));
            }
        }

        errors
    }
}
