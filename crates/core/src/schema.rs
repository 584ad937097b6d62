//! Field-level validation rules declared per module type
//!
//! A module may ship a `config.schema.json` describing the fields its
//! instances accept. The rule vocabulary is deliberately small: required-ness
//! plus three primitive type tags. Anything outside that vocabulary makes the
//! file malformed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive type tags supported by the rule vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// A whole number. JSON booleans do not qualify.
    Integer,
    /// A JSON string.
    String,
    /// A JSON object.
    Object,
}

impl FieldType {
    /// Whether a runtime JSON value carries this tag.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::String => value.is_string(),
            Self::Object => value.is_object(),
        }
    }

    /// The tag name as written in schema files and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::Object => "object",
        }
    }
}

/// Diagnostic name for the runtime type of a JSON value.
#[must_use]
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validation rule for a single configuration field.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FieldRule {
    /// Whether the field must be present in every instance's config.
    #[serde(default)]
    pub required: bool,
    /// Expected primitive type of the field, if constrained.
    #[serde(default, rename = "type")]
    pub field_type: Option<FieldType>,
}

/// All rules for a module type, keyed by field name.
///
/// A `BTreeMap` so that violations are reported in a stable order.
pub type Schema = BTreeMap<String, FieldRule>;
