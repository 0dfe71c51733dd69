//! Validation of tool arguments against a declared input schema.
//!
//! Only the subset the tool catalog declares is checked: an object with
//! `properties` carrying a JSON `type`, and a `required` list.

use serde_json::{Map, Value};
use thiserror::Error;

/// Schema validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A required field is absent.
    #[error("missing required field: {field}")]
    MissingField { field: String },
    /// A field has the wrong JSON type.
    #[error("field '{field}' must be of type {expected}, got {actual}")]
    WrongType {
        field: String,
        expected: String,
        actual: &'static str,
    },
    /// The arguments are not a JSON object.
    #[error("arguments must be an object, got {actual}")]
    NotAnObject { actual: &'static str },
    /// The schema itself is malformed.
    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },
}

impl SchemaError {
    /// Name of the offending field, if the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } | Self::WrongType { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Returns the JSON type name of a value.
pub fn json_type_name(value: &Value) -> &'static str {
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

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

/// Checks `input` against `schema`: required fields present, declared
/// property types respected. `null` values of optional fields are accepted
/// as "not supplied".
pub fn validate_arguments(schema: &Value, input: &Value) -> Result<(), SchemaError> {
    let input_obj = input.as_object().ok_or_else(|| SchemaError::NotAnObject {
        actual: json_type_name(input),
    })?;

    if let Some(required) = schema.get("required") {
        let required = required.as_array().ok_or_else(|| SchemaError::InvalidSchema {
            message: "'required' must be an array".to_string(),
        })?;
        for field in required {
            let field_name = field.as_str().ok_or_else(|| SchemaError::InvalidSchema {
                message: "required field names must be strings".to_string(),
            })?;
            match input_obj.get(field_name) {
                None | Some(Value::Null) => {
                    return Err(SchemaError::MissingField {
                        field: field_name.to_string(),
                    })
                }
                Some(_) => {}
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        check_property_types(properties, input_obj)?;
    }

    Ok(())
}

fn check_property_types(
    properties: &Map<String, Value>,
    input: &Map<String, Value>,
) -> Result<(), SchemaError> {
    for (name, prop) in properties {
        let Some(expected) = prop.get("type").and_then(Value::as_str) else {
            continue;
        };
        match input.get(name) {
            None | Some(Value::Null) => {}
            Some(value) if type_matches(expected, value) => {}
            Some(value) => {
                return Err(SchemaError::WrongType {
                    field: name.clone(),
                    expected: expected.to_string(),
                    actual: json_type_name(value),
                })
            }
        }
    }
    Ok(())
}
