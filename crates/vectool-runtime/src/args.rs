//! Typed access to a call's argument object.

use serde_json::{Map, Value};

use vectool_protocol::schema::json_type_name;
use vectool_types::{Document, ToolError};

/// The argument object of one call.
///
/// Accessors fail with `InvalidArgument` naming the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs(Map<String, Value>);

impl ToolArgs {
    /// Normalises raw arguments: `null` becomes `{}`, anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self, ToolError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self(map)),
            other => Err(ToolError::invalid_argument(
                "arguments",
                format!("must be an object, got {}", json_type_name(&other)),
            )),
        }
    }

    /// The arguments as a JSON object value.
    pub fn as_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Raw access; `null` counts as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// A required, non-empty string.
    pub fn require_str(&self, field: &str) -> Result<&str, ToolError> {
        match self.get(field) {
            None => Err(ToolError::invalid_argument(field, "is required")),
            Some(Value::String(s)) if s.trim().is_empty() => {
                Err(ToolError::invalid_argument(field, "must not be empty"))
            }
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(wrong_type(field, "string", other)),
        }
    }

    /// An optional string.
    pub fn optional_str(&self, field: &str) -> Result<Option<&str>, ToolError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(wrong_type(field, "string", other)),
        }
    }

    /// An optional non-negative integer, `default` when absent.
    pub fn optional_usize(&self, field: &str, default: usize) -> Result<usize, ToolError> {
        match self.get(field) {
            None => Ok(default),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| wrong_type(field, "non-negative integer", value)),
        }
    }

    /// A positive `limit`-style integer, `default` when absent.
    pub fn limit(&self, field: &str, default: usize) -> Result<usize, ToolError> {
        let limit = self.optional_usize(field, default)?;
        if limit == 0 {
            return Err(ToolError::invalid_argument(field, "must be at least 1"));
        }
        Ok(limit)
    }

    /// A required array of document objects.
    pub fn documents(&self, field: &str) -> Result<Vec<Document>, ToolError> {
        let items = match self.get(field) {
            None => return Err(ToolError::invalid_argument(field, "is required")),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(wrong_type(field, "array", other)),
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if !item.is_object() {
                    return Err(ToolError::invalid_argument(
                        &format!("{field}[{i}]"),
                        format!("must be an object, got {}", json_type_name(item)),
                    ));
                }
                serde_json::from_value(item.clone())
                    .map_err(|e| ToolError::invalid_argument(&format!("{field}[{i}]"), e))
            })
            .collect()
    }
}

fn wrong_type(field: &str, expected: &str, actual: &Value) -> ToolError {
    ToolError::invalid_argument(
        field,
        format!("must be a {expected}, got {}", json_type_name(actual)),
    )
}
