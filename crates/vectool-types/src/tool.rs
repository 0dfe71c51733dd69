//! Tool metadata: the part of a tool both transports publish.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One declared argument of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolArgument {
    /// Argument name.
    pub name: String,
    /// JSON Schema type (string, integer, number, boolean, object, array).
    #[serde(rename = "type")]
    pub arg_type: String,
    /// Human-readable description.
    pub description: String,
    /// Whether this argument is required.
    #[serde(default)]
    pub required: bool,
    /// Default value if not required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ToolArgument {
    /// A required argument.
    pub fn required(name: &str, arg_type: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            arg_type: arg_type.to_string(),
            description: description.to_string(),
            required: true,
            default: None,
        }
    }

    /// An optional argument.
    pub fn optional(name: &str, arg_type: &str, description: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, arg_type, description)
        }
    }

    /// Sets the advertised default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Name, description and arguments of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Description shown to callers.
    pub description: String,
    /// Declared arguments.
    #[serde(default)]
    pub arguments: Vec<ToolArgument>,
}

impl ToolDefinition {
    /// Creates a definition without arguments.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arguments: Vec::new(),
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, argument: ToolArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Builds the JSON Schema `input_schema` from the declared arguments.
    ///
    /// Both transports publish this exact value, so listings stay identical.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for arg in &self.arguments {
            let mut prop = Map::new();
            prop.insert("type".to_string(), Value::String(arg.arg_type.clone()));
            prop.insert(
                "description".to_string(),
                Value::String(arg.description.clone()),
            );
            if let Some(default) = &arg.default {
                prop.insert("default".to_string(), default.clone());
            }
            properties.insert(arg.name.clone(), Value::Object(prop));
            if arg.required {
                required.push(Value::String(arg.name.clone()));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }

        Value::Object(schema)
    }
}
