//! Tool System - Exposes client operations as named, schema-described tools
//!
//! Information Hiding:
//! - Tool execution details hidden behind trait
//! - Argument schemas declared once in metadata and enforced centrally
//! - Client errors mapped onto the host's error-signal vocabulary

pub mod cursor;
pub mod macros;
pub mod registry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use thiserror::Error;

use crate::core::mcp::MCPError;

/// Tool parameter schema definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolParameter {
    pub name: String,
    pub param_type: String,
    pub description: String,
    pub required: bool,
    /// Allowed string values, if restricted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

/// Tool metadata - describes what the tool does and how to call it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

impl fmt::Display for ToolMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.description)
    }
}

impl ToolMetadata {
    /// JSON schema of the tool's arguments
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.parameters {
            let mut schema = json!({
                "type": param.param_type,
                "description": param.description,
            });
            if let Some(values) = &param.allowed_values {
                schema["enum"] = json!(values);
            }
            properties.insert(param.name.clone(), schema);
        }

        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }

    /// Catalog entry as listed to the host
    pub fn descriptor(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }

    /// Check arguments against the declared parameters, collecting every failure
    pub fn validate_arguments(&self, args: &Value) -> Result<(), ToolError> {
        let empty = Map::new();
        let object = match args {
            Value::Null => &empty,
            Value::Object(object) => object,
            other => {
                return Err(ToolError::invalid_arguments(vec![format!(
                    "Expected object, received {}",
                    json_type(other)
                )]))
            }
        };

        let mut issues = Vec::new();
        for param in &self.parameters {
            match object.get(&param.name) {
                None => {
                    if param.required {
                        issues.push(format!("{}: Required", param.name));
                    }
                }
                Some(value) => {
                    let actual = json_type(value);
                    if actual != param.param_type {
                        issues.push(format!(
                            "{}: Expected {}, received {}",
                            param.name, param.param_type, actual
                        ));
                        continue;
                    }
                    if let (Some(allowed), Some(s)) = (&param.allowed_values, value.as_str()) {
                        if !allowed.iter().any(|v| v == s) {
                            let expected = allowed
                                .iter()
                                .map(|v| format!("'{}'", v))
                                .collect::<Vec<_>>()
                                .join(" | ");
                            issues.push(format!(
                                "{}: Invalid enum value. Expected {}, received '{}'",
                                param.name, expected, s
                            ));
                        }
                    }
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ToolError::invalid_arguments(issues))
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One item of a tool's output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Result of a tool execution, in the host's content-envelope shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
        }
    }

    /// Pretty-printed JSON of `value` as a single text item
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ToolError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| ToolError::Internal(format!("Failed to serialize result: {}", e)))?;
        Ok(Self::text(text))
    }

    /// Concatenated text of all items
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Failure signals understood by the tool host
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("{0}")]
    InvalidParams(String),

    #[error("Unknown tool: {0}")]
    MethodNotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ToolError {
    pub fn invalid_arguments(issues: Vec<String>) -> Self {
        ToolError::InvalidParams(format!("Invalid arguments: {}", issues.join(", ")))
    }

    /// Wrap a failure raised while the tool was running
    pub fn execution_failed(err: impl fmt::Display) -> Self {
        ToolError::Internal(format!("Tool execution failed: {}", err))
    }

    /// JSON-RPC error code
    pub fn code(&self) -> i32 {
        match self {
            ToolError::InvalidParams(_) => -32602,
            ToolError::MethodNotFound(_) => -32601,
            ToolError::Internal(_) => -32603,
        }
    }
}

impl From<ToolError> for MCPError {
    fn from(err: ToolError) -> Self {
        MCPError::new(err.code(), err.to_string())
    }
}

/// Tool trait - All tools must implement this
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get tool metadata (name, description, parameters)
    fn metadata(&self) -> ToolMetadata;

    /// Execute the tool with already validated arguments
    async fn execute(&self, args: Value) -> Result<ToolResult, ToolError>;

    /// Validate arguments before execution
    fn validate(&self, args: &Value) -> Result<(), ToolError> {
        self.metadata().validate_arguments(args)
    }
}
