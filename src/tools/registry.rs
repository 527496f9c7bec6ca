//! Tool Registry
//!
//! Information Hiding:
//! - Tool storage and lookup implementation hidden
//! - Dispatch order (lookup, validate, execute) fixed in one place

use super::{Tool, ToolError, ToolMetadata, ToolResult};
use crate::core::client::CursorAdminClient;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool registry for managing available tools
///
/// Tools are listed in registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a new tool; a tool with the same name is replaced in place
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.metadata().name;
        tracing::info!("Registering tool: {}", name);

        match self.index.get(&name) {
            Some(&i) => self.tools[i] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| self.tools[i].clone())
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get all tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.metadata().name).collect()
    }

    /// Get all tool metadata
    pub fn list_tools(&self) -> Vec<ToolMetadata> {
        self.tools.iter().map(|tool| tool.metadata()).collect()
    }

    /// Catalog in the host's descriptor shape
    pub fn catalog(&self) -> Vec<Value> {
        self.tools.iter().map(|tool| tool.metadata().descriptor()).collect()
    }

    /// Resolve, validate and run a tool
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<ToolResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::MethodNotFound(name.to_string()))?;

        tool.validate(&args)?;

        tracing::debug!("Calling tool: {}", name);
        let result = tool.execute(args).await;
        if let Err(e) = &result {
            tracing::warn!("Tool '{}' failed: {}", name, e);
        }
        result
    }

    /// Registry exposing the Cursor admin operations
    pub fn with_client(client: Arc<CursorAdminClient>) -> Self {
        use super::cursor::{GetDailyUsageDataTool, GetSpendingDataTool, GetTeamMembersTool};

        let mut registry = Self::new();

        registry.register(Arc::new(GetTeamMembersTool::new(client.clone())));
        registry.register(Arc::new(GetDailyUsageDataTool::new(client.clone())));
        registry.register(Arc::new(GetSpendingDataTool::new(client)));

        registry
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn metadata(&self) -> ToolMetadata {
            crate::tool_metadata! {
                name: self.name,
                description: "Echo the message back",
                parameters: [
                    { name: "message", type: "string", description: "Text", required: true }
                ]
            }
        }

        async fn execute(&self, args: Value) -> Result<ToolResult, ToolError> {
            Ok(ToolResult::text(args["message"].as_str().unwrap_or_default()))
        }
    }

    fn registry() -> ToolRegistry {
        let client = Arc::new(CursorAdminClient::new("key_abc").unwrap());
        ToolRegistry::with_client(client)
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "echo" }));

        assert!(registry.has_tool("echo"));
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_registry_keeps_registration_order() {
        let registry = registry();

        assert_eq!(
            registry.tool_names(),
            vec!["get_team_members", "get_daily_usage_data", "get_spending_data"]
        );
        assert_eq!(registry.list_tools().len(), 3);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "echo" }));
        registry.register(Arc::new(EchoTool { name: "other" }));
        registry.register(Arc::new(EchoTool { name: "echo" }));

        assert_eq!(registry.tool_names(), vec!["echo", "other"]);
    }

    #[test]
    fn test_catalog_descriptors() {
        let catalog = registry().catalog();

        assert_eq!(catalog[0]["name"], "get_team_members");
        assert_eq!(
            catalog[0]["inputSchema"],
            json!({"type": "object", "properties": {}})
        );
        assert_eq!(catalog[1]["inputSchema"]["required"], json!(["startDate", "endDate"]));
        assert_eq!(
            catalog[2]["inputSchema"]["properties"]["sortDirection"]["enum"],
            json!(["asc", "desc"])
        );
    }

    #[tokio::test]
    async fn test_call_tool_dispatch() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "echo" }));

        let result = registry
            .call_tool("echo", json!({"message": "hi"}))
            .await
            .unwrap();
        assert_eq!(result.text_content(), "hi");

        let err = registry.call_tool("echo", json!({})).await.unwrap_err();
        assert_eq!(err, ToolError::InvalidParams("Invalid arguments: message: Required".to_string()));

        let err = registry.call_tool("missing", json!({})).await.unwrap_err();
        assert_eq!(err.code(), -32601);
        assert_eq!(err.to_string(), "Unknown tool: missing");
    }
}
