//! MCP server over stdio (JSON-RPC 2.0)
//!
//! Reads one JSON-RPC message per line from stdin and writes one response
//! per line to stdout. Each message is handled on its own task, so a slow
//! tool call does not hold up later requests; responses go out in completion
//! order through a single writer. Tool listing and invocation are delegated
//! to a [`ToolRegistry`]; this module only owns the message framing and the
//! protocol-level methods.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{channel, Receiver};

use crate::tools::registry::ToolRegistry;

pub const JSONRPC_VERSION: &str = "2.0";
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Responses buffered between handler tasks and the writer
const RESPONSE_BUFFER: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MCPRequest {
    pub jsonrpc: String,
    /// Absent for notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MCPResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MCPError>,
}

impl MCPResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: Value, error: MCPError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MCPError {
    pub code: i32,
    pub message: String,
}

impl MCPError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(-32700, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(-32600, message)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(-32601, format!("Method not found: {}", method))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(-32602, message)
    }
}

impl fmt::Display for MCPError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Error {}] {}", self.code, self.message)
    }
}

impl std::error::Error for MCPError {}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

pub struct MCPServer {
    name: String,
    version: String,
    registry: ToolRegistry,
}

impl MCPServer {
    pub fn new(name: impl Into<String>, registry: ToolRegistry) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            registry,
        }
    }

    /// Serve stdin/stdout until stdin closes
    pub async fn run_stdio(self: Arc<Self>) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        tracing::info!("{} server running on stdio", self.name);
        self.serve(stdin, stdout).await
    }

    /// Serve newline-delimited JSON-RPC over any reader/writer pair.
    ///
    /// Returns once the reader hits EOF and every in-flight response has
    /// been written.
    pub async fn serve<R, W>(self: Arc<Self>, mut reader: R, writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (sender, receiver) = channel::<MCPResponse>(RESPONSE_BUFFER);

        let read_loop = async move {
            let mut buf = Vec::new();
            loop {
                buf.clear();
                if reader.read_until(b'\n', &mut buf).await? == 0 {
                    break;
                }
                if buf.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }

                let server = Arc::clone(&self);
                let sender = sender.clone();
                let line = buf.clone();
                tokio::spawn(async move {
                    if let Some(response) = server.handle_bytes(&line).await {
                        if sender.send(response).await.is_err() {
                            tracing::warn!("Writer closed, dropping response");
                        }
                    }
                });
            }

            tracing::info!("stdin closed, shutting down");
            drop(sender);
            Ok::<_, anyhow::Error>(())
        };

        let (read, write) = tokio::join!(read_loop, write_responses(receiver, writer));
        read?;
        write
    }

    /// Handle one raw message. Notifications produce no response.
    pub async fn handle_line(&self, line: &str) -> Option<MCPResponse> {
        self.handle_bytes(line.as_bytes()).await
    }

    async fn handle_bytes(&self, bytes: &[u8]) -> Option<MCPResponse> {
        let value: Value = match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Unparseable message: {}", e);
                return Some(MCPResponse::err(
                    Value::Null,
                    MCPError::parse_error(format!("Parse error: {}", e)),
                ));
            }
        };

        let id = value.get("id").cloned();
        match serde_json::from_value::<MCPRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(MCPResponse::err(
                id.unwrap_or(Value::Null),
                MCPError::invalid_request(format!("Invalid request: {}", e)),
            )),
        }
    }

    pub async fn handle_request(&self, request: MCPRequest) -> Option<MCPResponse> {
        let Some(id) = request.id else {
            tracing::debug!("Notification: {}", request.method);
            return None;
        };

        let result = match request.method.as_str() {
            "initialize" => Ok(self.initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.catalog() })),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(MCPError::method_not_found(other)),
        };

        Some(match result {
            Ok(result) => MCPResponse::ok(id, result),
            Err(error) => MCPResponse::err(id, error),
        })
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": self.name,
                "version": self.version,
            }
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, MCPError> {
        let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| MCPError::invalid_params(format!("Invalid tools/call params: {}", e)))?;

        let result = self
            .registry
            .call_tool(&params.name, params.arguments)
            .await?;

        serde_json::to_value(result)
            .map_err(|e| MCPError::new(-32603, format!("Failed to encode result: {}", e)))
    }
}

/// Single writer: one line per response, until every sender is gone
async fn write_responses<W>(mut receiver: Receiver<MCPResponse>, mut writer: W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = receiver.recv().await {
        let json = serde_json::to_string(&response)?;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
