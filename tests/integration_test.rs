//! Integration tests for the MCP server
//!
//! The Cursor API is replaced by a local mock server, so no API key is needed.

use cursor_admin::{ApiConfig, CursorAdminClient, MCPServer, ToolRegistry, DAY_MS};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_for(mock: &MockServer) -> MCPServer {
    let config = ApiConfig::default().with_base_url(mock.uri());
    let client = CursorAdminClient::with_config("key_abc", &config).unwrap();
    MCPServer::new("cursor-admin-mcp", ToolRegistry::with_client(Arc::new(client)))
}

async fn exchange(server: &MCPServer, request: Value) -> Value {
    let response = server
        .handle_line(&request.to_string())
        .await
        .expect("request with id must be answered");
    serde_json::to_value(response).unwrap()
}

#[tokio::test]
async fn test_tools_list_catalog() {
    let mock = MockServer::start().await;
    let server = server_for(&mock).await;

    let response = exchange(&server, json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})).await;

    let names: Vec<&str> = response["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["get_team_members", "get_daily_usage_data", "get_spending_data"]
    );
    assert_eq!(
        response["result"]["tools"][2]["inputSchema"]["properties"]["pageSize"]["type"],
        "number"
    );
}

#[tokio::test]
async fn test_call_get_team_members_end_to_end() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/members"))
        .and(header("authorization", "Basic a2V5X2FiYzo="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "teamMembers": [{"name": "A", "email": "a@x.com", "role": "admin"}]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock).await;
    let response = exchange(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": "get_team_members", "arguments": {}}
        }),
    )
    .await;

    let content = &response["result"]["content"][0];
    assert_eq!(content["type"], "text");
    let members: Value = serde_json::from_str(content["text"].as_str().unwrap()).unwrap();
    assert_eq!(members, json!([{"name": "A", "email": "a@x.com", "role": "admin"}]));
}

#[tokio::test]
async fn test_call_daily_usage_end_to_end() {
    let mock = MockServer::start().await;
    let end = 1_700_000_000_000_i64;
    let start = end - 7 * DAY_MS;

    Mock::given(method("POST"))
        .and(path("/teams/daily-usage-data"))
        .and(body_json(json!({"startDate": start, "endDate": end})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "period": {"startDate": start, "endDate": end},
            "data": [{
                "date": end,
                "email": "a@x.com",
                "isActive": true,
                "acceptedLinesAdded": 40,
                "futureField": "kept"
            }]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock).await;
    let response = exchange(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 8,
            "method": "tools/call",
            "params": {
                "name": "get_daily_usage_data",
                "arguments": {"startDate": start, "endDate": end}
            }
        }),
    )
    .await;

    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    let usage: Value = serde_json::from_str(text).unwrap();
    assert_eq!(usage["data"][0]["acceptedLinesAdded"], 40);
    assert_eq!(usage["data"][0]["futureField"], "kept");
}

#[tokio::test]
async fn test_invalid_arguments_error_code() {
    let mock = MockServer::start().await;
    let server = server_for(&mock).await;

    let response = exchange(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "tools/call",
            "params": {"name": "get_daily_usage_data", "arguments": {"startDate": 0}}
        }),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
    assert_eq!(
        response["error"]["message"],
        "Invalid arguments: endDate: Required"
    );
}

#[tokio::test]
async fn test_api_error_surfaces_as_internal_error() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/members"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .mount(&mock)
        .await;

    let server = server_for(&mock).await;
    let response = exchange(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 10,
            "method": "tools/call",
            "params": {"name": "get_team_members"}
        }),
    )
    .await;

    assert_eq!(response["error"]["code"], -32603);
    assert_eq!(
        response["error"]["message"],
        "Tool execution failed: Unauthorized"
    );
}
