//! Tests for the MCP tool layer: discovery, dispatch, defaults, and error
//! mapping, all driven against the in-memory backend.

use crate::client::{InMemoryPocketBase, PocketBase};
use crate::config::AdminCredentials;
use crate::error::ToolError;
use crate::mcp::core::PocketBaseMcpServer;
use serde_json::{Value, json};

async fn server_with_users() -> PocketBaseMcpServer<InMemoryPocketBase> {
    let backend = InMemoryPocketBase::new();
    backend
        .create_collection("users", Vec::new())
        .await
        .expect("create users collection");
    PocketBaseMcpServer::new(backend)
}

#[test]
fn tool_discovery_is_stable_and_complete() {
    let server = PocketBaseMcpServer::new(InMemoryPocketBase::new());
    let tools = server.tools();

    assert_eq!(tools.len(), 24, "catalog should expose 24 tools");

    let names: Vec<&str> = tools
        .iter()
        .filter_map(|t| t.get("name").and_then(Value::as_str))
        .collect();

    for expected in [
        "create_collection",
        "create_record",
        "list_records",
        "update_record",
        "delete_record",
        "list_auth_methods",
        "authenticate_user",
        "authenticate_with_oauth2",
        "authenticate_with_otp",
        "auth_refresh",
        "request_verification",
        "confirm_verification",
        "request_password_reset",
        "confirm_password_reset",
        "request_email_change",
        "confirm_email_change",
        "impersonate_user",
        "create_user",
        "get_collection_schema",
        "backup_database",
        "import_data",
        "migrate_collection",
        "query_collection",
        "manage_indexes",
    ] {
        assert!(names.contains(&expected), "missing tool: {expected}");
    }

    // Names are unique.
    let mut deduped = names.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), names.len());

    // The catalog is deterministic.
    assert_eq!(server.tools(), tools);
}

#[tokio::test]
async fn unknown_tool_is_method_not_found() {
    let server = server_with_users().await;

    let err = server
        .execute_tool("unknown_tool", json!({}))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ToolError::MethodNotFound("Unknown tool: unknown_tool".to_string())
    );
    // No backend state was touched.
    assert_eq!(server.client().collection_names().await, vec!["users"]);
}

#[tokio::test]
async fn missing_required_field_is_invalid_params() {
    let server = server_with_users().await;

    let err = server
        .execute_tool("create_record", json!({"collection": "users"}))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ToolError::InvalidParams("Missing data parameter".to_string())
    );
}

#[tokio::test]
async fn record_crud_through_dispatch() {
    let server = server_with_users().await;
    server
        .client()
        .create_collection("posts", Vec::new())
        .await
        .unwrap();

    let created = server
        .execute_tool(
            "create_record",
            json!({"collection": "posts", "data": {"title": "hello"}}),
        )
        .await
        .unwrap();
    let record: Value = serde_json::from_str(&created.text_content()).unwrap();
    let id = record["id"].as_str().unwrap().to_string();

    let updated = server
        .execute_tool(
            "update_record",
            json!({"collection": "posts", "id": id, "data": {"title": "renamed"}}),
        )
        .await
        .unwrap();
    let record: Value = serde_json::from_str(&updated.text_content()).unwrap();
    assert_eq!(record["title"], json!("renamed"));

    let deleted = server
        .execute_tool("delete_record", json!({"collection": "posts", "id": id}))
        .await
        .unwrap();
    assert!(deleted.text_content().contains("Successfully deleted"));
    assert_eq!(server.client().record_count("posts").await, Some(0));
}

#[tokio::test]
async fn omitted_collection_equals_explicit_users_default() {
    let server = server_with_users().await;

    let implicit = server
        .execute_tool("list_auth_methods", json!({}))
        .await
        .unwrap();
    let explicit = server
        .execute_tool("list_auth_methods", json!({"collection": "users"}))
        .await
        .unwrap();
    assert_eq!(implicit, explicit);
}

#[tokio::test]
async fn admin_auth_falls_back_to_configured_credentials() {
    let backend = InMemoryPocketBase::new();
    backend
        .create_collection("_superusers", Vec::new())
        .await
        .unwrap();
    backend
        .create_record(
            "_superusers",
            json!({"email": "admin@example.com", "password": "hunter2"}),
        )
        .await
        .unwrap();

    let server = PocketBaseMcpServer::new(backend).with_admin_credentials(Some(AdminCredentials {
        email: "admin@example.com".to_string(),
        password: "hunter2".to_string(),
    }));

    let result = server
        .execute_tool("authenticate_user", json!({"isAdmin": true}))
        .await
        .unwrap();
    let auth: Value = serde_json::from_str(&result.text_content()).unwrap();
    assert_eq!(auth["collection"], json!("_superusers"));
    assert!(auth["token"].as_str().is_some());
}

#[tokio::test]
async fn admin_auth_without_any_credentials_is_invalid_params() {
    let server = server_with_users().await;

    let err = server
        .execute_tool("authenticate_user", json!({"isAdmin": true}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidParams(_)));
}

#[tokio::test]
async fn backend_failures_keep_the_underlying_message() {
    let server = server_with_users().await;

    let err = server
        .execute_tool(
            "create_record",
            json!({"collection": "missing", "data": {"x": 1}}),
        )
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Failed to create record:"));
    assert!(message.contains("collection 'missing' not found"));
}

#[tokio::test]
async fn create_user_builds_the_account_payload() {
    let server = server_with_users().await;

    let result = server
        .execute_tool(
            "create_user",
            json!({
                "email": "new@example.com",
                "password": "pw",
                "passwordConfirm": "pw",
                "name": "New User",
            }),
        )
        .await
        .unwrap();
    let record: Value = serde_json::from_str(&result.text_content()).unwrap();
    assert_eq!(record["email"], json!("new@example.com"));
    assert_eq!(record["name"], json!("New User"));
    assert_eq!(server.client().record_count("users").await, Some(1));
}

#[tokio::test]
async fn jsonrpc_initialize_and_tools_list() {
    let server = server_with_users().await;

    let response = server
        .handle_message(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "1.0.0"},
            },
        }))
        .await
        .expect("initialize should produce a response");
    assert_eq!(response["result"]["protocolVersion"], json!("2024-11-05"));
    assert_eq!(
        response["result"]["serverInfo"]["name"],
        json!("pocketbase-server")
    );

    let response = server
        .handle_message(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
        .await
        .expect("tools/list should produce a response");
    assert_eq!(
        response["result"]["tools"].as_array().map(Vec::len),
        Some(24)
    );
}

#[tokio::test]
async fn jsonrpc_tools_call_routes_to_handlers() {
    let server = server_with_users().await;

    let response = server
        .handle_message(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "list_auth_methods", "arguments": {}},
        }))
        .await
        .expect("tools/call should produce a response");
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("\"password\""));

    let response = server
        .handle_message(json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "nope", "arguments": {}},
        }))
        .await
        .expect("unknown tool should produce an error response");
    assert_eq!(response["error"]["code"], json!(-32601));
    assert!(
        response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("nope")
    );
}

#[tokio::test]
async fn jsonrpc_notifications_get_no_response() {
    let server = server_with_users().await;

    let response = server
        .handle_message(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
        }))
        .await;
    assert!(response.is_none());
}

#[tokio::test]
async fn jsonrpc_unknown_method_is_an_error() {
    let server = server_with_users().await;

    let response = server
        .handle_message(json!({"jsonrpc": "2.0", "id": 9, "method": "resources/list"}))
        .await
        .expect("unknown method should produce an error response");
    assert_eq!(response["error"]["code"], json!(-32601));
}
