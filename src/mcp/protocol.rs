//! Tool discovery, dispatch, and the stdio JSON-RPC loop.
//!
//! This is the interface between AI agents and the PocketBase operations:
//! `tools()` serves the catalog, `execute_tool()` routes a call-by-name
//! request to its handler, and `run_stdio()` drives the line-delimited
//! JSON-RPC transport until stdin closes or an interrupt arrives.

use super::core::{PocketBaseMcpServer, ToolResult};
use super::handlers::{admin, auth, collections, migration, query, records};
use super::tools::{admin_schemas, auth_schemas, collection_schemas, record_schemas};
use crate::client::PocketBase;
use crate::error::ToolError;
use log::{debug, info};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// MCP protocol revision advertised during `initialize`.
const PROTOCOL_VERSION: &str = "2024-11-05";

impl<C: PocketBase + Send + Sync> PocketBaseMcpServer<C> {
    /// The full tool catalog, in stable order.
    ///
    /// Deterministic, side-effect free, and safe to call before any
    /// authentication has happened.
    pub fn tools(&self) -> Vec<Value> {
        vec![
            collection_schemas::create_collection_tool(),
            record_schemas::create_record_tool(),
            record_schemas::list_records_tool(),
            record_schemas::update_record_tool(),
            record_schemas::delete_record_tool(),
            auth_schemas::list_auth_methods_tool(),
            auth_schemas::authenticate_user_tool(),
            auth_schemas::authenticate_with_oauth2_tool(),
            auth_schemas::authenticate_with_otp_tool(),
            auth_schemas::auth_refresh_tool(),
            auth_schemas::request_verification_tool(),
            auth_schemas::confirm_verification_tool(),
            auth_schemas::request_password_reset_tool(),
            auth_schemas::confirm_password_reset_tool(),
            auth_schemas::request_email_change_tool(),
            auth_schemas::confirm_email_change_tool(),
            auth_schemas::impersonate_user_tool(),
            auth_schemas::create_user_tool(),
            collection_schemas::get_collection_schema_tool(),
            admin_schemas::backup_database_tool(),
            admin_schemas::import_data_tool(),
            collection_schemas::migrate_collection_tool(),
            record_schemas::query_collection_tool(),
            collection_schemas::manage_indexes_tool(),
        ]
    }

    /// Execute a tool by name.
    ///
    /// Unknown names fail with `MethodNotFound` before any backend call.
    /// Structured validation errors from handlers propagate unchanged;
    /// backend failures arrive already wrapped as `Internal` with the
    /// handler's category label.
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        arguments: Value,
    ) -> Result<ToolResult, ToolError> {
        debug!("executing tool '{tool_name}'");

        match tool_name {
            "create_collection" => collections::handle_create_collection(self, arguments).await,
            "create_record" => records::handle_create_record(self, arguments).await,
            "list_records" => records::handle_list_records(self, arguments).await,
            "update_record" => records::handle_update_record(self, arguments).await,
            "delete_record" => records::handle_delete_record(self, arguments).await,
            "list_auth_methods" => auth::handle_list_auth_methods(self, arguments).await,
            "authenticate_user" => auth::handle_authenticate_user(self, arguments).await,
            "authenticate_with_oauth2" => {
                auth::handle_authenticate_with_oauth2(self, arguments).await
            }
            "authenticate_with_otp" => auth::handle_authenticate_with_otp(self, arguments).await,
            "auth_refresh" => auth::handle_auth_refresh(self, arguments).await,
            "request_verification" => auth::handle_request_verification(self, arguments).await,
            "confirm_verification" => auth::handle_confirm_verification(self, arguments).await,
            "request_password_reset" => auth::handle_request_password_reset(self, arguments).await,
            "confirm_password_reset" => auth::handle_confirm_password_reset(self, arguments).await,
            "request_email_change" => auth::handle_request_email_change(self, arguments).await,
            "confirm_email_change" => auth::handle_confirm_email_change(self, arguments).await,
            "impersonate_user" => auth::handle_impersonate_user(self, arguments).await,
            "create_user" => auth::handle_create_user(self, arguments).await,
            "get_collection_schema" => {
                collections::handle_get_collection_schema(self, arguments).await
            }
            "backup_database" => admin::handle_backup_database(self, arguments).await,
            "import_data" => admin::handle_import_data(self, arguments).await,
            "migrate_collection" => migration::handle_migrate_collection(self, arguments).await,
            "query_collection" => query::handle_query_collection(self, arguments).await,
            "manage_indexes" => collections::handle_manage_indexes(self, arguments).await,
            unknown => Err(ToolError::MethodNotFound(format!("Unknown tool: {unknown}"))),
        }
    }

    /// Handle one JSON-RPC message. Returns the response to emit, or `None`
    /// for notifications.
    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        let method = message.get("method").and_then(Value::as_str)?;

        // Requests without an id are notifications: process nothing, answer
        // nothing.
        let id = message.get("id").cloned()?;

        let outcome = match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {"tools": {}},
                "serverInfo": &self.server_info,
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({"tools": self.tools()})),
            "tools/call" => {
                let params = message.get("params").cloned().unwrap_or(Value::Null);
                let name = params.get("name").and_then(Value::as_str).unwrap_or("");
                let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
                self.execute_tool(name, arguments)
                    .await
                    .and_then(|result| serde_json::to_value(&result).map_err(|e| {
                        ToolError::Internal(format!("Failed to serialize result: {e}"))
                    }))
            }
            other => Err(ToolError::MethodNotFound(format!(
                "Method not found: {other}"
            ))),
        };

        let response = match outcome {
            Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
            Err(error) => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": error.code(), "message": error.to_string()},
            }),
        };
        Some(response)
    }

    /// Run the server over stdio until stdin closes or the process is
    /// interrupted. An interrupt closes the channel cleanly; the caller
    /// exits with status 0 either way.
    pub async fn run_stdio(self) -> Result<(), std::io::Error> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!("PocketBase MCP server running on stdio");

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupt received, closing transport");
                    break;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if line.trim().is_empty() {
                        continue;
                    }

                    let response = match serde_json::from_str::<Value>(&line) {
                        Ok(message) => self.handle_message(message).await,
                        Err(e) => Some(json!({
                            "jsonrpc": "2.0",
                            "id": Value::Null,
                            "error": {"code": -32700, "message": format!("Parse error: {e}")},
                        })),
                    };

                    if let Some(response) = response {
                        let mut payload = serde_json::to_vec(&response)
                            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
                        payload.push(b'\n');
                        stdout.write_all(&payload).await?;
                        stdout.flush().await?;
                    }
                }
            }
        }

        Ok(())
    }
}
