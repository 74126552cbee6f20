//! Collection administration handlers: creation, schema retrieval, and
//! index management.

use crate::client::PocketBase;
use crate::error::ToolError;
use crate::mcp::core::{PocketBaseMcpServer, ToolResult};
use crate::model::{CollectionUpdate, FieldSchema, IndexModel};
use serde_json::Value;

use super::{require_object, require_str};

/// Parse a `schema` argument into typed field descriptors.
pub(crate) fn parse_schema(arguments: &Value, field: &str) -> Result<Vec<FieldSchema>, ToolError> {
    let raw = arguments
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| ToolError::InvalidParams(format!("Missing {field} parameter")))?;
    serde_json::from_value(Value::Array(raw.clone()))
        .map_err(|e| ToolError::InvalidParams(format!("Invalid {field}: {e}")))
}

/// Handle collection creation.
pub async fn handle_create_collection<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let name = require_str(&arguments, "name")?;
    let schema = parse_schema(&arguments, "schema")?;

    let collection = server
        .client
        .create_collection(name, schema)
        .await
        .map_err(|e| ToolError::backend("Failed to create collection", e))?;
    ToolResult::json(&collection)
}

/// Handle collection schema retrieval.
pub async fn handle_get_collection_schema<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let name = require_str(&arguments, "collection")?;

    let collection = server
        .client
        .get_collection(name)
        .await
        .map_err(|e| ToolError::backend("Failed to get collection schema", e))?;
    ToolResult::json(&collection.schema)
}

/// Handle index management.
///
/// Reads the current collection descriptor, computes the new index set
/// (append-or-replace for `create`, filter-by-name for `delete`, identity
/// for `list`), and writes the whole descriptor back in one update. Index
/// names stay unique within the collection after every action.
pub async fn handle_manage_indexes<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let name = require_str(&arguments, "collection")?;
    let action = require_str(&arguments, "action")?;

    // Validate the action and its payload before touching the backend.
    enum Action {
        Create(IndexModel),
        Delete(String),
        List,
    }

    let action = match action {
        "create" => {
            let index = require_object(&arguments, "index").map_err(|_| {
                ToolError::InvalidParams("Index configuration required for create action".into())
            })?;
            let index: IndexModel = serde_json::from_value(index.clone())
                .map_err(|e| ToolError::InvalidParams(format!("Invalid index: {e}")))?;
            Action::Create(index)
        }
        "delete" => {
            let target = arguments
                .get("index")
                .and_then(|i| i.get("name"))
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ToolError::InvalidParams("Index name required for delete action".into())
                })?;
            Action::Delete(target.to_string())
        }
        "list" => Action::List,
        other => {
            return Err(ToolError::InvalidParams(format!(
                "Invalid index action: {other}"
            )));
        }
    };

    let collection = server
        .client
        .get_collection(name)
        .await
        .map_err(|e| ToolError::backend("Failed to manage indexes", e))?;

    match action {
        Action::Create(index) => {
            // Replace any same-named index so names stay unique.
            let mut indexes: Vec<IndexModel> = collection
                .indexes
                .into_iter()
                .filter(|i| i.name != index.name)
                .collect();
            indexes.push(index);
            let updated = server
                .client
                .update_collection(&collection.id, CollectionUpdate::indexes(indexes))
                .await
                .map_err(|e| ToolError::backend("Failed to manage indexes", e))?;
            ToolResult::json(&updated.indexes)
        }
        Action::Delete(target) => {
            let indexes: Vec<IndexModel> = collection
                .indexes
                .into_iter()
                .filter(|i| i.name != target)
                .collect();
            let updated = server
                .client
                .update_collection(&collection.id, CollectionUpdate::indexes(indexes))
                .await
                .map_err(|e| ToolError::backend("Failed to manage indexes", e))?;
            ToolResult::json(&updated.indexes)
        }
        Action::List => ToolResult::json(&collection.indexes),
    }
}
