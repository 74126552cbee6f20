//! Record CRUD handlers.

use crate::client::PocketBase;
use crate::error::ToolError;
use crate::mcp::core::{PocketBaseMcpServer, ToolResult};
use crate::model::ListOptions;
use serde_json::Value;

use super::{optional_str, require_object, require_str};

/// Default page for record listings.
const DEFAULT_PAGE: u32 = 1;
/// Default page size for record listings.
const DEFAULT_PER_PAGE: u32 = 50;

/// Build list-shaping options from the caller-supplied arguments, forwarded
/// verbatim to the backend.
pub(crate) fn list_options(arguments: &Value) -> ListOptions {
    ListOptions {
        filter: optional_str(arguments, "filter").map(str::to_string),
        sort: optional_str(arguments, "sort").map(str::to_string),
        expand: optional_str(arguments, "expand").map(str::to_string),
    }
}

/// Handle record creation.
pub async fn handle_create_record<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let collection = require_str(&arguments, "collection")?;
    let data = require_object(&arguments, "data")?.clone();

    let record = server
        .client
        .create_record(collection, data)
        .await
        .map_err(|e| ToolError::backend("Failed to create record", e))?;
    ToolResult::json(&record)
}

/// Handle record listing with optional filter/sort/pagination.
pub async fn handle_list_records<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let collection = require_str(&arguments, "collection")?;
    let page = arguments
        .get("page")
        .and_then(Value::as_u64)
        .map(|p| p as u32)
        .unwrap_or(DEFAULT_PAGE);
    let per_page = arguments
        .get("perPage")
        .and_then(Value::as_u64)
        .map(|p| p as u32)
        .unwrap_or(DEFAULT_PER_PAGE);
    let options = list_options(&arguments);

    let result = server
        .client
        .list_records(collection, page, per_page, &options)
        .await
        .map_err(|e| ToolError::backend("Failed to list records", e))?;
    ToolResult::json(&result)
}

/// Handle record update.
pub async fn handle_update_record<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let collection = require_str(&arguments, "collection")?;
    let id = require_str(&arguments, "id")?;
    let data = require_object(&arguments, "data")?.clone();

    let record = server
        .client
        .update_record(collection, id, data)
        .await
        .map_err(|e| ToolError::backend("Failed to update record", e))?;
    ToolResult::json(&record)
}

/// Handle record deletion. Returns a plain-text confirmation.
pub async fn handle_delete_record<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let collection = require_str(&arguments, "collection")?;
    let id = require_str(&arguments, "id")?;

    server
        .client
        .delete_record(collection, id)
        .await
        .map_err(|e| ToolError::backend("Failed to delete record", e))?;
    Ok(ToolResult::text(format!(
        "Successfully deleted record {id} from collection {collection}"
    )))
}
