//! Backup and import handlers.
//!
//! Both iterate over backend calls (one per collection or record) but never
//! compose multi-step protocols: each item is an independent operation.

use crate::client::PocketBase;
use crate::error::ToolError;
use crate::mcp::core::{PocketBaseMcpServer, ToolResult};
use crate::model::FieldSchema;
use serde_json::{Value, json};

use super::{optional_str, require_array, require_str};

/// Page size used when listing collections for a backup.
const BACKUP_COLLECTION_PAGE: u32 = 100;

/// Handle a full-database export in JSON or CSV form.
pub async fn handle_backup_database<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let format = optional_str(&arguments, "format").unwrap_or("json");
    if format != "json" && format != "csv" {
        return Err(ToolError::InvalidParams(format!(
            "Unsupported backup format: {format}"
        )));
    }

    let collections = server
        .client
        .list_collections(1, BACKUP_COLLECTION_PAGE)
        .await
        .map_err(|e| ToolError::backend("Failed to backup database", e))?;

    let mut dump: Vec<(String, Vec<FieldSchema>, Vec<Value>)> = Vec::new();
    for collection in collections {
        let records = server
            .client
            .full_record_list(&collection.name)
            .await
            .map_err(|e| ToolError::backend("Failed to backup database", e))?;
        dump.push((collection.name, collection.schema, records));
    }

    if format == "csv" {
        return Ok(ToolResult::text(render_csv(&dump)?));
    }

    let mut backup = serde_json::Map::new();
    for (name, schema, records) in dump {
        backup.insert(name, json!({"schema": schema, "records": records}));
    }
    ToolResult::json(&backup)
}

/// Line-oriented CSV rendering: one block per collection with its schema
/// followed by a header row and the record rows.
fn render_csv(dump: &[(String, Vec<FieldSchema>, Vec<Value>)]) -> Result<String, ToolError> {
    let mut csv = String::new();
    for (name, schema, records) in dump {
        csv.push_str(&format!("Collection: {name}\n"));
        let schema_text = serde_json::to_string_pretty(schema)
            .map_err(|e| ToolError::Internal(format!("Failed to serialize schema: {e}")))?;
        csv.push_str(&format!("Schema:\n{schema_text}\n"));
        csv.push_str("Records:\n");

        if let Some(first) = records.first().and_then(Value::as_object) {
            let headers: Vec<&String> = first.keys().collect();
            csv.push_str(
                &headers
                    .iter()
                    .map(|h| h.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            );
            csv.push('\n');
            for record in records {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        record
                            .get(h.as_str())
                            .map(|v| v.to_string())
                            .unwrap_or_default()
                    })
                    .collect();
                csv.push_str(&row.join(","));
                csv.push('\n');
            }
        }
        csv.push('\n');
    }
    Ok(csv)
}

/// Handle bulk import with create/update/upsert semantics.
pub async fn handle_import_data<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let collection = require_str(&arguments, "collection")?;
    let data = require_array(&arguments, "data")?;
    let mode = optional_str(&arguments, "mode").unwrap_or("create");
    if !matches!(mode, "create" | "update" | "upsert") {
        return Err(ToolError::InvalidParams(format!(
            "Invalid import mode: {mode}"
        )));
    }

    let mut results = Vec::with_capacity(data.len());
    for record in data {
        let id = record.get("id").and_then(Value::as_str);
        let imported = match mode {
            "create" => server
                .client
                .create_record(collection, record.clone())
                .await
                .map_err(|e| ToolError::backend("Failed to import data", e))?,
            "update" => {
                let id = id.ok_or_else(|| {
                    ToolError::InvalidParams("Record ID required for update mode".into())
                })?;
                server
                    .client
                    .update_record(collection, id, record.clone())
                    .await
                    .map_err(|e| ToolError::backend("Failed to import data", e))?
            }
            _ => match id {
                // upsert: try update first, fall back to create
                Some(id) => match server.client.update_record(collection, id, record.clone()).await
                {
                    Ok(updated) => updated,
                    Err(_) => server
                        .client
                        .create_record(collection, record.clone())
                        .await
                        .map_err(|e| ToolError::backend("Failed to import data", e))?,
                },
                None => server
                    .client
                    .create_record(collection, record.clone())
                    .await
                    .map_err(|e| ToolError::backend("Failed to import data", e))?,
            },
        };
        results.push(imported);
    }

    ToolResult::json(&results)
}
