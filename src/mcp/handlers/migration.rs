//! Online schema migration with data transformation.
//!
//! The backend has no atomic "alter and backfill" primitive, so the handler
//! simulates one: create a temporary collection under the new schema, copy
//! every record across (applying the requested field transforms), delete the
//! original, and rename the temporary collection into its place. The source
//! collection is never mutated in place and is only deleted once the
//! replacement is fully populated.
//!
//! There is no rollback of completed steps. A failure before the copy leaves
//! at most an empty orphaned temp collection; a failure during the copy
//! leaves the original intact plus a partially populated temp collection; a
//! failure after the delete leaves the data only under the temporary name.
//! Each of these states is recoverable by hand, which is why the handler
//! prefers aborting to destroying partial work.

use crate::client::PocketBase;
use crate::error::ToolError;
use crate::mcp::core::{PocketBaseMcpServer, ToolResult};
use crate::model::CollectionUpdate;
use crate::transform::Transform;
use chrono::Utc;
use log::{info, warn};
use serde_json::{Map, Value};

use super::{collections::parse_schema, require_str};

const BACKEND_LABEL: &str = "Failed to migrate collection";

/// Compile the `dataTransforms` mapping. Expressions that fail to parse are
/// logged and skipped, leaving their field untouched during the copy, the
/// same best-effort policy applied to per-record evaluation failures.
fn compile_transforms(arguments: &Value) -> Vec<(String, Transform)> {
    let Some(transforms) = arguments.get("dataTransforms").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut compiled = Vec::new();
    for (field, expression) in transforms {
        let Some(source) = expression.as_str() else {
            warn!("transform for field '{field}' is not a string, skipping");
            continue;
        };
        match Transform::parse(source) {
            Ok(transform) => compiled.push((field.clone(), transform)),
            Err(e) => warn!("failed to parse transform for field '{field}': {e}"),
        }
    }
    compiled
}

/// Produce the transformed copy of one record. Fields with a transform get
/// the evaluated value; evaluation failures are logged and the copied value
/// kept; everything else passes through unchanged.
fn transform_record(record: &Value, transforms: &[(String, Transform)]) -> Value {
    let mut copy: Map<String, Value> = record.as_object().cloned().unwrap_or_default();

    for (field, transform) in transforms {
        let old_value = copy.get(field).cloned().unwrap_or(Value::Null);
        match transform.apply(&old_value) {
            Ok(new_value) => {
                copy.insert(field.clone(), new_value);
            }
            Err(e) => warn!("failed to transform field '{field}': {e}"),
        }
    }

    Value::Object(copy)
}

/// Handle schema migration.
pub async fn handle_migrate_collection<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let collection = require_str(&arguments, "collection")?;
    let new_schema = parse_schema(&arguments, "newSchema")?;
    let transforms = compile_transforms(&arguments);

    // Step 1: create the replacement under a temporary, unique name.
    let temp_name = format!("{collection}_migration_{}", Utc::now().timestamp_millis());
    server
        .client
        .create_collection(&temp_name, new_schema)
        .await
        .map_err(|e| ToolError::backend(BACKEND_LABEL, e))?;

    // Step 2: read the entire source record set.
    let old_records = server
        .client
        .full_record_list(collection)
        .await
        .map_err(|e| ToolError::backend(BACKEND_LABEL, e))?;
    info!(
        "migrating {} records from '{collection}' via '{temp_name}'",
        old_records.len()
    );

    // Steps 3-4: copy with transforms, sequentially and in read order. The
    // first creation failure aborts the migration, leaving the original
    // collection untouched.
    for record in &old_records {
        let transformed = transform_record(record, &transforms);
        server
            .client
            .create_record(&temp_name, transformed)
            .await
            .map_err(|e| ToolError::backend(BACKEND_LABEL, e))?;
    }

    // Step 5: drop the original.
    server
        .client
        .delete_collection(collection)
        .await
        .map_err(|e| ToolError::backend(BACKEND_LABEL, e))?;

    // Step 6: rename the replacement into place.
    let renamed = server
        .client
        .update_collection(&temp_name, CollectionUpdate::rename(collection))
        .await
        .map_err(|e| ToolError::backend(BACKEND_LABEL, e))?;

    ToolResult::json(&renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transform_record_applies_and_passes_through() {
        let transforms = vec![("x".to_string(), Transform::parse("oldValue * 10").unwrap())];
        let record = json!({"id": "1", "x": 2, "y": "kept"});

        let out = transform_record(&record, &transforms);
        assert_eq!(out["x"], json!(20));
        assert_eq!(out["y"], json!("kept"));
        assert_eq!(out["id"], json!("1"));
    }

    #[test]
    fn failed_transform_keeps_copied_value() {
        let transforms = vec![("x".to_string(), Transform::parse("oldValue * 10").unwrap())];
        let record = json!({"id": "1", "x": {"not": "numeric"}});

        let out = transform_record(&record, &transforms);
        assert_eq!(out["x"], json!({"not": "numeric"}));
    }

    #[test]
    fn unparseable_expressions_are_skipped() {
        let compiled = compile_transforms(&json!({
            "dataTransforms": {"a": "oldValue * 2", "b": "eval(oldValue)"}
        }));
        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled[0].0, "a");
    }
}
