//! End-to-end tests for the tool layer against the in-memory backend,
//! exercising the compound handlers (migration, aggregation) and the
//! iterating handlers (indexes, import, backup) through dispatch.

use pocketbase_mcp_server::{
    FieldSchema, InMemoryPocketBase, PocketBase, PocketBaseMcpServer, ToolError,
};
use serde_json::{Value, json};

fn text_field(name: &str) -> FieldSchema {
    FieldSchema {
        name: name.to_string(),
        field_type: "text".to_string(),
        required: false,
        options: None,
    }
}

fn number_field(name: &str) -> FieldSchema {
    FieldSchema {
        name: name.to_string(),
        field_type: "number".to_string(),
        required: false,
        options: None,
    }
}

fn result_json(result: &pocketbase_mcp_server::ToolResult) -> Value {
    serde_json::from_str(&result.text_content()).expect("tool result should be JSON")
}

async fn seeded_server(
    collection: &str,
    schema: Vec<FieldSchema>,
    records: Vec<Value>,
) -> PocketBaseMcpServer<InMemoryPocketBase> {
    let backend = InMemoryPocketBase::new();
    backend
        .create_collection(collection, schema)
        .await
        .expect("seed collection");
    for record in records {
        backend
            .create_record(collection, record)
            .await
            .expect("seed record");
    }
    PocketBaseMcpServer::new(backend)
}

#[tokio::test]
async fn migration_transforms_data_and_swaps_collections() {
    let server = seeded_server(
        "items",
        vec![number_field("x")],
        vec![json!({"id": "1", "x": 2}), json!({"id": "2", "x": 3})],
    )
    .await;

    let result = server
        .execute_tool(
            "migrate_collection",
            json!({
                "collection": "items",
                "newSchema": [{"name": "x", "type": "number", "required": false}],
                "dataTransforms": {"x": "oldValue * 10"},
            }),
        )
        .await
        .expect("migration should succeed");

    let renamed = result_json(&result);
    assert_eq!(renamed["name"], json!("items"));

    // The temporary collection no longer exists under its own name.
    let names = server.client().collection_names().await;
    assert_eq!(names, vec!["items"]);

    // Records were copied in order with the transform applied.
    let records = server.client().full_record_list("items").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["x"], json!(20));
    assert_eq!(records[1]["x"], json!(30));
    assert_eq!(records[0]["id"], json!("1"));
}

#[tokio::test]
async fn migration_without_transforms_copies_records_unchanged() {
    let server = seeded_server(
        "notes",
        vec![text_field("body")],
        vec![json!({"id": "1", "body": "keep me"})],
    )
    .await;

    server
        .execute_tool(
            "migrate_collection",
            json!({
                "collection": "notes",
                "newSchema": [
                    {"name": "body", "type": "text", "required": true},
                    {"name": "extra", "type": "text", "required": false},
                ],
            }),
        )
        .await
        .expect("migration should succeed");

    let records = server.client().full_record_list("notes").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["body"], json!("keep me"));

    let schema = server.client().get_collection("notes").await.unwrap().schema;
    assert_eq!(schema.len(), 2);
}

#[tokio::test]
async fn migration_failing_transform_keeps_original_value() {
    let server = seeded_server(
        "mixed",
        vec![number_field("x")],
        vec![json!({"id": "1", "x": 5}), json!({"id": "2", "x": {"odd": true}})],
    )
    .await;

    server
        .execute_tool(
            "migrate_collection",
            json!({
                "collection": "mixed",
                "newSchema": [{"name": "x", "type": "number", "required": false}],
                "dataTransforms": {"x": "oldValue * 2"},
            }),
        )
        .await
        .expect("per-field transform failures must not abort the migration");

    let records = server.client().full_record_list("mixed").await.unwrap();
    assert_eq!(records[0]["x"], json!(10));
    // The untransformable value passed through from the copy.
    assert_eq!(records[1]["x"], json!({"odd": true}));
}

#[tokio::test]
async fn migration_copy_failure_leaves_original_and_partial_temp() {
    let server = seeded_server(
        "items",
        vec![number_field("x")],
        vec![
            json!({"id": "1", "x": 1}),
            json!({"id": "2", "x": 2}),
            json!({"id": "3", "x": 3}),
        ],
    )
    .await;

    // The second record created in any migration temp collection fails.
    server
        .client()
        .fail_record_creates("items_migration_", 1)
        .await;

    let err = server
        .execute_tool(
            "migrate_collection",
            json!({
                "collection": "items",
                "newSchema": [{"name": "x", "type": "number", "required": false}],
            }),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Internal(_)));
    assert!(err.to_string().starts_with("Failed to migrate collection:"));

    // The original collection still exists, unmodified.
    let originals = server.client().full_record_list("items").await.unwrap();
    assert_eq!(originals.len(), 3);

    // The orphaned temp collection holds exactly the one record created
    // before the failure.
    let names = server.client().collection_names().await;
    let temp = names
        .iter()
        .find(|n| n.starts_with("items_migration_"))
        .expect("temp collection should be left behind");
    assert_eq!(server.client().record_count(temp).await, Some(1));
}

#[tokio::test]
async fn query_aggregations_cover_sum_avg_count() {
    let server = seeded_server(
        "orders",
        vec![number_field("price")],
        vec![
            json!({"price": 10}),
            json!({"price": 20}),
            json!({"price": "not numeric"}),
        ],
    )
    .await;

    let result = server
        .execute_tool(
            "query_collection",
            json!({
                "collection": "orders",
                "aggregate": {
                    "total": "sum(price)",
                    "mean": "avg(price)",
                    "n": "count(price)",
                },
            }),
        )
        .await
        .unwrap();

    let payload = result_json(&result);
    assert_eq!(payload["items"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["aggregations"]["total"], json!(30.0));
    assert_eq!(payload["aggregations"]["mean"], json!(10.0));
    assert_eq!(payload["aggregations"]["n"], json!(3));
}

#[tokio::test]
async fn query_without_aggregate_returns_items_only() {
    let server = seeded_server("orders", vec![], vec![json!({"price": 10})]).await;

    let result = server
        .execute_tool("query_collection", json!({"collection": "orders"}))
        .await
        .unwrap();
    let payload = result_json(&result);
    assert!(payload.get("items").is_some());
    assert!(payload.get("aggregations").is_none());
}

#[tokio::test]
async fn query_unsupported_aggregation_function_is_rejected() {
    let server = seeded_server("orders", vec![], vec![json!({"price": 10})]).await;

    let err = server
        .execute_tool(
            "query_collection",
            json!({
                "collection": "orders",
                "aggregate": {"m": "median(price)"},
            }),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidParams(_)));
    assert!(err.to_string().contains("median"));
}

#[tokio::test]
async fn index_create_list_delete_round_trip() {
    let server = seeded_server("books", vec![text_field("title")], vec![]).await;

    let index = json!({"name": "idx_title", "fields": ["title"], "unique": true});
    server
        .execute_tool(
            "manage_indexes",
            json!({"collection": "books", "action": "create", "index": index}),
        )
        .await
        .unwrap();

    let listed = server
        .execute_tool(
            "manage_indexes",
            json!({"collection": "books", "action": "list"}),
        )
        .await
        .unwrap();
    let indexes = result_json(&listed);
    let matching: Vec<&Value> = indexes
        .as_array()
        .unwrap()
        .iter()
        .filter(|i| i["name"] == json!("idx_title"))
        .collect();
    assert_eq!(matching.len(), 1, "created index appears exactly once");

    // Re-creating under the same name replaces rather than duplicates.
    server
        .execute_tool(
            "manage_indexes",
            json!({
                "collection": "books",
                "action": "create",
                "index": {"name": "idx_title", "fields": ["title"], "unique": false},
            }),
        )
        .await
        .unwrap();
    let listed = server
        .execute_tool(
            "manage_indexes",
            json!({"collection": "books", "action": "list"}),
        )
        .await
        .unwrap();
    assert_eq!(result_json(&listed).as_array().map(Vec::len), Some(1));

    // Delete by name removes it.
    server
        .execute_tool(
            "manage_indexes",
            json!({
                "collection": "books",
                "action": "delete",
                "index": {"name": "idx_title"},
            }),
        )
        .await
        .unwrap();
    let listed = server
        .execute_tool(
            "manage_indexes",
            json!({"collection": "books", "action": "list"}),
        )
        .await
        .unwrap();
    assert_eq!(result_json(&listed).as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn deleting_a_nonexistent_index_is_a_quiet_no_op() {
    let server = seeded_server("books", vec![], vec![]).await;

    let result = server
        .execute_tool(
            "manage_indexes",
            json!({
                "collection": "books",
                "action": "delete",
                "index": {"name": "no_such_index"},
            }),
        )
        .await
        .expect("deleting an absent index should not fail");
    assert_eq!(result_json(&result).as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn unknown_index_action_is_invalid_params() {
    let server = seeded_server("books", vec![], vec![]).await;

    let err = server
        .execute_tool(
            "manage_indexes",
            json!({"collection": "books", "action": "rebuild"}),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ToolError::InvalidParams("Invalid index action: rebuild".to_string())
    );
}

#[tokio::test]
async fn import_create_and_upsert_modes() {
    let server = seeded_server("people", vec![text_field("name")], vec![]).await;

    let result = server
        .execute_tool(
            "import_data",
            json!({
                "collection": "people",
                "data": [{"name": "a"}, {"name": "b"}],
            }),
        )
        .await
        .unwrap();
    let imported = result_json(&result);
    assert_eq!(imported.as_array().map(Vec::len), Some(2));
    assert_eq!(server.client().record_count("people").await, Some(2));

    let existing_id = imported[0]["id"].as_str().unwrap().to_string();

    // Upsert updates the existing record and creates the unknown one.
    server
        .execute_tool(
            "import_data",
            json!({
                "collection": "people",
                "mode": "upsert",
                "data": [
                    {"id": existing_id, "name": "a2"},
                    {"name": "c"},
                ],
            }),
        )
        .await
        .unwrap();
    assert_eq!(server.client().record_count("people").await, Some(3));
    let records = server.client().full_record_list("people").await.unwrap();
    assert_eq!(records[0]["name"], json!("a2"));
}

#[tokio::test]
async fn import_update_mode_requires_record_ids() {
    let server = seeded_server("people", vec![], vec![]).await;

    let err = server
        .execute_tool(
            "import_data",
            json!({
                "collection": "people",
                "mode": "update",
                "data": [{"name": "no id"}],
            }),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ToolError::InvalidParams("Record ID required for update mode".to_string())
    );
}

#[tokio::test]
async fn import_rejects_unknown_mode() {
    let server = seeded_server("people", vec![], vec![]).await;

    let err = server
        .execute_tool(
            "import_data",
            json!({"collection": "people", "mode": "merge", "data": []}),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ToolError::InvalidParams("Invalid import mode: merge".to_string())
    );
}

#[tokio::test]
async fn backup_covers_every_collection() {
    let backend = InMemoryPocketBase::new();
    backend
        .create_collection("alpha", vec![text_field("a")])
        .await
        .unwrap();
    backend
        .create_collection("beta", vec![text_field("b")])
        .await
        .unwrap();
    backend
        .create_record("alpha", json!({"a": "one"}))
        .await
        .unwrap();
    let server = PocketBaseMcpServer::new(backend);

    let result = server
        .execute_tool("backup_database", json!({}))
        .await
        .unwrap();
    let backup = result_json(&result);
    assert!(backup.get("alpha").is_some());
    assert!(backup.get("beta").is_some());
    assert_eq!(backup["alpha"]["records"].as_array().map(Vec::len), Some(1));
    assert_eq!(backup["beta"]["records"].as_array().map(Vec::len), Some(0));

    let csv = server
        .execute_tool("backup_database", json!({"format": "csv"}))
        .await
        .unwrap();
    let text = csv.text_content();
    assert!(text.contains("Collection: alpha"));
    assert!(text.contains("Collection: beta"));

    let err = server
        .execute_tool("backup_database", json!({"format": "xml"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidParams(_)));
}

#[tokio::test]
async fn list_records_defaults_match_explicit_paging() {
    let server = seeded_server(
        "posts",
        vec![],
        (0..3).map(|n| json!({"n": n})).collect(),
    )
    .await;

    let implicit = server
        .execute_tool("list_records", json!({"collection": "posts"}))
        .await
        .unwrap();
    let explicit = server
        .execute_tool(
            "list_records",
            json!({"collection": "posts", "page": 1, "perPage": 50}),
        )
        .await
        .unwrap();
    assert_eq!(implicit, explicit);
}
