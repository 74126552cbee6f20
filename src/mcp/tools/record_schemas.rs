//! Record CRUD and query tool schemas.

use serde_json::{Value, json};

/// Schema definition for the record creation tool.
pub fn create_record_tool() -> Value {
    json!({
        "name": "create_record",
        "description": "Create a new record in a collection",
        "inputSchema": {
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Collection name"
                },
                "data": {
                    "type": "object",
                    "description": "Record data"
                }
            },
            "required": ["collection", "data"]
        }
    })
}

/// Schema definition for the record listing tool.
pub fn list_records_tool() -> Value {
    json!({
        "name": "list_records",
        "description": "List records from a collection with optional filters",
        "inputSchema": {
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Collection name"
                },
                "filter": {
                    "type": "string",
                    "description": "Filter query"
                },
                "sort": {
                    "type": "string",
                    "description": "Sort field and direction"
                },
                "page": {
                    "type": "number",
                    "description": "Page number"
                },
                "perPage": {
                    "type": "number",
                    "description": "Items per page"
                }
            },
            "required": ["collection"]
        }
    })
}

/// Schema definition for the record update tool.
pub fn update_record_tool() -> Value {
    json!({
        "name": "update_record",
        "description": "Update an existing record",
        "inputSchema": {
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Collection name"
                },
                "id": {
                    "type": "string",
                    "description": "Record ID"
                },
                "data": {
                    "type": "object",
                    "description": "Updated record data"
                }
            },
            "required": ["collection", "id", "data"]
        }
    })
}

/// Schema definition for the record deletion tool.
pub fn delete_record_tool() -> Value {
    json!({
        "name": "delete_record",
        "description": "Delete a record",
        "inputSchema": {
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Collection name"
                },
                "id": {
                    "type": "string",
                    "description": "Record ID"
                }
            },
            "required": ["collection", "id"]
        }
    })
}

/// Schema definition for the query/aggregation tool.
pub fn query_collection_tool() -> Value {
    json!({
        "name": "query_collection",
        "description": "Advanced query with filtering, sorting, and aggregation",
        "inputSchema": {
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Collection name"
                },
                "filter": {
                    "type": "string",
                    "description": "Filter expression"
                },
                "sort": {
                    "type": "string",
                    "description": "Sort expression"
                },
                "aggregate": {
                    "type": "object",
                    "description": "Aggregation settings: output name to expression, e.g. {\"total\": \"sum(price)\"}. Supported functions: sum, avg, count. Computed over the first 100 matching records."
                },
                "expand": {
                    "type": "string",
                    "description": "Relations to expand"
                }
            },
            "required": ["collection"]
        }
    })
}
