//! Collection administration tool schemas.

use serde_json::{Value, json};

/// Schema definition for the collection creation tool.
pub fn create_collection_tool() -> Value {
    json!({
        "name": "create_collection",
        "description": "Create a new collection in PocketBase",
        "inputSchema": {
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Collection name"
                },
                "schema": {
                    "type": "array",
                    "description": "Collection schema fields",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "type": {"type": "string"},
                            "required": {"type": "boolean"},
                            "options": {"type": "object"}
                        }
                    }
                }
            },
            "required": ["name", "schema"]
        }
    })
}

/// Schema definition for the collection schema retrieval tool.
pub fn get_collection_schema_tool() -> Value {
    json!({
        "name": "get_collection_schema",
        "description": "Get schema details for a collection",
        "inputSchema": {
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Collection name"
                }
            },
            "required": ["collection"]
        }
    })
}

/// Schema definition for the schema migration tool.
pub fn migrate_collection_tool() -> Value {
    json!({
        "name": "migrate_collection",
        "description": "Migrate collection schema with data preservation",
        "inputSchema": {
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Collection name"
                },
                "newSchema": {
                    "type": "array",
                    "description": "New collection schema",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "type": {"type": "string"},
                            "required": {"type": "boolean"},
                            "options": {"type": "object"}
                        }
                    }
                },
                "dataTransforms": {
                    "type": "object",
                    "description": "Field transformation expressions evaluated against each record's old value, bound as oldValue (e.g. \"oldValue * 10\", \"upper(oldValue)\")"
                }
            },
            "required": ["collection", "newSchema"]
        }
    })
}

/// Schema definition for the index management tool.
pub fn manage_indexes_tool() -> Value {
    json!({
        "name": "manage_indexes",
        "description": "Manage collection indexes",
        "inputSchema": {
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Collection name"
                },
                "action": {
                    "type": "string",
                    "enum": ["create", "delete", "list"],
                    "description": "Action to perform"
                },
                "index": {
                    "type": "object",
                    "description": "Index configuration (for create)",
                    "properties": {
                        "name": {"type": "string"},
                        "fields": {"type": "array", "items": {"type": "string"}},
                        "unique": {"type": "boolean"}
                    }
                }
            },
            "required": ["collection", "action"]
        }
    })
}
