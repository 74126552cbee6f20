//! Backup and import tool schemas.

use serde_json::{Value, json};

/// Schema definition for the database backup tool.
pub fn backup_database_tool() -> Value {
    json!({
        "name": "backup_database",
        "description": "Create a backup of the PocketBase database",
        "inputSchema": {
            "type": "object",
            "properties": {
                "format": {
                    "type": "string",
                    "enum": ["json", "csv"],
                    "description": "Export format (default: json)"
                }
            }
        }
    })
}

/// Schema definition for the data import tool.
pub fn import_data_tool() -> Value {
    json!({
        "name": "import_data",
        "description": "Import data into a collection",
        "inputSchema": {
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Collection name"
                },
                "data": {
                    "type": "array",
                    "description": "Array of records to import",
                    "items": {
                        "type": "object"
                    }
                },
                "mode": {
                    "type": "string",
                    "enum": ["create", "update", "upsert"],
                    "description": "Import mode (default: create)"
                }
            },
            "required": ["collection", "data"]
        }
    })
}
