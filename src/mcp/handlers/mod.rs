//! Tool execution handlers.
//!
//! One handler per tool. Most are single-call forwarders to the backend
//! client: substitute documented defaults, validate required fields, make
//! exactly one client call, and wrap the outcome as JSON text. The two
//! compound handlers live in [`migration`] and [`query`].
//!
//! Validation failures are raised as `ToolError::InvalidParams` before any
//! backend call; backend failures are wrapped as `ToolError::Internal` at
//! the handler boundary with a fixed category label and the underlying
//! message attached.

pub mod admin;
pub mod auth;
pub mod collections;
pub mod migration;
pub mod query;
pub mod records;

use crate::error::ToolError;
use serde_json::Value;

/// The collection every auth tool falls back to.
pub const DEFAULT_AUTH_COLLECTION: &str = "users";

/// Extract a required string argument, or raise `InvalidParams` naming it.
pub(crate) fn require_str<'a>(arguments: &'a Value, field: &str) -> Result<&'a str, ToolError> {
    arguments
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidParams(format!("Missing {field} parameter")))
}

/// Extract a required object argument, or raise `InvalidParams` naming it.
pub(crate) fn require_object<'a>(arguments: &'a Value, field: &str) -> Result<&'a Value, ToolError> {
    match arguments.get(field) {
        Some(value) if value.is_object() => Ok(value),
        _ => Err(ToolError::InvalidParams(format!(
            "Missing {field} parameter"
        ))),
    }
}

/// Extract a required array argument, or raise `InvalidParams` naming it.
pub(crate) fn require_array<'a>(
    arguments: &'a Value,
    field: &str,
) -> Result<&'a Vec<Value>, ToolError> {
    arguments
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| ToolError::InvalidParams(format!("Missing {field} parameter")))
}

/// An optional string argument.
pub(crate) fn optional_str<'a>(arguments: &'a Value, field: &str) -> Option<&'a str> {
    arguments.get(field).and_then(Value::as_str)
}

/// The `collection` argument, defaulting to `users` when absent.
pub(crate) fn auth_collection<'a>(arguments: &'a Value) -> &'a str {
    optional_str(arguments, "collection").unwrap_or(DEFAULT_AUTH_COLLECTION)
}
