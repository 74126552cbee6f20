//! Tool schema definitions for MCP discovery.
//!
//! Each function returns one tool descriptor (`name`, `description`,
//! `inputSchema`) as a JSON value. The schemas document parameter shape for
//! AI agents; required-field enforcement happens again in the handlers, so
//! the schemas are descriptive rather than executed.

pub mod admin_schemas;
pub mod auth_schemas;
pub mod collection_schemas;
pub mod record_schemas;
