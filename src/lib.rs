//! PocketBase MCP server library.
//!
//! Exposes a PocketBase backend's collection management, record CRUD,
//! authentication flows, schema migration, backup/import, and index
//! management as Model Context Protocol tools that AI agents can discover
//! and execute.
//!
//! # Core Components
//!
//! - [`PocketBaseMcpServer`] - Tool catalog, dispatch, and the stdio protocol loop
//! - [`PocketBase`] - Trait for implementing backend clients
//! - [`HttpPocketBase`] - reqwest-based client for a live PocketBase instance
//! - [`InMemoryPocketBase`] - In-memory client for tests and local development
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pocketbase_mcp_server::{HttpPocketBase, PocketBaseMcpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     let client = HttpPocketBase::new(&config.base_url)?;
//!     let server = PocketBaseMcpServer::new(client).with_admin_credentials(config.admin_credentials());
//!     server.run_stdio().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod mcp;
pub mod model;
pub mod transform;

// Re-export commonly used types for convenience
pub use client::{ClientError, HttpPocketBase, InMemoryPocketBase, PocketBase};
pub use config::{AdminCredentials, ConfigError, ServerConfig};
pub use error::ToolError;
pub use mcp::{PocketBaseMcpServer, ServerInfo, ToolContent, ToolResult};
pub use model::{
    CollectionModel, CollectionUpdate, FieldSchema, IndexModel, ListOptions, RecordPage,
};
pub use transform::{Transform, TransformError};
