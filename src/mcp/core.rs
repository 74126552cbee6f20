//! Core MCP server type and the result envelope.

use crate::client::PocketBase;
use crate::config::AdminCredentials;
use crate::error::ToolError;
use serde::Serialize;

/// Metadata advertised to clients during the `initialize` handshake.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: "pocketbase-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One content item inside a tool result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// The uniform success envelope: every tool reduces its outcome to an
/// ordered sequence of content items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
}

impl ToolResult {
    /// A result carrying one plain-text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
        }
    }

    /// A result carrying one pretty-printed JSON payload.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ToolError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| ToolError::Internal(format!("Failed to serialize result: {e}")))?;
        Ok(Self::text(text))
    }

    /// The concatenated text of all content items, for tests and logging.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect()
    }
}

/// MCP server wrapping a PocketBase client.
///
/// Generic over the backend client so the tool layer can run against the
/// HTTP client in production and the in-memory client in tests.
pub struct PocketBaseMcpServer<C: PocketBase> {
    pub(crate) client: C,
    pub(crate) server_info: ServerInfo,
    pub(crate) admin_credentials: Option<AdminCredentials>,
}

impl<C: PocketBase + Send + Sync> PocketBaseMcpServer<C> {
    /// Create a server with default metadata and no admin fallback.
    pub fn new(client: C) -> Self {
        Self {
            client,
            server_info: ServerInfo::default(),
            admin_credentials: None,
        }
    }

    /// Override the metadata advertised during `initialize`.
    pub fn with_info(mut self, server_info: ServerInfo) -> Self {
        self.server_info = server_info;
        self
    }

    /// Configure fallback admin credentials for elevated authentication.
    pub fn with_admin_credentials(mut self, credentials: Option<AdminCredentials>) -> Self {
        self.admin_credentials = credentials;
        self
    }

    /// The advertised server metadata.
    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// The wrapped backend client.
    pub fn client(&self) -> &C {
        &self.client
    }
}
