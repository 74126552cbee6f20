//! Protocol-level error type for tool execution.
//!
//! Every tool handler resolves to either one result envelope or one of these
//! errors. The three variants map directly onto the JSON-RPC error codes the
//! MCP transport reports to callers, and they encode the two-tier policy the
//! dispatcher relies on: `InvalidParams` and `MethodNotFound` are raised
//! deliberately before any backend call and propagate unchanged, while every
//! backend or unexpected failure is wrapped as `Internal` with the underlying
//! message preserved.

/// Error raised by tool dispatch and tool handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// Caller-supplied arguments failed validation (missing required field,
    /// unsupported enumerated value). Raised before any backend call.
    #[error("{0}")]
    InvalidParams(String),

    /// The requested tool or protocol method is not recognized.
    #[error("{0}")]
    MethodNotFound(String),

    /// A backend call or anything else downstream failed. Carries the
    /// underlying message for diagnostics.
    #[error("{0}")]
    Internal(String),
}

impl ToolError {
    /// Wrap a backend failure under a fixed category label, preserving the
    /// underlying error text.
    pub fn backend(label: &str, err: impl std::fmt::Display) -> Self {
        ToolError::Internal(format!("{label}: {err}"))
    }

    /// The JSON-RPC error code for this variant.
    pub fn code(&self) -> i64 {
        match self {
            ToolError::InvalidParams(_) => -32602,
            ToolError::MethodNotFound(_) => -32601,
            ToolError::Internal(_) => -32603,
        }
    }
}
