//! MCP (Model Context Protocol) layer.
//!
//! This module exposes the PocketBase operations as discoverable tools for
//! AI agents: a static catalog of tool descriptors, a dispatcher that routes
//! call-by-name requests to handlers, and a stdio JSON-RPC transport loop.
//!
//! ```text
//! ┌─────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │  AI Agent   │───▶│  MCP Protocol    │───▶│  PocketBase     │
//! │  (Client)   │    │  (This Module)   │    │  (Backend)      │
//! └─────────────┘    └──────────────────┘    └─────────────────┘
//!       │                     │                       │
//!       ▼                     ▼                       ▼
//!  Tool Discovery       Dispatch + Validation    Collections/Records/Auth
//! ```
//!
//! # Module Structure
//!
//! - `core` - Server struct and the result envelope
//! - `protocol` - Tool catalog, dispatch, and the stdio JSON-RPC loop
//! - `tools/` - JSON schema definitions for tool discovery
//! - `handlers/` - Tool execution handlers

pub mod core;
pub mod handlers;
pub mod protocol;
pub mod tools;

#[cfg(test)]
mod tests;

pub use core::{PocketBaseMcpServer, ServerInfo, ToolContent, ToolResult};
