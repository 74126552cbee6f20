//! PocketBase MCP server binary.
//!
//! Reads configuration from the environment, connects the HTTP client, and
//! serves MCP over stdio until stdin closes or the process is interrupted.
//!
//! ```bash
//! POCKETBASE_URL=http://127.0.0.1:8090 pocketbase-mcp-server
//! ```
//!
//! Optional: `POCKETBASE_ADMIN_EMAIL` / `POCKETBASE_ADMIN_PASSWORD` enable
//! the admin-credential fallback for elevated authentication.

use pocketbase_mcp_server::{HttpPocketBase, PocketBaseMcpServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Protocol frames own stdout; logs go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ServerConfig::from_env()?;
    let client = HttpPocketBase::new(&config.base_url)?;
    let server =
        PocketBaseMcpServer::new(client).with_admin_credentials(config.admin_credentials());

    server.run_stdio().await?;
    Ok(())
}
