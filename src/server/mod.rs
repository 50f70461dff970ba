//! MCP server for document validation and empresa/obra registration.
//!
//! Exposes the validator and the Obras API operations to AI assistants
//! through the Model Context Protocol.

pub mod handlers;

pub use handlers::CadastroMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server over stdio until the client disconnects.
pub async fn run_server(server: CadastroMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
