//! Cadastro Obras MCP Server - Main entry point
//!
//! Serves CPF/CNPJ validation and empresa/obra registration over MCP stdio.

use anyhow::Result;
use cadastro_obras::client::{AsyncObrasClient, AsyncObrasClientImpl};
use cadastro_obras::repositories::{
    ApiEmpresaRepository, ApiObraRepository, EmpresaRepository, ObraRepository,
};
use cadastro_obras::{CadastroMcpServer, Config, ObrasClient};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL from .env reaches the filter
    let config = Config::from_env();
    let filter = match &config {
        Ok(cfg) => cfg.log_filter(),
        Err(_) => Config::default().log_filter(),
    };

    // Logs go to stderr; stdout carries MCP
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Cadastro Obras MCP Server with API URL: {}",
        config.obras_api_url
    );

    let sync_client = ObrasClient::new(&config);
    let metrics = sync_client.metrics().clone();
    let client = Arc::new(AsyncObrasClientImpl::new(sync_client)) as Arc<dyn AsyncObrasClient>;

    let empresa_repo =
        Arc::new(ApiEmpresaRepository::new(client.clone())) as Arc<dyn EmpresaRepository>;
    let obra_repo = Arc::new(ApiObraRepository::new(client)) as Arc<dyn ObraRepository>;

    let server = CadastroMcpServer::new(empresa_repo, obra_repo, metrics);

    info!("Starting MCP server with stdio transport");
    cadastro_obras::server::run_server(server).await?;

    info!("Cadastro Obras MCP Server shutdown complete");
    Ok(())
}
