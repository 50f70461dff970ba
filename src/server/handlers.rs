//! MCP tool handlers for the cadastro server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::domain::format_for_display;
use crate::error::ObrasApiError;
use crate::metrics::Metrics;
use crate::models::{Empresa, EmpresaForm, Obra, ObraForm};
use crate::repositories::{EmpresaRepository, ObraRepository};
use crate::services::{
    inspect_document, EmpresaService, EmpresaServiceImpl, ObraService, ObraServiceImpl,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing document validation and empresa/obra registration.
#[derive(Clone)]
pub struct CadastroMcpServer {
    empresa_service: Arc<dyn EmpresaService>,
    obra_service: Arc<dyn ObraService>,
    metrics: Metrics,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for CadastroMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "cadastro-obras-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Validates Brazilian CPF/CNPJ numbers and registers empresas and their obras in the Sistema Obras backend. Documents are always sent as digits only.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DocumentParams {
    /// CPF or CNPJ, masked or digits only
    documento: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct IdParams {
    id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct EmpresaIdParams {
    empresa_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct EmpresaToolParams {
    /// Five-digit company number
    numero: String,
    nome: String,
    /// CPF or CNPJ, masked or digits only
    documento: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateEmpresaToolParams {
    id: String,
    numero: String,
    nome: String,
    documento: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ObraToolParams {
    empresa_id: String,
    /// Four-digit site number
    numero: String,
    nome: String,
    /// Block label, at most 3 characters
    #[serde(default)]
    bloco: Option<String>,
    endereco: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateObraToolParams {
    id: String,
    numero: String,
    nome: String,
    #[serde(default)]
    bloco: Option<String>,
    endereco: String,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

/// Validation failures are the caller's fault; everything else is internal.
fn api_error(e: ObrasApiError) -> McpError {
    let code = match e {
        ObrasApiError::Validation(_) => ErrorCode::INVALID_PARAMS,
        _ => ErrorCode::INTERNAL_ERROR,
    };

    McpError {
        code,
        message: Cow::from(e.to_string()),
        data: Some(serde_json::json!({ "user_message": e.user_message() })),
    }
}

fn json_result(value: &serde_json::Value) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn empresa_json(e: &Empresa) -> serde_json::Value {
    serde_json::json!({
        "id": e.id,
        "numero": e.numero,
        "nome": e.nome,
        "documento": e.documento,
        "documento_formatado": e.documento_formatado(),
        "line": e.list_line(),
    })
}

fn obra_json(o: &Obra) -> serde_json::Value {
    serde_json::json!({
        "id": o.id,
        "empresa_id": o.empresa_id,
        "numero": o.numero,
        "nome": o.nome,
        "bloco": o.bloco,
        "endereco": o.endereco,
        "line": o.list_line(),
    })
}

impl CadastroMcpServer {
    /// Convert a service error, counting form rejections.
    fn reject(&self, e: ObrasApiError) -> McpError {
        if matches!(e, ObrasApiError::Validation(_)) {
            self.metrics.record_validation_rejection();
        }
        api_error(e)
    }
}

#[tool_router]
impl CadastroMcpServer {
    /// Create a new cadastro MCP server.
    pub fn new(
        empresa_repo: Arc<dyn EmpresaRepository>,
        obra_repo: Arc<dyn ObraRepository>,
        metrics: Metrics,
    ) -> Self {
        let empresa_service =
            Arc::new(EmpresaServiceImpl::new(empresa_repo)) as Arc<dyn EmpresaService>;
        let obra_service = Arc::new(ObraServiceImpl::new(obra_repo)) as Arc<dyn ObraService>;

        Self {
            empresa_service,
            obra_service,
            metrics,
            tool_router: Self::tool_router(),
        }
    }

    /// Validate a CPF or CNPJ.
    #[tool(
        description = "Validate a Brazilian CPF (11 digits) or CNPJ (14 digits). Accepts masked or digit-only input and reports the digits, classification, validity, failure reason and display format."
    )]
    async fn validate_document(
        &self,
        params: Parameters<DocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = inspect_document(&params.0.documento);
        let value = serde_json::to_value(&report).map_err(to_mcp_error)?;
        json_result(&value)
    }

    /// Format a CPF or CNPJ for display.
    #[tool(
        description = "Format a CPF as ###.###.###-## or a CNPJ as ##.###.###/####-##. Partial input is returned as digits."
    )]
    async fn format_document(
        &self,
        params: Parameters<DocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        let digits = crate::domain::normalize(&params.0.documento);
        json_result(&serde_json::json!({
            "digits": digits,
            "formatted": format_for_display(&digits),
        }))
    }

    /// List every registered empresa.
    #[tool(description = "List every registered empresa with its formatted CPF/CNPJ")]
    async fn list_empresas(&self) -> Result<CallToolResult, McpError> {
        let empresas = self
            .empresa_service
            .list_empresas()
            .await
            .map_err(|e| self.reject(e))?;

        json_result(&serde_json::json!({
            "count": empresas.len(),
            "empresas": empresas.iter().map(empresa_json).collect::<Vec<_>>(),
        }))
    }

    /// Register a new empresa.
    #[tool(
        description = "Register a new empresa. numero must be 5 digits and documento a valid CPF or CNPJ; invalid input is rejected before reaching the backend."
    )]
    async fn register_empresa(
        &self,
        params: Parameters<EmpresaToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::info!("MCP Handler: register_empresa called");

        let form = EmpresaForm {
            numero: params.numero,
            nome: params.nome,
            documento: params.documento,
        };

        let empresa = self
            .empresa_service
            .register_empresa(form)
            .await
            .map_err(|e| self.reject(e))?;

        json_result(&empresa_json(&empresa))
    }

    /// Update an empresa.
    #[tool(description = "Replace the numero, nome and documento of an existing empresa")]
    async fn update_empresa(
        &self,
        params: Parameters<UpdateEmpresaToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let form = EmpresaForm {
            numero: params.numero,
            nome: params.nome,
            documento: params.documento,
        };

        let empresa = self
            .empresa_service
            .update_empresa(&params.id, form)
            .await
            .map_err(|e| self.reject(e))?;

        json_result(&empresa_json(&empresa))
    }

    /// Delete an empresa.
    #[tool(description = "Delete an empresa by id")]
    async fn delete_empresa(
        &self,
        params: Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = params.0.id;
        self.empresa_service
            .delete_empresa(&id)
            .await
            .map_err(|e| self.reject(e))?;

        json_result(&serde_json::json!({ "deleted": id }))
    }

    /// List the obras of an empresa.
    #[tool(description = "List the obras (construction sites) registered under an empresa")]
    async fn list_obras(
        &self,
        params: Parameters<EmpresaIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let empresa_id = params.0.empresa_id;
        let obras = self
            .obra_service
            .list_obras(&empresa_id)
            .await
            .map_err(|e| self.reject(e))?;

        json_result(&serde_json::json!({
            "empresa_id": empresa_id,
            "count": obras.len(),
            "obras": obras.iter().map(obra_json).collect::<Vec<_>>(),
        }))
    }

    /// Register an obra under an empresa.
    #[tool(
        description = "Register an obra under an empresa. numero must be 4 digits and bloco at most 3 characters."
    )]
    async fn register_obra(
        &self,
        params: Parameters<ObraToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        tracing::info!("MCP Handler: register_obra called");

        let form = ObraForm {
            numero: params.numero,
            nome: params.nome,
            bloco: params.bloco.unwrap_or_default(),
            endereco: params.endereco,
        };

        let obra = self
            .obra_service
            .register_obra(&params.empresa_id, form)
            .await
            .map_err(|e| self.reject(e))?;

        json_result(&obra_json(&obra))
    }

    /// Update an obra.
    #[tool(description = "Replace the numero, nome, bloco and endereco of an existing obra")]
    async fn update_obra(
        &self,
        params: Parameters<UpdateObraToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let form = ObraForm {
            numero: params.numero,
            nome: params.nome,
            bloco: params.bloco.unwrap_or_default(),
            endereco: params.endereco,
        };

        let obra = self
            .obra_service
            .update_obra(&params.id, form)
            .await
            .map_err(|e| self.reject(e))?;

        json_result(&obra_json(&obra))
    }

    /// Delete an obra.
    #[tool(description = "Delete an obra by id")]
    async fn delete_obra(&self, params: Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        let id = params.0.id;
        self.obra_service
            .delete_obra(&id)
            .await
            .map_err(|e| self.reject(e))?;

        json_result(&serde_json::json!({ "deleted": id }))
    }

    /// Report HTTP metrics.
    #[tool(description = "Report request counts, error counts and latency of calls to the backend")]
    async fn get_metrics(&self) -> Result<CallToolResult, McpError> {
        let value = serde_json::to_value(self.metrics.summary()).map_err(to_mcp_error)?;
        json_result(&value)
    }
}
