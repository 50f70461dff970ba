//! Cadastro Obras - CPF/CNPJ validation and an MCP server for the Sistema Obras backend.
//!
//! This library validates Brazilian taxpayer documents (CPF and CNPJ) and exposes
//! registration of empresas and their obras to AI assistants over the Model
//! Context Protocol.
//!
//! # Architecture
//!
//! - **domain**: Document validation, form field state and value objects
//! - **models**: Empresa and obra records plus their form input
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **client**: HTTP client for the Obras API
//! - **repositories**: Data access traits over the client
//! - **services**: Form validation and orchestration
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

pub use client::ObrasClient;
pub use config::Config;
pub use domain::{
    check_document, format_for_display, normalize, DocumentError, DocumentKind, DocumentNumber,
    Documento, ValidationError,
};
pub use error::{ConfigError, ObrasApiError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary, Operation, OperationSummary};
pub use models::{Empresa, EmpresaForm, NewEmpresa, NewObra, Obra, ObraForm};
pub use server::CadastroMcpServer;
