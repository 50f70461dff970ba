//! Application service layer.
//!
//! Services validate form input and orchestrate the repositories. They sit
//! between the MCP handlers and the data access layer; an invalid form never
//! produces a request.

mod document_service;
mod empresa_service;
mod obra_service;

pub use document_service::{inspect_document, DocumentReport};
pub use empresa_service::{EmpresaService, EmpresaServiceImpl};
pub use obra_service::{ObraService, ObraServiceImpl};
