//! Domain value objects and types.
//!
//! This module contains the CPF/CNPJ validator and type-safe wrappers for the
//! fields of empresa and obra records. Value objects validate at construction
//! time so invalid data never reaches the backend.

pub mod bloco;
pub mod document;
pub mod document_field;
pub mod errors;
pub mod numero;
pub mod record_id;

pub use bloco::Bloco;
pub use document::{
    check_cnpj, check_cpf, check_document, classify, format_for_display, input_mask,
    is_valid_cnpj, is_valid_cpf, normalize, DocumentClass, DocumentKind, DocumentNumber,
    Documento, ValidationResult,
};
pub use document_field::{DocumentFieldState, DocumentInput};
pub use errors::{DocumentError, ValidationError};
pub use numero::{EmpresaNumero, ObraNumero};
pub use record_id::RecordId;
