//! Data models for the records exchanged with the Obras API.
//!
//! `Empresa` and `Obra` mirror what the backend returns; the `*Form` types hold
//! raw user input and validate into the `New*` payloads that get sent.

pub mod empresa;
mod lenient;
pub mod obra;

pub use empresa::{Empresa, EmpresaForm, NewEmpresa};
pub use obra::{NewObra, Obra, ObraForm};
