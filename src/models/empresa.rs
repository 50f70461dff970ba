//! Empresa (company) records.

use crate::domain::{
    format_for_display, Documento, EmpresaNumero, RecordId, ValidationError,
};
use super::lenient;
use serde::{Deserialize, Serialize};

/// A company as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Empresa {
    /// Backend identifier (absent on records the backend did not number)
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_id"
    )]
    pub id: Option<RecordId>,

    /// Five-digit company number
    #[serde(deserialize_with = "lenient::text")]
    pub numero: String,

    /// Company name
    #[serde(deserialize_with = "lenient::text")]
    pub nome: String,

    /// CPF or CNPJ, digits only
    #[serde(deserialize_with = "lenient::text")]
    pub documento: String,
}

impl Empresa {
    /// The documento masked for display.
    pub fn documento_formatado(&self) -> String {
        format_for_display(&self.documento)
    }

    /// One line of the company list: `numero — nome — documento`.
    pub fn list_line(&self) -> String {
        format!(
            "{} — {} — {}",
            self.numero,
            self.nome,
            self.documento_formatado()
        )
    }

    /// Stable key for list rendering; falls back to numero and documento when
    /// the record has no id.
    pub fn list_key(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => format!("{}-{}", self.numero, self.documento),
        }
    }
}

/// Raw company form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmpresaForm {
    pub numero: String,
    pub nome: String,
    pub documento: String,
}

impl EmpresaForm {
    /// Validate every field, in form order.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found; nothing is sent in that case.
    pub fn validate(&self) -> Result<NewEmpresa, ValidationError> {
        let numero = EmpresaNumero::new(self.numero.trim())?;

        let nome = self.nome.trim();
        if nome.is_empty() {
            return Err(ValidationError::EmptyNome);
        }

        let documento = Documento::parse(&self.documento)?;

        Ok(NewEmpresa {
            numero,
            nome: nome.to_string(),
            documento,
        })
    }
}

/// Validated payload for creating or updating a company.
///
/// Serializes to `{"numero": .., "nome": .., "documento": ..}` with the
/// documento as digits only.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewEmpresa {
    pub numero: EmpresaNumero,
    pub nome: String,
    pub documento: Documento,
}
