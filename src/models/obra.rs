//! Obra (construction site) records.

use crate::domain::{Bloco, ObraNumero, RecordId, ValidationError};
use super::lenient;
use serde::{Deserialize, Serialize};

/// A construction site belonging to an empresa.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Obra {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_id"
    )]
    pub id: Option<RecordId>,

    /// Owning empresa, when the backend includes it
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_id"
    )]
    pub empresa_id: Option<RecordId>,

    /// Four-digit site number
    #[serde(deserialize_with = "lenient::text")]
    pub numero: String,

    #[serde(deserialize_with = "lenient::text")]
    pub nome: String,

    /// Block label, at most 3 characters
    #[serde(deserialize_with = "lenient::text")]
    pub bloco: String,

    #[serde(deserialize_with = "lenient::text")]
    pub endereco: String,
}

impl Obra {
    /// One line of the site list.
    pub fn list_line(&self) -> String {
        if self.bloco.is_empty() {
            format!("{} — {} — {}", self.numero, self.nome, self.endereco)
        } else {
            format!(
                "{} — {} — Bloco {} — {}",
                self.numero, self.nome, self.bloco, self.endereco
            )
        }
    }
}

/// Raw site form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObraForm {
    pub numero: String,
    pub nome: String,
    pub bloco: String,
    pub endereco: String,
}

impl ObraForm {
    /// Validate every field, in form order.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<NewObra, ValidationError> {
        let numero = ObraNumero::new(self.numero.trim())?;

        let nome = self.nome.trim();
        if nome.is_empty() {
            return Err(ValidationError::EmptyNome);
        }

        let bloco = Bloco::new(self.bloco.as_str())?;

        let endereco = self.endereco.trim();
        if endereco.is_empty() {
            return Err(ValidationError::EmptyEndereco);
        }

        Ok(NewObra {
            numero,
            nome: nome.to_string(),
            bloco,
            endereco: endereco.to_string(),
        })
    }
}

/// Validated payload for creating or updating a site.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewObra {
    pub numero: ObraNumero,
    pub nome: String,
    pub bloco: Bloco,
    pub endereco: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(numero: &str, bloco: &str, endereco: &str) -> ObraForm {
        ObraForm {
            numero: numero.to_string(),
            nome: "Residencial Aurora".to_string(),
            bloco: bloco.to_string(),
            endereco: endereco.to_string(),
        }
    }

    #[test]
    fn test_obra_deserialization() {
        let json = r#"{"id": "9", "empresa_id": 3, "numero": "0001", "nome": "Residencial Aurora", "bloco": "A", "endereco": "Rua das Flores, 100"}"#;
        let obra: Obra = serde_json::from_str(json).unwrap();
        assert_eq!(obra.empresa_id.as_ref().map(|id| id.as_str()), Some("3"));
        assert_eq!(
            obra.list_line(),
            "0001 — Residencial Aurora — Bloco A — Rua das Flores, 100"
        );
    }

    #[test]
    fn test_form_validate() {
        let new = form("0001", " A ", "Rua das Flores, 100").validate().unwrap();
        let body = serde_json::to_value(&new).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "numero": "0001",
                "nome": "Residencial Aurora",
                "bloco": "A",
                "endereco": "Rua das Flores, 100"
            })
        );
    }

    #[test]
    fn test_form_rejections() {
        assert!(matches!(
            form("01", "A", "Rua").validate(),
            Err(ValidationError::InvalidObraNumero(_))
        ));
        assert!(matches!(
            form("0001", "ABCD", "Rua").validate(),
            Err(ValidationError::InvalidBloco(_))
        ));
        assert_eq!(
            form("0001", "A", "  ").validate(),
            Err(ValidationError::EmptyEndereco)
        );
    }
}
