//! Document inspection.
//!
//! Everything a form needs to know about a CPF/CNPJ field in one report.

use crate::domain::{DocumentClass, DocumentInput, DocumentKind, ValidationResult};
use serde::Serialize;

/// Result of inspecting raw document input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    /// Digits that would be transmitted
    pub digits: String,

    /// Length classification of the digits
    pub class: DocumentClass,

    /// Document kind, once the input is complete and valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DocumentKind>,

    pub valid: bool,

    /// Why validation failed, for complete-length or malformed input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Inline hint for the person typing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Masked form (unchanged digits when incomplete)
    pub formatted: String,

    /// Input mask the field should use next
    pub mask: String,
}

/// Inspect raw document input as typed.
pub fn inspect_document(raw: &str) -> DocumentReport {
    let input = DocumentInput::on_input(raw);
    let result = input.digits.validate();

    let (kind, reason) = match result {
        ValidationResult::Valid(kind) => (Some(kind), None),
        ValidationResult::Invalid(e) => (None, Some(e.to_string())),
    };

    let message = input.state.message().map(str::to_string);

    DocumentReport {
        class: input.digits.class(),
        kind,
        valid: result.is_valid(),
        reason,
        message,
        formatted: input.digits.formatted(),
        mask: input.mask().to_string(),
        digits: input.digits.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_valid_cnpj() {
        let report = inspect_document("11.222.333/0001-81");
        assert!(report.valid);
        assert_eq!(report.kind, Some(DocumentKind::Cnpj));
        assert_eq!(report.digits, "11222333000181");
        assert_eq!(report.formatted, "11.222.333/0001-81");
        assert_eq!(report.reason, None);
        assert_eq!(report.message, None);
    }

    #[test]
    fn test_inspect_invalid_cpf() {
        let report = inspect_document("11144477736");
        assert!(!report.valid);
        assert_eq!(report.class, DocumentClass::Cpf);
        assert_eq!(report.message.as_deref(), Some("CPF inválido."));
        assert_eq!(
            report.reason.as_deref(),
            Some("CPF check digits do not match")
        );
    }

    #[test]
    fn test_inspect_partial() {
        let report = inspect_document("1234");
        assert!(!report.valid);
        assert_eq!(report.class, DocumentClass::Incomplete);
        assert_eq!(report.formatted, "1234");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["class"], "incomplete");
        assert!(json.get("kind").is_none());
    }
}
