//! Live state of a CPF/CNPJ input field.
//!
//! Every keystroke re-evaluates the field from scratch: normalize, classify by
//! length, then run the checksum once the length is complete. Nothing survives
//! between evaluations except the digit string itself.

use super::document::{
    classify, input_mask, normalize, DocumentClass, DocumentKind, DocumentNumber,
};
use super::errors::DocumentError;

/// Where a document field stands after the latest input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFieldState {
    /// Nothing typed.
    Empty,
    /// Still typing; `expecting` is the kind the current length is heading towards.
    Incomplete { expecting: DocumentKind },
    /// More than 14 digits.
    TooLong,
    /// A complete, valid document.
    Valid(DocumentKind),
    /// A complete document that fails validation.
    Invalid(DocumentError),
}

impl DocumentFieldState {
    /// Evaluate raw field text.
    pub fn evaluate(raw: &str) -> Self {
        Self::from_digits(&normalize(raw))
    }

    fn from_digits(digits: &str) -> Self {
        if digits.is_empty() {
            return Self::Empty;
        }

        match classify(digits) {
            DocumentClass::Incomplete if digits.len() < DocumentKind::Cpf.expected_len() => {
                Self::Incomplete {
                    expecting: DocumentKind::Cpf,
                }
            }
            DocumentClass::Incomplete => Self::Incomplete {
                expecting: DocumentKind::Cnpj,
            },
            DocumentClass::TooLong => Self::TooLong,
            DocumentClass::Cpf | DocumentClass::Cnpj => {
                match DocumentNumber::parse(digits).check() {
                    Ok(kind) => Self::Valid(kind),
                    Err(e) => Self::Invalid(e),
                }
            }
        }
    }

    /// Inline hint for the user, `None` when there is nothing to say.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Empty | Self::Valid(_) => None,
            Self::Incomplete {
                expecting: DocumentKind::Cpf,
            } => Some("Digite 11 dígitos para CPF ou continue para CNPJ."),
            Self::Incomplete {
                expecting: DocumentKind::Cnpj,
            } => Some("Digite 14 dígitos para CNPJ."),
            Self::TooLong => Some("Documento com mais de 14 dígitos."),
            Self::Invalid(e) => Some(e.user_message()),
        }
    }

    /// Only a complete, valid document may be submitted.
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Message shown when the user submits in this state.
    pub fn submit_error(&self) -> Option<&'static str> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(e) => Some(e.user_message()),
            Self::Empty | Self::Incomplete { .. } | Self::TooLong => {
                Some("Informe CPF (11) ou CNPJ (14) dígitos.")
            }
        }
    }
}

/// One input event on the document field.
///
/// Keeps what the user sees (`display`), what gets transmitted (`digits`),
/// and the evaluated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInput {
    pub display: String,
    pub digits: DocumentNumber,
    pub state: DocumentFieldState,
}

impl DocumentInput {
    pub fn on_input(raw: &str) -> Self {
        let digits = DocumentNumber::parse(raw);
        let state = DocumentFieldState::from_digits(digits.as_str());
        Self {
            display: raw.to_string(),
            digits,
            state,
        }
    }

    /// Input mask the field should apply next.
    pub fn mask(&self) -> &'static str {
        input_mask(self.digits.as_str())
    }

    pub fn message(&self) -> Option<&'static str> {
        self.state.message()
    }
}
