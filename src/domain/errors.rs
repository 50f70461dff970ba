//! Domain validation errors.

use super::document::DocumentKind;
use std::fmt;

/// Why a document number failed validation.
///
/// All variants collapse to a single "invalid" outcome for callers; the
/// distinction only exists to produce distinct messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentError {
    /// Wrong digit count. `kind` is `None` when the length matches neither CPF nor CNPJ.
    MalformedLength {
        kind: Option<DocumentKind>,
        len: usize,
    },

    /// Right length, but the check digits do not match.
    ChecksumMismatch(DocumentKind),

    /// Every digit is the same (e.g. "00000000000").
    DegenerateSequence(DocumentKind),

    /// The value contains something other than ASCII digits.
    NonDigit,
}

impl DocumentError {
    /// Short user-facing message, in the language of the registration form.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MalformedLength { .. } | Self::NonDigit => "Informe CPF (11) ou CNPJ (14) dígitos.",
            Self::ChecksumMismatch(DocumentKind::Cpf)
            | Self::DegenerateSequence(DocumentKind::Cpf) => "CPF inválido.",
            Self::ChecksumMismatch(DocumentKind::Cnpj)
            | Self::DegenerateSequence(DocumentKind::Cnpj) => "CNPJ inválido.",
        }
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLength {
                kind: Some(kind),
                len,
            } => write!(
                f,
                "{} must have {} digits, got {}",
                kind.label(),
                kind.expected_len(),
                len
            ),
            Self::MalformedLength { kind: None, len } => {
                write!(f, "Document must have 11 (CPF) or 14 (CNPJ) digits, got {}", len)
            }
            Self::ChecksumMismatch(kind) => write!(f, "{} check digits do not match", kind.label()),
            Self::DegenerateSequence(kind) => {
                write!(f, "{} cannot be a repeated single digit", kind.label())
            }
            Self::NonDigit => write!(f, "Document must contain only digits"),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The CPF/CNPJ is invalid.
    Document(DocumentError),

    /// Empresa numero is not exactly 5 digits.
    InvalidEmpresaNumero(String),

    /// Obra numero is not exactly 4 digits.
    InvalidObraNumero(String),

    /// Bloco is longer than 3 characters.
    InvalidBloco(String),

    /// Nome is blank.
    EmptyNome,

    /// Endereco is blank.
    EmptyEndereco,
}

impl ValidationError {
    /// Short user-facing message, in the language of the registration form.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyId => "Registro não selecionado.",
            Self::Document(e) => e.user_message(),
            Self::InvalidEmpresaNumero(_) => "O número deve ter 5 dígitos.",
            Self::InvalidObraNumero(_) => "O número da obra deve ter 4 dígitos.",
            Self::InvalidBloco(_) => "O bloco deve ter no máximo 3 caracteres.",
            Self::EmptyNome => "Informe o nome.",
            Self::EmptyEndereco => "Informe o endereço.",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::Document(e) => write!(f, "Invalid document: {}", e),
            Self::InvalidEmpresaNumero(n) => {
                write!(f, "Empresa numero must have exactly 5 digits: {:?}", n)
            }
            Self::InvalidObraNumero(n) => {
                write!(f, "Obra numero must have exactly 4 digits: {:?}", n)
            }
            Self::InvalidBloco(b) => write!(f, "Bloco must have at most 3 characters: {:?}", b),
            Self::EmptyNome => write!(f, "Nome cannot be empty"),
            Self::EmptyEndereco => write!(f, "Endereco cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Document(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DocumentError> for ValidationError {
    fn from(e: DocumentError) -> Self {
        Self::Document(e)
    }
}
