//! Fixed-width record numbers for empresas (5 digits) and obras (4 digits).

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Digits in an empresa numero.
pub const EMPRESA_NUMERO_LEN: usize = 5;

/// Digits in an obra numero.
pub const OBRA_NUMERO_LEN: usize = 4;

/// Keep the first `max` ASCII digits of `raw`, dropping everything else.
fn sanitize_digits(raw: &str, max: usize) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

fn is_exact_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Company number, exactly five digits (leading zeros significant).
///
/// # Example
///
/// ```
/// use cadastro_obras::domain::EmpresaNumero;
///
/// assert_eq!(EmpresaNumero::sanitize("00a0012"), "00001");
/// assert!(EmpresaNumero::new("00001").is_ok());
/// assert!(EmpresaNumero::new("001").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmpresaNumero(String);

impl EmpresaNumero {
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmpresaNumero` unless `numero` is exactly 5 digits.
    pub fn new(numero: impl Into<String>) -> Result<Self, ValidationError> {
        let numero = numero.into();
        if !is_exact_digits(&numero, EMPRESA_NUMERO_LEN) {
            return Err(ValidationError::InvalidEmpresaNumero(numero));
        }
        Ok(Self(numero))
    }

    /// What the numero input keeps from a keystroke: digits only, at most 5.
    pub fn sanitize(raw: &str) -> String {
        sanitize_digits(raw, EMPRESA_NUMERO_LEN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Construction-site number, exactly four digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObraNumero(String);

impl ObraNumero {
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidObraNumero` unless `numero` is exactly 4 digits.
    pub fn new(numero: impl Into<String>) -> Result<Self, ValidationError> {
        let numero = numero.into();
        if !is_exact_digits(&numero, OBRA_NUMERO_LEN) {
            return Err(ValidationError::InvalidObraNumero(numero));
        }
        Ok(Self(numero))
    }

    /// Digits only, at most 4.
    pub fn sanitize(raw: &str) -> String {
        sanitize_digits(raw, OBRA_NUMERO_LEN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for EmpresaNumero {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EmpresaNumero {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmpresaNumero::new(s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for ObraNumero {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObraNumero {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObraNumero::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EmpresaNumero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ObraNumero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
