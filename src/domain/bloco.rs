//! Bloco value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Longest bloco accepted, in characters.
pub const BLOCO_MAX_CHARS: usize = 3;

/// Building block label within an obra ("A", "B2", "T01"). May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bloco(String);

impl Bloco {
    /// Trim surrounding whitespace and check the length.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidBloco` when longer than 3 characters.
    pub fn new(bloco: impl Into<String>) -> Result<Self, ValidationError> {
        let bloco = bloco.into();
        let trimmed = bloco.trim();
        if trimmed.chars().count() > BLOCO_MAX_CHARS {
            return Err(ValidationError::InvalidBloco(bloco));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Bloco {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Bloco {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Bloco::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Bloco {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bloco_length() {
        assert_eq!(Bloco::new(" A1 ").unwrap().as_str(), "A1");
        assert!(Bloco::new("").unwrap().is_empty());
        assert!(Bloco::new("ÁBC").is_ok());
        assert!(Bloco::new("ABCD").is_err());
    }
}
