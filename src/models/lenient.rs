//! Tolerant decoding of backend record fields.
//!
//! One odd record must not make a whole list unreadable, so text fields accept
//! `null` (read as empty) and JSON numbers (read as their decimal text), and a
//! blank or `null` id reads as no id.

use crate::domain::RecordId;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(serde_json::Number),
}

impl RawText {
    fn into_string(self) -> String {
        match self {
            RawText::Text(s) => s,
            RawText::Number(n) => n.to_string(),
        }
    }
}

/// A text field that may arrive as a string, a number or `null`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawText>::deserialize(deserializer)?
        .map(RawText::into_string)
        .unwrap_or_default())
}

/// An optional id that may arrive as a string, a number, blank or `null`.
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawText>::deserialize(deserializer)?.map(RawText::into_string);
    Ok(raw.and_then(|s| RecordId::new(s).ok()))
}
