//! CPF/CNPJ document numbers.
//!
//! Brazilian taxpayer identifiers carry two trailing check digits computed with
//! a modulo-11 weighted sum. Everything here is pure and total: malformed input
//! yields `false` or an error value, never a panic.

use super::errors::DocumentError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Digit count of a CPF.
pub const CPF_LEN: usize = 11;

/// Digit count of a CNPJ.
pub const CNPJ_LEN: usize = 14;

/// Input mask used while the value still fits a CPF.
pub const CPF_MASK: &str = "999.999.999-99";

/// Input mask used once the value has more digits than a CPF.
pub const CNPJ_MASK: &str = "99.999.999/9999-99";

/// The two document kinds with a meaningful length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentKind {
    /// Individual taxpayer (11 digits).
    Cpf,
    /// Company taxpayer (14 digits).
    Cnpj,
}

impl DocumentKind {
    /// Number of digits a complete document of this kind has.
    pub fn expected_len(self) -> usize {
        match self {
            Self::Cpf => CPF_LEN,
            Self::Cnpj => CNPJ_LEN,
        }
    }

    /// Display label ("CPF" or "CNPJ").
    pub fn label(self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of a digit string by length alone.
///
/// Input arrives keystroke by keystroke, so "not done typing" is kept apart
/// from "too many digits".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentClass {
    Cpf,
    Cnpj,
    Incomplete,
    TooLong,
}

impl DocumentClass {
    /// The document kind for complete lengths.
    pub fn kind(self) -> Option<DocumentKind> {
        match self {
            Self::Cpf => Some(DocumentKind::Cpf),
            Self::Cnpj => Some(DocumentKind::Cnpj),
            Self::Incomplete | Self::TooLong => None,
        }
    }
}

/// Strip every character that is not an ASCII digit.
///
/// ```
/// use cadastro_obras::domain::document::normalize;
///
/// assert_eq!(normalize("123.456.789-09"), "12345678909");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Classify a digit string by its length.
pub fn classify(digits: &str) -> DocumentClass {
    match digits.chars().count() {
        CPF_LEN => DocumentClass::Cpf,
        CNPJ_LEN => DocumentClass::Cnpj,
        n if n > CNPJ_LEN => DocumentClass::TooLong,
        _ => DocumentClass::Incomplete,
    }
}

/// Whether `digits` is a valid CPF (11 digits, correct check digits).
pub fn is_valid_cpf(digits: &str) -> bool {
    check_cpf(digits).is_ok()
}

/// Whether `digits` is a valid CNPJ (14 digits, correct check digits).
pub fn is_valid_cnpj(digits: &str) -> bool {
    check_cnpj(digits).is_ok()
}

/// Validate a CPF, reporting why it failed.
pub fn check_cpf(digits: &str) -> Result<DocumentKind, DocumentError> {
    let d = digit_values(digits, DocumentKind::Cpf)?;

    let first = cpf_check_digit(&d[..9]);
    let second = cpf_check_digit(&d[..10]);
    if first != d[9] || second != d[10] {
        return Err(DocumentError::ChecksumMismatch(DocumentKind::Cpf));
    }

    Ok(DocumentKind::Cpf)
}

/// Validate a CNPJ, reporting why it failed.
pub fn check_cnpj(digits: &str) -> Result<DocumentKind, DocumentError> {
    let mut d = digit_values(digits, DocumentKind::Cnpj)?;

    let mut base: Vec<u32> = d.drain(..12).collect();
    let first = cnpj_check_digit(&base);
    base.push(first);
    let second = cnpj_check_digit(&base);

    // `d` now holds only the two trailing check digits
    if d != [first, second] {
        return Err(DocumentError::ChecksumMismatch(DocumentKind::Cnpj));
    }

    Ok(DocumentKind::Cnpj)
}

/// Validate a digit string as whichever document its length implies.
pub fn check_document(digits: &str) -> Result<DocumentKind, DocumentError> {
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(DocumentError::NonDigit);
    }

    match classify(digits) {
        DocumentClass::Cpf => check_cpf(digits),
        DocumentClass::Cnpj => check_cnpj(digits),
        DocumentClass::Incomplete | DocumentClass::TooLong => Err(DocumentError::MalformedLength {
            kind: None,
            len: digits.len(),
        }),
    }
}

/// Mask a complete CPF or CNPJ for display.
///
/// Anything that is not an 11- or 14-digit string (partial input, stray
/// characters) is returned unchanged. The masked form is cosmetic only.
pub fn format_for_display(digits: &str) -> String {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }

    match digits.len() {
        CPF_LEN => format!(
            "{}.{}.{}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..11]
        ),
        CNPJ_LEN => format!(
            "{}.{}.{}/{}-{}",
            &digits[0..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..12],
            &digits[12..14]
        ),
        _ => digits.to_string(),
    }
}

/// The input mask for a document field given what has been typed so far.
///
/// Stays on the CPF mask up to 11 digits and switches to the CNPJ mask after.
pub fn input_mask(raw: &str) -> &'static str {
    if raw.chars().filter(|c| c.is_ascii_digit()).count() <= CPF_LEN {
        CPF_MASK
    } else {
        CNPJ_MASK
    }
}

/// Parse `digits` into numeric values, rejecting non-digits, the wrong length
/// and single-digit repetitions.
fn digit_values(digits: &str, kind: DocumentKind) -> Result<Vec<u32>, DocumentError> {
    let values: Vec<u32> = digits
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<_>>()
        .ok_or(DocumentError::NonDigit)?;

    if values.len() != kind.expected_len() {
        return Err(DocumentError::MalformedLength {
            kind: Some(kind),
            len: values.len(),
        });
    }

    if values.windows(2).all(|w| w[0] == w[1]) {
        return Err(DocumentError::DegenerateSequence(kind));
    }

    Ok(values)
}

/// CPF check digit over `prefix` (9 or 10 digits), weights descending to 2.
fn cpf_check_digit(prefix: &[u32]) -> u32 {
    let top = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (top - i as u32))
        .sum();

    let r = (sum * 10) % 11;
    if r >= 10 {
        0
    } else {
        r
    }
}

/// CNPJ check digit: weights 2..=9 assigned from the last digit backwards, cycling.
fn cnpj_check_digit(base: &[u32]) -> u32 {
    let sum: u32 = base
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| d * (2 + (i as u32 % 8)))
        .sum();

    let r = sum % 11;
    if r < 2 {
        0
    } else {
        11 - r
    }
}

/// Outcome of validating a document number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(DocumentKind),
    Invalid(DocumentError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The failure reason, if any.
    pub fn error(&self) -> Option<DocumentError> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(e) => Some(*e),
        }
    }
}

impl From<Result<DocumentKind, DocumentError>> for ValidationResult {
    fn from(result: Result<DocumentKind, DocumentError>) -> Self {
        match result {
            Ok(kind) => Self::Valid(kind),
            Err(e) => Self::Invalid(e),
        }
    }
}

/// A digit-only document number of any length.
///
/// Built fresh from user input on every keystroke and validated on demand.
///
/// # Example
///
/// ```
/// use cadastro_obras::domain::DocumentNumber;
///
/// let doc = DocumentNumber::parse("111.444.777-35");
/// assert_eq!(doc.as_str(), "11144477735");
/// assert!(doc.validate().is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    /// Build from free-form input, dropping every non-digit.
    pub fn parse(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// Build from a string that must already be digit-only.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::NonDigit` if any character is not an ASCII digit.
    pub fn from_digits(digits: impl Into<String>) -> Result<Self, DocumentError> {
        let digits = digits.into();
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DocumentError::NonDigit);
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn class(&self) -> DocumentClass {
        classify(&self.0)
    }

    pub fn check(&self) -> Result<DocumentKind, DocumentError> {
        check_document(&self.0)
    }

    pub fn validate(&self) -> ValidationResult {
        self.check().into()
    }

    /// Display form (masked when complete).
    pub fn formatted(&self) -> String {
        format_for_display(&self.0)
    }
}

impl Serialize for DocumentNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DocumentNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DocumentNumber::from_digits(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A CPF or CNPJ that passed validation.
///
/// Always holds the digit-only form, which is what gets transmitted and stored.
///
/// # Example
///
/// ```
/// use cadastro_obras::domain::{DocumentKind, Documento};
///
/// let doc = Documento::parse("11.222.333/0001-81").unwrap();
/// assert_eq!(doc.kind(), DocumentKind::Cnpj);
/// assert_eq!(doc.as_str(), "11222333000181");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Documento {
    digits: String,
    kind: DocumentKind,
}

impl Documento {
    /// Validate a digit-only string.
    ///
    /// # Errors
    ///
    /// Returns the `DocumentError` describing the first failed check.
    pub fn new(digits: impl Into<String>) -> Result<Self, DocumentError> {
        let digits = digits.into();
        let kind = check_document(&digits)?;
        Ok(Self { digits, kind })
    }

    /// Normalize free-form input, then validate it.
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        Self::new(normalize(raw))
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn into_inner(self) -> String {
        self.digits
    }

    pub fn formatted(&self) -> String {
        format_for_display(&self.digits)
    }
}

impl Serialize for Documento {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.digits.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Documento {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Documento::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Documento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("123.456.789-09"), "12345678909");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("11.222.333/0001-81"), "11222333000181");
        assert_eq!(normalize("abc"), "");
        // Non-ASCII digits are not kept
        assert_eq!(normalize("١٢٣4"), "4");
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(""), DocumentClass::Incomplete);
        assert_eq!(classify("123"), DocumentClass::Incomplete);
        assert_eq!(classify("12345678901"), DocumentClass::Cpf);
        assert_eq!(classify("123456789012"), DocumentClass::Incomplete);
        assert_eq!(classify("1234567890123"), DocumentClass::Incomplete);
        assert_eq!(classify("12345678901234"), DocumentClass::Cnpj);
        assert_eq!(classify("123456789012345"), DocumentClass::TooLong);
    }

    #[test]
    fn test_cpf_known_vectors() {
        assert!(is_valid_cpf("11144477735"));
        assert!(is_valid_cpf("52998224725"));
        assert!(!is_valid_cpf("11144477736"));
        assert!(!is_valid_cpf("11144477725"));
    }

    #[test]
    fn test_cnpj_known_vectors() {
        assert!(is_valid_cnpj("11222333000181"));
        assert!(is_valid_cnpj("11444777000161"));
        assert!(!is_valid_cnpj("11222333000182"));
        assert!(!is_valid_cnpj("11222333000191"));
    }

    #[test]
    fn test_degenerate_sequences_rejected() {
        for d in '0'..='9' {
            let cpf: String = std::iter::repeat(d).take(CPF_LEN).collect();
            let cnpj: String = std::iter::repeat(d).take(CNPJ_LEN).collect();
            assert!(!is_valid_cpf(&cpf), "{} accepted as CPF", cpf);
            assert!(!is_valid_cnpj(&cnpj), "{} accepted as CNPJ", cnpj);
            assert_eq!(
                check_cpf(&cpf),
                Err(DocumentError::DegenerateSequence(DocumentKind::Cpf))
            );
        }
    }

    #[test]
    fn test_validators_are_total() {
        for input in ["", "1", "abc", "111.444.777-35", "1114447773", "111444777355", "💥💥"] {
            assert!(!is_valid_cpf(input));
            assert!(!is_valid_cnpj(input));
        }
        // Right length, wrong kind
        assert!(!is_valid_cpf("11222333000181"));
        assert!(!is_valid_cnpj("11144477735"));
    }

    #[test]
    fn test_check_reports_reason() {
        assert_eq!(
            check_cpf("1114447773"),
            Err(DocumentError::MalformedLength {
                kind: Some(DocumentKind::Cpf),
                len: 10
            })
        );
        assert_eq!(check_cpf("1114447773a"), Err(DocumentError::NonDigit));
        assert_eq!(
            check_cnpj("11222333000182"),
            Err(DocumentError::ChecksumMismatch(DocumentKind::Cnpj))
        );
        assert_eq!(check_document("11144477735"), Ok(DocumentKind::Cpf));
        assert_eq!(check_document("11222333000181"), Ok(DocumentKind::Cnpj));
        assert_eq!(
            check_document("123"),
            Err(DocumentError::MalformedLength { kind: None, len: 3 })
        );
        assert_eq!(check_document("111.444.777-35"), Err(DocumentError::NonDigit));
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(format_for_display("11144477735"), "111.444.777-35");
        assert_eq!(format_for_display("11222333000181"), "11.222.333/0001-81");
        assert_eq!(format_for_display("1234"), "1234");
        assert_eq!(format_for_display(""), "");
        assert_eq!(format_for_display("1114447773x"), "1114447773x");
    }

    #[test]
    fn test_format_round_trip() {
        for x in ["11144477735", "11222333000181"] {
            let once = format_for_display(x);
            assert_eq!(format_for_display(&normalize(&once)), once);
        }
    }

    #[test]
    fn test_input_mask() {
        assert_eq!(input_mask(""), CPF_MASK);
        assert_eq!(input_mask("111.444.777-35"), CPF_MASK);
        assert_eq!(input_mask("111.444.777-351"), CNPJ_MASK);
    }

    #[test]
    fn test_document_number() {
        let doc = DocumentNumber::parse("111.444.777-36");
        assert_eq!(doc.len(), 11);
        assert_eq!(doc.class(), DocumentClass::Cpf);
        assert_eq!(
            doc.validate(),
            ValidationResult::Invalid(DocumentError::ChecksumMismatch(DocumentKind::Cpf))
        );
        assert!(DocumentNumber::from_digits("12a").is_err());
        assert!(DocumentNumber::parse("").is_empty());
    }

    #[test]
    fn test_documento_serialization() {
        let doc = Documento::parse("111.444.777-35").unwrap();
        assert_eq!(serde_json::to_string(&doc).unwrap(), "\"11144477735\"");
        assert_eq!(doc.formatted(), "111.444.777-35");

        let parsed: Documento = serde_json::from_str("\"11222333000181\"").unwrap();
        assert_eq!(parsed.kind(), DocumentKind::Cnpj);

        let result: Result<Documento, _> = serde_json::from_str("\"11222333000182\"");
        assert!(result.is_err());
    }
}
