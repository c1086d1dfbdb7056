//! Typed extraction of fields from aligner output strings.
//!
//! Aligner records come in two flavours: `|`-delimited `key: value` segments,
//! and `#`-delimited positional metadata such as the ORF headers written by
//! Prodigal (`name # start # end # strand # attributes`).

use std::borrow::Cow;

use serde::Serialize;

use crate::parsing::ParseError;

/// A field value coerced to the narrowest type it parses as
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Coerce a token: all-digit text becomes `Int`, decimal text becomes
    /// `Float`, anything else stays `Text`. Never fails.
    ///
    /// Decimal text may group digits with single underscores (`1_000.5`).
    #[must_use]
    pub fn coerce(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(value) = token.parse::<i64>() {
                return Self::Int(value);
            }
        }

        match strip_digit_separators(token.trim()).map(|t| t.parse::<f64>()) {
            Some(Ok(value)) => Self::Float(value),
            _ => Self::Text(token.to_string()),
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Extract the `n`th `|`-delimited field of an aligner record.
///
/// The field lives in segment `n + 3`. Its value starts two characters after
/// the first `:` (or at the second character when there is no colon) and has
/// trailing whitespace removed before being coerced with
/// [`FieldValue::coerce`].
#[must_use]
pub fn extract_nth_bar(record: &str, n: usize) -> FieldValue {
    let segment = record.split('|').nth(n + 3).unwrap_or("");

    let skip = segment.chars().position(|c| c == ':').map_or(1, |i| i + 2);
    let value: String = segment.chars().skip(skip).collect();

    FieldValue::coerce(value.trim_end())
}

/// Extract the `n`th `#`-delimited field of an aligner record.
///
/// - no `#` in the record: `Int(0)`
/// - `n` out of range: empty `Text`
/// - `n` of 1 or 2 (coordinates): `Int`
/// - `n` of 3 (strand, stored as `1`/other): `Text("+")` when 1, else `Text("-")`
/// - anything else: the raw segment
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a coordinate or strand field is not
/// an integer.
pub fn extract_nth_hash(record: &str, n: usize) -> Result<FieldValue, ParseError> {
    if !record.contains('#') {
        return Ok(FieldValue::Int(0));
    }

    let fields: Vec<&str> = record.split('#').collect();
    let Some(field) = fields.get(n) else {
        return Ok(FieldValue::Text(String::new()));
    };

    match n {
        1 | 2 => Ok(FieldValue::Int(parse_int(field)?)),
        3 => {
            let strand = if parse_int(field)? == 1 { "+" } else { "-" };
            Ok(FieldValue::Text(strand.to_string()))
        }
        _ => Ok(FieldValue::Text((*field).to_string())),
    }
}

/// Remove `_` digit separators, or `None` if one is not between two digits
fn strip_digit_separators(token: &str) -> Option<Cow<'_, str>> {
    if !token.contains('_') {
        return Some(Cow::Borrowed(token));
    }

    let bytes = token.as_bytes();
    let separated = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });

    separated.then(|| Cow::Owned(token.replace('_', "")))
}

fn parse_int(field: &str) -> Result<i64, ParseError> {
    field
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("Expected integer field, got '{field}'")))
}
