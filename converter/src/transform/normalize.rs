//! Field-level normalization of raw records.
//!
//! Each helper turns raw cell text into the typed value written to JSON.
//! The policies that differ between document kinds are explicit enums:
//!
//! | Policy | Variants | Products | Pages |
//! |--------|----------|----------|-------|
//! | [`ValidationPolicy`] | lenient / strict | lenient | lenient |
//! | [`OptionalFieldPolicy`] | keep / omit | keep | omit |
//! | [`EmptyListPolicy`] | empty / single-blank | empty | - |

use serde::{Deserialize, Serialize};

use crate::error::{RowError, RowResult};
use crate::models::Record;

/// What to do with a record that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Skip the record and report it as a warning
    #[default]
    Lenient,
    /// Abort the whole run
    Strict,
}

/// What to do with an optional text field that is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionalFieldPolicy {
    /// Write `""`
    #[default]
    Keep,
    /// Leave the key out of the item
    Omit,
}

/// Result of splitting an empty list cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyListPolicy {
    /// `""` → `[]`
    #[default]
    Empty,
    /// `""` → `[""]`
    SingleBlank,
}

/// A record left out of the document, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: usize,
    /// Record id when the row has one, `"unknown"` otherwise
    pub id: String,
    pub reason: String,
}

/// Fail with [`RowError::MissingField`] on the first absent or blank field.
pub fn require(record: &Record, fields: &[&str]) -> RowResult<()> {
    match fields.iter().find(|field| !record.has_value(field)) {
        Some(field) => Err(RowError::MissingField {
            line: record.line,
            field: field.to_string(),
        }),
        None => Ok(()),
    }
}

/// Integer field: an empty or absent cell is 0, otherwise a (signed)
/// integer with surrounding whitespace allowed. A whitespace-only cell is
/// not a number.
pub fn parse_int(record: &Record, field: &str, id: &str) -> RowResult<i64> {
    let raw = record.text(field);
    if raw.is_empty() {
        return Ok(0);
    }
    raw.trim().parse::<i64>().map_err(|_| RowError::InvalidNumber {
        line: record.line,
        id: id.to_string(),
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Ordering key: a plain digit string, anything else sorts as 0.
pub fn parse_order(value: Option<&str>) -> i64 {
    let raw = value.unwrap_or("").trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }
    raw.parse().unwrap_or(0)
}

/// Comma-separated list with each element trimmed.
pub fn split_list(value: &str, policy: EmptyListPolicy) -> Vec<String> {
    if value.trim().is_empty() && policy == EmptyListPolicy::Empty {
        return Vec::new();
    }
    value.split(',').map(|part| part.trim().to_string()).collect()
}

/// Optional text field. Absent columns read as `""`.
pub fn optional_text(value: Option<&str>, policy: OptionalFieldPolicy) -> Option<String> {
    let value = value.unwrap_or("");
    match policy {
        OptionalFieldPolicy::Omit if value.is_empty() => None,
        _ => Some(value.to_string()),
    }
}

/// Boolean flag that defaults to `true`.
///
/// An absent or empty cell reads as `true`; otherwise only a
/// case-insensitive `"true"` is `true`.
pub fn parse_flag(value: Option<&str>) -> bool {
    match value {
        None | Some("") => true,
        Some(v) => v.eq_ignore_ascii_case("true"),
    }
}

/// Gallery: the primary image, then every secondary image that is not blank.
pub fn build_gallery(record: &Record, primary: &str, secondary: &[&str]) -> Vec<String> {
    let mut gallery = vec![record.text(primary).to_string()];
    gallery.extend(
        secondary
            .iter()
            .filter(|field| record.has_value(field))
            .map(|field| record.text(field).to_string()),
    );
    gallery
}

/// Apply the validation policy to one row result.
///
/// Lenient: errors become entries in `skipped` and `Ok(None)`.
/// Strict: errors propagate.
pub fn settle<T>(
    result: RowResult<T>,
    policy: ValidationPolicy,
    record: &Record,
    id_field: &str,
    skipped: &mut Vec<SkippedRow>,
) -> RowResult<Option<T>> {
    match result {
        Ok(item) => Ok(Some(item)),
        Err(err) => match policy {
            ValidationPolicy::Strict => Err(err),
            ValidationPolicy::Lenient => {
                let id = match record.get(id_field) {
                    Some(id) if !id.trim().is_empty() => id.to_string(),
                    _ => "unknown".to_string(),
                };
                skipped.push(SkippedRow {
                    line: record.line,
                    id,
                    reason: err.to_string(),
                });
                Ok(None)
            }
        },
    }
}
