//! Structured-array values.
//!
//! Some settings hold a list of parenthesized records instead of a scalar:
//!
//! ```text
//! DinoSpawnWeightMultipliers=(DinoNameTag=Rex,SpawnWeightMultiplier=0.5),(DinoNameTag=Raptor,SpawnWeightMultiplier=2.0)
//! ```
//!
//! [`parse_records`] splits such a value into [`StructuredRecord`]s and
//! [`serialize_records`] writes them back. The scanner walks the value one
//! character at a time tracking parenthesis depth and `"` spans, so commas and
//! `=` inside quotes or nested tuples never split a field:
//!
//! ```rust
//! use asa_ini::{parse_records, serialize_records};
//!
//! let records = parse_records(r#"(ClassName="Dino_C",Name="Rex, the big one")"#).unwrap();
//! assert_eq!(records[0].get("Name").and_then(|v| v.as_str()), Some("Rex, the big one"));
//! assert_eq!(serialize_records(&records), r#"(ClassName="Dino_C",Name="Rex, the big one")"#);
//! ```
//!
//! ## Value typing
//!
//! - Values that are finite decimal numbers are written unquoted (`Multiplier=2.0`)
//! - Nested tuples (`Quantity=(MaxItemQuantity=100)`) are kept verbatim
//! - Everything else is written in double quotes
//!
//! Parsing never requires quotes; one matching pair is stripped if present.
//! The dialect has no escape for `"`, so text containing one cannot be written
//! (see [`StructuredRecord::unwritable_field`]).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A list of records, as stored in one structured-array setting.
pub type RecordArray = Vec<StructuredRecord>;

/// The value of one field inside a record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    /// A finite decimal number, kept in its written form (`2.0` stays `2.0`).
    Number(String),
    /// Free text, stored without surrounding quotes.
    Text(String),
    /// A nested parenthesized tuple, kept verbatim.
    Nested(String),
}

impl FieldValue {
    /// Classifies an unquoted value as written in a file.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asa_ini::FieldValue;
    ///
    /// assert_eq!(FieldValue::new("1.5"), FieldValue::Number("1.5".to_string()));
    /// assert_eq!(FieldValue::new("Rex"), FieldValue::Text("Rex".to_string()));
    /// assert_eq!(FieldValue::new("(A=1)"), FieldValue::Nested("(A=1)".to_string()));
    /// ```
    #[must_use]
    pub fn new(raw: &str) -> Self {
        if raw.starts_with('(') {
            FieldValue::Nested(raw.to_string())
        } else {
            Self::from_text(raw)
        }
    }

    /// Number if the text is a finite decimal, text otherwise.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if is_decimal(text) {
            FieldValue::Number(text.to_string())
        } else {
            FieldValue::Text(text.to_string())
        }
    }

    /// A number written with at least one decimal place (`2.0`, `0.25`).
    #[must_use]
    pub fn number(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            FieldValue::Number(format!("{:.1}", value))
        } else {
            FieldValue::Number(value.to_string())
        }
    }

    /// An integral number written without a decimal point.
    #[must_use]
    pub fn integer(value: u64) -> Self {
        FieldValue::Number(value.to_string())
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, FieldValue::Number(_))
    }

    /// Returns the numeric value, or `None` for text and nested values.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => n.parse().ok(),
            _ => None,
        }
    }

    /// Returns the contents without quotes.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Number(s) | FieldValue::Text(s) | FieldValue::Nested(s) => Some(s),
        }
    }

    fn write(&self, output: &mut String) {
        match self {
            FieldValue::Number(n) => output.push_str(n),
            FieldValue::Nested(raw) => output.push_str(raw),
            FieldValue::Text(t) if is_decimal(t) => output.push_str(t),
            FieldValue::Text(t) => {
                output.push('"');
                output.push_str(t);
                output.push('"');
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::from_text(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::from_text(&value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::number(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value.to_string())
    }
}

/// One parenthesized `(Field=Value,...)` tuple.
///
/// Field order is preserved exactly; unknown fields are kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecord {
    fields: Vec<(String, FieldValue)>,
}

impl StructuredRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field append.
    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    /// Returns the first field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Replaces the first field called `name`, or appends it.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Removes every field called `name`, returning the first removed value.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let position = self.fields.iter().position(|(n, _)| n == name)?;
        let (_, removed) = self.fields.remove(position);
        self.fields.retain(|(n, _)| n != name);
        Some(removed)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the first field whose text value contains a `"`.
    ///
    /// Such a value would be written inside quotes with nothing to escape the
    /// inner quote, and the result could not be parsed back.
    ///
    /// ```rust
    /// use asa_ini::StructuredRecord;
    ///
    /// let record = StructuredRecord::new()
    ///     .with_field("ItemClassString", "Blueprint'/Game/X.X_C'\"")
    ///     .with_field("Quantity", 1u64);
    /// assert_eq!(record.unwritable_field(), Some("ItemClassString"));
    /// ```
    #[must_use]
    pub fn unwritable_field(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|(_, value)| matches!(value, FieldValue::Text(t) if t.contains('"')))
            .map(|(name, _)| name.as_str())
    }

    fn write(&self, output: &mut String) {
        output.push('(');
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                output.push(',');
            }
            output.push_str(name);
            output.push('=');
            value.write(output);
        }
        output.push(')');
    }
}

/// Parses a structured-array value into records.
///
/// Empty input yields no records, and so does a value made only of empty
/// groups (`()`). An empty group between non-empty ones is kept as an empty
/// record so the list keeps its shape.
///
/// # Errors
///
/// Returns [`Error::StructuredSyntax`] for unbalanced parentheses or quotes
/// and for text outside of any group.
///
/// # Examples
///
/// ```rust
/// use asa_ini::parse_records;
///
/// let records = parse_records(r#"(ClassName="Dino_C",Multiplier=2.0),(ClassName="Rex_C",Multiplier=1.5)"#).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].get("Multiplier").and_then(|v| v.as_f64()), Some(1.5));
///
/// assert!(parse_records("()").unwrap().is_empty());
/// assert!(parse_records("(ClassName=\"Dino_C\"").is_err());
/// ```
pub fn parse_records(input: &str) -> Result<RecordArray> {
    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut group_start = 0usize;

    for (col, (pos, ch)) in input.char_indices().enumerate() {
        let col = col + 1;
        if in_quotes {
            if ch == '"' {
                in_quotes = false;
            }
            continue;
        }
        match ch {
            '"' if depth > 0 => in_quotes = true,
            '(' => {
                if depth == 0 {
                    group_start = pos + 1;
                }
                depth += 1;
            }
            ')' => {
                if depth == 0 {
                    return Err(Error::structured(col, "unmatched ')'"));
                }
                depth -= 1;
                if depth == 0 {
                    let record = parse_group(&input[group_start..pos]);
                    tracing::trace!(fields = record.len(), "Parsed record group");
                    records.push(record);
                }
            }
            _ if depth > 0 => {}
            ',' => {}
            c if c.is_whitespace() => {}
            c => {
                return Err(Error::structured(
                    col,
                    &format!("unexpected {:?} outside parentheses", c),
                ))
            }
        }
    }

    if in_quotes {
        return Err(Error::structured(input.chars().count(), "unterminated quote"));
    }
    if depth > 0 {
        return Err(Error::structured(input.chars().count(), "unclosed '('"));
    }
    if records.iter().all(StructuredRecord::is_empty) {
        records.clear();
    }
    Ok(records)
}

/// Serializes records as a comma-joined list of `(Field=Value,...)` groups.
#[must_use]
pub fn serialize_records(records: &[StructuredRecord]) -> String {
    let mut output = String::with_capacity(records.len() * 32);
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        record.write(&mut output);
    }
    output
}

/// Parses the inside of one balanced group.
fn parse_group(body: &str) -> StructuredRecord {
    let mut record = StructuredRecord::new();
    for part in split_top_level(body, ',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (name, value) = match split_top_level(part, '=').first() {
            Some(name) if name.len() < part.len() => {
                (name.trim(), field_value(part[name.len() + 1..].trim()))
            }
            _ => (part, FieldValue::Text(String::new())),
        };
        record.fields.push((name.to_string(), value));
    }
    record
}

fn field_value(raw: &str) -> FieldValue {
    match raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(unquoted) => FieldValue::from_text(unquoted),
        None => FieldValue::new(raw),
    }
}

/// Splits at `sep` where it appears outside quotes and nested parentheses.
///
/// Only the first split is used for `=`, so callers take the first piece.
fn split_top_level(input: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut start = 0usize;

    for (pos, ch) in input.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => depth = depth.saturating_sub(1),
            c if c == sep && !in_quotes && depth == 0 => {
                parts.push(&input[start..pos]);
                start = pos + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

fn is_decimal(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        && text.parse::<f64>().map_or(false, f64::is_finite)
}
