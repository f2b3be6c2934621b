//! Schema-driven typed reads and writes.
//!
//! The accessor is the only place where raw strings become [`TypedValue`]s
//! and back:
//!
//! | Kind | Read | Write |
//! |------|------|-------|
//! | slider / number | `f64`, default on bad text (with a warning) | fixed decimal places |
//! | boolean | `true`/`false` in any case | `True` / `False` |
//! | dropdown | one of the options, default otherwise (with a warning) | must match an option |
//! | text | raw text | raw text |
//! | recordArray | [`parse_records`], opaque text on failure (with a warning) | [`serialize_records`] |
//!
//! Reads of duplicated scalar keys use the last occurrence. Writes update that
//! same occurrence in place, leaving earlier duplicates untouched.
//!
//! ```rust
//! use asa_ini::{from_str, get_value, set_value, schema, to_string, TypedValue};
//!
//! let mut doc = from_str("[ServerSettings]\nXPMultiplier=1.0\n").unwrap();
//! let xp = schema::find("ServerSettings", "XPMultiplier").unwrap();
//!
//! set_value(&mut doc, xp, TypedValue::Number(2.0)).unwrap();
//! assert_eq!(get_value(&doc, xp).unwrap().value, TypedValue::Number(2.0));
//! assert_eq!(to_string(&doc), "[ServerSettings]\nXPMultiplier=2.0\n");
//! ```

use crate::document::Document;
use crate::options::CodecOptions;
use crate::record::{parse_records, serialize_records, RecordArray, StructuredRecord};
use crate::schema::{FieldDefault, FieldKind, FieldSpec};
use crate::{Error, Result, TypedValue, Warning};

/// The outcome of a read: always a value, possibly with a warning.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRead {
    pub value: TypedValue,
    pub warning: Option<Warning>,
}

impl FieldRead {
    fn clean(value: TypedValue) -> Self {
        FieldRead {
            value,
            warning: None,
        }
    }
}

/// Reads a scalar (non-indexed) field.
///
/// # Errors
///
/// Returns [`Error::IndexMismatch`] if `spec` is an indexed field; use
/// [`get_value_at`] for those.
pub fn get_value(doc: &Document, spec: &FieldSpec) -> Result<FieldRead> {
    if spec.is_indexed() {
        return Err(Error::index_mismatch(spec.key, "indexed field read without an index"));
    }
    if spec.kind == FieldKind::RecordArray && spec.repeated {
        return Ok(read_repeated_records(doc, spec));
    }
    let raw = doc.get(spec.section, spec.key);
    Ok(decode(spec, None, raw))
}

/// Reads slot `index` of an indexed field. Unset slots read as the default.
///
/// # Errors
///
/// Returns [`Error::IndexMismatch`] for scalar fields and
/// [`Error::IndexOutOfRange`] for slots past the field's count.
pub fn get_value_at(doc: &Document, spec: &FieldSpec, index: usize) -> Result<FieldRead> {
    check_index(spec, index)?;
    let raw = doc.get_indexed(spec.section, spec.key, &index.to_string());
    Ok(decode(spec, Some(index), raw))
}

/// Writes a scalar field using the default codec options.
///
/// # Errors
///
/// Fails if the value does not fit the field; the document is left unchanged.
pub fn set_value(doc: &mut Document, spec: &FieldSpec, value: TypedValue) -> Result<()> {
    set_value_with_options(doc, spec, value, &CodecOptions::default())
}

/// Writes a scalar field; `options` supplies the precision for fields without one.
///
/// # Errors
///
/// Fails if the value does not fit the field; the document is left unchanged.
pub fn set_value_with_options(
    doc: &mut Document,
    spec: &FieldSpec,
    value: TypedValue,
    options: &CodecOptions,
) -> Result<()> {
    if spec.is_indexed() {
        return Err(Error::index_mismatch(spec.key, "indexed field written without an index"));
    }
    if spec.kind == FieldKind::RecordArray && spec.repeated {
        let lines = encode_repeated_records(spec, value)?;
        doc.section_or_insert(spec.section).set_all(spec.key, &lines);
        return Ok(());
    }
    let raw = encode(spec, value, options)?;
    doc.set(spec.section, spec.key, &raw);
    Ok(())
}

/// Writes slot `index` of an indexed field. Other slots are not touched.
///
/// # Errors
///
/// Fails on index misuse or if the value does not fit the field.
pub fn set_value_at(doc: &mut Document, spec: &FieldSpec, index: usize, value: TypedValue) -> Result<()> {
    check_index(spec, index)?;
    let raw = encode(spec, value, &CodecOptions::default())?;
    doc.set_indexed(spec.section, spec.key, &index.to_string(), &raw);
    Ok(())
}

fn check_index(spec: &FieldSpec, index: usize) -> Result<()> {
    match spec.indexed {
        None => Err(Error::index_mismatch(spec.key, "field is not indexed")),
        Some(count) if index >= count => Err(Error::IndexOutOfRange {
            key: spec.key.to_string(),
            index,
            count,
        }),
        Some(_) => Ok(()),
    }
}

/// The value a field has when the document does not set it.
#[must_use]
pub fn default_value(spec: &FieldSpec) -> TypedValue {
    match spec.default {
        FieldDefault::Number(n) => TypedValue::Number(n),
        FieldDefault::Bool(b) => TypedValue::Bool(b),
        FieldDefault::Text(t) => TypedValue::Text(t.to_string()),
        FieldDefault::Empty => match spec.kind {
            FieldKind::RecordArray => TypedValue::Records(Vec::new()),
            _ => TypedValue::Text(String::new()),
        },
    }
}

fn decode(spec: &FieldSpec, index: Option<usize>, raw: Option<&str>) -> FieldRead {
    let Some(raw) = raw else {
        return FieldRead::clean(default_value(spec));
    };

    let coercion = |expected: &str| {
        let warning = Warning::ValueCoercion {
            section: spec.section.to_string(),
            key: spec.concrete_key(index),
            raw: raw.to_string(),
            expected: expected.to_string(),
        };
        tracing::warn!(%warning, "Falling back to default");
        FieldRead {
            value: default_value(spec),
            warning: Some(warning),
        }
    };

    match spec.kind {
        FieldKind::Slider | FieldKind::Number => match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => FieldRead::clean(TypedValue::Number(n)),
            _ => coercion("number"),
        },
        FieldKind::Boolean => {
            let raw = raw.trim();
            if raw.eq_ignore_ascii_case("true") {
                FieldRead::clean(TypedValue::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                FieldRead::clean(TypedValue::Bool(false))
            } else {
                coercion("boolean")
            }
        }
        FieldKind::Dropdown if !spec.options.contains(&raw.trim()) => coercion("option"),
        FieldKind::Dropdown => FieldRead::clean(TypedValue::Text(raw.trim().to_string())),
        FieldKind::Text => FieldRead::clean(TypedValue::Text(raw.to_string())),
        FieldKind::RecordArray => match parse_records(raw) {
            Ok(records) => FieldRead::clean(TypedValue::Records(records)),
            Err(err) => structured_fallback(spec, raw.to_string(), &err),
        },
    }
}

fn structured_fallback(spec: &FieldSpec, raw: String, err: &Error) -> FieldRead {
    let warning = Warning::StructuredParse {
        section: spec.section.to_string(),
        key: spec.key.to_string(),
        msg: err.to_string(),
    };
    tracing::warn!(%warning, "Keeping structured value as opaque text");
    FieldRead {
        value: TypedValue::Text(raw),
        warning: Some(warning),
    }
}

/// Collects the records of every `Key=(...)` line. On failure the lines are
/// returned joined by `\n` so writing the text back restores each line.
fn read_repeated_records(doc: &Document, spec: &FieldSpec) -> FieldRead {
    let lines: Vec<&str> = doc
        .section(spec.section)
        .map(|s| {
            s.get_all(spec.key)
                .filter(|e| e.index.is_none())
                .map(|e| e.value.as_str())
                .collect()
        })
        .unwrap_or_default();

    if lines.is_empty() {
        return FieldRead::clean(default_value(spec));
    }

    let mut records = RecordArray::new();
    for line in &lines {
        match parse_records(line) {
            Ok(parsed) => records.extend(parsed),
            Err(err) => return structured_fallback(spec, lines.join("\n"), &err),
        }
    }
    FieldRead::clean(TypedValue::Records(records))
}

/// Rejects records that would not parse back after being written.
fn check_records(spec: &FieldSpec, records: &[StructuredRecord]) -> Result<()> {
    match records.iter().find_map(StructuredRecord::unwritable_field) {
        Some(field) => Err(Error::unwritable_record(
            spec.key,
            field,
            "text values cannot contain '\"'",
        )),
        None => Ok(()),
    }
}

fn encode_repeated_records(spec: &FieldSpec, value: TypedValue) -> Result<Vec<String>> {
    match value {
        TypedValue::Records(records) => {
            check_records(spec, &records)?;
            Ok(records
                .iter()
                .map(|r| serialize_records(std::slice::from_ref(r)))
                .collect())
        }
        TypedValue::Text(text) => Ok(text.lines().map(str::to_string).collect()),
        other => Err(Error::type_mismatch(spec.key, "records", other.kind_name())),
    }
}

fn encode(spec: &FieldSpec, value: TypedValue, options: &CodecOptions) -> Result<String> {
    match (spec.kind, value) {
        (FieldKind::Slider | FieldKind::Number, TypedValue::Number(n)) => {
            if !n.is_finite() {
                return Err(Error::type_mismatch(spec.key, "finite number", "non-finite number"));
            }
            let precision = spec.precision.unwrap_or(options.default_precision);
            Ok(format!("{:.*}", precision, n))
        }
        (FieldKind::Boolean, TypedValue::Bool(b)) => Ok(if b { "True" } else { "False" }.to_string()),
        (FieldKind::Dropdown, TypedValue::Text(text)) => {
            if spec.options.contains(&text.as_str()) {
                Ok(text)
            } else {
                Err(Error::InvalidOption {
                    key: spec.key.to_string(),
                    value: text,
                    options: spec.options.iter().map(|o| o.to_string()).collect(),
                })
            }
        }
        (FieldKind::Text | FieldKind::RecordArray, TypedValue::Text(text)) => {
            if text.contains(['\n', '\r']) {
                return Err(Error::custom(format!("{} cannot contain a line break", spec.key)));
            }
            Ok(text)
        }
        (FieldKind::RecordArray, TypedValue::Records(records)) => {
            check_records(spec, &records)?;
            Ok(serialize_records(&records))
        }
        (kind, other) => Err(Error::type_mismatch(spec.key, expected_name(kind), other.kind_name())),
    }
}

const fn expected_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Slider | FieldKind::Number => "number",
        FieldKind::Boolean => "bool",
        FieldKind::Dropdown | FieldKind::Text => "text",
        FieldKind::RecordArray => "records",
    }
}
