//! Field templates for structured-array editing.
//!
//! A UI that edits a structured-array setting (dino spawn weights, item stack
//! overrides, ...) supplies a [`RecordTemplate`]: the fields it knows how to
//! present, each with a label and a placeholder. The template only drives
//! presentation. Parsing accepts any field name, and fields the template does
//! not know about are reported by [`RecordTemplate::unknown_fields`] and still
//! round-trip untouched.
//!
//! ## Why IndexMap?
//!
//! Templates are shown as table columns, so field order must be the order the
//! caller declared them in.
//!
//! ## Examples
//!
//! ```rust
//! use asa_ini::{parse_records, FieldHint, RecordTemplate};
//!
//! let mut template = RecordTemplate::new();
//! template.insert("DinoNameTag", FieldHint::new("Dino", "Rex"));
//! template.insert("SpawnWeightMultiplier", FieldHint::new("Weight", "1.0"));
//!
//! let records = parse_records("(DinoNameTag=Rex,SpawnWeightMultiplier=0.5,SpawnLimitPercentage=0.2)").unwrap();
//! assert_eq!(template.unknown_fields(&records[0]), vec!["SpawnLimitPercentage"]);
//! ```

use crate::record::{FieldValue, StructuredRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Presentation hints for one record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldHint {
    pub label: String,
    pub placeholder: String,
}

impl FieldHint {
    #[must_use]
    pub fn new(label: &str, placeholder: &str) -> Self {
        FieldHint {
            label: label.to_string(),
            placeholder: placeholder.to_string(),
        }
    }
}

/// An ordered map of record field names to presentation hints.
///
/// # Examples
///
/// ```rust
/// use asa_ini::{FieldHint, RecordTemplate};
///
/// let template: RecordTemplate = [
///     ("ItemClassString", FieldHint::new("Item", "PrimalItemResource_Stone_C")),
///     ("Quantity", FieldHint::new("Max stack", "100")),
/// ]
/// .into_iter()
/// .collect();
///
/// let names: Vec<_> = template.names().collect();
/// assert_eq!(names, vec!["ItemClassString", "Quantity"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTemplate(IndexMap<String, FieldHint>);

impl RecordTemplate {
    #[must_use]
    pub fn new() -> Self {
        RecordTemplate(IndexMap::new())
    }

    /// Inserts a field hint; returns the previous hint for that name.
    pub fn insert(&mut self, name: &str, hint: FieldHint) -> Option<FieldHint> {
        self.0.insert(name.to_string(), hint)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldHint> {
        self.0.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldHint> {
        self.0.iter()
    }

    /// A new record with every template field set to empty text, for an "add row" action.
    #[must_use]
    pub fn blank_record(&self) -> StructuredRecord {
        self.names().fold(StructuredRecord::new(), |record, name| {
            record.with_field(name, FieldValue::Text(String::new()))
        })
    }

    /// Fields of `record` that this template does not describe, in record order.
    #[must_use]
    pub fn unknown_fields<'r>(&self, record: &'r StructuredRecord) -> Vec<&'r str> {
        record
            .fields()
            .map(|(name, _)| name)
            .filter(|name| !self.0.contains_key(*name))
            .collect()
    }

    /// Template fields that `record` does not set.
    #[must_use]
    pub fn missing_fields(&self, record: &StructuredRecord) -> Vec<&str> {
        self.names().filter(|name| record.get(name).is_none()).collect()
    }
}

impl<'a> FromIterator<(&'a str, FieldHint)> for RecordTemplate {
    fn from_iter<T: IntoIterator<Item = (&'a str, FieldHint)>>(iter: T) -> Self {
        RecordTemplate(
            iter.into_iter()
                .map(|(name, hint)| (name.to_string(), hint))
                .collect(),
        )
    }
}
