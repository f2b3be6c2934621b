//! Typed field values.
//!
//! This module provides [`TypedValue`], the only shape in which field values
//! cross the accessor boundary. Raw strings stay inside the [`Document`];
//! callers read and write `TypedValue`s and never parse numbers or booleans
//! themselves.
//!
//! ## Examples
//!
//! ```rust
//! use asa_ini::TypedValue;
//!
//! let rate = TypedValue::from(2.0);
//! assert!(rate.is_number());
//! assert_eq!(rate.as_f64(), Some(2.0));
//!
//! let pve = TypedValue::from(true);
//! assert_eq!(pve.as_bool(), Some(true));
//! assert_eq!(pve.kind_name(), "bool");
//! ```
//!
//! [`Document`]: crate::Document

use crate::record::{RecordArray, StructuredRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value read from or written to a schema field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TypedValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Records(RecordArray),
}

impl TypedValue {
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, TypedValue::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, TypedValue::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, TypedValue::Text(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_records(&self) -> bool {
        matches!(self, TypedValue::Records(_))
    }

    /// If the value is a number, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asa_ini::TypedValue;
    ///
    /// assert_eq!(TypedValue::Bool(false).as_bool(), Some(false));
    /// assert_eq!(TypedValue::from("False").as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_records(&self) -> Option<&[StructuredRecord]> {
        match self {
            TypedValue::Records(r) => Some(r),
            _ => None,
        }
    }

    /// Short name of the variant, used in type mismatch errors.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            TypedValue::Number(_) => "number",
            TypedValue::Bool(_) => "bool",
            TypedValue::Text(_) => "text",
            TypedValue::Records(_) => "records",
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Number(n) => write!(f, "{}", n),
            TypedValue::Bool(true) => f.write_str("True"),
            TypedValue::Bool(false) => f.write_str("False"),
            TypedValue::Text(s) => f.write_str(s),
            TypedValue::Records(r) => f.write_str(&crate::record::serialize_records(r)),
        }
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Number(value)
    }
}

impl From<f32> for TypedValue {
    fn from(value: f32) -> Self {
        TypedValue::Number(f64::from(value))
    }
}

impl From<i32> for TypedValue {
    fn from(value: i32) -> Self {
        TypedValue::Number(f64::from(value))
    }
}

impl From<u32> for TypedValue {
    fn from(value: u32) -> Self {
        TypedValue::Number(f64::from(value))
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Bool(value)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::Text(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::Text(value)
    }
}

impl From<RecordArray> for TypedValue {
    fn from(value: RecordArray) -> Self {
        TypedValue::Records(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_ini_lexicon() {
        assert_eq!(TypedValue::Bool(true).to_string(), "True");
        assert_eq!(TypedValue::Bool(false).to_string(), "False");
        assert_eq!(TypedValue::from("Island").to_string(), "Island");
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&TypedValue::Number(2.0)).unwrap();
        assert_eq!(json, r#"{"type":"number","value":2.0}"#);

        let back: TypedValue = serde_json::from_str(r#"{"type":"bool","value":true}"#).unwrap();
        assert_eq!(back, TypedValue::Bool(true));
    }

    #[test]
    fn test_accessors_reject_other_variants() {
        let value = TypedValue::from(3);
        assert_eq!(value.as_f64(), Some(3.0));
        assert_eq!(value.as_str(), None);
        assert_eq!(value.as_records(), None);
        assert!(!value.is_bool());
    }
}
