//! Error and warning types for the INI codec.
//!
//! The codec separates two kinds of problems:
//!
//! - **Errors** ([`Error`]) are fatal for the operation that produced them.
//!   Parsing only fails for input that cannot be represented at all (bytes that
//!   are not UTF-8, an empty `[]` section header). Writes through the typed
//!   accessor fail when the value does not fit the field.
//! - **Warnings** ([`Warning`]) are non-fatal. A read that had to fall back to
//!   the field default, or a structured value that could not be split into
//!   records, still produces a value and reports the offending key so the
//!   caller can flag it.
//!
//! ## Examples
//!
//! ```rust
//! use asa_ini::{from_str, Error};
//!
//! let result = from_str("[ServerSettings]\nMaxPlayers=70\n[]\n");
//! assert!(matches!(result, Err(Error::MalformedDocument { line: 3, .. })));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Represents all fatal errors the codec can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The document cannot be represented (e.g. an empty section header).
    #[error("Malformed document at line {line}: {msg}")]
    MalformedDocument { line: usize, msg: String },

    /// The host supplied bytes that are not valid UTF-8.
    #[error("Invalid UTF-8 input: {0}")]
    InvalidUtf8(String),

    /// A structured-array value has unbalanced parentheses or quotes.
    #[error("Structured value syntax error at column {col}: {msg}")]
    StructuredSyntax { col: usize, msg: String },

    /// The value handed to the accessor does not match the field kind.
    #[error("Type mismatch for {key}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: String,
        found: String,
    },

    /// A dropdown write named a value outside the field's options.
    #[error("Invalid option for {key}: {value:?} is not one of {options:?}")]
    InvalidOption {
        key: String,
        value: String,
        options: Vec<String>,
    },

    /// A record field holds text the structured-array dialect cannot express.
    #[error("Cannot write field {field} of {key}: {msg}")]
    UnwritableRecord {
        key: String,
        field: String,
        msg: String,
    },

    /// An indexed field was addressed outside its slot range.
    #[error("Index {index} out of range for {key} (expected 0..{count})")]
    IndexOutOfRange {
        key: String,
        index: usize,
        count: usize,
    },

    /// A scalar field was addressed with an index, or an indexed field without one.
    #[error("Index mismatch for {key}: {msg}")]
    IndexMismatch { key: String, msg: String },

    /// Reading from or writing to a host-supplied stream failed.
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a malformed document error for the given 1-based line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asa_ini::Error;
    ///
    /// let err = Error::malformed(7, "empty section name");
    /// assert!(err.to_string().contains("line 7"));
    /// ```
    pub fn malformed(line: usize, msg: &str) -> Self {
        Error::MalformedDocument {
            line,
            msg: msg.to_string(),
        }
    }

    /// Creates a structured-value syntax error at a 1-based column.
    pub fn structured(col: usize, msg: &str) -> Self {
        Error::StructuredSyntax {
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a type mismatch error for an accessor write.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asa_ini::Error;
    ///
    /// let err = Error::type_mismatch("XPMultiplier", "number", "bool");
    /// assert!(err.to_string().contains("expected number"));
    /// ```
    pub fn type_mismatch(key: &str, expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            key: key.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn index_mismatch(key: &str, msg: &str) -> Self {
        Error::IndexMismatch {
            key: key.to_string(),
            msg: msg.to_string(),
        }
    }

    pub fn unwritable_record(key: &str, field: &str, msg: &str) -> Self {
        Error::UnwritableRecord {
            key: key.to_string(),
            field: field.to_string(),
            msg: msg.to_string(),
        }
    }

    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A non-fatal problem found while reading a field.
///
/// The read still produced a value (usually the field default); the warning
/// names the key so a UI can highlight it.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Warning {
    /// The stored text could not be coerced to the field type.
    #[error("[{section}] {key}={raw:?} is not a valid {expected}, using the default")]
    ValueCoercion {
        section: String,
        key: String,
        raw: String,
        expected: String,
    },

    /// A structured-array value could not be split into records and is kept as opaque text.
    #[error("[{section}] {key} could not be read as records: {msg}")]
    StructuredParse {
        section: String,
        key: String,
        msg: String,
    },
}

impl Warning {
    /// The concrete key (including any `[index]`) the warning refers to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Warning::ValueCoercion { key, .. } | Warning::StructuredParse { key, .. } => key,
        }
    }
}
