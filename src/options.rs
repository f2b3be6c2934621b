//! Configuration options for INI serialization.
//!
//! This module provides types to customize the regenerated text:
//!
//! - [`CodecOptions`]: Main configuration struct
//! - [`LineEnding`]: `\n` or `\r\n` line terminators
//! - [`Layout`]: the byte-level shape detected while parsing
//!
//! By default the serializer reproduces whatever [`Layout`] the parser
//! detected, so a file saved without edits comes back byte for byte.
//!
//! ## Examples
//!
//! ```rust
//! use asa_ini::{from_str, to_string_with_options, CodecOptions, LineEnding};
//!
//! let doc = from_str("[ServerSettings]\nMaxPlayers=70\n").unwrap();
//!
//! // Force Windows line endings, as the dedicated server writes them
//! let options = CodecOptions::new().with_line_ending(LineEnding::CrLf);
//! let text = to_string_with_options(&doc, &options);
//! assert_eq!(text, "[ServerSettings]\r\nMaxPlayers=70\r\n");
//! ```

use serde::{Deserialize, Serialize};

/// Line terminator used when writing a document.
///
/// # Examples
///
/// ```rust
/// use asa_ini::LineEnding;
///
/// assert_eq!(LineEnding::Lf.as_str(), "\n");
/// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Returns the string representation of this line ending.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Detects the line ending from the first terminator in `text`.
    ///
    /// Text without any newline is treated as `Lf`.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(pos) if pos > 0 && text.as_bytes()[pos - 1] == b'\r' => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }
}

/// The byte-level shape of a source file, recorded by the parser.
///
/// Documents built in code (and empty files) get LF endings with a trailing
/// newline and no BOM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub line_ending: LineEnding,
    pub trailing_newline: bool,
    pub bom: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            line_ending: LineEnding::Lf,
            trailing_newline: true,
            bom: false,
        }
    }
}

/// Configuration options for INI serialization.
///
/// Every option defaults to "preserve what was parsed".
///
/// # Examples
///
/// ```rust
/// use asa_ini::{CodecOptions, LineEnding};
///
/// let options = CodecOptions::new()
///     .with_line_ending(LineEnding::CrLf)
///     .with_trailing_newline(true)
///     .with_default_precision(2);
/// assert_eq!(options.default_precision, 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CodecOptions {
    /// Overrides the detected line ending.
    pub line_ending: Option<LineEnding>,
    /// Overrides whether the output ends with a line terminator.
    pub trailing_newline: Option<bool>,
    /// Decimal places for numeric fields whose schema entry does not set one.
    pub default_precision: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            line_ending: None,
            trailing_newline: None,
            default_precision: 1,
        }
    }
}

impl CodecOptions {
    /// Creates default options (preserve layout, one decimal place).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asa_ini::CodecOptions;
    ///
    /// let options = CodecOptions::new();
    /// assert!(options.line_ending.is_none());
    /// assert_eq!(options.default_precision, 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the line ending used for every emitted line.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = Some(line_ending);
        self
    }

    /// Forces the output to end (or not end) with a line terminator.
    #[must_use]
    pub fn with_trailing_newline(mut self, trailing_newline: bool) -> Self {
        self.trailing_newline = Some(trailing_newline);
        self
    }

    #[must_use]
    pub fn with_default_precision(mut self, precision: usize) -> Self {
        self.default_precision = precision;
        self
    }

    /// Resolves these options against the layout a document was parsed with.
    #[must_use]
    pub fn resolve(&self, layout: Layout) -> Layout {
        Layout {
            line_ending: self.line_ending.unwrap_or(layout.line_ending),
            trailing_newline: self.trailing_newline.unwrap_or(layout.trailing_newline),
            bom: layout.bom,
        }
    }
}
