//! INI serialization.
//!
//! This module provides the [`Serializer`] that regenerates text from a
//! [`Document`].
//!
//! ## Overview
//!
//! - **Verbatim lines**: entries and headers that were never edited are
//!   written exactly as they were read
//! - **Regenerated lines**: edited or new entries are written as `Key=Value`
//!   or `Key[idx]=Value`
//! - **Line endings**: verbatim lines keep the terminator they were read with,
//!   so mixed `\r\n`/`\n` files survive a save; regenerated lines use the
//!   document's detected ending (or the one forced through [`CodecOptions`])
//! - **Stable order**: preamble first, then sections in first-seen order,
//!   entries in their relative order
//!
//! Serialization is deterministic and idempotent: parsing the output and
//! serializing again yields the same text.
//!
//! ```rust
//! use asa_ini::{from_str, Serializer, CodecOptions};
//!
//! let doc = from_str("[ServerSettings]\nMaxPlayers = 70\n").unwrap();
//! let mut serializer = Serializer::new(&doc, &CodecOptions::default());
//! serializer.serialize_document(&doc);
//! assert_eq!(serializer.into_inner(), "[ServerSettings]\nMaxPlayers = 70\n");
//! ```

use crate::document::{Document, Entry, Section};
use crate::options::{CodecOptions, Layout, LineEnding};

/// The INI serializer.
pub struct Serializer {
    output: String,
    layout: Layout,
    /// Set when the caller forced one ending for every line.
    uniform: bool,
    /// Terminator owed by the last written line.
    pending: Option<LineEnding>,
    lines: usize,
}

impl Serializer {
    /// Creates a serializer using the document's layout with `options` applied on top.
    pub fn new(document: &Document, options: &CodecOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            layout: options.resolve(document.layout()),
            uniform: options.line_ending.is_some(),
            pending: None,
            lines: 0,
        }
    }

    pub fn into_inner(mut self) -> String {
        if self.layout.trailing_newline && self.lines > 0 {
            let ending = self.terminator();
            self.output.push_str(ending);
        }
        if self.layout.bom {
            self.output.insert(0, '\u{FEFF}');
        }
        self.output
    }

    fn terminator(&self) -> &'static str {
        match self.pending {
            Some(ending) if !self.uniform => ending.as_str(),
            _ => self.layout.line_ending.as_str(),
        }
    }

    fn write_line(&mut self, line: &str, ending: Option<LineEnding>) {
        if self.lines > 0 {
            let previous = self.terminator();
            self.output.push_str(previous);
        }
        self.output.push_str(line);
        self.pending = ending;
        self.lines += 1;
    }

    fn write_entries(&mut self, entries: &[Entry]) {
        for entry in entries {
            self.write_line(&entry.to_line(), entry.line_ending());
        }
    }

    pub fn serialize_section(&mut self, section: &Section) {
        self.write_line(&section.header_line(), section.header_ending());
        self.write_entries(section.entries());
    }

    pub fn serialize_document(&mut self, document: &Document) {
        self.write_entries(document.preamble());
        for section in document.sections() {
            self.serialize_section(section);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_str, to_string, to_string_with_options, LineEnding};

    #[test]
    fn test_unedited_text_is_byte_identical() {
        let text = "; Server\r\n[ServerSettings]\r\n  MaxPlayers = 70\r\nweird line\r\n\r\n[/Script/ShooterGame.ShooterGameMode]\r\nbUseSingleplayerSettings=True\r\n";
        let doc = from_str(text).unwrap();
        assert_eq!(to_string(&doc), text);
    }

    #[test]
    fn test_no_trailing_newline_is_preserved() {
        let text = "[A]\nX=1";
        assert_eq!(to_string(&from_str(text).unwrap()), text);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_string(&from_str("").unwrap()), "");
        assert_eq!(to_string(&from_str("\n").unwrap()), "\n");
    }

    #[test]
    fn test_new_section_and_edit() {
        let mut doc = from_str("[ServerSettings]\nMaxPlayers = 70\n").unwrap();
        doc.set("ServerSettings", "MaxPlayers", "50");
        doc.set("MessageOfTheDay", "Message", "Welcome");
        assert_eq!(
            to_string(&doc),
            "[ServerSettings]\nMaxPlayers=50\n[MessageOfTheDay]\nMessage=Welcome\n"
        );
    }

    #[test]
    fn test_options_override_layout() {
        let doc = from_str("[A]\nX=1").unwrap();
        let options = CodecOptions::new()
            .with_line_ending(LineEnding::CrLf)
            .with_trailing_newline(true);
        assert_eq!(to_string_with_options(&doc, &options), "[A]\r\nX=1\r\n");
    }

    #[test]
    fn test_mixed_line_endings_are_preserved() {
        let text = "[ServerSettings]\r\nXPMultiplier=1.0\nServerPVE=True\r\n";
        assert_eq!(to_string(&from_str(text).unwrap()), text);
    }

    #[test]
    fn test_edited_line_uses_detected_ending() {
        let mut doc = from_str("[A]\r\nX=1\nY=2\n").unwrap();
        doc.set("A", "X", "5");
        doc.set("A", "Z", "3");
        assert_eq!(to_string(&doc), "[A]\r\nX=5\r\nY=2\nZ=3\r\n");
    }

    #[test]
    fn test_forced_ending_overrides_verbatim_lines() {
        let doc = from_str("[A]\r\nX=1\nY=2").unwrap();
        let options = CodecOptions::new().with_line_ending(LineEnding::Lf);
        assert_eq!(to_string_with_options(&doc, &options), "[A]\nX=1\nY=2");
    }

    #[test]
    fn test_bom_round_trip() {
        let text = "\u{FEFF}[A]\nX=1\n";
        assert_eq!(to_string(&from_str(text).unwrap()), text);
    }
}
