//! INI tokenizing and parsing.
//!
//! This module turns raw config text into a [`Document`].
//!
//! ## Overview
//!
//! Parsing is line based and never gives up on a hand-edited file:
//!
//! - **Headers**: a trimmed line of the form `[Name]` opens (or continues) a section
//! - **Pairs**: `Key=Value` split on the *first* `=`; `Key[idx]=Value` keeps `idx` apart
//! - **Passthrough**: blank lines, `;`/`#`/`//` comments and anything unrecognized are
//!   kept verbatim at their original position
//!
//! The only fatal input is an empty section header (`[]`), reported as
//! [`Error::MalformedDocument`].
//!
//! ```rust
//! use asa_ini::de::{classify, LineKind};
//!
//! assert_eq!(classify("[ServerSettings]"), LineKind::Header("ServerSettings"));
//! assert_eq!(
//!     classify("PerLevelStatsMultiplier_Player[3]=1.0"),
//!     LineKind::Pair { key: "PerLevelStatsMultiplier_Player", index: Some("3"), value: "1.0" }
//! );
//! assert_eq!(classify("Message=a=b"), LineKind::Pair { key: "Message", index: None, value: "a=b" });
//! ```

use crate::document::{Document, Entry, EntryKind, Section};
use crate::options::{Layout, LineEnding};
use crate::{Error, Result};

const BOM: char = '\u{FEFF}';

/// The classification of a single source line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    /// A section header; the name is trimmed and may be empty (which is an error).
    Header(&'a str),
    Pair {
        key: &'a str,
        index: Option<&'a str>,
        value: &'a str,
    },
    Unparsed,
}

/// Classifies one line without any surrounding context.
#[must_use]
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with(';') || trimmed.starts_with('#') || trimmed.starts_with("//") {
        return LineKind::Comment;
    }
    if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
        return LineKind::Header(trimmed[1..trimmed.len() - 1].trim());
    }

    match trimmed.split_once('=') {
        Some((key, value)) => {
            let key = key.trim();
            if key.is_empty() {
                return LineKind::Unparsed;
            }
            let (key, index) = split_index(key);
            LineKind::Pair {
                key,
                index,
                value: value.trim(),
            }
        }
        None => LineKind::Unparsed,
    }
}

/// Splits `Name[idx]` into `("Name", Some("idx"))`.
pub(crate) fn split_index(key: &str) -> (&str, Option<&str>) {
    if let Some(stripped) = key.strip_suffix(']') {
        if let Some(open) = stripped.rfind('[') {
            let base = stripped[..open].trim_end();
            let index = stripped[open + 1..].trim();
            if !base.is_empty() && !index.is_empty() {
                return (base, Some(index));
            }
        }
    }
    (key, None)
}

/// Splits `input` into lines, pairing each with the terminator that ended it.
///
/// A `\r` belongs to the terminator only directly before `\n`. The last line
/// reports `None` when the text does not end with a newline.
pub fn split_lines(input: &str) -> impl Iterator<Item = (&str, Option<LineEnding>)> {
    input.split_inclusive('\n').map(|raw| match raw.strip_suffix('\n') {
        Some(line) => match line.strip_suffix('\r') {
            Some(line) => (line, Some(LineEnding::CrLf)),
            None => (line, Some(LineEnding::Lf)),
        },
        None => (raw, None),
    })
}

/// The INI parser.
///
/// Walks the input once, line by line, building a [`Document`].
/// Created via [`Parser::from_str`].
pub struct Parser<'a> {
    input: &'a str,
    layout: Layout,
}

impl<'a> Parser<'a> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        let (input, bom) = match input.strip_prefix(BOM) {
            Some(rest) => (rest, true),
            None => (input, false),
        };
        Parser {
            input,
            layout: Layout {
                line_ending: LineEnding::detect(input),
                trailing_newline: input.is_empty() || input.ends_with('\n'),
                bom,
            },
        }
    }

    /// Parses the whole input into a [`Document`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] if a section header has an empty name.
    pub fn parse(self) -> Result<Document> {
        let mut doc = Document::with_layout(self.layout);
        let mut current: Option<Section> = None;

        for (idx, (line, ending)) in split_lines(self.input).enumerate() {
            let line_no = idx + 1;
            let kind = classify(line);
            tracing::trace!(line = line_no, ?kind, "Classified line");

            let entry = match kind {
                LineKind::Header("") => {
                    return Err(Error::malformed(line_no, "section name cannot be empty"));
                }
                LineKind::Header(name) => {
                    if let Some(section) = current.take() {
                        doc.push_section(section);
                    }
                    current = Some(Section::parsed(name, line_no, line, ending));
                    continue;
                }
                LineKind::Pair { key, index, value } => {
                    Entry::parsed_pair(key, index, value, line_no, line)
                }
                LineKind::Blank => Entry::passthrough(EntryKind::Blank, line, line_no),
                LineKind::Comment => Entry::passthrough(EntryKind::Comment, line, line_no),
                LineKind::Unparsed => {
                    tracing::debug!(line = line_no, text = line, "Keeping unparsed line verbatim");
                    Entry::passthrough(EntryKind::Unparsed, line, line_no)
                }
            }
            .with_ending(ending);

            match current.as_mut() {
                Some(section) => section.push(entry),
                None => doc.preamble_mut().push(entry),
            }
        }

        if let Some(section) = current.take() {
            doc.push_section(section);
        }

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_comments() {
        assert_eq!(classify("; comment"), LineKind::Comment);
        assert_eq!(classify("  // also a comment"), LineKind::Comment);
        assert_eq!(classify("# hash"), LineKind::Comment);
    }

    #[test]
    fn test_classify_blank_and_unparsed() {
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("just some words"), LineKind::Unparsed);
        assert_eq!(classify("=orphan"), LineKind::Unparsed);
    }

    #[test]
    fn test_classify_header_variants() {
        assert_eq!(
            classify("[/Script/ShooterGame.ShooterGameMode]"),
            LineKind::Header("/Script/ShooterGame.ShooterGameMode")
        );
        assert_eq!(classify("  [ServerSettings]  "), LineKind::Header("ServerSettings"));
        assert_eq!(classify("[]"), LineKind::Header(""));
        assert_eq!(classify("[ServerSettings] ; note"), LineKind::Unparsed);
    }

    #[test]
    fn test_classify_pair_keeps_value_equals_and_trims() {
        assert_eq!(
            classify(" SessionName = My = Server "),
            LineKind::Pair {
                key: "SessionName",
                index: None,
                value: "My = Server"
            }
        );
        assert_eq!(
            classify("Key="),
            LineKind::Pair {
                key: "Key",
                index: None,
                value: ""
            }
        );
    }

    #[test]
    fn test_split_index() {
        assert_eq!(split_index("Stat[11]"), ("Stat", Some("11")));
        assert_eq!(split_index("Stat[]"), ("Stat[]", None));
        assert_eq!(split_index("[3]"), ("[3]", None));
        assert_eq!(split_index("Plain"), ("Plain", None));
    }

    #[test]
    fn test_preamble_and_line_numbers() {
        let doc = Parser::from_str("; header comment\n\n[ServerSettings]\nMaxPlayers=70\n")
            .parse()
            .unwrap();
        assert_eq!(doc.preamble().len(), 2);
        let section = doc.section("ServerSettings").unwrap();
        assert_eq!(section.line, 3);
        assert_eq!(section.get("MaxPlayers").unwrap().line, 4);
    }

    #[test]
    fn test_repeated_section_is_merged() {
        let doc = Parser::from_str("[A]\nX=1\n[B]\nY=2\n[A]\nZ=3\n").parse().unwrap();
        assert_eq!(doc.section_names(), vec!["A", "B"]);
        let keys: Vec<_> = doc.section("A").unwrap().pairs().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["X", "Z"]);
    }

    #[test]
    fn test_empty_header_is_fatal() {
        let err = Parser::from_str("[ServerSettings]\n[  ]\n").parse().unwrap_err();
        assert_eq!(err, Error::malformed(2, "section name cannot be empty"));
    }

    #[test]
    fn test_layout_detection() {
        let doc = Parser::from_str("\u{FEFF}[A]\r\nX=1").parse().unwrap();
        let layout = doc.layout();
        assert!(layout.bom);
        assert_eq!(layout.line_ending, LineEnding::CrLf);
        assert!(!layout.trailing_newline);
        assert_eq!(doc.get("A", "X"), Some("1"));
    }

    #[test]
    fn test_split_lines_keeps_each_terminator() {
        let lines: Vec<_> = split_lines("a\r\nb\nc\rd\ne").collect();
        assert_eq!(
            lines,
            vec![
                ("a", Some(LineEnding::CrLf)),
                ("b", Some(LineEnding::Lf)),
                ("c\rd", Some(LineEnding::Lf)),
                ("e", None),
            ]
        );
        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn test_entries_record_their_line_ending() {
        let doc = Parser::from_str("[A]\r\nX=1\nY=2").parse().unwrap();
        let section = doc.section("A").unwrap();
        assert_eq!(section.header_ending(), Some(LineEnding::CrLf));
        let endings: Vec<_> = section.entries().iter().map(Entry::line_ending).collect();
        assert_eq!(endings, vec![Some(LineEnding::Lf), None]);
    }
}
