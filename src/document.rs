//! The editable document model.
//!
//! A [`Document`] owns an ordered set of [`Section`]s, and each section owns
//! an ordered list of [`Entry`]s. Nothing is shared: edits go through
//! `&mut Document` and cannot leak into another document.
//!
//! ## Duplicate keys
//!
//! ARK config files repeat keys on purpose (`ConfigOverrideItemMaxQuantity`,
//! `PerLevelStatsMultiplier_Player[0]`, ...). The model keeps every line:
//!
//! - [`Section::get`] returns the *last* matching entry (last-write-wins).
//! - [`Section::get_all`] returns *every* matching entry.
//! - Serializing emits all of them, so reads and round trips intentionally
//!   see different things when a scalar key is duplicated.
//!
//! ```rust
//! use asa_ini::from_str;
//!
//! let doc = from_str("[ServerSettings]\nMaxPlayers=10\nMaxPlayers=70\n").unwrap();
//! assert_eq!(doc.get("ServerSettings", "MaxPlayers"), Some("70"));
//! assert_eq!(doc.section("ServerSettings").unwrap().get_all("MaxPlayers").count(), 2);
//! assert_eq!(asa_ini::to_string(&doc), "[ServerSettings]\nMaxPlayers=10\nMaxPlayers=70\n");
//! ```
//!
//! ## Repeated sections
//!
//! A header seen a second time continues the first section with that name.
//! Sections are emitted in the order they were first encountered.

use crate::options::{Layout, LineEnding};
use indexmap::IndexMap;

/// Key given to lines that could not be classified.
pub const UNPARSED_KEY: &str = "__unparsed__";

/// What a line in the source was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// A `key=value` or `Key[idx]=value` line.
    Pair,
    /// An empty or whitespace-only line.
    Blank,
    /// A line starting with `;`, `#` or `//`.
    Comment,
    /// Anything else, kept verbatim.
    Unparsed,
}

/// One line of a section.
///
/// For passthrough kinds (`Blank`, `Comment`, `Unparsed`) `value` holds the
/// verbatim line. Equality ignores the source line number and terminator.
#[derive(Clone, Debug)]
pub struct Entry {
    pub kind: EntryKind,
    pub key: String,
    pub index: Option<String>,
    pub value: String,
    /// 1-based line in the source text, 0 for entries created in memory.
    pub line: usize,
    verbatim: Option<String>,
    ending: Option<LineEnding>,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.key == other.key
            && self.index == other.index
            && self.value == other.value
    }
}

impl Entry {
    /// Creates a new `key=value` entry with no source line.
    #[must_use]
    pub fn pair(key: &str, index: Option<&str>, value: &str) -> Self {
        Entry {
            kind: EntryKind::Pair,
            key: key.to_string(),
            index: index.map(str::to_string),
            value: value.to_string(),
            line: 0,
            verbatim: None,
            ending: None,
        }
    }

    pub(crate) fn parsed_pair(
        key: &str,
        index: Option<&str>,
        value: &str,
        line: usize,
        source: &str,
    ) -> Self {
        Entry {
            line,
            verbatim: Some(source.to_string()),
            ..Entry::pair(key, index, value)
        }
    }

    pub(crate) fn passthrough(kind: EntryKind, text: &str, line: usize) -> Self {
        let key = match kind {
            EntryKind::Unparsed => UNPARSED_KEY,
            _ => "",
        };
        Entry {
            kind,
            key: key.to_string(),
            index: None,
            value: text.to_string(),
            line,
            verbatim: None,
            ending: None,
        }
    }

    /// Records the terminator that followed this line in the source.
    pub(crate) fn with_ending(mut self, ending: Option<LineEnding>) -> Self {
        self.ending = ending;
        self
    }

    /// The terminator read after this line, while the line is still unedited.
    ///
    /// `None` for new or edited entries and for the last line of a file
    /// without a trailing newline.
    #[must_use]
    pub fn line_ending(&self) -> Option<LineEnding> {
        self.ending
    }

    #[inline]
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.kind == EntryKind::Pair
    }

    /// The key as written in the file, e.g. `PerLevelStatsMultiplier_Player[3]`.
    #[must_use]
    pub fn concrete_key(&self) -> String {
        match &self.index {
            Some(index) => format!("{}[{}]", self.key, index),
            None => self.key.clone(),
        }
    }

    /// Replaces the value. The line is regenerated on the next save.
    pub fn set_value(&mut self, value: &str) {
        if self.value != value {
            self.value = value.to_string();
            self.verbatim = None;
            self.ending = None;
        }
    }

    /// The text this entry serializes to, without a line terminator.
    #[must_use]
    pub fn to_line(&self) -> String {
        match self.kind {
            EntryKind::Pair => match &self.verbatim {
                Some(source) => source.clone(),
                None => format!("{}={}", self.concrete_key(), self.value),
            },
            _ => self.value.clone(),
        }
    }

    fn matches(&self, key: &str, index: Option<&str>) -> bool {
        self.is_pair() && self.key == key && self.index.as_deref() == index
    }
}

/// A named group of entries.
#[derive(Clone, Debug)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
    /// 1-based line of the first header, 0 for sections created in memory.
    pub line: usize,
    header: Option<String>,
    header_ending: Option<LineEnding>,
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.entries == other.entries
    }
}

impl Section {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Section {
            name: name.to_string(),
            entries: Vec::new(),
            line: 0,
            header: None,
            header_ending: None,
        }
    }

    pub(crate) fn parsed(
        name: &str,
        line: usize,
        header: &str,
        ending: Option<LineEnding>,
    ) -> Self {
        Section {
            line,
            header: Some(header.to_string()),
            header_ending: ending,
            ..Section::new(name)
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterates over the `key=value` entries only.
    pub fn pairs(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_pair())
    }

    /// The header line, e.g. `[ServerSettings]`.
    #[must_use]
    pub fn header_line(&self) -> String {
        match &self.header {
            Some(header) => header.clone(),
            None => format!("[{}]", self.name),
        }
    }

    /// The terminator read after the header line, if it came from source text.
    #[must_use]
    pub fn header_ending(&self) -> Option<LineEnding> {
        self.header_ending
    }

    /// Appends an entry as-is, after any other entry.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Returns the last non-indexed entry for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().rev().find(|e| e.matches(key, None))
    }

    /// Returns the last entry for `key[index]`.
    #[must_use]
    pub fn get_indexed(&self, key: &str, index: &str) -> Option<&Entry> {
        self.entries.iter().rev().find(|e| e.matches(key, Some(index)))
    }

    /// Returns every entry for `key`, indexed or not, in file order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.pairs().filter(move |e| e.key == key)
    }

    /// Sets the last `key` (or `key[index]`) entry, appending a new one if absent.
    pub fn set(&mut self, key: &str, index: Option<&str>, value: &str) {
        if let Some(entry) = self.entries.iter_mut().rev().find(|e| e.matches(key, index)) {
            entry.set_value(value);
            return;
        }
        self.insert_at_end(Entry::pair(key, index, value));
    }

    /// Rewrites the non-indexed `key` lines to hold exactly `values`.
    ///
    /// Existing lines are reused in file order; surplus lines are removed and
    /// missing ones appended at the end of the section.
    pub fn set_all(&mut self, key: &str, values: &[String]) {
        let positions: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.matches(key, None))
            .map(|(i, _)| i)
            .collect();

        for (position, value) in positions.iter().zip(values) {
            self.entries[*position].set_value(value);
        }
        for position in positions.iter().skip(values.len()).rev() {
            self.entries.remove(*position);
        }
        for value in values.iter().skip(positions.len()) {
            self.insert_at_end(Entry::pair(key, None, value));
        }
    }

    /// Removes every `key` (or `key[index]`) entry and returns how many were removed.
    pub fn remove(&mut self, key: &str, index: Option<&str>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.matches(key, index));
        before - self.entries.len()
    }

    /// Inserts after the last non-blank line so trailing spacing stays with the section end.
    fn insert_at_end(&mut self, entry: Entry) {
        let position = self
            .entries
            .iter()
            .rposition(|e| e.kind != EntryKind::Blank)
            .map_or(0, |i| i + 1);
        self.entries.insert(position, entry);
    }

    pub(crate) fn extend(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.extend(entries);
    }
}

/// A parsed INI document.
///
/// Created by [`crate::from_str`]; serialized by [`crate::to_string`].
#[derive(Clone, Debug, Default)]
pub struct Document {
    preamble: Vec<Entry>,
    sections: IndexMap<String, Section>,
    layout: Layout,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality ignores order; sections must also match position.
        self.layout == other.layout
            && self.preamble == other.preamble
            && self.sections.len() == other.sections.len()
            && self.sections.values().eq(other.sections.values())
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_layout(layout: Layout) -> Self {
        Document {
            layout,
            ..Document::default()
        }
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// Lines that appear before the first section header.
    #[must_use]
    pub fn preamble(&self) -> &[Entry] {
        &self.preamble
    }

    pub(crate) fn preamble_mut(&mut self) -> &mut Vec<Entry> {
        &mut self.preamble
    }

    /// Iterates over sections in first-seen order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    #[must_use]
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// Returns the section called `name`, appending an empty one if missing.
    pub fn section_or_insert(&mut self, name: &str) -> &mut Section {
        self.sections
            .entry(name.to_string())
            .or_insert_with(|| Section::new(name))
    }

    /// Adds a section, merging its entries into an existing one with the same name.
    pub fn push_section(&mut self, section: Section) {
        match self.sections.get_mut(&section.name) {
            Some(existing) => {
                tracing::debug!(
                    section = %section.name,
                    first_line = existing.line,
                    "Merging repeated section"
                );
                existing.extend(section.entries);
            }
            None => {
                self.sections.insert(section.name.clone(), section);
            }
        }
    }

    /// Returns the last raw value of a non-indexed key.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)
            .and_then(|s| s.get(key))
            .map(|e| e.value.as_str())
    }

    /// Returns the last raw value of `key[index]`.
    #[must_use]
    pub fn get_indexed(&self, section: &str, key: &str, index: &str) -> Option<&str> {
        self.section(section)
            .and_then(|s| s.get_indexed(key, index))
            .map(|e| e.value.as_str())
    }

    /// Sets a raw value, creating the section and entry as needed.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.section_or_insert(section).set(key, None, value);
    }

    /// Sets a raw `key[index]` value, creating the section and entry as needed.
    pub fn set_indexed(&mut self, section: &str, key: &str, index: &str, value: &str) {
        self.section_or_insert(section).set(key, Some(index), value);
    }

    /// Removes every non-indexed `key` entry from `section`.
    pub fn remove(&mut self, section: &str, key: &str) -> usize {
        self.section_mut(section)
            .map_or(0, |s| s.remove(key, None))
    }

    /// Applies every pair of `updates` on top of this document.
    ///
    /// Keys present in both take the value from `updates`; keys only present
    /// here are kept; sections only present in `updates` are appended.
    pub fn merge_from(&mut self, updates: &Document) {
        for section in updates.sections() {
            let target = self.section_or_insert(section.name());
            for entry in section.pairs() {
                target.set(&entry.key, entry.index.as_deref(), &entry.value);
            }
        }
    }

    /// Moves the sections of `other` into this document, merging same-named sections.
    pub(crate) fn absorb(&mut self, other: Document) {
        for section in other.sections.into_values() {
            self.push_section(section);
        }
    }

    pub(crate) fn take_sections_where<F>(&mut self, mut predicate: F) -> Vec<Section>
    where
        F: FnMut(&str) -> bool,
    {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.sections)
            .into_iter()
            .partition(|(name, _)| predicate(name));
        self.sections = kept.into_iter().collect();
        taken.into_iter().map(|(_, section)| section).collect()
    }

    /// Total number of `key=value` entries across all sections.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.sections().map(|s| s.pairs().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_appends_before_trailing_blanks() {
        let mut section = Section::new("ServerSettings");
        section.push(Entry::pair("MaxPlayers", None, "70"));
        section.push(Entry::passthrough(EntryKind::Blank, "", 3));
        section.set("ServerPVE", None, "True");

        let lines: Vec<_> = section.entries().iter().map(Entry::to_line).collect();
        assert_eq!(lines, vec!["MaxPlayers=70", "ServerPVE=True", ""]);
    }

    #[test]
    fn test_set_updates_last_duplicate() {
        let mut section = Section::new("ServerSettings");
        section.push(Entry::pair("MaxPlayers", None, "10"));
        section.push(Entry::pair("MaxPlayers", None, "20"));
        section.set("MaxPlayers", None, "30");

        let values: Vec<_> = section.get_all("MaxPlayers").map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["10", "30"]);
        assert_eq!(section.get("MaxPlayers").map(|e| e.value.as_str()), Some("30"));
    }

    #[test]
    fn test_indexed_and_plain_keys_are_distinct() {
        let mut section = Section::new("ServerSettings");
        section.set("PerLevelStatsMultiplier_Player", Some("3"), "2.0");
        section.set("PerLevelStatsMultiplier_Player", None, "1.0");

        assert_eq!(section.get_indexed("PerLevelStatsMultiplier_Player", "3").map(|e| e.value.as_str()), Some("2.0"));
        assert_eq!(section.get("PerLevelStatsMultiplier_Player").map(|e| e.value.as_str()), Some("1.0"));
        assert_eq!(section.get_all("PerLevelStatsMultiplier_Player").count(), 2);
    }

    #[test]
    fn test_set_value_drops_verbatim_only_on_change() {
        let mut entry = Entry::parsed_pair("MaxPlayers", None, "70", 2, "MaxPlayers = 70");
        entry.set_value("70");
        assert_eq!(entry.to_line(), "MaxPlayers = 70");
        entry.set_value("50");
        assert_eq!(entry.to_line(), "MaxPlayers=50");
    }

    #[test]
    fn test_push_section_merges_by_name() {
        let mut doc = Document::new();
        let mut first = Section::new("A");
        first.push(Entry::pair("X", None, "1"));
        let mut second = Section::new("B");
        second.push(Entry::pair("Y", None, "2"));
        let mut again = Section::new("A");
        again.push(Entry::pair("Z", None, "3"));

        doc.push_section(first);
        doc.push_section(second);
        doc.push_section(again);

        assert_eq!(doc.section_names(), vec!["A", "B"]);
        assert_eq!(doc.section("A").unwrap().entries().len(), 2);
    }

    #[test]
    fn test_equality_respects_section_order() {
        let mut ab = Document::new();
        ab.set("A", "X", "1");
        ab.set("B", "Y", "2");
        let mut ba = Document::new();
        ba.set("B", "Y", "2");
        ba.set("A", "X", "1");
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_merge_from_updates_win() {
        let mut base = Document::new();
        base.set("ServerSettings", "MaxPlayers", "70");
        base.set("ServerSettings", "CustomSetting", "value");
        base.set_indexed("ServerSettings", "PerLevelStatsMultiplier_Player", "0", "2.0");

        let mut updates = Document::new();
        updates.set("ServerSettings", "MaxPlayers", "50");
        updates.set("MessageOfTheDay", "Message", "Hello");

        base.merge_from(&updates);
        assert_eq!(base.get("ServerSettings", "MaxPlayers"), Some("50"));
        assert_eq!(base.get("ServerSettings", "CustomSetting"), Some("value"));
        assert_eq!(base.get_indexed("ServerSettings", "PerLevelStatsMultiplier_Player", "0"), Some("2.0"));
        assert_eq!(base.get("MessageOfTheDay", "Message"), Some("Hello"));
    }

    #[test]
    fn test_remove() {
        let mut doc = Document::new();
        doc.set("ServerSettings", "MaxPlayers", "70");
        doc.set_indexed("ServerSettings", "MaxPlayers", "1", "5");
        assert_eq!(doc.remove("ServerSettings", "MaxPlayers"), 1);
        assert_eq!(doc.get("ServerSettings", "MaxPlayers"), None);
        assert_eq!(doc.remove("Missing", "MaxPlayers"), 0);
    }
}
