//! # asa_ini
//!
//! A round-trip preserving codec for the INI dialect used by ARK: Survival
//! Ascended dedicated servers (`GameUserSettings.ini` and `Game.ini`).
//!
//! ## What it handles
//!
//! Server config files look like INI, with a few twists:
//!
//! - **Repeated keys**: a key may appear many times; reads use the last one
//!   and every occurrence survives a save
//! - **Indexed keys**: `PerLevelStatsMultiplier_Player[3]=1.0` addresses one
//!   slot of a conceptual array
//! - **Structured values**: `(ClassName="Dino_C",Multiplier=2.0),(...)` lists
//!   of records inside a single value
//! - **Two files, one settings space**: `/Script/...` sections live in
//!   `Game.ini`, everything else in `GameUserSettings.ini`
//!
//! ## Key Features
//!
//! - **Byte-stable**: loading and saving without edits reproduces the input,
//!   comments, blank lines, odd spacing and unparseable lines included
//! - **Schema-driven**: a static catalog of [`FieldSpec`]s drives typed reads
//!   and writes through [`get_value`] / [`set_value`]
//! - **Never loses data**: bad values fall back to defaults with a [`Warning`]
//!   rather than an error
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use asa_ini::{from_str, get_value, schema, set_value, to_string, TypedValue};
//!
//! let text = "[ServerSettings]\nXPMultiplier=1.0\nServerPVE=False\n";
//! let mut doc = from_str(text).unwrap();
//!
//! let pve = schema::find("ServerSettings", "ServerPVE").unwrap();
//! assert_eq!(get_value(&doc, pve).unwrap().value, TypedValue::Bool(false));
//!
//! set_value(&mut doc, pve, TypedValue::Bool(true)).unwrap();
//! assert_eq!(to_string(&doc), "[ServerSettings]\nXPMultiplier=1.0\nServerPVE=True\n");
//! ```
//!
//! ### Structured records with the record! macro
//!
//! ```rust
//! use asa_ini::{parse_records, record, serialize_records};
//!
//! let spawn = record! {
//!     "DinoNameTag" => "Rex",
//!     "SpawnWeightMultiplier" => 0.5,
//! };
//! let text = serialize_records(&[spawn.clone()]);
//! assert_eq!(text, r#"(DinoNameTag="Rex",SpawnWeightMultiplier=0.5)"#);
//! assert_eq!(parse_records(&text).unwrap(), vec![spawn]);
//! ```
//!
//! ### Both files at once
//!
//! ```rust
//! use asa_ini::{generators::ExperienceRamp, SettingsSpace};
//!
//! let mut space = SettingsSpace::load("[ServerSettings]\nXPMultiplier=2.0\n", "").unwrap();
//! ExperienceRamp::for_max_level(3).apply(space.document_mut()).unwrap();
//!
//! let files = space.render();
//! assert_eq!(files.game_user_settings, "[ServerSettings]\nXPMultiplier=2.0\n");
//! assert!(files.game.starts_with("[/Script/ShooterGame.ShooterGameMode]"));
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Parsing**: O(n) in the input size, single pass, one line at a time
//! - **Serialization**: O(n); untouched lines are copied, not re-rendered
//! - **Lookups**: sections are hashed; keys are scanned within a section
//!
//! ## Dialect
//!
//! See [`dialect`] for the grammar accepted by the parser.

pub mod accessor;
pub mod de;
pub mod dialect;
pub mod document;
pub mod error;
pub mod files;
pub mod generators;
pub mod macros;
pub mod options;
pub mod profiles;
pub mod record;
pub mod schema;
pub mod ser;
pub mod template;
pub mod value;

pub use accessor::{
    default_value, get_value, get_value_at, set_value, set_value_at, set_value_with_options,
    FieldRead,
};
pub use de::Parser;
pub use document::{Document, Entry, EntryKind, Section};
pub use error::{Error, Result, Warning};
pub use files::{split_by_file, ConfigFile, RenderedFiles, SettingsSpace};
pub use options::{CodecOptions, Layout, LineEnding};
pub use record::{parse_records, serialize_records, FieldValue, RecordArray, StructuredRecord};
pub use schema::{Category, FieldKind, FieldSpec};
pub use ser::Serializer;
pub use template::{FieldHint, RecordTemplate};
pub use value::TypedValue;

use std::io;

/// Serializes a document back to text, keeping its detected layout.
///
/// # Examples
///
/// ```rust
/// use asa_ini::{from_str, to_string};
///
/// let text = "; managed by hand\r\n[ServerSettings]\r\nMaxPlayers = 70\r\n";
/// assert_eq!(to_string(&from_str(text).unwrap()), text);
/// ```
#[must_use]
pub fn to_string(document: &Document) -> String {
    to_string_with_options(document, &CodecOptions::default())
}

/// Serializes a document with layout overrides.
///
/// # Examples
///
/// ```rust
/// use asa_ini::{from_str, to_string_with_options, CodecOptions, LineEnding};
///
/// let doc = from_str("[ServerSettings]\nMaxPlayers=70\n").unwrap();
/// let options = CodecOptions::new().with_line_ending(LineEnding::CrLf);
/// assert_eq!(to_string_with_options(&doc, &options), "[ServerSettings]\r\nMaxPlayers=70\r\n");
/// ```
#[must_use]
pub fn to_string_with_options(document: &Document, options: &CodecOptions) -> String {
    let mut serializer = Serializer::new(document, options);
    serializer.serialize_document(document);
    serializer.into_inner()
}

/// Serializes a document to a writer.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer<W>(mut writer: W, document: &Document) -> Result<()>
where
    W: io::Write,
{
    writer
        .write_all(to_string(document).as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Parses config text into a [`Document`].
///
/// A leading UTF-8 byte order mark is stripped and remembered.
///
/// # Examples
///
/// ```rust
/// use asa_ini::from_str;
///
/// let doc = from_str("[ServerSettings]\nMaxPlayers=70\nMaxPlayers=10\n").unwrap();
/// assert_eq!(doc.get("ServerSettings", "MaxPlayers"), Some("10"));
/// assert_eq!(doc.section("ServerSettings").unwrap().get_all("MaxPlayers").count(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::MalformedDocument`] if a section header has an empty name.
pub fn from_str(s: &str) -> Result<Document> {
    Parser::from_str(s).parse()
}

/// Parses config bytes into a [`Document`].
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] for bytes that are not UTF-8, otherwise as
/// [`from_str`].
pub fn from_slice(v: &[u8]) -> Result<Document> {
    let s = std::str::from_utf8(v)?;
    from_str(s)
}

/// Reads a whole stream and parses it.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, [`Error::InvalidUtf8`] for
/// non-UTF-8 content, otherwise as [`from_str`].
pub fn from_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}

/// Sets one raw value in config text and returns the new text.
///
/// `key` may carry an index (`Name[3]`). Everything else in the text is kept
/// as it was.
///
/// # Examples
///
/// ```rust
/// use asa_ini::update_key;
///
/// let text = "[ServerSettings]\nXPMultiplier=1.0\n";
/// let updated = update_key(text, "ServerSettings", "XPMultiplier", "2.5").unwrap();
/// assert_eq!(updated, "[ServerSettings]\nXPMultiplier=2.5\n");
/// ```
///
/// # Errors
///
/// Fails if `text` is a malformed document.
pub fn update_key(text: &str, section: &str, key: &str, value: &str) -> Result<String> {
    let mut doc = from_str(text)?;
    let (name, index) = de::split_index(key);
    doc.section_or_insert(section).set(name, index, value);
    Ok(to_string(&doc))
}

/// Reads one raw value from config text; the last occurrence wins.
///
/// # Errors
///
/// Fails if `text` is a malformed document.
pub fn get_raw(text: &str, section: &str, key: &str) -> Result<Option<String>> {
    let doc = from_str(text)?;
    let (name, index) = de::split_index(key);
    let value = match index {
        Some(index) => doc.get_indexed(section, name, index),
        None => doc.get(section, name),
    };
    Ok(value.map(str::to_string))
}
