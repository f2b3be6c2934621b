//! The server INI dialect
//!
//! This module documents the INI dialect read and written by this library.
//! It has no code.
//!
//! # Lines
//!
//! Input is split on `\n`; a `\r` before it is part of the line ending. A lone
//! `\r` anywhere else is ordinary text. Each line is classified after
//! trimming surrounding whitespace:
//!
//! | Line | Kind | Example |
//! |------|------|---------|
//! | empty or whitespace | blank | |
//! | starts with `;`, `#` or `//` | comment | `; PvE cluster` |
//! | `[` ... `]` | section header | `[ServerSettings]` |
//! | contains `=` with a non-empty key | pair | `XPMultiplier=2.0` |
//! | anything else | unparsed | `oops no equals sign` |
//!
//! Blank, comment and unparsed lines are kept verbatim at their position.
//! Lines before the first header belong to the document preamble.
//!
//! ## Headers
//!
//! The name between the brackets is trimmed. `[]` and `[   ]` are the only
//! fatal inputs. A header followed by trailing text (`[A] ; note`) is not a
//! header; it is kept as an unparsed line.
//!
//! A name seen twice continues the first section: its entries are appended
//! there and the section keeps its first position.
//!
//! ## Pairs
//!
//! ```text
//! MaxPlayers=70
//! Message=a=b                          ; value is "a=b"
//! PerLevelStatsMultiplier_Player[3]=1.0
//! ```
//!
//! - The line splits on the first `=` only; key and value are trimmed
//! - `Name[idx]` keeps `idx` apart from the key; indices are free text and
//!   need not be dense or unique
//! - Keys may repeat; every occurrence is kept in order
//!
//! # Structured values
//!
//! Some values hold a list of records:
//!
//! ```text
//! (ClassName="Dino_C",Multiplier=2.0),(ClassName="Rex_C",Multiplier=1.5)
//! ```
//!
//! - Records are `(`...`)` groups separated by commas at depth zero
//! - Inside a group, fields split on `,` then on the first `=`, but never
//!   inside quotes or nested parentheses
//! - One pair of surrounding quotes is stripped from a field value
//! - A field without `=` reads as an empty text value
//! - A nested group (`Quantity=(MaxItemQuantity=100)`) is kept verbatim
//! - `()` is an empty list; an empty group between others is an empty record
//! - Text containing `"` cannot be written, since there is no escape for it
//!
//! When written, a field value is left bare if it is a finite decimal number
//! and quoted otherwise.
//!
//! # Typed values
//!
//! | Field kind | Written as |
//! |------------|------------|
//! | slider / number | fixed decimal places, `2.0` |
//! | boolean | `True` / `False` |
//! | dropdown | one of its options |
//! | text | as is |
//! | record array | the structured form above |
//!
//! Reads accept `true`/`false` in any case. A dropdown value outside its
//! options reads as the default, with a warning.
//!
//! # Files
//!
//! Sections whose name starts with `/Script/` belong to `Game.ini`; all others
//! belong to `GameUserSettings.ini`.
//!
//! # Layout
//!
//! Each line keeps the terminator it was read with, so files mixing LF and
//! CRLF are written back unchanged. New and edited lines use the ending of the
//! first line. The presence of a final line ending and a leading UTF-8 byte
//! order mark are also reproduced. [`CodecOptions`](crate::CodecOptions) can
//! force one ending for every line.
