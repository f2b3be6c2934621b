//! The two-file settings space.
//!
//! A server keeps its settings in two files that are edited as one:
//! `GameUserSettings.ini` and `Game.ini`. Which file a section belongs to is
//! decided by its name alone. Sections whose name starts with `/Script/` go
//! to `Game.ini`; everything else goes to `GameUserSettings.ini`.
//!
//! ```rust
//! use asa_ini::{ConfigFile, SettingsSpace};
//!
//! let space = SettingsSpace::load(
//!     "[ServerSettings]\nXPMultiplier=2.0\n",
//!     "[/Script/ShooterGame.ShooterGameMode]\nbUseSingleplayerSettings=True\n",
//! )
//! .unwrap();
//! assert_eq!(space.document().section_names().len(), 2);
//!
//! let files = space.render();
//! assert_eq!(files.game_user_settings, "[ServerSettings]\nXPMultiplier=2.0\n");
//! assert_eq!(files.game, "[/Script/ShooterGame.ShooterGameMode]\nbUseSingleplayerSettings=True\n");
//! assert_eq!(ConfigFile::for_section("ServerSettings").file_name(), "GameUserSettings.ini");
//! ```

use crate::accessor::{get_value, set_value, FieldRead};
use crate::document::{Document, Entry};
use crate::options::{CodecOptions, Layout};
use crate::schema::FieldSpec;
use crate::{from_str, to_string_with_options, Result, TypedValue};
use serde::{Deserialize, Serialize};

const SCRIPT_PREFIX: &str = "/Script/";

/// One of the two physical settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigFile {
    GameUserSettings,
    Game,
}

impl ConfigFile {
    /// Routes a section by name.
    #[must_use]
    pub fn for_section(section: &str) -> Self {
        if section.starts_with(SCRIPT_PREFIX) {
            ConfigFile::Game
        } else {
            ConfigFile::GameUserSettings
        }
    }

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            ConfigFile::GameUserSettings => "GameUserSettings.ini",
            ConfigFile::Game => "Game.ini",
        }
    }
}

/// Splits a document into its `GameUserSettings.ini` and `Game.ini` parts.
///
/// Lines before the first header stay with `GameUserSettings.ini`. Both parts
/// keep the source document's layout.
#[must_use]
pub fn split_by_file(document: &Document) -> (Document, Document) {
    let mut user_settings = document.clone();
    let mut game = Document::with_layout(document.layout());
    for section in user_settings.take_sections_where(|name| ConfigFile::for_section(name) == ConfigFile::Game) {
        game.push_section(section);
    }
    tracing::debug!(
        game_user_settings = user_settings.section_names().len(),
        game = game.section_names().len(),
        "Split document by file"
    );
    (user_settings, game)
}

/// Text for both files, ready to be written by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedFiles {
    pub game_user_settings: String,
    pub game: String,
}

impl RenderedFiles {
    /// The text for `file`.
    #[must_use]
    pub fn get(&self, file: ConfigFile) -> &str {
        match file {
            ConfigFile::GameUserSettings => &self.game_user_settings,
            ConfigFile::Game => &self.game,
        }
    }
}

/// Both files loaded into a single document.
///
/// The `Game.ini` preamble and layout are remembered separately so rendering
/// writes each file back the way it was read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsSpace {
    document: Document,
    game_preamble: Vec<Entry>,
    game_layout: Layout,
}

impl SettingsSpace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses both files and merges them into one document.
    ///
    /// A section that appears in the "wrong" file is kept, but is written to
    /// the file its name routes to on the next render.
    ///
    /// # Errors
    ///
    /// Fails if either text is a malformed document.
    pub fn load(game_user_settings: &str, game: &str) -> Result<Self> {
        let mut document = from_str(game_user_settings)?;
        let mut game_doc = from_str(game)?;

        for name in document.section_names() {
            if ConfigFile::for_section(name) == ConfigFile::Game {
                tracing::warn!(section = name, "Script section found in GameUserSettings.ini");
            }
        }
        for name in game_doc.section_names() {
            if ConfigFile::for_section(name) == ConfigFile::GameUserSettings {
                tracing::warn!(section = name, "Non-script section found in Game.ini");
            }
        }

        let game_preamble = std::mem::take(game_doc.preamble_mut());
        let game_layout = game_doc.layout();
        document.absorb(game_doc);

        Ok(SettingsSpace {
            document,
            game_preamble,
            game_layout,
        })
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Typed read through [`get_value`].
    ///
    /// # Errors
    ///
    /// See [`get_value`].
    pub fn get(&self, spec: &FieldSpec) -> Result<FieldRead> {
        get_value(&self.document, spec)
    }

    /// Typed write through [`set_value`].
    ///
    /// # Errors
    ///
    /// See [`set_value`].
    pub fn set(&mut self, spec: &FieldSpec, value: TypedValue) -> Result<()> {
        set_value(&mut self.document, spec, value)
    }

    #[must_use]
    pub fn render(&self) -> RenderedFiles {
        self.render_with_options(&CodecOptions::default())
    }

    /// Splits the document by file and serializes each part.
    #[must_use]
    pub fn render_with_options(&self, options: &CodecOptions) -> RenderedFiles {
        let (user_settings, mut game) = split_by_file(&self.document);
        game.set_layout(self.game_layout);
        *game.preamble_mut() = self.game_preamble.clone();

        RenderedFiles {
            game_user_settings: to_string_with_options(&user_settings, options),
            game: to_string_with_options(&game, options),
        }
    }
}
