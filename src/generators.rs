//! Derived settings.
//!
//! Some settings are tedious to write by hand: a level ramp is one entry per
//! level, per-stat multipliers are twelve indexed keys. The generators here
//! compute them from a few inputs. Each generator is a plain value with no
//! hidden state, and `apply` writes it through the typed accessor so the usual
//! formatting rules hold.
//!
//! ```rust
//! use asa_ini::generators::{DifficultySettings, ExperienceRamp};
//!
//! let difficulty = DifficultySettings::for_level(150);
//! assert_eq!(difficulty.override_official_difficulty, 5.0);
//!
//! let ramp = ExperienceRamp::for_max_level(3);
//! assert_eq!(ramp.points(), &[0, 10, 45]);
//! assert_eq!(ramp.max_experience(), 112);
//! ```

use crate::accessor::{set_value, set_value_at};
use crate::document::Document;
use crate::record::{serialize_records, FieldValue, StructuredRecord};
use crate::schema::{self, FieldSpec, GAME_MODE, SERVER};
use crate::{Error, Result, TypedValue};

const LEVELS_PER_DIFFICULTY: f64 = 30.0;
const RAMP_EXPONENT: f64 = 2.2;
const RAMP_SCALE: f64 = 10.0;

fn catalog_field(section: &str, key: &str) -> Result<&'static FieldSpec> {
    schema::find(section, key)
        .ok_or_else(|| Error::custom(format!("{} is missing from the settings catalog", key)))
}

/// `OverrideOfficialDifficulty` / `DifficultyOffset` for a max wild level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    pub override_official_difficulty: f64,
    pub difficulty_offset: f64,
}

impl DifficultySettings {
    /// Max wild dino level is `30 * OverrideOfficialDifficulty` with the offset at 1.0.
    #[must_use]
    pub fn for_level(max_wild_level: u32) -> Self {
        DifficultySettings {
            override_official_difficulty: f64::from(max_wild_level) / LEVELS_PER_DIFFICULTY,
            difficulty_offset: 1.0,
        }
    }

    /// Writes both settings to `ServerSettings`.
    ///
    /// # Errors
    ///
    /// Fails if either field is missing from the catalog.
    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        set_value(
            doc,
            catalog_field(SERVER, "OverrideOfficialDifficulty")?,
            TypedValue::Number(self.override_official_difficulty),
        )?;
        set_value(
            doc,
            catalog_field(SERVER, "DifficultyOffset")?,
            TypedValue::Number(self.difficulty_offset),
        )
    }
}

/// Experience needed to reach `level`: `floor(10 * level^2.2)`.
#[must_use]
pub fn experience_for_level(level: u32) -> u64 {
    // Truncation is the intended floor; values stay far below u64::MAX.
    (RAMP_SCALE * f64::from(level).powf(RAMP_EXPONENT)).floor() as u64
}

/// A player level ramp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceRamp {
    points: Vec<u64>,
    max_experience: u64,
}

impl ExperienceRamp {
    /// Builds `max_level` entries for levels `0..max_level`.
    #[must_use]
    pub fn for_max_level(max_level: u32) -> Self {
        ExperienceRamp {
            points: (0..max_level).map(experience_for_level).collect(),
            max_experience: experience_for_level(max_level),
        }
    }

    #[must_use]
    pub fn points(&self) -> &[u64] {
        &self.points
    }

    /// The companion `OverrideMaxExperiencePointsPlayer` value.
    #[must_use]
    pub fn max_experience(&self) -> u64 {
        self.max_experience
    }

    /// One record of `ExperiencePointsForLevel[i]=points` fields.
    #[must_use]
    pub fn to_record(&self) -> StructuredRecord {
        self.points
            .iter()
            .enumerate()
            .fold(StructuredRecord::new(), |record, (i, points)| {
                record.with_field(
                    &format!("ExperiencePointsForLevel[{}]", i),
                    FieldValue::integer(*points),
                )
            })
    }

    /// The `LevelExperienceRampOverrides` value as written in `Game.ini`.
    #[must_use]
    pub fn to_value_string(&self) -> String {
        serialize_records(&[self.to_record()])
    }

    /// Writes the ramp and the max experience override.
    ///
    /// # Errors
    ///
    /// Fails if either field is missing from the catalog.
    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        set_value(
            doc,
            catalog_field(GAME_MODE, "LevelExperienceRampOverrides")?,
            TypedValue::Records(vec![self.to_record()]),
        )?;
        // u64 → f64 is exact for any ramp the game accepts (< 2^31).
        set_value(
            doc,
            catalog_field(GAME_MODE, "OverrideMaxExperiencePointsPlayer")?,
            TypedValue::Number(self.max_experience as f64),
        )
    }
}

/// Character stats in the order the game indexes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Health = 0,
    Stamina = 1,
    Torpidity = 2,
    Oxygen = 3,
    Food = 4,
    Water = 5,
    Temperature = 6,
    Weight = 7,
    MeleeDamage = 8,
    MovementSpeed = 9,
    Fortitude = 10,
    CraftingSpeed = 11,
}

impl Stat {
    pub const ALL: [Stat; 12] = [
        Stat::Health,
        Stat::Stamina,
        Stat::Torpidity,
        Stat::Oxygen,
        Stat::Food,
        Stat::Water,
        Stat::Temperature,
        Stat::Weight,
        Stat::MeleeDamage,
        Stat::MovementSpeed,
        Stat::Fortitude,
        Stat::CraftingSpeed,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// A set of per-stat values written to one indexed field.
///
/// ```rust
/// use asa_ini::generators::{Stat, StatBatch};
/// use asa_ini::{schema, Document};
///
/// let mut doc = Document::new();
/// let player = schema::by_key("PerLevelStatsMultiplier_Player").unwrap();
/// StatBatch::new()
///     .with(Stat::Weight, 5.0)
///     .with(Stat::MeleeDamage, 2.0)
///     .apply(&mut doc, player)
///     .unwrap();
///
/// assert_eq!(doc.get_indexed(player.section, player.key, "7"), Some("5.0"));
/// assert_eq!(doc.get_indexed(player.section, player.key, "0"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatBatch {
    values: Vec<(Stat, f64)>,
}

impl StatBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The same value for all twelve stats.
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        StatBatch {
            values: Stat::ALL.iter().map(|stat| (*stat, value)).collect(),
        }
    }

    /// Sets one stat, replacing an earlier value for it.
    #[must_use]
    pub fn with(mut self, stat: Stat, value: f64) -> Self {
        self.values.retain(|(s, _)| *s != stat);
        self.values.push((stat, value));
        self
    }

    #[must_use]
    pub fn values(&self) -> &[(Stat, f64)] {
        &self.values
    }

    /// Writes each stat to `spec[stat]`; unset stats are left alone.
    ///
    /// # Errors
    ///
    /// Fails if `spec` is not an indexed numeric field. Stats written before
    /// the failure stay written.
    pub fn apply(&self, doc: &mut Document, spec: &FieldSpec) -> Result<()> {
        for (stat, value) in &self.values {
            set_value_at(doc, spec, stat.index(), TypedValue::Number(*value))?;
        }
        Ok(())
    }
}
