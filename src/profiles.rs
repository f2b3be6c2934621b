//! Per-map rate presets.
//!
//! ```rust
//! use asa_ini::profiles;
//!
//! let scorched = profiles::profile_for_map("ScorchedEarth_WP").unwrap();
//! assert_eq!(scorched.name, "Scorched Earth");
//! assert_eq!(scorched.taming_multiplier, 1.5);
//! assert!(profiles::profile_for_map("Unknown_WP").is_none());
//! ```

use crate::accessor::{get_value, set_value};
use crate::document::Document;
use crate::schema::{self, FieldSpec, SERVER};
use crate::{Error, Result, TypedValue};
use serde::Serialize;

/// Recommended rates for one map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub difficulty_offset: f64,
    pub xp_multiplier: f64,
    pub harvest_multiplier: f64,
    pub taming_multiplier: f64,
    pub recommended_mods: &'static [&'static str],
}

impl MapProfile {
    const fn new(
        id: &'static str,
        name: &'static str,
        difficulty_offset: f64,
        xp_multiplier: f64,
        harvest_multiplier: f64,
        taming_multiplier: f64,
    ) -> Self {
        MapProfile {
            id,
            name,
            difficulty_offset,
            xp_multiplier,
            harvest_multiplier,
            taming_multiplier,
            recommended_mods: &[],
        }
    }

    /// Writes the profile's rates to `ServerSettings` and appends any
    /// recommended mods missing from `ActiveMods`.
    ///
    /// # Errors
    ///
    /// Fails if one of the rate fields is missing from the catalog.
    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        let rates = [
            ("DifficultyOffset", self.difficulty_offset),
            ("XPMultiplier", self.xp_multiplier),
            ("HarvestAmountMultiplier", self.harvest_multiplier),
            ("TamingSpeedMultiplier", self.taming_multiplier),
        ];
        for (key, value) in rates {
            set_value(doc, server_field(key)?, TypedValue::Number(value))?;
        }

        if self.recommended_mods.is_empty() {
            return Ok(());
        }
        let mods_field = server_field("ActiveMods")?;
        let current = get_value(doc, mods_field)?.value;
        let mut mods: Vec<String> = current
            .as_str()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        for id in self.recommended_mods {
            if !mods.iter().any(|m| m == id) {
                mods.push((*id).to_string());
            }
        }
        tracing::debug!(map = self.id, mods = mods.len(), "Merged recommended mods");
        set_value(doc, mods_field, TypedValue::Text(mods.join(",")))
    }
}

fn server_field(key: &str) -> Result<&'static FieldSpec> {
    schema::find(SERVER, key)
        .ok_or_else(|| Error::custom(format!("{} is missing from the settings catalog", key)))
}

/// Every map with a preset, keyed by the map's level name.
pub static MAP_PROFILES: &[MapProfile] = &[
    MapProfile::new("TheIsland_WP", "The Island", 1.0, 1.0, 1.0, 1.0),
    MapProfile::new("ScorchedEarth_WP", "Scorched Earth", 1.0, 1.2, 1.2, 1.5),
    MapProfile::new("Aberration_WP", "Aberration", 1.0, 1.2, 1.0, 1.5),
    MapProfile::new("Extinction_WP", "Extinction", 1.0, 1.5, 1.5, 2.0),
    MapProfile::new("Ragnarok_WP", "Ragnarok", 1.0, 1.0, 1.0, 1.0),
    MapProfile::new("Valguero_WP", "Valguero", 1.0, 1.0, 1.0, 1.0),
    MapProfile::new("LostColony_WP", "Lost Colony", 1.2, 1.5, 1.2, 1.5),
    MapProfile::new("Genesis_WP", "Genesis Part 1", 1.0, 1.5, 1.2, 2.0),
    MapProfile::new("Genesis2_WP", "Genesis Part 2", 1.0, 1.5, 1.2, 2.0),
];

#[must_use]
pub fn profile_for_map(id: &str) -> Option<&'static MapProfile> {
    MAP_PROFILES.iter().find(|profile| profile.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        for (i, profile) in MAP_PROFILES.iter().enumerate() {
            assert!(MAP_PROFILES[i + 1..].iter().all(|p| p.id != profile.id));
        }
    }

    #[test]
    fn test_apply_writes_rates() {
        let mut doc = crate::from_str("[ServerSettings]\nXPMultiplier=3.0\nServerPVE=True\n").unwrap();
        profile_for_map("LostColony_WP").unwrap().apply(&mut doc).unwrap();

        assert_eq!(doc.get(SERVER, "XPMultiplier"), Some("1.5"));
        assert_eq!(doc.get(SERVER, "DifficultyOffset"), Some("1.20"));
        assert_eq!(doc.get(SERVER, "HarvestAmountMultiplier"), Some("1.2"));
        assert_eq!(doc.get(SERVER, "TamingSpeedMultiplier"), Some("1.5"));
        assert_eq!(doc.get(SERVER, "ServerPVE"), Some("True"));
        assert_eq!(doc.get(SERVER, "ActiveMods"), None);
    }

    #[test]
    fn test_apply_merges_recommended_mods() {
        let profile = MapProfile {
            recommended_mods: &["928102", "731604"],
            ..MapProfile::new("Test_WP", "Test", 1.0, 1.0, 1.0, 1.0)
        };
        let mut doc = crate::from_str("[ServerSettings]\nActiveMods=731604\n").unwrap();
        profile.apply(&mut doc).unwrap();
        assert_eq!(doc.get(SERVER, "ActiveMods"), Some("731604,928102"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(profile_for_map("Genesis2_WP").unwrap()).unwrap();
        assert_eq!(json["name"], "Genesis Part 2");
        assert_eq!(json["tamingMultiplier"], 2.0);
    }
}
