//! The static settings catalog.
//!
//! Every editable setting is described by one [`FieldSpec`]: where it lives
//! (section and key), what kind of control edits it, its bounds and default,
//! and how it is grouped for presentation. The catalog is a `static` table
//! built at compile time and never mutated.
//!
//! ```rust
//! use asa_ini::schema::{self, Category, FieldKind};
//!
//! let xp = schema::find("ServerSettings", "XPMultiplier").unwrap();
//! assert_eq!(xp.kind, FieldKind::Slider);
//! assert_eq!(xp.category, Category::Rates);
//!
//! let stats = schema::by_key("PerLevelStatsMultiplier_Player").unwrap();
//! assert_eq!(stats.indexed, Some(12));
//! ```

use crate::files::ConfigFile;
use indexmap::IndexMap;
use serde::Serialize;

/// Bumped whenever entries are added, removed or change meaning.
pub const CATALOG_VERSION: u32 = 2;

/// Server rules in `GameUserSettings.ini`.
pub const SERVER: &str = "ServerSettings";
pub const SESSION: &str = "SessionSettings";
/// The greeting shown to players on join, in `GameUserSettings.ini`.
pub const MOTD: &str = "MessageOfTheDay";
/// Game mode overrides in `Game.ini`.
pub const GAME_MODE: &str = "/Script/ShooterGame.ShooterGameMode";

/// The control used to edit a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Slider,
    Number,
    Boolean,
    Dropdown,
    Text,
    RecordArray,
}

/// The value a field has when the file does not set it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldDefault {
    Number(f64),
    Bool(bool),
    Text(&'static str),
    /// No records / empty text.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Server,
    Rates,
    Environment,
    Player,
    Dino,
    Breeding,
    Structures,
    Rules,
    Levels,
    Spawns,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Server,
        Category::Rates,
        Category::Environment,
        Category::Player,
        Category::Dino,
        Category::Breeding,
        Category::Structures,
        Category::Rules,
        Category::Levels,
        Category::Spawns,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Server => "Server",
            Category::Rates => "Rates",
            Category::Environment => "Day & Night",
            Category::Player => "Player",
            Category::Dino => "Dinos",
            Category::Breeding => "Breeding",
            Category::Structures => "Structures",
            Category::Rules => "Rules",
            Category::Levels => "Levels & Stats",
            Category::Spawns => "Spawns & Items",
        }
    }
}

/// Schema entry for one setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub section: &'static str,
    pub key: &'static str,
    pub kind: FieldKind,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub options: &'static [&'static str],
    pub default: FieldDefault,
    /// Decimal places written for numeric kinds; `None` uses the codec default.
    pub precision: Option<usize>,
    /// Number of `Key[i]` slots for indexed fields.
    pub indexed: Option<usize>,
    /// Record arrays written one record per `Key=(...)` line.
    pub repeated: bool,
    pub category: Category,
    pub group: &'static str,
    pub label: &'static str,
}

impl FieldSpec {
    const fn base(
        section: &'static str,
        key: &'static str,
        kind: FieldKind,
        default: FieldDefault,
        category: Category,
        group: &'static str,
        label: &'static str,
    ) -> Self {
        FieldSpec {
            section,
            key,
            kind,
            min: None,
            max: None,
            step: None,
            options: &[],
            default,
            precision: None,
            indexed: None,
            repeated: false,
            category,
            group,
            label,
        }
    }

    /// A multiplier slider: one decimal place, `step` increments.
    #[allow(clippy::too_many_arguments)]
    pub const fn slider(
        section: &'static str,
        key: &'static str,
        label: &'static str,
        category: Category,
        group: &'static str,
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    ) -> Self {
        FieldSpec {
            min: Some(min),
            max: Some(max),
            step: Some(step),
            precision: Some(1),
            ..Self::base(section, key, FieldKind::Slider, FieldDefault::Number(default), category, group, label)
        }
    }

    /// A whole number field.
    #[allow(clippy::too_many_arguments)]
    pub const fn integer(
        section: &'static str,
        key: &'static str,
        label: &'static str,
        category: Category,
        group: &'static str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Self {
        FieldSpec {
            min: Some(min),
            max: Some(max),
            step: Some(1.0),
            precision: Some(0),
            ..Self::base(section, key, FieldKind::Number, FieldDefault::Number(default), category, group, label)
        }
    }

    pub const fn boolean(
        section: &'static str,
        key: &'static str,
        label: &'static str,
        category: Category,
        group: &'static str,
        default: bool,
    ) -> Self {
        Self::base(section, key, FieldKind::Boolean, FieldDefault::Bool(default), category, group, label)
    }

    pub const fn text(
        section: &'static str,
        key: &'static str,
        label: &'static str,
        category: Category,
        group: &'static str,
        default: &'static str,
    ) -> Self {
        Self::base(section, key, FieldKind::Text, FieldDefault::Text(default), category, group, label)
    }

    #[allow(clippy::too_many_arguments)]
    pub const fn dropdown(
        section: &'static str,
        key: &'static str,
        label: &'static str,
        category: Category,
        group: &'static str,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        FieldSpec {
            options,
            ..Self::base(section, key, FieldKind::Dropdown, FieldDefault::Text(default), category, group, label)
        }
    }

    pub const fn records(
        section: &'static str,
        key: &'static str,
        label: &'static str,
        category: Category,
        group: &'static str,
    ) -> Self {
        Self::base(section, key, FieldKind::RecordArray, FieldDefault::Empty, category, group, label)
    }

    #[must_use]
    pub const fn with_precision(self, precision: usize) -> Self {
        FieldSpec {
            precision: Some(precision),
            ..self
        }
    }

    /// Turns the field into a template applied across `count` indexed slots.
    #[must_use]
    pub const fn with_slots(self, count: usize) -> Self {
        FieldSpec {
            indexed: Some(count),
            ..self
        }
    }

    #[must_use]
    pub const fn one_record_per_line(self) -> Self {
        FieldSpec {
            repeated: true,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_indexed(&self) -> bool {
        self.indexed.is_some()
    }

    #[inline]
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self.kind, FieldKind::Slider | FieldKind::Number)
    }

    /// The physical file this setting is stored in.
    #[must_use]
    pub fn file(&self) -> ConfigFile {
        ConfigFile::for_section(self.section)
    }

    /// The key as written for slot `index`, e.g. `PerLevelStatsMultiplier_Player[3]`.
    #[must_use]
    pub fn concrete_key(&self, index: Option<usize>) -> String {
        match index {
            Some(i) => format!("{}[{}]", self.key, i),
            None => self.key.to_string(),
        }
    }
}

const EVENTS: &[&str] = &[
    "None",
    "Easter",
    "Arkaeology",
    "FearEvolved",
    "TurkeyTrial",
    "WinterWonderland",
    "vday",
    "Summer",
];

/// Every setting the codec knows about.
pub static CATALOG: &[FieldSpec] = &[
    // Server
    FieldSpec::text(SESSION, "SessionName", "Session name", Category::Server, "Identity", "My ASA Server"),
    FieldSpec::text(SERVER, "ServerPassword", "Join password", Category::Server, "Identity", ""),
    FieldSpec::text(SERVER, "ServerAdminPassword", "Admin password", Category::Server, "Identity", ""),
    FieldSpec::integer(SERVER, "MaxPlayers", "Max players", Category::Server, "Identity", 1.0, 200.0, 70.0),
    FieldSpec::boolean(SERVER, "RCONEnabled", "Enable RCON", Category::Server, "Remote console", true),
    FieldSpec::integer(SERVER, "RCONPort", "RCON port", Category::Server, "Remote console", 1.0, 65535.0, 27020.0),
    FieldSpec::text(SERVER, "ActiveMods", "Active mods", Category::Server, "Mods", ""),
    FieldSpec::dropdown(SERVER, "ActiveEvent", "Active event", Category::Server, "Events", EVENTS, "None"),
    FieldSpec::text(MOTD, "Message", "Message of the day", Category::Server, "Message of the day", "Welcome to the server!"),
    FieldSpec::integer(MOTD, "Duration", "Display seconds", Category::Server, "Message of the day", 1.0, 3600.0, 20.0),
    // Rates
    FieldSpec::slider(SERVER, "XPMultiplier", "XP", Category::Rates, "Progression", 0.1, 50.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "TamingSpeedMultiplier", "Taming speed", Category::Rates, "Progression", 0.1, 50.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "HarvestAmountMultiplier", "Harvest amount", Category::Rates, "Gathering", 0.1, 50.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "HarvestHealthMultiplier", "Harvest health", Category::Rates, "Gathering", 0.1, 50.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "DifficultyOffset", "Difficulty offset", Category::Rates, "Difficulty", 0.0, 1.0, 0.05, 1.0)
        .with_precision(2),
    FieldSpec::slider(SERVER, "OverrideOfficialDifficulty", "Official difficulty override", Category::Rates, "Difficulty", 1.0, 20.0, 0.5, 5.0)
        .with_precision(2),
    // Environment
    FieldSpec::slider(SERVER, "DayCycleSpeedScale", "Day cycle speed", Category::Environment, "Time", 0.1, 10.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "DayTimeSpeedScale", "Day time speed", Category::Environment, "Time", 0.1, 10.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "NightTimeSpeedScale", "Night time speed", Category::Environment, "Time", 0.1, 10.0, 0.1, 1.0),
    // Player
    FieldSpec::slider(SERVER, "PlayerDamageMultiplier", "Damage", Category::Player, "Combat", 0.1, 10.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "PlayerResistanceMultiplier", "Resistance", Category::Player, "Combat", 0.1, 10.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "PlayerCharacterFoodDrainMultiplier", "Food drain", Category::Player, "Survival", 0.1, 10.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "PlayerCharacterWaterDrainMultiplier", "Water drain", Category::Player, "Survival", 0.1, 10.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "PlayerCharacterStaminaDrainMultiplier", "Stamina drain", Category::Player, "Survival", 0.1, 10.0, 0.1, 1.0),
    // Dino
    FieldSpec::slider(SERVER, "DinoDamageMultiplier", "Damage", Category::Dino, "Combat", 0.1, 10.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "DinoResistanceMultiplier", "Resistance", Category::Dino, "Combat", 0.1, 10.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "DinoCharacterFoodDrainMultiplier", "Food drain", Category::Dino, "Survival", 0.1, 10.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "DinoCountMultiplier", "Wild dino count", Category::Dino, "Population", 0.1, 10.0, 0.1, 1.0),
    // Structures
    FieldSpec::slider(SERVER, "StructureDamageMultiplier", "Damage", Category::Structures, "Combat", 0.1, 10.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "StructureResistanceMultiplier", "Resistance", Category::Structures, "Combat", 0.1, 10.0, 0.1, 1.0),
    FieldSpec::slider(SERVER, "PvEStructureDecayPeriodMultiplier", "Decay period", Category::Structures, "Decay", 0.1, 10.0, 0.1, 1.0),
    // Rules
    FieldSpec::boolean(SERVER, "ServerPVE", "PvE mode", Category::Rules, "Mode", false),
    FieldSpec::boolean(SERVER, "EnablePvPGamma", "Allow gamma in PvP", Category::Rules, "Mode", false),
    FieldSpec::boolean(SERVER, "DisableFriendlyFire", "Disable friendly fire", Category::Rules, "Mode", true),
    FieldSpec::boolean(SERVER, "AllowThirdPersonPlayer", "Third person view", Category::Rules, "Interface", true),
    FieldSpec::boolean(SERVER, "ServerCrosshair", "Crosshair", Category::Rules, "Interface", true),
    FieldSpec::boolean(SERVER, "ShowMapPlayerLocation", "Show player on map", Category::Rules, "Interface", true),
    FieldSpec::boolean(GAME_MODE, "bUseSingleplayerSettings", "Singleplayer settings", Category::Rules, "Mode", false),
    FieldSpec::boolean(GAME_MODE, "bDisableStructurePlacementCollision", "Disable placement collision", Category::Rules, "Building", false),
    FieldSpec::boolean(GAME_MODE, "bAllowUnlimitedRespecs", "Unlimited respecs", Category::Rules, "Progression", false),
    FieldSpec::integer(GAME_MODE, "MaxNumberOfPlayersInTribe", "Max tribe size", Category::Rules, "Tribes", 0.0, 500.0, 0.0),
    // Breeding
    FieldSpec::slider(GAME_MODE, "EggHatchSpeedMultiplier", "Egg hatch speed", Category::Breeding, "Eggs", 0.1, 100.0, 0.1, 1.0),
    FieldSpec::slider(GAME_MODE, "BabyMatureSpeedMultiplier", "Baby mature speed", Category::Breeding, "Babies", 0.1, 100.0, 0.1, 1.0),
    FieldSpec::slider(GAME_MODE, "BabyFoodConsumptionSpeedMultiplier", "Baby food consumption", Category::Breeding, "Babies", 0.1, 100.0, 0.1, 1.0),
    FieldSpec::slider(GAME_MODE, "BabyCuddleIntervalMultiplier", "Cuddle interval", Category::Breeding, "Babies", 0.01, 10.0, 0.01, 1.0)
        .with_precision(2),
    FieldSpec::slider(GAME_MODE, "MatingIntervalMultiplier", "Mating interval", Category::Breeding, "Mating", 0.01, 10.0, 0.01, 1.0)
        .with_precision(2),
    // Levels
    FieldSpec::integer(GAME_MODE, "OverrideMaxExperiencePointsPlayer", "Max player XP", Category::Levels, "Experience", 0.0, 2_147_483_647.0, 0.0),
    FieldSpec::records(GAME_MODE, "LevelExperienceRampOverrides", "Player level ramp", Category::Levels, "Experience"),
    FieldSpec::slider(GAME_MODE, "PerLevelStatsMultiplier_Player", "Player stat per level", Category::Levels, "Stats", 0.1, 100.0, 0.1, 1.0)
        .with_slots(12),
    FieldSpec::slider(GAME_MODE, "PerLevelStatsMultiplier_DinoTamed", "Tamed stat per level", Category::Levels, "Stats", 0.1, 100.0, 0.1, 1.0)
        .with_slots(12),
    FieldSpec::slider(GAME_MODE, "PerLevelStatsMultiplier_DinoWild", "Wild stat per level", Category::Levels, "Stats", 0.1, 100.0, 0.1, 1.0)
        .with_slots(12),
    // Spawns
    FieldSpec::records(GAME_MODE, "DinoSpawnWeightMultipliers", "Dino spawn weights", Category::Spawns, "Spawns")
        .one_record_per_line(),
    FieldSpec::records(GAME_MODE, "ConfigOverrideItemMaxQuantity", "Item stack sizes", Category::Spawns, "Items")
        .one_record_per_line(),
];

/// Looks up a field by section and key.
#[must_use]
pub fn find(section: &str, key: &str) -> Option<&'static FieldSpec> {
    CATALOG
        .iter()
        .find(|spec| spec.section == section && spec.key == key)
}

/// Looks up the first field with `key` in any section.
#[must_use]
pub fn by_key(key: &str) -> Option<&'static FieldSpec> {
    CATALOG.iter().find(|spec| spec.key == key)
}

pub fn in_category(category: Category) -> impl Iterator<Item = &'static FieldSpec> {
    CATALOG.iter().filter(move |spec| spec.category == category)
}

/// The catalog grouped as category → group → fields, in catalog order.
#[must_use]
pub fn grouped() -> IndexMap<Category, IndexMap<&'static str, Vec<&'static FieldSpec>>> {
    let mut groups: IndexMap<Category, IndexMap<&'static str, Vec<&'static FieldSpec>>> =
        IndexMap::new();
    for spec in CATALOG {
        groups
            .entry(spec.category)
            .or_default()
            .entry(spec.group)
            .or_default()
            .push(spec);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_section_key_pairs_are_unique() {
        let mut seen = HashSet::new();
        for spec in CATALOG {
            assert!(seen.insert((spec.section, spec.key)), "duplicate {}", spec.key);
        }
    }

    #[test]
    fn test_defaults_match_kinds() {
        for spec in CATALOG {
            let ok = match spec.kind {
                FieldKind::Slider | FieldKind::Number => matches!(spec.default, FieldDefault::Number(_)),
                FieldKind::Boolean => matches!(spec.default, FieldDefault::Bool(_)),
                FieldKind::Text => matches!(spec.default, FieldDefault::Text(_)),
                FieldKind::Dropdown => match spec.default {
                    FieldDefault::Text(d) => spec.options.contains(&d),
                    _ => false,
                },
                FieldKind::RecordArray => matches!(spec.default, FieldDefault::Empty),
            };
            assert!(ok, "{} has a default that does not fit its kind", spec.key);
        }
    }

    #[test]
    fn test_numeric_defaults_within_bounds() {
        for spec in CATALOG.iter().filter(|s| s.is_numeric()) {
            if let (FieldDefault::Number(d), Some(min), Some(max)) = (spec.default, spec.min, spec.max) {
                assert!(d >= min && d <= max, "{} default out of bounds", spec.key);
            }
        }
    }

    #[test]
    fn test_multipliers_use_one_decimal() {
        let xp = find(SERVER, "XPMultiplier").unwrap();
        assert_eq!(xp.precision, Some(1));
        assert_eq!(find(SERVER, "MaxPlayers").unwrap().precision, Some(0));
    }

    #[test]
    fn test_grouped_preserves_catalog_order() {
        let groups = grouped();
        assert_eq!(groups.keys().next(), Some(&Category::Server));
        let levels = &groups[&Category::Levels];
        assert_eq!(levels.keys().copied().collect::<Vec<_>>(), vec!["Experience", "Stats"]);
        assert_eq!(levels["Stats"].len(), 3);
        let total: usize = groups.values().flat_map(|g| g.values()).map(Vec::len).sum();
        assert_eq!(total, CATALOG.len());
    }

    #[test]
    fn test_every_category_is_used() {
        for category in Category::ALL {
            assert!(in_category(category).next().is_some(), "{:?} is empty", category);
        }
        assert!(in_category(Category::Rules).any(|spec| spec.key == "DisableFriendlyFire"));
    }

    #[test]
    fn test_message_of_the_day_group() {
        let groups = grouped();
        let motd = &groups[&Category::Server]["Message of the day"];
        let keys: Vec<_> = motd.iter().map(|spec| (spec.section, spec.key)).collect();
        assert_eq!(keys, vec![(MOTD, "Message"), (MOTD, "Duration")]);

        let duration = find(MOTD, "Duration").unwrap();
        assert_eq!(duration.kind, FieldKind::Number);
        assert_eq!(duration.default, FieldDefault::Number(20.0));
        assert_eq!(duration.file(), ConfigFile::GameUserSettings);
        assert_eq!(find(SERVER, "DisableFriendlyFire").unwrap().kind, FieldKind::Boolean);
    }

    #[test]
    fn test_json_export() {
        let json = serde_json::to_value(find(SERVER, "ServerPVE").unwrap()).unwrap();
        assert_eq!(json["kind"], "boolean");
        assert_eq!(json["default"], false);
        assert_eq!(json["category"], "rules");
    }
}
