//! Load both settings files, change a few values, and print the result.
//!
//! Run with: cargo run --example round_trip [GameUserSettings.ini Game.ini]

use asa_ini::generators::{DifficultySettings, ExperienceRamp, Stat, StatBatch};
use asa_ini::{schema, SettingsSpace, TypedValue};
use std::error::Error;

const GAME_USER_SETTINGS: &str = "\
[ServerSettings]\r
XPMultiplier=1.0\r
ServerPVE=False\r
; kept as written\r
DifficultyOffset=1.00\r
\r
[SessionSettings]\r
SessionName=My ASA Server\r
";

const GAME: &str = "\
[/Script/ShooterGame.ShooterGameMode]\r
bUseSingleplayerSettings=False\r
DinoSpawnWeightMultipliers=(DinoNameTag=\"Rex\",SpawnWeightMultiplier=0.5)\r
";

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (user_settings, game) = match args.as_slice() {
        [gus, game] => (std::fs::read_to_string(gus)?, std::fs::read_to_string(game)?),
        _ => (GAME_USER_SETTINGS.to_string(), GAME.to_string()),
    };

    let mut space = SettingsSpace::load(&user_settings, &game)?;
    let untouched = space.render();
    println!(
        "Unedited round trip identical: {}",
        untouched.game_user_settings == user_settings && untouched.game == game
    );

    space.set(schema::by_key("XPMultiplier").ok_or("XPMultiplier missing")?, TypedValue::Number(2.0))?;
    space.set(schema::by_key("ServerPVE").ok_or("ServerPVE missing")?, TypedValue::Bool(true))?;

    let doc = space.document_mut();
    DifficultySettings::for_level(150).apply(doc)?;
    ExperienceRamp::for_max_level(5).apply(doc)?;
    StatBatch::new()
        .with(Stat::Weight, 5.0)
        .apply(doc, schema::by_key("PerLevelStatsMultiplier_Player").ok_or("stat field missing")?)?;

    let files = space.render();
    println!("--- GameUserSettings.ini ---\n{}", files.game_user_settings);
    println!("--- Game.ini ---\n{}", files.game);

    Ok(())
}
