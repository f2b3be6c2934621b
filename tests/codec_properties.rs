//! Guarantees the codec makes to its callers, one test per property.

use asa_ini::generators::ExperienceRamp;
use asa_ini::{
    from_str, get_value, get_value_at, parse_records, record, schema, serialize_records,
    set_value, set_value_at, split_by_file, to_string, Error, FieldValue, SettingsSpace,
    TypedValue,
};

const SAMPLE: &str = "; comment before any section\n\
[ServerSettings]\n\
XPMultiplier=1.0\n\
XPMultiplier=2.5\n\
\u{20}\u{20}ServerPVE = true\n\
// slashes comment\n\
# hash comment\n\
orphan text\n\
=no key\n\
\n\
[/Script/ShooterGame.ShooterGameMode]\n\
PerLevelStatsMultiplier_Player[9]=1.0\n\
PerLevelStatsMultiplier_Player[3]=1.0\n\
DinoSpawnWeightMultipliers=(DinoNameTag=Rex,SpawnWeightMultiplier=0.5)\n\
Broken=(Unclosed=\"x\n";

#[test]
fn round_trip_identity() {
    let parsed = from_str(SAMPLE).unwrap();
    let reparsed = from_str(&to_string(&parsed)).unwrap();
    assert_eq!(reparsed, parsed);
}

#[test]
fn idempotent_no_op_save() {
    let once = to_string(&from_str(SAMPLE).unwrap());
    assert_eq!(once, SAMPLE);
    let twice = to_string(&from_str(&once).unwrap());
    assert_eq!(twice, once);
}

#[test]
fn mixed_line_endings_survive_a_save() {
    let text = "; hand edited\r\n[ServerSettings]\r\nXPMultiplier=1.0\nServerPVE=True\r\n\n[SessionSettings]\nSessionName=Mixed\r\n";
    let mut doc = from_str(text).unwrap();
    assert_eq!(to_string(&doc), text);

    let xp = schema::find("ServerSettings", "XPMultiplier").unwrap();
    set_value(&mut doc, xp, TypedValue::Number(2.0)).unwrap();
    assert_eq!(
        to_string(&doc),
        "; hand edited\r\n[ServerSettings]\r\nXPMultiplier=2.0\r\nServerPVE=True\r\n\n[SessionSettings]\nSessionName=Mixed\r\n"
    );
}

#[test]
fn numeric_formatting_stability() {
    let mut doc = from_str("[ServerSettings]\n").unwrap();
    let xp = schema::find("ServerSettings", "XPMultiplier").unwrap();

    set_value(&mut doc, xp, TypedValue::Number(2.0)).unwrap();
    assert_eq!(doc.get("ServerSettings", "XPMultiplier"), Some("2.0"));
    assert_eq!(get_value(&doc, xp).unwrap().value, TypedValue::Number(2.0));
}

#[test]
fn boolean_lexicon() {
    let mut doc = from_str("[ServerSettings]\n").unwrap();
    let pve = schema::find("ServerSettings", "ServerPVE").unwrap();

    set_value(&mut doc, pve, TypedValue::Bool(true)).unwrap();
    assert_eq!(doc.get("ServerSettings", "ServerPVE"), Some("True"));
    set_value(&mut doc, pve, TypedValue::Bool(false)).unwrap();
    assert_eq!(doc.get("ServerSettings", "ServerPVE"), Some("False"));
}

#[test]
fn structured_array_round_trip() {
    let input = r#"(ClassName="Dino_C",Multiplier=2.0),(ClassName="Rex_C",Multiplier=1.5)"#;
    let records = parse_records(input).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].field_names(), vec!["ClassName", "Multiplier"]);
    assert_eq!(records[0].get("ClassName"), Some(&FieldValue::Text("Dino_C".to_string())));
    assert_eq!(records[0].get("Multiplier"), Some(&FieldValue::Number("2.0".to_string())));
    assert_eq!(records[1].get("ClassName"), Some(&FieldValue::Text("Rex_C".to_string())));
    assert_eq!(records[1].get("Multiplier"), Some(&FieldValue::Number("1.5".to_string())));
    assert_eq!(serialize_records(&records), input);
}

#[test]
fn structured_array_edge_cases() {
    assert!(parse_records("()").unwrap().is_empty());

    let records = parse_records("(Flag,Name=x)").unwrap();
    assert_eq!(records[0].get("Flag"), Some(&FieldValue::Text(String::new())));
    assert_eq!(serialize_records(&records), r#"(Flag="",Name="x")"#);

    let quoted = parse_records(r#"(Message="hello, world",Count=2)"#).unwrap();
    assert_eq!(quoted[0].get("Message").and_then(FieldValue::as_str), Some("hello, world"));
}

#[test]
fn record_text_with_a_quote_is_not_written() {
    let text = "[/Script/ShooterGame.ShooterGameMode]\nConfigOverrideItemMaxQuantity=(ItemClassString=\"PrimalItemResource_Stone_C\",Quantity=(MaxItemQuantity=100))\n";
    let mut doc = from_str(text).unwrap();
    let items = schema::by_key("ConfigOverrideItemMaxQuantity").unwrap();

    let bad = record! { "ItemClassString" => "Blueprint'/Game/X.X_C'\"", "Quantity" => 1u64 };
    let err = set_value(&mut doc, items, TypedValue::Records(vec![bad])).unwrap_err();
    assert!(matches!(err, Error::UnwritableRecord { .. }));
    assert_eq!(to_string(&doc), text);

    let read = get_value(&doc, items).unwrap();
    assert!(read.warning.is_none());
    assert_eq!(read.value.as_records().map(<[_]>::len), Some(1));
}

#[test]
fn indexed_array_independence() {
    let mut doc = from_str(SAMPLE).unwrap();
    let player = schema::by_key("PerLevelStatsMultiplier_Player").unwrap();

    set_value_at(&mut doc, player, 3, TypedValue::Number(2.0)).unwrap();
    assert_eq!(get_value_at(&doc, player, 3).unwrap().value, TypedValue::Number(2.0));
    assert_eq!(get_value_at(&doc, player, 9).unwrap().value, TypedValue::Number(1.0));
    assert_eq!(doc.get_indexed(player.section, player.key, "9"), Some("1.0"));

    let unset = get_value_at(&doc, player, 11).unwrap();
    assert_eq!(unset.value, TypedValue::Number(1.0));
    assert!(unset.warning.is_none());
    assert_eq!(doc.get_indexed(player.section, player.key, "11"), None);
}

#[test]
fn duplicate_reads_and_round_trip_diverge() {
    let doc = from_str(SAMPLE).unwrap();
    let xp = schema::find("ServerSettings", "XPMultiplier").unwrap();

    assert_eq!(get_value(&doc, xp).unwrap().value, TypedValue::Number(2.5));
    assert_eq!(to_string(&doc).matches("XPMultiplier=").count(), 2);
}

#[test]
fn experience_ramp_monotonicity() {
    let ramp = ExperienceRamp::for_max_level(50);
    let points = ramp.points();

    assert_eq!(points.len(), 50);
    assert_eq!(points[0], 0);
    assert!(points.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(ramp.max_experience(), (10.0 * 50f64.powf(2.2)).floor() as u64);
}

#[test]
fn file_routing_scenario() {
    let doc = from_str(
        "[ServerSettings]\nXPMultiplier=2.0\n[/Script/ShooterGame.ShooterGameMode]\nbUseSingleplayerSettings=True\n",
    )
    .unwrap();

    let (user_settings, game) = split_by_file(&doc);
    let user_text = to_string(&user_settings);
    let game_text = to_string(&game);

    assert_eq!(user_text, "[ServerSettings]\nXPMultiplier=2.0\n");
    assert_eq!(game_text, "[/Script/ShooterGame.ShooterGameMode]\nbUseSingleplayerSettings=True\n");

    let space = SettingsSpace::load(&user_text, &game_text).unwrap();
    let files = space.render();
    assert_eq!(files.game_user_settings, user_text);
    assert_eq!(files.game, game_text);
}
