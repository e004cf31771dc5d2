use std::io::Write;

use danmaku::config::Balance;
use danmaku::error::GameError;

#[test]
fn load_reads_partial_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "boss_hp": 250, "homing_delay": 60 }}"#).unwrap();

    let b = Balance::load(file.path()).unwrap();
    assert_eq!(b.boss_hp, 250);
    assert_eq!(b.homing_delay, 60);
    assert_eq!(b.spell_card_duration, 1800);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    match Balance::load(&path) {
        Err(GameError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn invalid_values_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "boss_hp": 0 }}"#).unwrap();
    assert!(matches!(
        Balance::load(file.path()),
        Err(GameError::InvalidConfig { field: "boss_hp", .. })
    ));
}

#[test]
fn defaults_round_trip_through_json() {
    let text = serde_json::to_string(&Balance::default()).unwrap();
    assert_eq!(Balance::from_json_str(&text).unwrap(), Balance::default());
}
