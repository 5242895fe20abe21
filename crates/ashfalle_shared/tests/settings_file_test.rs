//! Integration tests for the settings file bootstrap.

use ashfalle_shared::{GameSettings, LootOptions, SettingsError};

#[test]
fn test_load_or_create_writes_defaults_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("settings").join("game_settings.toml");

    let created = GameSettings::load_or_create(&path).unwrap();
    assert_eq!(created, GameSettings::default());
    assert!(path.exists(), "bootstrap should create the file and its directories");

    // Edit the file, then bootstrap again: the edit must survive.
    let mut edited = created.clone();
    edited.game.max_player_level = 99;
    edited.loot_options = LootOptions::default().with_item_type("jewelry");
    edited.save(&path).unwrap();

    let reloaded = GameSettings::load_or_create(&path).unwrap();
    assert_eq!(reloaded.game.max_player_level, 99);
    assert_eq!(reloaded.loot_options.item_type.as_deref(), Some("jewelry"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = GameSettings::load(dir.path().join("missing.toml"));
    assert!(matches!(result, Err(SettingsError::Io(_))));
}

#[test]
fn test_load_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[game]\nmax_player_level = 0\n").unwrap();

    let result = GameSettings::load(&path);
    assert!(matches!(result, Err(SettingsError::Invalid(_))));
}
