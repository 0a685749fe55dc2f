// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::paths::LIBRARY_DIR_NAME;
use super::types::GameConfig;
use super::{Config, ConfigLoader, PathsConfig};
use crate::logging::LogLevel;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = Config::default();
    let summary = format!(
        "log={} concurrency={} game={} loader={}",
        u8::from(config.global.output_log_level),
        config.network.concurrency,
        config.game.game_id,
        config.game.loader_repo,
    );
    insta::assert_snapshot!(summary, @"log=3 concurrency=5 game=21179 loader=UE4SS-RE/RE-UE4SS");
    assert_eq!(config.network.gamebanana_url, "https://gamebanana.com/apiv11");
}

#[test]
fn test_paths_resolve_relative_library() {
    let mut paths = PathsConfig {
        data_dir: Some(PathBuf::from("/data/kami")),
        library_dir: Some(PathBuf::from("Library")),
        temp_dir: None,
    };
    paths.resolve().unwrap();

    assert_eq!(
        paths.library_dir().unwrap(),
        PathBuf::from("/data/kami").join("Library")
    );
    assert!(paths.temp_dir().unwrap().ends_with("kamisama"));
}

#[test]
fn test_paths_resolve_default_library() {
    let mut paths = PathsConfig {
        data_dir: Some(PathBuf::from("/data/kami")),
        ..PathsConfig::default()
    };
    paths.resolve().unwrap();
    assert_eq!(
        paths.library_dir().unwrap(),
        PathBuf::from("/data/kami").join(LIBRARY_DIR_NAME)
    );
}

#[test]
fn test_paths_absolute_library_kept() {
    let mut paths = PathsConfig {
        data_dir: Some(PathBuf::from("/data/kami")),
        library_dir: Some(PathBuf::from("/mnt/mods")),
        temp_dir: Some(PathBuf::from("/tmp/dl")),
    };
    paths.resolve().unwrap();
    assert_eq!(paths.library_dir().unwrap(), PathBuf::from("/mnt/mods"));
    assert_eq!(paths.temp_dir().unwrap(), PathBuf::from("/tmp/dl"));
}

#[test]
fn test_unresolved_paths_error() {
    let paths = PathsConfig::default();
    let err = paths.library_dir().unwrap_err();
    assert!(err.to_string().contains("library_dir"));
}

#[test]
fn test_loader_set_override_str() {
    let config = ConfigLoader::new()
        .add_toml_str("[paths]\ndata_dir = \"/data\"\n")
        .set_override_str("network.concurrency=2")
        .unwrap()
        .set_override_str("global/output_log_level = 4")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.network.concurrency, 2);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
}

#[test]
fn test_loader_set_override_str_rejects_missing_equals() {
    assert!(ConfigLoader::new().set_override_str("network.concurrency").is_err());
}

#[test]
fn test_zero_concurrency_rejected() {
    let result = Config::parse("[paths]\ndata_dir = \"/data\"\n[network]\nconcurrency = 0\n");
    assert!(result.is_err());
}

#[test]
fn test_unknown_field_rejected() {
    let result = Config::parse("[paths]\ndata_dir = \"/data\"\nprefix = \"/x\"\n");
    assert!(result.is_err());
}

#[test]
fn test_loader_owner_repo() {
    let game = GameConfig::default();
    assert_eq!(game.loader_owner_repo(), Some(("UE4SS-RE", "RE-UE4SS")));

    let broken = GameConfig {
        loader_repo: "no-slash".to_string(),
        ..GameConfig::default()
    };
    assert_eq!(broken.loader_owner_repo(), None);
}

#[test]
fn test_format_options_aligned() {
    let mut config = Config::parse("[paths]\ndata_dir = \"/data\"\n").unwrap();
    config.paths.temp_dir = Some(PathBuf::from("/tmp/kamisama"));
    let lines = config.format_options();

    assert!(lines.iter().any(|l| l.starts_with("game.game_id") && l.ends_with("= 21179")));
    let eq_columns: Vec<usize> = lines.iter().filter_map(|l| l.find(" = ")).collect();
    assert!(eq_columns.windows(2).all(|w| w[0] == w[1]));
}
