// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use std::path::PathBuf;

use kamisama_rs::config::Config;
use kamisama_rs::config::loader::ConfigLoader;
use kamisama_rs::logging::LogLevel;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
output_log_level = 4
file_log_level = 5
log_file = "/var/log/kamisama.log"

[paths]
data_dir = "/srv/kami"
library_dir = "Library"
temp_dir = "/tmp/kami-dl"

[network]
concurrency = 3
user_agent = "test-agent"
gamebanana_url = "http://localhost:8080/apiv11/"
rate_limit_capacity = 4
rate_limit_per_second = 0.5
cache_ttl_secs = 60

[game]
game_id = 1
loader_repo = "someone/loader"
"#;
    let config = Config::parse(toml).unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert_eq!(config.paths.library_dir, Some(PathBuf::from("/srv/kami/Library")));
    assert_eq!(config.paths.temp_dir, Some(PathBuf::from("/tmp/kami-dl")));
    assert_eq!(config.network.concurrency, 3);
    assert_eq!(config.network.cache_ttl_secs, 60);
    assert_eq!(config.game.loader_owner_repo(), Some(("someone", "loader")));
}

#[test]
fn config_parse_partial_keeps_defaults() {
    let config = Config::parse("[network]\nconcurrency = 8\n").unwrap();
    let defaults = Config::parse("").unwrap();

    assert_eq!(config.network.concurrency, 8);
    assert_eq!(config.network.user_agent, defaults.network.user_agent);
    assert_eq!(config.game, defaults.game);
    assert_eq!(config.global, defaults.global);
}

#[test]
fn config_invalid_values_rejected() {
    for toml in [
        "[global]\noutput_log_level = 9\n",
        "[network]\nconcurrency = 0\n",
        "[network]\nrate_limit_per_second = 0.0\n",
        "[paths]\nprefix = \"/build\"\n",
        "[unknown]\nkey = 1\n",
    ] {
        assert!(Config::parse(toml).is_err(), "accepted: {toml}");
    }
}

// =============================================================================
// Layered files
// =============================================================================

#[test]
fn config_later_files_override_earlier() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("base.toml");
    let local = temp.path().join("local.toml");
    std::fs::write(
        &base,
        "[network]\nconcurrency = 2\ncache_ttl_secs = 10\n[paths]\ndata_dir = \"/data\"\n",
    )
    .unwrap();
    std::fs::write(&local, "[network]\nconcurrency = 6\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file_optional(&local)
        .add_toml_file_optional(temp.path().join("absent.toml"));
    assert_eq!(loader.loaded_files(), [base, local]);

    let config = loader.build().unwrap();
    assert_eq!(config.network.concurrency, 6);
    assert_eq!(config.network.cache_ttl_secs, 10);
    assert_eq!(config.paths.library_dir, Some(PathBuf::from("/data/Mods")));
}

#[test]
fn config_required_file_missing_is_error() {
    let temp = tempfile::tempdir().unwrap();
    let result = ConfigLoader::new()
        .add_toml_file(temp.path().join("missing.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn config_overrides_win_over_files() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("kamisama.toml");
    std::fs::write(&file, "[game]\ngame_id = 5\n").unwrap();

    let config = Config::builder()
        .add_toml_file(&file)
        .set_override_str("game.game_id=21179")
        .unwrap()
        .set_override_str("paths/data_dir = /override")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.game.game_id, 21179);
    assert_eq!(config.paths.data_dir, Some(PathBuf::from("/override")));
}

#[test]
fn config_format_options_lists_every_key() {
    let config = Config::parse("[paths]\ndata_dir = \"/d\"\n").unwrap();
    let lines = config.format_options();

    let keys: Vec<&str> = lines
        .iter()
        .filter_map(|l| l.split_once(" = ").map(|(k, _)| k.trim_end()))
        .collect();
    assert!(keys.windows(2).all(|w| w[0] < w[1]), "not sorted: {keys:?}");
    assert!(keys.contains(&"paths.library_dir"));
    assert!(lines.iter().any(|l| l.ends_with("= /d/Mods")));
}
