// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_range() {
    let levels: Vec<Option<u8>> = [0, 3, 6, 7, 200]
        .into_iter()
        .map(|n| LogLevel::from_u8(n).map(u8::from))
        .collect();
    insta::assert_debug_snapshot!(levels, @r"
    [
        Some(
            0,
        ),
        Some(
            3,
        ),
        Some(
            6,
        ),
        None,
        None,
    ]
    ");
}

#[test]
fn test_log_level_try_from_reports_key() {
    assert_eq!(LogLevel::try_from(4).unwrap(), LogLevel::DEBUG);
    let err = LogLevel::try_from(7).unwrap_err();
    assert!(err.to_string().contains("log_level"));
}

#[test]
fn test_log_level_serde_checks_range() {
    #[derive(serde::Deserialize, serde::Serialize)]
    struct Global {
        level: LogLevel,
    }

    let parsed: Global = serde_json::from_str(r#"{"level":5}"#).unwrap();
    assert_eq!(parsed.level, LogLevel::TRACE);
    assert!(serde_json::from_str::<Global>(r#"{"level":9}"#).is_err());
    assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"{"level":5}"#);
}

#[test]
fn test_filter_strings_quiet_http_stack_below_dump() {
    assert_eq!(LogLevel::SILENT.to_filter_string(), "off");
    assert!(LogLevel::INFO.to_filter_string().contains("reqwest=warn"));
    assert_eq!(LogLevel::DUMP.to_filter_string(), "trace");
}

#[test]
fn test_log_config_defaults_and_builder() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());

    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .with_log_file("logs/kami.log".into())
        .build();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.log_file(), Some(Path::new("logs/kami.log")));
}
