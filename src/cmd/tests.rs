// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::library::format_mod_line;
use super::online::format_entry_line;
use super::profile::{apply_settings, format_settings};
use crate::cli::library::SetSettingsArgs;
use crate::library::{LocalMod, Settings};
use crate::remote::RemoteCatalogEntry;

// =============================================================================
// list / search lines
// =============================================================================

#[test]
fn mod_line_shows_state_and_priority() {
    let mut m = LocalMod::new_local("1700000000000", "Goku Outfit", PathBuf::from("mods/goku"), 3);
    assert_eq!(
        format_mod_line(&m),
        "  3 [x] Goku Outfit v1.0  id=1700000000000"
    );

    m.is_enabled = false;
    m.has_update = true;
    m.latest_version = Some("2.0".to_string());
    assert_eq!(
        format_mod_line(&m),
        "  3 [ ] Goku Outfit v1.0  id=1700000000000  (update: v2.0)"
    );
}

#[test]
fn mod_line_update_without_version() {
    let mut m = LocalMod::new_local("a", "Stage", PathBuf::from("mods/stage"), 12);
    m.has_update = true;
    assert!(format_mod_line(&m).ends_with("(update available)"));
}

#[test]
fn entry_line_marks_category_and_nsfw() {
    let mut entry = RemoteCatalogEntry {
        remote_id: 512_345,
        name: "Super Saiyan Blue Aura".to_string(),
        author: "Vegeta".to_string(),
        version: "1.2".to_string(),
        ..Default::default()
    };
    assert_eq!(
        format_entry_line(&entry),
        "  512345  Super Saiyan Blue Aura v1.2 by Vegeta [-]"
    );

    entry.category = Some("Characters".to_string());
    entry.is_nsfw = true;
    assert!(format_entry_line(&entry).ends_with("[Characters] [nsfw]"));
}

// =============================================================================
// settings
// =============================================================================

#[test]
fn format_settings_blank_values() {
    let settings = Settings {
        game_path: PathBuf::from("/games/SZ"),
        ..Default::default()
    };
    insta::assert_debug_snapshot!(format_settings(&settings), @r#"
    [
        "gamePath = /games/SZ",
        "modDownloadPath = ",
        "launchArgs = ",
        "activeProfileId = ",
    ]
    "#);
}

#[test]
fn apply_settings_sets_and_clears() {
    let mut settings = Settings {
        game_path: PathBuf::from("/old"),
        mod_download_path: Some(PathBuf::from("/lib")),
        launch_args: Some("-windowed".to_string()),
        ..Default::default()
    };

    apply_settings(
        &mut settings,
        &SetSettingsArgs {
            game_path: Some(PathBuf::from("/new")),
            ..Default::default()
        },
    );
    assert_eq!(settings.game_path, PathBuf::from("/new"));
    assert_eq!(settings.mod_download_path, Some(PathBuf::from("/lib")));
    assert_eq!(settings.launch_args.as_deref(), Some("-windowed"));

    apply_settings(
        &mut settings,
        &SetSettingsArgs {
            game_path: None,
            mod_download_path: Some(PathBuf::new()),
            launch_args: Some("  ".to_string()),
        },
    );
    assert_eq!(settings.game_path, PathBuf::from("/new"));
    assert!(settings.mod_download_path.is_none());
    assert!(settings.launch_args.is_none());
}
