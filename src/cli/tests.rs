// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::library::{DirectionArg, ProfileSubcommand, SettingsSubcommand};
use crate::cli::{Cli, Command};
use crate::library::priority::Direction;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["kamisama", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "kamisama",
        "-l",
        "5",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "--data-dir",
        "/srv/kami",
        "-s",
        "network.concurrency=2",
        "list",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(
        cli.global.configs,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        "network.concurrency=2",
        "global.output_log_level=5",
        "global.file_log_level=5",
        "paths.data_dir=/srv/kami",
    ]
    "#);
}

#[test]
fn test_parse_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["kamisama", "-l", "9", "list"]).is_err());
}

#[test]
fn test_parse_priority() {
    let cli = Cli::try_parse_from(["kamisama", "priority", "1712", "down"]).unwrap();
    let Some(Command::Priority(args)) = cli.command else {
        panic!("expected priority command");
    };
    assert_eq!(args.id, "1712");
    assert_eq!(args.direction, DirectionArg::Down);
    assert_eq!(Direction::from(args.direction), Direction::Down);

    assert!(Cli::try_parse_from(["kamisama", "priority", "1712", "sideways"]).is_err());
}

#[test]
fn test_parse_kebab_case_commands() {
    let cases: [(&str, fn(&Command) -> bool); 5] = [
        ("fix-priorities", |c| matches!(c, Command::FixPriorities)),
        ("deploy-all", |c| matches!(c, Command::DeployAll)),
        ("check-updates", |c| matches!(c, Command::CheckUpdates)),
        ("update-all", |c| matches!(c, Command::UpdateAll)),
        ("install-ue4ss", |c| matches!(c, Command::InstallUe4ss)),
    ];
    for (arg, check) in cases {
        let cli = Cli::try_parse_from(["kamisama", arg]).unwrap();
        assert!(check(cli.command.as_ref().unwrap()), "{arg}");
    }
}

#[test]
fn test_parse_profile_subcommands() {
    let cli = Cli::try_parse_from(["kamisama", "profile", "create", "Tournament"]).unwrap();
    let Some(Command::Profile(args)) = cli.command else {
        panic!("expected profile command");
    };
    assert!(matches!(
        args.subcommand,
        ProfileSubcommand::Create { ref name } if name == "Tournament"
    ));

    let cli = Cli::try_parse_from(["kamisama", "profile", "load", "99"]).unwrap();
    let Some(Command::Profile(args)) = cli.command else {
        panic!("expected profile command");
    };
    assert!(matches!(args.subcommand, ProfileSubcommand::Load { ref id } if id == "99"));
}

#[test]
fn test_parse_settings_set() {
    let cli = Cli::try_parse_from([
        "kamisama",
        "settings",
        "set",
        "--game-path",
        "/games/DBSZ",
        "--launch-args",
        "-windowed -dx11",
    ])
    .unwrap();
    let Some(Command::Settings(args)) = cli.command else {
        panic!("expected settings command");
    };
    let SettingsSubcommand::Set(set) = args.subcommand else {
        panic!("expected settings set");
    };
    assert_eq!(set.game_path, Some(PathBuf::from("/games/DBSZ")));
    assert_eq!(set.launch_args.as_deref(), Some("-windowed -dx11"));
    assert!(set.mod_download_path.is_none());
    assert!(!set.is_empty());
}

#[test]
fn test_parse_search_and_install_online() {
    let cli = Cli::try_parse_from(["kamisama", "search"]).unwrap();
    let Some(Command::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(args.page, 1);

    let cli = Cli::try_parse_from(["kamisama", "search", "--page", "3"]).unwrap();
    let Some(Command::Search(args)) = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(args.page, 3);

    assert!(Cli::try_parse_from(["kamisama", "search", "--page", "0"]).is_err());

    let cli = Cli::try_parse_from(["kamisama", "install-online", "512"]).unwrap();
    let Some(Command::InstallOnline(args)) = cli.command else {
        panic!("expected install-online command");
    };
    assert_eq!(args.remote_id, 512);
}
