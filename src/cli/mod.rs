// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for kamisama-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! kamisama [global options] <command>
//! version | options
//! list | install FILE | uninstall ID
//! enable ID | disable ID
//! priority ID {up|down} | fix-priorities | deploy-all
//! profile {list|create NAME|delete ID|load ID}
//! settings {show|set ...}
//! check-updates | update ID | update-all
//! search [--page N] | install-online REMOTE_ID | install-ue4ss
//! launch
//! ```

pub mod global;
pub mod library;
pub mod online;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::library::{InstallArgs, ModIdArgs, PriorityArgs, ProfileArgs, SettingsArgs};
use crate::cli::online::{InstallOnlineArgs, SearchArgs};
use clap::{Parser, Subcommand};

/// Sparking! ZERO mod manager.
///
/// Deploys library mods into the game, keeps their load order and
/// switches between profiles.
#[derive(Debug, Parser)]
#[command(
    name = "kamisama",
    author,
    version,
    about = "Dragon Ball Sparking! ZERO mod manager",
    long_about = "kamisama-rs Copyright (C) 2026 Kamisama Loader Contributors\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Installs mods into a library folder and deploys them into the\n\
                  game directory. Mods with a higher priority get a later file\n\
                  name prefix and take precedence over lower ones.",
    after_help = "CONFIG FILES:\n\n\
                  kamisama reads `kamisama.toml` from the data directory and then\n\
                  from the current directory, the latter overriding the former.\n\
                  Additional files can be given with --config and are loaded\n\
                  after those two. KAMI_* environment variables and --set\n\
                  options are applied last."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the config files.
    Options,

    /// Lists installed mods in load order.
    List,

    /// Installs a mod archive or file from disk.
    Install(InstallArgs),

    /// Removes a mod from the game and the library.
    Uninstall(ModIdArgs),

    /// Enables and deploys a mod.
    Enable(ModIdArgs),

    /// Disables and undeploys a mod.
    Disable(ModIdArgs),

    /// Moves a mod one step up or down the load order.
    Priority(PriorityArgs),

    /// Renumbers all priorities to 1..N and redeploys.
    #[command(name = "fix-priorities")]
    FixPriorities,

    /// Redeploys every enabled mod.
    #[command(name = "deploy-all")]
    DeployAll,

    /// Manages profiles.
    Profile(ProfileArgs),

    /// Shows or changes user settings.
    Settings(SettingsArgs),

    /// Checks catalog-linked mods for updates.
    #[command(name = "check-updates")]
    CheckUpdates,

    /// Applies the pending update of a mod.
    Update(ModIdArgs),

    /// Applies every pending update.
    #[command(name = "update-all")]
    UpdateAll,

    /// Browses the online catalog.
    Search(SearchArgs),

    /// Installs a mod from the online catalog.
    #[command(name = "install-online")]
    InstallOnline(InstallOnlineArgs),

    /// Installs the latest UE4SS release into the game.
    #[command(name = "install-ue4ss")]
    InstallUe4ss,

    /// Launches the game.
    Launch,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
