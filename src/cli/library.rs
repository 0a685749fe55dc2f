// kamisama-rs: Sparking! ZERO Mod Manager
//
// SPDX-FileCopyrightText: 2026 Kamisama Loader Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library command arguments.
//!
//! ```text
//! install FILE
//! uninstall|enable|disable|update ID
//! priority ID {up|down}
//! profile list | create NAME | delete ID | load ID
//! settings show | set [--game-path P] [--mod-download-path P] [--launch-args A]
//! ```

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::library::priority::Direction;

/// Arguments for the `install` command.
#[derive(Debug, Clone, Args)]
pub struct InstallArgs {
    /// Mod archive (.zip) or single file to install.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// A mod id argument.
#[derive(Debug, Clone, Args)]
pub struct ModIdArgs {
    /// Mod id, as shown by `list`.
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `priority` command.
#[derive(Debug, Clone, Args)]
pub struct PriorityArgs {
    /// Mod id, as shown by `list`.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Direction to move the mod in the load order.
    #[arg(value_enum)]
    pub direction: DirectionArg,
}

/// Load order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// Toward higher priority.
    Up,
    /// Toward lower priority.
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Self::Up,
            DirectionArg::Down => Self::Down,
        }
    }
}

/// Arguments for the `profile` command.
#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// Profile subcommand.
    #[command(subcommand)]
    pub subcommand: ProfileSubcommand,
}

/// Profile subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ProfileSubcommand {
    /// Lists saved profiles.
    List,

    /// Saves the currently enabled mods as a profile.
    Create {
        /// Profile name.
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Deletes a profile.
    Delete {
        /// Profile id.
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Enables exactly the mods of a profile.
    Load {
        /// Profile id.
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// Arguments for the `settings` command.
#[derive(Debug, Clone, Args)]
pub struct SettingsArgs {
    /// Settings subcommand.
    #[command(subcommand)]
    pub subcommand: SettingsSubcommand,
}

/// Settings subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum SettingsSubcommand {
    /// Prints the current settings.
    Show,

    /// Changes one or more settings.
    Set(SetSettingsArgs),
}

/// Arguments for `settings set`. Omitted options keep their value; an
/// empty string clears an optional one.
#[derive(Debug, Clone, Default, Args)]
pub struct SetSettingsArgs {
    /// Game executable or install directory.
    #[arg(long = "game-path", value_name = "PATH")]
    pub game_path: Option<PathBuf>,

    /// Folder the mod library is stored in.
    #[arg(long = "mod-download-path", value_name = "PATH")]
    pub mod_download_path: Option<PathBuf>,

    /// Extra arguments passed to the game on launch.
    #[arg(long = "launch-args", value_name = "ARGS", allow_hyphen_values = true)]
    pub launch_args: Option<String>,
}

impl SetSettingsArgs {
    /// Whether no option was given.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.game_path.is_none() && self.mod_download_path.is_none() && self.launch_args.is_none()
    }
}
